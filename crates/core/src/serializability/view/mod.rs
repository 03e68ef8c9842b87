//! View serializability by exhaustive search over serial orders.
//!
//! # Approach
//!
//! The [`ViewSignature`] of the schedule is computed once. Then every
//! permutation of the schedule's transactions is turned into a simulated
//! serial sequence: the operations of each transaction, in their original
//! relative order, concatenated in permutation order. The schedule is
//! view-serializable iff some candidate has the same signature.
//!
//! The search is brute force, `O(n! * m)` for `n` transactions and `m`
//! operations, and stops at the first matching candidate. It is meant for
//! the handful of transactions a hand-written schedule contains.

use alloc::vec::Vec;
use core::hash::Hash;
use core::ops::ControlFlow;

use hashbrown::HashMap;

use self::permutation::for_each_permutation;
pub use self::signature::{extract_view, ReadsFrom, ViewSignature};
use crate::schedule::types::{Operation, TransactionId};
use crate::schedule::Schedule;
use crate::serializability::error::Violation;

pub mod permutation;
pub mod signature;

/// Splits `operations` per transaction, keeping each transaction's
/// operations in their original relative order.
#[must_use]
pub fn group_by_transaction<'a, Attribute>(
    operations: &'a [Operation<Attribute>],
) -> HashMap<TransactionId, Vec<&'a Operation<Attribute>>> {
    let mut grouped: HashMap<TransactionId, Vec<&Operation<Attribute>>> = HashMap::new();
    for operation in operations {
        grouped
            .entry(operation.transaction)
            .or_default()
            .push(operation);
    }
    grouped
}

/// Builds the serial sequence that runs the transactions of `order` one
/// after the other. Transactions missing from `grouped` contribute nothing.
#[must_use]
pub fn serial_sequence<'a, Attribute>(
    grouped: &HashMap<TransactionId, Vec<&'a Operation<Attribute>>>,
    order: &[TransactionId],
) -> Vec<&'a Operation<Attribute>> {
    order
        .iter()
        .filter_map(|transaction| grouped.get(transaction))
        .flatten()
        .copied()
        .collect()
}

/// Checks whether `schedule` is view-equivalent to some serial execution.
///
/// Candidates are generated from the roster order by swap-based
/// backtracking, so a schedule whose transactions already run one after the
/// other in roster order matches on the first candidate. On success the
/// matching serial order is returned; a schedule without transactions
/// yields an empty order.
///
/// # Errors
///
/// Returns [`Violation::NoViewEquivalentOrder`] once all `n!` candidates
/// have been compared without a match.
pub fn check_view_serializable<Attribute>(
    schedule: &Schedule<Attribute>,
) -> Result<Vec<TransactionId>, Violation>
where
    Attribute: Eq + Hash,
{
    if schedule.transactions().is_empty() {
        return Ok(Vec::new());
    }

    let original = extract_view(schedule.operations());
    let grouped = group_by_transaction(schedule.operations());
    let mut order = schedule.transactions().to_vec();
    let mut candidates: u64 = 0;

    tracing::debug!(
        schedule = schedule.id(),
        transactions = order.len(),
        reads_from = original.reads_from.len(),
        final_writes = original.final_writes.len(),
        "searching view-equivalent serial order"
    );

    let flow = for_each_permutation(&mut order, &mut |candidate_order| {
        candidates += 1;
        let serial = serial_sequence(&grouped, candidate_order);
        if extract_view(serial) == original {
            ControlFlow::Break(candidate_order.to_vec())
        } else {
            tracing::trace!(?candidate_order, "view signature differs");
            ControlFlow::Continue(())
        }
    });

    match flow {
        ControlFlow::Break(serial_order) => {
            tracing::debug!(
                schedule = schedule.id(),
                candidates,
                ?serial_order,
                "view-equivalent serial order found"
            );
            Ok(serial_order)
        }
        ControlFlow::Continue(()) => {
            tracing::debug!(schedule = schedule.id(), candidates, "no view-equivalent order");
            Err(Violation::NoViewEquivalentOrder { candidates })
        }
    }
}

/// `true` iff some serial order of the schedule's transactions has the same
/// reads-from relation and final writes as the schedule.
#[must_use]
pub fn is_view_equivalent<Attribute>(schedule: &Schedule<Attribute>) -> bool
where
    Attribute: Eq + Hash,
{
    check_view_serializable(schedule).is_ok()
}
