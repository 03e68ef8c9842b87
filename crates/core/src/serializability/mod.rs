use core::hash::Hash;

use crate::schedule::Schedule;

pub mod conflict;
pub mod error;
pub mod report;
pub mod view;

pub use conflict::{check_conflict_serializable, is_conflict_serializable};
pub use error::Violation;
pub use report::Report;
pub use view::{check_view_serializable, is_view_equivalent};

/// The two serializability verdicts for one schedule.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// The precedence graph is acyclic.
    pub conflict_serializable: bool,
    /// Some serial order has the same reads-from relation and final writes.
    pub view_serializable: bool,
}

/// Runs both serializability checks on `schedule`.
///
/// The checks are independent and only read the schedule. Callers are
/// expected to skip schedules without operations; use [`report`] to have
/// that done for you.
#[must_use]
pub fn analyze<Attribute>(schedule: &Schedule<Attribute>) -> Verdict
where
    Attribute: Eq + Hash,
{
    Verdict {
        conflict_serializable: is_conflict_serializable(schedule),
        view_serializable: is_view_equivalent(schedule),
    }
}

/// Analyses `schedule` and keeps the witnesses of both checks.
///
/// Returns `None` for a schedule without operations: such a schedule gets
/// no verdict at all.
#[must_use]
pub fn report<Attribute>(schedule: &Schedule<Attribute>) -> Option<Report>
where
    Attribute: Eq + Hash,
{
    if schedule.is_empty() {
        tracing::debug!(schedule = schedule.id(), "skipping empty schedule");
        return None;
    }

    tracing::debug!(
        schedule = schedule.id(),
        operations = schedule.len(),
        transactions = schedule.transactions().len(),
        "analysing schedule"
    );

    Some(Report {
        schedule_id: schedule.id(),
        transactions: schedule.transactions().to_vec(),
        conflict: check_conflict_serializable(schedule),
        view: check_view_serializable(schedule),
    })
}
