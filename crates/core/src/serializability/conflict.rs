//! Conflict serializability via the precedence graph.
//!
//! The precedence graph has one vertex per transaction of the schedule and
//! an edge `Ti -> Tj` whenever an operation of `Ti` conflicts with a later
//! operation of `Tj` (same attribute, different transactions, at least one
//! write). The schedule is conflict-serializable exactly when this graph is
//! acyclic, and any topological order of it is a conflict-equivalent serial
//! order.

use alloc::vec::Vec;
use core::hash::Hash;

use crate::graph::digraph::DiGraph;
use crate::schedule::types::TransactionId;
use crate::schedule::Schedule;
use crate::serializability::error::Violation;

/// Precedence graph of a schedule, with the roster order kept for
/// deterministic traversal.
#[derive(Debug, Clone)]
pub struct PrecedenceGraph {
    pub graph: DiGraph<TransactionId>,
    pub transactions: Vec<TransactionId>,
}

impl PrecedenceGraph {
    #[must_use]
    pub fn from_schedule<Attribute>(schedule: &Schedule<Attribute>) -> Self
    where
        Attribute: Eq + Hash,
    {
        let mut graph = DiGraph::default();
        for &transaction in schedule.transactions() {
            graph.add_vertex(transaction);
        }

        let operations = schedule.operations();
        for (i, earlier) in operations.iter().enumerate() {
            for later in &operations[i + 1..] {
                if earlier.conflicts_with(later) {
                    graph.add_edge(earlier.transaction, later.transaction);
                }
            }
        }

        Self {
            graph,
            transactions: schedule.transactions().to_vec(),
        }
    }

    /// One cycle of the graph, starting from the earliest rostered
    /// transaction that reaches it.
    #[must_use]
    pub fn find_cycle(&self) -> Option<Vec<TransactionId>> {
        self.graph.find_cycle(&self.transactions)
    }

    /// A serial order consistent with every edge, preferring roster order
    /// among independent transactions.
    #[must_use]
    pub fn serial_order(&self) -> Option<Vec<TransactionId>> {
        self.graph.topological_order(&self.transactions)
    }
}

/// Checks whether `schedule` is conflict-serializable.
///
/// On success returns a conflict-equivalent serial order of the schedule's
/// transactions. A schedule without transactions is trivially serializable
/// and yields an empty order.
///
/// # Errors
///
/// Returns [`Violation::ConflictCycle`] with the transactions of one cycle
/// in the precedence graph.
pub fn check_conflict_serializable<Attribute>(
    schedule: &Schedule<Attribute>,
) -> Result<Vec<TransactionId>, Violation>
where
    Attribute: Eq + Hash,
{
    if schedule.transactions().is_empty() {
        return Ok(Vec::new());
    }

    let precedence = PrecedenceGraph::from_schedule(schedule);
    tracing::debug!(
        schedule = schedule.id(),
        transactions = precedence.transactions.len(),
        edges = precedence.graph.edge_count(),
        "built precedence graph"
    );

    if let Some(cycle) = precedence.find_cycle() {
        tracing::debug!(schedule = schedule.id(), ?cycle, "precedence cycle");
        return Err(Violation::ConflictCycle(cycle));
    }

    precedence
        .serial_order()
        .ok_or_else(|| Violation::ConflictCycle(Vec::new()))
}

/// `true` iff the precedence graph of `schedule` is acyclic.
#[must_use]
pub fn is_conflict_serializable<Attribute>(schedule: &Schedule<Attribute>) -> bool
where
    Attribute: Eq + Hash,
{
    if schedule.transactions().is_empty() {
        return true;
    }
    PrecedenceGraph::from_schedule(schedule).find_cycle().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::types::Operation;

    fn schedule(ops: Vec<Operation<&'static str>>) -> Schedule<&'static str> {
        let mut schedule = Schedule::new(1);
        for op in ops {
            schedule.push(op).unwrap();
        }
        schedule
    }

    fn tids(ids: &[u64]) -> Vec<TransactionId> {
        ids.iter().copied().map(TransactionId).collect()
    }

    #[test]
    fn test_write_write_edge() {
        let s = schedule(vec![
            Operation::write(1, 1, "x"),
            Operation::write(2, 2, "x"),
            Operation::commit(3, 1),
            Operation::commit(4, 2),
        ]);
        let precedence = PrecedenceGraph::from_schedule(&s);
        assert!(precedence.graph.has_edge(&TransactionId(1), &TransactionId(2)));
        assert!(!precedence.graph.has_edge(&TransactionId(2), &TransactionId(1)));
        assert_eq!(check_conflict_serializable(&s), Ok(tids(&[1, 2])));
        assert!(is_conflict_serializable(&s));
    }

    #[test]
    fn test_read_write_cycle() {
        let s = schedule(vec![
            Operation::read(1, 1, "x"),
            Operation::write(2, 2, "x"),
            Operation::write(3, 1, "x"),
            Operation::commit(4, 1),
            Operation::commit(5, 2),
        ]);
        assert!(!is_conflict_serializable(&s));
        assert_eq!(
            check_conflict_serializable(&s),
            Err(Violation::ConflictCycle(tids(&[1, 2])))
        );
    }

    #[test]
    fn test_reads_never_conflict() {
        let s = schedule(vec![
            Operation::read(1, 1, "x"),
            Operation::read(2, 2, "x"),
            Operation::read(3, 1, "x"),
            Operation::commit(4, 1),
            Operation::commit(5, 2),
        ]);
        let precedence = PrecedenceGraph::from_schedule(&s);
        assert_eq!(precedence.graph.edge_count(), 0);
        assert_eq!(precedence.graph.vertex_count(), 2);
        assert!(is_conflict_serializable(&s));
    }

    #[test]
    fn test_same_transaction_never_conflicts() {
        let s = schedule(vec![
            Operation::write(1, 1, "x"),
            Operation::read(2, 1, "x"),
            Operation::write(3, 1, "x"),
            Operation::commit(4, 1),
        ]);
        let precedence = PrecedenceGraph::from_schedule(&s);
        assert_eq!(precedence.graph.edge_count(), 0);
        assert_eq!(check_conflict_serializable(&s), Ok(tids(&[1])));
    }

    #[test]
    fn test_serial_order_follows_edges_not_roster() {
        // T1 appears first but T2 must precede it
        let s = schedule(vec![
            Operation::read(1, 1, "y"),
            Operation::write(2, 2, "x"),
            Operation::read(3, 1, "x"),
            Operation::commit(4, 1),
            Operation::commit(5, 2),
        ]);
        assert_eq!(check_conflict_serializable(&s), Ok(tids(&[2, 1])));
    }

    #[test]
    fn test_three_transaction_cycle() {
        let s = schedule(vec![
            Operation::write(1, 1, "x"),
            Operation::write(2, 2, "x"),
            Operation::write(3, 2, "y"),
            Operation::write(4, 3, "y"),
            Operation::write(5, 3, "z"),
            Operation::write(6, 1, "z"),
            Operation::commit(7, 1),
            Operation::commit(8, 2),
            Operation::commit(9, 3),
        ]);
        assert_eq!(
            check_conflict_serializable(&s),
            Err(Violation::ConflictCycle(tids(&[1, 2, 3])))
        );
    }

    #[test]
    fn test_empty_schedule_is_serializable() {
        let s: Schedule<&str> = Schedule::new(1);
        assert!(is_conflict_serializable(&s));
        assert_eq!(check_conflict_serializable(&s), Ok(vec![]));
    }
}
