//! Grouping of a raw operation stream into successive schedules.
//!
//! A schedule closes as soon as every transaction referenced in it has
//! committed. The next operation then opens a fresh schedule with the next
//! identifier. Identifiers start at 1.

use core::hash::Hash;
use core::mem;

use crate::schedule::error::CapacityError;
use crate::schedule::types::Operation;
use crate::schedule::{Schedule, ScheduleLimits};

/// Incrementally splits an operation stream into complete schedules.
#[derive(Debug)]
pub struct ScheduleSplitter<Attribute>
where
    Attribute: Eq + Hash,
{
    current: Schedule<Attribute>,
    limits: ScheduleLimits,
}

impl<Attribute> Default for ScheduleSplitter<Attribute>
where
    Attribute: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new(ScheduleLimits::unbounded())
    }
}

impl<Attribute> ScheduleSplitter<Attribute>
where
    Attribute: Eq + Hash + Clone,
{
    #[must_use]
    pub fn new(limits: ScheduleLimits) -> Self {
        Self {
            current: Schedule::with_limits(1, limits),
            limits,
        }
    }

    /// Identifier the schedule currently being filled will carry.
    #[must_use]
    pub const fn next_id(&self) -> u64 {
        self.current.id()
    }

    /// Feeds one operation into the current schedule.
    ///
    /// Returns the schedule if this operation completed it.
    ///
    /// # Errors
    ///
    /// Propagates the [`CapacityError`] of the current schedule; the
    /// operation is not recorded.
    pub fn push(
        &mut self,
        operation: Operation<Attribute>,
    ) -> Result<Option<Schedule<Attribute>>, CapacityError> {
        self.current.push(operation)?;

        if !self.current.is_complete() {
            return Ok(None);
        }

        let next = Schedule::with_limits(self.current.id() + 1, self.limits);
        let done = mem::replace(&mut self.current, next);
        tracing::debug!(
            schedule = done.id(),
            operations = done.len(),
            transactions = done.transactions().len(),
            "schedule closed"
        );
        Ok(Some(done))
    }

    /// Consumes the splitter and returns the trailing schedule, if it holds
    /// any operation. Such a schedule is never complete.
    #[must_use]
    pub fn finish(self) -> Option<Schedule<Attribute>> {
        (!self.current.is_empty()).then_some(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::types::TransactionId;

    #[test]
    fn test_splits_on_all_committed() {
        let ops = vec![
            Operation::read(1, 1, "X"),
            Operation::read(2, 2, "X"),
            Operation::write(3, 2, "Y"),
            Operation::commit(4, 2),
            Operation::commit(5, 1),
            Operation::write(6, 3, "X"),
            Operation::commit(7, 3),
            Operation::read(8, 4, "Y"),
        ];

        let mut splitter = ScheduleSplitter::default();
        let mut closed = Vec::new();
        for op in ops {
            if let Some(schedule) = splitter.push(op).unwrap() {
                closed.push(schedule);
            }
        }

        assert_eq!(closed.len(), 2);
        assert_eq!(closed[0].id(), 1);
        assert_eq!(closed[0].len(), 5);
        assert_eq!(
            closed[0].transactions(),
            &[TransactionId(1), TransactionId(2)]
        );
        assert_eq!(closed[1].id(), 2);
        assert_eq!(closed[1].transactions(), &[TransactionId(3)]);

        assert_eq!(splitter.next_id(), 3);
        let rest = splitter.finish().unwrap();
        assert_eq!(rest.id(), 3);
        assert!(!rest.is_complete());
    }

    #[test]
    fn test_finish_without_pending_operations() {
        let mut splitter = ScheduleSplitter::default();
        assert!(splitter.push(Operation::write(1, 1, "X")).unwrap().is_none());
        assert!(splitter.push(Operation::commit(2, 1)).unwrap().is_some());
        assert!(splitter.finish().is_none());
    }

    #[test]
    fn test_capacity_error_keeps_schedule() {
        let limits = ScheduleLimits {
            max_transactions: Some(1),
            ..ScheduleLimits::unbounded()
        };
        let mut splitter = ScheduleSplitter::new(limits);
        splitter.push(Operation::write(1, 1, "X")).unwrap();
        assert!(splitter.push(Operation::write(2, 2, "X")).is_err());
        let closed = splitter.push(Operation::commit(3, 1)).unwrap().unwrap();
        assert_eq!(closed.len(), 2);
    }
}
