//! View properties of an operation sequence.
//!
//! Two operation sequences over the same transactions are view-equivalent
//! when every read observes the same writer transaction in both and every
//! attribute is last written by the same transaction in both. The
//! [`ViewSignature`] captures exactly these two facts.

use core::hash::Hash;

use hashbrown::{HashMap, HashSet};

use crate::schedule::types::{Action, Operation, TransactionId};

/// A read of `reader` observing the value written by `writer`.
///
/// Reads of the initial database state (no earlier write on the attribute)
/// produce no pair. A transaction reading its own write produces a pair
/// with `reader == writer`.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReadsFrom {
    pub reader: TransactionId,
    pub writer: TransactionId,
}

/// Reads-from relation and final-write mapping of an operation sequence.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSignature<Attribute>
where
    Attribute: Eq + Hash,
{
    pub reads_from: HashSet<ReadsFrom>,
    /// The transaction performing the last write of every written attribute.
    pub final_writes: HashMap<Attribute, TransactionId>,
}

impl<Attribute> Default for ViewSignature<Attribute>
where
    Attribute: Eq + Hash,
{
    fn default() -> Self {
        Self {
            reads_from: HashSet::new(),
            final_writes: HashMap::new(),
        }
    }
}

/// Computes the [`ViewSignature`] of any ordered operation sequence.
///
/// Each read is paired with the transaction of the nearest preceding write
/// on the same attribute. The final-write mapping records, per written
/// attribute, the transaction of its last write. A single forward pass
/// tracking the latest writer per attribute yields both. Commits are
/// ignored.
pub fn extract_view<'a, Attribute, I>(operations: I) -> ViewSignature<&'a Attribute>
where
    Attribute: Eq + Hash + 'a,
    I: IntoIterator<Item = &'a Operation<Attribute>>,
{
    let mut signature = ViewSignature::default();

    for operation in operations {
        match &operation.action {
            Action::Read(attribute) => {
                if let Some(&writer) = signature.final_writes.get(attribute) {
                    signature.reads_from.insert(ReadsFrom {
                        reader: operation.transaction,
                        writer,
                    });
                }
            }
            Action::Write(attribute) => {
                signature
                    .final_writes
                    .insert(attribute, operation.transaction);
            }
            Action::Commit => {}
        }
    }

    signature
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rf(reader: u64, writer: u64) -> ReadsFrom {
        ReadsFrom {
            reader: TransactionId(reader),
            writer: TransactionId(writer),
        }
    }

    #[test]
    fn test_initial_reads_produce_nothing() {
        let ops = vec![
            Operation::read(1, 1, "x"),
            Operation::read(2, 2, "y"),
            Operation::commit(3, 1),
        ];
        let view = extract_view(&ops);
        assert!(view.reads_from.is_empty());
        assert!(view.final_writes.is_empty());
    }

    #[test]
    fn test_nearest_preceding_write() {
        let ops = vec![
            Operation::write(1, 1, "x"),
            Operation::write(2, 2, "x"),
            Operation::read(3, 3, "x"),
            Operation::write(4, 1, "x"),
            Operation::read(5, 2, "x"),
        ];
        let view = extract_view(&ops);
        assert_eq!(view.reads_from, [rf(3, 2), rf(2, 1)].into_iter().collect());
        assert_eq!(view.final_writes.len(), 1);
        assert_eq!(view.final_writes[&"x"], TransactionId(1));
    }

    #[test]
    fn test_write_after_read_is_not_observed() {
        let ops = vec![Operation::read(1, 1, "x"), Operation::write(2, 2, "x")];
        let view = extract_view(&ops);
        assert!(view.reads_from.is_empty());
        assert_eq!(view.final_writes[&"x"], TransactionId(2));
    }

    #[test]
    fn test_own_write_is_recorded() {
        let ops = vec![Operation::write(1, 1, "x"), Operation::read(2, 1, "x")];
        let view = extract_view(&ops);
        assert_eq!(view.reads_from, [rf(1, 1)].into_iter().collect());
    }

    #[test]
    fn test_duplicate_pairs_collapse() {
        let ops = vec![
            Operation::write(1, 1, "x"),
            Operation::read(2, 2, "x"),
            Operation::read(3, 2, "x"),
        ];
        let view = extract_view(&ops);
        assert_eq!(view.reads_from.len(), 1);
    }

    #[test]
    fn test_one_final_write_per_attribute() {
        let ops = vec![
            Operation::write(1, 1, "x"),
            Operation::write(2, 2, "y"),
            Operation::write(3, 2, "x"),
            Operation::write(4, 1, "y"),
            Operation::commit(5, 1),
        ];
        let view = extract_view(&ops);
        assert_eq!(view.final_writes.len(), 2);
        assert_eq!(view.final_writes[&"x"], TransactionId(2));
        assert_eq!(view.final_writes[&"y"], TransactionId(1));
    }
}
