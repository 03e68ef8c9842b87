use core::fmt::{Display, Formatter, Result};

use derive_more::From;

/// Identifier of a transaction as it appears in the operation log.
///
/// Identifiers are opaque: two operations belong to the same transaction
/// exactly when their identifiers are equal. Ordering is numeric and is only
/// used for deterministic output, never for analysis.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From)]
pub struct TransactionId(pub u64);

impl Display for TransactionId {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{}", self.0)
    }
}

/// What an operation does.
///
/// Reads and writes always name the attribute they touch; a commit carries
/// no attribute and never conflicts with anything.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action<Attribute> {
    Read(Attribute),
    Write(Attribute),
    Commit,
}

impl<Attribute> Action<Attribute> {
    /// The attribute touched by a read or write, `None` for a commit.
    #[must_use]
    pub const fn attribute(&self) -> Option<&Attribute> {
        match self {
            Self::Read(attribute) | Self::Write(attribute) => Some(attribute),
            Self::Commit => None,
        }
    }

    #[must_use]
    pub const fn is_write(&self) -> bool {
        matches!(self, Self::Write(_))
    }

    #[must_use]
    pub const fn is_commit(&self) -> bool {
        matches!(self, Self::Commit)
    }

    /// Single-letter code used by the log format (`R`, `W` or `C`).
    #[must_use]
    pub const fn code(&self) -> char {
        match self {
            Self::Read(_) => 'R',
            Self::Write(_) => 'W',
            Self::Commit => 'C',
        }
    }
}

/// One entry of the operation log.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Operation<Attribute> {
    /// Sequence position reported by the log. Kept for reporting only; the
    /// analysis relies on the order operations were appended in.
    pub time: u64,
    pub transaction: TransactionId,
    pub action: Action<Attribute>,
}

impl<Attribute> Operation<Attribute> {
    #[must_use]
    pub fn read(time: u64, transaction: u64, attribute: Attribute) -> Self {
        Self {
            time,
            transaction: TransactionId(transaction),
            action: Action::Read(attribute),
        }
    }

    #[must_use]
    pub fn write(time: u64, transaction: u64, attribute: Attribute) -> Self {
        Self {
            time,
            transaction: TransactionId(transaction),
            action: Action::Write(attribute),
        }
    }

    #[must_use]
    pub fn commit(time: u64, transaction: u64) -> Self {
        Self {
            time,
            transaction: TransactionId(transaction),
            action: Action::Commit,
        }
    }

    #[must_use]
    pub const fn attribute(&self) -> Option<&Attribute> {
        self.action.attribute()
    }

    /// Two operations conflict when they come from different transactions,
    /// touch the same attribute and at least one of them writes it.
    #[must_use]
    pub fn conflicts_with(&self, other: &Self) -> bool
    where
        Attribute: PartialEq,
    {
        if self.transaction == other.transaction {
            return false;
        }
        match (self.attribute(), other.attribute()) {
            (Some(a), Some(b)) => a == b && (self.action.is_write() || other.action.is_write()),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_accessors() {
        let read = Action::Read("x");
        let write = Action::Write("x");
        let commit: Action<&str> = Action::Commit;

        assert_eq!(read.attribute(), Some(&"x"));
        assert_eq!(write.attribute(), Some(&"x"));
        assert_eq!(commit.attribute(), None);

        assert!(write.is_write());
        assert!(!read.is_write());
        assert!(commit.is_commit());

        assert_eq!(
            [read.code(), write.code(), commit.code()],
            ['R', 'W', 'C']
        );
    }

    #[test]
    fn test_conflicts() {
        let r1x = Operation::read(1, 1, "x");
        let r2x = Operation::read(2, 2, "x");
        let w2x = Operation::write(3, 2, "x");
        let w1x = Operation::write(4, 1, "x");
        let w2y = Operation::write(5, 2, "y");
        let c2 = Operation::commit(6, 2);

        assert!(r1x.conflicts_with(&w2x));
        assert!(w2x.conflicts_with(&r1x));
        assert!(w2x.conflicts_with(&w1x));
        // read-read never conflicts
        assert!(!r1x.conflicts_with(&r2x));
        // same transaction never conflicts
        assert!(!r1x.conflicts_with(&w1x));
        // different attributes
        assert!(!r1x.conflicts_with(&w2y));
        // commits carry no attribute
        assert!(!c2.conflicts_with(&w1x));
        assert!(!w1x.conflicts_with(&c2));
    }

    #[test]
    fn test_transaction_id_display() {
        assert_eq!(format!("{}", TransactionId(42)), "42");
        assert_eq!(TransactionId::from(7_u64), TransactionId(7));
    }
}
