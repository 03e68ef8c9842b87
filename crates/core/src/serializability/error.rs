use alloc::vec::Vec;
use core::fmt::{Display, Formatter, Result};

use crate::schedule::types::TransactionId;

/// Why a schedule is not equivalent to any serial execution.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The precedence graph contains a cycle through these transactions,
    /// listed in edge order. The last one precedes the first.
    ConflictCycle(Vec<TransactionId>),
    /// None of the serial orders of the schedule's transactions reproduces
    /// its reads-from relation and final writes.
    NoViewEquivalentOrder {
        /// Number of serial orders that were compared.
        candidates: u64,
    },
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Self::ConflictCycle(cycle) => {
                write!(f, "precedence cycle")?;
                for transaction in cycle {
                    write!(f, " {transaction} ->")?;
                }
                if let Some(first) = cycle.first() {
                    write!(f, " {first}")?;
                }
                Ok(())
            }
            Self::NoViewEquivalentOrder { candidates } => {
                write!(f, "no view-equivalent serial order among {candidates} candidates")
            }
        }
    }
}

impl core::error::Error for Violation {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let cycle = Violation::ConflictCycle(vec![TransactionId(1), TransactionId(2)]);
        assert_eq!(cycle.to_string(), "precedence cycle 1 -> 2 -> 1");

        let view = Violation::NoViewEquivalentOrder { candidates: 6 };
        assert_eq!(
            view.to_string(),
            "no view-equivalent serial order among 6 candidates"
        );
    }
}
