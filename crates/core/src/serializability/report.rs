use alloc::vec::Vec;
use core::fmt::{Display, Formatter, Result};

use crate::schedule::types::TransactionId;
use crate::serializability::error::Violation;
use crate::serializability::Verdict;

/// Outcome of analysing one completed schedule, with the evidence behind
/// each verdict.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub schedule_id: u64,
    /// The schedule's transactions, in order of first appearance.
    pub transactions: Vec<TransactionId>,
    /// A conflict-equivalent serial order, or the precedence cycle.
    pub conflict: core::result::Result<Vec<TransactionId>, Violation>,
    /// A view-equivalent serial order, or the number of orders tried.
    pub view: core::result::Result<Vec<TransactionId>, Violation>,
}

impl Report {
    #[must_use]
    pub const fn verdict(&self) -> Verdict {
        Verdict {
            conflict_serializable: self.conflict.is_ok(),
            view_serializable: self.view.is_ok(),
        }
    }
}

/// Renders the verdict line `<id> <t1>,<t2>,... <SS|NS> <SV|NV>`.
impl Display for Report {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{} ", self.schedule_id)?;
        for (i, transaction) in self.transactions.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{transaction}")?;
        }
        write!(f, " {}", self.verdict())
    }
}

/// Renders `SS`/`NS` followed by `SV`/`NV`.
impl Display for Verdict {
    fn fmt(&self, f: &mut Formatter) -> Result {
        let conflict = if self.conflict_serializable { "SS" } else { "NS" };
        let view = if self.view_serializable { "SV" } else { "NV" };
        write!(f, "{conflict} {view}")
    }
}
