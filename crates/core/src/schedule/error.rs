use core::fmt::{Display, Formatter, Result};

/// The resource a bounded [`Schedule`](super::Schedule) ran out of.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Resource {
    /// Total number of operations in the schedule.
    Operations,
    /// Number of distinct transactions in the roster.
    Transactions,
    /// Number of distinct attributes read or written.
    Attributes,
}

impl Display for Resource {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Self::Operations => write!(f, "operations"),
            Self::Transactions => write!(f, "transactions"),
            Self::Attributes => write!(f, "attributes"),
        }
    }
}

/// Appending an operation would exceed a configured schedule limit.
///
/// The schedule is left untouched when this is returned.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CapacityError {
    pub resource: Resource,
    pub limit: usize,
}

impl Display for CapacityError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(
            f,
            "schedule capacity exceeded: more than {} {}",
            self.limit, self.resource
        )
    }
}

impl core::error::Error for CapacityError {}
