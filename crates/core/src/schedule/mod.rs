//! The schedule model: an ordered operation log plus its transaction roster.
//!
//! A [`Schedule`] is built incrementally, one [`Operation`] at a time. Every
//! transaction referenced by an appended operation joins the roster (in order
//! of first appearance), and a commit marks its transaction as committed. The
//! schedule never closes itself; [`Schedule::is_complete`] only reports when
//! every rostered transaction has committed. Grouping a raw stream into
//! successive schedules is done by [`splitter::ScheduleSplitter`].

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::{HashMap, HashSet};

use self::error::{CapacityError, Resource};
use self::types::{Action, Operation, TransactionId};

pub mod display;
pub mod error;
pub mod splitter;
pub mod types;

/// Optional upper bounds on the size of a schedule.
///
/// `None` means unbounded. Exceeding a bound is reported as a
/// [`CapacityError`] instead of dropping data.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ScheduleLimits {
    pub max_operations: Option<usize>,
    pub max_transactions: Option<usize>,
    pub max_attributes: Option<usize>,
}

impl ScheduleLimits {
    /// No limits at all.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            max_operations: None,
            max_transactions: None,
            max_attributes: None,
        }
    }

    /// The fixed capacities of the classic coursework checker:
    /// 100 operations, 20 transactions and 100 attributes per schedule.
    #[must_use]
    pub const fn classic() -> Self {
        Self {
            max_operations: Some(100),
            max_transactions: Some(20),
            max_attributes: Some(100),
        }
    }
}

/// An interleaved log of operations issued by several transactions.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct Schedule<Attribute>
where
    Attribute: Eq + Hash,
{
    id: u64,
    operations: Vec<Operation<Attribute>>,
    /// Distinct transactions in order of first appearance.
    transactions: Vec<TransactionId>,
    committed: HashMap<TransactionId, bool>,
    /// Distinct attributes in order of first appearance.
    attributes: Vec<Attribute>,
    seen_attributes: HashSet<Attribute>,
    limits: ScheduleLimits,
}

impl<Attribute> Schedule<Attribute>
where
    Attribute: Eq + Hash + Clone,
{
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self::with_limits(id, ScheduleLimits::unbounded())
    }

    #[must_use]
    pub fn with_limits(id: u64, limits: ScheduleLimits) -> Self {
        Self {
            id,
            operations: Vec::new(),
            transactions: Vec::new(),
            committed: HashMap::new(),
            attributes: Vec::new(),
            seen_attributes: HashSet::new(),
            limits,
        }
    }

    /// Appends `operation` to the log.
    ///
    /// The owning transaction joins the roster if it is new, and is marked
    /// committed when `operation` is a commit.
    ///
    /// # Errors
    ///
    /// Returns a [`CapacityError`] if the operation would exceed one of the
    /// schedule's [`ScheduleLimits`]. Nothing is appended in that case.
    pub fn push(&mut self, operation: Operation<Attribute>) -> Result<(), CapacityError> {
        self.check_capacity(&operation)?;

        let transaction = operation.transaction;
        if !self.committed.contains_key(&transaction) {
            self.transactions.push(transaction);
            self.committed.insert(transaction, false);
        }

        if let Some(attribute) = operation.attribute() {
            if self.seen_attributes.insert(attribute.clone()) {
                self.attributes.push(attribute.clone());
            }
        }

        if let Action::Commit = operation.action {
            self.committed.insert(transaction, true);
        }

        self.operations.push(operation);
        Ok(())
    }

    fn check_capacity(&self, operation: &Operation<Attribute>) -> Result<(), CapacityError> {
        let exceeds = |limit: Option<usize>, used: usize| limit.filter(|&limit| used >= limit);

        if let Some(limit) = exceeds(self.limits.max_operations, self.operations.len()) {
            return Err(CapacityError {
                resource: Resource::Operations,
                limit,
            });
        }

        if !self.committed.contains_key(&operation.transaction) {
            if let Some(limit) = exceeds(self.limits.max_transactions, self.transactions.len()) {
                return Err(CapacityError {
                    resource: Resource::Transactions,
                    limit,
                });
            }
        }

        if let Some(attribute) = operation.attribute() {
            if !self.seen_attributes.contains(attribute) {
                if let Some(limit) = exceeds(self.limits.max_attributes, self.attributes.len()) {
                    return Err(CapacityError {
                        resource: Resource::Attributes,
                        limit,
                    });
                }
            }
        }

        Ok(())
    }
}

impl<Attribute> Schedule<Attribute>
where
    Attribute: Eq + Hash,
{
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub const fn limits(&self) -> ScheduleLimits {
        self.limits
    }

    /// The operation log in append order.
    #[must_use]
    pub fn operations(&self) -> &[Operation<Attribute>] {
        &self.operations
    }

    /// The distinct transactions, in order of first appearance.
    #[must_use]
    pub fn transactions(&self) -> &[TransactionId] {
        &self.transactions
    }

    /// The distinct attributes touched by reads or writes, in order of first
    /// appearance.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// `true` if a commit for `transaction` has been appended.
    #[must_use]
    pub fn is_committed(&self, transaction: TransactionId) -> bool {
        self.committed.get(&transaction).copied().unwrap_or(false)
    }

    /// `true` once the roster is non-empty and every transaction in it has
    /// committed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.transactions.is_empty() && self.committed.values().all(|&done| done)
    }
}
