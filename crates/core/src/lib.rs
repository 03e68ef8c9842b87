//! Serializability checking for interleaved transaction schedules.
//!
//! `schedcheck_core` decides, for a finite log of read, write and commit
//! operations issued by several transactions, whether that log is
//! equivalent to some serial (non-interleaved) execution of the same
//! transactions. Two classical notions are checked:
//!
//! 1. **Conflict serializability** -- the precedence graph, with an edge
//!    `Ti -> Tj` whenever an operation of `Ti` conflicts with a later one of
//!    `Tj`, is acyclic. Checked in polynomial time.
//! 2. **View serializability** -- some serial order reproduces the schedule's
//!    reads-from relation and final writes. Checked by exhaustive search over
//!    all `n!` serial orders, stopping at the first match.
//!
//! Every conflict-serializable schedule is view-serializable; the converse
//! fails for schedules with blind writes.
//!
//! # Entry point
//!
//! Operations are appended to a [`Schedule`]; a [`ScheduleSplitter`] groups
//! a raw operation stream into schedules that close once all their
//! transactions have committed. [`analyze()`] yields the pair of verdicts,
//! and [`report()`] additionally keeps the serial orders or the precedence
//! cycle that justify them.
//!
//! ```rust,ignore
//! use schedcheck_core::{report, Operation, Schedule};
//!
//! let mut schedule = Schedule::new(1);
//! schedule.push(Operation::read(1, 1, "x"))?;
//! schedule.push(Operation::write(2, 2, "x"))?;
//! schedule.push(Operation::commit(3, 1))?;
//! schedule.push(Operation::commit(4, 2))?;
//!
//! if let Some(report) = report(&schedule) {
//!     println!("{report}"); // 1 1,2 SS SV
//! }
//! ```
//!
//! # Crate features
//!
//! - **`serde`** -- enables `Serialize`/`Deserialize` derives on core types
//!   (`Schedule`, `Operation`, `TransactionId`, `Verdict`, `Report`, ...).
//!
//! This crate is `no_std` compatible (requires `alloc`). The log parser lives
//! in the separate `schedcheck_parser` crate.

#![cfg_attr(not(test), no_std)]
extern crate alloc;

pub mod graph;
pub mod schedule;
pub mod serializability;

pub use schedule::error::CapacityError;
pub use schedule::splitter::ScheduleSplitter;
pub use schedule::types::{Action, Operation, TransactionId};
pub use schedule::{Schedule, ScheduleLimits};
pub use serializability::{analyze, report, Report, Verdict, Violation};
