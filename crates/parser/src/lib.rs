//! Text front end for `schedcheck_core`.
//!
//! [`parser`] turns individual log lines into operations; [`ingest`] feeds a
//! whole log through a [`ScheduleSplitter`](schedcheck_core::ScheduleSplitter)
//! and collects the resulting schedules.

pub mod ingest;
pub mod parser;

pub use ingest::{read_schedules, CapacityAtLine, Error, Ingested};
pub use parser::{parse_log, parse_operation, ParseError};
