use schedcheck_core::{CapacityError, Schedule, ScheduleLimits, ScheduleSplitter};

use crate::parser::{parse_record_line, records, ParseError};

/// A record that did not fit into its schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityAtLine {
    pub line: usize,
    pub schedule: u64,
    pub error: CapacityError,
}

impl core::fmt::Display for CapacityAtLine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "line {} (schedule {}): {}",
            self.line, self.schedule, self.error
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::From)]
pub enum Error {
    Parse(ParseError),
    Capacity(CapacityAtLine),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "{e}"),
            Self::Capacity(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {}

/// Everything read from one log.
#[derive(Debug, Clone, Default)]
pub struct Ingested {
    /// Complete schedules, in input order.
    pub schedules: Vec<Schedule<String>>,
    /// Operations after the last complete schedule. Never analysed.
    pub pending: Option<Schedule<String>>,
}

/// Parse `input` and split it into schedules bounded by `limits`.
///
/// # Errors
///
/// Stops at the first malformed record or the first record that exceeds a
/// limit. Nothing read before that point is returned.
pub fn read_schedules(input: &str, limits: ScheduleLimits) -> Result<Ingested, Error> {
    let mut splitter = ScheduleSplitter::new(limits);
    let mut schedules = Vec::new();

    for (line_no, line) in records(input) {
        let operation = parse_record_line(line, line_no)?;
        let schedule = splitter.next_id();
        let closed = splitter.push(operation).map_err(|error| CapacityAtLine {
            line: line_no,
            schedule,
            error,
        })?;
        schedules.extend(closed);
    }

    let pending = splitter.finish();
    tracing::debug!(
        schedules = schedules.len(),
        pending_operations = pending.as_ref().map_or(0, Schedule::len),
        "log ingested"
    );

    Ok(Ingested { schedules, pending })
}
