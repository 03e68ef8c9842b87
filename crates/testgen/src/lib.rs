//! Random schedule generation for testing and benchmarking the checker.

pub mod generator;

pub use generator::{
    generate_mult_logs, generate_serial_log, generate_single_log, GeneratedLog, LogParams,
};
pub use schedcheck_core::schedule::display::format_log;
