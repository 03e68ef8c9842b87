//! schedcheck CLI -- check operation logs for serializability and generate
//! random ones.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use schedcheck_core::{Report, Schedule, ScheduleLimits, Violation};
use serde_json::{json, Value};

#[derive(Debug, Parser)]
#[command(
    name = "schedcheck",
    about = "Conflict- and view-serializability checking for transaction schedules"
)]
pub struct App {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check every complete schedule of an operation log
    Check(CheckArgs),
    /// Generate random operation logs
    Generate(GenerateArgs),
}

#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// Log file to read; stdin when absent or `-`
    pub input: Option<PathBuf>,
    /// Output results as JSON (one object per schedule)
    #[arg(long)]
    pub json: bool,
    /// Print the serial orders or the precedence cycle behind each verdict
    #[arg(long)]
    pub verbose: bool,
    /// Enforce the classic limits of 100 operations, 20 transactions and
    /// 100 attributes per schedule
    #[arg(long)]
    pub bounded: bool,
    /// Maximum operations per schedule
    #[arg(long)]
    pub max_operations: Option<usize>,
    /// Maximum transactions per schedule
    #[arg(long)]
    pub max_transactions: Option<usize>,
    /// Maximum distinct attributes per schedule
    #[arg(long)]
    pub max_attributes: Option<usize>,
}

impl CheckArgs {
    /// Limits requested on the command line. Explicit `--max-*` values
    /// override the `--bounded` defaults.
    #[must_use]
    pub fn limits(&self) -> ScheduleLimits {
        let base = if self.bounded {
            ScheduleLimits::classic()
        } else {
            ScheduleLimits::unbounded()
        };
        ScheduleLimits {
            max_operations: self.max_operations.or(base.max_operations),
            max_transactions: self.max_transactions.or(base.max_transactions),
            max_attributes: self.max_attributes.or(base.max_attributes),
        }
    }

    /// `None` means stdin.
    #[must_use]
    pub fn input_path(&self) -> Option<&Path> {
        self.input
            .as_deref()
            .filter(|path| path.as_os_str() != "-")
    }
}

#[derive(Debug, Parser)]
pub struct GenerateArgs {
    /// Number of logs to generate
    #[arg(long, default_value_t = 1)]
    pub n_log: u64,
    /// Number of transactions per log
    #[arg(long)]
    pub n_transaction: u64,
    /// Number of attributes
    #[arg(long)]
    pub n_attribute: u64,
    /// Number of reads and writes per transaction
    #[arg(long)]
    pub n_operation: u64,
    /// Run transactions one after another instead of interleaving them
    #[arg(long)]
    pub serial: bool,
    /// Output directory for `<id>.log` files; stdout when absent
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

/// One JSON object per checked schedule.
#[must_use]
pub fn report_json(report: &Report) -> Value {
    let verdict = report.verdict();
    let mut result = json!({
        "id": report.schedule_id,
        "transactions": report.transactions,
        "conflict_serializable": verdict.conflict_serializable,
        "view_serializable": verdict.view_serializable,
    });
    match &report.conflict {
        Ok(order) => result["conflict_order"] = json!(order),
        Err(Violation::ConflictCycle(cycle)) => result["conflict_cycle"] = json!(cycle),
        Err(other) => result["conflict_error"] = json!(other.to_string()),
    }
    match &report.view {
        Ok(order) => result["view_order"] = json!(order),
        Err(Violation::NoViewEquivalentOrder { candidates }) => {
            result["view_candidates"] = json!(candidates);
        }
        Err(other) => result["view_error"] = json!(other.to_string()),
    }
    result
}

fn join(order: &[schedcheck_core::TransactionId]) -> String {
    order
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Indented evidence lines printed under a verdict with `--verbose`.
#[must_use]
pub fn witness_lines(report: &Report) -> Vec<String> {
    let conflict = match &report.conflict {
        Ok(order) => format!("  conflict: serial order {}", join(order)),
        Err(violation) => format!("  conflict: {violation}"),
    };
    let view = match &report.view {
        Ok(order) => format!("  view: serial order {}", join(order)),
        Err(violation) => format!("  view: {violation}"),
    };
    vec![conflict, view]
}

/// The single stderr notice for a log that ends inside a schedule.
#[must_use]
pub fn pending_warning(pending: &Schedule<String>) -> String {
    let open: Vec<String> = pending
        .transactions()
        .iter()
        .filter(|&&transaction| !pending.is_committed(transaction))
        .map(ToString::to_string)
        .collect();
    format!(
        "warning: schedule {} is incomplete ({} operations, uncommitted: {}); not checked",
        pending.id(),
        pending.len(),
        open.join(",")
    )
}
