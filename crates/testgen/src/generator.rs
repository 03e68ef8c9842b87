use chrono::{DateTime, Duration, Local};
use rand::distr::{Distribution, Uniform};
use rand::RngExt;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use schedcheck_core::schedule::display::format_log;
use schedcheck_core::Operation;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

#[derive(Clone, Debug, Default, Deserialize, Serialize, TypedBuilder)]
pub struct LogParams {
    pub id: u64,
    pub n_transaction: u64,
    pub n_attribute: u64,
    /// Reads and writes per transaction, commit excluded.
    pub n_operation: u64,
    #[builder(default)]
    pub serial: bool,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct GeneratedLog {
    params: LogParams,
    info: String,
    start: DateTime<Local>,
    end: DateTime<Local>,
    operations: Vec<Operation<String>>,
}

impl GeneratedLog {
    #[must_use]
    pub const fn get_id(&self) -> u64 {
        self.params.id
    }

    #[must_use]
    pub const fn get_params(&self) -> &LogParams {
        &self.params
    }

    #[must_use]
    pub fn get_operations(&self) -> &[Operation<String>] {
        &self.operations
    }

    #[must_use]
    pub fn get_duration(&self) -> Duration {
        self.end - self.start
    }

    /// The log in its line-oriented text form.
    #[must_use]
    pub fn to_log_text(&self) -> String {
        format_log(&self.operations)
    }
}

/// Attribute names are `a0`, `a1`, ...
fn attribute_name(index: u64) -> String {
    format!("a{index}")
}

/// The per-transaction operation lists: `n_operation` random reads and writes
/// followed by a commit. Times are filled in later.
fn transaction_bodies(
    n_transaction: u64,
    n_attribute: u64,
    n_operation: u64,
) -> Vec<Vec<Operation<String>>> {
    let mut random_generator = rand::rng();
    let attribute_range = (n_operation > 0).then(|| Uniform::new(0, n_attribute).unwrap());

    (1..=n_transaction)
        .map(|tid| {
            let mut body = Vec::new();
            if let Some(range) = &attribute_range {
                for _ in 0..n_operation {
                    let attribute = attribute_name(range.sample(&mut random_generator));
                    if random_generator.random::<bool>() {
                        body.push(Operation::read(0, tid, attribute));
                    } else {
                        body.push(Operation::write(0, tid, attribute));
                    }
                }
            }
            body.push(Operation::commit(0, tid));
            body
        })
        .collect()
}

fn stamp(operations: impl IntoIterator<Item = Operation<String>>) -> Vec<Operation<String>> {
    operations
        .into_iter()
        .zip(1..)
        .map(|(mut op, time)| {
            op.time = time;
            op
        })
        .collect()
}

/// Generate one schedule with `n_transaction` transactions (ids `1..=n`),
/// each issuing `n_operation` random reads or writes over `n_attribute`
/// attributes and then committing.
///
/// Transactions are interleaved uniformly at random; every transaction keeps
/// its own operation order, so its commit is its last operation. Times count
/// up from 1. Every transaction commits, so the log never ends inside an
/// incomplete schedule, although it splits into several schedules whenever
/// the transactions seen so far all commit before the next one starts.
///
/// # Panics
///
/// Panics if `n_attribute` is zero while `n_operation` is not (cannot create
/// a uniform distribution over an empty range).
#[must_use]
pub fn generate_single_log(
    n_transaction: u64,
    n_attribute: u64,
    n_operation: u64,
) -> Vec<Operation<String>> {
    let bodies = transaction_bodies(n_transaction, n_attribute, n_operation);
    let mut random_generator = rand::rng();

    let mut queues: Vec<std::vec::IntoIter<Operation<String>>> =
        bodies.into_iter().map(Vec::into_iter).collect();
    let mut remaining: Vec<usize> = queues.iter().map(ExactSizeIterator::len).collect();
    let mut left: usize = remaining.iter().sum();
    let mut interleaved = Vec::with_capacity(left);

    // Picking a transaction with probability proportional to its remaining
    // operations makes every interleaving equally likely.
    while left > 0 {
        let mut pick = random_generator.random_range(0..left);
        let slot = remaining
            .iter()
            .position(|&count| {
                if pick < count {
                    true
                } else {
                    pick -= count;
                    false
                }
            })
            .unwrap_or_default();
        if let Some(op) = queues[slot].next() {
            interleaved.push(op);
        }
        remaining[slot] -= 1;
        left -= 1;
    }

    stamp(interleaved)
}

/// Like [`generate_single_log`], but transactions run one after another in
/// id order. Always conflict- and view-serializable.
///
/// # Panics
///
/// Same as [`generate_single_log`].
#[must_use]
pub fn generate_serial_log(
    n_transaction: u64,
    n_attribute: u64,
    n_operation: u64,
) -> Vec<Operation<String>> {
    stamp(
        transaction_bodies(n_transaction, n_attribute, n_operation)
            .into_iter()
            .flatten(),
    )
}

#[must_use]
pub fn generate_mult_logs(
    n_log: u64,
    n_transaction: u64,
    n_attribute: u64,
    n_operation: u64,
    serial: bool,
) -> Vec<GeneratedLog> {
    (0..n_log)
        .into_par_iter()
        .map(|i_log| {
            let start_time = Local::now();
            let operations = if serial {
                generate_serial_log(n_transaction, n_attribute, n_operation)
            } else {
                generate_single_log(n_transaction, n_attribute, n_operation)
            };
            let end_time = Local::now();
            GeneratedLog {
                params: LogParams {
                    id: i_log,
                    n_transaction,
                    n_attribute,
                    n_operation,
                    serial,
                },
                info: "generated".to_string(),
                start: start_time,
                end: end_time,
                operations,
            }
        })
        .collect()
}
