//! Generated logs pushed through the parser and both checks.

use proptest::prelude::*;
use schedcheck_core::{analyze, report, Schedule, ScheduleLimits, TransactionId};
use schedcheck_parser::{parse_log, read_schedules};
use schedcheck_testgen::{format_log, generate_mult_logs, generate_serial_log, generate_single_log};

fn sizes() -> impl Strategy<Value = (u64, u64, u64)> {
    (1u64..=4, 1u64..=3, 0u64..=3)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_text_round_trips((n_txn, n_attr, n_op) in sizes()) {
        let ops = generate_single_log(n_txn, n_attr, n_op);
        let text = format_log(&ops);
        prop_assert_eq!(parse_log(&text), Ok(ops));
    }

    #[test]
    fn generated_logs_split_without_leftovers((n_txn, n_attr, n_op) in sizes()) {
        let ops = generate_single_log(n_txn, n_attr, n_op);
        let ingested = read_schedules(&format_log(&ops), ScheduleLimits::unbounded()).unwrap();
        prop_assert!(ingested.pending.is_none());

        let total: usize = ingested.schedules.iter().map(|s| s.len()).sum();
        prop_assert_eq!(total, ops.len());
        for schedule in &ingested.schedules {
            prop_assert!(schedule.is_complete());
            let verdict = analyze(schedule);
            prop_assert!(!verdict.conflict_serializable || verdict.view_serializable);
        }
    }

    #[test]
    fn serial_logs_are_serializable((n_txn, n_attr, n_op) in sizes()) {
        // Each transaction commits before the next starts, so the log splits
        // into single-transaction schedules.
        let ops = generate_serial_log(n_txn, n_attr, n_op);
        let ingested = read_schedules(&format_log(&ops), ScheduleLimits::unbounded()).unwrap();
        prop_assert!(ingested.pending.is_none());
        for schedule in &ingested.schedules {
            let report = report(schedule).unwrap();
            prop_assert!(report.verdict().conflict_serializable);
            prop_assert_eq!(&report.conflict, &Ok(schedule.transactions().to_vec()));
            prop_assert_eq!(&report.view, &Ok(schedule.transactions().to_vec()));
        }
    }

    #[test]
    fn serial_blocks_with_deferred_commits_are_serializable((n_txn, n_attr, n_op) in sizes()) {
        // Same blocks, commits moved to the end: one schedule holding every
        // transaction.
        let ops = generate_serial_log(n_txn, n_attr, n_op);
        let (commits, body): (Vec<_>, Vec<_>) =
            ops.into_iter().partition(|op| op.action.is_commit());
        let mut schedule = Schedule::new(1);
        for op in body.into_iter().chain(commits) {
            schedule.push(op).unwrap();
        }

        let roster: Vec<TransactionId> = (1..=n_txn).map(TransactionId).collect();
        prop_assert_eq!(schedule.transactions(), roster.as_slice());
        let report = report(&schedule).unwrap();
        prop_assert_eq!(report.verdict().to_string(), "SS SV");
        prop_assert_eq!(&report.conflict, &Ok(roster.clone()));
        prop_assert_eq!(&report.view, &Ok(roster));
    }
}

#[test]
fn serial_log_splits_per_transaction() {
    let ops = generate_serial_log(3, 2, 2);
    let ingested = read_schedules(&format_log(&ops), ScheduleLimits::unbounded()).unwrap();
    let rosters: Vec<&[TransactionId]> = ingested
        .schedules
        .iter()
        .map(|s| s.transactions())
        .collect();
    assert_eq!(
        rosters,
        vec![
            &[TransactionId(1)][..],
            &[TransactionId(2)][..],
            &[TransactionId(3)][..],
        ]
    );
}

#[test]
fn classic_limits_reject_oversized_logs() {
    let ops = generate_serial_log(1, 3, 120);
    let err = read_schedules(&format_log(&ops), ScheduleLimits::classic()).unwrap_err();
    assert!(err.to_string().contains("more than 100 operations"));
}

#[test]
fn multiple_logs_serialize_to_json() {
    let logs = generate_mult_logs(3, 2, 2, 2, true);
    for log in &logs {
        let json = serde_json::to_string(log).unwrap();
        assert!(json.contains("\"n_transaction\":2"));
        assert!(log.to_log_text().lines().count() == 6);
    }
}
