use std::io::{self, Read};
use std::{fs, process};

use clap::Parser;
use schedcheck_cli::{
    pending_warning, report_json, witness_lines, App, CheckArgs, Command, GenerateArgs,
};
use schedcheck_parser::read_schedules;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let app = App::parse();
    match &app.command {
        Command::Check(args) => check(args),
        Command::Generate(args) => generate(args),
    }
}

fn read_input(args: &CheckArgs) -> String {
    if let Some(path) = args.input_path() {
        fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Failed to read {}: {e}", path.display());
            process::exit(1);
        })
    } else {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input).unwrap_or_else(|e| {
            eprintln!("Failed to read stdin: {e}");
            process::exit(1);
        });
        input
    }
}

fn check(args: &CheckArgs) {
    let input = read_input(args);
    let limits = args.limits();
    tracing::debug!(?limits, "checking log");

    let ingested = read_schedules(&input, limits).unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    for schedule in &ingested.schedules {
        let Some(report) = schedcheck_core::report(schedule) else {
            continue;
        };
        if args.json {
            println!("{}", report_json(&report));
        } else {
            println!("{report}");
            if args.verbose {
                for line in witness_lines(&report) {
                    println!("{line}");
                }
            }
        }
    }

    if let Some(pending) = &ingested.pending {
        eprintln!("{}", pending_warning(pending));
    }
}

fn generate(args: &GenerateArgs) {
    if args.n_operation > 0 && args.n_attribute == 0 {
        eprintln!("--n-attribute must be positive when --n-operation is");
        process::exit(1);
    }

    let logs = schedcheck_testgen::generate_mult_logs(
        args.n_log,
        args.n_transaction,
        args.n_attribute,
        args.n_operation,
        args.serial,
    );

    let Some(output_dir) = &args.output_dir else {
        for log in &logs {
            print!("{}", log.to_log_text());
        }
        return;
    };

    fs::create_dir_all(output_dir).unwrap_or_else(|e| {
        eprintln!("Failed to create output directory: {e}");
        process::exit(1);
    });

    for log in &logs {
        let path = output_dir.join(format!("{}.log", log.get_id()));
        fs::write(&path, log.to_log_text()).unwrap_or_else(|e| {
            eprintln!("Failed to write {}: {e}", path.display());
            process::exit(1);
        });
    }

    println!("Generated {} logs to {}", logs.len(), output_dir.display());
}
