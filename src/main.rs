//! Thin CLI layer: parse args, styled output, and call into mazdoor-core.
//! Crash-proof: panic caught and reported; all errors return Result.

use clap::{Arg, ArgAction, Command};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::env;
use std::io::IsTerminal;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use mazdoor_core::{RunReport, RunnerBuilder, SharedCounter, TaskOutcome};

// ---- UI helpers (no-op when stdout isn't a TTY) ----

fn use_color() -> bool {
    std::io::stdout().is_terminal()
        && env::var("NO_COLOR").unwrap_or_default().is_empty()
}

fn success(msg: &str) {
    if use_color() {
        println!("{}", msg.green());
    } else {
        println!("{}", msg);
    }
}

fn error(msg: &str) {
    if use_color() {
        eprintln!("{}", msg.red());
    } else {
        eprintln!("{}", msg);
    }
}

fn warning(msg: &str) {
    if use_color() {
        eprintln!("{}", msg.yellow());
    } else {
        eprintln!("{}", msg);
    }
}

fn dim(msg: &str) {
    if use_color() {
        println!("{}", msg.dimmed());
    } else {
        println!("{}", msg);
    }
}

/// Run a batch on a background thread; when a progress bar is wanted, drive
/// it from the runner's progress counter until the run finishes.
fn run_batch<T, R, F>(
    items: Vec<T>,
    workers: usize,
    thread_name: String,
    show_bar: bool,
    transform: F,
) -> Result<Vec<TaskOutcome<R>>, String>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Result<R, String> + Send + Sync + 'static,
{
    let total = items.len() as u64;
    let progress = Arc::new(AtomicUsize::new(0));
    let worker_progress = Arc::clone(&progress);

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = RunnerBuilder::new()
            .workers(workers)
            .thread_name(&thread_name)
            .progress(worker_progress)
            .run(items, transform);
        let _ = tx.send(result);
    });

    let bar = if show_bar {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{bar:30.dim} {pos}/{len}")
                .unwrap(),
        );
        Some(bar)
    } else {
        None
    };

    loop {
        match rx.try_recv() {
            Ok(result) => {
                if let Some(bar) = &bar {
                    bar.finish_and_clear();
                }
                return result.map_err(|e| e.to_string());
            }
            Err(mpsc::TryRecvError::Disconnected) => {
                if let Some(bar) = &bar {
                    bar.finish_and_clear();
                }
                mazdoor_core::log_error("runner thread died before reporting a result");
                return Err("Run failed.".to_string());
            }
            Err(mpsc::TryRecvError::Empty) => {}
        }
        if let Some(bar) = &bar {
            bar.set_position(progress.load(Ordering::Relaxed) as u64);
        }
        thread::sleep(Duration::from_millis(40));
    }
}

fn run() -> Result<(), String> {
    let workers_arg = Arg::new("workers")
        .long("workers")
        .short('w')
        .value_parser(clap::value_parser!(usize))
        .help("Number of workers (default: config file, else CPU count)");
    let quiet_arg = Arg::new("quiet")
        .long("quiet")
        .short('q')
        .action(ArgAction::SetTrue)
        .help("Only print the outcome");
    let json_arg = Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Machine-readable summary on stdout");

    let matches = Command::new("mazdoor")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Bounded concurrent task runner — fixed worker pool, shared queue, one outcome per item")
        .after_help(
            "Examples:\n  mazdoor map 1 2 3 4 5 --workers 3\n  mazdoor map --fail-on 3\n  mazdoor count --tasks 1000 --workers 8\n  mazdoor count --json",
        )
        .subcommand(
            Command::new("map")
                .about("Double each number through the worker pool")
                .arg(
                    Arg::new("num")
                        .required(false)
                        .num_args(0..)
                        .value_parser(clap::value_parser!(i64))
                        .allow_negative_numbers(true)
                        .help("Numbers to process; omit for the 1..5 demo set"),
                )
                .arg(
                    Arg::new("fail-on")
                        .long("fail-on")
                        .value_parser(clap::value_parser!(i64))
                        .help("Inject a failure for this input value"),
                )
                .arg(workers_arg.clone())
                .arg(quiet_arg.clone())
                .arg(json_arg.clone()),
        )
        .subcommand(
            Command::new("count")
                .about("Increment one shared counter from every worker and verify nothing was lost")
                .arg(
                    Arg::new("tasks")
                        .long("tasks")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("1000")
                        .help("Number of increments to issue"),
                )
                .arg(workers_arg)
                .arg(quiet_arg)
                .arg(json_arg),
        )
        .get_matches();

    let cwd = env::current_dir().map_err(|e| e.to_string())?;
    let cfg = mazdoor_core::load_config(&cwd);

    match matches.subcommand() {
        Some(("map", sub_m)) => {
            let quiet = mazdoor_core::effective_quiet(sub_m.get_flag("quiet"), &cfg);
            let json_out = sub_m.get_flag("json");
            let workers =
                mazdoor_core::effective_workers(sub_m.get_one::<usize>("workers").copied(), &cfg);
            let fail_on = sub_m.get_one::<i64>("fail-on").copied();
            let nums: Vec<i64> = sub_m
                .get_many::<i64>("num")
                .map(|v| v.copied().collect())
                .unwrap_or_else(|| vec![1, 2, 3, 4, 5]);

            let thread_name = cfg
                .thread_name
                .clone()
                .unwrap_or_else(|| "mazdoor-worker".to_string());
            let show_bar = !quiet && !json_out && std::io::stdout().is_terminal();
            if !quiet && !json_out {
                mazdoor_core::log(&format!(
                    "Dispatching {} items to {} workers",
                    nums.len(),
                    workers
                ));
            }

            let started = Instant::now();
            let outcomes = run_batch(nums, workers, thread_name, show_bar, move |x: i64| {
                if Some(x) == fail_on {
                    return Err(format!("induced failure on {}", x));
                }
                x.checked_mul(2)
                    .ok_or_else(|| format!("overflow doubling {}", x))
            })?;
            let report = RunReport::from_outcomes(&outcomes, started.elapsed(), workers);

            if json_out {
                let mut values: Vec<i64> = outcomes
                    .iter()
                    .filter_map(|o| o.result.as_ref().ok().copied())
                    .collect();
                values.sort_unstable();
                let errors: Vec<String> = outcomes
                    .iter()
                    .filter_map(|o| {
                        o.result
                            .as_ref()
                            .err()
                            .map(|e| format!("item {}: {}", o.index, e))
                    })
                    .collect();
                println!(
                    "{}",
                    serde_json::json!({
                        "schemaVersion": "1",
                        "command": "map",
                        "report": &report,
                        "values": values,
                        "errors": errors,
                    })
                );
            } else {
                if !quiet {
                    let mut by_index: Vec<&TaskOutcome<i64>> = outcomes.iter().collect();
                    by_index.sort_by_key(|o| o.index);
                    for outcome in by_index {
                        match &outcome.result {
                            Ok(v) => dim(&format!("  item {} -> {}", outcome.index, v)),
                            Err(e) => warning(&format!("  item {} -> {}", outcome.index, e)),
                        }
                    }
                }
                if report.all_ok() {
                    success(&format!("{}", report));
                } else {
                    error(&format!("{}", report));
                }
            }

            if !report.all_ok() {
                return Err(format!(
                    "{} of {} items did not succeed",
                    report.failed + report.cancelled,
                    report.total
                ));
            }
        }
        Some(("count", sub_m)) => {
            let quiet = mazdoor_core::effective_quiet(sub_m.get_flag("quiet"), &cfg);
            let json_out = sub_m.get_flag("json");
            let workers =
                mazdoor_core::effective_workers(sub_m.get_one::<usize>("workers").copied(), &cfg);
            let tasks = sub_m.get_one::<u64>("tasks").copied().unwrap_or(1000);

            let thread_name = cfg
                .thread_name
                .clone()
                .unwrap_or_else(|| "mazdoor-worker".to_string());
            let show_bar = !quiet && !json_out && std::io::stdout().is_terminal();
            if !quiet && !json_out {
                mazdoor_core::log(&format!(
                    "Issuing {} increments from {} workers",
                    tasks, workers
                ));
            }

            let counter = SharedCounter::new();
            let worker_copy = counter.clone();

            let started = Instant::now();
            let outcomes = run_batch(
                vec![(); tasks as usize],
                workers,
                thread_name,
                show_bar,
                move |_| {
                    worker_copy.increment();
                    Ok(())
                },
            )?;
            let report = RunReport::from_outcomes(&outcomes, started.elapsed(), workers);
            let value = counter.get();

            if json_out {
                println!(
                    "{}",
                    serde_json::json!({
                        "schemaVersion": "1",
                        "command": "count",
                        "report": &report,
                        "count": value,
                        "expected": tasks,
                    })
                );
            } else if value == tasks && !quiet {
                success(&format!(
                    "Counted {} increments across {} workers ({}ms).",
                    value, workers, report.elapsed_ms
                ));
            }

            if value != tasks {
                return Err(format!(
                    "lost updates: counted {} of {} increments",
                    value, tasks
                ));
            }
        }
        _ => {
            if use_color() {
                println!("{}", "mazdoor".bright_cyan().bold());
                dim("Bounded concurrent task runner — fixed worker pool, shared queue.");
            } else {
                println!("mazdoor — bounded concurrent task runner");
            }
            dim("\nRun `mazdoor --help` for details.");
        }
    }

    Ok(())
}

fn main() {
    if !use_color() {
        colored::control::set_override(false);
    }

    let code = match std::panic::catch_unwind(run) {
        Ok(Ok(())) => 0,
        Ok(Err(e)) => {
            error(&e);
            1
        }
        Err(_) => {
            error("An unexpected error occurred. Please report this issue.");
            1
        }
    };
    std::process::exit(code);
}
