//! Basic usage of `persistent_profiler` from several threads.
//!
//! Installs a `tracing` subscriber so the log output of the profiler is visible.
//!
//! Run with: `cargo run --example persistent_profiler_basic`

use std::thread;
use std::time::Duration;

use persistent_profiler::{Profiler, print_stats_action, start, stop, stop_and_report};

fn main() {
    tracing_subscriber::fmt().init();

    // The host decides when to print. Here it is simply called at the end.
    let print_stats = print_stats_action();

    let workers = (0..3_u64)
        .map(|worker_index| {
            thread::spawn(move || {
                for _ in 0..5 {
                    start("worker_iteration");
                    thread::sleep(Duration::from_millis(worker_index.saturating_add(1)));
                    stop("worker_iteration");
                }
            })
        })
        .collect::<Vec<_>>();

    {
        let _span = Profiler::global().region("main_setup");
        thread::sleep(Duration::from_millis(20));
    }

    start("join_workers");
    for worker in workers {
        worker.join().expect("worker threads do not panic");
    }
    stop_and_report("join_workers");

    // A stop without a start is logged as an error and otherwise ignored.
    stop("never_started");

    print_stats();
}
