//! Thread safety integration tests for `persistent_profiler`.
//!
//! These tests verify that totals recorded on many threads are merged without
//! losing updates and that reports can be taken while threads are recording.

#![cfg(feature = "enabled")]

use std::iter;
use std::sync::Arc;
use std::thread;

use persistent_profiler::Profiler;

#[test]
fn totals_from_all_threads_are_merged() {
    const THREADS: u64 = 6;
    const PAIRS_PER_THREAD: u64 = 200;

    let profiler = Arc::new(Profiler::builder().build());

    let handles = iter::repeat_with(|| {
        let profiler = Arc::clone(&profiler);

        thread::spawn(move || {
            for _ in 0..PAIRS_PER_THREAD {
                profiler.start("work");
                profiler.stop("work");
            }
        })
    })
    .take(usize::try_from(THREADS).unwrap())
    .collect::<Vec<_>>();

    for handle in handles {
        handle.join().unwrap();
    }

    // Threads have exited but their totals remain.
    let report = profiler.report();
    let work = report.regions().next().unwrap();

    assert_eq!(work.name(), "work");
    assert_eq!(work.total().calls(), THREADS * PAIRS_PER_THREAD);
}

#[test]
fn record_elapsed_concurrently_sums_exactly() {
    const THREADS: u64 = 8;
    const CALLS_PER_THREAD: u64 = 500;
    const ELAPSED_MILLIS: u64 = 3;

    let profiler = Profiler::builder().build();

    thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                for _ in 0..CALLS_PER_THREAD {
                    profiler.record_elapsed(thread::current().id(), "batch", ELAPSED_MILLIS);
                }
            });
        }
    });

    let report = profiler.report();
    let batch = report.regions().next().unwrap().total();

    assert_eq!(batch.calls(), THREADS * CALLS_PER_THREAD);
    assert_eq!(batch.total_millis(), THREADS * CALLS_PER_THREAD * ELAPSED_MILLIS);
    assert_eq!(batch.average_millis(), ELAPSED_MILLIS);
}

#[test]
fn reports_while_recording_are_ordered() {
    let profiler = Profiler::builder().build();

    thread::scope(|s| {
        for name in ["a", "b", "c"] {
            let profiler = &profiler;

            s.spawn(move || {
                for _ in 0..300 {
                    let _span = profiler.region(name);
                }
            });
        }

        s.spawn(|| {
            for _ in 0..100 {
                let report = profiler.report();
                let totals = report
                    .regions()
                    .map(|r| r.total().total_millis())
                    .collect::<Vec<_>>();

                assert!(totals.windows(2).all(|w| w.first() >= w.get(1)));
            }
        });
    });

    assert_eq!(profiler.report().len(), 3);
}

#[test]
fn report_can_be_moved_between_threads() {
    let profiler = Profiler::builder().build();

    profiler.start("moved");
    profiler.stop("moved");

    let report = profiler.report();

    let len = thread::spawn(move || report.len()).join().unwrap();
    assert_eq!(len, 1);
}
