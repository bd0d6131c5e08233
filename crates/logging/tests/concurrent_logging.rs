//! Integration tests for logging while the global logger is replaced.
//!
//! Workers keep writing while the main thread re-initializes between two
//! files. Every record must land whole in exactly one of them.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use logfacade::{Context, Field, Options, from_context, kv};
use serde_json::Value as Json;

const WORKERS: usize = 4;
const RECORDS_PER_WORKER: usize = 250;
const SWAPS: usize = 50;

fn json_to(path: &Path) -> Options {
    Options {
        format: "json".to_owned(),
        output_paths: vec![path.to_str().expect("utf-8 path").to_owned()],
        error_output_paths: vec![],
        ..Options::default()
    }
}

fn lines(path: &Path) -> Vec<Json> {
    fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(|line| serde_json::from_str(line).expect("whole json record"))
        .collect()
}

/// Verifies records written during repeated init land in exactly one sink.
#[test]
fn records_survive_concurrent_init() {
    let dir = tempfile::tempdir().expect("tempdir");
    let left = dir.path().join("left.log");
    let right = dir.path().join("right.log");
    logfacade::init(json_to(&left));

    let done = Arc::new(AtomicBool::new(false));
    let workers: Vec<_> = (0..WORKERS)
        .map(|worker| {
            thread::spawn(move || {
                for seq in 0..RECORDS_PER_WORKER {
                    match seq % 3 {
                        0 => logfacade::info("tick", &[Field::uint("worker", worker as u64)]),
                        1 => logfacade::infow("tick", &kv!["worker", worker, "seq", seq]),
                        _ => logfacade::infof(format_args!("tick")),
                    }
                }
            })
        })
        .collect();

    let swapper = {
        let done = Arc::clone(&done);
        let (left, right) = (left.clone(), right.clone());
        thread::spawn(move || {
            for swap in 0..SWAPS {
                if done.load(Ordering::Acquire) {
                    break;
                }
                let target = if swap % 2 == 0 { &right } else { &left };
                logfacade::init(json_to(target));
            }
        })
    };

    for worker in workers {
        worker.join().expect("worker thread");
    }
    done.store(true, Ordering::Release);
    swapper.join().expect("swapper thread");

    let records: Vec<Json> = lines(&left).into_iter().chain(lines(&right)).collect();
    assert_eq!(records.len(), WORKERS * RECORDS_PER_WORKER);
    assert!(records.iter().all(|record| record["msg"] == "tick"));
}

/// Verifies a bound context can be read from many threads at once.
#[test]
fn bound_context_is_shared_across_threads() {
    let logger = logfacade::with_name("shared");
    let context = Arc::new(logger.with_context(&Context::background()));

    let readers: Vec<_> = (0..WORKERS)
        .map(|_| {
            let context = Arc::clone(&context);
            thread::spawn(move || from_context(Some(&context)))
        })
        .collect();

    for reader in readers {
        assert_eq!(reader.join().expect("reader thread"), logger);
    }
}
