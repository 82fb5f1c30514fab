//! Fan-out/fan-in execution.
//!
//! ```text
//!  producer ──tasks (bounded)──▶ worker × N ──results (bounded)──▶ aggregator
//!      ▲                            ▲                                  │
//!      └────────── cancel ──────────┴──────────────────────────────────┘
//! ```
//!
//! - The producer pulls paths from the lazy candidate stream and blocks
//!   when the task queue is full, so discovery never runs far ahead of
//!   hashing.
//! - Workers share nothing but the two queues and the read-only probe.
//! - The aggregator (the calling thread) is the only owner of the
//!   selector. It stops reading when the result queue disconnects, which
//!   happens once the producer has finished and every worker has drained
//!   the task queue and exited. An exact match makes it stop early and
//!   cancel everyone else.
//!
//! All threads are scoped to one call. Leaving the scope, normally or by
//! unwinding, drops the cancellation source and joins every thread.

use super::cancel::{cancellation, CancellationToken};
use super::probe::{Probe, Tally, Verdict};
use super::SearchState;
use crate::core::comparator::{Offer, TopKSelector};
use crate::core::scanner::Candidates;
use crossbeam_channel::{bounded, select, Receiver, Sender};
use std::panic;
use std::path::PathBuf;
use std::thread;
use tracing::{debug, trace};

/// A unit of work: the 1-based discovery index and the candidate path
type Task = (usize, PathBuf);

/// Run the scan on `workers` threads and feed admitted candidates to
/// `selector`. Returns the state the scan ended in and the merged tally.
pub(crate) fn scan_parallel(
    probe: &Probe<'_>,
    candidates: Candidates<'_>,
    workers: usize,
    selector: &mut TopKSelector,
) -> (SearchState, Tally) {
    let workers = workers.max(1);
    let (cancel, token) = cancellation();
    let (task_tx, task_rx) = bounded::<Task>(workers * 2);
    let (result_tx, result_rx) = bounded::<(PathBuf, u32)>(workers * 2);

    thread::scope(|scope| {
        let producer = {
            let token = token.clone();
            scope.spawn(move || produce(candidates, task_tx, &token))
        };

        let handles: Vec<_> = (0..workers)
            .map(|id| {
                let task_rx = task_rx.clone();
                let result_tx = result_tx.clone();
                let token = token.clone();
                scope.spawn(move || work(id, probe, task_rx, result_tx, &token))
            })
            .collect();

        // The aggregator must only see the queues through the workers
        drop(task_rx);
        drop(result_tx);

        let mut state = SearchState::Exhausted;
        for (path, distance) in result_rx.iter() {
            if selector.offer(path, distance) == Offer::ExactMatch {
                state = SearchState::ExactMatch;
                break;
            }
        }

        drop(result_rx);
        cancel.cancel();

        let mut tally = Tally {
            discovered: producer.join().unwrap_or_else(|e| panic::resume_unwind(e)),
            ..Tally::default()
        };
        for handle in handles {
            tally.merge(handle.join().unwrap_or_else(|e| panic::resume_unwind(e)));
        }

        (state, tally)
    })
}

/// Feed the task queue until the stream ends or the search is cancelled.
/// Returns how many candidates were handed out.
fn produce(candidates: Candidates<'_>, tasks: Sender<Task>, token: &CancellationToken) -> usize {
    let mut handed_out = 0;

    for (offset, path) in candidates.enumerate() {
        if token.is_cancelled() {
            break;
        }

        let task = (offset + 1, path);
        let sent = select! {
            send(tasks, task) -> res => res.is_ok(),
            recv(token.receiver()) -> _ => false,
        };
        if !sent {
            break;
        }
        handed_out += 1;
    }

    trace!("Producer finished after {} candidates", handed_out);
    handed_out
}

/// Pull tasks until the queue closes or the search is cancelled. A task
/// already pulled is always finished.
fn work(
    id: usize,
    probe: &Probe<'_>,
    tasks: Receiver<Task>,
    results: Sender<(PathBuf, u32)>,
    token: &CancellationToken,
) -> Tally {
    let mut tally = Tally::default();

    loop {
        if token.is_cancelled() {
            break;
        }

        let (index, path) = select! {
            recv(tasks) -> task => match task {
                Ok(task) => task,
                Err(_) => break,
            },
            recv(token.receiver()) -> _ => break,
        };

        let verdict = probe.check(index, &path);
        tally.record(verdict);

        if let Verdict::Within(distance) = verdict {
            if results.send((path, distance)).is_err() {
                // Aggregator is gone: an exact match was found
                break;
            }
        }
    }

    debug!(
        "Worker {} done: {} checked, {} skipped",
        id, tally.checked, tally.skipped
    );
    tally
}
