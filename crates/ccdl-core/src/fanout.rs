//! Bounded worker pool for independent catalog reads.
//!
//! Workers pull `(index, item)` pairs from a shared queue in input order and
//! send results back over a channel. Results are reassembled by index, so the
//! output never depends on completion order.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Mutex, PoisonError};

use crate::error::{CatalogError, Result};

/// Runs `f` over `items` with at most `max_workers` threads.
///
/// Returns results in input order. On failure, workers stop claiming new
/// items and the error of the lowest-index failing item is returned; items
/// are claimed in order, so every lower-index item has already run and the
/// reported error is the same on every run.
pub fn fan_out<T, R, F>(items: &[T], max_workers: usize, f: F) -> Result<Vec<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> Result<R> + Sync,
{
    if items.is_empty() {
        return Ok(Vec::new());
    }
    let num_workers = max_workers.max(1).min(items.len());
    let work = Mutex::new(items.iter().enumerate());
    let abort = AtomicBool::new(false);
    let (tx, rx) = mpsc::channel::<(usize, Result<R>)>();

    std::thread::scope(|scope| {
        for _ in 0..num_workers {
            let tx = tx.clone();
            let work = &work;
            let abort = &abort;
            let f = &f;
            scope.spawn(move || loop {
                if abort.load(Ordering::Relaxed) {
                    break;
                }
                let next = work.lock().unwrap_or_else(PoisonError::into_inner).next();
                let Some((index, item)) = next else {
                    break;
                };
                let res = f(item);
                if res.is_err() {
                    abort.store(true, Ordering::Relaxed);
                }
                if tx.send((index, res)).is_err() {
                    break;
                }
            });
        }
    });
    drop(tx);

    let mut slots: Vec<Option<R>> = std::iter::repeat_with(|| None).take(items.len()).collect();
    let mut first_error: Option<(usize, CatalogError)> = None;
    for (index, res) in rx {
        match res {
            Ok(value) => slots[index] = Some(value),
            Err(e) => {
                if first_error.as_ref().map_or(true, |(i, _)| index < *i) {
                    first_error = Some((index, e));
                }
            }
        }
    }
    if let Some((index, e)) = first_error {
        tracing::debug!(index, "fan-out aborted: {}", e);
        return Err(e);
    }
    // Without a failure every item ran, so every slot is filled.
    Ok(slots.into_iter().flatten().collect())
}
