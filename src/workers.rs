//! Concurrent worker pools over a shared input stream
//!
//! A pool lets a fixed number of workers claim items off one input stream and
//! funnels the transformed items onto one bounded output. Claims are
//! serialized, so every input item is processed by exactly one worker;
//! completion order across workers is unspecified.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::stream::StreamExt;
use futures::FutureExt;
use tokio::spawn;
use tokio::sync::{mpsc, Mutex};
use tokio_stream::wrappers::ReceiverStream;

use crate::error::{FlowError, FlowResult};
use crate::flow::FlowStream;

/// Default output capacity for pool stages built from [`PoolConfig`]
pub const DEFAULT_CAPACITY: usize = 16;

/// Configuration for a worker pool stage
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Bounded capacity of the pool's output stream
    pub capacity: usize,
    /// Number of concurrent workers claiming input items
    pub workers: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            workers: num_cpus::get(),
        }
    }
}

/// Process one stream with `count` concurrent workers.
///
/// Each worker claims the next input item (claims are serialized, items are
/// never duplicated or skipped), applies `f` outside the claim so a slow or
/// diverging transformation stalls only its own worker, and sends the result
/// to the shared output. The output closes once, after the input is exhausted
/// and every worker has finished; results arrive in completion order.
///
/// Returns [`FlowError::InvalidCapacity`] or [`FlowError::InvalidWorkerCount`]
/// when the corresponding parameter is zero, before any worker is spawned or
/// any input consumed.
///
/// If `f` panics for an item, the panic is contained: the item produces no
/// output, the panic is logged, and the worker keeps claiming. Callers who
/// need per-item failures as values should carry `Result` elements instead
/// (see `FlowResultStreamExt::try_via_workers`).
///
/// # Examples
/// ```
/// use pipeflow::{from_seq, workers};
/// use futures_util::stream::StreamExt;
///
/// # async fn example() {
/// let numbers = from_seq(1..=100, 16);
/// let doubled = workers(numbers, 16, 8, |n| async move { n * 2 }).unwrap();
/// let mut result = doubled.collect::<Vec<_>>().await;
/// result.sort();
/// assert_eq!(result.first(), Some(&2));
/// assert_eq!(result.last(), Some(&200));
/// # }
/// ```
pub fn workers<I, O, F, Fut>(
    input: FlowStream<I>,
    capacity: usize,
    count: usize,
    f: F,
) -> FlowResult<FlowStream<O>>
where
    I: Send + 'static,
    O: Send + 'static,
    F: Fn(I) -> Fut + Send + Sync + Clone + 'static,
    Fut: Future<Output = O> + Send + 'static,
{
    if capacity < 1 {
        return Err(FlowError::InvalidCapacity(capacity));
    }
    if count < 1 {
        return Err(FlowError::InvalidWorkerCount(count));
    }

    let input = Arc::new(Mutex::new(input.fuse()));
    let (tx, rx) = mpsc::channel(capacity);

    let mut handles = Vec::with_capacity(count);
    for _ in 0..count {
        let input = Arc::clone(&input);
        let tx = tx.clone();
        let f = f.clone();
        handles.push(spawn(async move {
            loop {
                // Hold the lock only for the claim, never across `f`.
                let item = {
                    let mut input = input.lock().await;
                    input.next().await
                };
                let item = match item {
                    Some(item) => item,
                    None => break,
                };

                let f = f.clone();
                match AssertUnwindSafe(async move { f(item).await })
                    .catch_unwind()
                    .await
                {
                    Ok(output) => {
                        if tx.send(output).await.is_err() {
                            break;
                        }
                    }
                    Err(panic) => {
                        log::error!(
                            "worker transform panicked: {}",
                            panic_message(panic.as_ref())
                        );
                    }
                }
            }
        }));
    }

    // The coordinator holds the last sender; the output closes only after
    // every worker has finished.
    spawn(async move {
        for handle in handles {
            if let Err(e) = handle.await {
                log::warn!("worker task did not shut down cleanly: {}", e);
            }
        }
        drop(tx);
    });

    Ok(ReceiverStream::new(rx).boxed())
}

/// [`workers`] with parameters taken from a [`PoolConfig`].
pub fn workers_with<I, O, F, Fut>(
    input: FlowStream<I>,
    config: PoolConfig,
    f: F,
) -> FlowResult<FlowStream<O>>
where
    I: Send + 'static,
    O: Send + 'static,
    F: Fn(I) -> Fut + Send + Sync + Clone + 'static,
    Fut: Future<Output = O> + Send + 'static,
{
    workers(input, config.capacity, config.workers, f)
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}
