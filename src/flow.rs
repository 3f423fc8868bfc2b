//! Bounded stream construction, fan-in, and fan-out
//!
//! Every constructor here returns a [`FlowStream`]: a boxed stream fed by one
//! or more spawned tasks through a bounded channel. The channel closes exactly
//! once, after every feeding task has finished, and buffered items remain
//! readable after close. When a consumer drops a stream, the feeding tasks see
//! the disconnect on their next send and shut down instead of blocking.

use futures::pin_mut;
use futures::stream::{BoxStream, StreamExt};
use futures_core::Stream;
use tokio::spawn;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

/// A boxed, heap-allocated stream of pipeline elements
pub type FlowStream<O> = BoxStream<'static, O>;

/// Fan-in keeps a single-slot buffer between forwarders and the consumer;
/// pacing belongs to the inputs and the consumer, not the merge point.
const MERGE_CAPACITY: usize = 1;

// ================================
// Stream Sources
// ================================

/// Turn a finite sequence into an actively-produced bounded stream.
///
/// One producer task iterates the sequence in order, parking whenever the
/// buffer holds `capacity` unconsumed items, and closes the stream after the
/// last element. An empty sequence yields a stream that is closed from the
/// start.
///
/// # Panics
/// Panics if `capacity` is zero.
///
/// # Examples
/// ```
/// use pipeflow::from_seq;
/// use futures_util::stream::StreamExt;
///
/// # async fn example() {
/// let stream = from_seq(vec![1, 2, 3], 2);
/// let result = stream.collect::<Vec<_>>().await;
/// assert_eq!(result, vec![1, 2, 3]);
/// # }
/// ```
pub fn from_seq<I, O>(seq: I, capacity: usize) -> FlowStream<O>
where
    I: IntoIterator<Item = O> + Send + 'static,
    <I as IntoIterator>::IntoIter: Send,
    O: Send + 'static,
{
    assert!(capacity >= 1, "stream capacity must be at least 1");
    let (tx, rx) = mpsc::channel(capacity);

    spawn(async move {
        for item in seq {
            if tx.send(item).await.is_err() {
                break;
            }
        }
    });

    ReceiverStream::new(rx).boxed()
}

/// Drive an arbitrary stream from its own producer task, behind a bounded
/// buffer of `capacity` items.
///
/// Useful to decouple a slow consumer from an upstream that should keep
/// working ahead, and to give a passive combinator chain an active heartbeat.
///
/// # Panics
/// Panics if `capacity` is zero.
pub fn from_stream<S, O>(s: S, capacity: usize) -> FlowStream<O>
where
    S: Stream<Item = O> + Send + 'static,
    O: Send + 'static,
{
    assert!(capacity >= 1, "stream capacity must be at least 1");
    let (tx, rx) = mpsc::channel(capacity);

    spawn(async move {
        pin_mut!(s);
        while let Some(item) = s.next().await {
            if tx.send(item).await.is_err() {
                break;
            }
        }
    });

    ReceiverStream::new(rx).boxed()
}

// ================================
// Fan-in / Fan-out
// ================================

/// Multiplex any number of streams into one.
///
/// Each input is drained by its own forwarder task, so inputs make progress
/// concurrently. Items from one input keep their relative order; interleaving
/// across inputs is unspecified. A coordinator task waits for every forwarder
/// to finish and then closes the output, so the merged stream ends exactly
/// when all inputs have ended. Merging nothing returns a stream that is
/// already closed.
///
/// # Examples
/// ```
/// use pipeflow::{from_seq, merge};
/// use futures_util::stream::StreamExt;
///
/// # async fn example() {
/// let evens = from_seq(vec![0, 2, 4], 1);
/// let odds = from_seq(vec![1, 3, 5], 1);
/// let mut all = merge(vec![evens, odds]).collect::<Vec<_>>().await;
/// all.sort();
/// assert_eq!(all, vec![0, 1, 2, 3, 4, 5]);
/// # }
/// ```
pub fn merge<O>(inputs: Vec<FlowStream<O>>) -> FlowStream<O>
where
    O: Send + 'static,
{
    let (tx, rx) = mpsc::channel(MERGE_CAPACITY);

    let mut forwarders = Vec::with_capacity(inputs.len());
    for mut input in inputs {
        let tx = tx.clone();
        forwarders.push(spawn(async move {
            while let Some(item) = input.next().await {
                if tx.send(item).await.is_err() {
                    break;
                }
            }
        }));
    }

    // The coordinator holds the last sender; the output closes only after
    // every forwarder has finished.
    spawn(async move {
        for forwarder in forwarders {
            let _ = forwarder.await;
        }
        drop(tx);
    });

    ReceiverStream::new(rx).boxed()
}

/// Route one stream into two by predicate.
///
/// A single router task pulls each item and sends it to the first stream when
/// `predicate` returns true, otherwise to the second. Both outputs share the
/// router's pace: a full buffer on either side parks the router until that
/// side is consumed. Both outputs close when the input ends. Dropping either
/// output shuts the router down and closes the other side as well, so an
/// abandoned half never turns the split into a silent filter.
///
/// # Panics
/// Panics if `capacity` is zero.
pub fn split_by<O, F>(
    input: FlowStream<O>,
    capacity: usize,
    predicate: F,
) -> (FlowStream<O>, FlowStream<O>)
where
    O: Send + 'static,
    F: Fn(&O) -> bool + Send + 'static,
{
    assert!(capacity >= 1, "stream capacity must be at least 1");
    let (matched_tx, matched_rx) = mpsc::channel(capacity);
    let (rest_tx, rest_rx) = mpsc::channel(capacity);

    let mut input = input;
    spawn(async move {
        while let Some(item) = input.next().await {
            let sent = if predicate(&item) {
                matched_tx.send(item).await.is_ok()
            } else {
                rest_tx.send(item).await.is_ok()
            };
            if !sent {
                break;
            }
        }
    });

    (
        ReceiverStream::new(matched_rx).boxed(),
        ReceiverStream::new(rest_rx).boxed(),
    )
}
