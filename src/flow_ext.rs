use futures::stream::StreamExt;
use futures_core::Stream;
use std::future::Future;

use crate::error::FlowResult;
use crate::flow::{from_stream, merge, split_by, FlowStream};
use crate::workers::{workers, workers_with, PoolConfig};

/// Extension trait providing chainable forms of the pipeline stages
pub trait FlowStreamExt: Stream + Sized + Unpin + Send + 'static {
    /// Drive this stream from its own task behind a bounded buffer
    fn prefetch(self, capacity: usize) -> FlowStream<Self::Item>
    where
        Self::Item: Send + 'static,
    {
        from_stream(self, capacity)
    }

    /// Process this stream with a pool of `count` concurrent workers
    fn via_workers<O, F, Fut>(
        self,
        capacity: usize,
        count: usize,
        f: F,
    ) -> FlowResult<FlowStream<O>>
    where
        Self::Item: Send + 'static,
        O: Send + 'static,
        F: Fn(Self::Item) -> Fut + Send + Sync + Clone + 'static,
        Fut: Future<Output = O> + Send + 'static,
    {
        workers(self.boxed(), capacity, count, f)
    }

    /// Process this stream with a pool built from a [`PoolConfig`]
    fn via_workers_with<O, F, Fut>(self, config: PoolConfig, f: F) -> FlowResult<FlowStream<O>>
    where
        Self::Item: Send + 'static,
        O: Send + 'static,
        F: Fn(Self::Item) -> Fut + Send + Sync + Clone + 'static,
        Fut: Future<Output = O> + Send + 'static,
    {
        workers_with(self.boxed(), config, f)
    }

    /// Merge this stream with another; the result ends when both have ended
    fn merge_with<S>(self, other: S) -> FlowStream<Self::Item>
    where
        S: Stream<Item = Self::Item> + Send + 'static,
        Self::Item: Send + 'static,
    {
        merge(vec![self.boxed(), other.boxed()])
    }

    /// Route this stream into two by predicate
    fn split_by<F>(
        self,
        capacity: usize,
        predicate: F,
    ) -> (FlowStream<Self::Item>, FlowStream<Self::Item>)
    where
        Self::Item: Send + 'static,
        F: Fn(&Self::Item) -> bool + Send + 'static,
    {
        split_by(self.boxed(), capacity, predicate)
    }
}

impl<S> FlowStreamExt for S where S: Stream + Sized + Unpin + Send + 'static {}
