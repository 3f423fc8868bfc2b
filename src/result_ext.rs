use async_stream::stream;
use futures::pin_mut;
use futures::stream::StreamExt;
use futures_core::Stream;
use std::future::Future;

use crate::error::FlowResult;
use crate::flow::FlowStream;
use crate::workers::workers;

/// Extension trait for streams of fallible values
pub trait FlowResultStreamExt<T: Send + 'static, E: Send + 'static>:
    Stream<Item = Result<T, E>> + Sized + Unpin + Send + 'static
{
    /// Apply a fallible transformation to each success with a worker pool.
    ///
    /// `Ok` values are handed to `f` on one of `count` workers; `Err` values
    /// pass through untouched. Chained stages therefore short-circuit per
    /// item: once a value has failed, later stages forward the failure
    /// without running their transformation.
    fn try_via_workers<T2, F, Fut>(
        self,
        capacity: usize,
        count: usize,
        f: F,
    ) -> FlowResult<FlowStream<Result<T2, E>>>
    where
        T2: Send + 'static,
        F: Fn(T) -> Fut + Send + Sync + Clone + 'static,
        Fut: Future<Output = Result<T2, E>> + Send + 'static,
    {
        workers(self.boxed(), capacity, count, move |item| {
            let f = f.clone();
            async move {
                match item {
                    Ok(value) => f(value).await,
                    Err(e) => Err(e),
                }
            }
        })
    }

    /// Keep only the successes
    fn ok_values(self) -> FlowStream<T> {
        let s = self.boxed();
        stream! {
            pin_mut!(s);
            while let Some(item) = s.next().await {
                if let Ok(v) = item {
                    yield v;
                }
            }
        }
        .boxed()
    }

    /// Keep only the failures
    fn err_values(self) -> FlowStream<E> {
        let s = self.boxed();
        stream! {
            pin_mut!(s);
            while let Some(item) = s.next().await {
                if let Err(e) = item {
                    yield e;
                }
            }
        }
        .boxed()
    }

    /// Replace each failure with a fallback value
    fn recover_with<F>(self, mut f: F) -> FlowStream<T>
    where
        F: FnMut(E) -> T + Send + 'static,
    {
        let s = self.boxed();
        stream! {
            pin_mut!(s);
            while let Some(item) = s.next().await {
                match item {
                    Ok(v) => yield v,
                    Err(e) => yield f(e),
                }
            }
        }
        .boxed()
    }
}

impl<T, E, S> FlowResultStreamExt<T, E> for S
where
    S: Stream<Item = Result<T, E>> + Sized + Unpin + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
}
