//! Utility functions and helper types.

use async_trait::async_trait;
use std::future::Future;

use crate::core::{Consumer, Result};

/// Helper function to create a sink from a synchronous function
///
/// The function's error aborts the run exactly like a failing built-in stage.
pub fn for_each<F, T>(f: F) -> ForEach<F, T>
where
    F: FnMut(T) -> Result<()> + Send,
    T: Send + 'static,
{
    ForEach {
        f,
        _phantom: std::marker::PhantomData,
    }
}

/// A sink created from a synchronous function
pub struct ForEach<F, T> {
    f: F,
    _phantom: std::marker::PhantomData<fn(T)>,
}

#[async_trait]
impl<F, T> Consumer for ForEach<F, T>
where
    F: FnMut(T) -> Result<()> + Send,
    T: Send + 'static,
{
    type Item = T;

    async fn accept(&mut self, item: Self::Item) -> Result<()> {
        (self.f)(item)
    }
}

/// Helper function to create a sink from an async function
pub fn consumer_from_fn<F, Fut, T>(f: F) -> FnConsumer<F, T>
where
    F: FnMut(T) -> Fut + Send,
    Fut: Future<Output = Result<()>> + Send,
    T: Send + 'static,
{
    FnConsumer {
        f,
        _phantom: std::marker::PhantomData,
    }
}

/// A sink created from an async function
pub struct FnConsumer<F, T> {
    f: F,
    _phantom: std::marker::PhantomData<fn(T)>,
}

#[async_trait]
impl<F, Fut, T> Consumer for FnConsumer<F, T>
where
    F: FnMut(T) -> Fut + Send,
    Fut: Future<Output = Result<()>> + Send,
    T: Send + 'static,
{
    type Item = T;

    async fn accept(&mut self, item: Self::Item) -> Result<()> {
        (self.f)(item).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn for_each_propagates_errors() {
        let mut total = 0;
        {
            let mut stage = for_each(|x: i32| {
                if x < 0 {
                    return Err(Error::custom("negative"));
                }
                total += x;
                Ok(())
            });
            stage.accept(4).await.unwrap();
            assert!(stage.accept(-1).await.is_err());
        }
        assert_eq!(total, 4);
    }

    #[tokio::test]
    async fn async_fn_consumer_awaits_each_item() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();
        let mut stage = consumer_from_fn(move |x: usize| {
            let counter = counter.clone();
            async move {
                tokio::task::yield_now().await;
                counter.fetch_add(x, Ordering::SeqCst);
                Ok(())
            }
        });

        stage.accept(2).await.unwrap();
        stage.accept(3).await.unwrap();

        assert_eq!(seen.load(Ordering::SeqCst), 5);
    }
}
