//! Core traits for the consumer system.
//!
//! A pipeline is a chain of consumers. Sources push items into the head of
//! the chain one at a time; each consumer handles the item completely
//! (including everything downstream of it) before `accept` returns.

use crate::core::error::Result;
use async_trait::async_trait;

/// A consumer accepts items one at a time.
///
/// A consumer is ready as soon as it is constructed: any setup it needs
/// (opening files, initializing accumulators) runs in its constructor, so
/// there is no separate "advance to first item" step.
///
/// Sinks perform an effect in `accept`. Transforms own exactly one
/// downstream consumer and forward zero or more items to it per accepted
/// item.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use pushweld::core::{Consumer, Result};
///
/// struct LineCounter {
///     lines: usize,
/// }
///
/// #[async_trait]
/// impl Consumer for LineCounter {
///     type Item = String;
///
///     async fn accept(&mut self, _item: Self::Item) -> Result<()> {
///         self.lines += 1;
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Consumer {
    /// The type of items this consumer accepts
    type Item: Send + 'static;

    /// Handle a single item.
    ///
    /// Returning `Ok(())` means the item and everything derived from it has
    /// been fully handled downstream. An error aborts the run.
    async fn accept(&mut self, item: Self::Item) -> Result<()>;

    /// Called once by a driver after its source is exhausted.
    ///
    /// Transforms must forward this to their downstream consumer. It is not
    /// called when the run fails.
    async fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A type-erased consumer, useful when a chain is assembled at runtime.
pub type BoxConsumer<'a, T> = Box<dyn Consumer<Item = T> + Send + 'a>;

#[async_trait]
impl<'a, C> Consumer for &'a mut C
where
    C: Consumer + Send + ?Sized,
{
    type Item = C::Item;

    async fn accept(&mut self, item: Self::Item) -> Result<()> {
        (**self).accept(item).await
    }

    async fn finish(&mut self) -> Result<()> {
        (**self).finish().await
    }
}

#[async_trait]
impl<C> Consumer for Box<C>
where
    C: Consumer + Send + ?Sized,
{
    type Item = C::Item;

    async fn accept(&mut self, item: Self::Item) -> Result<()> {
        (**self).accept(item).await
    }

    async fn finish(&mut self) -> Result<()> {
        (**self).finish().await
    }
}
