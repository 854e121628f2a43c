//! Transform implementations for the pushweld library.
//!
//! A transform owns exactly one downstream consumer, fixed at construction.
//! For every accepted item it forwards zero, one, or many items to that
//! consumer, and it passes `finish` through unchanged. Apart from the
//! counter in [`CEnumerate`], transforms keep no state between items.

pub mod combinators;

pub use combinators::ConsumerExt;

use async_trait::async_trait;
use std::marker::PhantomData;

use crate::core::{Consumer, Error, Result};

/// A transform that forwards only the items matching a predicate.
pub struct CFilter<F, C> {
    predicate: F,
    then: C,
}

/// Forward items for which `predicate` holds to `then`; drop the rest.
pub fn cfilter<F, C>(predicate: F, then: C) -> CFilter<F, C>
where
    C: Consumer,
    F: FnMut(&C::Item) -> bool,
{
    CFilter { predicate, then }
}

#[async_trait]
impl<F, C> Consumer for CFilter<F, C>
where
    C: Consumer + Send,
    F: FnMut(&C::Item) -> bool + Send,
{
    type Item = C::Item;

    async fn accept(&mut self, item: Self::Item) -> Result<()> {
        if (self.predicate)(&item) {
            self.then.accept(item).await?;
        }
        Ok(())
    }

    async fn finish(&mut self) -> Result<()> {
        self.then.finish().await
    }
}

/// A transform that forwards `f(item)` for every item.
///
/// The output type may differ from the input type.
pub struct CMap<F, C, T> {
    f: F,
    then: C,
    _phantom: PhantomData<fn(T)>,
}

/// Forward `f(item)` to `then` for every accepted item.
pub fn cmap<F, C, T>(f: F, then: C) -> CMap<F, C, T>
where
    C: Consumer,
    F: FnMut(T) -> C::Item,
{
    CMap {
        f,
        then,
        _phantom: PhantomData,
    }
}

#[async_trait]
impl<F, C, T> Consumer for CMap<F, C, T>
where
    C: Consumer + Send,
    F: FnMut(T) -> C::Item + Send,
    T: Send + 'static,
{
    type Item = T;

    async fn accept(&mut self, item: Self::Item) -> Result<()> {
        let mapped = (self.f)(item);
        self.then.accept(mapped).await
    }

    async fn finish(&mut self) -> Result<()> {
        self.then.finish().await
    }
}

/// A transform that splits text on a literal delimiter.
///
/// Every piece is forwarded separately, left to right, including empty
/// pieces produced by leading, trailing, or adjacent delimiters. Text with
/// no delimiter is forwarded as a single piece.
pub struct SplitOn<C> {
    delimiter: String,
    then: C,
}

/// Split each accepted string on `delimiter` and forward the pieces to `then`.
///
/// Fails with [`Error::Construction`] when the delimiter is empty.
pub fn split_on<D, C>(delimiter: D, then: C) -> Result<SplitOn<C>>
where
    D: Into<String>,
    C: Consumer<Item = String>,
{
    let delimiter = delimiter.into();
    if delimiter.is_empty() {
        return Err(Error::construction("split_on requires a non-empty delimiter"));
    }
    Ok(SplitOn { delimiter, then })
}

#[async_trait]
impl<C> Consumer for SplitOn<C>
where
    C: Consumer<Item = String> + Send,
{
    type Item = String;

    async fn accept(&mut self, item: Self::Item) -> Result<()> {
        for piece in item.split(self.delimiter.as_str()) {
            self.then.accept(piece.to_owned()).await?;
        }
        Ok(())
    }

    async fn finish(&mut self) -> Result<()> {
        self.then.finish().await
    }
}

/// A transform that pairs every item with its zero-based position.
pub struct CEnumerate<C, T> {
    count: usize,
    then: C,
    _phantom: PhantomData<fn(T)>,
}

/// Forward `(index, item)` to `then`, counting from zero.
pub fn cenumerate<C, T>(then: C) -> CEnumerate<C, T>
where
    C: Consumer<Item = (usize, T)>,
{
    CEnumerate {
        count: 0,
        then,
        _phantom: PhantomData,
    }
}

impl<C, T> CEnumerate<C, T> {
    /// Index the next accepted item will be paired with
    pub fn count(&self) -> usize {
        self.count
    }
}

#[async_trait]
impl<C, T> Consumer for CEnumerate<C, T>
where
    C: Consumer<Item = (usize, T)> + Send,
    T: Send + 'static,
{
    type Item = T;

    async fn accept(&mut self, item: Self::Item) -> Result<()> {
        self.then.accept((self.count, item)).await?;
        self.count += 1;
        Ok(())
    }

    async fn finish(&mut self) -> Result<()> {
        self.then.finish().await
    }
}
