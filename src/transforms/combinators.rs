//! Builder-style construction of transform chains.
//!
//! Pipelines are assembled from the sink upwards, so each method here wraps
//! the receiver in a new transform and returns the new head of the chain.
//! `collect(&mut out).cmap(f).cfilter(p)` filters first, then maps, then
//! collects.

use crate::core::{BoxConsumer, Consumer, Result};
use crate::transforms::{cenumerate, cfilter, cmap, split_on, CEnumerate, CFilter, CMap, SplitOn};

/// Extension trait for wrapping a consumer in transforms
pub trait ConsumerExt: Consumer + Sized {
    /// Put a filter in front of this consumer
    fn cfilter<F>(self, predicate: F) -> CFilter<F, Self>
    where
        F: FnMut(&Self::Item) -> bool,
    {
        cfilter(predicate, self)
    }

    /// Put a mapping stage in front of this consumer
    fn cmap<F, T>(self, f: F) -> CMap<F, Self, T>
    where
        F: FnMut(T) -> Self::Item,
    {
        cmap(f, self)
    }

    /// Put a splitting stage in front of this consumer
    fn split_on<D>(self, delimiter: D) -> Result<SplitOn<Self>>
    where
        Self: Consumer<Item = String>,
        D: Into<String>,
    {
        split_on(delimiter, self)
    }

    /// Put an enumerating stage in front of this consumer
    fn cenumerate<T>(self) -> CEnumerate<Self, T>
    where
        Self: Consumer<Item = (usize, T)>,
    {
        cenumerate(self)
    }

    /// Erase the concrete type of this chain
    fn boxed<'a>(self) -> BoxConsumer<'a, Self::Item>
    where
        Self: Send + 'a,
    {
        Box::new(self)
    }
}

impl<C: Consumer> ConsumerExt for C {}
