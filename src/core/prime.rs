//! Stage priming.
//!
//! Priming brings a freshly built stage to the point where it is ready to
//! accept its first item. Construction-time effects (truncating a file,
//! allocating an accumulator) run inside the factory, exactly once, before
//! any item arrives. A failing factory produces no stage at all.

use std::future::Future;

use async_trait::async_trait;

use crate::core::error::{Error, Result};
use crate::core::traits::Consumer;

/// Where a primed stage is in its single-use lifecycle.
///
/// An unprimed stage has no runtime representation: until its factory has
/// run there is nothing to send items to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageState {
    /// Constructed and waiting for its first item
    Primed,
    /// Has accepted at least one item
    Accepting,
    /// Has received `finish`; accepts nothing further
    Exhausted,
}

/// A stage that went through [`prime`] and enforces single use.
///
/// Items are passed through to the wrapped consumer unchanged. Once
/// `finish` has been delivered, both `accept` and `finish` fail with
/// [`Error::Exhausted`].
pub struct Primed<C> {
    inner: C,
    state: StageState,
    accepted: usize,
}

impl<C> Primed<C> {
    /// Wrap a stage that is already constructed
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            state: StageState::Primed,
            accepted: 0,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> StageState {
        self.state
    }

    /// Number of items accepted successfully
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    pub fn get_ref(&self) -> &C {
        &self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

/// Run a stage factory and return the stage ready to accept items.
///
/// The factory runs exactly once. Its error, if any, is returned unchanged
/// and no stage is produced.
///
/// # Examples
///
/// ```rust
/// use pushweld::prelude::*;
///
/// # #[tokio::main]
/// # async fn main() -> Result<()> {
/// let mut out = Vec::new();
/// let out_ref = &mut out;
/// let mut stage = prime(|| async move { Ok(collect(out_ref)) }).await?;
/// assert_eq!(stage.state(), StageState::Primed);
///
/// stage.accept(1).await?;
/// assert_eq!(stage.state(), StageState::Accepting);
/// # Ok(())
/// # }
/// ```
pub async fn prime<F, Fut, C>(factory: F) -> Result<Primed<C>>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<C>>,
    C: Consumer,
{
    match factory().await {
        Ok(stage) => {
            trace_debug!(stage = std::any::type_name::<C>(), "stage primed");
            Ok(Primed::new(stage))
        }
        Err(err) => {
            trace_debug!(stage = std::any::type_name::<C>(), error = %err, "stage priming failed");
            Err(err)
        }
    }
}

#[async_trait]
impl<C> Consumer for Primed<C>
where
    C: Consumer + Send,
{
    type Item = C::Item;

    async fn accept(&mut self, item: Self::Item) -> Result<()> {
        if self.state == StageState::Exhausted {
            trace_warn!(accepted = self.accepted, "item sent to a finished stage");
            return Err(Error::Exhausted);
        }
        self.inner.accept(item).await?;
        self.state = StageState::Accepting;
        self.accepted += 1;
        Ok(())
    }

    async fn finish(&mut self) -> Result<()> {
        if self.state == StageState::Exhausted {
            return Err(Error::Exhausted);
        }
        self.state = StageState::Exhausted;
        self.inner.finish().await
    }
}
