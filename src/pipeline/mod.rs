//! Pipeline driving.
//!
//! A [`Driver`] pushes the items of a source into the head consumer of a
//! pipeline. Each item is handed off and fully processed by the whole chain
//! before the next one is pulled, so there is no buffering between stages
//! and a slow stage stalls the source. Once the source is exhausted the
//! driver delivers `finish` to the chain.

use futures::stream::{self, Stream, StreamExt};
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_stream::wrappers::LinesStream;

use crate::core::{Consumer, Error, Result};
use crate::metrics;
use crate::sources::split_lines;

/// Configuration for driving a pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct DriveConfig {
    /// Whether to deliver `finish` to the chain after the source ends
    pub finish_on_exhaust: bool,
    /// Stop after forwarding this many items
    pub limit: Option<usize>,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            finish_on_exhaust: true,
            limit: None,
        }
    }
}

/// Pushes sources through consumer chains.
///
/// Every method returns the number of items forwarded to the head of the
/// chain. The first error from the source or any stage stops the run; in
/// that case `finish` is not delivered.
#[derive(Debug, Clone, Default)]
pub struct Driver {
    config: DriveConfig,
}

impl Driver {
    /// Create a driver with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a driver from an explicit configuration
    pub fn with_config(config: DriveConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DriveConfig {
        &self.config
    }

    /// Set whether `finish` is delivered after the source ends
    pub fn finish_on_exhaust(mut self, finish: bool) -> Self {
        self.config.finish_on_exhaust = finish;
        self
    }

    /// Stop after forwarding `limit` items
    pub fn limit(mut self, limit: usize) -> Self {
        self.config.limit = Some(limit);
        self
    }

    /// Forward every element of `items`, in order, to `then`.
    pub async fn start<I, C>(&self, items: I, then: C) -> Result<usize>
    where
        I: IntoIterator<Item = C::Item>,
        C: Consumer + Send,
    {
        self.drive("sequence", stream::iter(items.into_iter().map(Ok)), then)
            .await
    }

    /// Forward every element of an async stream, in order, to `then`.
    pub async fn start_stream<S, C>(&self, items: S, then: C) -> Result<usize>
    where
        S: Stream<Item = C::Item>,
        C: Consumer + Send,
    {
        self.drive("stream", items.map(Ok), then).await
    }

    /// Read the whole file at `path`, split it into lines, and forward them.
    ///
    /// Line breaks are `\n`, `\r\n`, or `\r`. A read failure is returned
    /// before any item is forwarded.
    pub async fn from_file<P, C>(&self, path: P, then: C) -> Result<usize>
    where
        P: AsRef<Path>,
        C: Consumer<Item = String> + Send,
    {
        self.from_file_by(path, then, |text: String| split_lines(&text))
            .await
    }

    /// Read the whole file at `path`, split it with `by`, and forward the chunks.
    pub async fn from_file_by<P, C, F, I>(&self, path: P, then: C, by: F) -> Result<usize>
    where
        P: AsRef<Path>,
        C: Consumer + Send,
        F: FnOnce(String) -> I,
        I: IntoIterator<Item = C::Item>,
    {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::io("read", path, e))?;
        trace_debug!(path = %path.display(), bytes = text.len(), "read source file");

        let chunks = by(text);
        self.drive("file", stream::iter(chunks.into_iter().map(Ok)), then)
            .await
    }

    /// Forward the lines of `reader` one at a time as they are read.
    ///
    /// Unlike [`Driver::from_file`] the input is never held in memory as a
    /// whole, so a read error can surface after earlier lines were
    /// forwarded. Line breaks are `\n` or `\r\n`.
    pub async fn from_reader<R, C>(&self, reader: R, then: C) -> Result<usize>
    where
        R: AsyncBufRead + Unpin,
        C: Consumer<Item = String> + Send,
    {
        let lines = LinesStream::new(reader.lines()).map(|line| line.map_err(Error::Input));
        self.drive("reader", lines, then).await
    }

    async fn drive<S, C>(&self, source: &'static str, items: S, mut then: C) -> Result<usize>
    where
        S: Stream<Item = Result<C::Item>>,
        C: Consumer + Send,
    {
        futures::pin_mut!(items);
        trace_debug!(source, limit = ?self.config.limit, "pipeline run started");

        let mut forwarded = 0;
        let outcome = async {
            while self.config.limit.map_or(true, |limit| forwarded < limit) {
                let item = match items.next().await {
                    Some(item) => item?,
                    None => break,
                };
                then.accept(item).await?;
                forwarded += 1;
            }
            Ok::<(), Error>(())
        }
        .await;
        metrics::items_driven(source, forwarded);

        if let Err(err) = outcome {
            trace_debug!(source, forwarded, error = %err, "pipeline run failed");
            return Err(err);
        }

        if self.config.finish_on_exhaust {
            then.finish().await?;
        }
        trace_debug!(source, forwarded, "pipeline run finished");
        Ok(forwarded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::collect;
    use crate::util::for_each;
    use async_trait::async_trait;

    #[derive(Default)]
    struct Recorder {
        items: Vec<u32>,
        finished: usize,
    }

    #[async_trait]
    impl Consumer for Recorder {
        type Item = u32;

        async fn accept(&mut self, item: Self::Item) -> Result<()> {
            self.items.push(item);
            Ok(())
        }

        async fn finish(&mut self) -> Result<()> {
            self.finished += 1;
            Ok(())
        }
    }

    #[tokio::test]
    async fn finish_is_delivered_once_after_exhaustion() {
        let mut recorder = Recorder::default();

        let forwarded = Driver::new().start(vec![1, 2, 3], &mut recorder).await.unwrap();

        assert_eq!(forwarded, 3);
        assert_eq!(recorder.items, vec![1, 2, 3]);
        assert_eq!(recorder.finished, 1);
    }

    #[tokio::test]
    async fn finish_can_be_suppressed() {
        let mut recorder = Recorder::default();

        Driver::new()
            .finish_on_exhaust(false)
            .start(vec![1], &mut recorder)
            .await
            .unwrap();

        assert_eq!(recorder.finished, 0);
    }

    #[tokio::test]
    async fn limit_stops_early_and_still_finishes() {
        let mut recorder = Recorder::default();

        let forwarded = Driver::new().limit(2).start(1..=10, &mut recorder).await.unwrap();

        assert_eq!(forwarded, 2);
        assert_eq!(recorder.items, vec![1, 2]);
        assert_eq!(recorder.finished, 1);
    }

    #[tokio::test]
    async fn failure_stops_iteration_without_finish() {
        let mut seen = Vec::new();
        let failing = for_each(|x: u32| {
            seen.push(x);
            if x == 2 {
                Err(Error::custom("boom"))
            } else {
                Ok(())
            }
        });

        let err = Driver::new().start(1..=5, failing).await.unwrap_err();

        assert_eq!(err.to_string(), "boom");
        assert_eq!(seen, vec![1, 2]);
    }

    #[tokio::test]
    async fn stream_source_preserves_order() {
        let mut out = Vec::new();

        let forwarded = Driver::new()
            .start_stream(stream::iter(vec!["a", "b"]), collect(&mut out))
            .await
            .unwrap();

        assert_eq!(forwarded, 2);
        assert_eq!(out, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn reader_source_forwards_lines() {
        let mut out = Vec::new();
        let input: &[u8] = b"alpha\r\nbeta\ngamma";

        Driver::new().from_reader(input, collect(&mut out)).await.unwrap();

        assert_eq!(out, vec!["alpha", "beta", "gamma"]);
    }

    #[tokio::test]
    async fn config_round_trips_through_builder() {
        let driver = Driver::with_config(DriveConfig {
            finish_on_exhaust: false,
            limit: None,
        })
        .limit(4);

        assert_eq!(
            driver.config(),
            &DriveConfig {
                finish_on_exhaust: false,
                limit: Some(4),
            }
        );
    }
}
