//! Source drivers for the pushweld library.
//!
//! Sources are not consumers: they iterate an external sequence and push
//! each item into the head of a pipeline, then deliver `finish`. The
//! functions here use the default [`Driver`]; build a driver directly to
//! limit a run or suppress `finish`.

use futures::Stream;
use std::path::Path;
use tokio::io::AsyncBufRead;

use crate::core::{Consumer, Result};
use crate::pipeline::Driver;

/// Forward every element of `items`, in order, to `then`.
///
/// # Examples
///
/// ```rust
/// use pushweld::prelude::*;
///
/// # #[tokio::main]
/// # async fn main() -> Result<()> {
/// let mut out = Vec::new();
/// start(vec![1, 2, 3], collect(&mut out).cmap(|x: i32| x + 1)).await?;
/// assert_eq!(out, vec![2, 3, 4]);
/// # Ok(())
/// # }
/// ```
pub async fn start<I, C>(items: I, then: C) -> Result<()>
where
    I: IntoIterator<Item = C::Item>,
    C: Consumer + Send,
{
    Driver::new().start(items, then).await.map(|_| ())
}

/// Forward every element of an async stream, in order, to `then`.
///
/// Any producer that can be expressed as a `Stream` (a download yielding
/// chunks, a channel receiver) can feed a pipeline this way.
pub async fn start_stream<S, C>(items: S, then: C) -> Result<()>
where
    S: Stream<Item = C::Item>,
    C: Consumer + Send,
{
    Driver::new().start_stream(items, then).await.map(|_| ())
}

/// Forward the lines of the file at `path` to `then`.
///
/// The whole file is read before the first line is forwarded, so a missing
/// or unreadable file fails the call without touching the pipeline.
pub async fn from_file<P, C>(path: P, then: C) -> Result<()>
where
    P: AsRef<Path>,
    C: Consumer<Item = String> + Send,
{
    Driver::new().from_file(path, then).await.map(|_| ())
}

/// Forward the chunks produced by `by` from the file's text to `then`.
pub async fn from_file_by<P, C, F, I>(path: P, then: C, by: F) -> Result<()>
where
    P: AsRef<Path>,
    C: Consumer + Send,
    F: FnOnce(String) -> I,
    I: IntoIterator<Item = C::Item>,
{
    Driver::new().from_file_by(path, then, by).await.map(|_| ())
}

/// Forward the lines of an async reader to `then` as they are read.
pub async fn from_reader<R, C>(reader: R, then: C) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    C: Consumer<Item = String> + Send,
{
    Driver::new().from_reader(reader, then).await.map(|_| ())
}

/// Split text into lines using universal newlines.
///
/// `\n`, `\r\n`, and a lone `\r` all end a line. Line terminators are not
/// included, and a terminator at the very end does not produce a trailing
/// empty line. Empty text yields no lines.
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        match rest.find(|c: char| c == '\n' || c == '\r') {
            Some(pos) => {
                lines.push(rest[..pos].to_string());
                let width = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[pos + width..];
            }
            None => {
                lines.push(rest.to_string());
                break;
            }
        }
    }

    lines
}
