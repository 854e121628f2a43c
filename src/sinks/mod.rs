//! Sink implementations for the pushweld library.
//!
//! Sinks are terminal stages: they accept items and perform an effect or
//! accumulate a result, and never forward anything downstream.

use async_trait::async_trait;
use std::fmt::Display;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::{AsyncWrite, AsyncWriteExt, Stdout};

use crate::core::{Consumer, Error, Result};
use crate::metrics;

/// A sink that appends items to a caller-supplied vector.
///
/// Items are appended in arrival order after whatever the vector already
/// holds. An optional side callback sees each item before it is appended.
pub struct Collect<'a, T> {
    items: &'a mut Vec<T>,
    side: Option<Box<dyn FnMut(&T) + Send + 'a>>,
}

/// Create a sink that appends every item to `items`.
pub fn collect<T>(items: &mut Vec<T>) -> Collect<'_, T> {
    Collect { items, side: None }
}

impl<'a, T> Collect<'a, T> {
    /// Call `side` with each item before appending it; its result is ignored
    pub fn with_side<F>(mut self, side: F) -> Self
    where
        F: FnMut(&T) + Send + 'a,
    {
        self.side = Some(Box::new(side));
        self
    }
}

#[async_trait]
impl<'a, T: Send + 'static> Consumer for Collect<'a, T> {
    type Item = T;

    async fn accept(&mut self, item: Self::Item) -> Result<()> {
        if let Some(side) = self.side.as_mut() {
            side(&item);
        }
        self.items.push(item);
        Ok(())
    }
}

/// A sink that writes one formatted line per item.
///
/// Lines go to stdout unless another writer is supplied with
/// [`Printer::to_writer`]. Each line is flushed as soon as it is written.
pub struct Printer<T, W = Stdout> {
    writer: W,
    format: Box<dyn FnMut(T) -> String + Send>,
}

/// Create a sink that prints each item using its `Display` form.
pub fn printer<T: Display + 'static>() -> Printer<T> {
    printer_with(|item: T| item.to_string())
}

/// Create a sink that prints `wrap(item)` for each item.
pub fn printer_with<T, F>(wrap: F) -> Printer<T>
where
    F: FnMut(T) -> String + Send + 'static,
{
    Printer {
        writer: tokio::io::stdout(),
        format: Box::new(wrap),
    }
}

impl<T, W> Printer<T, W> {
    /// Redirect output to another writer
    pub fn to_writer<V>(self, writer: V) -> Printer<T, V>
    where
        V: AsyncWrite + Unpin + Send,
    {
        Printer {
            writer,
            format: self.format,
        }
    }

    /// Recover the underlying writer
    pub fn into_writer(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<T, W> Consumer for Printer<T, W>
where
    T: Send + 'static,
    W: AsyncWrite + Unpin + Send,
{
    type Item = T;

    async fn accept(&mut self, item: Self::Item) -> Result<()> {
        let mut line = (self.format)(item);
        line.push('\n');
        self.writer
            .write_all(line.as_bytes())
            .await
            .map_err(Error::Output)?;
        self.writer.flush().await.map_err(Error::Output)
    }

    async fn finish(&mut self) -> Result<()> {
        self.writer.flush().await.map_err(Error::Output)
    }
}

/// How [`ToFiles`] opens each target file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FileMode {
    /// Create or truncate, then write
    #[default]
    Write,
    /// Create if missing, then append
    Append,
}

impl FileMode {
    fn options(self) -> OpenOptions {
        let mut options = OpenOptions::new();
        match self {
            FileMode::Write => options.write(true).create(true).truncate(true),
            FileMode::Append => options.append(true).create(true),
        };
        options
    }
}

/// Open `path` with `mode`, write `text`, and close it again.
async fn write_once(path: &Path, mode: FileMode, text: &str) -> Result<()> {
    let mut file = mode
        .options()
        .open(path)
        .await
        .map_err(|e| Error::io("open", path, e))?;
    file.write_all(text.as_bytes())
        .await
        .map_err(|e| Error::io("write", path, e))?;
    file.flush().await.map_err(|e| Error::io("flush", path, e))
}

/// A sink that appends the string form of each item to one file.
///
/// The file is opened, appended to, and closed again for every item; no
/// handle is held between items. No separator is added between items.
pub struct ToFile<T> {
    path: PathBuf,
    _phantom: PhantomData<fn(T)>,
}

/// Create a sink that appends to the file at `path`.
///
/// With `truncate` set the file is emptied (or created) here, once, before
/// any item arrives. Feeding the sink again later never re-truncates.
pub async fn to_file<T, P>(path: P, truncate: bool) -> Result<ToFile<T>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref().to_path_buf();
    if truncate {
        tokio::fs::File::create(&path)
            .await
            .map_err(|e| Error::io("truncate", &path, e))?;
        trace_debug!(path = %path.display(), "truncated output file");
    }
    Ok(ToFile {
        path,
        _phantom: PhantomData,
    })
}

impl<T> ToFile<T> {
    /// The file this sink appends to
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl<T: Display + Send + 'static> Consumer for ToFile<T> {
    type Item = T;

    async fn accept(&mut self, item: Self::Item) -> Result<()> {
        let text = item.to_string();
        write_once(&self.path, FileMode::Append, &text).await?;
        trace_event!(path = %self.path.display(), bytes = text.len(), "appended item");
        metrics::file_write("to_file");
        Ok(())
    }
}

/// A sink that writes each `(path, data)` item to its own file.
pub struct ToFiles<P, T> {
    mode: FileMode,
    _phantom: PhantomData<fn(P, T)>,
}

/// Create a sink that overwrites each named file with its data.
pub fn to_files<P, T>() -> ToFiles<P, T> {
    to_files_with_mode(FileMode::Write)
}

/// Create a sink that opens each named file with `mode`.
pub fn to_files_with_mode<P, T>(mode: FileMode) -> ToFiles<P, T> {
    ToFiles {
        mode,
        _phantom: PhantomData,
    }
}

#[async_trait]
impl<P, T> Consumer for ToFiles<P, T>
where
    P: AsRef<Path> + Send + 'static,
    T: Display + Send + 'static,
{
    type Item = (P, T);

    async fn accept(&mut self, item: Self::Item) -> Result<()> {
        let (path, data) = item;
        let text = data.to_string();
        write_once(path.as_ref(), self.mode, &text).await?;
        trace_event!(path = %path.as_ref().display(), mode = ?self.mode, "wrote item");
        metrics::file_write("to_files");
        Ok(())
    }
}

/// A sink that discards every item.
pub struct Discard<T> {
    _phantom: PhantomData<fn(T)>,
}

/// Create a sink that does nothing with its items.
pub fn sink<T>() -> Discard<T> {
    Discard {
        _phantom: PhantomData,
    }
}

impl<T> Default for Discard<T> {
    fn default() -> Self {
        sink()
    }
}

#[async_trait]
impl<T: Send + 'static> Consumer for Discard<T> {
    type Item = T;

    async fn accept(&mut self, _item: Self::Item) -> Result<()> {
        Ok(())
    }
}
