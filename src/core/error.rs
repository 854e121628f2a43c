//! Error types for the pipeline system.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the pipeline system.
///
/// Every variant aborts the run in progress: the failing `accept` call
/// returns it, each enclosing stage propagates it, and the driver stops
/// iterating and hands it to its caller. Nothing is retried.
#[derive(Debug, Error)]
pub enum Error {
    /// A file could not be opened, read, or written
    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading from an input stream failed
    #[error("failed to read input: {0}")]
    Input(#[source] io::Error),

    /// Writing to an output stream (stdout or a caller writer) failed
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),

    /// A stage factory failed before the stage was ready to accept items
    #[error("stage construction failed: {0}")]
    Construction(String),

    /// An item or `finish` reached a primed stage that has already finished
    #[error("stage has already finished and cannot accept more items")]
    Exhausted,

    /// A caller-defined consumer failed to handle an item
    #[error("consumer error: {0}")]
    Consumer(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A custom error with a message
    #[error("{0}")]
    Custom(String),
}

// Convenience constructors
impl Error {
    /// Create an I/O error tagged with the path and the attempted action
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Create a consumer error from any error type
    pub fn consumer<E: std::error::Error + Send + Sync + 'static>(error: E) -> Self {
        Error::Consumer(Box::new(error))
    }

    /// Create a construction error with a message
    pub fn construction<S: Into<String>>(message: S) -> Self {
        Error::Construction(message.into())
    }

    /// Create a custom error with a message
    pub fn custom<S: Into<String>>(message: S) -> Self {
        Error::Custom(message.into())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Custom(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Custom(s.to_string())
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, Error>;
