//! # Push-based stage pipelines for Rust
//!
//! This crate composes single-item consumers into pipelines. A source drives
//! items one at a time into the head of a chain; every stage either forwards
//! derived items to the stage it wraps or performs a terminal effect.
//!
//! ## Core Concepts
//!
//! - **Consumer**: Accepts one item at a time (see [`core::Consumer`])
//! - **Sink**: A terminal consumer that never forwards
//! - **Transform**: A consumer that forwards 0..N items to one downstream consumer
//! - **Source**: A driver that pushes a sequence into a consumer and then signals `finish`
//!
//! Pipelines are built bottom-up: the sink first, then each transform
//! wrapping the stage after it. Hand-off is sequential: a call to `accept`
//! returns only after the whole downstream chain has handled the item.
//!
//! ## Example
//!
//! ```rust
//! use pushweld::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let mut words = Vec::new();
//!     let head = collect(&mut words).cenumerate().split_on(" ")?;
//!
//!     start(vec!["hello pushed world".to_string()], head).await?;
//!
//!     assert_eq!(words[2], (2, "world".to_string()));
//!     Ok(())
//! }
//! ```

#[macro_use]
mod tracing_support;

pub mod core;
pub mod metrics;
pub mod pipeline;
pub mod sinks;
pub mod sources;
pub mod transforms;
pub mod util;

// Re-export commonly used items
pub mod prelude {
    pub use crate::core::{prime, BoxConsumer, Consumer, Error, Primed, Result, StageState};
    pub use crate::pipeline::{DriveConfig, Driver};
    pub use crate::sinks::{
        collect, printer, printer_with, sink, to_file, to_files, to_files_with_mode, FileMode,
    };
    pub use crate::sources::{from_file, from_file_by, from_reader, split_lines, start, start_stream};
    pub use crate::transforms::{cenumerate, cfilter, cmap, split_on, ConsumerExt};
}

// Re-export main error type
pub use crate::core::{Error, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
