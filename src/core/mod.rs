//! Core traits and types for the pushweld library.
//!
//! This module contains the consumer abstraction, the error type, and the
//! priming protocol that every stage goes through before it accepts items.

pub mod error;
pub mod prime;
pub mod traits;

// Re-export core items
pub use error::{Error, Result};
pub use prime::{prime, Primed, StageState};
pub use traits::{BoxConsumer, Consumer};
