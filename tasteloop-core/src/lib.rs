//! Tasteloop Core - Fundamental types
//!
//! This crate provides the core types used throughout Tasteloop:
//! - `Value`: Runtime values (numbers, text, objects, errors)
//! - `TasteloopError`: Structured errors with machine-readable codes

mod value;
mod error;

pub use value::Value;
pub use error::{TasteloopError, codes};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Value, TasteloopError};
    pub use crate::error::codes;
}
