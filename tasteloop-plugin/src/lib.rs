//! Tasteloop Plugin System
//!
//! Provides the `FunctionPlugin` trait and the registry through which
//! callers discover and invoke functions by name.

mod traits;
mod registry;

pub use traits::{FunctionPlugin, FunctionMeta, ArgMeta, ArgKind};
pub use registry::PluginRegistry;

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{FunctionPlugin, FunctionMeta, ArgMeta, ArgKind, PluginRegistry};
    pub use tasteloop_core::prelude::*;
}
