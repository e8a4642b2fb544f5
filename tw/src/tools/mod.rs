//! Tool system for the planning loop
//!
//! Tools are the schema-described operations the reasoning engine may
//! propose. Handlers are polymorphic over pure computation and external
//! lookups; each returns a JSON result or an `{error}` result - never an
//! uncaught failure.

mod context;
mod registry;
mod traits;

pub mod builtin;

pub use context::ToolContext;
pub use registry::ToolRegistry;
pub use traits::{Tool, ToolResult};
