//! Extension system
//!
//! Extensions tokenize and render directives whose bodies are not nginx
//! syntax, such as embedded Lua.

mod lua;
mod registry;
mod traits;

pub use lua::Lua;
pub use registry::ExtensionRegistry;
pub use traits::{BuilderExtension, Extension, ExtensionInfo, ScannerExtension};
