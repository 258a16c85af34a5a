//! Configuration tree, options and loaders

mod combine;
mod loader;
mod options;
mod types;

pub use combine::{cycle_error, IncludeGraph};
pub use loader::OptionsLoader;
pub use options::{BuildOptions, DirectiveSource, ParseOptions, Settings};
pub use types::*;
