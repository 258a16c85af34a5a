//! ngxkit Core Library
//!
//! This crate provides the shared pieces of ngxkit: the parsed configuration
//! tree, parse/build options and the error types.

pub mod config;
pub mod error;

pub use config::{
    BuildOptions, Config, ConfigError, Directive, DirectiveSource, ParseOptions, Payload,
    PayloadError, Status,
};
pub use error::{Error, ErrorKind, ParseError, Result};

/// ngxkit version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
