//! ngxkit Configuration Parser
//!
//! This crate scans, validates, parses and builds NGINX configuration files.
//!
//! # Example
//!
//! ```rust,ignore
//! use ngxkit_config::{build, parse};
//! use ngxkit_core::{BuildOptions, ParseOptions};
//!
//! let payload = parse("/etc/nginx/nginx.conf", &ParseOptions::default())?;
//! for config in &payload.config {
//!     println!("{}:\n{}", config.file, build(&config.parsed, &BuildOptions::default()));
//! }
//! ```

pub mod builder;
pub mod parser;
pub mod plugin;

pub use builder::{Builder, build, build_files, enquote, needs_quote};
pub use parser::{
    AnalysisError, BlockContext, ConfigFs, LexError, LexErrorKind, MapBodyError, MemFs, OsFs,
    Parser, Scanner, Token, analyze, tokenize,
};
pub use plugin::{BuilderExtension, Extension, ExtensionInfo, ExtensionRegistry, ScannerExtension};

use ngxkit_core::{ParseError, ParseOptions, Payload};
use std::path::Path;

/// Parse `path` and its includes from the real file system
pub fn parse(path: impl AsRef<Path>, options: &ParseOptions) -> Result<Payload, ParseError> {
    Parser::new(options.clone()).parse(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ngxkit_core::{BuildOptions, Status};
    use std::fs;

    #[test]
    fn test_parse_and_build_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nginx.conf");
        fs::write(&path, "events {}\nhttp {\n    server {\n        listen 80;\n    }\n}\n").unwrap();

        let payload = parse(&path, &ParseOptions::default()).unwrap();
        assert_eq!(payload.status, Status::Ok);
        assert_eq!(
            build(&payload.config[0].parsed, &BuildOptions::default()),
            "events {\n}\nhttp {\n    server {\n        listen 80;\n    }\n}"
        );
    }
}
