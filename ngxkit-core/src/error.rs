//! Error types for ngxkit

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for ngxkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for ngxkit
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration parse error
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Options file error
    #[error("Options error: {0}")]
    Options(String),
}

/// Which stage of the pipeline produced a [`ParseError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed token stream (unbalanced braces, repeated terminators)
    Lex,
    /// Directive rejected by the grammar tables
    Analysis,
    /// Include could not be resolved
    Include,
    /// Include graph contains a cycle
    Cycle,
    /// File could not be read
    Io,
}

/// A positioned diagnostic produced while parsing a configuration tree.
///
/// Renders as `"<what> in <file>:<line>"`, dropping the line when it is
/// unknown and substituting `(nofile)` for a missing file name.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{what} in {}", location(.file, .line))]
pub struct ParseError {
    pub kind: ErrorKind,
    pub what: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Name of the enclosing map-like block, for body parameter errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_context: Option<String>,
}

fn location(file: &Option<String>, line: &Option<usize>) -> String {
    let file = file.as_deref().unwrap_or("(nofile)");
    match line {
        Some(line) => format!("{}:{}", file, line),
        None => file.to_string(),
    }
}

impl ParseError {
    pub fn new(kind: ErrorKind, what: impl Into<String>) -> Self {
        Self {
            kind,
            what: what.into(),
            file: None,
            line: None,
            block_context: None,
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_block_context(mut self, ctx: impl Into<String>) -> Self {
        self.block_context = Some(ctx.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_line() {
        let err = ParseError::new(ErrorKind::Analysis, "unknown directive \"foo\"")
            .with_file("/etc/nginx/nginx.conf")
            .with_line(3);
        assert_eq!(
            err.to_string(),
            "unknown directive \"foo\" in /etc/nginx/nginx.conf:3"
        );
    }

    #[test]
    fn test_display_without_line() {
        let err = ParseError::new(ErrorKind::Io, "permission denied").with_file("a.conf");
        assert_eq!(err.to_string(), "permission denied in a.conf");
    }

    #[test]
    fn test_display_without_file() {
        let err = ParseError::new(ErrorKind::Lex, "unexpected \"}\"").with_line(7);
        assert_eq!(err.to_string(), "unexpected \"}\" in (nofile):7");
    }

    #[test]
    fn test_wraps_into_error() {
        let err: Error = ParseError::new(ErrorKind::Cycle, "cycle").into();
        assert!(matches!(err, Error::Parse(_)));
    }
}
