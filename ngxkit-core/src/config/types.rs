//! Configuration tree type definitions
//!
//! These types represent a parsed NGINX configuration: one [`Payload`] per
//! parse call, one [`Config`] per file, and a tree of [`Directive`] nodes.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall outcome of a file or a whole parse
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Ok,
    Failed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ok => "ok",
            Status::Failed => "failed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single statement in a configuration file.
///
/// A node is exactly one of: a comment (`name == "#"`, `comment` set), an
/// expanded include (`includes` set), a block (`block` set) or a plain
/// directive.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Directive {
    /// Directive name, `#` for comments
    #[serde(rename = "directive")]
    pub name: String,

    /// 1-based line the directive name appeared on
    pub line: usize,

    /// Arguments in source order, already unquoted
    #[serde(default)]
    pub args: Vec<String>,

    /// Source file, only recorded when configs are combined
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Indices into [`Payload::config`] of the files this include pulled in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub includes: Option<Vec<usize>>,

    /// Child statements of a block directive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<Vec<Directive>>,

    /// Comment text with the leading `#` removed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Set on parameter bindings inside map-like bodies (`map`, `geo`, ...)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_map_block_parameter: bool,
}

impl Directive {
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            line,
            ..Default::default()
        }
    }

    /// Builder-style argument list
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style block body
    pub fn with_block(mut self, block: Vec<Directive>) -> Self {
        self.block = Some(block);
        self
    }

    /// Create a comment node; `text` excludes the leading `#`
    pub fn comment(line: usize, text: impl Into<String>) -> Self {
        Self {
            name: "#".to_string(),
            line,
            comment: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn is_comment(&self) -> bool {
        self.name == "#" && self.comment.is_some()
    }

    pub fn is_include(&self) -> bool {
        self.name == "include" && self.includes.is_some()
    }

    pub fn is_block(&self) -> bool {
        self.block.is_some()
    }

    /// Structural equality that ignores line numbers and file attribution
    pub fn eq_ignoring_lines(&self, other: &Directive) -> bool {
        self.name == other.name
            && self.args == other.args
            && self.includes == other.includes
            && self.comment == other.comment
            && self.is_map_block_parameter == other.is_map_block_parameter
            && match (&self.block, &other.block) {
                (Some(a), Some(b)) => blocks_eq_ignoring_lines(a, b),
                (None, None) => true,
                _ => false,
            }
    }
}

/// Compare two statement lists with [`Directive::eq_ignoring_lines`]
pub fn blocks_eq_ignoring_lines(a: &[Directive], b: &[Directive]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.eq_ignoring_lines(y))
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(comment) = &self.comment {
            return write!(f, "#{}", comment);
        }
        f.write_str(&self.name)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        if self.block.is_some() {
            f.write_str(" {...}")
        } else {
            f.write_str(";")
        }
    }
}

/// Diagnostic recorded against a single file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub error: ParseError,
}

/// Diagnostic recorded against the whole parse
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PayloadError {
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub error: ParseError,
}

/// The parse result for one file
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub file: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub errors: Vec<ConfigError>,
    #[serde(default)]
    pub parsed: Vec<Directive>,
}

impl Config {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Default::default()
        }
    }

    /// Mark the file failed and remember the diagnostic
    pub fn record(&mut self, error: ParseError) {
        self.status = Status::Failed;
        self.errors.push(ConfigError {
            line: error.line,
            error,
        });
    }
}

/// The result of one top-level parse call.
///
/// `config[0]` is always the entry file; include indices point into `config`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Payload {
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub errors: Vec<PayloadError>,
    #[serde(default)]
    pub config: Vec<Config>,
}

impl Payload {
    /// Mark the payload failed and remember the diagnostic against `file`
    pub fn record(&mut self, file: impl Into<String>, error: ParseError) {
        self.status = Status::Failed;
        self.errors.push(PayloadError {
            file: file.into(),
            line: error.line,
            error,
        });
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_node_kinds() {
        let comment = Directive::comment(1, " hello");
        assert!(comment.is_comment());
        assert!(!comment.is_block());

        let block = Directive::new("http", 2).with_block(vec![]);
        assert!(block.is_block());

        let mut include = Directive::new("include", 3).with_args(["mime.types"]);
        assert!(!include.is_include());
        include.includes = Some(vec![1]);
        assert!(include.is_include());
    }

    #[test]
    fn test_eq_ignoring_lines() {
        let a = Directive::new("server", 1)
            .with_block(vec![Directive::new("listen", 2).with_args(["80"])]);
        let b = Directive::new("server", 10)
            .with_block(vec![Directive::new("listen", 14).with_args(["80"])]);
        assert!(a.eq_ignoring_lines(&b));
        assert_ne!(a, b);

        let c = Directive::new("server", 1)
            .with_block(vec![Directive::new("listen", 2).with_args(["81"])]);
        assert!(!a.eq_ignoring_lines(&c));
    }

    #[test]
    fn test_display() {
        let d = Directive::new("listen", 1).with_args(["80", "default_server"]);
        assert_eq!(d.to_string(), "listen 80 default_server;");
        let b = Directive::new("location", 1).with_args(["/"]).with_block(vec![]);
        assert_eq!(b.to_string(), "location / {...}");
    }

    #[test]
    fn test_record_marks_failed() {
        let mut config = Config::new("nginx.conf");
        assert_eq!(config.status, Status::Ok);
        config.record(ParseError::new(ErrorKind::Analysis, "bad").with_line(4));
        assert_eq!(config.status, Status::Failed);
        assert_eq!(config.errors[0].line, Some(4));

        let mut payload = Payload::default();
        payload.record("nginx.conf", ParseError::new(ErrorKind::Io, "gone"));
        assert!(!payload.is_ok());
        assert_eq!(payload.errors[0].line, None);
    }

    #[test]
    fn test_json_shape() {
        let d = Directive::new("events", 1).with_block(vec![]);
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["directive"], "events");
        assert!(json.get("includes").is_none());
        assert!(json.get("is_map_block_parameter").is_none());
        assert_eq!(serde_json::to_value(Status::Failed).unwrap(), "failed");
    }
}
