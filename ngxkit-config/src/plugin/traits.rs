//! Extension traits

use crate::parser::lexer::{LexResult, SubScanner, Token};
use ngxkit_core::Directive;

/// Extension information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionInfo {
    /// Extension name
    pub name: &'static str,
    /// Extension description
    pub description: &'static str,
}

/// Base trait for anything that hooks into scanning or building
pub trait Extension: Send + Sync {
    /// Get extension information
    fn info(&self) -> ExtensionInfo;

    /// Directive names this extension handles
    fn directives(&self) -> &[&'static str];
}

/// Takes over tokenization after one of its directive names is scanned
pub trait ScannerExtension: Extension {
    /// Read the directive's body from `scanner` and return the tokens to
    /// emit in its place, ending with the statement terminator.
    fn tokenize(&self, scanner: &mut SubScanner<'_, '_>, directive: &str) -> LexResult<Vec<Token>>;
}

/// Renders its directives when building text
pub trait BuilderExtension: Extension {
    /// Full rendering of `stmt` without indentation, or `None` to fall back
    /// to the default rendering.
    fn render(&self, stmt: &Directive) -> Option<String>;
}
