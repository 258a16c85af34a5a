//! Parser module for NGINX configuration
//!
//! This module provides the scanner, the directive grammar and analyzer, and
//! the recursive parser that resolves includes.

pub mod analyzer;
pub mod fs;
pub mod grammar;
pub mod lexer;
pub mod map_body;
#[allow(clippy::module_inception)]
pub mod parser;

pub use analyzer::{AnalysisError, BlockContext, analyze};
pub use fs::{ConfigFs, MemFs, OsFs};
pub use lexer::{LexError, LexErrorKind, LexResult, Scanner, Token, tokenize};
pub use map_body::MapBodyError;
pub use parser::Parser;
