//! Directive analysis
//!
//! Validates a directive against the grammar tables: is it known, is it
//! allowed in the current block context, and does its argument list and
//! terminator match one of its masks.

use crate::parser::grammar::{self, Mask};
use ngxkit_core::ParseOptions;
use thiserror::Error;

/// Reasons a directive is rejected
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("unknown directive \"{name}\"")]
    UnknownDirective { name: String },

    #[error("\"{name}\" directive is not allowed here")]
    NotAllowedHere { name: String },

    #[error("directive \"{name}\" has no opening \"{{\"")]
    MissingOpeningBrace { name: String },

    #[error("directive \"{name}\" is not terminated by \";\"")]
    NotTerminated { name: String },

    #[error("invalid number of arguments in \"{name}\" directive")]
    InvalidArguments { name: String },

    #[error("invalid value \"{value}\" in \"{name}\" directive, it must be \"on\" or \"off\"")]
    InvalidFlag { name: String, value: String },
}

/// The block path a directive sits in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockContext(Vec<String>);

impl BlockContext {
    /// The top-level context
    pub fn main() -> Self {
        Self::default()
    }

    /// Context for the children of block directive `name`.
    ///
    /// Nested locations share the `http>location` context.
    pub fn enter(&self, name: &str) -> Self {
        if name == "location" && self.0.first().map(String::as_str) == Some("http") {
            return Self(vec!["http".to_string(), "location".to_string()]);
        }
        let mut path = self.0.clone();
        path.push(name.to_string());
        Self(path)
    }

    /// Innermost block name
    pub fn innermost(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn mask(&self) -> Option<Mask> {
        grammar::context_mask(&self.0)
    }
}

impl<S: Into<String>> FromIterator<S> for BlockContext {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Check one directive.
///
/// `term` is the token that ended the directive, `;` or `{` when well
/// formed.
pub fn analyze(
    name: &str,
    args: &[String],
    term: &str,
    ctx: &BlockContext,
    options: &ParseOptions,
) -> Result<(), AnalysisError> {
    let Some(masks) = grammar::lookup(name, &options.directive_sources) else {
        if options.error_on_unknown_directives {
            return Err(AnalysisError::UnknownDirective {
                name: name.to_string(),
            });
        }
        return Ok(());
    };

    // contexts nginx does not have are not validated
    let Some(ctx_mask) = ctx.mask() else {
        return Ok(());
    };

    let masks: Vec<Mask> = if options.skip_directive_context_check {
        masks
    } else {
        let allowed: Vec<Mask> = masks.into_iter().filter(|m| m & ctx_mask != 0).collect();
        if allowed.is_empty() {
            return Err(AnalysisError::NotAllowedHere {
                name: name.to_string(),
            });
        }
        allowed
    };

    if options.skip_directive_args_check {
        return Ok(());
    }

    let mut reason = None;
    for &mask in masks.iter().rev() {
        match check_mask(mask, name, args, term) {
            Ok(()) => return Ok(()),
            Err(err) => reason = Some(err),
        }
    }

    Err(reason.unwrap_or_else(|| AnalysisError::InvalidArguments {
        name: name.to_string(),
    }))
}

fn check_mask(mask: Mask, name: &str, args: &[String], term: &str) -> Result<(), AnalysisError> {
    if mask & grammar::CONF_BLOCK != 0 && term != "{" {
        return Err(AnalysisError::MissingOpeningBrace {
            name: name.to_string(),
        });
    }
    if mask & grammar::CONF_BLOCK == 0 && term != ";" {
        return Err(AnalysisError::NotTerminated {
            name: name.to_string(),
        });
    }

    let n = args.len();
    let counted = n <= 7 && (mask >> n) & 1 != 0;
    let flag = mask & grammar::CONF_FLAG != 0 && n == 1 && is_flag(&args[0]);
    let any = mask & grammar::CONF_ANY != 0;
    let one_more = mask & grammar::CONF_1MORE != 0 && n >= 1;
    let two_more = mask & grammar::CONF_2MORE != 0 && n >= 2;

    if counted || flag || any || one_more || two_more {
        return Ok(());
    }

    if mask & grammar::CONF_FLAG != 0 && n == 1 {
        return Err(AnalysisError::InvalidFlag {
            name: name.to_string(),
            value: args[0].clone(),
        });
    }
    Err(AnalysisError::InvalidArguments {
        name: name.to_string(),
    })
}

fn is_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("on") || value.eq_ignore_ascii_case("off")
}
