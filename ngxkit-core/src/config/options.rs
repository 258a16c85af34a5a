//! Parse and build options

use serde::{Deserialize, Serialize};

/// A grammar table the analyzer may consult
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DirectiveSource {
    /// Core and commercial nginx modules, plus geoip2 and otel
    Nginx,
    /// lua-nginx-module
    Lua,
    /// njs scripting module
    Njs,
    /// NGINX App Protect WAF v4
    AppProtectWafV4,
}

fn default_sources() -> Vec<DirectiveSource> {
    vec![
        DirectiveSource::Nginx,
        DirectiveSource::Lua,
        DirectiveSource::Njs,
    ]
}

/// Options controlling a parse call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ParseOptions {
    /// Directive names to drop from the output, blocks included
    pub ignore_directives: Vec<String>,

    /// Abort on the first error instead of recording it
    pub stop_parsing_on_error: bool,

    /// Inline includes into a single Config
    pub combine_configs: bool,

    /// Leave include directives unexpanded
    pub single_file: bool,

    /// Emit comment nodes
    pub parse_comments: bool,

    /// Treat directives missing from every table as errors
    pub error_on_unknown_directives: bool,

    /// Accept directives in any context
    pub skip_directive_context_check: bool,

    /// Accept any argument count and terminator
    pub skip_directive_args_check: bool,

    /// Grammar tables to consult, in order
    pub directive_sources: Vec<DirectiveSource>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            ignore_directives: Vec::new(),
            stop_parsing_on_error: false,
            combine_configs: false,
            single_file: false,
            parse_comments: false,
            error_on_unknown_directives: false,
            skip_directive_context_check: false,
            skip_directive_args_check: false,
            directive_sources: default_sources(),
        }
    }
}

impl ParseOptions {
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore_directives.iter().any(|d| d == name)
    }
}

/// Options controlling rendering back to text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BuildOptions {
    /// Spaces per nesting level when `tabs` is off
    pub indent: usize,

    /// Indent with one tab per nesting level
    pub tabs: bool,

    /// Prefix the output with a generated-by banner
    pub header: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            indent: 4,
            tabs: false,
            header: false,
        }
    }
}

/// Both option sets, as stored in an options file
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub parse: ParseOptions,
    pub build: BuildOptions,
}
