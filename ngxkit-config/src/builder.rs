//! Renders directive trees back to configuration text
//!
//! Quoting is the inverse of the scanner: an argument is left bare when the
//! scanner would read it back as the same single word, and quoted otherwise.

use crate::plugin::ExtensionRegistry;
use ngxkit_core::{BuildOptions, Config, Directive, Payload, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const HEADER: &str = "# This config was generated by ngxkit.\n# Edit the source tree rather than this file.\n\n";

/// Configuration text builder
#[derive(Clone)]
pub struct Builder {
    options: BuildOptions,
    extensions: ExtensionRegistry,
}

impl Builder {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            options,
            extensions: ExtensionRegistry::builtin(),
        }
    }

    /// Replace the builder extensions
    pub fn with_extensions(mut self, extensions: ExtensionRegistry) -> Self {
        self.extensions = extensions;
        self
    }

    /// Render a statement list as configuration text
    pub fn build(&self, block: &[Directive]) -> String {
        let mut out = String::new();
        if self.options.header {
            out.push_str(HEADER);
        }

        let mut body = String::new();
        self.block(&mut body, block, 0, None, true);
        out.push_str(body.strip_suffix('\n').unwrap_or(&body));
        out
    }

    pub fn build_config(&self, config: &Config) -> String {
        self.build(&config.parsed)
    }

    /// Write every Config of `payload` to its file, relative paths under
    /// `dir`
    pub fn build_files(&self, payload: &Payload, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        for config in &payload.config {
            let path = dir.join(&config.file);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }

            let mut text = self.build_config(config).trim_end().to_string();
            text.push('\n');
            fs::write(&path, text)?;
            tracing::debug!("wrote {}", path.display());
        }
        Ok(())
    }

    fn margin(&self, depth: usize) -> String {
        if self.options.tabs {
            "\t".repeat(depth)
        } else {
            " ".repeat(self.options.indent * depth)
        }
    }

    fn block(
        &self,
        out: &mut String,
        block: &[Directive],
        depth: usize,
        mut last_line: Option<usize>,
        top: bool,
    ) {
        for (index, stmt) in block.iter().enumerate() {
            if stmt.is_comment() && last_line == Some(stmt.line) {
                out.push_str(" #");
                out.push_str(stmt.comment.as_deref().unwrap_or_default());
                // a comment runs to the end of the line
                last_line = None;
                continue;
            }

            if index != 0 || !top {
                out.push('\n');
            }
            out.push_str(&self.margin(depth));

            if let Some(comment) = &stmt.comment {
                out.push('#');
                out.push_str(comment);
                last_line = None;
                continue;
            }

            if let Some(children) = &stmt.block {
                self.head(out, stmt);
                out.push_str(" {");
                self.block(out, children, depth + 1, Some(stmt.line), false);
                out.push('\n');
                out.push_str(&self.margin(depth));
                out.push('}');
                // nothing may follow a closing brace on its line
                last_line = None;
                continue;
            }

            match self.render_extension(stmt) {
                Some(text) => out.push_str(&text),
                None => {
                    self.head(out, stmt);
                    out.push(';');
                }
            }
            last_line = Some(stmt.line);
        }
    }

    fn render_extension(&self, stmt: &Directive) -> Option<String> {
        self.extensions.builder(&stmt.name)?.render(stmt)
    }

    /// Name and arguments, without the terminator
    fn head(&self, out: &mut String, stmt: &Directive) {
        out.push_str(&enquote(&stmt.name));

        if stmt.name == "if" {
            out.push_str(" (");
            if stmt.args.first().is_some_and(|a| needs_quote(a)) {
                out.push(' ');
            }
            let args: Vec<String> = stmt.args.iter().map(|a| enquote(a)).collect();
            out.push_str(&args.join(" "));
            if stmt.args.last().is_some_and(|a| needs_quote(a)) {
                out.push(' ');
            }
            out.push(')');
            return;
        }

        for arg in &stmt.args {
            let _ = write!(out, " {}", enquote(arg));
        }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new(BuildOptions::default())
    }
}

/// Render `block` with the bundled extensions
pub fn build(block: &[Directive], options: &BuildOptions) -> String {
    Builder::new(options.clone()).build(block)
}

/// Write every Config of `payload` under `dir`
pub fn build_files(payload: &Payload, dir: impl AsRef<Path>, options: &BuildOptions) -> Result<()> {
    Builder::new(options.clone()).build_files(payload, dir)
}

/// Whether the scanner would read `arg` back as something other than one
/// bare word equal to `arg`
pub fn needs_quote(arg: &str) -> bool {
    let mut chars = arg.chars();
    match chars.next() {
        None => return true,
        Some(c) if c.is_whitespace() || "{};\"'#".contains(c) => return true,
        Some(_) => {}
    }

    let mut escaped = false;
    let mut expanding = false;
    let mut prev = None;

    for c in arg.chars() {
        if escaped {
            escaped = false;
            prev = Some(c);
            continue;
        }
        match c {
            '\\' => escaped = true,
            c if c.is_whitespace() || ";\"'".contains(c) => return true,
            '{' if prev == Some('$') && !expanding => expanding = true,
            '{' => return true,
            '}' if expanding => expanding = false,
            '}' => return true,
            _ => {}
        }
        prev = if escaped { None } else { Some(c) };
    }

    expanding || escaped || prev == Some('$')
}

/// Whether `text` survives a round trip inside `quote`
fn fits_quote(text: &str, quote: char) -> bool {
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                // the scanner would drop the backslash
                Some(next) if next == quote => return false,
                Some(_) => {}
                // the backslash would escape the closing quote
                None => return false,
            }
        }
    }
    true
}

/// Quote `arg` if the scanner needs it to be quoted
pub fn enquote(arg: &str) -> String {
    if !needs_quote(arg) {
        return arg.to_string();
    }

    let preferred = if arg.contains('"') { '\'' } else { '"' };
    let other = if preferred == '"' { '\'' } else { '"' };
    let quote = if !fits_quote(arg, preferred) && fits_quote(arg, other) {
        other
    } else {
        preferred
    };

    let mut out = String::with_capacity(arg.len() + 2);
    out.push(quote);
    let mut chars = arg.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            out.push(c);
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else if c == quote {
            out.push('\\');
            out.push(c);
        } else {
            out.push(c);
        }
    }
    out.push(quote);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;
    use ngxkit_core::Status;

    fn stmt(name: &str, args: &[&str]) -> Directive {
        Directive::new(name, 1).with_args(args.iter().copied())
    }

    fn at(line: usize, name: &str, args: &[&str]) -> Directive {
        Directive::new(name, line).with_args(args.iter().copied())
    }

    #[test]
    fn test_needs_quote() {
        for bare in [
            "foo", "${x}", "/abc/${uri}.html", "$host", "a\\ b", "a#b", "=404", "\\\"x",
            "a\\${b}c",
        ] {
            assert!(!needs_quote(bare), "{bare}");
        }
        for quoted in [
            "", "foo bar", " x", "{", "}", ";", "a;b", "'", "#x", "a${", "a}", "x{", "${a${b}}",
            "a\\", "a$", "a\"b",
        ] {
            assert!(needs_quote(quoted), "{quoted:?}");
        }
    }

    #[test]
    fn test_enquote() {
        assert_eq!(enquote("foo"), "foo");
        assert_eq!(enquote("foo bar"), "\"foo bar\"");
        assert_eq!(enquote(""), "\"\"");
        assert_eq!(enquote("say \"hi\""), "'say \"hi\"'");
        assert_eq!(enquote("it's \"x\""), "'it\\'s \"x\"'");
        assert_eq!(enquote("a\\\" b"), "'a\\\" b'");
        assert_eq!(enquote("line\nbreak"), "\"line\nbreak\"");
        assert_eq!(enquote("ünïcode ✓"), "\"ünïcode ✓\"");
    }

    #[test]
    fn test_enquote_inverts_scanner() {
        let samples = [
            "foo bar",
            "",
            "say \"hi\"",
            "it's \"x\"",
            "a\\\" b",
            "a\\' b",
            "tab\there",
            "line\nbreak",
            "{ json: 1 }",
            "^/(.*)$",
            "a${",
            "#not a comment",
            "ünïcode ✓",
            "a\\${b} c",
        ];
        for sample in samples {
            let text = format!("x {};", enquote(sample));
            let tokens = tokenize(&text).unwrap();
            assert_eq!(tokens.len(), 3, "{text}");
            assert_eq!(tokens[1].text, sample, "{text}");
        }
    }

    #[test]
    fn test_build_nested() {
        let tree = vec![
            at(1, "events", &[]).with_block(vec![at(2, "worker_connections", &["1024"])]),
            at(4, "http", &[]).with_block(vec![at(5, "server", &[]).with_block(vec![
                at(6, "listen", &["127.0.0.1:8080"]),
                at(7, "server_name", &["default_server"]),
                at(8, "location", &["/"]).with_block(vec![at(9, "return", &["200", "foo bar baz"])]),
            ])]),
        ];
        let expected = "events {\n    worker_connections 1024;\n}\nhttp {\n    server {\n        listen 127.0.0.1:8080;\n        server_name default_server;\n        location / {\n            return 200 \"foo bar baz\";\n        }\n    }\n}";
        assert_eq!(build(&tree, &BuildOptions::default()), expected);
    }

    #[test]
    fn test_build_tabs_and_header() {
        let tree = vec![stmt("http", &[]).with_block(vec![stmt("gzip", &["on"])])];
        let options = BuildOptions {
            tabs: true,
            header: true,
            ..BuildOptions::default()
        };
        let text = build(&tree, &options);
        assert!(text.starts_with("# This config was generated by ngxkit."));
        assert!(text.ends_with("\n\nhttp {\n\tgzip on;\n}"));

        let two = BuildOptions {
            indent: 2,
            ..BuildOptions::default()
        };
        assert_eq!(build(&tree, &two), "http {\n  gzip on;\n}");
    }

    #[test]
    fn test_build_empty_block() {
        let tree = vec![stmt("events", &[]).with_block(vec![])];
        assert_eq!(build(&tree, &BuildOptions::default()), "events {\n}");
    }

    #[test]
    fn test_build_if() {
        let tree = vec![
            stmt("if", &["$request_method", "=", "POST"]).with_block(vec![stmt("return", &["405"])]),
            stmt("if", &["$http_user_agent", "~", "MSIE 6"]).with_block(vec![]),
        ];
        assert_eq!(
            build(&tree, &BuildOptions::default()),
            "if ($request_method = POST) {\n    return 405;\n}\nif ($http_user_agent ~ \"MSIE 6\" ) {\n}"
        );
    }

    #[test]
    fn test_build_comments() {
        let tree = vec![
            Directive::comment(1, " top"),
            at(2, "user", &["nginx"]),
            Directive::comment(2, " same line"),
            at(3, "http", &[]).with_block(vec![Directive::comment(3, " after brace")]),
            Directive::comment(3, " after block"),
        ];
        assert_eq!(
            build(&tree, &BuildOptions::default()),
            "# top\nuser nginx; # same line\nhttp { # after brace\n}\n# after block"
        );
    }

    #[test]
    fn test_build_lua_extension() {
        let tree = vec![stmt("location", &["/"]).with_block(vec![
            stmt("content_by_lua_block", &[" ngx.say('hi') "]),
            stmt("set_by_lua_block", &["$res", " return 1 "]),
        ])];
        assert_eq!(
            build(&tree, &BuildOptions::default()),
            "location / {\n    content_by_lua_block { ngx.say('hi') }\n    set_by_lua_block $res { return 1 }\n}"
        );

        let plain = Builder::default().with_extensions(ExtensionRegistry::new());
        assert_eq!(
            plain.build(&[stmt("content_by_lua_block", &["x"])]),
            "content_by_lua_block x;"
        );
    }

    #[test]
    fn test_build_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut main = Config::new("nginx.conf");
        main.parsed = vec![stmt("events", &[]).with_block(vec![])];
        let mut server = Config::new("conf.d/server.conf");
        server.parsed = vec![stmt("server", &[]).with_block(vec![stmt("listen", &["80"])])];
        let payload = Payload {
            status: Status::Ok,
            errors: vec![],
            config: vec![main, server],
        };

        build_files(&payload, dir.path(), &BuildOptions::default()).unwrap();

        let text = fs::read_to_string(dir.path().join("nginx.conf")).unwrap();
        assert_eq!(text, "events {\n}\n");
        let text = fs::read_to_string(dir.path().join("conf.d/server.conf")).unwrap();
        assert_eq!(text, "server {\n    listen 80;\n}\n");
    }
}
