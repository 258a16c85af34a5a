//! Recursive parser for NGINX configuration files
//!
//! Pulls tokens from the [`Scanner`], validates every statement and builds
//! one directive tree per file. Files pulled in by `include` are queued and
//! parsed after the file that included them, each keeping the block context
//! of its include statement.

use crate::parser::analyzer::{self, AnalysisError, BlockContext};
use crate::parser::fs::{self, ConfigFs, OsFs};
use crate::parser::lexer::{LexError, Scanner, Token};
use crate::parser::map_body;
use crate::plugin::ExtensionRegistry;
use ngxkit_core::config::{IncludeGraph, cycle_error};
use ngxkit_core::{Config, Directive, ErrorKind, ParseError, ParseOptions, Payload};
use std::collections::{HashMap, VecDeque};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// How far an error reaches
enum Abort {
    /// Stop parsing the current file; the error is recorded on its Config
    File(ParseError),
    /// Stop the whole parse
    Parse(ParseError),
}

type ParseResult<T> = Result<T, Abort>;

/// Configuration parser
#[derive(Clone)]
pub struct Parser {
    options: ParseOptions,
    fs: Arc<dyn ConfigFs>,
    extensions: ExtensionRegistry,
}

impl Parser {
    /// Create a parser reading from the real file system with the bundled
    /// extensions
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            fs: Arc::new(OsFs),
            extensions: ExtensionRegistry::builtin(),
        }
    }

    /// Read files through `fs` instead of the real file system
    pub fn with_fs(mut self, fs: impl ConfigFs + 'static) -> Self {
        self.fs = Arc::new(fs);
        self
    }

    /// Replace the scanner extensions
    pub fn with_extensions(mut self, extensions: ExtensionRegistry) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse `path` and everything it includes.
    ///
    /// Fails when the entry file cannot be read, on an include cycle, and on
    /// the first error of any kind when `stop_parsing_on_error` is set.
    /// Other errors are recorded in the returned payload.
    pub fn parse(&self, path: impl AsRef<Path>) -> Result<Payload, ParseError> {
        let entry = path.as_ref().to_path_buf();
        let mut session = Session::new(self, &entry);

        while let Some((path, ctx)) = session.queue.pop_front() {
            let config = session.parse_file(&path, &ctx)?;
            session.payload.config.push(config);
            session.current += 1;
        }

        if let Some(cycle) = session.graph.find_cycle(0) {
            let files: Vec<&str> = cycle
                .iter()
                .filter_map(|&i| session.payload.config.get(i))
                .map(|c| c.file.as_str())
                .collect();
            return Err(cycle_error(&files));
        }

        let payload = session.payload;
        tracing::info!(
            files = payload.config.len(),
            errors = payload.errors.len(),
            status = %payload.status,
            "parsed {}",
            entry.display()
        );

        if self.options.combine_configs {
            return payload.combined();
        }
        Ok(payload)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(ParseOptions::default())
    }
}

/// State of one `Parser::parse` call
struct Session<'p> {
    parser: &'p Parser,
    options: &'p ParseOptions,
    config_dir: PathBuf,
    queue: VecDeque<(PathBuf, BlockContext)>,
    included: HashMap<PathBuf, usize>,
    graph: IncludeGraph,
    payload: Payload,
    /// Index of the file being parsed
    current: usize,
}

impl<'p> Session<'p> {
    fn new(parser: &'p Parser, entry: &Path) -> Self {
        let config_dir = entry.parent().map(Path::to_path_buf).unwrap_or_default();
        let mut included = HashMap::new();
        included.insert(entry.to_path_buf(), 0);

        Self {
            parser,
            options: &parser.options,
            config_dir,
            queue: VecDeque::from([(entry.to_path_buf(), BlockContext::main())]),
            included,
            graph: IncludeGraph::new(),
            payload: Payload::default(),
            current: 0,
        }
    }

    fn parse_file(&mut self, path: &Path, ctx: &BlockContext) -> Result<Config, ParseError> {
        let mut config = Config::new(path.to_string_lossy());
        tracing::debug!("opening {}", path.display());

        let source = match self.read(path) {
            Ok(source) => source,
            Err(err) => {
                let err = ParseError::new(
                    ErrorKind::Io,
                    format!("open {}: {}", path.display(), err),
                )
                .with_file(config.file.clone());
                if self.current == 0 || self.options.stop_parsing_on_error {
                    return Err(err);
                }
                self.record(&mut config, err);
                return Ok(config);
            }
        };

        let mut scanner = Scanner::new(&source).with_extensions(&self.parser.extensions);
        match self.block(&mut config, &mut scanner, ctx) {
            Ok(parsed) => config.parsed = parsed,
            Err(Abort::File(err)) => self.record(&mut config, err),
            Err(Abort::Parse(err)) => return Err(err),
        }
        Ok(config)
    }

    /// Read a whole file; bytes that are not UTF-8 become U+FFFD
    fn read(&self, path: &Path) -> std::io::Result<String> {
        let mut bytes = Vec::new();
        self.parser.fs.open(path)?.read_to_end(&mut bytes)?;
        Ok(match String::from_utf8(bytes) {
            Ok(source) => source,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        })
    }

    /// Record a recoverable error on `config` and the payload
    fn record(&mut self, config: &mut Config, err: ParseError) {
        tracing::warn!("{}", err);
        self.payload.record(config.file.clone(), err.clone());
        config.record(err);
    }

    /// Record a recoverable error, or abort when errors are fatal
    fn recover(&mut self, config: &mut Config, err: ParseError) -> ParseResult<()> {
        if self.options.stop_parsing_on_error {
            return Err(Abort::Parse(err));
        }
        self.record(config, err);
        Ok(())
    }

    fn next_token(&self, config: &Config, scanner: &mut Scanner<'_>) -> ParseResult<Option<Token>> {
        match scanner.next() {
            None => Ok(None),
            Some(Ok(token)) => Ok(Some(token)),
            Some(Err(err)) => Err(self.lex_error(config, err)),
        }
    }

    fn lex_error(&self, config: &Config, err: LexError) -> Abort {
        let err = ParseError::new(ErrorKind::Lex, err.message)
            .with_file(config.file.clone())
            .with_line(err.line);
        if self.options.stop_parsing_on_error {
            Abort::Parse(err)
        } else {
            Abort::File(err)
        }
    }

    /// Skip tokens up to the `}` that closes the current block
    fn consume(&self, config: &Config, scanner: &mut Scanner<'_>) -> ParseResult<()> {
        while let Some(token) = self.next_token(config, scanner)? {
            if token.is("}") {
                break;
            }
            if token.is("{") {
                self.consume(config, scanner)?;
            }
        }
        Ok(())
    }

    /// Parse statements up to the end of the current block
    fn block(
        &mut self,
        config: &mut Config,
        scanner: &mut Scanner<'_>,
        ctx: &BlockContext,
    ) -> ParseResult<Vec<Directive>> {
        let mut parsed = Vec::new();

        while let Some(token) = self.next_token(config, scanner)? {
            if token.is("}") {
                break;
            }

            if token.is_comment() {
                if self.options.parse_comments {
                    parsed.push(Directive::comment(token.line, &token.text[1..]));
                }
                continue;
            }

            let mut stmt = Directive::new(token.text, token.line);
            let mut comments = Vec::new();

            // arguments run up to the first bare terminator
            let term = loop {
                let Some(token) = self.next_token(config, scanner)? else {
                    let err = ParseError::new(ErrorKind::Lex, "premature end of file")
                        .with_file(config.file.clone())
                        .with_line(stmt.line);
                    return Err(if self.options.stop_parsing_on_error {
                        Abort::Parse(err)
                    } else {
                        Abort::File(err)
                    });
                };
                if token.is_terminator() {
                    break token;
                }
                if token.is_comment() {
                    comments.push(token.text[1..].to_string());
                } else {
                    stmt.args.push(token.text);
                }
            };

            if self.options.is_ignored(&stmt.name) {
                if term.is("{") {
                    self.consume(config, scanner)?;
                }
                if term.is("}") {
                    break;
                }
                continue;
            }

            if let Some(map) = ctx.innermost().filter(|name| map_body::is_map_block(name)) {
                if let Err(err) = map_body::check_parameter(map, &stmt.name, &stmt.args, &term.text) {
                    let err = ParseError::new(ErrorKind::Analysis, err.to_string())
                        .with_file(config.file.clone())
                        .with_line(stmt.line)
                        .with_block_context(err.block());
                    self.recover(config, err)?;
                    if term.is("{") {
                        self.consume(config, scanner)?;
                        continue;
                    }
                    if term.is("}") {
                        break;
                    }
                    continue;
                }
                stmt.is_map_block_parameter = true;
                parsed.push(stmt);
                continue;
            }

            if let Err(err) = analyzer::analyze(&stmt.name, &stmt.args, &term.text, ctx, self.options) {
                self.analysis_failed(config, &stmt, err)?;
                // resynchronize on the block or the end of the enclosing one
                if term.is("{") {
                    self.consume(config, scanner)?;
                    continue;
                }
                if term.is("}") {
                    break;
                }
                continue;
            }

            if stmt.name == "if" {
                strip_if_parens(&mut stmt.args);
            }

            if stmt.name == "include" && !self.options.single_file {
                self.resolve_include(config, &mut stmt, ctx)?;
            }

            if term.is("{") {
                let inner = ctx.enter(&stmt.name);
                stmt.block = Some(self.block(config, scanner, &inner)?);
            }

            let line = stmt.line;
            parsed.push(stmt);

            if self.options.parse_comments {
                parsed.extend(comments.into_iter().map(|c| Directive::comment(line, c)));
            }

            if term.is("}") {
                break;
            }
        }

        Ok(parsed)
    }

    fn analysis_failed(
        &mut self,
        config: &mut Config,
        stmt: &Directive,
        err: AnalysisError,
    ) -> ParseResult<()> {
        let err = ParseError::new(ErrorKind::Analysis, err.to_string())
            .with_file(config.file.clone())
            .with_line(stmt.line);
        self.recover(config, err)
    }

    /// Expand an include statement and queue the files it names
    fn resolve_include(
        &mut self,
        config: &mut Config,
        stmt: &mut Directive,
        ctx: &BlockContext,
    ) -> ParseResult<()> {
        let Some(arg) = stmt.args.first() else {
            return Err(Abort::Parse(
                ParseError::new(
                    ErrorKind::Include,
                    "invalid number of arguments in \"include\" directive",
                )
                .with_file(config.file.clone())
                .with_line(stmt.line),
            ));
        };

        let pattern = if Path::new(arg).is_absolute() {
            PathBuf::from(arg)
        } else {
            self.config_dir.join(arg)
        };
        let pattern_str = pattern.to_string_lossy().into_owned();

        let files = if fs::has_magic(&pattern_str) {
            match self.parser.fs.glob(&pattern_str) {
                Ok(mut files) => {
                    files.sort();
                    files
                }
                Err(err) => {
                    let err = ParseError::new(ErrorKind::Include, err.to_string())
                        .with_file(config.file.clone())
                        .with_line(stmt.line);
                    self.recover(config, err)?;
                    Vec::new()
                }
            }
        } else {
            // nginx refuses to start when an explicit include cannot be opened
            match self.parser.fs.open(&pattern) {
                Ok(_) => vec![pattern],
                Err(err) => {
                    let err = ParseError::new(
                        ErrorKind::Include,
                        format!("open {}: {}", pattern.display(), err),
                    )
                    .with_file(config.file.clone())
                    .with_line(stmt.line);
                    self.recover(config, err)?;
                    Vec::new()
                }
            }
        };

        tracing::debug!("include {} resolved to {} file(s)", arg, files.len());

        let mut indices = Vec::with_capacity(files.len());
        for file in files {
            let next = self.included.len();
            let idx = *self.included.entry(file.clone()).or_insert_with(|| {
                self.queue.push_back((file, ctx.clone()));
                next
            });
            self.graph.add_edge(self.current, idx);
            indices.push(idx);
        }

        if !indices.is_empty() {
            stmt.includes = Some(indices);
        }
        Ok(())
    }
}

/// Strip the parentheses around an `if` condition
fn strip_if_parens(args: &mut Vec<String>) {
    let wrapped = args.first().is_some_and(|a| a.starts_with('('))
        && args.last().is_some_and(|a| a.ends_with(')'));
    if !wrapped {
        return;
    }

    if let Some(first) = args.first_mut() {
        *first = first[1..].trim_start().to_string();
    }
    if let Some(last) = args.last_mut() {
        if let Some(stripped) = last.strip_suffix(')') {
            *last = stripped.trim_end().to_string();
        }
    }

    if args.first().is_some_and(String::is_empty) {
        args.remove(0);
    }
    if args.last().is_some_and(String::is_empty) {
        args.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::fs::MemFs;
    use ngxkit_core::Status;

    fn parse_mem(files: &[(&str, &str)], options: ParseOptions) -> Result<Payload, ParseError> {
        let mut fs = MemFs::new();
        for (path, contents) in files {
            fs.insert(*path, *contents);
        }
        Parser::new(options).with_fs(fs).parse(files[0].0)
    }

    fn parse_one(source: &str) -> Payload {
        parse_mem(&[("nginx.conf", source)], ParseOptions::default()).unwrap()
    }

    fn names(block: &[Directive]) -> Vec<&str> {
        block.iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn test_strip_if_parens() {
        let mut args = vec!["($request_method".to_string(), "=".into(), "POST)".into()];
        strip_if_parens(&mut args);
        assert_eq!(args, vec!["$request_method", "=", "POST"]);

        let mut args = vec!["( $slow".to_string(), ")".into()];
        strip_if_parens(&mut args);
        assert_eq!(args, vec!["$slow"]);

        let mut args = vec!["($a)".to_string()];
        strip_if_parens(&mut args);
        assert_eq!(args, vec!["$a"]);

        let mut args = vec!["()".to_string()];
        strip_if_parens(&mut args);
        assert!(args.is_empty());

        let mut args = vec!["$a".to_string()];
        strip_if_parens(&mut args);
        assert_eq!(args, vec!["$a"]);
    }

    #[test]
    fn test_simple_tree() {
        let payload = parse_one("events {\n    worker_connections 1024;\n}\nhttp {\n    server {\n        listen 127.0.0.1:8080;\n        location / {\n            return 200 \"foo bar\";\n        }\n    }\n}\n");
        assert_eq!(payload.status, Status::Ok);

        let parsed = &payload.config[0].parsed;
        assert_eq!(names(parsed), vec!["events", "http"]);
        let server = &parsed[1].block.as_ref().unwrap()[0];
        assert_eq!(server.line, 5);
        let location = &server.block.as_ref().unwrap()[1];
        assert_eq!(location.args, vec!["/"]);
        let ret = &location.block.as_ref().unwrap()[0];
        assert_eq!(ret.args, vec!["200", "foo bar"]);
        assert_eq!(ret.line, 8);
    }

    #[test]
    fn test_comments() {
        let source = "# top\nevents { # inside\n}\nhttp {\n    server_tokens off; # trailing\n    listen # between\n    80;\n}\n";
        let without = parse_one(source);
        assert!(without.config[0].parsed.iter().all(|d| !d.is_comment()));

        let options = ParseOptions {
            parse_comments: true,
            skip_directive_context_check: true,
            ..ParseOptions::default()
        };
        let payload = parse_mem(&[("nginx.conf", source)], options).unwrap();
        let parsed = &payload.config[0].parsed;
        assert_eq!(parsed[0].comment.as_deref(), Some(" top"));
        assert_eq!(
            parsed[1].block.as_ref().unwrap()[0].comment.as_deref(),
            Some(" inside")
        );

        let http = parsed[2].block.as_ref().unwrap();
        assert_eq!(names(http), vec!["server_tokens", "#", "listen", "#"]);
        assert_eq!(http[3].comment.as_deref(), Some(" between"));
        assert_eq!(http[3].line, 6);
    }

    #[test]
    fn test_analysis_errors_are_recorded() {
        let payload = parse_one("http {\n    listen 80;\n    server {\n        listen 80 {\n            foo;\n        }\n        server_name example.com;\n    }\n}\n");
        assert_eq!(payload.status, Status::Failed);
        let config = &payload.config[0];
        assert_eq!(config.status, Status::Failed);
        assert_eq!(config.errors.len(), 2);
        assert_eq!(
            config.errors[0].error.to_string(),
            "\"listen\" directive is not allowed here in nginx.conf:2"
        );
        assert_eq!(
            config.errors[1].error.what,
            "directive \"listen\" is not terminated by \";\""
        );
        assert_eq!(payload.errors.len(), 2);

        // the bad block was skipped, the rest of the server survives
        let server = &config.parsed[0].block.as_ref().unwrap()[0];
        assert_eq!(names(server.block.as_ref().unwrap()), vec!["server_name"]);
    }

    #[test]
    fn test_stop_on_error() {
        let options = ParseOptions {
            stop_parsing_on_error: true,
            ..ParseOptions::default()
        };
        let err = parse_mem(&[("nginx.conf", "http {\n    listen 80;\n}\n")], options).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Analysis);
        assert_eq!(err.line, Some(2));
    }

    #[test]
    fn test_lex_error_fails_the_file() {
        let payload = parse_one("http {\n    server {\n");
        let config = &payload.config[0];
        assert_eq!(config.status, Status::Failed);
        assert!(config.parsed.is_empty());
        assert_eq!(config.errors[0].error.kind, ErrorKind::Lex);
    }

    #[test]
    fn test_premature_end() {
        let payload = parse_one("user nginx");
        let err = &payload.config[0].errors[0].error;
        assert_eq!(err.to_string(), "premature end of file in nginx.conf:1");
    }

    #[test]
    fn test_ignore_directives() {
        let options = ParseOptions {
            ignore_directives: vec!["listen".into(), "server_name".into(), "events".into()],
            ..ParseOptions::default()
        };
        let source = "events { worker_connections 1024; }\nhttp { server { listen 80; server_name a; root /srv; } }\n";
        let payload = parse_mem(&[("nginx.conf", source)], options).unwrap();
        let parsed = &payload.config[0].parsed;
        assert_eq!(names(parsed), vec!["http"]);
        let server = &parsed[0].block.as_ref().unwrap()[0];
        assert_eq!(names(server.block.as_ref().unwrap()), vec!["root"]);
    }

    #[test]
    fn test_map_body() {
        let source = "http {\n    map $host $backend {\n        default 0;\n        hostnames;\n        example.com 1 2;\n        *.example.org 3;\n    }\n}\n";
        let payload = parse_one(source);
        let config = &payload.config[0];
        assert_eq!(config.errors.len(), 1);
        let err = &config.errors[0].error;
        assert_eq!(err.what, "invalid number of parameters");
        assert_eq!(err.block_context.as_deref(), Some("map"));
        assert_eq!(err.line, Some(5));

        let map = &config.parsed[0].block.as_ref().unwrap()[0];
        let body = map.block.as_ref().unwrap();
        assert_eq!(names(body), vec!["default", "hostnames", "*.example.org"]);
        assert!(body.iter().all(|d| d.is_map_block_parameter));
        assert!(!map.is_map_block_parameter);
    }

    #[test]
    fn test_include_inside_map_is_a_parameter() {
        let payload = parse_one("http {\n    geo $geo {\n        include geo.conf;\n    }\n}\n");
        assert!(payload.is_ok());
        let geo = &payload.config[0].parsed[0].block.as_ref().unwrap()[0];
        let include = &geo.block.as_ref().unwrap()[0];
        assert!(include.is_map_block_parameter);
        assert!(include.includes.is_none());
        assert_eq!(payload.config.len(), 1);
    }

    #[test]
    fn test_includes() {
        let payload = parse_mem(
            &[
                ("/etc/nginx/nginx.conf", "events {}\nhttp {\n    include conf.d/*.conf;\n    include missing.conf;\n}\n"),
                ("/etc/nginx/conf.d/b.conf", "server { listen 8081; }\n"),
                ("/etc/nginx/conf.d/a.conf", "server { listen 8080; }\ninclude /etc/nginx/conf.d/b.conf;\n"),
            ],
            ParseOptions {
                skip_directive_context_check: true,
                ..ParseOptions::default()
            },
        )
        .unwrap();

        let files: Vec<&str> = payload.config.iter().map(|c| c.file.as_str()).collect();
        assert_eq!(
            files,
            vec!["/etc/nginx/nginx.conf", "/etc/nginx/conf.d/a.conf", "/etc/nginx/conf.d/b.conf"]
        );

        let http = payload.config[0].parsed[1].block.as_ref().unwrap();
        assert_eq!(http[0].includes, Some(vec![1, 2]));
        assert_eq!(http[1].includes, None);

        // b.conf is referenced again rather than parsed twice
        assert_eq!(payload.config[1].parsed[1].includes, Some(vec![2]));

        assert_eq!(payload.status, Status::Failed);
        assert_eq!(payload.config[0].errors.len(), 1);
        assert!(payload.config[0].errors[0]
            .error
            .what
            .starts_with("open /etc/nginx/missing.conf:"));
        assert_eq!(payload.config[1].status, Status::Ok);
    }

    #[test]
    fn test_included_file_keeps_context() {
        let payload = parse_mem(
            &[
                ("nginx.conf", "http {\n    include servers.conf;\n}\n"),
                ("servers.conf", "server {\n    listen 80;\n}\nlisten 81;\n"),
            ],
            ParseOptions::default(),
        )
        .unwrap();
        let servers = &payload.config[1];
        assert_eq!(servers.errors.len(), 1);
        assert_eq!(servers.errors[0].line, Some(4));
        assert_eq!(names(&servers.parsed), vec!["server"]);
    }

    #[test]
    fn test_single_file() {
        let options = ParseOptions {
            single_file: true,
            ..ParseOptions::default()
        };
        let payload = parse_mem(
            &[("nginx.conf", "include other.conf;\n"), ("other.conf", "")],
            options,
        )
        .unwrap();
        assert_eq!(payload.config.len(), 1);
        assert!(payload.config[0].parsed[0].includes.is_none());
    }

    #[test]
    fn test_include_cycle() {
        let err = parse_mem(
            &[
                ("nginx.conf", "include a.conf;\n"),
                ("a.conf", "include b.conf;\n"),
                ("b.conf", "include a.conf;\n"),
            ],
            ParseOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Cycle);
        assert_eq!(err.what, "include cycle detected: a.conf -> b.conf -> a.conf");
    }

    #[test]
    fn test_missing_entry_file() {
        let err = Parser::default()
            .with_fs(MemFs::new())
            .parse("nginx.conf")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Io);
        assert_eq!(err.file.as_deref(), Some("nginx.conf"));
    }

    #[test]
    fn test_combine() {
        let options = ParseOptions {
            combine_configs: true,
            ..ParseOptions::default()
        };
        let payload = parse_mem(
            &[
                ("nginx.conf", "http {\n    include servers.conf;\n}\n"),
                ("servers.conf", "server {\n    listen 80;\n}\n"),
            ],
            options,
        )
        .unwrap();
        assert_eq!(payload.config.len(), 1);
        let http = payload.config[0].parsed[0].block.as_ref().unwrap();
        assert_eq!(http[0].name, "server");
        assert_eq!(http[0].file.as_deref(), Some("servers.conf"));
        assert_eq!(payload.config[0].parsed[0].file.as_deref(), Some("nginx.conf"));
    }

    #[test]
    fn test_lua_block() {
        let payload = parse_one("http {\n    server {\n        location / {\n            content_by_lua_block {\n                ngx.say(\"}\")\n            }\n        }\n    }\n}\n");
        assert!(payload.is_ok(), "{:?}", payload.errors);
        let http = &payload.config[0].parsed[0];
        let location = &http.block.as_ref().unwrap()[0].block.as_ref().unwrap()[0];
        let lua = &location.block.as_ref().unwrap()[0];
        assert_eq!(lua.name, "content_by_lua_block");
        assert_eq!(lua.args, vec!["\n                ngx.say(\"}\")\n            "]);

        let plain = Parser::default()
            .with_extensions(ExtensionRegistry::new())
            .with_fs(MemFs::new().with_file("nginx.conf", "content_by_lua_block { return }"));
        let payload = plain.parse("nginx.conf").unwrap();
        assert_eq!(payload.status, Status::Failed);
    }
}
