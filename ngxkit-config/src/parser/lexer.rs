//! Lexer for NGINX configuration files
//!
//! Tokenization happens in two layers:
//! - `logos` splits the source into [`Lexeme`]s (blanks, newlines, escape
//!   pairs, the single-character specials and runs of plain text)
//! - [`Scanner`] folds lexemes into [`Token`]s, tracking quotes, comments,
//!   `${...}` expansions, brace depth and line numbers
//!
//! The scanner is a pull-based iterator. Registered scanner extensions can
//! take over the lexeme stream right after their directive name is read.

use crate::plugin::{ExtensionRegistry, ScannerExtension};
use logos::Logos;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

// ============================================================
// Lexemes
// ============================================================

/// Raw lexical units of a configuration file
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lexeme {
    #[token("\r")]
    CarriageReturn,

    #[token("\n")]
    Newline,

    /// Horizontal whitespace run
    #[regex(r"[^\S\r\n]+")]
    Blank,

    /// Backslash plus the character it escapes (carriage returns skipped)
    #[regex(r"\\\r*[^\r]")]
    Escaped,

    /// Backslash with nothing left to escape
    #[token("\\")]
    Backslash,

    #[token("{")]
    OpenBrace,

    #[token("}")]
    CloseBrace,

    #[token(";")]
    Semicolon,

    #[token("\"")]
    DoubleQuote,

    #[token("'")]
    SingleQuote,

    #[token("#")]
    Hash,

    #[token("$")]
    Dollar,

    /// Run of characters with no special meaning
    #[regex(r#"[^\s{};"'#$\\]+"#)]
    Text,
}

impl Lexeme {
    pub fn is_space(&self) -> bool {
        matches!(self, Lexeme::Blank | Lexeme::Newline)
    }

    pub fn is_quote(&self) -> bool {
        matches!(self, Lexeme::DoubleQuote | Lexeme::SingleQuote)
    }

    fn is_special(&self) -> bool {
        matches!(
            self,
            Lexeme::OpenBrace | Lexeme::CloseBrace | Lexeme::Semicolon
        )
    }
}

/// A lexeme together with its source text and starting line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece<'src> {
    pub kind: Lexeme,
    pub text: &'src str,
    pub line: usize,
}

impl<'src> Piece<'src> {
    /// Append the text, dropping carriage returns inside escape pairs
    pub fn push_to(&self, buf: &mut String) {
        if self.kind == Lexeme::Escaped {
            buf.extend(self.text.chars().filter(|&c| c != '\r'));
        } else {
            buf.push_str(self.text);
        }
    }

    /// The character following the backslash of an escape pair
    pub fn escaped_char(&self) -> Option<char> {
        match self.kind {
            Lexeme::Escaped => self.text.chars().last(),
            _ => None,
        }
    }

    fn ends_line(&self) -> bool {
        match self.kind {
            Lexeme::Newline => true,
            Lexeme::Escaped => self.text.ends_with('\n'),
            _ => false,
        }
    }
}

// ============================================================
// Tokens
// ============================================================

/// A token produced by the scanner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token text, with surrounding quotes removed
    pub text: String,
    /// Line the token started on
    pub line: usize,
    /// True when the token was written inside quotes
    pub is_quoted: bool,
}

impl Token {
    pub fn new(text: impl Into<String>, line: usize) -> Self {
        Self {
            text: text.into(),
            line,
            is_quoted: false,
        }
    }

    pub fn quoted(text: impl Into<String>, line: usize) -> Self {
        Self {
            text: text.into(),
            line,
            is_quoted: true,
        }
    }

    /// Unquoted token with exactly this text
    pub fn is(&self, text: &str) -> bool {
        !self.is_quoted && self.text == text
    }

    /// `{`, `;` or `}` outside of quotes
    pub fn is_terminator(&self) -> bool {
        self.is("{") || self.is(";") || self.is("}")
    }

    pub fn is_comment(&self) -> bool {
        !self.is_quoted && self.text.starts_with('#')
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_quoted {
            write!(f, "{:?}", self.text)
        } else {
            f.write_str(&self.text)
        }
    }
}

// ============================================================
// Errors
// ============================================================

/// Category of a scanner failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Too many `}` or a doubled `{`
    UnbalancedBraces,
    /// Doubled `;` or an unmatchable character
    UnexpectedToken,
    /// Input ended inside an open block
    UnexpectedEof,
    /// Reported by a scanner extension
    Extension,
}

/// Lexer error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub message: String,
    pub line: usize,
}

impl LexError {
    pub fn new(kind: LexErrorKind, message: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            message: message.into(),
            line,
        }
    }
}

/// Lexer result type
pub type LexResult<T> = Result<T, LexError>;

// ============================================================
// Scanner
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    SkipSpace,
    Word,
    Comment,
    Variable,
    Quote(Lexeme),
}

/// Streaming tokenizer over a configuration source
pub struct Scanner<'src> {
    lexer: logos::Lexer<'src, Lexeme>,
    line: usize,
    depth: usize,
    /// Last token was a special; only `}` may follow directly
    repeat_special: bool,
    /// Lexeme that ended the previous token and still has to be handled
    pending: Option<Piece<'src>>,
    /// Next word token would be a directive name
    expect_directive: bool,
    extensions: ExtensionRegistry,
    takeover: Option<(Arc<dyn ScannerExtension>, String)>,
    buffered: VecDeque<Token>,
    failed: Option<LexError>,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            lexer: Lexeme::lexer(source),
            line: 1,
            depth: 0,
            repeat_special: false,
            pending: None,
            expect_directive: true,
            extensions: ExtensionRegistry::new(),
            takeover: None,
            buffered: VecDeque::new(),
            failed: None,
        }
    }

    /// Let the registry's scanner extensions tokenize their directives
    pub fn with_extensions(mut self, registry: &ExtensionRegistry) -> Self {
        self.extensions = registry.clone();
        self
    }

    /// Current line number
    pub fn line(&self) -> usize {
        self.line
    }

    fn read(&mut self) -> LexResult<Option<Piece<'src>>> {
        if let Some(piece) = self.pending.take() {
            return Ok(Some(piece));
        }

        loop {
            let Some(result) = self.lexer.next() else {
                return Ok(None);
            };
            let line = self.line;
            let text = self.lexer.slice();
            let kind = result.map_err(|_| {
                LexError::new(
                    LexErrorKind::UnexpectedToken,
                    format!("unexpected {:?}", text),
                    line,
                )
            })?;

            if kind == Lexeme::CarriageReturn {
                continue;
            }

            let piece = Piece { kind, text, line };
            if piece.ends_line() {
                self.line += 1;
            }
            return Ok(Some(piece));
        }
    }

    /// Emit `{`, `;` or `}` as a token, enforcing brace balance
    fn special(&mut self, piece: Piece<'src>) -> LexResult<Token> {
        if self.repeat_special && piece.kind != Lexeme::CloseBrace {
            let kind = if piece.kind == Lexeme::OpenBrace {
                LexErrorKind::UnbalancedBraces
            } else {
                LexErrorKind::UnexpectedToken
            };
            return Err(LexError::new(
                kind,
                format!("unexpected \"{}\"", piece.text),
                piece.line,
            ));
        }
        self.repeat_special = true;

        match piece.kind {
            Lexeme::OpenBrace => self.depth += 1,
            Lexeme::CloseBrace => {
                if self.depth == 0 {
                    return Err(LexError::new(
                        LexErrorKind::UnbalancedBraces,
                        "unexpected \"}\"",
                        piece.line,
                    ));
                }
                self.depth -= 1;
            }
            _ => {}
        }

        Ok(Token::new(piece.text, piece.line))
    }

    /// Append a word lexeme; returns true when the token now ends in `$`,
    /// escaped or not
    fn push_word(&mut self, tok: &mut String, piece: &Piece<'src>) -> bool {
        self.repeat_special = false;
        match piece.kind {
            // a backslash at end of input escapes nothing
            Lexeme::Backslash => false,
            Lexeme::Dollar => {
                tok.push('$');
                true
            }
            _ => {
                piece.push_to(tok);
                piece.escaped_char() == Some('$')
            }
        }
    }

    fn scan(&mut self) -> LexResult<Option<Token>> {
        let mut state = State::SkipSpace;
        let mut tok = String::new();
        let mut line = self.line;
        let mut after_dollar = false;

        loop {
            let Some(piece) = self.read()? else {
                return match state {
                    State::SkipSpace if self.depth > 0 => Err(LexError::new(
                        LexErrorKind::UnexpectedEof,
                        "unexpected end of file, expecting \"}\"",
                        self.line,
                    )),
                    State::SkipSpace => Ok(None),
                    State::Quote(_) => Ok(Some(Token::quoted(tok, line))),
                    _ => Ok(Some(Token::new(tok, line))),
                };
            };

            match state {
                State::SkipSpace => {
                    if piece.kind.is_space() || piece.kind == Lexeme::Backslash {
                        continue;
                    }
                    line = piece.line;
                    match piece.kind {
                        Lexeme::Hash => {
                            tok.push('#');
                            state = State::Comment;
                        }
                        Lexeme::DoubleQuote | Lexeme::SingleQuote => {
                            self.repeat_special = false;
                            state = State::Quote(piece.kind);
                        }
                        kind if kind.is_special() => return self.special(piece).map(Some),
                        _ => {
                            state = State::Word;
                            after_dollar = self.push_word(&mut tok, &piece);
                        }
                    }
                }

                State::Word => match piece.kind {
                    Lexeme::Blank | Lexeme::Newline => return Ok(Some(Token::new(tok, line))),
                    Lexeme::OpenBrace if after_dollar => {
                        tok.push('{');
                        self.repeat_special = false;
                        after_dollar = false;
                        state = State::Variable;
                    }
                    kind if kind.is_special() => {
                        self.pending = Some(piece);
                        return Ok(Some(Token::new(tok, line)));
                    }
                    _ => after_dollar = self.push_word(&mut tok, &piece),
                },

                State::Variable => match piece.kind {
                    Lexeme::Blank | Lexeme::Newline => {
                        // only the first blank belongs to the token
                        let mut chars = piece.text.chars();
                        if let Some(c) = chars.next() {
                            tok.push(c);
                        }
                        if chars.next().is_some() {
                            return Ok(Some(Token::new(tok, line)));
                        }
                        state = State::Word;
                    }
                    Lexeme::CloseBrace => {
                        tok.push('}');
                        state = State::Word;
                    }
                    _ => piece.push_to(&mut tok),
                },

                State::Comment => {
                    if piece.ends_line() {
                        return Ok(Some(Token::new(tok, line)));
                    }
                    piece.push_to(&mut tok);
                }

                State::Quote(quote) => {
                    if piece.kind == quote {
                        return Ok(Some(Token::quoted(tok, line)));
                    }
                    let quote_char = if quote == Lexeme::DoubleQuote { '"' } else { '\'' };
                    if piece.escaped_char() == Some(quote_char) {
                        tok.push(quote_char);
                    } else {
                        piece.push_to(&mut tok);
                    }
                }
            }
        }
    }

    fn run_extension(&mut self, extension: Arc<dyn ScannerExtension>, name: &str) -> LexResult<()> {
        tracing::trace!("Extension {} tokenizing {}", extension.info().name, name);
        let tokens = {
            let mut sub = SubScanner { scanner: self };
            extension.tokenize(&mut sub, name)?
        };
        if let Some(last) = tokens.last() {
            self.expect_directive = last.is_terminator();
            self.repeat_special = last.is_terminator();
        }
        self.buffered.extend(tokens);
        Ok(())
    }

    fn next_token(&mut self) -> LexResult<Option<Token>> {
        if let Some((extension, name)) = self.takeover.take() {
            self.run_extension(extension, &name)?;
        }
        if let Some(token) = self.buffered.pop_front() {
            return Ok(Some(token));
        }

        let Some(token) = self.scan()? else {
            return Ok(None);
        };

        if token.is_terminator() {
            self.expect_directive = true;
        } else if !token.is_comment() {
            if self.expect_directive && !token.is_quoted {
                if let Some(extension) = self.extensions.scanner(&token.text) {
                    self.takeover = Some((extension, token.text.clone()));
                }
            }
            self.expect_directive = false;
        }

        Ok(Some(token))
    }
}

impl Iterator for Scanner<'_> {
    type Item = LexResult<Token>;

    /// After the first error every call yields that same error again.
    fn next(&mut self) -> Option<Self::Item> {
        if let Some(err) = &self.failed {
            return Some(Err(err.clone()));
        }
        match self.next_token() {
            Ok(token) => token.map(Ok),
            Err(err) => {
                self.failed = Some(err.clone());
                Some(Err(err))
            }
        }
    }
}

/// Tokenize a whole source into a vector, stopping at the first error
pub fn tokenize(source: &str) -> LexResult<Vec<Token>> {
    Scanner::new(source).collect()
}

// ============================================================
// Extension view
// ============================================================

/// Lexeme-level view of the scanner handed to a [`ScannerExtension`].
///
/// Reads advance the main scanner, so line numbers stay in sync.
pub struct SubScanner<'a, 'src> {
    scanner: &'a mut Scanner<'src>,
}

impl<'src> SubScanner<'_, 'src> {
    /// Next raw lexeme, `None` at end of input
    pub fn next_piece(&mut self) -> LexResult<Option<Piece<'src>>> {
        self.scanner.read()
    }

    /// Next lexeme that is not whitespace
    pub fn next_non_space(&mut self) -> LexResult<Option<Piece<'src>>> {
        while let Some(piece) = self.next_piece()? {
            if !piece.kind.is_space() {
                return Ok(Some(piece));
            }
        }
        Ok(None)
    }

    /// Current line number
    pub fn line(&self) -> usize {
        self.scanner.line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(source: &str) -> Vec<(String, usize)> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| (t.text, t.line))
            .collect()
    }

    fn values(source: &str) -> Vec<String> {
        texts(source).into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn test_simple_block() {
        let tokens = texts("events {\n    worker_connections 1024;\n}\n");
        assert_eq!(
            tokens,
            vec![
                ("events".to_string(), 1),
                ("{".to_string(), 1),
                ("worker_connections".to_string(), 2),
                ("1024".to_string(), 2),
                (";".to_string(), 2),
                ("}".to_string(), 3),
            ]
        );
    }

    #[test]
    fn test_quoted_tokens() {
        let tokens = tokenize(r#"return 200 "foo bar baz";"#).unwrap();
        assert_eq!(tokens[2].text, "foo bar baz");
        assert!(tokens[2].is_quoted);
        assert!(!tokens[3].is_quoted);
    }

    #[test]
    fn test_quote_behavior() {
        let source = "outer-quote \"left\"-quote right-\"quote\" inner\"-\"quote;\n\"\" \"\"left-empty right-empty\"\" inner\"\"empty right-empty-single\";";
        assert_eq!(
            values(source),
            vec![
                "outer-quote",
                "left",
                "-quote",
                "right-\"quote\"",
                "inner\"-\"quote",
                ";",
                "",
                "",
                "left-empty",
                "right-empty\"\"",
                "inner\"\"empty",
                "right-empty-single\"",
                ";",
            ]
        );
    }

    #[test]
    fn test_escaped_quote_in_quotes() {
        let tokens = tokenize(r#"add_header X "a \"b\" \n c";"#).unwrap();
        assert_eq!(tokens[2].text, r#"a "b" \n c"#);

        let tokens = tokenize(r#"return 200 'it\'s';"#).unwrap();
        assert_eq!(tokens[2].text, "it's");
    }

    #[test]
    fn test_escapes_are_literal() {
        assert_eq!(
            values(r"location /\{\;\}\ #\ ab {}"),
            vec!["location", r"/\{\;\}\ #\ ab", "{", "}"]
        );
    }

    #[test]
    fn test_comments() {
        let tokens = texts("listen 80; #listen\n# next line\nhttp {} ## brace\n");
        assert_eq!(tokens[3], ("#listen".to_string(), 1));
        assert_eq!(tokens[4], ("# next line".to_string(), 2));
        assert_eq!(tokens[8], ("## brace".to_string(), 3));
    }

    #[test]
    fn test_hash_inside_word() {
        assert_eq!(values("a#b;"), vec!["a#b", ";"]);
    }

    #[test]
    fn test_variable_expansion() {
        assert_eq!(
            values("try_files /abc/${uri} /abc/${uri}.html =404;"),
            vec!["try_files", "/abc/${uri}", "/abc/${uri}.html", "=404", ";"]
        );
        assert_eq!(values("set $a ${b;c};"), vec!["set", "$a", "${b;c}", ";"]);
        assert_eq!(values(r"set $a a\${b}c;"), vec!["set", "$a", r"a\${b}c", ";"]);
    }

    #[test]
    fn test_multiline_quoted() {
        let tokens = texts("location \"/sta;\n  tus\" {\n}");
        assert_eq!(tokens[1], ("/sta;\n  tus".to_string(), 1));
        assert_eq!(tokens[2], ("{".to_string(), 2));
    }

    #[test]
    fn test_crlf() {
        assert_eq!(
            texts("user nginx;\r\nworker_processes 1;\r\n"),
            vec![
                ("user".to_string(), 1),
                ("nginx".to_string(), 1),
                (";".to_string(), 1),
                ("worker_processes".to_string(), 2),
                ("1".to_string(), 2),
                (";".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_unbalanced_braces() {
        for source in ["http {{}", "http {}}", "http{{server {}}", "http {server {}}}"] {
            let err = tokenize(source).unwrap_err();
            assert_eq!(err.kind, LexErrorKind::UnbalancedBraces, "{}", source);
        }
    }

    #[test]
    fn test_unhappy_inputs() {
        for source in [
            "server { listen 80;; }",
            "server { listen 80; };",
            "server { listen 80; {}",
            "http{}{}",
            "http{",
        ] {
            assert!(tokenize(source).is_err(), "{}", source);
        }
    }

    #[test]
    fn test_missing_final_brace() {
        let err = tokenize("http {\n").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnexpectedEof);
        assert_eq!(err.message, "unexpected end of file, expecting \"}\"");
    }

    #[test]
    fn test_error_is_sticky() {
        let mut scanner = Scanner::new("a;; b;");
        assert!(scanner.next().unwrap().is_ok());
        assert!(scanner.next().unwrap().is_ok());
        let first = scanner.next().unwrap().unwrap_err();
        let second = scanner.next().unwrap().unwrap_err();
        assert_eq!(first, second);
    }

    #[test]
    fn test_closing_braces_may_repeat() {
        assert_eq!(
            values("http { server { } }"),
            vec!["http", "{", "server", "{", "}", "}"]
        );
    }
}
