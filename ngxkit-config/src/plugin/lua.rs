//! Lua block support (lua-nginx-module)
//!
//! `*_by_lua_block` directives carry raw Lua source between braces. The
//! scanner extension returns that source as one quoted token followed by a
//! synthetic `;`, and the builder extension puts the braces back.

use crate::parser::lexer::{LexError, LexErrorKind, LexResult, Lexeme, SubScanner, Token};
use crate::plugin::traits::{BuilderExtension, Extension, ExtensionInfo, ScannerExtension};
use ngxkit_core::Directive;

const SET_BY_LUA_BLOCK: &str = "set_by_lua_block";

const DIRECTIVES: &[&str] = &[
    "init_by_lua_block",
    "init_worker_by_lua_block",
    "exit_worker_by_lua_block",
    "set_by_lua_block",
    "content_by_lua_block",
    "server_rewrite_by_lua_block",
    "rewrite_by_lua_block",
    "access_by_lua_block",
    "header_filter_by_lua_block",
    "body_filter_by_lua_block",
    "log_by_lua_block",
    "balancer_by_lua_block",
    "ssl_client_hello_by_lua_block",
    "ssl_certificate_by_lua_block",
    "ssl_session_fetch_by_lua_block",
    "ssl_session_store_by_lua_block",
];

/// Lua block extension
#[derive(Debug, Clone, Copy, Default)]
pub struct Lua;

impl Extension for Lua {
    fn info(&self) -> ExtensionInfo {
        ExtensionInfo {
            name: "lua",
            description: "Raw Lua bodies of lua-nginx-module block directives",
        }
    }

    fn directives(&self) -> &[&'static str] {
        DIRECTIVES
    }
}

impl ScannerExtension for Lua {
    fn tokenize(&self, scanner: &mut SubScanner<'_, '_>, directive: &str) -> LexResult<Vec<Token>> {
        let mut tokens = Vec::new();
        let mut opened = false;

        // set_by_lua_block $var { ... }
        if directive == SET_BY_LUA_BLOCK {
            let Some(first) = scanner.next_non_space()? else {
                return Ok(tokens);
            };
            let mut arg = String::new();
            let mut next = Some(first);
            while let Some(piece) = next {
                if piece.kind.is_space() {
                    break;
                }
                if piece.kind == Lexeme::OpenBrace {
                    opened = true;
                    break;
                }
                piece.push_to(&mut arg);
                next = scanner.next_piece()?;
            }
            tokens.push(Token::new(arg, first.line));
        }

        if !opened {
            match scanner.next_non_space()? {
                Some(piece) if piece.kind == Lexeme::OpenBrace => {}
                Some(piece) => {
                    return Err(LexError::new(
                        LexErrorKind::Extension,
                        "expected \"{\" to start lua block",
                        piece.line,
                    ));
                }
                None => {
                    return Err(LexError::new(
                        LexErrorKind::UnexpectedEof,
                        "unexpected end of file, expecting \"{\"",
                        scanner.line(),
                    ));
                }
            }
        }

        let line = scanner.line();
        let mut body = String::new();
        let mut depth = 1usize;
        let mut quote: Option<Lexeme> = None;
        let mut in_comment = false;

        loop {
            let Some(piece) = scanner.next_piece()? else {
                return Err(LexError::new(
                    LexErrorKind::UnexpectedEof,
                    "unexpected end of file, expecting \"}\"",
                    scanner.line(),
                ));
            };

            if in_comment {
                in_comment = piece.kind != Lexeme::Newline;
                piece.push_to(&mut body);
                continue;
            }

            match (piece.kind, quote) {
                (kind, None) if kind.is_quote() => quote = Some(kind),
                (kind, Some(open)) if kind == open => quote = None,
                (Lexeme::OpenBrace, None) => depth += 1,
                (Lexeme::CloseBrace, None) => {
                    depth -= 1;
                    if depth == 0 {
                        tokens.push(Token::quoted(body, line));
                        tokens.push(Token::new(";", scanner.line()));
                        return Ok(tokens);
                    }
                }
                // `--` starts a Lua line comment
                (Lexeme::Text, None) if piece.text.contains("--") => in_comment = true,
                _ => {}
            }
            piece.push_to(&mut body);
        }
    }
}

impl BuilderExtension for Lua {
    fn render(&self, stmt: &Directive) -> Option<String> {
        match (stmt.name.as_str(), stmt.args.as_slice()) {
            (SET_BY_LUA_BLOCK, [var, body]) => {
                Some(format!("{} {} {{{}}}", stmt.name, var, body))
            }
            (SET_BY_LUA_BLOCK, _) => None,
            (_, [body]) => Some(format!("{} {{{}}}", stmt.name, body)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::Scanner;
    use crate::plugin::ExtensionRegistry;

    fn lex(source: &str) -> LexResult<Vec<Token>> {
        Scanner::new(source)
            .with_extensions(&ExtensionRegistry::builtin())
            .collect()
    }

    #[test]
    fn test_content_block() {
        let source = "location / {\n    content_by_lua_block {\n        ngx.say('Hello, world!')\n    }\n    return 200;\n}\n";
        let tokens = lex(source).unwrap();
        let values: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(
            values,
            vec![
                "location",
                "/",
                "{",
                "content_by_lua_block",
                "\n        ngx.say('Hello, world!')\n    ",
                ";",
                "return",
                "200",
                ";",
                "}",
            ]
        );
        assert!(tokens[4].is_quoted);
        // line numbers keep counting through the lua body
        assert_eq!(tokens[6].line, 5);
    }

    #[test]
    fn test_braces_in_strings_and_comments() {
        let source = "content_by_lua_block { local s = \"}\" -- closing } here\n local t = { 1 } }";
        let tokens = lex(source).unwrap();
        assert_eq!(
            tokens[1].text,
            " local s = \"}\" -- closing } here\n local t = { 1 } "
        );
        assert_eq!(tokens[2].text, ";");
    }

    #[test]
    fn test_set_by_lua_block() {
        let tokens = lex("set_by_lua_block $res { return 32 + math.cos(32) }").unwrap();
        let values: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(
            values,
            vec!["set_by_lua_block", "$res", " return 32 + math.cos(32) ", ";"]
        );
    }

    #[test]
    fn test_name_in_argument_position() {
        let tokens = lex("server_name content_by_lua_block;").unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].text, "content_by_lua_block");
    }

    #[test]
    fn test_missing_open_brace() {
        let err = lex("content_by_lua_block return;").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::Extension);
        assert_eq!(err.message, "expected \"{\" to start lua block");
    }

    #[test]
    fn test_semicolon_after_block() {
        let err = lex("content_by_lua_block { ngx.exit(200) } ;").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnexpectedToken);
        assert_eq!(err.message, "unexpected \";\"");

        let tokens = lex("location / { content_by_lua_block { ngx.exit(200) } }").unwrap();
        assert_eq!(tokens.last().unwrap().text, "}");
    }

    #[test]
    fn test_render() {
        let stmt = Directive::new("content_by_lua_block", 1).with_args([" ngx.exit(200) "]);
        assert_eq!(
            Lua.render(&stmt).unwrap(),
            "content_by_lua_block { ngx.exit(200) }"
        );

        let stmt = Directive::new("set_by_lua_block", 1).with_args(["$res", " return 1 "]);
        assert_eq!(Lua.render(&stmt).unwrap(), "set_by_lua_block $res { return 1 }");

        let stmt = Directive::new("set_by_lua_block", 1).with_args(["$res"]);
        assert!(Lua.render(&stmt).is_none());
    }
}
