//! Parse, build and parse again

use indoc::indoc;
use ngxkit_config::{Builder, MemFs, Parser, build, build_files, parse};
use ngxkit_core::config::blocks_eq_ignoring_lines;
use ngxkit_core::{BuildOptions, ParseOptions, Payload, Status};
use std::fs;

const SITE: &str = indoc! {r#"
    user nginx;
    events { # tuned below
        worker_connections 1024; # per worker
    }
    http {
        log_format main '$remote_addr "$request"';
        server {
            listen 80;
            server_name example.com *.例え.jp;
            location / {
                add_header X-Greeting "héllo wörld";
                add_header X-Note "it's \"here\"";
                return 200 "first line
    second line";
            }
            location ~ "\.php$" {
                if ($request_method = POST) {
                    return 405;
                }
            }
        }
    }
"#};

fn with_comments() -> ParseOptions {
    ParseOptions {
        parse_comments: true,
        ..ParseOptions::default()
    }
}

fn parse_text(text: &str, options: ParseOptions) -> Payload {
    Parser::new(options)
        .with_fs(MemFs::new().with_file("nginx.conf", text))
        .parse("nginx.conf")
        .unwrap()
}

#[test]
fn test_round_trip_is_idempotent() {
    let first = parse_text(SITE, with_comments());
    assert_eq!(first.status, Status::Ok, "{:?}", first.errors);

    let options = BuildOptions::default();
    let built = build(&first.config[0].parsed, &options);
    let second = parse_text(&built, with_comments());
    assert_eq!(second.status, Status::Ok, "{:?}", second.errors);
    assert!(blocks_eq_ignoring_lines(
        &first.config[0].parsed,
        &second.config[0].parsed
    ));

    assert_eq!(build(&second.config[0].parsed, &options), built);
}

#[test]
fn test_round_trip_values() {
    let payload = parse_text(SITE, with_comments());
    let built = build(&payload.config[0].parsed, &BuildOptions::default());

    assert!(built.contains("    worker_connections 1024; # per worker\n"));
    assert!(built.contains("events { # tuned below\n"));
    assert!(built.contains("log_format main '$remote_addr \"$request\"';"));
    assert!(built.contains("add_header X-Greeting \"héllo wörld\";"));
    assert!(built.contains("add_header X-Note 'it\\'s \"here\"';"));
    assert!(built.contains("return 200 \"first line\nsecond line\";"));
    assert!(built.contains("location ~ \"\\.php$\" {"));
    assert!(built.contains("if ($request_method = POST) {"));
}

#[test]
fn test_round_trip_with_tabs() {
    let payload = parse_text(SITE, ParseOptions::default());
    let options = BuildOptions {
        tabs: true,
        ..BuildOptions::default()
    };
    let built = build(&payload.config[0].parsed, &options);
    assert!(built.contains("\n\t\tlisten 80;\n"));

    let again = parse_text(&built, ParseOptions::default());
    assert!(blocks_eq_ignoring_lines(
        &payload.config[0].parsed,
        &again.config[0].parsed
    ));
}

#[test]
fn test_lua_round_trip() {
    let source = indoc! {r#"
        http {
            server {
                location /hello {
                    set_by_lua_block $greeting { return "hi" }
                    content_by_lua_block {
                        -- a } in a comment
                        local t = { n = 1 }
                        ngx.say("}", t.n)
                    }
                }
            }
        }
    "#};
    let first = parse_text(source, ParseOptions::default());
    assert!(first.is_ok(), "{:?}", first.errors);

    let built = Builder::default().build(&first.config[0].parsed);
    assert!(built.contains("set_by_lua_block $greeting { return \"hi\" }"));

    let second = parse_text(&built, ParseOptions::default());
    assert!(second.is_ok(), "{:?}", second.errors);
    assert!(blocks_eq_ignoring_lines(
        &first.config[0].parsed,
        &second.config[0].parsed
    ));
    assert_eq!(Builder::default().build(&second.config[0].parsed), built);
}

#[test]
fn test_build_files_round_trip() {
    let src = tempfile::tempdir().unwrap();
    fs::create_dir_all(src.path().join("conf.d")).unwrap();
    fs::write(
        src.path().join("nginx.conf"),
        "events {}\nhttp {\n    include conf.d/*.conf;\n}\n",
    )
    .unwrap();
    fs::write(
        src.path().join("conf.d/site.conf"),
        "server {\n    listen 8080;\n    root /srv/www;\n}\n",
    )
    .unwrap();

    let payload = parse(src.path().join("nginx.conf"), &ParseOptions::default()).unwrap();
    assert_eq!(payload.config.len(), 2);

    // write the tree back in place and read it again
    build_files(&payload, src.path(), &BuildOptions::default()).unwrap();
    let text = fs::read_to_string(src.path().join("conf.d/site.conf")).unwrap();
    assert_eq!(text, "server {\n    listen 8080;\n    root /srv/www;\n}\n");

    let again = parse(src.path().join("nginx.conf"), &ParseOptions::default()).unwrap();
    assert_eq!(again.config.len(), 2);
    for (a, b) in payload.config.iter().zip(&again.config) {
        assert_eq!(a.file, b.file);
        assert!(blocks_eq_ignoring_lines(&a.parsed, &b.parsed));
    }
}

#[test]
fn test_comments_between_arguments_round_trip() {
    let source = "http {\n    server_tokens # a\n    # b\n    # c\n    off;\n}\n";
    let first = parse_text(source, with_comments());
    let http = first.config[0].parsed[0].block.as_ref().unwrap();
    assert_eq!(http.len(), 4);

    let built = build(&first.config[0].parsed, &BuildOptions::default());
    assert_eq!(built, "http {\n    server_tokens off; # a\n    # b\n    # c\n}");

    let second = parse_text(&built, with_comments());
    assert!(blocks_eq_ignoring_lines(
        &first.config[0].parsed,
        &second.config[0].parsed
    ));
    assert_eq!(build(&second.config[0].parsed, &BuildOptions::default()), built);
}
