//! Include resolution against the real file system

use indoc::indoc;
use ngxkit_config::{Parser, parse};
use ngxkit_core::{ErrorKind, ParseOptions, Status};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging() {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn tree(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, contents) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }
    dir
}

fn file(dir: &TempDir, name: &str) -> String {
    dir.path().join(name).to_string_lossy().into_owned()
}

const MAIN: &str = indoc! {"
    events {}
    http {
        include conf.d/server.conf;
    }
"};

const SERVER: &str = indoc! {"
    server {
        listen 127.0.0.1:8080;
        include bar.conf;
        location / {
            return 200 \"ok\";
        }
    }
"};

#[test]
fn test_missing_nested_include() {
    init_logging();
    let dir = tree(&[("nginx.conf", MAIN), ("conf.d/server.conf", SERVER)]);
    let payload = parse(dir.path().join("nginx.conf"), &ParseOptions::default()).unwrap();

    assert_eq!(payload.status, Status::Failed);
    assert_eq!(payload.config.len(), 2);

    let main = &payload.config[0];
    assert_eq!(main.file, file(&dir, "nginx.conf"));
    assert_eq!(main.status, Status::Ok);
    let http = main.parsed[1].block.as_ref().unwrap();
    assert_eq!(http[0].name, "include");
    assert_eq!(http[0].includes, Some(vec![1]));

    let server = &payload.config[1];
    assert_eq!(server.file, file(&dir, "conf.d/server.conf"));
    assert_eq!(server.status, Status::Failed);
    assert_eq!(server.errors.len(), 1);
    assert_eq!(server.errors[0].line, Some(3));
    assert!(server.errors[0].error.what.contains("bar.conf"));

    // the rest of the file is still parsed
    let body = server.parsed[0].block.as_ref().unwrap();
    let names: Vec<&str> = body.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["listen", "include", "location"]);
    assert!(body[1].includes.is_none());

    assert_eq!(payload.errors.len(), 1);
    assert_eq!(payload.errors[0].file, server.file);
}

#[test]
fn test_missing_include_stops_the_parse() {
    let dir = tree(&[("nginx.conf", MAIN), ("conf.d/server.conf", SERVER)]);
    let options = ParseOptions {
        stop_parsing_on_error: true,
        ..ParseOptions::default()
    };
    let err = parse(dir.path().join("nginx.conf"), &options).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Include);
    assert_eq!(err.line, Some(3));
}

#[test]
fn test_glob_includes_are_sorted_and_shared() {
    init_logging();
    let dir = tree(&[
        ("nginx.conf", "http {\n    include sites/*.conf;\n    include sites/b.conf;\n}\n"),
        ("sites/b.conf", "server { listen 81; }\n"),
        ("sites/a.conf", "server { listen 80; }\n"),
        ("sites/readme.txt", "not a config"),
    ]);
    let payload = parse(dir.path().join("nginx.conf"), &ParseOptions::default()).unwrap();
    assert!(payload.is_ok(), "{:?}", payload.errors);

    let files: Vec<&str> = payload.config.iter().map(|c| c.file.as_str()).collect();
    assert_eq!(
        files,
        vec![
            file(&dir, "nginx.conf"),
            file(&dir, "sites/a.conf"),
            file(&dir, "sites/b.conf"),
        ]
    );

    let http = payload.config[0].parsed[0].block.as_ref().unwrap();
    assert_eq!(http[0].includes, Some(vec![1, 2]));
    assert_eq!(http[1].includes, Some(vec![2]));
}

#[test]
fn test_empty_glob_is_not_an_error() {
    let dir = tree(&[("nginx.conf", "http {\n    include nothing/*.conf;\n}\n")]);
    let payload = parse(dir.path().join("nginx.conf"), &ParseOptions::default()).unwrap();
    assert!(payload.is_ok());
    assert_eq!(payload.config.len(), 1);
    let http = payload.config[0].parsed[0].block.as_ref().unwrap();
    assert!(http[0].includes.is_none());
}

#[test]
fn test_absolute_include() {
    let shared = tree(&[("mime.types", "types {\n    text/html html htm;\n}\n")]);
    let main = format!(
        "http {{\n    include {};\n}}\n",
        shared.path().join("mime.types").display()
    );
    let dir = tree(&[("nginx.conf", &main)]);

    let payload = parse(dir.path().join("nginx.conf"), &ParseOptions::default()).unwrap();
    assert!(payload.is_ok(), "{:?}", payload.errors);
    assert_eq!(payload.config[1].file, file(&shared, "mime.types"));

    let types = &payload.config[1].parsed[0];
    let entry = &types.block.as_ref().unwrap()[0];
    assert_eq!(entry.name, "text/html");
    assert_eq!(entry.args, vec!["html", "htm"]);
    assert!(entry.is_map_block_parameter);
}

#[test]
fn test_include_cycle() {
    let dir = tree(&[
        ("nginx.conf", "http {\n    include a.conf;\n}\n"),
        ("a.conf", "include b.conf;\n"),
        ("b.conf", "include a.conf;\n"),
    ]);
    let options = ParseOptions {
        skip_directive_context_check: true,
        ..ParseOptions::default()
    };
    let err = parse(dir.path().join("nginx.conf"), &options).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Cycle);
    assert!(err.what.starts_with("include cycle detected: "));
    assert!(err.what.contains("a.conf"));
    assert!(err.what.contains("b.conf"));
}

#[test]
fn test_self_include_is_a_cycle() {
    let dir = tree(&[("nginx.conf", "include nginx.conf;\n")]);
    let err = parse(dir.path().join("nginx.conf"), &ParseOptions::default()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Cycle);
}

#[test]
fn test_single_file_skips_includes() {
    let dir = tree(&[("nginx.conf", MAIN)]);
    let options = ParseOptions {
        single_file: true,
        ..ParseOptions::default()
    };
    let payload = parse(dir.path().join("nginx.conf"), &options).unwrap();
    assert!(payload.is_ok());
    assert_eq!(payload.config.len(), 1);
}

#[test]
fn test_combine_configs() {
    let dir = tree(&[("nginx.conf", MAIN), ("conf.d/server.conf", SERVER)]);
    let options = ParseOptions {
        combine_configs: true,
        ..ParseOptions::default()
    };
    let payload = Parser::new(options)
        .parse(dir.path().join("nginx.conf"))
        .unwrap();

    assert_eq!(payload.status, Status::Failed);
    assert_eq!(payload.config.len(), 1);

    let combined = &payload.config[0];
    assert_eq!(combined.file, file(&dir, "nginx.conf"));
    assert_eq!(combined.status, Status::Failed);
    assert_eq!(combined.errors.len(), 1);

    let http = combined.parsed[1].block.as_ref().unwrap();
    assert_eq!(http.len(), 1);
    assert_eq!(http[0].name, "server");
    assert_eq!(http[0].file, Some(file(&dir, "conf.d/server.conf")));
    assert_eq!(combined.parsed[0].file, Some(file(&dir, "nginx.conf")));
}

#[test]
fn test_payload_json() {
    let dir = tree(&[("nginx.conf", MAIN), ("conf.d/server.conf", SERVER)]);
    let payload = parse(dir.path().join("nginx.conf"), &ParseOptions::default()).unwrap();

    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["status"], "failed");
    assert_eq!(json["config"][0]["status"], "ok");
    assert_eq!(json["config"][0]["parsed"][1]["directive"], "http");
    assert_eq!(json["config"][0]["parsed"][1]["block"][0]["includes"][0], 1);
    assert_eq!(json["config"][1]["errors"][0]["line"], 3);
    assert_eq!(json["config"][1]["errors"][0]["error"]["kind"], "include");

    // optional fields stay out of the document
    let events = &json["config"][0]["parsed"][0];
    assert!(events.get("includes").is_none());
    assert!(events.get("comment").is_none());
    assert!(events.get("is_map_block_parameter").is_none());

    let back: ngxkit_core::Payload = serde_json::from_value(json).unwrap();
    assert_eq!(back, payload);
}

#[test]
fn test_missing_entry_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nginx.conf");
    let err = parse(&path, &ParseOptions::default()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Io);
    assert_eq!(err.file.as_deref().map(Path::new), Some(path.as_path()));
}

#[test]
fn test_non_utf8_bytes_are_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nginx.conf");
    fs::write(&path, b"# caf\xe9\nevents {}\nhttp {\n    charset_map koi8-r utf-8 {\n        C0 D18E;\n    }\n}\n").unwrap();

    let payload = parse(&path, &ParseOptions::default()).unwrap();
    assert!(payload.is_ok(), "{:?}", payload.errors);
    let names: Vec<&str> = payload.config[0].parsed.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["events", "http"]);

    let options = ParseOptions {
        parse_comments: true,
        ..ParseOptions::default()
    };
    let payload = parse(&path, &options).unwrap();
    assert_eq!(payload.config[0].parsed[0].comment.as_deref(), Some(" caf\u{fffd}"));
}
