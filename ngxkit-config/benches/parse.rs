use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ngxkit_config::{MemFs, Parser, build, tokenize};
use ngxkit_core::{BuildOptions, ParseOptions};

fn site(servers: usize) -> String {
    let mut out = String::from("events {\n    worker_connections 1024;\n}\nhttp {\n");
    for i in 0..servers {
        out.push_str(&format!(
            "    server {{\n        listen {};\n        server_name site{}.example.com;\n        \
             location / {{\n            root /srv/site{};\n            add_header X-Site \"site {}\";\n        }}\n        \
             location ~ \\.php$ {{\n            if ($request_method = POST) {{\n                return 405;\n            }}\n        }}\n    }}\n",
            8000 + i,
            i,
            i,
            i
        ));
    }
    out.push_str("}\n");
    out
}

fn bench_parse(c: &mut Criterion) {
    let source = site(200);
    let parser = Parser::new(ParseOptions::default())
        .with_fs(MemFs::new().with_file("nginx.conf", source.clone()));

    c.bench_function("tokenize", |b| {
        b.iter(|| tokenize(black_box(&source)).map(|tokens| tokens.len()))
    });

    c.bench_function("parse", |b| {
        b.iter(|| parser.parse(black_box("nginx.conf")))
    });

    let payload = parser.parse("nginx.conf").unwrap();
    let options = BuildOptions::default();
    c.bench_function("build", |b| {
        b.iter(|| build(black_box(&payload.config[0].parsed), &options))
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
