//! Bodies of map-like blocks
//!
//! Inside `map`, `geo`, `types` and friends each line is a parameter entry
//! (`key value;`) rather than a directive, so the grammar tables do not
//! apply. Every block kind has a default argument shape plus a few special
//! parameter names with their own shape.

use crate::parser::grammar::{CONF_1MORE, CONF_NOARGS, CONF_TAKE1, CONF_TAKE12, CONF_TAKE2, Mask};
use thiserror::Error;

/// Why a map-body entry was rejected
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MapBodyError {
    #[error("unexpected \"{token}\"")]
    UnexpectedTerminator { token: String, block: String },

    #[error("invalid number of parameters")]
    InvalidParameters { block: String },
}

impl MapBodyError {
    /// Name of the map-like block the entry sits in
    pub fn block(&self) -> &str {
        match self {
            Self::UnexpectedTerminator { block, .. } | Self::InvalidParameters { block } => block,
        }
    }
}

struct MapGrammar {
    name: &'static str,
    default: Mask,
    special: &'static [(&'static str, Mask)],
}

const MAP_BLOCKS: &[MapGrammar] = &[
    MapGrammar {
        name: "map",
        default: CONF_TAKE1,
        special: &[
            ("default", CONF_TAKE1),
            ("hostnames", CONF_NOARGS),
            ("include", CONF_TAKE1),
            ("volatile", CONF_NOARGS),
        ],
    },
    MapGrammar {
        name: "geo",
        default: CONF_TAKE1,
        special: &[
            ("ranges", CONF_NOARGS),
            ("delete", CONF_TAKE1),
            ("default", CONF_TAKE1),
            ("include", CONF_TAKE1),
            ("proxy", CONF_TAKE1),
            ("proxy_recursive", CONF_NOARGS),
        ],
    },
    MapGrammar {
        name: "types",
        default: CONF_1MORE,
        special: &[],
    },
    MapGrammar {
        name: "split_clients",
        default: CONF_TAKE1,
        special: &[],
    },
    MapGrammar {
        name: "geoip2",
        default: CONF_1MORE,
        special: &[("auto_reload", CONF_TAKE1)],
    },
    MapGrammar {
        name: "otel_exporter",
        default: CONF_TAKE1,
        special: &[("endpoint", CONF_TAKE12), ("header", CONF_TAKE2)],
    },
];

fn grammar(block: &str) -> Option<&'static MapGrammar> {
    MAP_BLOCKS.iter().find(|g| g.name == block)
}

/// Whether the children of `block` are map parameters
pub fn is_map_block(block: &str) -> bool {
    grammar(block).is_some()
}

/// Check one parameter entry of map-like block `block`.
///
/// Blocks without a map grammar accept anything.
pub fn check_parameter(
    block: &str,
    name: &str,
    args: &[String],
    term: &str,
) -> Result<(), MapBodyError> {
    let Some(grammar) = grammar(block) else {
        return Ok(());
    };

    if term != ";" {
        return Err(MapBodyError::UnexpectedTerminator {
            token: term.to_string(),
            block: block.to_string(),
        });
    }

    let mask = grammar
        .special
        .iter()
        .find(|(special, _)| *special == name)
        .map_or(grammar.default, |&(_, mask)| mask);

    let n = args.len();
    let counted = n <= 7 && (mask >> n) & 1 != 0;
    let one_more = mask & CONF_1MORE != 0 && n >= 1;
    if counted || one_more {
        Ok(())
    } else {
        Err(MapBodyError::InvalidParameters {
            block: block.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(block: &str, name: &str, args: &[&str], term: &str) -> Result<(), MapBodyError> {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        check_parameter(block, name, &args, term)
    }

    fn invalid(block: &str) -> Result<(), MapBodyError> {
        Err(MapBodyError::InvalidParameters {
            block: block.to_string(),
        })
    }

    #[test]
    fn test_map() {
        assert!(check("map", "default", &["0"], ";").is_ok());
        assert_eq!(check("map", "default", &["0", "0"], ";"), invalid("map"));
        assert!(check("map", "volatile", &[], ";").is_ok());
        assert_eq!(check("map", "volatile", &["1"], ";"), invalid("map"));
        assert!(check("map", "hostnames", &[], ";").is_ok());
        assert_eq!(check("map", "hostnames", &["foo"], ";"), invalid("map"));
        assert!(check("map", "~^/api", &["backend"], ";").is_ok());
    }

    #[test]
    fn test_geo() {
        assert!(check("geo", "ranges", &[], ";").is_ok());
        assert_eq!(check("geo", "ranges", &["0", "0", "0"], ";"), invalid("geo"));
        assert!(check("geo", "proxy_recursive", &[], ";").is_ok());
        assert_eq!(check("geo", "proxy_recursive", &["1"], ";"), invalid("geo"));
        assert!(check("geo", "127.0.0.0/8", &["local"], ";").is_ok());
    }

    #[test]
    fn test_types_and_split_clients() {
        assert!(check("types", "text/html", &["html htm shtml"], ";").is_ok());
        assert!(check("types", "image/jpeg", &["jpeg", "jpg"], ";").is_ok());
        assert_eq!(check("types", "hostnames", &[], ";"), invalid("types"));

        assert!(check("split_clients", "0.5%", &["google.com"], ";").is_ok());
        assert_eq!(
            check("split_clients", "0.5%", &["google.com", "testme"], ";"),
            invalid("split_clients")
        );
    }

    #[test]
    fn test_geoip2_and_otel() {
        assert!(check("geoip2", "auto_reload", &["5m"], ";").is_ok());
        assert!(check("geoip2", "$geoip2_country", &["country", "names", "en"], ";").is_ok());
        assert_eq!(check("geoip2", "auto_reload", &[], ";"), invalid("geoip2"));

        assert!(check("otel_exporter", "endpoint", &["localhost:4317"], ";").is_ok());
        assert!(check("otel_exporter", "endpoint", &["localhost:4317", "insecure"], ";").is_ok());
        assert!(check("otel_exporter", "header", &["X-Api-Key", "abc"], ";").is_ok());
        assert_eq!(check("otel_exporter", "header", &["X-Api-Key"], ";"), invalid("otel_exporter"));
    }

    #[test]
    fn test_unexpected_terminator() {
        let err = check("map", "default", &["0"], "}").unwrap_err();
        assert_eq!(err.to_string(), "unexpected \"}\"");
        assert_eq!(err.block(), "map");

        // the terminator wins over a bad count
        let err = check("map", "default", &["0", "0"], "{").unwrap_err();
        assert_eq!(err.to_string(), "unexpected \"{\"");
    }

    #[test]
    fn test_plain_blocks_pass() {
        assert!(!is_map_block("server"));
        assert!(check("server", "listen", &[], "{").is_ok());
    }
}
