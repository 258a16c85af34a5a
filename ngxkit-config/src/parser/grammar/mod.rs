//! Directive grammar tables
//!
//! Each directive maps to one or more bit masks. A mask combines the
//! contexts the directive may appear in with the argument shapes it
//! accepts, using the same bit layout as nginx's `ngx_command_t.type`.

mod app_protect;
mod lua;
mod nginx;
mod njs;

use ngxkit_core::DirectiveSource;
use std::collections::HashMap;
use std::sync::LazyLock;

pub type Mask = u64;

// Argument counts
pub const CONF_NOARGS: Mask = 0x0000_0001;
pub const CONF_TAKE1: Mask = 0x0000_0002;
pub const CONF_TAKE2: Mask = 0x0000_0004;
pub const CONF_TAKE3: Mask = 0x0000_0008;
pub const CONF_TAKE4: Mask = 0x0000_0010;
pub const CONF_TAKE5: Mask = 0x0000_0020;
pub const CONF_TAKE6: Mask = 0x0000_0040;
pub const CONF_TAKE7: Mask = 0x0000_0080;

// Shapes
pub const CONF_BLOCK: Mask = 0x0000_0100;
pub const CONF_FLAG: Mask = 0x0000_0200;
pub const CONF_ANY: Mask = 0x0000_0400;
pub const CONF_1MORE: Mask = 0x0000_0800;
pub const CONF_2MORE: Mask = 0x0000_1000;

pub const CONF_TAKE12: Mask = CONF_TAKE1 | CONF_TAKE2;
pub const CONF_TAKE13: Mask = CONF_TAKE1 | CONF_TAKE3;
pub const CONF_TAKE23: Mask = CONF_TAKE2 | CONF_TAKE3;
pub const CONF_TAKE123: Mask = CONF_TAKE12 | CONF_TAKE3;
pub const CONF_TAKE1234: Mask = CONF_TAKE123 | CONF_TAKE4;

// Contexts
pub const DIRECT_CONF: Mask = 0x0001_0000;
pub const MAIN_CONF: Mask = 0x0004_0000;
pub const EVENT_CONF: Mask = 0x0008_0000;
pub const MAIL_MAIN_CONF: Mask = 0x0010_0000;
pub const MAIL_SRV_CONF: Mask = 0x0020_0000;
pub const STREAM_MAIN_CONF: Mask = 0x0040_0000;
pub const STREAM_SRV_CONF: Mask = 0x0080_0000;
pub const STREAM_UPS_CONF: Mask = 0x0100_0000;
pub const HTTP_MAIN_CONF: Mask = 0x0200_0000;
pub const HTTP_SRV_CONF: Mask = 0x0400_0000;
pub const HTTP_LOC_CONF: Mask = 0x0800_0000;
pub const HTTP_UPS_CONF: Mask = 0x1000_0000;
pub const HTTP_SIF_CONF: Mask = 0x2000_0000;
pub const HTTP_LIF_CONF: Mask = 0x4000_0000;
pub const HTTP_LMT_CONF: Mask = 0x8000_0000;
pub const MGMT_MAIN_CONF: Mask = 0x1_0000_0000;

pub const ANY_CONF: Mask = MAIN_CONF
    | EVENT_CONF
    | MAIL_MAIN_CONF
    | MAIL_SRV_CONF
    | STREAM_MAIN_CONF
    | STREAM_SRV_CONF
    | STREAM_UPS_CONF
    | HTTP_MAIN_CONF
    | HTTP_SRV_CONF
    | HTTP_LOC_CONF
    | HTTP_UPS_CONF
    | HTTP_SIF_CONF
    | HTTP_LIF_CONF
    | HTTP_LMT_CONF
    | MGMT_MAIN_CONF;

/// Every bit that names a context
pub const CONTEXT_BITS: Mask = ANY_CONF | DIRECT_CONF;

/// Context masks keyed by the block path leading to them
const CONTEXTS: &[(&[&str], Mask)] = &[
    (&[], MAIN_CONF),
    (&["events"], EVENT_CONF),
    (&["mail"], MAIL_MAIN_CONF),
    (&["mail", "server"], MAIL_SRV_CONF),
    (&["stream"], STREAM_MAIN_CONF),
    (&["stream", "server"], STREAM_SRV_CONF),
    (&["stream", "upstream"], STREAM_UPS_CONF),
    (&["http"], HTTP_MAIN_CONF),
    (&["http", "server"], HTTP_SRV_CONF),
    (&["http", "location"], HTTP_LOC_CONF),
    (&["http", "upstream"], HTTP_UPS_CONF),
    (&["http", "server", "if"], HTTP_SIF_CONF),
    (&["http", "location", "if"], HTTP_LIF_CONF),
    (&["http", "location", "limit_except"], HTTP_LMT_CONF),
    (&["mgmt"], MGMT_MAIN_CONF),
];

/// Mask of a block context, `None` for paths nginx has no context for
pub fn context_mask<S: AsRef<str>>(ctx: &[S]) -> Option<Mask> {
    CONTEXTS
        .iter()
        .find(|(path, _)| {
            path.len() == ctx.len() && path.iter().zip(ctx).all(|(a, b)| *a == b.as_ref())
        })
        .map(|&(_, mask)| mask)
}

type Table = HashMap<&'static str, &'static [Mask]>;

fn index(entries: &'static [(&'static str, &'static [Mask])]) -> Table {
    entries.iter().copied().collect()
}

static NGINX_TABLE: LazyLock<Table> = LazyLock::new(|| index(nginx::NGINX));
static LUA_TABLE: LazyLock<Table> = LazyLock::new(|| index(lua::LUA));
static NJS_TABLE: LazyLock<Table> = LazyLock::new(|| index(njs::NJS));
static APP_PROTECT_TABLE: LazyLock<Table> =
    LazyLock::new(|| index(app_protect::APP_PROTECT_WAF_V4));

fn table(source: DirectiveSource) -> &'static Table {
    match source {
        DirectiveSource::Nginx => &NGINX_TABLE,
        DirectiveSource::Lua => &LUA_TABLE,
        DirectiveSource::Njs => &NJS_TABLE,
        DirectiveSource::AppProtectWafV4 => &APP_PROTECT_TABLE,
    }
}

/// Collect the masks of `name` across `sources`, in source order.
///
/// Returns `None` when no source knows the directive.
pub fn lookup(name: &str, sources: &[DirectiveSource]) -> Option<Vec<Mask>> {
    let mut found: Option<Vec<Mask>> = None;
    for &source in sources {
        if let Some(masks) = table(source).get(name) {
            found.get_or_insert_with(Vec::new).extend_from_slice(masks);
        }
    }
    found
}

/// Number of directives a source defines
pub fn len(source: DirectiveSource) -> usize {
    table(source).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &[DirectiveSource] = &[
        DirectiveSource::Nginx,
        DirectiveSource::Lua,
        DirectiveSource::Njs,
        DirectiveSource::AppProtectWafV4,
    ];

    #[test]
    fn test_context_mask() {
        let empty: [&str; 0] = [];
        assert_eq!(context_mask(&empty), Some(MAIN_CONF));
        assert_eq!(context_mask(&["http", "location", "if"]), Some(HTTP_LIF_CONF));
        assert_eq!(context_mask(&["stream", "upstream"]), Some(STREAM_UPS_CONF));
        assert_eq!(context_mask(&["http", "location", "location"]), None);
        assert_eq!(context_mask(&["server"]), None);
    }

    #[test]
    fn test_lookup_concatenates_sources() {
        assert!(lookup("proxy_pass", &[DirectiveSource::Nginx]).is_some());
        assert!(lookup("proxy_pass", &[DirectiveSource::Lua]).is_none());
        assert!(lookup("js_import", &[DirectiveSource::Nginx]).is_none());
        assert!(lookup("js_import", ALL).is_some());
        assert!(lookup("app_protect_enable", &[DirectiveSource::AppProtectWafV4]).is_some());
        assert!(lookup("no_such_directive", ALL).is_none());
    }

    #[test]
    fn test_tables_are_well_formed() {
        for &source in ALL {
            assert!(len(source) > 0);
            for (name, masks) in table(source).iter() {
                assert!(!masks.is_empty(), "{name} has no masks");
                for mask in masks.iter() {
                    assert_ne!(mask & CONTEXT_BITS, 0, "{name} has no context");
                    assert_ne!(mask & !CONTEXT_BITS, 0, "{name} has no argument shape");
                }
            }
        }
    }

    #[test]
    fn test_include_allowed_everywhere() {
        let masks = lookup("include", ALL).unwrap();
        assert_eq!(masks, vec![ANY_CONF | CONF_TAKE1]);
    }
}
