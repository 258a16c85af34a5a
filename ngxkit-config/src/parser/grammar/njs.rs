//! njs scripting module directives

use super::*;

pub(super) static NJS: &[(&str, &[Mask])] = &[
    ("js_access", &[STREAM_MAIN_CONF | STREAM_SRV_CONF | CONF_TAKE1]),
    ("js_body_filter", &[HTTP_LOC_CONF | HTTP_LIF_CONF | HTTP_LMT_CONF | CONF_TAKE12]),
    ("js_content", &[HTTP_LOC_CONF | HTTP_LIF_CONF | HTTP_LMT_CONF | CONF_TAKE1]),
    (
        "js_engine",
        &[
            STREAM_MAIN_CONF
                | STREAM_SRV_CONF
                | HTTP_MAIN_CONF
                | HTTP_SRV_CONF
                | HTTP_LOC_CONF
                | CONF_TAKE1,
        ],
    ),
    (
        "js_fetch_buffer_size",
        &[
            STREAM_MAIN_CONF
                | STREAM_SRV_CONF
                | HTTP_MAIN_CONF
                | HTTP_SRV_CONF
                | HTTP_LOC_CONF
                | CONF_TAKE1,
        ],
    ),
    (
        "js_fetch_ciphers",
        &[
            STREAM_MAIN_CONF
                | STREAM_SRV_CONF
                | HTTP_MAIN_CONF
                | HTTP_SRV_CONF
                | HTTP_LOC_CONF
                | CONF_TAKE1,
        ],
    ),
    (
        "js_fetch_keepalive",
        &[
            STREAM_MAIN_CONF
                | STREAM_SRV_CONF
                | HTTP_MAIN_CONF
                | HTTP_SRV_CONF
                | HTTP_LOC_CONF
                | CONF_TAKE1,
        ],
    ),
    (
        "js_fetch_keepalive_requests",
        &[
            STREAM_MAIN_CONF
                | STREAM_SRV_CONF
                | HTTP_MAIN_CONF
                | HTTP_SRV_CONF
                | HTTP_LOC_CONF
                | CONF_TAKE1,
        ],
    ),
    (
        "js_fetch_keepalive_time",
        &[
            STREAM_MAIN_CONF
                | STREAM_SRV_CONF
                | HTTP_MAIN_CONF
                | HTTP_SRV_CONF
                | HTTP_LOC_CONF
                | CONF_TAKE1,
        ],
    ),
    (
        "js_fetch_keepalive_timeout",
        &[
            STREAM_MAIN_CONF
                | STREAM_SRV_CONF
                | HTTP_MAIN_CONF
                | HTTP_SRV_CONF
                | HTTP_LOC_CONF
                | CONF_TAKE1,
        ],
    ),
    (
        "js_fetch_max_response_buffer_size",
        &[
            STREAM_MAIN_CONF
                | STREAM_SRV_CONF
                | HTTP_MAIN_CONF
                | HTTP_SRV_CONF
                | HTTP_LOC_CONF
                | CONF_TAKE1,
        ],
    ),
    (
        "js_fetch_protocols",
        &[
            STREAM_MAIN_CONF
                | STREAM_SRV_CONF
                | HTTP_MAIN_CONF
                | HTTP_SRV_CONF
                | HTTP_LOC_CONF
                | CONF_1MORE,
        ],
    ),
    (
        "js_fetch_timeout",
        &[
            STREAM_MAIN_CONF
                | STREAM_SRV_CONF
                | HTTP_MAIN_CONF
                | HTTP_SRV_CONF
                | HTTP_LOC_CONF
                | CONF_TAKE1,
        ],
    ),
    (
        "js_fetch_trusted_certificate",
        &[
            STREAM_MAIN_CONF
                | STREAM_SRV_CONF
                | HTTP_MAIN_CONF
                | HTTP_SRV_CONF
                | HTTP_LOC_CONF
                | CONF_TAKE1,
        ],
    ),
    (
        "js_fetch_verify",
        &[
            STREAM_MAIN_CONF
                | STREAM_SRV_CONF
                | HTTP_MAIN_CONF
                | HTTP_SRV_CONF
                | HTTP_LOC_CONF
                | CONF_FLAG,
        ],
    ),
    (
        "js_fetch_verify_depth",
        &[
            STREAM_MAIN_CONF
                | STREAM_SRV_CONF
                | HTTP_MAIN_CONF
                | HTTP_SRV_CONF
                | HTTP_LOC_CONF
                | CONF_TAKE1,
        ],
    ),
    ("js_filter", &[STREAM_MAIN_CONF | STREAM_SRV_CONF | CONF_TAKE1]),
    ("js_header_filter", &[HTTP_LOC_CONF | HTTP_LIF_CONF | HTTP_LMT_CONF | CONF_TAKE1]),
    (
        "js_import",
        &[
            STREAM_MAIN_CONF
                | STREAM_SRV_CONF
                | HTTP_MAIN_CONF
                | HTTP_SRV_CONF
                | HTTP_LOC_CONF
                | CONF_TAKE13,
        ],
    ),
    ("js_include", &[STREAM_MAIN_CONF | HTTP_MAIN_CONF | CONF_TAKE1]),
    (
        "js_path",
        &[
            STREAM_MAIN_CONF
                | STREAM_SRV_CONF
                | HTTP_MAIN_CONF
                | HTTP_SRV_CONF
                | HTTP_LOC_CONF
                | CONF_TAKE1,
        ],
    ),
    ("js_periodic", &[STREAM_SRV_CONF | HTTP_LOC_CONF | CONF_1MORE]),
    (
        "js_preload_object",
        &[
            STREAM_MAIN_CONF
                | STREAM_SRV_CONF
                | HTTP_MAIN_CONF
                | HTTP_SRV_CONF
                | HTTP_LOC_CONF
                | CONF_TAKE13,
        ],
    ),
    ("js_preread", &[STREAM_MAIN_CONF | STREAM_SRV_CONF | CONF_TAKE1]),
    (
        "js_set",
        &[
            STREAM_MAIN_CONF
                | STREAM_SRV_CONF
                | HTTP_MAIN_CONF
                | HTTP_SRV_CONF
                | HTTP_LOC_CONF
                | CONF_TAKE23,
        ],
    ),
    ("js_shared_dict_zone", &[STREAM_MAIN_CONF | HTTP_MAIN_CONF | CONF_1MORE]),
    (
        "js_var",
        &[
            STREAM_MAIN_CONF
                | STREAM_SRV_CONF
                | HTTP_MAIN_CONF
                | HTTP_SRV_CONF
                | HTTP_LOC_CONF
                | CONF_TAKE12,
        ],
    ),
];
