//! lua-nginx-module directives

use super::*;

pub(super) static LUA: &[(&str, &[Mask])] = &[
    (
        "access_by_lua",
        &[
            HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | HTTP_LIF_CONF | CONF_TAKE1,
        ],
    ),
    (
        "access_by_lua_block",
        &[
            HTTP_MAIN_CONF
                | HTTP_SRV_CONF
                | HTTP_LOC_CONF
                | HTTP_LIF_CONF
                | CONF_BLOCK
                | CONF_NOARGS,
            HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | HTTP_LIF_CONF | CONF_TAKE1,
        ],
    ),
    (
        "access_by_lua_file",
        &[
            HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | HTTP_LIF_CONF | CONF_TAKE1,
        ],
    ),
    ("access_by_lua_no_postpone", &[HTTP_MAIN_CONF | CONF_FLAG]),
    (
        "balancer_by_lua_block",
        &[
            HTTP_UPS_CONF | CONF_BLOCK | CONF_NOARGS,
            HTTP_UPS_CONF | CONF_TAKE1,
        ],
    ),
    ("balancer_by_lua_file", &[HTTP_UPS_CONF | CONF_TAKE1]),
    (
        "body_filter_by_lua",
        &[
            HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | HTTP_LIF_CONF | CONF_TAKE1,
        ],
    ),
    (
        "body_filter_by_lua_block",
        &[
            HTTP_MAIN_CONF
                | HTTP_SRV_CONF
                | HTTP_LOC_CONF
                | HTTP_LIF_CONF
                | CONF_BLOCK
                | CONF_NOARGS,
            HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | HTTP_LIF_CONF | CONF_TAKE1,
        ],
    ),
    (
        "body_filter_by_lua_file",
        &[
            HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | HTTP_LIF_CONF | CONF_TAKE1,
        ],
    ),
    ("content_by_lua", &[HTTP_LOC_CONF | HTTP_LIF_CONF | CONF_TAKE1]),
    (
        "content_by_lua_block",
        &[
            HTTP_LOC_CONF | HTTP_LIF_CONF | CONF_BLOCK | CONF_NOARGS,
            HTTP_LOC_CONF | HTTP_LIF_CONF | CONF_TAKE1,
        ],
    ),
    ("content_by_lua_file", &[HTTP_LOC_CONF | HTTP_LIF_CONF | CONF_TAKE1]),
    (
        "exit_worker_by_lua_block",
        &[
            HTTP_MAIN_CONF | CONF_BLOCK | CONF_NOARGS,
            HTTP_MAIN_CONF | CONF_TAKE1,
        ],
    ),
    ("exit_worker_by_lua_file", &[HTTP_MAIN_CONF | CONF_TAKE1]),
    (
        "header_filter_by_lua",
        &[
            HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | HTTP_LIF_CONF | CONF_TAKE1,
        ],
    ),
    (
        "header_filter_by_lua_block",
        &[
            HTTP_MAIN_CONF
                | HTTP_SRV_CONF
                | HTTP_LOC_CONF
                | HTTP_LIF_CONF
                | CONF_BLOCK
                | CONF_NOARGS,
            HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | HTTP_LIF_CONF | CONF_TAKE1,
        ],
    ),
    (
        "header_filter_by_lua_file",
        &[
            HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | HTTP_LIF_CONF | CONF_TAKE1,
        ],
    ),
    ("init_by_lua", &[HTTP_MAIN_CONF | CONF_TAKE1]),
    (
        "init_by_lua_block",
        &[
            HTTP_MAIN_CONF | CONF_BLOCK | CONF_NOARGS,
            HTTP_MAIN_CONF | CONF_TAKE1,
        ],
    ),
    ("init_by_lua_file", &[HTTP_MAIN_CONF | CONF_TAKE1]),
    ("init_worker_by_lua", &[HTTP_MAIN_CONF | CONF_TAKE1]),
    (
        "init_worker_by_lua_block",
        &[
            HTTP_MAIN_CONF | CONF_BLOCK | CONF_NOARGS,
            HTTP_MAIN_CONF | CONF_TAKE1,
        ],
    ),
    ("init_worker_by_lua_file", &[HTTP_MAIN_CONF | CONF_TAKE1]),
    ("log_by_lua", &[HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | HTTP_LIF_CONF | CONF_TAKE1]),
    (
        "log_by_lua_block",
        &[
            HTTP_MAIN_CONF
                | HTTP_SRV_CONF
                | HTTP_LOC_CONF
                | HTTP_LIF_CONF
                | CONF_BLOCK
                | CONF_NOARGS,
            HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | HTTP_LIF_CONF | CONF_TAKE1,
        ],
    ),
    (
        "log_by_lua_file",
        &[
            HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | HTTP_LIF_CONF | CONF_TAKE1,
        ],
    ),
    ("lua_capture_error_log", &[HTTP_MAIN_CONF | CONF_TAKE1]),
    (
        "lua_check_client_abort",
        &[
            HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | HTTP_LIF_CONF | CONF_FLAG,
        ],
    ),
    (
        "lua_code_cache",
        &[
            HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | HTTP_LIF_CONF | CONF_FLAG,
        ],
    ),
    (
        "lua_http10_buffering",
        &[
            HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | HTTP_LIF_CONF | CONF_FLAG,
        ],
    ),
    ("lua_load_resty_core", &[HTTP_MAIN_CONF | CONF_FLAG]),
    ("lua_malloc_trim", &[HTTP_MAIN_CONF | CONF_TAKE1]),
    ("lua_max_pending_timers", &[HTTP_MAIN_CONF | CONF_TAKE1]),
    ("lua_max_running_timers", &[HTTP_MAIN_CONF | CONF_TAKE1]),
    (
        "lua_need_request_body",
        &[
            HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | HTTP_LIF_CONF | CONF_FLAG,
        ],
    ),
    ("lua_package_cpath", &[HTTP_MAIN_CONF | CONF_TAKE1]),
    ("lua_package_path", &[HTTP_MAIN_CONF | CONF_TAKE1]),
    ("lua_regex_cache_max_entries", &[HTTP_MAIN_CONF | CONF_TAKE1]),
    ("lua_regex_match_limit", &[HTTP_MAIN_CONF | CONF_TAKE1]),
    ("lua_sa_restart", &[HTTP_MAIN_CONF | CONF_FLAG]),
    ("lua_shared_dict", &[HTTP_MAIN_CONF | CONF_TAKE2]),
    ("lua_socket_buffer_size", &[HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | CONF_TAKE1]),
    ("lua_socket_connect_timeout", &[HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | CONF_TAKE1]),
    (
        "lua_socket_keepalive_timeout",
        &[
            HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | CONF_TAKE1,
        ],
    ),
    ("lua_socket_log_errors", &[HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | CONF_FLAG]),
    ("lua_socket_pool_size", &[HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | CONF_TAKE1]),
    ("lua_socket_read_timeout", &[HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | CONF_TAKE1]),
    ("lua_socket_send_lowat", &[HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | CONF_TAKE1]),
    ("lua_socket_send_timeout", &[HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | CONF_TAKE1]),
    ("lua_ssl_certificate", &[HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | CONF_TAKE1]),
    ("lua_ssl_certificate_key", &[HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | CONF_TAKE1]),
    ("lua_ssl_ciphers", &[HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | CONF_TAKE1]),
    ("lua_ssl_conf_command", &[HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | CONF_TAKE2]),
    ("lua_ssl_crl", &[HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | CONF_TAKE1]),
    ("lua_ssl_key_log", &[HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | CONF_TAKE1]),
    ("lua_ssl_protocols", &[HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | CONF_1MORE]),
    ("lua_ssl_trusted_certificate", &[HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | CONF_TAKE1]),
    ("lua_ssl_verify_depth", &[HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | CONF_TAKE1]),
    ("lua_thread_cache_max_entries", &[HTTP_MAIN_CONF | CONF_TAKE1]),
    (
        "lua_transform_underscores_in_response_headers",
        &[
            HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | HTTP_LIF_CONF | CONF_FLAG,
        ],
    ),
    (
        "lua_use_default_type",
        &[
            HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | HTTP_LIF_CONF | CONF_FLAG,
        ],
    ),
    ("lua_worker_thread_vm_pool_size", &[HTTP_MAIN_CONF | CONF_TAKE1]),
    (
        "rewrite_by_lua",
        &[
            HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | HTTP_LIF_CONF | CONF_TAKE1,
        ],
    ),
    (
        "rewrite_by_lua_block",
        &[
            HTTP_MAIN_CONF
                | HTTP_SRV_CONF
                | HTTP_LOC_CONF
                | HTTP_LIF_CONF
                | CONF_BLOCK
                | CONF_NOARGS,
            HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | HTTP_LIF_CONF | CONF_TAKE1,
        ],
    ),
    (
        "rewrite_by_lua_file",
        &[
            HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | HTTP_LIF_CONF | CONF_TAKE1,
        ],
    ),
    ("rewrite_by_lua_no_postpone", &[HTTP_MAIN_CONF | CONF_FLAG]),
    (
        "server_rewrite_by_lua_block",
        &[
            HTTP_MAIN_CONF | HTTP_SRV_CONF | CONF_BLOCK | CONF_NOARGS,
            HTTP_MAIN_CONF | HTTP_SRV_CONF | CONF_TAKE1,
        ],
    ),
    ("server_rewrite_by_lua_file", &[HTTP_MAIN_CONF | HTTP_SRV_CONF | CONF_TAKE1]),
    ("set_by_lua", &[HTTP_SRV_CONF | HTTP_LOC_CONF | HTTP_SIF_CONF | HTTP_LIF_CONF | CONF_2MORE]),
    (
        "set_by_lua_block",
        &[
            HTTP_SRV_CONF | HTTP_LOC_CONF | HTTP_SIF_CONF | HTTP_LIF_CONF | CONF_BLOCK | CONF_TAKE1,
            HTTP_SRV_CONF | HTTP_LOC_CONF | HTTP_SIF_CONF | HTTP_LIF_CONF | CONF_TAKE2,
        ],
    ),
    (
        "set_by_lua_file",
        &[
            HTTP_SRV_CONF | HTTP_LOC_CONF | HTTP_SIF_CONF | HTTP_LIF_CONF | CONF_2MORE,
        ],
    ),
    (
        "ssl_certificate_by_lua_block",
        &[
            HTTP_MAIN_CONF | HTTP_SRV_CONF | CONF_BLOCK | CONF_NOARGS,
            HTTP_MAIN_CONF | HTTP_SRV_CONF | CONF_TAKE1,
        ],
    ),
    ("ssl_certificate_by_lua_file", &[HTTP_MAIN_CONF | HTTP_SRV_CONF | CONF_TAKE1]),
    (
        "ssl_client_hello_by_lua_block",
        &[
            HTTP_MAIN_CONF | HTTP_SRV_CONF | CONF_BLOCK | CONF_NOARGS,
            HTTP_MAIN_CONF | HTTP_SRV_CONF | CONF_TAKE1,
        ],
    ),
    ("ssl_client_hello_by_lua_file", &[HTTP_MAIN_CONF | HTTP_SRV_CONF | CONF_TAKE1]),
    (
        "ssl_session_fetch_by_lua_block",
        &[
            HTTP_MAIN_CONF | CONF_BLOCK | CONF_NOARGS,
            HTTP_MAIN_CONF | CONF_TAKE1,
        ],
    ),
    ("ssl_session_fetch_by_lua_file", &[HTTP_MAIN_CONF | CONF_TAKE1]),
    (
        "ssl_session_store_by_lua_block",
        &[
            HTTP_MAIN_CONF | CONF_BLOCK | CONF_NOARGS,
            HTTP_MAIN_CONF | CONF_TAKE1,
        ],
    ),
    ("ssl_session_store_by_lua_file", &[HTTP_MAIN_CONF | CONF_TAKE1]),
];
