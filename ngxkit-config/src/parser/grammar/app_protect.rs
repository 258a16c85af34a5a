//! NGINX App Protect WAF v4 directives

use super::*;

pub(super) static APP_PROTECT_WAF_V4: &[(&str, &[Mask])] = &[
    ("app_protect_app_name", &[HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | CONF_TAKE1]),
    ("app_protect_compressed_requests_action", &[HTTP_MAIN_CONF | CONF_TAKE1]),
    ("app_protect_config_set_timeout", &[HTTP_MAIN_CONF | CONF_TAKE1]),
    ("app_protect_cookie_seed", &[HTTP_MAIN_CONF | CONF_TAKE1]),
    ("app_protect_cpu_thresholds", &[HTTP_MAIN_CONF | CONF_TAKE2]),
    (
        "app_protect_custom_log_attribute",
        &[
            HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | CONF_TAKE2,
        ],
    ),
    ("app_protect_enable", &[HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | CONF_FLAG]),
    ("app_protect_enforcer_address", &[HTTP_MAIN_CONF | CONF_TAKE1]),
    ("app_protect_enforcer_memory_limit_mb", &[HTTP_MAIN_CONF | CONF_TAKE1]),
    ("app_protect_failure_mode_action", &[HTTP_MAIN_CONF | CONF_TAKE1]),
    ("app_protect_global_settings", &[HTTP_MAIN_CONF | CONF_TAKE1]),
    ("app_protect_logging_str", &[HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | CONF_TAKE1]),
    ("app_protect_physical_memory_util_thresholds", &[HTTP_MAIN_CONF | CONF_TAKE2]),
    ("app_protect_policy_file", &[HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | CONF_TAKE1]),
    ("app_protect_reconnect_period_seconds", &[HTTP_MAIN_CONF | CONF_TAKE1]),
    ("app_protect_request_buffer_overflow_action", &[HTTP_MAIN_CONF | CONF_TAKE1]),
    ("app_protect_response_enforcement_disable", &[HTTP_MAIN_CONF | CONF_TAKE1]),
    ("app_protect_security_log", &[HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | CONF_TAKE2]),
    (
        "app_protect_security_log_enable",
        &[
            HTTP_MAIN_CONF | HTTP_SRV_CONF | HTTP_LOC_CONF | CONF_FLAG,
        ],
    ),
    ("app_protect_streaming_buffer_watermarks", &[HTTP_MAIN_CONF | CONF_TAKE2]),
    ("app_protect_user_defined_signatures", &[HTTP_MAIN_CONF | CONF_TAKE1]),
];
