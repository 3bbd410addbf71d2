//! Cross-origin policy.
//!
//! Outside production every origin is echoed back with credentials allowed.
//! Production only accepts the configured origins. An entry such as
//! `https://*.hungie.app` matches any subdomain over the same scheme, but not
//! the bare domain. Requested headers are echoed in both modes.

use crate::config::RecipeConfig;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

pub fn cors_layer(config: &RecipeConfig) -> CorsLayer {
    if !config.is_production() {
        return CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true);
    }

    let allowed = config.cors.allowed_origins.clone();
    tracing::info!(origins = ?allowed, "CORS restricted to configured origins");

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            origin
                .to_str()
                .map(|origin| origin_allowed(&allowed, origin))
                .unwrap_or(false)
        }))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

pub fn origin_allowed<S: AsRef<str>>(allowed: &[S], origin: &str) -> bool {
    allowed
        .iter()
        .any(|pattern| origin_matches(pattern.as_ref(), origin))
}

fn origin_matches(pattern: &str, origin: &str) -> bool {
    let pattern = pattern.trim_end_matches('/');
    let origin = origin.trim_end_matches('/');

    let Some((scheme, host)) = pattern.split_once("://") else {
        return pattern == origin;
    };

    match host.strip_prefix("*.") {
        Some(domain) => origin
            .strip_prefix(scheme)
            .and_then(|rest| rest.strip_prefix("://"))
            .and_then(|rest| rest.strip_suffix(domain))
            .and_then(|sub| sub.strip_suffix('.'))
            .is_some_and(|sub| !sub.is_empty() && !sub.contains('/')),
        None => pattern.eq_ignore_ascii_case(origin),
    }
}
