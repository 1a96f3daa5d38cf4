//! CORS layer configuration.

use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

use tokengate_core::config::ServerConfig;

/// Builds a CORS layer allowing the configured origins and the token header.
pub fn build_cors_layer(config: &ServerConfig, token_header: &HeaderName) -> CorsLayer {
    let origin = if config.allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, token_header.clone()])
        .expose_headers([token_header.clone()])
        .max_age(std::time::Duration::from_secs(3600))
}
