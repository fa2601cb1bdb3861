use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

/// The web client is served from its own origin and talks JSON only.
pub fn web_client_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(Any)
}
