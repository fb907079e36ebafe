use tower_http::cors::{Any, CorsLayer};

// The apply form is served from an arbitrary public origin.
pub fn permissive_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(Any)
}
