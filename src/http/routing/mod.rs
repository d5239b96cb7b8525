use ::http::{header, HeaderValue, StatusCode};
use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

pub const ALLOWED_ORIGIN: &str = "*";
pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type";

/// Wraps the feature routers with request tracing and the permissive CORS
/// headers, which are stamped on every response including 404 and 405.
pub fn app(router: Router) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }).options(|| async { StatusCode::OK }))
        .merge(router)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(SetResponseHeaderLayer::overriding(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static(ALLOWED_ORIGIN)))
                .layer(SetResponseHeaderLayer::overriding(header::ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOWED_METHODS)))
                .layer(SetResponseHeaderLayer::overriding(header::ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOWED_HEADERS))),
        )
}
