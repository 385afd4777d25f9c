//! Derive the rate limiter's source identifier for each request

use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::{from_fn, Next},
    response::Response,
    Router,
};
use chambers_models::SourceId;

pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router.layer(from_fn(middleware))
}

async fn middleware(mut request: Request, next: Next) -> Response {
    let source = SourceId::from(source_from_headers(request.headers()));
    request.extensions_mut().insert(source);
    next.run(request).await
}

/// First entry of `X-Forwarded-For`, then `X-Real-Ip`, then `"unknown"`.
/// Requests carrying neither header all end up in the same bucket.
fn source_from_headers(headers: &HeaderMap) -> &str {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|value| value.to_str().ok())
        })
        .unwrap_or(SourceId::UNKNOWN)
}
