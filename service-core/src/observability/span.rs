use axum::{extract::Request, http::HeaderMap};
use tracing::Span;

use crate::middleware::REQUEST_ID_HEADER;

/// Read the correlation id attached by `request_id_middleware`.
pub fn request_id(headers: &HeaderMap) -> Option<&str> {
    headers.get(REQUEST_ID_HEADER).and_then(|v| v.to_str().ok())
}

/// Span factory for `TraceLayer::make_span_with`.
pub fn make_request_span(req: &Request) -> Span {
    tracing::info_span!(
        "http_request",
        method = %req.method(),
        path = %req.uri().path(),
        request_id = request_id(req.headers()).unwrap_or("-"),
    )
}
