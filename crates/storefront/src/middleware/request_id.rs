//! Request and page correlation.
//!
//! Every request gets a request id, taken from an upstream `x-request-id`
//! header when present and generated otherwise. Event requests also carry the
//! `x-page-id` of the page load they belong to. Both ids are recorded on the
//! request span and as Sentry tags, and the request id is echoed back in the
//! response headers.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// The HTTP header carrying the page id on event requests.
pub const PAGE_ID_HEADER: &str = "x-page-id";

/// Build the span each request is traced under.
///
/// The correlation fields start empty and are filled in by
/// [`request_id_middleware`].
pub fn make_request_span(request: &Request) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = tracing::field::Empty,
        page_id = tracing::field::Empty,
    )
}

fn header_str<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request.headers().get(name).and_then(|h| h.to_str().ok())
}

/// Middleware that tags the request with its request and page ids.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id =
        header_str(&request, REQUEST_ID_HEADER).map_or_else(|| Uuid::new_v4().to_string(), String::from);
    let page_id = header_str(&request, PAGE_ID_HEADER).map(String::from);

    let span = Span::current();
    span.record("request_id", request_id.as_str());
    if let Some(page_id) = &page_id {
        span.record("page_id", page_id.as_str());
    }

    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
        if let Some(page_id) = &page_id {
            scope.set_tag("page_id", page_id);
        }
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
