//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (record request and page ids on the span and Sentry scope)

pub mod request_id;

pub use request_id::{PAGE_ID_HEADER, REQUEST_ID_HEADER, make_request_span, request_id_middleware};
