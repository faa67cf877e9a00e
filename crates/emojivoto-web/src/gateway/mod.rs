//! HTTP gateway over the emoji and voting gRPC services.
//!
//! ## Structure
//!
//! - [`backend`] - the [`Backend`] seam and its gRPC implementation.
//! - [`routes`] - axum handlers and the JSON wire types.
//! - [`error`] - [`ApiError`] and its HTTP status mapping.
//! - [`config`] - CLI/env configuration.

pub mod backend;
pub mod config;
pub mod error;
pub mod routes;
#[cfg(test)]
pub(crate) mod testing;
#[cfg(test)]
mod tests;

pub use backend::*;
pub use error::*;
pub use routes::*;

use axum::extract::Request;
use emojivoto_core::propagation::set_parent_from_headers;
use tracing::Span;

/// Request span for `TraceLayer`, parented on the caller's trace context.
pub fn http_span(req: &Request) -> Span {
    let span = tracing::info_span!("request", method = %req.method(), uri = %req.uri());
    set_parent_from_headers(&span, req.headers());
    span
}
