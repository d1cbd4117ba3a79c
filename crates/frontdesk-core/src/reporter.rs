//! Error reporting.
//!
//! When dispatch fails, the dispatcher hands the error to an [`ErrorReporter`],
//! which stages the status line and headers on the [`HeaderTransport`] and
//! returns the page body.

use bytes::Bytes;
use frontdesk_model::RouteError;
use http::header::{CACHE_CONTROL, CONTENT_TYPE, HeaderValue};

use crate::transport::{HeaderTransport, HttpVersion};

/// Turns a dispatch failure into an error page.
pub trait ErrorReporter: Send + Sync {
    /// Report `error`.
    ///
    /// `internal` is `true` when the router raised the error and `false` when
    /// the invoked operation did. Implementations stage the response head on
    /// `transport` and return the body.
    fn report(&self, error: &RouteError, internal: bool, transport: &mut HeaderTransport) -> Bytes;
}

/// Reports `404 Not Found` for missing pages and `500 Internal Server Error`
/// for everything else.
///
/// Error details are never written to the page; they go to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultErrorReporter;

impl ErrorReporter for DefaultErrorReporter {
    fn report(&self, error: &RouteError, internal: bool, transport: &mut HeaderTransport) -> Bytes {
        let status = error.status_code();
        let label = status.canonical_reason().unwrap_or("Error");

        if status == http::StatusCode::NOT_FOUND {
            tracing::info!(kind = error.kind(), %error, "page not found");
        } else if internal {
            tracing::warn!(kind = error.kind(), %error, "internal routing error");
        } else {
            tracing::error!(kind = error.kind(), error = ?error, "operation failed");
        }

        transport.set_status(status, label, HttpVersion::Http11);
        transport.insert(CONTENT_TYPE, HeaderValue::from_static("text/html; charset=utf-8"));
        transport.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        transport.send();

        Bytes::from(error_page(status.as_u16(), label))
    }
}

fn error_page(code: u16, label: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html><head><title>{code} {label}</title></head>\
         <body><h1>{code} {label}</h1></body></html>\n"
    )
}
