//! Resolved routes and redirect decisions.

use std::fmt;

/// The result of resolving a request URI to a controller and method.
///
/// Both `controller` and `method` satisfy the identifier grammar once a route
/// has been produced by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRoute {
    /// Controller name as it appeared in the URI (or the configured default).
    pub controller: String,
    /// Method (operation) name as it appeared in the URI.
    pub method: String,
    /// Everything after the first `?`, verbatim. Empty when absent.
    pub query_string: String,
}

impl ResolvedRoute {
    /// Create a route from its three components.
    #[must_use]
    pub fn new(
        controller: impl Into<String>,
        method: impl Into<String>,
        query_string: impl Into<String>,
    ) -> Self {
        Self {
            controller: controller.into(),
            method: method.into(),
            query_string: query_string.into(),
        }
    }

    /// Whether the route carries a non-empty query string.
    #[must_use]
    pub fn has_query(&self) -> bool {
        !self.query_string.is_empty()
    }
}

impl fmt::Display for ResolvedRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.controller, self.method)
    }
}

/// Whether a request must be redirected to its canonical URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectDecision {
    /// True when the request URI is not in canonical form.
    pub should_redirect: bool,
    /// The canonical URI. Empty when no redirect is needed.
    pub target: String,
    /// Status to redirect with: 301, 303, or 307.
    pub status_code: http::StatusCode,
}

impl RedirectDecision {
    /// A decision that accepts the request as-is.
    #[must_use]
    pub fn accept() -> Self {
        Self {
            should_redirect: false,
            target: String::new(),
            status_code: http::StatusCode::MOVED_PERMANENTLY,
        }
    }

    /// A decision that redirects to `target` with a permanent redirect.
    ///
    /// The final status is set with [`RedirectDecision::with_status`] once the
    /// redirect policy is known.
    #[must_use]
    pub fn redirect(target: impl Into<String>) -> Self {
        Self {
            should_redirect: true,
            target: target.into(),
            status_code: http::StatusCode::MOVED_PERMANENTLY,
        }
    }

    /// Replace the redirect status.
    #[must_use]
    pub fn with_status(mut self, status_code: http::StatusCode) -> Self {
        self.status_code = status_code;
        self
    }
}
