//! Per-request state handed through the dispatcher.

use crate::query::{QueryParams, parse_query};

/// Everything the router and the invoked operation know about one request.
///
/// Built once per request by the host and passed by reference; nothing here is
/// shared between requests.
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_uri: String,
    method: http::Method,
    query: QueryParams,
    form: QueryParams,
}

impl RequestContext {
    /// Create a `GET` context for a raw request URI (path plus optional query).
    ///
    /// The query is parsed from everything after the first `?`.
    #[must_use]
    pub fn new(request_uri: impl Into<String>) -> Self {
        let request_uri = request_uri.into();
        let query = request_uri
            .split_once('?')
            .map(|(_, q)| parse_query(q))
            .unwrap_or_default();
        Self {
            request_uri,
            method: http::Method::GET,
            query,
            form: QueryParams::new(),
        }
    }

    /// Create a context from a separate path and raw query string.
    #[must_use]
    pub fn from_parts(path: &str, raw_query: &str) -> Self {
        if raw_query.is_empty() {
            Self::new(path)
        } else {
            Self::new(format!("{path}?{raw_query}"))
        }
    }

    /// Set the HTTP method.
    #[must_use]
    pub fn with_method(mut self, method: http::Method) -> Self {
        self.method = method;
        self
    }

    /// Attach parsed form data from the request body.
    #[must_use]
    pub fn with_form(mut self, form: QueryParams) -> Self {
        self.form = form;
        self
    }

    /// The raw request URI, exactly as received.
    #[must_use]
    pub fn request_uri(&self) -> &str {
        &self.request_uri
    }

    /// The HTTP method.
    #[must_use]
    pub fn method(&self) -> &http::Method {
        &self.method
    }

    /// Parsed query parameters.
    #[must_use]
    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    /// Parsed form data.
    #[must_use]
    pub fn form(&self) -> &QueryParams {
        &self.form
    }

    /// Whether the request carried form-post data.
    #[must_use]
    pub fn has_form_data(&self) -> bool {
        !self.form.is_empty()
    }

    /// Query parameters merged with form data; form values win on conflicts.
    #[must_use]
    pub fn params(&self) -> QueryParams {
        let mut merged = self.query.clone();
        merged.extend(self.form.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }
}
