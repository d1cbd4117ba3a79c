//! Status line and header staging for redirect and error responses.
//!
//! The router never writes to a socket. Redirects and error reporters stage a
//! status line and headers on a [`HeaderTransport`]; the host turns it into a
//! real response once [`HeaderTransport::send`] has been called.

use http::header::{HeaderName, HeaderValue};

/// HTTP protocol version on the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpVersion {
    /// `HTTP/1.0`
    #[default]
    Http10,
    /// `HTTP/1.1`
    Http11,
}

impl HttpVersion {
    /// The version as it appears on a status line.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http10 => "HTTP/1.0",
            Self::Http11 => "HTTP/1.1",
        }
    }

    /// Map to the `http` crate's version type.
    #[must_use]
    pub fn to_http(self) -> http::Version {
        match self {
            Self::Http10 => http::Version::HTTP_10,
            Self::Http11 => http::Version::HTTP_11,
        }
    }
}

impl From<http::Version> for HttpVersion {
    /// Anything other than HTTP/1.1 falls back to HTTP/1.0.
    fn from(version: http::Version) -> Self {
        if version == http::Version::HTTP_11 {
            Self::Http11
        } else {
            Self::Http10
        }
    }
}

/// Header name or value that cannot appear in an HTTP message.
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
    /// The name contains characters not allowed in a header name.
    #[error("invalid header name: {0}")]
    InvalidName(#[from] http::header::InvalidHeaderName),
    /// The value contains characters not allowed in a header value.
    #[error("invalid header value: {0}")]
    InvalidValue(#[from] http::header::InvalidHeaderValue),
}

/// A staged status line plus headers.
///
/// Header names are matched case-insensitively; adding a header that already
/// exists replaces its value.
#[derive(Debug, Clone)]
pub struct HeaderTransport {
    status: http::StatusCode,
    label: String,
    version: HttpVersion,
    headers: http::HeaderMap,
    enabled: bool,
    sent: bool,
}

impl Default for HeaderTransport {
    fn default() -> Self {
        Self {
            status: http::StatusCode::OK,
            label: "OK".to_owned(),
            version: HttpVersion::Http10,
            headers: http::HeaderMap::new(),
            enabled: true,
            sent: false,
        }
    }
}

impl HeaderTransport {
    /// A transport staged with `200 OK` over HTTP/1.0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the status code, reason label, and protocol version.
    pub fn set_status(
        &mut self,
        status: http::StatusCode,
        label: impl Into<String>,
        version: impl Into<HttpVersion>,
    ) {
        self.status = status;
        self.label = label.into();
        self.version = version.into();
    }

    /// Add a header, replacing any existing value under the same name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or value is not valid in an HTTP message.
    pub fn add(&mut self, name: &str, value: &str) -> Result<(), HeaderError> {
        let name = HeaderName::from_bytes(name.as_bytes())?;
        let value = HeaderValue::from_str(value)?;
        self.headers.insert(name, value);
        Ok(())
    }

    /// Add a header from pre-validated parts.
    pub fn insert(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    /// Remove a header. Returns whether it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        self.headers.remove(name).is_some()
    }

    /// Whether a header with this name has been added.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }

    /// The value of a header, if present and valid UTF-8.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// All staged headers.
    #[must_use]
    pub fn headers(&self) -> &http::HeaderMap {
        &self.headers
    }

    /// The staged status code.
    #[must_use]
    pub fn status(&self) -> http::StatusCode {
        self.status
    }

    /// The staged reason label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The staged protocol version.
    #[must_use]
    pub fn version(&self) -> HttpVersion {
        self.version
    }

    /// The full status line, e.g. `HTTP/1.1 307 Temporary Redirect`.
    #[must_use]
    pub fn status_line(&self) -> String {
        format!(
            "{} {} {}",
            self.version.as_str(),
            self.status.as_u16(),
            self.label
        )
    }

    /// Enable or disable emission on [`send`](Self::send).
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether [`send`](Self::send) emits anything.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Mark the staged status and headers as sent.
    ///
    /// The transport counts as sent even when disabled; a disabled transport is
    /// never emitted by the host.
    pub fn send(&mut self) {
        self.sent = true;
        if self.enabled {
            tracing::trace!(status_line = %self.status_line(), headers = self.headers.len(), "sending headers");
        }
    }

    /// Whether [`send`](Self::send) has been called.
    #[must_use]
    pub fn is_sent(&self) -> bool {
        self.sent
    }

    /// Whether the host should emit this transport as the response head.
    #[must_use]
    pub fn should_emit(&self) -> bool {
        self.sent && self.enabled
    }
}
