//! Successful operation output.

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderName, HeaderValue};

/// What an operation returns: status, headers, and a buffered body.
#[derive(Debug, Clone)]
pub struct Reply {
    /// Response status.
    pub status: http::StatusCode,
    /// Response headers.
    pub headers: http::HeaderMap,
    /// Response body.
    pub body: Bytes,
}

impl Default for Reply {
    fn default() -> Self {
        Self {
            status: http::StatusCode::OK,
            headers: http::HeaderMap::new(),
            body: Bytes::new(),
        }
    }
}

impl Reply {
    /// An empty `200 OK` reply.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A `text/plain` reply.
    #[must_use]
    pub fn text(body: impl Into<String>) -> Self {
        Self::with_content_type("text/plain; charset=utf-8", Bytes::from(body.into()))
    }

    /// A `text/html` reply.
    #[must_use]
    pub fn html(body: impl Into<String>) -> Self {
        Self::with_content_type("text/html; charset=utf-8", Bytes::from(body.into()))
    }

    /// An `application/json` reply.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be serialized.
    pub fn json<T: serde::Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_vec(value)?;
        Ok(Self::with_content_type("application/json", Bytes::from(body)))
    }

    fn with_content_type(content_type: &'static str, body: Bytes) -> Self {
        let mut headers = http::HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        Self {
            status: http::StatusCode::OK,
            headers,
            body,
        }
    }

    /// Replace the status.
    #[must_use]
    pub fn with_status(mut self, status: http::StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Set a header, replacing any existing value.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_build_text_reply() {
        let reply = Reply::text("hello");
        assert_eq!(reply.status, http::StatusCode::OK);
        assert_eq!(
            reply.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("text/plain; charset=utf-8")
        );
        assert_eq!(reply.body, Bytes::from_static(b"hello"));
    }

    #[test]
    fn test_should_build_json_reply() {
        let reply = Reply::json(&serde_json::json!({"ok": true}))
            .expect("serializable")
            .with_status(http::StatusCode::CREATED);
        assert_eq!(reply.status, http::StatusCode::CREATED);
        assert_eq!(reply.body, Bytes::from_static(br#"{"ok":true}"#));
    }
}
