//! Error taxonomy for routing and dispatch.
//!
//! Every variant except [`RouteError::Operation`] is raised by the router itself
//! and is considered internal. Operation errors are whatever a controller's
//! operation returned and are reported as external.

use std::fmt;

/// A case strategy rejected a name that passed the identifier grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("the name \"{name}\" has more than one underscore after another, which is not allowed")]
pub struct InvalidNameError {
    /// The rejected name.
    pub name: String,
}

impl InvalidNameError {
    /// Create the error for `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Which URI token failed the identifier grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UriToken {
    /// The controller segment.
    Controller,
    /// The method segment.
    Method,
}

impl fmt::Display for UriToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Controller => "controller",
            Self::Method => "method",
        })
    }
}

/// Errors raised while routing a request or by the invoked operation.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// The request path does not start with `/`.
    #[error("the request URI \"{0}\" is malformed and could not be parsed")]
    MalformedUri(String),

    /// A controller or method token failed the structural or grammar rules.
    #[error("the request URI was malformed: the {token} \"{value}\" is invalid")]
    InvalidToken {
        /// Which token failed.
        token: UriToken,
        /// The offending value.
        value: String,
    },

    /// A case strategy rejected the controller name. No controller can answer
    /// to it, so it is reported as a missing page.
    #[error(transparent)]
    InvalidName(#[from] InvalidNameError),

    /// The registry entry does not satisfy the controller contract.
    #[error("the controller \"{0}\" could not be loaded as a controller")]
    Controller(String),

    /// The controller or operation could not be found or is not routable.
    #[error("page not found: {0}")]
    PageNotFound(String),

    /// The invoked operation itself failed.
    #[error("operation failed: {0}")]
    Operation(#[source] anyhow::Error),
}

/// Convenience result type for routing operations.
pub type RouteResult<T> = Result<T, RouteError>;

impl RouteError {
    /// Create a malformed URI error for the whole request URI.
    #[must_use]
    pub fn malformed_uri(uri: impl Into<String>) -> Self {
        Self::MalformedUri(uri.into())
    }

    /// Create a malformed URI error naming the failing token.
    #[must_use]
    pub fn invalid_token(token: UriToken, value: impl Into<String>) -> Self {
        Self::InvalidToken {
            token,
            value: value.into(),
        }
    }

    /// Create a controller contract error.
    #[must_use]
    pub fn controller(name: impl Into<String>) -> Self {
        Self::Controller(name.into())
    }

    /// Create a page-not-found error.
    #[must_use]
    pub fn page_not_found(detail: impl Into<String>) -> Self {
        Self::PageNotFound(detail.into())
    }

    /// Wrap an error raised by an operation.
    #[must_use]
    pub fn operation(err: impl Into<anyhow::Error>) -> Self {
        Self::Operation(err.into())
    }

    /// Whether the error belongs to the malformed URI family.
    #[must_use]
    pub fn is_malformed_uri(&self) -> bool {
        matches!(self, Self::MalformedUri(_) | Self::InvalidToken { .. })
    }

    /// Whether the error means the page does not exist.
    #[must_use]
    pub fn is_page_not_found(&self) -> bool {
        matches!(self, Self::PageNotFound(_) | Self::InvalidName(_))
    }

    /// Whether the error was raised by the router rather than the operation.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        !matches!(self, Self::Operation(_))
    }

    /// Stable error code for logs and error pages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedUri(_) | Self::InvalidToken { .. } => "MalformedUri",
            Self::InvalidName(_) => "InvalidName",
            Self::Controller(_) => "ControllerError",
            Self::PageNotFound(_) => "PageNotFound",
            Self::Operation(_) => "OperationError",
        }
    }

    /// Default HTTP status: 404 for missing pages, 500 for everything else.
    #[must_use]
    pub fn status_code(&self) -> http::StatusCode {
        if self.is_page_not_found() {
            http::StatusCode::NOT_FOUND
        } else {
            http::StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
