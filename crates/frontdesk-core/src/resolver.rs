//! Request URI resolution.
//!
//! Maps a raw request URI of the fixed shape `/[controller/]method[?query]` to a
//! [`ResolvedRoute`]:
//!
//! - `/` routes to `index` on the default controller
//! - `/foo` routes to `foo` on the default controller
//! - `/foo/bar` routes to `bar` on controller `foo`
//! - a single trailing `/` after the method is tolerated
//!
//! Controller and method must both satisfy the identifier grammar.

use frontdesk_model::{ResolvedRoute, RouteError, RouteResult, UriToken};

use crate::validation::is_valid_identifier;

/// Method used when the URI names none.
pub const DEFAULT_METHOD: &str = "index";

/// Resolve a request URI into controller, method, and query string.
///
/// # Errors
///
/// Returns a malformed URI error if the URI does not start with `/`, if the
/// method segment contains a misplaced `/`, or if the controller or method
/// fails the identifier grammar.
///
/// # Examples
///
/// ```
/// use frontdesk_core::resolver::resolve;
///
/// let route = resolve("/foo/bar?x=1", "default").unwrap();
/// assert_eq!(route.controller, "foo");
/// assert_eq!(route.method, "bar");
/// assert_eq!(route.query_string, "x=1");
/// ```
pub fn resolve(request_uri: &str, default_controller: &str) -> RouteResult<ResolvedRoute> {
    let Some(rest) = request_uri.strip_prefix('/') else {
        return Err(RouteError::malformed_uri(request_uri));
    };

    let (path, query_string) = rest.split_once('?').unwrap_or((rest, ""));

    let (controller, method) = match path.split_once('/') {
        Some((first, second)) => {
            let candidate = if second.is_empty() { first } else { second };
            (first.trim(), clean_method_name(candidate)?)
        }
        None => {
            let candidate = if path.is_empty() { DEFAULT_METHOD } else { path };
            (default_controller.trim(), clean_method_name(candidate)?)
        }
    };

    if !is_valid_identifier(controller) {
        return Err(RouteError::invalid_token(UriToken::Controller, controller));
    }
    if !is_valid_identifier(method) {
        return Err(RouteError::invalid_token(UriToken::Method, method));
    }

    Ok(ResolvedRoute::new(controller, method, query_string))
}

/// Trim a method candidate and strip one allowed trailing `/`.
///
/// # Errors
///
/// Returns a malformed URI error when the name contains more than one `/`, or a
/// single `/` anywhere but at the end.
pub fn clean_method_name(method: &str) -> RouteResult<&str> {
    let method = method.trim();
    match method.matches('/').count() {
        0 => Ok(method),
        1 if method.ends_with('/') => Ok(&method[..method.len() - 1]),
        _ => Err(RouteError::invalid_token(UriToken::Method, method)),
    }
}
