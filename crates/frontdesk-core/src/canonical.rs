//! Canonical URI enforcement.
//!
//! Every route has one preferred URI. A request is accepted as-is when it
//! matches one of these forms (controller and method compared ignoring ASCII
//! case, the query string compared exactly):
//!
//! 1. `/controller/method[?query]`
//! 2. `/method[?query]` when the controller is the default
//! 3. `/` when the controller is the default and the method is `index`
//!
//! Anything else is redirected to the ideal form: the controller segment is
//! omitted for the default controller, the method is always present, and the
//! query string is appended when non-empty. The redirect target keeps the
//! casing of the resolved route.

use frontdesk_model::{RedirectDecision, ResolvedRoute};

use crate::resolver::DEFAULT_METHOD;

/// Decide whether `request_uri` is the canonical form of `route`.
///
/// # Examples
///
/// ```
/// use frontdesk_core::canonical::check;
/// use frontdesk_model::ResolvedRoute;
///
/// let route = ResolvedRoute::new("default", "index", "");
/// assert!(!check("/", &route, "default").should_redirect);
///
/// let route = ResolvedRoute::new("default", "about", "");
/// assert_eq!(check("/default/about/", &route, "default").target, "/about");
/// ```
#[must_use]
pub fn check(request_uri: &str, route: &ResolvedRoute, default_controller: &str) -> RedirectDecision {
    let query = (!route.query_string.is_empty()).then_some(route.query_string.as_str());
    let is_default = route.controller.eq_ignore_ascii_case(default_controller);

    let full_path = format!("/{}/{}", route.controller, route.method);
    if matches_uri(request_uri, &full_path, query) {
        return RedirectDecision::accept();
    }

    let short_path = format!("/{}", route.method);
    if is_default && matches_uri(request_uri, &short_path, query) {
        return RedirectDecision::accept();
    }

    if is_default && route.method.eq_ignore_ascii_case(DEFAULT_METHOD) && request_uri == "/" {
        return RedirectDecision::accept();
    }

    RedirectDecision::redirect(ideal_uri(route, default_controller))
}

/// [`check`] the request and settle the redirect status.
///
/// The returned decision carries the status from [`redirect_status`] for the
/// requested status and whether the request carried form data.
#[must_use]
pub fn decide(
    request_uri: &str,
    route: &ResolvedRoute,
    default_controller: &str,
    requested_status: u16,
    has_form_data: bool,
) -> RedirectDecision {
    let decision = check(request_uri, route, default_controller);
    if decision.should_redirect {
        decision.with_status(redirect_status(requested_status, has_form_data))
    } else {
        decision
    }
}

/// The canonical URI for `route`.
#[must_use]
pub fn ideal_uri(route: &ResolvedRoute, default_controller: &str) -> String {
    let mut uri = String::new();
    if !route.controller.eq_ignore_ascii_case(default_controller) {
        uri.push('/');
        uri.push_str(&route.controller);
    }
    uri.push('/');
    uri.push_str(&route.method);
    if route.has_query() {
        uri.push('?');
        uri.push_str(&route.query_string);
    }
    uri
}

/// Compare a request URI against a candidate path and query.
///
/// The path part is compared ignoring ASCII case; the query part must match
/// exactly, and a present-but-empty query (`/foo?`) never matches.
fn matches_uri(request_uri: &str, path: &str, query: Option<&str>) -> bool {
    let (request_path, request_query) = match request_uri.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (request_uri, None),
    };
    request_path.eq_ignore_ascii_case(path) && request_query == query
}

/// Pick the status for a redirect.
///
/// Only 301 and 307 may be requested; anything else falls back to 307. A
/// request that carried form data is always answered with 303 so the client
/// follows up with a GET.
#[must_use]
pub fn redirect_status(requested: u16, has_form_data: bool) -> http::StatusCode {
    if has_form_data {
        return http::StatusCode::SEE_OTHER;
    }
    match requested {
        301 => http::StatusCode::MOVED_PERMANENTLY,
        _ => http::StatusCode::TEMPORARY_REDIRECT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::resolve;

    const DEFAULT: &str = "default_page";

    fn route(controller: &str, method: &str, query: &str) -> ResolvedRoute {
        ResolvedRoute::new(controller, method, query)
    }

    #[test]
    fn test_should_accept_full_form() {
        let r = route("users", "show", "id=1");
        assert!(!check("/users/show?id=1", &r, DEFAULT).should_redirect);
        assert!(!check("/Users/SHOW?id=1", &r, DEFAULT).should_redirect);
    }

    #[test]
    fn test_should_accept_full_form_for_default_controller() {
        let r = route("default_page", "about", "");
        assert!(!check("/default_page/about", &r, DEFAULT).should_redirect);
    }

    #[test]
    fn test_should_accept_short_form_for_default_controller() {
        let r = route("default_page", "about", "a=1");
        assert!(!check("/about?a=1", &r, DEFAULT).should_redirect);
    }

    #[test]
    fn test_should_accept_root_for_default_index() {
        let r = route("default_page", "index", "");
        assert!(!check("/", &r, DEFAULT).should_redirect);
        assert!(!check("/index", &r, DEFAULT).should_redirect);
    }

    #[test]
    fn test_should_not_accept_short_form_for_other_controller() {
        let r = route("users", "show", "");
        let decision = check("/show", &r, DEFAULT);
        assert!(decision.should_redirect);
        assert_eq!(decision.target, "/users/show");
    }

    #[test]
    fn test_should_redirect_trailing_slash() {
        let r = route("users", "show", "");
        let decision = check("/users/show/", &r, DEFAULT);
        assert!(decision.should_redirect);
        assert_eq!(decision.target, "/users/show");
    }

    #[test]
    fn test_should_redirect_default_controller_to_short_form() {
        let r = route("Default_Page", "about", "x=1");
        let decision = check("/Default_Page/about/?x=1", &r, DEFAULT);
        assert!(decision.should_redirect);
        assert_eq!(decision.target, "/about?x=1");
    }

    #[test]
    fn test_should_redirect_empty_query_marker() {
        let r = route("users", "show", "");
        let decision = check("/users/show?", &r, DEFAULT);
        assert!(decision.should_redirect);
        assert_eq!(decision.target, "/users/show");
    }

    #[test]
    fn test_should_redirect_whitespace_padded_segments() {
        let r = route("users", "show", "");
        assert_eq!(check("/ users/show", &r, DEFAULT).target, "/users/show");
    }

    #[test]
    fn test_should_preserve_route_case_in_target() {
        let r = route("Users", "Show", "");
        assert_eq!(check("/Users/Show/", &r, DEFAULT).target, "/Users/Show");
    }

    #[test]
    fn test_should_reach_fixed_point_after_redirect() {
        let uris = [
            "/",
            "/about",
            "/default_page/about/",
            "/users/show/?a=1&b=2",
            "/ users / show ",
            "/Users/Show?",
            "/foo/",
        ];
        for uri in uris {
            let first = resolve(uri, DEFAULT).unwrap();
            let decision = check(uri, &first, DEFAULT);
            let canonical = if decision.should_redirect {
                decision.target
            } else {
                uri.to_owned()
            };

            let second = resolve(&canonical, DEFAULT).unwrap();
            assert_eq!(first, second, "route changed for {uri}");
            assert!(
                !check(&canonical, &second, DEFAULT).should_redirect,
                "canonical form {canonical} of {uri} still redirects"
            );
        }
    }

    #[test]
    fn test_should_round_trip_ideal_uri_for_non_default_controller() {
        let routes = [
            route("users", "show", ""),
            route("Users", "Show", "id=1&x[]=2"),
            route("blog_posts", "index", "page=2"),
        ];
        for r in routes {
            let uri = ideal_uri(&r, DEFAULT);
            assert_eq!(resolve(&uri, DEFAULT).unwrap(), r, "round trip failed for {uri}");
        }
    }

    #[test]
    fn test_should_pick_redirect_status() {
        assert_eq!(redirect_status(301, false), http::StatusCode::MOVED_PERMANENTLY);
        assert_eq!(redirect_status(307, false), http::StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(redirect_status(302, false), http::StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(redirect_status(200, false), http::StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(redirect_status(301, true), http::StatusCode::SEE_OTHER);
        assert_eq!(redirect_status(307, true), http::StatusCode::SEE_OTHER);
    }

    #[test]
    fn test_should_carry_settled_status_in_decision() {
        let r = route("users", "show", "");
        let uri = "/users/show/";

        let decision = decide(uri, &r, DEFAULT, 301, false);
        assert_eq!(decision.status_code, http::StatusCode::MOVED_PERMANENTLY);

        let decision = decide(uri, &r, DEFAULT, 307, false);
        assert!(decision.should_redirect);
        assert_eq!(decision.target, "/users/show");
        assert_eq!(decision.status_code, http::StatusCode::TEMPORARY_REDIRECT);

        let decision = decide(uri, &r, DEFAULT, 307, true);
        assert_eq!(decision.status_code, http::StatusCode::SEE_OTHER);

        assert!(!decide("/users/show", &r, DEFAULT, 307, true).should_redirect);
    }
}
