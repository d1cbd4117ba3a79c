//! Routing integration tests.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{get, service};

    #[tokio::test]
    async fn test_should_route_root_to_default_index() {
        let response = get(&service(), "/").await;
        assert_eq!(response.status, http::StatusCode::OK);
        assert_eq!(response.json()["operation"], "index");
    }

    #[tokio::test]
    async fn test_should_route_short_form_to_default_controller() {
        let response = get(&service(), "/methodWithParams").await;
        assert_eq!(response.status, http::StatusCode::OK);
        assert_eq!(response.json()["operation"], "methodWithParams");
    }

    #[tokio::test]
    async fn test_should_route_full_form_to_named_controller() {
        let response = get(&service(), "/user_accounts/show?id=9").await;
        assert_eq!(response.status, http::StatusCode::OK);
        assert_eq!(
            response.json(),
            json!({"operation": "show", "method": "GET", "args": ["9"]})
        );
    }

    #[tokio::test]
    async fn test_should_accept_full_form_for_default_controller() {
        let response = get(&service(), "/home/index").await;
        assert_eq!(response.status, http::StatusCode::OK);
    }

    #[tokio::test]
    async fn test_should_match_operation_names_ignoring_case() {
        let response = get(&service(), "/user_accounts/SHOW?id=1").await;
        assert_eq!(response.status, http::StatusCode::OK);
        assert_eq!(response.json()["operation"], "show");
    }

    #[tokio::test]
    async fn test_should_tag_every_response() {
        let svc = service();
        for uri in ["/", "/home/index/", "/missing/page", "no-slash"] {
            let response = get(&svc, uri).await;
            assert_eq!(response.header("server"), "Frontdesk", "{uri}");
            assert_eq!(response.header("x-request-id").len(), 36, "{uri}");
        }
    }
}
