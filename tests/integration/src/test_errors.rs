//! Error reporting integration tests.

#[cfg(test)]
mod tests {
    use crate::{get, service};

    #[tokio::test]
    async fn test_should_answer_unknown_controller_with_404() {
        let response = get(&service(), "/nobody/index").await;
        assert_eq!(response.status, http::StatusCode::NOT_FOUND);
        assert_eq!(response.header("content-type"), "text/html; charset=utf-8");
        assert!(String::from_utf8_lossy(&response.body).contains("404 Not Found"));
    }

    #[tokio::test]
    async fn test_should_answer_unknown_operation_with_404() {
        let response = get(&service(), "/user_accounts/delete").await;
        assert_eq!(response.status, http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_should_hide_non_public_and_static_operations() {
        let svc = service();
        for uri in ["/privateMethod", "/protectedMethod", "/staticMethod"] {
            let response = get(&svc, uri).await;
            assert_eq!(response.status, http::StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_should_answer_rejected_casing_with_404() {
        let response = get(&service(), "/user__accounts/show").await;
        assert_eq!(response.status, http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_should_answer_invalid_tokens_with_500() {
        let svc = service();
        for uri in ["/1abc/index", "/a-b", "/user_accounts/a/b"] {
            let response = get(&svc, uri).await;
            assert_eq!(response.status, http::StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_should_answer_asterisk_uri_with_500() {
        let response = get(&service(), "*").await;
        assert_eq!(response.status, http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_should_answer_controller_contract_violation_with_500() {
        let response = get(&service(), "/broken/show").await;
        assert_eq!(response.status, http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_should_hide_operation_error_details() {
        let response = get(&service(), "/throwException").await;
        assert_eq!(response.status, http::StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!String::from_utf8_lossy(&response.body).contains("Just an error"));
    }
}
