//! Canonical URI redirect integration tests.

#[cfg(test)]
mod tests {
    use crate::{get, post_form, service, service_with_redirect};

    #[tokio::test]
    async fn test_should_redirect_default_controller_to_short_form() {
        let response = get(&service(), "/home/methodWithParams/?userId=1").await;
        assert_eq!(response.status, http::StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.header("location"), "/methodWithParams?userId=1");
        assert_eq!(response.header("cache-control"), "no-cache");
        assert!(response.body.is_empty());
    }

    #[tokio::test]
    async fn test_should_redirect_trailing_slash() {
        let response = get(&service(), "/user_accounts/show/?id=2").await;
        assert_eq!(response.status, http::StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.header("location"), "/user_accounts/show?id=2");
    }

    #[tokio::test]
    async fn test_should_redirect_bare_controller_segment() {
        let response = get(&service(), "/user_accounts/").await;
        assert_eq!(response.status, http::StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.header("location"), "/user_accounts/user_accounts");
    }

    #[tokio::test]
    async fn test_should_redirect_empty_query_marker() {
        let response = get(&service(), "/user_accounts/show?").await;
        assert_eq!(response.status, http::StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.header("location"), "/user_accounts/show");
    }

    #[tokio::test]
    async fn test_should_land_on_canonical_uri_after_redirect() {
        let svc = service();
        let first = get(&svc, "/home/index/").await;
        assert_eq!(first.status, http::StatusCode::MOVED_PERMANENTLY);

        let second = get(&svc, first.header("location")).await;
        assert_eq!(second.status, http::StatusCode::OK);
        assert_eq!(second.json()["operation"], "index");
    }

    #[tokio::test]
    async fn test_should_honor_temporary_redirect_status() {
        let response = get(&service_with_redirect(307), "/home/index/").await;
        assert_eq!(response.status, http::StatusCode::TEMPORARY_REDIRECT);
    }

    #[tokio::test]
    async fn test_should_fall_back_to_temporary_redirect() {
        let response = get(&service_with_redirect(302), "/home/index/").await;
        assert_eq!(response.status, http::StatusCode::TEMPORARY_REDIRECT);
    }

    #[tokio::test]
    async fn test_should_answer_form_posts_with_see_other() {
        let response = post_form(&service(), "/home/index/", "a=1").await;
        assert_eq!(response.status, http::StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), "/index");
    }
}
