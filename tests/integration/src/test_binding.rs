//! Parameter binding integration tests.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{get, post_form, service};

    #[tokio::test]
    async fn test_should_bind_parameters_in_declaration_order() {
        let response = get(&service(), "/methodWithParams?data=test&userId=321").await;
        assert_eq!(response.json()["args"], json!(["321", ["test"], 123]));
    }

    #[tokio::test]
    async fn test_should_fill_missing_parameters() {
        let response = get(&service(), "/methodWithParams").await;
        assert_eq!(response.json()["args"], json!([null, [], 123]));
    }

    #[tokio::test]
    async fn test_should_bind_bracket_lists_and_maps() {
        let svc = service();
        let response = get(&svc, "/methodWithParams?data[]=a&data[]=b&withDefault=7").await;
        assert_eq!(response.json()["args"], json!([null, ["a", "b"], "7"]));

        let response = get(&svc, "/methodWithParams?data[x]=1&data[y]=2").await;
        assert_eq!(response.json()["args"][1], json!({"x": "1", "y": "2"}));
    }

    #[tokio::test]
    async fn test_should_decode_query_values() {
        let response = get(&service(), "/user_accounts/show?id=a+b%2Fc").await;
        assert_eq!(response.json()["args"], json!(["a b/c"]));
    }

    #[tokio::test]
    async fn test_should_prefer_form_values_over_query() {
        let response = post_form(&service(), "/methodWithParams?userId=1&data=q", "userId=2").await;
        assert_eq!(response.status, http::StatusCode::OK);
        let body = response.json();
        assert_eq!(body["method"], "POST");
        assert_eq!(body["args"], json!(["2", ["q"], 123]));
    }

    #[tokio::test]
    async fn test_should_drop_over_nested_form_keys() {
        let svc = service();
        let form = format!("data{}=x&userId=7", "[]".repeat(200_000));
        let response = post_form(&svc, "/methodWithParams", &form).await;
        assert_eq!(response.status, http::StatusCode::OK);
        assert_eq!(response.json()["args"], json!(["7", [], 123]));

        let uri = format!("/methodWithParams?data{}=x", "[]".repeat(1_000));
        let response = get(&svc, &uri).await;
        assert_eq!(response.status, http::StatusCode::OK);
        assert_eq!(response.json()["args"], json!([null, [], 123]));
    }
}
