//! Error response integration tests.

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use crate::{client, endpoint_url};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_unknown_binding() {
        let resp = client()
            .get(format!("{}/list-folders", endpoint_url()))
            .header("x-bucket-binding", "NO_SUCH_BINDING")
            .send()
            .await
            .expect("request");
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
        let body: Value = resp.json().await.expect("json body");
        assert_eq!(body["code"], "BindingNotFound");
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_require_object_key_header() {
        let resp = client()
            .post(format!("{}/upload-file", endpoint_url()))
            .header("x-bucket-binding", crate::test_binding())
            .body("data")
            .send()
            .await
            .expect("request");
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_return_404_for_unknown_path() {
        let resp = client()
            .get(format!("{}/list-cf-buckets", endpoint_url()))
            .send()
            .await
            .expect("request");
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
    }
}
