//! CORS integration tests.

#[cfg(test)]
mod tests {
    use crate::{client, endpoint_url};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_answer_preflight() {
        let resp = client()
            .request(reqwest::Method::OPTIONS, format!("{}/upload-file", endpoint_url()))
            .header("origin", "https://app.example.com")
            .header("access-control-request-method", "POST")
            .send()
            .await
            .expect("preflight");

        assert_eq!(resp.status(), reqwest::StatusCode::NO_CONTENT);
        let headers = resp.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert!(
            headers["access-control-allow-methods"]
                .to_str()
                .unwrap()
                .contains("POST")
        );
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_tag_responses_with_request_id() {
        let resp = client()
            .get(format!("{}/health", endpoint_url()))
            .send()
            .await
            .expect("health");
        assert!(resp.headers().contains_key("x-request-id"));
        assert_eq!(resp.headers()["access-control-allow-origin"], "*");
    }
}
