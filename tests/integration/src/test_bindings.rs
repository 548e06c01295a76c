//! Binding listing and health integration tests.

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use crate::{client, endpoint_url, test_binding};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_list_configured_bucket() {
        let client = client();
        let body: Value = client
            .get(format!("{}/buckets", endpoint_url()))
            .send()
            .await
            .expect("GET /buckets")
            .json()
            .await
            .expect("json body");

        let buckets = body["buckets"].as_array().expect("buckets array");
        assert!(buckets.iter().any(|b| b == &Value::from(test_binding())));
        assert!(body["debugEnvKeys"].is_array());
        assert!(body["version"].is_string());
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_report_healthy() {
        let resp = client()
            .get(format!("{}/health", endpoint_url()))
            .send()
            .await
            .expect("GET /health");
        assert!(resp.status().is_success());
        let body: Value = resp.json().await.expect("json body");
        assert_eq!(body["status"], "running");
    }
}
