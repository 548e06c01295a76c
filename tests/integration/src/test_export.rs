//! URL export integration tests.

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::{cleanup_folder, client, post_json, test_folder, upload};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_export_folder_urls() {
        let client = client();
        let root = test_folder("export");
        upload(&client, &format!("{root}one.jpg"), b"1").await.expect("upload");
        upload(&client, &format!("{root}two words.jpg"), b"2").await.expect("upload");

        let body: Value = post_json(
            &client,
            "/export-urls",
            &json!({ "domain": "https://cdn.example.com/", "items": [root.clone()] }),
        )
        .await
        .expect("export")
        .json()
        .await
        .expect("json body");

        assert_eq!(
            body["urls"],
            json!([
                format!("https://cdn.example.com/{root}one.jpg"),
                format!("https://cdn.example.com/{root}two%20words.jpg"),
            ])
        );

        cleanup_folder(&client, &root).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_blank_domain() {
        let resp = post_json(&client(), "/export-urls", &json!({ "domain": " ", "items": [] }))
            .await
            .expect("export");
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    }
}
