//! Folder browsing integration tests.

#[cfg(test)]
mod tests {
    use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
    use serde_json::Value;

    use crate::{cleanup_folder, client, get, test_folder, upload};

    fn list_path(prefix: &str, cursor: Option<&str>) -> String {
        let mut path = format!(
            "/list-objects?prefix={}",
            utf8_percent_encode(prefix, NON_ALPHANUMERIC)
        );
        if let Some(cursor) = cursor {
            path.push_str(&format!("&cursor={}", utf8_percent_encode(cursor, NON_ALPHANUMERIC)));
        }
        path
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_list_immediate_children() {
        let client = client();
        let root = test_folder("browse");
        upload(&client, &format!("{root}file.txt"), b"f").await.expect("upload");
        upload(&client, &format!("{root}sub/deep.txt"), b"d").await.expect("upload");

        let body: Value = get(&client, &list_path(&root, None))
            .await
            .expect("list objects")
            .json()
            .await
            .expect("json body");

        assert_eq!(body["objects"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["objects"][0]["key"], format!("{root}file.txt"));
        assert_eq!(body["objects"][0]["size"], 1);
        assert_eq!(body["delimitedPrefixes"][0], format!("{root}sub/"));

        cleanup_folder(&client, &root).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_page_large_folder() {
        let client = client();
        let root = test_folder("pages");
        let uploads = (0..150).map(|i| {
            let client = client.clone();
            let key = format!("{root}{i:03}.txt");
            async move { upload(&client, &key, b"p").await }
        });
        futures::future::try_join_all(uploads).await.expect("uploads");

        let mut seen = 0usize;
        let mut cursor: Option<String> = None;
        loop {
            let body: Value = get(&client, &list_path(&root, cursor.as_deref()))
                .await
                .expect("list objects")
                .json()
                .await
                .expect("json body");
            seen += body["objects"].as_array().map_or(0, Vec::len);
            match body["cursor"].as_str() {
                Some(next) => cursor = Some(next.to_owned()),
                None => break,
            }
        }
        assert_eq!(seen, 150);

        cleanup_folder(&client, &root).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_cursor_from_other_folder() {
        let client = client();
        let root = test_folder("cursor");
        let uploads = (0..120).map(|i| {
            let client = client.clone();
            let key = format!("{root}{i:03}.txt");
            async move { upload(&client, &key, b"c").await }
        });
        futures::future::try_join_all(uploads).await.expect("uploads");

        let body: Value = get(&client, &list_path(&root, None))
            .await
            .expect("first page")
            .json()
            .await
            .expect("json body");
        let cursor = body["cursor"].as_str().expect("truncated folder has cursor");

        let resp = get(&client, &list_path("elsewhere/", Some(cursor)))
            .await
            .expect("mismatched cursor");
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);

        cleanup_folder(&client, &root).await;
    }
}
