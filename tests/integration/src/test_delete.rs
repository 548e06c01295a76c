//! Bulk delete and key listing integration tests.

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::{client, post_json, test_folder, upload};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_list_keys_without_duplicates() {
        let client = client();
        let root = test_folder("keys");
        upload(&client, &format!("{root}a.txt"), b"a").await.expect("upload");
        upload(&client, &format!("{root}sub/b.txt"), b"b").await.expect("upload");

        let body: Value = post_json(
            &client,
            "/list-keys",
            &json!({ "prefixes": [root.clone(), format!("{root}sub/")] }),
        )
        .await
        .expect("list keys")
        .json()
        .await
        .expect("json body");

        assert_eq!(
            body["keys"],
            json!([format!("{root}a.txt"), format!("{root}sub/b.txt")])
        );

        post_json(&client, "/delete-objects", &json!({ "prefixes": [root] }))
            .await
            .expect("cleanup");
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_delete_folder_and_report_zero_on_repeat() {
        let client = client();
        let root = test_folder("delete");
        for name in ["1.txt", "2.txt", "nested/3.txt"] {
            upload(&client, &format!("{root}{name}"), b"d").await.expect("upload");
        }
        let request = json!({ "prefixes": [root.clone()], "keys": [format!("{root}1.txt")] });

        let first: Value = post_json(&client, "/delete-objects", &request)
            .await
            .expect("delete")
            .json()
            .await
            .expect("json body");
        assert_eq!(first["requested"], 3);
        assert_eq!(first["deleted"], 3);

        let second: Value = post_json(&client, "/delete-objects", &request)
            .await
            .expect("repeat delete")
            .json()
            .await
            .expect("json body");
        assert_eq!(second["deleted"], 0);
    }
}
