//! Folder discovery and project tree integration tests.

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use crate::{cleanup_folder, client, get, test_folder, upload};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_discover_nested_folders() {
        let client = client();
        let root = test_folder("folders");
        upload(&client, &format!("{root}trip/day1/beach.jpg"), b"jpeg").await.expect("upload");

        let body: Value = get(&client, "/list-folders")
            .await
            .expect("list folders")
            .json()
            .await
            .expect("json body");

        let folders: Vec<&str> = body["folders"]
            .as_array()
            .expect("folders array")
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert!(folders.contains(&root.as_str()));
        assert!(folders.contains(&format!("{root}trip/").as_str()));
        assert!(folders.contains(&format!("{root}trip/day1/").as_str()));

        cleanup_folder(&client, &root).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_build_project_tree() {
        let client = client();
        let root = test_folder("tree");
        upload(&client, &format!("{root}b/x.txt"), b"x").await.expect("upload");
        upload(&client, &format!("{root}a/y.txt"), b"y").await.expect("upload");

        let body: Value = get(&client, "/project-tree")
            .await
            .expect("project tree")
            .json()
            .await
            .expect("json body");

        let name = root.trim_end_matches('/');
        let node = body["tree"]
            .as_array()
            .expect("tree array")
            .iter()
            .find(|n| n["name"] == name)
            .expect("test folder node");
        assert_eq!(node["depth"], 0);
        assert_eq!(node["children"][0]["name"], "a");
        assert_eq!(node["children"][1]["name"], "b");
        assert_eq!(node["children"][1]["depth"], 1);

        cleanup_folder(&client, &root).await;
    }
}
