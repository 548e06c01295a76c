//! Path tree builder.
//!
//! Turns an unordered list of folder prefixes into an ordered hierarchy for
//! navigation. Construction uses a flat arena of nodes plus a map from full
//! path to arena index; the map is dropped once the arena is folded into
//! owned [`ProjectTreeNode`]s, so the finished tree holds no shared
//! references.

use std::cmp::Ordering;
use std::collections::HashMap;

use bucketfs_core::FolderPrefix;
use serde::Serialize;

/// One folder in a project tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectTreeNode {
    /// Folder name (last segment).
    pub name: String,
    /// Full prefix from the bucket root, always ending in `/`.
    pub path: String,
    /// Zero-based depth; the root's direct children have depth 0.
    pub depth: usize,
    /// Sub-folders ordered by name.
    pub children: Vec<ProjectTreeNode>,
}

/// A folder hierarchy built from one listing snapshot.
///
/// # Examples
///
/// ```
/// use bucketfs_core::FolderPrefix;
/// use bucketfs_vfs::tree::ProjectTree;
///
/// let prefixes: Vec<FolderPrefix> = ["photos/", "photos/trip/", "docs/"]
///     .into_iter()
///     .map(|p| FolderPrefix::new(p).unwrap())
///     .collect();
/// let tree = ProjectTree::build(&prefixes);
///
/// let names: Vec<&str> = tree.roots().iter().map(|n| n.name.as_str()).collect();
/// assert_eq!(names, vec!["docs", "photos"]);
/// assert_eq!(tree.roots()[1].children[0].path, "photos/trip/");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProjectTree {
    roots: Vec<ProjectTreeNode>,
}

struct ArenaNode {
    name: String,
    path: String,
    depth: usize,
    children: Vec<usize>,
}

impl ProjectTree {
    /// Build the tree. Missing ancestors are synthesized and duplicate
    /// prefixes collapse into one node.
    #[must_use]
    pub fn build<'a, I>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = &'a FolderPrefix>,
    {
        let mut arena: Vec<ArenaNode> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut roots: Vec<usize> = Vec::new();

        for prefix in prefixes {
            let mut parent: Option<usize> = None;
            let mut path = String::with_capacity(prefix.as_str().len());
            for (depth, segment) in prefix.segments().into_iter().enumerate() {
                path.push_str(segment);
                path.push('/');
                let id = match index.get(&path) {
                    Some(&id) => id,
                    None => {
                        let id = arena.len();
                        arena.push(ArenaNode {
                            name: segment.to_owned(),
                            path: path.clone(),
                            depth,
                            children: Vec::new(),
                        });
                        index.insert(path.clone(), id);
                        match parent {
                            Some(p) => arena[p].children.push(id),
                            None => roots.push(id),
                        }
                        id
                    }
                };
                parent = Some(id);
            }
        }
        drop(index);

        let mut slots: Vec<Option<ArenaNode>> = arena.into_iter().map(Some).collect();
        let mut roots: Vec<ProjectTreeNode> =
            roots.into_iter().filter_map(|id| fold(&mut slots, id)).collect();
        roots.sort_by(by_name);
        Self { roots }
    }

    /// Top-level folders, ordered by name.
    #[must_use]
    pub fn roots(&self) -> &[ProjectTreeNode] {
        &self.roots
    }

    /// Whether the tree has no folders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of nodes at every depth.
    #[must_use]
    pub fn node_count(&self) -> usize {
        fn count(nodes: &[ProjectTreeNode]) -> usize {
            nodes.iter().map(|n| 1 + count(&n.children)).sum()
        }
        count(&self.roots)
    }

    /// Find the node whose full path is `path`.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&ProjectTreeNode> {
        let mut level = self.roots.as_slice();
        loop {
            let node = level.iter().find(|n| path.starts_with(n.path.as_str()))?;
            if node.path == path {
                return Some(node);
            }
            level = &node.children;
        }
    }
}

/// Move arena node `id` and its descendants into an owned subtree with
/// sorted children. Each slot is taken exactly once.
fn fold(slots: &mut [Option<ArenaNode>], id: usize) -> Option<ProjectTreeNode> {
    let node = slots.get_mut(id)?.take()?;
    let mut children: Vec<ProjectTreeNode> = node
        .children
        .into_iter()
        .filter_map(|child| fold(slots, child))
        .collect();
    children.sort_by(by_name);
    Some(ProjectTreeNode {
        name: node.name,
        path: node.path,
        depth: node.depth,
        children,
    })
}

/// Case-insensitive name order with a byte-wise tie break so the result
/// does not depend on input order.
fn by_name(a: &ProjectTreeNode, b: &ProjectTreeNode) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefixes(items: &[&str]) -> Vec<FolderPrefix> {
        items.iter().map(|p| FolderPrefix::new(*p).unwrap()).collect()
    }

    fn names(nodes: &[ProjectTreeNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn test_should_build_sorted_two_level_tree() {
        let tree = ProjectTree::build(&prefixes(&["photos/", "photos/trip/", "docs/"]));

        assert_eq!(names(tree.roots()), vec!["docs", "photos"]);
        assert!(tree.roots().iter().all(|n| n.depth == 0));
        let photos = &tree.roots()[1];
        assert_eq!(photos.children.len(), 1);
        assert_eq!(photos.children[0].name, "trip");
        assert_eq!(photos.children[0].depth, 1);
        assert_eq!(photos.children[0].path, "photos/trip/");
    }

    #[test]
    fn test_should_synthesize_missing_ancestors() {
        let tree = ProjectTree::build(&prefixes(&["a/b/c/"]));

        assert_eq!(tree.node_count(), 3);
        let a = &tree.roots()[0];
        assert_eq!((a.name.as_str(), a.path.as_str(), a.depth), ("a", "a/", 0));
        let b = &a.children[0];
        assert_eq!((b.name.as_str(), b.path.as_str(), b.depth), ("b", "a/b/", 1));
        let c = &b.children[0];
        assert_eq!((c.name.as_str(), c.path.as_str(), c.depth), ("c", "a/b/c/", 2));
        assert!(c.children.is_empty());
    }

    #[test]
    fn test_should_be_independent_of_input_order() {
        let ordered = ["a/", "a/b/", "a/b/c/", "b/", "b/a/", "C/", "c/", "a/z/"];
        let expected = ProjectTree::build(&prefixes(&ordered));

        let mut rotated = ordered.to_vec();
        for _ in 0..ordered.len() {
            rotated.rotate_left(3);
            assert_eq!(ProjectTree::build(&prefixes(&rotated)), expected);
            rotated.reverse();
            assert_eq!(ProjectTree::build(&prefixes(&rotated)), expected);
        }
    }

    #[test]
    fn test_should_collapse_duplicate_prefixes() {
        let tree = ProjectTree::build(&prefixes(&["a/b/", "a/", "a/b/", "a/"]));
        assert_eq!(tree.node_count(), 2);
    }

    #[test]
    fn test_should_keep_same_name_at_different_depths_apart() {
        let tree = ProjectTree::build(&prefixes(&["x/", "y/x/", "x/x/"]));

        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.find("y/x/").map(|n| n.depth), Some(1));
        assert_eq!(tree.find("x/x/").map(|n| n.depth), Some(1));
        assert_eq!(tree.find("x/").map(|n| n.children.len()), Some(1));
    }

    #[test]
    fn test_should_sort_case_insensitively() {
        let tree = ProjectTree::build(&prefixes(&["beta/", "Alpha/", "alpha/", "Gamma/"]));
        assert_eq!(names(tree.roots()), vec!["Alpha", "alpha", "beta", "Gamma"]);
    }

    #[test]
    fn test_should_build_empty_tree() {
        let tree = ProjectTree::build(&Vec::<FolderPrefix>::new());
        assert!(tree.is_empty());
        assert_eq!(tree.node_count(), 0);
        assert!(tree.find("a/").is_none());
    }

    #[test]
    fn test_should_serialize_nodes() {
        let tree = ProjectTree::build(&prefixes(&["a/b/"]));
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json[0]["name"], "a");
        assert_eq!(json[0]["children"][0]["path"], "a/b/");
        assert_eq!(json[0]["children"][0]["depth"], 1);
    }
}
