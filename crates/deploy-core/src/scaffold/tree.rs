//! Recursive directory-tree materialization

use crate::error::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// A node of the skeleton to materialize: exactly one of a directory with
/// named children, an empty directory, or a file with literal content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    Dir(BTreeMap<String, TreeNode>),
    EmptyDir,
    File(String),
}

impl TreeNode {
    pub fn file(content: &str) -> Self {
        TreeNode::File(content.to_string())
    }
}

/// Build a directory node from `(name, child)` pairs
pub fn dir(entries: impl IntoIterator<Item = (&'static str, TreeNode)>) -> TreeNode {
    TreeNode::Dir(
        entries
            .into_iter()
            .map(|(name, node)| (name.to_string(), node))
            .collect(),
    )
}

/// Create every directory and write every file described by `node` under
/// `root`, creating parents as needed.
///
/// Destructive and non-transactional: existing files are overwritten
/// silently, existing directories are merged into (siblings are never
/// deleted), and a mid-way failure leaves a partial tree behind. Callers
/// confirm with the user before invoking this on an existing destination.
pub fn materialize(root: &Path, node: &TreeNode) -> Result<()> {
    match node {
        TreeNode::Dir(children) => {
            fs::create_dir_all(root)?;
            for (name, child) in children {
                materialize(&root.join(name), child)?;
            }
        }
        TreeNode::EmptyDir => {
            fs::create_dir_all(root)?;
        }
        TreeNode::File(content) => {
            if let Some(parent) = root.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(root, content)?;
        }
    }
    Ok(())
}
