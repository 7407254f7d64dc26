//! Directory tree rendering from a flat list of `/`-separated paths.
//!
//! ```text
//! ├── a
//! │   └── b.ts
//! └── d.ts
//! ```
//!
//! Children are ordered by byte-wise name comparison at every level, so the
//! output does not depend on the order of the input list.

use std::collections::BTreeMap;

use crate::models::FlatFile;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    File,
    Directory(BTreeMap<String, TreeNode>),
}

impl TreeNode {
    pub fn root() -> Self {
        TreeNode::Directory(BTreeMap::new())
    }

    /// Inserts a path, creating intermediate directories. A name that is
    /// already a directory stays one even if a file path ends on it.
    pub fn insert(&mut self, path: &str) {
        let mut current = self;
        let mut parts = path.split('/').filter(|p| !p.is_empty()).peekable();

        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if let TreeNode::File = current {
                *current = TreeNode::root();
            }
            let TreeNode::Directory(children) = current else {
                unreachable!("file nodes are promoted to directories above");
            };

            current = children.entry(part.to_string()).or_insert_with(|| {
                if is_leaf {
                    TreeNode::File
                } else {
                    TreeNode::root()
                }
            });
        }
    }

    fn children(&self) -> Option<&BTreeMap<String, TreeNode>> {
        match self {
            TreeNode::Directory(children) if !children.is_empty() => Some(children),
            _ => None,
        }
    }

    fn format_into(&self, prefix: &str, lines: &mut Vec<String>) {
        let Some(children) = self.children() else {
            return;
        };

        let count = children.len();
        for (index, (name, child)) in children.iter().enumerate() {
            let is_last = index == count - 1;
            let connector = if is_last { LAST_BRANCH } else { BRANCH };
            lines.push(format!("{}{}{}", prefix, connector, name));

            let extension = if is_last { SPACE } else { PIPE };
            child.format_into(&format!("{}{}", prefix, extension), lines);
        }
    }
}

pub fn build_tree(files: &[FlatFile]) -> TreeNode {
    let mut root = TreeNode::root();
    for file in files {
        root.insert(&file.path);
    }
    root
}

pub fn render(files: &[FlatFile]) -> String {
    let mut lines = Vec::new();
    build_tree(files).format_into("", &mut lines);
    lines.join("\n")
}
