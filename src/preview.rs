use crate::vfs::VirtualFS;
use colored::Colorize;
use std::path::{Component, Path};

/// Represents a node in the tree (either file or directory).
#[derive(Debug)]
struct TreeNode {
    name: String,
    children: Vec<TreeNode>,
    is_file: bool,
}
impl TreeNode {
    fn new(name: String, is_file: bool) -> Self {
        Self {
            name,
            children: Vec::new(),
            is_file,
        }
    }

    /// Walks `segments` below this node, creating missing directories on the way.
    fn insert(&mut self, segments: &[String], is_file: bool) {
        let Some((head, rest)) = segments.split_first() else {
            return;
        };

        let index = match self.children.iter().position(|child| &child.name == head) {
            Some(index) => index,
            None => {
                let leaf = rest.is_empty() && is_file;
                self.children.push(TreeNode::new(head.clone(), leaf));
                self.children.len() - 1
            }
        };

        self.children[index].insert(rest, is_file);
    }
}

fn build_tree(vfs: &VirtualFS, root: &Path) -> TreeNode {
    let mut tree = TreeNode::new(root.display().to_string(), false);

    for entry in &vfs.entries {
        let segments: Vec<String> = entry
            .destination
            .components()
            .filter_map(|component| match component {
                Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        tree.insert(&segments, entry.is_file());
    }

    tree
}

fn render_node(node: &TreeNode, prefix: &str, is_last: bool, out: &mut String) {
    let connector = if is_last { "└── " } else { "├── " };
    let name = if node.is_file {
        node.name.green()
    } else {
        node.name.blue()
    };
    out.push_str(&format!("{}{}{}\n", prefix, connector.yellow(), name));

    let child_prefix = if is_last {
        format!("{prefix}    ")
    } else {
        format!("{prefix}│   ")
    };

    let len = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        render_node(child, &child_prefix, i + 1 == len, out);
    }
}

/// Renders the staged entries as an ASCII tree rooted at `root`.
pub fn render_tree(vfs: &VirtualFS, root: &Path) -> String {
    let tree = build_tree(vfs, root);
    let mut out = String::new();

    render_node(&tree, "", true, &mut out);

    out
}

pub fn preview_as_tree(vfs: &VirtualFS, root: &Path) {
    println!(
        "Legend: {} = (directory), {} = (file)",
        "blue".blue(),
        "green".green()
    );

    println!(
        "{} {}\n",
        "┌─".bold().bright_blue(),
        "Dry run, nothing was written".bold().bright_blue(),
    );

    print!("{}", render_tree(vfs, root));
}
