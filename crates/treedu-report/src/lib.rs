//! Text rendering of a finished file tree.
//!
//! The renderer is a pure consumer: it sorts and truncates its own view of
//! each child list and never mutates the walker's tree. Rendering is
//! iterative (explicit stack of child iterators), so arbitrarily deep
//! trees cannot overflow the call stack.

use std::cmp::Reverse;

use derive_builder::Builder;
use humansize::{format_size, BINARY, DECIMAL};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use treedu_core::{FileKind, FileNode, FileTree, NodeId};

/// Which size-suffix family to format with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SizeFormat {
    /// 1024-based suffixes (KiB, MiB, ...).
    #[default]
    Binary,
    /// 1000-based suffixes (kB, MB, ...).
    Decimal,
}

/// Display limits for one rendering pass.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into))]
pub struct RenderOptions {
    /// Maximum directory depth to descend while printing.
    #[builder(default = "10")]
    pub max_depth: usize,

    /// Per-directory fan-out limit; children beyond it are dropped after
    /// sorting by descending size.
    #[builder(default = "16")]
    pub per_dir_limit: usize,

    /// Size-suffix family.
    #[builder(default)]
    pub size_format: SizeFormat,
}

impl RenderOptions {
    /// Create a new render options builder.
    pub fn builder() -> RenderOptionsBuilder {
        RenderOptionsBuilder::default()
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_depth: 10,
            per_dir_limit: 16,
            size_format: SizeFormat::Binary,
        }
    }
}

/// Render the subtree under `root` as indented text.
pub fn render(tree: &FileTree, root: NodeId, options: &RenderOptions) -> String {
    let mut lines = Vec::new();
    let mut stack: Vec<std::vec::IntoIter<NodeId>> = Vec::new();
    let mut current = Some(root);

    while let Some(id) = current {
        let node = tree.node(id);
        lines.push(format!(
            "{}{}",
            "  ".repeat(stack.len()),
            pretty_file_string(node, options)
        ));

        if !node.children.is_empty() && stack.len() < options.max_depth {
            stack.push(visible_children(tree, node, options.per_dir_limit));
        }

        current = None;
        while let Some(iterator) = stack.last_mut() {
            match iterator.next() {
                Some(next) => {
                    current = Some(next);
                    break;
                }
                None => {
                    stack.pop();
                }
            }
        }
    }

    lines.join("\n")
}

/// Children sorted by descending size and truncated to `limit`, as a
/// fresh id list.
fn visible_children(tree: &FileTree, node: &FileNode, limit: usize) -> std::vec::IntoIter<NodeId> {
    node.children
        .iter()
        .copied()
        .sorted_by_key(|&child| Reverse(tree.node(child).size))
        .take(limit)
        .collect::<Vec<_>>()
        .into_iter()
}

/// One display line for a node: `/` prefix for directories, the final
/// path component, then a bracketed size or link/type annotation.
pub fn pretty_file_string(node: &FileNode, options: &RenderOptions) -> String {
    let mut line = String::new();

    if node.is_dir() || node.kind.links_to_dir() {
        line.push('/');
    }

    line.push_str(&node.name);
    line.push(' ');

    match node.kind {
        FileKind::Symlink { .. } => {
            line.push_str(&format!("[link {}]", node.resolved_path.display()));
        }
        FileKind::Other => line.push_str("[unknown type]"),
        FileKind::Unreadable => line.push_str("[unreadable]"),
        FileKind::RegularFile | FileKind::Directory => {
            line.push_str(&format!("[{}]", human_size(node.size, options.size_format)));
        }
    }

    line
}

fn human_size(size: u64, format: SizeFormat) -> String {
    match format {
        SizeFormat::Binary => format_size(size, BINARY),
        SizeFormat::Decimal => format_size(size, DECIMAL),
    }
}
