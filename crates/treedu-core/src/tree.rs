//! Arena-backed file tree container and statistics.

use serde::{Deserialize, Serialize};

use crate::node::{FileNode, NodeId};

/// Summary statistics for a scanned tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeStats {
    /// Sum of entry metadata sizes in bytes.
    pub total_size: u64,
    /// Total number of regular files.
    pub total_files: u64,
    /// Total number of directories.
    pub total_dirs: u64,
    /// Total number of symbolic links.
    pub total_symlinks: u64,
    /// Total number of unreadable entries.
    pub total_unreadable: u64,
    /// Maximum depth reached.
    pub max_depth: u32,
}

impl TreeStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update stats with a regular file entry.
    pub fn record_file(&mut self, size: u64, depth: u32) {
        self.total_files += 1;
        self.total_size += size;
        self.max_depth = self.max_depth.max(depth);
    }

    /// Record a directory.
    pub fn record_dir(&mut self, size: u64, depth: u32) {
        self.total_dirs += 1;
        self.total_size += size;
        self.max_depth = self.max_depth.max(depth);
    }

    /// Record a symlink.
    pub fn record_symlink(&mut self, size: u64, depth: u32) {
        self.total_symlinks += 1;
        self.total_size += size;
        self.max_depth = self.max_depth.max(depth);
    }

    /// Record an unreadable or untyped entry.
    pub fn record_other(&mut self, depth: u32) {
        self.total_unreadable += 1;
        self.max_depth = self.max_depth.max(depth);
    }
}

/// Arena holding every [`FileNode`] produced by one scan.
///
/// Nodes are created only during traversal and never removed; child lists
/// are append-only. Once the owning scan returns, the tree is read-only
/// from the caller's perspective.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileTree {
    nodes: Vec<FileNode>,
    root: Option<NodeId>,
}

impl FileTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next pushed node will receive.
    pub fn next_id(&self) -> NodeId {
        NodeId::new(self.nodes.len() as u64)
    }

    /// Append a node to the arena, returning its id. The first node pushed
    /// becomes the root.
    pub fn push(&mut self, node: FileNode) -> NodeId {
        debug_assert_eq!(node.id, self.next_id());
        let id = node.id;
        self.nodes.push(node);
        if self.root.is_none() {
            self.root = Some(id);
        }
        id
    }

    /// Root node id, if any node was pushed.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Borrow a node.
    pub fn node(&self, id: NodeId) -> &FileNode {
        &self.nodes[id.index()]
    }

    /// Mutably borrow a node.
    pub fn node_mut(&mut self, id: NodeId) -> &mut FileNode {
        &mut self.nodes[id.index()]
    }

    /// Append `child` to `parent`'s child list, in discovery order.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.index()].children.push(child);
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in arena order.
    pub fn nodes(&self) -> impl Iterator<Item = &FileNode> {
        self.nodes.iter()
    }

    /// Iterative pre-order traversal starting at `start`, yielding
    /// `(id, depth)`. Uses an explicit stack so arbitrarily deep trees
    /// cannot overflow the call stack. Children are yielded in their
    /// stored (discovery) order.
    pub fn iter_depth_first(&self, start: NodeId) -> DepthFirstIter<'_> {
        DepthFirstIter {
            tree: self,
            stack: vec![(start, 0)],
        }
    }
}

/// Iterator over a [`FileTree`] in pre-order, returned by
/// [`FileTree::iter_depth_first`].
#[derive(Debug)]
pub struct DepthFirstIter<'a> {
    tree: &'a FileTree,
    stack: Vec<(NodeId, u32)>,
}

impl Iterator for DepthFirstIter<'_> {
    type Item = (NodeId, u32);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.stack.pop()?;
        let node = self.tree.node(id);
        for &child in node.children.iter().rev() {
            self.stack.push((child, depth + 1));
        }
        Some((id, depth))
    }
}
