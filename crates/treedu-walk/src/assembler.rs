//! Default visitor: wires nodes into the tree and suppresses link cycles.

use std::collections::HashSet;
use std::path::PathBuf;

use treedu_core::{FileTree, NodeId};

use crate::visitor::{FileVisitor, NextAction};

/// Visitor that builds the parent/child structure.
///
/// Owns the per-walk set of resolved paths already descended into; the set
/// never outlives one scan, so independent scans cannot interfere. A link
/// whose target is already in the set attaches as a leaf instead of being
/// re-expanded, which bounds traversal on any symlink cycle.
pub struct TreeAssembler {
    follow_links: bool,
    visited: HashSet<PathBuf>,
}

impl TreeAssembler {
    /// Create an assembler for one walk.
    pub fn new(follow_links: bool) -> Self {
        Self {
            follow_links,
            visited: HashSet::new(),
        }
    }

    fn attach_to_parent(tree: &mut FileTree, id: NodeId) {
        if let Some(parent) = tree.node(id).parent {
            tree.append_child(parent, id);
        }
    }
}

impl FileVisitor for TreeAssembler {
    fn visit_file(&mut self, tree: &mut FileTree, id: NodeId) {
        Self::attach_to_parent(tree, id);
    }

    fn pre_visit_directory(&mut self, tree: &mut FileTree, id: NodeId) -> NextAction {
        let node = tree.node(id);

        if node.is_link() && !self.follow_links {
            Self::attach_to_parent(tree, id);
            return NextAction::Stop;
        }

        // A directory can only reappear through a link path; whichever
        // edge reaches the target second records the edge, not the subtree.
        if self.visited.contains(&node.resolved_path) {
            Self::attach_to_parent(tree, id);
            return NextAction::Stop;
        }

        self.visited.insert(node.resolved_path.clone());
        Self::attach_to_parent(tree, id);
        NextAction::Continue
    }
}
