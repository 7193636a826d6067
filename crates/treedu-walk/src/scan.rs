//! Scan façade: one call from config to finished tree.

use std::time::{Duration, Instant};

use serde::Serialize;

use treedu_core::{FileNode, FileTree, NodeId, ScanError, TreeBuildError, TreeStats, WalkConfig};

use crate::assembler::TreeAssembler;
use crate::walker::TreeWalker;

/// Result of one completed scan: the tree, the suppressed errors, and
/// summary numbers. Performs no rendering.
#[derive(Debug, Serialize)]
pub struct ScanReport {
    /// Arena holding every discovered node.
    pub tree: FileTree,
    /// Id of the root node.
    pub root: NodeId,
    /// Suppressed per-entry errors, in encounter order.
    pub errors: Vec<TreeBuildError>,
    /// Traversal statistics.
    pub stats: TreeStats,
    /// Wall-clock duration of the walk.
    pub duration: Duration,
}

impl ScanReport {
    /// Whether any non-fatal error was recorded.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Borrow the root node.
    pub fn root_node(&self) -> &FileNode {
        self.tree.node(self.root)
    }
}

/// Orchestrates one complete scan with a fresh [`TreeAssembler`].
pub struct TreeScan;

impl TreeScan {
    /// Scan `config.root`, following links per the config.
    pub fn run(config: &WalkConfig) -> Result<ScanReport, ScanError> {
        let start = Instant::now();
        let mut assembler = TreeAssembler::new(config.follow_links);
        let outcome = TreeWalker::walk(&config.root, &mut assembler)?;

        Ok(ScanReport {
            tree: outcome.tree,
            root: outcome.root,
            errors: outcome.errors,
            stats: outcome.stats,
            duration: start.elapsed(),
        })
    }
}
