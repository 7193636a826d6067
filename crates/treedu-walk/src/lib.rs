//! Filesystem tree walker for treedu.
//!
//! This crate turns a raw filesystem subtree into an in-memory
//! [`FileTree`]: a sequential depth-first walker classifies every entry,
//! resolves symbolic links one hop, suppresses link cycles, and collects
//! structured errors instead of raising them.
//!
//! # Example
//!
//! ```rust,no_run
//! use treedu_walk::{TreeScan, WalkConfig};
//!
//! let config = WalkConfig::builder()
//!     .root("/path/to/scan")
//!     .follow_links(true)
//!     .build()
//!     .unwrap();
//! let report = TreeScan::run(&config).unwrap();
//!
//! println!("{} nodes", report.tree.len());
//! for error in &report.errors {
//!     eprintln!("{error}");
//! }
//! ```

mod assembler;
mod resolver;
mod scan;
mod visitor;
mod walker;

pub use assembler::TreeAssembler;
pub use scan::{ScanReport, TreeScan};
pub use visitor::{Fallback, FileVisitor, NextAction};
pub use walker::{TreeWalker, WalkOutcome};

// Re-export core types for convenience
pub use treedu_core::{
    ErrorKind, FileKind, FileNode, FileTree, LinkResolution, NodeId, ScanError, TreeBuildError,
    TreeStats, WalkConfig,
};
