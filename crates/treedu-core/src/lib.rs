//! Core types for treedu.
//!
//! This crate provides the fundamental data structures shared by the
//! treedu workspace: the arena-backed file tree, node and error types,
//! and scan configuration.

mod config;
mod error;
mod node;
mod tree;

pub use config::{WalkConfig, WalkConfigBuilder};
pub use error::{ErrorKind, ScanError, TreeBuildError};
pub use node::{node_name, FileKind, FileNode, LinkResolution, NodeId};
pub use tree::{DepthFirstIter, FileTree, TreeStats};
