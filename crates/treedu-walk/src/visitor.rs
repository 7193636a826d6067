//! Visitor protocol driven by the tree walker.

use std::io;
use std::path::Path;

use treedu_core::{FileTree, NodeId};

/// Flow decision returned from pre-visit and path-error hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAction {
    /// Keep going: descend into the directory / keep scanning siblings.
    Continue,
    /// Treat the directory as a leaf / give up on the branch.
    Stop,
}

/// Decision returned from the real-path error hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Retry resolution with full link following.
    TryOther,
    /// Accept the failure; the entry becomes unreadable.
    Skip,
}

/// Callbacks invoked by [`crate::TreeWalker`] as it discovers entries.
///
/// The walker owns the tree arena while walking and lends it to each hook;
/// visitors wire parent/child edges and decide descent, nothing else.
pub trait FileVisitor {
    /// A non-traversable entry (file, non-directory link, unreadable).
    /// Terminal for that entry.
    fn visit_file(&mut self, tree: &mut FileTree, id: NodeId);

    /// A traversable entry, before its children are enumerated.
    /// [`NextAction::Stop`] attaches it as a leaf.
    fn pre_visit_directory(&mut self, tree: &mut FileTree, id: NodeId) -> NextAction;

    /// A traversable entry, after all of its children were visited. Not
    /// invoked for directories that were stopped or failed to enumerate.
    fn post_visit_directory(&mut self, _tree: &mut FileTree, _id: NodeId) {}

    /// Failure listing or statting an entry. [`NextAction::Continue`]
    /// keeps scanning the remaining siblings.
    fn path_error(&mut self, _path: Option<&Path>, _error: &io::Error) -> NextAction {
        NextAction::Continue
    }

    /// Failure of the strict no-follow real-path lookup.
    /// [`Fallback::TryOther`] retries with full link following.
    fn real_path_error(&mut self, _path: &Path, _error: &io::Error) -> Fallback {
        Fallback::TryOther
    }
}
