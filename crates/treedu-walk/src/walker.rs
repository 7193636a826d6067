//! Depth-first tree walker with an explicit frame stack.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use treedu_core::{FileKind, FileNode, FileTree, NodeId, ScanError, TreeBuildError, TreeStats};

use crate::resolver::{self, EntryRecord};
use crate::visitor::{Fallback, FileVisitor, NextAction};

/// Everything one completed walk produced.
#[derive(Debug)]
pub struct WalkOutcome {
    /// Arena holding every discovered node.
    pub tree: FileTree,
    /// Id of the root node.
    pub root: NodeId,
    /// Suppressed per-entry errors, in encounter order.
    pub errors: Vec<TreeBuildError>,
    /// Traversal statistics.
    pub stats: TreeStats,
}

/// One directory currently being enumerated.
struct DirFrame {
    id: NodeId,
    path: PathBuf,
    entries: fs::ReadDir,
}

enum Step {
    Entry(PathBuf),
    Failed(io::Error),
    Exhausted,
}

/// Sequential depth-first walker.
///
/// Traversal is pre-order for directories, siblings in OS listing order,
/// driven by an explicit stack so depth is bounded by memory rather than
/// the call stack. Per-entry failures are appended to the walker-owned
/// error list and surfaced through the visitor's error hooks; only a root
/// that cannot be statted fails the walk.
pub struct TreeWalker {
    tree: FileTree,
    errors: Vec<TreeBuildError>,
    stats: TreeStats,
    stack: Vec<DirFrame>,
}

impl TreeWalker {
    /// Walk `root`, driving `visitor` for every discovered entry.
    pub fn walk<V: FileVisitor>(root: &Path, visitor: &mut V) -> Result<WalkOutcome, ScanError> {
        // The one fatal case: the root itself cannot be statted.
        fs::symlink_metadata(root).map_err(|err| ScanError::root_io(root, err))?;

        let mut walker = Self {
            tree: FileTree::new(),
            errors: Vec::new(),
            stats: TreeStats::new(),
            stack: Vec::new(),
        };

        let root_id = walker.visit_entry(root, None, 0, visitor);
        walker.run(visitor);

        Ok(WalkOutcome {
            tree: walker.tree,
            root: root_id,
            errors: walker.errors,
            stats: walker.stats,
        })
    }

    fn run<V: FileVisitor>(&mut self, visitor: &mut V) {
        loop {
            let step = match self.stack.last_mut() {
                None => break,
                Some(frame) => match frame.entries.next() {
                    None => Step::Exhausted,
                    Some(Ok(entry)) => Step::Entry(entry.path()),
                    Some(Err(err)) => Step::Failed(err),
                },
            };

            match step {
                Step::Entry(path) => {
                    let parent = self.stack.last().map(|frame| frame.id);
                    let depth = self.stack.len() as u32;
                    self.visit_entry(&path, parent, depth, visitor);
                }
                Step::Failed(err) => {
                    let dir_path = self
                        .stack
                        .last()
                        .map(|frame| frame.path.clone())
                        .unwrap_or_default();
                    self.errors
                        .push(TreeBuildError::path_error(Some(&dir_path), &err));
                    if visitor.path_error(Some(&dir_path), &err) == NextAction::Stop {
                        self.leave_directory(visitor);
                    }
                }
                Step::Exhausted => self.leave_directory(visitor),
            }
        }
    }

    fn leave_directory<V: FileVisitor>(&mut self, visitor: &mut V) {
        if let Some(frame) = self.stack.pop() {
            visitor.post_visit_directory(&mut self.tree, frame.id);
        }
    }

    /// Classify one path, add its node, and dispatch the visitor.
    fn visit_entry<V: FileVisitor>(
        &mut self,
        path: &Path,
        parent: Option<NodeId>,
        depth: u32,
        visitor: &mut V,
    ) -> NodeId {
        let record = self.resolve(path, visitor);
        let id = self.add_node(record, parent, depth);

        if self.tree.node(id).is_traversable() {
            if visitor.pre_visit_directory(&mut self.tree, id) == NextAction::Continue {
                self.enter_directory(path, id, visitor);
            }
        } else {
            visitor.visit_file(&mut self.tree, id);
        }
        id
    }

    fn enter_directory<V: FileVisitor>(&mut self, path: &Path, id: NodeId, visitor: &mut V) {
        match fs::read_dir(path) {
            Ok(entries) => self.stack.push(DirFrame {
                id,
                path: path.to_path_buf(),
                entries,
            }),
            Err(err) => {
                // The directory stays in the tree as a childless node.
                self.errors.push(TreeBuildError::path_error(Some(path), &err));
                visitor.path_error(Some(path), &err);
            }
        }
    }

    /// Resolve a real path for `path`, consulting the visitor's fallback
    /// hook when the strict no-follow lookup fails.
    fn resolve<V: FileVisitor>(&mut self, path: &Path, visitor: &mut V) -> EntryRecord {
        let real = match resolver::real_path_nofollow(path) {
            Ok(real) => real,
            Err(err) => {
                self.errors.push(TreeBuildError::resolution_error(path, &err));
                match visitor.real_path_error(path, &err) {
                    Fallback::TryOther => match resolver::real_path_follow(path) {
                        Ok(real) => real,
                        Err(retry_err) => {
                            self.errors
                                .push(TreeBuildError::resolution_error(path, &retry_err));
                            return resolver::unreadable(path, path.to_path_buf());
                        }
                    },
                    Fallback::Skip => return resolver::unreadable(path, path.to_path_buf()),
                }
            }
        };
        resolver::classify(path, real, &mut self.errors)
    }

    fn add_node(&mut self, record: EntryRecord, parent: Option<NodeId>, depth: u32) -> NodeId {
        match record.kind {
            FileKind::RegularFile => self.stats.record_file(record.size, depth),
            FileKind::Directory => self.stats.record_dir(record.size, depth),
            FileKind::Symlink { .. } => self.stats.record_symlink(record.size, depth),
            FileKind::Other | FileKind::Unreadable => self.stats.record_other(depth),
        }

        let mut node = FileNode::new(
            self.tree.next_id(),
            record.kind,
            record.size,
            record.original_path,
            record.resolved_path,
        );
        node.parent = parent;
        self.tree.push(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    /// Visitor that records the hook sequence without attaching anything.
    #[derive(Default)]
    struct RecordingVisitor {
        events: Vec<String>,
    }

    impl FileVisitor for RecordingVisitor {
        fn visit_file(&mut self, tree: &mut FileTree, id: NodeId) {
            self.events.push(format!("file:{}", tree.node(id).name));
        }

        fn pre_visit_directory(&mut self, tree: &mut FileTree, id: NodeId) -> NextAction {
            self.events.push(format!("pre:{}", tree.node(id).name));
            NextAction::Continue
        }

        fn post_visit_directory(&mut self, tree: &mut FileTree, id: NodeId) {
            self.events.push(format!("post:{}", tree.node(id).name));
        }
    }

    fn fixture() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir(root.join("sub")).unwrap();
        File::create(root.join("a.txt"))
            .unwrap()
            .write_all(b"aaaa")
            .unwrap();
        File::create(root.join("sub/b.txt"))
            .unwrap()
            .write_all(b"bb")
            .unwrap();
        temp
    }

    #[test]
    fn test_pre_and_post_bracket_directories() {
        let temp = fixture();
        let mut visitor = RecordingVisitor::default();
        let outcome = TreeWalker::walk(temp.path(), &mut visitor).unwrap();

        assert!(outcome.errors.is_empty());
        let root_name = outcome.tree.node(outcome.root).name.clone();
        assert_eq!(visitor.events.first().unwrap(), &format!("pre:{root_name}"));
        assert_eq!(visitor.events.last().unwrap(), &format!("post:{root_name}"));

        let pre_sub = visitor.events.iter().position(|e| e == "pre:sub").unwrap();
        let post_sub = visitor.events.iter().position(|e| e == "post:sub").unwrap();
        let b = visitor.events.iter().position(|e| e == "file:b.txt").unwrap();
        assert!(pre_sub < b && b < post_sub);
    }

    #[test]
    fn test_stop_from_pre_visit_skips_children() {
        struct StopAt<'a>(&'a str);
        impl FileVisitor for StopAt<'_> {
            fn visit_file(&mut self, _tree: &mut FileTree, _id: NodeId) {}
            fn pre_visit_directory(&mut self, tree: &mut FileTree, id: NodeId) -> NextAction {
                if tree.node(id).name == self.0 {
                    NextAction::Stop
                } else {
                    NextAction::Continue
                }
            }
        }

        let temp = fixture();
        let mut visitor = StopAt("sub");
        let outcome = TreeWalker::walk(temp.path(), &mut visitor).unwrap();

        let names: HashMap<String, NodeId> = outcome
            .tree
            .nodes()
            .map(|n| (n.name.to_string(), n.id))
            .collect();
        assert!(names.contains_key("sub"));
        assert!(!names.contains_key("b.txt"));
    }

    fn bare_walker() -> TreeWalker {
        TreeWalker {
            tree: FileTree::new(),
            errors: Vec::new(),
            stats: TreeStats::new(),
            stack: Vec::new(),
        }
    }

    /// Visitor that declines the fallback resolution strategy.
    #[derive(Default)]
    struct SkipResolution {
        consulted: bool,
    }

    impl FileVisitor for SkipResolution {
        fn visit_file(&mut self, _tree: &mut FileTree, _id: NodeId) {}
        fn pre_visit_directory(&mut self, _tree: &mut FileTree, _id: NodeId) -> NextAction {
            NextAction::Continue
        }
        fn real_path_error(&mut self, _path: &Path, _error: &io::Error) -> Fallback {
            self.consulted = true;
            Fallback::Skip
        }
    }

    #[test]
    fn test_skip_fallback_yields_unreadable_record() {
        let temp = TempDir::new().unwrap();
        // A missing parent component defeats the no-follow lookup.
        let path = temp.path().join("missing").join("leaf");

        let mut walker = bare_walker();
        let mut visitor = SkipResolution::default();
        let record = walker.resolve(&path, &mut visitor);

        assert!(visitor.consulted);
        assert_eq!(record.kind, FileKind::Unreadable);
        assert_eq!(record.size, 0);
        assert_eq!(record.original_path, path);
        assert_eq!(walker.errors.len(), 1);
        assert_eq!(walker.errors[0].kind, treedu_core::ErrorKind::PathResolution);
    }

    #[test]
    fn test_try_other_fallback_records_both_failures() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing").join("leaf");

        let mut walker = bare_walker();
        // Default hook retries with full link following, which also fails.
        let mut visitor = RecordingVisitor::default();
        let record = walker.resolve(&path, &mut visitor);

        assert_eq!(record.kind, FileKind::Unreadable);
        assert_eq!(record.size, 0);
        assert_eq!(walker.errors.len(), 2);
        assert!(walker
            .errors
            .iter()
            .all(|e| e.kind == treedu_core::ErrorKind::PathResolution));
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let temp = TempDir::new().unwrap();
        let mut visitor = RecordingVisitor::default();
        let err = TreeWalker::walk(&temp.path().join("absent"), &mut visitor).unwrap_err();
        assert!(matches!(err, ScanError::RootNotFound { .. }));
    }

    #[test]
    fn test_file_root_yields_single_node() {
        let temp = fixture();
        let mut visitor = RecordingVisitor::default();
        let outcome = TreeWalker::walk(&temp.path().join("a.txt"), &mut visitor).unwrap();
        assert_eq!(outcome.tree.len(), 1);
        assert_eq!(outcome.tree.node(outcome.root).size, 4);
        assert_eq!(outcome.stats.total_files, 1);
    }
}
