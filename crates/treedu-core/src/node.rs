//! File and directory node types.

use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Unique identifier for a node within a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Create a new NodeId from a u64.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Classification of what a symbolic link points at.
///
/// Sizes carried here are the resolved target's own metadata size,
/// normalized to 0 when unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkResolution {
    /// The link resolves to a regular file.
    File {
        /// Target's metadata size in bytes.
        size: u64,
    },
    /// The link resolves to a directory.
    Directory {
        /// Target's metadata size in bytes.
        size: u64,
    },
    /// The link resolves to something that is neither (socket, device, ...).
    Other {
        /// Target's metadata size in bytes.
        size: u64,
    },
    /// The link points at nothing resolvable (dangling, loop, I/O failure).
    Unresolved,
}

impl LinkResolution {
    /// Size of the resolved target, 0 when unresolved.
    pub fn target_size(&self) -> u64 {
        match self {
            LinkResolution::File { size }
            | LinkResolution::Directory { size }
            | LinkResolution::Other { size } => *size,
            LinkResolution::Unresolved => 0,
        }
    }

    /// Whether the link target is a directory.
    pub fn is_directory(&self) -> bool {
        matches!(self, LinkResolution::Directory { .. })
    }
}

/// Type of file system node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileKind {
    /// Regular file.
    RegularFile,
    /// Directory.
    Directory,
    /// Symbolic link, carrying its resolved target's classification.
    Symlink {
        /// What the link ultimately points at.
        resolved: LinkResolution,
    },
    /// Other file types (sockets, devices, etc.).
    Other,
    /// Entry that could not be read or resolved; size is always 0.
    Unreadable,
}

impl FileKind {
    /// Check if this is a plain directory (not a link to one).
    pub fn is_dir(&self) -> bool {
        matches!(self, FileKind::Directory)
    }

    /// Check if this is a regular file.
    pub fn is_file(&self) -> bool {
        matches!(self, FileKind::RegularFile)
    }

    /// Check if this is a symlink.
    pub fn is_link(&self) -> bool {
        matches!(self, FileKind::Symlink { .. })
    }

    /// Check if this is a symlink whose target is a directory.
    pub fn links_to_dir(&self) -> bool {
        matches!(
            self,
            FileKind::Symlink {
                resolved: LinkResolution::Directory { .. }
            }
        )
    }

    /// Check if this entry failed classification.
    pub fn is_unreadable(&self) -> bool {
        matches!(self, FileKind::Unreadable)
    }

    /// Whether a walker may descend into this entry: a plain directory or
    /// a link that resolves to one.
    pub fn is_traversable(&self) -> bool {
        self.is_dir() || self.links_to_dir()
    }
}

/// A single entry in the result tree.
///
/// Nodes live in an arena owned by [`crate::FileTree`]; the `parent` link
/// is an upward-weak id, while a directory owns its children as an
/// append-only, discovery-ordered id list. Reparenting a node does not
/// remove it from the old parent's child list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileNode {
    /// Identifier of this node within its owning tree.
    pub id: NodeId,

    /// Final path component of `original_path` (full path for e.g. `/`).
    pub name: CompactString,

    /// Node type and, for links, the resolved target classification.
    pub kind: FileKind,

    /// Own metadata size in bytes; 0 for unreadable entries. Never
    /// negative: unavailable sizes normalize to 0.
    pub size: u64,

    /// The path as named by the parent directory entry (not canonicalized).
    pub original_path: PathBuf,

    /// The real, symlink-free path; for links, the path the link targets.
    pub resolved_path: PathBuf,

    /// Parent directory node, if any. Not an owning reference.
    pub parent: Option<NodeId>,

    /// Child node ids in discovery order. Only directories grow this.
    pub children: Vec<NodeId>,
}

impl FileNode {
    /// Create a node with no parent and no children.
    pub fn new(
        id: NodeId,
        kind: FileKind,
        size: u64,
        original_path: PathBuf,
        resolved_path: PathBuf,
    ) -> Self {
        let name = node_name(&original_path);
        Self {
            id,
            name,
            kind,
            size,
            original_path,
            resolved_path,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Check if this node is a plain directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Check if this node is a regular file.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    /// Check if this node is a symlink.
    pub fn is_link(&self) -> bool {
        self.kind.is_link()
    }

    /// Whether a walker may descend into this node.
    pub fn is_traversable(&self) -> bool {
        self.kind.is_traversable()
    }

    /// Get the number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

/// Identity excludes size and children: two nodes are the same entry when
/// their resolved paths coincide (for links, the original+resolved pair).
/// This lets a node be looked up before its subtree is finished.
impl PartialEq for FileNode {
    fn eq(&self, other: &Self) -> bool {
        if self.is_link() || other.is_link() {
            self.original_path == other.original_path
                && self.resolved_path == other.resolved_path
        } else {
            self.resolved_path == other.resolved_path
        }
    }
}

impl Eq for FileNode {}

impl Hash for FileNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.resolved_path.hash(state);
    }
}

/// Final path component, falling back to the whole path for roots like `/`.
pub fn node_name(path: &Path) -> CompactString {
    path.file_name()
        .map(|n| CompactString::new(n.to_string_lossy()))
        .unwrap_or_else(|| CompactString::new(path.to_string_lossy()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_node(id: u64, path: &str, size: u64) -> FileNode {
        FileNode::new(
            NodeId::new(id),
            FileKind::RegularFile,
            size,
            PathBuf::from(path),
            PathBuf::from(path),
        )
    }

    #[test]
    fn test_node_name() {
        assert_eq!(node_name(Path::new("/a/b/c.txt")), "c.txt");
        assert_eq!(node_name(Path::new("/")), "/");
    }

    #[test]
    fn test_kind_predicates() {
        assert!(FileKind::Directory.is_dir());
        assert!(FileKind::Directory.is_traversable());
        assert!(FileKind::RegularFile.is_file());
        assert!(!FileKind::RegularFile.is_traversable());

        let dir_link = FileKind::Symlink {
            resolved: LinkResolution::Directory { size: 4096 },
        };
        assert!(dir_link.is_link());
        assert!(dir_link.links_to_dir());
        assert!(dir_link.is_traversable());

        let dangling = FileKind::Symlink {
            resolved: LinkResolution::Unresolved,
        };
        assert!(dangling.is_link());
        assert!(!dangling.is_traversable());
        assert_eq!(LinkResolution::Unresolved.target_size(), 0);
    }

    #[test]
    fn test_identity_ignores_size() {
        let a = file_node(1, "/data/report.bin", 10);
        let b = file_node(2, "/data/report.bin", 99_999);
        assert_eq!(a, b);

        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_link_identity_uses_both_paths() {
        let mut a = FileNode::new(
            NodeId::new(1),
            FileKind::Symlink {
                resolved: LinkResolution::Directory { size: 0 },
            },
            0,
            PathBuf::from("/data/link1"),
            PathBuf::from("/data/target"),
        );
        let mut b = a.clone();
        b.original_path = PathBuf::from("/data/link2");
        assert_ne!(a, b);

        b.original_path.clone_from(&a.original_path);
        b.size = 123;
        assert_eq!(a, b);

        a.resolved_path = PathBuf::from("/data/elsewhere");
        assert_ne!(a, b);
    }
}
