//! Entry classification: real-path resolution and metadata reads.
//!
//! Every function here is total over I/O failures: the caller always gets
//! a usable [`EntryRecord`], with failures pushed onto the error list
//! instead of raised.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use treedu_core::{FileKind, LinkResolution, TreeBuildError};

/// Classification of one directory entry, before it becomes a node.
#[derive(Debug, Clone)]
pub(crate) struct EntryRecord {
    pub kind: FileKind,
    pub size: u64,
    pub original_path: PathBuf,
    pub resolved_path: PathBuf,
}

/// Real path without following a final symbolic link: canonicalize the
/// parent and re-append the last component.
pub(crate) fn real_path_nofollow(path: &Path) -> io::Result<PathBuf> {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };
            Ok(fs::canonicalize(parent)?.join(name))
        }
        // Filesystem roots and `.`-style paths have no final component.
        _ => fs::canonicalize(path),
    }
}

/// Real path with full link following.
pub(crate) fn real_path_follow(path: &Path) -> io::Result<PathBuf> {
    fs::canonicalize(path)
}

/// Record for an entry that could not be read at all.
pub(crate) fn unreadable(original: &Path, resolved: PathBuf) -> EntryRecord {
    EntryRecord {
        kind: FileKind::Unreadable,
        size: 0,
        original_path: original.to_path_buf(),
        resolved_path: resolved,
    }
}

/// Classify an entry whose real path has already been resolved.
///
/// Reads type and size without following a final link; symlinks get one
/// extra resolution hop to classify their target. I/O failures downgrade
/// the record (to `Unreadable`, or to an `Unresolved` link target) and are
/// appended to `errors`.
pub(crate) fn classify(
    original: &Path,
    real: PathBuf,
    errors: &mut Vec<TreeBuildError>,
) -> EntryRecord {
    let metadata = match fs::symlink_metadata(original) {
        Ok(m) => m,
        Err(err) => {
            errors.push(TreeBuildError::path_error(Some(original), &err));
            return unreadable(original, real);
        }
    };

    let file_type = metadata.file_type();
    if file_type.is_symlink() {
        let (resolved_path, resolved) = resolve_link_target(original, &real, errors);
        EntryRecord {
            kind: FileKind::Symlink { resolved },
            size: entry_size(&metadata),
            original_path: original.to_path_buf(),
            resolved_path,
        }
    } else {
        let kind = if file_type.is_dir() {
            FileKind::Directory
        } else if file_type.is_file() {
            FileKind::RegularFile
        } else {
            FileKind::Other
        };
        EntryRecord {
            kind,
            size: entry_size(&metadata),
            original_path: original.to_path_buf(),
            resolved_path: real,
        }
    }
}

/// One logical resolution hop for a symlink: canonicalize the link and
/// classify whatever it lands on.
fn resolve_link_target(
    original: &Path,
    real: &Path,
    errors: &mut Vec<TreeBuildError>,
) -> (PathBuf, LinkResolution) {
    let target = match fs::canonicalize(original) {
        Ok(t) => t,
        Err(err) => {
            errors.push(TreeBuildError::resolution_error(original, &err));
            return (real.to_path_buf(), LinkResolution::Unresolved);
        }
    };

    match fs::symlink_metadata(&target) {
        Ok(metadata) => {
            let size = entry_size(&metadata);
            let file_type = metadata.file_type();
            let resolution = if file_type.is_dir() {
                LinkResolution::Directory { size }
            } else if file_type.is_file() {
                LinkResolution::File { size }
            } else {
                LinkResolution::Other { size }
            };
            (target, resolution)
        }
        Err(err) => {
            errors.push(TreeBuildError::path_error(Some(&target), &err));
            (target, LinkResolution::Unresolved)
        }
    }
}

/// Metadata size, never negative; entries whose size cannot be read go
/// through [`unreadable`] and report 0 instead.
fn entry_size(metadata: &fs::Metadata) -> u64 {
    metadata.len()
}
