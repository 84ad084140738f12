// Wed Feb 04 2026 - Alex

use crate::scanner::{ScanError, ScanOptions};
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub size: u64,
    /// 0 for files directly inside the root.
    pub depth: usize,
}

/// Regular files under `root` that pass every filter in `options`.
///
/// Directories deeper than the depth limit are never entered. Linked
/// directories are not descended into, but a symlink to a regular file is
/// reported with the target's size. Entries that cannot be read are logged and
/// skipped.
pub fn files<'a>(root: &Path, options: &'a ScanOptions) -> impl Iterator<Item = FileEntry> + 'a {
    let mut walker = WalkDir::new(root).min_depth(1).follow_links(false);
    if let Some(max_depth) = options.max_depth() {
        walker = walker.max_depth(max_depth.saturating_add(1));
    }

    walker
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::debug!("Skipping entry: {}", ScanError::from(e));
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() || entry.path_is_symlink())
        .filter_map(move |entry| accept(entry, options))
}

fn accept(entry: DirEntry, options: &ScanOptions) -> Option<FileEntry> {
    let depth = entry.depth() - 1;
    let path = entry.path();

    if !options.depth_ok(depth) || !options.extension_ok(path) || !options.filename_ok(path) {
        return None;
    }

    let metadata = match target_metadata(&entry) {
        Ok(metadata) => metadata,
        Err(e) => {
            log::debug!("Skipping {}: {}", path.display(), e);
            return None;
        }
    };
    if !metadata.is_file() {
        return None;
    }
    let size = metadata.len();
    if !options.size_ok(size) {
        return None;
    }

    Some(FileEntry {
        path: entry.into_path(),
        size,
        depth,
    })
}

/// Metadata of the entry itself, or of its target when it is a symlink.
fn target_metadata(entry: &DirEntry) -> Result<Metadata, ScanError> {
    if entry.path_is_symlink() {
        fs::metadata(entry.path()).map_err(|e| ScanError::from_metadata(entry.path(), e))
    } else {
        entry.metadata().map_err(ScanError::from)
    }
}
