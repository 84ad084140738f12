// Wed Feb 04 2026 - Alex

use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BLOCK_SIZE: usize = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThreadingMode {
    /// One task per block. Suits a few very large files.
    PerChunk,
    /// One task per file, walking its blocks serially. Suits many small files.
    #[default]
    PerFile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtensionMode {
    #[default]
    Allow,
    Deny,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilenameMode {
    #[default]
    Exact,
    Contains,
}

/// Per-call scan configuration.
///
/// Empty extension or filename lists never filter anything out. Depth counts
/// from the scanned directory: files directly inside it are at depth 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    max_depth: Option<usize>,
    min_size: Option<u64>,
    max_size: Option<u64>,
    thread_count: usize,
    threading_mode: ThreadingMode,
    block_size: usize,
    extension_mode: ExtensionMode,
    extensions: Vec<String>,
    filename_mode: FilenameMode,
    filenames: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_size: None,
            max_size: None,
            thread_count: 1,
            threading_mode: ThreadingMode::PerFile,
            block_size: DEFAULT_BLOCK_SIZE,
            extension_mode: ExtensionMode::Allow,
            extensions: Vec::new(),
            filename_mode: FilenameMode::Exact,
            filenames: Vec::new(),
        }
    }
}

fn normalize_extension(extension: &str) -> String {
    if extension.is_empty() || extension.starts_with('.') {
        extension.to_string()
    } else {
        format!(".{}", extension)
    }
}

impl ScanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn with_min_size(mut self, size: u64) -> Self {
        self.min_size = Some(size);
        self
    }

    pub fn with_max_size(mut self, size: u64) -> Self {
        self.max_size = Some(size);
        self
    }

    pub fn with_thread_count(mut self, count: usize) -> Self {
        self.set_thread_count(count);
        self
    }

    pub fn with_threading_mode(mut self, mode: ThreadingMode) -> Self {
        self.threading_mode = mode;
        self
    }

    pub fn with_block_size(mut self, size: usize) -> Self {
        self.set_block_size(size);
        self
    }

    pub fn with_extension_mode(mut self, mode: ExtensionMode) -> Self {
        self.extension_mode = mode;
        self
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add_extensions(extensions);
        self
    }

    pub fn with_filename_mode(mut self, mode: FilenameMode) -> Self {
        self.filename_mode = mode;
        self
    }

    pub fn with_filenames<I, S>(mut self, filenames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add_filenames(filenames);
        self
    }

    pub fn set_max_depth(&mut self, depth: Option<usize>) {
        self.max_depth = depth;
    }

    pub fn set_min_size(&mut self, size: Option<u64>) {
        self.min_size = size;
    }

    pub fn set_max_size(&mut self, size: Option<u64>) {
        self.max_size = size;
    }

    pub fn set_thread_count(&mut self, count: usize) {
        self.thread_count = count.max(1);
    }

    pub fn set_threading_mode(&mut self, mode: ThreadingMode) {
        self.threading_mode = mode;
    }

    pub fn set_block_size(&mut self, size: usize) {
        self.block_size = size.max(1);
    }

    pub fn set_extension_mode(&mut self, mode: ExtensionMode) {
        self.extension_mode = mode;
    }

    /// Extensions include the leading dot (`".so"`); one is added if missing.
    /// The empty string stands for files without an extension.
    pub fn add_extension(&mut self, extension: &str) {
        let extension = normalize_extension(extension);
        if !self.extensions.contains(&extension) {
            self.extensions.push(extension);
        }
    }

    pub fn add_extensions<I, S>(&mut self, extensions: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for extension in extensions {
            self.add_extension(extension.as_ref());
        }
    }

    pub fn remove_extension(&mut self, extension: &str) {
        let extension = normalize_extension(extension);
        self.extensions.retain(|e| *e != extension);
    }

    pub fn remove_extensions<I, S>(&mut self, extensions: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for extension in extensions {
            self.remove_extension(extension.as_ref());
        }
    }

    pub fn set_filename_mode(&mut self, mode: FilenameMode) {
        self.filename_mode = mode;
    }

    pub fn add_filename(&mut self, filename: &str) {
        if !self.filenames.iter().any(|f| f == filename) {
            self.filenames.push(filename.to_string());
        }
    }

    pub fn add_filenames<I, S>(&mut self, filenames: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for filename in filenames {
            self.add_filename(filename.as_ref());
        }
    }

    pub fn remove_filename(&mut self, filename: &str) {
        self.filenames.retain(|f| f != filename);
    }

    pub fn remove_filenames<I, S>(&mut self, filenames: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for filename in filenames {
            self.remove_filename(filename.as_ref());
        }
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn min_size(&self) -> Option<u64> {
        self.min_size
    }

    pub fn max_size(&self) -> Option<u64> {
        self.max_size
    }

    pub fn thread_count(&self) -> usize {
        self.thread_count.max(1)
    }

    pub fn threading_mode(&self) -> ThreadingMode {
        self.threading_mode
    }

    pub fn block_size(&self) -> usize {
        self.block_size.max(1)
    }

    pub fn extension_mode(&self) -> ExtensionMode {
        self.extension_mode
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn filename_mode(&self) -> FilenameMode {
        self.filename_mode
    }

    pub fn filenames(&self) -> &[String] {
        &self.filenames
    }

    pub fn depth_ok(&self, depth: usize) -> bool {
        self.max_depth.map_or(true, |max| depth <= max)
    }

    pub fn size_ok(&self, size: u64) -> bool {
        if self.min_size.is_some_and(|min| size < min) {
            return false;
        }
        if self.max_size.is_some_and(|max| size > max) {
            return false;
        }
        true
    }

    pub fn extension_ok(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        let extension = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        let listed = self.extensions.contains(&extension);
        match self.extension_mode {
            ExtensionMode::Allow => listed,
            ExtensionMode::Deny => !listed,
        }
    }

    pub fn filename_ok(&self, path: &Path) -> bool {
        if self.filenames.is_empty() {
            return true;
        }
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => return false,
        };
        match self.filename_mode {
            FilenameMode::Exact => self.filenames.iter().any(|f| *f == name),
            FilenameMode::Contains => self.filenames.iter().any(|f| name.contains(f.as_str())),
        }
    }

    /// Every filter at once, as applied to a directory entry.
    pub fn accepts(&self, path: &Path, depth: usize, size: u64) -> bool {
        self.depth_ok(depth) && self.size_ok(size) && self.extension_ok(path) && self.filename_ok(path)
    }
}
