// Wed Feb 04 2026 - Alex

use crate::pattern::Signature;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Offsets per signature for a buffer or single file.
pub type ScanResults = HashMap<Signature, Vec<u64>>;

/// Offsets per file for one signature.
pub type FileResults = HashMap<PathBuf, Vec<u64>>;

/// Offsets per signature and file for a directory scan.
pub type DirectoryResults = HashMap<Signature, FileResults>;

/// Accumulator shared by every task of one top-level scan call.
///
/// The key set is fixed at construction; tasks only ever append offsets, and
/// skip the lock entirely when they have nothing to add. A path marked failed
/// is dropped from every signature when the sink is consumed, whatever order
/// its tasks finished in.
pub(crate) struct ResultSink {
    results: Mutex<DirectoryResults>,
    failed: Mutex<HashSet<PathBuf>>,
}

impl ResultSink {
    pub(crate) fn new<'a>(signatures: impl IntoIterator<Item = &'a Signature>) -> Self {
        let results = signatures
            .into_iter()
            .map(|s| (s.clone(), FileResults::new()))
            .collect();
        Self {
            results: Mutex::new(results),
            failed: Mutex::new(HashSet::new()),
        }
    }

    pub(crate) fn record(&self, signature: &Signature, path: &Path, offsets: Vec<u64>) {
        if offsets.is_empty() {
            return;
        }
        let mut results = self.results.lock();
        if let Some(files) = results.get_mut(signature) {
            files.entry(path.to_path_buf()).or_default().extend(offsets);
        }
    }

    /// Records a whole file's findings under one lock acquisition.
    pub(crate) fn commit<'a>(&self, path: &Path, found: impl IntoIterator<Item = (&'a Signature, Vec<u64>)>) {
        let mut found = found.into_iter().filter(|(_, offsets)| !offsets.is_empty()).peekable();
        if found.peek().is_none() {
            return;
        }
        let mut results = self.results.lock();
        for (signature, offsets) in found {
            if let Some(files) = results.get_mut(signature) {
                files.entry(path.to_path_buf()).or_default().extend(offsets);
            }
        }
    }

    /// Marks `path` as unreadable. Nothing recorded for it before or after
    /// survives into the results. Returns false if it was already marked.
    pub(crate) fn fail(&self, path: &Path) -> bool {
        self.failed.lock().insert(path.to_path_buf())
    }

    pub(crate) fn failed_count(&self) -> usize {
        self.failed.lock().len()
    }

    pub(crate) fn into_inner(self) -> DirectoryResults {
        let mut results = self.results.into_inner();
        let failed = self.failed.into_inner();
        if !failed.is_empty() {
            for files in results.values_mut() {
                files.retain(|path, _| !failed.contains(path));
            }
        }
        results
    }
}

pub fn total_matches(results: &ScanResults) -> usize {
    results.values().map(Vec::len).sum()
}

pub fn total_directory_matches(results: &DirectoryResults) -> usize {
    results
        .values()
        .flat_map(|files| files.values())
        .map(Vec::len)
        .sum()
}

/// Sorts every offset list ascending. Scans only order offsets within one chunk.
pub fn sort_offsets(results: &mut ScanResults) {
    for offsets in results.values_mut() {
        offsets.sort_unstable();
    }
}

pub fn sort_directory_offsets(results: &mut DirectoryResults) {
    for offsets in results.values_mut().flat_map(|files| files.values_mut()) {
        offsets.sort_unstable();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_keeps_key_set() {
        let a = Signature::parse("AA").unwrap();
        let b = Signature::parse("BB").unwrap();
        let stranger = Signature::parse("CC").unwrap();
        let sink = ResultSink::new([&a, &b]);

        sink.record(&a, Path::new("f"), vec![3, 1]);
        sink.record(&a, Path::new("f"), vec![2]);
        sink.record(&b, Path::new("f"), Vec::new());
        sink.record(&stranger, Path::new("f"), vec![9]);

        let mut results = sink.into_inner();
        assert_eq!(results.len(), 2);
        assert!(results[&b].is_empty());
        sort_directory_offsets(&mut results);
        assert_eq!(results[&a][Path::new("f")], vec![1, 2, 3]);
        assert_eq!(total_directory_matches(&results), 3);
    }

    #[test]
    fn test_commit_and_fail() {
        let a = Signature::parse("AA").unwrap();
        let b = Signature::parse("BB").unwrap();
        let sink = ResultSink::new([&a, &b]);

        sink.commit(Path::new("x"), vec![(&a, vec![1]), (&b, vec![2, 3])]);
        sink.commit(Path::new("y"), vec![(&a, vec![4])]);
        assert!(sink.fail(Path::new("x")));
        sink.record(&b, Path::new("x"), vec![7]);
        assert!(!sink.fail(Path::new("x")));
        assert_eq!(sink.failed_count(), 1);

        let results = sink.into_inner();
        assert!(!results[&a].contains_key(Path::new("x")));
        assert!(results[&b].is_empty());
        assert_eq!(results[&a][Path::new("y")], vec![4]);
    }

    #[test]
    fn test_sort_and_count_scan_results() {
        let a = Signature::parse("AA").unwrap();
        let mut results = ScanResults::new();
        results.insert(a.clone(), vec![9, 2, 5]);
        sort_offsets(&mut results);
        assert_eq!(results[&a], vec![2, 5, 9]);
        assert_eq!(total_matches(&results), 3);
    }
}
