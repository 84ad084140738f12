// Thu Feb 05 2026 - Alex

use crate::engine::{Task, TaskScheduler};
use crate::pattern::Signature;
use crate::scanner::result::{DirectoryResults, FileResults, ResultSink, ScanResults};
use crate::scanner::window::{Chunk, ChunkPlan, ChunkWindow};
use crate::scanner::{walk, ScanError, ScanOptions, ThreadingMode};
use indexmap::IndexSet;
use parking_lot::Mutex;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Reverse,
}

/// Scans buffers, files and directory trees for a set of signatures at once.
///
/// Every call starts its own worker pool sized by [`ScanOptions::thread_count`],
/// dispatches work, drains the pool and returns. Result maps always contain one
/// key per registered signature, even when nothing matched. Failures (missing
/// paths, unreadable files) never abort a scan; the affected item just has no
/// results.
///
/// Offsets within one chunk are ascending, but lists merged from several chunks
/// are not sorted. Use [`sort_offsets`](crate::scanner::sort_offsets) if order matters.
#[derive(Debug, Clone, Default)]
pub struct MultiScanner {
    signatures: IndexSet<Signature>,
}

impl MultiScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.add_signature(signature);
        self
    }

    pub fn with_signatures<I>(mut self, signatures: I) -> Self
    where
        I: IntoIterator<Item = Signature>,
    {
        self.add_signatures(signatures);
        self
    }

    /// Registers a signature. Invalid and already registered signatures are ignored.
    /// Must not be called while a scan is running.
    pub fn add_signature(&mut self, signature: Signature) -> bool {
        if !signature.is_valid() {
            log::warn!("Ignoring empty signature");
            return false;
        }
        let added = self.signatures.insert(signature);
        if !added {
            log::debug!("Signature already registered, skipping duplicate");
        }
        added
    }

    pub fn add_signatures<I>(&mut self, signatures: I)
    where
        I: IntoIterator<Item = Signature>,
    {
        for signature in signatures {
            self.add_signature(signature);
        }
    }

    pub fn signatures(&self) -> impl Iterator<Item = &Signature> {
        self.signatures.iter()
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    pub fn longest_signature_len(&self) -> usize {
        self.signatures.iter().map(Signature::len).max().unwrap_or(0)
    }

    pub fn shortest_signature_len(&self) -> usize {
        self.signatures.iter().map(Signature::len).min().unwrap_or(0)
    }

    fn overlap(&self) -> usize {
        self.longest_signature_len().saturating_sub(1)
    }

    fn empty_results(&self) -> ScanResults {
        self.signatures.iter().map(|s| (s.clone(), Vec::new())).collect()
    }

    fn empty_directory_results(&self) -> DirectoryResults {
        self.signatures.iter().map(|s| (s.clone(), FileResults::new())).collect()
    }

    /// Scans an in-memory buffer, one task per signature. Offsets are ascending.
    pub fn scan(&self, data: &[u8], options: &ScanOptions) -> ScanResults {
        self.scan_buffer(data, options, Direction::Forward)
    }

    /// Like [`MultiScanner::scan`], with every offset list in descending order.
    pub fn reverse_scan(&self, data: &[u8], options: &ScanOptions) -> ScanResults {
        self.scan_buffer(data, options, Direction::Reverse)
    }

    fn scan_buffer(&self, data: &[u8], options: &ScanOptions, direction: Direction) -> ScanResults {
        let results = Mutex::new(self.empty_results());
        if self.signatures.is_empty() {
            return results.into_inner();
        }

        thread::scope(|scope| {
            let mut pool = TaskScheduler::new();
            pool.start(scope, options.thread_count());

            for signature in &self.signatures {
                let results = &results;
                pool.submit(move || {
                    let offsets = match direction {
                        Direction::Forward => signature.scan(data, 0),
                        Direction::Reverse => signature.reverse_scan(data, 0),
                    };
                    if let Some(slot) = results.lock().get_mut(signature) {
                        *slot = offsets;
                    }
                });
            }

            pool.stop(false);
        });

        results.into_inner()
    }

    /// Scans one file in overlapping blocks. Only the size filter applies.
    pub fn scan_file(&self, path: &Path, options: &ScanOptions) -> ScanResults {
        let mut results = self.empty_results();
        if self.signatures.is_empty() {
            return results;
        }

        let size = match regular_file_size(path) {
            Ok(size) => size,
            Err(e) => {
                log::debug!("Not scanning: {}", e);
                return results;
            }
        };
        if !options.size_ok(size) {
            log::debug!("Skipping {} ({} bytes)", path.display(), size);
            return results;
        }

        for (signature, mut files) in self.scan_entries([(path.to_path_buf(), size)], options) {
            if let Some(offsets) = files.remove(path) {
                results.insert(signature, offsets);
            }
        }
        results
    }

    /// Recursively scans every file under `path` that passes the filters in `options`.
    pub fn scan_directory(&self, path: &Path, options: &ScanOptions) -> DirectoryResults {
        if self.signatures.is_empty() {
            return DirectoryResults::new();
        }
        if let Err(e) = check_directory(path) {
            log::debug!("Not scanning: {}", e);
            return self.empty_directory_results();
        }

        log::debug!("Walking {}", path.display());
        let entries = walk::files(path, options).map(|entry| (entry.path, entry.size));
        self.scan_entries(entries, options)
    }

    /// Scans files whose sizes are already known on one pool. Files shorter
    /// than the shortest signature are skipped; unreadable files end up with
    /// no entry.
    fn scan_entries<I>(&self, entries: I, options: &ScanOptions) -> DirectoryResults
    where
        I: IntoIterator<Item = (PathBuf, u64)>,
    {
        let sink = ResultSink::new(&self.signatures);
        let shortest = self.shortest_signature_len().max(1) as u64;

        let dispatched = thread::scope(|scope| {
            let mut pool = TaskScheduler::new();
            pool.start(scope, options.thread_count());

            let mut dispatched = 0usize;
            for (path, size) in entries {
                if size < shortest {
                    log::trace!("Skipping {} ({} bytes)", path.display(), size);
                    continue;
                }
                self.dispatch(&pool, &sink, options, path, size);
                dispatched += 1;
            }

            pool.stop(false);
            let stats = pool.stats();
            log::debug!(
                "Pool finished: {} tasks completed, {} panicked",
                stats.completed,
                stats.panicked
            );
            dispatched
        });

        log::debug!("Scanned {} files ({} unreadable)", dispatched, sink.failed_count());
        sink.into_inner()
    }

    fn dispatch<'scope, 'env>(
        &'env self,
        pool: &TaskScheduler<'scope, 'env>,
        sink: &'env ResultSink,
        options: &'env ScanOptions,
        path: PathBuf,
        size: u64,
    ) {
        match options.threading_mode() {
            ThreadingMode::PerFile => {
                let name = format!("file {}", path.display());
                let task = Task::new(move || match self.scan_file_serial(&path, options.block_size()) {
                    Ok(found) => sink.commit(&path, self.signatures.iter().zip(found)),
                    Err(e) => {
                        log::warn!("{}", e);
                        sink.fail(&path);
                    }
                });
                pool.submit_task(task.with_name(name));
            }
            ThreadingMode::PerChunk => {
                let plan = ChunkPlan::new(size, options.block_size(), self.overlap());
                self.dispatch_chunks(pool, sink, plan, Arc::from(path));
            }
        }
    }

    /// Queues one task per chunk of `plan`. Each task opens and reads its own
    /// chunk, so no file data is held while the task waits in the queue.
    fn dispatch_chunks<'scope, 'env>(
        &'env self,
        pool: &TaskScheduler<'scope, 'env>,
        sink: &'env ResultSink,
        plan: ChunkPlan,
        path: Arc<Path>,
    ) {
        for base in plan.bases() {
            let path = Arc::clone(&path);
            let name = format!("chunk {:#x} of {}", base, path.display());
            let task = Task::new(move || {
                if let Err(e) = self.scan_planned_chunk(&plan, base, &path, sink) {
                    if sink.fail(&path) {
                        log::warn!("{}", e);
                    } else {
                        log::debug!("{}", e);
                    }
                }
            });
            pool.submit_task(task.with_name(name));
        }
        log::trace!("Queued {} chunks for {}", plan.chunk_count(), path.display());
    }

    fn scan_planned_chunk(
        &self,
        plan: &ChunkPlan,
        base: u64,
        path: &Path,
        sink: &ResultSink,
    ) -> Result<(), ScanError> {
        let mut file = File::open(path).map_err(|e| ScanError::io(path, e))?;
        let chunk = plan
            .read_chunk(&mut file, base)
            .map_err(|e| ScanError::io(path, e))?;
        self.scan_chunk(&chunk, path, sink);
        Ok(())
    }

    fn scan_chunk(&self, chunk: &Chunk, path: &Path, sink: &ResultSink) {
        for signature in &self.signatures {
            sink.record(signature, path, chunk.scan(signature));
        }
    }

    /// Walks every block of `path` on the current thread. Findings are kept
    /// local so a file that fails halfway contributes nothing.
    fn scan_file_serial(&self, path: &Path, block_size: usize) -> Result<Vec<Vec<u64>>, ScanError> {
        let file = File::open(path).map_err(|e| ScanError::io(path, e))?;
        self.scan_reader(file, block_size)
            .map_err(|e| ScanError::io(path, e))
    }

    fn scan_reader<R: Read>(&self, reader: R, block_size: usize) -> io::Result<Vec<Vec<u64>>> {
        let mut window = ChunkWindow::new(reader, block_size, self.overlap());
        let mut found = vec![Vec::new(); self.signatures.len()];

        while let Some(chunk) = window.next_chunk()? {
            for (signature, offsets) in self.signatures.iter().zip(found.iter_mut()) {
                offsets.extend(chunk.scan(signature));
            }
        }
        Ok(found)
    }
}

fn regular_file_size(path: &Path) -> Result<u64, ScanError> {
    let metadata = fs::metadata(path).map_err(|e| ScanError::from_metadata(path, e))?;
    if !metadata.is_file() {
        return Err(ScanError::NotAFile(path.to_path_buf()));
    }
    Ok(metadata.len())
}

fn check_directory(path: &Path) -> Result<(), ScanError> {
    let metadata = fs::metadata(path).map_err(|e| ScanError::from_metadata(path, e))?;
    if !metadata.is_dir() {
        return Err(ScanError::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::{sort_directory_offsets, sort_offsets, FilenameMode};
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn sample(len: usize, seed: u32) -> Vec<u8> {
        let mut state = seed | 1;
        (0..len)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                (state & 0x03) as u8
            })
            .collect()
    }

    fn signatures() -> Vec<Signature> {
        ["01 02", "?? 03 00", "02 ?? ?? 01", "00 01 02 03 00 01"]
            .iter()
            .map(|p| Signature::parse(p).unwrap())
            .collect()
    }

    fn scanner() -> MultiScanner {
        MultiScanner::new().with_signatures(signatures())
    }

    #[test]
    fn test_registration() {
        let mut scanner = scanner();
        assert_eq!(scanner.len(), 4);
        assert_eq!(scanner.longest_signature_len(), 6);
        assert_eq!(scanner.shortest_signature_len(), 2);

        assert!(!scanner.add_signature(Signature::parse("01 02").unwrap()));
        assert!(!scanner.add_signature(Signature::default()));
        assert_eq!(scanner.len(), 4);
    }

    #[test]
    fn test_buffer_scan_matches_signature_scan() {
        let data = sample(10_000, 7);
        let scanner = scanner();
        let results = scanner.scan(&data, &ScanOptions::new().with_thread_count(4));
        assert_eq!(results.len(), 4);
        for signature in signatures() {
            assert_eq!(results[&signature], signature.scan(&data, 0));
        }
    }

    #[test]
    fn test_buffer_scan_is_deterministic_across_thread_counts() {
        let data = sample(20_000, 11);
        let scanner = scanner();
        let baseline = scanner.scan(&data, &ScanOptions::new().with_thread_count(1));
        for threads in [4, 64] {
            assert_eq!(scanner.scan(&data, &ScanOptions::new().with_thread_count(threads)), baseline);
        }
    }

    #[test]
    fn test_reverse_scan_is_descending() {
        let data = sample(5_000, 3);
        let scanner = scanner();
        let forward = scanner.scan(&data, &ScanOptions::default());
        let reverse = scanner.reverse_scan(&data, &ScanOptions::new().with_thread_count(2));
        for (signature, offsets) in &reverse {
            assert!(offsets.windows(2).all(|w| w[0] > w[1]));
            let mut ascending = offsets.clone();
            ascending.reverse();
            assert_eq!(ascending, forward[signature]);
        }
    }

    #[test]
    fn test_empty_inputs() {
        let scanner = scanner();
        let results = scanner.scan(&[], &ScanOptions::default());
        assert_eq!(results.len(), 4);
        assert!(results.values().all(Vec::is_empty));

        let nobody = MultiScanner::new();
        assert!(nobody.scan(&[1, 2, 3], &ScanOptions::default()).is_empty());
        assert!(nobody.scan_file(Path::new("/nonexistent"), &ScanOptions::default()).is_empty());
        assert!(nobody.scan_directory(Path::new("/nonexistent"), &ScanOptions::default()).is_empty());

        let missing = scanner.scan_file(Path::new("/nonexistent/file.bin"), &ScanOptions::default());
        assert_eq!(missing.len(), 4);
        assert!(missing.values().all(Vec::is_empty));

        let missing = scanner.scan_directory(Path::new("/nonexistent/dir"), &ScanOptions::default());
        assert_eq!(missing.len(), 4);
        assert!(missing.values().all(FileResults::is_empty));
    }

    #[test]
    fn test_scan_file_both_modes_match_buffer_scan() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blob.bin");
        let data = sample(50_000, 42);
        fs::write(&path, &data).unwrap();

        let scanner = scanner();
        let expected = scanner.scan(&data, &ScanOptions::default());

        for mode in [ThreadingMode::PerChunk, ThreadingMode::PerFile] {
            for block_size in [7, 100, 4096, 1 << 20] {
                let options = ScanOptions::new()
                    .with_threading_mode(mode)
                    .with_block_size(block_size)
                    .with_thread_count(4);
                let mut results = scanner.scan_file(&path, &options);
                sort_offsets(&mut results);
                assert_eq!(results, expected, "mode {:?} block {}", mode, block_size);
            }
        }
    }

    #[test]
    fn test_scan_file_match_across_block_boundary() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("edge.bin");
        let mut data = vec![0xFFu8; 64];
        data[14..18].copy_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
        data[63] = 0xDE;
        fs::write(&path, &data).unwrap();

        let signature = Signature::parse("DE AD BE EF").unwrap();
        let single = Signature::parse("DE").unwrap();
        let scanner = MultiScanner::new()
            .with_signature(signature.clone())
            .with_signature(single.clone());

        let options = ScanOptions::new()
            .with_block_size(16)
            .with_threading_mode(ThreadingMode::PerChunk)
            .with_thread_count(3);
        let mut results = scanner.scan_file(&path, &options);
        sort_offsets(&mut results);
        assert_eq!(results[&signature], vec![14]);
        assert_eq!(results[&single], vec![14, 63]);
    }

    #[test]
    fn test_scan_file_filters_and_kinds() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("small.bin");
        fs::write(&path, [0x01u8, 0x02, 0x01, 0x02]).unwrap();

        let signature = Signature::parse("01 02").unwrap();
        let scanner = MultiScanner::new().with_signature(signature.clone());

        assert_eq!(scanner.scan_file(&path, &ScanOptions::default())[&signature], vec![0, 2]);
        assert!(scanner.scan_file(&path, &ScanOptions::new().with_min_size(5))[&signature].is_empty());
        assert!(scanner.scan_file(dir.path(), &ScanOptions::default())[&signature].is_empty());

        let empty = dir.path().join("empty.bin");
        fs::write(&empty, b"").unwrap();
        assert!(scanner.scan_file(&empty, &ScanOptions::default())[&signature].is_empty());
    }

    fn fixture_tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("sub/deeper")).unwrap();
        let files = [
            ("core.bin", 3000, 1),
            ("core.txt", 2000, 2),
            ("data.bin", 4000, 3),
            ("sub/core.bin", 5000, 4),
            ("sub/deeper/core_dump.bin", 6000, 5),
            ("sub/deeper/tiny.bin", 1, 6),
        ];
        for (name, len, seed) in files {
            fs::write(dir.path().join(name), sample(len, seed)).unwrap();
        }
        fs::write(dir.path().join("sub/empty.bin"), b"").unwrap();
        dir
    }

    fn matched_files(results: &DirectoryResults, root: &Path) -> HashSet<String> {
        results
            .values()
            .flat_map(|files| files.keys())
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_directory_scan_matches_per_file_buffer_scans() {
        let dir = fixture_tree();
        let scanner = scanner();
        let results = {
            let mut r = scanner.scan_directory(dir.path(), &ScanOptions::default());
            sort_directory_offsets(&mut r);
            r
        };

        for (signature, files) in &results {
            for (path, offsets) in files {
                let data = fs::read(path).unwrap();
                assert_eq!(offsets, &signature.scan(&data, 0));
            }
        }

        let matched = matched_files(&results, dir.path());
        assert!(matched.contains("core.bin"));
        assert!(matched.contains("sub/deeper/core_dump.bin"));
        assert!(!matched.contains("sub/deeper/tiny.bin"));
        assert!(!matched.contains("sub/empty.bin"));
    }

    #[test]
    fn test_directory_scan_is_identical_across_threads_and_modes() {
        let dir = fixture_tree();
        let scanner = scanner();
        let baseline = {
            let mut r = scanner.scan_directory(dir.path(), &ScanOptions::default());
            sort_directory_offsets(&mut r);
            r
        };

        for mode in [ThreadingMode::PerFile, ThreadingMode::PerChunk] {
            for threads in [1, 4, 64] {
                let options = ScanOptions::new()
                    .with_threading_mode(mode)
                    .with_thread_count(threads)
                    .with_block_size(512);
                let mut results = scanner.scan_directory(dir.path(), &options);
                sort_directory_offsets(&mut results);
                assert_eq!(results, baseline, "mode {:?} threads {}", mode, threads);
            }
        }
    }

    #[test]
    fn test_directory_scan_filters() {
        let dir = fixture_tree();
        let scanner = MultiScanner::new().with_signature(Signature::parse("??").unwrap());

        let options = ScanOptions::new()
            .with_extensions([".bin"])
            .with_filename_mode(FilenameMode::Contains)
            .with_filenames(["core"]);
        let results = scanner.scan_directory(dir.path(), &options);
        let expected: HashSet<String> = ["core.bin", "sub/core.bin", "sub/deeper/core_dump.bin"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(matched_files(&results, dir.path()), expected);

        let shallow = scanner.scan_directory(dir.path(), &options.clone().with_max_depth(0));
        assert_eq!(
            matched_files(&shallow, dir.path()),
            ["core.bin".to_string()].into_iter().collect()
        );

        let wildcard = Signature::parse("??").unwrap();
        let tiny_ok = scanner.scan_directory(dir.path(), &ScanOptions::new().with_max_size(1));
        assert_eq!(tiny_ok[&wildcard].len(), 1);
    }

    #[test]
    fn test_scanner_is_reusable() {
        let dir = fixture_tree();
        let scanner = scanner();
        let options = ScanOptions::new().with_thread_count(4);
        let first = scanner.scan_directory(dir.path(), &options);
        let second = scanner.scan_directory(dir.path(), &options);
        assert_eq!(first.len(), second.len());
        let count = |r: &DirectoryResults| crate::scanner::total_directory_matches(r);
        assert_eq!(count(&first), count(&second));
    }

    fn good_and_bad(dir: &TempDir) -> (PathBuf, PathBuf) {
        let good = dir.path().join("good.bin");
        fs::write(&good, sample(4000, 9)).unwrap();
        let bad = dir.path().join("bad.bin");
        let mut data = vec![0xFFu8; 64];
        data[..2].copy_from_slice(&[0x01, 0x02]);
        data[40..42].copy_from_slice(&[0x01, 0x02]);
        fs::write(&bad, &data).unwrap();
        (good, bad)
    }

    #[test]
    fn test_chunk_read_failure_drops_only_that_file() {
        let dir = TempDir::new().unwrap();
        let (good, bad) = good_and_bad(&dir);
        let scanner = scanner();
        let options = ScanOptions::new()
            .with_threading_mode(ThreadingMode::PerChunk)
            .with_block_size(16)
            .with_thread_count(4);

        // Claiming more bytes than the file holds makes every chunk past the
        // real end fail after the first chunks already recorded matches.
        let entries = vec![(good.clone(), 4000), (bad.clone(), 64 + 1000)];
        let mut results = scanner.scan_entries(entries, &options);
        sort_directory_offsets(&mut results);

        let good_data = fs::read(&good).unwrap();
        for (signature, files) in &results {
            assert!(!files.contains_key(&bad), "{} kept the failed file", signature);
            let expected = signature.scan(&good_data, 0);
            assert_eq!(files.get(&good).cloned().unwrap_or_default(), expected);
        }

        let intact = scanner.scan_entries(vec![(bad.clone(), 64)], &options);
        assert_eq!(intact[&Signature::parse("01 02").unwrap()][&bad].len(), 2);
    }

    #[test]
    fn test_unreadable_file_drops_only_that_file() {
        let dir = TempDir::new().unwrap();
        let (good, _) = good_and_bad(&dir);
        let scanner = scanner();
        let good_data = fs::read(&good).unwrap();

        for mode in [ThreadingMode::PerFile, ThreadingMode::PerChunk] {
            let options = ScanOptions::new().with_threading_mode(mode).with_block_size(64);
            let unreadable = dir.path().join("missing.bin");
            let entries = vec![(good.clone(), 4000), (unreadable.clone(), 100)];
            let results = scanner.scan_entries(entries, &options);
            for (signature, files) in &results {
                assert!(!files.contains_key(&unreadable));
                let mut offsets = files.get(&good).cloned().unwrap_or_default();
                offsets.sort_unstable();
                assert_eq!(offsets, signature.scan(&good_data, 0), "mode {:?}", mode);
            }
        }
    }

    struct FailAfter {
        data: std::io::Cursor<Vec<u8>>,
    }

    impl Read for FailAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.read(buf)? {
                0 => Err(io::Error::new(io::ErrorKind::Other, "device went away")),
                n => Ok(n),
            }
        }
    }

    #[test]
    fn test_scan_reader_fails_mid_file() {
        let scanner = scanner();
        let data = sample(100, 5);
        let found = scanner.scan_reader(std::io::Cursor::new(data.clone()), 16).unwrap();
        for (signature, offsets) in scanner.signatures().zip(&found) {
            assert_eq!(offsets, &signature.scan(&data, 0));
        }

        let failing = FailAfter {
            data: std::io::Cursor::new(data),
        };
        let err = scanner.scan_reader(failing, 16).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
    }

    #[cfg(unix)]
    #[test]
    fn test_linked_file_is_scanned_like_its_target() {
        let dir = fixture_tree();
        let target = dir.path().join("core.bin");
        let link = dir.path().join("alias.bin");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let scanner = scanner();
        let options = ScanOptions::new().with_thread_count(2);
        let mut tree = scanner.scan_directory(dir.path(), &options);
        sort_directory_offsets(&mut tree);
        let mut single = scanner.scan_file(&link, &options);
        sort_offsets(&mut single);

        let data = fs::read(&target).unwrap();
        for (signature, files) in &tree {
            let expected = signature.scan(&data, 0);
            assert_eq!(single[signature], expected);
            assert_eq!(files.get(&link).cloned().unwrap_or_default(), expected);
        }
        assert!(matched_files(&tree, dir.path()).contains("alias.bin"));
    }
}
