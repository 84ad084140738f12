// Thu Feb 05 2026 - Alex

use crate::pattern::Signature;
use crate::scanner::result::FileResults;
use crate::scanner::{MultiScanner, ScanOptions};
use std::path::Path;

/// A [`MultiScanner`] bound to exactly one signature, returning plain offset lists.
#[derive(Debug, Clone)]
pub struct Scanner {
    inner: MultiScanner,
    signature: Signature,
}

impl Scanner {
    pub fn new(signature: Signature) -> Self {
        let inner = MultiScanner::new().with_signature(signature.clone());
        Self { inner, signature }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn scan(&self, data: &[u8], options: &ScanOptions) -> Vec<u64> {
        self.inner
            .scan(data, options)
            .remove(&self.signature)
            .unwrap_or_default()
    }

    pub fn reverse_scan(&self, data: &[u8], options: &ScanOptions) -> Vec<u64> {
        self.inner
            .reverse_scan(data, options)
            .remove(&self.signature)
            .unwrap_or_default()
    }

    pub fn scan_file(&self, path: &Path, options: &ScanOptions) -> Vec<u64> {
        self.inner
            .scan_file(path, options)
            .remove(&self.signature)
            .unwrap_or_default()
    }

    pub fn scan_directory(&self, path: &Path, options: &ScanOptions) -> FileResults {
        self.inner
            .scan_directory(path, options)
            .remove(&self.signature)
            .unwrap_or_default()
    }
}

impl From<Signature> for Scanner {
    fn from(signature: Signature) -> Self {
        Self::new(signature)
    }
}
