// Tue Jan 13 2026 - Alex

use crate::pattern::Signature;
use crate::scanner::{ExtensionMode, FilenameMode, ScanOptions, ThreadingMode, DEFAULT_BLOCK_SIZE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Extra signatures scanned alongside the one given on the command line.
    pub signatures: Vec<String>,
    pub max_threads: usize,
    pub threading_mode: ThreadingMode,
    pub block_size: usize,
    pub max_depth: Option<usize>,
    pub min_size: Option<u64>,
    pub max_size: Option<u64>,
    pub extension_mode: ExtensionMode,
    pub extensions: Vec<String>,
    pub filename_mode: FilenameMode,
    pub filenames: Vec<String>,
    pub json_output: bool,
    pub enable_colors: bool,
    pub enable_progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            signatures: Vec::new(),
            max_threads: 1,
            threading_mode: ThreadingMode::PerFile,
            block_size: DEFAULT_BLOCK_SIZE,
            max_depth: None,
            min_size: None,
            max_size: None,
            extension_mode: ExtensionMode::Allow,
            extensions: Vec::new(),
            filename_mode: FilenameMode::Contains,
            filenames: Vec::new(),
            json_output: false,
            enable_colors: true,
            enable_progress: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&text)?;
        config.validate()?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Missing files fall back to defaults; malformed ones are still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_max_threads(mut self, threads: usize) -> Self {
        self.max_threads = threads;
        self
    }

    pub fn with_threading_mode(mut self, mode: ThreadingMode) -> Self {
        self.threading_mode = mode;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_threads == 0 {
            return Err(ConfigError::Invalid("max_threads must be greater than 0".to_string()));
        }
        if self.block_size == 0 {
            return Err(ConfigError::Invalid("block_size must be greater than 0".to_string()));
        }
        if let (Some(min), Some(max)) = (self.min_size, self.max_size) {
            if min > max {
                return Err(ConfigError::Invalid(format!(
                    "min_size ({}) is larger than max_size ({})",
                    min, max
                )));
            }
        }
        for text in &self.signatures {
            if let Err(e) = Signature::parse(text) {
                return Err(ConfigError::Invalid(format!("signature \"{}\": {}", text, e)));
            }
        }
        Ok(())
    }

    pub fn parsed_signatures(&self) -> Vec<Signature> {
        self.signatures
            .iter()
            .filter_map(|text| Signature::parse(text).ok())
            .collect()
    }

    pub fn to_scan_options(&self) -> ScanOptions {
        let mut options = ScanOptions::new()
            .with_thread_count(self.max_threads)
            .with_threading_mode(self.threading_mode)
            .with_block_size(self.block_size)
            .with_extension_mode(self.extension_mode)
            .with_extensions(&self.extensions)
            .with_filename_mode(self.filename_mode)
            .with_filenames(&self.filenames);
        options.set_max_depth(self.max_depth);
        options.set_min_size(self.min_size);
        options.set_max_size(self.max_size);
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_threads, 1);
        assert_eq!(config.to_scan_options().thread_count(), 1);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(Config::new().with_max_threads(0).validate().is_err());

        let mut config = Config::new();
        config.min_size = Some(100);
        config.max_size = Some(10);
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.signatures = vec!["48 8B".to_string(), "ZZ".to_string()];
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sigscanner.json");

        let mut config = Config::new()
            .with_max_threads(3)
            .with_threading_mode(ThreadingMode::PerChunk);
        config.signatures = vec!["E8 ?? ?? ?? ??".to_string()];
        config.extensions = vec![".so".to_string()];
        config.max_depth = Some(2);
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.parsed_signatures().len(), 1);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(&path, r#"{"max_threads": 2, "threading_mode": "per-chunk"}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.max_threads, 2);
        assert_eq!(config.threading_mode, ThreadingMode::PerChunk);
        assert_eq!(config.block_size, DEFAULT_BLOCK_SIZE);
    }

    #[test]
    fn test_load_errors() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Read { .. })));
        assert!(Config::load_or_default(&missing).is_ok());

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(Config::load_or_default(&broken), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_to_scan_options() {
        let mut config = Config::new().with_max_threads(6);
        config.extensions = vec!["bin".to_string()];
        config.filenames = vec!["core".to_string()];
        config.max_depth = Some(1);
        config.min_size = Some(4);

        let options = config.to_scan_options();
        assert_eq!(options.thread_count(), 6);
        assert_eq!(options.extensions(), &[".bin"]);
        assert_eq!(options.filename_mode(), FilenameMode::Contains);
        assert_eq!(options.max_depth(), Some(1));
        assert!(options.accepts(Path::new("libcore.bin"), 1, 4));
        assert!(!options.accepts(Path::new("libcore.bin"), 2, 4));
    }
}
