// Wed Jan 15 2026 - Alex

use crate::config::Config;
use crate::scanner::{ExtensionMode, FilenameMode, ThreadingMode};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sigscanner")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Multi-threaded byte signature scanner for files and directory trees", long_about = None)]
pub struct Args {
    /// IDA-style signature, e.g. "48 8B ?? ?? 89"
    pub signature: String,

    /// File or directory to scan
    #[arg(default_value = ".")]
    pub path: PathBuf,

    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Deepest directory level to scan; 0 is the root itself
    #[arg(short, long)]
    pub depth: Option<usize>,

    #[arg(long, conflicts_with = "depth")]
    pub no_recurse: bool,

    /// Only scan files with this extension (repeatable)
    #[arg(short, long = "ext")]
    pub extensions: Vec<String>,

    /// Skip files with this extension (repeatable)
    #[arg(long, conflicts_with = "extensions")]
    pub exclude_ext: Vec<String>,

    /// Only scan files whose name contains this text (repeatable)
    #[arg(short, long = "name")]
    pub names: Vec<String>,

    #[arg(long)]
    pub min_size: Option<u64>,

    #[arg(long)]
    pub max_size: Option<u64>,

    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    #[arg(long)]
    pub block_size: Option<usize>,

    /// List offsets in descending order
    #[arg(long)]
    pub reverse: bool,

    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub json: bool,

    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    #[arg(short, long)]
    pub quiet: bool,

    #[arg(long)]
    pub no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    PerFile,
    PerChunk,
}

impl From<ModeArg> for ThreadingMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::PerFile => ThreadingMode::PerFile,
            ModeArg::PerChunk => ThreadingMode::PerChunk,
        }
    }
}

impl Args {
    pub fn validate(&self) -> Result<(), String> {
        if self.threads == Some(0) {
            return Err("Thread count must be at least 1".to_string());
        }
        if self.block_size == Some(0) {
            return Err("Block size must be at least 1".to_string());
        }
        if let (Some(min), Some(max)) = (self.min_size, self.max_size) {
            if min > max {
                return Err(format!("--min-size ({}) is larger than --max-size ({})", min, max));
            }
        }
        Ok(())
    }

    /// Command line flags win over whatever the config file says.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(threads) = self.threads {
            config.max_threads = threads;
        }
        if self.no_recurse {
            config.max_depth = Some(0);
        } else if self.depth.is_some() {
            config.max_depth = self.depth;
        }
        if !self.extensions.is_empty() {
            config.extension_mode = ExtensionMode::Allow;
            config.extensions = self.extensions.clone();
        } else if !self.exclude_ext.is_empty() {
            config.extension_mode = ExtensionMode::Deny;
            config.extensions = self.exclude_ext.clone();
        }
        if !self.names.is_empty() {
            config.filename_mode = FilenameMode::Contains;
            config.filenames = self.names.clone();
        }
        if self.min_size.is_some() {
            config.min_size = self.min_size;
        }
        if self.max_size.is_some() {
            config.max_size = self.max_size;
        }
        if let Some(mode) = self.mode {
            config.threading_mode = mode.into();
        }
        if let Some(block_size) = self.block_size {
            config.block_size = block_size;
        }
        if self.json {
            config.json_output = true;
        }
        if self.no_color {
            config.enable_colors = false;
        }
    }
}
