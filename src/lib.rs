// Tue Jan 15 2026 - Alex

pub mod config;
pub mod engine;
pub mod pattern;
pub mod scanner;
pub mod ui;

pub use config::{Config, ConfigError};
pub use engine::{PoolState, SchedulerStats, TaskScheduler};
pub use pattern::{PatternError, Signature};
pub use scanner::{
    DirectoryResults, FileResults, MultiScanner, ScanError, ScanOptions, ScanResults, Scanner,
    ThreadingMode,
};
