// Wed Feb 04 2026 - Alex

pub mod error;
pub mod multi;
pub mod options;
pub mod result;
pub mod single;
pub mod walk;
pub mod window;

pub use error::ScanError;
pub use multi::MultiScanner;
pub use options::{ExtensionMode, FilenameMode, ScanOptions, ThreadingMode, DEFAULT_BLOCK_SIZE};
pub use result::{
    sort_directory_offsets, sort_offsets, total_directory_matches, total_matches, DirectoryResults,
    FileResults, ScanResults,
};
pub use single::Scanner;
pub use walk::FileEntry;
pub use window::{Chunk, ChunkPlan, ChunkWindow};
