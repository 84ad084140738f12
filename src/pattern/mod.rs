// Mon Feb 02 2026 - Alex

pub mod error;
pub mod mask;
pub mod signature;

pub use error::PatternError;
pub use mask::{MaskType, PatternMask};
pub use signature::Signature;
