// Mon Feb 02 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("Invalid token '{token}' at position {position}")]
    InvalidToken { token: String, position: usize },
    #[error("Invalid mask character '{0}'")]
    InvalidMask(char),
    #[error("Pattern and mask length differ: {pattern} vs {mask}")]
    LengthMismatch { pattern: usize, mask: usize },
    #[error("Pattern is empty")]
    Empty,
}
