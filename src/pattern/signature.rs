// Mon Feb 02 2026 - Alex

use crate::pattern::{MaskType, PatternError, PatternMask};
use ahash::RandomState;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

// Fixed seeds keep digests stable across runs and processes.
fn digest_state() -> RandomState {
    RandomState::with_seeds(
        0x5349_4753_4341_4e31,
        0x9e37_79b9_7f4a_7c15,
        0xc2b2_ae3d_27d4_eb4f,
        0x1656_67b1_9e37_79f9,
    )
}

/// A masked byte pattern.
///
/// Identity is a 64-bit digest of the pattern and mask bytes, computed once at
/// construction. Equality checks the digest first and then the pattern itself,
/// so two signatures that collide on the digest are still distinct map keys.
///
/// `Signature::default()` is the empty signature. It is invalid and never matches.
#[derive(Debug, Clone, Default)]
pub struct Signature {
    mask: PatternMask,
    digest: u64,
}

impl Signature {
    /// Parses an IDA-style pattern such as `"48 8B ?? ?? 89"`.
    ///
    /// Tokens are separated by a single space and are either two hex digits or
    /// `??`. A pattern made only of single `?` tokens is also accepted, but the
    /// two widths cannot be mixed. Surrounding whitespace is ignored.
    pub fn parse(text: &str) -> Result<Self, PatternError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PatternError::Empty);
        }

        let width = text.split(' ').next().map_or(0, str::len);
        let mut bytes = Vec::new();
        let mut mask = Vec::new();

        for (position, token) in text.split(' ').enumerate() {
            if token.len() != width {
                return Err(PatternError::InvalidToken {
                    token: token.to_string(),
                    position,
                });
            }
            match token {
                "?" | "??" => {
                    bytes.push(0);
                    mask.push(MaskType::Wildcard);
                }
                _ if token.len() == 2 && token.bytes().all(|b| b.is_ascii_hexdigit()) => {
                    let byte = u8::from_str_radix(token, 16).map_err(|_| PatternError::InvalidToken {
                        token: token.to_string(),
                        position,
                    })?;
                    bytes.push(byte);
                    mask.push(MaskType::Byte);
                }
                _ => {
                    return Err(PatternError::InvalidToken {
                        token: token.to_string(),
                        position,
                    })
                }
            }
        }

        Self::from_mask(PatternMask::new(bytes, mask))
    }

    /// Builds a signature from raw bytes and a mask string of `x` / `?`,
    /// e.g. `(b"\x48\x8B\x00\x00", "xx??")`.
    pub fn from_code_style(pattern: &[u8], mask: &str) -> Result<Self, PatternError> {
        let mask_len = mask.chars().count();
        if pattern.len() != mask_len {
            return Err(PatternError::LengthMismatch {
                pattern: pattern.len(),
                mask: mask_len,
            });
        }

        let mask = mask
            .chars()
            .map(|c| MaskType::from_code_char(c).ok_or(PatternError::InvalidMask(c)))
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_mask(PatternMask::new(pattern.to_vec(), mask))
    }

    /// Builds a signature from parallel byte and significance arrays.
    pub fn from_parts(bytes: Vec<u8>, mask: Vec<bool>) -> Result<Self, PatternError> {
        if bytes.len() != mask.len() {
            return Err(PatternError::LengthMismatch {
                pattern: bytes.len(),
                mask: mask.len(),
            });
        }
        let mask = mask.into_iter().map(MaskType::from).collect();
        Self::from_mask(PatternMask::new(bytes, mask))
    }

    fn from_mask(mask: PatternMask) -> Result<Self, PatternError> {
        if mask.is_empty() {
            return Err(PatternError::Empty);
        }
        let state = digest_state();
        let h1 = state.hash_one(mask.bytes());
        let h2 = state.hash_one(mask.mask_bytes().as_slice());
        Ok(Self {
            digest: h1 ^ (h2 << 1),
            mask,
        })
    }

    pub fn len(&self) -> usize {
        self.mask.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mask.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        !self.mask.is_empty()
    }

    pub fn digest(&self) -> u64 {
        self.digest
    }

    pub fn mask(&self) -> &PatternMask {
        &self.mask
    }

    /// True if the signature matches `buffer` starting at `at`.
    pub fn check(&self, buffer: &[u8], at: usize) -> bool {
        match buffer.get(at..) {
            Some(rest) => self.mask.matches(rest),
            None => false,
        }
    }

    /// All match offsets in ascending order, each reported as `base + index`.
    pub fn scan(&self, buffer: &[u8], base: u64) -> Vec<u64> {
        if !self.is_valid() || buffer.len() < self.len() {
            return Vec::new();
        }
        buffer
            .windows(self.len())
            .enumerate()
            .filter(|(_, window)| self.mask.matches(window))
            .map(|(i, _)| base + i as u64)
            .collect()
    }

    /// Same matches as [`Signature::scan`], walked from the end of the buffer.
    pub fn reverse_scan(&self, buffer: &[u8], base: u64) -> Vec<u64> {
        if !self.is_valid() || buffer.len() < self.len() {
            return Vec::new();
        }
        buffer
            .windows(self.len())
            .enumerate()
            .rev()
            .filter(|(_, window)| self.mask.matches(window))
            .map(|(i, _)| base + i as u64)
            .collect()
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.digest == other.digest && self.mask == other.mask
    }
}

impl Eq for Signature {}

impl Hash for Signature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.digest);
    }
}

impl FromStr for Signature {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Signature::parse(s)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (byte, mask)) in self.mask.bytes().iter().zip(self.mask.mask()).enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            if mask.is_wildcard() {
                f.write_str("??")?;
            } else {
                write!(f, "{:02X}", byte)?;
            }
        }
        Ok(())
    }
}
