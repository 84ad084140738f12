// Mon Feb 02 2026 - Alex

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MaskType {
    Wildcard = 0,
    Byte = 1,
}

impl MaskType {
    pub fn is_wildcard(self) -> bool {
        self == MaskType::Wildcard
    }

    pub fn from_code_char(c: char) -> Option<Self> {
        match c {
            'x' | 'X' => Some(MaskType::Byte),
            '?' => Some(MaskType::Wildcard),
            _ => None,
        }
    }
}

impl From<bool> for MaskType {
    fn from(significant: bool) -> Self {
        if significant {
            MaskType::Byte
        } else {
            MaskType::Wildcard
        }
    }
}

/// Pattern bytes paired with a per-byte mask. Wildcard positions store 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternMask {
    bytes: Vec<u8>,
    mask: Vec<MaskType>,
}

impl PatternMask {
    pub fn new(bytes: Vec<u8>, mask: Vec<MaskType>) -> Self {
        debug_assert_eq!(bytes.len(), mask.len());
        let bytes = bytes
            .into_iter()
            .zip(mask.iter())
            .map(|(b, m)| if m.is_wildcard() { 0 } else { b })
            .collect();
        Self { bytes, mask }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mask(&self) -> &[MaskType] {
        &self.mask
    }

    /// Mask as raw bytes (1 = byte, 0 = wildcard), used for hashing.
    pub fn mask_bytes(&self) -> Vec<u8> {
        self.mask.iter().map(|&m| m as u8).collect()
    }

    pub fn wildcard_count(&self) -> usize {
        self.mask.iter().filter(|m| m.is_wildcard()).count()
    }

    /// Compares against the start of `data`. `data` shorter than the mask never matches.
    pub fn matches(&self, data: &[u8]) -> bool {
        if self.bytes.is_empty() || data.len() < self.bytes.len() {
            return false;
        }
        self.bytes
            .iter()
            .zip(self.mask.iter())
            .zip(data.iter())
            .all(|((&pattern_byte, &mask), &data_byte)| {
                mask.is_wildcard() || pattern_byte == data_byte
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_bytes_are_zeroed() {
        let mask = PatternMask::new(vec![0xAA, 0xBB], vec![MaskType::Byte, MaskType::Wildcard]);
        assert_eq!(mask.bytes(), &[0xAA, 0x00]);
        assert_eq!(mask.wildcard_count(), 1);
    }

    #[test]
    fn test_matches_short_data() {
        let mask = PatternMask::new(vec![0xAA, 0xBB], vec![MaskType::Byte, MaskType::Byte]);
        assert!(mask.matches(&[0xAA, 0xBB, 0xCC]));
        assert!(!mask.matches(&[0xAA]));
        assert!(!PatternMask::default().matches(&[0xAA]));
    }

    #[test]
    fn test_mask_type_from_code_char() {
        assert_eq!(MaskType::from_code_char('x'), Some(MaskType::Byte));
        assert_eq!(MaskType::from_code_char('?'), Some(MaskType::Wildcard));
        assert_eq!(MaskType::from_code_char('z'), None);
    }
}
