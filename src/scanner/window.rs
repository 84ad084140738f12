// Wed Feb 04 2026 - Alex

use crate::pattern::Signature;
use std::io::{self, Read, Seek, SeekFrom};

/// One block of input plus the absolute offset of its first byte.
///
/// A chunk owns the match start positions `[base, base + owned_len)`. The bytes
/// after that are the tail shared with the next chunk and are only there so
/// matches starting in the owned range can complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    base: u64,
    data: Vec<u8>,
    owned: usize,
}

impl Chunk {
    pub fn base(&self) -> u64 {
        self.base
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn owned_len(&self) -> usize {
        self.owned
    }

    pub fn is_final(&self) -> bool {
        self.owned == self.data.len()
    }

    /// The prefix in which a pattern of `pattern_len` bytes can only start at owned positions.
    pub fn view_for(&self, pattern_len: usize) -> &[u8] {
        let end = (self.owned + pattern_len.saturating_sub(1)).min(self.data.len());
        &self.data[..end]
    }

    pub fn scan(&self, signature: &Signature) -> Vec<u64> {
        signature.scan(self.view_for(signature.len()), self.base)
    }
}

/// Splits a byte stream into blocks that overlap by `overlap` bytes.
///
/// The window keeps the last `overlap` bytes of each block and prepends them to
/// the next one, so block `k` starts at `k * (block_size - overlap)`. With
/// `overlap = longest_pattern - 1`, every match of every pattern is reported by
/// exactly one chunk.
pub struct ChunkWindow<R> {
    reader: R,
    block_size: usize,
    overlap: usize,
    carry: Vec<u8>,
    next_base: u64,
    finished: bool,
}

impl<R: Read> ChunkWindow<R> {
    /// `block_size` is raised to `overlap + 1` if needed so the window always advances.
    pub fn new(reader: R, block_size: usize, overlap: usize) -> Self {
        Self {
            reader,
            block_size: block_size.max(overlap + 1),
            overlap,
            carry: Vec::new(),
            next_base: 0,
            finished: false,
        }
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    pub fn next_chunk(&mut self) -> io::Result<Option<Chunk>> {
        if self.finished {
            return Ok(None);
        }

        let mut data = Vec::with_capacity(self.block_size);
        data.append(&mut self.carry);

        let reached_eof = match fill(&mut self.reader, &mut data, self.block_size) {
            Ok(eof) => eof,
            Err(e) => {
                self.finished = true;
                return Err(e);
            }
        };
        let base = self.next_base;

        if reached_eof {
            self.finished = true;
            if data.is_empty() {
                return Ok(None);
            }
            let owned = data.len();
            return Ok(Some(Chunk { base, data, owned }));
        }

        let owned = data.len() - self.overlap;
        self.carry.extend_from_slice(&data[owned..]);
        self.next_base = base + owned as u64;
        Ok(Some(Chunk { base, data, owned }))
    }
}

impl<R: Read> Iterator for ChunkWindow<R> {
    type Item = io::Result<Chunk>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_chunk().transpose()
    }
}

/// Chunk layout over an input of known length, for readers that fetch each
/// chunk on their own.
///
/// Chunk `k` starts at `k * (block_size - overlap)`, holds up to `block_size`
/// bytes and owns the starts up to the next chunk's base, so the ownership rule
/// is the same as for [`ChunkWindow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPlan {
    len: u64,
    block_size: usize,
    overlap: usize,
}

impl ChunkPlan {
    pub fn new(len: u64, block_size: usize, overlap: usize) -> Self {
        Self {
            len,
            block_size: block_size.max(overlap + 1),
            overlap,
        }
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn stride(&self) -> u64 {
        (self.block_size - self.overlap) as u64
    }

    pub fn chunk_count(&self) -> u64 {
        self.len.div_ceil(self.stride())
    }

    pub fn bases(&self) -> impl Iterator<Item = u64> {
        let stride = self.stride();
        (0..self.chunk_count()).map(move |k| k * stride)
    }

    /// Seeks to `base` and reads that chunk. An input shorter than the planned
    /// length fails with `UnexpectedEof`.
    pub fn read_chunk<R: Read + Seek>(&self, reader: &mut R, base: u64) -> io::Result<Chunk> {
        if base >= self.len {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("chunk base {} is past the end ({} bytes)", base, self.len),
            ));
        }
        let remaining = self.len - base;
        let wanted = remaining.min(self.block_size as u64) as usize;
        let owned = remaining.min(self.stride()) as usize;

        reader.seek(SeekFrom::Start(base))?;
        let mut data = vec![0; wanted];
        reader.read_exact(&mut data)?;
        Ok(Chunk { base, data, owned })
    }
}

/// Reads until `data` holds `target` bytes or the reader is exhausted.
/// Returns true on end of input.
fn fill<R: Read>(reader: &mut R, data: &mut Vec<u8>, target: usize) -> io::Result<bool> {
    let mut len = data.len();
    data.resize(target, 0);
    let result = loop {
        if len == target {
            break Ok(false);
        }
        match reader.read(&mut data[len..]) {
            Ok(0) => break Ok(true),
            Ok(n) => len += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => break Err(e),
        }
    };
    data.truncate(len);
    result
}
