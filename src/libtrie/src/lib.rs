// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Compact code point tries.
//!
//! A code point trie maps every Unicode code point (U+0000..U+10FFFF) to a small fixed-width
//! integer. Character property tables are highly repetitive: long runs of code points share
//! the same value, and many 64-code-point blocks are exact copies of each other. The trie
//! stores every distinct block once and reaches it through one index lookup for the Basic
//! Multilingual Plane or two index lookups for supplementary code points.
//!
//! Code points at or above the _high start_ all share a single _high value_ and take no
//! space at all. Values outside of the code point range yield the _error value_.
//!
//! Tries are immutable once built. They are created with a `TrieBuilder` or deserialized
//! from bytes produced by `CodePointTrie::write_to()`.

mod builder;
mod value;

pub use crate::builder::TrieBuilder;
pub use crate::value::TrieValue;

use thiserror::Error;

/// Largest Unicode code point.
pub const MAX_CODE_POINT: u32 = 0x10FFFF;

pub(crate) const DATA_BLOCK_SHIFT: u32 = 6;
pub(crate) const DATA_BLOCK_LENGTH: usize = 1 << DATA_BLOCK_SHIFT;
pub(crate) const DATA_MASK: u32 = (DATA_BLOCK_LENGTH as u32) - 1;

pub(crate) const BMP_INDEX_LENGTH: usize = 0x10000 >> DATA_BLOCK_SHIFT;

pub(crate) const SUPP_SHIFT: u32 = 10;
pub(crate) const SUPP_BLOCK_SIZE: u32 = 1 << SUPP_SHIFT;
pub(crate) const INDEX_2_BLOCK_LENGTH: usize = 1 << (SUPP_SHIFT - DATA_BLOCK_SHIFT);

/// Errors detected while reading a serialized trie.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrieError {
    #[error("truncated data: need {needed} bytes, {available} available")]
    Truncated { needed: usize, available: usize },
    #[error("malformed trie header: {0}")]
    BadHeader(&'static str),
    #[error("trie index entry {position} points outside of the data")]
    BadIndex { position: usize },
}

pub type Result<T> = std::result::Result<T, TrieError>;

/// An immutable code point trie.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodePointTrie<T> {
    // Layout of the index:
    //
    //   [0, BMP_INDEX_LENGTH)                  data block numbers for the BMP
    //   [BMP_INDEX_LENGTH, + supp_index_len)   offsets of index-2 blocks, one per 1024 code points
    //   [..]                                   index-2 blocks, 16 data block numbers each
    index: Vec<u16>,
    data: Vec<T>,
    high_start: u32,
    high_value: T,
    error_value: T,
}

/// A maximal run of code points sharing the same trie value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodePointRange<T> {
    pub start: u32,
    /// Last code point of the range (inclusive).
    pub end: u32,
    pub value: T,
}

impl<T: TrieValue> CodePointTrie<T> {
    /// Look up the value of a code point.
    ///
    /// Surrogate code points are ordinary code points for the trie. Values above U+10FFFF
    /// produce the error value.
    #[inline]
    pub fn get(&self, c: u32) -> T {
        if c <= 0xFFFF {
            self.bmp_get(c)
        } else {
            self.supp_get(c)
        }
    }

    /// Look up the value of a BMP code point (or a single UTF-16 code unit).
    ///
    /// The argument must be at most U+FFFF.
    #[inline]
    pub fn bmp_get(&self, c: u32) -> T {
        debug_assert!(c <= 0xFFFF);
        let block = self.index[(c >> DATA_BLOCK_SHIFT) as usize] as usize;
        self.data[(block << DATA_BLOCK_SHIFT) | (c & DATA_MASK) as usize]
    }

    /// Look up the value of a supplementary code point.
    #[inline]
    pub fn supp_get(&self, c: u32) -> T {
        if c >= self.high_start {
            return if c <= MAX_CODE_POINT { self.high_value } else { self.error_value };
        }
        let i1 = BMP_INDEX_LENGTH + ((c - 0x10000) >> SUPP_SHIFT) as usize;
        let i2 = self.index[i1] as usize
            + ((c >> DATA_BLOCK_SHIFT) as usize & (INDEX_2_BLOCK_LENGTH - 1));
        let block = self.index[i2] as usize;
        self.data[(block << DATA_BLOCK_SHIFT) | (c & DATA_MASK) as usize]
    }

    /// First code point of the uniform high range.
    pub fn high_start(&self) -> u32 {
        self.high_start
    }

    /// Value shared by all code points from `high_start()` to U+10FFFF.
    pub fn high_value(&self) -> T {
        self.high_value
    }

    /// Value returned for integers outside of the code point range.
    pub fn error_value(&self) -> T {
        self.error_value
    }

    /// Iterate over maximal ranges of equal values, in code point order.
    pub fn ranges(&self) -> Ranges<'_, T> {
        Ranges { trie: self, next: 0 }
    }

    /// Number of distinct data values stored (a rough size metric).
    pub fn data_len(&self) -> usize {
        self.data.len()
    }

    /// Number of index entries stored.
    pub fn index_len(&self) -> usize {
        self.index.len()
    }

    //
    // Serialization
    //

    /// Serialize the trie.
    ///
    /// Layout (little-endian): high start (u32), index length (u32), data length (u32), high
    /// value, error value, index entries (u16 each), data values.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.high_start.to_le_bytes());
        out.extend_from_slice(&(self.index.len() as u32).to_le_bytes());
        out.extend_from_slice(&(self.data.len() as u32).to_le_bytes());
        self.high_value.write_le(out);
        self.error_value.write_le(out);
        for &entry in &self.index {
            out.extend_from_slice(&entry.to_le_bytes());
        }
        for &value in &self.data {
            value.write_le(out);
        }
    }

    /// Deserialize a trie written by `write_to()` from the front of the reader.
    ///
    /// Every index entry is validated so that lookups can never go out of bounds.
    pub fn read_from(reader: &mut ByteReader<'_>) -> Result<Self> {
        let high_start = reader.read_u32()?;
        let index_len = reader.read_u32()? as usize;
        let data_len = reader.read_u32()? as usize;
        let high_value = reader.read_value::<T>()?;
        let error_value = reader.read_value::<T>()?;

        if high_start < 0x10000 || high_start > MAX_CODE_POINT + 1
            || (high_start % SUPP_BLOCK_SIZE) != 0
        {
            return Err(TrieError::BadHeader("high start out of range"));
        }
        if data_len == 0 || (data_len % DATA_BLOCK_LENGTH) != 0 {
            return Err(TrieError::BadHeader("data length is not a whole number of blocks"));
        }
        let supp_index_len = ((high_start - 0x10000) >> SUPP_SHIFT) as usize;
        let index2_start = BMP_INDEX_LENGTH + supp_index_len;
        if index_len < index2_start || index_len > usize::from(u16::MAX) + 1 {
            return Err(TrieError::BadHeader("index length out of range"));
        }

        let needed = index_len * 2 + data_len.saturating_mul(T::BYTES);
        if needed > reader.remaining() {
            return Err(TrieError::Truncated { needed, available: reader.remaining() });
        }

        let mut index = Vec::with_capacity(index_len);
        for _ in 0..index_len {
            index.push(reader.read_u16()?);
        }
        let mut data = Vec::with_capacity(data_len);
        for _ in 0..data_len {
            data.push(reader.read_value::<T>()?);
        }

        let block_count = data_len / DATA_BLOCK_LENGTH;
        for (position, &entry) in index.iter().enumerate() {
            let valid = if position < BMP_INDEX_LENGTH || position >= index2_start {
                (entry as usize) < block_count
            } else {
                let offset = entry as usize;
                offset >= index2_start && offset + INDEX_2_BLOCK_LENGTH <= index_len
            };
            if !valid {
                return Err(TrieError::BadIndex { position });
            }
        }

        Ok(CodePointTrie { index, data, high_start, high_value, error_value })
    }

    /// Deserialize a trie from a byte slice that contains nothing else.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = ByteReader::new(bytes);
        let trie = Self::read_from(&mut reader)?;
        if reader.remaining() != 0 {
            return Err(TrieError::BadHeader("trailing bytes after trie data"));
        }
        Ok(trie)
    }
}

/// Iterator over value ranges of a trie.
pub struct Ranges<'a, T> {
    trie: &'a CodePointTrie<T>,
    next: u32,
}

impl<'a, T: TrieValue> Iterator for Ranges<'a, T> {
    type Item = CodePointRange<T>;

    fn next(&mut self) -> Option<CodePointRange<T>> {
        if self.next > MAX_CODE_POINT {
            return None;
        }
        let trie = self.trie;
        let start = self.next;
        let value = trie.get(start);
        let mut end = start;
        loop {
            let following = end + 1;
            if following > MAX_CODE_POINT {
                break;
            }
            if following >= trie.high_start {
                // Everything from high_start on is uniform.
                if value == trie.high_value {
                    end = MAX_CODE_POINT;
                }
                break;
            }
            // Skip whole BMP data blocks filled with the same value.
            if following & DATA_MASK == 0 && following <= 0xFFFF {
                let block = trie.index[(following >> DATA_BLOCK_SHIFT) as usize] as usize;
                let base = block << DATA_BLOCK_SHIFT;
                if trie.data[base..base + DATA_BLOCK_LENGTH].iter().all(|&v| v == value) {
                    end += DATA_BLOCK_LENGTH as u32;
                    continue;
                }
            }
            if trie.get(following) != value {
                break;
            }
            end = following;
        }
        self.next = end + 1;
        Some(CodePointRange { start, end, value })
    }
}

/// Little-endian reader over a byte image.
///
/// Every read is bounds checked and reports `TrieError::Truncated` instead of panicking.
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> ByteReader<'a> {
        ByteReader { bytes, position: 0 }
    }

    /// Number of bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    /// Current offset from the start of the image.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Consume the next `count` bytes.
    pub fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(TrieError::Truncated { needed: count, available: self.remaining() });
        }
        let slice = &self.bytes[self.position..self.position + count];
        self.position += count;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_value::<u16>()
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_value::<u32>()
    }

    pub fn read_value<T: TrieValue>(&mut self) -> Result<T> {
        Ok(T::read_le(self.take(T::BYTES)?))
    }

    /// Read `count` 16-bit units.
    pub fn read_u16_vec(&mut self, count: usize) -> Result<Vec<u16>> {
        let bytes = self.take(count.checked_mul(2).ok_or(TrieError::BadHeader("length overflow"))?)?;
        Ok(bytes.chunks(2).map(u16::read_le).collect())
    }
}
