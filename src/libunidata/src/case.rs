// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Case mapping data.
//!
//! Every code point has 16 bits of _props_:
//!
//! ```text
//!  15..7  signed delta to the simple case mapping (no exception)
//!  15..4  index of the exception record (with exception)
//!      6..5  dot type (no exception; stored in the exception word otherwise)
//!         4  case sensitive (no exception; stored in the exception word otherwise)
//!         3  has exception
//!         2  case-ignorable
//!      1..0  case type: none, lower, upper, title
//! ```
//!
//! Without an exception, lowercase characters map to uppercase and titlecase by adding the
//! delta, while uppercase and titlecase characters map to lowercase and case fold by adding it.
//!
//! An exception record starts with the _exception word_. Its low byte tells which optional
//! slots follow: simple lowercase, case folding, uppercase, titlecase mappings, a delta,
//! the length of the closure string, and the lengths of the full mappings. The slots are one
//! unit wide each, or two units (high, low) with `EXC_DOUBLE_SLOTS`. The full mapping strings
//! (lowercase, case folding, uppercase, titlecase) follow the slots, then the closure string.
//!
//! The _unfold_ table maps multi-character case foldings back to the code points that fold to
//! them. The first row is a header with the row count, row width, and string width. Each
//! following row has a zero-padded folding string and zero-padded code points; rows are sorted
//! by string.
//!
//! The _Greek_ table holds uppercasing data for Greek letters in U+0370..U+03FF,
//! U+1F00..U+1FFF, and U+2126.

use libtrie::{ByteReader, CodePointTrie, MAX_CODE_POINT};

use crate::binary;
use crate::case_builder;
use crate::{DataError, Result};

/// Magic bytes of case data images.
pub const DATA_FORMAT: [u8; 4] = *b"cAsE";

pub const TYPE_MASK: u16 = 3;
pub const NONE: u16 = 0;
pub const LOWER: u16 = 1;
pub const UPPER: u16 = 2;
pub const TITLE: u16 = 3;

pub const IGNORABLE: u16 = 4;
pub const EXCEPTION: u16 = 8;
pub const SENSITIVE: u16 = 0x10;

pub const DOT_MASK: u16 = 0x60;
pub const NO_DOT: u16 = 0;
pub const SOFT_DOTTED: u16 = 0x20;
pub const ABOVE: u16 = 0x40;
pub const OTHER_ACCENT: u16 = 0x60;

pub const DELTA_SHIFT: u32 = 7;
pub const MAX_DELTA: i32 = 0xFF;
pub const MIN_DELTA: i32 = -MAX_DELTA - 1;

pub const EXC_SHIFT: u32 = 4;
/// Exception indexes must fit into 12 bits.
pub const MAX_EXCEPTIONS: usize = 1 << 12;

pub const EXC_LOWER: u32 = 0;
pub const EXC_FOLD: u32 = 1;
pub const EXC_UPPER: u32 = 2;
pub const EXC_TITLE: u32 = 3;
pub const EXC_DELTA: u32 = 4;
pub const EXC_CLOSURE: u32 = 6;
pub const EXC_FULL_MAPPINGS: u32 = 7;

pub const EXC_DOUBLE_SLOTS: u16 = 0x100;
pub const EXC_NO_SIMPLE_CASE_FOLDING: u16 = 0x200;
pub const EXC_DELTA_IS_NEGATIVE: u16 = 0x400;
pub const EXC_SENSITIVE: u16 = 0x800;
pub const EXC_DOT_SHIFT: u32 = 7;
pub const EXC_CONDITIONAL_SPECIAL: u16 = 0x4000;
pub const EXC_CONDITIONAL_FOLD: u16 = 0x8000;

/// Nibble masks of the full mappings slot.
pub const FULL_LOWER: u16 = 0xF;
pub const CLOSURE_MAX_LENGTH: u16 = 0xF;

pub const UNFOLD_ROWS: usize = 0;
pub const UNFOLD_ROW_WIDTH: usize = 1;
pub const UNFOLD_STRING_WIDTH: usize = 2;

pub const GREEK_TABLE_LENGTH: usize = 0x191;
pub const UPPER_MASK: u16 = 0x3FF;
pub const HAS_VOWEL: u16 = 0x1000;
pub const HAS_YPOGEGRAMMENI: u16 = 0x2000;
pub const HAS_ACCENT: u16 = 0x4000;
pub const HAS_DIALYTIKA: u16 = 0x8000;

const IX_INDEX_COUNT: usize = 0;
const IX_LENGTH: usize = 1;
const IX_TRIE_SIZE: usize = 2;
const IX_EXC_LENGTH: usize = 3;
const IX_UNFOLD_LENGTH: usize = 4;
const IX_GREEK_LENGTH: usize = 5;
const IX_MAX_FULL_LENGTH: usize = 15;
const IX_COUNT: usize = 16;

/// Position of a code point in the Greek table.
pub fn greek_index(c: u32) -> Option<usize> {
    match c {
        0x0370..=0x03FF => Some((c - 0x0370) as usize),
        0x1F00..=0x1FFF => Some((c - 0x1F00) as usize + 0x90),
        0x2126 => Some(0x190),
        _ => None,
    }
}

/// Is the slot present according to the exception word?
#[inline]
pub fn has_slot(exc_word: u16, slot: u32) -> bool {
    exc_word & (1 << slot) != 0
}

/// Offset of a slot from the exception word, in slot widths.
#[inline]
pub fn slot_offset(exc_word: u16, slot: u32) -> usize {
    ((exc_word & ((1 << slot) - 1)).count_ones()) as usize
}

/// Case properties.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseData {
    pub unicode_version: [u8; 3],
    pub trie: CodePointTrie<u16>,
    pub exceptions: Vec<u16>,
    pub unfold: Vec<u16>,
    pub greek: Vec<u16>,
    /// Length of the longest full case mapping in code units.
    pub max_full_length: u32,
}

impl CaseData {
    /// Generate the data from the character database.
    pub fn build() -> Result<CaseData> {
        case_builder::build()
    }

    /// Serialize the data into an image accepted by `from_bytes()`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut trie_bytes = Vec::new();
        self.trie.write_to(&mut trie_bytes);

        let total = IX_COUNT * 4 + trie_bytes.len()
            + 2 * (self.exceptions.len() + self.unfold.len() + self.greek.len());
        let mut indexes = [0u32; IX_COUNT];
        indexes[IX_INDEX_COUNT] = IX_COUNT as u32;
        indexes[IX_LENGTH] = total as u32;
        indexes[IX_TRIE_SIZE] = trie_bytes.len() as u32;
        indexes[IX_EXC_LENGTH] = self.exceptions.len() as u32;
        indexes[IX_UNFOLD_LENGTH] = self.unfold.len() as u32;
        indexes[IX_GREEK_LENGTH] = self.greek.len() as u32;
        indexes[IX_MAX_FULL_LENGTH] = self.max_full_length;

        let mut out = Vec::with_capacity(binary::HEADER_SIZE + total);
        binary::write_header(&mut out, DATA_FORMAT, self.unicode_version);
        binary::write_u32s(&mut out, &indexes);
        out.extend_from_slice(&trie_bytes);
        binary::write_u16s(&mut out, &self.exceptions);
        binary::write_u16s(&mut out, &self.unfold);
        binary::write_u16s(&mut out, &self.greek);
        out
    }

    /// Load and validate an image produced by `to_bytes()`.
    pub fn from_bytes(bytes: &[u8]) -> Result<CaseData> {
        let mut reader = ByteReader::new(bytes);
        let unicode_version = binary::read_header(&mut reader, DATA_FORMAT)?;

        let base = reader.position();
        let count = reader.read_u32()? as usize;
        if count < IX_COUNT {
            return Err(DataError::Malformed("index table is too short"));
        }
        let mut indexes = vec![count as u32];
        for _ in 1..count {
            indexes.push(reader.read_u32()?);
        }
        if base + indexes[IX_LENGTH] as usize > bytes.len() {
            return Err(DataError::Truncated("case data"));
        }

        let trie_start = reader.position();
        let trie = CodePointTrie::<u16>::read_from(&mut reader)?;
        if reader.position() - trie_start != indexes[IX_TRIE_SIZE] as usize {
            return Err(DataError::Malformed("trie size mismatch"));
        }
        let mut section = |length: u32, what: &'static str| -> Result<Vec<u16>> {
            let start = reader.position();
            binary::read_u16_section(&mut reader, start, start + 2 * length as usize, what)
        };
        let exceptions = section(indexes[IX_EXC_LENGTH], "exceptions")?;
        let unfold = section(indexes[IX_UNFOLD_LENGTH], "unfold table")?;
        let greek = section(indexes[IX_GREEK_LENGTH], "Greek table")?;

        let data = CaseData {
            unicode_version,
            trie,
            exceptions,
            unfold,
            greek,
            max_full_length: indexes[IX_MAX_FULL_LENGTH],
        };
        data.validate()?;
        Ok(data)
    }

    fn validate(&self) -> Result<()> {
        if self.greek.len() != GREEK_TABLE_LENGTH {
            return Err(DataError::Malformed("Greek table has wrong size"));
        }
        if !self.unfold.is_empty() {
            if self.unfold.len() < 3 {
                return Err(DataError::Malformed("unfold header is truncated"));
            }
            let rows = usize::from(self.unfold[UNFOLD_ROWS]);
            let row_width = usize::from(self.unfold[UNFOLD_ROW_WIDTH]);
            let string_width = usize::from(self.unfold[UNFOLD_STRING_WIDTH]);
            if row_width < 3 || string_width >= row_width
                || (rows + 1) * row_width != self.unfold.len()
            {
                return Err(DataError::Malformed("unfold table dimensions"));
            }
        }

        for range in self.trie.ranges() {
            let props = range.value;
            if props & EXCEPTION != 0 {
                self.check_exception(usize::from(props >> EXC_SHIFT))?;
            } else if props & TYPE_MASK != NONE {
                let delta = i64::from((props as i16) >> DELTA_SHIFT);
                if i64::from(range.start) + delta < 0
                    || i64::from(range.end) + delta > i64::from(MAX_CODE_POINT)
                {
                    return Err(DataError::Malformed("case delta out of range"));
                }
            }
        }
        Ok(())
    }

    /// Check that an exception record lies within the data.
    fn check_exception(&self, index: usize) -> Result<()> {
        let exc_word = *self.exceptions.get(index)
            .ok_or(DataError::Malformed("exception index out of range"))?;
        let width = if exc_word & EXC_DOUBLE_SLOTS != 0 { 2 } else { 1 };
        let slots = ((exc_word & 0xFF).count_ones() as usize) * width;
        let strings = index + 1 + slots;
        if strings > self.exceptions.len() {
            return Err(DataError::Malformed("exception slots run past the data"));
        }
        let slot = |slot: u32| -> u32 {
            let i = index + 1 + slot_offset(exc_word, slot) * width;
            if width == 2 {
                (u32::from(self.exceptions[i]) << 16) | u32::from(self.exceptions[i + 1])
            } else {
                u32::from(self.exceptions[i])
            }
        };
        for &mapping in &[EXC_LOWER, EXC_FOLD, EXC_UPPER, EXC_TITLE, EXC_DELTA] {
            if has_slot(exc_word, mapping) && slot(mapping) > MAX_CODE_POINT {
                return Err(DataError::Malformed("exception mapping out of range"));
            }
        }
        let mut length = 0;
        if has_slot(exc_word, EXC_FULL_MAPPINGS) {
            let full = slot(EXC_FULL_MAPPINGS);
            length += (0..4).map(|i| ((full >> (4 * i)) & 0xF) as usize).sum::<usize>();
        }
        if has_slot(exc_word, EXC_CLOSURE) {
            length += (slot(EXC_CLOSURE) & u32::from(CLOSURE_MAX_LENGTH)) as usize;
        }
        if strings + length > self.exceptions.len() {
            return Err(DataError::Malformed("exception strings run past the data"));
        }
        Ok(())
    }
}
