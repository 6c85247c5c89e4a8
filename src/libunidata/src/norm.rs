// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Normalization data.
//!
//! Every code point is assigned a 16-bit _norm16_ value. The value space is split into
//! ordered ranges by thresholds stored in `NormIndexes`:
//!
//! ```text
//! 0 .. min_yes_no                            yes/yes: no mapping, ccc = 0; even values at
//!                                            or above JAMO_L point to a composition list
//! min_yes_no .. min_no_no                    yes/no: decomposes, but round-trips through
//!                                            composition (first range also has compositions)
//! min_no_no .. limit_no_no                   no/no: mapping which is not composition-stable,
//!                                            subranges for composition boundary properties
//! limit_no_no .. min_maybe_yes               algorithmic: maps to c + delta
//! min_maybe_yes .. MIN_NORMAL_MAYBE_YES      maybe/yes with a composition list
//! MIN_NORMAL_MAYBE_YES .. JAMO_VT            maybe/yes: combines backward, ccc in bits 1..8
//! JAMO_VT                                    conjoining Jamo vowels and trailing consonants
//! MIN_YES_YES_WITH_CC ..                     yes/yes with ccc in bits 1..8
//! ```
//!
//! Mappings and composition lists are stored in `extra`, a vector of 16-bit units. The
//! composition lists of maybe/yes characters come first (indexed from the start), followed
//! by _extra data_ proper, which is indexed by `norm16 >> OFFSET_SHIFT` relative to its start.
//!
//! A mapping entry consists of an optional raw mapping (its units followed by its length),
//! an optional word with the lead and own combining classes, the _first unit_ (trail ccc in
//! the high byte, flags and the mapping length in the low byte), and the mapping units.
//! Composition lists directly follow the mapping of yes/no characters.
//!
//! A composition list is a sequence of pairs or triples of units. The first unit holds the
//! trail code point (or its high bits for trails at or above `COMP_1_TRAIL_LIMIT`), whether
//! the entry is a triple, and whether it is the last one. The remaining units hold the
//! composite code point shifted left by one, with the lowest bit set if the composite
//! combines forward itself.

use libtrie::{ByteReader, CodePointTrie, MAX_CODE_POINT};

use crate::binary;
use crate::norm_builder;
use crate::{DataError, Result};

/// Magic bytes of normalization data images.
pub const DATA_FORMAT: [u8; 4] = *b"Nrm2";

pub const MIN_CCC_LCCC_CP: u32 = 0x300;

pub const INERT: u16 = 1;
pub const JAMO_L: u16 = 2;
pub const MIN_NORMAL_MAYBE_YES: u16 = 0xFC00;
pub const JAMO_VT: u16 = 0xFE00;
pub const MIN_YES_YES_WITH_CC: u16 = 0xFE02;

pub const HAS_COMP_BOUNDARY_AFTER: u16 = 1;
pub const OFFSET_SHIFT: u32 = 1;

pub const DELTA_TCCC_0: u16 = 0;
pub const DELTA_TCCC_1: u16 = 2;
pub const DELTA_TCCC_GT_1: u16 = 4;
pub const DELTA_TCCC_MASK: u16 = 6;
pub const DELTA_SHIFT: u32 = 3;

/// Largest distance between a character and its algorithmic mapping.
pub const MAX_DELTA: i32 = 0x40;

pub const MAPPING_HAS_CCC_LCCC_WORD: u16 = 0x80;
pub const MAPPING_HAS_RAW_MAPPING: u16 = 0x40;
pub const MAPPING_LENGTH_MASK: u16 = 0x1F;

pub const COMP_1_LAST_TUPLE: u16 = 0x8000;
pub const COMP_1_TRIPLE: u16 = 1;
pub const COMP_1_TRAIL_LIMIT: u32 = 0x3400;
pub const COMP_1_TRAIL_MASK: u16 = 0x7FFE;
pub const COMP_1_TRAIL_SHIFT: u32 = 9;
pub const COMP_2_TRAIL_SHIFT: u32 = 6;
pub const COMP_2_TRAIL_MASK: u16 = 0xFFC0;

/// Offset of the empty composition list inside extra data, used for Jamo L.
pub(crate) const EMPTY_LIST_OFFSET: usize = 1;

// Positions of values in the serialized index table.
const IX_NORM_TRIE_OFFSET: usize = 0;
const IX_EXTRA_DATA_OFFSET: usize = 1;
const IX_SMALL_FCD_OFFSET: usize = 2;
const IX_RESERVED3_OFFSET: usize = 3;
const IX_TOTAL_SIZE: usize = 7;
const IX_MIN_DECOMP_NO_CP: usize = 8;
const IX_MIN_COMP_NO_MAYBE_CP: usize = 9;
const IX_MIN_YES_NO: usize = 10;
const IX_MIN_NO_NO: usize = 11;
const IX_LIMIT_NO_NO: usize = 12;
const IX_MIN_MAYBE_YES: usize = 13;
const IX_MIN_YES_NO_MAPPINGS_ONLY: usize = 14;
const IX_MIN_NO_NO_COMP_BOUNDARY_BEFORE: usize = 15;
const IX_MIN_NO_NO_COMP_NO_MAYBE_CC: usize = 16;
const IX_MIN_NO_NO_EMPTY: usize = 17;
const IX_MIN_LCCC_CP: usize = 18;
const IX_COUNT: usize = 20;

/// Size of the small FCD bit set in bytes.
pub const SMALL_FCD_SIZE: usize = 0x100;

/// Which family of normalization forms a table serves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NormKind {
    /// Canonical decomposition mappings: NFC, NFD, FCD, FCC.
    Canonical,
    /// Compatibility decomposition mappings: NFKC, NFKD.
    Compatibility,
    /// NFKC_Casefold mappings: compatibility decomposition, case folding, and removal of
    /// default ignorable code points.
    CompatibilityCaseFold,
}

/// Thresholds partitioning the norm16 value space and code point ranges with trivial data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NormIndexes {
    /// Code points below this one decompose to themselves and have ccc = 0.
    pub min_decomp_no_cp: u32,
    /// Code points below this one are composition-stable with ccc = 0.
    pub min_comp_no_maybe_cp: u32,
    /// Code points below this one have lead ccc = 0.
    pub min_lccc_cp: u32,
    pub min_yes_no: u16,
    pub min_yes_no_mappings_only: u16,
    pub min_no_no: u16,
    pub min_no_no_comp_boundary_before: u16,
    pub min_no_no_comp_no_maybe_cc: u16,
    pub min_no_no_empty: u16,
    pub limit_no_no: u16,
    pub min_maybe_yes: u16,
}

impl NormIndexes {
    /// Base value of algorithmic mappings: the norm16 of "delta 0" shifted right.
    pub fn center_no_no_delta(&self) -> u16 {
        (self.min_maybe_yes >> DELTA_SHIFT).wrapping_sub(MAX_DELTA as u16 + 1)
    }

    /// Index of the first unit of extra data proper inside `NormData::extra`.
    pub fn extra_data_start(&self) -> usize {
        usize::from(MIN_NORMAL_MAYBE_YES.saturating_sub(self.min_maybe_yes)) >> OFFSET_SHIFT
    }

    /// Norm16 value of Hangul LV syllables.
    pub fn hangul_lv(&self) -> u16 {
        self.min_yes_no
    }

    /// Norm16 value of Hangul LVT syllables.
    pub fn hangul_lvt(&self) -> u16 {
        self.min_yes_no_mappings_only | HAS_COMP_BOUNDARY_AFTER
    }

    fn check_order(&self) -> Result<()> {
        let ordered = [
            JAMO_L,
            self.min_yes_no,
            self.min_yes_no_mappings_only,
            self.min_no_no,
            self.min_no_no_comp_boundary_before,
            self.min_no_no_comp_no_maybe_cc,
            self.min_no_no_empty,
            self.limit_no_no,
            self.min_maybe_yes,
            MIN_NORMAL_MAYBE_YES,
        ];
        if ordered.windows(2).any(|w| w[0] > w[1]) {
            return Err(DataError::Malformed("norm16 thresholds are out of order"));
        }
        if self.min_maybe_yes & ((1 << DELTA_SHIFT) - 1) != 0 {
            return Err(DataError::Malformed("min_maybe_yes is not aligned"));
        }
        if usize::from(self.min_maybe_yes >> DELTA_SHIFT) <= MAX_DELTA as usize + 1 {
            return Err(DataError::Malformed("no room for algorithmic mappings"));
        }
        if self.min_yes_no & 1 != 0 || self.min_yes_no_mappings_only & 1 != 0 {
            return Err(DataError::Malformed("Hangul norm16 values are misaligned"));
        }
        Ok(())
    }
}

/// Normalization data for one `NormKind`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormData {
    pub unicode_version: [u8; 3],
    pub indexes: NormIndexes,
    pub trie: CodePointTrie<u16>,
    /// Composition lists of maybe/yes characters followed by extra data.
    pub extra: Vec<u16>,
    /// One bit per 32 BMP code points (and lead surrogates): set if any code point in the
    /// block may have non-zero lead or trail ccc.
    pub small_fcd: Vec<u8>,
}

impl NormData {
    /// Generate the data from the character database.
    pub fn build(kind: NormKind) -> Result<NormData> {
        norm_builder::build(kind)
    }

    /// Serialize the data into an image accepted by `from_bytes()`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut trie_bytes = Vec::new();
        self.trie.write_to(&mut trie_bytes);

        let trie_offset = IX_COUNT * 4;
        let extra_offset = trie_offset + trie_bytes.len();
        let small_fcd_offset = extra_offset + self.extra.len() * 2;
        let total = small_fcd_offset + self.small_fcd.len();

        let ix = &self.indexes;
        let mut indexes = [0u32; IX_COUNT];
        indexes[IX_NORM_TRIE_OFFSET] = trie_offset as u32;
        indexes[IX_EXTRA_DATA_OFFSET] = extra_offset as u32;
        indexes[IX_SMALL_FCD_OFFSET] = small_fcd_offset as u32;
        for i in IX_RESERVED3_OFFSET..=IX_TOTAL_SIZE {
            indexes[i] = total as u32;
        }
        indexes[IX_MIN_DECOMP_NO_CP] = ix.min_decomp_no_cp;
        indexes[IX_MIN_COMP_NO_MAYBE_CP] = ix.min_comp_no_maybe_cp;
        indexes[IX_MIN_YES_NO] = u32::from(ix.min_yes_no);
        indexes[IX_MIN_NO_NO] = u32::from(ix.min_no_no);
        indexes[IX_LIMIT_NO_NO] = u32::from(ix.limit_no_no);
        indexes[IX_MIN_MAYBE_YES] = u32::from(ix.min_maybe_yes);
        indexes[IX_MIN_YES_NO_MAPPINGS_ONLY] = u32::from(ix.min_yes_no_mappings_only);
        indexes[IX_MIN_NO_NO_COMP_BOUNDARY_BEFORE] = u32::from(ix.min_no_no_comp_boundary_before);
        indexes[IX_MIN_NO_NO_COMP_NO_MAYBE_CC] = u32::from(ix.min_no_no_comp_no_maybe_cc);
        indexes[IX_MIN_NO_NO_EMPTY] = u32::from(ix.min_no_no_empty);
        indexes[IX_MIN_LCCC_CP] = ix.min_lccc_cp;

        let mut out = Vec::with_capacity(binary::HEADER_SIZE + total);
        binary::write_header(&mut out, DATA_FORMAT, self.unicode_version);
        binary::write_u32s(&mut out, &indexes);
        out.extend_from_slice(&trie_bytes);
        binary::write_u16s(&mut out, &self.extra);
        out.extend_from_slice(&self.small_fcd);
        out
    }

    /// Load and validate an image produced by `to_bytes()`.
    pub fn from_bytes(bytes: &[u8]) -> Result<NormData> {
        let mut reader = ByteReader::new(bytes);
        let unicode_version = binary::read_header(&mut reader, DATA_FORMAT)?;

        let base = reader.position();
        let first = reader.read_u32()? as usize;
        if first % 4 != 0 || first / 4 <= IX_MIN_LCCC_CP {
            return Err(DataError::Malformed("index table is too short"));
        }
        let mut raw = vec![first as u32];
        for _ in 1..first / 4 {
            raw.push(reader.read_u32()?);
        }
        let offset = |i: usize| base + raw[i] as usize;
        let narrow = |i: usize| -> Result<u16> {
            if raw[i] > 0xFFFF {
                return Err(DataError::Malformed("norm16 threshold out of range"));
            }
            Ok(raw[i] as u16)
        };

        let indexes = NormIndexes {
            min_decomp_no_cp: raw[IX_MIN_DECOMP_NO_CP],
            min_comp_no_maybe_cp: raw[IX_MIN_COMP_NO_MAYBE_CP],
            min_lccc_cp: raw[IX_MIN_LCCC_CP],
            min_yes_no: narrow(IX_MIN_YES_NO)?,
            min_yes_no_mappings_only: narrow(IX_MIN_YES_NO_MAPPINGS_ONLY)?,
            min_no_no: narrow(IX_MIN_NO_NO)?,
            min_no_no_comp_boundary_before: narrow(IX_MIN_NO_NO_COMP_BOUNDARY_BEFORE)?,
            min_no_no_comp_no_maybe_cc: narrow(IX_MIN_NO_NO_COMP_NO_MAYBE_CC)?,
            min_no_no_empty: narrow(IX_MIN_NO_NO_EMPTY)?,
            limit_no_no: narrow(IX_LIMIT_NO_NO)?,
            min_maybe_yes: narrow(IX_MIN_MAYBE_YES)?,
        };
        indexes.check_order()?;

        let trie_offset = offset(IX_NORM_TRIE_OFFSET);
        let extra_offset = offset(IX_EXTRA_DATA_OFFSET);
        let small_fcd_offset = offset(IX_SMALL_FCD_OFFSET);
        let total = offset(IX_TOTAL_SIZE);
        if reader.position() != trie_offset || trie_offset > extra_offset
            || extra_offset > small_fcd_offset || small_fcd_offset > total
        {
            return Err(DataError::Malformed("section offsets are out of order"));
        }
        if total > bytes.len() {
            return Err(DataError::Truncated("normalization data"));
        }

        let trie = CodePointTrie::<u16>::read_from(&mut reader)?;
        if reader.position() > extra_offset {
            return Err(DataError::Malformed("trie overlaps extra data"));
        }
        reader.take(extra_offset - reader.position())?;
        let extra = binary::read_u16_section(&mut reader, extra_offset, small_fcd_offset,
                                             "extra data")?;
        if total - small_fcd_offset != SMALL_FCD_SIZE {
            return Err(DataError::Malformed("small FCD table has wrong size"));
        }
        let small_fcd = reader.take(SMALL_FCD_SIZE)?.to_vec();

        let data = NormData { unicode_version, indexes, trie, extra, small_fcd };
        data.validate()?;
        Ok(data)
    }

    /// Check that every norm16 value in the trie refers to well-formed extra data.
    fn validate(&self) -> Result<()> {
        let ix = &self.indexes;
        let extra_start = ix.extra_data_start();
        if self.extra.len() < extra_start + EMPTY_LIST_OFFSET + 2 {
            return Err(DataError::Truncated("extra data"));
        }
        self.check_list(extra_start + EMPTY_LIST_OFFSET)?;

        for range in self.trie.ranges() {
            let norm16 = range.value;
            if norm16 == ix.hangul_lv() || norm16 == ix.hangul_lvt() {
                if range.start < 0xAC00 || range.end > 0xD7A3 {
                    return Err(DataError::Malformed("Hangul norm16 outside of Hangul syllables"));
                }
            } else if norm16 >= ix.limit_no_no && norm16 < ix.min_maybe_yes {
                for c in range.start..=range.end {
                    self.check_algorithmic(c, norm16)?;
                }
            } else {
                self.check_norm16(norm16)?;
            }
        }
        self.check_norm16(self.trie.error_value())?;
        self.check_norm16(self.trie.high_value())
    }

    fn check_norm16(&self, norm16: u16) -> Result<()> {
        let ix = &self.indexes;
        let extra_start = ix.extra_data_start();
        if norm16 >= MIN_NORMAL_MAYBE_YES || norm16 <= JAMO_L {
            Ok(())
        } else if norm16 >= ix.min_maybe_yes {
            self.check_list(usize::from(norm16 - ix.min_maybe_yes) >> OFFSET_SHIFT)
        } else if norm16 >= ix.limit_no_no {
            // Algorithmic values are checked per code point.
            Ok(())
        } else if norm16 < ix.min_yes_no {
            if norm16 & 1 != 0 {
                return Err(DataError::Malformed("odd composition list offset"));
            }
            self.check_list(extra_start + (usize::from(norm16) >> OFFSET_SHIFT))
        } else if norm16 == ix.hangul_lv() || norm16 == ix.hangul_lvt() {
            Err(DataError::Malformed("Hangul norm16 outside of Hangul syllables"))
        } else {
            self.check_mapping(norm16)
        }
    }

    fn check_mapping(&self, norm16: u16) -> Result<()> {
        let ix = &self.indexes;
        let extra_start = ix.extra_data_start();
        let mapping = extra_start + (usize::from(norm16) >> OFFSET_SHIFT);
        let first_unit = *self.extra.get(mapping)
            .ok_or(DataError::Malformed("mapping offset outside of extra data"))?;
        let length = usize::from(first_unit & MAPPING_LENGTH_MASK);
        if mapping + 1 + length > self.extra.len() {
            return Err(DataError::Malformed("mapping runs past extra data"));
        }
        let mut before = mapping;
        if first_unit & MAPPING_HAS_CCC_LCCC_WORD != 0 {
            if before <= extra_start {
                return Err(DataError::Malformed("ccc word outside of extra data"));
            }
            before -= 1;
        }
        if first_unit & MAPPING_HAS_RAW_MAPPING != 0 {
            if before <= extra_start {
                return Err(DataError::Malformed("raw mapping outside of extra data"));
            }
            let raw_length = self.extra[before - 1];
            if raw_length > MAPPING_LENGTH_MASK {
                return Err(DataError::Malformed("raw mapping length out of range"));
            }
            if before - 1 < extra_start + usize::from(raw_length) {
                return Err(DataError::Malformed("raw mapping outside of extra data"));
            }
        }
        if norm16 < ix.min_yes_no_mappings_only {
            self.check_list(mapping + 1 + length)?;
        }
        Ok(())
    }

    fn check_algorithmic(&self, c: u32, norm16: u16) -> Result<()> {
        let ix = &self.indexes;
        let target = i64::from(c) + i64::from(norm16 >> DELTA_SHIFT)
            - i64::from(ix.center_no_no_delta());
        if target < 0 || target > i64::from(MAX_CODE_POINT) {
            return Err(DataError::Malformed("algorithmic mapping out of range"));
        }
        let mapped = self.trie.get(target as u32);
        if mapped >= ix.min_no_no || mapped == ix.hangul_lv() || mapped == ix.hangul_lvt() {
            return Err(DataError::Malformed("algorithmic mapping to a non-stable character"));
        }
        Ok(())
    }

    /// Walk a composition list and check that it is terminated within the data.
    fn check_list(&self, start: usize) -> Result<()> {
        let mut i = start;
        loop {
            let first_unit = *self.extra.get(i)
                .ok_or(DataError::Malformed("composition list runs past extra data"))?;
            let width = if first_unit & COMP_1_TRIPLE != 0 { 3 } else { 2 };
            if i + width > self.extra.len() {
                return Err(DataError::Malformed("composition list runs past extra data"));
            }
            let composite_and_fwd = if width == 3 {
                (u32::from(self.extra[i + 1] & !COMP_2_TRAIL_MASK) << 16)
                    | u32::from(self.extra[i + 2])
            } else {
                u32::from(self.extra[i + 1])
            };
            let composite = composite_and_fwd >> 1;
            if composite > MAX_CODE_POINT {
                return Err(DataError::Malformed("composite out of range"));
            }
            if composite_and_fwd & 1 != 0 {
                let norm16 = self.trie.get(composite);
                if norm16 <= self.indexes.min_yes_no
                    || norm16 >= self.indexes.min_yes_no_mappings_only
                {
                    return Err(DataError::Malformed("forward-combining composite has no list"));
                }
            }
            if first_unit & COMP_1_LAST_TUPLE != 0 {
                return Ok(());
            }
            i += width;
        }
    }
}
