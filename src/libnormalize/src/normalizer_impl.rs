// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Normalization properties.
//!
//! `NormalizerImpl` wraps one `NormData` table and answers questions about single code
//! points: their combining classes, decompositions, composition partners, and whether
//! normalization may interact across a position. The streaming algorithms built on top of
//! these queries live in the `decompose`, `compose`, and `fcd` modules.

use std::fmt;

use libtext::utf16;
use libunidata::norm::{COMP_1_LAST_TUPLE, COMP_1_TRAIL_LIMIT, COMP_1_TRAIL_MASK,
                       COMP_1_TRAIL_SHIFT, COMP_1_TRIPLE, COMP_2_TRAIL_MASK, COMP_2_TRAIL_SHIFT,
                       DELTA_SHIFT, DELTA_TCCC_1, DELTA_TCCC_MASK, HAS_COMP_BOUNDARY_AFTER,
                       INERT, JAMO_L, JAMO_VT, MAPPING_HAS_CCC_LCCC_WORD, MAPPING_HAS_RAW_MAPPING,
                       MAPPING_LENGTH_MASK, MIN_NORMAL_MAYBE_YES, OFFSET_SHIFT};
use libunidata::{DataError, NormData, NormIndexes, NormKind};
use log::debug;
use once_cell::sync::OnceCell;

use crate::canon::CanonIterData;
use crate::hangul;

/// Normalization engine over one data table.
pub struct NormalizerImpl {
    data: NormData,
    pub(crate) ix: NormIndexes,
    /// Index of extra data proper inside `data.extra`.
    extra_start: usize,
    center_no_no_delta: i32,
    pub(crate) canon: OnceCell<CanonIterData>,
}

impl fmt::Debug for NormalizerImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NormalizerImpl")
            .field("unicode_version", &self.data.unicode_version)
            .field("indexes", &self.ix)
            .finish()
    }
}

impl NormalizerImpl {
    /// Wrap already validated data.
    pub fn new(data: NormData) -> NormalizerImpl {
        let ix = data.indexes;
        NormalizerImpl {
            ix,
            extra_start: ix.extra_data_start(),
            center_no_no_delta: i32::from(ix.center_no_no_delta()),
            canon: OnceCell::new(),
            data,
        }
    }

    /// Generate data from the character database and wrap it.
    pub fn build(kind: NormKind) -> Result<NormalizerImpl, DataError> {
        let data = NormData::build(kind)?;
        debug!("normalization data for {:?}: trie of {} values, {} units of extra data",
               kind, data.trie.data_len(), data.extra.len());
        Ok(NormalizerImpl::new(data))
    }

    /// Load a serialized image.
    pub fn from_bytes(bytes: &[u8]) -> Result<NormalizerImpl, DataError> {
        NormData::from_bytes(bytes).map(NormalizerImpl::new)
    }

    pub fn data(&self) -> &NormData {
        &self.data
    }

    //
    // Raw data access
    //

    /// The norm16 value of a code point. Surrogate code points are inert.
    #[inline]
    pub fn get_norm16(&self, c: u32) -> u16 {
        if utf16::is_surrogate(c) { INERT } else { self.data.trie.get(c) }
    }

    #[inline]
    pub(crate) fn raw_norm16(&self, c: u32) -> u16 {
        self.data.trie.get(c)
    }

    /// Unit of extra data proper.
    #[inline]
    pub(crate) fn extra_data(&self, index: usize) -> u16 {
        self.data.extra[self.extra_start + index]
    }

    /// Index into `data.extra` of the first unit of the mapping of `norm16`.
    #[inline]
    fn mapping_index(&self, norm16: u16) -> usize {
        self.extra_start + (usize::from(norm16) >> OFFSET_SHIFT)
    }

    /// Mapping units of a yes/no or no/no value.
    pub(crate) fn mapping(&self, norm16: u16) -> &[u16] {
        let first = self.mapping_index(norm16);
        let length = usize::from(self.data.extra[first] & MAPPING_LENGTH_MASK);
        &self.data.extra[first + 1..first + 1 + length]
    }

    /// Lead and trail combining classes of a mapping.
    pub(crate) fn mapping_lead_trail_cc(&self, norm16: u16) -> (u8, u8) {
        let first = self.mapping_index(norm16);
        let first_unit = self.data.extra[first];
        let lead_cc = if first_unit & MAPPING_HAS_CCC_LCCC_WORD != 0 {
            (self.data.extra[first - 1] >> 8) as u8
        } else {
            0
        };
        (lead_cc, (first_unit >> 8) as u8)
    }

    #[inline]
    pub(crate) fn small_fcd_bit(&self, unit: u32) -> bool {
        let bits = self.data.small_fcd[(unit >> 8) as usize];
        bits != 0 && (bits >> ((unit >> 5) & 7)) & 1 != 0
    }

    //
    // norm16 classification
    //

    #[inline]
    pub(crate) fn is_inert(norm16: u16) -> bool {
        norm16 == INERT
    }

    #[inline]
    pub(crate) fn is_jamo_l(norm16: u16) -> bool {
        norm16 == JAMO_L
    }

    #[inline]
    pub(crate) fn is_jamo_vt(norm16: u16) -> bool {
        norm16 == JAMO_VT
    }

    #[inline]
    pub(crate) fn is_hangul_lv(&self, norm16: u16) -> bool {
        norm16 == self.ix.hangul_lv()
    }

    #[inline]
    pub(crate) fn is_hangul_lvt(&self, norm16: u16) -> bool {
        norm16 == self.ix.hangul_lvt()
    }

    #[inline]
    pub(crate) fn is_comp_yes_and_zero_cc(&self, norm16: u16) -> bool {
        norm16 < self.ix.min_no_no
    }

    #[inline]
    pub(crate) fn is_maybe(&self, norm16: u16) -> bool {
        self.ix.min_maybe_yes <= norm16 && norm16 <= JAMO_VT
    }

    #[inline]
    pub(crate) fn is_maybe_or_non_zero_cc(&self, norm16: u16) -> bool {
        norm16 >= self.ix.min_maybe_yes
    }

    #[inline]
    pub(crate) fn is_decomp_yes(&self, norm16: u16) -> bool {
        norm16 < self.ix.min_yes_no || self.ix.min_maybe_yes <= norm16
    }

    /// Decomposition yes with ccc = 0, except for maybe/yes characters with compositions.
    #[inline]
    pub(crate) fn is_most_decomp_yes_and_zero_cc(&self, norm16: u16) -> bool {
        norm16 < self.ix.min_yes_no || norm16 == MIN_NORMAL_MAYBE_YES || norm16 == JAMO_VT
    }

    #[inline]
    pub(crate) fn is_decomp_no_algorithmic(&self, norm16: u16) -> bool {
        norm16 >= self.ix.limit_no_no
    }

    #[inline]
    pub(crate) fn is_algorithmic_no_no(&self, norm16: u16) -> bool {
        self.ix.limit_no_no <= norm16 && norm16 < self.ix.min_maybe_yes
    }

    //
    // Combining classes
    //

    #[inline]
    pub(crate) fn cc_from_normal_yes_or_maybe(norm16: u16) -> u8 {
        (norm16 >> OFFSET_SHIFT) as u8
    }

    #[inline]
    pub(crate) fn cc_from_yes_or_maybe(norm16: u16) -> u8 {
        if norm16 >= MIN_NORMAL_MAYBE_YES { Self::cc_from_normal_yes_or_maybe(norm16) } else { 0 }
    }

    pub(crate) fn cc_from_yes_or_maybe_cp(&self, c: u32) -> u8 {
        if c < self.ix.min_comp_no_maybe_cp {
            return 0;
        }
        Self::cc_from_yes_or_maybe(self.get_norm16(c))
    }

    /// Combining class encoded in a norm16 value.
    pub fn get_cc(&self, norm16: u16) -> u8 {
        if norm16 >= MIN_NORMAL_MAYBE_YES {
            return Self::cc_from_normal_yes_or_maybe(norm16);
        }
        if norm16 < self.ix.min_no_no || self.ix.limit_no_no <= norm16 {
            return 0;
        }
        let first = self.mapping_index(norm16);
        if self.data.extra[first] & MAPPING_HAS_CCC_LCCC_WORD != 0 {
            self.data.extra[first - 1] as u8
        } else {
            0
        }
    }

    /// Canonical combining class of a code point.
    pub fn get_combining_class(&self, c: u32) -> u8 {
        self.get_cc(self.get_norm16(c))
    }

    pub(crate) fn trail_cc_from_comp_yes_and_zero_cc(&self, norm16: u16) -> u8 {
        if norm16 <= self.ix.min_yes_no {
            0
        } else {
            (self.extra_data(usize::from(norm16) >> OFFSET_SHIFT) >> 8) as u8
        }
    }

    /// Target of an algorithmic mapping.
    #[inline]
    pub(crate) fn map_algorithmic(&self, c: u32, norm16: u16) -> u32 {
        (c as i32 + i32::from(norm16 >> DELTA_SHIFT) - self.center_no_no_delta) as u32
    }

    //
    // FCD values
    //

    /// Lead combining class in the high byte and trail combining class in the low byte.
    pub fn get_fcd16(&self, c: u32) -> u16 {
        if c < self.ix.min_decomp_no_cp {
            return 0;
        }
        if c <= 0xFFFF && !self.small_fcd_bit(c) {
            return 0;
        }
        self.get_fcd16_from_norm_data(c)
    }

    pub(crate) fn get_fcd16_from_norm_data(&self, c: u32) -> u16 {
        let mut c = c;
        let mut norm16 = self.get_norm16(c);
        if norm16 >= self.ix.limit_no_no {
            if norm16 >= MIN_NORMAL_MAYBE_YES {
                let cc = u16::from(Self::cc_from_normal_yes_or_maybe(norm16));
                return cc | (cc << 8);
            } else if norm16 >= self.ix.min_maybe_yes {
                return 0;
            }
            let delta_trail_cc = norm16 & DELTA_TCCC_MASK;
            if delta_trail_cc <= DELTA_TCCC_1 {
                return delta_trail_cc >> OFFSET_SHIFT;
            }
            c = self.map_algorithmic(c, norm16);
            norm16 = self.raw_norm16(c);
        }
        if norm16 <= self.ix.min_yes_no || self.is_hangul_lvt(norm16) {
            return 0;
        }
        let (lead_cc, trail_cc) = self.mapping_lead_trail_cc(norm16);
        (u16::from(lead_cc) << 8) | u16::from(trail_cc)
    }

    /// Trail combining class of the code point before `p`, not looking before `start`.
    pub(crate) fn previous_trail_cc(&self, s: &[u16], start: usize, p: usize) -> u8 {
        if start == p {
            return 0;
        }
        let mut i = p;
        let c = utf16::prev_code_point(s, start, &mut i);
        self.get_fcd16(c) as u8
    }

    //
    // Decompositions
    //

    /// Full canonical or compatibility decomposition of `c`, if it has one.
    pub fn get_decomposition(&self, c: u32) -> Option<Vec<u16>> {
        if c < self.ix.min_decomp_no_cp {
            return None;
        }
        let mut norm16 = self.get_norm16(c);
        if self.is_maybe_or_non_zero_cc(norm16) {
            return None;
        }
        let mut c = c;
        let mut mapped = false;
        if self.is_decomp_no_algorithmic(norm16) {
            c = self.map_algorithmic(c, norm16);
            norm16 = self.raw_norm16(c);
            mapped = true;
        }
        if norm16 < self.ix.min_yes_no {
            if !mapped {
                return None;
            }
            let mut out = Vec::with_capacity(2);
            utf16::push_code_point(&mut out, c);
            Some(out)
        } else if self.is_hangul_lv(norm16) || self.is_hangul_lvt(norm16) {
            let (l, v, t) = hangul::decompose(c);
            let mut out = vec![l, v];
            out.extend(t);
            Some(out)
        } else {
            Some(self.mapping(norm16).to_vec())
        }
    }

    /// Decomposition mapping of `c` as given in the character database, without applying
    /// it recursively.
    pub fn get_raw_decomposition(&self, c: u32) -> Option<Vec<u16>> {
        if c < self.ix.min_decomp_no_cp {
            return None;
        }
        let norm16 = self.get_norm16(c);
        if self.is_decomp_yes(norm16) {
            return None;
        }
        if self.is_hangul_lv(norm16) || self.is_hangul_lvt(norm16) {
            let (first, second) = hangul::raw_decompose(c);
            return Some(vec![first, second]);
        }
        if self.is_decomp_no_algorithmic(norm16) {
            let mut out = Vec::with_capacity(2);
            utf16::push_code_point(&mut out, self.map_algorithmic(c, norm16));
            return Some(out);
        }
        let first = self.mapping_index(norm16);
        let first_unit = self.data.extra[first];
        if first_unit & MAPPING_HAS_RAW_MAPPING != 0 {
            let has_word = usize::from((first_unit >> 7) & 1);
            let raw_length_index = first - has_word - 1;
            let raw_length = usize::from(self.data.extra[raw_length_index]);
            Some(self.data.extra[raw_length_index - raw_length..raw_length_index].to_vec())
        } else {
            Some(self.mapping(norm16).to_vec())
        }
    }

    //
    // Compositions
    //

    /// Composition list of a character with a "yes" decomposition, as an index into
    /// `data.extra`.
    pub(crate) fn compositions_list_for_decomp_yes(&self, norm16: u16) -> Option<usize> {
        if norm16 < JAMO_L || MIN_NORMAL_MAYBE_YES <= norm16 {
            None
        } else if norm16 >= self.ix.min_maybe_yes {
            Some(self.compositions_list_for_maybe(norm16))
        } else {
            Some(self.mapping_index(norm16))
        }
    }

    /// Composition list of a composite, following its mapping.
    pub(crate) fn compositions_list_for_composite(&self, norm16: u16) -> usize {
        let list = self.mapping_index(norm16);
        list + 1 + usize::from(self.data.extra[list] & MAPPING_LENGTH_MASK)
    }

    pub(crate) fn compositions_list_for_maybe(&self, norm16: u16) -> usize {
        usize::from(norm16 - self.ix.min_maybe_yes) >> OFFSET_SHIFT
    }

    pub(crate) fn compositions_list(&self, norm16: u16) -> Option<usize> {
        if self.is_decomp_yes(norm16) {
            self.compositions_list_for_decomp_yes(norm16)
        } else {
            Some(self.compositions_list_for_composite(norm16))
        }
    }

    /// Look up `trail` in a composition list. Returns the composite shifted left by one,
    /// with the lowest bit set if it combines forward.
    pub(crate) fn combine(&self, list: usize, trail: u32) -> Option<u32> {
        let units = &self.data.extra;
        let mut list = list;
        if trail < COMP_1_TRAIL_LIMIT {
            let key1 = (trail << 1) as u16;
            let mut first_unit = units[list];
            while key1 > first_unit {
                list += 2 + usize::from(first_unit & COMP_1_TRIPLE);
                first_unit = units[list];
            }
            if key1 == first_unit & COMP_1_TRAIL_MASK {
                if first_unit & COMP_1_TRIPLE != 0 {
                    return Some((u32::from(units[list + 1]) << 16) | u32::from(units[list + 2]));
                }
                return Some(u32::from(units[list + 1]));
            }
        } else {
            let key1 = (COMP_1_TRAIL_LIMIT + ((trail >> COMP_1_TRAIL_SHIFT) & !u32::from(COMP_1_TRIPLE))) as u16;
            let key2 = (trail << COMP_2_TRAIL_SHIFT) as u16;
            loop {
                let first_unit = units[list];
                if key1 > first_unit {
                    list += 2 + usize::from(first_unit & COMP_1_TRIPLE);
                } else if key1 == first_unit & COMP_1_TRAIL_MASK {
                    let second_unit = units[list + 1];
                    if key2 > second_unit {
                        if first_unit & COMP_1_LAST_TUPLE != 0 {
                            break;
                        }
                        list += 3;
                    } else if key2 == second_unit & COMP_2_TRAIL_MASK {
                        return Some((u32::from(second_unit & !COMP_2_TRAIL_MASK) << 16)
                                    | u32::from(units[list + 2]));
                    } else {
                        break;
                    }
                } else {
                    break;
                }
            }
        }
        None
    }

    /// Add all composites of a composition list to `set`, recursively following composites
    /// which combine forward themselves.
    pub(crate) fn add_composites(&self, list: usize, set: &mut impl Extend<u32>) {
        let units = &self.data.extra;
        let mut list = list;
        loop {
            let first_unit = units[list];
            let composite_and_fwd = if first_unit & COMP_1_TRIPLE == 0 {
                list += 2;
                u32::from(units[list - 1])
            } else {
                list += 3;
                (u32::from(units[list - 2] & !COMP_2_TRAIL_MASK) << 16) | u32::from(units[list - 1])
            };
            let composite = composite_and_fwd >> 1;
            if composite_and_fwd & 1 != 0 {
                let nested = self.compositions_list_for_composite(self.raw_norm16(composite));
                self.add_composites(nested, set);
            }
            set.extend(Some(composite));
            if first_unit & COMP_1_LAST_TUPLE != 0 {
                break;
            }
        }
    }

    /// Primary composite of `a` followed by `b`, if there is one.
    pub fn compose_pair(&self, a: u32, b: u32) -> Option<u32> {
        let norm16 = self.get_norm16(a);
        let list = if Self::is_inert(norm16) {
            return None;
        } else if norm16 < self.ix.min_yes_no_mappings_only {
            if Self::is_jamo_l(norm16) {
                return hangul::compose_lv(a, b);
            } else if self.is_hangul_lv(norm16) {
                return hangul::trail_index(b).map(|t| a + t);
            }
            let mut list = self.mapping_index(norm16);
            if norm16 > self.ix.min_yes_no {
                list += 1 + usize::from(self.data.extra[list] & MAPPING_LENGTH_MASK);
            }
            list
        } else if norm16 < self.ix.min_maybe_yes || MIN_NORMAL_MAYBE_YES <= norm16 {
            return None;
        } else {
            self.compositions_list_for_maybe(norm16)
        };
        if b > libtrie::MAX_CODE_POINT {
            return None;
        }
        self.combine(list, b).map(|composite_and_fwd| composite_and_fwd >> 1)
    }

    //
    // Boundaries
    //

    pub(crate) fn norm16_has_comp_boundary_before(&self, norm16: u16) -> bool {
        norm16 < self.ix.min_no_no_comp_no_maybe_cc || self.is_algorithmic_no_no(norm16)
    }

    pub(crate) fn norm16_has_comp_boundary_after(&self, norm16: u16, only_contiguous: bool) -> bool {
        norm16 & HAS_COMP_BOUNDARY_AFTER != 0
            && (!only_contiguous || self.is_trail_cc01_for_comp_boundary_after(norm16))
    }

    fn is_trail_cc01_for_comp_boundary_after(&self, norm16: u16) -> bool {
        Self::is_inert(norm16)
            || if self.is_decomp_no_algorithmic(norm16) {
                norm16 & DELTA_TCCC_MASK <= DELTA_TCCC_1
            } else {
                self.extra_data(usize::from(norm16) >> OFFSET_SHIFT) <= 0x1FF
            }
    }

    pub(crate) fn has_comp_boundary_before_cp(&self, c: u32, norm16: u16) -> bool {
        c < self.ix.min_comp_no_maybe_cp || self.norm16_has_comp_boundary_before(norm16)
    }

    /// Whether the text at `src` starts with a composition boundary.
    pub(crate) fn has_comp_boundary_before_at(&self, s: &[u16], src: usize, limit: usize) -> bool {
        if src == limit {
            return true;
        }
        let mut i = src;
        let c = utf16::next_code_point(s, &mut i, limit);
        self.has_comp_boundary_before_cp(c, self.get_norm16(c))
    }

    /// Whether the text in `start..p` ends with a composition boundary.
    pub(crate) fn has_comp_boundary_after_at(&self, s: &[u16], start: usize, p: usize,
                                             only_contiguous: bool) -> bool {
        if start == p {
            return true;
        }
        let mut i = p;
        let c = utf16::prev_code_point(s, start, &mut i);
        self.norm16_has_comp_boundary_after(self.get_norm16(c), only_contiguous)
    }

    pub fn has_comp_boundary_before(&self, c: u32) -> bool {
        self.has_comp_boundary_before_cp(c, self.get_norm16(c))
    }

    pub fn has_comp_boundary_after(&self, c: u32, only_contiguous: bool) -> bool {
        self.norm16_has_comp_boundary_after(self.get_norm16(c), only_contiguous)
    }

    pub(crate) fn norm16_has_decomp_boundary_before(&self, norm16: u16) -> bool {
        if norm16 < self.ix.min_no_no_comp_no_maybe_cc {
            return true;
        }
        if norm16 >= self.ix.limit_no_no {
            return norm16 <= MIN_NORMAL_MAYBE_YES || norm16 == JAMO_VT;
        }
        self.mapping_lead_trail_cc(norm16).0 == 0
    }

    pub(crate) fn norm16_has_decomp_boundary_after(&self, norm16: u16) -> bool {
        if norm16 <= self.ix.min_yes_no || self.is_hangul_lvt(norm16) {
            return true;
        }
        if norm16 >= self.ix.limit_no_no {
            if self.is_maybe_or_non_zero_cc(norm16) {
                return norm16 <= MIN_NORMAL_MAYBE_YES || norm16 == JAMO_VT;
            }
            return norm16 & DELTA_TCCC_MASK <= DELTA_TCCC_1;
        }
        let first_unit = self.extra_data(usize::from(norm16) >> OFFSET_SHIFT);
        if first_unit > 0x1FF {
            return false;
        }
        if first_unit <= 0xFF {
            return true;
        }
        self.mapping_lead_trail_cc(norm16).0 == 0
    }

    pub fn has_decomp_boundary_before(&self, c: u32) -> bool {
        c < self.ix.min_lccc_cp
            || (c <= 0xFFFF && !self.small_fcd_bit(c))
            || self.norm16_has_decomp_boundary_before(self.get_norm16(c))
    }

    pub fn has_decomp_boundary_after(&self, c: u32) -> bool {
        c < self.ix.min_decomp_no_cp
            || (c <= 0xFFFF && !self.small_fcd_bit(c))
            || self.norm16_has_decomp_boundary_after(self.get_norm16(c))
    }

    pub fn is_decomp_inert(&self, c: u32) -> bool {
        let norm16 = self.get_norm16(c);
        norm16 < self.ix.min_yes_no
            || norm16 == JAMO_VT
            || (self.ix.min_maybe_yes <= norm16 && norm16 <= MIN_NORMAL_MAYBE_YES)
    }

    pub fn is_comp_inert(&self, c: u32, only_contiguous: bool) -> bool {
        let norm16 = self.get_norm16(c);
        self.is_comp_yes_and_zero_cc(norm16)
            && norm16 & HAS_COMP_BOUNDARY_AFTER != 0
            && (!only_contiguous
                || Self::is_inert(norm16)
                || self.extra_data(usize::from(norm16) >> OFFSET_SHIFT) <= 0x1FF)
    }

    pub fn is_fcd_inert(&self, c: u32) -> bool {
        self.get_fcd16(c) <= 1
    }

    /// Start of the composition segment containing the end of `s[start..p]`.
    pub(crate) fn find_previous_comp_boundary(&self, s: &[u16], start: usize, p: usize,
                                              only_contiguous: bool) -> usize {
        let mut p = p;
        while p > start {
            let mut i = p;
            let c = utf16::prev_code_point(s, start, &mut i);
            let norm16 = self.get_norm16(c);
            if self.norm16_has_comp_boundary_after(norm16, only_contiguous) {
                break;
            }
            p = i;
            if self.has_comp_boundary_before_cp(c, norm16) {
                break;
            }
        }
        p
    }

    /// End of the composition segment containing `s[p]`.
    pub(crate) fn find_next_comp_boundary(&self, s: &[u16], p: usize, limit: usize,
                                          only_contiguous: bool) -> usize {
        let mut p = p;
        while p < limit {
            let mut i = p;
            let c = utf16::next_code_point(s, &mut i, limit);
            let norm16 = self.get_norm16(c);
            if self.has_comp_boundary_before_cp(c, norm16) {
                break;
            }
            p = i;
            if self.norm16_has_comp_boundary_after(norm16, only_contiguous) {
                break;
            }
        }
        p
    }

    pub(crate) fn find_previous_fcd_boundary(&self, s: &[u16], start: usize, p: usize) -> usize {
        let mut p = p;
        while p > start {
            let mut i = p;
            let c = utf16::prev_code_point(s, start, &mut i);
            if c < self.ix.min_decomp_no_cp {
                break;
            }
            let norm16 = self.get_norm16(c);
            if self.norm16_has_decomp_boundary_after(norm16) {
                break;
            }
            p = i;
            if self.norm16_has_decomp_boundary_before(norm16) {
                break;
            }
        }
        p
    }

    pub(crate) fn find_next_fcd_boundary(&self, s: &[u16], p: usize, limit: usize) -> usize {
        let mut p = p;
        while p < limit {
            let mut i = p;
            let c = utf16::next_code_point(s, &mut i, limit);
            if c < self.ix.min_lccc_cp {
                break;
            }
            let norm16 = self.get_norm16(c);
            if self.norm16_has_decomp_boundary_before(norm16) {
                break;
            }
            p = i;
            if self.norm16_has_decomp_boundary_after(norm16) {
                break;
            }
        }
        p
    }
}
