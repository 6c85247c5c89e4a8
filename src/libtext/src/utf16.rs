// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! UTF-16 code unit helpers.
//!
//! Text is handled as slices of UTF-16 code units which do not have to be well-formed.
//! An unpaired surrogate is treated as a code point of its own (the surrogate code point
//! with the same value), so every helper here is total.

const SURROGATE_OFFSET: u32 = (0xD800 << 10) + 0xDC00 - 0x10000;

/// Is this a lead (high) surrogate code unit?
#[inline]
pub fn is_lead(unit: u32) -> bool {
    (unit & 0xFFFF_FC00) == 0xD800
}

/// Is this a trail (low) surrogate code unit?
#[inline]
pub fn is_trail(unit: u32) -> bool {
    (unit & 0xFFFF_FC00) == 0xDC00
}

/// Is this any surrogate code unit or code point?
#[inline]
pub fn is_surrogate(unit: u32) -> bool {
    (unit & 0xFFFF_F800) == 0xD800
}

/// Assuming that the argument is a surrogate, is it a lead surrogate?
#[inline]
pub fn is_surrogate_lead(unit: u32) -> bool {
    (unit & 0x400) == 0
}

/// Combine a surrogate pair into a supplementary code point.
#[inline]
pub fn supplementary(lead: u32, trail: u32) -> u32 {
    (lead << 10) + trail - SURROGATE_OFFSET
}

/// Lead surrogate of a supplementary code point.
#[inline]
pub fn lead(c: u32) -> u16 {
    ((c >> 10) + 0xD7C0) as u16
}

/// Trail surrogate of a supplementary code point.
#[inline]
pub fn trail(c: u32) -> u16 {
    ((c & 0x3FF) | 0xDC00) as u16
}

/// Number of code units needed to encode a code point.
#[inline]
pub fn char_len(c: u32) -> usize {
    if c <= 0xFFFF { 1 } else { 2 }
}

/// Read the code point starting at `*index` and advance the index past it.
///
/// The index must be less than `limit`.
#[inline]
pub fn next_code_point(s: &[u16], index: &mut usize, limit: usize) -> u32 {
    let c = u32::from(s[*index]);
    *index += 1;
    if is_lead(c) && *index < limit {
        let t = u32::from(s[*index]);
        if is_trail(t) {
            *index += 1;
            return supplementary(c, t);
        }
    }
    c
}

/// Read the code point ending at `*index` and move the index to its start.
///
/// The index must be greater than `start`.
#[inline]
pub fn prev_code_point(s: &[u16], start: usize, index: &mut usize) -> u32 {
    *index -= 1;
    let c = u32::from(s[*index]);
    if is_trail(c) && *index > start {
        let l = u32::from(s[*index - 1]);
        if is_lead(l) {
            *index -= 1;
            return supplementary(l, c);
        }
    }
    c
}

/// Code point starting at `index`.
pub fn code_point_at(s: &[u16], index: usize) -> u32 {
    let mut i = index;
    next_code_point(s, &mut i, s.len())
}

/// Code point ending right before `index`.
pub fn code_point_before(s: &[u16], index: usize) -> u32 {
    let mut i = index;
    prev_code_point(s, 0, &mut i)
}

/// Append a code point to a code unit vector.
#[inline]
pub fn push_code_point(buffer: &mut Vec<u16>, c: u32) {
    if c <= 0xFFFF {
        buffer.push(c as u16);
    } else {
        buffer.push(lead(c));
        buffer.push(trail(c));
    }
}

/// Number of code points in a code unit slice, unpaired surrogates counting as one each.
pub fn code_point_count(s: &[u16]) -> usize {
    let mut count = 0;
    let mut i = 0;
    while i < s.len() {
        next_code_point(s, &mut i, s.len());
        count += 1;
    }
    count
}

/// Encode a string as UTF-16.
pub fn from_str(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

/// Decode UTF-16 into a string, replacing unpaired surrogates with U+FFFD.
pub fn to_string_lossy(s: &[u16]) -> String {
    String::from_utf16_lossy(s)
}

/// Iterate over the code points of a code unit slice.
pub fn code_points(s: &[u16]) -> CodePoints<'_> {
    CodePoints { s, index: 0 }
}

/// Iterator returned by `code_points()`.
pub struct CodePoints<'a> {
    s: &'a [u16],
    index: usize,
}

impl<'a> Iterator for CodePoints<'a> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.index < self.s.len() {
            Some(next_code_point(self.s, &mut self.index, self.s.len()))
        } else {
            None
        }
    }
}
