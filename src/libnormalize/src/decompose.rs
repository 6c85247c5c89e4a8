// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Decomposition (NFD, NFKD).

use libtext::utf16;

use crate::hangul;
use crate::normalizer_impl::NormalizerImpl;
use crate::reordering_buffer::ReorderingBuffer;

impl NormalizerImpl {
    /// Decompose `s[src..limit]` into the buffer and return `limit`.
    ///
    /// Without a buffer this is a quick check: the return value is the end of the longest
    /// prefix which is already decomposed and canonically ordered.
    pub fn decompose(&self, s: &[u16], src: usize, limit: usize,
                     mut buffer: Option<&mut ReorderingBuffer<'_, '_>>) -> usize
    {
        let min_no_cp = self.ix.min_decomp_no_cp;
        let mut src = src;
        // Quick check state.
        let mut prev_boundary = src;
        let mut prev_cc = 0;

        loop {
            // Skip code points which decompose to themselves with ccc = 0.
            let prev_src = src;
            let mut current = None;
            while src < limit {
                if u32::from(s[src]) < min_no_cp {
                    src += 1;
                    continue;
                }
                let mut next = src;
                let c = utf16::next_code_point(s, &mut next, limit);
                let norm16 = self.get_norm16(c);
                if self.is_most_decomp_yes_and_zero_cc(norm16) {
                    src = next;
                } else {
                    current = Some((c, norm16, next));
                    break;
                }
            }
            if src != prev_src {
                match buffer {
                    Some(ref mut buffer) => buffer.append_zero_cc_str(&s[prev_src..src]),
                    None => {
                        prev_cc = 0;
                        prev_boundary = src;
                    }
                }
            }
            let (c, norm16, next) = match current {
                Some(current) => current,
                None => break,
            };
            src = next;

            match buffer {
                Some(ref mut buffer) => self.decompose_code_point(c, norm16, buffer),
                None => {
                    if self.is_decomp_yes(norm16) {
                        let cc = Self::cc_from_yes_or_maybe(norm16);
                        if prev_cc <= cc || cc == 0 {
                            prev_cc = cc;
                            if cc <= 1 {
                                prev_boundary = src;
                            }
                            continue;
                        }
                    }
                    return prev_boundary;
                }
            }
        }
        src
    }

    /// Append the full decomposition of one code point.
    pub(crate) fn decompose_code_point(&self, c: u32, norm16: u16,
                                       buffer: &mut ReorderingBuffer<'_, '_>)
    {
        let mut c = c;
        let mut norm16 = norm16;
        if norm16 >= self.ix.limit_no_no {
            if self.is_maybe_or_non_zero_cc(norm16) {
                buffer.append(c, Self::cc_from_yes_or_maybe(norm16));
                return;
            }
            c = self.map_algorithmic(c, norm16);
            norm16 = self.raw_norm16(c);
        }
        if norm16 < self.ix.min_yes_no {
            buffer.append(c, 0);
        } else if self.is_hangul_lv(norm16) || self.is_hangul_lvt(norm16) {
            let (l, v, t) = hangul::decompose(c);
            buffer.append_zero_cc(u32::from(l));
            buffer.append_zero_cc(u32::from(v));
            if let Some(t) = t {
                buffer.append_zero_cc(u32::from(t));
            }
        } else {
            let (lead_cc, trail_cc) = self.mapping_lead_trail_cc(norm16);
            buffer.append_str(self.mapping(norm16), true, lead_cc, trail_cc);
        }
    }

    /// Decompose a short piece of text for recomposition. With `stop_at_comp_boundary` the
    /// decomposition ends at the first composition boundary, and its position is returned.
    pub(crate) fn decompose_short(&self, s: &[u16], src: usize, limit: usize,
                                  stop_at_comp_boundary: bool, only_contiguous: bool,
                                  buffer: &mut ReorderingBuffer<'_, '_>) -> usize
    {
        let mut src = src;
        while src < limit {
            let mut next = src;
            let c = utf16::next_code_point(s, &mut next, limit);
            if stop_at_comp_boundary && c < self.ix.min_comp_no_maybe_cp {
                return src;
            }
            let norm16 = self.get_norm16(c);
            if stop_at_comp_boundary && self.norm16_has_comp_boundary_before(norm16) {
                return src;
            }
            src = next;
            self.decompose_code_point(c, norm16, buffer);
            if stop_at_comp_boundary && self.norm16_has_comp_boundary_after(norm16, only_contiguous) {
                return src;
            }
        }
        src
    }

    /// Append `s` to decomposed text in the buffer. Without `do_decompose`, `s` is assumed
    /// to be decomposed already and only its leading combining marks are reordered with the
    /// end of the buffer.
    pub fn decompose_and_append(&self, s: &[u16], do_decompose: bool,
                                buffer: &mut ReorderingBuffer<'_, '_>)
    {
        let limit = s.len();
        if limit == 0 {
            return;
        }
        if do_decompose {
            self.decompose(s, 0, limit, Some(buffer));
            return;
        }
        let mut src = 0;
        let mut next = 0;
        let c = utf16::next_code_point(s, &mut next, limit);
        let first_cc = self.get_cc(self.get_norm16(c));
        let mut cc = first_cc;
        let mut prev_cc = first_cc;
        while cc != 0 {
            prev_cc = cc;
            src = next;
            if src >= limit {
                break;
            }
            let c = utf16::next_code_point(s, &mut next, limit);
            cc = self.get_cc(self.get_norm16(c));
        }
        buffer.append_str(&s[..src], false, first_cc, prev_cc);
        buffer.append_zero_cc_str(&s[src..]);
    }
}
