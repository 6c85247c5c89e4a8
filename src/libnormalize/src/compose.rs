// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Composition (NFC, NFKC, FCC).
//!
//! Text is copied unchanged up to a character which is not "composition yes with ccc = 0".
//! Simple cases around that character are handled in place: mappings surrounded by
//! boundaries, characters mapping to nothing, conjoining Jamo, and combining marks which
//! are already in canonical order. Otherwise the text between the nearest composition
//! boundaries is decomposed into the buffer and recomposed there.

use libtext::utf16;
use libunidata::norm::{INERT, JAMO_VT, MIN_YES_YES_WITH_CC};

use crate::hangul;
use crate::normalizer_impl::NormalizerImpl;
use crate::reordering_buffer::ReorderingBuffer;

impl NormalizerImpl {
    /// Compose `s[src..limit]` into the buffer.
    ///
    /// Without `do_compose` nothing is written to the output: the buffer is only used as
    /// scratch space, and the return value tells whether the text is already composed.
    pub fn compose(&self, s: &[u16], src: usize, limit: usize, only_contiguous: bool,
                   do_compose: bool, buffer: &mut ReorderingBuffer<'_, '_>) -> bool
    {
        let min_no_maybe_cp = self.ix.min_comp_no_maybe_cp;
        let mut src = src;
        let mut prev_boundary = src;

        loop {
            // Skip code points which are composition-stable with ccc = 0.
            let (mut prev_src, c, norm16) = loop {
                if src == limit {
                    if prev_boundary != limit && do_compose {
                        buffer.append_zero_cc_str(&s[prev_boundary..limit]);
                    }
                    return true;
                }
                if u32::from(s[src]) < min_no_maybe_cp {
                    src += 1;
                    continue;
                }
                let prev_src = src;
                let c = utf16::next_code_point(s, &mut src, limit);
                let norm16 = self.get_norm16(c);
                if !self.is_comp_yes_and_zero_cc(norm16) {
                    break (prev_src, c, norm16);
                }
            };

            // The current character is a no/no (has a mapping), a maybe/yes (combines
            // backward), or a yes/yes with non-zero ccc.
            if !self.is_maybe_or_non_zero_cc(norm16) {
                if !do_compose {
                    return false;
                }
                if self.is_decomp_no_algorithmic(norm16) {
                    // Maps to a single composition-stable character with a boundary before.
                    if self.norm16_has_comp_boundary_after(norm16, only_contiguous)
                        || self.has_comp_boundary_before_at(s, src, limit)
                    {
                        buffer.append_zero_cc_str(&s[prev_boundary..prev_src]);
                        buffer.append(self.map_algorithmic(c, norm16), 0);
                        prev_boundary = src;
                        continue;
                    }
                } else if norm16 < self.ix.min_no_no_comp_boundary_before {
                    // The mapping is composed and has a boundary before.
                    if self.norm16_has_comp_boundary_after(norm16, only_contiguous)
                        || self.has_comp_boundary_before_at(s, src, limit)
                    {
                        buffer.append_zero_cc_str(&s[prev_boundary..prev_src]);
                        buffer.append_zero_cc_str(self.mapping(norm16));
                        prev_boundary = src;
                        continue;
                    }
                } else if norm16 >= self.ix.min_no_no_empty {
                    // Maps to nothing: drop it if that cannot let its neighbors interact.
                    if self.has_comp_boundary_before_at(s, src, limit)
                        || self.has_comp_boundary_after_at(s, prev_boundary, prev_src, only_contiguous)
                    {
                        buffer.append_zero_cc_str(&s[prev_boundary..prev_src]);
                        prev_boundary = src;
                        continue;
                    }
                }
            } else if Self::is_jamo_vt(norm16) && prev_boundary != prev_src {
                let prev = u32::from(s[prev_src - 1]);
                if c < hangul::T_BASE {
                    // Jamo vowel: compose with the preceding L and a following T.
                    let l = prev.wrapping_sub(hangul::L_BASE);
                    if l < hangul::L_COUNT {
                        if !do_compose {
                            return false;
                        }
                        let next_t = if src < limit { hangul::trail_index(u32::from(s[src])) } else { None };
                        let t = match next_t {
                            Some(t) => {
                                src += 1;
                                Some(t)
                            }
                            None if self.has_comp_boundary_before_at(s, src, limit) => Some(0),
                            // A compatibility variant of T may follow, use the slow path.
                            None => None,
                        };
                        if let Some(t) = t {
                            let syllable = hangul::S_BASE
                                + (l * hangul::V_COUNT + (c - hangul::V_BASE)) * hangul::T_COUNT
                                + t;
                            prev_src -= 1;
                            buffer.append_zero_cc_str(&s[prev_boundary..prev_src]);
                            buffer.append_zero_cc(syllable);
                            prev_boundary = src;
                            continue;
                        }
                    }
                } else if hangul::is_hangul_lv(prev) {
                    // Jamo trailing consonant after an LV syllable.
                    if !do_compose {
                        return false;
                    }
                    let syllable = prev + c - hangul::T_BASE;
                    prev_src -= 1;
                    buffer.append_zero_cc_str(&s[prev_boundary..prev_src]);
                    buffer.append_zero_cc(syllable);
                    prev_boundary = src;
                    continue;
                }
            } else if norm16 > JAMO_VT {
                // Combining marks which do not combine back: copy them if they are in order
                // and followed by a boundary.
                let mut cc = Self::cc_from_normal_yes_or_maybe(norm16);
                if only_contiguous && self.previous_trail_cc(s, prev_boundary, prev_src) > cc {
                    if !do_compose {
                        return false;
                    }
                } else {
                    let (n16, next) = loop {
                        if src == limit {
                            if do_compose {
                                buffer.append_zero_cc_str(&s[prev_boundary..limit]);
                            }
                            return true;
                        }
                        let prev_cc = cc;
                        let mut next = src;
                        let c = utf16::next_code_point(s, &mut next, limit);
                        let n16 = self.get_norm16(c);
                        if n16 >= MIN_YES_YES_WITH_CC {
                            cc = Self::cc_from_normal_yes_or_maybe(n16);
                            if prev_cc > cc {
                                if !do_compose {
                                    return false;
                                }
                                break (n16, next);
                            }
                        } else {
                            break (n16, next);
                        }
                        src = next;
                    };
                    if self.norm16_has_comp_boundary_before(n16) {
                        if self.is_comp_yes_and_zero_cc(n16) {
                            src = next;
                        }
                        continue;
                    }
                    // No boundary in prev_src..src, use the slow path.
                }
            }

            // Slow path: decompose and recompose between the surrounding boundaries.
            if prev_boundary != prev_src && !self.norm16_has_comp_boundary_before(norm16) {
                let mut p = prev_src;
                let prev = utf16::prev_code_point(s, prev_boundary, &mut p);
                if !self.norm16_has_comp_boundary_after(self.get_norm16(prev), only_contiguous) {
                    prev_src = p;
                }
            }
            if do_compose && prev_boundary != prev_src {
                buffer.append_zero_cc_str(&s[prev_boundary..prev_src]);
            }
            let recompose_start = buffer.len();
            self.decompose_short(s, prev_src, src, false, only_contiguous, buffer);
            src = self.decompose_short(s, src, limit, true, only_contiguous, buffer);
            self.recompose(buffer, recompose_start, only_contiguous);
            if !do_compose {
                if !buffer.equals(s, prev_src, src) {
                    return false;
                }
                buffer.remove();
            }
            prev_boundary = src;
        }
    }

    /// Recompose the canonically ordered decomposed text in the buffer after `start`.
    pub(crate) fn recompose(&self, buffer: &mut ReorderingBuffer<'_, '_>, start: usize,
                            only_contiguous: bool)
    {
        let text = &mut *buffer.text;
        let mut p = start;
        if p == text.len() {
            return;
        }
        let mut starter = 0;
        let mut starter_is_supplementary = false;
        // Composition list of the last starter, if it combines forward.
        let mut compositions_list: Option<usize> = None;
        let mut prev_cc = 0;

        loop {
            let len = text.len();
            let c = utf16::next_code_point(text.as_slice(), &mut p, len);
            let norm16 = self.get_norm16(c);
            let cc = Self::cc_from_yes_or_maybe(norm16);
            let list = compositions_list
                .filter(|_| self.is_maybe(norm16) && (prev_cc < cc || prev_cc == 0));
            if let Some(list) = list {
                if Self::is_jamo_vt(norm16) {
                    // Input is decomposed, so Jamo T never follows an LV syllable here.
                    if c < hangul::T_BASE {
                        let l = u32::from(text[starter]).wrapping_sub(hangul::L_BASE);
                        if l < hangul::L_COUNT {
                            let remove_from = p - 1;
                            let mut syllable = hangul::S_BASE
                                + (l * hangul::V_COUNT + (c - hangul::V_BASE)) * hangul::T_COUNT;
                            if let Some(t) = text.get(p).and_then(|&t| hangul::trail_index(u32::from(t))) {
                                p += 1;
                                syllable += t;
                            }
                            text[starter] = syllable as u16;
                            text.drain(remove_from..p);
                            p = remove_from;
                        }
                    }
                    if p == text.len() {
                        break;
                    }
                    compositions_list = None;
                    continue;
                }
                if let Some(composite_and_fwd) = self.combine(list, c) {
                    let composite = composite_and_fwd >> 1;
                    let remove_from = p - utf16::char_len(c);
                    text.drain(remove_from..p);
                    p = remove_from;
                    if starter_is_supplementary {
                        if composite > 0xFFFF {
                            text[starter] = utf16::lead(composite);
                            text[starter + 1] = utf16::trail(composite);
                        } else {
                            text[starter] = composite as u16;
                            text.remove(starter + 1);
                            starter_is_supplementary = false;
                            p -= 1;
                        }
                    } else if composite > 0xFFFF {
                        text[starter] = utf16::lead(composite);
                        text.insert(starter + 1, utf16::trail(composite));
                        starter_is_supplementary = true;
                        p += 1;
                    } else {
                        text[starter] = composite as u16;
                    }
                    // prev_cc stays, the mark is gone.
                    if p == text.len() {
                        break;
                    }
                    compositions_list = if composite_and_fwd & 1 != 0 {
                        Some(self.compositions_list_for_composite(self.raw_norm16(composite)))
                    } else {
                        None
                    };
                    continue;
                }
            }

            prev_cc = cc;
            if p == text.len() {
                break;
            }
            if cc == 0 {
                compositions_list = self.compositions_list_for_decomp_yes(norm16);
                if compositions_list.is_some() {
                    starter_is_supplementary = c > 0xFFFF;
                    starter = p - utf16::char_len(c);
                }
            } else if only_contiguous {
                // Any intervening character blocks.
                compositions_list = None;
            }
        }
        buffer.flush();
    }

    /// Quick check for composed text. Returns the end of the prefix which is known to be
    /// composed, shifted left by one, with the lowest bit set if the result is "maybe".
    ///
    /// With `do_span` the check stops at the first "maybe" character.
    pub fn compose_quick_check(&self, s: &[u16], src: usize, limit: usize,
                               only_contiguous: bool, do_span: bool) -> usize
    {
        let min_no_maybe_cp = self.ix.min_comp_no_maybe_cp;
        let mut src = src;
        let mut prev_boundary = src;
        let mut maybe = 0;

        loop {
            let (prev_src, mut norm16) = loop {
                if src == limit {
                    return (src << 1) | maybe;
                }
                if u32::from(s[src]) < min_no_maybe_cp {
                    src += 1;
                    continue;
                }
                let prev_src = src;
                let c = utf16::next_code_point(s, &mut src, limit);
                let norm16 = self.get_norm16(c);
                if !self.is_comp_yes_and_zero_cc(norm16) {
                    break (prev_src, norm16);
                }
            };

            // Find the boundary before the current character.
            let mut prev_norm16 = INERT;
            if prev_boundary != prev_src {
                if self.norm16_has_comp_boundary_before(norm16) {
                    prev_boundary = prev_src;
                } else {
                    let mut p = prev_src;
                    let prev = utf16::prev_code_point(s, prev_boundary, &mut p);
                    let n16 = self.get_norm16(prev);
                    if self.norm16_has_comp_boundary_after(n16, only_contiguous) {
                        prev_boundary = prev_src;
                    } else {
                        prev_boundary = p;
                        prev_norm16 = n16;
                    }
                }
            }

            if self.is_maybe_or_non_zero_cc(norm16) {
                let mut cc = Self::cc_from_yes_or_maybe(norm16);
                let out_of_order = only_contiguous && cc != 0
                    && self.trail_cc_from_comp_yes_and_zero_cc(prev_norm16) > cc;
                if !out_of_order {
                    let (n16, next) = loop {
                        if norm16 < MIN_YES_YES_WITH_CC {
                            if do_span {
                                return prev_boundary << 1;
                            }
                            maybe = 1;
                        }
                        if src == limit {
                            return (src << 1) | maybe;
                        }
                        let prev_cc = cc;
                        let mut next = src;
                        let c = utf16::next_code_point(s, &mut next, limit);
                        let n16 = self.get_norm16(c);
                        if !self.is_maybe_or_non_zero_cc(n16) {
                            break (n16, next);
                        }
                        cc = Self::cc_from_yes_or_maybe(n16);
                        if !(prev_cc <= cc || cc == 0) {
                            break (n16, next);
                        }
                        norm16 = n16;
                        src = next;
                    };
                    if self.is_comp_yes_and_zero_cc(n16) {
                        prev_boundary = src;
                        src = next;
                        continue;
                    }
                }
            }
            return prev_boundary << 1;
        }
    }

    /// Append `s` to composed text in the buffer, recomposing across the junction.
    /// Without `do_compose`, `s` is assumed to be composed already.
    pub fn compose_and_append(&self, s: &[u16], do_compose: bool, only_contiguous: bool,
                              buffer: &mut ReorderingBuffer<'_, '_>)
    {
        let limit = s.len();
        let mut src = 0;
        if !buffer.is_empty() {
            let first_starter_in_src = self.find_next_comp_boundary(s, 0, limit, only_contiguous);
            if first_starter_in_src != 0 {
                let last_starter_in_dest = self.find_previous_comp_boundary(
                    buffer.text.as_slice(), buffer.start(), buffer.len(), only_contiguous);
                let mut middle = buffer.text[last_starter_in_dest..].to_vec();
                buffer.remove_suffix(buffer.len() - last_starter_in_dest);
                middle.extend_from_slice(&s[..first_starter_in_src]);
                self.compose(&middle, 0, middle.len(), only_contiguous, true, buffer);
                src = first_starter_in_src;
            }
        }
        if do_compose {
            self.compose(s, src, limit, only_contiguous, true, buffer);
        } else {
            buffer.append_zero_cc_str(&s[src..]);
        }
    }
}
