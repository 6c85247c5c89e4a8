// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! FCD ("fast C or D") text.
//!
//! Text is FCD when the trail combining class of every code point (of its decomposition,
//! to be precise) is not greater than the lead combining class of the next one, unless
//! that is zero. Such text yields NFD after decomposing each code point without any
//! reordering. Text which is not FCD is fixed by decomposing the offending pieces.

use libtext::utf16;

use crate::normalizer_impl::NormalizerImpl;
use crate::reordering_buffer::ReorderingBuffer;

impl NormalizerImpl {
    /// Make `s[src..limit]` FCD, writing the result into the buffer, and return `limit`.
    ///
    /// Without a buffer this is a quick check: the return value is the end of the longest
    /// prefix which is FCD.
    ///
    /// The buffer is used with zero combining classes only since lead and trail combining
    /// classes are tracked here, except for the pieces which get decomposed.
    pub fn make_fcd(&self, s: &[u16], src: usize, limit: usize,
                    mut buffer: Option<&mut ReorderingBuffer<'_, '_>>) -> usize
    {
        let mut src = src;
        // The last FCD-safe boundary: before lccc = 0 or after properly ordered tccc <= 1.
        let mut prev_boundary = src;
        // FCD value of the previous code point. Negative values hold a complemented code
        // point below min_lccc_cp whose value has not been looked up yet.
        let mut prev_fcd16: i32 = 0;

        loop {
            // Skip code points with lccc = 0.
            let mut prev_src = src;
            let mut current = None;
            while src < limit {
                let unit = u32::from(s[src]);
                if unit < self.ix.min_lccc_cp {
                    prev_fcd16 = !(unit as i32);
                    src += 1;
                } else if !self.small_fcd_bit(unit) {
                    prev_fcd16 = 0;
                    src += 1;
                } else {
                    let mut next = src;
                    let c = utf16::next_code_point(s, &mut next, limit);
                    let fcd16 = self.get_fcd16_from_norm_data(c);
                    if fcd16 <= 0xFF {
                        prev_fcd16 = i32::from(fcd16);
                        src = next;
                    } else {
                        current = Some((c, fcd16, next));
                        break;
                    }
                }
            }

            if src != prev_src {
                if src == limit {
                    if let Some(buffer) = buffer.as_mut() {
                        buffer.append_zero_cc_str(&s[prev_src..src]);
                    }
                    break;
                }
                prev_boundary = src;
                // The previous code point has lccc = 0.
                if prev_fcd16 < 0 {
                    let prev = !prev_fcd16 as u32;
                    if prev < self.ix.min_decomp_no_cp {
                        prev_fcd16 = 0;
                    } else {
                        prev_fcd16 = i32::from(self.get_fcd16_from_norm_data(prev));
                        if prev_fcd16 > 1 {
                            prev_boundary -= 1;
                        }
                    }
                } else {
                    let mut p = src - 1;
                    if utf16::is_trail(u32::from(s[p])) && prev_src < p
                        && utf16::is_lead(u32::from(s[p - 1]))
                    {
                        p -= 1;
                        let pair = utf16::supplementary(u32::from(s[p]), u32::from(s[p + 1]));
                        prev_fcd16 = i32::from(self.get_fcd16_from_norm_data(pair));
                    }
                    if prev_fcd16 > 1 {
                        prev_boundary = p;
                    }
                }
                if let Some(buffer) = buffer.as_mut() {
                    // The last lccc = 0 code point may need to be decomposed, append it
                    // separately so that it can be removed.
                    buffer.append_zero_cc_str(&s[prev_src..prev_boundary]);
                    buffer.append_zero_cc_str(&s[prev_boundary..src]);
                }
                prev_src = src;
            }
            let (c, fcd16, next) = match current {
                Some(current) => current,
                None => break,
            };
            src = next;

            // The current code point has a non-zero lead combining class.
            if (prev_fcd16 & 0xFF) as u16 <= fcd16 >> 8 {
                if fcd16 & 0xFF <= 1 {
                    prev_boundary = src;
                }
                if let Some(buffer) = buffer.as_mut() {
                    buffer.append_zero_cc(c);
                }
                prev_fcd16 = i32::from(fcd16);
                continue;
            }
            match buffer.as_mut() {
                None => return prev_boundary,
                Some(buffer) => {
                    // Take back what was already copied since the last boundary and
                    // decompose up to the next one.
                    buffer.remove_suffix(prev_src - prev_boundary);
                    src = self.find_next_fcd_boundary(s, src, limit);
                    self.decompose_fcd_segment(s, prev_boundary, src, buffer);
                    prev_boundary = src;
                    prev_fcd16 = 0;
                }
            }
        }
        src
    }

    fn decompose_fcd_segment(&self, s: &[u16], src: usize, limit: usize,
                             buffer: &mut ReorderingBuffer<'_, '_>)
    {
        let mut src = src;
        while src < limit {
            let c = utf16::next_code_point(s, &mut src, limit);
            self.decompose_code_point(c, self.get_norm16(c), buffer);
        }
    }

    /// Append `s` to FCD text in the buffer, fixing the order across the junction.
    /// Without `do_make_fcd`, `s` is assumed to be FCD already.
    pub fn make_fcd_and_append(&self, s: &[u16], do_make_fcd: bool,
                               buffer: &mut ReorderingBuffer<'_, '_>)
    {
        let limit = s.len();
        let mut src = 0;
        if !buffer.is_empty() {
            let first_boundary_in_src = self.find_next_fcd_boundary(s, 0, limit);
            if first_boundary_in_src != 0 {
                let last_boundary_in_dest = self.find_previous_fcd_boundary(
                    buffer.text.as_slice(), buffer.start(), buffer.len());
                let mut middle = buffer.text[last_boundary_in_dest..].to_vec();
                buffer.remove_suffix(buffer.len() - last_boundary_in_dest);
                middle.extend_from_slice(&s[..first_boundary_in_src]);
                self.make_fcd(&middle, 0, middle.len(), Some(&mut *buffer));
                src = first_boundary_in_src;
            }
        }
        if do_make_fcd {
            self.make_fcd(s, src, limit, Some(buffer));
        } else {
            buffer.append_zero_cc_str(&s[src..]);
        }
    }
}
