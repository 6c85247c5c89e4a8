// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Output buffer maintaining canonical order.
//!
//! The buffer appends to a borrowed `Vec<u16>` but only ever touches the text after its
//! `start` position. Combining marks appended out of order are inserted at their canonical
//! position, which is searched backwards no further than `reorder_start`: text before it
//! ends with a character with ccc <= 1 and never needs to be reordered again.

use libtext::utf16;

use crate::normalizer_impl::NormalizerImpl;

pub struct ReorderingBuffer<'a, 'b> {
    imp: &'a NormalizerImpl,
    pub(crate) text: &'b mut Vec<u16>,
    start: usize,
    reorder_start: usize,
    last_cc: u8,
    // Backward iteration state for insert().
    code_point_start: usize,
    code_point_limit: usize,
}

impl<'a, 'b> ReorderingBuffer<'a, 'b> {
    /// Append after the current content of `text`, treating it as a normalization boundary.
    pub fn new(imp: &'a NormalizerImpl, text: &'b mut Vec<u16>) -> ReorderingBuffer<'a, 'b> {
        let start = text.len();
        ReorderingBuffer {
            imp,
            text,
            start,
            reorder_start: start,
            last_cc: 0,
            code_point_start: start,
            code_point_limit: start,
        }
    }

    /// Continue normalized text which begins at `start`, so that appended combining marks
    /// are ordered with the marks already at the end of `text`.
    pub fn continuing(imp: &'a NormalizerImpl, text: &'b mut Vec<u16>, start: usize)
        -> ReorderingBuffer<'a, 'b>
    {
        let mut buffer = ReorderingBuffer {
            imp,
            text,
            start,
            reorder_start: start,
            last_cc: 0,
            code_point_start: start,
            code_point_limit: start,
        };
        if buffer.text.len() > start {
            buffer.set_iterator();
            buffer.last_cc = buffer.previous_cc();
            if buffer.last_cc > 1 {
                while buffer.previous_cc() > 1 {}
            }
            buffer.reorder_start = buffer.code_point_limit;
        }
        buffer
    }

    /// Length of the whole underlying text, including content before `start`.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the buffer holds nothing after `start`.
    pub fn is_empty(&self) -> bool {
        self.text.len() == self.start
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn last_cc(&self) -> u8 {
        self.last_cc
    }

    /// Text appended to the buffer.
    pub fn as_slice(&self) -> &[u16] {
        &self.text[self.start..]
    }

    /// Compare the buffered text with `s[start..limit]`.
    pub fn equals(&self, s: &[u16], start: usize, limit: usize) -> bool {
        self.as_slice() == &s[start..limit]
    }

    //
    // Appending
    //

    /// Append a code point with the given combining class.
    pub fn append(&mut self, c: u32, cc: u8) {
        if self.last_cc <= cc || cc == 0 {
            utf16::push_code_point(self.text, c);
            self.last_cc = cc;
            if cc <= 1 {
                self.reorder_start = self.text.len();
            }
        } else {
            self.insert(c, cc);
        }
    }

    /// Append a string with known lead and trail combining classes. Intermediate
    /// combining classes are looked up as needed.
    pub fn append_str(&mut self, s: &[u16], is_nfd: bool, lead_cc: u8, trail_cc: u8) {
        if s.is_empty() {
            return;
        }
        if self.last_cc <= lead_cc || lead_cc == 0 {
            if trail_cc <= 1 {
                self.reorder_start = self.text.len() + s.len();
            } else if lead_cc <= 1 {
                let first = utf16::code_point_at(s, 0);
                self.reorder_start = self.text.len() + utf16::char_len(first);
            }
            self.text.extend_from_slice(s);
            self.last_cc = trail_cc;
        } else {
            let mut i = 0;
            let c = utf16::next_code_point(s, &mut i, s.len());
            self.insert(c, lead_cc);
            while i < s.len() {
                let c = utf16::next_code_point(s, &mut i, s.len());
                let cc = if i < s.len() {
                    let norm16 = self.imp.get_norm16(c);
                    if is_nfd {
                        NormalizerImpl::cc_from_yes_or_maybe(norm16)
                    } else {
                        self.imp.get_cc(norm16)
                    }
                } else {
                    trail_cc
                };
                self.append(c, cc);
            }
        }
    }

    /// Append a code point known to have ccc = 0 without reordering.
    pub fn append_zero_cc(&mut self, c: u32) {
        utf16::push_code_point(self.text, c);
        self.last_cc = 0;
        self.reorder_start = self.text.len();
    }

    /// Append text which ends with a character with ccc = 0 without reordering.
    pub fn append_zero_cc_str(&mut self, s: &[u16]) {
        if s.is_empty() {
            return;
        }
        self.text.extend_from_slice(s);
        self.last_cc = 0;
        self.reorder_start = self.text.len();
    }

    /// Drop everything appended to the buffer.
    pub fn remove(&mut self) {
        self.text.truncate(self.start);
        self.last_cc = 0;
        self.reorder_start = self.start;
    }

    /// Drop the last `length` code units.
    pub fn remove_suffix(&mut self, length: usize) {
        let new_len = self.text.len() - length;
        debug_assert!(new_len >= self.start);
        self.text.truncate(new_len);
        self.last_cc = 0;
        self.reorder_start = new_len;
    }

    /// Mark the current end as a point which is never reordered across.
    pub fn flush(&mut self) {
        self.reorder_start = self.text.len();
        self.last_cc = 0;
    }

    //
    // Reordering
    //

    fn insert(&mut self, c: u32, cc: u8) {
        self.set_iterator();
        self.skip_previous();
        while self.previous_cc() > cc {}
        let at = self.code_point_limit;
        if c <= 0xFFFF {
            self.text.insert(at, c as u16);
        } else {
            self.text.insert(at, utf16::trail(c));
            self.text.insert(at, utf16::lead(c));
        }
        if cc <= 1 {
            self.reorder_start = at + utf16::char_len(c);
        }
    }

    fn set_iterator(&mut self) {
        self.code_point_start = self.text.len();
    }

    fn skip_previous(&mut self) {
        self.code_point_limit = self.code_point_start;
        let mut i = self.code_point_start;
        utf16::prev_code_point(self.text.as_slice(), self.start, &mut i);
        self.code_point_start = i;
    }

    /// Step back one code point and return its combining class, or 0 when reaching
    /// `reorder_start`.
    fn previous_cc(&mut self) -> u8 {
        self.code_point_limit = self.code_point_start;
        if self.reorder_start >= self.code_point_start {
            return 0;
        }
        let mut i = self.code_point_start;
        let c = utf16::prev_code_point(self.text.as_slice(), self.start, &mut i);
        self.code_point_start = i;
        self.imp.cc_from_yes_or_maybe_cp(c)
    }
}
