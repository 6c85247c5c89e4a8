// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Case mapping context.
//!
//! Some case mappings depend on the characters around the one being mapped: final sigma,
//! or the combining dot above after i in Lithuanian and Turkish. The mapping functions look
//! at the surrounding text through a `ContextIterator` which walks away from the current
//! code point in either direction.

use libtext::utf16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Towards the start of the text, beginning before the current code point.
    Backward,
    /// Towards the end of the text, beginning after the current code point.
    Forward,
}

/// Iteration over the text around the code point being case mapped.
pub trait ContextIterator {
    /// Start iterating in the given direction.
    fn reset(&mut self, direction: Direction);

    /// Next code point in the current direction, or `None` at the end of the text.
    fn next(&mut self) -> Option<u32>;
}

/// Context of a code point mapped on its own.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoContext;

impl ContextIterator for NoContext {
    fn reset(&mut self, _direction: Direction) {}

    fn next(&mut self) -> Option<u32> {
        None
    }
}

/// Context iterator over UTF-16 text.
///
/// Besides the context iteration, it walks the text code point by code point up to an
/// adjustable limit. The current code point spans `cp_start..cp_limit`; context iteration
/// always sees the whole text regardless of the limit.
#[derive(Clone, Debug)]
pub struct StringContextIterator<'s> {
    s: &'s [u16],
    index: usize,
    limit: usize,
    cp_start: usize,
    cp_limit: usize,
    direction: Option<Direction>,
}

impl<'s> StringContextIterator<'s> {
    pub fn new(s: &'s [u16]) -> StringContextIterator<'s> {
        StringContextIterator {
            s,
            index: 0,
            limit: s.len(),
            cp_start: 0,
            cp_limit: 0,
            direction: None,
        }
    }

    /// Limit the code point walk, up to the end of the text.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.min(self.s.len());
    }

    /// Advance to the next code point before the limit.
    pub fn next_case_map_cp(&mut self) -> Option<u32> {
        self.cp_start = self.cp_limit;
        if self.cp_limit < self.limit {
            Some(utf16::next_code_point(self.s, &mut self.cp_limit, self.limit))
        } else {
            None
        }
    }

    /// Set the current code point span directly.
    pub fn set_cp_start_and_limit(&mut self, start: usize, limit: usize) {
        self.cp_start = start;
        self.cp_limit = limit;
        self.direction = None;
    }

    pub fn cp_start(&self) -> usize {
        self.cp_start
    }

    pub fn cp_limit(&self) -> usize {
        self.cp_limit
    }
}

impl<'s> ContextIterator for StringContextIterator<'s> {
    fn reset(&mut self, direction: Direction) {
        self.direction = Some(direction);
        self.index = match direction {
            Direction::Backward => self.cp_start,
            Direction::Forward => self.cp_limit,
        };
    }

    fn next(&mut self) -> Option<u32> {
        match self.direction {
            Some(Direction::Forward) if self.index < self.s.len() => {
                Some(utf16::next_code_point(self.s, &mut self.index, self.s.len()))
            }
            Some(Direction::Backward) if self.index > 0 => {
                Some(utf16::prev_code_point(self.s, 0, &mut self.index))
            }
            _ => None,
        }
    }
}
