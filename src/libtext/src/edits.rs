// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Edits ledger.
//!
//! An `Edits` value records how an output string was produced from a source string: as a
//! sequence of spans which were either copied unchanged or replaced by some other text.
//! Lengths are counted in UTF-16 code units.
//!
//! The ledger can be read in two granularities. The _fine_ view reports every replacement
//! as it was recorded (typically one per code point). The _coarse_ view merges adjacent
//! replacements into one. Adjacent unchanged spans are always merged when recorded.

/// One recorded span.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Run {
    old_length: usize,
    new_length: usize,
    changed: bool,
}

/// A record of changes made by a text transformation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Edits {
    runs: Vec<Run>,
    delta: isize,
    changes: usize,
}

impl Edits {
    pub fn new() -> Edits {
        Edits::default()
    }

    /// Forget all recorded spans.
    pub fn reset(&mut self) {
        self.runs.clear();
        self.delta = 0;
        self.changes = 0;
    }

    /// Record a span of `length` code units copied to the output without changes.
    pub fn add_unchanged(&mut self, length: usize) {
        if length == 0 {
            return;
        }
        if let Some(last) = self.runs.last_mut() {
            if !last.changed {
                last.old_length += length;
                last.new_length += length;
                return;
            }
        }
        self.runs.push(Run { old_length: length, new_length: length, changed: false });
    }

    /// Record that `old_length` source code units were replaced with `new_length` units.
    ///
    /// Either length may be zero (deletion or insertion), but not both.
    pub fn add_replace(&mut self, old_length: usize, new_length: usize) {
        if old_length == 0 && new_length == 0 {
            return;
        }
        self.runs.push(Run { old_length, new_length, changed: true });
        self.delta += new_length as isize - old_length as isize;
        self.changes += 1;
    }

    /// Difference between the output length and the source length.
    pub fn length_delta(&self) -> isize {
        self.delta
    }

    /// Was anything replaced? A replacement with the same text still counts as a change.
    pub fn has_changes(&self) -> bool {
        self.changes != 0
    }

    /// Number of recorded replacements (fine granularity).
    pub fn number_of_changes(&self) -> usize {
        self.changes
    }

    /// Total length of the source text covered by the ledger.
    pub fn source_length(&self) -> usize {
        self.runs.iter().map(|r| r.old_length).sum()
    }

    /// Total length of the output text covered by the ledger.
    pub fn destination_length(&self) -> usize {
        self.runs.iter().map(|r| r.new_length).sum()
    }

    /// Iterate over merged spans, both changed and unchanged.
    pub fn coarse_iter(&self) -> EditsIter<'_> {
        EditsIter::new(&self.runs, true, false)
    }

    /// Iterate over merged changed spans only.
    pub fn coarse_changes_iter(&self) -> EditsIter<'_> {
        EditsIter::new(&self.runs, true, true)
    }

    /// Iterate over individual spans as recorded.
    pub fn fine_iter(&self) -> EditsIter<'_> {
        EditsIter::new(&self.runs, false, false)
    }

    /// Iterate over individual changed spans only.
    pub fn fine_changes_iter(&self) -> EditsIter<'_> {
        EditsIter::new(&self.runs, false, true)
    }

    /// Reconstruct the output from the source text and the replacement text.
    ///
    /// `replacements` is the concatenation of the new text of all changed spans in order,
    /// which is what transformations produce when told to omit unchanged text.
    ///
    /// # Panics
    ///
    /// Panics if the texts are shorter than the lengths recorded in the ledger.
    pub fn apply(&self, source: &[u16], replacements: &[u16]) -> Vec<u16> {
        let mut result = Vec::with_capacity((source.len() as isize + self.delta).max(0) as usize);
        for span in self.coarse_iter() {
            if span.has_change() {
                let i = span.replacement_index();
                result.extend_from_slice(&replacements[i..i + span.new_length()]);
            } else {
                let i = span.source_index();
                result.extend_from_slice(&source[i..i + span.old_length()]);
            }
        }
        // Text past the end of the ledger is left unchanged.
        let covered = self.source_length();
        if covered < source.len() {
            result.extend_from_slice(&source[covered..]);
        }
        result
    }
}

/// A span reported by an edits iterator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditSpan {
    old_length: usize,
    new_length: usize,
    changed: bool,
    source_index: usize,
    replacement_index: usize,
    destination_index: usize,
}

impl EditSpan {
    /// Length of the span in the source text.
    pub fn old_length(&self) -> usize {
        self.old_length
    }

    /// Length of the span in the output text.
    pub fn new_length(&self) -> usize {
        self.new_length
    }

    pub fn has_change(&self) -> bool {
        self.changed
    }

    /// Start of the span in the source text.
    pub fn source_index(&self) -> usize {
        self.source_index
    }

    /// Start of the span in the replacement text (the output without unchanged spans).
    /// For unchanged spans this is where the next replacement would start.
    pub fn replacement_index(&self) -> usize {
        self.replacement_index
    }

    /// Start of the span in the output text.
    pub fn destination_index(&self) -> usize {
        self.destination_index
    }
}

/// Iterator over the spans of an `Edits` ledger.
#[derive(Clone)]
pub struct EditsIter<'a> {
    runs: &'a [Run],
    position: usize,
    coarse: bool,
    only_changes: bool,
    source_index: usize,
    replacement_index: usize,
    destination_index: usize,
}

impl<'a> EditsIter<'a> {
    fn new(runs: &'a [Run], coarse: bool, only_changes: bool) -> EditsIter<'a> {
        EditsIter {
            runs,
            position: 0,
            coarse,
            only_changes,
            source_index: 0,
            replacement_index: 0,
            destination_index: 0,
        }
    }

    /// Fresh iterator over all spans with the same granularity.
    fn restarted(&self) -> EditsIter<'a> {
        EditsIter::new(self.runs, self.coarse, false)
    }

    fn next_span(&mut self) -> Option<EditSpan> {
        let run = *self.runs.get(self.position)?;
        self.position += 1;

        let mut span = EditSpan {
            old_length: run.old_length,
            new_length: run.new_length,
            changed: run.changed,
            source_index: self.source_index,
            replacement_index: self.replacement_index,
            destination_index: self.destination_index,
        };
        if self.coarse && run.changed {
            while let Some(next) = self.runs.get(self.position) {
                if !next.changed {
                    break;
                }
                span.old_length += next.old_length;
                span.new_length += next.new_length;
                self.position += 1;
            }
        }

        self.source_index += span.old_length;
        self.destination_index += span.new_length;
        if span.changed {
            self.replacement_index += span.new_length;
        }
        Some(span)
    }

    /// Find the span containing the source index `i`.
    ///
    /// All spans are considered, even for changes-only iterators. Returns None if the
    /// index is past the end of the source text.
    pub fn find_source_index(&self, i: usize) -> Option<EditSpan> {
        let mut iter = self.restarted();
        while let Some(span) = iter.next_span() {
            if i < span.source_index + span.old_length {
                return Some(span);
            }
        }
        None
    }

    /// Find the span containing the output index `i`.
    pub fn find_destination_index(&self, i: usize) -> Option<EditSpan> {
        let mut iter = self.restarted();
        while let Some(span) = iter.next_span() {
            if i < span.destination_index + span.new_length {
                return Some(span);
            }
        }
        None
    }

    /// Map a source index to the corresponding output index.
    ///
    /// Indexes inside a changed span map to the end of its replacement; indexes inside an
    /// unchanged span map one-to-one.
    pub fn destination_index_from_source_index(&self, i: usize) -> usize {
        match self.find_source_index(i) {
            Some(span) => {
                if i == span.source_index {
                    span.destination_index
                } else if span.changed {
                    span.destination_index + span.new_length
                } else {
                    span.destination_index + (i - span.source_index)
                }
            }
            None => self.runs.iter().map(|r| r.new_length).sum(),
        }
    }

    /// Map an output index to the corresponding source index.
    pub fn source_index_from_destination_index(&self, i: usize) -> usize {
        match self.find_destination_index(i) {
            Some(span) => {
                if i == span.destination_index {
                    span.source_index
                } else if span.changed {
                    span.source_index + span.old_length
                } else {
                    span.source_index + (i - span.destination_index)
                }
            }
            None => self.runs.iter().map(|r| r.old_length).sum(),
        }
    }
}

impl<'a> Iterator for EditsIter<'a> {
    type Item = EditSpan;

    fn next(&mut self) -> Option<EditSpan> {
        loop {
            let span = self.next_span()?;
            if self.only_changes && !span.changed {
                continue;
            }
            return Some(span);
        }
    }
}
