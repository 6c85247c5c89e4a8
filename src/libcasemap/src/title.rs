// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Segmentation for titlecasing.
//!
//! Titlecasing maps the first character of each segment to titlecase and the rest to
//! lowercase. Segments are words by default, or sentences, or the whole string. Word and
//! sentence boundaries come from `icu_segmenter`.

use icu_segmenter::options::{SentenceBreakInvariantOptions, WordBreakInvariantOptions};
use icu_segmenter::{SentenceSegmenter, WordSegmenter};
use log::debug;

use crate::options::{CaseMapError, CaseOptions, Result};

/// Boundaries of titlecasing segments in UTF-16 text.
pub trait BreakIterator {
    /// Start over with new text.
    fn set_text(&mut self, text: &[u16]);

    /// Rewind to the start of the text and return its index.
    fn first(&mut self) -> usize;

    /// Index of the next boundary, or `None` after the end of the text.
    fn next(&mut self) -> Option<usize>;
}

impl<'a, B: BreakIterator + ?Sized> BreakIterator for &'a mut B {
    fn set_text(&mut self, text: &[u16]) {
        (**self).set_text(text)
    }

    fn first(&mut self) -> usize {
        (**self).first()
    }

    fn next(&mut self) -> Option<usize> {
        (**self).next()
    }
}

/// A single segment covering the whole text.
#[derive(Clone, Debug, Default)]
pub struct WholeStringBreakIterator {
    length: usize,
    done: bool,
}

impl WholeStringBreakIterator {
    pub fn new() -> WholeStringBreakIterator {
        WholeStringBreakIterator::default()
    }
}

impl BreakIterator for WholeStringBreakIterator {
    fn set_text(&mut self, text: &[u16]) {
        self.length = text.len();
        self.done = false;
    }

    fn first(&mut self) -> usize {
        self.done = false;
        0
    }

    fn next(&mut self) -> Option<usize> {
        if self.done {
            return None;
        }
        self.done = true;
        Some(self.length)
    }
}

/// Boundaries precomputed by a segmenter.
#[derive(Clone, Debug, Default)]
struct Boundaries {
    breaks: Vec<usize>,
    position: usize,
}

impl Boundaries {
    fn reset(&mut self, breaks: Vec<usize>) {
        self.breaks = breaks;
        self.position = 0;
    }

    fn first(&mut self) -> usize {
        self.position = 0;
        0
    }

    fn next(&mut self) -> Option<usize> {
        // The segmenters report the start of the text as a boundary too.
        while let Some(&index) = self.breaks.get(self.position) {
            self.position += 1;
            if index > 0 {
                return Some(index);
            }
        }
        None
    }
}

/// Word boundaries of UAX #29.
#[derive(Clone, Debug, Default)]
pub struct WordBreakIterator {
    boundaries: Boundaries,
}

impl WordBreakIterator {
    pub fn new() -> WordBreakIterator {
        WordBreakIterator::default()
    }
}

impl BreakIterator for WordBreakIterator {
    fn set_text(&mut self, text: &[u16]) {
        let segmenter = WordSegmenter::new_auto(WordBreakInvariantOptions::default());
        self.boundaries.reset(segmenter.segment_utf16(text).collect());
    }

    fn first(&mut self) -> usize {
        self.boundaries.first()
    }

    fn next(&mut self) -> Option<usize> {
        self.boundaries.next()
    }
}

/// Sentence boundaries of UAX #29.
#[derive(Clone, Debug, Default)]
pub struct SentenceBreakIterator {
    boundaries: Boundaries,
}

impl SentenceBreakIterator {
    pub fn new() -> SentenceBreakIterator {
        SentenceBreakIterator::default()
    }
}

impl BreakIterator for SentenceBreakIterator {
    fn set_text(&mut self, text: &[u16]) {
        let segmenter = SentenceSegmenter::new(SentenceBreakInvariantOptions::default());
        self.boundaries.reset(segmenter.segment_utf16(text).collect());
    }

    fn first(&mut self) -> usize {
        self.boundaries.first()
    }

    fn next(&mut self) -> Option<usize> {
        self.boundaries.next()
    }
}

/// Check titlecasing options.
pub(crate) fn check_title_options(options: CaseOptions) -> Result<()> {
    if options.contains(CaseOptions::TITLECASE_ITERATOR_MASK) {
        return Err(CaseMapError::InvalidOptions("unknown titlecasing iterator option"));
    }
    if options.contains(CaseOptions::TITLECASE_ADJUSTMENT_MASK) {
        return Err(CaseMapError::InvalidOptions(
            "titlecasing index adjustment options are mutually exclusive"));
    }
    Ok(())
}

/// Pick the break iterator for titlecasing.
///
/// An explicit iterator is used as is. Otherwise the options select sentences or the whole
/// string, with words being the default. Asking for both is an error.
pub fn title_break_iterator<'b>(options: CaseOptions,
    explicit: Option<&'b mut dyn BreakIterator>) -> Result<Box<dyn BreakIterator + 'b>>
{
    check_title_options(options)?;
    let selected = options & CaseOptions::TITLECASE_ITERATOR_MASK;
    match explicit {
        Some(_) if !selected.is_empty() => Err(CaseMapError::InvalidOptions(
            "titlecasing iterator option used together with an explicit break iterator")),
        Some(iter) => Ok(Box::new(iter)),
        None if selected == CaseOptions::TITLECASE_WHOLE_STRING => {
            debug!("titlecasing the whole string");
            Ok(Box::new(WholeStringBreakIterator::new()))
        }
        None if selected == CaseOptions::TITLECASE_SENTENCES => {
            debug!("titlecasing sentences");
            Ok(Box::new(SentenceBreakIterator::new()))
        }
        None => {
            debug!("titlecasing words");
            Ok(Box::new(WordBreakIterator::new()))
        }
    }
}
