// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Normalization forms.
//!
//! A `Normalizer2` pairs normalization data with a mode. The standard forms are available
//! as process-wide instances which build their data on first use:
//!
//! | Form          | Data                 | Mode                |
//! |---------------|----------------------|---------------------|
//! | NFC           | canonical            | `Compose`           |
//! | NFD           | canonical            | `Decompose`         |
//! | FCD           | canonical            | `Fcd`               |
//! | FCC           | canonical            | `ComposeContiguous` |
//! | NFKC          | compatibility        | `Compose`           |
//! | NFKD          | compatibility        | `Decompose`         |
//! | NFKC_Casefold | compatibility + fold | `Compose`           |

use libtext::{utf16, Edits, Sink, SinkError};
use libunidata::norm::MIN_CCC_LCCC_CP;
use libunidata::NormKind;
use once_cell::sync::Lazy;

use crate::normalizer_impl::NormalizerImpl;
use crate::reordering_buffer::ReorderingBuffer;

/// How a `Normalizer2` applies its data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Full decomposition with canonical reordering.
    Decompose,
    /// Decomposition followed by canonical composition.
    Compose,
    /// Like `Compose`, but a combining mark only composes with a starter when every
    /// character between them has a lower combining class than the mark and the trail
    /// combining classes of the text are in order.
    ComposeContiguous,
    /// "Fast C or D": decompose only what is needed to get canonical order.
    Fcd,
}

/// Result of a quick check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QuickCheck {
    Yes,
    No,
    /// The text is normalized unless a full check says otherwise.
    Maybe,
}

#[derive(Clone, Copy, Debug)]
pub struct Normalizer2<'a> {
    imp: &'a NormalizerImpl,
    mode: Mode,
}

//
// Standard instances
//

fn load(kind: NormKind) -> NormalizerImpl {
    match NormalizerImpl::build(kind) {
        Ok(imp) => imp,
        Err(err) => panic!("failed to build {:?} normalization data: {}", kind, err),
    }
}

static CANONICAL: Lazy<NormalizerImpl> = Lazy::new(|| load(NormKind::Canonical));
static COMPATIBILITY: Lazy<NormalizerImpl> = Lazy::new(|| load(NormKind::Compatibility));
static CASE_FOLD: Lazy<NormalizerImpl> = Lazy::new(|| load(NormKind::CompatibilityCaseFold));

static NFC: Lazy<Normalizer2<'static>> = Lazy::new(|| Normalizer2::new(&CANONICAL, Mode::Compose));
static NFD: Lazy<Normalizer2<'static>> = Lazy::new(|| Normalizer2::new(&CANONICAL, Mode::Decompose));
static FCD: Lazy<Normalizer2<'static>> = Lazy::new(|| Normalizer2::new(&CANONICAL, Mode::Fcd));
static FCC: Lazy<Normalizer2<'static>> =
    Lazy::new(|| Normalizer2::new(&CANONICAL, Mode::ComposeContiguous));
static NFKC: Lazy<Normalizer2<'static>> =
    Lazy::new(|| Normalizer2::new(&COMPATIBILITY, Mode::Compose));
static NFKD: Lazy<Normalizer2<'static>> =
    Lazy::new(|| Normalizer2::new(&COMPATIBILITY, Mode::Decompose));
static NFKC_CASEFOLD: Lazy<Normalizer2<'static>> =
    Lazy::new(|| Normalizer2::new(&CASE_FOLD, Mode::Compose));

// The standard instances panic on first use if their data cannot be built. That would be
// a bug in the data builder, not a condition callers can handle.
impl Normalizer2<'static> {
    pub fn nfc() -> &'static Normalizer2<'static> {
        &NFC
    }

    pub fn nfd() -> &'static Normalizer2<'static> {
        &NFD
    }

    pub fn nfkc() -> &'static Normalizer2<'static> {
        &NFKC
    }

    pub fn nfkd() -> &'static Normalizer2<'static> {
        &NFKD
    }

    pub fn nfkc_casefold() -> &'static Normalizer2<'static> {
        &NFKC_CASEFOLD
    }

    pub fn fcd() -> &'static Normalizer2<'static> {
        &FCD
    }

    pub fn fcc() -> &'static Normalizer2<'static> {
        &FCC
    }
}

impl<'a> Normalizer2<'a> {
    pub fn new(imp: &'a NormalizerImpl, mode: Mode) -> Normalizer2<'a> {
        Normalizer2 { imp, mode }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The data this normalizer works with.
    pub fn normalizer_impl(&self) -> &'a NormalizerImpl {
        self.imp
    }

    //
    // Normalizing strings
    //

    /// Normalize UTF-16 text.
    pub fn normalize(&self, src: &[u16]) -> Vec<u16> {
        let mut text = Vec::with_capacity(src.len());
        let mut buffer = ReorderingBuffer::new(self.imp, &mut text);
        self.normalize_into(src, &mut buffer);
        text
    }

    /// Normalize UTF-16 text, appending the result to a sink.
    ///
    /// The content of the sink is not taken into account: the source is normalized on its
    /// own as if the sink was empty.
    pub fn normalize_to<S: Sink + ?Sized>(&self, src: &[u16], sink: &mut S)
        -> Result<(), SinkError>
    {
        match sink.direct_buffer() {
            Some(text) => {
                let mut buffer = ReorderingBuffer::new(self.imp, text);
                self.normalize_into(src, &mut buffer);
                Ok(())
            }
            None => sink.push_units(&self.normalize(src)),
        }
    }

    /// Normalize UTF-16 text into a sink and record the changes.
    ///
    /// The text is processed in pieces between normalization boundaries, so each change
    /// spans the smallest such piece which is not normalized.
    pub fn normalize_with_edits<S: Sink + ?Sized>(&self, src: &[u16], sink: &mut S,
                                                  edits: &mut Edits) -> Result<(), SinkError>
    {
        edits.reset();
        let mut piece = Vec::new();
        let mut start = 0;
        while start < src.len() {
            let limit = self.next_boundary(src, start);
            piece.clear();
            let mut buffer = ReorderingBuffer::new(self.imp, &mut piece);
            self.normalize_into(&src[start..limit], &mut buffer);
            if piece.as_slice() == &src[start..limit] {
                edits.add_unchanged(limit - start);
            } else {
                edits.add_replace(limit - start, piece.len());
            }
            sink.push_units(&piece)?;
            start = limit;
        }
        Ok(())
    }

    /// Find the next boundary after the code point at `start`.
    fn next_boundary(&self, src: &[u16], start: usize) -> usize {
        let mut p = start;
        utf16::next_code_point(src, &mut p, src.len());
        while p < src.len() {
            let mut next = p;
            let c = utf16::next_code_point(src, &mut next, src.len());
            if self.has_boundary_before(c) {
                break;
            }
            p = next;
        }
        p
    }

    fn normalize_into(&self, src: &[u16], buffer: &mut ReorderingBuffer<'_, '_>) {
        let limit = src.len();
        match self.mode {
            Mode::Decompose => {
                self.imp.decompose(src, 0, limit, Some(buffer));
            }
            Mode::Compose => {
                self.imp.compose(src, 0, limit, false, true, buffer);
            }
            Mode::ComposeContiguous => {
                self.imp.compose(src, 0, limit, true, true, buffer);
            }
            Mode::Fcd => {
                self.imp.make_fcd(src, 0, limit, Some(buffer));
            }
        }
    }

    /// Append the normalized form of `second` to `first`, which must be normalized already.
    /// Text around the junction is normalized as a whole.
    pub fn normalize_second_and_append(&self, first: &mut Vec<u16>, second: &[u16]) {
        self.append_impl(first, second, true);
    }

    /// Append `second` to `first`, both of which must be normalized already. Text around the
    /// junction is normalized as a whole.
    pub fn append(&self, first: &mut Vec<u16>, second: &[u16]) {
        self.append_impl(first, second, false);
    }

    fn append_impl(&self, first: &mut Vec<u16>, second: &[u16], do_normalize: bool) {
        let mut buffer = ReorderingBuffer::continuing(self.imp, first, 0);
        match self.mode {
            Mode::Decompose => self.imp.decompose_and_append(second, do_normalize, &mut buffer),
            Mode::Compose => {
                self.imp.compose_and_append(second, do_normalize, false, &mut buffer)
            }
            Mode::ComposeContiguous => {
                self.imp.compose_and_append(second, do_normalize, true, &mut buffer)
            }
            Mode::Fcd => self.imp.make_fcd_and_append(second, do_normalize, &mut buffer),
        }
    }

    //
    // Checking strings
    //

    /// Whether the text is normalized.
    pub fn is_normalized(&self, s: &[u16]) -> bool {
        let limit = s.len();
        match self.mode {
            Mode::Decompose => self.imp.decompose(s, 0, limit, None) == limit,
            Mode::Fcd => self.imp.make_fcd(s, 0, limit, None) == limit,
            Mode::Compose | Mode::ComposeContiguous => {
                let mut scratch = Vec::new();
                let mut buffer = ReorderingBuffer::new(self.imp, &mut scratch);
                self.imp.compose(s, 0, limit, self.only_contiguous(), false, &mut buffer)
            }
        }
    }

    /// Check the text quickly. Only composition can be uncertain.
    pub fn quick_check(&self, s: &[u16]) -> QuickCheck {
        match self.mode {
            Mode::Compose | Mode::ComposeContiguous => {
                let result = self.imp.compose_quick_check(s, 0, s.len(), self.only_contiguous(),
                                                          false);
                if result & 1 != 0 {
                    QuickCheck::Maybe
                } else if result >> 1 == s.len() {
                    QuickCheck::Yes
                } else {
                    QuickCheck::No
                }
            }
            Mode::Decompose | Mode::Fcd => {
                if self.is_normalized(s) {
                    QuickCheck::Yes
                } else {
                    QuickCheck::No
                }
            }
        }
    }

    /// Length of the longest prefix which is certainly normalized and ends at a boundary.
    pub fn span_quick_check_yes(&self, s: &[u16]) -> usize {
        let limit = s.len();
        match self.mode {
            Mode::Decompose => self.imp.decompose(s, 0, limit, None),
            Mode::Fcd => self.imp.make_fcd(s, 0, limit, None),
            Mode::Compose | Mode::ComposeContiguous => {
                self.imp.compose_quick_check(s, 0, limit, self.only_contiguous(), true) >> 1
            }
        }
    }

    fn only_contiguous(&self) -> bool {
        self.mode == Mode::ComposeContiguous
    }

    //
    // Code point properties
    //

    /// The decomposition mapping of `c` in this normalizer's data, fully decomposed.
    pub fn get_decomposition(&self, c: u32) -> Option<Vec<u16>> {
        self.imp.get_decomposition(c)
    }

    /// The raw (single-level) decomposition mapping of `c`.
    pub fn get_raw_decomposition(&self, c: u32) -> Option<Vec<u16>> {
        self.imp.get_raw_decomposition(c)
    }

    /// The primary composite of `a` and `b`, if there is one.
    pub fn compose_pair(&self, a: u32, b: u32) -> Option<u32> {
        self.imp.compose_pair(a, b)
    }

    pub fn get_combining_class(&self, c: u32) -> u8 {
        self.imp.get_combining_class(c)
    }

    /// Whether normalization never interacts across a boundary before `c`: text can be
    /// split there and normalized piecewise.
    pub fn has_boundary_before(&self, c: u32) -> bool {
        match self.mode {
            Mode::Decompose => self.imp.has_decomp_boundary_before(c),
            Mode::Compose | Mode::ComposeContiguous => self.imp.has_comp_boundary_before(c),
            Mode::Fcd => c < MIN_CCC_LCCC_CP || self.imp.get_fcd16(c) <= 0xFF,
        }
    }

    /// Whether normalization never interacts across a boundary after `c`.
    pub fn has_boundary_after(&self, c: u32) -> bool {
        match self.mode {
            Mode::Decompose => self.imp.has_decomp_boundary_after(c),
            Mode::Compose => self.imp.has_comp_boundary_after(c, false),
            Mode::ComposeContiguous => self.imp.has_comp_boundary_after(c, true),
            Mode::Fcd => self.imp.get_fcd16(c) <= 1,
        }
    }

    /// Whether `c` is normalization-inert: it has boundaries before and after, and is not
    /// changed by normalization.
    pub fn is_inert(&self, c: u32) -> bool {
        match self.mode {
            Mode::Decompose => self.imp.is_decomp_inert(c),
            Mode::Compose => self.imp.is_comp_inert(c, false),
            Mode::ComposeContiguous => self.imp.is_comp_inert(c, true),
            Mode::Fcd => self.imp.is_fcd_inert(c),
        }
    }
}
