// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Character database queries.
//!
//! Thin adapters over the property crates which take and return plain `u32` code points.
//! Surrogate code points and values outside of the code point range are accepted everywhere
//! and behave like unassigned characters.

use caseless::Caseless;
use icu_properties::props::{CaseIgnorable, Cased, DefaultIgnorableCodePoint, Lowercase,
                            SoftDotted, Uppercase};
use icu_properties::{CodePointMapData, CodePointSetData};
use unicode_normalization::UnicodeNormalization;

pub use icu_properties::props::{GeneralCategory, GeneralCategoryGroup};

/// Version of the Unicode Standard the normalization data comes from.
pub fn unicode_version() -> [u8; 3] {
    let (major, minor, update) = unicode_normalization::UNICODE_VERSION;
    [major, minor, update]
}

fn to_char(c: u32) -> Option<char> {
    std::char::from_u32(c)
}

fn chars(s: &[u32]) -> impl Iterator<Item=char> + '_ {
    s.iter().filter_map(|&c| to_char(c))
}

fn code_points(s: impl Iterator<Item=char>) -> Vec<u32> {
    s.map(u32::from).collect()
}

//
// Normalization properties
//

/// Canonical_Combining_Class.
pub fn combining_class(c: u32) -> u8 {
    to_char(c).map_or(0, unicode_normalization::char::canonical_combining_class)
}

/// Full canonical decomposition, canonically ordered. Yields `[c]` if there is none.
pub fn canonical_decomposition(c: u32) -> Vec<u32> {
    match to_char(c) {
        Some(ch) => code_points(std::iter::once(ch).nfd()),
        None => vec![c],
    }
}

/// Full compatibility decomposition, canonically ordered. Yields `[c]` if there is none.
pub fn compatibility_decomposition(c: u32) -> Vec<u32> {
    match to_char(c) {
        Some(ch) => code_points(std::iter::once(ch).nfkd()),
        None => vec![c],
    }
}

/// Primary composite of a canonically decomposable pair, including Hangul syllables.
pub fn compose_pair(a: u32, b: u32) -> Option<u32> {
    match (to_char(a), to_char(b)) {
        (Some(a), Some(b)) => unicode_normalization::char::compose(a, b).map(u32::from),
        _ => None,
    }
}

/// Canonical composition (NFC) of a code point sequence.
pub fn nfc(s: &[u32]) -> Vec<u32> {
    code_points(chars(s).nfc())
}

/// Canonical decomposition (NFD) of a code point sequence.
pub fn nfd(s: &[u32]) -> Vec<u32> {
    code_points(chars(s).nfd())
}

/// Compatibility decomposition (NFKD) of a code point sequence.
pub fn nfkd(s: &[u32]) -> Vec<u32> {
    code_points(chars(s).nfkd())
}

//
// Case properties
//

/// Full default case folding (status C and F).
pub fn case_fold(c: u32) -> Vec<u32> {
    match to_char(c) {
        Some(ch) => code_points(std::iter::once(ch).default_case_fold()),
        None => vec![c],
    }
}

/// Full case folding of a code point sequence.
pub fn case_fold_all(s: &[u32]) -> Vec<u32> {
    code_points(chars(s).default_case_fold())
}

/// Unconditional full lowercase mapping.
pub fn full_lowercase(c: u32) -> Vec<u32> {
    match to_char(c) {
        Some(ch) => code_points(ch.to_lowercase()),
        None => vec![c],
    }
}

/// Unconditional full uppercase mapping.
pub fn full_uppercase(c: u32) -> Vec<u32> {
    match to_char(c) {
        Some(ch) => code_points(ch.to_uppercase()),
        None => vec![c],
    }
}

pub fn general_category(c: u32) -> GeneralCategory {
    CodePointMapData::<GeneralCategory>::new().get32(c)
}

pub fn is_lowercase(c: u32) -> bool {
    CodePointSetData::new::<Lowercase>().contains32(c)
}

pub fn is_uppercase(c: u32) -> bool {
    CodePointSetData::new::<Uppercase>().contains32(c)
}

pub fn is_cased(c: u32) -> bool {
    CodePointSetData::new::<Cased>().contains32(c)
}

pub fn is_case_ignorable(c: u32) -> bool {
    CodePointSetData::new::<CaseIgnorable>().contains32(c)
}

pub fn is_soft_dotted(c: u32) -> bool {
    CodePointSetData::new::<SoftDotted>().contains32(c)
}

pub fn is_default_ignorable(c: u32) -> bool {
    CodePointSetData::new::<DefaultIgnorableCodePoint>().contains32(c)
}

pub fn is_titlecase_letter(c: u32) -> bool {
    general_category(c) == GeneralCategory::TitlecaseLetter
}
