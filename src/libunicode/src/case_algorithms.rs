// Copyright (c) 2016, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Unicode case algorithms.
//!
//! This module implements _Case Algorithms_ as defined by [Unicode Standard 3.13][US-3].
//! Case algorithms are used to transform characters of bicameral scripts between their lowercase
//! and uppercase forms.
//!
//! Case mappings are context-dependent (final sigma, Lithuanian dots) and language-dependent.
//! The language is given as a language tag like `"tr"` or `"nl-NL"`. Tags of languages without
//! special rules, as well as the empty tag, select the default mappings.
//!
//! [US-3]: http://www.unicode.org/versions/latest/ch03.pdf

use libcasemap::{CaseMap, CaseMapError, CaseOptions};
use libtext::utf16;

use crate::normalization::{normalize, NormalizationForm};

/// Convert a string to lowercase according to **toLowercase** operation (_R2_).
pub fn to_lowercase(s: &str, language: &str) -> Result<String, CaseMapError> {
    let map = CaseMap::for_language_tag(language, CaseOptions::empty());
    map.to_lower(&utf16::from_str(s)).map(|lower| utf16::to_string_lossy(&lower))
}

/// Convert a string to uppercase according to **toUppercase** operation (_R1_).
pub fn to_uppercase(s: &str, language: &str) -> Result<String, CaseMapError> {
    let map = CaseMap::for_language_tag(language, CaseOptions::empty());
    map.to_upper(&utf16::from_str(s)).map(|upper| utf16::to_string_lossy(&upper))
}

/// Convert a string to titlecase according to **toTitlecase** operation (_R3_).
///
/// Words are found with the Unicode word break rules unless the options select
/// sentences or the whole string.
pub fn to_titlecase(s: &str, language: &str, options: CaseOptions)
    -> Result<String, CaseMapError>
{
    let map = CaseMap::for_language_tag(language, options);
    map.to_title(&utf16::from_str(s), None).map(|title| utf16::to_string_lossy(&title))
}

//
// Default Case Folding
//

/// Fold case of a string according to **toCasefold** operation (_R4_).
///
/// `CaseOptions::FOLD_CASE_EXCLUDE_SPECIAL_I` selects the Turkic folding of dotted and
/// dotless i. Other options are ignored.
pub fn fold_case(s: &str, options: CaseOptions) -> Result<String, CaseMapError> {
    let options = options & CaseOptions::FOLD_CASE_EXCLUDE_SPECIAL_I;
    let map = CaseMap::new(Default::default(), options);
    map.fold(&utf16::from_str(s)).map(|folded| utf16::to_string_lossy(&folded))
}

/// Fold case and normalize a string according to **toNFKC_Casefold** operation (_R5_).
pub fn to_nfkc_casefold(s: &str) -> String {
    normalize(s, NormalizationForm::KCCasefold)
}
