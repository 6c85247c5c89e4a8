// Copyright (c) 2016, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Unicode normalization algorithms.
//!
//! This module implements _Unicode Normalization Forms_ as defined by [Unicode Standard
//! Annex #15][UAX-15]. Unicode normalization is used to ensure that visually equivalent
//! strings have equivalent binary representations.
//!
//! Besides the four standard forms, FCD ("fast C or D") and FCC ("fast C contiguous") are
//! available. See [Unicode Technical Note #5][UTN-5] for them.
//!
//! [UAX-15]: http://www.unicode.org/reports/tr15/
//! [UTN-5]: http://www.unicode.org/notes/tn5/

use libnormalize::{Normalizer2, QuickCheck};
use libtext::utf16;

/// Normalization forms available for strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NormalizationForm {
    C,
    D,
    KC,
    KD,
    /// NFKC with case folding and removal of default ignorable code points.
    KCCasefold,
    Fcd,
    Fcc,
}

impl NormalizationForm {
    fn normalizer(self) -> &'static Normalizer2<'static> {
        match self {
            NormalizationForm::C => Normalizer2::nfc(),
            NormalizationForm::D => Normalizer2::nfd(),
            NormalizationForm::KC => Normalizer2::nfkc(),
            NormalizationForm::KD => Normalizer2::nfkd(),
            NormalizationForm::KCCasefold => Normalizer2::nfkc_casefold(),
            NormalizationForm::Fcd => Normalizer2::fcd(),
            NormalizationForm::Fcc => Normalizer2::fcc(),
        }
    }
}

//
// Definitions of Normalization Forms
//

/// Normalize a string according to **Normalization Form D** (_D118_).
pub fn nfd(s: &str) -> String {
    normalize(s, NormalizationForm::D)
}

/// Normalize a string according to **Normalization Form KD** (_D119_).
pub fn nfkd(s: &str) -> String {
    normalize(s, NormalizationForm::KD)
}

/// Normalize a string according to **Normalization Form C** (_D120_).
pub fn nfc(s: &str) -> String {
    normalize(s, NormalizationForm::C)
}

/// Normalize a string according to **Normalization Form KC** (_D121_).
pub fn nfkc(s: &str) -> String {
    normalize(s, NormalizationForm::KC)
}

/// Bring a string into FCD form: canonical order is observed across decomposition
/// boundaries, but nothing is decomposed unless that is needed.
pub fn fcd(s: &str) -> String {
    normalize(s, NormalizationForm::Fcd)
}

/// Compose a string like NFC, but only combine characters which are adjacent after
/// decomposition. The result is in FCD form.
pub fn fcc(s: &str) -> String {
    normalize(s, NormalizationForm::Fcc)
}

/// Normalize a string into the specified form.
pub fn normalize(s: &str, form: NormalizationForm) -> String {
    let normalizer = form.normalizer();
    let src = utf16::from_str(s);
    if already_normalized(normalizer, form, &src) {
        return s.to_owned();
    }
    // Normalization never splits surrogate pairs of valid text.
    utf16::to_string_lossy(&normalizer.normalize(&src))
}

//
// Quick Check
//

/// Check whether a string is in Normalization Form C.
pub fn is_nfc(s: &str) -> bool {
    is_normalized(s, NormalizationForm::C)
}

/// Check whether a string is in Normalization Form D.
pub fn is_nfd(s: &str) -> bool {
    is_normalized(s, NormalizationForm::D)
}

/// Check whether a string is in Normalization Form KC.
pub fn is_nfkc(s: &str) -> bool {
    is_normalized(s, NormalizationForm::KC)
}

/// Check whether a string is in Normalization Form KD.
pub fn is_nfkd(s: &str) -> bool {
    is_normalized(s, NormalizationForm::KD)
}

/// Check whether a string is in FCD form.
pub fn is_fcd(s: &str) -> bool {
    is_normalized(s, NormalizationForm::Fcd)
}

/// Check whether a string is in the specified normalization form.
pub fn is_normalized(s: &str, form: NormalizationForm) -> bool {
    form.normalizer().is_normalized(&utf16::from_str(s))
}

/// Quickly check whether a string is in the specified normalization form.
///
/// `QuickCheck::Maybe` is returned for composing forms when the answer depends on
/// the surrounding characters. Use `is_normalized()` for a definite answer.
pub fn quick_check(s: &str, form: NormalizationForm) -> QuickCheck {
    form.normalizer().quick_check(&utf16::from_str(s))
}

/// Check whether the whole string passes the quick check.
fn already_normalized(normalizer: &Normalizer2, form: NormalizationForm, s: &[u16]) -> bool {
    // ASCII text is normalized in any form which does not fold case.
    if form != NormalizationForm::KCCasefold && s.iter().all(|&unit| unit <= 0x7F) {
        return true;
    }
    normalizer.span_quick_check_yes(s) == s.len()
}
