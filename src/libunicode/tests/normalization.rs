// Copyright (c) 2016, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Unicode normalization tests.

use libunicode::normalization::{fcc, fcd, is_fcd, is_nfc, is_nfd, is_nfkc, is_nfkd,
                                is_normalized, nfc, nfd, nfkc, nfkd, normalize, quick_check,
                                NormalizationForm};
use libunicode::QuickCheck;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn ascii_is_normalized() {
    init_logging();
    let text = "The quick brown fox, 123!";
    assert_eq!(nfc(text), text);
    assert_eq!(nfd(text), text);
    assert_eq!(nfkc(text), text);
    assert_eq!(nfkd(text), text);
    assert!(is_nfc(text) && is_nfd(text) && is_nfkc(text) && is_nfkd(text) && is_fcd(text));
    assert!(!is_normalized(text, NormalizationForm::KCCasefold));
}

#[test]
fn canonical_forms() {
    init_logging();
    assert_eq!(nfd("\u{00C5}"), "A\u{030A}");
    assert_eq!(nfc("A\u{030A}"), "\u{00C5}");
    // Singletons
    assert_eq!(nfc("\u{212B}"), "\u{00C5}");
    assert_eq!(nfc("\u{2126}"), "\u{03A9}");
    // Composition exclusions
    assert_eq!(nfc("\u{0958}"), "\u{0915}\u{093C}");
    // Compatibility characters are kept
    assert_eq!(nfc("\u{FB01}"), "\u{FB01}");
    assert_eq!(nfd("\u{1E9B}\u{0323}"), "\u{017F}\u{0323}\u{0307}");
    assert_eq!(nfc("\u{1E9B}\u{0323}"), "\u{1E9B}\u{0323}");
}

#[test]
fn compatibility_forms() {
    init_logging();
    assert_eq!(nfkd("\u{FB01}"), "fi");
    assert_eq!(nfkc("\u{2460}"), "1");
    assert_eq!(nfkd("\u{1E9B}\u{0323}"), "s\u{0323}\u{0307}");
    assert_eq!(nfkc("\u{1E9B}\u{0323}"), "\u{1E69}");
    assert_eq!(nfkc("\u{FF76}\u{FF9E}"), "\u{30AC}");
}

#[test]
fn canonical_ordering() {
    init_logging();
    assert_eq!(nfd("a\u{0301}\u{0323}"), "a\u{0323}\u{0301}");
    assert_eq!(nfc("a\u{0301}\u{0323}"), "\u{1EA1}\u{0301}");
    assert!(!is_nfd("a\u{0301}\u{0323}"));
    assert!(is_nfd("a\u{0323}\u{0301}"));
}

#[test]
fn hangul() {
    init_logging();
    assert_eq!(nfd("\u{AC01}"), "\u{1100}\u{1161}\u{11A8}");
    assert_eq!(nfc("\u{1100}\u{1161}\u{11A8}"), "\u{AC01}");
    assert_eq!(nfc("\u{1100}\u{1161}"), "\u{AC00}");
    assert_eq!(nfc("\u{AC00}\u{11A8}"), "\u{AC01}");
}

#[test]
fn fast_forms() {
    init_logging();
    assert!(is_fcd("\u{00C5}"));
    assert!(!is_fcd("\u{00C5}\u{0323}"));
    assert_eq!(fcd("a\u{0301}\u{0323}"), "a\u{0323}\u{0301}");
    assert_eq!(fcd("\u{00C5}"), "\u{00C5}");
    assert_eq!(fcc("A\u{030A}"), "\u{00C5}");
    assert!(is_normalized(&fcc("a\u{0301}\u{0323}"), NormalizationForm::Fcd));
}

#[test]
fn quick_checks() {
    init_logging();
    assert_eq!(quick_check("abc", NormalizationForm::C), QuickCheck::Yes);
    assert_eq!(quick_check("A\u{030A}", NormalizationForm::C), QuickCheck::Maybe);
    assert_eq!(quick_check("\u{00C5}", NormalizationForm::D), QuickCheck::No);
    assert_eq!(quick_check("\u{00C5}", NormalizationForm::C), QuickCheck::Yes);
    assert!(!is_nfc("A\u{030A}"));
    assert!(is_nfc("\u{00C5}"));
}

#[test]
fn casefold_form() {
    init_logging();
    assert_eq!(normalize("ABC\u{00AD}", NormalizationForm::KCCasefold), "abc");
    assert_eq!(normalize("\u{FB01}\u{00C5}", NormalizationForm::KCCasefold), "fi\u{00E5}");
}
