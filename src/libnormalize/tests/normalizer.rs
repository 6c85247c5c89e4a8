// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Normalization forms on strings.

use libnormalize::{hangul, Normalizer2, QuickCheck};
use libtext::{utf16, BoundedSink, Edits, SinkError};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn normalize(normalizer: &Normalizer2<'_>, s: &str) -> String {
    utf16::to_string_lossy(&normalizer.normalize(&utf16::from_str(s)))
}

fn is_normalized(normalizer: &Normalizer2<'_>, s: &str) -> bool {
    normalizer.is_normalized(&utf16::from_str(s))
}

fn quick_check(normalizer: &Normalizer2<'_>, s: &str) -> QuickCheck {
    normalizer.quick_check(&utf16::from_str(s))
}

//
// Composition and decomposition
//

#[test]
fn canonical_forms() {
    init_logging();

    let nfc = Normalizer2::nfc();
    let nfd = Normalizer2::nfd();

    assert_eq!(normalize(nfd, "caf\u{E9}"), "cafe\u{301}");
    assert_eq!(normalize(nfc, "cafe\u{301}"), "caf\u{E9}");
    assert_eq!(normalize(nfc, "caf\u{E9}"), "caf\u{E9}");

    // Singletons never come back.
    assert_eq!(normalize(nfc, "\u{212B}"), "\u{C5}");
    assert_eq!(normalize(nfd, "\u{212B}"), "A\u{30A}");

    // Two-level decomposition: U+1E69 is s with dot below and dot above.
    assert_eq!(normalize(nfd, "\u{1E69}"), "s\u{323}\u{307}");
    assert_eq!(normalize(nfc, "s\u{307}\u{323}"), "\u{1E69}");

    // Compatibility mappings are left alone.
    assert_eq!(normalize(nfc, "\u{FB01}"), "\u{FB01}");
    assert_eq!(normalize(nfd, "\u{2460}"), "\u{2460}");
}

#[test]
fn canonical_ordering() {
    init_logging();

    let nfd = Normalizer2::nfd();
    let nfc = Normalizer2::nfc();

    // ccc(U+0316) = 220 < ccc(U+0301) = 230
    assert_eq!(normalize(nfd, "a\u{301}\u{316}"), "a\u{316}\u{301}");
    assert_eq!(normalize(nfc, "a\u{301}\u{316}"), "\u{E1}\u{316}");
    assert_eq!(normalize(nfd, "\u{E1}\u{316}"), "a\u{316}\u{301}");

    // Marks with equal combining class keep their order and block each other.
    assert_eq!(normalize(nfd, "a\u{301}\u{300}"), "a\u{301}\u{300}");
    assert_eq!(normalize(nfc, "a\u{301}\u{300}"), "\u{E1}\u{300}");
    assert_eq!(normalize(nfc, "a\u{300}\u{301}"), "\u{E0}\u{301}");

    // Supplementary combining marks are reordered as well: ccc(U+1D165) = 216.
    assert_eq!(normalize(nfd, "a\u{301}\u{1D165}"), "a\u{1D165}\u{301}");
}

#[test]
fn compatibility_forms() {
    init_logging();

    let nfkc = Normalizer2::nfkc();
    let nfkd = Normalizer2::nfkd();

    assert_eq!(normalize(nfkc, "\u{FB01}"), "fi");
    assert_eq!(normalize(nfkc, "\u{2460}"), "1");
    assert_eq!(normalize(nfkd, "\u{2460}"), "1");
    assert_eq!(normalize(nfkc, "x\u{B2}"), "x2");
    assert_eq!(normalize(nfkc, "\u{FF21}\u{FF22}"), "AB");
    assert_eq!(normalize(nfkd, "\u{1E9B}\u{323}"), "s\u{323}\u{307}");
    assert_eq!(normalize(nfkc, "\u{1E9B}\u{323}"), "\u{1E69}");
    assert_eq!(normalize(nfkc, "caf\u{E9}"), "caf\u{E9}");
    assert_eq!(normalize(nfkd, "caf\u{E9}"), "cafe\u{301}");
}

#[test]
fn nfkc_casefold() {
    init_logging();

    let nfkc_cf = Normalizer2::nfkc_casefold();

    assert_eq!(normalize(nfkc_cf, "ABC"), "abc");
    assert_eq!(normalize(nfkc_cf, "Stra\u{DF}e"), "strasse");
    assert_eq!(normalize(nfkc_cf, "soft\u{AD}hyphen"), "softhyphen");
    assert_eq!(normalize(nfkc_cf, "\u{FB01}"), "fi");
    assert_eq!(normalize(nfkc_cf, "\u{212B}"), "\u{E5}");
    assert_eq!(normalize(nfkc_cf, "\u{FF21}"), "a");
    assert!(is_normalized(nfkc_cf, "abc"));
    assert!(!is_normalized(nfkc_cf, "Abc"));
}

#[test]
fn hangul_round_trip() {
    init_logging();

    let nfc = Normalizer2::nfc();
    let nfd = Normalizer2::nfd();

    assert_eq!(normalize(nfd, "\u{AC00}"), "\u{1100}\u{1161}");
    assert_eq!(normalize(nfd, "\u{AC01}"), "\u{1100}\u{1161}\u{11A8}");
    assert_eq!(normalize(nfc, "\u{1100}\u{1161}\u{11A8}"), "\u{AC01}");
    // An LV syllable followed by a trailing consonant composes too.
    assert_eq!(normalize(nfc, "\u{AC00}\u{11A8}"), "\u{AC01}");
    // U+11A7 is not a trailing consonant.
    assert_eq!(normalize(nfc, "\u{AC00}\u{11A7}"), "\u{AC00}\u{11A7}");

    for syllable in hangul::S_BASE..hangul::S_LIMIT {
        let mut s = Vec::new();
        utf16::push_code_point(&mut s, syllable);
        let decomposed = nfd.normalize(&s);
        assert!(decomposed.len() == 2 || decomposed.len() == 3);
        assert_eq!(nfc.normalize(&decomposed), s, "syllable U+{:04X}", syllable);
    }
}

#[test]
fn idempotence() {
    init_logging();

    let samples = [
        "",
        "plain ASCII text",
        "caf\u{E9} cafe\u{301}",
        "a\u{301}\u{316}\u{300}b",
        "\u{1E9B}\u{323} \u{212B} \u{FB01}",
        "\u{1100}\u{1161}\u{11A8}\u{AC00}",
        "\u{1D15E}\u{1D165}",
        "\u{3B1}\u{313}\u{301}\u{345}",
    ];
    let forms = [
        Normalizer2::nfc(),
        Normalizer2::nfd(),
        Normalizer2::nfkc(),
        Normalizer2::nfkd(),
        Normalizer2::nfkc_casefold(),
        Normalizer2::fcc(),
    ];
    for form in forms.iter() {
        for sample in samples.iter() {
            let s = utf16::from_str(sample);
            let once = form.normalize(&s);
            let twice = form.normalize(&once);
            assert_eq!(once, twice, "{:?} of {:?}", form.mode(), sample);
            assert!(form.is_normalized(&once), "{:?} of {:?}", form.mode(), sample);
        }
    }
}

#[test]
fn nfc_of_nfd() {
    init_logging();

    let nfc = Normalizer2::nfc();
    let nfd = Normalizer2::nfd();
    for sample in ["caf\u{E9}", "\u{1E69}\u{1E0B}\u{323}", "\u{C5}ngstr\u{F6}m", "\u{AC01}"].iter() {
        let s = utf16::from_str(sample);
        assert_eq!(nfc.normalize(&nfd.normalize(&s)), nfc.normalize(&s));
        assert_eq!(nfd.normalize(&nfc.normalize(&s)), nfd.normalize(&s));
    }
}

#[test]
fn unpaired_surrogates_are_inert() {
    init_logging();

    let nfc = Normalizer2::nfc();
    let nfd = Normalizer2::nfd();

    let s = vec![0x61, 0xD800, 0x301, 0xDC00, 0x65, 0x301];
    assert_eq!(nfd.normalize(&s), vec![0x61, 0xD800, 0x301, 0xDC00, 0x65, 0x301]);
    assert_eq!(nfc.normalize(&s), vec![0x61, 0xD800, 0x301, 0xDC00, 0xE9]);
}

//
// FCD
//

#[test]
fn fcd() {
    init_logging();

    let fcd = Normalizer2::fcd();

    assert!(is_normalized(fcd, "caf\u{E9}"));
    assert!(is_normalized(fcd, "cafe\u{301}"));
    assert!(is_normalized(fcd, "a\u{316}\u{301}"));
    assert!(!is_normalized(fcd, "a\u{301}\u{316}"));
    assert!(!is_normalized(fcd, "\u{E9}\u{316}"));

    assert_eq!(normalize(fcd, "a\u{301}\u{316}"), "a\u{316}\u{301}");
    assert_eq!(normalize(fcd, "x\u{E9}\u{316}y"), "xe\u{316}\u{301}y");
    assert_eq!(normalize(fcd, "caf\u{E9}"), "caf\u{E9}");
}

#[test]
fn fcd_ordering_holds() {
    init_logging();

    let fcd = Normalizer2::fcd();
    let imp = fcd.normalizer_impl();
    let samples = [
        "\u{E9}\u{316}\u{301}\u{300}",
        "a\u{301}\u{316}\u{1D165}\u{E0}",
        "\u{1E69}\u{323}x\u{344}\u{321}",
    ];
    for sample in samples.iter() {
        let out = fcd.normalize(&utf16::from_str(sample));
        let mut prev_trail_cc = 0;
        for c in utf16::code_points(&out) {
            let fcd16 = imp.get_fcd16(c);
            let lead_cc = fcd16 >> 8;
            assert!(lead_cc == 0 || prev_trail_cc <= lead_cc, "{:?}", sample);
            prev_trail_cc = fcd16 & 0xFF;
        }
    }
}

//
// Checks
//

#[test]
fn quick_checks() {
    init_logging();

    let nfc = Normalizer2::nfc();
    let nfd = Normalizer2::nfd();
    let nfkc = Normalizer2::nfkc();

    assert_eq!(quick_check(nfc, "caf\u{E9}"), QuickCheck::Yes);
    assert_eq!(quick_check(nfc, "cafe\u{301}"), QuickCheck::Maybe);
    assert_eq!(quick_check(nfc, "\u{212B}"), QuickCheck::No);
    assert_eq!(quick_check(nfd, "caf\u{E9}"), QuickCheck::No);
    assert_eq!(quick_check(nfd, "cafe\u{301}"), QuickCheck::Yes);
    assert_eq!(quick_check(nfkc, "\u{FB01}"), QuickCheck::No);

    assert!(is_normalized(nfc, "cafe") && !is_normalized(nfc, "cafe\u{301}"));
    // A combining mark which does not compose with the preceding character.
    assert!(is_normalized(nfc, "x\u{301}"));

    let s = utf16::from_str("abc\u{E9}def");
    assert_eq!(nfd.span_quick_check_yes(&s), 3);
    assert_eq!(nfc.span_quick_check_yes(&s), s.len());
    let s = utf16::from_str("abce\u{301}");
    assert_eq!(nfc.span_quick_check_yes(&s), 3);
}

#[test]
fn boundaries_and_inertness() {
    init_logging();

    let nfc = Normalizer2::nfc();
    let nfd = Normalizer2::nfd();
    let fcd = Normalizer2::fcd();

    assert!(nfc.has_boundary_before(0x61));
    assert!(!nfc.has_boundary_before(0x301));
    assert!(!nfc.has_boundary_after(0x61));
    assert!(nfc.is_inert(0x4E00));
    assert!(!nfc.is_inert(0x41));
    assert!(!nfc.is_inert(0x301));

    assert!(nfd.has_boundary_before(0xE9));
    assert!(!nfd.has_boundary_after(0xE9));
    assert!(nfd.is_inert(0x41));
    assert!(!nfd.is_inert(0xE9));

    assert!(fcd.has_boundary_before(0xE9));
    assert!(!fcd.has_boundary_before(0x301));
    assert!(!fcd.has_boundary_after(0xE9));
    assert!(fcd.is_inert(0x41));
}

//
// Code point properties
//

#[test]
fn code_point_properties() {
    init_logging();

    let nfc = Normalizer2::nfc();
    let nfkc = Normalizer2::nfkc();

    assert_eq!(nfc.get_decomposition(0xE9), Some(vec![0x65, 0x301]));
    assert_eq!(nfc.get_decomposition(0x1E69), Some(vec![0x73, 0x323, 0x307]));
    assert_eq!(nfc.get_raw_decomposition(0x1E69), Some(vec![0x1E63, 0x307]));
    assert_eq!(nfc.get_decomposition(0xAC01), Some(vec![0x1100, 0x1161, 0x11A8]));
    assert_eq!(nfc.get_raw_decomposition(0xAC01), Some(vec![0xAC00, 0x11A8]));
    assert_eq!(nfc.get_decomposition(0x41), None);
    assert_eq!(nfc.get_decomposition(0xFB01), None);
    assert_eq!(nfkc.get_decomposition(0xFB01), Some(vec![0x66, 0x69]));

    assert_eq!(nfc.compose_pair(0x41, 0x301), Some(0xC1));
    assert_eq!(nfc.compose_pair(0x1100, 0x1161), Some(0xAC00));
    assert_eq!(nfc.compose_pair(0xAC00, 0x11A8), Some(0xAC01));
    assert_eq!(nfc.compose_pair(0x41, 0x42), None);
    assert_eq!(nfc.compose_pair(0x4E00, 0x301), None);

    assert_eq!(nfc.get_combining_class(0x41), 0);
    assert_eq!(nfc.get_combining_class(0x301), 230);
    assert_eq!(nfc.get_combining_class(0x316), 220);
    assert_eq!(nfc.get_combining_class(0x1D165), 216);
}

#[test]
fn canonical_closure() {
    init_logging();

    let imp = Normalizer2::nfc().normalizer_impl();

    let set = imp.get_canon_start_set(0x41).expect("A starts decompositions");
    assert!(set.contains(&0xC0));
    assert!(set.contains(&0xC1));
    assert!(set.contains(&0x212B));
    // A-ring-acute decomposes through A-ring.
    assert!(set.contains(&0x1FA));

    let set = imp.get_canon_start_set(0x1100).expect("Jamo L starts syllables");
    assert_eq!(set.len(), 588);
    assert!(set.contains(&0xAC00) && set.contains(&0xAC01));

    assert_eq!(imp.get_canon_start_set(0x4E00), None);

    assert!(imp.is_canon_segment_starter(0x41));
    assert!(!imp.is_canon_segment_starter(0x301));
}

//
// Edits and appending
//

#[test]
fn normalize_with_edits() {
    init_logging();

    let nfc = Normalizer2::nfc();
    let src = utf16::from_str("Ame\u{301}lie et \u{212B}ngstr\u{F6}m");

    let mut out = Vec::new();
    let mut edits = Edits::new();
    nfc.normalize_with_edits(&src, &mut out, &mut edits).expect("vector sink");

    assert_eq!(out, nfc.normalize(&src));
    assert!(edits.has_changes());
    assert_eq!(edits.number_of_changes(), 2);
    assert_eq!(edits.source_length(), src.len());
    assert_eq!(edits.destination_length(), out.len());
    assert_eq!(edits.length_delta(), -1);

    let mut replacements = Vec::new();
    for span in edits.coarse_iter() {
        let dst = &out[span.destination_index()..span.destination_index() + span.new_length()];
        if span.has_change() {
            replacements.extend_from_slice(dst);
        } else {
            assert_eq!(dst, &src[span.source_index()..span.source_index() + span.old_length()]);
        }
    }
    assert_eq!(edits.apply(&src, &replacements), out);

    // Already normalized text has no changes.
    let mut out = Vec::new();
    nfc.normalize_with_edits(&utf16::from_str("caf\u{E9}"), &mut out, &mut edits)
        .expect("vector sink");
    assert!(!edits.has_changes());
}

#[test]
fn normalize_to_sinks() {
    init_logging();

    let nfd = Normalizer2::nfd();
    let src = utf16::from_str("caf\u{E9}");

    let mut out = utf16::from_str("prefix ");
    nfd.normalize_to(&src, &mut out).expect("vector sink");
    assert_eq!(utf16::to_string_lossy(&out), "prefix cafe\u{301}");

    let mut sink = BoundedSink::new(5);
    nfd.normalize_to(&src, &mut sink).expect("fits");
    assert_eq!(sink.as_slice(), &utf16::from_str("cafe\u{301}")[..]);

    let mut sink = BoundedSink::new(4);
    assert_eq!(nfd.normalize_to(&src, &mut sink), Err(SinkError::Overflow { capacity: 4 }));
}

#[test]
fn append() {
    init_logging();

    let nfc = Normalizer2::nfc();
    let nfd = Normalizer2::nfd();
    let fcd = Normalizer2::fcd();

    let mut first = utf16::from_str("caf");
    nfc.normalize_second_and_append(&mut first, &utf16::from_str("e\u{301}"));
    assert_eq!(utf16::to_string_lossy(&first), "caf\u{E9}");

    let mut first = utf16::from_str("cafe");
    nfc.normalize_second_and_append(&mut first, &utf16::from_str("\u{301}!"));
    assert_eq!(utf16::to_string_lossy(&first), "caf\u{E9}!");

    let mut first = utf16::from_str("cafe");
    nfc.append(&mut first, &utf16::from_str("\u{301}"));
    assert_eq!(utf16::to_string_lossy(&first), "caf\u{E9}");

    let mut first = utf16::from_str("a\u{301}");
    nfd.append(&mut first, &utf16::from_str("\u{316}b"));
    assert_eq!(utf16::to_string_lossy(&first), "a\u{316}\u{301}b");

    let mut first = utf16::from_str("a\u{301}");
    nfd.normalize_second_and_append(&mut first, &utf16::from_str("\u{E9}"));
    assert_eq!(utf16::to_string_lossy(&first), "a\u{301}e\u{301}");

    let mut first = utf16::from_str("\u{E9}");
    fcd.normalize_second_and_append(&mut first, &utf16::from_str("\u{316}"));
    assert_eq!(utf16::to_string_lossy(&first), "e\u{316}\u{301}");

    let mut first = Vec::new();
    nfc.normalize_second_and_append(&mut first, &utf16::from_str("e\u{301}"));
    assert_eq!(utf16::to_string_lossy(&first), "\u{E9}");
}
