// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Case mapping of strings.

use libcasemap::{BreakIterator, CaseLocale, CaseMap, CaseMapError, CaseOptions,
                 WholeStringBreakIterator};
use libtext::{utf16, BoundedSink, Edits, SinkError};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn lower(locale: CaseLocale, s: &str) -> String {
    let map = CaseMap::new(locale, CaseOptions::empty());
    utf16::to_string_lossy(&map.to_lower(&utf16::from_str(s)).unwrap())
}

fn upper(locale: CaseLocale, s: &str) -> String {
    let map = CaseMap::new(locale, CaseOptions::empty());
    utf16::to_string_lossy(&map.to_upper(&utf16::from_str(s)).unwrap())
}

fn title(locale: CaseLocale, options: CaseOptions, s: &str) -> String {
    let map = CaseMap::new(locale, options);
    utf16::to_string_lossy(&map.to_title(&utf16::from_str(s), None).unwrap())
}

fn fold(options: CaseOptions, s: &str) -> String {
    let map = CaseMap::new(CaseLocale::Root, options);
    utf16::to_string_lossy(&map.fold(&utf16::from_str(s)).unwrap())
}

//
// Lowercase and uppercase
//

#[test]
fn root_mappings() {
    init_logging();

    assert_eq!(lower(CaseLocale::Root, "Hello WORLD"), "hello world");
    assert_eq!(upper(CaseLocale::Root, "Hello world"), "HELLO WORLD");
    assert_eq!(upper(CaseLocale::Root, "stra\u{DF}e"), "STRASSE");
    assert_eq!(upper(CaseLocale::Root, "\u{FB01}"), "FI");
    assert_eq!(lower(CaseLocale::Root, "\u{130}stanbul"), "i\u{307}stanbul");
    assert_eq!(upper(CaseLocale::Root, "\u{3AC}"), "\u{386}");
    assert_eq!(lower(CaseLocale::Root, "\u{10400}"), "\u{10428}");
    assert_eq!(lower(CaseLocale::Root, ""), "");
}

#[test]
fn final_sigma() {
    init_logging();

    assert_eq!(lower(CaseLocale::Root, "\u{39F}\u{394}\u{39F}\u{3A3}"),
        "\u{3BF}\u{3B4}\u{3BF}\u{3C2}");
    assert_eq!(lower(CaseLocale::Root, "\u{3A3}"), "\u{3C3}");
    assert_eq!(lower(CaseLocale::Root, "\u{3A3}\u{391}"), "\u{3C3}\u{3B1}");
    // Case-ignorable characters are skipped when looking around.
    assert_eq!(lower(CaseLocale::Root, "\u{391}\u{3A3}'"), "\u{3B1}\u{3C2}'");
    assert_eq!(lower(CaseLocale::Root, "\u{391}\u{3A3} \u{391}"), "\u{3B1}\u{3C2} \u{3B1}");
}

#[test]
fn turkish() {
    init_logging();

    assert_eq!(upper(CaseLocale::Turkish, "istanbul"), "\u{130}STANBUL");
    assert_eq!(lower(CaseLocale::Turkish, "\u{130}STANBUL"), "istanbul");
    assert_eq!(lower(CaseLocale::Turkish, "DIYARBAKIR"), "d\u{131}yarbak\u{131}r");
    // A dot above after I makes it dotted.
    assert_eq!(lower(CaseLocale::Turkish, "I\u{307}"), "i");
    assert_eq!(upper(CaseLocale::Turkish, "\u{131}"), "I");
}

#[test]
fn lithuanian() {
    init_logging();

    // The dot of i is kept under an accent above.
    assert_eq!(lower(CaseLocale::Lithuanian, "I\u{300}"), "i\u{307}\u{300}");
    assert_eq!(lower(CaseLocale::Lithuanian, "\u{CC}"), "i\u{307}\u{300}");
    assert_eq!(lower(CaseLocale::Lithuanian, "J\u{301}"), "j\u{307}\u{301}");
    assert_eq!(lower(CaseLocale::Lithuanian, "I"), "i");
    // ... and dropped again in uppercase.
    assert_eq!(upper(CaseLocale::Lithuanian, "i\u{307}"), "I");
    assert_eq!(upper(CaseLocale::Lithuanian, "i\u{307}\u{300}"), "I\u{300}");
    assert_eq!(upper(CaseLocale::Root, "i\u{307}"), "I\u{307}");
}

#[test]
fn armenian_ligature() {
    init_logging();

    assert_eq!(upper(CaseLocale::Root, "\u{587}"), "\u{535}\u{552}");
    assert_eq!(upper(CaseLocale::Armenian, "\u{587}"), "\u{535}\u{54E}");
    assert_eq!(title(CaseLocale::Root, CaseOptions::empty(), "\u{587}"), "\u{535}\u{582}");
    assert_eq!(title(CaseLocale::Armenian, CaseOptions::empty(), "\u{587}"), "\u{535}\u{57E}");
}

#[test]
fn greek_uppercase() {
    init_logging();

    // Accents go away.
    assert_eq!(upper(CaseLocale::Greek, "\u{3AC}\u{3BD}\u{3B8}\u{3C1}\u{3C9}\u{3C0}\u{3BF}\u{3C2}"),
        "\u{391}\u{39D}\u{398}\u{3A1}\u{3A9}\u{3A0}\u{39F}\u{3A3}");
    assert_eq!(upper(CaseLocale::Greek, "\u{3B1}\u{301}"), "\u{391}");
    // Except on the disjunctive eta.
    assert_eq!(upper(CaseLocale::Greek, "\u{3AE}"), "\u{389}");
    assert_eq!(upper(CaseLocale::Greek, "\u{3B7}\u{301}"), "\u{397}\u{301}");
    assert_eq!(upper(CaseLocale::Greek, "\u{3B1} \u{3AE} \u{3B2}"), "\u{391} \u{389} \u{392}");
    // Dialytika is kept, or added after a vowel which lost its accent.
    assert_eq!(upper(CaseLocale::Greek, "\u{3B1}\u{3CB}\u{3BB}\u{3BF}\u{3C2}"),
        "\u{391}\u{3AB}\u{39B}\u{39F}\u{3A3}");
    assert_eq!(upper(CaseLocale::Greek, "\u{3AC}\u{3B9}"), "\u{391}\u{3AA}");
    // Iota subscript becomes a capital iota.
    assert_eq!(upper(CaseLocale::Greek, "\u{1FB3}"), "\u{391}\u{399}");
    // Non-Greek text is uppercased as usual.
    assert_eq!(upper(CaseLocale::Greek, "abc"), "ABC");
}

//
// Titlecase
//

#[test]
fn words() {
    init_logging();

    assert_eq!(title(CaseLocale::Root, CaseOptions::empty(), "hello wORLD"), "Hello World");
    assert_eq!(title(CaseLocale::Root, CaseOptions::empty(), "  hello"), "  Hello");
    assert_eq!(title(CaseLocale::Root, CaseOptions::TITLECASE_NO_LOWERCASE, "hELLO wORLD"),
        "HELLO WORLD");
    assert_eq!(title(CaseLocale::Root, CaseOptions::empty(), "\u{1C6}ungla"), "\u{1C5}ungla");
    assert_eq!(title(CaseLocale::Root, CaseOptions::empty(), ""), "");
}

#[test]
fn whole_string_and_sentences() {
    init_logging();

    assert_eq!(title(CaseLocale::Root, CaseOptions::TITLECASE_WHOLE_STRING, "hello wORLD"),
        "Hello world");
    assert_eq!(title(CaseLocale::Root, CaseOptions::TITLECASE_SENTENCES,
        "hello world. Good BYE."), "Hello world. Good bye.");
    // A lowercase word continues the sentence.
    assert_eq!(title(CaseLocale::Root, CaseOptions::TITLECASE_SENTENCES,
        "hello world. good BYE."), "Hello world. good bye.");
}

#[test]
fn index_adjustment() {
    init_logging();

    let whole = CaseOptions::TITLECASE_WHOLE_STRING;
    assert_eq!(title(CaseLocale::Root, whole, "  (hello)"), "  (Hello)");
    assert_eq!(title(CaseLocale::Root, whole | CaseOptions::TITLECASE_NO_BREAK_ADJUSTMENT,
        "  (hello)"), "  (hello)");
    assert_eq!(title(CaseLocale::Root, whole, "1ABC"), "1abc");
    assert_eq!(title(CaseLocale::Root, whole | CaseOptions::TITLECASE_ADJUST_TO_CASED, "1abc"),
        "1Abc");
    assert_eq!(title(CaseLocale::Root, whole, "..."), "...");
}

#[test]
fn dutch_ij() {
    init_logging();

    let none = CaseOptions::empty();
    assert_eq!(title(CaseLocale::Dutch, none, "ijssel"), "IJssel");
    assert_eq!(title(CaseLocale::Dutch, none, "IJSSEL igloo"), "IJssel Igloo");
    assert_eq!(title(CaseLocale::Dutch, none, "\u{ED}j\u{301}"), "\u{CD}J\u{301}");
    assert_eq!(title(CaseLocale::Dutch, none, "i\u{301}j\u{301}s"), "I\u{301}J\u{301}s");
    // The acute must be on both letters.
    assert_eq!(title(CaseLocale::Dutch, none, "\u{ED}js"), "\u{CD}js");
    // Another mark on the j disqualifies the digraph.
    assert_eq!(title(CaseLocale::Dutch, none, "ij\u{308}"), "Ij\u{308}");
    assert_eq!(title(CaseLocale::Root, none, "ijssel"), "Ijssel");
}

struct FixedBreaks {
    breaks: Vec<usize>,
    position: usize,
}

impl BreakIterator for FixedBreaks {
    fn set_text(&mut self, _text: &[u16]) {
        self.position = 0;
    }

    fn first(&mut self) -> usize {
        self.position = 0;
        0
    }

    fn next(&mut self) -> Option<usize> {
        let index = self.breaks.get(self.position).copied();
        self.position += 1;
        index
    }
}

#[test]
fn explicit_break_iterator() {
    init_logging();

    let map = CaseMap::new(CaseLocale::Root, CaseOptions::empty());
    let mut breaks = FixedBreaks { breaks: vec![3, 6], position: 0 };
    let titled = map.to_title(&utf16::from_str("abcdefghi"), Some(&mut breaks)).unwrap();
    assert_eq!(utf16::to_string_lossy(&titled), "AbcDefGhi");

    let mut whole = WholeStringBreakIterator::new();
    let titled = map.to_title(&utf16::from_str("abc def"), Some(&mut whole)).unwrap();
    assert_eq!(utf16::to_string_lossy(&titled), "Abc def");
}

#[test]
fn invalid_title_options() {
    init_logging();

    let src = utf16::from_str("abc");
    let both = CaseOptions::TITLECASE_WHOLE_STRING | CaseOptions::TITLECASE_SENTENCES;
    let result = CaseMap::new(CaseLocale::Root, both).to_title(&src, None);
    assert!(matches!(result, Err(CaseMapError::InvalidOptions(_))));

    let adjustments = CaseOptions::TITLECASE_NO_BREAK_ADJUSTMENT
        | CaseOptions::TITLECASE_ADJUST_TO_CASED;
    let result = CaseMap::new(CaseLocale::Root, adjustments).to_title(&src, None);
    assert!(matches!(result, Err(CaseMapError::InvalidOptions(_))));

    // Nothing is written and the edits are left alone.
    let mut whole = WholeStringBreakIterator::new();
    let mut edits = Edits::new();
    edits.add_unchanged(5);
    let mut out = Vec::new();
    let map = CaseMap::new(CaseLocale::Root, CaseOptions::TITLECASE_SENTENCES);
    let result = map.to_title_to(&src, Some(&mut whole), &mut out, Some(&mut edits));
    assert!(matches!(result, Err(CaseMapError::InvalidOptions(_))));
    assert!(out.is_empty());
    assert_eq!(edits.source_length(), 5);
}

//
// Case folding
//

#[test]
fn case_folding() {
    init_logging();

    let default = CaseOptions::empty();
    let turkic = CaseOptions::FOLD_CASE_EXCLUDE_SPECIAL_I;
    assert_eq!(fold(default, "\u{DF}"), "ss");
    assert_eq!(fold(default, "STRASSE"), "strasse");
    assert_eq!(fold(default, "Stra\u{DF}e"), "strasse");
    assert_eq!(fold(default, "\u{B5}\u{17F}"), "\u{3BC}s");
    assert_eq!(fold(default, "\u{3A3}\u{3C2}"), "\u{3C3}\u{3C3}");
    assert_eq!(fold(default, "I\u{130}"), "ii\u{307}");
    assert_eq!(fold(turkic, "I\u{130}"), "\u{131}i");
    assert_eq!(fold(turkic, "ABC"), "abc");
}

//
// Output and edits
//

#[test]
fn edits_reconstruct_output() {
    init_logging();

    let samples = [
        (CaseLocale::Root, "AbC"),
        (CaseLocale::Root, "\u{130}stanbul stra\u{DF}e"),
        (CaseLocale::Turkish, "I\u{307}stanbul"),
        (CaseLocale::Greek, "\u{3AC}\u{3BD}\u{3B8}\u{3C1}\u{3C9}\u{3C0}\u{3BF}\u{3C2} abc"),
        (CaseLocale::Dutch, "ijssel"),
    ];
    let options = [CaseOptions::empty(), CaseOptions::OMIT_UNCHANGED_TEXT];
    for &(locale, s) in &samples {
        let src = utf16::from_str(s);
        let full = CaseMap::new(locale, CaseOptions::empty());
        let expected = [
            full.to_lower(&src).unwrap(),
            full.to_upper(&src).unwrap(),
            full.to_title(&src, None).unwrap(),
            full.fold(&src).unwrap(),
        ];
        for &option in &options {
            let map = CaseMap::new(locale, option);
            let mut outputs = vec![Vec::new(), Vec::new(), Vec::new(), Vec::new()];
            let mut edits = vec![Edits::new(), Edits::new(), Edits::new(), Edits::new()];
            map.to_lower_to(&src, &mut outputs[0], Some(&mut edits[0])).unwrap();
            map.to_upper_to(&src, &mut outputs[1], Some(&mut edits[1])).unwrap();
            map.to_title_to(&src, None, &mut outputs[2], Some(&mut edits[2])).unwrap();
            map.fold_to(&src, &mut outputs[3], Some(&mut edits[3])).unwrap();
            for i in 0..4 {
                assert_eq!(edits[i].source_length(), src.len(), "{:?} {}", locale, s);
                if option.contains(CaseOptions::OMIT_UNCHANGED_TEXT) {
                    assert_eq!(edits[i].apply(&src, &outputs[i]), expected[i], "{:?} {}", locale, s);
                } else {
                    assert_eq!(outputs[i], expected[i], "{:?} {}", locale, s);
                }
            }
        }
    }
}

#[test]
fn edits_spans() {
    init_logging();

    let map = CaseMap::new(CaseLocale::Root, CaseOptions::empty());
    let src = utf16::from_str("AbC");
    let mut out = Vec::new();
    let mut edits = Edits::new();
    map.to_lower_to(&src, &mut out, Some(&mut edits)).unwrap();
    assert_eq!(utf16::to_string_lossy(&out), "abc");
    assert_eq!(edits.number_of_changes(), 2);
    assert_eq!(edits.length_delta(), 0);

    // Edits are reset unless asked otherwise.
    out.clear();
    map.to_lower_to(&src, &mut out, Some(&mut edits)).unwrap();
    assert_eq!(edits.source_length(), 3);

    let appending = CaseMap::new(CaseLocale::Root, CaseOptions::EDITS_NO_RESET);
    appending.to_upper_to(&utf16::from_str("\u{DF}"), &mut out, Some(&mut edits)).unwrap();
    assert_eq!(edits.source_length(), 4);
    assert_eq!(edits.destination_length(), 5);
    assert_eq!(edits.number_of_changes(), 3);
    assert_eq!(edits.length_delta(), 1);

    // Nothing changes, nothing is written.
    let omitting = CaseMap::new(CaseLocale::Root, CaseOptions::OMIT_UNCHANGED_TEXT);
    let mut out = Vec::new();
    omitting.to_lower_to(&utf16::from_str("abc"), &mut out, Some(&mut edits)).unwrap();
    assert!(out.is_empty());
    assert!(!edits.has_changes());
}

#[test]
fn sink_errors() {
    init_logging();

    let map = CaseMap::new(CaseLocale::Root, CaseOptions::empty());
    let mut sink = BoundedSink::new(2);
    let result = map.to_upper_to(&utf16::from_str("abc"), &mut sink, None);
    assert_eq!(result, Err(CaseMapError::Sink(SinkError::Overflow { capacity: 2 })));
    assert_eq!(sink.as_slice(), &utf16::from_str("AB")[..]);

    let mut sink = BoundedSink::new(3);
    map.to_upper_to(&utf16::from_str("abc"), &mut sink, None).unwrap();
    assert_eq!(sink.into_inner(), utf16::from_str("ABC"));
}

#[test]
fn edits_match_accepted_output() {
    init_logging();

    // The ledger describes exactly what the sink took before it failed.
    let map = CaseMap::new(CaseLocale::Root, CaseOptions::empty());
    let mut sink = BoundedSink::new(3);
    let mut edits = Edits::new();
    let result = map.to_upper_to(&utf16::from_str("ab-cd"), &mut sink, Some(&mut edits));
    assert_eq!(result, Err(CaseMapError::Sink(SinkError::Overflow { capacity: 3 })));
    assert_eq!(sink.as_slice(), &utf16::from_str("AB-")[..]);
    assert_eq!(edits.source_length(), 3);
    assert_eq!(edits.destination_length(), 3);
    assert_eq!(edits.number_of_changes(), 2);

    let mut sink = BoundedSink::new(1);
    let mut edits = Edits::new();
    let result = map.to_upper_to(&utf16::from_str("\u{DF}"), &mut sink, Some(&mut edits));
    assert_eq!(result, Err(CaseMapError::Sink(SinkError::Overflow { capacity: 1 })));
    assert!(sink.as_slice().is_empty());
    assert_eq!(edits.source_length(), 0);
    assert!(!edits.has_changes());
}

#[test]
fn long_strings() {
    init_logging();

    let map = CaseMap::new(CaseLocale::Root, CaseOptions::empty());
    let src = utf16::from_str(&"Stra\u{DF}e \u{130}I ".repeat(40));
    let expected = utf16::from_str(&"strasse i\u{307}i ".repeat(40));
    assert_eq!(map.fold(&src).unwrap(), expected);
    let expected = utf16::from_str(&"STRASSE \u{130}I ".repeat(40));
    assert_eq!(map.to_upper(&src).unwrap(), expected);
}

#[test]
fn unpaired_surrogates() {
    init_logging();

    let map = CaseMap::new(CaseLocale::Root, CaseOptions::empty());
    let src = vec![0x0041, 0xD800, 0x0042, 0xDC00];
    assert_eq!(map.to_lower(&src).unwrap(), vec![0x0061, 0xD800, 0x0062, 0xDC00]);
    assert_eq!(map.to_upper(&[0xDC00, 0x0061]).unwrap(), vec![0xDC00, 0x0041]);
}

#[test]
fn idempotence() {
    init_logging();

    let samples = [
        "Hello \u{130}stanbul \u{3A3}\u{39F}\u{3A6}\u{399}\u{391} stra\u{DF}e",
        "\u{1C5}\u{FB01}\u{1FB3} \u{3AC}\u{3B9}",
        "I\u{300} J\u{301} i\u{307}",
        "\u{587} \u{10400}",
    ];
    let locales = [
        CaseLocale::Root,
        CaseLocale::Turkish,
        CaseLocale::Lithuanian,
        CaseLocale::Greek,
        CaseLocale::Dutch,
        CaseLocale::Armenian,
    ];
    for &locale in &locales {
        let map = CaseMap::new(locale, CaseOptions::empty());
        for s in &samples {
            let src = utf16::from_str(s);
            let lowered = map.to_lower(&src).unwrap();
            assert_eq!(map.to_lower(&lowered).unwrap(), lowered, "{:?} {}", locale, s);
            let uppered = map.to_upper(&src).unwrap();
            assert_eq!(map.to_upper(&uppered).unwrap(), uppered, "{:?} {}", locale, s);
            let folded = map.fold(&src).unwrap();
            assert_eq!(map.fold(&folded).unwrap(), folded, "{:?} {}", locale, s);
        }
    }
}
