// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Case properties of code points.

use libcasemap::{CaseClosure, CaseLocale, CaseMapping, CaseOptions, CaseProperty, CaseProps,
                 CaseType, ContextIterator, Direction, DotType, NoContext,
                 StringContextIterator};
use libtext::utf16;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn props() -> &'static CaseProps {
    init_logging();
    CaseProps::instance()
}

fn string(s: &str) -> Vec<u16> {
    utf16::from_str(s)
}

#[test]
fn case_types() {
    let props = props();

    assert_eq!(props.get_type('a' as u32), CaseType::Lower);
    assert_eq!(props.get_type('A' as u32), CaseType::Upper);
    assert_eq!(props.get_type(0x01C5), CaseType::Title);
    assert_eq!(props.get_type('1' as u32), CaseType::None);
    assert_eq!(props.get_type(0xD800), CaseType::None);

    assert_eq!(props.get_type_or_ignorable('\'' as u32), (CaseType::None, true));
    assert_eq!(props.get_type_or_ignorable(0x0345), (CaseType::Lower, true));
    assert_eq!(props.get_type_or_ignorable(' ' as u32), (CaseType::None, false));
}

#[test]
fn dots_and_sensitivity() {
    let props = props();

    assert_eq!(props.get_dot_type('i' as u32), DotType::SoftDotted);
    assert_eq!(props.get_dot_type(0x0456), DotType::SoftDotted);
    assert_eq!(props.get_dot_type(0x0301), DotType::Above);
    assert_eq!(props.get_dot_type(0x0323), DotType::OtherAccent);
    assert_eq!(props.get_dot_type('a' as u32), DotType::NoDot);
    assert!(props.is_soft_dotted('j' as u32));
    assert!(!props.is_soft_dotted('I' as u32));

    assert!(props.is_case_sensitive('a' as u32));
    assert!(props.is_case_sensitive(0x212A));
    assert!(!props.is_case_sensitive('1' as u32));
}

#[test]
fn simple_mappings() {
    let props = props();
    let default = CaseOptions::empty();
    let turkic = CaseOptions::FOLD_CASE_EXCLUDE_SPECIAL_I;

    assert_eq!(props.to_lower('A' as u32), 'a' as u32);
    assert_eq!(props.to_upper('a' as u32), 'A' as u32);
    assert_eq!(props.to_lower(0x212A), 'k' as u32);
    assert_eq!(props.to_upper(0x01C6), 0x01C4);
    assert_eq!(props.to_title(0x01C6), 0x01C5);
    assert_eq!(props.to_lower(0x01C5), 0x01C6);
    assert_eq!(props.to_upper(0x00DF), 0x00DF);
    assert_eq!(props.to_upper(0x10428), 0x10400);

    assert_eq!(props.fold(0x03A3, default), 0x03C3);
    assert_eq!(props.fold(0x03C2, default), 0x03C3);
    assert_eq!(props.fold(0x00B5, default), 0x03BC);
    assert_eq!(props.fold('I' as u32, default), 'i' as u32);
    assert_eq!(props.fold('I' as u32, turkic), 0x0131);
    assert_eq!(props.fold(0x0130, default), 0x0130);
    assert_eq!(props.fold(0x0130, turkic), 'i' as u32);
}

#[test]
fn full_mappings() {
    let props = props();
    let root = CaseLocale::Root;

    assert_eq!(props.to_full_lower('a' as u32, &mut NoContext, root), CaseMapping::Unchanged);
    assert_eq!(props.to_full_lower('A' as u32, &mut NoContext, root),
        CaseMapping::CodePoint('a' as u32));
    assert_eq!(props.to_full_upper(0x00DF, &mut NoContext, root),
        CaseMapping::String(&string("SS")));
    assert_eq!(props.to_full_title(0x00DF, &mut NoContext, root),
        CaseMapping::String(&string("Ss")));
    assert_eq!(props.to_full_folding(0x00DF, CaseOptions::empty()),
        CaseMapping::String(&string("ss")));
    assert_eq!(props.to_full_upper(0xFB03, &mut NoContext, root),
        CaseMapping::String(&string("FFI")));

    assert_eq!(props.to_full_lower(0x0130, &mut NoContext, root),
        CaseMapping::String(&string("i\u{307}")));
    assert_eq!(props.to_full_lower(0x0130, &mut NoContext, CaseLocale::Turkish),
        CaseMapping::CodePoint('i' as u32));
    assert_eq!(props.to_full_lower('I' as u32, &mut NoContext, CaseLocale::Turkish),
        CaseMapping::CodePoint(0x0131));
    assert_eq!(props.to_full_upper('i' as u32, &mut NoContext, CaseLocale::Turkish),
        CaseMapping::CodePoint(0x0130));
    assert_eq!(props.to_full_lower(0x00CC, &mut NoContext, CaseLocale::Lithuanian),
        CaseMapping::String(&string("i\u{307}\u{300}")));
}

#[test]
fn context_conditions() {
    let props = props();
    let text = string("\u{39F}\u{394}\u{39F}\u{3A3} \u{3A3}");

    let mut context = StringContextIterator::new(&text);
    context.set_cp_start_and_limit(3, 4);
    assert_eq!(props.to_full_lower(0x03A3, &mut context, CaseLocale::Root),
        CaseMapping::CodePoint(0x03C2));
    context.set_cp_start_and_limit(5, 6);
    assert_eq!(props.to_full_lower(0x03A3, &mut context, CaseLocale::Root),
        CaseMapping::CodePoint(0x03C3));

    context.set_cp_start_and_limit(1, 2);
    context.reset(Direction::Backward);
    assert_eq!(context.next(), Some(0x039F));
    assert_eq!(context.next(), None);
    context.reset(Direction::Forward);
    assert_eq!(context.next(), Some(0x039F));
    assert_eq!(context.next(), Some(0x03A3));
}

#[test]
fn code_point_walk() {
    let props = props();
    let text = string("A\u{10400}I\u{307}");

    let mut context = StringContextIterator::new(&text);
    context.set_limit(4);
    let mut lowered = Vec::new();
    while let Some(c) = context.next_case_map_cp() {
        assert!(context.cp_start() < context.cp_limit());
        match props.to_full_lower(c, &mut context, CaseLocale::Turkish) {
            CaseMapping::Unchanged => utf16::push_code_point(&mut lowered, c),
            CaseMapping::CodePoint(mapped) => utf16::push_code_point(&mut lowered, mapped),
            CaseMapping::String(s) => lowered.extend_from_slice(s),
        }
    }
    // The walk stops at the limit but the context sees the dot above.
    assert_eq!(lowered, string("a\u{10428}i"));
    assert_eq!(context.cp_limit(), 4);
}

#[test]
fn case_closure() {
    let props = props();

    let mut closure = CaseClosure::new();
    props.add_case_closure('k' as u32, &mut closure);
    assert!(closure.contains('K' as u32));
    assert!(closure.contains(0x212A));
    assert!(!closure.contains('k' as u32));

    let mut closure = CaseClosure::new();
    props.add_case_closure(0x00DF, &mut closure);
    assert!(closure.contains(0x1E9E));
    assert!(closure.contains_string(&string("ss")));

    // Dotted and dotless i stay apart.
    let mut closure = CaseClosure::new();
    props.add_case_closure('i' as u32, &mut closure);
    assert_eq!(closure.code_points.iter().copied().collect::<Vec<_>>(), vec!['I' as u32]);
    let mut closure = CaseClosure::new();
    props.add_case_closure(0x0131, &mut closure);
    assert!(closure.is_empty());

    let mut closure = CaseClosure::new();
    assert!(props.add_string_case_closure(&string("ss"), &mut closure));
    assert!(closure.contains(0x00DF));
    assert!(closure.contains(0x1E9E));

    let mut closure = CaseClosure::new();
    assert!(props.add_string_case_closure(&string("fi"), &mut closure));
    assert!(closure.contains(0xFB01));

    let mut closure = CaseClosure::new();
    assert!(!props.add_string_case_closure(&string("qq"), &mut closure));
    assert!(!props.add_string_case_closure(&string("s"), &mut closure));
    assert!(closure.is_empty());
}

#[test]
fn binary_properties() {
    let props = props();

    assert!(props.has_binary_property('a' as u32, CaseProperty::Lowercase));
    assert!(props.has_binary_property('A' as u32, CaseProperty::Uppercase));
    assert!(props.has_binary_property(0x01C5, CaseProperty::Cased));
    assert!(!props.has_binary_property('1' as u32, CaseProperty::Cased));
    assert!(props.has_binary_property(0x0301, CaseProperty::CaseIgnorable));
    assert!(props.has_binary_property('i' as u32, CaseProperty::SoftDotted));
    assert!(props.has_binary_property('a' as u32, CaseProperty::CaseSensitive));

    assert!(props.has_binary_property('A' as u32, CaseProperty::ChangesWhenLowercased));
    assert!(!props.has_binary_property('a' as u32, CaseProperty::ChangesWhenLowercased));
    assert!(props.has_binary_property(0x00DF, CaseProperty::ChangesWhenUppercased));
    assert!(props.has_binary_property(0x01C4, CaseProperty::ChangesWhenTitlecased));
    assert!(!props.has_binary_property(0x01C5, CaseProperty::ChangesWhenTitlecased));
    assert!(props.has_binary_property(0x00DF, CaseProperty::ChangesWhenCasefolded));
    assert!(!props.has_binary_property('a' as u32, CaseProperty::ChangesWhenCasefolded));
    assert!(props.has_binary_property('a' as u32, CaseProperty::ChangesWhenCasemapped));
    assert!(!props.has_binary_property('1' as u32, CaseProperty::ChangesWhenCasemapped));
}
