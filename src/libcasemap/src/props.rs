// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Case properties of code points.
//!
//! `CaseProps` decodes the case data of `libunidata`: the case type, ignorability, dot type
//! and case sensitivity of code points, their simple and full case mappings, and their case
//! closure. Full mappings take language and the surrounding text into account.

use std::collections::BTreeSet;

use libtext::utf16;
use libunidata::case::{self, ABOVE, DOT_MASK, EXCEPTION, EXC_CLOSURE, EXC_CONDITIONAL_FOLD,
                       EXC_CONDITIONAL_SPECIAL, EXC_DELTA, EXC_DELTA_IS_NEGATIVE, EXC_DOT_SHIFT,
                       EXC_DOUBLE_SLOTS, EXC_FOLD, EXC_FULL_MAPPINGS, EXC_LOWER,
                       EXC_NO_SIMPLE_CASE_FOLDING, EXC_SENSITIVE, EXC_SHIFT, EXC_TITLE,
                       EXC_UPPER, IGNORABLE, LOWER, NONE, OTHER_ACCENT, SENSITIVE, SOFT_DOTTED,
                       TITLE, TYPE_MASK, UNFOLD_ROWS, UNFOLD_ROW_WIDTH, UNFOLD_STRING_WIDTH,
                       UPPER};
use libunidata::{CaseData, Result};
use log::debug;
use once_cell::sync::Lazy;

use crate::context::{ContextIterator, Direction, NoContext};
use crate::latin::LatinCase;
use crate::locale::CaseLocale;
use crate::options::CaseOptions;

/// Case type of a code point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CaseType {
    None,
    Lower,
    Upper,
    Title,
}

/// Relation of a code point to the dot of i and j.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DotType {
    NoDot,
    /// Has the Soft_Dotted property: i, j, and their relatives.
    SoftDotted,
    /// Combining mark above the base, with combining class 230.
    Above,
    /// Any other combining mark.
    OtherAccent,
}

/// Result of a full case mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CaseMapping<'a> {
    /// The code point maps to itself.
    Unchanged,
    CodePoint(u32),
    /// The code point maps to a string, possibly empty.
    String(&'a [u16]),
}

impl<'a> CaseMapping<'a> {
    pub fn is_unchanged(&self) -> bool {
        *self == CaseMapping::Unchanged
    }
}

/// Binary properties derived from the case data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CaseProperty {
    Lowercase,
    Uppercase,
    Cased,
    CaseIgnorable,
    SoftDotted,
    CaseSensitive,
    ChangesWhenLowercased,
    ChangesWhenUppercased,
    ChangesWhenTitlecased,
    ChangesWhenCasefolded,
    ChangesWhenCasemapped,
}

/// Collected case closure: code points and multi-character strings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaseClosure {
    pub code_points: BTreeSet<u32>,
    pub strings: BTreeSet<Vec<u16>>,
}

impl CaseClosure {
    pub fn new() -> CaseClosure {
        CaseClosure::default()
    }

    pub fn add(&mut self, c: u32) {
        self.code_points.insert(c);
    }

    pub fn add_string(&mut self, s: &[u16]) {
        self.strings.insert(s.to_vec());
    }

    pub fn contains(&self, c: u32) -> bool {
        self.code_points.contains(&c)
    }

    pub fn contains_string(&self, s: &[u16]) -> bool {
        self.strings.contains(s)
    }

    pub fn is_empty(&self) -> bool {
        self.code_points.is_empty() && self.strings.is_empty()
    }
}

//
// Hardcoded mappings of the conditional special characters
//

const I_DOT: &[u16] = &[0x0069, 0x0307];
const J_DOT: &[u16] = &[0x006A, 0x0307];
const I_OGONEK_DOT: &[u16] = &[0x012F, 0x0307];
const I_DOT_GRAVE: &[u16] = &[0x0069, 0x0307, 0x0300];
const I_DOT_ACUTE: &[u16] = &[0x0069, 0x0307, 0x0301];
const I_DOT_TILDE: &[u16] = &[0x0069, 0x0307, 0x0303];

const ECH_YIWN_UPPER: &[u16] = &[0x0535, 0x0552];
const ECH_YIWN_TITLE: &[u16] = &[0x0535, 0x0582];
const ECH_VEW_UPPER: &[u16] = &[0x0535, 0x054E];
const ECH_VEW_TITLE: &[u16] = &[0x0535, 0x057E];

//
// Exception records
//

/// Decoded view of one exception record.
#[derive(Clone, Copy, Debug)]
struct Exception<'a> {
    word: u16,
    /// Slots and strings following the exception word.
    data: &'a [u16],
}

impl<'a> Exception<'a> {
    fn has(&self, slot: u32) -> bool {
        case::has_slot(self.word, slot)
    }

    fn is(&self, flag: u16) -> bool {
        self.word & flag != 0
    }

    fn unit(&self, i: usize) -> u32 {
        self.data.get(i).map_or(0, |&unit| u32::from(unit))
    }

    fn slot(&self, slot: u32) -> Option<u32> {
        if !self.has(slot) {
            return None;
        }
        let i = case::slot_offset(self.word, slot);
        if self.is(EXC_DOUBLE_SLOTS) {
            Some((self.unit(2 * i) << 16) | self.unit(2 * i + 1))
        } else {
            Some(self.unit(i))
        }
    }

    fn delta(&self) -> Option<i32> {
        self.slot(EXC_DELTA).map(|delta| {
            if self.is(EXC_DELTA_IS_NEGATIVE) { -(delta as i32) } else { delta as i32 }
        })
    }

    fn dot_type(&self) -> u16 {
        (self.word >> EXC_DOT_SHIFT) & DOT_MASK
    }

    fn strings_start(&self) -> usize {
        let slots = (self.word & 0xFF).count_ones() as usize;
        if self.is(EXC_DOUBLE_SLOTS) { 2 * slots } else { slots }
    }

    fn full_lengths(&self) -> u32 {
        self.slot(EXC_FULL_MAPPINGS).unwrap_or(0)
    }

    /// Full mapping string: 0 lower, 1 fold, 2 upper, 3 title. Empty if not stored.
    fn full_mapping(&self, which: u32) -> &'a [u16] {
        let lengths = self.full_lengths();
        let length = ((lengths >> (4 * which)) & 0xF) as usize;
        if length == 0 {
            return &[];
        }
        let skipped: u32 = (0..which).map(|i| (lengths >> (4 * i)) & 0xF).sum();
        let start = self.strings_start() + skipped as usize;
        self.data.get(start..start + length).unwrap_or(&[])
    }

    fn closure(&self) -> &'a [u16] {
        let length = (self.slot(EXC_CLOSURE).unwrap_or(0) & 0xF) as usize;
        if length == 0 {
            return &[];
        }
        let lengths = self.full_lengths();
        let skipped: u32 = (0..4).map(|i| (lengths >> (4 * i)) & 0xF).sum();
        let start = self.strings_start() + skipped as usize;
        self.data.get(start..start + length).unwrap_or(&[])
    }
}

const FULL_LOWER: u32 = 0;
const FULL_FOLD: u32 = 1;
const FULL_UPPER: u32 = 2;
const FULL_TITLE: u32 = 3;

fn props_delta(props: u16) -> i32 {
    i32::from((props as i16) >> case::DELTA_SHIFT)
}

fn is_upper_or_title(props: u16) -> bool {
    props & TYPE_MASK >= UPPER
}

fn add_delta(c: u32, delta: i32) -> u32 {
    (c as i32 + delta) as u32
}

fn mapping<'a>(c: u32, result: u32) -> CaseMapping<'a> {
    if result == c { CaseMapping::Unchanged } else { CaseMapping::CodePoint(result) }
}

fn case_type(props: u16) -> CaseType {
    match props & TYPE_MASK {
        LOWER => CaseType::Lower,
        UPPER => CaseType::Upper,
        TITLE => CaseType::Title,
        _ => CaseType::None,
    }
}

fn dot_type(dot: u16) -> DotType {
    match dot {
        SOFT_DOTTED => DotType::SoftDotted,
        ABOVE => DotType::Above,
        OTHER_ACCENT => DotType::OtherAccent,
        _ => DotType::NoDot,
    }
}

/// Case mapping engine over one set of case data.
#[derive(Debug)]
pub struct CaseProps {
    data: CaseData,
    latin: LatinCase,
}

static INSTANCE: Lazy<CaseProps> = Lazy::new(|| match CaseData::build() {
    Ok(data) => CaseProps::new(data),
    Err(err) => panic!("failed to build case data: {}", err),
});

impl CaseProps {
    pub fn new(data: CaseData) -> CaseProps {
        let mut props = CaseProps { data, latin: LatinCase::exceptions_only() };
        props.latin = LatinCase::build(&props);
        debug!("case props: Unicode {:?}, {} exception units",
            props.data.unicode_version, props.data.exceptions.len());
        props
    }

    /// Case properties built from the character database.
    pub fn build() -> Result<CaseProps> {
        CaseData::build().map(CaseProps::new)
    }

    /// Case properties loaded from a serialized data image.
    pub fn from_bytes(bytes: &[u8]) -> Result<CaseProps> {
        CaseData::from_bytes(bytes).map(CaseProps::new)
    }

    /// Process-wide case properties, built on first use.
    ///
    /// # Panics
    ///
    /// Panics if the case data cannot be built from the character database. This does not
    /// depend on the input and would be a bug in the data builder.
    pub fn instance() -> &'static CaseProps {
        &INSTANCE
    }

    pub fn data(&self) -> &CaseData {
        &self.data
    }

    pub(crate) fn latin(&self) -> &LatinCase {
        &self.latin
    }

    pub(crate) fn props(&self, c: u32) -> u16 {
        self.data.trie.get(c)
    }

    /// Delta to the lowercase and case folding of a BMP code point below the surrogates,
    /// unless it needs the full lookup.
    pub(crate) fn bmp_lower_delta(&self, c: u32) -> Option<i32> {
        let props = self.data.trie.bmp_get(c);
        if props & EXCEPTION != 0 {
            None
        } else if is_upper_or_title(props) {
            Some(props_delta(props))
        } else {
            Some(0)
        }
    }

    /// Delta to the uppercase of a BMP code point below the surrogates, unless it needs
    /// the full lookup.
    pub(crate) fn bmp_upper_delta(&self, c: u32) -> Option<i32> {
        let props = self.data.trie.bmp_get(c);
        if props & EXCEPTION != 0 {
            None
        } else if props & TYPE_MASK == LOWER {
            Some(props_delta(props))
        } else {
            Some(0)
        }
    }

    fn exception(&self, props: u16) -> Exception<'_> {
        let i = usize::from(props >> EXC_SHIFT);
        let exceptions = &self.data.exceptions;
        Exception {
            word: exceptions.get(i).copied().unwrap_or(0),
            data: exceptions.get(i + 1..).unwrap_or(&[]),
        }
    }

    /// Does the code point have language or context dependent mappings?
    pub(crate) fn is_conditional(&self, c: u32) -> bool {
        let props = self.props(c);
        props & EXCEPTION != 0
            && self.exception(props).is(EXC_CONDITIONAL_SPECIAL | EXC_CONDITIONAL_FOLD)
    }

    /// Greek uppercasing data of the code point, zero if it has none.
    pub(crate) fn greek_data(&self, c: u32) -> u16 {
        case::greek_index(c)
            .and_then(|i| self.data.greek.get(i))
            .copied()
            .unwrap_or(0)
    }

    //
    // Properties
    //

    pub fn get_type(&self, c: u32) -> CaseType {
        case_type(self.props(c))
    }

    /// Case type together with the Case_Ignorable property.
    pub fn get_type_or_ignorable(&self, c: u32) -> (CaseType, bool) {
        let props = self.props(c);
        (case_type(props), props & IGNORABLE != 0)
    }

    pub fn is_case_ignorable(&self, c: u32) -> bool {
        self.props(c) & IGNORABLE != 0
    }

    pub fn get_dot_type(&self, c: u32) -> DotType {
        let props = self.props(c);
        if props & EXCEPTION == 0 {
            dot_type(props & DOT_MASK)
        } else {
            dot_type(self.exception(props).dot_type())
        }
    }

    pub fn is_soft_dotted(&self, c: u32) -> bool {
        self.get_dot_type(c) == DotType::SoftDotted
    }

    /// Is the code point affected by or the result of some case mapping?
    pub fn is_case_sensitive(&self, c: u32) -> bool {
        let props = self.props(c);
        if props & EXCEPTION == 0 {
            props & SENSITIVE != 0
        } else {
            self.exception(props).is(EXC_SENSITIVE)
        }
    }

    pub fn has_binary_property(&self, c: u32, property: CaseProperty) -> bool {
        let changes = |m: CaseMapping| !m.is_unchanged();
        let root = CaseLocale::Root;
        match property {
            CaseProperty::Lowercase => self.get_type(c) == CaseType::Lower,
            CaseProperty::Uppercase => self.get_type(c) == CaseType::Upper,
            CaseProperty::Cased => self.get_type(c) != CaseType::None,
            CaseProperty::CaseIgnorable => self.is_case_ignorable(c),
            CaseProperty::SoftDotted => self.is_soft_dotted(c),
            CaseProperty::CaseSensitive => self.is_case_sensitive(c),
            CaseProperty::ChangesWhenLowercased => {
                changes(self.to_full_lower(c, &mut NoContext, root))
            }
            CaseProperty::ChangesWhenUppercased => {
                changes(self.to_full_upper(c, &mut NoContext, root))
            }
            CaseProperty::ChangesWhenTitlecased => {
                changes(self.to_full_title(c, &mut NoContext, root))
            }
            CaseProperty::ChangesWhenCasefolded => {
                changes(self.to_full_folding(c, CaseOptions::empty()))
            }
            CaseProperty::ChangesWhenCasemapped => {
                changes(self.to_full_lower(c, &mut NoContext, root))
                    || changes(self.to_full_upper(c, &mut NoContext, root))
                    || changes(self.to_full_title(c, &mut NoContext, root))
            }
        }
    }

    //
    // Simple case mappings
    //

    pub fn to_lower(&self, c: u32) -> u32 {
        let props = self.props(c);
        if props & EXCEPTION == 0 {
            if is_upper_or_title(props) { add_delta(c, props_delta(props)) } else { c }
        } else {
            let exc = self.exception(props);
            match exc.delta() {
                Some(delta) if is_upper_or_title(props) => add_delta(c, delta),
                _ => exc.slot(EXC_LOWER).unwrap_or(c),
            }
        }
    }

    pub fn to_upper(&self, c: u32) -> u32 {
        let props = self.props(c);
        if props & EXCEPTION == 0 {
            if props & TYPE_MASK == LOWER { add_delta(c, props_delta(props)) } else { c }
        } else {
            let exc = self.exception(props);
            match exc.delta() {
                Some(delta) if props & TYPE_MASK == LOWER => add_delta(c, delta),
                _ => exc.slot(EXC_UPPER).unwrap_or(c),
            }
        }
    }

    pub fn to_title(&self, c: u32) -> u32 {
        let props = self.props(c);
        if props & EXCEPTION == 0 {
            if props & TYPE_MASK == LOWER { add_delta(c, props_delta(props)) } else { c }
        } else {
            let exc = self.exception(props);
            match exc.delta() {
                Some(delta) if props & TYPE_MASK == LOWER => add_delta(c, delta),
                _ => exc.slot(EXC_TITLE).or_else(|| exc.slot(EXC_UPPER)).unwrap_or(c),
            }
        }
    }

    /// Simple case folding.
    pub fn fold(&self, c: u32, options: CaseOptions) -> u32 {
        let props = self.props(c);
        if props & EXCEPTION == 0 {
            return if is_upper_or_title(props) { add_delta(c, props_delta(props)) } else { c };
        }
        let exc = self.exception(props);
        if exc.is(EXC_CONDITIONAL_FOLD) {
            match (c, options.is_turkic_fold()) {
                (0x0049, false) => return 0x0069,
                (0x0130, false) => return c,
                (0x0049, true) => return 0x0131,
                (0x0130, true) => return 0x0069,
                _ => {}
            }
        }
        if exc.is(EXC_NO_SIMPLE_CASE_FOLDING) {
            return c;
        }
        if let Some(delta) = exc.delta() {
            if is_upper_or_title(props) {
                return add_delta(c, delta);
            }
        }
        exc.slot(EXC_FOLD).or_else(|| exc.slot(EXC_LOWER)).unwrap_or(c)
    }

    //
    // Full case mappings
    //

    pub fn to_full_lower<'a>(&'a self, c: u32, context: &mut dyn ContextIterator,
        locale: CaseLocale) -> CaseMapping<'a>
    {
        let props = self.props(c);
        if props & EXCEPTION == 0 {
            return if is_upper_or_title(props) {
                mapping(c, add_delta(c, props_delta(props)))
            } else {
                CaseMapping::Unchanged
            };
        }
        let exc = self.exception(props);
        if exc.is(EXC_CONDITIONAL_SPECIAL) {
            if locale == CaseLocale::Lithuanian
                && ((matches!(c, 0x0049 | 0x004A | 0x012E) && self.is_followed_by_more_above(context))
                    || matches!(c, 0x00CC | 0x00CD | 0x0128))
            {
                // Keep the dot of i when an accent is placed above it.
                let s = match c {
                    0x0049 => I_DOT,
                    0x004A => J_DOT,
                    0x012E => I_OGONEK_DOT,
                    0x00CC => I_DOT_GRAVE,
                    0x00CD => I_DOT_ACUTE,
                    _ => I_DOT_TILDE,
                };
                return CaseMapping::String(s);
            } else if locale == CaseLocale::Turkish && c == 0x0130 {
                return CaseMapping::CodePoint(0x0069);
            } else if locale == CaseLocale::Turkish && c == 0x0307
                && self.is_preceded_by_capital_i(context)
            {
                return CaseMapping::String(&[]);
            } else if locale == CaseLocale::Turkish && c == 0x0049
                && !self.is_followed_by_dot_above(context)
            {
                return CaseMapping::CodePoint(0x0131);
            } else if c == 0x0130 {
                return CaseMapping::String(I_DOT);
            } else if c == 0x03A3
                && !self.is_followed_by_cased_letter(context, Direction::Forward)
                && self.is_followed_by_cased_letter(context, Direction::Backward)
            {
                // Final sigma.
                return CaseMapping::CodePoint(0x03C2);
            }
        } else {
            let full = exc.full_mapping(FULL_LOWER);
            if !full.is_empty() {
                return CaseMapping::String(full);
            }
        }
        let result = match exc.delta() {
            Some(delta) if is_upper_or_title(props) => add_delta(c, delta),
            _ => exc.slot(EXC_LOWER).unwrap_or(c),
        };
        mapping(c, result)
    }

    pub fn to_full_upper<'a>(&'a self, c: u32, context: &mut dyn ContextIterator,
        locale: CaseLocale) -> CaseMapping<'a>
    {
        self.to_upper_or_title(c, context, locale, true)
    }

    pub fn to_full_title<'a>(&'a self, c: u32, context: &mut dyn ContextIterator,
        locale: CaseLocale) -> CaseMapping<'a>
    {
        self.to_upper_or_title(c, context, locale, false)
    }

    fn to_upper_or_title<'a>(&'a self, c: u32, context: &mut dyn ContextIterator,
        locale: CaseLocale, upper_not_title: bool) -> CaseMapping<'a>
    {
        let props = self.props(c);
        if props & EXCEPTION == 0 {
            return if props & TYPE_MASK == LOWER {
                mapping(c, add_delta(c, props_delta(props)))
            } else {
                CaseMapping::Unchanged
            };
        }
        let exc = self.exception(props);
        if exc.is(EXC_CONDITIONAL_SPECIAL) {
            if locale == CaseLocale::Turkish && c == 0x0069 {
                return CaseMapping::CodePoint(0x0130);
            } else if locale == CaseLocale::Lithuanian && c == 0x0307
                && self.is_preceded_by_soft_dotted(context)
            {
                // The dot of a soft-dotted letter disappears in uppercase.
                return CaseMapping::String(&[]);
            } else if c == 0x0587 {
                let s = match (locale == CaseLocale::Armenian, upper_not_title) {
                    (true, true) => ECH_VEW_UPPER,
                    (true, false) => ECH_VEW_TITLE,
                    (false, true) => ECH_YIWN_UPPER,
                    (false, false) => ECH_YIWN_TITLE,
                };
                return CaseMapping::String(s);
            }
        } else {
            let full = exc.full_mapping(if upper_not_title { FULL_UPPER } else { FULL_TITLE });
            if !full.is_empty() {
                return CaseMapping::String(full);
            }
        }
        let result = match exc.delta() {
            Some(delta) if props & TYPE_MASK == LOWER => add_delta(c, delta),
            _ if upper_not_title => exc.slot(EXC_UPPER).unwrap_or(c),
            _ => exc.slot(EXC_TITLE).or_else(|| exc.slot(EXC_UPPER)).unwrap_or(c),
        };
        mapping(c, result)
    }

    pub fn to_full_folding(&self, c: u32, options: CaseOptions) -> CaseMapping<'_> {
        let props = self.props(c);
        if props & EXCEPTION == 0 {
            return if is_upper_or_title(props) {
                mapping(c, add_delta(c, props_delta(props)))
            } else {
                CaseMapping::Unchanged
            };
        }
        let exc = self.exception(props);
        if exc.is(EXC_CONDITIONAL_FOLD) {
            match (c, options.is_turkic_fold()) {
                (0x0049, false) => return CaseMapping::CodePoint(0x0069),
                (0x0130, false) => return CaseMapping::String(I_DOT),
                (0x0049, true) => return CaseMapping::CodePoint(0x0131),
                (0x0130, true) => return CaseMapping::CodePoint(0x0069),
                _ => {}
            }
        } else {
            let full = exc.full_mapping(FULL_FOLD);
            if !full.is_empty() {
                return CaseMapping::String(full);
            }
        }
        if exc.is(EXC_NO_SIMPLE_CASE_FOLDING) {
            return CaseMapping::Unchanged;
        }
        let result = match exc.delta() {
            Some(delta) if is_upper_or_title(props) => add_delta(c, delta),
            _ => exc.slot(EXC_FOLD).or_else(|| exc.slot(EXC_LOWER)).unwrap_or(c),
        };
        mapping(c, result)
    }

    //
    // Context conditions
    //

    fn is_followed_by_cased_letter(&self, context: &mut dyn ContextIterator,
        direction: Direction) -> bool
    {
        context.reset(direction);
        while let Some(c) = context.next() {
            match self.get_type_or_ignorable(c) {
                (_, true) => continue,
                (CaseType::None, false) => return false,
                _ => return true,
            }
        }
        false
    }

    fn is_preceded_by_soft_dotted(&self, context: &mut dyn ContextIterator) -> bool {
        context.reset(Direction::Backward);
        while let Some(c) = context.next() {
            match self.get_dot_type(c) {
                DotType::SoftDotted => return true,
                DotType::OtherAccent => continue,
                _ => return false,
            }
        }
        false
    }

    fn is_preceded_by_capital_i(&self, context: &mut dyn ContextIterator) -> bool {
        context.reset(Direction::Backward);
        while let Some(c) = context.next() {
            if c == 0x0049 {
                return true;
            }
            if self.get_dot_type(c) != DotType::OtherAccent {
                return false;
            }
        }
        false
    }

    fn is_followed_by_more_above(&self, context: &mut dyn ContextIterator) -> bool {
        context.reset(Direction::Forward);
        while let Some(c) = context.next() {
            match self.get_dot_type(c) {
                DotType::Above => return true,
                DotType::OtherAccent => continue,
                _ => return false,
            }
        }
        false
    }

    fn is_followed_by_dot_above(&self, context: &mut dyn ContextIterator) -> bool {
        context.reset(Direction::Forward);
        while let Some(c) = context.next() {
            if c == 0x0307 {
                return true;
            }
            if self.get_dot_type(c) != DotType::OtherAccent {
                return false;
            }
        }
        false
    }

    //
    // Case closure
    //

    /// Add all code points and strings which are case-insensitively equal to `c`,
    /// not including `c` itself.
    pub fn add_case_closure(&self, c: u32, closure: &mut CaseClosure) {
        // Dotted and dotless i are not closed over: the Turkic mappings would merge
        // both of them with i and I.
        match c {
            0x0049 => {
                closure.add(0x0069);
                return;
            }
            0x0069 => {
                closure.add(0x0049);
                return;
            }
            0x0130 => {
                closure.add_string(I_DOT);
                return;
            }
            0x0131 => return,
            _ => {}
        }
        let props = self.props(c);
        if props & EXCEPTION == 0 {
            if props & TYPE_MASK != NONE {
                let delta = props_delta(props);
                if delta != 0 {
                    closure.add(add_delta(c, delta));
                }
            }
            return;
        }
        let exc = self.exception(props);
        for &slot in &[EXC_LOWER, EXC_FOLD, EXC_UPPER, EXC_TITLE] {
            if let Some(mapped) = exc.slot(slot) {
                closure.add(mapped);
            }
        }
        if let Some(delta) = exc.delta() {
            closure.add(add_delta(c, delta));
        }
        let fold = exc.full_mapping(FULL_FOLD);
        if !fold.is_empty() {
            closure.add_string(fold);
        }
        for other in utf16::code_points(exc.closure()) {
            closure.add(other);
        }
    }

    /// Add all code points whose full case folding is `s`, and their closures.
    ///
    /// `s` must be case folded already. Returns whether any code point folds to `s`.
    pub fn add_string_case_closure(&self, s: &[u16], closure: &mut CaseClosure) -> bool {
        // Single code units have no string closure.
        if s.len() <= 1 {
            return false;
        }
        let unfold = &self.data.unfold;
        if unfold.len() <= UNFOLD_STRING_WIDTH {
            return false;
        }
        let rows = usize::from(unfold[UNFOLD_ROWS]);
        let row_width = usize::from(unfold[UNFOLD_ROW_WIDTH]);
        let string_width = usize::from(unfold[UNFOLD_STRING_WIDTH]);
        if s.len() > string_width || row_width <= string_width {
            return false;
        }
        let row = |i: usize| unfold.get((i + 1) * row_width..(i + 2) * row_width).unwrap_or(&[]);
        let trimmed = |units: &[u16]| {
            let end = units.iter().position(|&unit| unit == 0).unwrap_or(units.len());
            units[..end].to_vec()
        };

        let (mut low, mut high) = (0, rows);
        while low < high {
            let middle = (low + high) / 2;
            let candidate = row(middle);
            if candidate.len() < row_width {
                return false;
            }
            let string = trimmed(&candidate[..string_width]);
            match s.cmp(&string[..]) {
                std::cmp::Ordering::Less => high = middle,
                std::cmp::Ordering::Greater => low = middle + 1,
                std::cmp::Ordering::Equal => {
                    for c in utf16::code_points(&trimmed(&candidate[string_width..])) {
                        closure.add(c);
                        self.add_case_closure(c, closure);
                    }
                    return true;
                }
            }
        }
        false
    }
}
