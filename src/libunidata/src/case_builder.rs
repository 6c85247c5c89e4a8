// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Case data generation.
//!
//! The character database only gives us full mappings without titlecase, so simple and
//! titlecase mappings are derived from them first. Then every code point which can be
//! described by a case type and a small delta gets that, and everything else receives an
//! exception record.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use libtrie::{TrieBuilder, MAX_CODE_POINT};
use log::debug;

use crate::case::{CaseData, ABOVE, CLOSURE_MAX_LENGTH, EXCEPTION, EXC_CLOSURE,
                  EXC_CONDITIONAL_FOLD, EXC_CONDITIONAL_SPECIAL, EXC_DELTA,
                  EXC_DELTA_IS_NEGATIVE, EXC_DOT_SHIFT, EXC_DOUBLE_SLOTS, EXC_FOLD,
                  EXC_FULL_MAPPINGS, EXC_LOWER, EXC_NO_SIMPLE_CASE_FOLDING, EXC_SENSITIVE,
                  EXC_SHIFT, EXC_TITLE, EXC_UPPER, GREEK_TABLE_LENGTH, HAS_ACCENT,
                  HAS_DIALYTIKA, HAS_VOWEL, HAS_YPOGEGRAMMENI, IGNORABLE, LOWER, MAX_DELTA,
                  MAX_EXCEPTIONS, MIN_DELTA, NONE, OTHER_ACCENT, SENSITIVE, SOFT_DOTTED,
                  TITLE, UPPER, UPPER_MASK, DELTA_SHIFT};
use crate::ucd::{self, GeneralCategory};
use crate::{DataError, Result};

/// Characters whose mappings depend on language or context.
const CONDITIONAL_SPECIAL: &[u32] = &[
    0x0049, 0x004A, 0x0069, 0x00CC, 0x00CD, 0x0128, 0x012E, 0x0130, 0x0307, 0x03A3, 0x0587,
];

/// Characters whose case folding depends on the Turkic option.
const CONDITIONAL_FOLD: &[u32] = &[0x0049, 0x0130];

/// Greek letters which lose their accents in uppercase.
const GREEK_VOWELS: &[u32] = &[0x0391, 0x0395, 0x0397, 0x0399, 0x039F, 0x03A5, 0x03A9];

const GREEK_ACCENTS: &[u32] = &[0x0300, 0x0301, 0x0342, 0x0302, 0x0303, 0x0311];

const COMBINING_YPOGEGRAMMENI: u32 = 0x0345;
const COMBINING_DIALYTIKA: u32 = 0x0308;
const CAPITAL_IOTA: u32 = 0x0399;

/// All mappings of one code point.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Mappings {
    lower: u32,
    fold: u32,
    upper: u32,
    title: u32,
    full_lower: Vec<u32>,
    full_fold: Vec<u32>,
    full_upper: Vec<u32>,
    full_title: Vec<u32>,
}

impl Mappings {
    fn is_identity(&self, c: u32) -> bool {
        let same = |full: &[u32]| full.len() == 1 && full[0] == c;
        self.lower == c && self.fold == c && self.upper == c && self.title == c
            && same(&self.full_lower) && same(&self.full_fold)
            && same(&self.full_upper) && same(&self.full_title)
    }

    fn full_matches_simple(&self) -> bool {
        let same = |full: &[u32], simple: u32| full.len() == 1 && full[0] == simple;
        same(&self.full_lower, self.lower) && same(&self.full_fold, self.fold)
            && same(&self.full_upper, self.upper) && same(&self.full_title, self.title)
    }

    fn targets(&self) -> impl Iterator<Item=u32> + '_ {
        IntoIterator::into_iter([self.lower, self.fold, self.upper, self.title])
            .chain(self.full_lower.iter().copied())
            .chain(self.full_fold.iter().copied())
            .chain(self.full_upper.iter().copied())
            .chain(self.full_title.iter().copied())
    }
}

/// Per-character input of the encoder.
#[derive(Clone, Debug, Default)]
struct Props {
    case_type: u16,
    ignorable: bool,
    dot: u16,
}

pub(crate) fn build() -> Result<CaseData> {
    let titlecase_letters = collect_titlecase_letters();

    let mut props = BTreeMap::new();
    let mut mappings = BTreeMap::new();
    for c in 0..=MAX_CODE_POINT {
        if std::char::from_u32(c).is_none() {
            continue;
        }
        let p = character_props(c);
        let m = character_mappings(c, &titlecase_letters);
        if !m.is_identity(c) {
            mappings.insert(c, m);
        }
        if p.case_type != NONE || p.ignorable || p.dot != 0 || mappings.contains_key(&c) {
            props.insert(c, p);
        }
    }

    let mut sensitive = BTreeSet::new();
    for (&c, m) in &mappings {
        sensitive.insert(c);
        sensitive.extend(m.targets());
    }

    let closures = collect_closures(&mappings);

    let mut exceptions = Vec::new();
    let mut max_full_length = 0;
    let mut trie = TrieBuilder::new(0u16, 0u16);
    for (&c, p) in &props {
        let identity = Mappings {
            lower: c, fold: c, upper: c, title: c,
            full_lower: vec![c], full_fold: vec![c], full_upper: vec![c], full_title: vec![c],
        };
        let m = mappings.get(&c).unwrap_or(&identity);
        let closure = closures.get(&c).map_or(&[][..], |v| &v[..]);
        let is_sensitive = sensitive.contains(&c);

        for full in &[&m.full_lower, &m.full_fold, &m.full_upper, &m.full_title] {
            max_full_length = max_full_length.max(utf16_length(full));
        }

        let mut value = p.case_type;
        if p.ignorable {
            value |= IGNORABLE;
        }
        match simple_delta(c, p.case_type, m, closure) {
            Some(delta) => {
                value |= ((delta as i16) << DELTA_SHIFT) as u16 | p.dot;
                if is_sensitive {
                    value |= SENSITIVE;
                }
            }
            None => {
                let offset = exceptions.len();
                if offset >= MAX_EXCEPTIONS {
                    return Err(DataError::Overflow("case exceptions"));
                }
                encode_exception(&mut exceptions, c, p, m, closure, is_sensitive)?;
                value |= EXCEPTION | ((offset as u16) << EXC_SHIFT);
            }
        }
        trie.set(c, value);
    }

    let unfold = build_unfold(&mappings);
    let greek = build_greek(&props, &mappings);

    debug!("case data: {} characters, {} exception units, {} unfold units",
        props.len(), exceptions.len(), unfold.len());

    Ok(CaseData {
        unicode_version: ucd::unicode_version(),
        trie: trie.build(),
        exceptions,
        unfold,
        greek,
        max_full_length: max_full_length as u32,
    })
}

fn character_props(c: u32) -> Props {
    let case_type = if ucd::is_titlecase_letter(c) {
        TITLE
    } else if ucd::is_lowercase(c) {
        LOWER
    } else if ucd::is_uppercase(c) {
        UPPER
    } else {
        NONE
    };
    let dot = if ucd::is_soft_dotted(c) {
        SOFT_DOTTED
    } else {
        match ucd::combining_class(c) {
            0 => 0,
            230 => ABOVE,
            _ => OTHER_ACCENT,
        }
    };
    Props { case_type, ignorable: ucd::is_case_ignorable(c), dot }
}

//
// Mappings
//

/// Titlecase letters keyed by their lowercase forms.
fn collect_titlecase_letters() -> HashMap<u32, u32> {
    let mut letters = HashMap::new();
    for c in 0..=MAX_CODE_POINT {
        if ucd::general_category(c) == GeneralCategory::TitlecaseLetter {
            letters.insert(single(&ucd::full_lowercase(c)).unwrap_or(c), c);
        }
    }
    letters
}

fn single(s: &[u32]) -> Option<u32> {
    if s.len() == 1 { Some(s[0]) } else { None }
}

fn is_georgian_mkhedruli(c: u32) -> bool {
    (0x10D0..=0x10FA).contains(&c) || (0x10FD..=0x10FF).contains(&c)
}

fn character_mappings(c: u32, titlecase_letters: &HashMap<u32, u32>) -> Mappings {
    let full_lower = ucd::full_lowercase(c);
    let full_upper = ucd::full_uppercase(c);
    let full_fold = ucd::case_fold(c);

    let lower = match single(&full_lower) {
        Some(lower) => lower,
        None if c == 0x0130 => 0x0069,
        None => c,
    };
    let full_title = titlecase_mapping(c, lower, &full_upper, titlecase_letters);
    let upper = single(&full_upper).or_else(|| single(&full_title)).unwrap_or(c);
    let title = single(&full_title).unwrap_or(upper);
    let fold = match single(&full_fold) {
        Some(fold) => fold,
        None if c == 0x0130 => c,
        None => lower,
    };

    Mappings { lower, fold, upper, title, full_lower, full_fold, full_upper, full_title }
}

fn titlecase_mapping(c: u32, lower: u32, full_upper: &[u32],
    titlecase_letters: &HashMap<u32, u32>) -> Vec<u32>
{
    if let Some(&title) = titlecase_letters.get(&lower) {
        return vec![title];
    }
    if is_georgian_mkhedruli(c) {
        return vec![c];
    }
    if full_upper.len() == 1 || c == 0x0149 {
        return full_upper.to_vec();
    }
    let ypogegrammeni = (0x1F00..=0x1FFF).contains(&c)
        && full_upper.last() == Some(&CAPITAL_IOTA)
        && ucd::canonical_decomposition(c).contains(&COMBINING_YPOGEGRAMMENI);
    if ypogegrammeni {
        let mut title = full_upper.to_vec();
        title.pop();
        title.push(COMBINING_YPOGEGRAMMENI);
        return title;
    }
    // Ligatures: only the first letter is capitalized.
    let mut title = vec![full_upper[0]];
    for &rest in &full_upper[1..] {
        title.push(single(&ucd::full_lowercase(rest)).unwrap_or(rest));
    }
    title
}

/// Simple case closure: characters with the same simple case folding.
fn collect_closures(mappings: &BTreeMap<u32, Mappings>) -> HashMap<u32, Vec<u32>> {
    let mut classes: HashMap<u32, BTreeSet<u32>> = HashMap::new();
    for (&c, m) in mappings {
        if m.fold != c {
            let class = classes.entry(m.fold).or_default();
            class.insert(m.fold);
            class.insert(c);
        }
    }
    let mut closures = HashMap::new();
    for class in classes.values() {
        for &c in class {
            let reachable: Vec<u32> = match mappings.get(&c) {
                Some(m) => vec![m.lower, m.fold, m.upper, m.title],
                None => Vec::new(),
            };
            let closure: Vec<u32> = class.iter().copied()
                .filter(|&other| other != c && !reachable.contains(&other))
                .collect();
            if !closure.is_empty() {
                closures.insert(c, closure);
            }
        }
    }
    closures
}

/// Delta encoding the mappings without an exception, if possible.
fn simple_delta(c: u32, case_type: u16, m: &Mappings, closure: &[u32]) -> Option<i32> {
    if CONDITIONAL_SPECIAL.contains(&c) || CONDITIONAL_FOLD.contains(&c)
        || !m.full_matches_simple()
    {
        return None;
    }
    let target = match case_type {
        NONE => {
            return if m.is_identity(c) && closure.is_empty() { Some(0) } else { None };
        }
        LOWER if m.lower == c && m.fold == c && m.upper == m.title => m.upper,
        UPPER | TITLE if m.upper == c && m.title == c && m.lower == m.fold => m.lower,
        _ => return None,
    };
    let delta = target as i32 - c as i32;
    if delta < MIN_DELTA || delta > MAX_DELTA {
        return None;
    }
    let covered = if delta == 0 {
        closure.is_empty()
    } else {
        closure.iter().all(|&other| other == target)
    };
    if covered { Some(delta) } else { None }
}

//
// Exceptions
//

fn utf16_length(s: &[u32]) -> usize {
    s.iter().map(|&c| if c > 0xFFFF { 2 } else { 1 }).sum()
}

fn push_utf16(out: &mut Vec<u16>, s: &[u32]) {
    let mut buffer = [0; 2];
    for ch in s.iter().filter_map(|&c| std::char::from_u32(c)) {
        out.extend_from_slice(ch.encode_utf16(&mut buffer));
    }
}

fn encode_exception(out: &mut Vec<u16>, c: u32, p: &Props, m: &Mappings, closure: &[u32],
    sensitive: bool) -> Result<()>
{
    let mut word = p.dot << EXC_DOT_SHIFT;
    if sensitive {
        word |= EXC_SENSITIVE;
    }
    if CONDITIONAL_SPECIAL.contains(&c) {
        word |= EXC_CONDITIONAL_SPECIAL;
    }
    if CONDITIONAL_FOLD.contains(&c) {
        word |= EXC_CONDITIONAL_FOLD;
    }

    let mut slots = BTreeMap::new();
    let mut delta = None;
    if p.case_type == LOWER && m.upper != c && m.upper == m.title {
        delta = Some(m.upper as i64 - c as i64);
    } else if (p.case_type == UPPER || p.case_type == TITLE) && m.lower != c && m.fold == m.lower {
        delta = Some(m.lower as i64 - c as i64);
    }
    if let Some(delta) = delta {
        if delta < 0 {
            word |= EXC_DELTA_IS_NEGATIVE;
        }
        slots.insert(EXC_DELTA, delta.unsigned_abs() as u32);
    }
    let lower_by_delta = delta.is_some() && p.case_type != LOWER;
    let upper_by_delta = delta.is_some() && p.case_type == LOWER;

    if m.lower != c && !lower_by_delta {
        slots.insert(EXC_LOWER, m.lower);
    }
    if m.fold == c && m.lower != c {
        word |= EXC_NO_SIMPLE_CASE_FOLDING;
    } else if m.fold != m.lower && !lower_by_delta {
        slots.insert(EXC_FOLD, m.fold);
    }
    if m.upper != c && !upper_by_delta {
        slots.insert(EXC_UPPER, m.upper);
    }
    if m.title != m.upper && !upper_by_delta {
        slots.insert(EXC_TITLE, m.title);
    }

    let mut strings = Vec::new();
    let mut full_lengths = 0u32;
    let fulls = [
        (&m.full_lower, m.lower),
        (&m.full_fold, m.fold),
        (&m.full_upper, m.upper),
        (&m.full_title, m.title),
    ];
    for (i, &(full, simple)) in fulls.iter().enumerate() {
        if full.len() == 1 && full[0] == simple {
            continue;
        }
        let length = utf16_length(full);
        if length == 0 || length > 0xF {
            return Err(DataError::Overflow("full case mapping"));
        }
        full_lengths |= (length as u32) << (4 * i);
        push_utf16(&mut strings, full);
    }
    if full_lengths != 0 {
        slots.insert(EXC_FULL_MAPPINGS, full_lengths);
    }
    if !closure.is_empty() {
        let length = utf16_length(closure);
        if length > usize::from(CLOSURE_MAX_LENGTH) {
            return Err(DataError::Overflow("case closure"));
        }
        slots.insert(EXC_CLOSURE, length as u32);
        push_utf16(&mut strings, closure);
    }

    let double = slots.values().any(|&value| value > 0xFFFF);
    if double {
        word |= EXC_DOUBLE_SLOTS;
    }
    for &slot in slots.keys() {
        word |= 1 << slot;
    }
    out.push(word);
    for &value in slots.values() {
        if double {
            out.push((value >> 16) as u16);
        }
        out.push(value as u16);
    }
    out.extend_from_slice(&strings);
    Ok(())
}

//
// Unfold and Greek tables
//

fn build_unfold(mappings: &BTreeMap<u32, Mappings>) -> Vec<u16> {
    let mut rows: BTreeMap<Vec<u16>, Vec<u16>> = BTreeMap::new();
    for (&c, m) in mappings {
        if m.full_fold.len() > 1 {
            let mut folded = Vec::new();
            push_utf16(&mut folded, &m.full_fold);
            push_utf16(rows.entry(folded).or_default(), &[c]);
        }
    }
    if rows.is_empty() {
        return Vec::new();
    }
    let string_width = rows.keys().map(Vec::len).max().unwrap_or(0);
    let row_width = string_width + rows.values().map(Vec::len).max().unwrap_or(0);

    // Zero padding keeps the order of the string column.
    let mut unfold = vec![0; row_width];
    unfold[0] = rows.len() as u16;
    unfold[1] = row_width as u16;
    unfold[2] = string_width as u16;
    for (string, code_points) in &rows {
        let start = unfold.len();
        unfold.resize(start + row_width, 0);
        unfold[start..start + string.len()].copy_from_slice(string);
        let cps = start + string_width;
        unfold[cps..cps + code_points.len()].copy_from_slice(code_points);
    }
    unfold
}

fn build_greek(props: &BTreeMap<u32, Props>, mappings: &BTreeMap<u32, Mappings>) -> Vec<u16> {
    let mut greek = vec![0; GREEK_TABLE_LENGTH];
    let characters = (0x0370..=0x03FF).chain(0x1F00..=0x1FFF).chain(std::iter::once(0x2126));
    for (index, c) in characters.enumerate() {
        if props.get(&c).map_or(NONE, |p| p.case_type) == NONE {
            continue;
        }
        let nfd = ucd::canonical_decomposition(c);
        let base = nfd[0];
        let upper = mappings.get(&base).map_or(base, |m| m.upper);
        let mut data = (upper as u16) & UPPER_MASK;
        if GREEK_VOWELS.contains(&upper) {
            data |= HAS_VOWEL;
        }
        for &mark in &nfd[1..] {
            if mark == COMBINING_YPOGEGRAMMENI {
                data |= HAS_YPOGEGRAMMENI;
            } else if mark == COMBINING_DIALYTIKA {
                data |= HAS_DIALYTIKA;
            } else if GREEK_ACCENTS.contains(&mark) {
                data |= HAS_ACCENT;
            }
        }
        greek[index] = data;
    }
    greek
}
