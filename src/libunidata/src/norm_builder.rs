// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Normalization data generation.
//!
//! Every code point is first described by its combining class, its full decomposition
//! mapping for the requested kind, and its participation in canonical compositions. Then
//! each one is classified into one of the norm16 ranges, and the ranges are laid out in
//! order into extra data. Algorithmic mappings are resolved last because their values
//! depend on the final size of the maybe/yes composition lists.

use std::collections::{BTreeMap, HashMap};

use libtrie::{TrieBuilder, MAX_CODE_POINT};
use log::{debug, warn};

use crate::norm::{NormData, NormIndexes, NormKind};
use crate::norm::{COMP_1_LAST_TUPLE, COMP_1_TRAIL_LIMIT, COMP_1_TRAIL_MASK, COMP_1_TRAIL_SHIFT,
                  COMP_1_TRIPLE, COMP_2_TRAIL_SHIFT, DELTA_SHIFT, DELTA_TCCC_0, DELTA_TCCC_1,
                  DELTA_TCCC_GT_1, EMPTY_LIST_OFFSET, HAS_COMP_BOUNDARY_AFTER, INERT, JAMO_L,
                  JAMO_VT, MAPPING_HAS_CCC_LCCC_WORD, MAPPING_HAS_RAW_MAPPING,
                  MAPPING_LENGTH_MASK, MAX_DELTA, MIN_NORMAL_MAYBE_YES, SMALL_FCD_SIZE};
use crate::ucd;
use crate::{DataError, Result};

const HANGUL_BASE: u32 = 0xAC00;
const HANGUL_LIMIT: u32 = 0xD7A4;
const JAMO_T_COUNT: u32 = 28;

const JAMO_L_FIRST: u32 = 0x1100;
const JAMO_L_LAST: u32 = 0x1112;
const JAMO_V_FIRST: u32 = 0x1161;
const JAMO_V_LAST: u32 = 0x1175;
const JAMO_T_FIRST: u32 = 0x11A8;
const JAMO_T_LAST: u32 = 0x11C2;

/// Case folding and compatibility decomposition settle in a couple of rounds.
const MAX_FOLD_ROUNDS: usize = 4;

/// Extra data must leave the lowest bit of norm16 values free.
const MAX_EXTRA_LENGTH: usize = 0x7E00;

/// Where a code point lands in the norm16 value space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Class {
    Inert,
    YesYesCompositions,
    YesYesWithCc,
    YesNoCompositions,
    YesNoMappingsOnly,
    NoNoCompYes,
    NoNoCompBoundaryBefore,
    NoNoCompNoMaybeCc,
    NoNoEmpty,
    Algorithmic(u32),
    MaybeYesCompositions,
    MaybeYes,
}

impl Default for Class {
    fn default() -> Class {
        Class::Inert
    }
}

/// Everything known about one code point.
#[derive(Clone, Debug, Default)]
struct Norm {
    cc: u8,
    /// Full decomposition mapping in the kind being built.
    mapping: Option<Vec<u32>>,
    /// One-level canonical mapping, if it differs from the full one.
    raw: Option<Vec<u32>>,
    /// (trail, composite) pairs with this code point as the lead.
    compositions: Vec<(u32, u32)>,
    combines_back: bool,
    class: Class,
}

pub(crate) fn build(kind: NormKind) -> Result<NormData> {
    let mut builder = Builder::new(kind);
    builder.collect_mappings();
    builder.collect_compositions();
    if kind == NormKind::Canonical {
        builder.collect_raw_mappings();
    }
    builder.classify();
    builder.assemble()
}

fn is_hangul(c: u32) -> bool {
    HANGUL_BASE <= c && c < HANGUL_LIMIT
}

fn is_surrogate(c: u32) -> bool {
    (c & 0xFFFF_F800) == 0xD800
}

fn to_utf16(s: &[u32]) -> Vec<u16> {
    let mut units = Vec::with_capacity(s.len());
    for &c in s {
        if c <= 0xFFFF {
            units.push(c as u16);
        } else {
            units.push(((c >> 10) + 0xD7C0) as u16);
            units.push(((c & 0x3FF) | 0xDC00) as u16);
        }
    }
    units
}

/// NFKC_Casefold mapping in decomposed form.
fn case_fold_mapping(c: u32) -> Option<Vec<u32>> {
    if ucd::is_default_ignorable(c) {
        return Some(Vec::new());
    }
    let mut mapping = ucd::compatibility_decomposition(c);
    for _ in 0..MAX_FOLD_ROUNDS {
        let next: Vec<u32> = ucd::nfkd(&ucd::case_fold_all(&mapping))
            .into_iter()
            .filter(|&m| !ucd::is_default_ignorable(m))
            .collect();
        if next == mapping {
            break;
        }
        mapping = next;
    }
    if mapping == [c] { None } else { Some(mapping) }
}

struct Builder {
    kind: NormKind,
    norms: BTreeMap<u32, Norm>,
    /// Full canonical decompositions of all decomposable non-Hangul code points.
    canonical: BTreeMap<u32, Vec<u32>>,
    /// Canonical composition pairs, keyed by composite.
    pairs: HashMap<u32, (u32, u32)>,
}

impl Builder {
    fn new(kind: NormKind) -> Builder {
        Builder {
            kind,
            norms: BTreeMap::new(),
            canonical: BTreeMap::new(),
            pairs: HashMap::new(),
        }
    }

    fn cc(&self, c: u32) -> u8 {
        self.norms.get(&c).map_or(0, |norm| norm.cc)
    }

    fn mapping(&self, c: u32) -> Option<&Vec<u32>> {
        self.norms.get(&c).and_then(|norm| norm.mapping.as_ref())
    }

    fn class(&self, c: u32) -> Class {
        self.norms.get(&c).map_or(Class::Inert, |norm| norm.class)
    }

    fn combines_forward(&self, c: u32) -> bool {
        self.norms.get(&c).map_or(false, |norm| !norm.compositions.is_empty())
    }

    fn combines_back(&self, c: u32) -> bool {
        self.norms.get(&c).map_or(false, |norm| norm.combines_back)
    }

    /// Does the code point survive decomposition followed by composition?
    fn round_trips(&self, c: u32) -> bool {
        match self.mapping(c) {
            None => true,
            Some(mapping) => ucd::nfc(mapping) == [c],
        }
    }

    fn collect_mappings(&mut self) {
        for c in 0..=MAX_CODE_POINT {
            if is_surrogate(c) || is_hangul(c) {
                continue;
            }
            let canonical = ucd::canonical_decomposition(c);
            let decomposes = canonical != [c];
            let mapping = match self.kind {
                NormKind::Canonical => {
                    if decomposes { Some(canonical.clone()) } else { None }
                }
                NormKind::Compatibility => {
                    let mapping = ucd::compatibility_decomposition(c);
                    if mapping == [c] { None } else { Some(mapping) }
                }
                NormKind::CompatibilityCaseFold => case_fold_mapping(c),
            };
            if decomposes {
                self.canonical.insert(c, canonical);
            }
            let cc = ucd::combining_class(c);
            if cc != 0 || mapping.is_some() {
                self.norms.insert(c, Norm { cc, mapping, ..Norm::default() });
            }
        }
        debug!("{:?}: {} code points with mappings or non-zero ccc", self.kind, self.norms.len());
    }

    /// Find the canonical pair which composes into `c`.
    fn composition_pair(c: u32, decomposition: &[u32]) -> Option<(u32, u32)> {
        let n = decomposition.len();
        if n < 2 {
            return None;
        }
        let last = decomposition[n - 1];
        let lead = ucd::nfc(&decomposition[..n - 1]);
        if lead.len() == 1 && ucd::compose_pair(lead[0], last) == Some(c) {
            return Some((lead[0], last));
        }
        // The trail may have been reordered in front of marks with a higher class.
        for j in 1..n - 1 {
            let mut rest = decomposition.to_vec();
            let trail = rest.remove(j);
            let lead = ucd::nfc(&rest);
            if lead.len() == 1 && ucd::compose_pair(lead[0], trail) == Some(c) {
                return Some((lead[0], trail));
            }
        }
        None
    }

    fn collect_compositions(&mut self) {
        let mut found = Vec::new();
        for (&c, decomposition) in &self.canonical {
            if let Some(pair) = Self::composition_pair(c, decomposition) {
                found.push((c, pair));
            }
        }
        let mut kept = 0;
        for (c, (lead, trail)) in found {
            self.pairs.insert(c, (lead, trail));
            // Compositions only matter where all three parties are stable in this kind.
            if self.cc(lead) != 0 || !self.round_trips(lead) || !self.round_trips(c)
                || self.mapping(trail).is_some()
            {
                continue;
            }
            self.norms.entry(lead).or_default().compositions.push((trail, c));
            self.norms.entry(trail).or_default().combines_back = true;
            kept += 1;
        }
        debug!("{:?}: {} canonical compositions", self.kind, kept);
    }

    fn collect_raw_mappings(&mut self) {
        let mut by_decomposition: HashMap<&[u32], u32> = HashMap::new();
        for (&c, decomposition) in &self.canonical {
            by_decomposition.entry(decomposition.as_slice()).or_insert(c);
        }

        let mut raw_mappings = Vec::new();
        for (&c, decomposition) in &self.canonical {
            let raw = match self.pairs.get(&c) {
                Some(&(lead, trail)) => vec![lead, trail],
                None => {
                    let n = decomposition.len();
                    let composed = ucd::nfc(decomposition);
                    if composed.len() == 1 && composed[0] != c {
                        composed
                    } else if n == 2 {
                        decomposition.clone()
                    } else if let Some(&lead) = by_decomposition.get(&decomposition[..n - 1]) {
                        vec![lead, decomposition[n - 1]]
                    } else {
                        decomposition.clone()
                    }
                }
            };
            if raw != *decomposition {
                raw_mappings.push((c, raw));
            }
        }
        for (c, raw) in raw_mappings {
            if let Some(norm) = self.norms.get_mut(&c) {
                norm.raw = Some(raw);
            }
        }
    }

    fn basic_class(&self, c: u32, norm: &Norm) -> Class {
        let forward = !norm.compositions.is_empty();
        match &norm.mapping {
            None => {
                if norm.combines_back {
                    if norm.cc == 0 && forward {
                        return Class::MaybeYesCompositions;
                    }
                    if forward {
                        warn!("U+{:04X} combines both ways but has ccc {}", c, norm.cc);
                    }
                    Class::MaybeYes
                } else if norm.cc != 0 {
                    if forward {
                        warn!("U+{:04X} combines forward but has ccc {}", c, norm.cc);
                    }
                    Class::YesYesWithCc
                } else if forward {
                    Class::YesYesCompositions
                } else {
                    Class::Inert
                }
            }
            Some(mapping) if mapping.is_empty() => Class::NoNoEmpty,
            Some(mapping) => {
                let first_cc = self.cc(mapping[0]);
                let composed = ucd::nfc(mapping);
                if norm.cc == 0 && first_cc == 0 && composed == [c] {
                    if norm.combines_back {
                        warn!("U+{:04X} round-trips but also combines backward", c);
                    }
                    if forward { Class::YesNoCompositions } else { Class::YesNoMappingsOnly }
                } else {
                    let boundary_before = first_cc == 0 && !self.combines_back(mapping[0]);
                    if boundary_before && composed == *mapping {
                        Class::NoNoCompYes
                    } else if boundary_before {
                        Class::NoNoCompBoundaryBefore
                    } else {
                        Class::NoNoCompNoMaybeCc
                    }
                }
            }
        }
    }

    /// A no/no mapping which is a single composition-stable code point nearby can be stored
    /// as a delta instead of a string.
    fn algorithmic_target(&self, c: u32, norm: &Norm) -> Option<u32> {
        let mapping = norm.mapping.as_ref()?;
        if norm.cc != 0 || mapping.is_empty() {
            return None;
        }
        let composed = ucd::nfc(mapping);
        if composed.len() != 1 {
            return None;
        }
        let target = composed[0];
        if target == c || (i64::from(target) - i64::from(c)).abs() > i64::from(MAX_DELTA) {
            return None;
        }
        match self.class(target) {
            Class::Inert | Class::YesYesCompositions | Class::YesNoCompositions
            | Class::YesNoMappingsOnly => {}
            _ => return None,
        }
        let target_mapping = self.mapping(target).cloned().unwrap_or_else(|| vec![target]);
        if target_mapping != *mapping {
            return None;
        }
        if self.kind == NormKind::Canonical
            && *norm.raw.as_ref().unwrap_or(mapping) != [target]
        {
            return None;
        }
        Some(target)
    }

    fn classify(&mut self) {
        let classes: Vec<(u32, Class)> = self.norms.iter()
            .map(|(&c, norm)| (c, self.basic_class(c, norm)))
            .collect();
        for (c, class) in classes {
            if let Some(norm) = self.norms.get_mut(&c) {
                norm.class = class;
            }
        }

        let algorithmic: Vec<(u32, u32)> = self.norms.iter()
            .filter(|(_, norm)| match norm.class {
                Class::NoNoCompYes | Class::NoNoCompBoundaryBefore
                | Class::NoNoCompNoMaybeCc => true,
                _ => false,
            })
            .filter_map(|(&c, norm)| self.algorithmic_target(c, norm).map(|d| (c, d)))
            .collect();
        for (c, target) in algorithmic {
            if let Some(norm) = self.norms.get_mut(&c) {
                norm.class = Class::Algorithmic(target);
            }
        }
    }

    /// Can text following `c` never interact with it during composition?
    fn comp_boundary_after(&self, c: u32) -> bool {
        let norm = match self.norms.get(&c) {
            Some(norm) => norm,
            None => return true,
        };
        let mapping = norm.mapping.as_deref().unwrap_or(&[]);
        match norm.class {
            Class::Inert => true,
            Class::YesNoMappingsOnly => mapping.last().map_or(false, |&m| self.cc(m) == 0),
            Class::NoNoCompYes | Class::NoNoCompBoundaryBefore | Class::NoNoCompNoMaybeCc => {
                match mapping.last() {
                    Some(&last) => {
                        self.cc(last) == 0 && !self.combines_forward(last)
                            && !self.combines_back(last)
                    }
                    None => false,
                }
            }
            Class::Algorithmic(target) => self.comp_boundary_after(target),
            _ => false,
        }
    }

    fn trail_cc(&self, norm: &Norm) -> u8 {
        match &norm.mapping {
            Some(mapping) => mapping.last().map_or(0, |&m| self.cc(m)),
            None => norm.cc,
        }
    }

    fn lead_cc(&self, norm: &Norm) -> u8 {
        match &norm.mapping {
            Some(mapping) => mapping.first().map_or(0, |&m| self.cc(m)),
            None => norm.cc,
        }
    }

    fn encode_compositions(&self, pairs: &[(u32, u32)]) -> Vec<u16> {
        let key = |trail: u32| -> (u16, u16) {
            if trail < COMP_1_TRAIL_LIMIT {
                ((trail << 1) as u16, 0)
            } else {
                ((COMP_1_TRAIL_LIMIT + ((trail >> COMP_1_TRAIL_SHIFT) & !u32::from(COMP_1_TRIPLE)))
                    as u16,
                 (trail << COMP_2_TRAIL_SHIFT) as u16)
            }
        };
        let mut sorted = pairs.to_vec();
        sorted.sort_by_key(|&(trail, _)| key(trail));

        let mut units = Vec::new();
        let mut last_start = 0;
        for (trail, composite) in sorted {
            let composite_and_fwd = (composite << 1) | u32::from(self.combines_forward(composite));
            let (key1, key2) = key(trail);
            last_start = units.len();
            if trail < COMP_1_TRAIL_LIMIT {
                if composite_and_fwd <= 0xFFFF {
                    units.push(key1);
                    units.push(composite_and_fwd as u16);
                } else {
                    units.push(key1 | COMP_1_TRIPLE);
                    units.push((composite_and_fwd >> 16) as u16);
                    units.push(composite_and_fwd as u16);
                }
            } else {
                units.push(key1 | COMP_1_TRIPLE);
                units.push(key2 | (composite_and_fwd >> 16) as u16);
                units.push(composite_and_fwd as u16);
            }
        }
        if let Some(first_unit) = units.get_mut(last_start) {
            *first_unit |= COMP_1_LAST_TUPLE;
        }
        units
    }

    /// Build a mapping entry. Returns its units and the position of the first unit.
    fn mapping_entry(&self, norm: &Norm) -> Result<(Vec<u16>, usize)> {
        let mapping = norm.mapping.as_deref().unwrap_or(&[]);
        let units = to_utf16(mapping);
        if units.len() > usize::from(MAPPING_LENGTH_MASK) {
            return Err(DataError::Overflow("decomposition mapping is too long"));
        }
        let mut entry = Vec::new();
        let mut first_unit = units.len() as u16;
        if let Some(raw) = &norm.raw {
            let raw_units = to_utf16(raw);
            if raw_units.len() > usize::from(MAPPING_LENGTH_MASK) {
                return Err(DataError::Overflow("raw mapping is too long"));
            }
            entry.extend_from_slice(&raw_units);
            entry.push(raw_units.len() as u16);
            first_unit |= MAPPING_HAS_RAW_MAPPING;
        }
        let lead_cc = self.lead_cc(norm);
        if lead_cc != 0 || norm.cc != 0 {
            entry.push((u16::from(lead_cc) << 8) | u16::from(norm.cc));
            first_unit |= MAPPING_HAS_CCC_LCCC_WORD;
        }
        first_unit |= u16::from(self.trail_cc(norm)) << 8;
        let first = entry.len();
        entry.push(first_unit);
        entry.extend_from_slice(&units);
        Ok((entry, first))
    }

    fn section(&self, class: Class) -> impl Iterator<Item=(u32, &Norm)> + '_ {
        self.norms.iter()
            .filter(move |(_, norm)| norm.class == class)
            .map(|(&c, norm)| (c, norm))
    }

    fn assemble(&self) -> Result<NormData> {
        let mut writer = ExtraWriter::new();
        let mut values: Vec<(u32, u16)> = Vec::new();

        for (c, norm) in self.section(Class::YesYesCompositions) {
            let list = self.encode_compositions(&norm.compositions);
            let offset = writer.append(list, 0)?;
            values.push((c, (offset << 1) as u16));
        }
        let min_yes_no = writer.reserve()?;

        for (c, norm) in self.section(Class::YesNoCompositions) {
            let (mut entry, first) = self.mapping_entry(norm)?;
            entry.extend(self.encode_compositions(&norm.compositions));
            let offset = writer.append(entry, first)?;
            values.push((c, (offset << 1) as u16));
        }
        let min_yes_no_mappings_only = writer.reserve()?;

        let mapping_section = |class: Class, writer: &mut ExtraWriter,
                               values: &mut Vec<(u32, u16)>| -> Result<u16> {
            let start = writer.begin();
            for (c, norm) in self.section(class) {
                let (entry, first) = self.mapping_entry(norm)?;
                let offset = writer.append(entry, first)?;
                let boundary = if self.comp_boundary_after(c) { HAS_COMP_BOUNDARY_AFTER } else { 0 };
                values.push((c, (offset << 1) as u16 | boundary));
            }
            Ok(start)
        };
        mapping_section(Class::YesNoMappingsOnly, &mut writer, &mut values)?;
        let min_no_no = mapping_section(Class::NoNoCompYes, &mut writer, &mut values)?;
        let min_no_no_comp_boundary_before =
            mapping_section(Class::NoNoCompBoundaryBefore, &mut writer, &mut values)?;
        let min_no_no_comp_no_maybe_cc =
            mapping_section(Class::NoNoCompNoMaybeCc, &mut writer, &mut values)?;
        let min_no_no_empty = mapping_section(Class::NoNoEmpty, &mut writer, &mut values)?;
        let extra_limit = writer.threshold();

        let mut maybe_lists: Vec<u16> = Vec::new();
        let mut maybe_offsets = Vec::new();
        for (c, norm) in self.section(Class::MaybeYesCompositions) {
            maybe_offsets.push((c, maybe_lists.len()));
            maybe_lists.extend(self.encode_compositions(&norm.compositions));
        }
        while maybe_lists.len() % 4 != 0 {
            maybe_lists.push(0);
        }
        let algorithmic_room = ((2 * MAX_DELTA as usize + 1) << DELTA_SHIFT) + usize::from(extra_limit);
        if maybe_lists.len() * 2 + algorithmic_room > usize::from(MIN_NORMAL_MAYBE_YES) {
            return Err(DataError::Overflow("extra data does not fit into norm16 values"));
        }
        let min_maybe_yes = MIN_NORMAL_MAYBE_YES - (maybe_lists.len() * 2) as u16;
        let limit_no_no = min_maybe_yes - (((2 * MAX_DELTA + 1) as u16) << DELTA_SHIFT);
        for (c, offset) in maybe_offsets {
            values.push((c, min_maybe_yes + (offset << 1) as u16));
        }

        let mut indexes = NormIndexes {
            min_decomp_no_cp: HANGUL_BASE,
            min_comp_no_maybe_cp: JAMO_V_FIRST,
            min_lccc_cp: MAX_CODE_POINT + 1,
            min_yes_no,
            min_yes_no_mappings_only,
            min_no_no,
            min_no_no_comp_boundary_before,
            min_no_no_comp_no_maybe_cc,
            min_no_no_empty,
            limit_no_no,
            min_maybe_yes,
        };
        let center = i32::from(indexes.center_no_no_delta());

        let mut small_fcd = vec![0u8; SMALL_FCD_SIZE];
        for (&c, norm) in &self.norms {
            match norm.class {
                Class::YesYesWithCc => values.push((c, JAMO_VT | (u16::from(norm.cc) << 1))),
                Class::MaybeYes => {
                    values.push((c, MIN_NORMAL_MAYBE_YES | (u16::from(norm.cc) << 1)))
                }
                Class::Algorithmic(target) => {
                    let delta = target as i32 - c as i32;
                    let tccc = match self.trail_cc(norm) {
                        0 => DELTA_TCCC_0,
                        1 => DELTA_TCCC_1,
                        _ => DELTA_TCCC_GT_1,
                    };
                    let boundary = if self.comp_boundary_after(target) {
                        HAS_COMP_BOUNDARY_AFTER
                    } else {
                        0
                    };
                    values.push((c, (((center + delta) as u16) << DELTA_SHIFT) | tccc | boundary));
                }
                _ => {}
            }

            let decomp_yes = norm.mapping.is_none() && norm.cc == 0;
            if !decomp_yes {
                indexes.min_decomp_no_cp = indexes.min_decomp_no_cp.min(c);
            }
            let comp_yes = match norm.class {
                Class::Inert | Class::YesYesCompositions | Class::YesNoCompositions
                | Class::YesNoMappingsOnly => true,
                _ => false,
            };
            if !comp_yes {
                indexes.min_comp_no_maybe_cp = indexes.min_comp_no_maybe_cp.min(c);
            }
            let lead_cc = self.lead_cc(norm);
            if lead_cc != 0 {
                indexes.min_lccc_cp = indexes.min_lccc_cp.min(c);
            }
            if lead_cc != 0 || self.trail_cc(norm) != 0 {
                let unit = if c <= 0xFFFF { c } else { (c >> 10) + 0xD7C0 };
                small_fcd[(unit >> 8) as usize] |= 1 << ((unit >> 5) & 7);
            }
        }

        let mut trie = TrieBuilder::new(INERT, INERT);
        for (c, norm16) in values {
            trie.set(c, norm16);
        }
        trie.set_range(JAMO_L_FIRST, JAMO_L_LAST, JAMO_L);
        trie.set_range(JAMO_V_FIRST, JAMO_V_LAST, JAMO_VT);
        trie.set_range(JAMO_T_FIRST, JAMO_T_LAST, JAMO_VT);
        let mut syllable = HANGUL_BASE;
        while syllable < HANGUL_LIMIT {
            trie.set(syllable, indexes.hangul_lv());
            trie.set_range(syllable + 1, syllable + JAMO_T_COUNT - 1, indexes.hangul_lvt());
            syllable += JAMO_T_COUNT;
        }

        let mut extra = maybe_lists;
        extra.extend(writer.units);
        debug!("{:?}: {} units of extra data, min_maybe_yes {:#06x}",
               self.kind, extra.len(), min_maybe_yes);

        Ok(NormData {
            unicode_version: ucd::unicode_version(),
            indexes,
            trie: trie.build(),
            extra,
            small_fcd,
        })
    }
}

/// Appends entries to extra data, sharing identical ones.
struct ExtraWriter {
    units: Vec<u16>,
    shared: HashMap<(Vec<u16>, usize), usize>,
}

impl ExtraWriter {
    fn new() -> ExtraWriter {
        // Unit 0 is unused; units 1 and 2 are an empty composition list.
        let units = vec![0, COMP_1_LAST_TUPLE | COMP_1_TRAIL_MASK, 0];
        debug_assert_eq!(units[EMPTY_LIST_OFFSET], COMP_1_LAST_TUPLE | COMP_1_TRAIL_MASK);
        ExtraWriter { units, shared: HashMap::new() }
    }

    /// The norm16 value of the next entry.
    fn threshold(&self) -> u16 {
        (self.units.len() << 1) as u16
    }

    /// Start a new range. Entries are never shared across ranges.
    fn begin(&mut self) -> u16 {
        self.shared.clear();
        self.threshold()
    }

    /// Append an entry and return the offset of its unit at position `first`.
    fn append(&mut self, entry: Vec<u16>, first: usize) -> Result<usize> {
        let key = (entry, first);
        if let Some(&offset) = self.shared.get(&key) {
            return Ok(offset);
        }
        let offset = self.units.len() + first;
        self.units.extend_from_slice(&key.0);
        if self.units.len() > MAX_EXTRA_LENGTH {
            return Err(DataError::Overflow("too much extra data"));
        }
        self.shared.insert(key, offset);
        Ok(offset)
    }

    /// Reserve a unit for a Hangul threshold and return its norm16 value.
    fn reserve(&mut self) -> Result<u16> {
        let threshold = self.begin();
        self.units.push(0);
        if self.units.len() > MAX_EXTRA_LENGTH {
            return Err(DataError::Overflow("too much extra data"));
        }
        Ok(threshold)
    }
}
