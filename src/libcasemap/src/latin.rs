// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Latin fast path tables.
//!
//! For code units below `LIMIT` the case mapping loops look up a signed delta in a small
//! table instead of decoding the props. `EXC` marks code units which need the full lookup:
//! string mappings, deltas too large for a byte, language-dependent characters, and
//! characters whose lowercase and case folding differ (like µ and ſ), since lowercasing and
//! case folding share the lower tables.

use crate::context::NoContext;
use crate::locale::CaseLocale;
use crate::options::CaseOptions;
use crate::props::{CaseMapping, CaseProps};

/// First code unit not covered by the tables.
pub const LIMIT: usize = 0x180;

/// Table entry of code units which take the slow path.
pub const EXC: i8 = i8::MIN;

#[derive(Clone)]
pub struct LatinCase {
    pub to_lower_normal: [i8; LIMIT],
    /// Lowercasing in Turkish and Lithuanian, and Turkic case folding.
    pub to_lower_tr_lt: [i8; LIMIT],
    pub to_upper_normal: [i8; LIMIT],
    pub to_upper_tr: [i8; LIMIT],
}

impl std::fmt::Debug for LatinCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LatinCase").finish()
    }
}

fn delta_entry(c: u32, mapping: CaseMapping<'_>) -> i8 {
    match mapping {
        CaseMapping::Unchanged => 0,
        CaseMapping::CodePoint(mapped) => {
            let delta = mapped as i32 - c as i32;
            if delta > i32::from(EXC) && delta <= i32::from(i8::MAX) {
                delta as i8
            } else {
                EXC
            }
        }
        CaseMapping::String(_) => EXC,
    }
}

impl LatinCase {
    /// Tables which send everything to the slow path.
    pub fn exceptions_only() -> LatinCase {
        LatinCase {
            to_lower_normal: [EXC; LIMIT],
            to_lower_tr_lt: [EXC; LIMIT],
            to_upper_normal: [EXC; LIMIT],
            to_upper_tr: [EXC; LIMIT],
        }
    }

    pub fn build(props: &CaseProps) -> LatinCase {
        let mut latin = LatinCase::exceptions_only();
        for i in 0..LIMIT {
            let c = i as u32;
            let lower = delta_entry(c, props.to_full_lower(c, &mut NoContext, CaseLocale::Root));
            let fold = delta_entry(c, props.to_full_folding(c, CaseOptions::empty()));
            let turkic_fold = delta_entry(c,
                props.to_full_folding(c, CaseOptions::FOLD_CASE_EXCLUDE_SPECIAL_I));
            let upper = delta_entry(c, props.to_full_upper(c, &mut NoContext, CaseLocale::Root));
            let conditional = props.is_conditional(c);

            latin.to_lower_normal[i] = if lower == fold { lower } else { EXC };
            latin.to_lower_tr_lt[i] =
                if conditional || lower != turkic_fold { EXC } else { lower };
            latin.to_upper_normal[i] = upper;
            latin.to_upper_tr[i] = if conditional { EXC } else { upper };
        }
        latin
    }
}
