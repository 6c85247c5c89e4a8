// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Greek uppercasing.
//!
//! Modern Greek drops accents in uppercase, with some exceptions:
//!
//! - the disjunctive "ή" ("or") keeps its tonos when it stands alone,
//! - a dialytika is kept, and added to an iota or upsilon which followed an accented vowel,
//!   so that uppercasing does not turn a split vowel pair into a diphthong,
//! - an iota subscript (ypogegrammeni) is written as a capital iota after its letter.
//!
//! See <https://icu.unicode.org/design/case/greek-upper> for the rules.

use libtext::{utf16, Sink};
use libunidata::case::{HAS_ACCENT, HAS_DIALYTIKA, HAS_VOWEL, HAS_YPOGEGRAMMENI, UPPER_MASK};

use crate::context::NoContext;
use crate::locale::CaseLocale;
use crate::options::Result;
use crate::output::Output;
use crate::props::{CaseProps, CaseType};

// Scanner state
const AFTER_CASED: u32 = 1;
const AFTER_VOWEL_WITH_ACCENT: u32 = 2;

// Diacritic flags on top of the letter data
const HAS_COMBINING_DIALYTIKA: u32 = 0x1_0000;
const HAS_OTHER_GREEK_DIACRITIC: u32 = 0x2_0000;

const HAS_EITHER_DIALYTIKA: u32 = HAS_DIALYTIKA as u32 | HAS_COMBINING_DIALYTIKA;
const HAS_VOWEL_AND_ACCENT: u32 = HAS_VOWEL as u32 | HAS_ACCENT as u32;
const HAS_VOWEL_AND_ACCENT_AND_DIALYTIKA: u32 = HAS_VOWEL_AND_ACCENT | HAS_DIALYTIKA as u32;

const CAPITAL_ETA: u32 = 0x0397;
const CAPITAL_ETA_WITH_TONOS: u32 = 0x0389;
const CAPITAL_IOTA: u32 = 0x0399;
const CAPITAL_UPSILON: u32 = 0x03A5;
const CAPITAL_IOTA_WITH_DIALYTIKA: u32 = 0x03AA;
const CAPITAL_UPSILON_WITH_DIALYTIKA: u32 = 0x03AB;
const COMBINING_DIALYTIKA: u16 = 0x0308;
const COMBINING_TONOS: u16 = 0x0301;

fn diacritic_data(unit: u16) -> u32 {
    match unit {
        // varia, tonos, perispomeni, and marks which look like perispomeni
        0x0300 | 0x0301 | 0x0342 | 0x0302 | 0x0303 | 0x0311 => HAS_ACCENT as u32,
        0x0308 => HAS_COMBINING_DIALYTIKA,
        // dialytika tonos
        0x0344 => HAS_COMBINING_DIALYTIKA | HAS_ACCENT as u32,
        0x0345 => HAS_YPOGEGRAMMENI as u32,
        // macron, breve, psili, dasia, koronis
        0x0304 | 0x0306 | 0x0313 | 0x0314 | 0x0343 => HAS_OTHER_GREEK_DIACRITIC,
        _ => 0,
    }
}

fn is_followed_by_cased_letter(props: &CaseProps, s: &[u16], mut index: usize) -> bool {
    while index < s.len() {
        let c = utf16::next_code_point(s, &mut index, s.len());
        match props.get_type_or_ignorable(c) {
            (_, true) => continue,
            (CaseType::None, false) => return false,
            _ => return true,
        }
    }
    false
}

pub(crate) fn to_upper<S: Sink + ?Sized>(props: &CaseProps, src: &[u16],
    out: &mut Output<'_, S>) -> Result<()>
{
    let mut replacement = Vec::new();
    let mut state = 0;
    let mut i = 0;
    while i < src.len() {
        let mut next = i;
        let c = utf16::next_code_point(src, &mut next, src.len());
        let mut next_state = 0;
        match props.get_type_or_ignorable(c) {
            (_, true) => next_state |= state & AFTER_CASED,
            (CaseType::None, false) => {}
            _ => next_state |= AFTER_CASED,
        }

        let letter = u32::from(props.greek_data(c));
        if letter == 0 {
            let result = props.to_full_upper(c, &mut NoContext, CaseLocale::Greek);
            out.append_result(result, &src[i..next])?;
            i = next;
            state = next_state;
            continue;
        }

        let mut data = letter;
        let mut upper = data & u32::from(UPPER_MASK);
        if data & u32::from(HAS_VOWEL) != 0 && state & AFTER_VOWEL_WITH_ACCENT != 0
            && (upper == CAPITAL_IOTA || upper == CAPITAL_UPSILON)
        {
            data |= u32::from(HAS_DIALYTIKA);
        }
        let mut ypogegrammeni = if data & u32::from(HAS_YPOGEGRAMMENI) != 0 { 1 } else { 0 };
        let letter_end = next;
        while let Some(&unit) = src.get(next) {
            let diacritic = diacritic_data(unit);
            if diacritic == 0 {
                break;
            }
            data |= diacritic;
            if diacritic & u32::from(HAS_YPOGEGRAMMENI) != 0 {
                ypogegrammeni += 1;
            }
            next += 1;
        }
        if data & HAS_VOWEL_AND_ACCENT_AND_DIALYTIKA == HAS_VOWEL_AND_ACCENT {
            next_state |= AFTER_VOWEL_WITH_ACCENT;
        }

        let mut add_tonos = false;
        if upper == CAPITAL_ETA && data & u32::from(HAS_ACCENT) != 0 && ypogegrammeni == 0
            && state & AFTER_CASED == 0 && !is_followed_by_cased_letter(props, src, next)
        {
            // Disjunctive "or" keeps its accent.
            if letter & u32::from(HAS_ACCENT) != 0 && next == letter_end {
                upper = CAPITAL_ETA_WITH_TONOS;
            } else {
                add_tonos = true;
            }
        } else if data & u32::from(HAS_DIALYTIKA) != 0 {
            if upper == CAPITAL_IOTA {
                upper = CAPITAL_IOTA_WITH_DIALYTIKA;
                data &= !HAS_EITHER_DIALYTIKA;
            } else if upper == CAPITAL_UPSILON {
                upper = CAPITAL_UPSILON_WITH_DIALYTIKA;
                data &= !HAS_EITHER_DIALYTIKA;
            }
        }

        replacement.clear();
        replacement.push(upper as u16);
        if data & HAS_EITHER_DIALYTIKA != 0 {
            replacement.push(COMBINING_DIALYTIKA);
        }
        if add_tonos {
            replacement.push(COMBINING_TONOS);
        }
        for _ in 0..ypogegrammeni {
            replacement.push(CAPITAL_IOTA as u16);
        }

        let source = &src[i..next];
        if replacement[..] == *source {
            out.append_unchanged(source)?;
        } else {
            out.append_replacement(source.len(), &replacement)?;
        }
        i = next;
        state = next_state;
    }
    Ok(())
}
