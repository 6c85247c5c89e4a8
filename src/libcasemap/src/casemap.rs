// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Case mapping of strings.

use libtext::{utf16, Edits, Sink};
use libunidata::ucd::{general_category, GeneralCategory, GeneralCategoryGroup};

use crate::context::StringContextIterator;
use crate::greek;
use crate::latin::{EXC, LIMIT};
use crate::locale::CaseLocale;
use crate::options::{CaseOptions, Result};
use crate::output::Output;
use crate::props::{CaseMapping, CaseProps, CaseType};
use crate::title::{self, BreakIterator};

/// Strings up to this length are mapped into a list of changes which is then merged with
/// the source, instead of being copied in full.
const SHORT_STRING_LENGTH: usize = 100;

const COMBINING_ACUTE: u16 = 0x0301;

/// Case mapping in one language with fixed options.
#[derive(Clone, Copy, Debug)]
pub struct CaseMap<'p> {
    props: &'p CaseProps,
    locale: CaseLocale,
    options: CaseOptions,
}

impl CaseMap<'static> {
    /// Case mapping with the process-wide case properties.
    ///
    /// # Panics
    ///
    /// See `CaseProps::instance()`.
    pub fn new(locale: CaseLocale, options: CaseOptions) -> CaseMap<'static> {
        CaseMap::with_props(CaseProps::instance(), locale, options)
    }

    pub fn for_language_tag(tag: &str, options: CaseOptions) -> CaseMap<'static> {
        CaseMap::new(CaseLocale::from_language_tag(tag), options)
    }
}

impl<'p> CaseMap<'p> {
    pub fn with_props(props: &'p CaseProps, locale: CaseLocale, options: CaseOptions)
        -> CaseMap<'p>
    {
        CaseMap { props, locale, options }
    }

    pub fn locale(&self) -> CaseLocale {
        self.locale
    }

    pub fn options(&self) -> CaseOptions {
        self.options
    }

    //
    // Streaming forms
    //

    /// Lowercase `src` into `sink`, recording the changes in `edits` if given.
    pub fn to_lower_to<S: Sink + ?Sized>(&self, src: &[u16], sink: &mut S,
        edits: Option<&mut Edits>) -> Result<()>
    {
        let mut out = Output::new(sink, edits, self.options);
        let mut context = StringContextIterator::new(src);
        self.lower(src, 0, src.len(), &mut context, false, &mut out)
    }

    /// Uppercase `src` into `sink`, recording the changes in `edits` if given.
    pub fn to_upper_to<S: Sink + ?Sized>(&self, src: &[u16], sink: &mut S,
        edits: Option<&mut Edits>) -> Result<()>
    {
        let mut out = Output::new(sink, edits, self.options);
        if self.locale == CaseLocale::Greek {
            greek::to_upper(self.props, src, &mut out)
        } else {
            self.upper(src, &mut out)
        }
    }

    /// Titlecase `src` into `sink`, recording the changes in `edits` if given.
    ///
    /// Segments come from `iter` if given, or else from the break iterator selected by the
    /// options. Conflicting options are rejected before any output is written.
    pub fn to_title_to<S: Sink + ?Sized>(&self, src: &[u16], iter: Option<&mut dyn BreakIterator>,
        sink: &mut S, edits: Option<&mut Edits>) -> Result<()>
    {
        let mut iter = title::title_break_iterator(self.options, iter)?;
        let mut out = Output::new(sink, edits, self.options);
        self.title(src, &mut *iter, &mut out)
    }

    /// Case fold `src` into `sink`, recording the changes in `edits` if given.
    pub fn fold_to<S: Sink + ?Sized>(&self, src: &[u16], sink: &mut S,
        edits: Option<&mut Edits>) -> Result<()>
    {
        let mut out = Output::new(sink, edits, self.options);
        let mut context = StringContextIterator::new(src);
        self.lower(src, 0, src.len(), &mut context, true, &mut out)
    }

    //
    // Convenience forms
    //

    pub fn to_lower(&self, src: &[u16]) -> Result<Vec<u16>> {
        self.map_string(src, |map, sink, edits| map.to_lower_to(src, sink, edits))
    }

    pub fn to_upper(&self, src: &[u16]) -> Result<Vec<u16>> {
        self.map_string(src, |map, sink, edits| map.to_upper_to(src, sink, edits))
    }

    pub fn to_title(&self, src: &[u16], iter: Option<&mut dyn BreakIterator>)
        -> Result<Vec<u16>>
    {
        self.map_string(src, move |map, sink, edits| map.to_title_to(src, iter, sink, edits))
    }

    pub fn fold(&self, src: &[u16]) -> Result<Vec<u16>> {
        self.map_string(src, |map, sink, edits| map.fold_to(src, sink, edits))
    }

    fn map_string<F>(&self, src: &[u16], map: F) -> Result<Vec<u16>>
        where F: FnOnce(&CaseMap<'p>, &mut Vec<u16>, Option<&mut Edits>) -> Result<()>
    {
        if src.len() <= SHORT_STRING_LENGTH
            && !self.options.contains(CaseOptions::OMIT_UNCHANGED_TEXT)
        {
            let omitting = CaseMap {
                options: (self.options | CaseOptions::OMIT_UNCHANGED_TEXT)
                    - CaseOptions::EDITS_NO_RESET,
                ..*self
            };
            let mut replacements = Vec::new();
            let mut edits = Edits::new();
            map(&omitting, &mut replacements, Some(&mut edits))?;
            return Ok(edits.apply(src, &replacements));
        }
        let mut result = Vec::with_capacity(src.len());
        map(self, &mut result, None)?;
        Ok(result)
    }

    //
    // Mapping loops
    //

    fn lower_table(&self, folding: bool) -> &'p [i8; LIMIT] {
        let latin = self.props.latin();
        let special = if folding {
            self.options.is_turkic_fold()
        } else {
            self.locale == CaseLocale::Turkish || self.locale == CaseLocale::Lithuanian
        };
        if special { &latin.to_lower_tr_lt } else { &latin.to_lower_normal }
    }

    /// Lowercase or fold `src[start..limit]`. Context conditions see the whole string.
    fn lower<S: Sink + ?Sized>(&self, src: &[u16], start: usize, limit: usize,
        context: &mut StringContextIterator<'_>, folding: bool, out: &mut Output<'_, S>)
        -> Result<()>
    {
        let table = self.lower_table(folding);
        let mut prev = start;
        let mut index = start;
        while index < limit {
            let unit = src[index];
            let fast = if usize::from(unit) < LIMIT {
                let delta = table[usize::from(unit)];
                if delta == EXC { None } else { Some(i32::from(delta)) }
            } else if unit < 0xD800 {
                self.props.bmp_lower_delta(u32::from(unit))
            } else {
                None
            };
            if let Some(delta) = fast {
                index += 1;
                if delta != 0 {
                    out.append_unchanged(&src[prev..index - 1])?;
                    out.append_code_point(1, (i32::from(unit) + delta) as u32)?;
                    prev = index;
                }
                continue;
            }

            let cp_start = index;
            let c = utf16::next_code_point(src, &mut index, limit);
            out.append_unchanged(&src[prev..cp_start])?;
            let result = if folding {
                self.props.to_full_folding(c, self.options)
            } else {
                context.set_cp_start_and_limit(cp_start, index);
                self.props.to_full_lower(c, &mut *context, self.locale)
            };
            out.append_result(result, &src[cp_start..index])?;
            prev = index;
        }
        out.append_unchanged(&src[prev..limit])
    }

    fn upper<S: Sink + ?Sized>(&self, src: &[u16], out: &mut Output<'_, S>) -> Result<()> {
        let latin = self.props.latin();
        let table = if self.locale == CaseLocale::Turkish {
            &latin.to_upper_tr
        } else {
            &latin.to_upper_normal
        };
        let mut context = StringContextIterator::new(src);
        let mut prev = 0;
        let mut index = 0;
        while index < src.len() {
            let unit = src[index];
            let fast = if usize::from(unit) < LIMIT {
                let delta = table[usize::from(unit)];
                if delta == EXC { None } else { Some(i32::from(delta)) }
            } else if unit < 0xD800 {
                self.props.bmp_upper_delta(u32::from(unit))
            } else {
                None
            };
            if let Some(delta) = fast {
                index += 1;
                if delta != 0 {
                    out.append_unchanged(&src[prev..index - 1])?;
                    out.append_code_point(1, (i32::from(unit) + delta) as u32)?;
                    prev = index;
                }
                continue;
            }

            let cp_start = index;
            let c = utf16::next_code_point(src, &mut index, src.len());
            out.append_unchanged(&src[prev..cp_start])?;
            context.set_cp_start_and_limit(cp_start, index);
            let result = self.props.to_full_upper(c, &mut context, self.locale);
            out.append_result(result, &src[cp_start..index])?;
            prev = index;
        }
        out.append_unchanged(&src[prev..])
    }

    fn title<S: Sink + ?Sized>(&self, src: &[u16], iter: &mut dyn BreakIterator,
        out: &mut Output<'_, S>) -> Result<()>
    {
        iter.set_text(src);
        let mut context = StringContextIterator::new(src);
        let mut prev = 0;
        let mut first = true;
        while prev < src.len() {
            let index = if first {
                first = false;
                iter.first()
            } else {
                iter.next().unwrap_or(src.len())
            };
            let index = index.min(src.len());
            if index <= prev {
                continue;
            }
            self.title_segment(src, prev, index, &mut context, out)?;
            prev = index;
        }
        Ok(())
    }

    /// Titlecase the first suitable character of `src[start..limit]` and lowercase the rest.
    fn title_segment<S: Sink + ?Sized>(&self, src: &[u16], start: usize, limit: usize,
        context: &mut StringContextIterator<'_>, out: &mut Output<'_, S>) -> Result<()>
    {
        let mut title_start = start;
        let mut title_limit = start;
        let mut c = utf16::next_code_point(src, &mut title_limit, limit);
        if !self.options.contains(CaseOptions::TITLECASE_NO_BREAK_ADJUSTMENT) {
            // Skip to the first cased character, or letter, number, symbol, private use.
            // Stop with title_start == title_limit == limit if there is none.
            let to_cased = self.options.contains(CaseOptions::TITLECASE_ADJUST_TO_CASED);
            loop {
                let suitable = if to_cased {
                    self.props.get_type(c) != CaseType::None
                } else {
                    self.is_lns(c)
                };
                if suitable {
                    break;
                }
                title_start = title_limit;
                if title_limit == limit {
                    break;
                }
                c = utf16::next_code_point(src, &mut title_limit, limit);
            }
            out.append_unchanged(&src[start..title_start])?;
        }
        if title_start == title_limit {
            return Ok(());
        }

        context.set_cp_start_and_limit(title_start, title_limit);
        let result = self.props.to_full_title(c, &mut *context, self.locale);
        out.append_result(result, &src[title_start..title_limit])?;

        if self.locale == CaseLocale::Dutch && title_start + 1 < limit {
            let titled = match result {
                CaseMapping::Unchanged => Some(c),
                CaseMapping::CodePoint(mapped) => Some(mapped),
                CaseMapping::String(_) => None,
            };
            if let Some(titled) = titled.filter(|&t| t == 0x0049 || t == 0x00CD) {
                title_limit = self.maybe_title_dutch_ij(src, titled, title_start + 1, limit, out)?;
            }
        }

        if title_limit < limit {
            if self.options.contains(CaseOptions::TITLECASE_NO_LOWERCASE) {
                out.append_unchanged(&src[title_limit..limit])?;
            } else {
                self.lower(src, title_limit, limit, context, false, out)?;
            }
        }
        Ok(())
    }

    /// Letter, number, symbol, private use, or a cased modifier letter.
    fn is_lns(&self, c: u32) -> bool {
        let gc = general_category(c);
        if gc == GeneralCategory::ModifierLetter {
            return self.props.get_type(c) != CaseType::None;
        }
        GeneralCategoryGroup::Letter.contains(gc)
            || GeneralCategoryGroup::Number.contains(gc)
            || GeneralCategoryGroup::Symbol.contains(gc)
            || gc == GeneralCategory::PrivateUse
    }

    /// Titlecase the J of a Dutch IJ digraph whose I (or Í) has just been titlecased as
    /// `c`. The digraph starts at `start` right after the I. Returns the index up to which
    /// the segment has been written.
    ///
    /// I is followed by j or J, Í is followed by j or J with a combining acute (an I with a
    /// combining acute counts as Í). No other combining mark may follow the digraph.
    fn maybe_title_dutch_ij<S: Sink + ?Sized>(&self, src: &[u16], c: u32, start: usize,
        limit: usize, out: &mut Output<'_, S>) -> Result<usize>
    {
        let mut index = start;
        let mut with_acute = false;
        // Units written as is before the j, and after it.
        let mut unchanged_before = 0;
        let mut unchanged_after = 0;
        let mut title_j = false;

        let mut c2 = src[index];
        index += 1;
        if c == 0x0049 {
            if c2 == COMBINING_ACUTE {
                with_acute = true;
                unchanged_before = 1;
                if index == limit {
                    return Ok(start);
                }
                c2 = src[index];
                index += 1;
            }
        } else {
            with_acute = true;
        }

        match c2 {
            0x006A => title_j = true,
            0x004A => unchanged_before += 1,
            _ => return Ok(start),
        }

        if with_acute {
            if index == limit || src[index] != COMBINING_ACUTE {
                return Ok(start);
            }
            index += 1;
            if title_j {
                unchanged_after = 1;
            } else {
                unchanged_before += 1;
            }
        }

        if index < limit {
            let mut next = index;
            let following = utf16::next_code_point(src, &mut next, limit);
            if GeneralCategoryGroup::Mark.contains(general_category(following)) {
                return Ok(start);
            }
        }

        let mut position = start;
        out.append_unchanged(&src[position..position + unchanged_before])?;
        position += unchanged_before;
        if title_j {
            out.append_code_point(1, 0x004A)?;
            position += 1;
        }
        out.append_unchanged(&src[position..position + unchanged_after])?;
        Ok(index)
    }
}
