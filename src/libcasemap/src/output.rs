// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Output of case mapping with optional change tracking.

use libtext::{utf16, Edits, Sink};

use crate::options::{CaseOptions, Result};
use crate::props::CaseMapping;

pub(crate) struct Output<'o, S: Sink + ?Sized> {
    sink: &'o mut S,
    edits: Option<&'o mut Edits>,
    omit_unchanged: bool,
}

impl<'o, S: Sink + ?Sized> Output<'o, S> {
    pub fn new(sink: &'o mut S, mut edits: Option<&'o mut Edits>, options: CaseOptions)
        -> Output<'o, S>
    {
        if !options.contains(CaseOptions::EDITS_NO_RESET) {
            if let Some(edits) = edits.as_mut() {
                edits.reset();
            }
        }
        Output {
            sink,
            edits,
            omit_unchanged: options.contains(CaseOptions::OMIT_UNCHANGED_TEXT),
        }
    }

    /// Copy source text which the mapping leaves as is.
    pub fn append_unchanged(&mut self, s: &[u16]) -> Result<()> {
        if s.is_empty() {
            return Ok(());
        }
        if !self.omit_unchanged {
            self.sink.push_units(s)?;
        }
        if let Some(edits) = self.edits.as_mut() {
            edits.add_unchanged(s.len());
        }
        Ok(())
    }

    /// Write the new text replacing `old_length` source units.
    ///
    /// The change is recorded only once the sink has accepted the text.
    pub fn append_replacement(&mut self, old_length: usize, units: &[u16]) -> Result<()> {
        self.sink.push_units(units)?;
        if let Some(edits) = self.edits.as_mut() {
            edits.add_replace(old_length, units.len());
        }
        Ok(())
    }

    pub fn append_code_point(&mut self, old_length: usize, c: u32) -> Result<()> {
        self.sink.push_code_point(c)?;
        if let Some(edits) = self.edits.as_mut() {
            edits.add_replace(old_length, utf16::char_len(c));
        }
        Ok(())
    }

    /// Write the result of a full case mapping of the code point `source`.
    pub fn append_result(&mut self, result: CaseMapping<'_>, source: &[u16]) -> Result<()> {
        match result {
            CaseMapping::Unchanged => self.append_unchanged(source),
            CaseMapping::CodePoint(c) => self.append_code_point(source.len(), c),
            CaseMapping::String(s) => self.append_replacement(source.len(), s),
        }
    }
}
