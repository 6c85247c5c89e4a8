// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Output sinks.
//!
//! Text transformations stream their output into a `Sink`. The common sink is a plain
//! `Vec<u16>` which also exposes itself through `direct_buffer()`, allowing the normalizer
//! to work in place instead of going through an intermediate buffer. Other sinks may refuse
//! output, in which case the error is propagated to the caller of the transformation and
//! the sink is left holding whatever prefix was already accepted.

use std::fmt;

use thiserror::Error;

use crate::utf16;

/// Failure to accept output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    #[error("output capacity of {capacity} code units exceeded")]
    Overflow { capacity: usize },
    #[error("formatter rejected the output")]
    Fmt(#[from] fmt::Error),
}

/// A destination for UTF-16 text.
pub trait Sink {
    /// Append one code unit.
    fn push_unit(&mut self, unit: u16) -> Result<(), SinkError>;

    /// Append a run of code units.
    fn push_units(&mut self, units: &[u16]) -> Result<(), SinkError> {
        for &unit in units {
            self.push_unit(unit)?;
        }
        Ok(())
    }

    /// Append a code point, encoding it as one or two code units.
    fn push_code_point(&mut self, c: u32) -> Result<(), SinkError> {
        if c <= 0xFFFF {
            self.push_unit(c as u16)
        } else {
            self.push_units(&[utf16::lead(c), utf16::trail(c)])
        }
    }

    /// Access the underlying growable buffer, if the sink is one.
    ///
    /// Writers may append to the returned buffer directly and may also modify code units
    /// they have appended themselves, but they must not touch the content that was there
    /// before they started.
    fn direct_buffer(&mut self) -> Option<&mut Vec<u16>> {
        None
    }
}

impl Sink for Vec<u16> {
    fn push_unit(&mut self, unit: u16) -> Result<(), SinkError> {
        self.push(unit);
        Ok(())
    }

    fn push_units(&mut self, units: &[u16]) -> Result<(), SinkError> {
        self.extend_from_slice(units);
        Ok(())
    }

    fn direct_buffer(&mut self) -> Option<&mut Vec<u16>> {
        Some(self)
    }
}

impl<'a, S: Sink + ?Sized> Sink for &'a mut S {
    fn push_unit(&mut self, unit: u16) -> Result<(), SinkError> {
        (**self).push_unit(unit)
    }

    fn push_units(&mut self, units: &[u16]) -> Result<(), SinkError> {
        (**self).push_units(units)
    }

    fn push_code_point(&mut self, c: u32) -> Result<(), SinkError> {
        (**self).push_code_point(c)
    }

    fn direct_buffer(&mut self) -> Option<&mut Vec<u16>> {
        (**self).direct_buffer()
    }
}

//
// Bounded sink
//

/// A sink with a fixed capacity.
///
/// Output that does not fit is rejected with `SinkError::Overflow`. A run of code units is
/// accepted either completely or not at all.
#[derive(Debug, Clone, Default)]
pub struct BoundedSink {
    units: Vec<u16>,
    capacity: usize,
}

impl BoundedSink {
    pub fn new(capacity: usize) -> BoundedSink {
        BoundedSink { units: Vec::with_capacity(capacity), capacity }
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.units
    }

    pub fn into_inner(self) -> Vec<u16> {
        self.units
    }

    fn check(&self, additional: usize) -> Result<(), SinkError> {
        if self.units.len() + additional > self.capacity {
            return Err(SinkError::Overflow { capacity: self.capacity });
        }
        Ok(())
    }
}

impl Sink for BoundedSink {
    fn push_unit(&mut self, unit: u16) -> Result<(), SinkError> {
        self.check(1)?;
        self.units.push(unit);
        Ok(())
    }

    fn push_units(&mut self, units: &[u16]) -> Result<(), SinkError> {
        self.check(units.len())?;
        self.units.extend_from_slice(units);
        Ok(())
    }
}

//
// Formatting sink
//

/// Adapter writing UTF-16 output into any `fmt::Write`, such as a `String`.
///
/// Surrogate pairs split across calls are joined back. Unpaired surrogates cannot be
/// represented in Rust strings and are written as U+FFFD REPLACEMENT CHARACTER.
pub struct FmtSink<W> {
    writer: W,
    pending_lead: Option<u16>,
}

impl<W: fmt::Write> FmtSink<W> {
    pub fn new(writer: W) -> FmtSink<W> {
        FmtSink { writer, pending_lead: None }
    }

    /// Flush a dangling lead surrogate and return the writer.
    pub fn finish(mut self) -> Result<W, SinkError> {
        if self.pending_lead.take().is_some() {
            self.writer.write_char(char::REPLACEMENT_CHARACTER)?;
        }
        Ok(self.writer)
    }
}

impl<W: fmt::Write> Sink for FmtSink<W> {
    fn push_unit(&mut self, unit: u16) -> Result<(), SinkError> {
        let u = u32::from(unit);
        if let Some(lead) = self.pending_lead.take() {
            if utf16::is_trail(u) {
                let c = utf16::supplementary(u32::from(lead), u);
                self.writer.write_char(std::char::from_u32(c).unwrap_or(char::REPLACEMENT_CHARACTER))?;
                return Ok(());
            }
            self.writer.write_char(char::REPLACEMENT_CHARACTER)?;
        }
        if utf16::is_lead(u) {
            self.pending_lead = Some(unit);
            return Ok(());
        }
        self.writer.write_char(std::char::from_u32(u).unwrap_or(char::REPLACEMENT_CHARACTER))?;
        Ok(())
    }
}
