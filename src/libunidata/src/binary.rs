// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Common framing of data images.
//!
//! Every image starts with a 12-byte header: four magic bytes identifying the table kind,
//! four format version bytes (only the first one is significant), and the Unicode version
//! the data was generated from (major, minor, update, padding).

use libtrie::ByteReader;

use crate::{DataError, Result};

pub(crate) const FORMAT_VERSION: u8 = 4;

pub(crate) const HEADER_SIZE: usize = 12;

pub(crate) fn write_header(out: &mut Vec<u8>, magic: [u8; 4], unicode_version: [u8; 3]) {
    out.extend_from_slice(&magic);
    out.extend_from_slice(&[FORMAT_VERSION, 0, 0, 0]);
    out.extend_from_slice(&unicode_version);
    out.push(0);
}

/// Check the header and return the Unicode version recorded in it.
pub(crate) fn read_header(reader: &mut ByteReader<'_>, magic: [u8; 4]) -> Result<[u8; 3]> {
    if reader.remaining() < HEADER_SIZE {
        return Err(DataError::Truncated("header"));
    }
    let mut found = [0; 4];
    found.copy_from_slice(reader.take(4)?);
    if found != magic {
        return Err(DataError::BadMagic { expected: magic, found });
    }
    let version = reader.take(4)?;
    if version[0] != FORMAT_VERSION {
        return Err(DataError::UnsupportedVersion { found: version[0] });
    }
    let unicode = reader.take(4)?;
    Ok([unicode[0], unicode[1], unicode[2]])
}

pub(crate) fn write_u16s(out: &mut Vec<u8>, units: &[u16]) {
    for &unit in units {
        out.extend_from_slice(&unit.to_le_bytes());
    }
}

pub(crate) fn write_u32s(out: &mut Vec<u8>, words: &[u32]) {
    for &word in words {
        out.extend_from_slice(&word.to_le_bytes());
    }
}

/// Read a section of 16-bit units spanning the byte range `[start, limit)` of the image.
pub(crate) fn read_u16_section(reader: &mut ByteReader<'_>, start: usize, limit: usize,
    what: &'static str) -> Result<Vec<u16>>
{
    if reader.position() != start || limit < start || (limit - start) % 2 != 0 {
        return Err(DataError::Malformed(what));
    }
    if limit - start > reader.remaining() {
        return Err(DataError::Truncated(what));
    }
    Ok(reader.read_u16_vec((limit - start) / 2)?)
}
