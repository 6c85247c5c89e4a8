// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Unicode property data.
//!
//! This crate owns the binary tables consumed by the normalization and case mapping engines:
//!
//! - `NormData`: per-code-point normalization properties for one normalization form family
//!   (canonical, compatibility, or compatibility with case folding),
//! - `CaseData`: per-code-point case properties with exception records, the reverse case
//!   folding table, and the Greek uppercasing table.
//!
//! Tables are produced by `build()` from the Unicode Character Database as shipped with the
//! `unicode-normalization`, `caseless`, and `icu_properties` crates, and can be serialized
//! into a compact little-endian image and loaded back with `from_bytes()`. Loading validates
//! every offset stored in the data, so that the engines never index out of bounds even when
//! handed a corrupted image.

pub mod case;
pub mod norm;
pub mod ucd;

mod binary;
mod case_builder;
mod norm_builder;

pub use crate::case::CaseData;
pub use crate::norm::{NormData, NormIndexes, NormKind};

use libtrie::TrieError;
use thiserror::Error;

/// Errors detected while building or loading property data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("unexpected data format {found:?}, expected {expected:?}")]
    BadMagic { expected: [u8; 4], found: [u8; 4] },
    #[error("unsupported data format version {found}")]
    UnsupportedVersion { found: u8 },
    #[error("data image is truncated: {0}")]
    Truncated(&'static str),
    #[error("malformed data: {0}")]
    Malformed(&'static str),
    #[error(transparent)]
    Trie(#[from] TrieError),
    #[error("table does not fit the data format: {0}")]
    Overflow(&'static str),
}

pub type Result<T> = std::result::Result<T, DataError>;
