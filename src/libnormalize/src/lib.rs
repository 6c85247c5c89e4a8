// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Unicode normalization.
//!
//! This crate implements the normalization forms of [UAX #15] on UTF-16 text, driven by the
//! compact normalization data of `libunidata`:
//!
//! - `NormalizerImpl` decodes the per-code point norm16 values and implements the
//!   decompose, compose and make-FCD state machines;
//! - `ReorderingBuffer` collects their output while keeping combining marks in canonical
//!   order;
//! - `Normalizer2` exposes the standard forms (NFC, NFD, NFKC, NFKD, NFKC_Casefold, FCD,
//!   FCC) on top of them.
//!
//! [UAX #15]: https://www.unicode.org/reports/tr15/

mod canon;
mod compose;
mod decompose;
mod fcd;
pub mod hangul;
mod normalizer2;
mod normalizer_impl;
mod reordering_buffer;

pub use crate::normalizer2::{Mode, Normalizer2, QuickCheck};
pub use crate::normalizer_impl::NormalizerImpl;
pub use crate::reordering_buffer::ReorderingBuffer;
