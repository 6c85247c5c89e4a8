// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Text plumbing.
//!
//! This crate contains the pieces shared by the normalization and case mapping engines:
//! UTF-16 code unit helpers, output sinks, and the edits ledger which records how an output
//! string relates to its source.

pub mod edits;
pub mod sink;
pub mod utf16;

pub use crate::edits::Edits;
pub use crate::sink::{BoundedSink, FmtSink, Sink, SinkError};
