// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Unicode case mapping.
//!
//! This crate implements full case mapping of UTF-16 text as described in chapter 3.13 of
//! the Unicode Standard, including the language-specific rules of SpecialCasing.txt:
//!
//! - `CaseProps` answers per-code point questions: case type, simple and full mappings,
//!   case closure;
//! - `CaseMap` maps whole strings to lowercase, uppercase, titlecase, or case folded form,
//!   optionally recording the changes in an `Edits` ledger.
//!
//! Turkish, Azerbaijani, Lithuanian, Greek, Dutch, and Armenian have their own rules. The
//! language is given as a `CaseLocale`.

mod casemap;
mod context;
mod greek;
mod latin;
mod locale;
mod options;
mod output;
mod props;
mod title;

pub use crate::casemap::CaseMap;
pub use crate::context::{ContextIterator, Direction, NoContext, StringContextIterator};
pub use crate::locale::CaseLocale;
pub use crate::options::{CaseMapError, CaseOptions, Result};
pub use crate::props::{CaseClosure, CaseMapping, CaseProperty, CaseProps, CaseType, DotType};
pub use crate::title::{title_break_iterator, BreakIterator, SentenceBreakIterator,
                       WholeStringBreakIterator, WordBreakIterator};
