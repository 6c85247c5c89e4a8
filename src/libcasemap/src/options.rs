// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Case mapping options and errors.

use bitflags::bitflags;
use libtext::SinkError;
use thiserror::Error;

bitflags! {
    /// Options of case mapping operations.
    ///
    /// Bit values are compatible with ICU.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct CaseOptions: u32 {
        /// Fold with the Turkic mappings for I and dotted I (the "T" mappings of
        /// CaseFolding.txt) instead of the default ones.
        const FOLD_CASE_EXCLUDE_SPECIAL_I = 0x1;
        /// Titlecase the string as a whole rather than word by word.
        const TITLECASE_WHOLE_STRING = 0x20;
        /// Titlecase each sentence rather than each word.
        const TITLECASE_SENTENCES = 0x40;
        /// Do not lowercase the rest of a word after titlecasing its first character.
        const TITLECASE_NO_LOWERCASE = 0x100;
        /// Titlecase the first character of a segment as is, even if it is uncased.
        const TITLECASE_NO_BREAK_ADJUSTMENT = 0x200;
        /// Skip to the first cased character of a segment before titlecasing, instead of
        /// the first letter, number, symbol, or private use character.
        const TITLECASE_ADJUST_TO_CASED = 0x400;
        /// Add to the edits instead of resetting them first.
        const EDITS_NO_RESET = 0x2000;
        /// Do not write unchanged text to the output. Useful together with edits.
        const OMIT_UNCHANGED_TEXT = 0x4000;
    }
}

impl CaseOptions {
    pub(crate) const TITLECASE_ITERATOR_MASK: CaseOptions = CaseOptions::TITLECASE_WHOLE_STRING
        .union(CaseOptions::TITLECASE_SENTENCES);
    pub(crate) const TITLECASE_ADJUSTMENT_MASK: CaseOptions =
        CaseOptions::TITLECASE_NO_BREAK_ADJUSTMENT.union(CaseOptions::TITLECASE_ADJUST_TO_CASED);

    /// Whether folding uses the Turkic mappings.
    pub fn is_turkic_fold(self) -> bool {
        self.contains(CaseOptions::FOLD_CASE_EXCLUDE_SPECIAL_I)
    }
}

/// Failure of a case mapping operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaseMapError {
    /// The options conflict with each other or with the arguments.
    #[error("invalid case mapping options: {0}")]
    InvalidOptions(&'static str),
    /// The output sink rejected the result.
    #[error(transparent)]
    Sink(#[from] SinkError),
}

pub type Result<T> = std::result::Result<T, CaseMapError>;
