// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Languages with special case mapping rules.

/// Case mapping dialect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CaseLocale {
    Root,
    /// Turkish and Azerbaijani: dotted and dotless i are separate letters.
    Turkish,
    /// Lithuanian: i keeps its dot under accents when lowercased.
    Lithuanian,
    /// Greek: accents are removed when uppercasing.
    Greek,
    /// Dutch: the digraph "ij" is titlecased as a whole.
    Dutch,
    /// Eastern Armenian: the ech-yiwn ligature uppercases to ech-vew.
    Armenian,
}

impl Default for CaseLocale {
    fn default() -> CaseLocale {
        CaseLocale::Root
    }
}

impl CaseLocale {
    /// Pick the dialect for a language tag like "tr", "nl-BE", or "el_GR".
    ///
    /// Only the language subtag matters. Tags are compared without regard to ASCII case.
    pub fn from_language_tag(tag: &str) -> CaseLocale {
        let language = tag.split(|c| c == '-' || c == '_').next().unwrap_or("");
        let is = |code: &str| language.eq_ignore_ascii_case(code);
        if is("tr") || is("az") {
            CaseLocale::Turkish
        } else if is("lt") {
            CaseLocale::Lithuanian
        } else if is("el") {
            CaseLocale::Greek
        } else if is("nl") {
            CaseLocale::Dutch
        } else if is("hy") {
            CaseLocale::Armenian
        } else {
            CaseLocale::Root
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_tags() {
        assert_eq!(CaseLocale::from_language_tag("tr"), CaseLocale::Turkish);
        assert_eq!(CaseLocale::from_language_tag("AZ-Latn"), CaseLocale::Turkish);
        assert_eq!(CaseLocale::from_language_tag("lt_LT"), CaseLocale::Lithuanian);
        assert_eq!(CaseLocale::from_language_tag("el"), CaseLocale::Greek);
        assert_eq!(CaseLocale::from_language_tag("nl-BE"), CaseLocale::Dutch);
        assert_eq!(CaseLocale::from_language_tag("hy"), CaseLocale::Armenian);
        assert_eq!(CaseLocale::from_language_tag("en-US"), CaseLocale::Root);
        assert_eq!(CaseLocale::from_language_tag("tur"), CaseLocale::Root);
        assert_eq!(CaseLocale::from_language_tag(""), CaseLocale::Root);
    }
}
