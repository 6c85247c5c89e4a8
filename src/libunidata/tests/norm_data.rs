// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Normalization data generation and loading.

use libunidata::norm::{DATA_FORMAT, INERT, JAMO_L, JAMO_VT, MIN_NORMAL_MAYBE_YES,
                       MIN_YES_YES_WITH_CC};
use libunidata::{DataError, NormData, NormKind};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn canonical_data() {
    init_logging();

    let data = NormData::build(NormKind::Canonical).expect("build");
    let ix = &data.indexes;

    // Nothing below U+00C0 decomposes, nothing below U+0300 has a combining class.
    assert_eq!(ix.min_decomp_no_cp, 0xC0);
    assert_eq!(ix.min_lccc_cp, 0x300);
    assert!(ix.min_comp_no_maybe_cp <= 0x300);

    assert_eq!(data.trie.get(0x21), INERT);
    assert_eq!(data.trie.get(0x4E00), INERT);
    // Composition starters have a compositions list, so they are never inert.
    let a = data.trie.get(0x41);
    assert!(a > INERT && a < ix.min_yes_no);
    assert_eq!(data.trie.get(0x1100), JAMO_L);
    assert_eq!(data.trie.get(0x1161), JAMO_VT);
    assert_eq!(data.trie.get(0x11A8), JAMO_VT);
    assert_eq!(data.trie.get(0xAC00), ix.hangul_lv());
    assert_eq!(data.trie.get(0xAC01), ix.hangul_lvt());

    // Combining marks that do not combine back carry their ccc in the value.
    assert_eq!(data.trie.get(0x0334), MIN_YES_YES_WITH_CC);
    assert_eq!(data.trie.get(0x0301), MIN_NORMAL_MAYBE_YES | (230 << 1));

    // Decomposable letters lie in the yes/no or no/no ranges.
    let e_acute = data.trie.get(0xE9);
    assert!(e_acute >= ix.min_yes_no && e_acute < ix.min_maybe_yes);
    let angstrom = data.trie.get(0x212B);
    assert!(angstrom >= ix.min_no_no, "singletons never compose");

    assert_eq!(data.small_fcd.len(), 0x100);
    assert_eq!(data.small_fcd[0x03] & 1, 1);
    assert_eq!(data.small_fcd[0x00], 0);
}

#[test]
fn round_trip_and_corruption() {
    init_logging();

    let data = NormData::build(NormKind::Compatibility).expect("build");
    let bytes = data.to_bytes();
    assert_eq!(&bytes[..4], &DATA_FORMAT);

    let loaded = NormData::from_bytes(&bytes).expect("load");
    assert_eq!(loaded, data);

    let mut bad_magic = bytes.clone();
    bad_magic[0] = b'X';
    assert!(matches!(NormData::from_bytes(&bad_magic), Err(DataError::BadMagic { .. })));

    let mut bad_version = bytes.clone();
    bad_version[4] = 3;
    assert_eq!(NormData::from_bytes(&bad_version),
               Err(DataError::UnsupportedVersion { found: 3 }));

    assert!(NormData::from_bytes(&bytes[..bytes.len() - 1]).is_err());
    assert!(NormData::from_bytes(&bytes[..8]).is_err());
}

#[test]
fn case_fold_data() {
    init_logging();

    let canonical = NormData::build(NormKind::Canonical).expect("build");
    let folded = NormData::build(NormKind::CompatibilityCaseFold).expect("build");

    // Uppercase ASCII needs no decomposition for NFC but maps to lowercase for NFKC_Casefold.
    assert!(canonical.trie.get(0x41) < canonical.indexes.min_yes_no);
    assert!(folded.trie.get(0x41) >= folded.indexes.min_yes_no);
    assert!(folded.trie.get(0x41) < folded.indexes.min_maybe_yes);
    assert_eq!(canonical.trie.get(0x21), INERT);
    assert_eq!(folded.trie.get(0x21), INERT);
    assert!(folded.indexes.min_decomp_no_cp <= 0x41);

    // Default ignorable code points are removed.
    let soft_hyphen = folded.trie.get(0xAD);
    assert!(soft_hyphen >= folded.indexes.min_no_no_empty);
    assert!(soft_hyphen < folded.indexes.limit_no_no);
}
