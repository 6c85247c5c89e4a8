// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Canonical closure data.
//!
//! Canonical iteration needs the reverse of the decomposition mappings: for each code
//! point, the set of characters whose canonical decomposition starts with it (its _start
//! set_), and whether it can start a segment at all. This data is derived from the
//! normalization trie on first use and cached in the `NormalizerImpl`.

use std::collections::BTreeSet;

use libtext::utf16;
use libtrie::{CodePointTrie, TrieBuilder};
use libunidata::norm::{INERT, JAMO_L, MIN_NORMAL_MAYBE_YES};
use log::debug;

use crate::hangul;
use crate::normalizer_impl::NormalizerImpl;

// Bits of the canonical iteration trie values.
const NOT_SEGMENT_STARTER: u32 = 0x8000_0000;
const HAS_COMPOSITIONS: u32 = 0x4000_0000;
const HAS_SET: u32 = 0x0020_0000;
const VALUE_MASK: u32 = 0x001F_FFFF;

#[derive(Debug)]
pub(crate) struct CanonIterData {
    trie: CodePointTrie<u32>,
    start_sets: Vec<BTreeSet<u32>>,
}

struct CanonIterBuilder {
    trie: TrieBuilder<u32>,
    start_sets: Vec<BTreeSet<u32>>,
}

impl CanonIterBuilder {
    /// Record that the decomposition of `origin` starts with `decomp_lead`.
    fn add_to_start_set(&mut self, origin: u32, decomp_lead: u32) {
        let value = self.trie.get(decomp_lead);
        if value & (HAS_SET | VALUE_MASK) == 0 && origin != 0 {
            // The first origin is stored in the value itself.
            self.trie.set(decomp_lead, value | origin);
            return;
        }
        let index = if value & HAS_SET == 0 {
            let first_origin = value & VALUE_MASK;
            let index = self.start_sets.len();
            self.trie.set(decomp_lead, (value & !VALUE_MASK) | HAS_SET | index as u32);
            let mut set = BTreeSet::new();
            if first_origin != 0 {
                set.insert(first_origin);
            }
            self.start_sets.push(set);
            index
        } else {
            (value & VALUE_MASK) as usize
        };
        self.start_sets[index].insert(origin);
    }

    fn mark_not_segment_starter(&mut self, c: u32) {
        let value = self.trie.get(c);
        if value & NOT_SEGMENT_STARTER == 0 {
            self.trie.set(c, value | NOT_SEGMENT_STARTER);
        }
    }
}

impl NormalizerImpl {
    fn canon_iter_data(&self) -> &CanonIterData {
        self.canon.get_or_init(|| {
            let mut builder = CanonIterBuilder {
                trie: TrieBuilder::new(0, 0),
                start_sets: Vec::new(),
            };
            for range in self.data().trie.ranges() {
                if range.value != INERT {
                    self.add_canon_iter_data(range.start, range.end, range.value, &mut builder);
                }
            }
            debug!("canonical closure data: {} start sets", builder.start_sets.len());
            CanonIterData { trie: builder.trie.build(), start_sets: builder.start_sets }
        })
    }

    fn add_canon_iter_data(&self, start: u32, end: u32, norm16: u16,
                           builder: &mut CanonIterBuilder)
    {
        if self.ix.min_yes_no <= norm16 && norm16 < self.ix.min_no_no {
            // Two-way mappings, including Hangul syllables. Their composites are found
            // through the composition list of the starter at lookup time.
            return;
        }
        for c in start..=end {
            if utf16::is_surrogate(c) {
                continue;
            }
            let old_value = builder.trie.get(c);
            let mut new_value = old_value;
            if self.is_maybe_or_non_zero_cc(norm16) {
                new_value |= NOT_SEGMENT_STARTER;
                if norm16 < MIN_NORMAL_MAYBE_YES {
                    new_value |= HAS_COMPOSITIONS;
                }
            } else if norm16 < self.ix.min_yes_no {
                new_value |= HAS_COMPOSITIONS;
            } else {
                // One-way decomposition.
                let mut c2 = c;
                let mut norm16_2 = norm16;
                if self.is_decomp_no_algorithmic(norm16_2) {
                    c2 = self.map_algorithmic(c2, norm16_2);
                    norm16_2 = self.raw_norm16(c2);
                }
                if norm16_2 > self.ix.min_yes_no {
                    if c == c2 && self.get_cc(norm16_2) != 0 {
                        new_value |= NOT_SEGMENT_STARTER;
                    }
                    let mapping = self.mapping(norm16_2);
                    if !mapping.is_empty() {
                        let mut i = 0;
                        let lead = utf16::next_code_point(mapping, &mut i, mapping.len());
                        builder.add_to_start_set(c, lead);
                        if norm16_2 >= self.ix.min_no_no {
                            while i < mapping.len() {
                                let rest = utf16::next_code_point(mapping, &mut i, mapping.len());
                                builder.mark_not_segment_starter(rest);
                            }
                        }
                    }
                } else {
                    // Algorithmic mapping to a character without decomposition.
                    builder.add_to_start_set(c, c2);
                }
            }
            if new_value != old_value {
                // add_to_start_set() may have changed the value of c itself.
                let current = builder.trie.get(c);
                builder.trie.set(c, current | new_value);
            }
        }
    }

    /// Whether `c` can start a segment for canonical iteration: it has ccc = 0 and does
    /// not occur in a non-initial position of any decomposition.
    pub fn is_canon_segment_starter(&self, c: u32) -> bool {
        self.canon_iter_data().trie.get(c) & NOT_SEGMENT_STARTER == 0
    }

    /// All code points whose canonical decomposition starts with `c`, or `None` if there
    /// are none.
    pub fn get_canon_start_set(&self, c: u32) -> Option<BTreeSet<u32>> {
        let data = self.canon_iter_data();
        let value = data.trie.get(c) & !NOT_SEGMENT_STARTER;
        if value == 0 {
            return None;
        }
        let mut set = BTreeSet::new();
        let origin = value & VALUE_MASK;
        if value & HAS_SET != 0 {
            set.extend(data.start_sets[origin as usize].iter().copied());
        } else if origin != 0 {
            set.insert(origin);
        }
        if value & HAS_COMPOSITIONS != 0 {
            let norm16 = self.raw_norm16(c);
            if norm16 == JAMO_L {
                let syllable = hangul::S_BASE + (c - hangul::L_BASE) * hangul::N_COUNT;
                set.extend(syllable..syllable + hangul::N_COUNT);
            } else if let Some(list) = self.compositions_list(norm16) {
                self.add_composites(list, &mut set);
            }
        }
        Some(set)
    }
}
