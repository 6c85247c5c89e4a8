// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Trie construction.

use std::collections::HashMap;

use log::debug;

use crate::{CodePointTrie, TrieValue};
use crate::{BMP_INDEX_LENGTH, DATA_BLOCK_LENGTH, DATA_BLOCK_SHIFT, INDEX_2_BLOCK_LENGTH,
            MAX_CODE_POINT, SUPP_BLOCK_SIZE, SUPP_SHIFT};

const CODE_POINT_COUNT: usize = (MAX_CODE_POINT + 1) as usize;

/// A mutable, uncompressed code point map that can be compacted into a `CodePointTrie`.
///
/// The builder keeps one value per code point, so it is meant for one-off table construction
/// rather than for long-lived storage.
pub struct TrieBuilder<T> {
    values: Vec<T>,
    error_value: T,
}

impl<T: TrieValue> TrieBuilder<T> {
    /// Make a builder with all code points mapped to `initial_value`.
    pub fn new(initial_value: T, error_value: T) -> TrieBuilder<T> {
        TrieBuilder {
            values: vec![initial_value; CODE_POINT_COUNT],
            error_value,
        }
    }

    pub fn get(&self, c: u32) -> T {
        match self.values.get(c as usize) {
            Some(&value) => value,
            None => self.error_value,
        }
    }

    /// Set the value of a single code point. Values above U+10FFFF are ignored.
    pub fn set(&mut self, c: u32, value: T) {
        if let Some(slot) = self.values.get_mut(c as usize) {
            *slot = value;
        }
    }

    /// Set the value of an inclusive range of code points.
    pub fn set_range(&mut self, start: u32, end: u32, value: T) {
        let end = end.min(MAX_CODE_POINT);
        if start > end {
            return;
        }
        for slot in &mut self.values[start as usize..=end as usize] {
            *slot = value;
        }
    }

    /// Compact the current contents into an immutable trie.
    pub fn build(&self) -> CodePointTrie<T> {
        let values = &self.values[..];

        let high_value = values[MAX_CODE_POINT as usize];
        let mut high_start = MAX_CODE_POINT + 1;
        while high_start > 0x10000 && values[(high_start - 1) as usize] == high_value {
            high_start -= 1;
        }
        high_start = round_up(high_start.max(0x10000), SUPP_BLOCK_SIZE);

        let mut data = Vec::new();
        let mut blocks = HashMap::new();

        let mut index = Vec::with_capacity(BMP_INDEX_LENGTH);
        for block in 0..BMP_INDEX_LENGTH {
            let start = block << DATA_BLOCK_SHIFT;
            index.push(intern_block(&values[start..start + DATA_BLOCK_LENGTH],
                                    &mut blocks, &mut data));
        }

        let supp_index_len = ((high_start - 0x10000) >> SUPP_SHIFT) as usize;
        let index2_start = BMP_INDEX_LENGTH + supp_index_len;

        let mut index2: Vec<u16> = Vec::new();
        let mut index2_blocks: HashMap<[u16; INDEX_2_BLOCK_LENGTH], u16> = HashMap::new();
        for i1 in 0..supp_index_len {
            let mut entry = [0u16; INDEX_2_BLOCK_LENGTH];
            for (i2, slot) in entry.iter_mut().enumerate() {
                let start = 0x10000 + (i1 << SUPP_SHIFT) + (i2 << DATA_BLOCK_SHIFT);
                *slot = intern_block(&values[start..start + DATA_BLOCK_LENGTH],
                                     &mut blocks, &mut data);
            }
            let offset = *index2_blocks.entry(entry).or_insert_with(|| {
                let offset = (index2_start + index2.len()) as u16;
                index2.extend_from_slice(&entry);
                offset
            });
            index.push(offset);
        }
        index.extend_from_slice(&index2);

        debug!("built trie: high start U+{:04X}, {} index entries, {} data values",
               high_start, index.len(), data.len());

        CodePointTrie {
            index,
            data,
            high_start,
            high_value,
            error_value: self.error_value,
        }
    }
}

/// Store a data block once and return its block number.
fn intern_block<'a, T: TrieValue>(block: &'a [T],
                                  blocks: &mut HashMap<&'a [T], u16>,
                                  data: &mut Vec<T>) -> u16
{
    *blocks.entry(block).or_insert_with(|| {
        let number = (data.len() / DATA_BLOCK_LENGTH) as u16;
        data.extend_from_slice(block);
        number
    })
}

fn round_up(value: u32, granularity: u32) -> u32 {
    (value + granularity - 1) / granularity * granularity
}
