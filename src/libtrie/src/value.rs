// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Trie value types.

use std::fmt::Debug;
use std::hash::Hash;

/// A fixed-width integer that can be stored in a trie.
///
/// Values are serialized in little-endian byte order.
pub trait TrieValue: Copy + Eq + Hash + Default + Debug {
    /// Width of a serialized value in bytes.
    const BYTES: usize;

    /// Append the serialized value to a byte vector.
    fn write_le(self, out: &mut Vec<u8>);

    /// Read a value back. The slice is exactly `BYTES` long.
    fn read_le(bytes: &[u8]) -> Self;
}

impl TrieValue for u8 {
    const BYTES: usize = 1;

    fn write_le(self, out: &mut Vec<u8>) {
        out.push(self);
    }

    fn read_le(bytes: &[u8]) -> Self {
        bytes[0]
    }
}

impl TrieValue for u16 {
    const BYTES: usize = 2;

    fn write_le(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    fn read_le(bytes: &[u8]) -> Self {
        u16::from_le_bytes([bytes[0], bytes[1]])
    }
}

impl TrieValue for u32 {
    const BYTES: usize = 4;

    fn write_le(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    fn read_le(bytes: &[u8]) -> Self {
        u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
}
