// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Algorithmic Hangul syllable composition.
//!
//! See Unicode Standard, section 3.12 "Conjoining Jamo Behavior".

pub const S_BASE: u32 = 0xAC00;
pub const L_BASE: u32 = 0x1100;
pub const V_BASE: u32 = 0x1161;
pub const T_BASE: u32 = 0x11A7;
pub const L_COUNT: u32 = 19;
pub const V_COUNT: u32 = 21;
pub const T_COUNT: u32 = 28;
pub const N_COUNT: u32 = V_COUNT * T_COUNT;
pub const S_COUNT: u32 = L_COUNT * N_COUNT;
pub const S_LIMIT: u32 = S_BASE + S_COUNT;

pub fn is_hangul(c: u32) -> bool {
    S_BASE <= c && c < S_LIMIT
}

/// Check whether `c` is a syllable without a trailing consonant.
pub fn is_hangul_lv(c: u32) -> bool {
    is_hangul(c) && (c - S_BASE) % T_COUNT == 0
}

/// Leading consonant, vowel, and optional trailing consonant of a syllable.
pub fn decompose(c: u32) -> (u16, u16, Option<u16>) {
    let s_index = c - S_BASE;
    let l = L_BASE + s_index / N_COUNT;
    let v = V_BASE + (s_index % N_COUNT) / T_COUNT;
    let t = s_index % T_COUNT;
    (l as u16, v as u16, if t != 0 { Some((T_BASE + t) as u16) } else { None })
}

/// Two-element decomposition of a syllable: LV into L and V, LVT into LV and T.
pub fn raw_decompose(c: u32) -> (u16, u16) {
    let s_index = c - S_BASE;
    let t = s_index % T_COUNT;
    if t == 0 {
        let l = L_BASE + s_index / N_COUNT;
        let v = V_BASE + (s_index % N_COUNT) / T_COUNT;
        (l as u16, v as u16)
    } else {
        ((c - t) as u16, (T_BASE + t) as u16)
    }
}

/// Syllable composed of a leading consonant and a vowel, if they are ones.
pub fn compose_lv(l: u32, v: u32) -> Option<u32> {
    let l_index = l.wrapping_sub(L_BASE);
    let v_index = v.wrapping_sub(V_BASE);
    if l_index < L_COUNT && v_index < V_COUNT {
        Some(S_BASE + (l_index * V_COUNT + v_index) * T_COUNT)
    } else {
        None
    }
}

/// Index of a trailing consonant in `1..T_COUNT`, if `t` is one.
pub fn trail_index(t: u32) -> Option<u32> {
    let t_index = t.wrapping_sub(T_BASE);
    if 0 < t_index && t_index < T_COUNT { Some(t_index) } else { None }
}
