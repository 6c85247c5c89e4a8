// Copyright (c) 2017, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Output sink and UTF-16 helper tests.

use libtext::utf16;
use libtext::{BoundedSink, FmtSink, Sink, SinkError};

#[test]
fn vector_sink_is_a_direct_buffer() {
    let mut v: Vec<u16> = Vec::new();
    v.push_code_point(0x1F600).unwrap();
    v.push_units(&[0x41, 0x42]).unwrap();

    assert_eq!(v, vec![0xD83D, 0xDE00, 0x41, 0x42]);
    assert!(v.direct_buffer().is_some());

    let mut bounded = BoundedSink::new(4);
    assert!(bounded.direct_buffer().is_none());
}

#[test]
fn bounded_sink_overflows() {
    let mut sink = BoundedSink::new(3);
    sink.push_units(&[1, 2]).unwrap();

    assert_eq!(sink.push_units(&[3, 4]), Err(SinkError::Overflow { capacity: 3 }));
    assert_eq!(sink.as_slice(), &[1, 2]);
    assert_eq!(sink.push_unit(3), Ok(()));
    assert_eq!(sink.push_unit(4), Err(SinkError::Overflow { capacity: 3 }));
}

#[test]
fn fmt_sink_joins_surrogate_pairs() {
    let mut sink = FmtSink::new(String::new());
    sink.push_unit(0x61).unwrap();
    sink.push_unit(0xD83D).unwrap();
    sink.push_unit(0xDE00).unwrap();
    sink.push_unit(0xDC00).unwrap();
    sink.push_unit(0x62).unwrap();
    sink.push_unit(0xD800).unwrap();

    assert_eq!(sink.finish().unwrap(), "a\u{1F600}\u{FFFD}b\u{FFFD}");
}

#[test]
fn dyn_sinks_forward() {
    let mut v: Vec<u16> = Vec::new();
    {
        let sink: &mut dyn Sink = &mut v;
        sink.push_code_point(0xE9).unwrap();
        assert!(sink.direct_buffer().is_some());
    }
    assert_eq!(v, vec![0xE9]);
}

#[test]
fn code_point_iteration() {
    let s = [0x61, 0xD83D, 0xDE00, 0xDC00, 0xD800];

    assert_eq!(utf16::code_points(&s).collect::<Vec<u32>>(),
               vec![0x61, 0x1F600, 0xDC00, 0xD800]);
    assert_eq!(utf16::code_point_count(&s), 4);
    assert_eq!(utf16::code_point_before(&s, 3), 0x1F600);
    assert_eq!(utf16::code_point_at(&s, 2), 0xDE00);

    let mut i = 3;
    assert_eq!(utf16::prev_code_point(&s, 2, &mut i), 0xDE00);
    assert_eq!(i, 2);
}
