// Copyright (c) 2016, Sabre developers
//
// Licensed under the Apache License, Version 2.0 (see LICENSE.Apache in the
// root directory) or MIT license (see LICENSE.MIT in the root directory),
// at your option. This file may be copied, distributed, and modified only
// in accordance with the terms specified by the chosen license.

//! Unicode support for Rust strings.
//!
//! This crate wraps the UTF-16 engines of `libnormalize` and `libcasemap` into functions
//! working on `&str`. Use the engines directly for streaming output, change tracking, or
//! custom data.

pub mod case_algorithms;
pub mod normalization;

pub use libcasemap::{CaseLocale, CaseMapError, CaseOptions};
pub use libnormalize::QuickCheck;
