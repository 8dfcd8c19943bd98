// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Settings for parsing.

/// How much of a bare token a numeric scan has to consume for the
/// token to be classified as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericPolicy {
    /// Any consumed prefix is enough; the rest of the token is
    /// dropped. `3.14xyz` reads as the float `3.14`, `1e5` as the
    /// integer `1`.
    Prefix,
    /// The whole token must be consumed, otherwise it is an atom.
    WholeToken,
}

#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub numeric: NumericPolicy,
    /// Whether a backslash in a string literal hides the following
    /// byte (including a `"`).
    pub string_escapes: bool,
    /// Maximum list nesting; `None` means unbounded (the nesting
    /// stack lives on the heap either way).
    pub max_depth: Option<u32>,
}

/// The behaviour of the classic LabText parser.
pub const LABTEXT_SETTINGS: Settings = Settings {
    numeric: NumericPolicy::Prefix,
    string_escapes: true,
    max_depth: Some(500),
};

pub const STRICT_SETTINGS: Settings = Settings {
    numeric: NumericPolicy::WholeToken,
    string_escapes: true,
    max_depth: Some(500),
};

impl Default for Settings {
    fn default() -> Settings {
        LABTEXT_SETTINGS
    }
}
