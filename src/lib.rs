// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A byte-oriented text scanner, and an S-Expression parser built on
//! it, with the following goals:
//!
//! * Zero copy: the scanner works on a `Cursor` into a buffer that is
//!   fully in memory, and everything the parser produces borrows from
//!   that buffer. Copies are only made on request (`into_owned`).
//!
//! * One grammar, two results: `parse::parse_sexpr` drives any
//!   `sink::Sink`. The crate comes with a flat, columnar result
//!   (`flat::FlatSexpr`: tagged elements plus side tables for
//!   numbers and strings) and a linked chain of cells
//!   (`chain::Cell`). Both see exactly the same token sequence.
//!
//! * Nesting is explicit: lists are not built as trees, `PushList`
//!   and `PopList` tokens mark them. The nesting depth is tracked on
//!   the heap, not on the call stack, and can be limited.
//!
//! * Malformed input is reported, not guessed at: a parse ends as
//!   `Complete`, `Truncated` or `Malformed`, with positions.
//!
//! Not provided: evaluation, symbol interning, resolving escapes in
//! string literals, incremental parsing of partial input.

pub mod chain;
pub mod cursor;
pub mod flat;
pub mod number;
pub mod parse;
pub mod pos;
pub mod read;
pub mod settings;
pub mod sink;
pub mod value;
