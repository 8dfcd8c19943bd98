// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::cmp::Eq;

/// Both line and col are zero based; Emacs uses 1-based line
/// numbering, so line is incremented by 1 in Display. `col` counts
/// bytes, not characters, since the scanner works on bytes.

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Pos {
    pub line: u32,
    pub col: u32,
}

impl Pos {
    /// The position of byte `offset` in `src`. Offsets past the end
    /// are clamped to the end of the buffer.
    pub fn of_offset(src: &str, offset: usize) -> Pos {
        let offset = offset.min(src.len());
        let mut pos = Pos { line: 0, col: 0 };
        for b in src.as_bytes()[..offset].iter() {
            pos = if *b == b'\n' {
                Pos { line: pos.line + 1, col: 0 }
            } else {
                Pos { line: pos.line, col: pos.col + 1 }
            };
        }
        pos
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        // This, when prefixed with a Debug style path string, is
        // following the Emacs convention for location information.
        f.write_fmt(format_args!("@{}.{}", self.line + 1, self.col))
    }
}

#[cfg(test)]
mod tests {
    use super::Pos;

    #[test]
    fn offsets_to_lines() {
        let s = "(a\n  b)\n";
        assert_eq!(Pos::of_offset(s, 0), Pos { line: 0, col: 0 });
        assert_eq!(Pos::of_offset(s, 5), Pos { line: 1, col: 2 });
        assert_eq!(Pos::of_offset(s, 100), Pos { line: 2, col: 0 });
        assert_eq!(format!("{}", Pos::of_offset(s, 5)), "@2.2");
    }
}
