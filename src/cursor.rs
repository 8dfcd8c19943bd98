// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A non-owning, copyable view on a byte range of a string, and the
//! scanning operations on it. Every operation returns a new cursor
//! and leaves `self` alone; an operation that does not match returns
//! `None` or a cursor equal to its input.
//!
//! Scanning is byte based. All the stop characters are ASCII, so the
//! sub-slices handed out are always on `char` boundaries, as long as
//! delimiters passed in are ASCII, too.

use crate::number;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'s> {
    src: &'s str,
    start: usize,
    end: usize,
}

impl<'s> Cursor<'s> {
    pub fn new(src: &'s str) -> Cursor<'s> {
        Cursor { src, start: 0, end: src.len() }
    }

    /// A cursor over `src[start..end]`, clamped to the buffer.
    pub fn from_range(src: &'s str, start: usize, end: usize) -> Cursor<'s> {
        let end = end.min(src.len());
        Cursor { src, start: start.min(end), end }
    }

    /// The underlying buffer (all of it, not just the viewed range).
    pub fn source(&self) -> &'s str {
        self.src
    }

    /// Byte offset of the cursor in the underlying buffer.
    pub fn offset(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn as_bytes(&self) -> &'s [u8] {
        &self.src.as_bytes()[self.start..self.end]
    }

    pub fn as_str(&self) -> &'s str {
        self.slice(self.start, self.end)
    }

    pub fn peek(&self) -> Option<u8> {
        self.as_bytes().first().copied()
    }

    fn at(&self, i: usize) -> Option<u8> {
        if i < self.end {
            Some(self.src.as_bytes()[i])
        } else {
            None
        }
    }

    fn slice(&self, a: usize, b: usize) -> &'s str {
        // Only fails for non-ASCII delimiters.
        self.src.get(a..b).unwrap_or("")
    }

    fn with_start(&self, start: usize) -> Cursor<'s> {
        Cursor { src: self.src, start: start.min(self.end), end: self.end }
    }

    /// Move forward by `n` bytes, stopping at the end.
    pub fn advance(&self, n: usize) -> Cursor<'s> {
        self.with_start(self.start.saturating_add(n))
    }

    /// The empty cursor at the end of the range.
    pub fn exhausted(&self) -> Cursor<'s> {
        self.with_start(self.end)
    }

    /// Restrict the range to the first `n` bytes.
    pub fn take(&self, n: usize) -> Cursor<'s> {
        Cursor {
            src: self.src,
            start: self.start,
            end: self.start + n.min(self.len()),
        }
    }

    // ---- Scanning -------------------------------------------------

    pub fn skip_whitespace(&self) -> Cursor<'s> {
        self.skip_while(number::is_whitespace)
    }

    pub fn skip_while(&self, pred: impl Fn(u8) -> bool) -> Cursor<'s> {
        let n = self.as_bytes().iter().take_while(|b| pred(**b)).count();
        self.advance(n)
    }

    /// Position at `b`, or the end if not found.
    pub fn scan_for_byte(&self, b: u8) -> Cursor<'s> {
        self.skip_while(|c| c != b)
    }

    /// Past the next line ending; `\n`, `\r`, `\r\n` and `\n\r` each
    /// count as one.
    pub fn skip_to_end_of_line(&self) -> Cursor<'s> {
        let mut i = self.start;
        while let Some(c) = self.at(i) {
            i += 1;
            if c == b'\r' || c == b'\n' {
                let other = if c == b'\r' { b'\n' } else { b'\r' };
                if self.at(i) == Some(other) {
                    i += 1;
                }
                break;
            }
        }
        self.with_start(i)
    }

    /// On the last character before the next line ending, or before
    /// the end of the range. Stays put on an empty line.
    pub fn last_char_on_line(&self) -> Cursor<'s> {
        let n = self.as_bytes().iter()
            .take_while(|b| **b != b'\r' && **b != b'\n')
            .count();
        let last = self.as_str().get(..n)
            .and_then(|line| line.char_indices().last())
            .map_or(0, |(i, _)| i);
        self.advance(last)
    }

    fn scan_back(&self, pred: impl Fn(u8) -> bool) -> Cursor<'s> {
        match self.as_bytes().iter().rposition(|b| pred(*b)) {
            Some(i) => self.advance(i),
            None => *self,
        }
    }

    /// Position at the last `b` in the range, or unchanged if there
    /// is none.
    pub fn scan_back_for_byte(&self, b: u8) -> Cursor<'s> {
        self.scan_back(|c| c == b)
    }

    /// Position at the last whitespace byte in the range, or
    /// unchanged if there is none.
    pub fn scan_back_for_whitespace(&self) -> Cursor<'s> {
        self.scan_back(number::is_whitespace)
    }

    /// Past the line ending and any whitespace following it.
    pub fn skip_to_next_line(&self) -> Cursor<'s> {
        self.skip_to_end_of_line().skip_whitespace()
    }

    /// Past one `// ...` or `/* ... */` comment if the cursor is on
    /// one. An unterminated block comment runs to the end.
    pub fn skip_cpp_comment(&self) -> Cursor<'s> {
        let b = self.as_bytes();
        if b.starts_with(b"//") {
            self.skip_to_end_of_line()
        } else if b.starts_with(b"/*") {
            match b[2..].windows(2).position(|w| w == b"*/") {
                Some(i) => self.advance(2 + i + 2),
                None => self.exhausted(),
            }
        } else {
            *self
        }
    }

    pub fn skip_comments_and_whitespace(&self) -> Cursor<'s> {
        let mut c = *self;
        loop {
            let ws = c.skip_whitespace();
            let past = ws.skip_cpp_comment();
            if past == ws {
                return past
            }
            c = past;
        }
    }

    // ---- Extraction -----------------------------------------------

    /// Split off the longest prefix whose bytes don't satisfy
    /// `stop`. The token may be empty.
    pub fn token_until(&self, stop: impl Fn(u8) -> bool)
                       -> (Cursor<'s>, &'s str) {
        let rest = self.skip_while(|b| !stop(b));
        (rest, self.slice(self.start, rest.start))
    }

    /// Skip whitespace, then take everything up to `delim` (which is
    /// not consumed).
    pub fn token(&self, delim: u8) -> (Cursor<'s>, &'s str) {
        self.skip_whitespace().token_until(|b| b == delim)
    }

    /// Skip whitespace, then take everything up to the next
    /// whitespace.
    pub fn token_ws_delimited(&self) -> (Cursor<'s>, &'s str) {
        self.skip_whitespace().token_until(number::is_whitespace)
    }

    /// Skip whitespace, then take the longest run of non-whitespace
    /// bytes satisfying `accept`.
    pub fn token_accepting(&self, accept: impl Fn(u8) -> bool)
                           -> (Cursor<'s>, &'s str) {
        self.skip_whitespace()
            .token_until(|b| number::is_whitespace(b) || !accept(b))
    }

    /// An identifier: `_`, ASCII letters and digits.
    pub fn token_alphanumeric(&self) -> (Cursor<'s>, &'s str) {
        self.token_accepting(|b| b == b'_' || is_alphanumeric(b))
    }

    /// ASCII letters and digits, plus the bytes in `ext`.
    pub fn token_alphanumeric_ext(&self, ext: &[u8]) -> (Cursor<'s>, &'s str) {
        self.token_accepting(|b| is_alphanumeric(b) || number::is_in(ext, b))
    }

    /// Only the bytes in `ext`.
    pub fn token_ext(&self, ext: &[u8]) -> (Cursor<'s>, &'s str) {
        self.token_accepting(|b| number::is_in(ext, b))
    }

    /// An identifier that may contain the separator `ns` (as in
    /// `std::vec` with `ns == b':'`), and `$`, `^`, `_`.
    pub fn token_namespaced(&self, ns: u8) -> (Cursor<'s>, &'s str) {
        self.token_accepting(|b| b == ns || number::is_in(b"$^_", b)
                             || is_alphanumeric(b))
    }

    /// The text between `self` and `past`, a cursor reached by
    /// skipping forward from `self` (e.g. the comment passed over by
    /// `skip_cpp_comment`).
    pub fn skipped(&self, past: &Cursor<'s>) -> &'s str {
        self.slice(self.start, past.start.max(self.start))
    }

    // Index of the next unescaped `delim` at or after `i`, or the end.
    fn scan_for_quote(&self, mut i: usize, delim: u8, escapes: bool) -> usize {
        while let Some(c) = self.at(i) {
            if c == b'\\' && escapes {
                i += 1;
            } else if c == delim {
                break;
            }
            i += 1;
        }
        i.min(self.end)
    }

    /// Find the next `delim`, and return the raw bytes up to the
    /// matching closing `delim` together with the cursor past it.
    /// With `escapes`, a backslash hides the byte after it; escape
    /// sequences are not resolved. A missing closing delimiter takes
    /// the rest of the range. Returns `None` if there is no opening
    /// delimiter.
    pub fn quoted_string(&self, delim: u8, escapes: bool)
                         -> Option<(Cursor<'s>, &'s str)> {
        let open = self.scan_for_quote(self.start, delim, escapes);
        if open >= self.end {
            return None
        }
        let inner_start = open + 1;
        let close = self.scan_for_quote(inner_start, delim, escapes);
        Some((self.with_start(close + 1), self.slice(inner_start, close)))
    }

    /// Past `lit` if the range starts with it.
    pub fn expect(&self, lit: &str) -> Option<Cursor<'s>> {
        if self.as_bytes().starts_with(lit.as_bytes()) {
            Some(self.advance(lit.len()))
        } else {
            None
        }
    }

    /// Without trailing whitespace.
    pub fn trim_trailing_whitespace(&self) -> Cursor<'s> {
        let trailing = self.as_bytes().iter().rev()
            .take_while(|b| number::is_whitespace(**b))
            .count();
        self.take(self.len() - trailing)
    }

    /// Without leading and trailing whitespace.
    pub fn strip(&self) -> Cursor<'s> {
        self.skip_whitespace().trim_trailing_whitespace()
    }

    /// The pieces between occurrences of `sep`. Adjacent separators
    /// give empty pieces; a trailing empty piece is dropped.
    pub fn split(&self, sep: u8) -> Split<'s> {
        Split { rest: *self, sep }
    }

    // ---- Numbers --------------------------------------------------

    fn number<T>(&self, r: Option<(T, usize)>) -> Option<(Cursor<'s>, T)> {
        r.map(|(v, len)| (self.advance(len), v))
    }

    pub fn scan_int16(&self) -> Option<(Cursor<'s>, i16)> {
        self.number(number::scan_i16(self.as_bytes()))
    }

    pub fn scan_int32(&self) -> Option<(Cursor<'s>, i32)> {
        self.number(number::scan_i32(self.as_bytes()))
    }

    pub fn scan_uint32(&self) -> Option<(Cursor<'s>, u32)> {
        self.number(number::scan_u32(self.as_bytes()))
    }

    pub fn scan_hex(&self) -> Option<(Cursor<'s>, u32)> {
        self.number(number::scan_hex(self.as_bytes()))
    }

    pub fn scan_float(&self) -> Option<(Cursor<'s>, f64)> {
        self.number(number::scan_float(self.as_bytes()))
    }
}

fn is_alphanumeric(b: u8) -> bool {
    number::is_alpha(b) || number::is_numeric(b)
}

pub struct Split<'s> {
    rest: Cursor<'s>,
    sep: u8,
}

impl<'s> Iterator for Split<'s> {
    type Item = &'s str;

    fn next(&mut self) -> Option<&'s str> {
        if self.rest.is_empty() {
            return None
        }
        let sep = self.sep;
        let (rest, piece) = self.rest.token_until(|b| b == sep);
        self.rest = rest.advance(1);
        Some(piece)
    }
}
