// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Numeric literal scanning on byte slices. Every scanner returns
//! the value and the number of bytes consumed, or `None` if nothing
//! matched; [Cursor](../cursor/struct.Cursor.html) turns that into
//! the "unchanged cursor on non-match" convention.
//!
//! Leading whitespace is skipped before a literal, and counts as
//! consumed only if a literal follows.

use num::traits::{PrimInt, WrappingAdd, WrappingMul, WrappingNeg};

/// Tab, space, CR and LF. Other control characters (form feed,
/// vertical tab) are *not* whitespace for this scanner.
pub fn is_whitespace(b: u8) -> bool {
    b == b'\t' || b == b' ' || b == b'\r' || b == b'\n'
}

pub fn is_numeric(b: u8) -> bool {
    b.is_ascii_digit()
}

/// A-Z, a-z
pub fn is_alpha(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

/// Whether `b` is one of the bytes in `set`.
pub fn is_in(set: &[u8], b: u8) -> bool {
    set.contains(&b)
}

fn skip_whitespace(s: &[u8]) -> usize {
    s.iter().take_while(|b| is_whitespace(**b)).count()
}

fn digit_value(b: u8, radix: u32) -> Option<u32> {
    (b as char).to_digit(radix)
}

// Accumulates digits with wrapping arithmetic, so overlong literals
// wrap around instead of failing.
fn accumulate<T>(s: &[u8], radix: u32) -> Option<(T, usize)>
    where T: PrimInt + WrappingAdd + WrappingMul
{
    let base: T = num::cast(radix)?;
    let mut n = T::zero();
    let mut len = 0;
    for b in s {
        if let Some(d) = digit_value(*b, radix) {
            n = n.wrapping_mul(&base).wrapping_add(&num::cast(d)?);
            len += 1;
        } else {
            break;
        }
    }
    if len == 0 {
        None
    } else {
        Some((n, len))
    }
}

/// Optional sign, then at least one decimal digit.
pub fn scan_signed<T>(s: &[u8]) -> Option<(T, usize)>
    where T: PrimInt + WrappingAdd + WrappingMul + WrappingNeg
{
    let mut i = skip_whitespace(s);
    let mut negative = false;
    match s.get(i) {
        Some(b'+') => i += 1,
        Some(b'-') => {
            negative = true;
            i += 1;
        }
        _ => {}
    }
    let (n, len): (T, usize) = accumulate(&s[i..], 10)?;
    Some((if negative { n.wrapping_neg() } else { n }, i + len))
}

/// At least one decimal digit, no sign.
pub fn scan_unsigned<T>(s: &[u8]) -> Option<(T, usize)>
    where T: PrimInt + WrappingAdd + WrappingMul
{
    let i = skip_whitespace(s);
    let (n, len) = accumulate(&s[i..], 10)?;
    Some((n, i + len))
}

pub fn scan_i16(s: &[u8]) -> Option<(i16, usize)> {
    scan_signed(s)
}

pub fn scan_i32(s: &[u8]) -> Option<(i32, usize)> {
    scan_signed(s)
}

pub fn scan_u32(s: &[u8]) -> Option<(u32, usize)> {
    scan_unsigned(s)
}

/// Hex digits in either case, no `0x` prefix.
pub fn scan_hex(s: &[u8]) -> Option<(u32, usize)> {
    let i = skip_whitespace(s);
    let (n, len) = accumulate(&s[i..], 16)?;
    Some((n, i + len))
}

/// Optional sign, at least one digit, a mandatory `.`, optional
/// fraction digits, optional exponent. `1e5` is not a float (no
/// `.`), and neither is `.5` (no integer part). An `e` that is not
/// followed by an integer makes the whole scan fail.
pub fn scan_float(s: &[u8]) -> Option<(f64, usize)> {
    let start = skip_whitespace(s);
    let mut i = start;
    if let Some(b'+' | b'-') = s.get(i) {
        i += 1;
    }
    let int_digits = s[i..].iter().take_while(|b| is_numeric(**b)).count();
    if int_digits == 0 {
        return None
    }
    i += int_digits;
    if s.get(i) != Some(&b'.') {
        return None
    }
    i += 1;
    i += s[i..].iter().take_while(|b| is_numeric(**b)).count();
    if let Some(b'e' | b'E') = s.get(i) {
        let (_, len) = scan_i32(&s[i + 1..])?;
        i += 1 + len;
    }
    // The literal is pure ASCII, so this cannot fail; the exponent
    // may contain whitespace after the `e` though, which Rust's
    // parser does not accept.
    let text: String = s[start..i].iter()
        .filter(|b| !is_whitespace(**b))
        .map(|b| *b as char)
        .collect();
    let v = text.parse::<f64>().ok()?;
    Some((v, i))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_integers() {
        assert_eq!(scan_i32(b"42"), Some((42, 2)));
        assert_eq!(scan_i32(b"-17)"), Some((-17, 3)));
        assert_eq!(scan_i32(b"+5x"), Some((5, 2)));
        assert_eq!(scan_i32(b"  7"), Some((7, 3)));
        assert_eq!(scan_i32(b"-"), None);
        assert_eq!(scan_i32(b"abc"), None);
        assert_eq!(scan_i32(b""), None);
    }

    #[test]
    fn integers_wrap() {
        assert_eq!(scan_i32(b"2147483648"), Some((i32::MIN, 10)));
        assert_eq!(scan_i16(b"65537"), Some((1, 5)));
    }

    #[test]
    fn unsigned_and_hex() {
        assert_eq!(scan_u32(b"4000000000"), Some((4_000_000_000, 10)));
        assert_eq!(scan_u32(b"-1"), None);
        assert_eq!(scan_hex(b"fF10g"), Some((0xff10, 4)));
        assert_eq!(scan_hex(b"xyz"), None);
    }

    #[test]
    fn floats() {
        assert_eq!(scan_float(b"2.5"), Some((2.5, 3)));
        assert_eq!(scan_float(b"-0.25)"), Some((-0.25, 5)));
        assert_eq!(scan_float(b"3."), Some((3.0, 2)));
        assert_eq!(scan_float(b"1.5e2"), Some((150.0, 5)));
        assert_eq!(scan_float(b"1.5E-1x"), Some((0.15, 6)));
        assert_eq!(scan_float(b"3.14.15"), Some((3.14, 4)));
        assert_eq!(scan_float(b"1.0e"), None);
        assert_eq!(scan_float(b"1e5"), None);
        assert_eq!(scan_float(b".5"), None);
        assert_eq!(scan_float(b"12"), None);
    }

    #[test]
    fn classification() {
        assert!(is_whitespace(b'\r'));
        assert!(!is_whitespace(0x0c));
        assert!(is_numeric(b'7'));
        assert!(is_alpha(b'Q'));
        assert!(!is_alpha(b'_'));
        assert!(is_in(b"$^_", b'^'));
        assert!(!is_in(b"$^_", b'-'));
        assert!(!is_in(b"", b'a'));
    }
}
