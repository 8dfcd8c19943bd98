// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Reading whole inputs into an owned flat representation, and
//! writing token sequences back out as text.

use crate::flat::OwnedSexpr;
use crate::parse::{parse_flat, ParseErrorWithPos};
use crate::settings::Settings;
use crate::value::Token;
use std::fmt::Write as FmtWrite;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::fs::File;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("{0}")]
    PE(ParseErrorWithPos),
    #[error("{0}")]
    IO(std::io::Error),
}

impl From<ParseErrorWithPos> for ReadError {
    fn from(e: ParseErrorWithPos) -> ReadError {
        ReadError::PE(e)
    }
}

impl From<std::io::Error> for ReadError {
    fn from(e: std::io::Error) -> ReadError {
        ReadError::IO(e)
    }
}

/// A `ReadError` together with the file it happened in, following
/// the Emacs convention of `path@line.col`.
#[derive(Error, Debug)]
pub enum ReadErrorWithLocation {
    #[error("{} in {:?}{}", .1.err, .0, .1.pos)]
    PE(PathBuf, ParseErrorWithPos),
    #[error("{:?}: {}", .0, .1)]
    IO(PathBuf, std::io::Error),
}

impl ReadError {
    fn in_file(self, path: &Path) -> ReadErrorWithLocation {
        match self {
            ReadError::PE(e) => ReadErrorWithLocation::PE(path.to_path_buf(), e),
            ReadError::IO(e) => ReadErrorWithLocation::IO(path.to_path_buf(), e),
        }
    }
}

/// Slurp `fh` completely (it must be UTF-8), then parse it.
pub fn read_all(
    fh: impl Read,
    settings: &Settings,
) -> Result<OwnedSexpr, ReadError>
{
    let mut fh = fh;
    let mut buf = String::new();
    fh.read_to_string(&mut buf)?;
    debug!(len = buf.len(), "read_all");
    let sexpr = parse_flat(&buf, settings)?;
    Ok(sexpr.into_owned())
}

pub fn read_file(
    path: &Path,
    settings: &Settings,
) -> Result<OwnedSexpr, ReadErrorWithLocation> {
    let fh = File::open(path).map_err(|e| ReadError::IO(e).in_file(path))?;
    read_all(fh, settings).map_err(|e| e.in_file(path))
}

/// Write `tokens` as S-expression text: items separated by a space,
/// none inside the parens, a newline between top-level lists.
pub fn write_tokens<'t>(
    out: &mut impl FmtWrite,
    tokens: impl IntoIterator<Item = Token<'t>>,
) -> Result<(), std::fmt::Error> {
    let mut depth: i64 = 0;
    let mut prev: Option<Token> = None;
    for t in tokens {
        if let Some(p) = prev {
            if depth <= 0 && t == Token::PushList {
                out.write_char('\n')?;
            } else if p != Token::PushList && t != Token::PopList {
                out.write_char(' ')?;
            }
        }
        match t {
            Token::PushList => depth += 1,
            Token::PopList => depth -= 1,
            _ => {}
        }
        write!(out, "{}", t)?;
        prev = Some(t);
    }
    Ok(())
}

pub(crate) fn fmt_tokens<'t>(
    f: &mut std::fmt::Formatter<'_>,
    tokens: impl IntoIterator<Item = Token<'t>>,
) -> Result<(), std::fmt::Error> {
    write_tokens(f, tokens)
}

/// Like `write_tokens`, plus a final newline, to an `io::Write`.
pub fn write_all<'t>(
    out: impl Write,
    tokens: impl IntoIterator<Item = Token<'t>>,
) -> Result<(), std::io::Error> {
    let mut out = out; // for `File`
    let mut s = String::new();
    write_tokens(&mut s, tokens)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    if !s.is_empty() {
        s.push('\n');
    }
    out.write_all(s.as_bytes())
}

pub fn write_file<'t>(path: &Path, tokens: impl IntoIterator<Item = Token<'t>>)
                      -> Result<(), std::io::Error> {
    write_all(File::create(path)?, tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::ParseError;
    use crate::settings::LABTEXT_SETTINGS;

    #[test]
    fn layout() {
        let tokens = vec![Token::PushList, Token::Atom("a"), Token::PushList,
                          Token::Integer(1), Token::Float(2.0), Token::PopList,
                          Token::String("s"), Token::PopList,
                          Token::PushList, Token::PopList];
        let mut s = String::new();
        write_tokens(&mut s, tokens).unwrap();
        assert_eq!(s, "(a (1 2.0) \"s\")\n()");
    }

    #[test]
    fn read_from_bytes() {
        let sexpr = read_all(&b"(a (b 1))"[..], &LABTEXT_SETTINGS).unwrap();
        assert_eq!(sexpr.len(), 7);
        assert_eq!(sexpr.to_string(), "(a (b 1))");
    }

    #[test]
    fn read_errors() {
        match read_all(&b"(a (b"[..], &LABTEXT_SETTINGS) {
            Err(ReadError::PE(e)) => assert_eq!(e.err, ParseError::PrematureEof),
            r => panic!("unexpected {:?}", r),
        }
        match read_all(&[b'(', 0xff, b')'][..], &LABTEXT_SETTINGS) {
            Err(ReadError::IO(_)) => {}
            r => panic!("unexpected {:?}", r),
        }
    }

    #[test]
    fn missing_file() {
        let path = Path::new("/nonexistent/dir/file.sexpr");
        let e = read_file(path, &LABTEXT_SETTINGS).unwrap_err();
        assert!(matches!(e, ReadErrorWithLocation::IO(..)));
        assert!(e.to_string().starts_with("\"/nonexistent/dir/file.sexpr\": "));
    }
}
