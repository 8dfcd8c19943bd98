// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Translating a buffer into a token sequence delivered to a
//! [Sink](../sink/trait.Sink.html). Lists are not built as trees:
//! the only tokens that denote nesting are `PushList` and `PopList`,
//! and nested lists are appended to the same sink.
//!
//! The parser expects a `(` (after whitespace and `;` comments),
//! then runs until the buffer is exhausted, so several top-level
//! lists, and even bare tokens between them, end up in the same
//! sink. Whether the input was well formed is reported through the
//! [Outcome](Outcome) and the final balance.

use crate::cursor::Cursor;
use crate::chain::{Cell, ChainSink};
use crate::flat::FlatSexpr;
use crate::number::is_whitespace;
use crate::pos::Pos;
use crate::settings::{NumericPolicy, Settings};
use crate::sink::Sink;
use crate::value::Token;
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected '(', got '{0}'")]
    MissingOpenParen(char),
    #[error("unexpected closing character ')'")]
    UnexpectedClosingParen,
    #[error("nesting too deep")]
    NestingTooDeep,
    #[error("premature EOF while expecting closing character ')' for '('")]
    PrematureEof,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{err} {pos}")]
pub struct ParseErrorWithPos {
    pub err: ParseError,
    pub pos: Pos
}

impl ParseError {
    fn at(self, p: Pos) -> ParseErrorWithPos {
        ParseErrorWithPos {
            err: self,
            pos: p
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The buffer is exhausted and the balance is back at its
    /// starting value.
    Complete,
    /// The buffer ended inside a list; `open` is the position of the
    /// innermost unclosed paren.
    Truncated { open: Pos },
    /// No `(` where one was required, a `)` closing more lists than
    /// were open, or nesting beyond `Settings::max_depth`.
    Malformed(ParseErrorWithPos),
}

#[derive(Debug, Clone)]
pub struct Parsed<'s> {
    /// The remaining input. The parser only stops on an exhausted
    /// cursor, so this is always empty, also after an error; the
    /// position of an error is in the `Outcome`.
    pub rest: Cursor<'s>,
    pub balance: i32,
    pub outcome: Outcome,
}

impl<'s> Parsed<'s> {
    pub fn is_complete(&self) -> bool {
        self.outcome == Outcome::Complete
    }

    pub fn into_result(self) -> Result<i32, ParseErrorWithPos> {
        match self.outcome {
            Outcome::Complete => Ok(self.balance),
            Outcome::Truncated { open } => Err(ParseError::PrematureEof.at(open)),
            Outcome::Malformed(e) => Err(e),
        }
    }
}

/// The bytes ending a bare token.
pub fn is_token_boundary(b: u8) -> bool {
    b == b'(' || b == b')' || b == b'"' || b == b';' || is_whitespace(b)
}

// Whitespace and `;` line comments.
fn skip_blank<'s>(c: Cursor<'s>) -> Cursor<'s> {
    let mut c = c.skip_whitespace();
    while c.peek() == Some(b';') {
        c = c.skip_to_next_line();
    }
    c
}

/// Classify a bare token as float, integer or atom, in that order
/// of preference.
pub fn classify<'s>(token: Cursor<'s>, policy: NumericPolicy) -> Token<'s> {
    let accepted = |rest: &Cursor| {
        policy == NumericPolicy::Prefix || rest.is_empty()
    };
    if let Some((rest, v)) = token.scan_float() {
        if accepted(&rest) {
            return Token::Float(v)
        }
    }
    if let Some((rest, n)) = token.scan_int32() {
        if accepted(&rest) {
            return Token::Integer(n.into())
        }
    }
    Token::Atom(token.as_str())
}

/// Parse from `cursor` into `sink`, starting the nesting count at
/// `balance`. See the module documentation. A sink keeping its own
/// count, like [FlatSexpr](../flat/type.FlatSexpr.html), must have
/// been started at the same `balance`; [parse_into_flat] takes care
/// of that.
pub fn parse_sexpr<'s>(
    cursor: Cursor<'s>,
    sink: &mut impl Sink<'s>,
    balance: i32,
    settings: &Settings,
) -> Parsed<'s>
{
    let src = cursor.source();
    let start_balance = balance;
    let mut balance = balance;
    // Offsets of the parens opened in this invocation and not yet
    // closed.
    let mut open: Vec<usize> = Vec::new();
    let mut stray_close: Option<usize> = None;

    let finish = |rest: Cursor<'s>, balance: i32, outcome: Outcome| {
        debug!(balance, ?outcome, "parse_sexpr finished");
        Parsed { rest, balance, outcome }
    };
    let malformed = |err: ParseError, offset: usize| {
        Outcome::Malformed(err.at(Pos::of_offset(src, offset)))
    };

    let mut curr = skip_blank(cursor);
    match curr.peek() {
        None => return finish(curr, balance, Outcome::Complete),
        Some(b'(') => {}
        Some(_) => {
            let c = curr.as_str().chars().next().unwrap_or('\u{FFFD}');
            let outcome = malformed(ParseError::MissingOpenParen(c),
                                    curr.offset());
            return finish(curr.exhausted(), balance, outcome)
        }
    }

    loop {
        curr = curr.skip_whitespace();
        let c = match curr.peek() {
            Some(c) => c,
            None => break,
        };
        match c {
            b';' => {
                curr = curr.skip_to_next_line();
            }
            b'"' => {
                if let Some((rest, s)) = curr.quoted_string(
                    b'"', settings.string_escapes)
                {
                    sink.string(s);
                    curr = rest;
                } else {
                    curr = curr.exhausted();
                }
            }
            b')' => {
                balance -= 1;
                trace!(offset = curr.offset(), balance, "pop list");
                sink.pop_list();
                open.pop();
                if balance < start_balance && stray_close.is_none() {
                    stray_close = Some(curr.offset());
                }
                curr = curr.advance(1);
            }
            b'(' => {
                // Depth counts the lists opened by this call, not the
                // caller's starting balance.
                if let Some(max) = settings.max_depth {
                    if open.len() >= max as usize {
                        let outcome = malformed(ParseError::NestingTooDeep,
                                                curr.offset());
                        return finish(curr.exhausted(), balance, outcome)
                    }
                }
                balance += 1;
                trace!(offset = curr.offset(), balance, "push list");
                sink.push_list();
                open.push(curr.offset());
                curr = curr.advance(1);
            }
            _ => {
                let (rest, text) = curr.token_until(is_token_boundary);
                if text.is_empty() {
                    // Can't happen, the current byte is no boundary.
                    curr = curr.advance(1);
                    continue;
                }
                let token = curr.take(text.len());
                // The unconsumed rest of a partially numeric token is
                // dropped along with the token.
                sink.token(classify(token, settings.numeric));
                curr = rest;
            }
        }
    }

    let outcome =
        if let Some(offset) = stray_close {
            malformed(ParseError::UnexpectedClosingParen, offset)
        } else if balance == start_balance {
            Outcome::Complete
        } else {
            let offset = open.last().copied().unwrap_or(cursor.offset());
            Outcome::Truncated { open: Pos::of_offset(src, offset) }
        };
    finish(curr, balance, outcome)
}

/// Parse from `cursor`, appending to `sexpr` and continuing from its
/// balance. Afterwards `sexpr.balance()` equals the returned balance.
pub fn parse_into_flat<'s>(
    cursor: Cursor<'s>,
    sexpr: &mut FlatSexpr<'s>,
    settings: &Settings,
) -> Parsed<'s>
{
    let balance = sexpr.balance();
    parse_sexpr(cursor, sexpr, balance, settings)
}

/// Parse all of `src` into the flat representation. Anything but a
/// complete parse is an error.
pub fn parse_flat<'s>(
    src: &'s str,
    settings: &Settings,
) -> Result<FlatSexpr<'s>, ParseErrorWithPos>
{
    let mut sexpr = FlatSexpr::new();
    parse_sexpr(Cursor::new(src), &mut sexpr, 0, settings).into_result()?;
    Ok(sexpr)
}

/// Parse all of `src`, appending cells after the end of the chain
/// starting at `head`.
pub fn parse_chain<'s>(
    src: &'s str,
    head: &mut Cell<'s>,
    settings: &Settings,
) -> Result<(), ParseErrorWithPos>
{
    let mut sink = ChainSink::new(head);
    parse_sexpr(Cursor::new(src), &mut sink, 0, settings).into_result()?;
    Ok(())
}
