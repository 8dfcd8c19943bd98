// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The token kinds shared by both parse representations.

//! [Kind](Kind) is the bare tag; [Token](Token) carries the payload,
//! borrowing text from the parsed buffer.

use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Kind {
    #[default]
    Atom,
    PushList,
    PopList,
    Integer,
    Float,
    String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'s> {
    Atom(&'s str),
    PushList,
    PopList,
    Integer(i64),
    Float(f64),
    /// Raw bytes between the quotes, escape sequences unresolved.
    String(&'s str),
}

impl<'s> Token<'s> {
    pub fn kind(&self) -> Kind {
        match self {
            Token::Atom(_) => Kind::Atom,
            Token::PushList => Kind::PushList,
            Token::PopList => Kind::PopList,
            Token::Integer(_) => Kind::Integer,
            Token::Float(_) => Kind::Float,
            Token::String(_) => Kind::String,
        }
    }

    /// The text payload of atoms and strings.
    pub fn text(&self) -> Option<&'s str> {
        match self {
            Token::Atom(s) | Token::String(s) => Some(*s),
            _ => None
        }
    }
}

// Floats always get a '.', otherwise they would read back as
// integers.
fn fmt_float(f: &mut std::fmt::Formatter<'_>, v: f64)
             -> Result<(), std::fmt::Error> {
    let s = format!("{}", v);
    f.write_str(&s)?;
    if v.is_finite() && !s.contains('.') {
        f.write_str(".0")?;
    }
    Ok(())
}

impl<'s> std::fmt::Display for Token<'s> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        match self {
            Token::Atom(s) => f.write_str(s),
            Token::PushList => f.write_char('('),
            Token::PopList => f.write_char(')'),
            Token::Integer(n) => f.write_fmt(format_args!("{}", n)),
            Token::Float(v) => fmt_float(f, *v),
            // Already in escaped form
            Token::String(s) => f.write_fmt(format_args!("\"{}\"", s)),
        }
    }
}
