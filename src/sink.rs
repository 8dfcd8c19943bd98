// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The receiving end of [parse_sexpr](../parse/fn.parse_sexpr.html).
//! The parser calls exactly one method per token, in grammar order;
//! nesting is only expressed by `push_list` / `pop_list` calls.

use crate::value::Token;

pub trait Sink<'s> {
    fn push_list(&mut self);
    fn pop_list(&mut self);
    fn atom(&mut self, text: &'s str);
    /// `text` is the raw content between the quotes.
    fn string(&mut self, text: &'s str);
    fn integer(&mut self, n: i64);
    fn float(&mut self, v: f64);

    fn token(&mut self, token: Token<'s>) {
        match token {
            Token::Atom(s) => self.atom(s),
            Token::PushList => self.push_list(),
            Token::PopList => self.pop_list(),
            Token::Integer(n) => self.integer(n),
            Token::Float(v) => self.float(v),
            Token::String(s) => self.string(s),
        }
    }
}

/// Collecting plain tokens, mostly useful for tests and for feeding
/// the writer.
impl<'s> Sink<'s> for Vec<Token<'s>> {
    fn push_list(&mut self) {
        self.push(Token::PushList)
    }
    fn pop_list(&mut self) {
        self.push(Token::PopList)
    }
    fn atom(&mut self, text: &'s str) {
        self.push(Token::Atom(text))
    }
    fn string(&mut self, text: &'s str) {
        self.push(Token::String(text))
    }
    fn integer(&mut self, n: i64) {
        self.push(Token::Integer(n))
    }
    fn float(&mut self, v: f64) {
        self.push(Token::Float(v))
    }
}
