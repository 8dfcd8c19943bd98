// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The flat (columnar) parse representation: one sequence of tagged
//! elements, with literal payloads in per-kind side tables. Atoms and
//! strings share the string table.

//! [FlatSexpr](FlatSexpr) borrows its strings from the parsed buffer;
//! [OwnedSexpr](OwnedSexpr) (via `into_owned`) carries its own copies
//! and can outlive the buffer.

use crate::sink::Sink;
use crate::value::{Kind, Token};
use kstring::KString;

/// `index` points into the table for `kind`; it is 0 for the list
/// markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elem {
    pub kind: Kind,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sexpr<S> {
    elements: Vec<Elem>,
    integers: Vec<i64>,
    floats: Vec<f64>,
    strings: Vec<S>,
    balance: i32,
}

pub type FlatSexpr<'s> = Sexpr<&'s str>;
pub type OwnedSexpr = Sexpr<KString>;

impl<S> Sexpr<S> {
    pub fn new() -> Sexpr<S> {
        Sexpr::with_balance(0)
    }

    /// Start counting from `balance` instead of 0, for continuing a
    /// parse that stopped inside a list. The count is kept apart from
    /// the parser's: pass the same `balance` to `parse_sexpr`, or use
    /// `parse_into_flat`, which reads it from here.
    pub fn with_balance(balance: i32) -> Sexpr<S> {
        Sexpr {
            elements: Vec::new(),
            integers: Vec::new(),
            floats: Vec::new(),
            strings: Vec::new(),
            balance,
        }
    }

    pub fn elements(&self) -> &[Elem] {
        &self.elements
    }
    pub fn integers(&self) -> &[i64] {
        &self.integers
    }
    pub fn floats(&self) -> &[f64] {
        &self.floats
    }
    pub fn strings(&self) -> &[S] {
        &self.strings
    }

    /// Opened minus closed lists, plus the starting balance.
    pub fn balance(&self) -> i32 {
        self.balance
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn push(&mut self, kind: Kind, index: usize) {
        self.elements.push(Elem { kind, index })
    }
}

impl<S: AsRef<str>> Sexpr<S> {
    pub fn token(&self, elem: Elem) -> Token<'_> {
        match elem.kind {
            Kind::Atom => Token::Atom(self.strings[elem.index].as_ref()),
            Kind::PushList => Token::PushList,
            Kind::PopList => Token::PopList,
            Kind::Integer => Token::Integer(self.integers[elem.index]),
            Kind::Float => Token::Float(self.floats[elem.index]),
            Kind::String => Token::String(self.strings[elem.index].as_ref()),
        }
    }

    /// The elements with their payloads resolved.
    pub fn tokens(&self) -> impl Iterator<Item = Token<'_>> + '_ {
        self.elements.iter().map(|e| self.token(*e))
    }
}

impl<S> Default for Sexpr<S> {
    fn default() -> Sexpr<S> {
        Sexpr::new()
    }
}

impl<'s> FlatSexpr<'s> {
    /// Copy the strings, detaching the result from the parsed buffer.
    pub fn into_owned(self) -> OwnedSexpr {
        let Sexpr { elements, integers, floats, strings, balance } = self;
        Sexpr {
            elements,
            integers,
            floats,
            strings: strings.into_iter().map(KString::from_ref).collect(),
            balance,
        }
    }
}

impl<'s> Sink<'s> for FlatSexpr<'s> {
    fn push_list(&mut self) {
        self.balance += 1;
        self.push(Kind::PushList, 0)
    }
    fn pop_list(&mut self) {
        self.balance -= 1;
        self.push(Kind::PopList, 0)
    }
    fn atom(&mut self, text: &'s str) {
        self.push(Kind::Atom, self.strings.len());
        self.strings.push(text)
    }
    fn string(&mut self, text: &'s str) {
        self.push(Kind::String, self.strings.len());
        self.strings.push(text)
    }
    fn integer(&mut self, n: i64) {
        self.push(Kind::Integer, self.integers.len());
        self.integers.push(n)
    }
    fn float(&mut self, v: f64) {
        self.push(Kind::Float, self.floats.len());
        self.floats.push(v)
    }
}

impl<S: AsRef<str>> std::fmt::Display for Sexpr<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        crate::read::fmt_tokens(f, self.tokens())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_tables() {
        let mut s = FlatSexpr::new();
        s.push_list();
        s.atom("a");
        s.integer(1);
        s.string("two");
        s.float(3.5);
        s.atom("b");
        s.pop_list();
        assert_eq!(s.balance(), 0);
        assert_eq!(s.integers(), &[1]);
        assert_eq!(s.floats(), &[3.5]);
        assert_eq!(s.strings(), &["a", "two", "b"]);
        let kinds: Vec<Kind> = s.elements().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![Kind::PushList, Kind::Atom, Kind::Integer,
                               Kind::String, Kind::Float, Kind::Atom,
                               Kind::PopList]);
        assert_eq!(s.elements()[5], Elem { kind: Kind::Atom, index: 2 });
    }

    #[test]
    fn owned_copy_matches() {
        let buf = String::from("(x \"y\")");
        let mut s = FlatSexpr::with_balance(2);
        s.push_list();
        s.atom(&buf[1..2]);
        s.string(&buf[4..5]);
        let borrowed: Vec<String> = s.tokens().map(|t| t.to_string()).collect();
        let owned = s.into_owned();
        drop(buf);
        let copied: Vec<String> = owned.tokens().map(|t| t.to_string()).collect();
        assert_eq!(borrowed, copied);
        assert_eq!(owned.balance(), 3);
    }
}
