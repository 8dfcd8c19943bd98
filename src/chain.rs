// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The linked parse representation: a singly linked, append-only
//! chain of heap allocated cells, each carrying its own payload.
//!
//! A chain starts with a sentinel cell that has no meaning and only
//! serves as the place to append to; [Cell::tokens](Cell::tokens)
//! skips it.

use crate::sink::Sink;
use crate::value::{Kind, Token};

#[derive(Debug)]
pub struct Cell<'s> {
    pub token: Token<'s>,
    pub next: Option<Box<Cell<'s>>>,
}

impl<'s> Cell<'s> {
    pub fn new(token: Token<'s>) -> Cell<'s> {
        Cell { token, next: None }
    }

    /// An empty atom without successor.
    pub fn sentinel() -> Cell<'s> {
        Cell::new(Token::Atom(""))
    }

    pub fn kind(&self) -> Kind {
        self.token.kind()
    }

    /// This cell and all its successors.
    pub fn iter(&self) -> Cells<'_, 's> {
        Cells { cell: Some(self) }
    }

    /// The tokens after this (sentinel) cell.
    pub fn tokens(&self) -> impl Iterator<Item = Token<'s>> + '_ {
        self.iter().skip(1).map(|c| c.token)
    }

    pub fn last_mut(&mut self) -> &mut Cell<'s> {
        let mut cell = self;
        loop {
            match cell.next {
                Some(ref mut next) => cell = &mut **next,
                None => return cell,
            }
        }
    }
}

// The default recursive drop of the boxes would use stack space
// proportional to the chain length.
impl<'s> Drop for Cell<'s> {
    fn drop(&mut self) {
        let mut next = self.next.take();
        while let Some(mut cell) = next {
            next = cell.next.take();
        }
    }
}

pub struct Cells<'c, 's> {
    cell: Option<&'c Cell<'s>>,
}

impl<'c, 's> Iterator for Cells<'c, 's> {
    type Item = &'c Cell<'s>;

    fn next(&mut self) -> Option<&'c Cell<'s>> {
        let cell = self.cell?;
        self.cell = cell.next.as_deref();
        Some(cell)
    }
}

/// Appends cells to the end of an existing chain.
pub struct ChainSink<'c, 's> {
    // Only `None` transiently during an append.
    tail: Option<&'c mut Cell<'s>>,
    appended: usize,
}

impl<'c, 's> ChainSink<'c, 's> {
    /// Appending after the last cell reachable from `head`, usually a
    /// fresh `Cell::sentinel()`.
    pub fn new(head: &'c mut Cell<'s>) -> ChainSink<'c, 's> {
        ChainSink { tail: Some(head.last_mut()), appended: 0 }
    }

    /// Number of cells appended through this sink.
    pub fn appended(&self) -> usize {
        self.appended
    }

    fn append(&mut self, token: Token<'s>) {
        if let Some(tail) = self.tail.take() {
            let cell = tail.next.insert(Box::new(Cell::new(token)));
            self.tail = Some(&mut **cell);
            self.appended += 1;
        }
    }
}

impl<'c, 's> Sink<'s> for ChainSink<'c, 's> {
    fn push_list(&mut self) {
        self.append(Token::PushList)
    }
    fn pop_list(&mut self) {
        self.append(Token::PopList)
    }
    fn atom(&mut self, text: &'s str) {
        self.append(Token::Atom(text))
    }
    fn string(&mut self, text: &'s str) {
        self.append(Token::String(text))
    }
    fn integer(&mut self, n: i64) {
        self.append(Token::Integer(n))
    }
    fn float(&mut self, v: f64) {
        self.append(Token::Float(v))
    }
}
