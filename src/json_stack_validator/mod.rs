//! Pushdown automaton that accepts or rejects a token stream as JSON.
//!
//! No tree is built. The stack only remembers enough shape to decide whether
//! the next token is legal, and when an object or array has just closed so the
//! enclosing rule can consume it as a single value.

use std::io::Read;

use log::{debug, trace};

use crate::json_tok::Scanner;
use crate::json_types::{JsonError, Kind, SyntaxError};

/// Deepest allowed nesting of `{` / `[`.
pub const MAX_DEPTH: usize = 19;

/// Stack alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    LeftBrace,
    LeftSquare,
    Colon,
    Comma,
    String,
    Null,
    True,
    False,
    Number,
    /// a completed `"key": value` pair
    KeyValue,
    /// a closed `{...}` standing in an array
    Object,
    /// a closed `[...]` standing in an array
    Array,
}

#[derive(Debug, Default)]
pub struct Validator {
    stack: Vec<Symbol>,
    nesting: usize,
    processed: usize,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pull tokens until `EndOfInput` or the first fault.
    ///
    /// Consumes the validator: every run starts from an empty stack.
    pub fn validate<R: Read>(mut self, scanner: &mut Scanner<R>) -> Result<(), JsonError> {
        loop {
            let tok = match scanner.next_token() {
                Ok(tok) => tok,
                Err(e) => {
                    debug!("scan failed at byte {}: {}", scanner.offset(), e);
                    return Err(e);
                }
            };

            if let Err(e) = self.step(tok.kind) {
                debug!(
                    "rejected {} at byte {} (stack depth {}, nesting {}): {}",
                    tok,
                    scanner.offset(),
                    self.stack.len(),
                    self.nesting,
                    e
                );
                return Err(e.into());
            }

            if tok.is_eoi() {
                return Ok(());
            }
        }
    }

    /// Apply the transition for one token. `Ok` on `EndOfInput` means accept.
    pub fn step(&mut self, kind: Kind) -> Result<(), SyntaxError> {
        let res = match kind {
            Kind::LeftBrace => self.open(Symbol::LeftBrace),
            Kind::LeftSquare => self.open(Symbol::LeftSquare),
            Kind::RightBrace => self.close_object(),
            Kind::RightSquare => self.close_array(),
            Kind::String => self.string(),
            Kind::Colon => self.colon(),
            Kind::Comma => self.comma(),
            Kind::Null => self.scalar(Symbol::Null),
            Kind::True => self.scalar(Symbol::True),
            Kind::False => self.scalar(Symbol::False),
            Kind::Number => self.scalar(Symbol::Number),
            Kind::EndOfInput => self.finish(),
        };
        trace!("{:?} → {:?}", kind, self.stack);
        res
    }

    pub fn stack(&self) -> &[Symbol] {
        &self.stack
    }

    pub fn nesting(&self) -> usize {
        self.nesting
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    fn top(&self) -> Option<Symbol> {
        self.stack.last().copied()
    }

    fn open(&mut self, sym: Symbol) -> Result<(), SyntaxError> {
        self.stack.push(sym);
        self.nesting += 1;
        if self.nesting > MAX_DEPTH {
            return Err(SyntaxError::DepthExceeded);
        }
        Ok(())
    }

    /// Only a contiguous run of key-value pairs may sit above the `{`.
    fn close_object(&mut self) -> Result<(), SyntaxError> {
        if !matches!(self.top(), Some(Symbol::KeyValue | Symbol::LeftBrace)) {
            return Err(SyntaxError::PrematureCloser);
        }
        while self.top() == Some(Symbol::KeyValue) {
            self.stack.pop();
        }
        if self.top() != Some(Symbol::LeftBrace) {
            return Err(SyntaxError::UnmatchedCloser);
        }
        self.stack.pop();
        self.reduce(Symbol::Object)
    }

    /// Unlike `}`, drops whatever sits above the nearest opener, so element
    /// separators inside an array are not re-checked here.
    fn close_array(&mut self) -> Result<(), SyntaxError> {
        if matches!(
            self.top(),
            Some(Symbol::Comma | Symbol::LeftBrace | Symbol::Colon | Symbol::KeyValue)
        ) {
            return Err(SyntaxError::PrematureCloser);
        }
        // an open `{` nearer than any `[` means `]` would cross it: rejected
        let opener = self
            .stack
            .iter()
            .rposition(|s| matches!(s, Symbol::LeftSquare | Symbol::LeftBrace));
        match opener {
            Some(at) if self.stack[at] == Symbol::LeftSquare => self.stack.truncate(at),
            _ => return Err(SyntaxError::UnmatchedCloser),
        }
        self.reduce(Symbol::Array)
    }

    /// A structure just closed; hand it to whatever context it was a value in.
    fn reduce(&mut self, marker: Symbol) -> Result<(), SyntaxError> {
        self.nesting -= 1;
        self.processed += 1;
        match self.top() {
            Some(Symbol::Colon) => {
                self.stack.pop();
                self.bind_key()
            }
            Some(Symbol::Comma) => {
                self.stack.pop();
                self.stack.push(marker);
                Ok(())
            }
            Some(Symbol::LeftSquare) => {
                self.stack.push(marker);
                Ok(())
            }
            // top level, or the quirk case of a value with no separator
            _ => Ok(()),
        }
    }

    /// Colon already popped; the key must be right beneath it.
    fn bind_key(&mut self) -> Result<(), SyntaxError> {
        if self.top() != Some(Symbol::String) {
            return Err(SyntaxError::OrphanValue);
        }
        self.stack.pop();
        self.stack.push(Symbol::KeyValue);
        Ok(())
    }

    fn string(&mut self) -> Result<(), SyntaxError> {
        match self.top() {
            Some(Symbol::Comma) => {
                self.stack.pop();
                self.stack.push(Symbol::String);
                Ok(())
            }
            Some(Symbol::LeftBrace | Symbol::LeftSquare) => {
                self.stack.push(Symbol::String);
                Ok(())
            }
            Some(Symbol::Colon) => {
                self.stack.pop();
                self.bind_key()
            }
            _ => Err(SyntaxError::InvalidString),
        }
    }

    fn colon(&mut self) -> Result<(), SyntaxError> {
        if self.top() != Some(Symbol::String) {
            return Err(SyntaxError::PrematureColon);
        }
        self.stack.push(Symbol::Colon);
        Ok(())
    }

    fn comma(&mut self) -> Result<(), SyntaxError> {
        match self.top() {
            None | Some(Symbol::LeftBrace | Symbol::LeftSquare | Symbol::Comma) => {
                Err(SyntaxError::InvalidComma)
            }
            Some(_) => {
                self.stack.push(Symbol::Comma);
                Ok(())
            }
        }
    }

    /// `null`, `true`, `false` or a number.
    fn scalar(&mut self, sym: Symbol) -> Result<(), SyntaxError> {
        match self.top() {
            Some(Symbol::Colon) => {
                self.stack.pop();
                self.bind_key()
            }
            Some(Symbol::Comma) => {
                self.stack.pop();
                self.stack.push(sym);
                Ok(())
            }
            Some(Symbol::LeftSquare) => {
                self.stack.push(sym);
                Ok(())
            }
            _ => Err(SyntaxError::InvalidValue),
        }
    }

    fn finish(&self) -> Result<(), SyntaxError> {
        if self.processed > 0 && self.stack.is_empty() {
            Ok(())
        } else {
            Err(SyntaxError::PrematureEndOfInput)
        }
    }
}

#[cfg(test)]
mod tests;
