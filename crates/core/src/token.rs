//! Stack values
//!
//! FALSE has exactly three kinds of value. Numbers are 32-bit and wrap on
//! overflow. Variables are references to one of the 26 storage cells and are
//! only dereferenced by `;`. Lambdas are unexecuted code, kept as a slice of
//! the source text between (and excluding) their brackets.

use crate::slice::Slice;
use std::fmt;

/// Canonical boolean of the language: 0 for false, -1 (all bits set) for true
pub const fn truth(b: bool) -> i32 {
    if b { -1 } else { 0 }
}

/// A single stack entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Number(i32),
    /// Always a lowercase ASCII letter when produced by the evaluator
    Variable(char),
    Lambda(Slice),
}

impl Token {
    pub const fn number(n: i32) -> Self {
        Token::Number(n)
    }

    pub const fn variable(letter: char) -> Self {
        Token::Variable(letter)
    }

    pub const fn lambda(body: Slice) -> Self {
        Token::Lambda(body)
    }

    /// Renderer for traces and diagnostics
    ///
    /// Lambdas need the source buffer to show their body, so rendering
    /// borrows it.
    pub fn display<'a>(&'a self, source: &'a [u8]) -> TokenDisplay<'a> {
        TokenDisplay {
            token: self,
            source,
        }
    }

    /// Rendered form, as a string
    pub fn render(&self, source: &[u8]) -> String {
        self.display(source).to_string()
    }
}

/// `Display` adapter returned by [`Token::display`]
pub struct TokenDisplay<'a> {
    token: &'a Token,
    source: &'a [u8],
}

impl fmt::Display for TokenDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.token {
            Token::Number(n) => write!(f, "{}", n),
            Token::Variable(c) => write!(f, "{}", c),
            Token::Lambda(body) => {
                write!(f, "[{}]", String::from_utf8_lossy(body.text(self.source)))
            }
        }
    }
}
