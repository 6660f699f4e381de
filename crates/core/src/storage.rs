//! Variable storage
//!
//! Exactly 26 cells, one per lowercase letter. A cell can hold any token,
//! including a lambda, which is how FALSE defines functions: `[1+]f:`.

use crate::token::Token;

const CELLS: usize = 26;

/// The cells `a`..`z`
#[derive(Debug, Clone)]
pub struct Storage {
    cells: [Token; CELLS],
}

impl Default for Storage {
    fn default() -> Self {
        Storage {
            cells: [Token::Number(0); CELLS],
        }
    }
}

impl Storage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset every cell to `0`
    pub fn clear(&mut self) {
        self.cells.fill(Token::Number(0));
    }

    /// Read a cell; anything but `a`..`z` reads as `0`
    pub fn get(&self, letter: char) -> Token {
        match index(letter) {
            Some(i) => self.cells[i],
            None => Token::Number(0),
        }
    }

    /// Write a cell; anything but `a`..`z` is ignored
    pub fn set(&mut self, letter: char, token: Token) {
        if let Some(i) = index(letter) {
            self.cells[i] = token;
        }
    }
}

fn index(letter: char) -> Option<usize> {
    letter
        .is_ascii_lowercase()
        .then(|| letter as usize - 'a' as usize)
}
