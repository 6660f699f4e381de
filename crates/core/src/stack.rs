//! Operand stack
//!
//! A plain `Vec<Token>` with the word set FALSE needs: the classic
//! `dup drop swap rot pick` plus the Forth extensions `over nip tuck 2dup roll`
//! and a whole-stack `reverse`.
//!
//! Every public operation either succeeds completely or fails with
//! `Underflow` / `TypeMismatch` before touching the stack. Typed pops are the
//! one exception: they consume the token before checking its tag, which is
//! harmless because any error ends the run.
//!
//! # Tracing
//!
//! When a sink is installed, each successful operation reports one record:
//!
//! ```text
//! op = "push", record = "5\t 1 [...] 5"
//! ```
//!
//! The part before the TAB is the operand (the pushed or popped token, empty
//! for other operations), the part after it is the resulting stack from bottom
//! to top, each element preceded by a space. Lambdas whose rendering is longer
//! than four characters are shown as `[...]`.

use crate::error::ErrorKind;
use crate::slice::Slice;
use crate::token::Token;

/// Receives `(operation, record)` for every successful stack operation
pub type StackSink<'a> = Box<dyn FnMut(&str, &str) + 'a>;

/// Renderings longer than this are elided in trace records
const CONCISE_LIMIT: usize = 4;

pub struct Stack<'a> {
    items: Vec<Token>,
    /// Needed to render lambdas in trace records
    source: &'a [u8],
    sink: Option<StackSink<'a>>,
}

impl<'a> Stack<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        Stack {
            items: Vec::new(),
            source,
            sink: None,
        }
    }

    /// Install a trace sink; see the module docs for the record format
    pub fn with_sink(mut self, sink: StackSink<'a>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn depth(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Elements from bottom to top
    pub fn as_slice(&self) -> &[Token] {
        &self.items
    }

    pub fn peek(&self) -> Option<&Token> {
        self.items.last()
    }

    /// Stack effect: ( -- x )
    pub fn push(&mut self, token: Token) {
        self.items.push(token);
        self.log("push", Some(&token));
    }

    /// Stack effect: ( x -- )
    pub fn pop(&mut self) -> Result<Token, ErrorKind> {
        let token = self.items.pop().ok_or(ErrorKind::Underflow)?;
        self.log("pop", Some(&token));
        Ok(token)
    }

    pub fn pop_number(&mut self) -> Result<i32, ErrorKind> {
        match self.pop()? {
            Token::Number(n) => Ok(n),
            _ => Err(ErrorKind::TypeMismatch),
        }
    }

    pub fn pop_variable(&mut self) -> Result<char, ErrorKind> {
        match self.pop()? {
            Token::Variable(c) => Ok(c),
            _ => Err(ErrorKind::TypeMismatch),
        }
    }

    pub fn pop_lambda(&mut self) -> Result<Slice, ErrorKind> {
        match self.pop()? {
            Token::Lambda(body) => Ok(body),
            _ => Err(ErrorKind::TypeMismatch),
        }
    }

    /// Stack effect: ( a -- a a )
    pub fn dup(&mut self) -> Result<(), ErrorKind> {
        let top = self.nth(0)?;
        self.items.push(top);
        self.log("dup", None);
        Ok(())
    }

    /// Stack effect: ( a -- )
    pub fn drop(&mut self) -> Result<(), ErrorKind> {
        self.items.pop().ok_or(ErrorKind::Underflow)?;
        self.log("drop", None);
        Ok(())
    }

    /// Stack effect: ( a b -- b a )
    pub fn swap(&mut self) -> Result<(), ErrorKind> {
        self.require(2)?;
        let len = self.items.len();
        self.items.swap(len - 1, len - 2);
        self.log("swap", None);
        Ok(())
    }

    /// Stack effect: ( a b c -- b c a )
    pub fn rot(&mut self) -> Result<(), ErrorKind> {
        self.require(3)?;
        let len = self.items.len();
        self.items[len - 3..].rotate_left(1);
        self.log("rot", None);
        Ok(())
    }

    /// Copy the element `n` positions below the top (0 is the top itself)
    ///
    /// Stack effect: ( xn ... x0 -- xn ... x0 xn )
    pub fn pick(&mut self, n: usize) -> Result<(), ErrorKind> {
        let token = self.nth(n)?;
        self.items.push(token);
        self.log("pick", None);
        Ok(())
    }

    /// Stack effect: ( a b -- a b a )
    pub fn over(&mut self) -> Result<(), ErrorKind> {
        let second = self.nth(1)?;
        self.items.push(second);
        self.log("over", None);
        Ok(())
    }

    /// Stack effect: ( a b -- b )
    pub fn nip(&mut self) -> Result<(), ErrorKind> {
        self.require(2)?;
        let len = self.items.len();
        self.items.remove(len - 2);
        self.log("nip", None);
        Ok(())
    }

    /// Stack effect: ( a b -- b a b )
    pub fn tuck(&mut self) -> Result<(), ErrorKind> {
        self.require(2)?;
        let len = self.items.len();
        let top = self.items[len - 1];
        self.items.insert(len - 2, top);
        self.log("tuck", None);
        Ok(())
    }

    /// Stack effect: ( a b -- a b a b )
    pub fn two_dup(&mut self) -> Result<(), ErrorKind> {
        self.require(2)?;
        let len = self.items.len();
        self.items.extend_from_within(len - 2..);
        self.log("2dup", None);
        Ok(())
    }

    /// Reverse the whole stack; never fails
    pub fn reverse(&mut self) {
        self.items.reverse();
        self.log("reverse", None);
    }

    /// Rotate the top `n + 1` elements, bringing the deepest of them to the top
    ///
    /// `0 roll` is a no-op, `1 roll` is `swap`, `2 roll` is `rot`.
    ///
    /// Stack effect: ( xn ... x1 x0 -- xn-1 ... x0 xn )
    pub fn roll(&mut self, n: usize) -> Result<(), ErrorKind> {
        self.nth(n)?;
        let index = self.items.len() - 1 - n;
        let token = self.items.remove(index);
        self.items.push(token);
        self.log("roll", None);
        Ok(())
    }

    fn require(&self, n: usize) -> Result<(), ErrorKind> {
        if self.items.len() < n {
            Err(ErrorKind::Underflow)
        } else {
            Ok(())
        }
    }

    /// Element `n` positions below the top
    fn nth(&self, n: usize) -> Result<Token, ErrorKind> {
        self.items
            .iter()
            .rev()
            .nth(n)
            .copied()
            .ok_or(ErrorKind::Underflow)
    }

    fn concise(&self, token: &Token) -> String {
        let rendered = token.render(self.source);
        if matches!(token, Token::Lambda(_)) && rendered.chars().count() > CONCISE_LIMIT {
            "[...]".to_string()
        } else {
            rendered
        }
    }

    fn log(&mut self, op: &str, operand: Option<&Token>) {
        if self.sink.is_none() {
            return;
        }

        let mut record = operand.map(|t| self.concise(t)).unwrap_or_default();
        record.push('\t');
        for token in &self.items {
            record.push(' ');
            record.push_str(&self.concise(token));
        }

        if let Some(sink) = self.sink.as_mut() {
            sink(op, &record);
        }
    }
}
