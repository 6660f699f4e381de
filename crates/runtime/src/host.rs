//! Host interface
//!
//! The evaluator never touches stdin, stdout or stderr itself. Everything
//! observable goes through a [`Host`], supplied in the run's
//! [`Config`](crate::Config). The CLI implements it over stdio;
//! [`BufferHost`] keeps everything in memory for tests and embedding.

use std::collections::VecDeque;

/// Returned by [`Host::input`] when no input is left
pub const END_OF_INPUT: i32 = -1;

pub trait Host {
    /// `.`: print a number in decimal
    fn emit_number(&mut self, n: i32);

    /// String literal contents, one decoded character at a time
    fn emit_char(&mut self, c: char);

    /// `,`: print the low byte of a number as-is
    ///
    /// Bytes read with `^` are written back unchanged this way, so FALSE
    /// filters work on arbitrary input.
    fn emit_byte(&mut self, b: u8);

    /// `^`: next input unit, or [`END_OF_INPUT`]
    fn input(&mut self) -> i32;

    /// `ß`: discard buffered input, if the host has any
    fn flush(&mut self) {}

    /// Called exactly once when a run fails
    ///
    /// `position` is the byte offset of the offending character, or `None`
    /// for errors that are not tied to the source text.
    fn fatal(&mut self, position: Option<usize>, message: &str) {
        let _ = (position, message);
    }

    /// Called for every digit and operator character as it is executed
    fn log_trace(&mut self, c: char, position: usize) {
        let _ = (c, position);
    }
}

/// In-memory host: scripted input, captured output
#[derive(Debug, Default)]
pub struct BufferHost {
    output: Vec<u8>,
    input: VecDeque<u8>,
    failures: Vec<(Option<usize>, String)>,
    trace: Vec<(char, usize)>,
    flushes: usize,
}

impl BufferHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host whose `^` reads from `input`
    pub fn with_input(input: impl AsRef<[u8]>) -> Self {
        BufferHost {
            input: input.as_ref().iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Output decoded as UTF-8, with invalid bytes replaced
    pub fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    /// Every `fatal` call received, in order
    pub fn failures(&self) -> &[(Option<usize>, String)] {
        &self.failures
    }

    /// Every `log_trace` call received, in order
    pub fn trace(&self) -> &[(char, usize)] {
        &self.trace
    }

    pub fn flushes(&self) -> usize {
        self.flushes
    }
}

impl Host for BufferHost {
    fn emit_number(&mut self, n: i32) {
        self.output.extend_from_slice(n.to_string().as_bytes());
    }

    fn emit_char(&mut self, c: char) {
        let mut buf = [0; 4];
        self.output
            .extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
    }

    fn emit_byte(&mut self, b: u8) {
        self.output.push(b);
    }

    fn input(&mut self) -> i32 {
        self.input
            .pop_front()
            .map_or(END_OF_INPUT, i32::from)
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }

    fn fatal(&mut self, position: Option<usize>, message: &str) {
        self.failures.push((position, message.to_string()));
    }

    fn log_trace(&mut self, c: char, position: usize) {
        self.trace.push((c, position));
    }
}
