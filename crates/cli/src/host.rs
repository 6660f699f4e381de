//! Host over byte streams (stdin/stdout in the binary)
//!
//! Output is buffered and flushed before every read, so prompts show up
//! before the program blocks on input. `--input` text is served first,
//! followed by a newline, and only then is the reader consulted.

use false_runtime::{END_OF_INPUT, Host, render_error};
use std::collections::VecDeque;
use std::io::{BufWriter, Read, Write};
use tracing::debug;

pub struct StdioHost<'a, R: Read, W: Write> {
    reader: R,
    writer: BufWriter<W>,
    pending: VecDeque<u8>,
    /// File name and source for error reports
    name: &'a str,
    source: &'a [u8],
    trace: bool,
}

impl<'a, R: Read, W: Write> StdioHost<'a, R, W> {
    pub fn new(reader: R, writer: W, name: &'a str, source: &'a [u8]) -> Self {
        StdioHost {
            reader,
            writer: BufWriter::new(writer),
            pending: VecDeque::new(),
            name,
            source,
            trace: false,
        }
    }

    /// Serve `input` and a newline before reading from the reader
    pub fn with_input(mut self, input: Option<&str>) -> Self {
        if let Some(text) = input {
            self.pending.extend(text.bytes());
            self.pending.push_back(b'\n');
        }
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn flush_output(&mut self) {
        // A closed stdout is not worth failing the run over
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
impl<R: Read> StdioHost<'_, R, Vec<u8>> {
    fn into_output(self) -> Vec<u8> {
        self.writer.into_inner().expect("flushing into a Vec")
    }
}

impl<R: Read, W: Write> Host for StdioHost<'_, R, W> {
    fn emit_number(&mut self, n: i32) {
        let _ = write!(self.writer, "{}", n);
    }

    fn emit_char(&mut self, c: char) {
        let _ = write!(self.writer, "{}", c);
    }

    fn emit_byte(&mut self, b: u8) {
        let _ = self.writer.write_all(&[b]);
    }

    fn input(&mut self) -> i32 {
        self.flush_output();
        if let Some(b) = self.pending.pop_front() {
            return i32::from(b);
        }

        let mut byte = [0u8; 1];
        match self.reader.read(&mut byte) {
            Ok(1) => i32::from(byte[0]),
            _ => END_OF_INPUT,
        }
    }

    fn flush(&mut self) {
        self.flush_output();
        self.pending.clear();
    }

    fn fatal(&mut self, position: Option<usize>, message: &str) {
        self.flush_output();
        eprintln!("{}", render_error(self.name, self.source, position, message));
    }

    fn log_trace(&mut self, c: char, position: usize) {
        if self.trace {
            debug!(target: "falsei::trace", position, "symbol {}", c);
        }
    }
}
