//! The fused lexer/evaluator
//!
//! FALSE is executed straight from its source text. [`Interpreter::process`]
//! walks a slice one character at a time through a small state machine and
//! executes operators the moment it sees them. There is no token list and no
//! AST: a `[...]` block is captured as a slice of the source and scanned
//! again every time it runs. A syntax error inside a lambda that never runs
//! is therefore never reported.
//!
//! # Scanner modes
//!
//! ```text
//! Normal ──digit──▶ Number ──non-digit──▶ Normal (character handled again)
//!        ──{──────▶ Comment ──}─────────▶ Normal
//!        ──'──────▶ Char ──any──────────▶ Normal (pushes its code point)
//!        ──"──────▶ Text ──"────────────▶ Normal (contents emitted)
//!        ──[──────▶ Lambda ──matching ]─▶ Normal (pushes the body slice)
//! ```
//!
//! While capturing a lambda, brackets inside nested comments, strings and
//! character literals are not counted, so `['],]` is a lambda whose body
//! pushes `]`.
//!
//! # Control flow
//!
//! `!`, `?`, `¿` and `#` do not call back into the scanner. They hand a
//! [`Flow`] back to `process`, which keeps its own stack of frames: a
//! [`Frame`] per lambda being scanned and a loop task per running `#`. FALSE
//! recursion therefore grows a heap `Vec`, not the native stack, and is bounded
//! only by memory. An error aborts the whole frame stack at once and is
//! returned to [`interpret`](crate::interpret).
//!
//! # Arithmetic
//!
//! Numbers are 32-bit and all arithmetic wraps, including `_` and `/` on
//! `i32::MIN`.

use crate::config::{Config, shebang_len};
use crate::decode::decode;
use crate::error::{Error, Result};
use crate::host::Host;
use crate::ops::Op;
use false_core::{ErrorKind, Slice, Stack, Storage, Token, truth};

/// Scanner state inside one `process` frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    Number(i32),
    Comment,
    Char,
    Text,
    Lambda(Capture),
}

/// Progress of a `[...]` capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Capture {
    /// Offset just past the opening bracket
    start: usize,
    depth: usize,
    nested: Option<Literal>,
}

/// Literal opened inside a lambda body, whose contents must not be
/// bracket-counted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Literal {
    Char,
    Comment,
    Text,
}

/// What the scanner does after one character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue(Mode),
    /// Run a lambda, then resume the current frame in `Normal` mode
    Call(Slice),
    /// Start a `#` loop
    Loop { condition: Slice, body: Slice },
}

/// A lambda (or the whole program) being scanned
#[derive(Debug, Clone, Copy)]
struct Frame {
    slice: Slice,
    /// Bytes already consumed
    offset: usize,
    mode: Mode,
    /// Offset of the last character scanned
    last: usize,
}

impl Frame {
    fn new(slice: Slice) -> Self {
        Frame {
            slice,
            offset: 0,
            mode: Mode::Normal,
            last: slice.start(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Task {
    Scan(Frame),
    /// A running `#`: alternates between its condition and its body
    Loop {
        condition: Slice,
        body: Slice,
        /// Offset of the `#`, for errors from the condition's result
        at: usize,
        testing: bool,
    },
}

/// Everything one run operates on
pub struct Interpreter<'a> {
    source: &'a [u8],
    host: &'a mut dyn Host,
    stack: Stack<'a>,
    storage: Storage,
    extensions: bool,
}

impl<'a> Interpreter<'a> {
    /// Fresh interpreter: empty stack, all variables zero
    ///
    /// Arguments are not bound here; see [`Interpreter::run`].
    pub fn new(config: Config<'a>) -> (Self, RunSpec) {
        let Config {
            source,
            args,
            extensions,
            skip_shebang,
            host,
            stack_log,
        } = config;

        let stack = match stack_log {
            Some(sink) => Stack::new(source).with_sink(sink),
            None => Stack::new(source),
        };
        let entry = if skip_shebang { shebang_len(source) } else { 0 };

        let interpreter = Interpreter {
            source,
            host,
            stack,
            storage: Storage::new(),
            extensions,
        };
        (interpreter, RunSpec { args, entry })
    }

    pub fn stack(&self) -> &Stack<'a> {
        &self.stack
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Bind arguments, execute the program, and require an empty stack at
    /// the end
    pub fn run(&mut self, spec: &RunSpec) -> Result<()> {
        crate::args::bind_arguments(&mut self.storage, &spec.args)?;

        let program = Slice::new(spec.entry, self.source.len().saturating_sub(spec.entry));
        self.process(program)?;

        if !self.stack.is_empty() {
            return Err(ErrorKind::StackNotEmptyAtExit.into());
        }
        Ok(())
    }

    /// Report a failed run to the host
    pub fn report(&mut self, err: &Error) {
        self.host.fatal(err.position, &err.to_string());
    }

    /// Scan and execute `slice`
    pub fn process(&mut self, slice: Slice) -> Result<()> {
        let source = self.source;
        let mut tasks = vec![Task::Scan(Frame::new(slice))];

        while let Some(task) = tasks.last_mut() {
            match task {
                Task::Scan(frame) => {
                    let text = frame.slice.text(source);
                    if frame.offset >= text.len() {
                        let (mode, last) = (frame.mode, frame.last);
                        tasks.pop();
                        self.finish(mode, last)?;
                        continue;
                    }

                    let at = frame.slice.start() + frame.offset;
                    let (c, width) =
                        decode(&text[frame.offset..]).map_err(|kind| Error::at(kind, at))?;
                    frame.offset += width;
                    frame.last = at;

                    match self.step(frame.mode, c, at, width).map_err(|e| e.or_at(at))? {
                        Flow::Continue(mode) => frame.mode = mode,
                        Flow::Call(body) => {
                            frame.mode = Mode::Normal;
                            tasks.push(Task::Scan(Frame::new(body)));
                        }
                        Flow::Loop { condition, body } => {
                            frame.mode = Mode::Normal;
                            tasks.push(Task::Loop {
                                condition,
                                body,
                                at,
                                testing: false,
                            });
                        }
                    }
                }
                Task::Loop {
                    condition,
                    body,
                    at,
                    testing,
                } => {
                    if !*testing {
                        *testing = true;
                        let condition = *condition;
                        tasks.push(Task::Scan(Frame::new(condition)));
                        continue;
                    }

                    let at = *at;
                    let flag = self.stack.pop_number().map_err(|kind| Error::at(kind, at))?;
                    if flag == 0 {
                        tasks.pop();
                    } else {
                        *testing = false;
                        let body = *body;
                        tasks.push(Task::Scan(Frame::new(body)));
                    }
                }
            }
        }
        Ok(())
    }

    /// End of a frame: a pending number is pushed, any open literal fails
    fn finish(&mut self, mode: Mode, last: usize) -> Result<()> {
        match mode {
            Mode::Normal => Ok(()),
            Mode::Number(n) => {
                self.stack.push(Token::Number(n));
                Ok(())
            }
            _ => Err(Error::at(ErrorKind::UnterminatedLiteral, last)),
        }
    }

    fn step(&mut self, mode: Mode, c: char, at: usize, width: usize) -> Result<Flow> {
        let next = match mode {
            Mode::Normal => return self.normal(c, at, width),
            Mode::Number(n) => match c.to_digit(10) {
                Some(d) => {
                    self.host.log_trace(c, at);
                    Mode::Number(n.wrapping_mul(10).wrapping_add(d as i32))
                }
                None => {
                    self.stack.push(Token::Number(n));
                    return self.normal(c, at, width);
                }
            },
            Mode::Comment if c == '}' => Mode::Normal,
            Mode::Comment => Mode::Comment,
            Mode::Char => {
                self.stack.push(Token::Number(c as i32));
                Mode::Normal
            }
            Mode::Text if c == '"' => Mode::Normal,
            Mode::Text => {
                self.host.emit_char(c);
                Mode::Text
            }
            Mode::Lambda(capture) => self.capture(capture, c, at),
        };
        Ok(Flow::Continue(next))
    }

    fn normal(&mut self, c: char, at: usize, width: usize) -> Result<Flow> {
        if c.is_whitespace() {
            return Ok(Flow::Continue(Mode::Normal));
        }
        if let Some(d) = c.to_digit(10) {
            self.host.log_trace(c, at);
            return Ok(Flow::Continue(Mode::Number(d as i32)));
        }

        let next = match c {
            '{' => Mode::Comment,
            '\'' => Mode::Char,
            '"' => Mode::Text,
            '[' => Mode::Lambda(Capture {
                start: at + width,
                depth: 1,
                nested: None,
            }),
            ']' | '}' => return Err(ErrorKind::UnbalancedSymbol.into()),
            _ => {
                self.host.log_trace(c, at);
                return self.dispatch(c);
            }
        };
        Ok(Flow::Continue(next))
    }

    fn capture(&mut self, mut capture: Capture, c: char, at: usize) -> Mode {
        match capture.nested {
            Some(Literal::Char) => capture.nested = None,
            Some(Literal::Comment) if c == '}' => capture.nested = None,
            Some(Literal::Text) if c == '"' => capture.nested = None,
            Some(_) => {}
            None => match c {
                '\'' => capture.nested = Some(Literal::Char),
                '{' => capture.nested = Some(Literal::Comment),
                '"' => capture.nested = Some(Literal::Text),
                '[' => capture.depth += 1,
                ']' => {
                    capture.depth -= 1;
                    if capture.depth == 0 {
                        let body = Slice::new(capture.start, at - capture.start);
                        self.stack.push(Token::Lambda(body));
                        return Mode::Normal;
                    }
                }
                _ => {}
            },
        }
        Mode::Lambda(capture)
    }

    fn dispatch(&mut self, c: char) -> Result<Flow> {
        match Op::lookup(c, self.extensions) {
            Some(op) => self.execute(op),
            None if c.is_ascii_lowercase() => {
                self.stack.push(Token::Variable(c));
                Ok(Flow::Continue(Mode::Normal))
            }
            None => Err(ErrorKind::UnknownSymbol.into()),
        }
    }

    fn execute(&mut self, op: Op) -> Result<Flow> {
        match op {
            Op::Call => return Ok(Flow::Call(self.stack.pop_lambda()?)),
            Op::If => return self.if_then(),
            Op::IfElse => {
                let otherwise = self.stack.pop_lambda()?;
                let then = self.stack.pop_lambda()?;
                let chosen = if self.stack.pop_number()? != 0 { then } else { otherwise };
                return Ok(Flow::Call(chosen));
            }
            Op::While => {
                let body = self.stack.pop_lambda()?;
                let condition = self.stack.pop_lambda()?;
                return Ok(Flow::Loop { condition, body });
            }

            Op::Dup => self.stack.dup()?,
            Op::Drop => self.stack.drop()?,
            Op::Swap => self.stack.swap()?,
            Op::Rot => self.stack.rot()?,
            Op::Pick => {
                let n = self.pop_count()?;
                self.stack.pick(n)?;
            }
            Op::Over => self.stack.over()?,
            Op::Nip => self.stack.nip()?,
            Op::Tuck => self.stack.tuck()?,
            Op::TwoDup => self.stack.two_dup()?,
            Op::Depth => {
                let depth = self.stack.depth() as i32;
                self.stack.push(Token::Number(depth));
            }
            Op::Reverse => self.stack.reverse(),
            Op::Roll => {
                let n = self.pop_count()?;
                self.stack.roll(n)?;
            }

            Op::Add => self.binary(|x, y| Ok(x.wrapping_add(y)))?,
            Op::Subtract => self.binary(|x, y| Ok(x.wrapping_sub(y)))?,
            Op::Multiply => self.binary(|x, y| Ok(x.wrapping_mul(y)))?,
            Op::Divide => self.binary(|x, y| {
                if y == 0 {
                    Err(ErrorKind::DivideByZero)
                } else {
                    Ok(x.wrapping_div(y))
                }
            })?,
            Op::DivMod => {
                let y = self.stack.pop_number()?;
                let x = self.stack.pop_number()?;
                if y == 0 {
                    return Err(ErrorKind::DivideByZero.into());
                }
                self.stack.push(Token::Number(x.wrapping_rem(y)));
                self.stack.push(Token::Number(x.wrapping_div(y)));
            }
            Op::Negate => {
                let x = self.stack.pop_number()?;
                self.stack.push(Token::Number(x.wrapping_neg()));
            }
            Op::And => self.binary(|x, y| Ok(x & y))?,
            Op::Or => self.binary(|x, y| Ok(x | y))?,
            Op::Xor => self.binary(|x, y| Ok(x ^ y))?,
            Op::Not => {
                let x = self.stack.pop_number()?;
                self.stack.push(Token::Number(!x));
            }
            Op::ShiftLeft => self.binary(|x, y| Ok(x << shift_count(x, y)?))?,
            Op::ShiftRight => self.binary(|x, y| Ok(x >> shift_count(x, y)?))?,

            Op::Equal => {
                let equal = self.compare()?;
                self.stack.push(Token::Number(truth(equal)));
            }
            Op::NotEqual => {
                let equal = self.compare()?;
                self.stack.push(Token::Number(truth(!equal)));
            }
            Op::Greater => self.binary(|x, y| Ok(truth(x > y)))?,
            Op::Less => self.binary(|x, y| Ok(truth(x < y)))?,
            Op::LessEqual => self.binary(|x, y| Ok(truth(x <= y)))?,
            Op::GreaterEqual => self.binary(|x, y| Ok(truth(x >= y)))?,
            Op::Assert => {
                if self.stack.pop_number()? == 0 {
                    return Err(ErrorKind::AssertionFailed.into());
                }
            }

            Op::Store => {
                let letter = self.stack.pop_variable()?;
                let value = self.stack.pop()?;
                self.storage.set(letter, value);
            }
            Op::Fetch => {
                let letter = self.stack.pop_variable()?;
                self.stack.push(self.storage.get(letter));
            }

            Op::Read => {
                let unit = self.host.input();
                self.stack.push(Token::Number(unit));
            }
            Op::PrintNumber => {
                let n = self.stack.pop_number()?;
                self.host.emit_number(n);
            }
            Op::PrintChar => {
                let n = self.stack.pop_number()?;
                self.host.emit_byte(n as u8);
            }
            Op::Flush => self.host.flush(),

            Op::Inject => return Err(ErrorKind::CodeInjectionUnsupported.into()),
        }
        Ok(Flow::Continue(Mode::Normal))
    }

    /// `?`, including the `cond [then] [else] ??` idiom
    ///
    /// With a lambda below the body, `?` picks a branch instead of running
    /// one: it replaces `cond [then] [else]` with `-1 [chosen]`, and the
    /// second `?` runs the chosen branch unconditionally.
    fn if_then(&mut self) -> Result<Flow> {
        let body = self.stack.pop_lambda()?;

        if let Some(Token::Lambda(_)) = self.stack.peek() {
            let then = self.stack.pop_lambda()?;
            let chosen = if self.stack.pop_number()? != 0 { then } else { body };
            self.stack.push(Token::Number(truth(true)));
            self.stack.push(Token::Lambda(chosen));
        } else if self.stack.pop_number()? != 0 {
            return Ok(Flow::Call(body));
        }
        Ok(Flow::Continue(Mode::Normal))
    }

    /// Stack effect: ( x y -- f(x, y) )
    fn binary(&mut self, f: impl FnOnce(i32, i32) -> std::result::Result<i32, ErrorKind>) -> Result<()> {
        let y = self.stack.pop_number()?;
        let x = self.stack.pop_number()?;
        self.stack.push(Token::Number(f(x, y)?));
        Ok(())
    }

    /// `=` and `≠`: tags must agree, and lambdas never compare equal
    fn compare(&mut self) -> Result<bool> {
        let y = self.stack.pop()?;
        let x = self.stack.pop()?;
        match (x, y) {
            (Token::Number(x), Token::Number(y)) => Ok(x == y),
            (Token::Variable(x), Token::Variable(y)) => Ok(x == y),
            (Token::Lambda(_), Token::Lambda(_)) => Ok(false),
            _ => Err(ErrorKind::TypeMismatch.into()),
        }
    }

    /// Index operand of `ø` and `™`; a negative index can never be in range
    fn pop_count(&mut self) -> Result<usize> {
        let n = self.stack.pop_number()?;
        usize::try_from(n).map_err(|_| ErrorKind::Underflow.into())
    }
}

/// What [`Interpreter::run`] needs besides the interpreter itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSpec {
    pub args: Vec<String>,
    /// Offset of the first byte to execute
    pub entry: usize,
}

/// Validate shift operands and return the count
fn shift_count(x: i32, count: i32) -> std::result::Result<u32, ErrorKind> {
    if x < 0 || count < 0 || count >= i32::BITS as i32 {
        Err(ErrorKind::InvalidShift)
    } else {
        Ok(count as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::BufferHost;

    /// Run `source` with a bare argument list; returns the result and output
    fn run(source: &str, extensions: bool) -> (Result<()>, String) {
        let mut host = BufferHost::new();
        let config = Config::new(source.as_bytes(), &mut host)
            .with_args(["test.f"])
            .with_extensions(extensions);
        let (mut interpreter, spec) = Interpreter::new(config);
        let result = interpreter.run(&spec);
        drop(interpreter);
        (result, host.output_text())
    }

    fn kind(source: &str) -> ErrorKind {
        run(source, true).0.expect_err("program should fail").kind
    }

    #[test]
    fn test_number_literal_ends_at_non_digit() {
        assert_eq!(run("12 34+.", false).1, "46");
        assert_eq!(run("12.", false).1, "12");
    }

    #[test]
    fn test_number_at_end_of_input_is_pushed() {
        let (result, _) = run("7", false);
        assert_eq!(result.unwrap_err().kind, ErrorKind::StackNotEmptyAtExit);
    }

    #[test]
    fn test_number_wraps() {
        assert_eq!(run("4294967297.", false).1, "1");
    }

    #[test]
    fn test_char_literal_takes_anything() {
        assert_eq!(run("']. '0. '[. 'é.", false).1, "934891233");
    }

    #[test]
    fn test_string_literal_emits_characters() {
        assert_eq!(run("\"héllo [x]\"", false).1, "héllo [x]");
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(run("{ ignore ] this } 1.", false).1, "1");
    }

    #[test]
    fn test_lambda_body_is_not_executed_until_called() {
        assert_eq!(run("[1.]%", false).1, "");
        assert_eq!(run("[1.]!", false).1, "1");
    }

    #[test]
    fn test_nested_lambdas() {
        assert_eq!(run("[[2.]!1.]!", false).1, "21");
    }

    #[test]
    fn test_lambda_capture_ignores_nested_literals() {
        assert_eq!(run("[']]!,", false).1, "]");
        assert_eq!(run("[\"]\"]!", false).1, "]");
        assert_eq!(run("[{]}1.]!", false).1, "1");
        assert_eq!(run("['[]!,", false).1, "[");
    }

    #[test]
    fn test_unbalanced_symbols() {
        assert_eq!(kind("]"), ErrorKind::UnbalancedSymbol);
        assert_eq!(kind("1}"), ErrorKind::UnbalancedSymbol);
    }

    #[test]
    fn test_unterminated_literals() {
        assert_eq!(kind("{ open"), ErrorKind::UnterminatedLiteral);
        assert_eq!(kind("'"), ErrorKind::UnterminatedLiteral);
        assert_eq!(kind("\"abc"), ErrorKind::UnterminatedLiteral);
        assert_eq!(kind("[1 [2]"), ErrorKind::UnterminatedLiteral);
    }

    #[test]
    fn test_unexecuted_lambda_errors_are_lazy() {
        assert_eq!(run("[`]%", false).0, Ok(()));
        assert_eq!(run("0[A]?", false).0, Ok(()));
        assert_eq!(kind("1[A]?"), ErrorKind::UnknownSymbol);
    }

    #[test]
    fn test_unknown_symbols() {
        assert_eq!(kind("A"), ErrorKind::UnknownSymbol);
        assert_eq!(kind("é"), ErrorKind::UnknownSymbol);
        let (result, _) = run("1 2<", false);
        assert_eq!(result.unwrap_err().kind, ErrorKind::UnknownSymbol);
    }

    #[test]
    fn test_variables() {
        assert_eq!(run("5x: x;x;*.", false).1, "25");
        assert_eq!(run("[2*]d: 3d;!.", false).1, "6");
        assert_eq!(kind("1 2:"), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(run("7 2-.", false).1, "5");
        assert_eq!(run("7 2/.", false).1, "3");
        assert_eq!(run("7_ 2/.", false).1, "-3");
        assert_eq!(run("6 3&. 6 3|.", false).1, "27");
        assert_eq!(run("0~.", false).1, "-1");
        assert_eq!(run("5_.", false).1, "-5");
        assert_eq!(kind("1 0/"), ErrorKind::DivideByZero);
    }

    #[test]
    fn test_wrapping_edge_cases() {
        assert_eq!(run("2147483647 1+.", false).1, "-2147483648");
        assert_eq!(run("2147483647 1+ _.", false).1, "-2147483648");
        assert_eq!(run("2147483647 1+ 1_/.", false).1, "-2147483648");
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(run("2 1>. 1 2>.", false).1, "-10");
        assert_eq!(run("1 1=. 1 2=.", false).1, "-10");
        assert_eq!(run("a a=. a b=.", false).1, "-10");
        assert_eq!(run("[1][1]=.", false).1, "0");
        assert_eq!(run("[1]$=.", false).1, "0");
        assert_eq!(kind("1 a="), ErrorKind::TypeMismatch);
        assert_eq!(kind("[1] 1="), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_extended_comparisons() {
        assert_eq!(run("1 2<. 2 1<.", true).1, "-10");
        assert_eq!(run("1 1≠. 1 2≠.", true).1, "0-1");
        assert_eq!(run("[1][1]≠.", true).1, "-1");
        assert_eq!(run("1 1≤. 2 1≤.", true).1, "-10");
        assert_eq!(run("1 1≥. 1 2≥.", true).1, "-10");
    }

    #[test]
    fn test_stack_words() {
        assert_eq!(run("1 2\\..", false).1, "12");
        assert_eq!(run("1$..", false).1, "11");
        assert_eq!(run("1 2%.", false).1, "1");
        assert_eq!(run("1 2 3@...", false).1, "132");
        assert_eq!(run("1 2 3 2ø....", false).1, "1321");
        assert_eq!(run("1 2 3 0O....", false).1, "3321");
        assert_eq!(kind("1 1ø"), ErrorKind::Underflow);
        assert_eq!(kind("1 1_ø"), ErrorKind::Underflow);
    }

    #[test]
    fn test_extended_stack_words() {
        assert_eq!(run("1 2£...", true).1, "121");
        assert_eq!(run("1 2‰.", true).1, "2");
        assert_eq!(run("1 2€...", true).1, "212");
        assert_eq!(run("1 2Ø....", true).1, "2121");
        assert_eq!(run("7 8§...", true).1, "287");
        assert_eq!(run("1 2 3®...", true).1, "123");
        assert_eq!(run("1 2 3 2™...", true).1, "132");
        assert_eq!(kind("1 2 2™"), ErrorKind::Underflow);
    }

    #[test]
    fn test_divmod() {
        assert_eq!(run("7 2÷..", true).1, "31");
        assert_eq!(run("7_ 2÷..", true).1, "-3-1");
        assert_eq!(kind("7 0÷"), ErrorKind::DivideByZero);
    }

    #[test]
    fn test_bitwise_extensions() {
        assert_eq!(run("6 3⊻.", true).1, "5");
        assert_eq!(run("1 4«.", true).1, "16");
        assert_eq!(run("16 2».", true).1, "4");
        assert_eq!(run("1 31«.", true).1, "-2147483648");
        assert_eq!(kind("1_ 1«"), ErrorKind::InvalidShift);
        assert_eq!(kind("1 1_»"), ErrorKind::InvalidShift);
        assert_eq!(kind("1 32«"), ErrorKind::InvalidShift);
    }

    #[test]
    fn test_assert() {
        assert_eq!(run("1∫", true).0, Ok(()));
        assert_eq!(kind("0∫"), ErrorKind::AssertionFailed);
    }

    #[test]
    fn test_code_injection() {
        assert_eq!(kind("`"), ErrorKind::CodeInjectionUnsupported);
    }

    #[test]
    fn test_if_then() {
        assert_eq!(run("1['y,]?", false).1, "y");
        assert_eq!(run("0['y,]?", false).1, "");
        assert_eq!(kind("[1]?"), ErrorKind::Underflow);
    }

    #[test]
    fn test_if_else_forms_agree() {
        for cond in ["0", "1", "5_"] {
            let nested = run(&format!("{}['T,]['F,]??", cond), true).1;
            let ext = run(&format!("{}['T,]['F,]¿", cond), true).1;
            assert_eq!(nested, ext, "condition {}", cond);
        }
    }

    #[test]
    fn test_while() {
        assert_eq!(run("3[$][$.1-]#%", false).1, "321");
        assert_eq!(run("[0][1.]#", false).1, "");
        assert_eq!(kind("[][1]#"), ErrorKind::Underflow);
    }

    #[test]
    fn test_long_loop_does_not_recurse() {
        assert_eq!(run("0[$100000\\>][1+]#.", false).1, "100000");
    }

    #[test]
    fn test_deep_recursion_stays_off_the_native_stack() {
        let (result, output) = run("[$[1-f;!]?]f: 10000f;!%1.", false);
        assert_eq!(result, Ok(()));
        assert_eq!(output, "1");
    }

    #[test]
    fn test_deep_recursion_error_is_reported() {
        // The innermost call underflows on its second `%`
        let (result, _) = run("[$[1-f;!]?%%]f: 10000f;!", false);
        let err = result.unwrap_err();
        assert_eq!(err, Error::at(ErrorKind::Underflow, 11));
    }

    #[test]
    fn test_while_condition_error_points_at_loop() {
        let (result, _) = run("[][1]#", false);
        assert_eq!(result.unwrap_err().position, Some(5));
    }

    #[test]
    fn test_input_and_flush() {
        let mut host = BufferHost::with_input("A");
        let config = Config::new("^.^.ß".as_bytes(), &mut host).with_args(["t"]);
        let (mut interpreter, spec) = Interpreter::new(config);
        assert_eq!(interpreter.run(&spec), Ok(()));
        drop(interpreter);
        assert_eq!(host.output_text(), "65-1");
        assert_eq!(host.flushes(), 1);
    }

    #[test]
    fn test_print_char_emits_low_byte() {
        let mut host = BufferHost::new();
        let config = Config::new(b"321,", &mut host).with_args(["t"]);
        let (mut interpreter, spec) = Interpreter::new(config);
        interpreter.run(&spec).unwrap();
        drop(interpreter);
        assert_eq!(host.output(), &[65]);
    }

    #[test]
    fn test_error_positions() {
        let (result, _) = run("1 2\n+ +", false);
        assert_eq!(result.unwrap_err().position, Some(6));

        let (result, _) = run("[%]!", false);
        assert_eq!(result.unwrap_err().position, Some(1));

        let (result, _) = run("1 \u{00f7}", true);
        assert_eq!(result.unwrap_err().position, Some(2));
    }

    #[test]
    fn test_bad_multibyte_position() {
        let mut host = BufferHost::new();
        let config = Config::new(b"1 \xC3", &mut host).with_args(["t"]);
        let (mut interpreter, spec) = Interpreter::new(config);
        let err = interpreter.run(&spec).unwrap_err();
        assert_eq!(err, Error::at(ErrorKind::BadMultibyte, 2));
    }

    #[test]
    fn test_trace_hook() {
        let mut host = BufferHost::new();
        let config = Config::new(b"12 {c} 'x% [3]!%%", &mut host).with_args(["t"]);
        let (mut interpreter, spec) = Interpreter::new(config);
        interpreter.run(&spec).unwrap();
        drop(interpreter);
        let traced: String = host.trace().iter().map(|(c, _)| *c).collect();
        assert_eq!(traced, "12%!3%%");
        assert_eq!(host.trace()[0], ('1', 0));
    }

    #[test]
    fn test_state_after_failure() {
        let mut host = BufferHost::new();
        let config = Config::new(b"7v: 1 2 `", &mut host).with_args(["t", "5"]);
        let (mut interpreter, spec) = Interpreter::new(config);
        let err = interpreter.run(&spec).unwrap_err();
        assert_eq!(err.kind, ErrorKind::CodeInjectionUnsupported);
        assert_eq!(interpreter.stack().depth(), 2);
        assert_eq!(interpreter.storage().get('a'), Token::Number(1));
        assert_eq!(interpreter.storage().get('b'), Token::Number(5));
        assert_eq!(interpreter.storage().get('v'), Token::Number(7));
    }

    #[test]
    fn test_shebang_skipped() {
        let mut host = BufferHost::new();
        let config = Config::new(b"#!/bin/falsei\n1.", &mut host)
            .with_args(["t"])
            .with_shebang_skipped(true);
        let (mut interpreter, spec) = Interpreter::new(config);
        assert_eq!(spec.entry, 13);
        interpreter.run(&spec).unwrap();
        drop(interpreter);
        assert_eq!(host.output_text(), "1");
    }
}
