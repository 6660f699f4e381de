//! Error kinds
//!
//! Every failure in a FALSE run is fatal: there is no local recovery, the run
//! is aborted and control returns to the entry point. The kinds below are
//! shared by the stack (which only ever raises `Underflow` and
//! `TypeMismatch`) and by the evaluator, which attaches a source offset.
//!
//! Messages follow the wording of the classic `false_int` interpreter so that
//! existing test transcripts keep matching.

use thiserror::Error;

/// Why a FALSE run was aborted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ErrorKind {
    /// Pop or pick on a stack that does not hold enough elements
    #[error("stack underflow")]
    Underflow,

    /// Typed pop or comparison saw a token of the wrong kind
    #[error("stack type mismatch")]
    TypeMismatch,

    /// `/` or `÷` with a zero divisor
    #[error("divide by zero")]
    DivideByZero,

    /// `«` or `»` with a negative value, a negative count, or a count that
    /// is not smaller than the integer width
    #[error("invalid shift operands")]
    InvalidShift,

    /// `∫` popped zero
    #[error("assertion failed")]
    AssertionFailed,

    /// Character is neither an operator, a literal opener nor a variable
    #[error("unknown symbol")]
    UnknownSymbol,

    /// `]` or `}` without an opener
    #[error("unbalanced symbol")]
    UnbalancedSymbol,

    /// Input ended inside a comment, literal or lambda
    #[error("unterminated statement")]
    UnterminatedLiteral,

    /// Source bytes are not valid UTF-8 (or contain a NUL)
    #[error("bad multi-byte character")]
    BadMultibyte,

    /// `` ` `` is reserved for inline machine code and never supported
    #[error("unsupported code injection")]
    CodeInjectionUnsupported,

    /// Not even a source file name was supplied
    #[error("too few arguments")]
    TooFewArguments,

    /// More than 25 program arguments
    #[error("too many arguments")]
    TooManyArguments,

    /// A program argument has no leading digits
    #[error("non-numeric argument")]
    NonNumericArgument,

    /// The program finished with values left on the stack
    #[error("stack not empty")]
    StackNotEmptyAtExit,
}
