//! FALSE Core: the data model of the FALSE stack machine
//!
//! This crate holds the pieces the evaluator operates on. None of them know
//! how to scan or execute source text; that lives in `false-runtime`.
//!
//! # Modules
//!
//! - `slice`: Non-owning offset ranges into the source buffer
//! - `token`: The three stack value kinds (Number, Variable, Lambda)
//! - `stack`: Operand stack with typed pops and an optional trace sink
//! - `storage`: The 26 variable cells `a`..`z`
//! - `error`: Error kinds shared by every layer of the interpreter

pub mod error;
pub mod slice;
pub mod stack;
pub mod storage;
pub mod token;

pub use error::ErrorKind;
pub use slice::Slice;
pub use stack::{Stack, StackSink};
pub use storage::Storage;
pub use token::{Token, truth};
