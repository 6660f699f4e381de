//! FALSE runtime: a fused lexer/evaluator
//!
//! Key design principles:
//! - Source is executed directly; a lambda is a slice of the source buffer
//! - All I/O goes through a [`Host`], so the evaluator is embeddable
//! - Errors are values: the first one aborts the run and is reported to the
//!   host exactly once
//!
//! ```rust,ignore
//! use false_runtime::{BufferHost, Config, interpret};
//!
//! let mut host = BufferHost::new();
//! interpret(Config::new(b"\"hi\"", &mut host).with_args(["hi.f"]))?;
//! assert_eq!(host.output_text(), "hi");
//! ```

pub mod args;
pub mod config;
pub mod decode;
pub mod diagnostics;
pub mod error;
pub mod eval;
pub mod host;
pub mod ops;

pub use args::{MAX_ARGUMENTS, bind_arguments, parse_argument};
pub use config::{Config, shebang_len};
pub use diagnostics::{Position, render_error};
pub use error::{Error, Result};
pub use eval::{Interpreter, RunSpec};
pub use host::{BufferHost, END_OF_INPUT, Host};
pub use ops::Op;

pub use false_core::{ErrorKind, Slice, Stack, StackSink, Storage, Token, truth};

use tracing::debug;

/// Run a whole program
///
/// Binds the arguments, executes the source and checks that the stack ends
/// empty. On failure the host's `fatal` is called once with the error's
/// offset and message, and the error is returned as well.
pub fn interpret(config: Config<'_>) -> Result<()> {
    debug!(
        bytes = config.source.len(),
        args = config.args.len(),
        extensions = config.extensions,
        "starting run"
    );

    let (mut interpreter, spec) = Interpreter::new(config);
    let result = interpreter.run(&spec);

    match &result {
        Ok(()) => debug!("run finished"),
        Err(err) => {
            debug!(kind = ?err.kind, position = ?err.position, "run failed");
            interpreter.report(err);
        }
    }
    result
}
