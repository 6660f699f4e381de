//! Run configuration
//!
//! Everything a run needs, handed to [`interpret`](crate::interpret) in one
//! value:
//!
//! ```rust,ignore
//! use false_runtime::{BufferHost, Config, interpret};
//!
//! let mut host = BufferHost::new();
//! let config = Config::new(b"3 4+.", &mut host)
//!     .with_args(["prog.f"])
//!     .with_extensions(true);
//! interpret(config)?;
//! ```

use crate::host::Host;
use false_core::StackSink;

pub struct Config<'a> {
    /// Whole source buffer; lambdas and error offsets refer into it
    pub source: &'a [u8],

    /// Command-line arguments; the first is the source file name
    ///
    /// A run needs at least that one. The rest (up to 25) must be numeric
    /// and are bound to `b`, `c`, ... with their count in `a`.
    pub args: Vec<String>,

    /// Enable the extended operator table
    pub extensions: bool,

    /// Start after the first line when the source begins with `#!`
    pub skip_shebang: bool,

    pub host: &'a mut dyn Host,

    /// Receives a record for every stack operation; see `false_core::stack`
    pub stack_log: Option<StackSink<'a>>,
}

impl<'a> Config<'a> {
    pub fn new(source: &'a [u8], host: &'a mut dyn Host) -> Self {
        Config {
            source,
            args: Vec::new(),
            extensions: false,
            skip_shebang: false,
            host,
            stack_log: None,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_extensions(mut self, extensions: bool) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_shebang_skipped(mut self, skip: bool) -> Self {
        self.skip_shebang = skip;
        self
    }

    pub fn with_stack_log(mut self, sink: StackSink<'a>) -> Self {
        self.stack_log = Some(sink);
        self
    }
}

/// Offset where execution starts: past a leading `#!` line, if any
///
/// The newline itself is kept so the remaining offsets (and line numbers in
/// diagnostics) still refer to the full buffer.
pub fn shebang_len(source: &[u8]) -> usize {
    if !source.starts_with(b"#!") {
        return 0;
    }
    source.iter().position(|&b| b == b'\n').unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::BufferHost;

    #[test]
    fn test_builder_defaults() {
        let mut host = BufferHost::new();
        let config = Config::new(b"", &mut host);
        assert!(config.args.is_empty());
        assert!(!config.extensions);
        assert!(!config.skip_shebang);
        assert!(config.stack_log.is_none());
    }

    #[test]
    fn test_builder_sets_fields() {
        let mut host = BufferHost::new();
        let config = Config::new(b"1.", &mut host)
            .with_args(["prog", "42"])
            .with_extensions(true)
            .with_shebang_skipped(true)
            .with_stack_log(Box::new(|_: &str, _: &str| {}));
        assert_eq!(config.args, vec!["prog".to_string(), "42".to_string()]);
        assert!(config.extensions);
        assert!(config.skip_shebang);
        assert!(config.stack_log.is_some());
    }

    #[test]
    fn test_shebang_len() {
        assert_eq!(shebang_len(b"#!/usr/bin/falsei\n1."), 17);
        assert_eq!(shebang_len(b"1."), 0);
        // Without a newline the line is not skipped
        assert_eq!(shebang_len(b"#!"), 0);
    }
}
