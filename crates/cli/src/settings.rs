//! Optional settings file
//!
//! ```toml
//! extensions = true
//! verbose = false
//! input = "some text"
//! ```
//!
//! Every key may be omitted. Command-line flags take precedence.

use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub extensions: bool,
    pub verbose: bool,
    pub input: Option<String>,
}

impl Settings {
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse settings: {}", e))
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("{}: {}", path.display(), e))?;
        Self::from_toml(&text).map_err(|e| format!("{}: {}", path.display(), e))
    }

    /// Apply command-line flags on top of the file
    ///
    /// Switches can only be turned on from the command line; `--input`
    /// replaces the file's input.
    pub fn merge(mut self, extensions: bool, verbose: bool, input: Option<String>) -> Self {
        self.extensions |= extensions;
        self.verbose |= verbose;
        if input.is_some() {
            self.input = input;
        }
        self
    }
}
