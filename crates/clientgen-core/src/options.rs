//! Program options shared by the CLI and the orchestrator.
//!
//! Options select one of two modes: a config file listing many clients, or a
//! single client described inline by its input and output.

use crate::config::{default_client_type, ClientSpec};
use crate::{Error, Result};

/// Name given to the client generated in inline mode
pub const INLINE_CLIENT_NAME: &str = "default";

/// Options controlling a single clientgen invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramOptions {
    /// Path to a YAML config document
    pub config_path: Option<String>,

    /// Inline input location (URL or path, may contain `${NAME}`)
    pub input: Option<String>,

    /// Inline output directory
    pub output: Option<String>,

    /// Transport used by the generated client
    pub client_type: String,

    /// Whether to emit JSON schemas alongside the client
    pub generate_schemas: bool,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            config_path: None,
            input: None,
            output: None,
            client_type: default_client_type(),
            generate_schemas: false,
        }
    }
}

/// Which source of client definitions an invocation uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode<'a> {
    /// Clients come from the config document at this path
    ConfigFile(&'a str),
    /// A single client described by the inline options
    Inline,
}

impl ProgramOptions {
    /// Check that exactly one mode is selected and fully specified.
    ///
    /// # Errors
    ///
    /// - [`Error::ConflictingOptions`] when a config path is combined with input or output
    /// - [`Error::MissingRequiredInput`] when nothing is given
    /// - [`Error::MissingInputOrOutput`] when inline mode has only one of input and output
    pub fn validate(&self) -> Result<()> {
        self.mode().map(|_| ())
    }

    /// Validate and report the selected mode.
    pub fn mode(&self) -> Result<Mode<'_>> {
        let inline = self.input.is_some() || self.output.is_some();
        match (self.config_path.as_deref(), inline) {
            (Some(_), true) => Err(Error::ConflictingOptions),
            (Some(path), false) => Ok(Mode::ConfigFile(path)),
            (None, false) => Err(Error::MissingRequiredInput),
            (None, true) if self.input.is_none() || self.output.is_none() => {
                Err(Error::missing_input_or_output(INLINE_CLIENT_NAME))
            }
            (None, true) => Ok(Mode::Inline),
        }
    }

    /// Build the client described by the inline options.
    ///
    /// Absent fields become empty strings; the generator rejects them.
    pub fn inline_client(&self) -> ClientSpec {
        ClientSpec {
            name: INLINE_CLIENT_NAME.to_string(),
            input: self.input.clone().unwrap_or_default(),
            output: self.output.clone().unwrap_or_default(),
            client_type: self.client_type.clone(),
            generate_schemas: self.generate_schemas,
        }
    }
}
