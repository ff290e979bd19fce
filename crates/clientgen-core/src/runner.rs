//! The external code generator, seen as a subprocess.
//!
//! The generator reads `openapi-ts.config.ts` from its working directory and
//! writes the client. [`GeneratorRunner`] is the seam between clientgen and
//! that process so tests can substitute a recording fake.

// Internal imports (std, crate)
use std::path::Path;

use crate::{Error, Result};

// External imports (alphabetized)
use async_trait::async_trait;
use tokio::process::Command;

/// Default generator program
pub const DEFAULT_GENERATOR_PROGRAM: &str = "npx";

/// Arguments passed to [`DEFAULT_GENERATOR_PROGRAM`]
pub const DEFAULT_GENERATOR_ARGS: &[&str] = &["@hey-api/openapi-ts"];

/// Runs the external generator against a prepared working directory
#[async_trait]
pub trait GeneratorRunner: Send + Sync {
    /// Run the generator to completion in `working_dir`.
    async fn run(&self, working_dir: &Path) -> Result<()>;
}

/// Runs a program with inherited stdio and checks its exit status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRunner {
    program: String,
    args: Vec<String>,
}

impl CommandRunner {
    /// Create a runner for `program` with `args`
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build a runner from a command line split into words.
    ///
    /// Returns `None` for an empty command line.
    pub fn from_command_line<I, S>(words: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut words = words.into_iter().map(Into::into);
        let program = words.next()?;
        Some(Self::new(program, words.collect()))
    }

    /// The full command line, for messages
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new(
            DEFAULT_GENERATOR_PROGRAM,
            DEFAULT_GENERATOR_ARGS.iter().map(|s| s.to_string()).collect(),
        )
    }
}

#[async_trait]
impl GeneratorRunner for CommandRunner {
    async fn run(&self, working_dir: &Path) -> Result<()> {
        log::debug!(
            "Running generator: {} (in {})",
            self.command_line(),
            working_dir.display()
        );

        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(working_dir)
            .status()
            .await?;

        if !status.success() {
            return Err(Error::GeneratorFailed {
                command: self.command_line(),
                status,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_runs_openapi_ts_through_npx() {
        assert_eq!(
            CommandRunner::default().command_line(),
            "npx @hey-api/openapi-ts"
        );
    }

    #[test]
    fn test_from_command_line() {
        assert_eq!(CommandRunner::from_command_line(Vec::<String>::new()), None);
        let runner = CommandRunner::from_command_line(["cp", "a", "b"]).unwrap();
        assert_eq!(runner, CommandRunner::new("cp", vec!["a".into(), "b".into()]));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_runs_in_working_dir() -> crate::Result<()> {
        let dir = tempdir()?;
        let runner = CommandRunner::from_command_line(["touch", "generated.ts"]).unwrap();
        runner.run(dir.path()).await?;
        assert!(dir.path().join("generated.ts").exists());
        Ok(())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_is_an_error() -> crate::Result<()> {
        let dir = tempdir()?;
        let err = CommandRunner::new("false", Vec::new())
            .run(dir.path())
            .await
            .unwrap_err();
        match err {
            Error::GeneratorFailed { command, status } => {
                assert_eq!(command, "false");
                assert!(!status.success());
            }
            other => panic!("unexpected error: {other}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_program_is_io_error() -> crate::Result<()> {
        let dir = tempdir()?;
        let err = CommandRunner::new("clientgen-no-such-generator", Vec::new())
            .run(dir.path())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        Ok(())
    }
}
