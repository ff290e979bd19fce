//! Client generation and orchestration.
//!
//! [`ClientGenerator`] generates a single client: it renders the generator
//! config, writes it next to the generator, runs the generator and cleans up.
//! The free functions on top of it walk a config document or the inline
//! options, one client at a time, stopping at the first failure.
//!
//! # Examples
//!
//! ```no_run
//! use clientgen_core::{generate::generate_clients_from_config, ClientGenerator, CommandRunner};
//!
//! # async fn example() -> clientgen_core::Result<()> {
//! let generator = ClientGenerator::new(CommandRunner::default(), std::env::current_dir()?);
//! generate_clients_from_config("clients.yaml", &generator).await?;
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::path::{Path, PathBuf};

use crate::{
    artifact::{render_config, ConfigArtifact},
    config::{ClientSpec, ConfigDocument},
    env::resolve_input_url,
    error::{Error, Result},
    options::{Mode, ProgramOptions},
    runner::GeneratorRunner,
};

/// Generates one client at a time with a given runner and working directory
#[derive(Debug, Clone)]
pub struct ClientGenerator<R> {
    runner: R,
    working_dir: PathBuf,
}

impl<R: GeneratorRunner> ClientGenerator<R> {
    /// Create a generator that writes its config into `working_dir`
    pub fn new(runner: R, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            working_dir: working_dir.into(),
        }
    }

    /// The runner used for every client
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Directory the generator config is written to
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Generate `client`, whose input must already be resolved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingInputOrOutput`] if the input or output is empty,
    /// and propagates rendering, I/O and generator failures. The config file is
    /// removed on every path.
    pub async fn generate(&self, client: &ClientSpec) -> Result<()> {
        if client.input.is_empty() || client.output.is_empty() {
            return Err(Error::missing_input_or_output(&client.name));
        }

        println!("🚀 Generating API client for: {}", client.name);
        println!(
            "🛠️  Configured options: client type={}, generate schemas={}",
            client.client_type, client.generate_schemas
        );

        let config = render_config(client)?;
        let artifact = ConfigArtifact::create(&self.working_dir, &config).await?;
        self.runner.run(&self.working_dir).await?;
        drop(artifact);

        println!("✅ API client generated for: {}", client.name);
        Ok(())
    }
}

/// Resolve the client's input and generate it
async fn resolve_and_generate<R: GeneratorRunner>(
    client: &ClientSpec,
    generator: &ClientGenerator<R>,
) -> Result<()> {
    let resolved = ClientSpec {
        input: resolve_input_url(&client.input)?,
        ..client.clone()
    };
    generator.generate(&resolved).await
}

/// Generate every client listed in the config document at `path`, in order.
pub async fn generate_clients_from_config<P, R>(
    path: P,
    generator: &ClientGenerator<R>,
) -> Result<()>
where
    P: AsRef<Path>,
    R: GeneratorRunner,
{
    let document = ConfigDocument::from_file(path).await?;
    log::debug!("Loaded {} client(s)", document.len());

    for client in &document {
        resolve_and_generate(client, generator).await?;
    }

    println!("🎉 All API clients generated successfully!");
    Ok(())
}

/// Generate the single client described by the inline options.
pub async fn generate_inline<R: GeneratorRunner>(
    options: &ProgramOptions,
    generator: &ClientGenerator<R>,
) -> Result<()> {
    resolve_and_generate(&options.inline_client(), generator).await
}

/// Validate `options` and dispatch to config-file or inline mode.
pub async fn run<R: GeneratorRunner>(
    options: &ProgramOptions,
    generator: &ClientGenerator<R>,
) -> Result<()> {
    match options.mode()? {
        Mode::ConfigFile(path) => generate_clients_from_config(path, generator).await,
        Mode::Inline => generate_inline(options, generator).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::CONFIG_FILE_NAME;
    use async_trait::async_trait;
    use std::io;
    use std::sync::Mutex;
    use tempfile::{tempdir, TempDir};

    /// Captures the config file seen by each run
    #[derive(Default)]
    struct RecordingRunner {
        configs: Mutex<Vec<String>>,
        fail: bool,
    }

    impl RecordingRunner {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        fn configs(&self) -> Vec<String> {
            self.configs.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GeneratorRunner for RecordingRunner {
        async fn run(&self, working_dir: &Path) -> Result<()> {
            let config = std::fs::read_to_string(working_dir.join(CONFIG_FILE_NAME))?;
            self.configs.lock().unwrap().push(config);
            if self.fail {
                return Err(Error::Io(io::Error::other("generator crashed")));
            }
            Ok(())
        }
    }

    fn setup(runner: RecordingRunner) -> (TempDir, ClientGenerator<RecordingRunner>) {
        let dir = tempdir().unwrap();
        let generator = ClientGenerator::new(runner, dir.path());
        (dir, generator)
    }

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("clients.yaml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_default_client_type_is_fetch() -> crate::Result<()> {
        let (dir, generator) = setup(RecordingRunner::default());
        let path = write_config(
            &dir,
            "client1:\n  input: https://api.example.com\n  output: src/clients\n",
        );

        generate_clients_from_config(&path, &generator).await?;

        let configs = generator.runner().configs();
        assert_eq!(configs.len(), 1);
        assert!(configs[0].contains("src/clients"));
        assert!(configs[0].contains("@hey-api/client-fetch"));
        assert!(!configs[0].contains("@hey-api/schemas"));
        assert!(!dir.path().join(CONFIG_FILE_NAME).exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_entry_options_reach_the_config() -> crate::Result<()> {
        let (dir, generator) = setup(RecordingRunner::default());
        let path = write_config(
            &dir,
            "client1:\n  input: https://api.example.com\n  output: src/a\n  client: axios\n  schemas: true\n\
             client2:\n  input: https://api.example.com\n  output: src/b\n  schemas: false\n",
        );

        generate_clients_from_config(&path, &generator).await?;

        let configs = generator.runner().configs();
        assert_eq!(configs.len(), 2);
        assert!(configs[0].contains("@hey-api/client-axios"));
        assert!(configs[0].contains("@hey-api/schemas"));
        assert!(configs[1].contains("@hey-api/client-fetch"));
        assert!(!configs[1].contains("@hey-api/schemas"));
        Ok(())
    }

    #[tokio::test]
    async fn test_env_placeholder_is_resolved() -> crate::Result<()> {
        // unique var name; tests run in parallel
        std::env::set_var("CLIENTGEN_GENERATE_TEST_URL", "https://env.example.com/openapi.json");
        let (dir, generator) = setup(RecordingRunner::default());
        let path = write_config(
            &dir,
            "client1:\n  input: ${CLIENTGEN_GENERATE_TEST_URL}\n  output: src/clients\n",
        );

        generate_clients_from_config(&path, &generator).await?;

        let configs = generator.runner().configs();
        assert!(configs[0].contains(r#"input: "https://env.example.com/openapi.json""#));
        Ok(())
    }

    #[tokio::test]
    async fn test_unset_placeholder_stops_before_running() {
        let (dir, generator) = setup(RecordingRunner::default());
        let path = write_config(
            &dir,
            "client1:\n  input: ${CLIENTGEN_NEVER_SET_VAR}\n  output: src/clients\n",
        );

        let err = generate_clients_from_config(&path, &generator)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::EnvVarMissing { ref name } if name == "CLIENTGEN_NEVER_SET_VAR"));
        assert!(generator.runner().configs().is_empty());
    }

    #[tokio::test]
    async fn test_missing_output_stops_iteration() {
        let (dir, generator) = setup(RecordingRunner::default());
        let path = write_config(
            &dir,
            "first:\n  input: https://api.example.com\n  output: src/first\n\
             broken:\n  input: https://api.example.com\n\
             never:\n  input: https://api.example.com\n  output: src/never\n",
        );

        let err = generate_clients_from_config(&path, &generator)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingInputOrOutput { ref client } if client == "broken"));
        assert_eq!(generator.runner().configs().len(), 1);
    }

    #[tokio::test]
    async fn test_keys_without_values_fail_at_generation() {
        let (dir, generator) = setup(RecordingRunner::default());
        let path = write_config(
            &dir,
            "first:\n  input: https://api.example.com\n  output: src/first\n  client:\n  schemas:\n\
             c1:\n  input: x\n  output:\n  client:\n  schemas:\n",
        );

        let err = generate_clients_from_config(&path, &generator)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingInputOrOutput { ref client } if client == "c1"));

        let configs = generator.runner().configs();
        assert_eq!(configs.len(), 1);
        assert!(configs[0].contains("@hey-api/client-fetch"));
        assert!(!configs[0].contains("@hey-api/schemas"));
    }

    #[tokio::test]
    async fn test_empty_document_runs_nothing() -> crate::Result<()> {
        let (dir, generator) = setup(RecordingRunner::default());
        let path = write_config(&dir, "{}");

        generate_clients_from_config(&path, &generator).await?;
        assert!(generator.runner().configs().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_config_file() {
        let (dir, generator) = setup(RecordingRunner::default());
        let missing = dir.path().join("nonexistent.yaml");

        let err = generate_clients_from_config(&missing, &generator)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ConfigFileNotFound(ref path) if path == &missing));
        assert!(err.to_string().contains("nonexistent.yaml"));
    }

    #[tokio::test]
    async fn test_generator_failure_still_removes_config() {
        let (dir, generator) = setup(RecordingRunner::failing());
        let client = ClientSpec::new("client1", "https://api.example.com", "src/clients");

        let err = generator.generate(&client).await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(generator.runner().configs().len(), 1);
        assert!(!dir.path().join(CONFIG_FILE_NAME).exists());
    }

    #[tokio::test]
    async fn test_inline_mode_generates_once() -> crate::Result<()> {
        let (dir, generator) = setup(RecordingRunner::default());
        let options = ProgramOptions {
            input: Some("https://api.example.com".to_string()),
            output: Some("src/inline".to_string()),
            client_type: "axios".to_string(),
            generate_schemas: true,
            ..Default::default()
        };

        run(&options, &generator).await?;

        let configs = generator.runner().configs();
        assert_eq!(configs.len(), 1);
        assert!(configs[0].contains("src/inline"));
        assert!(configs[0].contains("@hey-api/client-axios"));
        assert!(configs[0].contains("@hey-api/schemas"));
        assert!(!dir.path().join(CONFIG_FILE_NAME).exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_run_rejects_invalid_options() {
        let (_dir, generator) = setup(RecordingRunner::default());
        let options = ProgramOptions {
            config_path: Some("clients.yaml".to_string()),
            input: Some("https://api.example.com".to_string()),
            ..Default::default()
        };

        assert!(matches!(
            run(&options, &generator).await,
            Err(Error::ConflictingOptions)
        ));
        assert!(generator.runner().configs().is_empty());
    }
}
