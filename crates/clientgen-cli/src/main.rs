//! clientgen CLI entrypoint
//! Parses command-line arguments and dispatches to the core generator.

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use clientgen_core::{ClientGenerator, CommandRunner, ProgramOptions};
use tracing_subscriber::EnvFilter;

/// Generate TypeScript API clients from OpenAPI specs with @hey-api/openapi-ts
#[derive(Parser, Debug)]
#[command(name = "clientgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// YAML file mapping client names to their settings (e.g. clients.yaml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Client transport to generate (e.g. fetch, axios)
    #[arg(short = 't', long = "type", default_value = "fetch")]
    client_type: String,

    /// OpenAPI spec URL or path; may be a ${VAR} environment placeholder
    #[arg(short, long)]
    input: Option<String>,

    /// Output directory for the generated client
    #[arg(short, long)]
    output: Option<String>,

    /// Also emit JSON schemas
    #[arg(short, long)]
    schemas: bool,

    /// Generator command and arguments (default: npx @hey-api/openapi-ts)
    ///
    /// Consumes the remaining words, so pass it last.
    #[arg(long, num_args = 1.., value_name = "PROGRAM")]
    generator: Option<Vec<String>>,
}

impl Cli {
    fn program_options(&self) -> ProgramOptions {
        ProgramOptions {
            config_path: self.config.clone(),
            input: self.input.clone(),
            output: self.output.clone(),
            client_type: self.client_type.clone(),
            generate_schemas: self.schemas,
        }
    }

    fn runner(&self) -> CommandRunner {
        self.generator
            .clone()
            .and_then(CommandRunner::from_command_line)
            .unwrap_or_default()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = cli.program_options();
    let runner = cli.runner();
    tracing::debug!("Generator command: {}", runner.command_line());

    let working_dir =
        std::env::current_dir().context("Failed to determine the working directory")?;
    let generator = ClientGenerator::new(runner, working_dir);

    clientgen_core::run(&options, &generator)
        .await
        .context("Client generation failed")?;
    Ok(())
}
