//! The temporary `openapi-ts.config.ts` that drives one generator run.
//!
//! [`render_config`] produces the configuration document for a client and
//! [`ConfigArtifact`] owns the file on disk: it is written when the artifact is
//! created and removed when it is dropped, whether the generator succeeded,
//! failed, or never started.

// Internal imports (std, crate)
use std::io;
use std::path::{Path, PathBuf};

use crate::config::ClientSpec;
use crate::Result;

// External imports (alphabetized)
use tera::{Context, Tera};
use tokio::fs;

/// File name the external generator discovers in its working directory
pub const CONFIG_FILE_NAME: &str = "openapi-ts.config.ts";

const CONFIG_TEMPLATE: &str = include_str!("../templates/openapi-ts.config.ts.tera");

/// Render the generator configuration for `client`.
///
/// `client.input` must already be resolved. String values are embedded as
/// JSON string literals, which TypeScript accepts verbatim.
pub fn render_config(client: &ClientSpec) -> Result<String> {
    let mut context = Context::new();
    context.insert("input", &serde_json::to_string(&client.input)?);
    context.insert("output", &serde_json::to_string(&client.output)?);
    context.insert(
        "client_plugin",
        &serde_json::to_string(&format!("@hey-api/client-{}", client.client_type))?,
    );
    context.insert("generate_schemas", &client.generate_schemas);

    Ok(Tera::one_off(CONFIG_TEMPLATE, &context, false)?)
}

/// A generator config file that is deleted when dropped
#[derive(Debug)]
pub struct ConfigArtifact {
    path: PathBuf,
}

impl ConfigArtifact {
    /// Write `contents` to [`CONFIG_FILE_NAME`] inside `dir`.
    ///
    /// An existing file at that path is overwritten.
    pub async fn create(dir: &Path, contents: &str) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            log::warn!("Overwriting existing {}", path.display());
        }
        fs::write(&path, contents).await?;
        log::debug!("Wrote {} bytes to {}", contents.len(), path.display());
        Ok(Self { path })
    }

    /// Location of the config file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ConfigArtifact {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => log::debug!("Removed {}", self.path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Failed to remove {}: {}", self.path.display(), e),
        }
    }
}
