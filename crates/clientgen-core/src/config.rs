//! Client configuration documents.
//!
//! This module defines the [`ClientSpec`] and [`ConfigDocument`] types. A
//! config document is a YAML mapping from client name to client settings,
//! and the order of entries in the file is the order clients are generated in.
//!
//! # Examples
//!
//! ```
//! use clientgen_core::config::ConfigDocument;
//!
//! let doc = ConfigDocument::parse(
//!     r#"
//! petstore:
//!   input: ${PETSTORE_URL}
//!   output: src/clients/petstore
//!   client: axios
//!   schemas: true
//! "#,
//! )
//! .unwrap();
//!
//! let petstore = &doc.clients()[0];
//! assert_eq!(petstore.name, "petstore");
//! assert_eq!(petstore.client_type, "axios");
//! assert!(petstore.generate_schemas);
//! ```

// Internal imports (std, crate)
use std::path::Path;

use crate::{Error, Result};

// External imports (alphabetized)
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value as YamlValue};
use tokio::fs;

/// Settings for one generated API client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSpec {
    /// Client name, taken from the document key
    #[serde(skip)]
    pub name: String,

    /// OpenAPI spec location, possibly containing a `${NAME}` placeholder
    #[serde(default, deserialize_with = "null_as_default")]
    pub input: String,

    /// Output directory for the generated client
    #[serde(default, deserialize_with = "null_as_default")]
    pub output: String,

    /// Transport used by the generated client (e.g. `fetch`, `axios`)
    #[serde(
        rename = "client",
        default = "default_client_type",
        deserialize_with = "null_as_client_type"
    )]
    pub client_type: String,

    /// Whether to also emit JSON schemas
    #[serde(rename = "schemas", default, deserialize_with = "null_as_default")]
    pub generate_schemas: bool,
}

impl Default for ClientSpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            input: String::new(),
            output: String::new(),
            client_type: default_client_type(),
            generate_schemas: false,
        }
    }
}

impl ClientSpec {
    /// Create a client spec with the default transport and no schemas
    pub fn new(
        name: impl Into<String>,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            input: input.into(),
            output: output.into(),
            ..Default::default()
        }
    }
}

/// Ordered collection of named client specs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDocument {
    clients: Vec<ClientSpec>,
}

impl ConfigDocument {
    /// Load a config document from a YAML file
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigFileNotFound`] if `path` does not exist, and
    /// propagates read and parse failures.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::ConfigFileNotFound(path.to_path_buf()));
        }

        log::debug!("Reading client config from: {}", path.display());
        let content = fs::read_to_string(path).await?;
        Self::parse(&content)
    }

    /// Parse a config document from YAML text.
    ///
    /// Empty and `null` documents contain no clients. Entries are not
    /// validated here.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let mapping: Option<Mapping> = serde_yaml::from_str(content)?;
        let mut clients = Vec::new();
        for (key, value) in mapping.unwrap_or_default() {
            let name = match key {
                YamlValue::String(name) => name,
                YamlValue::Number(n) => n.to_string(),
                YamlValue::Bool(b) => b.to_string(),
                other => {
                    return Err(Error::config(format!(
                        "client names must be strings, found {other:?}"
                    )))
                }
            };
            let mut client = if value.is_null() {
                ClientSpec::default()
            } else {
                serde_yaml::from_value::<ClientSpec>(value)?
            };
            client.name = name;
            clients.push(client);
        }

        Ok(Self { clients })
    }

    /// Clients in document order
    pub fn clients(&self) -> &[ClientSpec] {
        &self.clients
    }

    /// Number of clients in the document
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Whether the document lists no clients
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl<'a> IntoIterator for &'a ConfigDocument {
    type Item = &'a ClientSpec;
    type IntoIter = std::slice::Iter<'a, ClientSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.clients.iter()
    }
}

pub(crate) fn default_client_type() -> String {
    "fetch".to_string()
}

/// A key written without a value (`output:`) means the field is absent
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_client_type<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_client_type))
}
