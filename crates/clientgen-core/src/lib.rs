//! clientgen Core Library
//!
//! This library drives `@hey-api/openapi-ts` to generate TypeScript API
//! clients, either from a YAML document listing many clients or from a single
//! set of inline options.

pub mod artifact;
pub mod config;
pub mod env;
pub mod error;
pub mod generate;
pub mod options;
pub mod runner;

pub use crate::{
    config::{ClientSpec, ConfigDocument},
    error::{Error, Result},
    generate::{generate_clients_from_config, generate_inline, run, ClientGenerator},
    options::ProgramOptions,
    runner::{CommandRunner, GeneratorRunner},
};
