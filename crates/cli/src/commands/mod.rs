//! Command implementations.

pub mod catalog;
pub mod designs;
pub mod products;

use std::path::{Path, PathBuf};

use merchdesk_admin::{
    ConfigError, DeskError, GatewayError, InMemoryGateway, Vocabularies,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("{0}")]
    Desk(#[from] DeskError),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Read and parse a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a value to stdout as pretty JSON.
#[allow(clippy::print_stdout)]
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// In-memory service for `--offline`, serving the seed vocabularies if given.
pub fn offline_gateway(seed: Option<&Path>) -> Result<InMemoryGateway, CliError> {
    let vocabularies: Vocabularies = seed.map(read_json).transpose()?.unwrap_or_default();
    tracing::info!(
        colors = vocabularies.colors.len(),
        sizes = vocabularies.sizes.len(),
        "Running offline"
    );
    Ok(InMemoryGateway::new(vocabularies))
}
