//! Shared CLI plumbing: error type, exit codes and registry access.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::config::Config;
use crate::models::RowGrid;
use crate::services::{CodecError, JsonFileStore, LayoutRegistry, RegistryError};

/// Process exit codes returned by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Invalid input, unknown layout or failed validation
    ValidationError = 1,
    /// File or storage failure
    IoError = 2,
}

impl ExitCode {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// A CLI command failure carrying its exit code.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CliError {
    /// Exit code to terminate with
    pub code: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Validation or user input error (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::ValidationError,
            message: message.into(),
        }
    }

    /// I/O or storage error (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::IoError,
            message: message.into(),
        }
    }
}

impl From<RegistryError> for CliError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Storage(_) => Self::io(err.to_string()),
            _ => Self::validation(err.to_string()),
        }
    }
}

impl From<CodecError> for CliError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Registry(e) => e.into(),
            CodecError::Transcode(e) => Self::validation(e.to_string()),
        }
    }
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Overrides the configured layouts file
    pub layouts_file: Option<PathBuf>,
}

impl GlobalOptions {
    /// Loads the configuration with command-line overrides applied.
    pub fn config(&self) -> CliResult<Config> {
        let mut config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;
        if let Some(path) = &self.layouts_file {
            config.storage.layouts_file = Some(path.clone());
        }
        Ok(config)
    }

    /// Opens the layout registry for `config`, seeding built-ins when enabled.
    pub fn open_registry(config: &Config) -> CliResult<LayoutRegistry> {
        let path = config
            .layouts_file()
            .map_err(|e| CliError::io(format!("Failed to resolve layouts file: {e:#}")))?;
        let store = Box::new(JsonFileStore::new(path));

        let registry = if config.storage.seed_builtin {
            LayoutRegistry::with_builtin_layouts(store)
        } else {
            LayoutRegistry::new(store)
        };
        registry.map_err(|e| CliError::io(format!("Failed to load layouts: {e:#}")))
    }
}

/// Returns the positional text, or the contents of `file`.
pub fn read_input(text: Option<&str>, file: Option<&Path>) -> CliResult<String> {
    match (text, file) {
        (Some(text), None) => Ok(text.to_string()),
        (None, Some(path)) => fs::read_to_string(path)
            .map_err(|e| CliError::io(format!("Failed to read {}: {e}", path.display()))),
        (Some(_), Some(_)) => Err(CliError::validation(
            "Provide either TEXT or --file, not both",
        )),
        (None, None) => Err(CliError::validation("Provide TEXT or --file")),
    }
}

/// Key grids read from a `GRID.json` file.
#[derive(Debug, Clone, Deserialize)]
pub struct GridFile {
    /// Unshifted key grid
    pub lowercase: RowGrid,
    /// Shifted key grid
    pub uppercase: RowGrid,
}

impl GridFile {
    /// Reads and parses a grid file.
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::io(format!("Failed to read {}: {e}", path.display())))?;
        serde_json::from_str(&content).map_err(|e| {
            CliError::validation(format!("Failed to parse {}: {e}", path.display()))
        })
    }
}
