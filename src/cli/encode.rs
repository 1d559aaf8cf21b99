//! Encode command.

use crate::cli::common::{read_input, CliResult, GlobalOptions};
use clap::Args;
use std::path::PathBuf;

/// Encode text into key position tokens
#[derive(Debug, Clone, Args)]
pub struct EncodeArgs {
    /// Text to encode
    #[arg(value_name = "TEXT", required_unless_present = "file")]
    pub text: Option<String>,

    /// Read the text from a file instead
    #[arg(short, long, value_name = "FILE", conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Layout key (defaults to the configured layout)
    #[arg(short, long, value_name = "KEY")]
    pub layout: Option<String>,
}

impl EncodeArgs {
    /// Execute the encode command
    pub fn execute(&self, global: &GlobalOptions) -> CliResult<()> {
        let text = read_input(self.text.as_deref(), self.file.as_deref())?;
        let config = global.config()?;
        let registry = GlobalOptions::open_registry(&config)?;

        let key = self
            .layout
            .as_deref()
            .unwrap_or(&config.general.default_layout);
        println!("{}", registry.encode(key, &text)?);
        Ok(())
    }
}
