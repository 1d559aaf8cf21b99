//! Decode command.

use crate::cli::common::{read_input, CliResult, GlobalOptions};
use clap::Args;
use std::path::PathBuf;

/// Decode key position tokens back into text
#[derive(Debug, Clone, Args)]
pub struct DecodeArgs {
    /// Space-separated tokens to decode
    #[arg(value_name = "TEXT", required_unless_present = "file")]
    pub text: Option<String>,

    /// Read the tokens from a file instead
    #[arg(short, long, value_name = "FILE", conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Layout key (defaults to the configured layout)
    #[arg(short, long, value_name = "KEY")]
    pub layout: Option<String>,
}

impl DecodeArgs {
    /// Execute the decode command
    pub fn execute(&self, global: &GlobalOptions) -> CliResult<()> {
        let encoded = read_input(self.text.as_deref(), self.file.as_deref())?;
        let config = global.config()?;
        let registry = GlobalOptions::open_registry(&config)?;

        let key = self
            .layout
            .as_deref()
            .unwrap_or(&config.general.default_layout);
        // Decoded text may end in a reserved newline; print it as-is
        print!("{}", registry.decode(key, &encoded)?);
        Ok(())
    }
}
