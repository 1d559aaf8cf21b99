//! Configuration management CLI commands.

use crate::cli::common::{CliError, CliResult, GlobalOptions};
use crate::config::Config;
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display the effective configuration
    Show(ConfigShowArgs),
    /// Write a default configuration file
    Init(ConfigInitArgs),
}

/// Display the effective configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Write a default configuration file
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Where to write (defaults to the platform config file)
    #[arg(long, value_name = "FILE")]
    path: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self, global: &GlobalOptions) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(global),
            ConfigCommand::Init(args) => args.execute(global),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self, global: &GlobalOptions) -> CliResult<()> {
        let config = global.config()?;

        let output = if self.json {
            serde_json::to_string_pretty(&config)
                .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
        } else {
            toml::to_string_pretty(&config)
                .map_err(|e| CliError::io(format!("Failed to serialize TOML: {e}")))?
        };
        println!("{}", output.trim_end());
        Ok(())
    }
}

impl ConfigInitArgs {
    /// Execute init command
    pub fn execute(&self, global: &GlobalOptions) -> CliResult<()> {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => Config::config_file_path()
                .map_err(|e| CliError::io(format!("Failed to resolve config file: {e:#}")))?,
        };

        if path.exists() && !self.force {
            return Err(CliError::validation(format!(
                "Config file already exists: {} (use --force to overwrite)",
                path.display()
            )));
        }

        let mut config = Config::new();
        config.storage.layouts_file.clone_from(&global.layouts_file);

        config
            .save_to(&path)
            .map_err(|e| CliError::io(format!("Failed to write configuration: {e:#}")))?;

        println!("✓ Wrote configuration to {}", path.display());
        Ok(())
    }
}
