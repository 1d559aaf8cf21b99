//! Keycodec - keyboard position text encoder
//!
//! Encodes text as the keyboard positions that type it, and decodes
//! position tokens back into text, from the command line.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use keycodec::cli::common::GlobalOptions;
use keycodec::cli::{CliResult, ConfigArgs, DecodeArgs, EncodeArgs, ExitCode, LayoutsArgs};
use keycodec::constants::APP_BINARY_NAME;

/// Keycodec - encode text as keyboard key positions
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Layouts JSON file (overrides the configured storage path)
    #[arg(long, value_name = "FILE", global = true)]
    layouts_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode text into position tokens
    Encode(EncodeArgs),
    /// Decode position tokens into text
    Decode(DecodeArgs),
    /// Manage layouts
    Layouts(LayoutsArgs),
    /// Show or initialize the configuration file
    Config(ConfigArgs),
}

impl Cli {
    fn execute(&self) -> CliResult<()> {
        let global = GlobalOptions {
            layouts_file: self.layouts_file.clone(),
        };
        match &self.command {
            Command::Encode(args) => args.execute(&global),
            Command::Decode(args) => args.execute(&global),
            Command::Layouts(args) => args.execute(&global),
            Command::Config(args) => args.execute(&global),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays pipeable
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(err) = cli.execute() {
        eprintln!("{APP_BINARY_NAME}: {err}");
        std::process::exit(err.code.code());
    }
    std::process::exit(ExitCode::Success.code());
}
