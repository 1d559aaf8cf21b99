//! Layout management CLI commands.

use crate::cli::common::{CliError, CliResult, GlobalOptions, GridFile};
use crate::models::{Case, Layout, LayoutSummary};
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Layout management commands
#[derive(Args, Debug)]
pub struct LayoutsArgs {
    #[command(subcommand)]
    command: LayoutsCommand,
}

#[derive(Subcommand, Debug)]
enum LayoutsCommand {
    /// List layouts in insertion order
    List(LayoutsListArgs),
    /// Show one layout with its key grids
    Show(LayoutsShowArgs),
    /// Add a layout from a grid file
    Add(LayoutsAddArgs),
    /// Validate a grid file without adding it
    Validate(LayoutsValidateArgs),
}

/// List layouts
#[derive(Args, Debug)]
pub struct LayoutsListArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Show one layout
#[derive(Args, Debug)]
pub struct LayoutsShowArgs {
    /// Layout key
    #[arg(value_name = "KEY")]
    key: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Add a layout
#[derive(Args, Debug)]
pub struct LayoutsAddArgs {
    /// New layout key (1-32 letters, digits, '_' or '-')
    #[arg(long, value_name = "KEY")]
    key: String,

    /// Display name
    #[arg(long, value_name = "NAME")]
    name: String,

    /// Grid file: {"lowercase": [[...]], "uppercase": [[...]]}
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

/// Validate a grid file
#[derive(Args, Debug)]
pub struct LayoutsValidateArgs {
    /// Grid file: {"lowercase": [[...]], "uppercase": [[...]]}
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// JSON-serializable layout for `show --json`
#[derive(Serialize, Debug)]
struct LayoutOutput<'a> {
    key: &'a str,
    name: &'a str,
    created: DateTime<Utc>,
    fingerprint: String,
    key_count: usize,
    lowercase: &'a [Vec<String>],
    uppercase: &'a [Vec<String>],
}

/// JSON-serializable validation result
#[derive(Serialize, Debug)]
struct ValidationOutput {
    valid: bool,
    key_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl LayoutsArgs {
    /// Execute layouts subcommand
    pub fn execute(&self, global: &GlobalOptions) -> CliResult<()> {
        match &self.command {
            LayoutsCommand::List(args) => args.execute(global),
            LayoutsCommand::Show(args) => args.execute(global),
            LayoutsCommand::Add(args) => args.execute(global),
            LayoutsCommand::Validate(args) => args.execute(),
        }
    }
}

impl LayoutsListArgs {
    /// Execute list command
    pub fn execute(&self, global: &GlobalOptions) -> CliResult<()> {
        let registry = GlobalOptions::open_registry(&global.config()?)?;
        let layouts = registry.list();

        if self.json {
            print_json(&layouts)?;
        } else if layouts.is_empty() {
            println!("No layouts found");
        } else {
            print_summaries(&layouts);
        }
        Ok(())
    }
}

impl LayoutsShowArgs {
    /// Execute show command
    pub fn execute(&self, global: &GlobalOptions) -> CliResult<()> {
        let registry = GlobalOptions::open_registry(&global.config()?)?;
        let layout = registry.get(&self.key)?;

        if self.json {
            print_json(&LayoutOutput {
                key: &layout.key,
                name: &layout.name,
                created: layout.created,
                fingerprint: layout.fingerprint(),
                key_count: layout.key_count(),
                lowercase: &layout.lowercase,
                uppercase: &layout.uppercase,
            })?;
        } else {
            print_layout(&layout);
        }
        Ok(())
    }
}

impl LayoutsAddArgs {
    /// Execute add command
    pub fn execute(&self, global: &GlobalOptions) -> CliResult<()> {
        let grid = GridFile::load(&self.file)?;
        let registry = GlobalOptions::open_registry(&global.config()?)?;

        let layout = registry.add(&self.key, &self.name, grid.lowercase, grid.uppercase)?;
        println!("Layout '{}' added successfully", layout.name);
        Ok(())
    }
}

impl LayoutsValidateArgs {
    /// Execute validate command
    pub fn execute(&self) -> CliResult<()> {
        let grid = GridFile::load(&self.file)?;
        let layout = Layout::new("grid", "grid", grid.lowercase, grid.uppercase);

        let result = layout.validate();
        let output = ValidationOutput {
            valid: result.is_ok(),
            key_count: if result.is_ok() { layout.key_count() } else { 0 },
            error: result.as_ref().err().map(ToString::to_string),
        };

        if self.json {
            print_json(&output)?;
        } else if let Some(error) = &output.error {
            println!("✗ Validation failed: {error}");
        } else {
            println!("✓ Validation passed ({} keys)", output.key_count);
        }

        match result {
            Ok(()) => Ok(()),
            Err(e) => Err(CliError::validation(format!("Invalid layout: {e}"))),
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

fn print_summaries(layouts: &[LayoutSummary]) {
    let width = layouts.iter().map(|l| l.key.len()).max().unwrap_or(0);
    for layout in layouts {
        println!("{:width$}  {}", layout.key, layout.name);
    }
}

fn print_layout(layout: &Layout) {
    println!("{} ({})", layout.name, layout.key);
    println!("Created:     {}", layout.created.to_rfc3339());
    println!("Fingerprint: {}", layout.fingerprint());
    println!("Keys:        {}", layout.key_count());

    for case in Case::ALL {
        println!("\n{case}:");
        for row in layout.grid(case) {
            let keys: Vec<&str> = row
                .iter()
                .map(|slot| if slot.trim().is_empty() { "·" } else { slot.as_str() })
                .collect();
            println!("  {}", keys.join(" "));
        }
    }
}
