//! CLI command handlers for keycodec.
//!
//! This module provides headless, scriptable access to layouts, transcoding
//! and the configuration file for automation and shell pipelines.

pub mod common;
pub mod config;
pub mod decode;
pub mod encode;
pub mod layouts;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use decode::DecodeArgs;
pub use encode::EncodeArgs;
pub use layouts::LayoutsArgs;
