//! Keycodec Library
//!
//! This library encodes text as keyboard key positions and decodes it back,
//! using named layouts kept in a persistent registry. The HTTP API lives
//! behind the `web` feature.

// Module declarations
pub mod cli;
pub mod codec;
pub mod config;
pub mod constants;
pub mod models;
pub mod services;
#[cfg(feature = "web")]
pub mod web;
