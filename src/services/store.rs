//! Layout persistence.
//!
//! The registry keeps layouts in memory and writes the full list through a
//! [`LayoutStore`] after every successful add.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;

use crate::models::Layout;

/// Persistence backend for layouts.
pub trait LayoutStore: Send + Sync {
    /// Loads every stored layout in insertion order.
    fn load(&self) -> Result<Vec<Layout>>;

    /// Replaces the stored layouts with `layouts`.
    fn save(&self, layouts: &[Layout]) -> Result<()>;

    /// Returns true if nothing has ever been saved.
    fn is_fresh(&self) -> bool;
}

/// On-disk document shape.
#[derive(Debug, Default, Serialize, Deserialize)]
struct LayoutsFile {
    layouts: Vec<Layout>,
}

/// Stores layouts as a JSON document.
///
/// The document is a list, so insertion order survives a reload.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by `path`. The file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LayoutStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Layout>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read layouts file: {}", self.path.display()))?;

        let file: LayoutsFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse layouts file: {}", self.path.display()))?;

        info!(
            "Loaded {} layouts from {}",
            file.layouts.len(),
            self.path.display()
        );
        Ok(file.layouts)
    }

    /// Writes through a temp file + rename so the file is never half-written.
    fn save(&self, layouts: &[Layout]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create layouts directory: {}", parent.display())
            })?;
        }

        let content = serde_json::to_string_pretty(&LayoutsFile {
            layouts: layouts.to_vec(),
        })
        .context("Failed to serialize layouts")?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp layouts file: {}", temp_path.display()))?;

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename temp layouts file to: {}",
                self.path.display()
            )
        })?;

        Ok(())
    }

    fn is_fresh(&self) -> bool {
        !self.path.exists()
    }
}

/// Keeps layouts in memory only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    layouts: Mutex<Option<Vec<Layout>>>,
}

impl MemoryStore {
    /// Creates an empty, fresh store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `layouts`.
    #[must_use]
    pub fn with_layouts(layouts: Vec<Layout>) -> Self {
        Self {
            layouts: Mutex::new(Some(layouts)),
        }
    }
}

impl LayoutStore for MemoryStore {
    fn load(&self) -> Result<Vec<Layout>> {
        let guard = self
            .layouts
            .lock()
            .map_err(|_| anyhow::anyhow!("Memory store lock poisoned"))?;
        Ok(guard.clone().unwrap_or_default())
    }

    fn save(&self, layouts: &[Layout]) -> Result<()> {
        let mut guard = self
            .layouts
            .lock()
            .map_err(|_| anyhow::anyhow!("Memory store lock poisoned"))?;
        *guard = Some(layouts.to_vec());
        Ok(())
    }

    fn is_fresh(&self) -> bool {
        self.layouts.lock().map(|guard| guard.is_none()).unwrap_or(false)
    }
}
