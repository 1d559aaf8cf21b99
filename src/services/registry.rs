//! Layout registry.
//!
//! Holds every known layout keyed by its layout key, remembers insertion
//! order for listing, and caches the mapping built for each layout.
//!
//! A single `RwLock` guards layouts, order and mapping cache together, so
//! a reader never observes a half-inserted layout and cache entries change
//! atomically with the registry contents.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::codec::{Transcoder, TranscodeError};
use crate::models::{
    builtin_layouts, is_valid_layout_key, InvalidLayout, Layout, LayoutSummary, Mapping, RowGrid,
};
use crate::services::store::{LayoutStore, MemoryStore};

/// A registry operation failure.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A required field was empty.
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    /// The layout key has the wrong format.
    #[error("invalid layout key '{0}': use 1-32 letters, digits, '_' or '-'")]
    InvalidKey(String),

    /// A layout with this key already exists.
    #[error("layout with key '{0}' already exists")]
    DuplicateKey(String),

    /// No layout has this key.
    #[error("layout with key '{0}' not found")]
    NotFound(String),

    /// The layout violates an invariant.
    #[error("invalid layout: {0}")]
    InvalidLayout(#[from] InvalidLayout),

    /// The store failed to persist the registry.
    #[error("failed to store layouts: {0:#}")]
    Storage(anyhow::Error),
}

/// Mapping cached for one layout, tagged with the layout fingerprint it
/// was built from.
struct CachedMapping {
    fingerprint: String,
    mapping: Arc<Mapping>,
}

struct Entry {
    layout: Arc<Layout>,
    fingerprint: String,
}

#[derive(Default)]
struct RegistryState {
    order: Vec<String>,
    entries: HashMap<String, Entry>,
    mappings: HashMap<String, CachedMapping>,
}

impl RegistryState {
    fn insert(&mut self, layout: Layout) {
        let key = layout.key.clone();
        let fingerprint = layout.fingerprint();
        self.mappings.remove(&key);
        self.order.push(key.clone());
        self.entries.insert(
            key,
            Entry {
                layout: Arc::new(layout),
                fingerprint,
            },
        );
    }

    fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
        self.entries.remove(key);
        self.mappings.remove(key);
    }

    fn snapshot(&self) -> Vec<Layout> {
        self.order
            .iter()
            .filter_map(|key| self.entries.get(key))
            .map(|entry| entry.layout.as_ref().clone())
            .collect()
    }
}

/// Store of named layouts.
///
/// Owned explicitly by its caller (the web state holds it in an `Arc`);
/// tests build isolated registries with [`LayoutRegistry::in_memory`].
pub struct LayoutRegistry {
    store: Box<dyn LayoutStore>,
    state: RwLock<RegistryState>,
}

impl LayoutRegistry {
    /// Creates a registry holding every valid layout in `store`.
    ///
    /// Stored layouts that fail validation or repeat a key are skipped with
    /// a warning.
    pub fn new(store: Box<dyn LayoutStore>) -> anyhow::Result<Self> {
        let mut state = RegistryState::default();

        for layout in store.load()? {
            if !is_valid_layout_key(&layout.key) {
                warn!("Skipping stored layout with invalid key '{}'", layout.key);
                continue;
            }
            if state.entries.contains_key(&layout.key) {
                warn!("Skipping duplicate stored layout '{}'", layout.key);
                continue;
            }
            if let Err(e) = layout.validate() {
                warn!("Skipping invalid stored layout '{}': {}", layout.key, e);
                continue;
            }
            state.insert(layout);
        }

        Ok(Self {
            store,
            state: RwLock::new(state),
        })
    }

    /// Creates a registry, seeding the built-in layouts if the store has
    /// never been written.
    pub fn with_builtin_layouts(store: Box<dyn LayoutStore>) -> anyhow::Result<Self> {
        if store.is_fresh() {
            let layouts = builtin_layouts();
            info!("Seeding {} built-in layouts", layouts.len());
            store.save(&layouts)?;
        }
        Self::new(store)
    }

    /// Creates an empty registry backed by memory only.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            store: Box::new(MemoryStore::new()),
            state: RwLock::new(RegistryState::default()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a new layout and persists the registry.
    ///
    /// Existing keys are never overwritten. If persisting fails the layout
    /// is removed again before the error is returned.
    pub fn add(
        &self,
        key: &str,
        name: &str,
        lowercase: RowGrid,
        uppercase: RowGrid,
    ) -> Result<Arc<Layout>, RegistryError> {
        let key = key.trim();
        let name = name.trim();

        if key.is_empty() {
            return Err(RegistryError::MissingField("layout_key"));
        }
        if name.is_empty() {
            return Err(RegistryError::MissingField("layout_name"));
        }
        if !is_valid_layout_key(key) {
            return Err(RegistryError::InvalidKey(key.to_string()));
        }

        let layout = Layout::new(key, name, lowercase, uppercase);
        layout.validate()?;

        let mut state = self.write();
        if state.entries.contains_key(key) {
            return Err(RegistryError::DuplicateKey(key.to_string()));
        }

        state.insert(layout);
        if let Err(e) = self.store.save(&state.snapshot()) {
            state.remove(key);
            warn!("Rolled back layout '{}': {:#}", key, e);
            return Err(RegistryError::Storage(e));
        }

        info!("Added layout '{}' ({})", key, name);
        Ok(Arc::clone(&state.entries[key].layout))
    }

    /// Looks up a layout by key.
    pub fn get(&self, key: &str) -> Result<Arc<Layout>, RegistryError> {
        self.read()
            .entries
            .get(key)
            .map(|entry| Arc::clone(&entry.layout))
            .ok_or_else(|| RegistryError::NotFound(key.to_string()))
    }

    /// Returns true if a layout with this key exists.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.read().entries.contains_key(key)
    }

    /// Number of layouts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().order.len()
    }

    /// Returns true if the registry holds no layouts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().order.is_empty()
    }

    /// Lists layout summaries in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<LayoutSummary> {
        let state = self.read();
        state
            .order
            .iter()
            .filter_map(|key| state.entries.get(key))
            .map(|entry| entry.layout.summary())
            .collect()
    }

    /// Returns the mapping for a layout, building and caching it on first
    /// use.
    pub fn mapping(&self, key: &str) -> Result<Arc<Mapping>, RegistryError> {
        {
            let state = self.read();
            let entry = state
                .entries
                .get(key)
                .ok_or_else(|| RegistryError::NotFound(key.to_string()))?;
            if let Some(cached) = state.mappings.get(key) {
                if cached.fingerprint == entry.fingerprint {
                    debug!("Mapping cache hit for '{}'", key);
                    return Ok(Arc::clone(&cached.mapping));
                }
            }
        }

        let mut state = self.write();
        let (layout, fingerprint) = match state.entries.get(key) {
            Some(entry) => (Arc::clone(&entry.layout), entry.fingerprint.clone()),
            None => return Err(RegistryError::NotFound(key.to_string())),
        };

        // Another writer may have built it while we waited for the lock
        if let Some(cached) = state.mappings.get(key) {
            if cached.fingerprint == fingerprint {
                return Ok(Arc::clone(&cached.mapping));
            }
        }

        let mapping = Arc::new(Mapping::build(&layout)?);
        debug!("Built mapping for '{}' ({} keys)", key, mapping.len());
        state.mappings.insert(
            key.to_string(),
            CachedMapping {
                fingerprint,
                mapping: Arc::clone(&mapping),
            },
        );
        Ok(mapping)
    }

    /// Encodes `text` with the layout named `key`.
    pub fn encode(&self, key: &str, text: &str) -> Result<String, CodecError> {
        let mapping = self.mapping(key)?;
        Ok(Transcoder::new(&mapping).encode(text)?)
    }

    /// Decodes `encoded` with the layout named `key`.
    pub fn decode(&self, key: &str, encoded: &str) -> Result<String, CodecError> {
        let mapping = self.mapping(key)?;
        Ok(Transcoder::new(&mapping).decode(encoded)?)
    }
}

/// Any failure of a registry-backed transcoding request.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Layout lookup or mapping build failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The text could not be transcoded.
    #[error(transparent)]
    Transcode(#[from] TranscodeError),
}

impl CodecError {
    /// Stable machine-readable error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Registry(e) => e.kind(),
            Self::Transcode(TranscodeError::UnsupportedCharacter { .. }) => "unsupported_character",
            Self::Transcode(TranscodeError::MalformedToken { .. }) => "malformed_token",
        }
    }
}

impl RegistryError {
    /// Stable machine-readable error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "missing_field",
            Self::InvalidKey(_) => "invalid_key",
            Self::DuplicateKey(_) => "duplicate_key",
            Self::NotFound(_) => "not_found",
            Self::InvalidLayout(_) => "invalid_layout",
            Self::Storage(_) => "storage",
        }
    }
}
