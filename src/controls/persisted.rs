//! Control panel state persistence
//!
//! Control values are saved when the panel hides and restored when it shows.
//! Storage is a flat name → value JSON object keyed by control identifier.
//! Nothing here is fatal: a failed read falls back to the compiled-in
//! defaults and a failed write only forgoes persistence for this session.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use super::binding::{ControlBindings, ControlValue};
use crate::constants::{config, storage};

/// Snapshot of control values by identifier
/// Built fresh on every save and every restore, never cached
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersistedControlState {
    values: BTreeMap<String, ControlValue>,
}

impl PersistedControlState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current value of every registered control
    pub fn capture(bindings: &ControlBindings) -> Self {
        let values = bindings
            .entries()
            .iter()
            .map(|entry| (entry.id.key().to_string(), entry.persisted_value()))
            .collect();
        Self { values }
    }

    /// Apply stored values to matching controls. Controls without an entry keep
    /// their current value. Returns the number of controls applied.
    pub fn apply(&self, bindings: &mut ControlBindings) -> usize {
        let ids: Vec<_> = bindings.entries().iter().map(|e| e.id).collect();
        let mut applied = 0;
        for id in ids {
            if let Some(&value) = self.values.get(id.key()) {
                bindings.load(id, value);
                applied += 1;
            }
        }
        applied
    }

    /// Keep every entry that decodes as a control value; a bad entry only
    /// costs that one control its stored value
    pub fn from_raw(raw: BTreeMap<String, serde_json::Value>) -> Self {
        let mut values = BTreeMap::new();
        for (key, value) in raw {
            match serde_json::from_value::<ControlValue>(value) {
                Ok(value) => {
                    values.insert(key, value);
                }
                Err(err) => warn!(control = %key, error = %err, "Skipping unreadable stored control value"),
            }
        }
        Self { values }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: ControlValue) {
        self.values.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<ControlValue> {
        self.values.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Opaque local key-value storage for control state
pub trait ControlStateStore {
    /// Ok(None) when nothing has been stored under `key` yet
    fn load(&self, key: &str) -> Result<Option<PersistedControlState>>;

    fn store(&self, key: &str, state: &PersistedControlState) -> Result<()>;
}

/// One pretty-printed JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Platform local data directory (falls back to the working directory)
    pub fn default_dir() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(config::APP_DIR);
        path
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{}", storage::FILE_EXTENSION))
    }
}

impl ControlStateStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<PersistedControlState>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read control state from {:?}", path))?;
        let raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse control state JSON from {:?}", path))?;
        Ok(Some(PersistedControlState::from_raw(raw)))
    }

    fn store(&self, key: &str, state: &PersistedControlState) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create state directory {:?}", self.dir))?;

        let path = self.path_for(key);
        let json = serde_json::to_string_pretty(state)
            .context("Failed to serialize control state to JSON")?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write control state to {:?}", path))?;

        debug!(path = %path.display(), controls = state.len(), "Saved control state");
        Ok(())
    }
}

/// Snapshot every control and write it out. Errors are logged, not returned.
pub fn save(store: &dyn ControlStateStore, bindings: &ControlBindings) {
    let state = PersistedControlState::capture(bindings);
    if let Err(err) = store.store(storage::CONTROLS_STATE_KEY, &state) {
        warn!(error = ?err, "Failed to save control panel state, continuing without persistence");
    }
}

/// Apply stored values (if any), then the host capability override, then push
/// everything into the render configuration.
pub fn restore(store: &dyn ControlStateStore, bindings: &mut ControlBindings) {
    match store.load(storage::CONTROLS_STATE_KEY) {
        Ok(Some(state)) if state.is_empty() => debug!("Saved control panel state is empty, using defaults"),
        Ok(Some(state)) => {
            let applied = state.apply(bindings);
            info!(applied, stored = state.len(), "Restored control panel state");
        }
        Ok(None) => debug!("No saved control panel state, using defaults"),
        Err(err) => warn!(error = ?err, "Failed to load control panel state, using defaults"),
    }
    bindings.enforce_capabilities();
    bindings.sync_all();
}
