// src/store.rs
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reference set: gesture label -> normalized sample vectors.
///
/// Backed by a `BTreeMap` so iteration is always sorted by label; the
/// matcher's tie-break depends on a fixed evaluation order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GestureStore {
    gestures: BTreeMap<String, Vec<Vec<f64>>>,
}

impl GestureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends samples under `label`, creating the entry if absent, and
    /// returns the new total for that label. Existing samples are never
    /// removed or rewritten.
    pub fn add_samples(&mut self, label: &str, samples: Vec<Vec<f64>>) -> usize {
        let entry = self.gestures.entry(label.to_string()).or_default();
        entry.extend(samples);
        entry.len()
    }

    pub fn samples(&self, label: &str) -> Option<&[Vec<f64>]> {
        self.gestures.get(label).map(|v| v.as_slice())
    }

    /// Iterates entries in sorted label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Vec<f64>])> {
        self.gestures.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn labels(&self) -> Vec<String> {
        self.gestures.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.gestures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gestures.is_empty()
    }

    /// Loads a snapshot from disk. A missing file yields an empty store.
    /// An entry keyed by the empty string is dropped before use.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)?;
        let mut store: GestureStore = serde_json::from_str(&content)?;
        if store.gestures.remove("").is_some() {
            warn!("dropped samples stored under an empty label");
        }

        info!(gestures = store.len(), path = %path.display(), "gesture store loaded");
        Ok(store)
    }

    /// Rewrites the snapshot in full.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string(&self.gestures)?)?;
        Ok(())
    }
}
