// src/config.rs
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::landmarks::{NormalizationPolicy, HAND_LANDMARK_COUNT, MIDDLE_MCP, WRIST};

/// Deployment-time knobs for the recognition engine.
///
/// Defaults follow the reference deployment: 21-point MediaPipe hand
/// frames, wrist anchor, middle-MCP scale reference, a 0.60 confidence
/// threshold and a 7-frame smoothing window. Stricter deployments raise
/// the threshold (0.92 has been used with translate-only normalization).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Points per hand frame. Frames of any other length are rejected
    /// before they reach the engine.
    pub landmark_count: usize,
    pub anchor_index: usize,
    pub scale_ref_index: usize,
    pub normalization: NormalizationPolicy,
    pub confidence_threshold: f64,
    pub window_capacity: usize,
    pub store_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            landmark_count: HAND_LANDMARK_COUNT,
            anchor_index: WRIST,
            scale_ref_index: MIDDLE_MCP,
            normalization: NormalizationPolicy::TranslateScale,
            confidence_threshold: 0.6,
            window_capacity: 7,
            store_path: directories::ProjectDirs::from("", "", "isl_engine")
                .map(|dirs| dirs.data_dir().join("gestures.json"))
                .unwrap_or_else(|| PathBuf::from("gestures.json")),
        }
    }
}

impl EngineConfig {
    /// Reads a config file if present; missing or invalid files fall
    /// back to defaults.
    pub fn load_or_default(path: &Path) -> Self {
        let Ok(content) = fs::read_to_string(path) else {
            return Self::default();
        };

        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "invalid config file, using defaults");
                Self::default()
            }
        }
    }
}
