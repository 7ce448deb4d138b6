// src/engine.rs
use thiserror::Error;
use tracing::{debug, info};

use crate::classifier::{match_gesture, MatchOutcome};
use crate::config::EngineConfig;
use crate::landmarks::{normalize, Landmark};
use crate::smoothing::PredictionWindow;
use crate::store::GestureStore;

#[derive(Error, Debug, PartialEq)]
pub enum EngineError {
    #[error("gesture label is empty after trimming")]
    InvalidLabel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainOutcome {
    /// Trimmed, upper-cased form actually used as the store key.
    pub label: String,
    pub total_samples: usize,
}

/// Result of classifying one landmark frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    /// The reference set is empty; the engine is not ready yet.
    NoGesturesKnown,
    /// Best match fell below the confidence threshold; carries the
    /// near-miss confidence as a percentage.
    LowConfidence { confidence: f64 },
    /// Accepted match, stabilized through the smoothing window.
    Recognized {
        gesture: String,
        confidence: f64,
        window: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GestureList {
    pub count: usize,
    pub labels: Vec<String>,
}

/// Single owner of the recognizer state: config, reference store and
/// smoothing window.
///
/// The engine does no locking and no I/O of its own. Multi-threaded
/// hosts wrap it in `Arc<Mutex<RecognitionEngine>>` so that centroid
/// reads and the window's push-and-vote stay atomic.
pub struct RecognitionEngine {
    config: EngineConfig,
    store: GestureStore,
    window: PredictionWindow,
}

impl RecognitionEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_store(config, GestureStore::new())
    }

    /// Builds an engine around a store loaded by the persistence
    /// collaborator. The smoothing window always starts empty.
    pub fn with_store(config: EngineConfig, store: GestureStore) -> Self {
        let window = PredictionWindow::new(config.window_capacity);
        Self {
            config,
            store,
            window,
        }
    }

    /// Normalizes and appends a batch of training samples under `label`.
    ///
    /// The label is trimmed and upper-cased first; a label that is empty
    /// after trimming is rejected and the store is left untouched.
    ///
    /// The caller is expected to persist the store after this returns; a
    /// failed save does not roll back the in-memory append.
    pub fn train(
        &mut self,
        label: &str,
        samples: &[Vec<Landmark>],
    ) -> Result<TrainOutcome, EngineError> {
        let label = label.trim().to_uppercase();
        if label.is_empty() {
            return Err(EngineError::InvalidLabel);
        }

        let vectors = samples
            .iter()
            .map(|frame| self.normalize_frame(frame))
            .collect();
        let total_samples = self.store.add_samples(&label, vectors);

        info!(label = %label, total = total_samples, "trained gesture samples");
        Ok(TrainOutcome {
            label,
            total_samples,
        })
    }

    /// Classifies one landmark frame against the reference set.
    ///
    /// Only accepted matches enter the smoothing window; rejected frames
    /// leave it untouched, so a confident miss cannot evict stable
    /// history.
    pub fn predict(&mut self, frame: &[Landmark]) -> Prediction {
        let input = self.normalize_frame(frame);

        match match_gesture(&input, &self.store, self.config.confidence_threshold) {
            MatchOutcome::NoGesturesKnown => Prediction::NoGesturesKnown,
            MatchOutcome::LowConfidence { score } => {
                debug!(score, "prediction below confidence threshold");
                Prediction::LowConfidence {
                    confidence: confidence_percent(score),
                }
            }
            MatchOutcome::Match { label, score } => {
                let gesture = self.window.push(&label);
                Prediction::Recognized {
                    gesture,
                    confidence: confidence_percent(score),
                    window: self.window.contents(),
                }
            }
        }
    }

    pub fn gestures(&self) -> GestureList {
        GestureList {
            count: self.store.len(),
            labels: self.store.labels(),
        }
    }

    pub fn store(&self) -> &GestureStore {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn normalize_frame(&self, frame: &[Landmark]) -> Vec<f64> {
        normalize(
            frame,
            self.config.normalization,
            self.config.anchor_index,
            self.config.scale_ref_index,
        )
    }
}

/// Cosine score reported as a percentage with two decimal digits.
fn confidence_percent(score: f64) -> f64 {
    (score * 100.0 * 100.0).round() / 100.0
}
