// src/classifier.rs
use crate::store::GestureStore;

/// Outcome of matching one feature vector against the reference set.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// The store holds no gestures; there is nothing to match against.
    NoGesturesKnown,
    /// Best score fell below the confidence threshold; the near-miss
    /// score is still reported.
    LowConfidence { score: f64 },
    /// Accepted match.
    Match { label: String, score: f64 },
}

/// Component-wise mean of a label's sample vectors.
///
/// All samples under one label share the same dimensionality; `samples`
/// must be non-empty.
pub fn centroid(samples: &[Vec<f64>]) -> Vec<f64> {
    let mut mean = vec![0.0; samples[0].len()];
    for sample in samples {
        for (acc, value) in mean.iter_mut().zip(sample) {
            *acc += value;
        }
    }

    let count = samples.len() as f64;
    for value in &mut mean {
        *value /= count;
    }
    mean
}

/// Standard cosine similarity in [-1, 1]; a zero-magnitude input on
/// either side scores 0.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Scores `input` against every label's centroid and selects the best.
///
/// The comparison is strictly greater-than and the store iterates in
/// sorted label order, so ties always resolve to the first label in that
/// order.
pub fn match_gesture(input: &[f64], store: &GestureStore, threshold: f64) -> MatchOutcome {
    if store.is_empty() {
        return MatchOutcome::NoGesturesKnown;
    }

    let mut best_label: Option<&str> = None;
    let mut best_score = f64::NEG_INFINITY;

    for (label, samples) in store.iter() {
        // A loaded snapshot may carry a label with no samples; it cannot
        // be matched.
        if samples.is_empty() {
            continue;
        }

        let score = cosine_similarity(input, &centroid(samples));
        if score > best_score {
            best_score = score;
            best_label = Some(label);
        }
    }

    let Some(label) = best_label else {
        return MatchOutcome::NoGesturesKnown;
    };

    if best_score < threshold {
        MatchOutcome::LowConfidence { score: best_score }
    } else {
        MatchOutcome::Match {
            label: label.to_string(),
            score: best_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centroid_is_component_wise_mean() {
        let samples = vec![vec![1.0, 0.0, 3.0], vec![3.0, 2.0, 3.0]];
        assert_eq!(centroid(&samples), vec![2.0, 1.0, 3.0]);
    }

    #[test]
    fn cosine_of_identical_vectors_is_one() {
        let v = vec![0.3, -1.2, 0.7, 2.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cosine_of_orthogonal_vectors_is_zero() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn cosine_of_zero_vector_is_zero() {
        let a = vec![0.0, 0.0];
        let b = vec![1.0, 1.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn empty_store_reports_no_gestures_known() {
        let store = GestureStore::new();
        assert_eq!(match_gesture(&[1.0, 0.0], &store, 0.6), MatchOutcome::NoGesturesKnown);
    }

    #[test]
    fn single_sample_store_matches_itself() {
        let mut store = GestureStore::new();
        store.add_samples("FIST", vec![vec![0.2, -0.4, 0.9]]);

        match match_gesture(&[0.2, -0.4, 0.9], &store, 0.6) {
            MatchOutcome::Match { label, score } => {
                assert_eq!(label, "FIST");
                assert!((score - 1.0).abs() < 1e-12);
            }
            other => panic!("expected match, got {other:?}"),
        }
    }

    #[test]
    fn below_threshold_reports_low_confidence_with_score() {
        let mut store = GestureStore::new();
        store.add_samples("UP", vec![vec![1.0, 0.0]]);

        match match_gesture(&[0.0, 1.0], &store, 0.6) {
            MatchOutcome::LowConfidence { score } => assert_eq!(score, 0.0),
            other => panic!("expected low confidence, got {other:?}"),
        }
    }

    #[test]
    fn ties_go_to_the_first_label_in_sorted_order() {
        let mut store = GestureStore::new();
        // Identical sample sets score identically for any input.
        store.add_samples("ZETA", vec![vec![1.0, 1.0]]);
        store.add_samples("ALPHA", vec![vec![1.0, 1.0]]);

        match match_gesture(&[1.0, 1.0], &store, 0.6) {
            MatchOutcome::Match { label, .. } => assert_eq!(label, "ALPHA"),
            other => panic!("expected match, got {other:?}"),
        }
    }

    #[test]
    fn labels_without_samples_are_skipped() {
        let mut store = GestureStore::new();
        store.add_samples("EMPTY", vec![]);
        store.add_samples("WAVE", vec![vec![1.0, 0.0]]);

        match match_gesture(&[1.0, 0.0], &store, 0.6) {
            MatchOutcome::Match { label, .. } => assert_eq!(label, "WAVE"),
            other => panic!("expected match, got {other:?}"),
        }
    }

    #[test]
    fn store_of_only_empty_labels_reports_no_gestures_known() {
        let mut store = GestureStore::new();
        store.add_samples("EMPTY", vec![]);

        assert_eq!(match_gesture(&[1.0, 0.0], &store, 0.6), MatchOutcome::NoGesturesKnown);
    }
}
