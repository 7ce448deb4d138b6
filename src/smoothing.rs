// src/smoothing.rs
use std::collections::VecDeque;

/// Majority-vote smoother over the most recent accepted predictions.
///
/// Damps frame-to-frame label flicker when predictions come from a
/// continuous stream. Only accepted (above-threshold) predictions are
/// pushed; rejected frames never touch the window.
#[derive(Debug)]
pub struct PredictionWindow {
    history: VecDeque<String>,
    capacity: usize,
}

impl PredictionWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            history: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Pushes an accepted label, evicting the oldest entry when the
    /// window is at capacity, and returns the most frequent label
    /// currently held.
    pub fn push(&mut self, label: &str) -> String {
        self.history.push_back(label.to_string());
        if self.history.len() > self.capacity {
            self.history.pop_front();
        }
        self.majority()
    }

    /// Most frequent label in the window. Ties go to the label whose
    /// first occurrence is oldest in the window.
    fn majority(&self) -> String {
        let mut best: Option<(&str, usize)> = None;

        for (i, candidate) in self.history.iter().enumerate() {
            // Count each label once, at its first occurrence; window
            // order then decides ties.
            if self.history.iter().take(i).any(|seen| seen == candidate) {
                continue;
            }
            let count = self.history.iter().filter(|l| *l == candidate).count();
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((candidate, count));
            }
        }

        best.map(|(label, _)| label.to_string()).unwrap_or_default()
    }

    /// Window contents, oldest first.
    pub fn contents(&self) -> Vec<String> {
        self.history.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_starts_empty() {
        let window = PredictionWindow::new(7);
        assert!(window.is_empty());
        assert!(window.contents().is_empty());
    }

    #[test]
    fn push_past_capacity_evicts_oldest() {
        let mut window = PredictionWindow::new(3);
        window.push("A");
        window.push("B");
        window.push("C");
        window.push("D");

        assert_eq!(window.len(), 3);
        assert_eq!(window.contents(), vec!["B", "C", "D"]);
    }

    #[test]
    fn capacity_plus_one_pushes_hold_capacity_entries() {
        let mut window = PredictionWindow::new(7);
        for i in 0..8 {
            window.push(&format!("G{i}"));
        }

        assert_eq!(window.len(), 7);
        // G0 is the evicted one.
        assert_eq!(window.contents()[0], "G1");
    }

    #[test]
    fn majority_vote_picks_most_frequent() {
        let mut window = PredictionWindow::new(7);
        window.push("A");
        window.push("A");
        window.push("B");
        window.push("A");
        let stabilized = window.push("C");

        assert_eq!(stabilized, "A");
    }

    #[test]
    fn single_push_returns_that_label() {
        let mut window = PredictionWindow::new(7);
        assert_eq!(window.push("WAVE"), "WAVE");
    }

    #[test]
    fn ties_go_to_earliest_first_occurrence() {
        let mut window = PredictionWindow::new(7);
        window.push("B");
        window.push("A");
        window.push("B");
        let stabilized = window.push("A");

        // Two of each; B appeared first.
        assert_eq!(stabilized, "B");
    }

    #[test]
    fn vote_follows_evictions() {
        let mut window = PredictionWindow::new(3);
        window.push("A");
        window.push("A");
        window.push("B");
        window.push("B");
        // Window is now [A, B, B].
        let stabilized = window.push("B");
        assert_eq!(stabilized, "B");
    }
}
