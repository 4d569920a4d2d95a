// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reducing a sequence of samples to its transitions.

use serde::Deserialize;

/// What to do with the very first sample, when there is nothing to compare
/// it against yet.
///
/// # Examples
///
/// ```
/// use stbwatch::watcher::{FirstObservation, TransitionDetector};
///
/// let mut silent = TransitionDetector::new(FirstObservation::Baseline);
/// assert_eq!(silent.observe(true), None);
///
/// let mut eager = TransitionDetector::new(FirstObservation::Report);
/// assert_eq!(eager.observe(true), Some(true));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstObservation {
    /// The first sample only establishes the baseline; no event is emitted.
    #[default]
    Baseline,
    /// The first sample is reported as a transition away from "unknown".
    Report,
}

/// Tracks the last known state and reports only changes.
///
/// The detector is a pure state machine: it does no I/O and keeps no history
/// beyond the last sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionDetector {
    last: Option<bool>,
    first: FirstObservation,
}

impl TransitionDetector {
    /// Creates a detector with an unknown baseline.
    #[must_use]
    pub fn new(first: FirstObservation) -> Self {
        Self { last: None, first }
    }

    /// Returns the last observed state, or `None` before the first sample.
    #[must_use]
    pub fn last(&self) -> Option<bool> {
        self.last
    }

    /// Feeds one sample and returns the new state if it is a transition.
    pub fn observe(&mut self, sample: bool) -> Option<bool> {
        let previous = self.last.replace(sample);
        match previous {
            None => match self.first {
                FirstObservation::Baseline => None,
                FirstObservation::Report => Some(sample),
            },
            Some(prev) if prev != sample => Some(sample),
            Some(_) => None,
        }
    }
}

impl Default for TransitionDetector {
    fn default() -> Self {
        Self::new(FirstObservation::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(first: FirstObservation, samples: &[bool]) -> Vec<bool> {
        let mut detector = TransitionDetector::new(first);
        samples.iter().filter_map(|&s| detector.observe(s)).collect()
    }

    #[test]
    fn baseline_consumes_first_sample() {
        let events = run(
            FirstObservation::Baseline,
            &[false, false, true, true, false],
        );
        assert_eq!(events, vec![true, false]);
    }

    #[test]
    fn report_emits_first_sample() {
        let events = run(FirstObservation::Report, &[false, false, true, true, false]);
        assert_eq!(events, vec![false, true, false]);
    }

    #[test]
    fn steady_state_emits_nothing_after_first() {
        let samples = [true; 100];
        assert!(run(FirstObservation::Baseline, &samples).is_empty());
        assert_eq!(run(FirstObservation::Report, &samples), vec![true]);
    }

    #[test]
    fn no_two_consecutive_equal_events() {
        let samples = [true, false, false, true, true, true, false, true, true];
        let events = run(FirstObservation::Report, &samples);
        assert!(events.windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn events_match_change_indices() {
        let samples = [true, true, false, true, false, false, false, true];
        let expected: Vec<bool> = samples
            .windows(2)
            .filter(|w| w[0] != w[1])
            .map(|w| w[1])
            .collect();
        assert_eq!(run(FirstObservation::Baseline, &samples), expected);
    }

    #[test]
    fn last_tracks_latest_sample() {
        let mut detector = TransitionDetector::default();
        assert_eq!(detector.last(), None);
        detector.observe(false);
        detector.observe(true);
        assert_eq!(detector.last(), Some(true));
    }

    #[test]
    fn first_observation_deserializes_snake_case() {
        let first: FirstObservation = serde_json::from_str("\"report\"").unwrap();
        assert_eq!(first, FirstObservation::Report);
    }
}
