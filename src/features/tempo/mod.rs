//! Multi-method tempo estimation
//!
//! Four band-specific detectors run over the same buffer and produce one
//! [`TempoCandidate`] each:
//!
//! 1. Kick drum (40-150 Hz band), base confidence 0.8
//! 2. Snare (150-500 Hz band), base confidence 0.8
//! 3. Low band (80 Hz high-pass), base confidence 0.7
//! 4. Mid band (150 Hz high-pass), base confidence 0.6
//!
//! The detectors are pure functions of the input buffer and run in parallel;
//! completion order is irrelevant because the reliability arbiter only sees
//! the collected list.

pub mod arbiter;
pub mod detectors;

use crate::config::AnalysisConfig;
use rayon::prelude::*;
use serde::Serialize;

/// One detection method's proposed BPM plus supporting evidence
///
/// Never mutated after creation; the arbiter computes a derived score without
/// touching the stored confidence.
#[derive(Debug, Clone, Serialize)]
pub struct TempoCandidate {
    /// Human-readable method label
    pub method: &'static str,

    /// Proposed tempo in BPM, already clamped to the plausible range
    pub bpm: f32,

    /// Base confidence of the method (nominally in [0, 1])
    pub confidence: f32,

    /// Number of peaks the estimate was derived from (0 marks a sentinel)
    pub peak_count: usize,
}

type DetectorFn = fn(&[f32], u32, &AnalysisConfig) -> TempoCandidate;

const METHODS: [DetectorFn; 4] = [
    detectors::detect_kick,
    detectors::detect_snare,
    detectors::detect_low_band,
    detectors::detect_mid_band,
];

/// Run all four detection methods over the same buffer
///
/// # Returns
///
/// Exactly four candidates, in method order
pub fn collect_candidates(
    samples: &[f32],
    sample_rate: u32,
    config: &AnalysisConfig,
) -> Vec<TempoCandidate> {
    let candidates: Vec<TempoCandidate> = METHODS
        .par_iter()
        .map(|detect| detect(samples, sample_rate, config))
        .collect();

    for candidate in &candidates {
        log::debug!(
            "[{}] bpm={:.1} confidence={:.2} peaks={}",
            candidate.method,
            candidate.bpm,
            candidate.confidence,
            candidate.peak_count
        );
    }

    candidates
}

/// Estimate the tempo of a buffer: run all methods, then arbitrate
pub fn estimate_bpm(samples: &[f32], sample_rate: u32, config: &AnalysisConfig) -> f32 {
    let candidates = collect_candidates(samples, sample_rate, config);
    arbiter::choose_bpm(&candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click_track(bpm: f32, sample_rate: u32, secs: f32) -> Vec<f32> {
        let total = (sample_rate as f32 * secs) as usize;
        let spacing = (60.0 / bpm * sample_rate as f32) as usize;
        let mut samples = vec![0.0f32; total];
        let mut i = 0;
        while i < total {
            samples[i] = 1.0;
            i += spacing;
        }
        samples
    }

    #[test]
    fn test_four_candidates_in_method_order() {
        let samples = click_track(120.0, 44100, 10.0);
        let candidates = collect_candidates(&samples, 44100, &AnalysisConfig::default());

        assert_eq!(candidates.len(), 4);
        assert!(candidates[0].method.starts_with("kick"));
        assert!(candidates[1].method.starts_with("snare"));
        assert!(candidates[2].method.starts_with("low band"));
        assert!(candidates[3].method.starts_with("mid band"));
    }

    #[test]
    fn test_click_track_consensus() {
        // A perfect click track should make every method land on the same tempo
        let samples = click_track(120.0, 44100, 30.0);
        let bpm = estimate_bpm(&samples, 44100, &AnalysisConfig::default());
        assert!((bpm - 120.0).abs() < 0.5, "expected ~120, got {:.1}", bpm);
    }

    #[test]
    fn test_candidates_within_plausible_range() {
        let config = AnalysisConfig::default();
        for source in [
            click_track(90.0, 44100, 20.0),
            click_track(174.0, 44100, 20.0),
            vec![0.0f32; 44100 * 5],
        ] {
            for candidate in collect_candidates(&source, 44100, &config) {
                assert!(
                    candidate.bpm >= config.min_bpm && candidate.bpm <= config.max_bpm,
                    "[{}] bpm {:.1} outside [{}, {}]",
                    candidate.method,
                    candidate.bpm,
                    config.min_bpm,
                    config.max_bpm
                );
            }
        }
    }
}
