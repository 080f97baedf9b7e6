//! Band-specific beat detectors
//!
//! Each detector isolates a frequency band, scans it for peaks, and converts
//! the representative peak interval to BPM:
//!
//! - Kick and snare use the **median** consecutive interval, robust to
//!   outliers from extraneous hits
//! - The generic high-pass detectors use the arithmetic **mean**
//!
//! A detector that cannot derive a beat interval resolves the situation
//! locally (fallback scan or the 120 BPM sentinel) and never aborts the
//! pipeline.

use crate::config::AnalysisConfig;
use crate::features::{filters, peaks};

use super::TempoCandidate;

/// Kick drum band edges in Hz: low-pass 150, then high-pass 40 (the high-pass
/// strips sub-bass rumble)
const KICK_BAND_HZ: (f32, f32) = (40.0, 150.0);

/// Snare band edges in Hz: low-pass 500, then high-pass 150
const SNARE_BAND_HZ: (f32, f32) = (150.0, 500.0);

/// Number of peaks the kick fallback scan keeps
const FALLBACK_PEAK_COUNT: usize = 50;

/// Sentinel returned when a detector has no information ("no usable beat
/// interval"). It always travels with a `peak_count` below the arbiter's
/// reliability bar, so it is never mistaken for a confident 120 BPM estimate.
const SENTINEL_BPM: f32 = 120.0;

/// Upper clamp of the legacy energy heuristic, narrower than the ensemble
/// range (pre-ensemble revision behavior, kept for parity)
const ENERGY_FALLBACK_MAX_BPM: f32 = 180.0;

/// Base confidences per method
const KICK_CONFIDENCE: f32 = 0.8;
const SNARE_CONFIDENCE: f32 = 0.8;
const LOW_BAND_CONFIDENCE: f32 = 0.7;
const MID_BAND_CONFIDENCE: f32 = 0.6;

/// Kick drum detector (40-150 Hz band)
///
/// When band isolation yields fewer than 2 peaks, falls back to the 50
/// strongest local maxima of the *unfiltered* buffer so the arbiter still
/// gets a peak-count-weighted estimate, just without the isolation benefit.
pub fn detect_kick(samples: &[f32], sample_rate: u32, config: &AnalysisConfig) -> TempoCandidate {
    let isolated = filters::band_pass(samples, sample_rate, KICK_BAND_HZ.0, KICK_BAND_HZ.1);
    let found = peaks::find_peaks(&isolated, sample_rate, &peaks::KICK);

    if found.len() < 2 {
        log::debug!("[kick] not enough band peaks, falling back to strongest-peaks scan");
        let strong = peaks::strongest_peaks(samples, sample_rate, FALLBACK_PEAK_COUNT);

        if strong.len() < 2 {
            return TempoCandidate {
                method: "kick (40-150 Hz)",
                bpm: SENTINEL_BPM,
                confidence: KICK_CONFIDENCE,
                peak_count: 0,
            };
        }

        let bpm = match mean_interval(&strong) {
            Some(interval) => clamp_bpm(bpm_from_interval(interval, sample_rate), config),
            None => SENTINEL_BPM,
        };
        return TempoCandidate {
            method: "kick (40-150 Hz)",
            bpm,
            confidence: KICK_CONFIDENCE,
            peak_count: strong.len(),
        };
    }

    let bpm = match median_interval(&found) {
        Some(interval) => clamp_bpm(bpm_from_interval(interval, sample_rate), config),
        None => SENTINEL_BPM,
    };
    TempoCandidate {
        method: "kick (40-150 Hz)",
        bpm,
        confidence: KICK_CONFIDENCE,
        peak_count: found.len(),
    }
}

/// Snare detector (150-500 Hz band), catches the backbeat
///
/// No fallback scan: fewer than 2 peaks reports the sentinel with
/// `peak_count = 0`, meaning "no information".
pub fn detect_snare(samples: &[f32], sample_rate: u32, config: &AnalysisConfig) -> TempoCandidate {
    let isolated = filters::band_pass(samples, sample_rate, SNARE_BAND_HZ.0, SNARE_BAND_HZ.1);
    let found = peaks::find_peaks(&isolated, sample_rate, &peaks::SNARE);

    if found.len() < 2 {
        log::debug!("[snare] not enough band peaks");
        return TempoCandidate {
            method: "snare (150-500 Hz)",
            bpm: SENTINEL_BPM,
            confidence: SNARE_CONFIDENCE,
            peak_count: 0,
        };
    }

    let bpm = match median_interval(&found) {
        Some(interval) => clamp_bpm(bpm_from_interval(interval, sample_rate), config),
        None => SENTINEL_BPM,
    };
    TempoCandidate {
        method: "snare (150-500 Hz)",
        bpm,
        confidence: SNARE_CONFIDENCE,
        peak_count: found.len(),
    }
}

/// Generic low-band detector (80 Hz high-pass)
pub fn detect_low_band(
    samples: &[f32],
    sample_rate: u32,
    config: &AnalysisConfig,
) -> TempoCandidate {
    detect_band(
        samples,
        sample_rate,
        80.0,
        "low band (80 Hz high-pass)",
        LOW_BAND_CONFIDENCE,
        config,
    )
}

/// Generic mid-band detector (150 Hz high-pass)
pub fn detect_mid_band(
    samples: &[f32],
    sample_rate: u32,
    config: &AnalysisConfig,
) -> TempoCandidate {
    detect_band(
        samples,
        sample_rate,
        150.0,
        "mid band (150 Hz high-pass)",
        MID_BAND_CONFIDENCE,
        config,
    )
}

/// High-pass-only detector shared by the generic methods
///
/// With zero usable peaks it falls back to a crude energy heuristic,
/// `60 + mean_square_energy * 100`, clamped to the narrower legacy range.
/// The heuristic is a placeholder kept for behavioral parity with the
/// single-method revision; its `peak_count = 0` keeps the arbiter from ever
/// trusting it over a peak-backed estimate.
fn detect_band(
    samples: &[f32],
    sample_rate: u32,
    cutoff_hz: f32,
    method: &'static str,
    confidence: f32,
    config: &AnalysisConfig,
) -> TempoCandidate {
    let filtered = filters::high_pass(samples, sample_rate, cutoff_hz);
    let found = peaks::find_peaks(&filtered, sample_rate, &peaks::GENERIC);

    if found.len() < 2 {
        log::debug!("[{}] not enough peaks, using energy heuristic", method);
        let energy = samples.iter().map(|&x| x * x).sum::<f32>() / samples.len().max(1) as f32;
        let bpm = (60.0 + energy * 100.0)
            .round()
            .clamp(config.min_bpm, ENERGY_FALLBACK_MAX_BPM);
        return TempoCandidate {
            method,
            bpm,
            confidence,
            peak_count: 0,
        };
    }

    let bpm = match mean_interval(&found) {
        Some(interval) => clamp_bpm(bpm_from_interval(interval, sample_rate), config),
        None => SENTINEL_BPM,
    };
    TempoCandidate {
        method,
        bpm,
        confidence,
        peak_count: found.len(),
    }
}

/// Median of the consecutive peak intervals (upper-middle element of the
/// sorted deltas)
fn median_interval(peak_indices: &[usize]) -> Option<f32> {
    let mut deltas: Vec<usize> = peak_indices
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .collect();
    if deltas.is_empty() {
        return None;
    }
    deltas.sort_unstable();
    let median = deltas[deltas.len() / 2];
    (median > 0).then(|| median as f32)
}

/// Arithmetic mean of the consecutive peak intervals
fn mean_interval(peak_indices: &[usize]) -> Option<f32> {
    let deltas: Vec<usize> = peak_indices
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .collect();
    if deltas.is_empty() {
        return None;
    }
    let mean = deltas.iter().sum::<usize>() as f32 / deltas.len() as f32;
    (mean > 0.0).then_some(mean)
}

fn bpm_from_interval(interval_samples: f32, sample_rate: u32) -> f32 {
    60.0 * sample_rate as f32 / interval_samples
}

fn clamp_bpm(bpm: f32, config: &AnalysisConfig) -> f32 {
    bpm.clamp(config.min_bpm, config.max_bpm)
}
