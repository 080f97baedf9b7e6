//! Adaptive-threshold peak detection
//!
//! Finds beat-like transients in a filtered signal:
//!
//! 1. Compute the RMS of the whole signal and derive a threshold from it
//! 2. Scan left to right; a sample is a candidate if its absolute value
//!    exceeds the threshold and it is far enough from the last accepted peak
//! 3. Accept a candidate only if it is the absolute maximum inside its
//!    confirmation window (no backtracking; earlier rejected candidates are
//!    never reopened)
//!
//! The returned peak list is strictly ascending in index and no two peaks are
//! closer than the configured minimum gap.

/// Numerical stability epsilon
const EPSILON: f32 = 1e-10;

/// Detector-specific peak scan parameters
///
/// These are tuned thresholds, shared between the band detectors via the
/// `KICK`/`SNARE`/`GENERIC` presets below. Changing them shifts the balance
/// between catching genuine beats and picking up hi-hats or noise.
#[derive(Debug, Clone, Copy)]
pub struct PeakParams {
    /// Threshold multiplier applied to the signal RMS
    pub rms_multiplier: f32,

    /// Minimum spacing between accepted peaks, in seconds
    pub min_gap_secs: f32,

    /// Local-maximum confirmation half-window, in seconds
    pub window_secs: f32,
}

/// Kick scan: strong hits (2.5x RMS), at least 350 ms apart (fits tempos up
/// to ~170 BPM without locking onto hi-hats), 100 ms transient window.
pub const KICK: PeakParams = PeakParams {
    rms_multiplier: 2.5,
    min_gap_secs: 0.35,
    window_secs: 0.10,
};

/// Snare scan: backbeats can come faster than kicks, so 300 ms spacing; the
/// snare transient is sharper, so a tighter 80 ms window.
pub const SNARE: PeakParams = PeakParams {
    rms_multiplier: 2.0,
    min_gap_secs: 0.30,
    window_secs: 0.08,
};

/// Generic scan used by the high-pass-only detectors.
pub const GENERIC: PeakParams = PeakParams {
    rms_multiplier: 2.0,
    min_gap_secs: 0.30,
    window_secs: 0.05,
};

/// Root mean square of a signal
pub fn rms(signal: &[f32]) -> f32 {
    if signal.is_empty() {
        return 0.0;
    }
    (signal.iter().map(|&x| x * x).sum::<f32>() / signal.len() as f32).sqrt()
}

/// Find peaks in a filtered signal
///
/// # Arguments
///
/// * `signal` - Filtered signal to scan
/// * `sample_rate` - Sample rate in Hz
/// * `params` - Detector-specific scan parameters
///
/// # Returns
///
/// Ascending list of peak sample indices. Fewer than 2 peaks means the caller
/// has no usable beat interval and must fall back; it is never a "BPM = 0"
/// signal.
pub fn find_peaks(signal: &[f32], sample_rate: u32, params: &PeakParams) -> Vec<usize> {
    if signal.is_empty() {
        return Vec::new();
    }

    let threshold = rms(signal) * params.rms_multiplier;
    let min_gap = (sample_rate as f32 * params.min_gap_secs) as usize;
    let window = (sample_rate as f32 * params.window_secs) as usize;

    let mut peaks = Vec::new();
    let mut last_peak = -(min_gap as i64);

    for i in 0..signal.len() {
        let sample = signal[i].abs();

        if sample > threshold && (i as i64 - last_peak) >= min_gap as i64 {
            // Local-maximum confirmation over the filtered signal
            let start = i.saturating_sub(window);
            let end = (i + window).min(signal.len());
            let is_local_max = signal[start..end].iter().all(|&v| v.abs() <= sample);

            if is_local_max {
                peaks.push(i);
                last_peak = i as i64;
            }
        }
    }

    log::debug!(
        "Found {} peaks with min spacing {} samples ({:.3}s)",
        peaks.len(),
        min_gap,
        min_gap as f32 / sample_rate as f32
    );

    peaks
}

/// Find the N strongest local maxima in an unfiltered buffer
///
/// Fallback scan used when band isolation yields too few peaks: an exhaustive
/// local-maximum search with a 50 ms half-window and no amplitude threshold,
/// keeping the `count` largest by absolute value and re-sorting them by time.
/// Samples at or below the numerical epsilon are not peaks, so silence yields
/// an empty list rather than a dense train of zero-amplitude "maxima".
///
/// # Arguments
///
/// * `samples` - Unfiltered mono buffer
/// * `sample_rate` - Sample rate in Hz
/// * `count` - Maximum number of peaks to keep
///
/// # Returns
///
/// Ascending list of peak sample indices (at most `count`)
pub fn strongest_peaks(samples: &[f32], sample_rate: u32, count: usize) -> Vec<usize> {
    let window = (sample_rate as f32 * 0.05) as usize;
    if samples.len() <= 2 * window {
        return Vec::new();
    }

    let mut candidates: Vec<(usize, f32)> = Vec::new();

    for i in window..samples.len() - window {
        let sample = samples[i].abs();
        if sample <= EPSILON {
            continue;
        }

        let mut is_local_max = true;
        for j in (i - window)..(i + window) {
            if j != i && samples[j].abs() > sample {
                is_local_max = false;
                break;
            }
        }

        if is_local_max {
            candidates.push((i, sample));
        }
    }

    // Keep the strongest N, then restore time order for interval statistics
    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    candidates.truncate(count);
    candidates.sort_by_key(|&(idx, _)| idx);

    log::debug!("Fallback scan kept {} strongest peaks", candidates.len());

    candidates.into_iter().map(|(idx, _)| idx).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Impulse train with the given spacing, 1.0 amplitude spikes
    fn impulse_train(spacing: usize, total: usize) -> Vec<f32> {
        let mut signal = vec![0.0f32; total];
        let mut i = 0;
        while i < total {
            signal[i] = 1.0;
            i += spacing;
        }
        signal
    }

    #[test]
    fn test_peaks_on_impulse_train() {
        // 0.5 s spacing at 44.1 kHz, 10 s
        let signal = impulse_train(22050, 441000);
        let peaks = find_peaks(&signal, 44100, &KICK);

        assert!(peaks.len() >= 18, "expected ~20 peaks, got {}", peaks.len());
        for pair in peaks.windows(2) {
            assert_eq!(pair[1] - pair[0], 22050);
        }
    }

    #[test]
    fn test_peaks_strictly_ascending_with_min_spacing() {
        let signal = impulse_train(15000, 441000);
        let params = GENERIC;
        let peaks = find_peaks(&signal, 44100, &params);
        let min_gap = (44100.0 * params.min_gap_secs) as usize;

        for pair in peaks.windows(2) {
            assert!(pair[1] > pair[0], "peak indices must be ascending");
            assert!(
                pair[1] - pair[0] >= min_gap,
                "peaks {} and {} closer than min gap {}",
                pair[0],
                pair[1],
                min_gap
            );
        }
    }

    #[test]
    fn test_no_peaks_in_silence() {
        let signal = vec![0.0f32; 44100];
        assert!(find_peaks(&signal, 44100, &KICK).is_empty());
        assert!(strongest_peaks(&signal, 44100, 50).is_empty());
    }

    #[test]
    fn test_empty_signal() {
        assert!(find_peaks(&[], 44100, &KICK).is_empty());
        assert!(strongest_peaks(&[], 44100, 50).is_empty());
    }

    #[test]
    fn test_strongest_peaks_capped_and_sorted() {
        let signal = impulse_train(11025, 441000);
        let peaks = strongest_peaks(&signal, 44100, 10);

        assert!(peaks.len() <= 10);
        for pair in peaks.windows(2) {
            assert!(pair[1] > pair[0], "fallback peaks must be in time order");
        }
    }

    #[test]
    fn test_threshold_rejects_weak_signal() {
        // Uniform low-level noise floor has no sample above 2.5x RMS by a
        // margin that also wins a 100 ms window
        let signal: Vec<f32> = (0..44100).map(|i| if i % 2 == 0 { 0.1 } else { -0.1 }).collect();
        let peaks = find_peaks(&signal, 44100, &KICK);
        assert!(peaks.is_empty());
    }

    #[test]
    fn test_rms() {
        assert_eq!(rms(&[]), 0.0);
        assert!((rms(&[1.0, -1.0, 1.0, -1.0]) - 1.0).abs() < 1e-6);
        assert!((rms(&[0.5, -0.5]) - 0.5).abs() < 1e-6);
    }
}
