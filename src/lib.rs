//! # Cadence DSP
//!
//! An audio analysis engine for DJ and music library applications, providing
//! tempo (BPM) and musical key estimation on decoded PCM.
//!
//! ## Features
//!
//! - **BPM Detection**: Four band-specific beat detectors (kick, snare, two
//!   generic high-pass bands) reconciled by a reliability arbiter with
//!   consensus and octave correction
//! - **Key Detection**: Hann-windowed STFT chroma folding with a third-interval
//!   mode decision, pluggable via an external key extraction capability
//! - **Lifecycle Tracking**: A small state machine for hosts that drive
//!   analysis from a UI thread
//!
//! ## Quick Start
//!
//! ```no_run
//! use cadence_dsp::{analyze_bpm, analyze_key};
//!
//! // Mono, f32, normalized samples from your decoder
//! let samples: Vec<f32> = vec![];
//! let sample_rate = 44100;
//!
//! let bpm = analyze_bpm(&samples, sample_rate)?;
//! let key = analyze_key(&samples, sample_rate)?;
//!
//! println!("BPM: {}", bpm);
//! println!("Key: {}", key);
//! # Ok::<(), cadence_dsp::AnalysisError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Mono PCM -> Windowing -> Band Filters -> Peak Detection -> Arbitration -> BPM
//!                       -> STFT Chroma -> Key Estimation ----------------> Key
//! ```
//!
//! Both pipelines absorb degenerate input internally: silence resolves to the
//! 120 BPM sentinel and the C Major default rather than an error.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod io;

// Re-export main types
pub use analysis::result::{Key, KeyEstimate};
pub use analysis::state::AnalysisState;
pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use features::tempo::TempoCandidate;
pub use io::MonoBuffer;

/// Estimate the tempo of a mono buffer, rounded to a whole BPM
///
/// Runs all four detection methods over the first
/// [`AnalysisConfig::max_analysis_secs`] seconds and arbitrates the
/// candidates. The result is always inside the configured plausible range.
///
/// # Arguments
///
/// * `samples` - Mono audio samples, normalized to [-1.0, 1.0]
/// * `sample_rate` - Sample rate in Hz (typically 44100 or 48000)
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidInput`] for an empty buffer or a zero
/// sample rate, and [`AnalysisError::InvalidResult`] if arbitration produces
/// a non-finite or non-positive tempo
///
/// # Example
///
/// ```no_run
/// use cadence_dsp::analyze_bpm;
///
/// let samples = vec![0.0f32; 44100 * 30];
/// let bpm = analyze_bpm(&samples, 44100)?;
/// # Ok::<(), cadence_dsp::AnalysisError>(())
/// ```
pub fn analyze_bpm(samples: &[f32], sample_rate: u32) -> Result<u32, AnalysisError> {
    analyze_bpm_with(samples, sample_rate, &AnalysisConfig::default())
}

/// [`analyze_bpm`] with an explicit configuration
pub fn analyze_bpm_with(
    samples: &[f32],
    sample_rate: u32,
    config: &AnalysisConfig,
) -> Result<u32, AnalysisError> {
    validate_input(samples, sample_rate)?;

    let windowed = analysis_window(samples, sample_rate, config);
    let bpm = features::tempo::estimate_bpm(windowed, sample_rate, config);

    if !bpm.is_finite() || bpm <= 0.0 {
        return Err(AnalysisError::InvalidResult(format!(
            "arbitration produced an unusable tempo: {}",
            bpm
        )));
    }

    log::debug!("Final BPM: {:.1}", bpm);
    Ok(bpm.round() as u32)
}

/// Estimate the musical key of a mono buffer
///
/// Delegates to the active key extraction capability (the built-in chroma
/// estimator unless the host installed another engine via
/// [`features::key::capability::install`]). If the installed engine reports
/// itself unavailable, the built-in estimator answers instead.
///
/// # Arguments
///
/// * `samples` - Mono audio samples, normalized to [-1.0, 1.0]
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
///
/// The key rendered as `"<Note> <Major|Minor>"`, e.g. `"A Minor"`
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidInput`] for an empty buffer, a zero
/// sample rate, or a buffer shorter than one analysis frame
pub fn analyze_key(samples: &[f32], sample_rate: u32) -> Result<String, AnalysisError> {
    analyze_key_with(samples, sample_rate, &AnalysisConfig::default())
}

/// [`analyze_key`] with an explicit configuration
pub fn analyze_key_with(
    samples: &[f32],
    sample_rate: u32,
    config: &AnalysisConfig,
) -> Result<String, AnalysisError> {
    validate_input(samples, sample_rate)?;

    if samples.len() < config.chroma_frame_size {
        return Err(AnalysisError::InvalidInput(format!(
            "buffer of {} samples is shorter than one analysis frame ({})",
            samples.len(),
            config.chroma_frame_size
        )));
    }

    let windowed = analysis_window(samples, sample_rate, config);

    let extractor = features::key::capability::initialize();
    let estimate = match extractor.extract(windowed, sample_rate) {
        Ok(estimate) => estimate,
        Err(AnalysisError::CapabilityUnavailable(reason)) => {
            log::warn!(
                "Installed key extractor unavailable ({}), using the built-in estimator",
                reason
            );
            features::key::estimate_key(windowed, sample_rate, config)
        }
        Err(e) => return Err(e),
    };

    log::debug!(
        "Final key: {} (confidence {:.2})",
        estimate.key,
        estimate.confidence
    );
    Ok(estimate.key.to_string())
}

/// Reject input no pipeline stage can work with
fn validate_input(samples: &[f32], sample_rate: u32) -> Result<(), AnalysisError> {
    if samples.is_empty() {
        return Err(AnalysisError::InvalidInput("empty sample buffer".to_string()));
    }
    if sample_rate == 0 {
        return Err(AnalysisError::InvalidInput("sample rate must be positive".to_string()));
    }
    Ok(())
}

/// First `max_analysis_secs` seconds of the buffer
fn analysis_window<'a>(samples: &'a [f32], sample_rate: u32, config: &AnalysisConfig) -> &'a [f32] {
    let max_len = (sample_rate as f32 * config.max_analysis_secs) as usize;
    &samples[..samples.len().min(max_len)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer_is_rejected() {
        assert!(matches!(
            analyze_bpm(&[], 44100),
            Err(AnalysisError::InvalidInput(_))
        ));
        assert!(matches!(
            analyze_key(&[], 44100),
            Err(AnalysisError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_zero_sample_rate_is_rejected() {
        let samples = vec![0.0f32; 44100];
        assert!(matches!(
            analyze_bpm(&samples, 0),
            Err(AnalysisError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_key_rejects_sub_frame_buffer() {
        let samples = vec![0.0f32; 1024];
        assert!(matches!(
            analyze_key(&samples, 44100),
            Err(AnalysisError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_analysis_window_truncates() {
        let config = AnalysisConfig::default();
        let samples = vec![0.0f32; 44100 * 90];
        let windowed = analysis_window(&samples, 44100, &config);
        assert_eq!(windowed.len(), 44100 * 60);
    }

    #[test]
    fn test_analysis_window_keeps_short_buffers() {
        let config = AnalysisConfig::default();
        let samples = vec![0.0f32; 44100];
        assert_eq!(analysis_window(&samples, 44100, &config).len(), 44100);
    }
}
