//! Musical key estimation
//!
//! Reads the key directly off the chroma vector:
//!
//! 1. The strongest pitch class is the root
//! 2. Mode comes from the third interval above the root: major when the
//!    major-third bin is strictly stronger than the minor-third bin
//!
//! An all-zero chroma vector (silence, or a buffer shorter than one STFT
//! frame) resolves to C Major with zero confidence.
//!
//! The built-in estimator can be swapped for an external one through the
//! [`capability`] layer.

pub mod capability;

use crate::analysis::result::{Key, KeyEstimate};
use crate::config::AnalysisConfig;
use crate::features::chroma;

/// Derive the key from a max-normalized chroma vector
pub fn key_from_chroma(chroma: &[f32; chroma::PITCH_CLASSES]) -> KeyEstimate {
    if chroma.iter().all(|&v| v == 0.0) {
        return KeyEstimate {
            key: Key::Major(0),
            confidence: 0.0,
        };
    }

    let root = chroma
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0);

    let major_third = chroma[(root + 4) % chroma::PITCH_CLASSES];
    let minor_third = chroma[(root + 3) % chroma::PITCH_CLASSES];

    let key = if major_third > minor_third {
        Key::Major(root as u32)
    } else {
        Key::Minor(root as u32)
    };

    // How decisively one third beat the other; chroma is max-normalized so
    // the separation is already in [0, 1]
    let confidence = (major_third - minor_third).abs().clamp(0.0, 1.0);

    KeyEstimate { key, confidence }
}

/// Estimate the key of a mono buffer
///
/// # Arguments
///
/// * `samples` - Mono PCM buffer
/// * `sample_rate` - Sample rate in Hz
/// * `config` - Chroma STFT parameters
pub fn estimate_key(samples: &[f32], sample_rate: u32, config: &AnalysisConfig) -> KeyEstimate {
    let chroma = chroma::compute_chroma(samples, sample_rate, config);
    let estimate = key_from_chroma(&chroma);
    log::debug!(
        "Key estimate: {} (confidence {:.2})",
        estimate.key,
        estimate.confidence
    );
    estimate
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn chroma_with(pairs: &[(usize, f32)]) -> [f32; chroma::PITCH_CLASSES] {
        let mut v = [0.0f32; chroma::PITCH_CLASSES];
        for &(i, value) in pairs {
            v[i] = value;
        }
        v
    }

    #[test]
    fn test_major_when_major_third_dominates() {
        // C root with a strong E (major third) over Eb
        let chroma = chroma_with(&[(0, 1.0), (4, 0.8), (3, 0.2)]);
        let estimate = key_from_chroma(&chroma);

        assert_eq!(estimate.key, Key::Major(0));
        assert!((estimate.confidence - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_minor_when_minor_third_dominates() {
        // A root with a strong C (minor third) over C#
        let chroma = chroma_with(&[(9, 1.0), (0, 0.7), (1, 0.1)]);
        let estimate = key_from_chroma(&chroma);

        assert_eq!(estimate.key, Key::Minor(9));
    }

    #[test]
    fn test_equal_thirds_resolve_to_minor() {
        // Strictly-greater comparison: a tie is not major
        let chroma = chroma_with(&[(7, 1.0), (11, 0.5), (10, 0.5)]);
        assert_eq!(key_from_chroma(&chroma).key, Key::Minor(7));
    }

    #[test]
    fn test_all_zero_chroma_defaults_to_c_major() {
        let chroma = [0.0f32; chroma::PITCH_CLASSES];
        let estimate = key_from_chroma(&chroma);

        assert_eq!(estimate.key, Key::Major(0));
        assert_eq!(estimate.confidence, 0.0);
    }

    #[test]
    fn test_estimate_key_on_silence() {
        let samples = vec![0.0f32; 44100 * 2];
        let estimate = estimate_key(&samples, 44100, &AnalysisConfig::default());
        assert_eq!(estimate.key, Key::Major(0));
    }

    #[test]
    fn test_estimate_key_root_of_pure_tone() {
        // A single 440 Hz sine has no third at all; only the root is
        // meaningful here
        let samples: Vec<f32> = (0..44100 * 2)
            .map(|i| (2.0 * PI * 440.0 * i as f32 / 44100.0).sin())
            .collect();
        let estimate = estimate_key(&samples, 44100, &AnalysisConfig::default());
        assert_eq!(estimate.key.root(), 9);
    }
}
