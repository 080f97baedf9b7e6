//! Chroma vector extraction
//!
//! Folds short-time spectral energy into a 12-bin pitch-class histogram:
//!
//! 1. Slide a Hann-windowed frame (8192 samples, 50% hop) across the buffer
//! 2. FFT each frame and take magnitude squared per bin
//! 3. Map each bin's center frequency to a pitch class referenced to
//!    A4 = 440 Hz, accumulating bins inside the musically relevant band
//! 4. Normalize the vector by its maximum entry
//!
//! After normalization every entry is in [0, 1] with the dominant pitch class
//! at exactly 1.0, unless the buffer carried no energy at all (all-zero
//! vector).

use rustfft::{num_complex::Complex, FftPlanner};
use std::f32::consts::PI;

use crate::config::AnalysisConfig;

/// Number of pitch classes (C..B)
pub const PITCH_CLASSES: usize = 12;

/// C0 reference frequency, A4 = 440 Hz tuning
const C0_HZ: f32 = 16.351_597;

/// Map a frequency in Hz to its pitch class (0 = C, ..., 11 = B)
///
/// `round(12 * log2(hz / C0)) mod 12`
pub fn pitch_class(hz: f32) -> usize {
    let semitones = 12.0 * (hz / C0_HZ).log2();
    (semitones.round() as i64).rem_euclid(PITCH_CLASSES as i64) as usize
}

/// Compute the chroma vector of a mono buffer
///
/// # Arguments
///
/// * `samples` - Mono PCM buffer
/// * `sample_rate` - Sample rate in Hz
/// * `config` - STFT frame/hop sizes and the accumulated frequency band
///
/// # Returns
///
/// Max-normalized 12-element chroma vector; all-zero when the buffer is
/// shorter than one frame or carries no energy in the band
pub fn compute_chroma(
    samples: &[f32],
    sample_rate: u32,
    config: &AnalysisConfig,
) -> [f32; PITCH_CLASSES] {
    let frame_size = config.chroma_frame_size;
    let hop_size = config.chroma_hop_size;
    let mut chroma = [0.0f32; PITCH_CLASSES];

    if samples.len() < frame_size || frame_size == 0 || hop_size == 0 {
        return chroma;
    }

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(frame_size);

    // Hann window, precomputed once per call
    let window: Vec<f32> = (0..frame_size)
        .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f32 / (frame_size - 1) as f32).cos()))
        .collect();

    // Bin -> pitch class, None outside the musical band
    let bin_to_pitch_class: Vec<Option<usize>> = (0..frame_size / 2)
        .map(|bin| {
            let hz = bin as f32 * sample_rate as f32 / frame_size as f32;
            (hz > config.chroma_min_hz && hz < config.chroma_max_hz).then(|| pitch_class(hz))
        })
        .collect();

    let mut buffer = vec![Complex::new(0.0f32, 0.0f32); frame_size];
    let mut start = 0;
    while start + frame_size <= samples.len() {
        for (i, slot) in buffer.iter_mut().enumerate() {
            *slot = Complex::new(samples[start + i] * window[i], 0.0);
        }
        fft.process(&mut buffer);

        for (bin, pc) in bin_to_pitch_class.iter().enumerate() {
            if let Some(pc) = pc {
                chroma[*pc] += buffer[bin].norm_sqr();
            }
        }

        start += hop_size;
    }

    normalize_max(&mut chroma);
    chroma
}

/// Normalize a chroma vector by its maximum entry (no-op when all zero)
pub fn normalize_max(chroma: &mut [f32; PITCH_CLASSES]) {
    let max = chroma.iter().copied().fold(0.0f32, f32::max);
    if max > 0.0 {
        for value in chroma.iter_mut() {
            *value /= max;
        }
    }
}
