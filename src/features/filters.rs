//! Single-pole IIR filters for frequency band isolation
//!
//! Both filters share one derivation: `rc = 1/(2π·fc)`, `dt = 1/sample_rate`.
//! Filtering is pure: every call allocates a fresh output buffer of the same
//! length as the input, and identical inputs always produce bit-identical
//! output.
//!
//! Band isolation for the kick/snare detectors is a two-stage composition
//! (low-pass, then high-pass), not a true band-pass filter. The stage order
//! shapes phase and transient shape, and the downstream peak detectors are
//! tuned against it, so it is fixed.

use std::f32::consts::PI;

/// Single-pole low-pass filter
///
/// `y[0] = x[0]`, then `y[i] = y[i-1] + alpha·(x[i] - y[i-1])` with
/// `alpha = dt/(rc + dt)`.
///
/// # Arguments
///
/// * `samples` - Input signal (mono)
/// * `sample_rate` - Sample rate in Hz
/// * `cutoff_hz` - Cutoff frequency in Hz (> 0)
///
/// # Returns
///
/// Filtered signal, same length as the input
pub fn low_pass(samples: &[f32], sample_rate: u32, cutoff_hz: f32) -> Vec<f32> {
    let rc = 1.0 / (2.0 * PI * cutoff_hz);
    let dt = 1.0 / sample_rate as f32;
    let alpha = dt / (rc + dt);

    let mut filtered = Vec::with_capacity(samples.len());
    if let Some(&first) = samples.first() {
        filtered.push(first);
        for i in 1..samples.len() {
            let prev = filtered[i - 1];
            filtered.push(prev + alpha * (samples[i] - prev));
        }
    }
    filtered
}

/// Single-pole high-pass filter
///
/// `y[0] = x[0]`, then `y[i] = alpha·(y[i-1] + x[i] - x[i-1])` with
/// `alpha = rc/(rc + dt)`.
///
/// # Arguments
///
/// * `samples` - Input signal (mono)
/// * `sample_rate` - Sample rate in Hz
/// * `cutoff_hz` - Cutoff frequency in Hz (> 0)
///
/// # Returns
///
/// Filtered signal, same length as the input
pub fn high_pass(samples: &[f32], sample_rate: u32, cutoff_hz: f32) -> Vec<f32> {
    let rc = 1.0 / (2.0 * PI * cutoff_hz);
    let dt = 1.0 / sample_rate as f32;
    let alpha = rc / (rc + dt);

    let mut filtered = Vec::with_capacity(samples.len());
    if let Some(&first) = samples.first() {
        filtered.push(first);
        for i in 1..samples.len() {
            let prev = filtered[i - 1];
            filtered.push(alpha * (prev + samples[i] - samples[i - 1]));
        }
    }
    filtered
}

/// Isolate a frequency band via two-stage composition
///
/// Applies the low-pass at `high_cut_hz` first, then the high-pass at
/// `low_cut_hz`. Stage order is part of the contract.
///
/// # Arguments
///
/// * `samples` - Input signal (mono)
/// * `sample_rate` - Sample rate in Hz
/// * `low_cut_hz` - Lower band edge (high-pass cutoff)
/// * `high_cut_hz` - Upper band edge (low-pass cutoff)
pub fn band_pass(samples: &[f32], sample_rate: u32, low_cut_hz: f32, high_cut_hz: f32) -> Vec<f32> {
    let low_passed = low_pass(samples, sample_rate, high_cut_hz);
    high_pass(&low_passed, sample_rate, low_cut_hz)
}
