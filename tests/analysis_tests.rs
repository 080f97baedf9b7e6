//! End-to-end tests for the analysis facade

use cadence_dsp::{analyze_bpm, analyze_key, AnalysisConfig, AnalysisError};
use std::f32::consts::PI;

/// Impulse train with exact integer spacing between clicks
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

fn sine(freq: f32, sample_rate: u32, secs: f32) -> Vec<f32> {
    let n = (sample_rate as f32 * secs) as usize;
    (0..n)
        .map(|i| (2.0 * PI * freq * i as f32 / sample_rate as f32).sin())
        .collect()
}

#[test]
fn test_click_track_bpm() {
    // 120 BPM at 44.1 kHz is exactly 22050 samples per beat, so every
    // detection method lands on the same tempo
    let samples = click_track(120.0, 44100, 30.0);
    let bpm = analyze_bpm(&samples, 44100).unwrap();
    assert_eq!(bpm, 120);
}

#[test]
fn test_pure_tone_key() {
    let samples = sine(440.0, 44100, 3.0);
    let key = analyze_key(&samples, 44100).unwrap();
    assert!(key.starts_with("A "), "expected an A key, got {:?}", key);
}

#[test]
fn test_silence_resolves_to_sentinel_bpm() {
    // Degenerate but valid input must produce the sentinel, not an error
    let samples = vec![0.0f32; 44100 * 5];
    let bpm = analyze_bpm(&samples, 44100).unwrap();
    assert_eq!(bpm, 120);
}

#[test]
fn test_silence_resolves_to_default_key() {
    let samples = vec![0.0f32; 44100 * 5];
    let key = analyze_key(&samples, 44100).unwrap();
    assert_eq!(key, "C Major");
}

#[test]
fn test_bpm_always_in_plausible_range() {
    let config = AnalysisConfig::default();
    let sources = [
        click_track(85.0, 44100, 20.0),
        click_track(140.0, 44100, 20.0),
        click_track(174.0, 44100, 20.0),
        sine(55.0, 44100, 10.0),
        vec![0.0f32; 44100 * 3],
    ];

    for samples in &sources {
        let bpm = analyze_bpm(samples, 44100).unwrap();
        assert!(
            bpm as f32 >= config.min_bpm && bpm as f32 <= config.max_bpm,
            "bpm {} outside [{}, {}]",
            bpm,
            config.min_bpm,
            config.max_bpm
        );
    }
}

#[test]
fn test_invalid_input_errors() {
    assert!(matches!(
        analyze_bpm(&[], 44100),
        Err(AnalysisError::InvalidInput(_))
    ));
    assert!(matches!(
        analyze_bpm(&[0.0; 1024], 0),
        Err(AnalysisError::InvalidInput(_))
    ));
    assert!(matches!(
        analyze_key(&[0.0; 100], 44100),
        Err(AnalysisError::InvalidInput(_))
    ));
}

#[test]
fn test_repeated_analysis_is_deterministic() {
    let samples = click_track(128.0, 44100, 15.0);
    let first = analyze_bpm(&samples, 44100).unwrap();
    let second = analyze_bpm(&samples, 44100).unwrap();
    assert_eq!(first, second);
}
