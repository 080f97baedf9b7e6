//! Example: Analyze a WAV file
//!
//! Decodes a WAV file, estimates its tempo and key, and prints the results.
//!
//! Usage: `cargo run --example analyze_wav -- path/to/track.wav`

use cadence_dsp::{analyze_bpm, analyze_key, io, AnalysisConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: analyze_wav <path/to/track.wav>")?;

    let config = AnalysisConfig::default();
    let buffer = io::wav::decode_and_window(&path, config.max_analysis_secs)?;
    println!(
        "Decoded {} samples at {} Hz",
        buffer.samples.len(),
        buffer.sample_rate
    );

    let bpm = analyze_bpm(&buffer.samples, buffer.sample_rate)?;
    let key = analyze_key(&buffer.samples, buffer.sample_rate)?;

    println!("Analysis Results:");
    println!("  BPM: {}", bpm);
    println!("  Key: {}", key);

    Ok(())
}
