//! WAV decoding using hound

use std::path::Path;

use crate::error::AnalysisError;

/// Decoded mono PCM ready for analysis
#[derive(Debug, Clone)]
pub struct MonoBuffer {
    /// Mono samples, nominally in [-1, 1]
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

/// Decode a WAV file to a mono buffer, keeping at most the first
/// `max_secs` seconds
///
/// Integer samples are scaled to [-1, 1]; multi-channel audio is downmixed
/// by averaging the channels of each frame.
///
/// # Errors
///
/// Returns [`AnalysisError::DecodingError`] when the file cannot be opened
/// or its sample format is unsupported
pub fn decode_and_window(
    path: impl AsRef<Path>,
    max_secs: f32,
) -> Result<MonoBuffer, AnalysisError> {
    let path = path.as_ref();
    log::debug!("Decoding WAV file: {}", path.display());

    let mut reader = hound::WavReader::open(path)
        .map_err(|e| AnalysisError::DecodingError(format!("{}: {}", path.display(), e)))?;
    let spec = reader.spec();

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(|e| AnalysisError::DecodingError(e.to_string()))?,
        hound::SampleFormat::Int => {
            let scale = 1.0 / (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<Result<_, _>>()
                .map_err(|e| AnalysisError::DecodingError(e.to_string()))?
        }
    };

    let samples = downmix(&interleaved, spec.channels as usize);
    let samples = window(samples, spec.sample_rate, max_secs);

    Ok(MonoBuffer {
        samples,
        sample_rate: spec.sample_rate,
    })
}

/// Average interleaved channels into mono
pub fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

/// Truncate a buffer to its first `max_secs` seconds
pub fn window(mut samples: Vec<f32>, sample_rate: u32, max_secs: f32) -> Vec<f32> {
    let max_len = (sample_rate as f32 * max_secs) as usize;
    if samples.len() > max_len {
        log::debug!(
            "Windowing buffer from {} to {} samples ({:.0} s)",
            samples.len(),
            max_len,
            max_secs
        );
        samples.truncate(max_len);
    }
    samples
}
