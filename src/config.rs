//! Configuration parameters for audio analysis

/// Analysis configuration parameters
///
/// The per-detector tuned constants (RMS multipliers, peak spacings,
/// confirmation windows, band edges) live as `const`s next to the detectors
/// in [`crate::features`]; they are calibrated values, not knobs.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    // BPM detection
    /// Minimum plausible BPM (default: 60.0)
    pub min_bpm: f32,

    /// Maximum plausible BPM (default: 200.0)
    pub max_bpm: f32,

    // Key detection
    /// STFT frame size for chroma extraction (default: 8192)
    pub chroma_frame_size: usize,

    /// STFT hop size for chroma extraction, 50% overlap (default: 4096)
    pub chroma_hop_size: usize,

    /// Lowest frequency folded into the chroma vector in Hz (default: 65.0)
    /// Below this, bass rumble and noise dominate over pitched content.
    pub chroma_min_hz: f32,

    /// Highest frequency folded into the chroma vector in Hz (default: 2000.0)
    /// Above this, harmonics rather than fundamentals dominate.
    pub chroma_max_hz: f32,

    // Windowing
    /// Maximum analysis window in seconds (default: 60.0)
    /// Longer buffers are truncated before analysis; this bounds data volume,
    /// not wall-clock time.
    pub max_analysis_secs: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_bpm: 60.0,
            max_bpm: 200.0,
            chroma_frame_size: 8192,
            chroma_hop_size: 4096,
            chroma_min_hz: 65.0,
            chroma_max_hz: 2000.0,
            max_analysis_secs: 60.0,
        }
    }
}
