//! Feature extraction building blocks
//!
//! - `filters`: single-pole IIR low/high/band-pass stages
//! - `peaks`: adaptive-threshold peak detection
//! - `tempo`: multi-method BPM estimation and arbitration
//! - `chroma`: STFT pitch-class energy folding
//! - `key`: key estimation on top of chroma

pub mod chroma;
pub mod filters;
pub mod key;
pub mod peaks;
pub mod tempo;
