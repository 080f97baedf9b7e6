//! Audio I/O modules
//!
//! WAV decoding and mono downmixing using hound. Analysis itself only ever
//! sees a [`MonoBuffer`]; hosts with their own decoders can build one
//! directly and skip this module entirely.

pub mod wav;

pub use wav::MonoBuffer;
