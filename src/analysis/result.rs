//! Analysis result types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Musical key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Major key (0 = C, 1 = C#, ..., 11 = B)
    Major(u32),
    /// Minor key (0 = C, 1 = C#, ..., 11 = B)
    Minor(u32),
}

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

impl Key {
    /// Root pitch class (0 = C, ..., 11 = B)
    pub fn root(&self) -> u32 {
        match self {
            Key::Major(i) | Key::Minor(i) => *i % 12,
        }
    }

    /// Note name of the root (e.g., "C", "F#", "A")
    pub fn note_name(&self) -> &'static str {
        NOTE_NAMES[self.root() as usize]
    }

    /// True for major keys
    pub fn is_major(&self) -> bool {
        matches!(self, Key::Major(_))
    }
}

impl fmt::Display for Key {
    /// Formats as `"<Note> <Major|Minor>"`, e.g. `"C Major"`, `"A Minor"`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.note_name(),
            if self.is_major() { "Major" } else { "Minor" }
        )
    }
}

/// Key estimate with supporting evidence
#[derive(Debug, Clone, Serialize)]
pub struct KeyEstimate {
    /// Detected key
    pub key: Key,

    /// Coarse confidence in [0, 1]: separation between the third intervals
    /// that discriminated the mode (0.0 when the buffer carried no energy)
    pub confidence: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_names() {
        assert_eq!(Key::Major(0).note_name(), "C");
        assert_eq!(Key::Major(6).note_name(), "F#");
        assert_eq!(Key::Minor(9).note_name(), "A");
        assert_eq!(Key::Minor(11).note_name(), "B");
    }

    #[test]
    fn test_display_format() {
        assert_eq!(Key::Major(0).to_string(), "C Major");
        assert_eq!(Key::Minor(9).to_string(), "A Minor");
        assert_eq!(Key::Major(6).to_string(), "F# Major");
    }

    #[test]
    fn test_root_wraps() {
        assert_eq!(Key::Major(12).root(), 0);
        assert_eq!(Key::Minor(21).root(), 9);
    }
}
