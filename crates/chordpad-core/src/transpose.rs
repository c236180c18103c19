//! Chord transposition with key-aware enharmonic spelling

use crate::parser::{ParsedChord, parse_chord};
use crate::pitch::{Key, Spelling};

impl ParsedChord {
    /// Shift root and bass by `semitones`, respelled with `spelling`.
    /// Quality and inversion are unchanged.
    pub fn transposed(&self, semitones: i32, spelling: Spelling) -> ParsedChord {
        ParsedChord {
            root: self.root.transpose(semitones),
            bass: self.bass.map(|bass| bass.transpose(semitones)),
            spelling,
            ..self.clone()
        }
    }
}

fn transpose_with(symbol: &str, semitones: i32, spelling: Spelling) -> String {
    match parse_chord(symbol) {
        Some(chord) => chord.transposed(semitones, spelling).to_string(),
        None => symbol.to_string(),
    }
}

/// Transpose a chord symbol; unparseable symbols come back unchanged
pub fn transpose_chord(symbol: &str, semitones: i32, use_sharps: bool) -> String {
    transpose_with(symbol, semitones, Spelling::from_use_sharps(use_sharps))
}

/// Transpose a chord symbol, spelling it the way `target` prefers
pub fn transpose_chord_to_key(symbol: &str, semitones: i32, target: Key) -> String {
    transpose_with(symbol, semitones, target.spelling())
}

/// Transpose every chord of a progression independently
pub fn transpose_progression<S: AsRef<str>>(symbols: &[S], semitones: i32, target: Key) -> Vec<String> {
    symbols
        .iter()
        .map(|symbol| transpose_chord_to_key(symbol.as_ref(), semitones, target))
        .collect()
}
