//! Chord realization: parsed chords to concrete, octave-placed pitches

use crate::parser::{ParsedChord, parse_chord};
use crate::pitch::note_name;

/// Octave the root sits in when no offset is applied (C4 = 60)
pub const DEFAULT_OCTAVE: i32 = 4;

/// Absolute pitch of a pitch class within an octave, using C4 = 60.
///
/// `None` when the octave is too far out for the pitch to fit in an `i32`.
fn pitch_in_octave(pitch_class: u8, octave: i32) -> Option<i32> {
    octave
        .checked_add(1)?
        .checked_mul(12)?
        .checked_add(pitch_class as i32)
}

impl ParsedChord {
    /// Chord tones stacked upward from the root, ignoring inversion and bass.
    ///
    /// Empty when the offset puts the chord outside the representable range.
    pub fn root_position(&self, octave_offset: i32) -> Vec<i32> {
        self.checked_root_position(octave_offset).unwrap_or_default()
    }

    /// Ascending voicing with inversion and explicit bass applied.
    ///
    /// An explicit bass replaces any inversion: the chord stays in root
    /// position and the bass sits one octave below it. Empty when the offset
    /// puts any note outside the representable range.
    pub fn voicing(&self, octave_offset: i32) -> Vec<i32> {
        self.checked_voicing(octave_offset).unwrap_or_else(|| {
            tracing::debug!(chord = %self, octave_offset, "octave offset out of range");
            Vec::new()
        })
    }

    fn checked_root_position(&self, octave_offset: i32) -> Option<Vec<i32>> {
        let octave = DEFAULT_OCTAVE.checked_add(octave_offset)?;
        let root = pitch_in_octave(self.root.value(), octave)?;
        self.intervals
            .iter()
            .map(|&i| root.checked_add(i as i32))
            .collect()
    }

    fn checked_voicing(&self, octave_offset: i32) -> Option<Vec<i32>> {
        let mut notes = self.checked_root_position(octave_offset)?;
        if notes.is_empty() {
            return Some(notes);
        }

        if let Some(bass) = self.bass {
            let octave = DEFAULT_OCTAVE.checked_add(octave_offset)?.checked_sub(1)?;
            notes.insert(0, pitch_in_octave(bass.value(), octave)?);
            return Some(notes);
        }

        let k = self.inversion as usize % notes.len();
        if k > 0 {
            let new_bass = notes[k];
            for note in notes.iter_mut().take(k) {
                *note = note.checked_add(12)?;
                // Only extended chords (offsets past an octave) need more than one lift
                while *note <= new_bass {
                    *note = note.checked_add(12)?;
                }
            }
            notes.sort_unstable();
        }
        Some(notes)
    }
}

/// Realize a chord symbol as absolute pitches (C4 = 60); empty if it does not parse
pub fn realize_chord_pitches(symbol: &str, octave_offset: i32) -> Vec<i32> {
    parse_chord(symbol)
        .map(|chord| chord.voicing(octave_offset))
        .unwrap_or_default()
}

/// Realize a chord symbol as note names with octaves, e.g. `["C4", "E4", "G4"]`.
///
/// Empty when the symbol does not parse, which callers treat as silence.
pub fn realize_chord_notes(symbol: &str, octave_offset: i32) -> Vec<String> {
    let Some(chord) = parse_chord(symbol) else {
        return Vec::new();
    };
    chord
        .voicing(octave_offset)
        .into_iter()
        .map(|pitch| note_name(pitch, chord.spelling))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::mutate::{ChordUpdate, update_chord};

    fn pitch_class_set(pitches: &[i32]) -> BTreeSet<i32> {
        pitches.iter().map(|p| p.rem_euclid(12)).collect()
    }

    #[test]
    fn test_c_major_default_octave() {
        assert_eq!(realize_chord_notes("C", 0), vec!["C4", "E4", "G4"]);
        assert_eq!(realize_chord_pitches("C", 0), vec![60, 64, 67]);
    }

    #[test]
    fn test_octave_offset() {
        assert_eq!(realize_chord_notes("Am", -1), vec!["A3", "C4", "E4"]);
        assert_eq!(realize_chord_notes("C", 1), vec!["C5", "E5", "G5"]);
        assert_eq!(realize_chord_notes("C", -5), vec!["C-1", "E-1", "G-1"]);
    }

    #[test]
    fn test_extreme_octave_offsets_are_silent() {
        for offset in [i32::MAX, i32::MIN, -i32::MAX, i32::MAX - 4, i32::MIN + 3] {
            for symbol in ["C", "C/E", "G7 (3rd inv.)", "Cadd9 (3rd inv.)"] {
                assert!(realize_chord_notes(symbol, offset).is_empty(), "{} at {}", symbol, offset);
                assert!(realize_chord_pitches(symbol, offset).is_empty(), "{} at {}", symbol, offset);
            }
        }
    }

    #[test]
    fn test_largest_representable_octave() {
        // (octave + 1) * 12 stays in range up to octave 178956969
        let highest = 178_956_969 - DEFAULT_OCTAVE;
        assert_eq!(realize_chord_pitches("C", highest), vec![2_147_483_640, 2_147_483_644, i32::MAX]);
        assert_eq!(realize_chord_notes("C", highest), vec!["C178956969", "E178956969", "G178956969"]);
        assert!(realize_chord_pitches("C", highest + 1).is_empty());
        assert!(realize_chord_pitches("C#", highest).is_empty());

        let lowest = -178_956_971 - DEFAULT_OCTAVE;
        assert_eq!(realize_chord_pitches("C", lowest).len(), 3);
        assert!(realize_chord_pitches("C", lowest - 1).is_empty());
        // The slash bass sits an octave below the chord
        assert!(realize_chord_pitches("C/E", lowest).is_empty());
        assert_eq!(realize_chord_pitches("C/E", lowest + 1).len(), 4);
    }

    #[test]
    fn test_spelling_follows_symbol() {
        assert_eq!(realize_chord_notes("Db", 0), vec!["Db4", "F4", "Ab4"]);
        assert_eq!(realize_chord_notes("C#", 0), vec!["C#4", "F4", "G#4"]);
        assert_eq!(realize_chord_notes("B", 0), vec!["B4", "D#5", "F#5"]);
    }

    #[test]
    fn test_inversions() {
        assert_eq!(realize_chord_notes("C (1st inv.)", 0), vec!["E4", "G4", "C5"]);
        assert_eq!(realize_chord_notes("C (2nd inv.)", 0), vec!["G4", "C5", "E5"]);
        assert_eq!(realize_chord_notes("G7 (3rd inv.)", 0), vec!["F5", "G5", "B5", "D6"]);
    }

    #[test]
    fn test_first_inversion_via_update() {
        let symbol = update_chord("C", ChordUpdate::inversion(1));
        assert_eq!(symbol, "C (1st inv.)");
        let notes = realize_chord_notes(&symbol, 0);
        assert_eq!(notes.first().map(String::as_str), Some("E4"));
    }

    #[test]
    fn test_inversion_bass_invariant() {
        for symbol in ["C", "Dm", "G7", "Fmaj7", "Bdim7", "Ebm7b5", "Asus4"] {
            let chord = parse_chord(symbol).unwrap();
            let root_position = chord.root_position(0);
            for k in 0..chord.note_count() {
                let inverted = ParsedChord { inversion: k as u8, ..chord.clone() }.voicing(0);
                assert_eq!(inverted[0], root_position[k], "{} inversion {}", symbol, k);
                assert!(inverted.windows(2).all(|w| w[0] < w[1]), "{} inversion {}", symbol, k);
                // The lifted tones are exactly one octave up
                for &lifted in &root_position[..k] {
                    assert!(inverted.contains(&(lifted + 12)), "{} inversion {}", symbol, k);
                }
            }
        }
    }

    #[test]
    fn test_extended_chord_inversion_keeps_bass() {
        // D5 must stay lowest even though the lifted C4 only reaches C5
        assert_eq!(realize_chord_notes("Cadd9 (3rd inv.)", 0), vec!["D5", "E5", "G5", "C6"]);
    }

    #[test]
    fn test_harmonic_round_trip() {
        for symbol in ["C", "F#m7", "Bbmaj9", "E7sus4 (2nd inv.)", "Ab6 (1st inv.)", "G5"] {
            let chord = parse_chord(symbol).unwrap();
            let expected: BTreeSet<i32> = chord
                .intervals
                .iter()
                .map(|&i| (chord.root.value() as i32 + i as i32).rem_euclid(12))
                .collect();
            for offset in [-2, 0, 3] {
                let pitches = realize_chord_pitches(symbol, offset);
                assert_eq!(pitch_class_set(&pitches), expected, "{} at {}", symbol, offset);
            }
        }
    }

    #[test]
    fn test_slash_bass_below_chord() {
        assert_eq!(realize_chord_notes("G7/B", 0), vec!["B3", "G4", "B4", "D5", "F5"]);
        assert_eq!(realize_chord_notes("C/E", -1), vec!["E2", "C3", "E3", "G3"]);
    }

    #[test]
    fn test_slash_bass_beats_inversion() {
        assert_eq!(realize_chord_notes("C (1st inv.)/G", 0), vec!["G3", "C4", "E4", "G4"]);
    }

    #[test]
    fn test_unparseable_is_silent() {
        assert!(realize_chord_notes("", 0).is_empty());
        assert!(realize_chord_notes("Xm7", 0).is_empty());
        assert!(realize_chord_pitches("C (5th inv.)", 0).is_empty());
    }
}
