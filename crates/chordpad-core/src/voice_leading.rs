//! Voice leading across a progression ("humanize")
//!
//! A single left-to-right pass. The only running state is the voicing chosen
//! for the previous chord (the anchor). Each chord after the first is tried in
//! every inversion at the nominal octave, and the inversion whose voicing sits
//! closest to the anchor wins. Ties go to the lowest inversion.
//!
//! Distance is nearest-voice: for each note of the candidate, the semitone
//! distance to the closest note of the anchor, summed.

use serde::{Deserialize, Serialize};

use crate::mutate::{ChordUpdate, update_chord};
use crate::parser::{ParsedChord, parse_chord};

/// Octave offset candidates are realized at while scoring
const NOMINAL_OCTAVE_OFFSET: i32 = 0;

/// One entry of a voiced progression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoicedChord {
    /// Symbol to emit, carrying the chosen inversion
    pub symbol: String,
    /// Chosen inversion, `None` when the input did not parse
    pub inversion: Option<u8>,
    /// Distance to the previous voicing, `None` when there was nothing to compare with
    pub cost: Option<u32>,
    /// Realized voicing at the nominal octave
    pub notes: Vec<i32>,
}

/// Nearest-voice distance between a candidate voicing and the anchor
pub fn voice_distance(candidate: &[i32], anchor: &[i32]) -> u32 {
    candidate
        .iter()
        .map(|&note| {
            anchor
                .iter()
                .map(|&a| note.abs_diff(a))
                .min()
                .unwrap_or(0)
        })
        .fold(0, u32::saturating_add)
}

/// Best inversion of `chord` against `anchor` as (inversion, cost, voicing)
fn best_inversion(chord: &ParsedChord, anchor: &[i32]) -> (u8, u32, Vec<i32>) {
    let mut best: Option<(u8, u32, Vec<i32>)> = None;
    for level in 0..chord.note_count() as u8 {
        let candidate = ParsedChord { inversion: level, ..chord.clone() };
        let notes = candidate.voicing(NOMINAL_OCTAVE_OFFSET);
        let cost = voice_distance(&notes, anchor);
        tracing::trace!(chord = %chord, inversion = level, cost, "voice leading candidate");
        // Strict comparison keeps the lowest inversion on ties
        if best.as_ref().is_none_or(|(_, best_cost, _)| cost < *best_cost) {
            best = Some((level, cost, notes));
        }
    }
    best.unwrap_or((0, 0, Vec::new()))
}

/// Choose an inversion for every chord, returning the full scoring record.
///
/// The first parseable chord has nothing to lead from, so it is re-emitted in
/// root position: `"C (1st inv.)"` comes back as `"C"`. A slash chord is the
/// exception and is kept exactly as written.
pub fn voice_progression<S: AsRef<str>>(symbols: &[S]) -> Vec<VoicedChord> {
    let mut anchor: Option<Vec<i32>> = None;
    let mut voiced = Vec::with_capacity(symbols.len());

    for symbol in symbols {
        let symbol = symbol.as_ref();
        let Some(chord) = parse_chord(symbol) else {
            voiced.push(VoicedChord {
                symbol: symbol.to_string(),
                inversion: None,
                cost: None,
                notes: Vec::new(),
            });
            continue;
        };

        let entry = if chord.bass.is_some() {
            // The slash bass already fixes the voicing
            let notes = chord.voicing(NOMINAL_OCTAVE_OFFSET);
            VoicedChord {
                symbol: symbol.to_string(),
                inversion: Some(chord.inversion),
                cost: anchor.as_deref().map(|a| voice_distance(&notes, a)),
                notes,
            }
        } else if let Some(previous) = anchor.as_deref() {
            let (inversion, cost, notes) = best_inversion(&chord, previous);
            VoicedChord {
                symbol: update_chord(symbol, ChordUpdate::inversion(inversion)),
                inversion: Some(inversion),
                cost: Some(cost),
                notes,
            }
        } else {
            let root = ParsedChord { inversion: 0, ..chord };
            VoicedChord {
                symbol: update_chord(symbol, ChordUpdate::inversion(0)),
                inversion: Some(0),
                cost: None,
                notes: root.voicing(NOMINAL_OCTAVE_OFFSET),
            }
        };

        anchor = Some(entry.notes.clone());
        voiced.push(entry);
    }

    tracing::debug!(chords = voiced.len(), "voiced progression");
    voiced
}

/// Rewrite a progression so each chord takes the inversion closest to the one before it.
///
/// Any inversion annotation on the first parseable chord is dropped, since
/// that chord is always put back in root position. Slash chords and
/// unparseable entries come back unchanged.
pub fn humanize_progression<S: AsRef<str>>(symbols: &[S]) -> Vec<String> {
    voice_progression(symbols)
        .into_iter()
        .map(|entry| entry.symbol)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::realize::realize_chord_pitches;

    #[test]
    fn test_voice_distance() {
        assert_eq!(voice_distance(&[60, 64, 67], &[60, 64, 67]), 0);
        assert_eq!(voice_distance(&[65, 69, 72], &[60, 64, 67]), 1 + 2 + 5);
        assert_eq!(voice_distance(&[60], &[]), 0);
        assert_eq!(voice_distance(&[i32::MAX], &[i32::MIN]), u32::MAX);
        assert_eq!(voice_distance(&[i32::MAX, i32::MIN], &[i32::MIN, 0]), u32::MAX);
    }

    #[test]
    fn test_humanize_one_four_five_one() {
        let out = humanize_progression(&["C", "F", "G", "C"]);
        assert_eq!(out, vec!["C", "F", "G", "C (2nd inv.)"]);
    }

    #[test]
    fn test_humanize_is_deterministic() {
        let progression = ["Am7", "D7", "Gmaj7", "Cmaj7", "F#m7b5", "B7", "Em"];
        assert_eq!(humanize_progression(&progression), humanize_progression(&progression));
    }

    #[test]
    fn test_chosen_cost_never_worse_than_root_position() {
        let progression = ["C", "Am", "Dm7", "G7", "Em", "A7", "Dm", "G", "C"];
        let voiced = voice_progression(&progression);
        for pair in voiced.windows(2) {
            let current = parse_chord(&pair[1].symbol).unwrap();
            let root_position = ParsedChord { inversion: 0, ..current }.voicing(0);
            let root_cost = voice_distance(&root_position, &pair[0].notes);
            assert!(pair[1].cost.unwrap() <= root_cost, "{:?}", pair[1]);
        }
    }

    #[test]
    fn test_no_octave_jump_when_smaller_inversion_available() {
        let out = humanize_progression(&["C", "F", "G", "C"]);
        let mut jumps = Vec::new();
        for pair in out.windows(2) {
            let previous = realize_chord_pitches(&pair[0], 0);
            let current = realize_chord_pitches(&pair[1], 0);
            // Every triad has other inversions to fall back on, so no pair may leap an octave
            assert!(parse_chord(&pair[1]).unwrap().note_count() > 1);
            let jump = (current[0] - previous[0]).abs();
            assert!(jump < 12, "{} -> {}", pair[0], pair[1]);
            jumps.push(jump);
        }
        // C4 -> F4 -> G4 -> G4 (C in 2nd inversion)
        assert_eq!(jumps, vec![5, 2, 0]);
    }

    #[test]
    fn test_output_matches_input_length_and_order() {
        let progression = ["Dm", "G7", "Cmaj7"];
        let out = humanize_progression(&progression);
        assert_eq!(out.len(), progression.len());
        for (input, output) in progression.iter().zip(&out) {
            let a = parse_chord(input).unwrap();
            let b = parse_chord(output).unwrap();
            assert_eq!((a.root, a.quality), (b.root, b.quality));
        }
    }

    #[test]
    fn test_first_chord_returns_to_root_position() {
        assert_eq!(humanize_progression(&["C (1st inv.)"]), vec!["C"]);
        let out = humanize_progression(&["C (1st inv.)", "C"]);
        assert_eq!(out[0], "C");
        assert_eq!(out[1], "C");
    }

    #[test]
    fn test_unparseable_entries_pass_through() {
        let out = humanize_progression(&["", "C", "???", "G", "N.C."]);
        assert_eq!(out[0], "");
        assert_eq!(out[2], "???");
        assert_eq!(out[4], "N.C.");
        // G is still scored against C, skipping the junk in between
        assert_eq!(out[3], humanize_progression(&["C", "G"])[1]);
    }

    #[test]
    fn test_slash_chords_kept_and_anchor() {
        let voiced = voice_progression(&["C", "G/B", "Am"]);
        assert_eq!(voiced[1].symbol, "G/B");
        assert_eq!(voiced[1].notes, vec![59, 67, 71, 74]);
        assert_eq!(voiced[2].cost.map(|c| c <= voice_distance(&[69, 72, 76], &voiced[1].notes)), Some(true));
    }

    #[test]
    fn test_empty_progression() {
        let empty: [&str; 0] = [];
        assert!(humanize_progression(&empty).is_empty());
    }
}
