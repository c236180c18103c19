//! Partial updates of chord symbols (inversion, slash bass)

use serde::{Deserialize, Serialize};

use crate::parser::{ParsedChord, parse_chord};
use crate::pitch::{PitchClass, Spelling};

/// Fields to change on a chord; `None` leaves a field as it is
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordUpdate {
    /// New inversion level; 0 returns the chord to root position
    pub inversion: Option<u8>,
    /// New explicit bass; `Some(None)` removes slash notation
    pub bass: Option<Option<PitchClass>>,
    /// Accidental family the new bass was written in. Only used when the root
    /// is a natural note, since a root like `F#` already fixes the spelling.
    pub bass_spelling: Option<Spelling>,
}

impl ChordUpdate {
    pub fn inversion(level: u8) -> Self {
        Self { inversion: Some(level), ..Default::default() }
    }

    /// Set the bass by pitch class alone.
    ///
    /// The bass is written in the chord's existing spelling, and a chord with
    /// no accidental spells sharps, so `C` with bass 10 reads `"C/A#"`. Use
    /// [`ChordUpdate::bass_name`] to keep the accidental the caller wrote.
    pub fn bass(bass: PitchClass) -> Self {
        Self { bass: Some(Some(bass)), ..Default::default() }
    }

    /// Set the bass from a written note name ("E", "Bb", "F#"); `None` if it is not one
    pub fn bass_name(name: &str) -> Option<Self> {
        Self::default().with_bass_name(name)
    }

    pub fn clear_bass() -> Self {
        Self { bass: Some(None), ..Default::default() }
    }

    pub fn with_inversion(mut self, level: u8) -> Self {
        self.inversion = Some(level);
        self
    }

    pub fn with_bass(mut self, bass: Option<PitchClass>) -> Self {
        self.bass = Some(bass);
        self
    }

    pub fn with_bass_name(mut self, name: &str) -> Option<Self> {
        let (bass, spelling) = PitchClass::parse_name(name)?;
        self.bass = Some(Some(bass));
        self.bass_spelling = spelling;
        Some(self)
    }
}

impl ParsedChord {
    /// Apply an update; `None` when the inversion does not exist for this chord
    pub fn with_update(&self, update: ChordUpdate) -> Option<ParsedChord> {
        let mut chord = self.clone();
        if let Some(level) = update.inversion {
            if level as usize >= chord.note_count() {
                return None;
            }
            chord.inversion = level;
        }
        if let Some(bass) = update.bass {
            chord.bass = bass;
        }
        if let Some(spelling) = update
            .bass_spelling
            .filter(|_| chord.bass.is_some() && chord.root.is_natural())
        {
            chord.spelling = spelling;
        }
        Some(chord)
    }
}

/// Apply a partial update to a chord symbol and write it back out.
///
/// Unparseable symbols and out-of-range inversions return the input unchanged.
pub fn update_chord(symbol: &str, update: ChordUpdate) -> String {
    let Some(chord) = parse_chord(symbol) else {
        return symbol.to_string();
    };
    match chord.with_update(update) {
        Some(updated) => updated.to_string(),
        None => {
            tracing::debug!(symbol, ?update, "inversion out of range, chord left unchanged");
            symbol.to_string()
        }
    }
}
