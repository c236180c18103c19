//! chordpad-core: Chord-symbol theory engine
//!
//! Parses chord symbols, realizes them as octave-placed notes, transposes and
//! re-spells them, edits inversions and slash basses, and voice-leads whole
//! progressions. Every public function is pure and total: symbols that do not
//! parse produce empty or unchanged output rather than an error.

mod error;
pub mod mutate;
pub mod parser;
pub mod pitch;
pub mod quality;
pub mod realize;
pub mod transpose;
pub mod voice_leading;

pub use error::{ChordError, Result};
pub use mutate::{ChordUpdate, update_chord};
pub use parser::{
    INVERSION_ANNOTATION, ParsedChord, inversion_annotation, inversion_level, parse_chord,
    strip_inversion_annotation, try_parse_chord,
};
pub use pitch::{KEY_SIGNATURES, Key, PitchClass, Spelling, note_name};
pub use quality::{QUALITY_PRECEDENCE, Quality, has_seventh};
pub use realize::{DEFAULT_OCTAVE, realize_chord_notes, realize_chord_pitches};
pub use transpose::{transpose_chord, transpose_chord_to_key, transpose_progression};
pub use voice_leading::{VoicedChord, humanize_progression, voice_distance, voice_progression};
