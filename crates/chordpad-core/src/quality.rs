//! Chord qualities and their interval sets

use serde::{Deserialize, Serialize};

use crate::parser::parse_chord;

/// Chord quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quality {
    Major,
    Minor,
    Diminished,
    Augmented,
    Sus2,
    Sus4,
    Power,
    Sixth,
    MinorSixth,
    Add9,
    Dominant7,
    Major7,
    Minor7,
    MinorMajor7,
    Diminished7,
    HalfDiminished7,
    Augmented7,
    Dominant7Sus4,
    Dominant9,
    Major9,
    Minor9,
}

/// Order in which suffix tokens are tried against a chord symbol.
///
/// The first token that prefixes the text after the root wins, so longer and
/// more specific tokens must come before any token that is their prefix
/// ("m7b5" before "m7" before "m"). The empty major token is always last.
pub const QUALITY_PRECEDENCE: [Quality; 21] = [
    Quality::MinorMajor7,
    Quality::Dominant7Sus4,
    Quality::HalfDiminished7,
    Quality::Major9,
    Quality::Major7,
    Quality::Diminished7,
    Quality::Augmented7,
    Quality::Add9,
    Quality::Sus2,
    Quality::Sus4,
    Quality::Diminished,
    Quality::Augmented,
    Quality::Minor9,
    Quality::Minor7,
    Quality::MinorSixth,
    Quality::Dominant9,
    Quality::Dominant7,
    Quality::Sixth,
    Quality::Power,
    Quality::Minor,
    Quality::Major,
];

impl Quality {
    /// Every quality, in precedence order
    pub fn all() -> &'static [Quality] {
        &QUALITY_PRECEDENCE
    }

    /// Semitone offsets from the root, ascending
    pub fn intervals(&self) -> &'static [u8] {
        match self {
            Self::Major => &[0, 4, 7],
            Self::Minor => &[0, 3, 7],
            Self::Diminished => &[0, 3, 6],
            Self::Augmented => &[0, 4, 8],
            Self::Sus2 => &[0, 2, 7],
            Self::Sus4 => &[0, 5, 7],
            Self::Power => &[0, 7],
            Self::Sixth => &[0, 4, 7, 9],
            Self::MinorSixth => &[0, 3, 7, 9],
            Self::Add9 => &[0, 4, 7, 14],
            Self::Dominant7 => &[0, 4, 7, 10],
            Self::Major7 => &[0, 4, 7, 11],
            Self::Minor7 => &[0, 3, 7, 10],
            Self::MinorMajor7 => &[0, 3, 7, 11],
            Self::Diminished7 => &[0, 3, 6, 9],
            Self::HalfDiminished7 => &[0, 3, 6, 10],
            Self::Augmented7 => &[0, 4, 8, 10],
            Self::Dominant7Sus4 => &[0, 5, 7, 10],
            Self::Dominant9 => &[0, 4, 7, 10, 14],
            Self::Major9 => &[0, 4, 7, 11, 14],
            Self::Minor9 => &[0, 3, 7, 10, 14],
        }
    }

    /// Suffix written after the root in a chord symbol
    pub fn token(&self) -> &'static str {
        match self {
            Self::Major => "",
            Self::Minor => "m",
            Self::Diminished => "dim",
            Self::Augmented => "aug",
            Self::Sus2 => "sus2",
            Self::Sus4 => "sus4",
            Self::Power => "5",
            Self::Sixth => "6",
            Self::MinorSixth => "m6",
            Self::Add9 => "add9",
            Self::Dominant7 => "7",
            Self::Major7 => "maj7",
            Self::Minor7 => "m7",
            Self::MinorMajor7 => "mMaj7",
            Self::Diminished7 => "dim7",
            Self::HalfDiminished7 => "m7b5",
            Self::Augmented7 => "aug7",
            Self::Dominant7Sus4 => "7sus4",
            Self::Dominant9 => "9",
            Self::Major9 => "maj9",
            Self::Minor9 => "m9",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Major => "Major",
            Self::Minor => "Minor",
            Self::Diminished => "Dim",
            Self::Augmented => "Aug",
            Self::Sus2 => "Sus2",
            Self::Sus4 => "Sus4",
            Self::Power => "Power",
            Self::Sixth => "6",
            Self::MinorSixth => "Min6",
            Self::Add9 => "Add9",
            Self::Dominant7 => "Dom7",
            Self::Major7 => "Maj7",
            Self::Minor7 => "Min7",
            Self::MinorMajor7 => "MinMaj7",
            Self::Diminished7 => "Dim7",
            Self::HalfDiminished7 => "m7b5",
            Self::Augmented7 => "Aug7",
            Self::Dominant7Sus4 => "7sus4",
            Self::Dominant9 => "Dom9",
            Self::Major9 => "Maj9",
            Self::Minor9 => "Min9",
        }
    }

    /// Exact token lookup
    pub fn from_token(token: &str) -> Option<Self> {
        QUALITY_PRECEDENCE.iter().copied().find(|q| q.token() == token)
    }

    /// First quality in precedence order whose token prefixes `input`,
    /// together with the unconsumed remainder
    pub fn match_prefix(input: &str) -> (Self, &str) {
        for quality in QUALITY_PRECEDENCE {
            if let Some(rest) = input.strip_prefix(quality.token()) {
                return (quality, rest);
            }
        }
        (Self::Major, input)
    }

    /// True when the interval set holds a minor or major seventh
    pub fn has_seventh(&self) -> bool {
        self.intervals().iter().any(|&i| i == 10 || i == 11)
    }
}

/// Whether a chord symbol contains a seventh; false when it does not parse
pub fn has_seventh(symbol: &str) -> bool {
    parse_chord(symbol).is_some_and(|chord| chord.quality.has_seventh())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_is_longest_first() {
        for pair in QUALITY_PRECEDENCE.windows(2) {
            assert!(
                pair[0].token().len() >= pair[1].token().len(),
                "{:?} must precede {:?}",
                pair[0],
                pair[1]
            );
        }
        assert_eq!(QUALITY_PRECEDENCE.last(), Some(&Quality::Major));
    }

    #[test]
    fn test_no_token_shadows_a_later_longer_one() {
        for (i, earlier) in QUALITY_PRECEDENCE.iter().enumerate() {
            for later in &QUALITY_PRECEDENCE[i + 1..] {
                assert!(
                    !later.token().starts_with(earlier.token()) || later.token() == earlier.token(),
                    "{:?} shadows {:?}",
                    earlier,
                    later
                );
            }
        }
    }

    #[test]
    fn test_tokens_round_trip() {
        for &quality in Quality::all() {
            assert_eq!(Quality::from_token(quality.token()), Some(quality));
        }
        assert_eq!(Quality::from_token("maj"), None);
    }

    #[test]
    fn test_match_prefix() {
        assert_eq!(Quality::match_prefix("m7b5"), (Quality::HalfDiminished7, ""));
        assert_eq!(Quality::match_prefix("m7 (1st inv.)"), (Quality::Minor7, " (1st inv.)"));
        assert_eq!(Quality::match_prefix("maj9/E"), (Quality::Major9, "/E"));
        assert_eq!(Quality::match_prefix("7sus4"), (Quality::Dominant7Sus4, ""));
        assert_eq!(Quality::match_prefix(""), (Quality::Major, ""));
        assert_eq!(Quality::match_prefix("xyz"), (Quality::Major, "xyz"));
    }

    #[test]
    fn test_intervals_start_at_root_and_ascend() {
        for &quality in Quality::all() {
            let intervals = quality.intervals();
            assert_eq!(intervals[0], 0);
            assert!(intervals.windows(2).all(|w| w[0] < w[1]), "{:?}", quality);
        }
    }

    #[test]
    fn test_has_seventh() {
        assert!(has_seventh("Cmaj7"));
        assert!(!has_seventh("C"));
        assert!(has_seventh("C7"));
        assert!(has_seventh("Bbm7b5"));
        assert!(has_seventh("G9/B"));
        assert!(!has_seventh("Cadd9"));
        assert!(!has_seventh("C6"));
        assert!(!has_seventh(""));
        assert!(!has_seventh("not a chord"));
    }
}
