//! Pitch classes, accidental spelling and key signatures

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const SHARP_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];
const FLAT_NAMES: [&str; 12] = ["C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B"];

// ============================================================================
// Pitch Class
// ============================================================================

/// Semitone index relative to C, always in 0..12
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: Self = Self(0);

    /// Wrap any signed semitone count into a pitch class
    pub fn new(semitones: i32) -> Self {
        Self(semitones.rem_euclid(12) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Shift by any signed interval; whole octaves are dropped first so extreme counts cannot overflow
    pub fn transpose(self, semitones: i32) -> Self {
        Self::new(self.0 as i32 + semitones.rem_euclid(12))
    }

    /// True for the seven pitch classes written without an accidental
    pub fn is_natural(self) -> bool {
        SHARP_NAMES[self.0 as usize].len() == 1
    }

    /// Letter name with accidental, e.g. "C#" or "Db"
    pub fn name(self, spelling: Spelling) -> &'static str {
        match spelling {
            Spelling::Sharps => SHARP_NAMES[self.0 as usize],
            Spelling::Flats => FLAT_NAMES[self.0 as usize],
        }
    }

    /// Parse a bare note name ("E", "F#", "Bb").
    ///
    /// Also reports which accidental family the name was written in, if any.
    pub fn parse_name(name: &str) -> Option<(Self, Option<Spelling>)> {
        let mut chars = name.trim().chars();
        let base = letter_semitone(chars.next()?)?;
        let (offset, spelling) = match chars.next() {
            None => (0, None),
            Some(c) => {
                let (offset, spelling) = accidental(c)?;
                (offset, Some(spelling))
            }
        };
        if chars.next().is_some() {
            return None;
        }
        Some((Self::new(base + offset), spelling))
    }
}

impl From<u8> for PitchClass {
    fn from(value: u8) -> Self {
        Self::new(value as i32)
    }
}

impl From<PitchClass> for u8 {
    fn from(pc: PitchClass) -> Self {
        pc.0
    }
}

/// Semitone of a natural note letter
pub(crate) fn letter_semitone(letter: char) -> Option<i32> {
    match letter {
        'C' => Some(0),
        'D' => Some(2),
        'E' => Some(4),
        'F' => Some(5),
        'G' => Some(7),
        'A' => Some(9),
        'B' => Some(11),
        _ => None,
    }
}

/// Semitone offset and spelling family of an accidental sign
pub(crate) fn accidental(sign: char) -> Option<(i32, Spelling)> {
    match sign {
        '#' => Some((1, Spelling::Sharps)),
        'b' => Some((-1, Spelling::Flats)),
        _ => None,
    }
}

// ============================================================================
// Spelling
// ============================================================================

/// Which accidental is preferred when rendering a pitch class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spelling {
    #[default]
    Sharps,
    Flats,
}

impl Spelling {
    pub fn from_use_sharps(use_sharps: bool) -> Self {
        if use_sharps { Self::Sharps } else { Self::Flats }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sharps => "sharps",
            Self::Flats => "flats",
        }
    }
}

impl fmt::Display for Spelling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Spelling {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sharps" | "sharp" | "#" => Ok(Self::Sharps),
            "flats" | "flat" | "b" => Ok(Self::Flats),
            other => Err(format!("unknown spelling '{}'", other)),
        }
    }
}

// ============================================================================
// Key Signatures
// ============================================================================

/// The 15 major key signatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    C,
    G,
    D,
    A,
    E,
    B,
    #[serde(rename = "F#")]
    FSharp,
    #[serde(rename = "C#")]
    CSharp,
    F,
    #[serde(rename = "Bb")]
    BFlat,
    #[serde(rename = "Eb")]
    EFlat,
    #[serde(rename = "Ab")]
    AFlat,
    #[serde(rename = "Db")]
    DFlat,
    #[serde(rename = "Gb")]
    GFlat,
    #[serde(rename = "Cb")]
    CFlat,
}

/// Preferred spelling for every recognized key
pub const KEY_SIGNATURES: [(Key, Spelling); 15] = [
    (Key::C, Spelling::Sharps),
    (Key::G, Spelling::Sharps),
    (Key::D, Spelling::Sharps),
    (Key::A, Spelling::Sharps),
    (Key::E, Spelling::Sharps),
    (Key::B, Spelling::Sharps),
    (Key::FSharp, Spelling::Sharps),
    (Key::CSharp, Spelling::Sharps),
    (Key::F, Spelling::Flats),
    (Key::BFlat, Spelling::Flats),
    (Key::EFlat, Spelling::Flats),
    (Key::AFlat, Spelling::Flats),
    (Key::DFlat, Spelling::Flats),
    (Key::GFlat, Spelling::Flats),
    (Key::CFlat, Spelling::Flats),
];

impl Key {
    pub fn all() -> impl Iterator<Item = Key> {
        KEY_SIGNATURES.iter().map(|&(key, _)| key)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::C => "C",
            Self::G => "G",
            Self::D => "D",
            Self::A => "A",
            Self::E => "E",
            Self::B => "B",
            Self::FSharp => "F#",
            Self::CSharp => "C#",
            Self::F => "F",
            Self::BFlat => "Bb",
            Self::EFlat => "Eb",
            Self::AFlat => "Ab",
            Self::DFlat => "Db",
            Self::GFlat => "Gb",
            Self::CFlat => "Cb",
        }
    }

    pub fn spelling(&self) -> Spelling {
        match self {
            Self::C | Self::G | Self::D | Self::A | Self::E | Self::B | Self::FSharp | Self::CSharp => {
                Spelling::Sharps
            }
            Self::F | Self::BFlat | Self::EFlat | Self::AFlat | Self::DFlat | Self::GFlat | Self::CFlat => {
                Spelling::Flats
            }
        }
    }

    pub fn tonic(&self) -> PitchClass {
        // Every key name is itself a valid note name
        PitchClass::parse_name(self.name())
            .map(|(pc, _)| pc)
            .unwrap_or(PitchClass::C)
    }

    /// Shortest signed interval from this key's tonic to `other`'s, in -5..=6
    pub fn semitones_to(&self, other: Key) -> i32 {
        let up = (other.tonic().value() as i32 - self.tonic().value() as i32).rem_euclid(12);
        if up > 6 { up - 12 } else { up }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let normalized: String = match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => return Err("empty key name".to_string()),
        };
        Key::all()
            .find(|key| key.name() == normalized)
            .ok_or_else(|| format!("unknown key '{}'", trimmed))
    }
}

// ============================================================================
// Note Names
// ============================================================================

/// Format an absolute pitch (C4 = 60) as a note name with octave, e.g. "C#4"
pub fn note_name(pitch: i32, spelling: Spelling) -> String {
    let octave = pitch.div_euclid(12) - 1;
    format!("{}{}", PitchClass::new(pitch).name(spelling), octave)
}
