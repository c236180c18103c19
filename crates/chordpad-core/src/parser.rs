//! Chord symbol grammar
//!
//! ```text
//! symbol     := root quality annotation? slash_bass?
//! root       := 'A'..'G' ('#' | 'b')?
//! quality    := first token of QUALITY_PRECEDENCE prefixing the input
//! annotation := ws* '(' digits ("st" | "nd" | "rd" | "th") ws+ "inv." ')'
//! slash_bass := ws* '/' ws* 'A'..'G' ('#' | 'b')?
//! ```
//!
//! Leading and trailing whitespace around the whole symbol is ignored.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1, multispace0, multispace1, one_of},
    combinator::{map_res, opt},
    sequence::{delimited, preceded},
};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ChordError, Result};
use crate::pitch::{PitchClass, Spelling, accidental, letter_semitone};
use crate::quality::Quality;

/// Matches an inversion annotation such as " (2nd inv.)"; group 1 holds the level
pub static INVERSION_ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*\((\d+)(?:st|nd|rd|th)\s+inv\.\)").expect("inversion annotation pattern")
});

/// A chord symbol decomposed into harmonic data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedChord {
    pub root: PitchClass,
    pub quality: Quality,
    /// Semitone offsets from the root, ascending
    pub intervals: Vec<u8>,
    /// Index of the chord tone in the bass, 0 for root position
    pub inversion: u8,
    /// Explicit slash-chord bass
    pub bass: Option<PitchClass>,
    /// Accidental family used when writing the chord back out
    pub spelling: Spelling,
}

impl ParsedChord {
    /// Root-position chord with no bass, spelled with sharps
    pub fn new(root: PitchClass, quality: Quality) -> Self {
        Self {
            root,
            quality,
            intervals: quality.intervals().to_vec(),
            inversion: 0,
            bass: None,
            spelling: Spelling::default(),
        }
    }

    /// Number of chord tones, not counting an explicit bass
    pub fn note_count(&self) -> usize {
        self.intervals.len()
    }

    /// Sorted, deduplicated pitch classes of the chord tones
    pub fn pitch_classes(&self) -> Vec<PitchClass> {
        let mut pcs: Vec<PitchClass> = self
            .intervals
            .iter()
            .map(|&i| self.root.transpose(i as i32))
            .collect();
        pcs.sort();
        pcs.dedup();
        pcs
    }
}

impl fmt::Display for ParsedChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root.name(self.spelling), self.quality.token())?;
        if self.inversion > 0 {
            f.write_str(&inversion_annotation(self.inversion as u32))?;
        }
        if let Some(bass) = self.bass {
            write!(f, "/{}", bass.name(self.spelling))?;
        }
        Ok(())
    }
}

impl FromStr for ParsedChord {
    type Err = ChordError;

    fn from_str(s: &str) -> Result<Self> {
        try_parse_chord(s)
    }
}

// ============================================================================
// Grammar
// ============================================================================

fn note(input: &str) -> IResult<&str, (PitchClass, Option<Spelling>)> {
    let (input, letter) = one_of("ABCDEFG").parse(input)?;
    let (input, sign) = opt(one_of("#b")).parse(input)?;
    let base = letter_semitone(letter).unwrap_or(0);
    let (offset, spelling) = match sign.and_then(accidental) {
        Some((offset, spelling)) => (offset, Some(spelling)),
        None => (0, None),
    };
    Ok((input, (PitchClass::new(base + offset), spelling)))
}

fn quality(input: &str) -> IResult<&str, Quality> {
    let (quality, rest) = Quality::match_prefix(input);
    Ok((rest, quality))
}

fn ordinal(input: &str) -> IResult<&str, &str> {
    alt((tag("st"), tag("nd"), tag("rd"), tag("th"))).parse(input)
}

fn annotation(input: &str) -> IResult<&str, u32> {
    let (input, _) = multispace0(input)?;
    let (input, (level, _, _, _)) = delimited(
        char('('),
        (
            map_res(digit1, |digits: &str| digits.parse::<u32>()),
            ordinal,
            multispace1,
            tag("inv."),
        ),
        char(')'),
    )
    .parse(input)?;
    Ok((input, level))
}

fn slash_bass(input: &str) -> IResult<&str, (PitchClass, Option<Spelling>)> {
    preceded((multispace0, char('/'), multispace0), note).parse(input)
}

/// Format the annotation for an inversion level, e.g. " (1st inv.)"
pub fn inversion_annotation(level: u32) -> String {
    let suffix = match (level % 10, level % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!(" ({}{} inv.)", level, suffix)
}

/// Remove an inversion annotation from a symbol or quality string
pub fn strip_inversion_annotation(symbol: &str) -> Cow<'_, str> {
    INVERSION_ANNOTATION.replace(symbol, "")
}

/// Inversion level named by an annotation in `symbol`, if present
pub fn inversion_level(symbol: &str) -> Option<u32> {
    INVERSION_ANNOTATION
        .captures(symbol)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Parse a chord symbol, reporting why it was rejected
pub fn try_parse_chord(symbol: &str) -> Result<ParsedChord> {
    let input = symbol.trim();
    if input.is_empty() {
        return Err(ChordError::Empty);
    }

    let (rest, (root, root_spelling)) =
        note(input).map_err(|_| ChordError::InvalidRoot(symbol.to_string()))?;
    let (after_quality, quality) = quality(rest).map_err(|_| ChordError::UnknownQuality {
        symbol: symbol.to_string(),
        quality: rest.to_string(),
    })?;

    let (after_annotation, level) = opt(annotation)
        .parse(after_quality)
        .map_err(|_| ChordError::TrailingInput {
            symbol: symbol.to_string(),
            rest: after_quality.to_string(),
        })?;
    let (remaining, bass) = opt(slash_bass)
        .parse(after_annotation)
        .map_err(|_| ChordError::InvalidBass(symbol.to_string()))?;

    let remaining = remaining.trim_end();
    if !remaining.is_empty() {
        return Err(classify_leftover(symbol, rest, after_quality, after_annotation, remaining));
    }

    let chord = ParsedChord::new(root, quality);
    let inversion = match level {
        None => 0,
        Some(level) if level >= 1 && (level as usize) < chord.note_count() => level as u8,
        Some(level) => {
            return Err(ChordError::InvalidInversion {
                symbol: symbol.to_string(),
                level,
                notes: chord.note_count(),
            });
        }
    };

    let spelling = root_spelling
        .or(bass.and_then(|(_, spelling)| spelling))
        .unwrap_or_default();

    Ok(ParsedChord {
        inversion,
        bass: bass.map(|(pc, _)| pc),
        spelling,
        ..chord
    })
}

/// Pick the most useful error for input the grammar left unconsumed
fn classify_leftover(
    symbol: &str,
    after_root: &str,
    after_quality: &str,
    after_annotation: &str,
    remaining: &str,
) -> ChordError {
    let trimmed = remaining.trim_start();
    if remaining.len() == after_quality.len() && !trimmed.starts_with(['(', '/']) {
        // Nothing after the quality token was understood, so the quality itself is bad
        let end = after_root.find(['(', '/']).unwrap_or(after_root.len());
        return ChordError::UnknownQuality {
            symbol: symbol.to_string(),
            quality: after_root[..end].trim().to_string(),
        };
    }
    if trimmed.starts_with('/') && remaining.len() == after_annotation.len() {
        return ChordError::InvalidBass(symbol.to_string());
    }
    ChordError::TrailingInput {
        symbol: symbol.to_string(),
        rest: trimmed.to_string(),
    }
}

/// Parse a chord symbol; `None` when it is not a recognizable chord
pub fn parse_chord(symbol: &str) -> Option<ParsedChord> {
    match try_parse_chord(symbol) {
        Ok(chord) => Some(chord),
        Err(e) => {
            tracing::debug!(symbol, error = %e, "rejected chord symbol");
            None
        }
    }
}
