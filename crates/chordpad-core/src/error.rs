//! Error types for chordpad

use thiserror::Error;

/// Why a chord symbol was rejected by the parser.
///
/// The public engine functions never surface this; they degrade to empty or
/// unchanged output. It exists for callers that want to explain a rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChordError {
    #[error("empty chord symbol")]
    Empty,
    #[error("invalid root in '{0}'")]
    InvalidRoot(String),
    #[error("unknown chord quality '{quality}' in '{symbol}'")]
    UnknownQuality { symbol: String, quality: String },
    #[error("inversion {level} out of range for '{symbol}' ({notes} notes)")]
    InvalidInversion { symbol: String, level: u32, notes: usize },
    #[error("invalid bass note in '{0}'")]
    InvalidBass(String),
    #[error("unexpected trailing input '{rest}' in '{symbol}'")]
    TrailingInput { symbol: String, rest: String },
}

pub type Result<T> = std::result::Result<T, ChordError>;
