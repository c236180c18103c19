//! Command-line parsing and dispatch

use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use chordpad_core::{
    ChordUpdate, KEY_SIGNATURES, Key, Spelling, has_seventh, realize_chord_notes,
    transpose_chord, transpose_progression, try_parse_chord, update_chord, voice_progression,
};

use crate::config::{Config, config_path, save_config};

pub const USAGE: &str = "\
Usage:
  chordpad parse <symbol> [--json]
  chordpad notes <symbol> [--octave N]
  chordpad transpose <symbol> <semitones> [--sharps | --flats]
  chordpad transpose-prog <semitones> <symbol>... [--key K]
  chordpad update <symbol> [--inversion N] [--bass NOTE | --no-bass]
  chordpad humanize <symbol>... [--json]
  chordpad seventh <symbol>
  chordpad keys
  chordpad config [--write]";

/// Flags that take a value
const VALUE_FLAGS: [&str; 4] = ["--octave", "--inversion", "--bass", "--key"];

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Parse { symbol: String, json: bool },
    Notes { symbol: String, octave: Option<i32> },
    Transpose { symbol: String, semitones: i32, spelling: Option<Spelling> },
    TransposeProgression { semitones: i32, symbols: Vec<String>, key: Option<Key> },
    Update { symbol: String, update: ChordUpdate },
    Humanize { symbols: Vec<String>, json: bool },
    Seventh { symbol: String },
    Keys,
    Config { write: bool },
}

fn has_flag(args: &[String], name: &str) -> bool {
    args.iter().any(|a| a == name)
}

fn parse_flag<T: FromStr>(args: &[String], name: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    let Some(pos) = args.iter().position(|a| a == name) else {
        return Ok(None);
    };
    let raw = args
        .get(pos + 1)
        .ok_or_else(|| anyhow!("{} needs a value", name))?;
    raw.parse()
        .map(Some)
        .map_err(|e| anyhow!("invalid value '{}' for {}: {}", raw, name, e))
}

/// Arguments that are neither flags nor flag values
fn positionals(args: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            iter.next();
        } else if !arg.starts_with("--") {
            out.push(arg.clone());
        }
    }
    out
}

fn single(positional: &[String], what: &str) -> Result<String> {
    match positional {
        [one] => Ok(one.clone()),
        [] => bail!("missing {}", what),
        _ => bail!("expected a single {}, got {}", what, positional.len()),
    }
}

fn semitones(raw: &str) -> Result<i32> {
    raw.parse()
        .with_context(|| format!("invalid semitone count '{}'", raw))
}

impl Command {
    /// Parse `args` (without the program name)
    pub fn from_args(args: &[String]) -> Result<Self> {
        let Some((name, rest)) = args.split_first() else {
            bail!("no command given\n\n{}", USAGE);
        };
        let positional = positionals(rest);

        let command = match name.as_str() {
            "parse" => Self::Parse {
                symbol: single(&positional, "chord symbol")?,
                json: has_flag(rest, "--json"),
            },
            "notes" => Self::Notes {
                symbol: single(&positional, "chord symbol")?,
                octave: parse_flag(rest, "--octave")?,
            },
            "transpose" => {
                let [symbol, amount] = positional.as_slice() else {
                    bail!("transpose needs <symbol> <semitones>");
                };
                let spelling = match (has_flag(rest, "--sharps"), has_flag(rest, "--flats")) {
                    (true, true) => bail!("--sharps and --flats are exclusive"),
                    (true, false) => Some(Spelling::Sharps),
                    (false, true) => Some(Spelling::Flats),
                    (false, false) => None,
                };
                Self::Transpose { symbol: symbol.clone(), semitones: semitones(amount)?, spelling }
            }
            "transpose-prog" => {
                let Some((amount, symbols)) = positional.split_first() else {
                    bail!("transpose-prog needs <semitones> <symbol>...");
                };
                Self::TransposeProgression {
                    semitones: semitones(amount)?,
                    symbols: symbols.to_vec(),
                    key: parse_flag(rest, "--key")?,
                }
            }
            "update" => {
                let mut update = ChordUpdate::default();
                if let Some(level) = parse_flag::<u8>(rest, "--inversion")? {
                    update = update.with_inversion(level);
                }
                let bass: Option<String> = parse_flag(rest, "--bass")?;
                match (bass, has_flag(rest, "--no-bass")) {
                    (Some(_), true) => bail!("--bass and --no-bass are exclusive"),
                    (Some(name), false) => {
                        update = update
                            .with_bass_name(&name)
                            .ok_or_else(|| anyhow!("invalid bass note '{}'", name))?;
                    }
                    (None, true) => update = update.with_bass(None),
                    (None, false) => {}
                }
                Self::Update { symbol: single(&positional, "chord symbol")?, update }
            }
            "humanize" => Self::Humanize { symbols: positional, json: has_flag(rest, "--json") },
            "seventh" => Self::Seventh { symbol: single(&positional, "chord symbol")? },
            "keys" => Self::Keys,
            "config" => Self::Config { write: has_flag(rest, "--write") },
            "help" | "--help" | "-h" => bail!("{}", USAGE),
            other => bail!("unknown command '{}'\n\n{}", other, USAGE),
        };
        Ok(command)
    }

    /// Run the command, returning the lines to print
    pub fn run(&self, config: &Config) -> Result<Vec<String>> {
        tracing::debug!(command = ?self, "running");
        let lines = match self {
            Self::Parse { symbol, json } => {
                let chord = try_parse_chord(symbol)?;
                if *json {
                    vec![serde_json::to_string_pretty(&chord)?]
                } else {
                    let bass = chord
                        .bass
                        .map(|b| b.name(chord.spelling).to_string())
                        .unwrap_or_else(|| "-".to_string());
                    vec![
                        format!("root:      {}", chord.root.name(chord.spelling)),
                        format!("quality:   {} ({})", chord.quality.name(), chord.quality.token()),
                        format!("intervals: {:?}", chord.intervals),
                        format!("inversion: {}", chord.inversion),
                        format!("bass:      {}", bass),
                    ]
                }
            }
            Self::Notes { symbol, octave } => {
                let notes = realize_chord_notes(symbol, octave.unwrap_or(config.default_octave));
                if notes.is_empty() {
                    tracing::warn!("'{}' produces no notes", symbol);
                }
                vec![notes.join(" ")]
            }
            Self::Transpose { symbol, semitones, spelling } => {
                let spelling = spelling.unwrap_or(config.spelling);
                vec![transpose_chord(symbol, *semitones, spelling == Spelling::Sharps)]
            }
            Self::TransposeProgression { semitones, symbols, key } => {
                vec![transpose_progression(symbols.as_slice(), *semitones, key.unwrap_or(config.key)).join(" ")]
            }
            Self::Update { symbol, update } => vec![update_chord(symbol, *update)],
            Self::Humanize { symbols, json } => {
                let voiced = voice_progression(symbols.as_slice());
                if *json {
                    vec![serde_json::to_string_pretty(&voiced)?]
                } else {
                    vec![voiced.into_iter().map(|v| v.symbol).collect::<Vec<_>>().join(" | ")]
                }
            }
            Self::Seventh { symbol } => vec![has_seventh(symbol).to_string()],
            Self::Keys => KEY_SIGNATURES
                .iter()
                .map(|(key, spelling)| format!("{:<3} {}", key.name(), spelling))
                .collect(),
            Self::Config { write } => {
                let path = config_path();
                if *write {
                    save_config(config, &path)
                        .with_context(|| format!("writing {}", path.display()))?;
                    tracing::info!("Wrote config to {}", path.display());
                }
                vec![format!("# {}", path.display()), toml::to_string_pretty(config)?]
            }
        };
        Ok(lines)
    }
}
