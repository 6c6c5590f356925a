//! CLI commands for the `prosody` binary.
//!
//! Every command prints pretty JSON. Commands that take text read stdin when
//! no text argument is given.

use serde::Serialize;

use crate::engine::ResonanceEngine;
use crate::error::Result;
use crate::prosody::extractor::{measure, segments};
use crate::resonance::scorer::Penalty;

/// Available CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliCommand {
    /// Print the prosodic signature of a text.
    Measure,
    /// Score a text against one mode.
    Score,
    /// Score a text against every mode.
    Rank,
    /// List every available mode profile.
    Modes,
    /// Print the engine snapshot: tolerance, statistics, traits, violations.
    Report,
    /// Show version information.
    Version,
}

impl std::fmt::Display for CliCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Measure => write!(f, "measure"),
            Self::Score => write!(f, "score"),
            Self::Rank => write!(f, "rank"),
            Self::Modes => write!(f, "modes"),
            Self::Report => write!(f, "report"),
            Self::Version => write!(f, "version"),
        }
    }
}

/// Parse a CLI command from a string.
pub fn parse_command(cmd: &str) -> Option<CliCommand> {
    match cmd {
        "measure" => Some(CliCommand::Measure),
        "score" => Some(CliCommand::Score),
        "rank" => Some(CliCommand::Rank),
        "modes" | "list-modes" | "list_modes" => Some(CliCommand::Modes),
        "report" => Some(CliCommand::Report),
        "version" | "--version" | "-v" => Some(CliCommand::Version),
        _ => None,
    }
}

pub const USAGE: &str =
    "usage: prosody <measure|score <mode>|rank|modes|report|version> [text]";

#[derive(Serialize)]
struct MeasureOutput<'a> {
    segments: Vec<&'a str>,
    signature: crate::prosody::signature::ProsodicSignature,
}

#[derive(Serialize)]
struct RankEntry {
    mode: String,
    resonance: f64,
}

#[derive(Serialize)]
struct ScoreOutput {
    reading: crate::engine::ResonanceReading,
    weights: Vec<(Penalty, f64)>,
}

/// Signature of `text` plus the segments it was measured from.
pub fn measure_command(text: &str) -> Result<String> {
    let out = MeasureOutput {
        segments: segments(text),
        signature: measure(text),
    };
    Ok(serde_json::to_string_pretty(&out)?)
}

/// Score `text` against `mode`, recording the reading in `engine`.
pub fn score_command(engine: &mut ResonanceEngine, mode: &str, text: &str) -> Result<String> {
    let reading = engine.analyze(text, mode)?;
    let weights = reading.penalties.iter().map(|p| (*p, p.weight())).collect();
    Ok(serde_json::to_string_pretty(&ScoreOutput { reading, weights })?)
}

pub fn rank_command(engine: &ResonanceEngine, text: &str) -> Result<String> {
    let ranked: Vec<RankEntry> = engine
        .rank_modes(text)
        .into_iter()
        .map(|(mode, resonance)| RankEntry { mode, resonance })
        .collect();
    Ok(serde_json::to_string_pretty(&ranked)?)
}

pub fn modes_command(engine: &ResonanceEngine) -> Result<String> {
    Ok(serde_json::to_string_pretty(&engine.blender().all_modes())?)
}

pub fn report_command(engine: &ResonanceEngine) -> Result<String> {
    Ok(serde_json::to_string_pretty(&engine.snapshot())?)
}
