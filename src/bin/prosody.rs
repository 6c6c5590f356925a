//! prosody command-line tool.
//!
//! # Environment Variables
//!
//! - `PROSODY_CONFIG` — optional YAML engine configuration file
//! - `RUST_LOG` — Tracing filter (default: "info,prosody_engine=debug")
//!
//! # Usage
//!
//! ```bash
//! prosody measure "Hi. Is this working? Great."
//! prosody score active "Short. Sharp. Done."
//! echo "Perhaps, perhaps not." | prosody rank
//! prosody modes
//! prosody report
//! ```

use std::io::Read;

use anyhow::{bail, Context};
use prosody_engine::cli::{self, parse_command, CliCommand, USAGE};
use prosody_engine::{EngineConfig, ResonanceEngine};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,prosody_engine=debug".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(cmd) = args.first() else {
        bail!(USAGE);
    };
    let command = match parse_command(cmd) {
        Some(c) => c,
        None => bail!("unknown command '{}'\n{}", cmd, USAGE),
    };

    let config = match std::env::var("PROSODY_CONFIG") {
        Ok(path) => {
            tracing::info!("Loading engine configuration from {}", path);
            EngineConfig::from_yaml_file(&path)
                .with_context(|| format!("failed to load config {}", path))?
        }
        Err(_) => EngineConfig::default(),
    };
    let mut engine = ResonanceEngine::new(config).context("invalid engine configuration")?;

    let output = match command {
        CliCommand::Version => prosody_engine::VERSION.to_string(),
        CliCommand::Modes => cli::modes_command(&engine)?,
        CliCommand::Report => cli::report_command(&engine)?,
        CliCommand::Measure => cli::measure_command(&text_arg(&args[1..])?)?,
        CliCommand::Rank => cli::rank_command(&engine, &text_arg(&args[1..])?)?,
        CliCommand::Score => {
            let Some(mode) = args.get(1) else {
                bail!("score needs a mode\n{}", USAGE);
            };
            let text = text_arg(&args[2..])?;
            cli::score_command(&mut engine, mode, &text)?
        }
    };
    println!("{}", output);
    Ok(())
}

/// Remaining arguments joined by spaces, or stdin when there are none.
fn text_arg(rest: &[String]) -> anyhow::Result<String> {
    if !rest.is_empty() {
        return Ok(rest.join(" "));
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read text from stdin")?;
    Ok(buf)
}
