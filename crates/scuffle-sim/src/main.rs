//! # Scuffle Sim
//!
//! Runs an AI-vs-AI match, or verifies a recorded replay.
//!
//! Usage: `scuffle-sim [config.toml]`

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use anyhow::{Context, Result};
use scuffle_common::PlayerSlot;
use scuffle_sim::{MatchRunner, Replay, SimConfig, CONFIG_FILE};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn env_filter() -> Result<EnvFilter> {
    Ok(EnvFilter::from_default_env().add_directive("scuffle=info".parse()?))
}

/// Main entry point.
fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(CONFIG_FILE), PathBuf::from);

    // plain logging until the config says which format to use
    let bootstrap = fmt().with_env_filter(env_filter()?).finish();
    let mut config = tracing::subscriber::with_default(bootstrap, || {
        let mut config = SimConfig::load_from(&path);
        config.validate();
        config
    });

    let json = config.json_logs;
    tracing_subscriber::registry()
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(fmt::layer))
        .with(env_filter()?)
        .init();

    info!("Scuffle sim starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Some(replay_path) = config.verify_replay.take() {
        let file = File::open(&replay_path)
            .with_context(|| format!("opening replay {}", replay_path.display()))?;
        let replay = Replay::load(BufReader::new(file))?;
        replay.verify()?;
        return Ok(());
    }

    let tunings = [config.tuning(PlayerSlot::P1)?, config.tuning(PlayerSlot::P2)?];
    let mut runner = MatchRunner::new(&config, tunings, config.replay_out.is_some());
    let summary = runner.run();

    match summary.winner {
        Some(winner) => info!(%winner, rounds = summary.rounds.len(), "Match won"),
        None => info!(rounds = summary.rounds.len(), "Match undecided"),
    }

    if let (Some(out), Some(replay)) = (&config.replay_out, runner.replay()) {
        let file =
            File::create(out).with_context(|| format!("creating replay {}", out.display()))?;
        let mut writer = BufWriter::new(file);
        replay.save(&mut writer)?;
        writer.flush()?;
        info!("Saved replay to {}", out.display());
    }

    info!("Scuffle sim shutdown complete");
    Ok(())
}
