//! Headless driver for the OpenScape simulation.
//!
//! Seeds a session (or resumes a save), replays a script of timed actions at
//! the configured tick rate and writes the resulting snapshot as JSON.
//!
//! Configuration comes from `OPENSCAPE_*` environment variables; logging is
//! controlled with `RUST_LOG`.
mod config;
mod script;

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use config::HeadlessConfig;
use openscape_core::{SaveData, Session, SimConfig, Terrain};
use script::Script;
use serde::de::DeserializeOwned;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let config = HeadlessConfig::from_env();
    tracing::info!(?config, "headless driver starting");
    run(&config)
}

fn run(config: &HeadlessConfig) -> Result<()> {
    let sim_config: SimConfig = match &config.sim_config {
        Some(path) => read_json(path)?,
        None => SimConfig::default(),
    };
    Terrain::validate_size(sim_config.map_size, sim_config.map_size).context("invalid map_size")?;

    let mut session = match &config.save {
        Some(path) => {
            let save: SaveData = read_json(path)?;
            Session::resume(sim_config, config.seed, save)
                .with_context(|| format!("invalid save {}", path.display()))?
        }
        None => Session::new(sim_config, config.seed),
    };

    let script: Script = match &config.script {
        Some(path) => read_json(path)?,
        None => Script::default(),
    };
    script.run(&mut session, config.ticks, config.realtime);

    let snapshot = if config.save_only {
        serde_json::to_string_pretty(&session.save())?
    } else {
        serde_json::to_string_pretty(session.state())?
    };

    match &config.output {
        Some(path) => fs::write(path, snapshot)
            .with_context(|| format!("failed to write snapshot to {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{snapshot}")?;
        }
    }

    tracing::info!(tick = session.tick(), "run complete");
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}
