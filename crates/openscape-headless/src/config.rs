//! Driver configuration read from the environment.

use std::env;
use std::path::PathBuf;

/// Where the driver reads its inputs and writes its snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct HeadlessConfig {
    /// Master seed for the session.
    pub seed: u64,
    /// JSON file holding a `SimConfig` override.
    pub sim_config: Option<PathBuf>,
    /// JSON save to resume from instead of generating a world.
    pub save: Option<PathBuf>,
    /// JSON script of timed actions.
    pub script: Option<PathBuf>,
    /// Ticks to run when no script sets its own length.
    pub ticks: u64,
    /// Snapshot destination; stdout when unset.
    pub output: Option<PathBuf>,
    /// Write only the persisted subset instead of the full state.
    pub save_only: bool,
    /// Sleep for the tick interval between ticks.
    pub realtime: bool,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            sim_config: None,
            save: None,
            script: None,
            ticks: 100,
            output: None,
            save_only: false,
            realtime: false,
        }
    }
}

impl HeadlessConfig {
    /// Reads `OPENSCAPE_*` variables over the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_env::<u64>("OPENSCAPE_SEED") {
            config.seed = seed;
        }
        config.sim_config = read_path("OPENSCAPE_CONFIG");
        config.save = read_path("OPENSCAPE_SAVE");
        config.script = read_path("OPENSCAPE_SCRIPT");
        if let Some(ticks) = read_env::<u64>("OPENSCAPE_TICKS") {
            config.ticks = ticks;
        }
        config.output = read_path("OPENSCAPE_OUTPUT");
        config.save_only = read_env::<bool>("OPENSCAPE_SAVE_ONLY").unwrap_or(false);
        config.realtime = read_env::<bool>("OPENSCAPE_REALTIME").unwrap_or(false);

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_path(key: &str) -> Option<PathBuf> {
    env::var_os(key).filter(|v| !v.is_empty()).map(PathBuf::from)
}
