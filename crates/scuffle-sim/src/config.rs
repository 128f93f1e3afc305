//! Runner configuration.
//!
//! Read from a TOML file. A missing or broken file falls back to defaults.

use scuffle_combat::{ArenaConfig, FighterTuning};
use scuffle_common::{PlayerSlot, ScuffleResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuration file name.
pub const CONFIG_FILE: &str = "scuffle.toml";

/// Runner configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Match Settings ===
    /// Seed for both AI opponents
    pub seed: u64,
    /// Round wins needed to take the match
    pub rounds_to_win: u32,
    /// Ticks before an undecided round is called on health
    pub max_round_ticks: u64,
    /// Pace ticks against the wall clock
    pub realtime: bool,

    // === Fighters ===
    /// Tuning table for P1 (built-in table when unset)
    pub p1_tuning: Option<PathBuf>,
    /// Tuning table for P2 (built-in table when unset)
    pub p2_tuning: Option<PathBuf>,

    // === Replays ===
    /// Where to write the replay of this match
    pub replay_out: Option<PathBuf>,
    /// Replay to verify instead of running a match
    pub verify_replay: Option<PathBuf>,
    /// Ticks between recorded state hashes
    pub hash_interval: u64,

    // === Logging ===
    /// Emit logs as JSON lines
    pub json_logs: bool,

    // === Arena ===
    /// Arena tunables
    pub arena: ArenaConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            rounds_to_win: 2,
            max_round_ticks: 60 * 99,
            realtime: false,

            p1_tuning: None,
            p2_tuning: None,

            replay_out: None,
            verify_replay: None,
            hash_interval: 60,

            json_logs: false,

            arena: ArenaConfig::default(),
        }
    }
}

impl SimConfig {
    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        match fs::File::open(path) {
            Ok(mut file) => {
                let mut contents = String::new();
                if let Err(e) = file.read_to_string(&mut contents) {
                    warn!("Failed to read config file: {e}");
                    return Self::default();
                }

                match toml::from_str(&contents) {
                    Ok(config) => {
                        info!("Loaded config from {}", path.display());
                        config
                    },
                    Err(e) => {
                        warn!("Failed to parse config file: {e}");
                        Self::default()
                    },
                }
            },
            Err(e) => {
                warn!("Failed to open config file: {e}");
                Self::default()
            },
        }
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut file = fs::File::create(path)?;
        file.write_all(contents.as_bytes())?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Clamp values to sensible ranges.
    pub fn validate(&mut self) {
        self.rounds_to_win = self.rounds_to_win.clamp(1, 9);
        self.max_round_ticks = self.max_round_ticks.clamp(60, 60 * 60 * 10);
        self.hash_interval = self.hash_interval.clamp(1, 600);

        if let Err(e) = self.arena.validate() {
            warn!("Invalid arena settings, using defaults: {e}");
            self.arena = ArenaConfig::default();
        }
    }

    /// Tuning table for a slot: the configured file, or the built-in table.
    pub fn tuning(&self, slot: PlayerSlot) -> ScuffleResult<FighterTuning> {
        let path = match slot {
            PlayerSlot::P1 => &self.p1_tuning,
            PlayerSlot::P2 => &self.p2_tuning,
        };
        match path {
            Some(path) => FighterTuning::load(path),
            None => Ok(FighterTuning::default()),
        }
    }
}
