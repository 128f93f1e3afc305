//! Replay recording and determinism verification.
//!
//! A replay holds everything needed to re-run a match without the AI:
//! - Arena settings and both tuning tables
//! - Per-tick inputs for both slots, split by round
//! - Sparse state hashes for verification
//!
//! On disk it is the replay magic, the schema version, then a length-prefixed
//! JSON payload.

use scuffle_combat::{ArenaConfig, FightManager, FighterTuning, InputInfo, RoundResult};
use scuffle_common::{MagicBytes, SchemaVersion, TuningError};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use thiserror::Error;
use tracing::{debug, info};

/// Error types for replay operations.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// IO error during read/write
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON payload could not be written or read
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Not a replay file
    #[error("invalid replay format: {0}")]
    InvalidFormat(String),
    /// Recorded arena or tuning would not pass validation
    #[error("invalid replay settings: {0}")]
    Tuning(#[from] TuningError),
    /// Written by an incompatible build
    #[error("unsupported replay version {found}, this build reads {supported}")]
    UnsupportedVersion {
        /// Version in the file
        found: SchemaVersion,
        /// Version this build writes
        supported: SchemaVersion,
    },
    /// Re-simulation did not match the recording
    #[error(
        "determinism failure in round {round} at tick {tick}: expected {expected:#x}, got {actual:#x}"
    )]
    Diverged {
        /// Round index, from zero
        round: usize,
        /// Tick within the round
        tick: u64,
        /// Recorded hash
        expected: u64,
        /// Re-simulated hash
        actual: u64,
    },
    /// Re-simulation ended with a different result
    #[error("round {round} ended {actual:?}, recorded {expected:?}")]
    ResultMismatch {
        /// Round index, from zero
        round: usize,
        /// Recorded result
        expected: Option<RoundResult>,
        /// Re-simulated result
        actual: Option<RoundResult>,
    },
}

/// A state hash captured after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateHash {
    /// Tick within the round
    pub tick: u64,
    /// `FightManager::state_hash` after that tick
    pub hash: u64,
}

/// Inputs and hashes of one round.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Inputs fed to the fight, one entry per tick
    pub inputs: Vec<[InputInfo; 2]>,
    /// Sparse hashes, plus the final tick
    pub hashes: Vec<StateHash>,
    /// Health-based result, if the round was decided in play
    pub result: Option<RoundResult>,
}

impl RoundRecord {
    /// Ticks in the round.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.inputs.len() as u64
    }
}

/// A complete match recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Replay {
    /// Format version
    pub version: SchemaVersion,
    /// AI seed the match was played with
    pub seed: u64,
    /// Ticks between hashes
    pub hash_interval: u64,
    /// Arena settings
    pub arena: ArenaConfig,
    /// Tuning for P1 and P2
    pub tunings: [FighterTuning; 2],
    /// Rounds in play order
    pub rounds: Vec<RoundRecord>,
}

impl Replay {
    /// Creates an empty recording.
    #[must_use]
    pub fn new(seed: u64, hash_interval: u64, arena: ArenaConfig, tunings: [FighterTuning; 2]) -> Self {
        Self {
            version: SchemaVersion::REPLAY,
            seed,
            hash_interval: hash_interval.max(1),
            arena,
            tunings,
            rounds: Vec::new(),
        }
    }

    /// Opens a new round for recording.
    pub fn begin_round(&mut self) {
        self.rounds.push(RoundRecord::default());
    }

    /// Records one tick. Call after `fight.tick(inputs)`.
    pub fn record(&mut self, inputs: [InputInfo; 2], fight: &FightManager) {
        let interval = self.hash_interval;
        let Some(round) = self.rounds.last_mut() else {
            return;
        };

        round.inputs.push(inputs);
        let tick = round.tick_count();
        if tick % interval == 0 {
            round.hashes.push(StateHash {
                tick,
                hash: fight.state_hash(),
            });
        }
    }

    /// Closes the current round with its final hash and result.
    pub fn end_round(&mut self, fight: &FightManager) {
        let Some(round) = self.rounds.last_mut() else {
            return;
        };

        let tick = round.tick_count();
        if round.hashes.last().map_or(true, |h| h.tick != tick) {
            round.hashes.push(StateHash {
                tick,
                hash: fight.state_hash(),
            });
        }
        round.result = fight.result();
    }

    /// Total ticks across all rounds.
    #[must_use]
    pub fn total_ticks(&self) -> u64 {
        self.rounds.iter().map(RoundRecord::tick_count).sum()
    }

    /// Checks the recorded arena and both tuning tables.
    pub fn validate(&self) -> Result<(), ReplayError> {
        self.arena.validate()?;
        for tuning in &self.tunings {
            tuning.validate()?;
        }
        Ok(())
    }

    /// Re-simulates every round from the recorded inputs.
    ///
    /// Returns the first divergence found.
    pub fn verify(&self) -> Result<(), ReplayError> {
        self.validate()?;
        let [p1, p2] = self.tunings.clone();
        let mut fight = FightManager::new(self.arena, p1, p2);

        for (index, round) in self.rounds.iter().enumerate() {
            fight.reset_game();
            fight.start_fight();

            let mut expected = round.hashes.iter().peekable();
            for (i, inputs) in round.inputs.iter().enumerate() {
                fight.tick(*inputs);
                let tick = i as u64 + 1;

                if let Some(recorded) = expected.next_if(|h| h.tick == tick) {
                    let actual = fight.state_hash();
                    if actual != recorded.hash {
                        return Err(ReplayError::Diverged {
                            round: index,
                            tick,
                            expected: recorded.hash,
                            actual,
                        });
                    }
                }
            }

            if fight.result() != round.result {
                return Err(ReplayError::ResultMismatch {
                    round: index,
                    expected: round.result,
                    actual: fight.result(),
                });
            }
            debug!(round = index, ticks = round.tick_count(), "round verified");
        }

        info!(
            rounds = self.rounds.len(),
            ticks = self.total_ticks(),
            "Replay verified"
        );
        Ok(())
    }

    /// Writes magic, version and the JSON payload.
    pub fn save<W: Write>(&self, mut writer: W) -> Result<(), ReplayError> {
        writer.write_all(&MagicBytes::REPLAY.0)?;
        for part in [self.version.major, self.version.minor, self.version.patch] {
            writer.write_all(&part.to_le_bytes())?;
        }

        let json = serde_json::to_vec(self)?;
        writer.write_all(&(json.len() as u64).to_le_bytes())?;
        writer.write_all(&json)?;
        Ok(())
    }

    /// Reads a replay written by [`Self::save`].
    pub fn load<R: Read>(mut reader: R) -> Result<Self, ReplayError> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if MagicBytes(magic) != MagicBytes::REPLAY {
            return Err(ReplayError::InvalidFormat("invalid magic bytes".into()));
        }

        let mut parts = [0u16; 3];
        for part in &mut parts {
            let mut bytes = [0u8; 2];
            reader.read_exact(&mut bytes)?;
            *part = u16::from_le_bytes(bytes);
        }
        let found = SchemaVersion::new(parts[0], parts[1], parts[2]);
        if !SchemaVersion::REPLAY.can_read(&found) {
            return Err(ReplayError::UnsupportedVersion {
                found,
                supported: SchemaVersion::REPLAY,
            });
        }

        let mut len_bytes = [0u8; 8];
        reader.read_exact(&mut len_bytes)?;
        let len = u64::from_le_bytes(len_bytes);

        // untrusted length: buffer grows with the bytes actually read
        let mut json = Vec::new();
        reader.take(len).read_to_end(&mut json)?;
        if json.len() as u64 != len {
            return Err(ReplayError::InvalidFormat(format!(
                "payload truncated: expected {len} bytes, found {}",
                json.len()
            )));
        }

        let replay: Self = serde_json::from_slice(&json)?;
        replay.validate()?;
        Ok(replay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scuffle_combat::FightAi;
    use scuffle_common::PlayerSlot;
    use std::fs::File;
    use tempfile::TempDir;

    fn recorded(ticks: usize) -> Replay {
        let tunings = [FighterTuning::default(), FighterTuning::default()];
        let mut replay = Replay::new(4, 30, ArenaConfig::default(), tunings.clone());
        let [p1, p2] = tunings;
        let mut fight = FightManager::new(ArenaConfig::default(), p1, p2);
        let mut ais = [FightAi::new(PlayerSlot::P1, 4), FightAi::new(PlayerSlot::P2, 5)];

        fight.reset_game();
        fight.start_fight();
        replay.begin_round();
        for _ in 0..ticks {
            let inputs = [ais[0].decide(&fight), ais[1].decide(&fight)];
            fight.tick(inputs);
            replay.record(inputs, &fight);
        }
        replay.end_round(&fight);
        replay
    }

    #[test]
    fn test_hashes_are_sparse() {
        let replay = recorded(100);
        let ticks: Vec<u64> = replay.rounds[0].hashes.iter().map(|h| h.tick).collect();

        assert_eq!(ticks, vec![30, 60, 90, 100]);
        assert_eq!(replay.total_ticks(), 100);
    }

    #[test]
    fn test_recording_verifies() {
        let replay = recorded(400);
        assert!(replay.verify().is_ok());
    }

    #[test]
    fn test_tampered_input_diverges() {
        let mut replay = recorded(400);
        for inputs in &mut replay.rounds[0].inputs[10..] {
            inputs[0] = InputInfo::with_dir(-1.0, 0.0);
        }

        match replay.verify() {
            Err(ReplayError::Diverged { round, tick, .. }) => {
                assert_eq!(round, 0);
                assert_eq!(tick, 30, "first hash after the change");
            },
            Err(ReplayError::ResultMismatch { .. }) => {},
            other => panic!("expected divergence, got {other:?}"),
        }
    }

    #[test]
    fn test_save_load_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("match.replay");
        let replay = recorded(120);

        replay
            .save(File::create(&path).expect("create"))
            .expect("Failed to save replay");
        let loaded = Replay::load(File::open(&path).expect("open")).expect("Failed to load replay");

        assert_eq!(loaded.rounds, replay.rounds);
        assert_eq!(loaded.seed, 4);
        assert!(loaded.verify().is_ok());
    }

    #[test]
    fn test_bad_magic_rejected() {
        let data = b"NOPE\x01\x00\x00\x00\x00\x00".to_vec();
        assert!(matches!(
            Replay::load(data.as_slice()),
            Err(ReplayError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_oversized_length_prefix_rejected() {
        let mut data = MagicBytes::REPLAY.0.to_vec();
        for part in [1u16, 0, 0] {
            data.extend_from_slice(&part.to_le_bytes());
        }
        data.extend_from_slice(&(u64::MAX / 2).to_le_bytes());
        data.extend_from_slice(b"{}");

        assert!(matches!(
            Replay::load(data.as_slice()),
            Err(ReplayError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_invalid_recorded_tuning_rejected() {
        let mut replay = recorded(30);
        replay.tunings[1].dash.after_image_interval = 0;

        let mut data = Vec::new();
        replay.save(&mut data).expect("Failed to save replay");

        assert!(matches!(
            Replay::load(data.as_slice()),
            Err(ReplayError::Tuning(_))
        ));
        assert!(matches!(replay.verify(), Err(ReplayError::Tuning(_))));
    }

    #[test]
    fn test_invalid_recorded_arena_rejected() {
        let mut replay = recorded(30);
        replay.arena.half_width = -1.0;
        assert!(matches!(replay.verify(), Err(ReplayError::Tuning(_))));
    }

    #[test]
    fn test_future_major_rejected() {
        let mut data = MagicBytes::REPLAY.0.to_vec();
        data.extend_from_slice(&2u16.to_le_bytes());
        data.extend_from_slice(&[0; 4]);

        assert!(matches!(
            Replay::load(data.as_slice()),
            Err(ReplayError::UnsupportedVersion { .. })
        ));
    }
}
