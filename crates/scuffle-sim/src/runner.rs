//! AI-vs-AI match runner.

use crate::config::SimConfig;
use crate::replay::Replay;
use crate::timing::FixedStep;
use scuffle_combat::{FightAi, FightManager, FighterTuning, Matchup, RoundResult};
use scuffle_common::PlayerSlot;
use std::thread;
use std::time::Instant;
use tracing::{debug, info, warn};

/// How one round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSummary {
    /// Outcome
    pub result: RoundResult,
    /// Ticks played, freeze frames included
    pub ticks: u64,
    /// Called on health after the tick limit
    pub timed_out: bool,
    /// Health left for P1 and P2
    pub health: [i32; 2],
}

/// How the match ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSummary {
    /// Match winner, unless the round cap was hit first
    pub winner: Option<PlayerSlot>,
    /// Every round in play order
    pub rounds: Vec<RoundSummary>,
}

/// Plays a full match between two AI opponents.
pub struct MatchRunner {
    fight: FightManager,
    ais: [FightAi; 2],
    matchup: Matchup,
    replay: Option<Replay>,
    max_round_ticks: u64,
    max_rounds: usize,
    realtime: bool,
}

impl MatchRunner {
    /// Builds a runner. `record` keeps a replay of every tick.
    #[must_use]
    pub fn new(config: &SimConfig, tunings: [FighterTuning; 2], record: bool) -> Self {
        let replay = record.then(|| {
            Replay::new(config.seed, config.hash_interval, config.arena, tunings.clone())
        });
        let [p1, p2] = tunings;

        Self {
            fight: FightManager::new(config.arena, p1, p2),
            ais: [
                FightAi::new(PlayerSlot::P1, config.seed),
                FightAi::new(PlayerSlot::P2, config.seed.wrapping_add(1)),
            ],
            matchup: Matchup::new(config.rounds_to_win),
            replay,
            max_round_ticks: config.max_round_ticks.max(1),
            max_rounds: config.rounds_to_win.max(1) as usize * 4,
            realtime: config.realtime,
        }
    }

    /// Runs rounds until the match is decided.
    pub fn run(&mut self) -> MatchSummary {
        let mut rounds = Vec::new();

        while !self.matchup.is_decided() {
            if rounds.len() >= self.max_rounds {
                warn!(rounds = rounds.len(), "Round cap reached without a winner");
                break;
            }
            let summary = self.run_round(rounds.len());
            self.matchup.record(summary.result);
            rounds.push(summary);
        }

        MatchSummary {
            winner: self.matchup.winner(),
            rounds,
        }
    }

    /// Recorded replay, if recording.
    #[must_use]
    pub fn replay(&self) -> Option<&Replay> {
        self.replay.as_ref()
    }

    /// Round counter.
    #[must_use]
    pub fn matchup(&self) -> &Matchup {
        &self.matchup
    }

    fn run_round(&mut self, index: usize) -> RoundSummary {
        self.fight.reset_game();
        self.fight.start_fight();
        if let Some(replay) = &mut self.replay {
            replay.begin_round();
        }
        debug!(round = index, "round started");

        let mut ticks = 0;
        if self.realtime {
            let mut stepper = FixedStep::default();
            let mut last = Instant::now();
            'round: loop {
                let now = Instant::now();
                let due = stepper.advance(now - last, self.fight.time_scale());
                last = now;
                for _ in 0..due {
                    ticks += 1;
                    if self.step() || ticks >= self.max_round_ticks {
                        break 'round;
                    }
                }
                thread::sleep(stepper.step() / 4);
            }
        } else {
            loop {
                ticks += 1;
                if self.step() || ticks >= self.max_round_ticks {
                    break;
                }
            }
        }

        if let Some(replay) = &mut self.replay {
            replay.end_round(&self.fight);
        }

        let health = [
            self.fight.fighter(PlayerSlot::P1).health(),
            self.fight.fighter(PlayerSlot::P2).health(),
        ];
        let (result, timed_out) = match self.fight.result() {
            Some(result) => (result, false),
            None => (on_health(health), true),
        };

        info!(
            round = index + 1,
            ?result,
            ticks,
            timed_out,
            p1_health = health[0],
            p2_health = health[1],
            "Round finished"
        );

        RoundSummary {
            result,
            ticks,
            timed_out,
            health,
        }
    }

    /// Runs one tick. Returns true once the round is over and its slow
    /// motion has played out.
    fn step(&mut self) -> bool {
        let inputs = [
            self.ais[0].decide(&self.fight),
            self.ais[1].decide(&self.fight),
        ];
        self.fight.tick(inputs);
        if let Some(replay) = &mut self.replay {
            replay.record(inputs, &self.fight);
        }

        self.fight.is_resolved()
            && self.fight.freeze_frames() == 0
            && self.fight.time_scale() >= 1.0
    }
}

/// Result of a round stopped before a knockout.
fn on_health(health: [i32; 2]) -> RoundResult {
    match health[0].cmp(&health[1]) {
        std::cmp::Ordering::Greater => RoundResult::P1Win,
        std::cmp::Ordering::Less => RoundResult::P2Win,
        std::cmp::Ordering::Equal => RoundResult::Draw,
    }
}
