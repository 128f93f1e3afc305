//! Round counter for a best-of-N match.

use crate::types::RoundResult;
use scuffle_common::PlayerSlot;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Round wins per slot for one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matchup {
    rounds_to_win: u32,
    wins: [u32; 2],
    draws: u32,
}

impl Matchup {
    /// Creates a match decided at `rounds_to_win` wins (at least one).
    #[must_use]
    pub fn new(rounds_to_win: u32) -> Self {
        Self {
            rounds_to_win: rounds_to_win.max(1),
            wins: [0; 2],
            draws: 0,
        }
    }

    /// Records a finished round. Rounds after the match is decided are ignored.
    pub fn record(&mut self, result: RoundResult) {
        if self.winner().is_some() {
            return;
        }

        match result.winner() {
            Some(slot) => {
                self.wins[slot.index()] += 1;
                info!(
                    winner = %slot,
                    p1 = self.wins[0],
                    p2 = self.wins[1],
                    "Round won"
                );
            },
            None => {
                self.draws += 1;
                info!("Round drawn");
            },
        }
    }

    /// Slot that reached the required wins.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerSlot> {
        PlayerSlot::ALL
            .into_iter()
            .find(|slot| self.wins[slot.index()] >= self.rounds_to_win)
    }

    /// True once a slot has won.
    #[must_use]
    pub fn is_decided(&self) -> bool {
        self.winner().is_some()
    }

    /// Wins for a slot.
    #[must_use]
    pub fn wins(&self, slot: PlayerSlot) -> u32 {
        self.wins[slot.index()]
    }

    /// Drawn rounds so far.
    #[must_use]
    pub fn draws(&self) -> u32 {
        self.draws
    }

    /// Rounds played so far, draws included.
    #[must_use]
    pub fn rounds_played(&self) -> u32 {
        self.wins[0] + self.wins[1] + self.draws
    }

    /// Wins needed to take the match.
    #[must_use]
    pub fn rounds_to_win(&self) -> u32 {
        self.rounds_to_win
    }

    /// Clears every count.
    pub fn reset(&mut self) {
        self.wins = [0; 2];
        self.draws = 0;
    }
}

impl Default for Matchup {
    fn default() -> Self {
        Self::new(2)
    }
}
