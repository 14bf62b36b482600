//! Rules configuration.
//!
//! Every tunable number of the game lives in one immutable `RulesConfig`
//! handed to the game at creation. Tests can lower the opening threshold or
//! shrink hands without touching shared state.

use serde::{Deserialize, Serialize};

use super::tile::Suit;
use crate::error::SetupError;
use crate::rules::Validator;

/// Complete rules configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Minimum meld value of a player's opening turn.
    pub opening_threshold: u32,

    /// Tiles dealt to each player at the start.
    pub hand_size: usize,

    /// Fewest players allowed (inclusive).
    pub min_players: usize,

    /// Most players allowed (inclusive).
    pub max_players: usize,

    /// Points a wild left in hand costs at scoring.
    pub wild_penalty: u32,

    /// Smallest legal group or run.
    pub min_set_size: usize,

    /// Largest legal group.
    pub max_group_size: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            opening_threshold: 30,
            hand_size: 14,
            min_players: 2,
            max_players: 4,
            wild_penalty: 30,
            min_set_size: 3,
            max_group_size: 4,
        }
    }
}

impl RulesConfig {
    /// Standard rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the opening meld threshold.
    #[must_use]
    pub fn with_opening_threshold(mut self, threshold: u32) -> Self {
        self.opening_threshold = threshold;
        self
    }

    /// Set the number of tiles dealt to each player.
    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    /// Set the scoring penalty of a wild left in hand.
    #[must_use]
    pub fn with_wild_penalty(mut self, penalty: u32) -> Self {
        self.wild_penalty = penalty;
        self
    }

    /// Set the allowed player count range.
    #[must_use]
    pub fn with_player_range(mut self, min: usize, max: usize) -> Self {
        self.min_players = min;
        self.max_players = max;
        self
    }

    /// Reject combinations the engine cannot play with.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.min_players == 0 || self.min_players > self.max_players {
            return Err(SetupError::InvalidConfig("player range is empty"));
        }
        if self.max_players > 255 {
            return Err(SetupError::InvalidConfig("at most 255 players supported"));
        }
        if self.min_set_size == 0 {
            return Err(SetupError::InvalidConfig("sets need at least one tile"));
        }
        if self.max_group_size < self.min_set_size || self.max_group_size > Suit::ALL.len() {
            return Err(SetupError::InvalidConfig(
                "group size must lie between the minimum set size and the suit count",
            ));
        }
        if self.hand_size == 0 {
            return Err(SetupError::InvalidHandSize);
        }
        Ok(())
    }

    /// The set validator these rules imply.
    #[must_use]
    pub fn validator(&self) -> Validator {
        Validator::from(self)
    }
}
