//! Per-player projection of the game state.
//!
//! The presentation layer renders from a `VisibleState`, which carries the
//! viewer's own hand and only the tile counts of everyone else's.

use serde::{Deserialize, Serialize};

use super::state::{GameState, Outcome, Phase};
use crate::core::{PlayerId, Table, Tile};

/// What an opponent's seat shows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentView {
    pub id: PlayerId,
    pub name: String,
    pub tile_count: usize,
    pub has_opened: bool,
}

/// Everything one player may see.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleState {
    pub viewer: PlayerId,
    pub table: Table,
    pub own_hand: Vec<Tile>,
    pub has_opened: bool,
    pub opponents: Vec<OpponentView>,
    pub phase: Phase,
    pub current_player: PlayerId,
    pub deck_remaining: usize,
    pub turn_number: u32,
    pub outcome: Option<Outcome>,
}

impl VisibleState {
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.outcome.map(|o| o.winner)
    }

    #[must_use]
    pub fn is_my_turn(&self) -> bool {
        self.phase == Phase::InProgress && self.current_player == self.viewer
    }
}

impl GameState {
    /// The state as `viewer` sees it. `None` for an unknown seat.
    #[must_use]
    pub fn visible_state(&self, viewer: PlayerId) -> Option<VisibleState> {
        let me = self.player(viewer)?;
        let opponents = self
            .players()
            .filter(|p| p.id() != viewer)
            .map(|p| OpponentView {
                id: p.id(),
                name: p.name().to_string(),
                tile_count: p.tile_count(),
                has_opened: p.has_opened(),
            })
            .collect();

        Some(VisibleState {
            viewer,
            table: self.table().clone(),
            own_hand: me.hand().to_vec(),
            has_opened: me.has_opened(),
            opponents,
            phase: self.phase(),
            current_player: self.current_player_id(),
            deck_remaining: self.deck_remaining(),
            turn_number: self.turn_number(),
            outcome: self.outcome(),
        })
    }
}
