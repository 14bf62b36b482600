//! Moves: what a player asks the engine to do.
//!
//! A `Move` pairs the acting player with a `MoveKind`. Moves are transient:
//! the presentation layer builds one, the game validates and applies it, and
//! an applied move is kept only as a `MoveRecord` in the history.
//!
//! ```
//! use rummikub_engine::core::{Move, MoveType, PlayerId, Suit, Tile};
//!
//! let play = Move::play_set(
//!     PlayerId::new(0),
//!     vec![Tile::new(10, Suit::Red), Tile::new(10, Suit::Blue), Tile::new(10, Suit::Black)],
//! );
//! assert_eq!(play.move_type(), MoveType::PlaySets);
//! assert_eq!(play.hand_tiles().len(), 3);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use super::tile::Tile;

/// What a move does.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// Take one tile from the pile. Ends the turn.
    Draw,

    /// Meld one or more new sets from the hand.
    PlaySets { sets: Vec<Vec<Tile>> },

    /// Add hand tiles to an existing table set.
    /// Usually one or two tiles, so they live inline.
    AddToSet {
        set_index: usize,
        tiles: SmallVec<[Tile; 4]>,
    },

    /// Replace the whole table layout, adding `tiles` from the hand.
    Rearrange {
        tiles: Vec<Tile>,
        table: Vec<Vec<Tile>>,
    },

    /// Put `replacement` in place of a wild in a table set; the wild goes to
    /// the hand.
    ReclaimWild { set_index: usize, replacement: Tile },

    /// Put `replacement` in place of a wild in a table set and meld the wild
    /// straight away in a new set together with the hand tiles `with`.
    SwapWild {
        set_index: usize,
        replacement: Tile,
        with: Vec<Tile>,
    },

    /// Finish the turn.
    EndTurn,
}

/// Fieldless tag of a `MoveKind`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveType {
    Draw,
    PlaySets,
    AddToSet,
    Rearrange,
    ReclaimWild,
    SwapWild,
    EndTurn,
}

impl MoveType {
    /// Move types that place hand tiles on the table.
    #[must_use]
    pub const fn places_tiles(self) -> bool {
        matches!(
            self,
            MoveType::PlaySets
                | MoveType::AddToSet
                | MoveType::Rearrange
                | MoveType::ReclaimWild
                | MoveType::SwapWild
        )
    }
}

impl std::fmt::Display for MoveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MoveType::Draw => "draw",
            MoveType::PlaySets => "play sets",
            MoveType::AddToSet => "add to set",
            MoveType::Rearrange => "rearrange table",
            MoveType::ReclaimWild => "reclaim wild",
            MoveType::SwapWild => "swap wild",
            MoveType::EndTurn => "end turn",
        };
        f.write_str(name)
    }
}

impl MoveKind {
    #[must_use]
    pub fn move_type(&self) -> MoveType {
        match self {
            MoveKind::Draw => MoveType::Draw,
            MoveKind::PlaySets { .. } => MoveType::PlaySets,
            MoveKind::AddToSet { .. } => MoveType::AddToSet,
            MoveKind::Rearrange { .. } => MoveType::Rearrange,
            MoveKind::ReclaimWild { .. } => MoveType::ReclaimWild,
            MoveKind::SwapWild { .. } => MoveType::SwapWild,
            MoveKind::EndTurn => MoveType::EndTurn,
        }
    }

    /// Every tile the move takes out of the acting player's hand.
    #[must_use]
    pub fn hand_tiles(&self) -> Vec<Tile> {
        match self {
            MoveKind::Draw | MoveKind::EndTurn => Vec::new(),
            MoveKind::PlaySets { sets } => sets.iter().flatten().copied().collect(),
            MoveKind::AddToSet { tiles, .. } => tiles.to_vec(),
            MoveKind::Rearrange { tiles, .. } => tiles.clone(),
            MoveKind::ReclaimWild { replacement, .. } => vec![*replacement],
            MoveKind::SwapWild {
                replacement, with, ..
            } => std::iter::once(*replacement).chain(with.iter().copied()).collect(),
        }
    }
}

/// A request from one player.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The acting player.
    pub player: PlayerId,

    /// What the player wants to do.
    pub kind: MoveKind,
}

impl Move {
    #[must_use]
    pub fn new(player: PlayerId, kind: MoveKind) -> Self {
        Self { player, kind }
    }

    #[must_use]
    pub fn draw(player: PlayerId) -> Self {
        Self::new(player, MoveKind::Draw)
    }

    #[must_use]
    pub fn end_turn(player: PlayerId) -> Self {
        Self::new(player, MoveKind::EndTurn)
    }

    /// Meld a single new set.
    #[must_use]
    pub fn play_set(player: PlayerId, tiles: Vec<Tile>) -> Self {
        Self::play_sets(player, vec![tiles])
    }

    /// Meld several new sets at once.
    #[must_use]
    pub fn play_sets(player: PlayerId, sets: Vec<Vec<Tile>>) -> Self {
        Self::new(player, MoveKind::PlaySets { sets })
    }

    #[must_use]
    pub fn add_to_set(player: PlayerId, set_index: usize, tiles: &[Tile]) -> Self {
        Self::new(
            player,
            MoveKind::AddToSet {
                set_index,
                tiles: SmallVec::from_slice(tiles),
            },
        )
    }

    #[must_use]
    pub fn rearrange(player: PlayerId, tiles: Vec<Tile>, table: Vec<Vec<Tile>>) -> Self {
        Self::new(player, MoveKind::Rearrange { tiles, table })
    }

    #[must_use]
    pub fn reclaim_wild(player: PlayerId, set_index: usize, replacement: Tile) -> Self {
        Self::new(
            player,
            MoveKind::ReclaimWild {
                set_index,
                replacement,
            },
        )
    }

    #[must_use]
    pub fn swap_wild(player: PlayerId, set_index: usize, replacement: Tile, with: Vec<Tile>) -> Self {
        Self::new(
            player,
            MoveKind::SwapWild {
                set_index,
                replacement,
                with,
            },
        )
    }

    #[must_use]
    pub fn move_type(&self) -> MoveType {
        self.kind.move_type()
    }

    /// Every tile the move takes out of the acting player's hand.
    #[must_use]
    pub fn hand_tiles(&self) -> Vec<Tile> {
        self.kind.hand_tiles()
    }
}

/// An applied move with its place in the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The player who moved.
    pub player: PlayerId,

    /// What they did.
    pub kind: MoveKind,

    /// Turn number when the move was applied.
    pub turn: u32,

    /// Sequence number within the turn.
    pub sequence: u32,
}

impl MoveRecord {
    #[must_use]
    pub fn new(mv: Move, turn: u32, sequence: u32) -> Self {
        Self {
            player: mv.player,
            kind: mv.kind,
            turn,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Suit;

    #[test]
    fn test_hand_tiles() {
        let p = PlayerId::new(1);
        let red = |r| Tile::new(r, Suit::Red);

        assert!(Move::draw(p).hand_tiles().is_empty());
        assert!(Move::end_turn(p).hand_tiles().is_empty());
        assert_eq!(
            Move::play_sets(p, vec![vec![red(1), red(2)], vec![red(3)]]).hand_tiles(),
            vec![red(1), red(2), red(3)]
        );
        assert_eq!(Move::add_to_set(p, 0, &[red(4)]).hand_tiles(), vec![red(4)]);
        assert_eq!(Move::reclaim_wild(p, 0, red(5)).hand_tiles(), vec![red(5)]);
        assert_eq!(
            Move::swap_wild(p, 0, red(5), vec![red(8), red(9)]).hand_tiles(),
            vec![red(5), red(8), red(9)]
        );
        assert_eq!(
            Move::rearrange(p, vec![red(6)], vec![]).hand_tiles(),
            vec![red(6)]
        );
    }

    #[test]
    fn test_move_types() {
        let p = PlayerId::new(0);
        assert_eq!(Move::draw(p).move_type(), MoveType::Draw);
        assert_eq!(Move::end_turn(p).move_type(), MoveType::EndTurn);
        assert!(MoveType::SwapWild.places_tiles());
        assert!(!MoveType::Draw.places_tiles());
        assert_eq!(MoveType::AddToSet.to_string(), "add to set");
    }

    #[test]
    fn test_record_and_serde() {
        let mv = Move::add_to_set(PlayerId::new(2), 3, &[Tile::Wild]);
        let record = MoveRecord::new(mv.clone(), 7, 1);
        assert_eq!(record.player, PlayerId::new(2));
        assert_eq!(record.kind, mv.kind);

        let json = serde_json::to_string(&mv).unwrap();
        let back: Move = serde_json::from_str(&json).unwrap();
        assert_eq!(mv, back);
    }
}
