//! Players, player identification and per-player storage.
//!
//! ## PlayerId
//!
//! Type-safe seat index. The first player is `PlayerId(0)`.
//!
//! ## PlayerMap
//!
//! One entry per seat, backed by a `Vec` for O(1) access by `PlayerId`.
//!
//! ## Player
//!
//! A name, a private hand, and the monotonic "has opened" flag.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::tile::{first_missing, tile_counts, Tile};
use crate::error::GameError;

/// Player identifier.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat after this one, wrapping around.
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count) as u8)
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use rummikub_engine::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[0], PlayerId::new(0));
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use rummikub_engine::core::{PlayerId, PlayerMap};
///
/// let mut scores: PlayerMap<u32> = PlayerMap::with_value(3, 0);
/// scores[PlayerId::new(1)] = 42;
/// assert_eq!(scores[PlayerId::new(1)], 42);
/// assert_eq!(scores.player_count(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    ///
    /// The factory receives the `PlayerId` for each player.
    pub fn new(player_count: usize, factory: impl FnMut(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8).map(PlayerId).map(factory).collect();

        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a player's data, `None` for an unknown seat.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Get a mutable reference to a player's data, `None` for an unknown seat.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over the stored values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.data.len() as u8).map(PlayerId)
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

/// Sort order for displaying a hand. Wilds always sort last.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandOrder {
    /// Suit, then rank. Runs read left to right.
    #[default]
    BySuit,
    /// Rank, then suit. Groups sit together.
    ByRank,
}

/// A seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    hand: Vec<Tile>,
    has_opened: bool,
}

impl Player {
    /// Create a player with an empty hand who has not opened.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            hand: Vec::new(),
            has_opened: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The tiles in hand, in their current display order.
    #[must_use]
    pub fn hand(&self) -> &[Tile] {
        &self.hand
    }

    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.hand.len()
    }

    /// Whether the player has completed a qualifying opening meld.
    #[must_use]
    pub fn has_opened(&self) -> bool {
        self.has_opened
    }

    /// Record the opening meld. There is no way back.
    pub(crate) fn mark_opened(&mut self) {
        self.has_opened = true;
    }

    /// Add a tile. Anything may be added (drawn tiles, reclaimed wilds).
    pub fn add_tile(&mut self, tile: Tile) {
        self.hand.push(tile);
    }

    /// Add several tiles.
    pub fn add_tiles(&mut self, tiles: impl IntoIterator<Item = Tile>) {
        self.hand.extend(tiles);
    }

    /// Check multiset containment without changing the hand.
    #[must_use]
    pub fn has_tiles(&self, tiles: &[Tile]) -> bool {
        first_missing(&self.hand, tiles).is_none()
    }

    /// Remove each of `tiles` once.
    ///
    /// All or nothing: if any tile is missing in the required multiplicity
    /// the hand is left untouched.
    pub fn remove_tiles(&mut self, tiles: &[Tile]) -> Result<(), GameError> {
        if let Some(tile) = first_missing(&self.hand, tiles) {
            return Err(GameError::TileNotInHand { tile });
        }

        let mut to_remove = tile_counts(tiles);
        self.hand.retain(|tile| match to_remove.get_mut(tile) {
            Some(count) if *count > 0 => {
                *count -= 1;
                false
            }
            _ => true,
        });
        Ok(())
    }

    /// Penalty value of the hand: face value of numbered tiles plus
    /// `wild_penalty` for each wild.
    #[must_use]
    pub fn hand_value(&self, wild_penalty: u32) -> u32 {
        self.hand
            .iter()
            .map(|tile| match tile {
                Tile::Numbered { rank, .. } => u32::from(*rank),
                Tile::Wild => wild_penalty,
            })
            .sum()
    }

    /// Reorder the hand for display.
    pub fn sort_hand(&mut self, order: HandOrder) {
        match order {
            HandOrder::ByRank => self.hand.sort(),
            HandOrder::BySuit => self.hand.sort_by_key(|tile| match tile {
                Tile::Numbered { rank, suit } => (0, Some(*suit), *rank),
                Tile::Wild => (1, None, 0),
            }),
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} tiles)", self.name, self.hand.len())
    }
}
