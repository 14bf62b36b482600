//! The draw pile.
//!
//! A standard set holds two copies of every rank in every suit plus two
//! wilds: 106 tiles. The pile only shrinks during a game; nothing is ever
//! discarded back into it.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::rng::GameRng;
use super::tile::{Suit, Tile, MAX_RANK, MIN_RANK};
use crate::error::{GameError, SetupError};

/// Copies of each numbered tile in a standard set.
pub const COPIES_PER_TILE: usize = 2;

/// Wild tiles in a standard set.
pub const WILD_COUNT: usize = 2;

/// Size of a standard set.
pub const STANDARD_DECK_SIZE: usize = 106;

/// Ordered pile of undealt tiles. Draws come off the end.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    tiles: Vec<Tile>,
}

impl Deck {
    /// The full 106-tile set, unshuffled.
    #[must_use]
    pub fn standard() -> Self {
        let mut tiles = Vec::with_capacity(STANDARD_DECK_SIZE);
        push_numbered(&mut tiles, COPIES_PER_TILE);
        tiles.extend(std::iter::repeat(Tile::Wild).take(WILD_COUNT));
        Self { tiles }
    }

    /// Build a set with the given composition.
    ///
    /// Fails unless the composition yields exactly a standard set's tile
    /// count.
    pub fn with_composition(copies_per_tile: usize, wild_count: usize) -> Result<Self, SetupError> {
        let numbered = Suit::ALL.len() * usize::from(MAX_RANK - MIN_RANK + 1);
        let actual = numbered * copies_per_tile + wild_count;
        if actual != STANDARD_DECK_SIZE {
            return Err(SetupError::DeckComposition {
                expected: STANDARD_DECK_SIZE,
                actual,
            });
        }

        let mut tiles = Vec::with_capacity(actual);
        push_numbered(&mut tiles, copies_per_tile);
        tiles.extend(std::iter::repeat(Tile::Wild).take(wild_count));
        Ok(Self { tiles })
    }

    /// A pile holding exactly `tiles`, last element drawn first.
    #[must_use]
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    /// Tiles left, bottom first.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Shuffle the remaining tiles in place.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.tiles);
    }

    /// Remove and return `count` tiles from the top.
    ///
    /// Never returns a partial draw: if fewer than `count` remain the pile is
    /// untouched and `EmptyDeck` is returned.
    pub fn draw(&mut self, count: usize) -> Result<Vec<Tile>, GameError> {
        if count > self.tiles.len() {
            return Err(GameError::EmptyDeck {
                requested: count,
                remaining: self.tiles.len(),
            });
        }
        let split = self.tiles.len() - count;
        let mut drawn = self.tiles.split_off(split);
        drawn.reverse();
        Ok(drawn)
    }

    /// Remove and return the top tile.
    pub fn draw_one(&mut self) -> Result<Tile, GameError> {
        self.tiles.pop().ok_or(GameError::EmptyDeck {
            requested: 1,
            remaining: 0,
        })
    }

    /// Put tiles back on top of the pile.
    pub fn return_tiles(&mut self, tiles: impl IntoIterator<Item = Tile>) {
        self.tiles.extend(tiles);
    }

    /// Count of remaining tiles per suit, plus the number of wilds.
    #[must_use]
    pub fn suit_counts(&self) -> (FxHashMap<Suit, usize>, usize) {
        let mut counts: FxHashMap<Suit, usize> = Suit::ALL.iter().map(|&s| (s, 0)).collect();
        let mut wilds = 0;
        for tile in &self.tiles {
            match tile.suit() {
                Some(suit) => *counts.entry(suit).or_insert(0) += 1,
                None => wilds += 1,
            }
        }
        (counts, wilds)
    }
}

fn push_numbered(tiles: &mut Vec<Tile>, copies: usize) {
    for suit in Suit::ALL {
        for rank in MIN_RANK..=MAX_RANK {
            for _ in 0..copies {
                tiles.push(Tile::Numbered { rank, suit });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tile::tile_counts;

    #[test]
    fn test_standard_contents() {
        let deck = Deck::standard();
        assert_eq!(deck.len(), STANDARD_DECK_SIZE);

        let counts = tile_counts(deck.tiles());
        assert_eq!(counts[&Tile::Wild], 2);
        for suit in Suit::ALL {
            for rank in MIN_RANK..=MAX_RANK {
                assert_eq!(counts[&Tile::new(rank, suit)], 2);
            }
        }

        let (per_suit, wilds) = deck.suit_counts();
        assert_eq!(wilds, 2);
        assert!(per_suit.values().all(|&n| n == 26));
    }

    #[test]
    fn test_with_composition() {
        assert_eq!(Deck::with_composition(2, 2).unwrap(), Deck::standard());
        assert_eq!(
            Deck::with_composition(1, 2),
            Err(SetupError::DeckComposition { expected: 106, actual: 54 })
        );
        assert!(Deck::with_composition(2, 3).is_err());
    }

    #[test]
    fn test_draw_from_top() {
        let a = Tile::new(1, Suit::Red);
        let b = Tile::new(2, Suit::Red);
        let c = Tile::new(3, Suit::Red);
        let mut deck = Deck::from_tiles(vec![a, b, c]);

        assert_eq!(deck.draw_one(), Ok(c));
        assert_eq!(deck.draw(2), Ok(vec![b, a]));
        assert!(deck.is_empty());
        assert_eq!(deck.draw_one(), Err(GameError::EmptyDeck { requested: 1, remaining: 0 }));
    }

    #[test]
    fn test_draw_too_many_is_untouched() {
        let mut deck = Deck::from_tiles(vec![Tile::Wild, Tile::new(4, Suit::Blue)]);
        let before = deck.clone();

        assert_eq!(deck.draw(3), Err(GameError::EmptyDeck { requested: 3, remaining: 2 }));
        assert_eq!(deck, before);
        assert_eq!(deck.draw(0), Ok(vec![]));
    }

    #[test]
    fn test_draw_and_return() {
        let mut deck = Deck::standard();
        let drawn = deck.draw(14).unwrap();
        assert_eq!(deck.len(), 92);

        deck.return_tiles(drawn);
        assert_eq!(deck.len(), STANDARD_DECK_SIZE);
    }

    #[test]
    fn test_seeded_shuffle_is_reproducible() {
        let mut a = Deck::standard();
        let mut b = Deck::standard();
        a.shuffle(&mut GameRng::new(9));
        b.shuffle(&mut GameRng::new(9));
        assert_eq!(a, b);
        assert_ne!(a, Deck::standard());
    }
}
