//! Tiles: the immutable values everything else moves around.
//!
//! A tile is either numbered (rank 1-13 in one of four suits) or wild.
//! The two cases are separate variants, so there is no sentinel rank or
//! suit to keep in sync.
//!
//! ## Text form
//!
//! ```
//! use rummikub_engine::core::{parse_tiles, Suit, Tile};
//!
//! let tiles = parse_tiles("5r, 6 red, j").unwrap();
//! assert_eq!(tiles, vec![Tile::new(5, Suit::Red), Tile::new(6, Suit::Red), Tile::Wild]);
//! assert_eq!(tiles[0].to_string(), "[5 red]");
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lowest rank printed on a tile.
pub const MIN_RANK: u8 = 1;

/// Highest rank printed on a tile.
pub const MAX_RANK: u8 = 13;

/// Tile colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Red,
    Blue,
    Black,
    Orange,
}

impl Suit {
    /// Every suit, in display order.
    pub const ALL: [Suit; 4] = [Suit::Red, Suit::Blue, Suit::Black, Suit::Orange];

    /// Full lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Suit::Red => "red",
            Suit::Blue => "blue",
            Suit::Black => "black",
            Suit::Orange => "orange",
        }
    }

    /// Single-letter code used by the short text form (`k` is black).
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Suit::Red => 'r',
            Suit::Blue => 'b',
            Suit::Black => 'k',
            Suit::Orange => 'o',
        }
    }

    fn from_code(code: char) -> Option<Self> {
        Suit::ALL.into_iter().find(|s| s.code() == code)
    }

    fn from_name(name: &str) -> Option<Self> {
        Suit::ALL.into_iter().find(|s| s.name() == name)
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single tile.
///
/// Ordering sorts numbered tiles by rank then suit, with wilds last.
/// Deserializing checks the rank the same way `FromStr` does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "TileRepr")]
pub enum Tile {
    Numbered { rank: u8, suit: Suit },
    Wild,
}

/// Wire shape of `Tile`, read before the rank is checked.
#[derive(Deserialize)]
enum TileRepr {
    Numbered { rank: u8, suit: Suit },
    Wild,
}

impl TryFrom<TileRepr> for Tile {
    type Error = ParseTileError;

    fn try_from(repr: TileRepr) -> Result<Self, Self::Error> {
        match repr {
            TileRepr::Numbered { rank, suit } if (MIN_RANK..=MAX_RANK).contains(&rank) => {
                Ok(Tile::Numbered { rank, suit })
            }
            TileRepr::Numbered { rank, .. } => Err(ParseTileError::RankOutOfRange(rank)),
            TileRepr::Wild => Ok(Tile::Wild),
        }
    }
}

impl Tile {
    /// Create a numbered tile.
    ///
    /// Panics if `rank` is outside `MIN_RANK..=MAX_RANK`; use `FromStr` for
    /// untrusted input.
    #[must_use]
    pub fn new(rank: u8, suit: Suit) -> Self {
        assert!(
            (MIN_RANK..=MAX_RANK).contains(&rank),
            "Rank must be {MIN_RANK}-{MAX_RANK}"
        );
        Tile::Numbered { rank, suit }
    }

    /// Check if this is a wild tile.
    #[must_use]
    pub const fn is_wild(self) -> bool {
        matches!(self, Tile::Wild)
    }

    /// Rank of a numbered tile, `None` for a wild.
    #[must_use]
    pub const fn rank(self) -> Option<u8> {
        match self {
            Tile::Numbered { rank, .. } => Some(rank),
            Tile::Wild => None,
        }
    }

    /// Suit of a numbered tile, `None` for a wild.
    #[must_use]
    pub const fn suit(self) -> Option<Suit> {
        match self {
            Tile::Numbered { suit, .. } => Some(suit),
            Tile::Wild => None,
        }
    }

    /// Face value toward an opening meld. Wilds count zero.
    #[must_use]
    pub const fn meld_points(self) -> u32 {
        match self {
            Tile::Numbered { rank, .. } => rank as u32,
            Tile::Wild => 0,
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tile::Numbered { rank, suit } => write!(f, "[{rank} {suit}]"),
            Tile::Wild => f.write_str("[Joker]"),
        }
    }
}

/// Failure to read a tile from text.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseTileError {
    #[error("empty tile description")]
    Empty,
    #[error("invalid rank '{0}'")]
    InvalidRank(String),
    #[error("rank must be 1-13, got {0}")]
    RankOutOfRange(u8),
    #[error("invalid suit '{0}'")]
    InvalidSuit(String),
}

impl FromStr for Tile {
    type Err = ParseTileError;

    /// Accepts `5r`, `5 red`, `j` and `joker` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_ascii_lowercase();
        if text.is_empty() {
            return Err(ParseTileError::Empty);
        }
        if text == "j" || text == "joker" || text.ends_with(" joker") {
            return Ok(Tile::Wild);
        }

        let (rank_text, suit) = match text.split_once(char::is_whitespace) {
            Some((rank, name)) => {
                let name = name.trim();
                let suit = Suit::from_name(name)
                    .ok_or_else(|| ParseTileError::InvalidSuit(name.to_string()))?;
                (rank, suit)
            }
            None => {
                // Short form: digits followed by a one-letter suit code.
                let split = text.len() - text.chars().last().map_or(0, char::len_utf8);
                let (rank, code) = text.split_at(split);
                let suit = code
                    .chars()
                    .next()
                    .and_then(Suit::from_code)
                    .ok_or_else(|| ParseTileError::InvalidSuit(code.to_string()))?;
                (rank, suit)
            }
        };

        let rank: u8 = rank_text
            .parse()
            .map_err(|_| ParseTileError::InvalidRank(rank_text.to_string()))?;
        if !(MIN_RANK..=MAX_RANK).contains(&rank) {
            return Err(ParseTileError::RankOutOfRange(rank));
        }
        Ok(Tile::Numbered { rank, suit })
    }
}

/// Parse a comma-separated list of tiles, e.g. `"10b, 11b, j"`.
pub fn parse_tiles(text: &str) -> Result<Vec<Tile>, ParseTileError> {
    text.split(',').map(str::parse).collect()
}

/// Render a tile list as `[5 red] [6 red]`.
pub(crate) fn format_tiles(tiles: &[Tile]) -> String {
    tiles
        .iter()
        .map(Tile::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Count occurrences of each tile.
pub(crate) fn tile_counts<'a>(tiles: impl IntoIterator<Item = &'a Tile>) -> FxHashMap<Tile, usize> {
    let mut counts = FxHashMap::default();
    for tile in tiles {
        *counts.entry(*tile).or_insert(0) += 1;
    }
    counts
}

/// First tile of `wanted` that `pool` cannot cover, counting multiplicity.
pub(crate) fn first_missing(pool: &[Tile], wanted: &[Tile]) -> Option<Tile> {
    let mut available = tile_counts(pool);
    for tile in wanted {
        match available.get_mut(tile) {
            Some(count) if *count > 0 => *count -= 1,
            _ => return Some(*tile),
        }
    }
    None
}
