//! Core value and entity types: tiles, the pile, players, the table,
//! moves, RNG and configuration.
//!
//! Nothing here knows the rules of play; the `rules` and `game` modules
//! build on these types.

pub mod tile;
pub mod deck;
pub mod player;
pub mod table;
pub mod action;
pub mod rng;
pub mod config;

pub use tile::{parse_tiles, ParseTileError, Suit, Tile, MAX_RANK, MIN_RANK};
pub use deck::{Deck, COPIES_PER_TILE, STANDARD_DECK_SIZE, WILD_COUNT};
pub use player::{HandOrder, Player, PlayerId, PlayerMap};
pub use table::Table;
pub use action::{Move, MoveKind, MoveRecord, MoveType};
pub use rng::{GameRng, GameRngState};
pub use config::RulesConfig;
