//! # rummikub-engine
//!
//! Rules and state engine for local Rummikub games with 2-4 players.
//!
//! ## Design Principles
//!
//! 1. **Closed Variants**: tiles are `Numbered` or `Wild`, moves are one of a
//!    fixed set of `MoveKind`s. The validator matches on tags, never on
//!    sentinel ranks.
//!
//! 2. **Atomic Moves**: every move is validated against the whole state and
//!    applied to a copy. A rejected move is invisible.
//!
//! 3. **Configuration Over Globals**: thresholds and sizes live in a
//!    `RulesConfig` handed to the game at creation.
//!
//! ## Modules
//!
//! - `core`: tiles, pile, players, table, moves, RNG, configuration
//! - `rules`: set validation and set hints
//! - `game`: the `GameState` state machine and per-player views
//! - `error`: setup and move errors
//!
//! ## Example
//!
//! ```
//! use rummikub_engine::{start_game, GameError, Move, PlayerId};
//!
//! let mut game = start_game(["Ann", "Bob"], 14, Some(42)).unwrap();
//! let bob = PlayerId::new(1);
//!
//! let err = game.apply_move(Move::draw(bob)).unwrap_err();
//! assert!(matches!(err, GameError::NotYourTurn { .. }));
//!
//! game.apply_move(Move::draw(PlayerId::new(0))).unwrap();
//! assert_eq!(game.current_player_id(), bob);
//! ```

pub mod core;
pub mod error;
pub mod rules;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    parse_tiles, Deck, HandOrder, Move, MoveKind, MoveRecord, MoveType, ParseTileError, Player,
    PlayerId, PlayerMap, RulesConfig, Suit, Table, Tile,
};

pub use crate::error::{ErrorClass, GameError, SetupError, TableIssue};

pub use crate::rules::{SetKind, Validator};

pub use crate::game::{
    start_game, FinishReason, GameState, OpponentView, Outcome, Phase, VisibleState,
};
