//! Error types for setup and play.
//!
//! Rule violations are ordinary values: the presentation layer shows the
//! message and lets the same player try again. A small set of variants
//! signal that the caller broke an invariant (stale tile references,
//! drawing past the end of the pile); those are classed as `Defect`.

use thiserror::Error;

use crate::core::tile::format_tiles;
use crate::core::{PlayerId, Tile};

/// Broad category of a `GameError`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// The game could not be created or started.
    Setup,
    /// The move breaks a rule; state is untouched and the player may retry.
    RuleViolation,
    /// The caller broke an engine invariant. State is still untouched.
    Defect,
}

/// Problems found while creating or starting a game.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("at least {min} players are required, got {count}")]
    TooFewPlayers { count: usize, min: usize },
    #[error("at most {max} players are supported, got {count}")]
    TooManyPlayers { count: usize, max: usize },
    #[error("player {index} has an empty name")]
    EmptyName { index: usize },
    #[error("player name '{name}' is used more than once")]
    DuplicateName { name: String },
    #[error("hand size must be at least 1")]
    InvalidHandSize,
    #[error("dealing {needed} tiles needs a bigger pile than {available}")]
    NotEnoughTiles { needed: usize, available: usize },
    #[error("the game has already started")]
    AlreadyStarted,
    #[error("a standard set has {expected} tiles, this composition gives {actual}")]
    DeckComposition { expected: usize, actual: usize },
    #[error("{hands} hands were dealt for {players} players")]
    DealMismatch { players: usize, hands: usize },
    #[error("invalid rules configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("the deal holds more copies of {tile} than a standard set")]
    TileOverflow { tile: Tile },
}

/// Why a proposed table layout was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableIssue {
    /// Set at this position holds no tiles.
    EmptySet { index: usize },
    /// Set at this position is neither a group nor a run.
    InvalidSet { index: usize },
    /// The layout does not hold exactly the old table plus the played tiles.
    TilesNotConserved,
}

impl std::fmt::Display for TableIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableIssue::EmptySet { index } => write!(f, "set {} is empty", index + 1),
            TableIssue::InvalidSet { index } => {
                write!(f, "set {} is not a valid group or run", index + 1)
            }
            TableIssue::TilesNotConserved => {
                f.write_str("the new layout must use every table tile plus the played tiles")
            }
        }
    }
}

/// Every way an engine call can fail.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error("the game is not in progress")]
    NotInProgress,

    #[error("it is {expected}'s turn, not {player}'s")]
    NotYourTurn { player: PlayerId, expected: PlayerId },

    #[error("{player} does not hold {tile}")]
    TilesNotOwned { player: PlayerId, tile: Tile },

    #[error("{} is not a valid group or run", format_tiles(.tiles))]
    InvalidSet { tiles: Vec<Tile> },

    #[error("there is no set {} on the table ({len} sets)", .index + 1)]
    NoSuchSet { index: usize, len: usize },

    #[error("set {} holds no wild tile", .index + 1)]
    NoWildInSet { index: usize },

    #[error("opening melds must be worth at least {threshold} points, this turn has {value}")]
    InsufficientMeldValue { value: u32, threshold: u32 },

    #[error("invalid table arrangement: {0}")]
    InvalidTableState(TableIssue),

    #[error("tiles were already placed this turn, drawing is not allowed")]
    AlreadyPlayedThisTurn,

    #[error("place tiles or draw before ending the turn")]
    MustDrawOrPlay,

    #[error("a rearrangement must add at least one tile from the hand")]
    NoTilesPlaced,

    #[error("asked for {requested} tiles but only {remaining} remain in the pile")]
    EmptyDeck { requested: usize, remaining: usize },

    #[error("{tile} is not in the hand")]
    TileNotInHand { tile: Tile },
}

impl GameError {
    /// Category of this error.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            GameError::Setup(_) => ErrorClass::Setup,
            GameError::EmptyDeck { .. } | GameError::TileNotInHand { .. } => ErrorClass::Defect,
            _ => ErrorClass::RuleViolation,
        }
    }

    /// True unless the error signals a caller defect.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        self.class() != ErrorClass::Defect
    }
}
