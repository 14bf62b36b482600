//! Turn sequencing, move application and scoring.
//!
//! `GameState` owns every piece of mutable game data. Callers build a
//! `Move`, hand it to `apply_move`, and read back a `VisibleState`.

pub mod state;
pub mod view;

pub use state::{FinishReason, GameState, Outcome, Phase};
pub use view::{OpponentView, VisibleState};

use crate::core::RulesConfig;
use crate::error::GameError;

/// Seat `names`, deal `hand_size` tiles each and start play.
///
/// Uses standard rules otherwise. `seed` makes the deal reproducible.
///
/// ```
/// use rummikub_engine::game::{start_game, Phase};
///
/// let game = start_game(["Ann", "Bob"], 14, Some(3)).unwrap();
/// assert_eq!(game.phase(), Phase::InProgress);
/// assert_eq!(game.deck_remaining(), 106 - 28);
/// ```
pub fn start_game<I, S>(names: I, hand_size: usize, seed: Option<u64>) -> Result<GameState, GameError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let config = RulesConfig::default().with_hand_size(hand_size);
    let mut game = GameState::new(names, config)?;
    game.start(seed)?;
    Ok(game)
}
