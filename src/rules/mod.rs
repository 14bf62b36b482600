//! Rules of play that do not depend on whose turn it is.
//!
//! - `validator`: group, run, opening meld and table layout checks
//! - `hints`: enumeration of the sets a hand can form
//!
//! The game state machine asks a `Validator` before every mutation; the
//! validator itself never touches game state.

pub mod validator;
pub mod hints;

pub use validator::{SetKind, Validator};
