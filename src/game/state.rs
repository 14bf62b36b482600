//! The game state machine.
//!
//! ## Phases
//!
//! `NotStarted → InProgress → Finished`. `start` (or `start_with_deal`) is
//! the only way in; an emptied hand or a blocked pile is the only way out.
//!
//! ## Turns
//!
//! A turn is a sequence of moves by the current player. Tile-placing moves
//! keep the turn open; `Draw` and `EndTurn` close it. A player who placed
//! tiles may not draw in the same turn, and a player who placed nothing may
//! only end the turn once the pile is empty.
//!
//! ## Atomicity
//!
//! `apply_move` validates first, then applies to a copy and swaps it in. The
//! table, move history and pile are `im`/`Vec` values small enough that the
//! copy is cheap, and a rejected move leaves `self` untouched.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::core::tile::{first_missing, tile_counts};
use crate::core::{
    Deck, GameRng, GameRngState, HandOrder, Move, MoveKind, MoveRecord, MoveType, Player, PlayerId, PlayerMap,
    RulesConfig, Table, Tile,
};
use crate::error::{ErrorClass, GameError, SetupError, TableIssue};
use crate::rules::validator::extended;
use crate::rules::Validator;

/// Lifecycle of a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    NotStarted,
    InProgress,
    Finished,
}

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FinishReason {
    /// The winner played their last tile.
    EmptiedHand,
    /// The pile ran out and a full round passed without anyone placing a
    /// tile. The lowest hand wins.
    Blocked,
}

/// Result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Outcome {
    pub winner: PlayerId,
    pub reason: FinishReason,
}

/// Bookkeeping for the turn in progress. Reset on every turn advance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct TurnProgress {
    /// Tiles left the hand this turn.
    placed: bool,
    /// Meld value of new sets played this turn.
    melded: u32,
    /// Moves applied this turn.
    moves: u32,
}

/// Complete, authoritative game state.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    config: RulesConfig,
    validator: Validator,
    phase: Phase,
    players: PlayerMap<Player>,
    current: PlayerId,
    deck: Deck,
    table: Table,
    rng: Option<GameRng>,
    turn: TurnProgress,
    turn_number: u32,
    history: Vector<MoveRecord>,
    /// Consecutive turns ended on an empty pile without placing tiles.
    idle_turns: usize,
    outcome: Option<Outcome>,
}

impl GameState {
    /// Seat the players. Nothing is dealt until `start`.
    ///
    /// Names must be non-empty and unique, and the count must fit the
    /// configured player range.
    pub fn new<I, S>(names: I, config: RulesConfig) -> Result<Self, SetupError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        config.validate()?;
        let names: Vec<String> = names.into_iter().map(Into::into).collect();

        if names.len() < config.min_players {
            return Err(SetupError::TooFewPlayers {
                count: names.len(),
                min: config.min_players,
            });
        }
        if names.len() > config.max_players {
            return Err(SetupError::TooManyPlayers {
                count: names.len(),
                max: config.max_players,
            });
        }

        let mut unique = FxHashSet::default();
        for (index, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(SetupError::EmptyName { index });
            }
            if !unique.insert(name.as_str()) {
                return Err(SetupError::DuplicateName { name: name.clone() });
            }
        }

        let players = PlayerMap::new(names.len(), |id| Player::new(id, names[id.index()].clone()));

        Ok(Self {
            validator: config.validator(),
            config,
            phase: Phase::NotStarted,
            players,
            current: PlayerId::new(0),
            deck: Deck::standard(),
            table: Table::new(),
            rng: None,
            turn: TurnProgress::default(),
            turn_number: 0,
            history: Vector::new(),
            idle_turns: 0,
            outcome: None,
        })
    }

    /// Shuffle a fresh standard set and deal `hand_size` tiles to everyone.
    ///
    /// With `None` a random seed is drawn and recorded, so any game can be
    /// replayed through `seed()`.
    #[instrument(skip(self), fields(players = self.players.player_count()))]
    pub fn start(&mut self, seed: Option<u64>) -> Result<(), GameError> {
        if self.phase != Phase::NotStarted {
            return Err(SetupError::AlreadyStarted.into());
        }

        let mut rng = seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let mut deck = Deck::standard();
        deck.shuffle(&mut rng);

        let needed = self
            .config
            .hand_size
            .checked_mul(self.players.player_count())
            .unwrap_or(usize::MAX);
        if needed > deck.len() {
            return Err(SetupError::NotEnoughTiles {
                needed,
                available: deck.len(),
            }
            .into());
        }

        let mut hands = Vec::with_capacity(self.players.player_count());
        for _ in self.players.player_ids() {
            hands.push(deck.draw(self.config.hand_size)?);
        }

        info!(seed = rng.seed(), "dealing a new game");
        self.rng = Some(rng);
        self.begin(hands, deck);
        Ok(())
    }

    /// Create and start a game from an explicit deal.
    ///
    /// `hands[i]` goes to the i-th player and `deck` becomes the pile as
    /// given, without shuffling. The deal may be any part of a standard set
    /// but never holds a tile more often than the standard set does.
    pub fn start_with_deal<I, S>(
        names: I,
        config: RulesConfig,
        hands: Vec<Vec<Tile>>,
        deck: Deck,
    ) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut game = Self::new(names, config)?;
        if hands.len() != game.players.player_count() {
            return Err(SetupError::DealMismatch {
                players: game.players.player_count(),
                hands: hands.len(),
            }
            .into());
        }
        let dealt: Vec<Tile> = hands.iter().flatten().chain(deck.tiles()).copied().collect();
        if let Some(tile) = first_missing(Deck::standard().tiles(), &dealt) {
            return Err(SetupError::TileOverflow { tile }.into());
        }

        info!(players = hands.len(), pile = deck.len(), "starting from a fixed deal");
        game.begin(hands, deck);
        Ok(game)
    }

    fn begin(&mut self, hands: Vec<Vec<Tile>>, deck: Deck) {
        for (id, hand) in self.players.player_ids().zip(hands) {
            let player = &mut self.players[id];
            player.add_tiles(hand);
            player.sort_hand(HandOrder::BySuit);
        }
        self.deck = deck;
        self.phase = Phase::InProgress;
        self.current = PlayerId::new(0);
        self.turn_number = 1;
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    #[must_use]
    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whose turn it is.
    #[must_use]
    pub fn current_player_id(&self) -> PlayerId {
        self.current
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    #[must_use]
    pub fn deck_remaining(&self) -> usize {
        self.deck.len()
    }

    /// Turn number, starting at 1 once the game is in progress.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Every applied move, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    /// Whether the current player has placed tiles this turn.
    #[must_use]
    pub fn has_placed_this_turn(&self) -> bool {
        self.turn.placed
    }

    /// Seed of the shuffle, if the game was dealt by `start`.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.rng.as_ref().map(GameRng::seed)
    }

    /// Position of the shuffle generator, if the game was dealt by `start`.
    #[must_use]
    pub fn rng_state(&self) -> Option<GameRngState> {
        self.rng.as_ref().map(GameRng::state)
    }

    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.outcome.map(|o| o.winner)
    }

    /// Tiles across the pile, every hand and the table. Never changes once
    /// the game has started.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.deck.len()
            + self.players.values().map(Player::tile_count).sum::<usize>()
            + self.table.tile_count()
    }

    /// Final scores: 0 for the winner, remaining hand value for everyone
    /// else. `None` until the game is finished.
    #[must_use]
    pub fn scores(&self) -> Option<PlayerMap<u32>> {
        let winner = self.winner()?;
        let penalty = self.config.wild_penalty;
        Some(PlayerMap::new(self.players.player_count(), |id| {
            if id == winner {
                0
            } else {
                self.players[id].hand_value(penalty)
            }
        }))
    }

    /// Kinds of move `player` may attempt right now.
    ///
    /// A kind being listed does not mean a concrete move of that kind is
    /// legal, only that the phase, turn and opening status allow it.
    #[must_use]
    pub fn legal_move_types(&self, player: PlayerId) -> Vec<MoveType> {
        if self.phase != Phase::InProgress || player != self.current {
            return Vec::new();
        }
        let Some(p) = self.players.get(player) else {
            return Vec::new();
        };

        let mut types = Vec::new();
        if !self.turn.placed && !self.deck.is_empty() {
            types.push(MoveType::Draw);
        }
        if p.tile_count() > 0 {
            types.push(MoveType::PlaySets);
        }
        if p.has_opened() && !self.table.is_empty() {
            if p.tile_count() > 0 {
                types.push(MoveType::AddToSet);
            }
            if p.tile_count() > 0 {
                types.push(MoveType::Rearrange);
            }
            if p.tile_count() > 0 && self.table.tiles().any(|t| t.is_wild()) {
                types.push(MoveType::ReclaimWild);
                types.push(MoveType::SwapWild);
            }
        }
        if self.turn.placed || self.deck.is_empty() {
            types.push(MoveType::EndTurn);
        }
        types
    }

    // === Validation ===

    /// Check a move against the current state without changing anything.
    ///
    /// Checks run in a fixed order and stop at the first failure: phase,
    /// turn, tile ownership, set shape, opening value, table layout.
    pub fn validate_move(&self, mv: &Move) -> Result<(), GameError> {
        if self.phase != Phase::InProgress {
            return Err(GameError::NotInProgress);
        }
        if mv.player != self.current {
            return Err(GameError::NotYourTurn {
                player: mv.player,
                expected: self.current,
            });
        }

        let player = &self.players[mv.player];
        if let Some(tile) = first_missing(player.hand(), &mv.hand_tiles()) {
            return Err(GameError::TilesNotOwned {
                player: mv.player,
                tile,
            });
        }

        match &mv.kind {
            MoveKind::Draw => {
                if self.turn.placed {
                    return Err(GameError::AlreadyPlayedThisTurn);
                }
                if self.deck.is_empty() {
                    return Err(GameError::EmptyDeck {
                        requested: 1,
                        remaining: 0,
                    });
                }
                Ok(())
            }

            MoveKind::EndTurn => {
                if !self.turn.placed && !self.deck.is_empty() {
                    return Err(GameError::MustDrawOrPlay);
                }
                Ok(())
            }

            MoveKind::PlaySets { sets } => {
                if sets.is_empty() {
                    return Err(GameError::InvalidSet { tiles: Vec::new() });
                }
                if let Some(bad) = sets.iter().find(|set| !self.validator.is_valid_set(set)) {
                    return Err(GameError::InvalidSet { tiles: bad.clone() });
                }
                self.check_opening(player, self.validator.sets_value(sets))
            }

            MoveKind::AddToSet { set_index, tiles } => {
                let grown = extended(self.table_set(*set_index)?, tiles);
                if tiles.is_empty() || !self.validator.is_valid_set(&grown) {
                    return Err(GameError::InvalidSet { tiles: grown });
                }
                self.require_opened(player)
            }

            MoveKind::Rearrange { tiles, table } => {
                if tiles.is_empty() {
                    return Err(GameError::NoTilesPlaced);
                }
                self.require_opened(player)?;
                let before = tile_counts(self.table.tiles().chain(tiles));
                let after = tile_counts(table.iter().flatten());
                if before != after {
                    return Err(GameError::InvalidTableState(TableIssue::TilesNotConserved));
                }
                self.validator
                    .check_table(table)
                    .map_err(GameError::InvalidTableState)
            }

            MoveKind::ReclaimWild {
                set_index,
                replacement,
            } => {
                self.wild_replacement(*set_index, *replacement)?;
                self.require_opened(player)
            }

            MoveKind::SwapWild {
                set_index,
                replacement,
                with,
            } => {
                self.wild_replacement(*set_index, *replacement)?;
                let new_set = extended(with, &[Tile::Wild]);
                if !self.validator.is_valid_set(&new_set) {
                    return Err(GameError::InvalidSet { tiles: new_set });
                }
                self.require_opened(player)
            }
        }
    }

    fn table_set(&self, index: usize) -> Result<&[Tile], GameError> {
        self.table.get(index).ok_or(GameError::NoSuchSet {
            index,
            len: self.table.len(),
        })
    }

    /// The set at `index` with a wild swapped for `replacement`.
    fn wild_replacement(&self, index: usize, replacement: Tile) -> Result<Vec<Tile>, GameError> {
        let set = self.table_set(index)?;
        let Some(position) = set.iter().position(|t| t.is_wild()) else {
            return Err(GameError::NoWildInSet { index });
        };
        self.validator.replace_wild(set, replacement).ok_or_else(|| {
            let mut tiles = set.to_vec();
            tiles[position] = replacement;
            GameError::InvalidSet { tiles }
        })
    }

    /// New sets worth `added` are about to be played by `player`.
    fn check_opening(&self, player: &Player, added: u32) -> Result<(), GameError> {
        let value = self.turn.melded + added;
        let threshold = self.validator.opening_threshold();
        if player.has_opened() || value >= threshold {
            Ok(())
        } else {
            Err(GameError::InsufficientMeldValue { value, threshold })
        }
    }

    /// Touching existing table sets needs a completed opening.
    fn require_opened(&self, player: &Player) -> Result<(), GameError> {
        if player.has_opened() {
            Ok(())
        } else {
            Err(GameError::InsufficientMeldValue {
                value: self.turn.melded,
                threshold: self.validator.opening_threshold(),
            })
        }
    }

    // === Application ===

    /// Validate and apply a move.
    ///
    /// On error the state is exactly what it was before the call.
    #[instrument(skip(self, mv), fields(player = %mv.player, kind = %mv.move_type()))]
    pub fn apply_move(&mut self, mv: Move) -> Result<(), GameError> {
        let result = self.validate_move(&mv).and_then(|()| {
            let mut next = self.clone();
            next.execute(mv)?;
            Ok(next)
        });

        match result {
            Ok(next) => {
                *self = next;
                debug!(turn = self.turn_number, "move applied");
                Ok(())
            }
            Err(err) => {
                if err.class() == ErrorClass::Defect {
                    warn!(error = %err, "move rejected: caller defect");
                } else {
                    debug!(error = %err, "move rejected");
                }
                Err(err)
            }
        }
    }

    /// Apply a validated move. Errors here still abort the whole move since
    /// `apply_move` runs this on a copy.
    fn execute(&mut self, mv: Move) -> Result<(), GameError> {
        let id = mv.player;
        let kind = mv.move_type();

        match &mv.kind {
            MoveKind::Draw => {
                let tile = self.deck.draw_one()?;
                self.players[id].add_tile(tile);
            }

            MoveKind::EndTurn => {}

            MoveKind::PlaySets { sets } => {
                self.players[id].remove_tiles(&mv.hand_tiles())?;
                for set in sets {
                    self.table.push(set.clone());
                }
                self.turn.melded += self.validator.sets_value(sets);
                if !self.players[id].has_opened() {
                    self.players[id].mark_opened();
                    debug!(player = %id, value = self.turn.melded, "opening meld");
                }
            }

            MoveKind::AddToSet { set_index, tiles } => {
                let grown = extended(self.table_set(*set_index)?, tiles);
                self.players[id].remove_tiles(tiles)?;
                self.table.replace(*set_index, grown);
            }

            MoveKind::Rearrange { tiles, table } => {
                self.players[id].remove_tiles(tiles)?;
                self.table = Table::from_sets(table.iter().cloned());
            }

            MoveKind::ReclaimWild {
                set_index,
                replacement,
            } => {
                let replaced = self.wild_replacement(*set_index, *replacement)?;
                self.players[id].remove_tiles(&[*replacement])?;
                self.table.replace(*set_index, replaced);
                self.players[id].add_tile(Tile::Wild);
            }

            MoveKind::SwapWild {
                set_index,
                replacement,
                with,
            } => {
                let replaced = self.wild_replacement(*set_index, *replacement)?;
                self.players[id].remove_tiles(&mv.hand_tiles())?;
                self.table.replace(*set_index, replaced);
                self.table.push(extended(with, &[Tile::Wild]));
            }
        }

        let placed = kind.places_tiles() && !mv.hand_tiles().is_empty();
        self.history
            .push_back(MoveRecord::new(mv, self.turn_number, self.turn.moves));
        self.turn.moves += 1;
        self.turn.placed |= placed;

        match kind {
            MoveType::Draw => {
                self.idle_turns = 0;
                self.advance_turn();
            }
            MoveType::EndTurn => {
                if self.deck.is_empty() && !self.turn.placed {
                    self.idle_turns += 1;
                } else {
                    self.idle_turns = 0;
                }
                if self.idle_turns >= self.players.player_count() {
                    self.finish_blocked();
                } else {
                    self.advance_turn();
                }
            }
            _ => {
                if self.players[id].tile_count() == 0 {
                    self.finish(id, FinishReason::EmptiedHand);
                }
            }
        }
        Ok(())
    }

    fn advance_turn(&mut self) {
        self.current = self.current.next(self.players.player_count());
        self.turn_number += 1;
        self.turn = TurnProgress::default();
    }

    /// Lowest hand value wins; ties go to fewer tiles, then the lower seat.
    fn finish_blocked(&mut self) {
        let penalty = self.config.wild_penalty;
        let winner = self
            .players
            .values()
            .min_by_key(|p| (p.hand_value(penalty), p.tile_count(), p.id()))
            .map(Player::id);
        if let Some(winner) = winner {
            self.finish(winner, FinishReason::Blocked);
        }
    }

    fn finish(&mut self, winner: PlayerId, reason: FinishReason) {
        self.phase = Phase::Finished;
        self.outcome = Some(Outcome { winner, reason });
        info!(%winner, ?reason, turn = self.turn_number, "game finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{parse_tiles, Suit};

    fn tiles(text: &str) -> Vec<Tile> {
        parse_tiles(text).unwrap()
    }

    fn two_player(hands: [&str; 2], pile: &str) -> GameState {
        let pile = if pile.is_empty() { Vec::new() } else { tiles(pile) };
        GameState::start_with_deal(
            ["Ann", "Bob"],
            RulesConfig::default(),
            hands.iter().map(|h| tiles(h)).collect(),
            Deck::from_tiles(pile),
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_bad_names() {
        assert_eq!(
            GameState::new(["Ann"], RulesConfig::default()).unwrap_err(),
            SetupError::TooFewPlayers { count: 1, min: 2 }
        );
        assert_eq!(
            GameState::new(["a", "b", "c", "d", "e"], RulesConfig::default()).unwrap_err(),
            SetupError::TooManyPlayers { count: 5, max: 4 }
        );
        assert_eq!(
            GameState::new(["Ann", " "], RulesConfig::default()).unwrap_err(),
            SetupError::EmptyName { index: 1 }
        );
        assert_eq!(
            GameState::new(["Ann", "Bob", "Ann"], RulesConfig::default()).unwrap_err(),
            SetupError::DuplicateName { name: "Ann".into() }
        );
    }

    #[test]
    fn test_start_deals_hands() {
        let mut game = GameState::new(["Ann", "Bob", "Cy"], RulesConfig::default()).unwrap();
        assert_eq!(game.phase(), Phase::NotStarted);

        game.start(Some(5)).unwrap();
        assert_eq!(game.phase(), Phase::InProgress);
        assert_eq!(game.turn_number(), 1);
        assert_eq!(game.seed(), Some(5));
        assert!(game.players().all(|p| p.tile_count() == 14));
        assert_eq!(game.deck_remaining(), 106 - 42);
        assert_eq!(game.tile_count(), 106);

        assert_eq!(
            game.start(Some(5)),
            Err(GameError::Setup(SetupError::AlreadyStarted))
        );
    }

    #[test]
    fn test_start_needs_enough_tiles() {
        let config = RulesConfig::default().with_hand_size(30);
        let mut game = GameState::new(["a", "b", "c", "d"], config).unwrap();
        assert_eq!(
            game.start(Some(1)),
            Err(GameError::Setup(SetupError::NotEnoughTiles {
                needed: 120,
                available: 106
            }))
        );
        assert_eq!(game.phase(), Phase::NotStarted);
    }

    #[test]
    fn test_moves_need_a_started_game() {
        let game = GameState::new(["Ann", "Bob"], RulesConfig::default()).unwrap();
        assert_eq!(
            game.validate_move(&Move::draw(PlayerId::new(0))),
            Err(GameError::NotInProgress)
        );
        assert!(game.legal_move_types(PlayerId::new(0)).is_empty());
        assert_eq!(game.scores(), None);
    }

    #[test]
    fn test_draw_then_advance() {
        let mut game = two_player(["1r", "2r"], "5b, 6b");
        game.apply_move(Move::draw(PlayerId::new(0))).unwrap();

        assert!(game.player(PlayerId::new(0)).unwrap().hand().contains(&Tile::new(6, Suit::Blue)));
        assert_eq!(game.current_player_id(), PlayerId::new(1));
        assert_eq!(game.turn_number(), 2);
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_opening_threshold_is_per_turn() {
        let mut game = two_player(["5r, 6r, 7r, 9b, 9k, 9o", "1b"], "2b");
        let p0 = PlayerId::new(0);

        let low = Move::play_set(p0, tiles("5r, 6r, 7r"));
        assert_eq!(
            game.apply_move(low),
            Err(GameError::InsufficientMeldValue { value: 18, threshold: 30 })
        );

        let both = Move::play_sets(p0, vec![tiles("5r, 6r, 7r"), tiles("9b, 9k, 9o")]);
        game.apply_move(both).unwrap();
        assert!(game.player(p0).unwrap().has_opened());
        assert_eq!(game.table().len(), 2);
        assert_eq!(game.phase(), Phase::Finished);
        assert_eq!(game.winner(), Some(p0));
    }

    #[test]
    fn test_legal_move_types_follow_turn() {
        let mut game = two_player(["10r, 10b, 10k, 3o", "1b"], "2b");
        let p0 = PlayerId::new(0);

        assert_eq!(
            game.legal_move_types(p0),
            vec![MoveType::Draw, MoveType::PlaySets]
        );
        assert!(game.legal_move_types(PlayerId::new(1)).is_empty());

        game.apply_move(Move::play_set(p0, tiles("10r, 10b, 10k"))).unwrap();
        assert_eq!(
            game.legal_move_types(p0),
            vec![
                MoveType::PlaySets,
                MoveType::AddToSet,
                MoveType::Rearrange,
                MoveType::EndTurn
            ]
        );
    }

    #[test]
    fn test_execute_failure_leaves_copy_only() {
        let mut game = two_player(["10r, 10b, 10k, 3o", "1b"], "2b");
        let before = game.clone();

        // Passes validation but the copy is discarded when execute fails.
        let mut copy = game.clone();
        copy.players[PlayerId::new(0)] = Player::new(PlayerId::new(0), "Ann");
        assert!(copy
            .execute(Move::play_set(PlayerId::new(0), tiles("10r, 10b, 10k")))
            .is_err());

        assert_eq!(game, before);
        game.apply_move(Move::draw(PlayerId::new(0))).unwrap();
        assert_ne!(game, before);
    }

    #[test]
    fn test_end_turn_needs_a_draw_or_a_play() {
        let mut game = two_player(["10r, 10b, 10k, 3o", "1b"], "2b");
        let p0 = PlayerId::new(0);
        let before = game.clone();

        assert_eq!(game.apply_move(Move::end_turn(p0)), Err(GameError::MustDrawOrPlay));
        assert_eq!(game, before);

        game.apply_move(Move::play_set(p0, tiles("10r, 10b, 10k"))).unwrap();
        game.apply_move(Move::end_turn(p0)).unwrap();
        assert_eq!(game.current_player_id(), PlayerId::new(1));
    }

    #[test]
    fn test_end_turn_allowed_on_empty_pile() {
        let mut game = two_player(["3o", "1b"], "");
        assert!(game.legal_move_types(PlayerId::new(0)).contains(&MoveType::EndTurn));
        game.apply_move(Move::end_turn(PlayerId::new(0))).unwrap();
        assert_eq!(game.current_player_id(), PlayerId::new(1));
    }

    #[test]
    fn test_huge_hand_size_does_not_overflow() {
        let config = RulesConfig::default().with_hand_size(usize::MAX);
        let mut game = GameState::new(["a", "b", "c", "d"], config).unwrap();
        assert_eq!(
            game.start(Some(1)),
            Err(GameError::Setup(SetupError::NotEnoughTiles {
                needed: usize::MAX,
                available: 106
            }))
        );
        assert_eq!(game.phase(), Phase::NotStarted);
    }

    #[test]
    fn test_deal_cannot_repeat_tiles() {
        let result = GameState::start_with_deal(
            ["Ann", "Bob"],
            RulesConfig::default(),
            vec![tiles("5r, 5r"), tiles("1b")],
            Deck::from_tiles(tiles("5r, 2b")),
        );
        assert_eq!(
            result.unwrap_err(),
            GameError::Setup(SetupError::TileOverflow {
                tile: Tile::new(5, Suit::Red)
            })
        );

        let wilds = GameState::start_with_deal(
            ["Ann", "Bob"],
            RulesConfig::default(),
            vec![tiles("j, j"), tiles("j")],
            Deck::from_tiles(Vec::new()),
        );
        assert_eq!(
            wilds.unwrap_err(),
            GameError::Setup(SetupError::TileOverflow { tile: Tile::Wild })
        );
    }
}
