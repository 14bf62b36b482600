//! Set validation.
//!
//! Pure functions over tile slices. Validity never depends on the order the
//! tiles are listed in, and a wild never needs a recorded identity: a set is
//! valid when *some* assignment of ranks and suits to its wilds works.

use serde::{Deserialize, Serialize};

use crate::core::tile::{Tile, MAX_RANK, MIN_RANK};
use crate::core::RulesConfig;
use crate::error::TableIssue;

/// Ranks outside 1..=13 can be built by hand but never take part in a set.
fn in_range(rank: u8) -> bool {
    (MIN_RANK..=MAX_RANK).contains(&rank)
}

/// The two shapes of a legal set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetKind {
    /// Same rank, distinct suits.
    Group,
    /// Same suit, consecutive ranks.
    Run,
}

/// Rule checks parameterised by a `RulesConfig`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Validator {
    min_set_size: usize,
    max_group_size: usize,
    opening_threshold: u32,
}

impl Default for Validator {
    fn default() -> Self {
        Self::from(&RulesConfig::default())
    }
}

impl From<&RulesConfig> for Validator {
    fn from(config: &RulesConfig) -> Self {
        Self {
            min_set_size: config.min_set_size,
            max_group_size: config.max_group_size,
            opening_threshold: config.opening_threshold,
        }
    }
}

impl Validator {
    /// Minimum meld value of an opening turn.
    #[must_use]
    pub fn opening_threshold(&self) -> u32 {
        self.opening_threshold
    }

    #[must_use]
    pub fn min_set_size(&self) -> usize {
        self.min_set_size
    }

    #[must_use]
    pub fn max_group_size(&self) -> usize {
        self.max_group_size
    }

    /// True iff `tiles` form a group: 3-4 tiles, every numbered tile of one
    /// rank, no suit repeated. Wilds stand in for the missing suits.
    #[must_use]
    pub fn is_valid_group(&self, tiles: &[Tile]) -> bool {
        if tiles.len() < self.min_set_size || tiles.len() > self.max_group_size {
            return false;
        }

        let mut rank = None;
        let mut seen = [false; 4];
        for tile in tiles {
            let Tile::Numbered { rank: r, suit } = *tile else {
                continue;
            };
            if !in_range(r) || *rank.get_or_insert(r) != r || seen[suit as usize] {
                return false;
            }
            seen[suit as usize] = true;
        }

        // A group of nothing but wilds has no rank to stand for.
        rank.is_some()
    }

    /// True iff `tiles` form a run: at least 3 tiles of one suit whose
    /// ranks, with wilds filling gaps or extending either end, are strictly
    /// consecutive inside 1..=13.
    #[must_use]
    pub fn is_valid_run(&self, tiles: &[Tile]) -> bool {
        let span_limit = usize::from(MAX_RANK - MIN_RANK + 1);
        if tiles.len() < self.min_set_size || tiles.len() > span_limit {
            return false;
        }

        let mut run_suit = None;
        let mut ranks = Vec::with_capacity(tiles.len());
        for tile in tiles {
            if let Tile::Numbered { rank, suit } = *tile {
                if !in_range(rank) || *run_suit.get_or_insert(suit) != suit {
                    return false;
                }
                ranks.push(rank);
            }
        }

        let (Some(&low), Some(&high)) = (ranks.iter().min(), ranks.iter().max()) else {
            return false;
        };
        ranks.sort_unstable();
        if ranks.windows(2).any(|w| w[0] == w[1]) {
            return false;
        }

        // Wilds left after the internal gaps extend the ends; the length cap
        // above keeps the extension inside the rank range.
        let wilds = tiles.len() - ranks.len();
        let gaps = usize::from(high - low) + 1 - ranks.len();
        wilds >= gaps
    }

    /// True iff `tiles` form a group or a run.
    #[must_use]
    pub fn is_valid_set(&self, tiles: &[Tile]) -> bool {
        self.classify(tiles).is_some()
    }

    /// Which kind of set `tiles` form. A set that is both (one numbered
    /// tile plus wilds) reports `Group`.
    #[must_use]
    pub fn classify(&self, tiles: &[Tile]) -> Option<SetKind> {
        if self.is_valid_group(tiles) {
            Some(SetKind::Group)
        } else if self.is_valid_run(tiles) {
            Some(SetKind::Run)
        } else {
            None
        }
    }

    /// Opening value of one set: the sum of numbered ranks. Wilds count 0.
    #[must_use]
    pub fn meld_value(&self, tiles: &[Tile]) -> u32 {
        tiles.iter().map(|t| t.meld_points()).sum()
    }

    /// Opening value of several sets played in one turn.
    #[must_use]
    pub fn sets_value<S: AsRef<[Tile]>>(&self, sets: &[S]) -> u32 {
        sets.iter().map(|s| self.meld_value(s.as_ref())).sum()
    }

    /// True iff the sets placed in an opening turn reach the threshold.
    /// Empty input is never a valid opening.
    #[must_use]
    pub fn is_opening_meld_valid<S: AsRef<[Tile]>>(&self, sets: &[S]) -> bool {
        if sets.iter().all(|s| s.as_ref().is_empty()) {
            return false;
        }
        self.sets_value(sets) >= self.opening_threshold
    }

    /// First problem with a table layout, if any.
    ///
    /// A layout with no sets at all is fine: it is the table before anyone
    /// has melded.
    pub fn check_table<I>(&self, sets: I) -> Result<(), TableIssue>
    where
        I: IntoIterator,
        I::Item: AsRef<[Tile]>,
    {
        for (index, set) in sets.into_iter().enumerate() {
            let set = set.as_ref();
            if set.is_empty() {
                return Err(TableIssue::EmptySet { index });
            }
            if !self.is_valid_set(set) {
                return Err(TableIssue::InvalidSet { index });
            }
        }
        Ok(())
    }

    /// True iff every set in the layout is valid on its own.
    #[must_use]
    pub fn is_valid_table_state<I>(&self, sets: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<[Tile]>,
    {
        self.check_table(sets).is_ok()
    }

    /// True iff `set` stays valid with `tiles` added.
    #[must_use]
    pub fn can_extend(&self, set: &[Tile], tiles: &[Tile]) -> bool {
        !tiles.is_empty() && self.is_valid_set(&extended(set, tiles))
    }

    /// `set` with one wild replaced by `replacement`, if `set` holds a wild
    /// and the result is still a valid set.
    ///
    /// Wilds are interchangeable, so which one is swapped does not matter.
    #[must_use]
    pub fn replace_wild(&self, set: &[Tile], replacement: Tile) -> Option<Vec<Tile>> {
        if replacement.is_wild() {
            return None;
        }
        let position = set.iter().position(|t| t.is_wild())?;
        let mut replaced = set.to_vec();
        replaced[position] = replacement;
        self.is_valid_set(&replaced).then_some(replaced)
    }
}

pub(crate) fn extended(set: &[Tile], tiles: &[Tile]) -> Vec<Tile> {
    set.iter().chain(tiles).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{parse_tiles, Suit};

    fn tiles(text: &str) -> Vec<Tile> {
        parse_tiles(text).unwrap()
    }

    #[test]
    fn test_valid_groups() {
        let v = Validator::default();
        assert!(v.is_valid_group(&tiles("5r, 5b, 5k")));
        assert!(v.is_valid_group(&tiles("5r, 5b, 5k, 5o")));
        assert!(v.is_valid_group(&tiles("5r, j, 5k")));
        assert!(v.is_valid_group(&tiles("5r, j, j")));
        assert!(v.is_valid_group(&tiles("13o, 13r, j, 13b")));
    }

    #[test]
    fn test_invalid_groups() {
        let v = Validator::default();
        assert!(!v.is_valid_group(&[]));
        assert!(!v.is_valid_group(&tiles("5r, 5b")));
        assert!(!v.is_valid_group(&tiles("5r, 5r, 5b")));
        assert!(!v.is_valid_group(&tiles("5r, 6b, 5k")));
        assert!(!v.is_valid_group(&tiles("5r, 5b, 5k, 5o, j")));
        assert!(!v.is_valid_group(&tiles("j, j, j")));
    }

    #[test]
    fn test_valid_runs() {
        let v = Validator::default();
        assert!(v.is_valid_run(&tiles("7b, 8b, 9b")));
        assert!(v.is_valid_run(&tiles("9b, 7b, 8b")));
        assert!(v.is_valid_run(&tiles("5b, j, 7b")));
        assert!(v.is_valid_run(&tiles("10r, j, 12r, 13r")));
        assert!(v.is_valid_run(&tiles("12r, 13r, j")));
        assert!(v.is_valid_run(&tiles("1k, 2k, j, j")));
        assert!(v.is_valid_run(&tiles(
            "1o, 2o, 3o, 4o, 5o, 6o, 7o, 8o, 9o, 10o, 11o, 12o, 13o"
        )));
    }

    #[test]
    fn test_invalid_runs() {
        let v = Validator::default();
        assert!(!v.is_valid_run(&[]));
        assert!(!v.is_valid_run(&tiles("5b, 7b, 8b")));
        assert!(!v.is_valid_run(&tiles("5b, 6b")));
        assert!(!v.is_valid_run(&tiles("5b, 6r, 7b")));
        assert!(!v.is_valid_run(&tiles("5b, 5b, 6b")));
        assert!(!v.is_valid_run(&tiles("12b, 13b, 1b")));
        assert!(!v.is_valid_run(&tiles("5b, j, j, j, 10b")));
        assert!(!v.is_valid_run(&tiles(
            "1o, 2o, 3o, 4o, 5o, 6o, 7o, 8o, 9o, 10o, 11o, 12o, 13o, j"
        )));
    }

    #[test]
    fn test_out_of_range_ranks_never_form_sets() {
        let v = Validator::default();
        let raw = |rank| Tile::Numbered { rank, suit: Suit::Blue };

        assert!(!v.is_valid_run(&[raw(0), raw(1), raw(2)]));
        assert!(!v.is_valid_run(&[raw(12), raw(13), raw(14)]));
        assert!(!v.is_valid_run(&[raw(0), raw(255), Tile::Wild]));
        assert!(!v.is_valid_run(&[raw(255), Tile::Wild, Tile::Wild]));
        assert!(!v.is_valid_group(&[raw(0), Tile::Wild, Tile::Wild]));
        assert!(!v.is_valid_set(&[raw(255), Tile::Wild, Tile::Wild]));
        assert!(!v.is_valid_table_state(&[vec![raw(0), raw(255), Tile::Wild]]));
    }

    #[test]
    fn test_classify() {
        let v = Validator::default();
        assert_eq!(v.classify(&tiles("4r, 4b, 4o")), Some(SetKind::Group));
        assert_eq!(v.classify(&tiles("4r, 5r, 6r")), Some(SetKind::Run));
        assert_eq!(v.classify(&tiles("4r, j, j")), Some(SetKind::Group));
        assert_eq!(v.classify(&tiles("4r, 5b, 6o")), None);
        assert!(v.is_valid_set(&tiles("4r, j, 6r")));
    }

    #[test]
    fn test_meld_values() {
        let v = Validator::default();
        assert_eq!(v.meld_value(&tiles("10r, 10b, 10k")), 30);
        assert_eq!(v.meld_value(&tiles("5r, j, 7r")), 12);

        assert!(v.is_opening_meld_valid(&[tiles("10r, 10b, 10k")]));
        assert!(!v.is_opening_meld_valid(&[tiles("5r, 6r, 7r")]));
        assert!(v.is_opening_meld_valid(&[tiles("5r, 6r, 7r"), tiles("4b, 4k, 4o")]));
        assert!(!v.is_opening_meld_valid::<Vec<Tile>>(&[]));

        let lenient = RulesConfig::new().with_opening_threshold(0).validator();
        assert!(lenient.is_opening_meld_valid(&[tiles("1r, 2r, 3r")]));
        assert!(!lenient.is_opening_meld_valid(&[Vec::<Tile>::new()]));
    }

    #[test]
    fn test_check_table() {
        let v = Validator::default();
        let good = vec![tiles("1r, 2r, 3r"), tiles("9k, 9b, j")];
        assert_eq!(v.check_table(&good), Ok(()));
        assert!(v.is_valid_table_state(&good));
        assert!(v.is_valid_table_state(Vec::<Vec<Tile>>::new()));

        let bad = vec![tiles("1r, 2r, 3r"), tiles("9k, 9b")];
        assert_eq!(v.check_table(&bad), Err(TableIssue::InvalidSet { index: 1 }));

        let empty = vec![Vec::new()];
        assert_eq!(v.check_table(&empty), Err(TableIssue::EmptySet { index: 0 }));
    }

    #[test]
    fn test_can_extend() {
        let v = Validator::default();
        let run = tiles("4b, 5b, 6b");
        assert!(v.can_extend(&run, &tiles("7b")));
        assert!(v.can_extend(&run, &tiles("3b, 2b")));
        assert!(!v.can_extend(&run, &tiles("8b")));
        assert!(!v.can_extend(&run, &[]));

        let group = tiles("8r, 8b, 8k");
        assert!(v.can_extend(&group, &tiles("8o")));
        assert!(!v.can_extend(&group, &tiles("8r")));
    }

    #[test]
    fn test_replace_wild() {
        let v = Validator::default();
        let run = tiles("5b, j, 7b");
        assert_eq!(v.replace_wild(&run, Tile::new(6, Suit::Blue)), Some(tiles("5b, 6b, 7b")));
        assert_eq!(v.replace_wild(&run, Tile::new(6, Suit::Red)), None);
        assert_eq!(v.replace_wild(&tiles("5b, 6b, 7b"), Tile::new(8, Suit::Blue)), None);
        assert_eq!(v.replace_wild(&run, Tile::Wild), None);

        let group = tiles("3r, 3b, j");
        assert_eq!(v.replace_wild(&group, Tile::new(3, Suit::Orange)), Some(tiles("3r, 3b, 3o")));
        assert_eq!(v.replace_wild(&group, Tile::new(3, Suit::Black)), Some(tiles("3r, 3b, 3k")));
    }
}
