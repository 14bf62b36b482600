//! Set hints for a hand.
//!
//! Built constructively: for each rank the suits held are combined with
//! available wilds into groups, and for each suit every rank window is
//! filled from the hand with wilds in the holes. A hand has at most two
//! wilds and a handful of tiles per suit, so nothing here explodes.

use rustc_hash::FxHashSet;

use super::validator::Validator;
use crate::core::tile::{Suit, Tile, MAX_RANK, MIN_RANK};

impl Validator {
    /// Every distinct set that can be formed from tiles in `hand`.
    ///
    /// Sets are distinct as tile multisets; a rank-7 group of one numbered
    /// tile and two wilds is reported once even though it is also a run.
    /// Groups come first (by rank), then runs (by suit, then start rank).
    #[must_use]
    pub fn possible_sets(&self, hand: &[Tile]) -> Vec<Vec<Tile>> {
        let wilds = hand.iter().filter(|t| t.is_wild()).count();
        let mut seen = FxHashSet::default();
        let mut found = Vec::new();
        let mut keep = |set: Vec<Tile>| {
            let mut key = set.clone();
            key.sort_unstable();
            if seen.insert(key) {
                found.push(set);
            }
        };

        for rank in MIN_RANK..=MAX_RANK {
            let suits: Vec<Suit> = Suit::ALL
                .into_iter()
                .filter(|&suit| hand.contains(&Tile::Numbered { rank, suit }))
                .collect();

            for mask in 1u32..(1 << suits.len()) {
                let members: Vec<Tile> = suits
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, &suit)| Tile::Numbered { rank, suit })
                    .collect();

                for size in self.min_set_size().max(members.len())..=self.max_group_size() {
                    let fill = size - members.len();
                    if fill > wilds {
                        break;
                    }
                    let mut set = members.clone();
                    set.extend(std::iter::repeat(Tile::Wild).take(fill));
                    keep(set);
                }
            }
        }

        for suit in Suit::ALL {
            let held = |rank: u8| hand.contains(&Tile::Numbered { rank, suit });
            for start in MIN_RANK..=MAX_RANK {
                let mut missing = 0;
                for end in start..=MAX_RANK {
                    if !held(end) {
                        missing += 1;
                    }
                    if missing > wilds {
                        break;
                    }
                    let len = usize::from(end - start + 1);
                    if len < self.min_set_size() || missing == len {
                        continue;
                    }
                    let set = (start..=end)
                        .map(|rank| if held(rank) { Tile::Numbered { rank, suit } } else { Tile::Wild })
                        .collect();
                    keep(set);
                }
            }
        }

        found
    }
}
