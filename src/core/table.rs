//! The shared table of melded sets.
//!
//! Uses an `im` persistent vector so that copying the whole game state
//! before committing a move stays cheap.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::tile::Tile;

/// Ordered collection of melded sets, visible to everyone.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    sets: Vector<Vec<Tile>>,
}

impl Table {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a list of sets. No validation happens here.
    pub fn from_sets(sets: impl IntoIterator<Item = Vec<Tile>>) -> Self {
        Self {
            sets: sets.into_iter().collect(),
        }
    }

    /// Get the set at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&[Tile]> {
        self.sets.get(index).map(Vec::as_slice)
    }

    /// Iterate over the sets in table order.
    pub fn sets(&self) -> impl Iterator<Item = &[Tile]> {
        self.sets.iter().map(Vec::as_slice)
    }

    /// Copy the layout out as plain vectors.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Vec<Tile>> {
        self.sets.iter().cloned().collect()
    }

    /// Every tile on the table, set by set.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.sets.iter().flatten()
    }

    /// Number of sets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Number of tiles across all sets.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.sets.iter().map(Vec::len).sum()
    }

    pub(crate) fn push(&mut self, set: Vec<Tile>) {
        self.sets.push_back(set);
    }

    /// Replace the set at `index`. Panics if out of range.
    pub(crate) fn replace(&mut self, index: usize, set: Vec<Tile>) {
        self.sets.set(index, set);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Suit;

    #[test]
    fn test_table_basics() {
        let mut table = Table::new();
        assert!(table.is_empty());

        table.push(vec![Tile::new(1, Suit::Red), Tile::new(2, Suit::Red), Tile::new(3, Suit::Red)]);
        table.push(vec![Tile::new(9, Suit::Red), Tile::new(9, Suit::Blue), Tile::Wild]);

        assert_eq!(table.len(), 2);
        assert_eq!(table.tile_count(), 6);
        assert_eq!(table.get(1).map(<[Tile]>::len), Some(3));
        assert_eq!(table.get(2), None);
        assert_eq!(table.tiles().filter(|t| t.is_wild()).count(), 1);
    }

    #[test]
    fn test_replace_keeps_clone_independent() {
        let mut table = Table::from_sets(vec![vec![Tile::Wild]]);
        let snapshot = table.clone();

        table.replace(0, vec![Tile::new(5, Suit::Black)]);

        assert_eq!(snapshot.get(0), Some(&[Tile::Wild][..]));
        assert_eq!(table.to_vec(), vec![vec![Tile::new(5, Suit::Black)]]);
    }
}
