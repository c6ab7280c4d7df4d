//! Zobrist hashing of board positions.
//!
//! Every `(intersection, color)` pair gets an independent random 64-bit
//! fingerprint. A position hash is the XOR of the baseline (all Empty
//! fingerprints) with the fingerprint of each stone on the board, so placing
//! or removing one stone is a single XOR.
//!
//! Equal positions always hash equal. The converse only holds up to the
//! collision probability of 64-bit random values: two different positions
//! sharing a hash is possible, just vanishingly unlikely, and superko
//! detection inherits that probabilistic guarantee.

use std::collections::HashSet;

use tracing::warn;

use crate::board::GamePosition;
use crate::constants::HASH_COLLISION_RETRIES;
use crate::error::{GoError, Result};
use crate::stone::{Stone, StoneColor};

#[derive(Clone, Debug)]
pub struct ZobristHasher {
    width: usize,
    intersection_count: usize,
    /// Indexed by `color.index() * intersection_count + position`
    lookup: Vec<u64>,
    empty_hash: u64,
}

impl ZobristHasher {
    /// Build a table seeded from the thread-local `fastrand` generator.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let mut rng = fastrand::Rng::new();
        Self::from_source(width, height, || rng.u64(..))
    }

    /// Build a reproducible table from a fixed seed.
    pub fn with_seed(width: usize, height: usize, seed: u64) -> Result<Self> {
        let mut rng = fastrand::Rng::with_seed(seed);
        Self::from_source(width, height, || rng.u64(..))
    }

    /// Build a table by drawing fingerprints from `next`.
    ///
    /// # Errors
    /// [`GoError::HashGeneration`] if a duplicate value is drawn more than
    /// [`HASH_COLLISION_RETRIES`] times in a row. A working random source
    /// never gets there.
    pub fn from_source(width: usize, height: usize, mut next: impl FnMut() -> u64) -> Result<Self> {
        let intersection_count = width * height;
        let mut lookup = vec![0u64; intersection_count * StoneColor::ALL.len()];
        let mut used: HashSet<u64> = HashSet::with_capacity(lookup.len());

        for color in StoneColor::ALL {
            for index in 0..intersection_count {
                let mut value = next();
                let mut retries = 0;
                while used.contains(&value) {
                    retries += 1;
                    if retries > HASH_COLLISION_RETRIES {
                        return Err(GoError::HashGeneration { retries: HASH_COLLISION_RETRIES });
                    }
                    warn!(index, %color, retries, "fingerprint collision, redrawing");
                    value = next();
                }
                lookup[color.index() * intersection_count + index] = value;
                used.insert(value);
            }
        }

        let empty_hash = lookup[..intersection_count].iter().fold(0, |acc, v| acc ^ v);

        Ok(Self {
            width,
            intersection_count,
            lookup,
            empty_hash,
        })
    }

    /// Hash of the board with every intersection empty.
    #[inline]
    pub fn hash_of_empty_board(&self) -> u64 {
        self.empty_hash
    }

    /// Hash a whole position from scratch.
    pub fn full_hash(&self, position: &GamePosition) -> u64 {
        debug_assert_eq!(position.intersections().len(), self.intersection_count);
        position
            .intersections()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_stone())
            .fold(self.empty_hash, |hash, (index, &color)| hash ^ self.value(color, index))
    }

    /// Apply a set of stones that appeared or disappeared to `current_hash`.
    ///
    /// Each stone is keyed by its own color: a placed stone and a captured
    /// stone are both listed with the color they have on the board. Applying
    /// the same change twice undoes it. `Empty` entries carry no stone and are
    /// skipped.
    pub fn incremental_hash<'a>(&self, current_hash: u64, changes: impl IntoIterator<Item = &'a Stone>) -> u64 {
        changes
            .into_iter()
            .filter(|s| s.color.is_stone())
            .fold(current_hash, |hash, stone| hash ^ self.value(stone.color, stone.index(self.width)))
    }

    #[inline]
    fn value(&self, color: StoneColor, index: usize) -> u64 {
        self.lookup[color.index() * self.intersection_count + index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> ZobristHasher {
        ZobristHasher::with_seed(9, 9, 42).unwrap()
    }

    #[test]
    fn test_empty_board_matches_baseline() {
        let h = hasher();
        let pos = GamePosition::new(9, 9);
        assert_eq!(h.full_hash(&pos), h.hash_of_empty_board());
    }

    #[test]
    fn test_incremental_is_an_involution() {
        let h = hasher();
        let changes = [
            Stone::new(2, 2, StoneColor::Black),
            Stone::new(2, 3, StoneColor::White),
        ];
        let base = h.hash_of_empty_board();
        let once = h.incremental_hash(base, &changes);
        assert_ne!(once, base);
        assert_eq!(h.incremental_hash(once, &changes), base);
    }

    #[test]
    fn test_incremental_matches_full_hash() {
        let h = hasher();
        let mut pos = GamePosition::new(9, 9);
        pos.set(2, 2, StoneColor::Black);
        pos.set(3, 3, StoneColor::White);
        let stones: Vec<Stone> = pos.stones().collect();
        assert_eq!(h.incremental_hash(h.hash_of_empty_board(), &stones), h.full_hash(&pos));
    }

    #[test]
    fn test_colors_hash_differently() {
        let h = hasher();
        let base = h.hash_of_empty_board();
        let black = h.incremental_hash(base, &[Stone::new(4, 4, StoneColor::Black)]);
        let white = h.incremental_hash(base, &[Stone::new(4, 4, StoneColor::White)]);
        assert_ne!(black, white);
    }

    #[test]
    fn test_empty_changes_are_ignored() {
        let h = hasher();
        let base = h.hash_of_empty_board();
        assert_eq!(h.incremental_hash(base, &[Stone::new(1, 1, StoneColor::Empty)]), base);
    }

    #[test]
    fn test_same_seed_same_table() {
        let a = ZobristHasher::with_seed(5, 5, 7).unwrap();
        let b = ZobristHasher::with_seed(5, 5, 7).unwrap();
        assert_eq!(a.hash_of_empty_board(), b.hash_of_empty_board());
    }

    #[test]
    fn test_all_fingerprints_unique() {
        let h = hasher();
        let unique: HashSet<u64> = h.lookup.iter().copied().collect();
        assert_eq!(unique.len(), h.lookup.len());
    }

    #[test]
    fn test_broken_source_fails() {
        let result = ZobristHasher::from_source(3, 3, || 0xDEAD_BEEF);
        assert_eq!(result.unwrap_err(), GoError::HashGeneration { retries: HASH_COLLISION_RETRIES });
    }

    #[test]
    fn test_occasional_duplicate_is_retried() {
        // Every other draw repeats the previous value.
        let mut n = 0u64;
        let h = ZobristHasher::from_source(3, 3, || {
            n += 1;
            n / 2
        })
        .unwrap();
        let unique: HashSet<u64> = h.lookup.iter().copied().collect();
        assert_eq!(unique.len(), 27);
    }
}
