//! Zobrist keys for incremental position hashing.
//!
//! The table is an ordinary immutable value. Build it once at startup and hand
//! a shared reference to every [`State`](crate::board::State); nothing ever
//! writes to it afterwards, so concurrent searches can share it freely.

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::bitboard::Bitboard;
use crate::geometry::CELLS;
use crate::player::Player;

pub const DEFAULT_SEED: u64 = 42;

const KEYS: usize = CELLS * 2;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZobristTable {
    // key for (cell, owner) lives at 2 * cell + owner
    keys: [u64; KEYS],
    seed: u64,
}

impl ZobristTable {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut keys = [0u64; KEYS];
        for key in keys.iter_mut() {
            *key = rng.random::<u64>();
        }
        log::debug!("built zobrist table with {} keys (seed {})", KEYS, seed);
        ZobristTable { keys, seed }
    }

    /// Table built from [`DEFAULT_SEED`].
    pub fn standard() -> Self {
        Self::new(DEFAULT_SEED)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn key(&self, cell: u8, player: Player) -> u64 {
        self.keys[2 * cell as usize + player.index()]
    }

    /// Hash of `ownership` computed from scratch.
    #[cfg_attr(feature = "hotpath", hotpath::measure)]
    pub fn hash_of(&self, ownership: &[Bitboard; 2]) -> u64 {
        let mut hash = 0;
        for player in [Player::First, Player::Second] {
            for cell in ownership[player.index()].iter_ones() {
                hash ^= self.key(cell, player);
            }
        }
        hash
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_same_seed_same_table() {
        assert_eq!(ZobristTable::new(7), ZobristTable::new(7));
        assert_ne!(ZobristTable::new(7), ZobristTable::new(8));
        assert_eq!(ZobristTable::standard().seed(), DEFAULT_SEED);
    }

    #[test]
    fn test_keys_are_distinct_and_nonzero() {
        let table = ZobristTable::standard();
        let keys: HashSet<u64> = (0..CELLS as u8)
            .flat_map(|cell| [table.key(cell, Player::First), table.key(cell, Player::Second)])
            .collect();
        assert_eq!(keys.len(), KEYS);
        assert!(!keys.contains(&0));
    }

    #[test]
    fn test_hash_of_is_xor_of_keys() {
        let table = ZobristTable::standard();
        let ownership = [
            Bitboard::single(58) | Bitboard::single(49),
            Bitboard::single(57),
        ];
        let expected = table.key(58, Player::First)
            ^ table.key(49, Player::First)
            ^ table.key(57, Player::Second);
        assert_eq!(table.hash_of(&ownership), expected);
        assert_eq!(table.hash_of(&[Bitboard::empty(); 2]), 0);
    }

    #[test]
    fn test_owner_matters() {
        let table = ZobristTable::standard();
        let a = [Bitboard::single(58), Bitboard::empty()];
        let b = [Bitboard::empty(), Bitboard::single(58)];
        assert_ne!(table.hash_of(&a), table.hash_of(&b));
    }
}
