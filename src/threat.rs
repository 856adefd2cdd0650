//! Open-three threats: empty cells that would complete a four for the mover.
//!
//! A four-cell window along a direction is a threat when the mover owns
//! exactly three of its cells and the fourth is empty. With `s` the stride,
//! at the window's end cell `p`:
//!
//! * `single = m ^ (m << s)` says exactly one of `p`, `p - s` is owned,
//! * `pair = m & (m << s)` says both are owned,
//!
//! so `single & (pair << 2s) | pair & (single << 2s)` marks windows holding
//! exactly three owned cells. Shifting the window marks back by `s` up to three
//! times visits every cell of each window; intersecting with the empty cells
//! leaves the missing fourth.
//!
//! The result ignores gravity. It is a move-ordering hint only; use
//! [`State::playable_threats`](crate::board::State::playable_threats) for the
//! subset that can be played right now.

use crate::geometry::{Direction, BOARD};

#[inline]
fn windows_of_three(mine: u64, dir: Direction) -> u64 {
    let s = dir.stride();
    let shifted = mine << s;
    let single = mine ^ shifted;
    let pair = mine & shifted;
    ((single & (pair << (2 * s))) | (pair & (single << (2 * s)))) & dir.mask()
}

#[inline]
pub fn scalar(mine: u64, theirs: u64) -> u64 {
    let holes = !(mine | theirs) & BOARD;
    let mut threats = 0;
    for dir in Direction::ALL {
        let s = dir.stride();
        let mut windows = windows_of_three(mine, dir);
        threats |= windows & holes;
        for _ in 0..3 {
            windows >>= s;
            threats |= windows & holes;
        }
    }
    threats
}

/// Same as [`scalar`], one direction per AVX2 lane.
///
/// # Safety
/// The CPU must support AVX2.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
pub unsafe fn avx2(mine: u64, theirs: u64) -> u64 {
    use std::arch::x86_64::*;

    use crate::win::lanes;

    let (shifts, shifts2) = lanes::strides();
    let bb = _mm256_set1_epi64x(mine as i64);
    let holes = _mm256_set1_epi64x((!(mine | theirs) & BOARD) as i64);

    let shifted = _mm256_sllv_epi64(bb, shifts);
    let single = _mm256_xor_si256(bb, shifted);
    let pair = _mm256_and_si256(bb, shifted);
    let low = _mm256_and_si256(single, _mm256_sllv_epi64(pair, shifts2));
    let high = _mm256_and_si256(pair, _mm256_sllv_epi64(single, shifts2));
    let mut windows = _mm256_and_si256(_mm256_or_si256(low, high), lanes::load(lanes::MASKS));

    let mut acc = _mm256_and_si256(windows, holes);
    for _ in 0..3 {
        windows = _mm256_srlv_epi64(windows, shifts);
        acc = _mm256_or_si256(acc, _mm256_and_si256(windows, holes));
    }

    (_mm256_extract_epi64::<0>(acc)
        | _mm256_extract_epi64::<1>(acc)
        | _mm256_extract_epi64::<2>(acc)
        | _mm256_extract_epi64::<3>(acc)) as u64
}

/// Build-time selected threat kernel.
#[inline]
#[cfg_attr(feature = "hotpath", hotpath::measure)]
pub fn potentially_winning_moves(mine: u64, theirs: u64) -> u64 {
    debug_assert_eq!(mine & theirs, 0);
    #[cfg(all(target_arch = "x86_64", target_feature = "avx2", not(feature = "scalar")))]
    {
        // SAFETY: the `avx2` target feature is enabled for this build.
        unsafe { avx2(mine, theirs) }
    }
    #[cfg(not(all(target_arch = "x86_64", target_feature = "avx2", not(feature = "scalar"))))]
    {
        scalar(mine, theirs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{HEIGHT, WIDTH};
    use rand::prelude::*;
    use rand::rngs::StdRng;

    fn cells(indices: &[u8]) -> u64 {
        indices.iter().fold(0, |acc, &i| acc | (1u64 << i))
    }

    /// Walks every four-cell window on the board.
    fn brute_force(mine: u64, theirs: u64) -> u64 {
        let steps: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];
        let mut threats = 0;
        for row in 0..HEIGHT as isize {
            for col in 0..WIDTH as isize {
                for (dr, dc) in steps {
                    let window: Vec<(isize, isize)> =
                        (0..4).map(|i| (row + i * dr, col + i * dc)).collect();
                    if window
                        .iter()
                        .any(|&(r, c)| r < 0 || c < 0 || r >= HEIGHT as isize || c >= WIDTH as isize)
                    {
                        continue;
                    }
                    let bits: Vec<u64> = window
                        .iter()
                        .map(|&(r, c)| 1u64 << (r as usize * WIDTH + c as usize))
                        .collect();
                    let owned = bits.iter().filter(|&&b| mine & b != 0).count();
                    let empty: Vec<u64> = bits
                        .iter()
                        .copied()
                        .filter(|&b| (mine | theirs) & b == 0)
                        .collect();
                    if owned == 3 && empty.len() == 1 {
                        threats |= empty[0];
                    }
                }
            }
        }
        threats
    }

    #[test]
    fn test_open_three_on_bottom_row() {
        assert_eq!(scalar(cells(&[54, 55, 56]), 0), cells(&[57]));
    }

    #[test]
    fn test_split_three_fills_gap() {
        assert_eq!(scalar(cells(&[54, 55, 57]), 0), cells(&[56]));
    }

    #[test]
    fn test_blocked_three_has_no_threat() {
        assert_eq!(scalar(cells(&[54, 55, 56]), cells(&[57])), 0);
    }

    #[test]
    fn test_vertical_three() {
        assert_eq!(scalar(cells(&[36, 45, 54]), 0), cells(&[27]));
    }

    #[test]
    fn test_pairs_are_not_threats() {
        assert_eq!(scalar(cells(&[54, 55]), 0), 0);
        assert_eq!(scalar(0, 0), 0);
    }

    #[test]
    fn test_no_threat_across_row_edge() {
        // 7, 8 on row 0 and 9 on row 1 are not aligned
        assert_eq!(scalar(cells(&[7, 8, 9]), 0) & cells(&[10, 6]), 0);
    }

    #[test]
    fn test_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..2_000 {
            let occupied = rng.random::<u64>() & rng.random::<u64>() & BOARD;
            let split = rng.random::<u64>();
            let mine = occupied & split;
            let theirs = occupied & !split;
            assert_eq!(scalar(mine, theirs), brute_force(mine, theirs));
            assert_eq!(potentially_winning_moves(mine, theirs), scalar(mine, theirs));
        }
    }
}
