//! Four-in-a-row detection on a single ownership mask.
//!
//! For a direction with stride `s`, `m & (m << s)` marks the end cell of every
//! run of two; repeating with `2s` marks the end cell of every run of four.
//! The direction mask then drops runs that wrapped around a board edge.
//!
//! Two interchangeable kernels implement [`RunDetector`]: [`Scalar`], which
//! works on any target, and [`Avx2`], which evaluates the four directions in
//! the four 64-bit lanes of one AVX2 register. They must agree bit for bit.

use crate::geometry::{Direction, BOARD};
use crate::threat;

pub trait RunDetector {
    /// True if `mask` holds four consecutive cells along any direction.
    fn connects_four(&self, mask: u64) -> bool;

    /// Empty cells that would give `mine` a four. See [`crate::threat`].
    fn potentially_winning_moves(&self, mine: u64, theirs: u64) -> u64;
}

/// End cells of the runs of four in `mask` along `dir`.
#[inline]
pub fn run_ends(mask: u64, dir: Direction) -> u64 {
    let s = dir.stride();
    let pairs = mask & (mask << s);
    pairs & (pairs << (2 * s)) & dir.mask()
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Scalar;

impl RunDetector for Scalar {
    #[inline]
    fn connects_four(&self, mask: u64) -> bool {
        Direction::ALL.iter().any(|&dir| run_ends(mask, dir) != 0)
    }

    #[inline]
    fn potentially_winning_moves(&self, mine: u64, theirs: u64) -> u64 {
        threat::scalar(mine, theirs)
    }
}

/// AVX2 kernel. Only obtainable through [`Avx2::detect`], so holding one
/// proves the running CPU supports the instructions.
#[derive(Clone, Copy, Debug)]
pub struct Avx2 {
    _private: (),
}

impl Avx2 {
    #[cfg(target_arch = "x86_64")]
    pub fn detect() -> Option<Self> {
        if std::is_x86_feature_detected!("avx2") {
            Some(Avx2 { _private: () })
        } else {
            None
        }
    }

    #[cfg(not(target_arch = "x86_64"))]
    pub fn detect() -> Option<Self> {
        None
    }
}

#[cfg(target_arch = "x86_64")]
impl RunDetector for Avx2 {
    #[inline]
    fn connects_four(&self, mask: u64) -> bool {
        // SAFETY: an `Avx2` value exists only after runtime detection succeeded.
        unsafe { lanes::connects_four(mask) }
    }

    #[inline]
    fn potentially_winning_moves(&self, mine: u64, theirs: u64) -> u64 {
        // SAFETY: as above.
        unsafe { threat::avx2(mine, theirs) }
    }
}

#[cfg(not(target_arch = "x86_64"))]
impl RunDetector for Avx2 {
    fn connects_four(&self, mask: u64) -> bool {
        Scalar.connects_four(mask)
    }

    fn potentially_winning_moves(&self, mine: u64, theirs: u64) -> u64 {
        Scalar.potentially_winning_moves(mine, theirs)
    }
}

/// Per-lane parameters, lane `i` handling `Direction::ALL[i]`.
#[cfg(target_arch = "x86_64")]
pub(crate) mod lanes {
    use std::arch::x86_64::*;

    use crate::geometry::{DOWN_LEFT_MASK, DOWN_RIGHT_MASK, HORIZONTAL_MASK, VERTICAL_MASK};

    pub(crate) const MASKS: [u64; 4] = [HORIZONTAL_MASK, VERTICAL_MASK, DOWN_RIGHT_MASK, DOWN_LEFT_MASK];
    pub(crate) const STRIDES: [u64; 4] = [1, 9, 10, 8];

    #[inline]
    #[target_feature(enable = "avx2")]
    pub(crate) unsafe fn load(lanes: [u64; 4]) -> __m256i {
        _mm256_set_epi64x(lanes[3] as i64, lanes[2] as i64, lanes[1] as i64, lanes[0] as i64)
    }

    #[inline]
    #[target_feature(enable = "avx2")]
    pub(crate) unsafe fn strides() -> (__m256i, __m256i) {
        let s = STRIDES;
        (load(s), load([2 * s[0], 2 * s[1], 2 * s[2], 2 * s[3]]))
    }

    #[target_feature(enable = "avx2")]
    pub(crate) unsafe fn connects_four(mask: u64) -> bool {
        let (shifts, shifts2) = strides();
        let mut bb = _mm256_set1_epi64x(mask as i64);
        bb = _mm256_and_si256(bb, _mm256_sllv_epi64(bb, shifts));
        bb = _mm256_and_si256(bb, _mm256_sllv_epi64(bb, shifts2));
        _mm256_testz_si256(bb, load(MASKS)) == 0
    }
}

/// Build-time selected detector: AVX2 when compiled for it, scalar otherwise.
#[inline]
#[cfg_attr(feature = "hotpath", hotpath::measure)]
pub fn connects_four(mask: u64) -> bool {
    debug_assert_eq!(mask & !BOARD, 0);
    #[cfg(all(target_arch = "x86_64", target_feature = "avx2", not(feature = "scalar")))]
    {
        // SAFETY: the `avx2` target feature is enabled for this build.
        unsafe { lanes::connects_four(mask) }
    }
    #[cfg(not(all(target_arch = "x86_64", target_feature = "avx2", not(feature = "scalar"))))]
    {
        Scalar.connects_four(mask)
    }
}
