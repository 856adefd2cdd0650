use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, Not};

/// One bit per cell of the 9×7 board, packed into a single `u64`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bitboard(u64);

impl Bitboard {
    /// All bits zero.
    #[inline]
    pub const fn empty() -> Self {
        Bitboard(0)
    }

    /// Single bit set at `index`.
    #[inline]
    pub const fn single(index: u8) -> Self {
        debug_assert!(index < 64);
        Bitboard(1u64 << index)
    }

    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        Bitboard(bits)
    }

    #[inline]
    pub const fn bits(&self) -> u64 {
        self.0
    }

    /// Test whether bit `index` is set.
    #[inline]
    pub const fn get(&self, index: u8) -> bool {
        index < 64 && (self.0 >> index) & 1 != 0
    }

    #[inline]
    pub fn set(&mut self, index: u8) {
        self.0 |= 1u64 << index;
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Population count.
    #[inline]
    pub const fn count(&self) -> u32 {
        self.0.count_ones()
    }

    /// Index of the lowest set bit, or `None` if empty.
    #[inline]
    pub const fn lowest_bit_index(&self) -> Option<u8> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0.trailing_zeros() as u8)
        }
    }

    /// Index of the `n`-th lowest set bit (0-based), or `None` if fewer are set.
    ///
    /// Deposits bit `n` into the set positions: with BMI2 this is a single
    /// `pdep`, otherwise the lowest `n` bits are stripped one at a time.
    #[inline]
    pub fn nth_set_bit(&self, n: u32) -> Option<u8> {
        if n >= self.count() {
            return None;
        }
        Some(deposit_nth(self.0, n))
    }

    /// Shift all bits toward higher indices (down the board). Bits past 63 are lost.
    #[inline]
    pub const fn shift_left(&self, n: u32) -> Self {
        Bitboard(self.0 << n)
    }

    /// Shift all bits toward lower indices (up the board). Bits below 0 are lost.
    #[inline]
    pub const fn shift_right(&self, n: u32) -> Self {
        Bitboard(self.0 >> n)
    }

    /// Iterate over indices of set bits in ascending order.
    #[inline]
    pub fn iter_ones(&self) -> BitIterator {
        BitIterator { remaining: self.0 }
    }
}

#[cfg(all(target_arch = "x86_64", target_feature = "bmi2"))]
#[inline]
fn deposit_nth(bits: u64, n: u32) -> u8 {
    // SAFETY: the `bmi2` target feature is enabled for this build.
    let deposited = unsafe { std::arch::x86_64::_pdep_u64(1u64 << n, bits) };
    deposited.trailing_zeros() as u8
}

#[cfg(not(all(target_arch = "x86_64", target_feature = "bmi2")))]
#[inline]
fn deposit_nth(bits: u64, n: u32) -> u8 {
    let mut remaining = bits;
    for _ in 0..n {
        remaining &= remaining - 1;
    }
    remaining.trailing_zeros() as u8
}

impl BitAnd for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitand(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Bitboard) {
        self.0 &= rhs.0;
    }
}

impl BitOr for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Bitboard) {
        self.0 |= rhs.0;
    }
}

impl BitXor for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitxor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl Not for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn not(self) -> Bitboard {
        Bitboard(!self.0)
    }
}

/// Iterator over set-bit indices in a `Bitboard`.
#[derive(Clone, Debug)]
pub struct BitIterator {
    remaining: u64,
}

impl Iterator for BitIterator {
    type Item = u8;
    #[inline]
    fn next(&mut self) -> Option<u8> {
        if self.remaining == 0 {
            return None;
        }
        let bit = self.remaining.trailing_zeros() as u8;
        // Clear lowest set bit
        self.remaining &= self.remaining - 1;
        Some(bit)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for BitIterator {}
