//! Fixed geometry of the 9×7 board packed into the low 63 bits of a `u64`.
//!
//! ```text
//!     012345678
//!   0 .........   cells 0..=8
//!   1 .........
//!   2 .........
//!   3 .........
//!   4 .........
//!   5 .........
//!   6 .........   cells 54..=62 (bottom row)
//! ```
//!
//! Bit 63 is never a cell; it doubles as the steal pseudo-move.

pub const WIDTH: usize = 9;
pub const HEIGHT: usize = 7;
pub const CELLS: usize = WIDTH * HEIGHT;

/// Index of the steal pseudo-move.
pub const STEAL: u8 = 63;

/// Upper bound on the number of legal moves in any state: one per column plus steal.
pub const MAX_MOVES: usize = WIDTH + 1;

/// All 63 cells.
pub const BOARD: u64 = (1u64 << CELLS) - 1;

/// Cells where a token lands when its column is empty.
pub const BOTTOM_ROW: u64 = 0x7fc0_0000_0000_0000;

pub const TOP_ROW: u64 = 0x1ff;

/// Column 0; shift left by `col` for any other column.
pub const FIRST_COLUMN: u64 = 0x0040_2010_0804_0201;

// Each mask keeps the cells that may END a run of four in its direction
// without the run wrapping around a row edge.
pub const HORIZONTAL_MASK: u64 = 0x7e3f_1f8f_c7e3_f1f8;
pub const DOWN_RIGHT_MASK: u64 = 0x7e3f_1f8f_c7e3_f1f8;
pub const DOWN_LEFT_MASK: u64 = 0x0fc7_e3f1_f8fc_7e3f;
pub const VERTICAL_MASK: u64 = (1u64 << 63) - 1;

/// Column visiting order that tries central columns first.
pub const CENTER_FIRST_COLUMNS: [usize; WIDTH] = [4, 3, 5, 2, 6, 1, 7, 0, 8];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Horizontal,
    Vertical,
    DownRight,
    DownLeft,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DownRight,
        Direction::DownLeft,
    ];

    /// Index distance between two neighbouring cells along this direction.
    #[inline]
    pub const fn stride(self) -> u32 {
        match self {
            Direction::Horizontal => 1,
            Direction::Vertical => WIDTH as u32,
            Direction::DownRight => WIDTH as u32 + 1,
            Direction::DownLeft => WIDTH as u32 - 1,
        }
    }

    #[inline]
    pub const fn mask(self) -> u64 {
        match self {
            Direction::Horizontal => HORIZONTAL_MASK,
            Direction::Vertical => VERTICAL_MASK,
            Direction::DownRight => DOWN_RIGHT_MASK,
            Direction::DownLeft => DOWN_LEFT_MASK,
        }
    }
}

#[inline]
pub const fn column_mask(col: usize) -> u64 {
    FIRST_COLUMN << col
}

#[inline]
pub const fn row_mask(row: usize) -> u64 {
    TOP_ROW << (row * WIDTH)
}
