use crate::geometry::{CELLS, STEAL, WIDTH};
use crate::position::Position;

/// A board cell index, always in `0..63`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell(u8);

impl Cell {
    pub const fn new(index: u8) -> Option<Cell> {
        if (index as usize) < CELLS {
            Some(Cell(index))
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }
}

/// A move in its integer encoding is a cell index in `0..63`, or `63` for steal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Move {
    Drop { cell: Cell },
    Steal,
}

impl Move {
    /// Drop onto `cell`; `None` off the board.
    pub const fn drop(cell: u8) -> Option<Self> {
        match Cell::new(cell) {
            Some(cell) => Some(Move::Drop { cell }),
            None => None,
        }
    }

    pub fn from_index(index: u8) -> Option<Move> {
        match index {
            STEAL => Some(Move::Steal),
            i => Move::drop(i),
        }
    }

    #[inline]
    pub fn index(&self) -> u8 {
        match self {
            Move::Drop { cell } => cell.index(),
            Move::Steal => STEAL,
        }
    }

    pub fn is_steal(&self) -> bool {
        matches!(self, Move::Steal)
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            Move::Drop { cell } => Some(Position::from_index(cell.index() as usize)),
            Move::Steal => None,
        }
    }

    pub fn column(&self) -> Option<u8> {
        match self {
            Move::Drop { cell } => Some(cell.index() % WIDTH as u8),
            Move::Steal => None,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Drop { cell } => write!(f, "Drop({})", cell.index()),
            Move::Steal => write!(f, "Steal"),
        }
    }
}

/// Drop onto a cell known to be on the board.
#[cfg(test)]
pub(crate) fn drop_at(cell: u8) -> Move {
    Move::drop(cell).expect("cell on the board")
}
