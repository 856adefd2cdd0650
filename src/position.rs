use crate::geometry::{HEIGHT, WIDTH};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub col: u8,
    pub row: u8,
}

impl Position {
    pub fn new(col: u8, row: u8) -> Self {
        Position { col, row }
    }

    pub fn from_index(index: usize) -> Self {
        Position {
            col: (index % WIDTH) as u8,
            row: (index / WIDTH) as u8,
        }
    }

    pub fn to_index(&self) -> usize {
        self.row as usize * WIDTH + self.col as usize
    }

    pub fn is_valid(&self) -> bool {
        (self.col as usize) < WIDTH && (self.row as usize) < HEIGHT
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}
