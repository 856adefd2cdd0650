#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Player {
    First = 0,
    Second = 1,
}

impl Player {
    #[inline]
    pub fn opposite(&self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Index into per-player arrays such as `State::ownership`.
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(i: u8) -> Option<Player> {
        match i {
            0 => Some(Player::First),
            1 => Some(Player::Second),
            _ => None,
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Player::First => '0',
            Player::Second => '1',
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
