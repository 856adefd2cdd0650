use crate::player::Player;

/// Result of evaluating a state. `Win` always belongs to the last mover.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    Ongoing,
    Win,
    Tie,
}

impl Status {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Status::Ongoing)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Ongoing => write!(f, "Ongoing"),
            Status::Win => write!(f, "Win"),
            Status::Tie => write!(f, "Tie"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    Winner(Player),
    Tie,
}

impl Outcome {
    /// Attributes a terminal `status` to a player. `None` while the game is ongoing.
    pub fn from_status(status: Status, last_player: Player) -> Option<Outcome> {
        match status {
            Status::Ongoing => None,
            Status::Win => Some(Outcome::Winner(last_player)),
            Status::Tie => Some(Outcome::Tie),
        }
    }

    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Winner(player) => Some(*player),
            Outcome::Tie => None,
        }
    }

    pub fn encode_from_perspective(&self, perspective: Player) -> f32 {
        match self {
            Outcome::Winner(player) if *player == perspective => 1.0,
            Outcome::Winner(_) => -1.0,
            Outcome::Tie => 0.0,
        }
    }

    pub fn is_tie(&self) -> bool {
        matches!(self, Outcome::Tie)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "Player {} wins", player),
            Outcome::Tie => write!(f, "Tie"),
        }
    }
}
