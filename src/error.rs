use crate::moves::AvailableMoves;
use crate::r#move::Move;

/// Rejected transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StepError {
    #[error("illegal move {mv} (legal: {legal})")]
    IllegalMove { mv: Move, legal: AvailableMoves },

    #[error("move index {0} is outside 0..=63")]
    InvalidIndex(u8),
}

/// Ownership masks and counters that no sequence of legal moves can produce.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("cells {0:#x} are owned by both players")]
    Overlap(u64),

    #[error("bits {0:#x} lie outside the 9x7 board")]
    OffBoard(u64),

    #[error("token count {claimed} does not match {actual} occupied cells")]
    TokenCount { claimed: u8, actual: u32 },

    #[error("next player {0} is not 0 or 1")]
    NextPlayer(u8),

    #[error("player {0} cannot move first on an empty board")]
    FirstTurn(u8),

    #[error("cells {0:#x} have an empty cell below them")]
    Floating(u64),
}
