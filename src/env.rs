use crate::board::State;
use crate::error::StepError;
use crate::moves::AvailableMoves;
use crate::player::Player;
use crate::r#move::Move;
use crate::status::{Outcome, Status};
use crate::zobrist::ZobristTable;

/// Stateful wrapper over a single [`State`] for an external search driver.
///
/// It holds no history; drivers that need to branch copy [`Environment::state`]
/// and step the copies.
#[derive(Clone, Copy, Debug)]
pub struct Environment<'z> {
    state: State<'z>,
}

impl<'z> Environment<'z> {
    pub fn new(zobrist: &'z ZobristTable) -> Self {
        Environment {
            state: State::new(zobrist),
        }
    }

    pub fn from_state(state: State<'z>) -> Self {
        Environment { state }
    }

    /// Back to the empty board.
    pub fn reset(&mut self) {
        self.state = State::new(self.state.zobrist());
    }

    pub fn reset_to(&mut self, state: State<'z>) {
        self.state = state;
    }

    #[cfg_attr(feature = "hotpath", hotpath::measure)]
    pub fn available_moves(&self) -> AvailableMoves {
        self.state.available_moves()
    }

    pub fn step(&mut self, mv: Move) -> Result<(), StepError> {
        if let Err(err) = self.state.step(mv) {
            log::debug!("rejected step: {}", err);
            return Err(err);
        }
        if log::log_enabled!(log::Level::Trace) {
            let status = self.state.status();
            if status.is_terminal() {
                log::trace!("{} after {} ({} tokens)", status, mv, self.state.token_count());
            }
        }
        Ok(())
    }

    /// [`Environment::step`] for the integer move encoding (`0..=62` drop, `63` steal).
    pub fn step_index(&mut self, index: u8) -> Result<(), StepError> {
        let mv = Move::from_index(index).ok_or(StepError::InvalidIndex(index))?;
        self.step(mv)
    }

    pub fn status(&self) -> Status {
        self.state.status()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        Outcome::from_status(self.status(), self.last_player())
    }

    pub fn next_player(&self) -> Player {
        self.state.next_player()
    }

    pub fn last_player(&self) -> Player {
        self.state.last_player()
    }

    pub fn state(&self) -> &State<'z> {
        &self.state
    }
}

impl std::fmt::Display for Environment<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.state)
    }
}
