pub mod bitboard;
pub mod board;
pub mod env;
pub mod error;
pub mod geometry;
pub mod r#move;
pub mod moves;
pub mod player;
pub mod position;
pub mod status;
pub mod threat;
pub mod win;
pub mod zobrist;

#[cfg(feature = "serde")]
pub mod serde_support;

#[cfg(feature = "python")]
extern crate pyo3;

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule(gil_used = false)]
fn steal_four(m: &Bound<'_, PyModule>) -> PyResult<()> {
    use python_bindings::*;
    m.add_class::<PyEnvironment>()?;
    m.add("ONGOING", STATUS_ONGOING)?;
    m.add("WIN", STATUS_WIN)?;
    m.add("TIE", STATUS_TIE)?;
    m.add("STEAL", geometry::STEAL)?;
    m.add("WIDTH", geometry::WIDTH)?;
    m.add("HEIGHT", geometry::HEIGHT)?;
    Ok(())
}

#[cfg(feature = "python")]
mod python_bindings {
    use super::*;
    use std::sync::OnceLock;

    use crate::board::{State, StateRecord};
    use crate::env::Environment;
    use crate::status::Status;
    use crate::zobrist::ZobristTable;

    pub const STATUS_ONGOING: u8 = 0;
    pub const STATUS_WIN: u8 = 1;
    pub const STATUS_TIE: u8 = 2;

    /// Python owns environments for arbitrary lifetimes, so the binding layer
    /// keeps one standard table for the whole process.
    fn table() -> &'static ZobristTable {
        static TABLE: OnceLock<ZobristTable> = OnceLock::new();
        TABLE.get_or_init(ZobristTable::standard)
    }

    fn value_error(msg: String) -> PyErr {
        PyErr::new::<pyo3::exceptions::PyValueError, _>(msg)
    }

    #[pyclass(name = "Environment")]
    #[derive(Clone)]
    pub struct PyEnvironment {
        env: Environment<'static>,
    }

    #[pymethods]
    impl PyEnvironment {
        #[new]
        pub fn new() -> Self {
            PyEnvironment {
                env: Environment::new(table()),
            }
        }

        pub fn reset(&mut self) {
            self.env.reset()
        }

        /// Resets to the state given by its two masks and counters.
        pub fn reset_to(
            &mut self,
            first: u64,
            second: u64,
            next_player: u8,
            token_count: u8,
        ) -> PyResult<()> {
            let record = StateRecord {
                ownership: [first, second],
                next_player,
                token_count,
            };
            let state = State::from_record(&record, table()).map_err(|e| value_error(e.to_string()))?;
            self.env.reset_to(state);
            Ok(())
        }

        pub fn step(&mut self, action: u8) -> PyResult<()> {
            self.env
                .step_index(action)
                .map_err(|e| value_error(e.to_string()))
        }

        pub fn available_moves(&self) -> Vec<u8> {
            self.env.available_moves().iter().map(|mv| mv.index()).collect()
        }

        pub fn potentially_winning_moves(&self) -> Vec<u8> {
            self.env.state().potentially_winning_moves().iter_ones().collect()
        }

        pub fn status(&self) -> u8 {
            match self.env.status() {
                Status::Ongoing => STATUS_ONGOING,
                Status::Win => STATUS_WIN,
                Status::Tie => STATUS_TIE,
            }
        }

        pub fn next_player(&self) -> u8 {
            self.env.next_player() as u8
        }

        pub fn last_player(&self) -> u8 {
            self.env.last_player() as u8
        }

        pub fn ownership(&self) -> (u64, u64) {
            let [first, second] = self.env.state().ownership();
            (first.bits(), second.bits())
        }

        pub fn hash(&self) -> u64 {
            self.env.state().hash()
        }

        pub fn token_count(&self) -> u8 {
            self.env.state().token_count()
        }

        pub fn copy(&self) -> Self {
            self.clone()
        }

        pub fn __str__(&self) -> String {
            self.env.to_string()
        }

        pub fn __repr__(&self) -> String {
            format!(
                "Environment(tokens={}, next_player={})",
                self.env.state().token_count(),
                self.env.next_player()
            )
        }
    }
}
