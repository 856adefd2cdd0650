use std::fmt;
use std::hash::{Hash, Hasher};

use crate::bitboard::Bitboard;
use crate::error::{StateError, StepError};
use crate::geometry::{BOARD, BOTTOM_ROW, CELLS, HEIGHT, WIDTH};
use crate::moves::AvailableMoves;
use crate::player::Player;
use crate::position::Position;
use crate::r#move::Move;
use crate::status::Status;
use crate::threat;
use crate::win;
use crate::zobrist::ZobristTable;

/// Board state: one ownership mask per player plus derived counters.
///
/// A `State` is a small `Copy` value; search code branches by copying it and
/// stepping the copy. Every copy shares the same read-only [`ZobristTable`].
///
/// Invariants, for every state reachable from [`State::new`]:
/// * `ownership[0] & ownership[1] == 0`
/// * `token_count == (ownership[0] | ownership[1]).count_ones()`
/// * `hash == zobrist.hash_of(&ownership)`
#[derive(Clone, Copy)]
pub struct State<'z> {
    ownership: [Bitboard; 2],
    hash: u64,
    next_player: Player,
    token_count: u8,
    zobrist: &'z ZobristTable,
}

/// The persisted shape of a [`State`]: the two masks and the two counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StateRecord {
    pub ownership: [u64; 2],
    pub next_player: u8,
    pub token_count: u8,
}

impl<'z> State<'z> {
    pub fn new(zobrist: &'z ZobristTable) -> Self {
        State {
            ownership: [Bitboard::empty(); 2],
            hash: 0,
            next_player: Player::First,
            token_count: 0,
            zobrist,
        }
    }

    /// Rebuilds a state from its record, rejecting masks or counters that
    /// break the board invariants.
    pub fn from_record(record: &StateRecord, zobrist: &'z ZobristTable) -> Result<Self, StateError> {
        let [first, second] = record.ownership;
        let off_board = (first | second) & !BOARD;
        if off_board != 0 {
            return Err(StateError::OffBoard(off_board));
        }
        if first & second != 0 {
            return Err(StateError::Overlap(first & second));
        }
        let actual = (first | second).count_ones();
        if actual != record.token_count as u32 {
            return Err(StateError::TokenCount {
                claimed: record.token_count,
                actual,
            });
        }
        let next_player =
            Player::from_index(record.next_player).ok_or(StateError::NextPlayer(record.next_player))?;
        if record.token_count == 0 && next_player != Player::First {
            return Err(StateError::FirstTurn(record.next_player));
        }
        // every token off the bottom row rests on another token
        let occupied = first | second;
        let floating = occupied & !BOTTOM_ROW & !(occupied >> WIDTH);
        if floating != 0 {
            return Err(StateError::Floating(floating));
        }

        let ownership = [Bitboard::from_bits(first), Bitboard::from_bits(second)];
        Ok(State {
            ownership,
            hash: zobrist.hash_of(&ownership),
            next_player,
            token_count: record.token_count,
            zobrist,
        })
    }

    pub fn record(&self) -> StateRecord {
        StateRecord {
            ownership: [self.ownership[0].bits(), self.ownership[1].bits()],
            next_player: self.next_player as u8,
            token_count: self.token_count,
        }
    }

    pub fn zobrist(&self) -> &'z ZobristTable {
        self.zobrist
    }

    #[inline]
    pub fn ownership(&self) -> [Bitboard; 2] {
        self.ownership
    }

    #[inline]
    pub fn stones_for(&self, player: Player) -> Bitboard {
        self.ownership[player.index()]
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.ownership[0] | self.ownership[1]
    }

    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[inline]
    pub fn next_player(&self) -> Player {
        self.next_player
    }

    #[inline]
    pub fn last_player(&self) -> Player {
        self.next_player.opposite()
    }

    #[inline]
    pub fn token_count(&self) -> u8 {
        self.token_count
    }

    pub fn is_full(&self) -> bool {
        self.token_count as usize == CELLS
    }

    /// Owner of cell `index`, if any. `None` off the board.
    pub fn cell(&self, index: u8) -> Option<Player> {
        if index as usize >= CELLS {
            None
        } else if self.ownership[0].get(index) {
            Some(Player::First)
        } else if self.ownership[1].get(index) {
            Some(Player::Second)
        } else {
            None
        }
    }

    pub fn piece(&self, pos: &Position) -> Option<Player> {
        if pos.is_valid() {
            self.cell(pos.to_index() as u8)
        } else {
            None
        }
    }

    /// Cell a token dropped into `col` would land on, or `None` if the column
    /// is full or out of range.
    pub fn free_position(&self, col: usize) -> Option<u8> {
        if col >= WIDTH {
            return None;
        }
        (0..HEIGHT)
            .rev()
            .map(|row| (row * WIDTH + col) as u8)
            .find(|&index| self.cell(index).is_none())
    }

    #[inline]
    pub fn available_moves(&self) -> AvailableMoves {
        AvailableMoves::of(self)
    }

    /// Applies `mv` after checking it against [`State::available_moves`].
    pub fn step(&mut self, mv: Move) -> Result<(), StepError> {
        let legal = self.available_moves();
        if !legal.contains(mv) {
            return Err(StepError::IllegalMove { mv, legal });
        }
        self.step_unchecked(mv);
        Ok(())
    }

    /// Applies `mv` without a legality check.
    ///
    /// `mv` must be a member of [`State::available_moves`]; debug builds
    /// assert it, release builds trust the caller.
    #[inline]
    #[cfg_attr(feature = "hotpath", hotpath::measure)]
    pub fn step_unchecked(&mut self, mv: Move) {
        debug_assert!(
            self.available_moves().contains(mv),
            "illegal move {} in state\n{}",
            mv,
            self
        );
        match mv {
            Move::Steal => {
                self.ownership.swap(0, 1);
                // every owner flips, so the incremental update does not apply
                self.recompute_hash();
            }
            Move::Drop { cell } => {
                let cell = cell.index();
                self.ownership[self.next_player.index()].set(cell);
                self.hash ^= self.zobrist.key(cell, self.next_player);
                self.token_count += 1;
            }
        }
        self.next_player = self.next_player.opposite();
        debug_assert!((self.ownership[0] & self.ownership[1]).is_empty());
    }

    /// Copy of this state with `mv` applied; `self` is untouched.
    pub fn successor(&self, mv: Move) -> Result<State<'z>, StepError> {
        let mut next = *self;
        next.step(mv)?;
        Ok(next)
    }

    pub fn recompute_hash(&mut self) {
        self.hash = self.zobrist.hash_of(&self.ownership);
    }

    pub fn hash_is_consistent(&self) -> bool {
        self.hash == self.zobrist.hash_of(&self.ownership)
    }

    #[cfg_attr(feature = "hotpath", hotpath::measure)]
    pub fn status(&self) -> Status {
        // no four is possible before the fourth token
        if self.token_count >= 4 && win::connects_four(self.stones_for(self.last_player()).bits()) {
            Status::Win
        } else if self.is_full() {
            Status::Tie
        } else {
            Status::Ongoing
        }
    }

    /// Empty cells that would complete a four for the player to move,
    /// whether or not gravity allows playing them yet.
    pub fn potentially_winning_moves(&self) -> Bitboard {
        let mine = self.stones_for(self.next_player).bits();
        let theirs = self.stones_for(self.last_player()).bits();
        Bitboard::from_bits(threat::potentially_winning_moves(mine, theirs))
    }

    /// The legal moves among [`State::potentially_winning_moves`].
    pub fn playable_threats(&self) -> AvailableMoves {
        let threats = AvailableMoves::from_bits(self.potentially_winning_moves().bits());
        self.available_moves().intersect(threats)
    }
}

/// Equality looks at ownership only; the other fields are derived from it
/// and the move history.
impl PartialEq for State<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.ownership == other.ownership
    }
}

impl Eq for State<'_> {}

impl Hash for State<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl fmt::Debug for State<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("ownership", &[self.ownership[0].bits(), self.ownership[1].bits()])
            .field("hash", &self.hash)
            .field("next_player", &self.next_player)
            .field("token_count", &self.token_count)
            .finish()
    }
}

impl fmt::Display for State<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..HEIGHT {
            for col in 0..WIDTH {
                let c = match self.cell((row * WIDTH + col) as u8) {
                    Some(player) => player.to_char(),
                    None => '.',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "Z-Hash: {}", self.hash)?;
        writeln!(f, "Number of tokens: {}", self.token_count)?;
        match self.status() {
            Status::Win => write!(f, "Player {} wins", self.last_player()),
            Status::Tie => write!(f, "Tie"),
            Status::Ongoing => write!(f, "Next to move: {}", self.next_player),
        }
    }
}
