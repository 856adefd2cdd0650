use crate::bitboard::{BitIterator, Bitboard};
use crate::board::State;
use crate::geometry::{column_mask, BOTTOM_ROW, CENTER_FIRST_COLUMNS, STEAL, WIDTH};
use crate::player::Player;
use crate::r#move::Move;

/// Legal moves of a state as a bit set: one gravity-drop cell per non-full
/// column, plus bit 63 when the steal is on offer.
///
/// Cheap to build; it is recomputed from the state on every call rather
/// than cached.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct AvailableMoves(Bitboard);

impl AvailableMoves {
    #[cfg_attr(feature = "hotpath", hotpath::measure)]
    pub fn of(state: &State<'_>) -> Self {
        let filled = state.occupied().bits();
        // lowest empty cell of each column: the cell above every filled one,
        // or the bottom cell of an empty column
        let mut moves = ((filled >> WIDTH) | BOTTOM_ROW) & !filled;
        if state.token_count() == 1 && state.next_player() == Player::Second {
            moves |= 1u64 << STEAL;
        }
        AvailableMoves(Bitboard::from_bits(moves))
    }

    pub const fn from_bits(bits: u64) -> Self {
        AvailableMoves(Bitboard::from_bits(bits))
    }

    #[inline]
    pub const fn bits(&self) -> u64 {
        self.0.bits()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.count() as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn contains(&self, mv: Move) -> bool {
        match mv {
            Move::Drop { cell } => self.0.get(cell.index()),
            Move::Steal => self.has_steal(),
        }
    }

    /// Membership by integer encoding; anything above 63 is never legal.
    #[inline]
    pub fn contains_index(&self, index: u8) -> bool {
        index <= STEAL && self.0.get(index)
    }

    /// The `k`-th legal move in ascending index order.
    #[inline]
    pub fn get(&self, k: usize) -> Option<Move> {
        let k = u32::try_from(k).ok()?;
        self.0.nth_set_bit(k).and_then(Move::from_index)
    }

    /// Lowest-index legal move.
    #[inline]
    pub fn first(&self) -> Option<Move> {
        self.0.lowest_bit_index().and_then(Move::from_index)
    }

    pub fn has_steal(&self) -> bool {
        self.0.get(STEAL)
    }

    #[inline]
    pub fn iter(&self) -> MoveIter {
        MoveIter(self.0.iter_ones())
    }

    /// Drop moves from the central columns outwards, then the steal if present.
    pub fn iter_center_first(&self) -> impl Iterator<Item = Move> + '_ {
        CENTER_FIRST_COLUMNS
            .iter()
            .filter_map(move |&col| {
                Bitboard::from_bits(self.bits() & column_mask(col))
                    .lowest_bit_index()
                    .and_then(Move::drop)
            })
            .chain(self.has_steal().then_some(Move::Steal))
    }

    pub fn intersect(&self, other: AvailableMoves) -> AvailableMoves {
        AvailableMoves(self.0 & other.0)
    }

    pub fn filter_out(&self, other: AvailableMoves) -> AvailableMoves {
        AvailableMoves(self.0 & !other.0)
    }

    /// Each drop cell moved one row down, toward the cell it rests on.
    pub fn move_below(&self) -> AvailableMoves {
        AvailableMoves(self.0.shift_left(WIDTH as u32))
    }
}

impl<'a> IntoIterator for &'a AvailableMoves {
    type Item = Move;
    type IntoIter = MoveIter;

    fn into_iter(self) -> MoveIter {
        self.iter()
    }
}

impl IntoIterator for AvailableMoves {
    type Item = Move;
    type IntoIter = MoveIter;

    fn into_iter(self) -> MoveIter {
        self.iter()
    }
}

/// Ascending iterator over the moves in an [`AvailableMoves`].
#[derive(Clone, Debug)]
pub struct MoveIter(BitIterator);

impl Iterator for MoveIter {
    type Item = Move;

    #[inline]
    fn next(&mut self) -> Option<Move> {
        self.0.next().and_then(Move::from_index)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for MoveIter {}

impl std::fmt::Display for AvailableMoves {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let indices: Vec<String> = self.iter().map(|mv| mv.index().to_string()).collect();
        write!(f, "[{}]", indices.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#move::drop_at;
    use crate::zobrist::ZobristTable;

    #[test]
    fn test_initial_moves_are_bottom_row() {
        let table = ZobristTable::standard();
        let state = State::new(&table);
        let moves = state.available_moves();
        assert_eq!(moves.bits(), BOTTOM_ROW);
        assert_eq!(moves.len(), WIDTH);
        assert!(!moves.has_steal());
        let indices: Vec<u8> = moves.iter().map(|mv| mv.index()).collect();
        assert_eq!(indices, (54..63).collect::<Vec<u8>>());
    }

    #[test]
    fn test_column_four_scenario() {
        let table = ZobristTable::standard();
        let mut state = State::new(&table);
        state.step_unchecked(drop_at(58));

        let moves = state.available_moves();
        assert_eq!(moves.bits() & column_mask(4), 1u64 << 49);
        assert_eq!(moves.len(), WIDTH + 1);
        assert!(moves.has_steal());
        assert!(moves.contains(Move::Steal));
        assert!(moves.contains(drop_at(49)));
        assert!(!moves.contains(drop_at(58)));
        assert!(!moves.contains(drop_at(40)));
    }

    #[test]
    fn test_steal_only_on_second_players_first_turn() {
        let table = ZobristTable::standard();
        let mut state = State::new(&table);
        assert!(!state.available_moves().has_steal());
        state.step_unchecked(drop_at(54));
        assert!(state.available_moves().has_steal());
        state.step_unchecked(drop_at(55));
        assert!(!state.available_moves().has_steal());

        // after a steal the first player moves with one token down; no second steal
        let mut stolen = State::new(&table);
        stolen.step_unchecked(drop_at(58));
        stolen.step_unchecked(Move::Steal);
        assert_eq!(stolen.token_count(), 1);
        assert_eq!(stolen.next_player(), Player::First);
        assert!(!stolen.available_moves().has_steal());
    }

    #[test]
    fn test_indexed_access_matches_iteration() {
        let table = ZobristTable::standard();
        let mut state = State::new(&table);
        state.step_unchecked(drop_at(56));
        let moves = state.available_moves();
        let collected: Vec<Move> = moves.iter().collect();
        for (k, mv) in collected.iter().enumerate() {
            assert_eq!(moves.get(k), Some(*mv));
        }
        assert_eq!(moves.get(collected.len()), None);
        assert_eq!(moves.first(), collected.first().copied());
        assert_eq!(collected.last(), Some(&Move::Steal));
    }

    #[test]
    fn test_iteration_is_restartable() {
        let moves = AvailableMoves::from_bits(BOTTOM_ROW);
        let first: Vec<Move> = moves.iter().collect();
        let second: Vec<Move> = (&moves).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(moves.iter().len(), WIDTH);
    }

    #[test]
    fn test_center_first_order() {
        let moves = AvailableMoves::from_bits(BOTTOM_ROW | (1u64 << STEAL));
        let order: Vec<u8> = moves.iter_center_first().map(|mv| mv.index()).collect();
        assert_eq!(order, vec![58, 57, 59, 56, 60, 55, 61, 54, 62, 63]);
    }

    #[test]
    fn test_contains_index_bounds() {
        let moves = AvailableMoves::from_bits(1u64 << STEAL);
        assert!(moves.contains_index(63));
        assert!(!moves.contains_index(64));
        assert!(!moves.contains_index(200));
    }

    #[test]
    fn test_set_algebra() {
        let a = AvailableMoves::from_bits(0b1110);
        let b = AvailableMoves::from_bits(0b0110);
        assert_eq!(a.intersect(b).bits(), 0b0110);
        assert_eq!(a.filter_out(b).bits(), 0b1000);
        assert_eq!(AvailableMoves::from_bits(1u64 << 49).move_below().bits(), 1u64 << 58);
    }

    #[test]
    fn test_display() {
        let moves = AvailableMoves::from_bits((1u64 << 49) | (1u64 << STEAL));
        assert_eq!(moves.to_string(), "[49, 63]");
    }
}
