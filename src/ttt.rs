use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use itertools::Itertools;
use strum::IntoEnumIterator;
use strum_macros::Display;

use crate::error::{Error, Result};
use crate::min_max;
use crate::min_max::cache::{Cache, Transpositions, TranspositionTable};
use crate::min_max::stats::{SimpleStats, Stats};
use crate::min_max::symmetry::{BoardSymmetry, GridSymmetry};
use crate::min_max::Player;
use crate::rules::{self, GameResult, WinCondition};

pub const MIN_BOARD_SIZE: usize = 3;

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Display)]
pub enum Symbol {
    #[strum(serialize = ".")]
    Empty,
    X,
    O,
}

impl Symbol {
    pub fn opponent(self) -> Symbol {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
            Symbol::Empty => Symbol::Empty,
        }
    }

    pub fn is_player(self) -> bool {
        self != Symbol::Empty
    }
}

/// Only the two player symbols parse; there is no textual form of an empty cell.
impl FromStr for Symbol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "X" => Ok(Symbol::X),
            "O" => Ok(Symbol::O),
            _ => Err(Error::InvalidSymbol { symbol: s.to_string() }),
        }
    }
}

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Square grid, row-major.
#[derive(Debug, Clone)]
pub struct GameBoard {
    size: usize,
    cells: Vec<Symbol>,
    win_condition: Arc<dyn WinCondition>,
}

impl PartialEq for GameBoard {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.cells == other.cells
    }
}

impl Eq for GameBoard {}

impl GameBoard {
    pub fn empty(size: usize) -> Result<Self> {
        Self::new(size, vec![Symbol::Empty; size * size])
    }

    pub fn new(size: usize, cells: Vec<Symbol>) -> Result<Self> {
        if size < MIN_BOARD_SIZE {
            return Err(Error::InvalidBoardSize { size, minimum: MIN_BOARD_SIZE });
        }
        if cells.len() != size * size {
            return Err(Error::InvalidCellCount { size, expected: size * size, got: cells.len() });
        }
        Ok(Self { size, cells, win_condition: rules::for_size(size) })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[Symbol] {
        &self.cells
    }

    pub fn get(&self, cell: Cell) -> Symbol {
        self.cells[self.index(cell)]
    }

    fn index(&self, cell: Cell) -> usize {
        cell.row * self.size + cell.col
    }

    fn cell_at(&self, index: usize) -> Cell {
        Cell::new(index / self.size, index % self.size)
    }

    /// Overwrites whatever is in `cell`.
    pub fn set(&mut self, cell: Cell, symbol: Symbol) {
        let index = self.index(cell);
        self.cells[index] = symbol;
    }

    pub fn apply_move(&mut self, cell: Cell, symbol: Symbol) {
        let index = self.index(cell);
        debug_assert_eq!(self.cells[index], Symbol::Empty, "{:?} is occupied", cell);
        self.cells[index] = symbol;
    }

    pub fn undo_move(&mut self, cell: Cell) {
        let index = self.index(cell);
        self.cells[index] = Symbol::Empty;
    }

    /// Row-major; this order is the search's move order and tie-break.
    pub fn empty_cells(&self) -> Vec<Cell> {
        self.cells.iter()
            .positions(|&symbol| symbol == Symbol::Empty)
            .map(|index| self.cell_at(index))
            .collect()
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Symbol::Empty)
    }

    pub fn check_winner(&self) -> GameResult {
        self.win_condition.check(&self.cells)
    }

    /// +1 if `player` has a line, -1 if the opponent has one, 0 otherwise.
    pub fn evaluate(&self, player: Symbol) -> i32 {
        match self.check_winner() {
            GameResult::Won(winner) if winner == player => 1,
            GameResult::Won(_) => -1,
            GameResult::NoWinner => 0,
        }
    }

    /// The board under each of the 8 symmetries, identity first.
    pub fn transpositions(&self) -> Vec<GameBoard> {
        GridSymmetry::iter()
            .map(|symmetry| GameBoard {
                size: self.size,
                cells: symmetry.apply(self.size, &self.cells),
                win_condition: self.win_condition.clone(),
            })
            .collect()
    }

    /// Row-major symbols joined by `,`, `.` for empty.
    pub fn encode(&self) -> String {
        self.cells.iter().join(",")
    }

    pub fn symmetry(&self) -> BoardSymmetry {
        BoardSymmetry::of(self.size, &self.cells)
    }
}

impl fmt::Display for GameBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            writeln!(f, "{}", row.iter().join(" "))?;
        }
        Ok(())
    }
}

/// A board searched for `maximizer` with `to_move` to play next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    board: GameBoard,
    to_move: Symbol,
    maximizer: Symbol,
}

impl Position {
    /// Position with `player` to move, scored for `player`.
    pub fn new(board: GameBoard, player: Symbol) -> Self {
        debug_assert!(player.is_player());
        Self { board, to_move: player, maximizer: player }
    }

    pub fn board(&self) -> &GameBoard {
        &self.board
    }

    pub fn to_move(&self) -> Symbol {
        self.to_move
    }

    pub fn into_board(self) -> GameBoard {
        self.board
    }
}

impl Transpositions for Position {
    fn transposition_keys(&self) -> Vec<String> {
        // the same grid means something else with another side to move or scored for the other player
        self.board.transpositions()
            .iter()
            .map(|board| format!("{}{}:{}", self.maximizer, self.to_move, board.encode()))
            .collect()
    }
}

pub struct Strategy<CACHE: Cache<Position>> {
    cache: CACHE,
    pub stats: SimpleStats,
}

impl<CACHE: Cache<Position>> Strategy<CACHE> {
    pub fn new(cache: CACHE) -> Self {
        Self { cache, stats: SimpleStats::default() }
    }
}

impl Default for Strategy<Arc<TranspositionTable>> {
    fn default() -> Self {
        Self::new(Arc::new(TranspositionTable::new()))
    }
}

impl<CACHE: Cache<Position>> min_max::Strategy for Strategy<CACHE> {
    type State = Position;
    type Move = Cell;
    type Cache = CACHE;
    type Stats = SimpleStats;

    fn possible_moves(state: &Position) -> Vec<Cell> {
        state.board.empty_cells()
    }

    /// Skips cells that mirror an earlier empty cell under a symmetry of the
    /// board. The earlier cell has the same value and wins the tie anyway.
    fn root_moves(&mut self, state: &Position) -> Vec<Cell> {
        let symmetry = state.board.symmetry();
        let (canonical, mirrored): (Vec<Cell>, Vec<Cell>) = state.board.empty_cells()
            .into_iter()
            .partition(|&cell| symmetry.is_canonical(state.board.index(cell)));
        mirrored.iter().for_each(|_| self.stats.record_symmetric_skip());
        canonical
    }

    fn player_to_move(state: &Position) -> Player {
        if state.to_move == state.maximizer {
            Player::Max
        } else {
            Player::Min
        }
    }

    fn score(state: &Position) -> i32 {
        state.board.evaluate(state.maximizer)
    }

    fn is_exhausted(state: &Position) -> bool {
        state.board.is_full()
    }

    fn do_move(state: &mut Position, cell: &Cell) {
        state.board.apply_move(*cell, state.to_move);
        state.to_move = state.to_move.opponent();
    }

    fn undo_move(state: &mut Position, cell: &Cell) {
        state.board.undo_move(*cell);
        state.to_move = state.to_move.opponent();
    }

    fn cache(&self) -> &CACHE {
        &self.cache
    }

    fn stats(&mut self) -> &mut SimpleStats {
        &mut self.stats
    }
}

#[cfg(test)]
pub(crate) mod test {
    use std::collections::HashSet;
    use std::time::Instant;

    use crate::min_max::cache::{Cache, CacheEntry, NullCache};
    use crate::min_max::deadline::Deadline;
    use crate::min_max::{best_move, score_possible_moves, Strategy as _};
    use super::Symbol::{Empty as E, O, X};
    use super::*;

    pub(crate) fn board(size: usize, cells: &[Symbol]) -> GameBoard {
        GameBoard::new(size, cells.to_vec()).unwrap()
    }

    #[test]
    fn parse_symbol() {
        assert_eq!("X".parse::<Symbol>(), Ok(X));
        assert_eq!("O".parse::<Symbol>(), Ok(O));
        assert_eq!("Z".parse::<Symbol>(), Err(Error::InvalidSymbol { symbol: "Z".to_string() }));
        assert!("".parse::<Symbol>().is_err());
        assert!("x".parse::<Symbol>().is_err());
        assert!(".".parse::<Symbol>().is_err());
    }

    #[test]
    fn board_size_is_validated() {
        assert_eq!(GameBoard::empty(2), Err(Error::InvalidBoardSize { size: 2, minimum: 3 }));
        assert_eq!(
            GameBoard::new(3, vec![E; 8]),
            Err(Error::InvalidCellCount { size: 3, expected: 9, got: 8 })
        );
        assert_eq!(GameBoard::empty(7).map(|b| b.cells().len()), Ok(49));
    }

    #[test]
    fn empty_cells_row_major() {
        let board = board(3, &[
            X, E, O,
            E, X, E,
            O, E, E,
        ]);
        assert_eq!(board.empty_cells(), vec![
            Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 2), Cell::new(2, 1), Cell::new(2, 2),
        ]);
        assert!(!board.is_full());
    }

    #[test]
    fn apply_and_undo() {
        let mut board = GameBoard::empty(5).unwrap();
        let before = board.clone();
        board.apply_move(Cell::new(2, 3), O);
        assert_eq!(board.get(Cell::new(2, 3)), O);
        assert_eq!(board.empty_cells().len(), 24);
        board.undo_move(Cell::new(2, 3));
        assert_eq!(board, before);
    }

    #[test]
    fn full_board() {
        let board = board(3, &[
            X, O, X,
            X, O, O,
            O, X, X,
        ]);
        assert!(board.is_full());
        assert!(board.empty_cells().is_empty());
        assert_eq!(board.check_winner(), GameResult::NoWinner);
        assert_eq!(board.evaluate(X), 0);
        assert_eq!(board.evaluate(O), 0);
    }

    #[test]
    fn evaluate_winner_and_loser() {
        let board = board(3, &[
            O, O, O,
            X, X, E,
            X, E, E,
        ]);
        assert_eq!(board.check_winner(), GameResult::Won(O));
        assert_eq!(board.evaluate(O), 1);
        assert_eq!(board.evaluate(X), -1);
    }

    #[test]
    fn display_and_encode() {
        let board = board(3, &[
            X, E, O,
            E, E, E,
            E, E, E,
        ]);
        assert_eq!(board.encode(), "X,.,O,.,.,.,.,.,.");
        assert_eq!(board.to_string(), "X . O\n. . .\n. . .\n");
    }

    #[test]
    fn transpositions_are_the_symmetry_group() {
        let board = board(3, &[
            X, O, E,
            E, E, E,
            E, E, E,
        ]);
        let transpositions = board.transpositions();
        assert_eq!(transpositions.len(), 8);
        assert_eq!(transpositions[0], board);
        assert_eq!(transpositions.iter().map(|t| t.encode()).collect::<HashSet<_>>().len(), 8);
        // the group is closed: transposing a transposition stays inside it
        let encodings = transpositions.iter().map(|t| t.encode()).collect::<HashSet<_>>();
        for transposition in &transpositions {
            for again in transposition.transpositions() {
                assert!(encodings.contains(&again.encode()));
            }
        }
    }

    #[test]
    fn keys_depend_on_sides() {
        let board = GameBoard::empty(3).unwrap();
        let for_x = Position::new(board.clone(), X);
        let for_o = Position::new(board, O);
        assert!(for_x.transposition_keys().iter().all(|key| !for_o.transposition_keys().contains(key)));
    }

    #[test]
    fn keys_are_encoded_transpositions() {
        let board = board(3, &[
            X, O, E,
            E, E, E,
            E, E, E,
        ]);
        let keys = Position::new(board.clone(), O).transposition_keys();
        assert_eq!(keys[0], "OO:X,O,.,.,.,.,.,.,.");
        let encodings = board.transpositions().iter().map(|t| format!("OO:{}", t.encode())).collect::<Vec<_>>();
        assert_eq!(keys, encodings);
    }

    #[test]
    fn lookup_hits_through_every_symmetry() {
        let table = TranspositionTable::new();
        let cells = [
            X, O, E, E, E,
            E, X, E, E, E,
            E, E, E, E, E,
            E, E, O, E, E,
            E, E, E, E, X,
        ];
        let position = Position::new(board(5, &cells), O);
        table.cache(&position, CacheEntry::exact(-1));
        for transposition in position.board().transpositions() {
            let symmetric = Position::new(transposition, O);
            assert_eq!(table.lookup(&symmetric), Some(CacheEntry::exact(-1)));
        }
        // different side to score for
        assert_eq!(table.lookup(&Position::new(board(5, &cells), X)), None);
    }

    #[test]
    fn root_moves_skip_mirrored_cells() {
        let mut strategy = Strategy::new(NullCache);
        let empty = Position::new(GameBoard::empty(3).unwrap(), X);
        assert_eq!(strategy.root_moves(&empty), vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 1)]);
        assert_eq!(strategy.stats.symmetric_skip_count, 6);

        let corner = Position::new(board(3, &[
            X, E, E,
            E, E, E,
            E, E, E,
        ]), O);
        assert_eq!(strategy.root_moves(&corner), vec![
            Cell::new(0, 1), Cell::new(0, 2), Cell::new(1, 1), Cell::new(1, 2), Cell::new(2, 2),
        ]);
    }

    #[test]
    fn do_and_undo_switch_sides() {
        let mut position = Position::new(GameBoard::empty(3).unwrap(), X);
        type S = Strategy<NullCache>;
        assert_eq!(S::player_to_move(&position), Player::Max);
        S::do_move(&mut position, &Cell::new(1, 1));
        assert_eq!(position.to_move(), O);
        assert_eq!(S::player_to_move(&position), Player::Min);
        assert_eq!(position.board().get(Cell::new(1, 1)), X);
        S::undo_move(&mut position, &Cell::new(1, 1));
        assert_eq!(position, Position::new(GameBoard::empty(3).unwrap(), X));
    }

    #[test]
    fn empty_board() {
        let mut position = Position::new(GameBoard::empty(3).unwrap(), X);
        let start = Instant::now();
        let scored_moves = score_possible_moves(&mut Strategy::default(), &mut position, &Deadline::never());
        println!("search on empty board took {}mus", start.elapsed().as_micros());
        // corner, edge and center all draw
        assert_eq!(scored_moves.iter().map(|m| m.score).collect::<Vec<_>>(), vec![0, 0, 0]);
        assert_eq!(position, Position::new(GameBoard::empty(3).unwrap(), X));
    }

    #[test]
    fn answer_to_center() {
        // corners hold the draw, edges lose
        let mut position = Position::new(board(3, &[
            E, E, E,
            E, O, E,
            E, E, E,
        ]), X);
        let scored_moves = score_possible_moves(&mut Strategy::default(), &mut position, &Deadline::never());
        assert_eq!(scored_moves, vec![
            min_max::ScoredMove::new(0, Cell::new(0, 0)),
            min_max::ScoredMove::new(-1, Cell::new(0, 1)),
        ]);
    }

    #[test]
    fn answer_to_corner() {
        let mut position = Position::new(board(3, &[
            X, E, E,
            E, E, E,
            E, E, E,
        ]), O);
        let best = best_move(&mut Strategy::default(), &mut position, &Deadline::never()).unwrap();
        assert_eq!(best.min_max_move, Cell::new(1, 1));
        assert_eq!(best.score, 0);
    }
}
