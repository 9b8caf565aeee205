use std::fmt::Debug;
use std::sync::Arc;

use itertools::iproduct;

use crate::ttt::Symbol;

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum GameResult {
    Won(Symbol),
    /// Tie or still in progress; only a full board tells the two apart.
    NoWinner,
}

/// How a line is won on a board of a given size.
pub trait WinCondition: Debug + Send + Sync {
    fn line_length(&self) -> usize;

    /// The first completed line decides; lines are scanned rows first, then
    /// columns, diagonals and anti-diagonals.
    fn check(&self, cells: &[Symbol]) -> GameResult;
}

/// Picks the win condition for an N×N board.
pub fn for_size(size: usize) -> Arc<dyn WinCondition> {
    if size == 3 {
        Arc::new(ThreeByThree)
    } else {
        Arc::new(InARow::new(size, 4))
    }
}

/// Classic tic-tac-toe: three rows, three columns and both diagonals.
#[derive(Debug, Copy, Clone, Default)]
pub struct ThreeByThree;

impl ThreeByThree {
    const WIN_INDICES: [[usize; 3]; 8] = [
        [0, 1, 2],
        [3, 4, 5],
        [6, 7, 8],
        [0, 3, 6],
        [1, 4, 7],
        [2, 5, 8],
        [0, 4, 8],
        [2, 4, 6],
    ];
}

impl WinCondition for ThreeByThree {
    fn line_length(&self) -> usize {
        3
    }

    fn check(&self, cells: &[Symbol]) -> GameResult {
        debug_assert_eq!(cells.len(), 9);
        Self::WIN_INDICES.iter()
            .find(|indices| {
                cells[indices[0]] != Symbol::Empty && cells[indices[0]] == cells[indices[1]] && cells[indices[1]] == cells[indices[2]]
            })
            .map_or(GameResult::NoWinner, |indices| GameResult::Won(cells[indices[0]]))
    }
}

/// `length` equal symbols in a row anywhere on the board, in any of the four
/// directions. Every window is precomputed as a run of cell indices.
#[derive(Debug, Clone)]
pub struct InARow {
    length: usize,
    windows: Vec<usize>,
}

impl InARow {
    pub fn new(size: usize, length: usize) -> Self {
        assert!(length > 0 && length <= size, "line of {} does not fit on a {}x{} board", length, size, size);
        let span = size - length;
        let index = |row: usize, col: usize| row * size + col;
        let mut windows = Vec::new();
        // rows
        for (row, col) in iproduct!(0..size, 0..=span) {
            windows.extend((0..length).map(|k| index(row, col + k)));
        }
        // columns
        for (row, col) in iproduct!(0..=span, 0..size) {
            windows.extend((0..length).map(|k| index(row + k, col)));
        }
        // diagonals, top left to bottom right
        for (row, col) in iproduct!(0..=span, 0..=span) {
            windows.extend((0..length).map(|k| index(row + k, col + k)));
        }
        // anti-diagonals, top right to bottom left
        for (row, col) in iproduct!(0..=span, length - 1..size) {
            windows.extend((0..length).map(|k| index(row + k, col - k)));
        }
        Self { length, windows }
    }

    pub fn window_count(&self) -> usize {
        self.windows.len() / self.length
    }
}

impl WinCondition for InARow {
    fn line_length(&self) -> usize {
        self.length
    }

    fn check(&self, cells: &[Symbol]) -> GameResult {
        self.windows.chunks_exact(self.length)
            .find(|window| {
                let first = cells[window[0]];
                first != Symbol::Empty && window[1..].iter().all(|&i| cells[i] == first)
            })
            .map_or(GameResult::NoWinner, |window| GameResult::Won(cells[window[0]]))
    }
}
