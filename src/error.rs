//! Error types for the move engine

use thiserror::Error;

/// Everything that can be rejected before a search starts. The search itself
/// is total and never fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid player symbol '{symbol}' (expected 'X' or 'O')")]
    InvalidSymbol { symbol: String },

    #[error("invalid board size {size} (must be at least {minimum})")]
    InvalidBoardSize { size: usize, minimum: usize },

    #[error("expected {expected} cells for a {size}x{size} board, got {got}")]
    InvalidCellCount { size: usize, expected: usize, got: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
