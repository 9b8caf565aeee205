//! The textual request format: a move history to replay and a player to move.

use log::trace;

use crate::engine::{BestMove, Engine};
use crate::error::Result;
use crate::ttt::{Cell, GameBoard, Symbol};

pub const MOVE_SEPARATOR: char = '_';
pub const FIELD_SEPARATOR: char = '-';

/// One `<symbol>-<row>-<col>` token of a move history.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PlayedMove {
    pub symbol: Symbol,
    pub cell: Cell,
}

impl PlayedMove {
    /// `None` for anything that is not a player symbol and two in-range
    /// coordinates separated by `-`.
    pub fn parse(token: &str, size: usize) -> Option<PlayedMove> {
        let mut fields = token.split(FIELD_SEPARATOR);
        let (symbol, row, col) = match (fields.next(), fields.next(), fields.next(), fields.next()) {
            (Some(symbol), Some(row), Some(col), None) => (symbol, row, col),
            _ => return None,
        };
        let symbol = symbol.parse::<Symbol>().ok()?;
        let row = row.parse::<usize>().ok()?;
        let col = col.parse::<usize>().ok()?;
        if row >= size || col >= size {
            return None;
        }
        Some(PlayedMove { symbol, cell: Cell::new(row, col) })
    }
}

/// Decodes a `_` separated history, silently dropping malformed tokens.
pub fn parse_moves(size: usize, moves: &str) -> Vec<PlayedMove> {
    moves.split(MOVE_SEPARATOR)
        .filter_map(|token| {
            let played = PlayedMove::parse(token, size);
            if played.is_none() && !token.is_empty() {
                trace!("skipping malformed move '{}'", token);
            }
            played
        })
        .collect()
}

/// Replays `moves` in order on an empty board. A later move to an occupied
/// cell overwrites it.
pub fn moves_to_board(size: usize, moves: &str) -> Result<GameBoard> {
    let mut board = GameBoard::empty(size)?;
    for played in parse_moves(size, moves) {
        board.set(played.cell, played.symbol);
    }
    Ok(board)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub gid: String,
    pub board: GameBoard,
}

impl Game {
    pub fn new(gid: impl Into<String>, size: usize, moves: &str) -> Result<Self> {
        Ok(Self { gid: gid.into(), board: moves_to_board(size, moves)? })
    }

    pub fn best_move(&self, engine: &Engine, player: Symbol) -> BestMove {
        engine.best_move(&self.board, player)
    }
}

/// Response to a request that was rejected before any search.
pub const REJECTED_RESPONSE: &str = "Error:Sorry. Can't do it bro.";

/// `Move:<symbol>-<row>-<col>`, with `-1` coordinates when there is no move.
pub fn render_move(player: Symbol, best: &BestMove) -> String {
    let (row, col) = best.coordinates();
    format!("Move:{}-{}-{}", player, row, col)
}
