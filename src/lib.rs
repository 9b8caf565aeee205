//! Best-move search for N×N tic-tac-toe: 3 in a row on 3×3, 4 in a row on
//! anything larger.
//!
//! [`min_max`] holds the game-agnostic alpha-beta search with its
//! transposition cache and cooperative deadline, [`ttt`] the board and the
//! rules it is searched with, and [`engine`] / [`game`] the request-facing
//! layer on top.

pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod min_max;
pub mod rules;
pub mod ttt;

pub use config::{CacheScope, EngineConfig};
pub use engine::{BestMove, Engine};
pub use error::{Error, Result};
pub use game::{render_move, Game, REJECTED_RESPONSE};
pub use ttt::{Cell, GameBoard, Symbol};
