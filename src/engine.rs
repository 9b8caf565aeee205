use std::sync::Arc;
use std::time::Instant;

use log::{debug, warn};

use crate::config::{CacheScope, EngineConfig};
use crate::min_max;
use crate::min_max::cache::TranspositionTable;
use crate::min_max::deadline::Deadline;
use crate::ttt::{Cell, GameBoard, Position, Strategy, Symbol};

/// The chosen cell and its score for the player to move: 1 win, 0 draw, -1 loss.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BestMove {
    /// `None` when the board has no empty cell.
    pub cell: Option<Cell>,
    pub score: i32,
}

impl BestMove {
    pub const NONE: BestMove = BestMove { cell: None, score: i32::MIN };

    /// Row and column, `(-1, -1)` if there is no move.
    pub fn coordinates(&self) -> (i64, i64) {
        match self.cell {
            Some(cell) => (cell.row as i64, cell.col as i64),
            None => (-1, -1),
        }
    }
}

#[derive(Debug, Clone)]
enum TableSource {
    Shared(Arc<TranspositionTable>),
    PerCall,
}

/// Computes moves with a fixed configuration. Cheap to share between threads;
/// every call works on its own copy of the board.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    table: TableSource,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let table = match config.cache_scope {
            CacheScope::PerCall => TableSource::PerCall,
            CacheScope::Process => TableSource::Shared(TranspositionTable::process_wide()),
        };
        Self { config, table }
    }

    /// Searches always use `table`, whatever scope `config` asks for.
    pub fn with_table(config: EngineConfig, table: Arc<TranspositionTable>) -> Self {
        Self { config, table: TableSource::Shared(table) }
    }

    pub fn best_move(&self, board: &GameBoard, player: Symbol) -> BestMove {
        self.best_move_with_deadline(board, player, &Deadline::after(self.config.time_budget))
    }

    /// [`BestMove::NONE`] unless `player` is `X` or `O`.
    pub fn best_move_with_deadline(&self, board: &GameBoard, player: Symbol, deadline: &Deadline) -> BestMove {
        if !player.is_player() {
            warn!("no move for non-player symbol {:?}", player);
            return BestMove::NONE;
        }
        let table = match &self.table {
            TableSource::Shared(table) => table.clone(),
            TableSource::PerCall => Arc::new(TranspositionTable::new()),
        };
        let mut strategy = Strategy::new(table);
        let mut position = Position::new(board.clone(), player);

        let start = Instant::now();
        let best = min_max::best_move(&mut strategy, &mut position, deadline);
        debug!(
            "searched {}x{} board for {} in {}ms ({:?} left), timed out: {}, {:?}",
            board.size(), board.size(), player, start.elapsed().as_millis(), deadline.remaining(), strategy.stats.timed_out(), strategy.stats
        );

        match best {
            Some(scored) => BestMove { cell: Some(scored.min_max_move), score: scored.score },
            None => BestMove::NONE,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
