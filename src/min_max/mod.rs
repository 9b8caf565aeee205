pub mod cache;
pub mod deadline;
pub mod stats;
pub mod symmetry;

use std::ops::{Deref, DerefMut, Not};

use crate::min_max::cache::{Cache, CacheEntry, CacheFlag};
use crate::min_max::deadline::Deadline;
use crate::min_max::stats::Stats;

#[derive(Eq, PartialEq, Hash)]
#[derive(Debug, Copy, Clone)]
pub enum Player {
    Min,
    Max,
}

impl Not for Player {
    type Output = Player;

    fn not(self) -> Player {
        match self {
            Player::Min => Player::Max,
            Player::Max => Player::Min,
        }
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct ScoredMove<M> {
    pub score: i32,
    pub min_max_move: M,
}

impl<M> ScoredMove<M> {
    pub fn new(score: i32, min_max_move: M) -> ScoredMove<M> {
        ScoredMove { score, min_max_move }
    }
}

/// Game rules plus the cache and stats a search runs with.
///
/// States are mutated in place: every `do_move` is paired with an `undo_move`
/// of the same move before the caller looks at the state again.
pub trait Strategy {
    type State;
    type Move;
    type Cache: Cache<Self::State>;
    type Stats: Stats;

    /// Moves of the side to move, in the order they are searched.
    fn possible_moves(state: &Self::State) -> Vec<Self::Move>;

    /// Candidate moves at the root. Defaults to [`Strategy::possible_moves`];
    /// may drop moves whose value is already known to equal an earlier one.
    fn root_moves(&mut self, state: &Self::State) -> Vec<Self::Move> {
        Self::possible_moves(state)
    }

    fn player_to_move(state: &Self::State) -> Player;

    /// +1 if Max has won, -1 if Min has won, 0 otherwise.
    fn score(state: &Self::State) -> i32;

    /// No move left for either side.
    fn is_exhausted(state: &Self::State) -> bool;

    fn do_move(state: &mut Self::State, min_max_move: &Self::Move);
    fn undo_move(state: &mut Self::State, min_max_move: &Self::Move);

    fn cache(&self) -> &Self::Cache;
    fn stats(&mut self) -> &mut Self::Stats;
}

/// A move applied to a state for the lifetime of the guard.
///
/// The move is undone when the guard drops, so the state is restored on every
/// exit path of the frame that applied it.
pub struct MoveGuard<'a, STRATEGY: Strategy> {
    state: &'a mut STRATEGY::State,
    min_max_move: &'a STRATEGY::Move,
}

impl<'a, STRATEGY: Strategy> MoveGuard<'a, STRATEGY> {
    pub fn apply(state: &'a mut STRATEGY::State, min_max_move: &'a STRATEGY::Move) -> Self {
        STRATEGY::do_move(state, min_max_move);
        Self { state, min_max_move }
    }
}

impl<STRATEGY: Strategy> Deref for MoveGuard<'_, STRATEGY> {
    type Target = STRATEGY::State;

    fn deref(&self) -> &Self::Target {
        self.state
    }
}

impl<STRATEGY: Strategy> DerefMut for MoveGuard<'_, STRATEGY> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.state
    }
}

impl<STRATEGY: Strategy> Drop for MoveGuard<'_, STRATEGY> {
    fn drop(&mut self) {
        STRATEGY::undo_move(self.state, self.min_max_move);
    }
}

/// Score of one frame. A frame is complete when the deadline cut none of its
/// subtree short; otherwise the score is only an estimate.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Evaluation {
    score: i32,
    complete: bool,
}

impl Evaluation {
    fn complete(score: i32) -> Self {
        Self { score, complete: true }
    }

    /// Proven scores keep their order. An estimate ranks above a proven loss
    /// and below a proven draw.
    fn rank(&self) -> i32 {
        if self.complete {
            2 * self.score
        } else {
            -1
        }
    }
}

/// Picks the root move with the highest score for the side to move, which
/// must be [`Player::Max`]. Ties go to the move that comes first.
///
/// Every root move is searched, also once `deadline` has expired; those
/// searches stop after their first line and only yield estimates. Returns
/// `None` if there is no move at all.
pub fn best_move<STRATEGY: Strategy>(strategy: &mut STRATEGY, state: &mut STRATEGY::State, deadline: &Deadline) -> Option<ScoredMove<STRATEGY::Move>> {
    debug_assert_eq!(STRATEGY::player_to_move(state), Player::Max);
    let mut best: Option<(i32, ScoredMove<STRATEGY::Move>)> = None;
    for m in strategy.root_moves(state) {
        strategy.stats().record_root_move();
        let evaluation = {
            let mut next_state = MoveGuard::<STRATEGY>::apply(state, &m);
            alpha_beta_eval(strategy, &mut *next_state, deadline, 0, i32::MIN, i32::MAX)
        };
        let rank = evaluation.rank();
        if best.as_ref().map_or(true, |(best_rank, _)| rank > *best_rank) {
            best = Some((rank, ScoredMove::new(evaluation.score, m)));
        }
    }
    best.map(|(_, scored)| scored)
}

/// Every root move with its score, in root move order.
pub fn score_possible_moves<STRATEGY: Strategy>(strategy: &mut STRATEGY, state: &mut STRATEGY::State, deadline: &Deadline) -> Vec<ScoredMove<STRATEGY::Move>> {
    let moves = strategy.root_moves(state);
    moves.into_iter().map(|m| {
        let score = {
            let mut next_state = MoveGuard::<STRATEGY>::apply(state, &m);
            alpha_beta_eval(strategy, &mut *next_state, deadline, 0, i32::MIN, i32::MAX).score
        };
        ScoredMove::new(score, m)
    }).collect()
}

/// Minimax value of `state` from Max's point of view.
pub fn score_state<STRATEGY: Strategy>(strategy: &mut STRATEGY, state: &mut STRATEGY::State, deadline: &Deadline) -> i32 {
    alpha_beta_eval(strategy, state, deadline, 0, i32::MIN, i32::MAX).score
}

/// The mover's winning score if one of `moves` ends the game on the spot.
fn immediate_win<STRATEGY: Strategy>(state: &mut STRATEGY::State, moves: &[STRATEGY::Move], player: Player) -> Option<i32> {
    let win = match player {
        Player::Max => 1,
        Player::Min => -1,
    };
    for m in moves {
        let next_state = MoveGuard::<STRATEGY>::apply(state, m);
        if STRATEGY::score(&next_state) == win {
            return Some(win);
        }
    }
    None
}

fn alpha_beta_eval<STRATEGY: Strategy>(strategy: &mut STRATEGY, state: &mut STRATEGY::State, deadline: &Deadline, depth: u32, mut alpha: i32, mut beta: i32) -> Evaluation {
    strategy.stats().record_depth(depth);
    let alpha_original = alpha;
    let beta_original = beta;
    if let Some(entry) = strategy.cache().lookup(state) {
        strategy.stats().record_cache_hit();
        match entry.flag {
            CacheFlag::Exact => return Evaluation::complete(entry.value),
            CacheFlag::LowerBound => alpha = alpha.max(entry.value),
            CacheFlag::UpperBound => beta = beta.min(entry.value),
        }
        if alpha >= beta {
            return Evaluation::complete(entry.value);
        }
    } else {
        strategy.stats().record_cache_miss();
    }

    let score = STRATEGY::score(state);
    if score != 0 {
        strategy.stats().record_state_scored();
        strategy.cache().cache(state, CacheEntry::exact(score));
        return Evaluation::complete(score);
    }
    if STRATEGY::is_exhausted(state) {
        strategy.stats().record_state_scored();
        strategy.cache().cache(state, CacheEntry::exact(0));
        return Evaluation::complete(0);
    }

    let player = STRATEGY::player_to_move(state);
    let moves = STRATEGY::possible_moves(state);
    // nothing beats winning right away
    if let Some(win) = immediate_win::<STRATEGY>(state, &moves, player) {
        strategy.stats().record_state_scored();
        strategy.cache().cache(state, CacheEntry::exact(win));
        return Evaluation::complete(win);
    }

    let mut best = match player {
        Player::Max => i32::MIN,
        Player::Min => i32::MAX,
    };
    let mut complete = true;
    let last = moves.len().saturating_sub(1);
    for (index, m) in moves.iter().enumerate() {
        let child = {
            let mut next_state = MoveGuard::<STRATEGY>::apply(state, m);
            alpha_beta_eval(strategy, &mut *next_state, deadline, depth + 1, alpha, beta)
        };
        complete &= child.complete;
        match player {
            Player::Max => {
                best = best.max(child.score);
                alpha = alpha.max(best);
            }
            Player::Min => {
                best = best.min(child.score);
                beta = beta.min(best);
            }
        }
        if beta <= alpha {
            strategy.stats().record_prune();
            break;
        }
        if index < last && deadline.is_expired() {
            strategy.stats().record_timeout();
            complete = false;
            break;
        }
    }

    if complete {
        let flag = if best <= alpha_original {
            CacheFlag::UpperBound
        } else if best >= beta_original {
            CacheFlag::LowerBound
        } else {
            CacheFlag::Exact
        };
        strategy.cache().cache(state, CacheEntry { value: best, flag });
    }
    Evaluation { score: best, complete }
}
