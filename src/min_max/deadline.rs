use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cooperative cancellation signal shared by every frame of one search.
///
/// The search polls [`Deadline::is_expired`] after each evaluated child. Once
/// it reports `true` the frame stops expanding siblings and returns the best
/// value it has so far.
#[derive(Debug, Clone, Default)]
pub struct Deadline {
    at: Option<Instant>,
    cancelled: Option<Arc<AtomicBool>>,
}

impl Deadline {
    pub fn never() -> Self {
        Self::default()
    }

    pub fn after(budget: Duration) -> Self {
        // an overflowing budget is as good as no budget
        Self { at: Instant::now().checked_add(budget), cancelled: None }
    }

    /// Additionally expire as soon as `flag` is set.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancelled = Some(flag);
        self
    }

    pub fn is_expired(&self) -> bool {
        if let Some(flag) = &self.cancelled {
            if flag.load(Ordering::Relaxed) {
                return true;
            }
        }
        match self.at {
            Some(at) => Instant::now() >= at,
            None => false,
        }
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.at.map(|at| at.saturating_duration_since(Instant::now()))
    }
}
