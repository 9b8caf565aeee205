use std::time::Duration;

use clap::ValueEnum;

pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(2);

/// Lifetime of the transposition table a search runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum CacheScope {
    /// A fresh table for every move computation.
    #[default]
    PerCall,
    /// One table for the whole process, growing with every search.
    Process,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Wall clock budget for a whole move computation.
    pub time_budget: Duration,
    pub cache_scope: CacheScope,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_budget: DEFAULT_TIME_BUDGET,
            cache_scope: CacheScope::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_time_budget(mut self, time_budget: Duration) -> Self {
        self.time_budget = time_budget;
        self
    }

    pub fn with_cache_scope(mut self, cache_scope: CacheScope) -> Self {
        self.cache_scope = cache_scope;
        self
    }
}
