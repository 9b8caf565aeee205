pub trait Stats {
    fn record_prune(&mut self);
    fn record_cache_hit(&mut self);
    fn record_cache_miss(&mut self);
    fn record_state_scored(&mut self);
    fn record_timeout(&mut self);
    fn record_depth(&mut self, depth: u32);
    fn record_symmetric_skip(&mut self);
    fn record_root_move(&mut self);
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SimpleStats {
    pub prune_count: u64,
    pub cache_hit_count: u64,
    pub cache_miss_count: u64,
    pub state_scored_count: u64,
    /// Frames that stopped expanding because the deadline had passed.
    pub timeout_count: u64,
    pub max_depth: u32,
    /// Root cells skipped because they mirror an earlier cell.
    pub symmetric_skip_count: u64,
    pub root_move_count: u64,
}

impl SimpleStats {
    pub fn timed_out(&self) -> bool {
        self.timeout_count > 0
    }
}

impl Stats for SimpleStats {
    fn record_prune(&mut self) {
        self.prune_count += 1;
    }

    fn record_cache_hit(&mut self) {
        self.cache_hit_count += 1;
    }

    fn record_cache_miss(&mut self) {
        self.cache_miss_count += 1;
    }

    fn record_state_scored(&mut self) {
        self.state_scored_count += 1;
    }

    fn record_timeout(&mut self) {
        self.timeout_count += 1;
    }

    fn record_depth(&mut self, depth: u32) {
        self.max_depth = self.max_depth.max(depth);
    }

    fn record_symmetric_skip(&mut self) {
        self.symmetric_skip_count += 1;
    }

    fn record_root_move(&mut self) {
        self.root_move_count += 1;
    }
}
