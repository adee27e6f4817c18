//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one search run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Child nodes created and scored.
    pub nodes_evaluated: u32,

    /// Deepest turn depth reached.
    pub depth_reached: u32,

    /// Candidates generated across all nodes.
    pub candidates: u32,

    /// Candidates dropped by the filter.
    pub filtered: u32,

    /// Nodes whose remaining siblings were cut.
    pub cutoffs: u32,

    /// Total time spent searching (microseconds).
    pub time_us: u64,

    /// The run was stopped before finishing.
    pub cancelled: bool,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record a scored child at `turn_depth`.
    pub fn record_node(&mut self, turn_depth: u32) {
        self.nodes_evaluated += 1;
        self.depth_reached = self.depth_reached.max(turn_depth);
    }

    /// Nodes evaluated per second.
    #[must_use]
    pub fn nodes_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.nodes_evaluated as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default() {
        let stats = SearchStats::new();
        assert_eq!(stats.nodes_evaluated, 0);
        assert!(!stats.cancelled);
    }

    #[test]
    fn test_record_node_tracks_depth() {
        let mut stats = SearchStats::new();
        stats.record_node(1);
        stats.record_node(3);
        stats.record_node(2);
        assert_eq!(stats.nodes_evaluated, 3);
        assert_eq!(stats.depth_reached, 3);
    }

    #[test]
    fn test_nodes_per_second() {
        let mut stats = SearchStats::new();
        stats.nodes_evaluated = 1000;
        stats.time_us = 1_000_000; // 1 second
        assert_eq!(stats.nodes_per_second(), 1000.0);
    }

    #[test]
    fn test_stats_reset() {
        let mut stats = SearchStats::new();
        stats.nodes_evaluated = 100;
        stats.cancelled = true;
        stats.reset();
        assert_eq!(stats, SearchStats::default());
    }

    #[test]
    fn test_stats_serialization() {
        let mut stats = SearchStats::new();
        stats.nodes_evaluated = 42;

        let json = serde_json::to_string(&stats).unwrap();
        let deserialized: SearchStats = serde_json::from_str(&json).unwrap();

        assert_eq!(stats, deserialized);
    }
}
