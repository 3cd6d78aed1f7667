use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

/// Counters for one board session.
#[derive(Debug, Default, Clone)]
pub struct BoardMetrics {
    edits: u64,
    noop_edits: u64,
    branches: u64,
    version_switches: u64,
    default_changes: u64,
    resizes: u64,
    moves: u64,
    layouts: u64,
    rejected: u64,
}

impl BoardMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// `changed` is false when the new content matched the old fingerprint.
    pub fn record_edit(&mut self, changed: bool) {
        if changed {
            self.edits = self.edits.saturating_add(1);
        } else {
            self.noop_edits = self.noop_edits.saturating_add(1);
        }
    }

    pub fn record_branch(&mut self) {
        self.branches = self.branches.saturating_add(1);
    }

    pub fn record_version_switch(&mut self) {
        self.version_switches = self.version_switches.saturating_add(1);
    }

    pub fn record_default_change(&mut self) {
        self.default_changes = self.default_changes.saturating_add(1);
    }

    pub fn record_resize(&mut self) {
        self.resizes = self.resizes.saturating_add(1);
    }

    pub fn record_move(&mut self) {
        self.moves = self.moves.saturating_add(1);
    }

    pub fn record_layout(&mut self) {
        self.layouts = self.layouts.saturating_add(1);
    }

    /// An operation that returned an error.
    pub fn record_rejection(&mut self) {
        self.rejected = self.rejected.saturating_add(1);
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            edits: self.edits,
            noop_edits: self.noop_edits,
            branches: self.branches,
            version_switches: self.version_switches,
            default_changes: self.default_changes,
            resizes: self.resizes,
            moves: self.moves,
            layouts: self.layouts,
            rejected: self.rejected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub edits: u64,
    pub noop_edits: u64,
    pub branches: u64,
    pub version_switches: u64,
    pub default_changes: u64,
    pub resizes: u64,
    pub moves: u64,
    pub layouts: u64,
    pub rejected: u64,
}

impl MetricSnapshot {
    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        map.insert("edits".to_string(), json!(self.edits));
        map.insert("noop_edits".to_string(), json!(self.noop_edits));
        map.insert("branches".to_string(), json!(self.branches));
        map.insert("version_switches".to_string(), json!(self.version_switches));
        map.insert("default_changes".to_string(), json!(self.default_changes));
        map.insert("resizes".to_string(), json!(self.resizes));
        map.insert("moves".to_string(), json!(self.moves));
        map.insert("layouts".to_string(), json!(self.layouts));
        map.insert("rejected".to_string(), json!(self.rejected));
        map
    }

    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "board_metrics", self.as_fields())
    }

    /// Registry operations attempted, successful or not.
    pub fn total_mutations(&self) -> u64 {
        self.edits
            + self.noop_edits
            + self.branches
            + self.version_switches
            + self.default_changes
            + self.resizes
            + self.moves
            + self.rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let mut metrics = BoardMetrics::new();
        metrics.record_edit(true);
        metrics.record_edit(false);
        metrics.record_branch();
        metrics.record_layout();
        metrics.record_rejection();

        let snap = metrics.snapshot(Duration::from_millis(1500));
        assert_eq!(snap.uptime_ms, 1500);
        assert_eq!(snap.edits, 1);
        assert_eq!(snap.noop_edits, 1);
        assert_eq!(snap.branches, 1);
        assert_eq!(snap.layouts, 1);
        assert_eq!(snap.total_mutations(), 4);
    }

    #[test]
    fn snapshot_converts_to_log_event() {
        let mut metrics = BoardMetrics::new();
        metrics.record_default_change();
        let event = metrics
            .snapshot(Duration::ZERO)
            .to_log_event("board::session.metrics");
        assert_eq!(event.message, "board_metrics");
        assert_eq!(event.target, "board::session.metrics");
        assert_eq!(event.field("default_changes"), Some(&json!(1)));
    }
}
