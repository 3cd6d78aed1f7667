//! Session audit trail.
//!
//! Each successful mutation and each layout computation produces one record
//! with a stage and structured details. Sinks decide whether to keep, print
//! or drop them.

use std::sync::Mutex;
use std::time::SystemTime;

use serde_json::Value;

/// Checkpoints emitted by [`BoardSession`](super::BoardSession).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardAuditStage {
    SessionOpened,
    CurrentVersionChanged,
    ContentEdited,
    VersionBranched,
    DefaultVersionChanged,
    TileResized,
    TileMoved,
    TileSaved,
    LayoutComputed,
    SessionClosed,
}

#[derive(Debug, Clone)]
pub struct BoardAuditEvent {
    pub timestamp: SystemTime,
    pub stage: BoardAuditStage,
    pub details: Vec<(String, Value)>,
}

impl BoardAuditEvent {
    fn new(stage: BoardAuditStage) -> Self {
        Self {
            timestamp: SystemTime::now(),
            stage,
            details: Vec::new(),
        }
    }

    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }
}

pub struct BoardAuditEventBuilder {
    event: BoardAuditEvent,
}

impl BoardAuditEventBuilder {
    pub fn new(stage: BoardAuditStage) -> Self {
        Self {
            event: BoardAuditEvent::new(stage),
        }
    }

    pub fn detail(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.event.details.push((key.into(), value.into()));
        self
    }

    pub fn finish(self) -> BoardAuditEvent {
        self.event
    }
}

pub trait BoardAudit: Send + Sync {
    fn record(&self, event: BoardAuditEvent);
}

#[derive(Debug, Default)]
pub struct NullBoardAudit;

impl BoardAudit for NullBoardAudit {
    fn record(&self, _event: BoardAuditEvent) {}
}

/// Keeps every record in memory.
#[derive(Debug, Default)]
pub struct BufferedAudit {
    events: Mutex<Vec<BoardAuditEvent>>,
}

impl BufferedAudit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<BoardAuditEvent> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn stages(&self) -> Vec<BoardAuditStage> {
        self.events().into_iter().map(|e| e.stage).collect()
    }
}

impl BoardAudit for BufferedAudit {
    fn record(&self, event: BoardAuditEvent) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(event);
        }
    }
}
