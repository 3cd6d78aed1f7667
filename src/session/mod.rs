//! Board session lifecycle.
//!
//! A [`BoardSession`] is created when the board opens and consumed by
//! [`BoardSession::close`]. It owns the registry outright and hands out
//! snapshots and layouts; presentation never holds the registry itself.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use serde_json::Value;

use crate::config::BoardConfig;
use crate::error::{BoardError, Result};
use crate::layout::{BoardLayout, Breakpoint, compute_layout};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::{BoardMetrics, MetricSnapshot};
use crate::registry::{BoardSnapshot, TileRegistry};
use crate::seed::SeedTile;
use crate::tile::{TileContent, TileId, VersionId};

pub mod audit;

use audit::{BoardAudit, BoardAuditEventBuilder, BoardAuditStage, NullBoardAudit};

const LOG_TARGET: &str = "board::session";

/// Optional collaborators for a session.
#[derive(Clone)]
pub struct SessionOptions {
    pub logger: Option<Logger>,
    pub audit: Option<Arc<dyn BoardAudit>>,
    /// Target used for the metrics event emitted on close.
    pub metrics_target: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            logger: None,
            audit: None,
            metrics_target: "board::session.metrics".to_string(),
        }
    }
}

/// What a save action read from the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedContent {
    pub tile_id: TileId,
    pub version_id: VersionId,
    pub content: TileContent,
}

pub struct BoardSession {
    config: BoardConfig,
    registry: TileRegistry,
    logger: Option<Logger>,
    audit: Arc<dyn BoardAudit>,
    metrics: BoardMetrics,
    metrics_target: String,
    opened_at: Instant,
}

impl BoardSession {
    pub fn open(
        config: BoardConfig,
        seeds: Vec<SeedTile>,
        options: SessionOptions,
    ) -> Result<Self> {
        config.validate()?;
        let mut registry = TileRegistry::from_seeds(seeds, &config)?;
        if let Some(logger) = &options.logger {
            registry = registry.with_logger(logger.clone());
        }

        let session = Self {
            config,
            registry,
            logger: options.logger,
            audit: options
                .audit
                .unwrap_or_else(|| Arc::new(NullBoardAudit)),
            metrics: BoardMetrics::new(),
            metrics_target: options.metrics_target,
            opened_at: Instant::now(),
        };

        let tile_count = session.registry.len();
        session.log(
            LogLevel::Info,
            "session_opened",
            [json_kv("tile_count", tile_count)],
        );
        session.record(
            BoardAuditStage::SessionOpened,
            [("tile_count", Value::from(tile_count))],
        );
        Ok(session)
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn registry(&self) -> &TileRegistry {
        &self.registry
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.registry.snapshot()
    }

    pub fn set_current_version(&mut self, tile_id: &str, version_id: &str) -> Result<()> {
        let result = self.registry.set_current_version(tile_id, version_id);
        self.settle(result)?;
        self.metrics.record_version_switch();
        self.record(
            BoardAuditStage::CurrentVersionChanged,
            [
                ("tile_id", Value::from(tile_id)),
                ("version_id", Value::from(version_id)),
            ],
        );
        Ok(())
    }

    pub fn edit_current_version_content(
        &mut self,
        tile_id: &str,
        new_content: &str,
    ) -> Result<bool> {
        let result = self.registry.edit_current_version_content(tile_id, new_content);
        let changed = self.settle(result)?;
        self.metrics.record_edit(changed);
        self.record(
            BoardAuditStage::ContentEdited,
            [
                ("tile_id", Value::from(tile_id)),
                ("changed", Value::from(changed)),
            ],
        );
        Ok(changed)
    }

    pub fn branch_new_version(&mut self, tile_id: &str) -> Result<VersionId> {
        let result = self.registry.branch_new_version(tile_id);
        let version_id = self.settle(result)?;
        self.after_branch(tile_id, &version_id);
        Ok(version_id)
    }

    pub fn branch_version_with_content(
        &mut self,
        tile_id: &str,
        content: &str,
    ) -> Result<VersionId> {
        let result = self.registry.branch_version_with_content(tile_id, content);
        let version_id = self.settle(result)?;
        self.after_branch(tile_id, &version_id);
        Ok(version_id)
    }

    pub fn set_default_version(&mut self, tile_id: &str, version_id: &str) -> Result<()> {
        let result = self.registry.set_default_version(tile_id, version_id);
        self.settle(result)?;
        self.metrics.record_default_change();
        self.record(
            BoardAuditStage::DefaultVersionChanged,
            [
                ("tile_id", Value::from(tile_id)),
                ("version_id", Value::from(version_id)),
            ],
        );
        Ok(())
    }

    pub fn resize_tile(&mut self, tile_id: &str, width: u16, height: u16) -> Result<bool> {
        let result = self.registry.resize_tile(tile_id, width, height);
        let changed = self.settle(result)?;
        self.metrics.record_resize();
        self.record(
            BoardAuditStage::TileResized,
            [
                ("tile_id", Value::from(tile_id)),
                ("width", Value::from(width)),
                ("height", Value::from(height)),
            ],
        );
        Ok(changed)
    }

    pub fn move_tile(&mut self, tile_id: &str, new_index: usize) -> Result<usize> {
        let result = self.registry.move_tile(tile_id, new_index);
        let landed = self.settle(result)?;
        self.metrics.record_move();
        self.record(
            BoardAuditStage::TileMoved,
            [
                ("tile_id", Value::from(tile_id)),
                ("index", Value::from(landed)),
            ],
        );
        Ok(landed)
    }

    /// Read the current version of `tile_id` and report it. Nothing is
    /// written anywhere besides the log.
    pub fn save(&mut self, tile_id: &str) -> Result<SavedContent> {
        let Some(tile) = self.registry.get(tile_id) else {
            let err = BoardError::TileNotFound(tile_id.to_string());
            self.log(
                LogLevel::Warn,
                "save_failed",
                [json_kv("error", err.to_string())],
            );
            return Err(err);
        };
        let saved = SavedContent {
            tile_id: tile.id().to_string(),
            version_id: tile.current_version_id().to_string(),
            content: tile.current_version().content().clone(),
        };
        self.log(
            LogLevel::Info,
            "tile_saved",
            [
                json_kv("tile_id", saved.tile_id.clone()),
                json_kv("version_id", saved.version_id.clone()),
                json_kv("content", saved.content.as_str()),
            ],
        );
        self.record(
            BoardAuditStage::TileSaved,
            [
                ("tile_id", Value::from(saved.tile_id.clone())),
                ("version_id", Value::from(saved.version_id.clone())),
            ],
        );
        Ok(saved)
    }

    /// Place every tile for `breakpoint` from a fresh snapshot.
    pub fn layout(&mut self, breakpoint: Breakpoint) -> BoardLayout {
        let snapshot = self.registry.snapshot();
        let layout = compute_layout(snapshot.tiles(), breakpoint, &self.config);
        self.metrics.record_layout();
        self.record(
            BoardAuditStage::LayoutComputed,
            [
                ("breakpoint", Value::from(breakpoint.as_str())),
                ("columns", Value::from(layout.columns())),
                ("placements", Value::from(layout.placements().len())),
            ],
        );
        layout
    }

    pub fn layout_for_width(&mut self, width: u32) -> BoardLayout {
        let breakpoint = self.config.breakpoints.resolve(width);
        self.layout(breakpoint)
    }

    pub fn take_dirty(&mut self) -> Vec<TileId> {
        self.registry.take_dirty()
    }

    pub fn metrics(&self) -> MetricSnapshot {
        self.metrics.snapshot(self.opened_at.elapsed())
    }

    /// End the session, emitting a final metrics event.
    pub fn close(self) -> MetricSnapshot {
        let snapshot = self.metrics();
        if let Some(logger) = &self.logger {
            let _ = logger.log_event(snapshot.to_log_event(&self.metrics_target));
        }
        self.log(
            LogLevel::Info,
            "session_closed",
            [json_kv("uptime_ms", snapshot.uptime_ms)],
        );
        self.record(
            BoardAuditStage::SessionClosed,
            [("uptime_ms", Value::from(snapshot.uptime_ms))],
        );
        snapshot
    }

    fn after_branch(&mut self, tile_id: &str, version_id: &str) {
        self.metrics.record_branch();
        self.record(
            BoardAuditStage::VersionBranched,
            [
                ("tile_id", Value::from(tile_id)),
                ("version_id", Value::from(version_id)),
            ],
        );
    }

    /// Count and log a failed mutation before handing the result back.
    fn settle<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            self.metrics.record_rejection();
            self.log(
                LogLevel::Warn,
                "mutation_rejected",
                [json_kv("error", err.to_string())],
            );
        }
        result
    }

    fn record(
        &self,
        stage: BoardAuditStage,
        details: impl IntoIterator<Item = (&'static str, Value)>,
    ) {
        let mut builder = BoardAuditEventBuilder::new(stage);
        for (key, value) in details {
            builder.detail(key, value);
        }
        self.audit.record(builder.finish());
    }

    fn log(
        &self,
        level: LogLevel,
        message: &str,
        fields: impl IntoIterator<Item = (String, Value)>,
    ) {
        if let Some(logger) = &self.logger {
            let _ = logger.log_event(event_with_fields(level, LOG_TARGET, message, fields));
        }
    }
}
