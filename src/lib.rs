//! Versioned document tiles on a responsive grid.
//!
//! A [`TileRegistry`] owns every tile of a board together with its version
//! history, and the [`layout`] module derives grid placements from a
//! registry snapshot for a given breakpoint. [`BoardSession`] wires both to
//! configuration, structured logging, metrics and an audit trail for the
//! lifetime of one session.

pub mod config;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod registry;
pub mod seed;
pub mod session;
pub mod tile;

pub use config::BoardConfig;
pub use error::{BoardError, Result};
pub use geometry::{Frame, Size};
pub use layout::{
    BoardLayout, Breakpoint, BreakpointSpec, BreakpointTable, GridPlacement, LayoutMode,
    compute_layout, compute_layout_for_width,
};
pub use logging::{LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult};
pub use metrics::{BoardMetrics, MetricSnapshot};
pub use registry::{BoardSnapshot, TileRegistry};
pub use seed::{SeedTile, SeedVersion};
pub use session::audit::{
    BoardAudit, BoardAuditEvent, BoardAuditEventBuilder, BoardAuditStage, BufferedAudit,
    NullBoardAudit,
};
pub use session::{BoardSession, SavedContent, SessionOptions};
pub use tile::{Scope, Tile, TileContent, TileId, TileKind, Version, VersionId};
