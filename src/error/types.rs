use thiserror::Error;

use crate::tile::{TileId, VersionId};

/// Unified result type for the tile board crate.
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors surfaced by the tile registry, layout deriver and session.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("tile `{0}` not found")]
    TileNotFound(TileId),
    #[error("version `{version}` not found on tile `{tile}`")]
    VersionNotFound { tile: TileId, version: VersionId },
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BoardError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// True for both tile and version lookup failures.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TileNotFound(_) | Self::VersionNotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
