//! Board configuration.
//!
//! Every knob has a default matching the reference board; a JSON document
//! only needs to name the fields it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result};
use crate::geometry::Size;
use crate::layout::{BreakpointTable, LayoutMode};
use crate::tile::TileId;

/// Id of the tile whose content is restricted to scope values.
pub const DEFAULT_SENTINEL_TILE_ID: &str = "scope";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub breakpoints: BreakpointTable,
    /// Height of one grid row in layout units, identical at every breakpoint.
    pub row_height: u32,
    /// Columns and rows occupied by each nominal cell.
    pub cell_span: u16,
    /// Hard floor for tile sizes and interactive resizing.
    pub min_tile_size: Size,
    pub layout_mode: LayoutMode,
    pub sentinel_tile_id: TileId,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            breakpoints: BreakpointTable::default(),
            row_height: 100,
            cell_span: 2,
            min_tile_size: Size::new(2, 2),
            layout_mode: LayoutMode::Dynamic,
            sentinel_tile_id: DEFAULT_SENTINEL_TILE_ID.to_string(),
        }
    }
}

impl BoardConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        self.breakpoints.validate()?;
        if self.row_height == 0 {
            return Err(BoardError::validation("row_height must be positive"));
        }
        if self.cell_span == 0 {
            return Err(BoardError::validation("cell_span must be positive"));
        }
        if self.min_tile_size.width == 0 || self.min_tile_size.height == 0 {
            return Err(BoardError::validation(
                "min_tile_size dimensions must be positive",
            ));
        }
        if self.sentinel_tile_id.is_empty() {
            return Err(BoardError::validation("sentinel_tile_id must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Breakpoint;

    #[test]
    fn defaults_match_reference_board() {
        let config = BoardConfig::default();
        assert_eq!(config.row_height, 100);
        assert_eq!(config.cell_span, 2);
        assert_eq!(config.min_tile_size, Size::new(2, 2));
        assert_eq!(config.sentinel_tile_id, "scope");
        assert_eq!(config.layout_mode, LayoutMode::Dynamic);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = BoardConfig::from_json_str(r#"{ "row_height": 80 }"#).unwrap();
        assert_eq!(config.row_height, 80);
        assert_eq!(config.breakpoints.columns(Breakpoint::Sm), 4);
    }

    #[test]
    fn json_overrides_breakpoints_and_mode() {
        let raw = r#"{
            "layout_mode": "static",
            "breakpoints": {
                "lg": { "min_width": 1400, "columns": 12 },
                "md": { "min_width": 1000, "columns": 8 },
                "sm": { "min_width": 700, "columns": 4 },
                "xs": { "min_width": 400, "columns": 2 },
                "xxs": { "min_width": 0, "columns": 1 }
            }
        }"#;
        let config = BoardConfig::from_json_str(raw).unwrap();
        assert_eq!(config.layout_mode, LayoutMode::Static);
        assert_eq!(config.breakpoints.columns(Breakpoint::Lg), 12);
        assert_eq!(config.breakpoints.resolve(700), Breakpoint::Sm);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(BoardConfig::from_json_str(r#"{ "cell_span": 0 }"#)
            .unwrap_err()
            .is_validation());
        assert!(BoardConfig::from_json_str(r#"{ "row_height": 0 }"#).is_err());
        assert!(matches!(
            BoardConfig::from_json_str("{ not json"),
            Err(BoardError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_surfaces_io_error() {
        let path = std::env::temp_dir().join("tile_board_missing_config.json");
        let _ = std::fs::remove_file(&path);
        assert!(matches!(
            BoardConfig::from_path(&path),
            Err(BoardError::Io(_))
        ));
    }
}
