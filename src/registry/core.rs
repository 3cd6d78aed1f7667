use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::config::BoardConfig;
use crate::error::{BoardError, Result};
use crate::geometry::Size;
use crate::layout::{BoardLayout, Breakpoint, compute_layout};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::seed::{SeedTile, build_tiles};
use crate::tile::{Tile, TileContent, TileId, VersionId};

const LOG_TARGET: &str = "board::registry";

/// Immutable copy of every tile in registry order.
///
/// Each call to [`TileRegistry::snapshot`] builds a fresh one, so later
/// mutations never show through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BoardSnapshot {
    tiles: Arc<[Tile]>,
}

impl BoardSnapshot {
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn get(&self, tile_id: &str) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id() == tile_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn layout(&self, breakpoint: Breakpoint, config: &BoardConfig) -> BoardLayout {
        compute_layout(&self.tiles, breakpoint, config)
    }
}

/// Authoritative tile set for one session.
///
/// Every mutation either applies completely or returns an error and leaves
/// the registry untouched. Tiles touched since the last [`take_dirty`] call
/// are tracked so presentation can refresh only what changed.
///
/// [`take_dirty`]: TileRegistry::take_dirty
pub struct TileRegistry {
    tiles: Vec<Tile>,
    dirty: HashSet<TileId>,
    min_size: Size,
    logger: Option<Logger>,
}

impl TileRegistry {
    /// Validate `seeds` against `config` and take ownership of the result.
    /// Every seeded tile starts dirty.
    pub fn from_seeds(seeds: Vec<SeedTile>, config: &BoardConfig) -> Result<Self> {
        let tiles = build_tiles(seeds, config)?;
        let dirty = tiles.iter().map(|t| t.id().to_string()).collect();
        Ok(Self {
            tiles,
            dirty,
            min_size: config.min_tile_size,
            logger: None,
        })
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, tile_id: &str) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id() == tile_id)
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            tiles: self.tiles.iter().cloned().collect(),
        }
    }

    /// Content of the version currently selected on `tile_id`.
    pub fn current_content(&self, tile_id: &str) -> Result<&TileContent> {
        let idx = self.index_of(tile_id)?;
        Ok(self.tiles[idx].current_version().content())
    }

    /// Point the tile at another of its existing versions.
    pub fn set_current_version(&mut self, tile_id: &str, version_id: &str) -> Result<()> {
        let idx = self.index_of(tile_id)?;
        let version_idx = self.version_index(idx, version_id)?;
        let tile = &mut self.tiles[idx];
        tile.select(version_idx);
        tile.debug_check_invariants();
        self.mark_dirty(idx);
        self.trace(
            "current_version_set",
            [json_kv("tile_id", tile_id), json_kv("version_id", version_id)],
        );
        Ok(())
    }

    /// Overwrite the current version's content in place.
    ///
    /// Returns `false` when the content was already identical; nothing is
    /// marked dirty in that case.
    pub fn edit_current_version_content(
        &mut self,
        tile_id: &str,
        new_content: &str,
    ) -> Result<bool> {
        let idx = self.index_of(tile_id)?;
        let content = self.tiles[idx].kind().parse_content(new_content)?;
        let tile = &mut self.tiles[idx];
        let changed = tile.current_version_mut().replace_content(content);
        let version_id = tile.current_version_id().to_string();
        tile.debug_check_invariants();
        if changed {
            self.mark_dirty(idx);
        }
        self.trace(
            "content_edited",
            [
                json_kv("tile_id", tile_id),
                json_kv("version_id", version_id),
                json_kv("changed", changed),
            ],
        );
        Ok(changed)
    }

    /// Copy the current version into a new non-default version and select it.
    pub fn branch_new_version(&mut self, tile_id: &str) -> Result<VersionId> {
        let idx = self.index_of(tile_id)?;
        let content = self.tiles[idx].current_version().content().clone();
        self.push_branch(idx, content)
    }

    /// Branch with `content` instead of the stored text, validated like an edit.
    pub fn branch_version_with_content(
        &mut self,
        tile_id: &str,
        content: &str,
    ) -> Result<VersionId> {
        let idx = self.index_of(tile_id)?;
        let content = self.tiles[idx].kind().parse_content(content)?;
        self.push_branch(idx, content)
    }

    /// Make `version_id` the tile's only default version.
    pub fn set_default_version(&mut self, tile_id: &str, version_id: &str) -> Result<()> {
        let idx = self.index_of(tile_id)?;
        let version_idx = self.version_index(idx, version_id)?;
        let tile = &mut self.tiles[idx];
        let already = tile.versions()[version_idx].is_default();
        tile.mark_default(version_idx);
        tile.debug_check_invariants();
        if !already {
            self.mark_dirty(idx);
        }
        self.trace(
            "default_version_set",
            [
                json_kv("tile_id", tile_id),
                json_kv("version_id", version_id),
                json_kv("changed", !already),
            ],
        );
        Ok(())
    }

    /// Change the tile's declared size. Both dimensions must reach the floor.
    pub fn resize_tile(&mut self, tile_id: &str, width: u16, height: u16) -> Result<bool> {
        let idx = self.index_of(tile_id)?;
        let size = Size::new(width, height);
        if !size.fits_within_floor(self.min_size) {
            return Err(BoardError::validation(format!(
                "tile `{tile_id}` cannot shrink to {width}x{height}, minimum is {}x{}",
                self.min_size.width, self.min_size.height
            )));
        }
        let changed = self.tiles[idx].size() != size;
        if changed {
            self.tiles[idx].resize(size);
            self.mark_dirty(idx);
        }
        self.trace(
            "tile_resized",
            [
                json_kv("tile_id", tile_id),
                json_kv("width", width),
                json_kv("height", height),
            ],
        );
        Ok(changed)
    }

    /// Move a tile to `new_index`, clamped to the last slot. Returns the
    /// index it landed on.
    pub fn move_tile(&mut self, tile_id: &str, new_index: usize) -> Result<usize> {
        let from = self.index_of(tile_id)?;
        let to = new_index.min(self.tiles.len() - 1);
        if from != to {
            let tile = self.tiles.remove(from);
            self.tiles.insert(to, tile);
            for idx in from.min(to)..=from.max(to) {
                self.mark_dirty(idx);
            }
        }
        self.trace(
            "tile_moved",
            [
                json_kv("tile_id", tile_id),
                json_kv("from", from),
                json_kv("to", to),
            ],
        );
        Ok(to)
    }

    /// Drain the ids of tiles changed since the previous call, in registry order.
    pub fn take_dirty(&mut self) -> Vec<TileId> {
        if self.dirty.is_empty() {
            return Vec::new();
        }
        let dirty = std::mem::take(&mut self.dirty);
        self.tiles
            .iter()
            .filter(|t| dirty.contains(t.id()))
            .map(|t| t.id().to_string())
            .collect()
    }

    pub fn has_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    fn push_branch(&mut self, idx: usize, content: TileContent) -> Result<VersionId> {
        let tile = &mut self.tiles[idx];
        let version_id = tile.push_branch(content)?;
        let count = tile.versions().len();
        let tile_id = tile.id().to_string();
        tile.debug_check_invariants();
        self.mark_dirty(idx);
        self.trace(
            "version_branched",
            [
                json_kv("tile_id", tile_id),
                json_kv("version_id", version_id.clone()),
                json_kv("version_count", count),
            ],
        );
        Ok(version_id)
    }

    fn index_of(&self, tile_id: &str) -> Result<usize> {
        self.tiles
            .iter()
            .position(|t| t.id() == tile_id)
            .ok_or_else(|| BoardError::TileNotFound(tile_id.to_string()))
    }

    fn version_index(&self, idx: usize, version_id: &str) -> Result<usize> {
        let tile = &self.tiles[idx];
        tile.position_of(version_id)
            .ok_or_else(|| BoardError::VersionNotFound {
                tile: tile.id().to_string(),
                version: version_id.to_string(),
            })
    }

    fn mark_dirty(&mut self, idx: usize) {
        self.dirty.insert(self.tiles[idx].id().to_string());
    }

    fn trace(&self, message: &str, fields: impl IntoIterator<Item = (String, Value)>) {
        if let Some(logger) = &self.logger {
            let event = event_with_fields(LogLevel::Debug, LOG_TARGET, message, fields);
            let _ = logger.log_event(event);
        }
    }
}
