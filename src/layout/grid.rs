//! Uniform cell grid placement.
//!
//! Tiles are dropped into same-sized cells in registry order. A tile's own
//! width and height only affect the size it reports inside its cell, never
//! where the next tile lands, so there is no packing step and the result
//! depends solely on the current input.
//!
//! # Example
//! ```
//! use tile_board::config::BoardConfig;
//! use tile_board::layout::{Breakpoint, compute_layout};
//! use tile_board::seed;
//!
//! let config = BoardConfig::default();
//! let tiles = seed::build_tiles(seed::project_report(), &config)?;
//! let layout = compute_layout(&tiles, Breakpoint::Lg, &config);
//!
//! let fourth = &layout.placements()[3];
//! assert_eq!((fourth.x, fourth.y), (0, 2));
//! # Ok::<(), tile_board::BoardError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::config::BoardConfig;
use crate::geometry::Frame;
use crate::tile::{Tile, TileId};

use super::breakpoint::Breakpoint;

/// How tiles behave inside their cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Tiles report their own size and can be dragged or resized.
    #[default]
    Dynamic,
    /// Every tile fills exactly one cell and is locked in place.
    Static,
}

/// Position and size of one tile in grid units.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GridPlacement {
    pub tile_id: TileId,
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
    pub min_w: u16,
    pub min_h: u16,
    /// Set when the presentation must not drag or resize the tile.
    pub locked: bool,
}

impl GridPlacement {
    /// Convert to layout units given the row height and a column width.
    pub fn frame(&self, row_height: u32, column_width: u32) -> Frame {
        Frame::new(
            u32::from(self.x) * column_width,
            u32::from(self.y) * row_height,
            u32::from(self.w) * column_width,
            u32::from(self.h) * row_height,
        )
    }
}

/// Placements for one breakpoint, in registry order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardLayout {
    breakpoint: Breakpoint,
    columns: u16,
    row_height: u32,
    placements: Vec<GridPlacement>,
}

impl BoardLayout {
    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn row_height(&self) -> u32 {
        self.row_height
    }

    pub fn placements(&self) -> &[GridPlacement] {
        &self.placements
    }

    pub fn get(&self, tile_id: &str) -> Option<&GridPlacement> {
        self.placements.iter().find(|p| p.tile_id == tile_id)
    }

    /// Number of grid rows covered by the tallest column.
    pub fn rows(&self) -> u16 {
        self.placements
            .iter()
            .map(|p| p.y.saturating_add(p.h))
            .max()
            .unwrap_or(0)
    }

    pub fn into_placements(self) -> Vec<GridPlacement> {
        self.placements
    }
}

/// Number of cells that fit side by side in `columns`.
pub fn tiles_per_row(columns: u16, cell_span: u16) -> u16 {
    (columns / cell_span.max(1)).max(1)
}

/// Place `tiles` for `breakpoint`.
pub fn compute_layout(tiles: &[Tile], breakpoint: Breakpoint, config: &BoardConfig) -> BoardLayout {
    let columns = config.breakpoints.columns(breakpoint);
    let span = config.cell_span.max(1);
    let per_row = usize::from(tiles_per_row(columns, span));
    let min = config.min_tile_size;

    let placements = tiles
        .iter()
        .enumerate()
        .map(|(k, tile)| {
            let col = to_grid_unit(k % per_row, span);
            let row = to_grid_unit(k / per_row, span);
            let (w, h, locked) = match config.layout_mode {
                LayoutMode::Dynamic => (
                    tile.width().max(min.width).min(columns.max(min.width)),
                    tile.height().max(min.height),
                    false,
                ),
                LayoutMode::Static => (span.max(min.width), span.max(min.height), true),
            };
            GridPlacement {
                tile_id: tile.id().to_string(),
                x: col,
                y: row,
                w,
                h,
                min_w: min.width,
                min_h: min.height,
                locked,
            }
        })
        .collect();

    BoardLayout {
        breakpoint,
        columns,
        row_height: config.row_height,
        placements,
    }
}

/// Resolve the breakpoint for a viewport width, then place `tiles`.
pub fn compute_layout_for_width(tiles: &[Tile], width: u32, config: &BoardConfig) -> BoardLayout {
    compute_layout(tiles, config.breakpoints.resolve(width), config)
}

fn to_grid_unit(cells: usize, span: u16) -> u16 {
    u16::try_from(cells)
        .unwrap_or(u16::MAX)
        .saturating_mul(span)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{self, SeedTile};

    fn tiles(count: usize) -> Vec<Tile> {
        let seeds = (0..count)
            .map(|idx| {
                SeedTile::new(format!("t{idx}"), format!("Tile {idx}"))
                    .version("v1", "draft", true)
            })
            .collect();
        seed::build_tiles(seeds, &BoardConfig::default()).unwrap()
    }

    fn coords(layout: &BoardLayout) -> Vec<(u16, u16)> {
        layout.placements().iter().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn wide_breakpoint_places_three_per_row() {
        let layout = compute_layout(&tiles(7), Breakpoint::Lg, &BoardConfig::default());
        assert_eq!(layout.columns(), 6);
        assert_eq!(
            coords(&layout),
            vec![(0, 0), (2, 0), (4, 0), (0, 2), (2, 2), (4, 2), (0, 4)]
        );
        assert_eq!(layout.rows(), 6);
    }

    #[test]
    fn narrower_breakpoints_reduce_cells_per_row() {
        let config = BoardConfig::default();
        let sm = compute_layout(&tiles(3), Breakpoint::Sm, &config);
        assert_eq!(coords(&sm), vec![(0, 0), (2, 0), (0, 2)]);

        let xxs = compute_layout(&tiles(3), Breakpoint::Xxs, &config);
        assert_eq!(coords(&xxs), vec![(0, 0), (0, 2), (0, 4)]);
    }

    #[test]
    fn placements_carry_minimum_floor() {
        let layout = compute_layout(&tiles(2), Breakpoint::Md, &BoardConfig::default());
        for placement in layout.placements() {
            assert_eq!((placement.min_w, placement.min_h), (2, 2));
            assert!(!placement.locked);
        }
    }

    #[test]
    fn reported_size_does_not_shift_neighbours() {
        let config = BoardConfig::default();
        let seeds = vec![
            SeedTile::new("wide", "Wide")
                .version("v1", "", true)
                .size(4, 3),
            SeedTile::new("next", "Next").version("v1", "", true),
        ];
        let tiles = seed::build_tiles(seeds, &config).unwrap();
        let layout = compute_layout(&tiles, Breakpoint::Lg, &config);

        let wide = layout.get("wide").unwrap();
        assert_eq!((wide.w, wide.h), (4, 3));
        let next = layout.get("next").unwrap();
        assert_eq!((next.x, next.y), (2, 0));
    }

    #[test]
    fn reported_width_is_capped_at_column_count() {
        let config = BoardConfig::default();
        let seeds = vec![
            SeedTile::new("huge", "Huge")
                .version("v1", "", true)
                .size(10, 2),
        ];
        let tiles = seed::build_tiles(seeds, &config).unwrap();
        let layout = compute_layout(&tiles, Breakpoint::Xs, &config);
        assert_eq!(layout.get("huge").unwrap().w, 2);
    }

    #[test]
    fn static_mode_locks_uniform_cells() {
        let config = BoardConfig {
            layout_mode: LayoutMode::Static,
            ..BoardConfig::default()
        };
        let seeds = vec![
            SeedTile::new("wide", "Wide")
                .version("v1", "", true)
                .size(4, 4),
        ];
        let tiles = seed::build_tiles(seeds, &config).unwrap();
        let placement = compute_layout(&tiles, Breakpoint::Lg, &config)
            .into_placements()
            .remove(0);
        assert_eq!((placement.w, placement.h), (2, 2));
        assert!(placement.locked);
    }

    #[test]
    fn width_exactly_on_threshold_selects_that_tier() {
        let layout = compute_layout_for_width(&tiles(1), 768, &BoardConfig::default());
        assert_eq!(layout.breakpoint(), Breakpoint::Sm);
        assert_eq!(layout.columns(), 4);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let config = BoardConfig::default();
        let input = tiles(9);
        let first = compute_layout(&input, Breakpoint::Md, &config);
        let second = compute_layout(&input, Breakpoint::Md, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_board_has_no_rows() {
        let layout = compute_layout(&[], Breakpoint::Lg, &BoardConfig::default());
        assert!(layout.placements().is_empty());
        assert_eq!(layout.rows(), 0);
    }

    #[test]
    fn frame_scales_by_row_height() {
        let placement = GridPlacement {
            tile_id: "t".into(),
            x: 2,
            y: 2,
            w: 2,
            h: 2,
            min_w: 2,
            min_h: 2,
            locked: false,
        };
        let frame = placement.frame(100, 200);
        assert_eq!(frame, Frame::new(400, 200, 400, 200));
        assert_eq!((frame.right(), frame.bottom()), (800, 400));
    }

    #[test]
    fn neighbouring_frames_touch_without_overlap() {
        let config = BoardConfig::default();
        let tiles = crate::seed::build_tiles(crate::seed::project_report(), &config).unwrap();
        let layout = compute_layout(&tiles, Breakpoint::Lg, &config);
        let frames: Vec<Frame> = layout
            .placements()
            .iter()
            .map(|p| p.frame(config.row_height, 100))
            .collect();
        assert_eq!(frames[0].right(), frames[1].left);
        assert_eq!(frames[0].bottom(), frames[3].top);
    }

    #[test]
    fn tiles_per_row_never_zero() {
        assert_eq!(tiles_per_row(6, 2), 3);
        assert_eq!(tiles_per_row(1, 2), 1);
        assert_eq!(tiles_per_row(4, 0), 4);
    }
}
