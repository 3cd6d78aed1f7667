//! Layout deriver.
//!
//! Placements are recomputed from a tile slice on every call; nothing here
//! holds state between calls.

mod breakpoint;
mod grid;

pub use breakpoint::{Breakpoint, BreakpointSpec, BreakpointTable};
pub use grid::{
    BoardLayout, GridPlacement, LayoutMode, compute_layout, compute_layout_for_width,
    tiles_per_row,
};
