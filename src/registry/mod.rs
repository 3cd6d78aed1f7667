//! Tile registry: the single owner of tile and version state.

mod core;

pub use self::core::{BoardSnapshot, TileRegistry};
