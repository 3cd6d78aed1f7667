//! Tile and version records owned by the registry.
//!
//! Fields are read through accessors; only the registry mutates them so the
//! single-default and current-pointer invariants hold at every boundary.

mod content;
mod core;

pub use content::{Scope, TileContent, TileKind};
pub use self::core::{Tile, TileId, Version, VersionId};

pub(crate) use self::core::{version_label, version_number};
