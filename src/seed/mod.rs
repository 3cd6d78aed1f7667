//! Initial tile sets.
//!
//! Seeds are the only way tiles enter a registry. They are validated here so
//! the registry can assume every tile it holds is well formed.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::BoardConfig;
use crate::error::{BoardError, Result};
use crate::geometry::Size;
use crate::tile::{Tile, TileId, TileKind, Version, VersionId, version_label, version_number};

/// One seeded version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedVersion {
    pub id: VersionId,
    pub content: String,
    #[serde(default, alias = "isDefault")]
    pub is_default: bool,
}

/// Description of a tile as supplied at session start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedTile {
    #[serde(alias = "i")]
    pub id: TileId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub versions: Vec<SeedVersion>,
    /// Falls back to the default version when absent.
    #[serde(
        default,
        alias = "currentVersion",
        skip_serializing_if = "Option::is_none"
    )]
    pub current_version_id: Option<VersionId>,
    #[serde(default = "default_extent", alias = "w")]
    pub width: u16,
    #[serde(default = "default_extent", alias = "h")]
    pub height: u16,
}

fn default_extent() -> u16 {
    2
}

impl SeedTile {
    pub fn new(id: impl Into<TileId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            versions: Vec::new(),
            current_version_id: None,
            width: default_extent(),
            height: default_extent(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn version(
        mut self,
        id: impl Into<VersionId>,
        content: impl Into<String>,
        is_default: bool,
    ) -> Self {
        self.versions.push(SeedVersion {
            id: id.into(),
            content: content.into(),
            is_default,
        });
        self
    }

    pub fn current(mut self, version_id: impl Into<VersionId>) -> Self {
        self.current_version_id = Some(version_id.into());
        self
    }

    pub fn size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Validate and convert into a registry tile.
    pub fn into_tile(self, config: &BoardConfig) -> Result<Tile> {
        let SeedTile {
            id,
            title,
            description,
            versions: seeded,
            current_version_id,
            width,
            height,
        } = self;

        if id.is_empty() {
            return Err(BoardError::validation("tile id must not be empty"));
        }
        if seeded.is_empty() {
            return Err(BoardError::validation(format!(
                "tile `{id}` needs at least one version"
            )));
        }
        let size = Size::new(width, height);
        if !size.fits_within_floor(config.min_tile_size) {
            return Err(BoardError::validation(format!(
                "tile `{id}` size {width}x{height} is below the {}x{} minimum",
                config.min_tile_size.width, config.min_tile_size.height
            )));
        }

        let kind = if id == config.sentinel_tile_id {
            TileKind::Scope
        } else {
            TileKind::Text
        };

        let mut seen = HashSet::new();
        let mut versions = Vec::with_capacity(seeded.len());
        for version in seeded {
            if version_number(&version.id).is_none() {
                return Err(BoardError::validation(format!(
                    "tile `{id}` version `{}` is not of the form v<N>",
                    version.id
                )));
            }
            if !seen.insert(version.id.clone()) {
                return Err(BoardError::validation(format!(
                    "tile `{id}` repeats version `{}`",
                    version.id
                )));
            }
            let content = kind.parse_content(&version.content)?;
            versions.push(Version::new(version.id, content, version.is_default));
        }

        let defaults: Vec<usize> = versions
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_default())
            .map(|(idx, _)| idx)
            .collect();
        let &[default_idx] = defaults.as_slice() else {
            return Err(BoardError::validation(format!(
                "tile `{id}` must mark exactly one default version, found {}",
                defaults.len()
            )));
        };

        let current = match current_version_id {
            Some(wanted) => versions
                .iter()
                .position(|v| v.id() == wanted)
                .ok_or_else(|| BoardError::VersionNotFound {
                    tile: id.clone(),
                    version: wanted,
                })?,
            None => default_idx,
        };

        Ok(Tile::assemble(
            id,
            title,
            description,
            kind,
            versions,
            current,
            size,
        ))
    }
}

/// Validate a whole seed set, rejecting duplicate tile ids.
pub fn build_tiles(seeds: Vec<SeedTile>, config: &BoardConfig) -> Result<Vec<Tile>> {
    let mut seen = HashSet::new();
    seeds
        .into_iter()
        .map(|seed| {
            if !seen.insert(seed.id.clone()) {
                return Err(BoardError::validation(format!(
                    "tile id `{}` is used more than once",
                    seed.id
                )));
            }
            seed.into_tile(config)
        })
        .collect()
}

/// Parse a JSON array of seed tiles.
pub fn from_json_str(raw: &str) -> Result<Vec<SeedTile>> {
    Ok(serde_json::from_str(raw)?)
}

struct Section {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    first: &'static str,
    second: &'static str,
}

const SECTIONS: [Section; 12] = [
    Section {
        id: "observation",
        title: "Problem observation",
        description: "Initial identification of the problem.\n\n- Current situation.\n\n- Evidence that the problem exists (data, observations).\n\n- Context and environment where the problem appears.",
        first: "Initial observation of the problem.",
        second: "Observation updated after the team meeting.",
    },
    Section {
        id: "analysis",
        title: "Root cause analysis",
        description: "Identification of the underlying causes.\n\n- Methods used (Ishikawa diagram, five whys, etc).\n\n- Description of the causes found.\n\n- Evidence supporting each cause.",
        first: "First iteration of the root cause analysis.",
        second: "Analysis refined with additional data.",
    },
    Section {
        id: "statement",
        title: "Problem statement",
        description: "Clear and precise formulation of the problem.\n\n- Specific, measurable statement.\n\n- Impact on the organization.\n\n- Why the problem must be solved.",
        first: "Initial problem statement.",
        second: "Statement revised from client feedback.",
    },
    Section {
        id: "objective",
        title: "Project objective",
        description: "What the project is expected to achieve.\n\n- General objective.\n\n- Specific objectives.\n\n- Quantitative and qualitative goals.",
        first: "Preliminary project objective.",
        second: "Objective adjusted after the scope review.",
    },
    Section {
        id: "scope",
        title: "Scope",
        description: "What the project includes and excludes.\n\n- Activities and deliverables.\n\n- Limitations and exclusions.\n\n- Success criteria.",
        first: "global",
        second: "regional",
    },
    Section {
        id: "alternatives",
        title: "Solution alternatives",
        description: "Ways the problem could be solved.\n\n- Each alternative considered.\n\n- Advantages and drawbacks.\n\n- Evaluation criteria.",
        first: "Initial list of solution alternatives.",
        second: "Alternatives updated after the feasibility study.",
    },
    Section {
        id: "solution",
        title: "Chosen solution",
        description: "The solution selected for development.\n\n- Why it was chosen.\n\n- Detailed description.\n\n- Resources required.",
        first: "Initial solution proposal.",
        second: "Solution refined from technical team comments.",
    },
    Section {
        id: "design",
        title: "Design",
        description: "Detailed plan for implementing the solution.\n\n- Design plan (schematics, diagrams, models).\n\n- Technical specifications.\n\n- Design schedule.",
        first: "Initial design sketch.",
        second: "Detailed design with technical specifications.",
    },
    Section {
        id: "construction",
        title: "Construction",
        description: "Building the solution.\n\n- Construction activities.\n\n- Resources and materials.\n\n- Quality control and testing.",
        first: "Preliminary construction plan.",
        second: "Construction plan updated with a detailed schedule.",
    },
    Section {
        id: "follow-up",
        title: "Follow-up",
        description: "Monitoring project progress.\n\n- Performance indicators.\n\n- Progress reports.\n\n- Review meetings and plan adjustments.",
        first: "Initial follow-up plan.",
        second: "Follow-up plan updated with new indicators.",
    },
    Section {
        id: "implementation",
        title: "Implementation",
        description: "Rolling the solution out.\n\n- Implementation plan.\n\n- Activities and owners.\n\n- Risk and contingency management.",
        first: "Initial implementation plan.",
        second: "Implementation plan revised with team feedback.",
    },
    Section {
        id: "adoption",
        title: "Adoption",
        description: "Folding the solution into regular operations.\n\n- Adoption and training plan.\n\n- Communication and change strategy.\n\n- Adoption review and adjustments.",
        first: "Initial adoption strategy.",
        second: "Adoption strategy updated with lessons learned.",
    },
];

/// The twelve-section project report board.
pub fn project_report() -> Vec<SeedTile> {
    SECTIONS
        .iter()
        .map(|section| {
            SeedTile::new(section.id, section.title)
                .description(section.description)
                .version(version_label(1), section.first, true)
                .version(version_label(2), section.second, false)
                .current(version_label(1))
        })
        .collect()
}
