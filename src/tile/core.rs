use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::error::{BoardError, Result};
use crate::geometry::Size;

use super::content::{TileContent, TileKind};

pub type TileId = String;

/// Version identifiers are only unique within their tile.
pub type VersionId = String;

/// Format the `v<N>` label used for sequential version ids.
pub(crate) fn version_label(number: u32) -> VersionId {
    format!("v{number}")
}

/// Parse a canonical `v<N>` label with N >= 1.
pub(crate) fn version_number(id: &str) -> Option<u32> {
    let number: u32 = id.strip_prefix('v')?.parse().ok()?;
    (number >= 1 && version_label(number) == id).then_some(number)
}

/// One snapshot of a tile's content.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Version {
    id: VersionId,
    content: TileContent,
    is_default: bool,
    #[serde(skip)]
    fingerprint: blake3::Hash,
}

impl Version {
    pub(crate) fn new(id: VersionId, content: TileContent, is_default: bool) -> Self {
        let fingerprint = content.fingerprint();
        Self {
            id,
            content,
            is_default,
            fingerprint,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn content(&self) -> &TileContent {
        &self.content
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn fingerprint(&self) -> blake3::Hash {
        self.fingerprint
    }

    /// Replace the content, returning `false` when it was already identical.
    pub(crate) fn replace_content(&mut self, content: TileContent) -> bool {
        let fingerprint = content.fingerprint();
        if fingerprint == self.fingerprint {
            return false;
        }
        self.content = content;
        self.fingerprint = fingerprint;
        true
    }
}

/// A document section with its revision history and grid size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    id: TileId,
    title: String,
    description: Option<String>,
    kind: TileKind,
    versions: Vec<Version>,
    current: usize,
    size: Size,
    /// `None` once every `v<N>` label has been handed out.
    next_version: Option<u32>,
}

impl Tile {
    /// Build a tile from already validated parts.
    ///
    /// `current` must index into `versions` and exactly one version must be
    /// flagged default.
    pub(crate) fn assemble(
        id: TileId,
        title: String,
        description: Option<String>,
        kind: TileKind,
        versions: Vec<Version>,
        current: usize,
        size: Size,
    ) -> Self {
        let highest = versions
            .iter()
            .filter_map(|v| version_number(&v.id))
            .max()
            .unwrap_or(0);
        let created = u32::try_from(versions.len()).unwrap_or(u32::MAX);
        let tile = Self {
            id,
            title,
            description,
            kind,
            versions,
            current,
            size,
            next_version: highest.max(created).checked_add(1),
        };
        tile.debug_check_invariants();
        tile
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn kind(&self) -> TileKind {
        self.kind
    }

    /// Versions in creation order.
    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    pub fn version(&self, version_id: &str) -> Option<&Version> {
        self.versions.iter().find(|v| v.id == version_id)
    }

    pub fn current_version_id(&self) -> &str {
        &self.versions[self.current].id
    }

    pub fn current_version(&self) -> &Version {
        &self.versions[self.current]
    }

    pub fn default_version(&self) -> &Version {
        self.versions
            .iter()
            .find(|v| v.is_default)
            .unwrap_or(&self.versions[0])
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> u16 {
        self.size.width
    }

    pub fn height(&self) -> u16 {
        self.size.height
    }

    pub(crate) fn position_of(&self, version_id: &str) -> Option<usize> {
        self.versions.iter().position(|v| v.id == version_id)
    }

    pub(crate) fn select(&mut self, index: usize) {
        self.current = index;
    }

    pub(crate) fn current_version_mut(&mut self) -> &mut Version {
        &mut self.versions[self.current]
    }

    /// Append a non-default version holding `content` and make it current.
    pub(crate) fn push_branch(&mut self, content: TileContent) -> Result<VersionId> {
        let Some(number) = self.next_version else {
            return Err(BoardError::validation(format!(
                "tile `{}` has no version numbers left",
                self.id
            )));
        };
        let id = version_label(number);
        self.next_version = number.checked_add(1);
        self.versions.push(Version::new(id.clone(), content, false));
        self.current = self.versions.len() - 1;
        Ok(id)
    }

    /// Flag `index` as the only default version.
    pub(crate) fn mark_default(&mut self, index: usize) {
        for (idx, version) in self.versions.iter_mut().enumerate() {
            version.is_default = idx == index;
        }
    }

    pub(crate) fn resize(&mut self, size: Size) {
        self.size = size;
    }

    pub(crate) fn debug_check_invariants(&self) {
        debug_assert!(
            self.current < self.versions.len(),
            "tile `{}` current pointer out of range",
            self.id
        );
        debug_assert_eq!(
            self.versions.iter().filter(|v| v.is_default).count(),
            1,
            "tile `{}` must have exactly one default version",
            self.id
        );
        debug_assert!(
            self.versions
                .iter()
                .enumerate()
                .all(|(idx, v)| self.versions[..idx].iter().all(|w| w.id != v.id)),
            "tile `{}` repeats a version id",
            self.id
        );
    }
}

impl Serialize for Tile {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Tile", 7)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("title", &self.title)?;
        state.serialize_field("description", &self.description)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("versions", &self.versions)?;
        state.serialize_field("current_version_id", self.current_version_id())?;
        state.serialize_field("size", &self.size)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> TileContent {
        TileContent::Text(value.to_string())
    }

    fn sample() -> Tile {
        Tile::assemble(
            "t1".into(),
            "Sample".into(),
            None,
            TileKind::Text,
            vec![
                Version::new("v1".into(), text("draft"), true),
                Version::new("v2".into(), text("second"), false),
            ],
            0,
            Size::new(2, 2),
        )
    }

    #[test]
    fn version_label_format() {
        assert_eq!(version_label(1), "v1");
        assert_eq!(version_label(12), "v12");
    }

    #[test]
    fn branch_numbering_follows_version_count() {
        let mut tile = sample();
        let id = tile.push_branch(text("draft")).unwrap();
        assert_eq!(id, "v3");
        assert_eq!(tile.current_version_id(), "v3");
        assert!(!tile.current_version().is_default());
    }

    #[test]
    fn branch_numbering_skips_past_seeded_gaps() {
        let mut tile = Tile::assemble(
            "t1".into(),
            "Sample".into(),
            None,
            TileKind::Text,
            vec![Version::new("v5".into(), text("late"), true)],
            0,
            Size::new(2, 2),
        );
        assert_eq!(tile.push_branch(text("late")).unwrap(), "v6");
    }

    #[test]
    fn branching_stops_when_numbers_run_out() {
        let mut tile = Tile::assemble(
            "t1".into(),
            "Sample".into(),
            None,
            TileKind::Text,
            vec![Version::new(version_label(u32::MAX - 1), text("late"), true)],
            0,
            Size::new(2, 2),
        );
        assert_eq!(tile.push_branch(text("late")).unwrap(), version_label(u32::MAX));
        let err = tile.push_branch(text("late")).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(tile.versions().len(), 2);
        assert_eq!(tile.current_version_id(), version_label(u32::MAX));
    }

    #[test]
    fn version_number_accepts_only_canonical_labels() {
        assert_eq!(version_number("v1"), Some(1));
        assert_eq!(version_number("v42"), Some(42));
        assert_eq!(version_number("v0"), None);
        assert_eq!(version_number("v01"), None);
        assert_eq!(version_number("v+3"), None);
        assert_eq!(version_number(""), None);
        assert_eq!(version_number("draft"), None);
    }

    #[test]
    fn mark_default_keeps_single_flag() {
        let mut tile = sample();
        tile.mark_default(1);
        let defaults: Vec<_> = tile
            .versions()
            .iter()
            .filter(|v| v.is_default())
            .map(|v| v.id().to_string())
            .collect();
        assert_eq!(defaults, vec!["v2".to_string()]);
        assert_eq!(tile.default_version().id(), "v2");
    }

    #[test]
    fn replace_content_reports_noop() {
        let mut version = Version::new("v1".into(), text("same"), true);
        assert!(!version.replace_content(text("same")));
        assert!(version.replace_content(text("changed")));
        assert_eq!(version.content().as_str(), "changed");
    }

    #[test]
    fn serializes_current_version_id() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["current_version_id"], "v1");
        assert_eq!(value["versions"][0]["content"], "draft");
        assert_eq!(value["versions"][0]["is_default"], true);
        assert_eq!(value["size"]["width"], 2);
    }
}
