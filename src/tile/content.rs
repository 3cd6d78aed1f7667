use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result};

/// Closed set of values accepted by the scope tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Global,
    Regional,
    Local,
}

impl Scope {
    pub const ALL: [Scope; 3] = [Scope::Global, Scope::Regional, Scope::Local];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Global => "global",
            Scope::Regional => "regional",
            Scope::Local => "local",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = BoardError;

    fn from_str(raw: &str) -> Result<Self> {
        Scope::ALL
            .into_iter()
            .find(|scope| scope.as_str() == raw)
            .ok_or_else(|| {
                BoardError::validation(format!(
                    "`{raw}` is not a scope value (expected global, regional or local)"
                ))
            })
    }
}

/// How a tile interprets its version content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    /// Free-form text.
    Text,
    /// One of [`Scope::ALL`].
    Scope,
}

impl TileKind {
    /// Check raw input against this kind's domain.
    pub fn parse_content(self, raw: &str) -> Result<TileContent> {
        match self {
            TileKind::Text => Ok(TileContent::Text(raw.to_string())),
            TileKind::Scope => raw.parse().map(TileContent::Scope),
        }
    }
}

/// Payload of a single version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum TileContent {
    Text(String),
    Scope(Scope),
}

impl TileContent {
    pub fn as_str(&self) -> &str {
        match self {
            TileContent::Text(text) => text,
            TileContent::Scope(scope) => scope.as_str(),
        }
    }

    pub fn kind(&self) -> TileKind {
        match self {
            TileContent::Text(_) => TileKind::Text,
            TileContent::Scope(_) => TileKind::Scope,
        }
    }

    pub(crate) fn fingerprint(&self) -> blake3::Hash {
        blake3::hash(self.as_str().as_bytes())
    }
}

impl fmt::Display for TileContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_parses_known_values() {
        assert_eq!("global".parse::<Scope>().unwrap(), Scope::Global);
        assert_eq!("regional".parse::<Scope>().unwrap(), Scope::Regional);
        assert_eq!("local".parse::<Scope>().unwrap(), Scope::Local);
    }

    #[test]
    fn scope_rejects_unknown_and_case_variants() {
        assert!("unknown-value".parse::<Scope>().unwrap_err().is_validation());
        assert!("Global".parse::<Scope>().is_err());
        assert!("".parse::<Scope>().is_err());
    }

    #[test]
    fn text_kind_accepts_anything() {
        let content = TileKind::Text.parse_content("").unwrap();
        assert_eq!(content, TileContent::Text(String::new()));
        assert_eq!(content.kind(), TileKind::Text);
    }

    #[test]
    fn scope_kind_builds_tagged_content() {
        let content = TileKind::Scope.parse_content("local").unwrap();
        assert_eq!(content, TileContent::Scope(Scope::Local));
        assert_eq!(content.as_str(), "local");
    }

    #[test]
    fn content_serializes_as_plain_string() {
        let text = serde_json::to_string(&TileContent::Text("draft".into())).unwrap();
        let scope = serde_json::to_string(&TileContent::Scope(Scope::Regional)).unwrap();
        assert_eq!(text, "\"draft\"");
        assert_eq!(scope, "\"regional\"");
    }

    #[test]
    fn fingerprint_tracks_rendered_text() {
        let a = TileContent::Text("global".into());
        let b = TileContent::Scope(Scope::Global);
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), TileContent::Text("local".into()).fingerprint());
    }
}
