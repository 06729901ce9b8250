//! Repository labels and the catalog every managed repository carries.

use serde::{Deserialize, Serialize};

/// Labels the release workflow relies on, in creation order.
pub const REQUIRED_LABELS: [(&str, &str); 13] = [
    ("needs-master-merge", "b60205"),
    ("qa-required", "1d76db"),
    ("release", "d4c5f9"),
    ("ready-for-staging", "fef2c0"),
    ("on-staging", "fbca04"),
    ("on-staging--partial", "d93f0b"),
    ("ready-for-production", "c2e0c6"),
    ("on-production", "0e8a16"),
    ("semver/major", "c5def5"),
    ("semver/minor", "c5def5"),
    ("semver/patch", "c5def5"),
    ("add-to-any-release", "33acbf"),
    ("add-to-next-release", "baf265"),
];

/// A repository label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    #[serde(default)]
    pub color: String,
}

impl Label {
    #[must_use]
    pub fn new(name: &str, color: &str) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
        }
    }
}

/// Immutable, ordered set of labels to reconcile a repository against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCatalog {
    labels: Vec<Label>,
}

impl LabelCatalog {
    /// Build a catalog from `(name, color)` pairs, keeping their order.
    #[must_use]
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            labels: pairs.iter().map(|(name, color)| Label::new(name, color)).collect(),
        }
    }

    /// The release workflow's catalog.
    #[must_use]
    pub fn required() -> Self {
        Self::from_pairs(&REQUIRED_LABELS)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.labels.iter().any(|l| l.name == name)
    }
}

impl Default for LabelCatalog {
    fn default() -> Self {
        Self::required()
    }
}
