//! Canonical story records.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Registry shape a story record was read from.
///
/// # Examples
///
/// ```
/// use storycrawler_core::StoryVersion;
///
/// assert_eq!(StoryVersion::V4.to_string(), "v4");
/// assert_eq!("v5".parse::<StoryVersion>().unwrap(), StoryVersion::V5);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StoryVersion {
    /// Flattened from the legacy `getStorybook()` kind groups (no ids)
    V4,
    /// Read from the `raw()` list of Storybook 5 and later
    V5,
}

/// One story in the canonical flat list.
///
/// `id` is present for stories read from the raw list. Flattened legacy
/// stories have no id and are identified by `kind` + `name`.
///
/// # Examples
///
/// ```
/// use storycrawler_core::{StoryRecordBuilder, StoryVersion};
///
/// let story = StoryRecordBuilder::default()
///     .id(Some("button--primary".to_string()))
///     .kind("Button")
///     .name("Primary")
///     .version(StoryVersion::V5)
///     .build()
///     .unwrap();
///
/// assert_eq!(story.identity(), ("Button", "Primary"));
/// assert_eq!(story.id.as_deref(), Some("button--primary"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Builder)]
#[builder(setter(into))]
pub struct StoryRecord {
    /// Storybook story id, absent for legacy registries
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Grouping label, usually the component name
    pub kind: String,
    /// Story title within its kind
    pub name: String,
    /// Registry shape the record came from
    pub version: StoryVersion,
}

impl StoryRecord {
    /// Record read from a raw story list.
    pub fn v5(id: impl Into<String>, kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            kind: kind.into(),
            name: name.into(),
            version: StoryVersion::V5,
        }
    }

    /// Record flattened from a legacy kind group.
    pub fn v4(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: None,
            kind: kind.into(),
            name: name.into(),
            version: StoryVersion::V4,
        }
    }

    /// The `(kind, name)` pair that identifies a story on every registry version.
    pub fn identity(&self) -> (&str, &str) {
        (&self.kind, &self.name)
    }
}

/// All stories registered under one kind in a legacy registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LegacyKindGroup {
    /// Grouping label
    pub kind: String,
    /// Story names in the order the registry reported them
    pub names: Vec<String>,
}

impl LegacyKindGroup {
    /// Create a group from a kind and its story names.
    pub fn new<I, S>(kind: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: kind.into(),
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}
