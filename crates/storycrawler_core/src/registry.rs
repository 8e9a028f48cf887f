//! Registry shapes and the snapshot contract read out of the page.
//!
//! Three historical shapes of `window.__STORYBOOK_CLIENT_API__` are supported:
//!
//! | Version         | Capabilities               | Read path                    |
//! |-----------------|----------------------------|------------------------------|
//! | `ConfiguringV6` | `raw()` and `store()`      | wait for `_configuring`, `raw()` |
//! | `RawV5`         | `raw()`                    | `raw()`                      |
//! | `LegacyV4`      | `getStorybook()`           | kind groups                  |
//!
//! The page returns a [`RegistrySnapshot`]; that JSON document is the only
//! data that crosses from the page into this process.

use crate::{LegacyKindGroup, StoryRecord, flatten_stories};
use serde::{Deserialize, Serialize};

/// Which registry methods the page exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryCapabilities {
    /// `raw()` returning pre-normalized story entries (v5+)
    #[serde(default)]
    pub raw: bool,
    /// `store()` exposing the `_configuring` flag (v6+)
    #[serde(default)]
    pub store: bool,
    /// `getStorybook()` returning kind groups (v4)
    #[serde(default)]
    pub get_storybook: bool,
}

/// Registry version selected from the probed capabilities.
///
/// # Examples
///
/// ```
/// use storycrawler_core::{RegistryCapabilities, RegistryVersion};
///
/// let caps = RegistryCapabilities { raw: true, store: true, get_storybook: true };
/// assert_eq!(RegistryVersion::detect(&caps), Some(RegistryVersion::ConfiguringV6));
///
/// let caps = RegistryCapabilities { raw: false, store: true, get_storybook: true };
/// assert_eq!(RegistryVersion::detect(&caps), Some(RegistryVersion::LegacyV4));
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
    strum::EnumIter,
)]
pub enum RegistryVersion {
    /// Kind groups without ids
    LegacyV4,
    /// Flat raw list
    RawV5,
    /// Flat raw list published after an asynchronous configuring phase
    ConfiguringV6,
}

impl RegistryVersion {
    /// Select the registry version, checking the newest shape first.
    ///
    /// Returns `None` when the registry exposes none of the known methods.
    pub fn detect(capabilities: &RegistryCapabilities) -> Option<Self> {
        match capabilities {
            RegistryCapabilities {
                raw: true,
                store: true,
                ..
            } => Some(Self::ConfiguringV6),
            RegistryCapabilities { raw: true, .. } => Some(Self::RawV5),
            RegistryCapabilities {
                get_storybook: true,
                ..
            } => Some(Self::LegacyV4),
            _ => None,
        }
    }

    /// Whether this version may still be registering stories after load.
    pub fn may_be_configuring(self) -> bool {
        matches!(self, Self::ConfiguringV6)
    }
}

/// One entry of the `raw()` story list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawStory {
    /// Storybook story id
    pub id: String,
    /// Grouping label
    pub kind: String,
    /// Story title
    pub name: String,
}

impl From<RawStory> for StoryRecord {
    fn from(raw: RawStory) -> Self {
        StoryRecord::v5(raw.id, raw.kind, raw.name)
    }
}

/// What one evaluation of the in-page snapshot script returns.
///
/// # Examples
///
/// ```
/// use storycrawler_core::{RegistryReadResult, RegistrySnapshot};
///
/// let snapshot: RegistrySnapshot = serde_json::from_str(r#"{
///     "capabilities": { "raw": false, "store": false, "getStorybook": true },
///     "configuring": false,
///     "stories": null,
///     "oldStories": [{ "kind": "Button", "names": ["Primary"] }]
/// }"#).unwrap();
///
/// assert!(matches!(snapshot.into_read_result(), Some(RegistryReadResult::Legacy(_))));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrySnapshot {
    /// Probed registry methods
    #[serde(default)]
    pub capabilities: RegistryCapabilities,
    /// `store()._configuring` at the time of the snapshot
    #[serde(default)]
    pub configuring: bool,
    /// `raw()` entries, when read
    #[serde(default)]
    pub stories: Option<Vec<RawStory>>,
    /// `getStorybook()` groups, when read
    #[serde(default)]
    pub old_stories: Option<Vec<LegacyKindGroup>>,
}

impl RegistrySnapshot {
    /// Registry version this snapshot was taken from.
    pub fn version(&self) -> Option<RegistryVersion> {
        RegistryVersion::detect(&self.capabilities)
    }

    /// True while a v6 registry is still configuring and no list was read.
    pub fn is_configuring(&self) -> bool {
        self.version().is_some_and(RegistryVersion::may_be_configuring)
            && self.configuring
            && self.stories.is_none()
    }

    /// Convert into a read result for the detected version.
    ///
    /// Returns `None` when no version was detected or the detected version's
    /// data was not read.
    pub fn into_read_result(self) -> Option<RegistryReadResult> {
        match self.version()? {
            RegistryVersion::LegacyV4 => self.old_stories.map(RegistryReadResult::Legacy),
            RegistryVersion::RawV5 | RegistryVersion::ConfiguringV6 => self.stories.map(|raw| {
                RegistryReadResult::Canonical(raw.into_iter().map(StoryRecord::from).collect())
            }),
        }
    }
}

/// A successful registry read: exactly one of the two shapes.
///
/// An empty registry is `Canonical(vec![])`, never a missing variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::From)]
#[serde(tag = "shape", content = "stories", rename_all = "camelCase")]
pub enum RegistryReadResult {
    /// Flat list read from `raw()`
    Canonical(Vec<StoryRecord>),
    /// Kind groups read from `getStorybook()`
    Legacy(Vec<LegacyKindGroup>),
}

impl RegistryReadResult {
    /// Normalize into the canonical flat list.
    ///
    /// Canonical lists pass through unchanged; legacy groups are flattened.
    pub fn into_stories(self) -> Vec<StoryRecord> {
        match self {
            Self::Canonical(stories) => stories,
            Self::Legacy(groups) => flatten_stories(groups),
        }
    }
}
