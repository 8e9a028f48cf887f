//! Legacy kind groups to canonical records.

use crate::{LegacyKindGroup, StoryRecord};

/// Flatten legacy kind groups into canonical story records.
///
/// Output order is group order, then name order within each group. Nothing is
/// sorted, merged or dropped: a kind reported twice yields two runs of records.
///
/// # Examples
///
/// ```
/// use storycrawler_core::{flatten_stories, LegacyKindGroup};
///
/// let stories = flatten_stories(vec![
///     LegacyKindGroup::new("Button", ["Primary", "Secondary"]),
///     LegacyKindGroup::new("Alert", ["Warning"]),
/// ]);
///
/// let names: Vec<_> = stories.iter().map(|s| s.identity()).collect();
/// assert_eq!(
///     names,
///     vec![("Button", "Primary"), ("Button", "Secondary"), ("Alert", "Warning")]
/// );
/// assert!(stories.iter().all(|s| s.id.is_none()));
/// ```
pub fn flatten_stories(groups: Vec<LegacyKindGroup>) -> Vec<StoryRecord> {
    groups
        .into_iter()
        .flat_map(|LegacyKindGroup { kind, names }| {
            names
                .into_iter()
                .map(move |name| StoryRecord::v4(kind.clone(), name))
        })
        .collect()
}
