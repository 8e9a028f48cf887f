//! Core data types for storycrawler.
//!
//! This crate provides the story records, registry shapes and the pure
//! normalization step shared by every other crate in the workspace.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod constants;
mod flatten;
mod registry;
mod story;

pub use constants::{
    CONFIGURE_POLL_INTERVAL, MAX_CONFIGURE_WAIT_COUNT, NAVIGATION_TIMEOUT, PROBE_KIND, PROBE_PATH,
    PROBE_STORY, REGISTRY_GLOBAL,
};
pub use flatten::flatten_stories;
pub use registry::{
    RawStory, RegistryCapabilities, RegistryReadResult, RegistrySnapshot, RegistryVersion,
};
pub use story::{LegacyKindGroup, StoryRecord, StoryRecordBuilder, StoryRecordBuilderError, StoryVersion};
