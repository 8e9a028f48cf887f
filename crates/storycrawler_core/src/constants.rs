//! Fixed values of the story enumeration protocol.

use std::time::Duration;

/// Name of the page-global object every supported Storybook version exposes.
pub const REGISTRY_GLOBAL: &str = "__STORYBOOK_CLIENT_API__";

/// Kind/story pair that never exists, so the probe page renders nothing.
pub const PROBE_KIND: &str = "story-crawler-kind";

/// See [`PROBE_KIND`].
pub const PROBE_STORY: &str = "story-crawler-story";

/// Path appended to the Storybook base URL to reach the probe page.
pub const PROBE_PATH: &str =
    "/iframe.html?selectedKind=story-crawler-kind&selectedStory=story-crawler-story";

/// Upper bound on navigation to the probe page.
pub const NAVIGATION_TIMEOUT: Duration = Duration::from_millis(60_000);

/// Delay between two reads of the v6 `_configuring` flag.
pub const CONFIGURE_POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Number of re-checks of the `_configuring` flag before reading anyway.
pub const MAX_CONFIGURE_WAIT_COUNT: u32 = 100;
