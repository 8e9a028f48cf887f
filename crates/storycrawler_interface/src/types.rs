//! Option types for page operations.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use storycrawler_core::NAVIGATION_TIMEOUT;

/// Page lifecycle event that completes a navigation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum WaitUntil {
    /// The `load` event: document and all subresources finished
    #[default]
    Load,
    /// The `DOMContentLoaded` event: document parsed, scripts may still run
    DomContentLoaded,
}

/// How a navigation is bounded and when it counts as complete.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use storycrawler_interface::{NavigateOptionsBuilder, WaitUntil};
///
/// let options = NavigateOptionsBuilder::default()
///     .timeout(Duration::from_secs(60))
///     .wait_until(WaitUntil::DomContentLoaded)
///     .build()
///     .unwrap();
///
/// assert_eq!(*options.wait_until(), WaitUntil::DomContentLoaded);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder, Getters)]
pub struct NavigateOptions {
    /// Maximum time until the wait condition fires
    #[builder(default = "NAVIGATION_TIMEOUT")]
    timeout: Duration,
    /// Lifecycle event that completes the navigation
    #[builder(default)]
    wait_until: WaitUntil,
}

impl NavigateOptions {
    /// Navigation bounded by `timeout`, completing on `wait_until`.
    pub fn new(timeout: Duration, wait_until: WaitUntil) -> Self {
        Self {
            timeout,
            wait_until,
        }
    }
}

impl Default for NavigateOptions {
    fn default() -> Self {
        Self::new(NAVIGATION_TIMEOUT, WaitUntil::Load)
    }
}
