//! Top-level error wrapper types.

use crate::{
    CdpError, ConfigError, ConnectionError, JsonError, NavigationError, NoStoriesError,
    RegistryError,
};

/// Every error condition the workspace can surface.
///
/// # Examples
///
/// ```
/// use storycrawler_error::{CrawlerError, NoStoriesError};
///
/// let err: CrawlerError = NoStoriesError::new().into();
/// assert!(format!("{}", err).contains("No stories"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum CrawlerErrorKind {
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Registry reported no stories
    #[from(NoStoriesError)]
    NoStories(NoStoriesError),
    /// Page navigation error
    #[from(NavigationError)]
    Navigation(NavigationError),
    /// Page registry error
    #[from(RegistryError)]
    Registry(RegistryError),
    /// DevTools protocol error
    #[from(CdpError)]
    Cdp(CdpError),
    /// Storybook connection error
    #[from(ConnectionError)]
    Connection(ConnectionError),
}

/// Storycrawler error with kind discrimination.
///
/// # Examples
///
/// ```
/// use storycrawler_error::{ConfigError, CrawlerErrorKind, CrawlerResult};
///
/// fn might_fail() -> CrawlerResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), CrawlerErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Storycrawler Error: {}", _0)]
pub struct CrawlerError(Box<CrawlerErrorKind>);

impl CrawlerError {
    /// Create a new error from a kind.
    pub fn new(kind: CrawlerErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CrawlerErrorKind {
        &self.0
    }

    /// Returns true if this is the no-stories condition.
    pub fn is_no_stories(&self) -> bool {
        matches!(self.kind(), CrawlerErrorKind::NoStories(_))
    }
}

// Generic From implementation for any type that converts to CrawlerErrorKind
impl<T> From<T> for CrawlerError
where
    T: Into<CrawlerErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for storycrawler operations.
pub type CrawlerResult<T> = std::result::Result<T, CrawlerError>;
