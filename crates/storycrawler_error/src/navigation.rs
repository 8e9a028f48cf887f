//! Page navigation error types.

/// Navigation failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum NavigationErrorKind {
    /// The wait condition was not reached within the navigation timeout
    #[display("Navigation to {} timed out after {}ms", url, timeout_ms)]
    Timeout {
        /// Target URL
        url: String,
        /// Timeout that elapsed
        timeout_ms: u64,
    },
    /// The browser refused or aborted the navigation
    #[display("Navigation to {} failed: {}", url, reason)]
    Failed {
        /// Target URL
        url: String,
        /// Reason reported by the browser
        reason: String,
    },
}

/// Navigation error with source location tracking.
///
/// # Examples
///
/// ```
/// use storycrawler_error::{NavigationError, NavigationErrorKind};
///
/// let err = NavigationError::new(NavigationErrorKind::Timeout {
///     url: "http://localhost:6006".to_string(),
///     timeout_ms: 60_000,
/// });
/// assert!(format!("{}", err).contains("timed out"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Navigation Error: {} at line {} in {}", kind, line, file)]
pub struct NavigationError {
    /// The kind of error that occurred
    pub kind: NavigationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl NavigationError {
    /// Create a new NavigationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: NavigationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Returns true if the navigation exceeded its timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, NavigationErrorKind::Timeout { .. })
    }
}
