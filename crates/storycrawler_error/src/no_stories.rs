//! Error raised when a registry read produced no story data at all.

/// Neither the canonical nor the legacy registry shape could be read.
///
/// An empty story list is not this error; it is only raised when the page
/// registry exposed none of the expected capabilities.
///
/// # Examples
///
/// ```
/// use storycrawler_error::NoStoriesError;
///
/// let err = NoStoriesError::new();
/// assert!(format!("{}", err).contains("No stories"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("No stories were found in the Storybook registry at line {} in {}", line, file)]
pub struct NoStoriesError {
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl NoStoriesError {
    /// Create a new NoStoriesError at the current location.
    #[track_caller]
    pub fn new() -> Self {
        let location = std::panic::Location::caller();
        Self {
            line: location.line(),
            file: location.file(),
        }
    }
}

impl Default for NoStoriesError {
    #[track_caller]
    fn default() -> Self {
        Self::new()
    }
}
