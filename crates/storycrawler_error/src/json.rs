//! Errors from encoding stories as JSON.

/// Failure to encode the story list for JSON output.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} at line {} in {}", message, line, file)]
pub struct JsonError {
    /// Serializer message
    pub message: String,
    /// Source line that raised the error
    pub line: u32,
    /// Source file that raised the error
    pub file: &'static str,
}

impl JsonError {
    /// Create a new JsonError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use storycrawler_error::{CrawlerError, CrawlerErrorKind, JsonError};
    ///
    /// let err: CrawlerError =
    ///     JsonError::new("Failed to serialize stories: key must be a string").into();
    /// assert!(matches!(err.kind(), CrawlerErrorKind::Json(_)));
    /// assert!(format!("{}", err).contains("Failed to serialize stories"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
