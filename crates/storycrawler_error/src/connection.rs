//! Storybook connection error types.

/// Connection failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ConnectionErrorKind {
    /// The base URL could not be parsed
    #[display("Invalid Storybook URL {}: {}", url, reason)]
    InvalidUrl {
        /// URL as given
        url: String,
        /// Parser message
        reason: String,
    },
    /// The server could not be reached after all retries
    #[display("Storybook server at {} is unreachable: {}", url, reason)]
    Unreachable {
        /// Base URL
        url: String,
        /// Last transport error
        reason: String,
    },
    /// The server answered with a non-success status
    #[display("Storybook server at {} answered HTTP {}", url, status_code)]
    Status {
        /// Base URL
        url: String,
        /// HTTP status code
        status_code: u16,
    },
}

/// Connection error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Connection Error: {} at line {} in {}", kind, line, file)]
pub struct ConnectionError {
    /// The kind of error that occurred
    pub kind: ConnectionErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ConnectionError {
    /// Create a new ConnectionError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ConnectionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
