//! Page registry error types.

/// Registry access failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum RegistryErrorKind {
    /// The page-global registry was not defined before the configured bound
    #[display("Storybook registry did not appear within {}ms", timeout_ms)]
    NeverAppeared {
        /// Bound that elapsed
        timeout_ms: u64,
    },
    /// The in-page snapshot could not be decoded
    #[display("Malformed registry snapshot: {}", _0)]
    Malformed(String),
}

/// Registry error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Registry Error: {} at line {} in {}", kind, line, file)]
pub struct RegistryError {
    /// The kind of error that occurred
    pub kind: RegistryErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl RegistryError {
    /// Create a new RegistryError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RegistryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
