//! DevTools protocol error types.

/// DevTools protocol failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum CdpErrorKind {
    /// Target discovery over the DevTools HTTP endpoint failed
    #[display("Target discovery failed: {}", _0)]
    Discovery(String),
    /// WebSocket connection failed
    #[display("WebSocket connection failed: {}", _0)]
    WebSocketConnection(String),
    /// A command frame could not be written
    #[display("Failed to send command: {}", _0)]
    Send(String),
    /// The browser answered a command with an error
    #[display("Protocol error {}: {}", code, message)]
    Protocol {
        /// Protocol error code
        code: i64,
        /// Protocol error message
        message: String,
    },
    /// A frame from the browser could not be decoded
    #[display("Invalid protocol message: {}", _0)]
    InvalidMessage(String),
    /// The WebSocket closed while a command was pending
    #[display("DevTools connection closed")]
    ConnectionClosed,
    /// An evaluated expression threw in the page
    #[display("Evaluation failed: {}", _0)]
    Evaluation(String),
}

/// DevTools protocol error with source location tracking.
///
/// # Examples
///
/// ```
/// use storycrawler_error::{CdpError, CdpErrorKind};
///
/// let err = CdpError::new(CdpErrorKind::ConnectionClosed);
/// assert!(format!("{}", err).contains("closed"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("CDP Error: {} at line {} in {}", kind, line, file)]
pub struct CdpError {
    /// The kind of error that occurred
    pub kind: CdpErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl CdpError {
    /// Create a new CdpError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CdpErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
