//! DevTools protocol message types.
//!
//! Only the handful of commands and events story enumeration needs are
//! modelled; everything else passes through as `serde_json::Value`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use storycrawler_error::{CdpError, CdpErrorKind};

/// Command frame sent to the browser.
#[derive(Debug, Clone, Serialize)]
pub struct CdpRequest<'a> {
    /// Correlation id echoed in the response
    pub id: u64,
    /// Domain-qualified method, e.g. `Page.navigate`
    pub method: &'a str,
    /// Method parameters
    pub params: Value,
}

/// Error object of a failed command.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CdpProtocolError {
    /// JSON-RPC style error code
    pub code: i64,
    /// Human-readable message
    pub message: String,
}

/// Any frame received from the browser: a command response or an event.
#[derive(Debug, Clone, Deserialize)]
pub struct CdpIncoming {
    /// Present on command responses
    #[serde(default)]
    pub id: Option<u64>,
    /// Successful command result
    #[serde(default)]
    pub result: Option<Value>,
    /// Failed command error
    #[serde(default)]
    pub error: Option<CdpProtocolError>,
    /// Present on events
    #[serde(default)]
    pub method: Option<String>,
    /// Event parameters
    #[serde(default)]
    pub params: Option<Value>,
}

impl CdpIncoming {
    /// Outcome of the command this frame answers.
    pub fn into_result(self) -> Result<Value, CdpError> {
        match self.error {
            Some(error) => Err(CdpError::new(CdpErrorKind::Protocol {
                code: error.code,
                message: error.message,
            })),
            None => Ok(self.result.unwrap_or(Value::Null)),
        }
    }
}

/// Protocol event broadcast to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub struct CdpEvent {
    /// Domain-qualified event name, e.g. `Page.loadEventFired`
    pub method: String,
    /// Event parameters
    pub params: Value,
}

/// Result of `Page.navigate`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigateResult {
    /// Frame that navigated
    #[serde(default)]
    pub frame_id: Option<String>,
    /// Set when the navigation failed before a document was committed
    #[serde(default)]
    pub error_text: Option<String>,
}

/// Mirror of a `Runtime.RemoteObject`, fetched by value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteObject {
    /// JavaScript type name
    #[serde(rename = "type", default)]
    pub kind: String,
    /// The value, absent for `undefined`
    #[serde(default)]
    pub value: Option<Value>,
    /// String description for non-serializable values
    #[serde(default)]
    pub description: Option<String>,
}

/// Exception thrown during `Runtime.evaluate`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionDetails {
    /// Short message, usually "Uncaught"
    #[serde(default)]
    pub text: String,
    /// The thrown value
    #[serde(default)]
    pub exception: Option<RemoteObject>,
}

impl ExceptionDetails {
    /// Best available description of the exception.
    pub fn describe(&self) -> String {
        self.exception
            .as_ref()
            .and_then(|e| e.description.clone())
            .unwrap_or_else(|| self.text.clone())
    }
}

/// Result of `Runtime.evaluate`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateResult {
    /// The completion value
    #[serde(default)]
    pub result: RemoteObject,
    /// Present if the expression threw or the promise rejected
    #[serde(default)]
    pub exception_details: Option<ExceptionDetails>,
}

/// Target description returned by `/json/new` and `/json/list`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetInfo {
    /// Target id
    pub id: String,
    /// Target type, `page` for tabs
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Current URL
    #[serde(default)]
    pub url: String,
    /// WebSocket endpoint for this target
    pub web_socket_debugger_url: String,
}

/// Browser description returned by `/json/version`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BrowserVersion {
    /// Product and version, e.g. `Chrome/126.0.6478.126`
    #[serde(rename = "Browser")]
    pub browser: String,
    /// DevTools protocol version
    #[serde(rename = "Protocol-Version", default)]
    pub protocol_version: String,
    /// Browser user agent
    #[serde(rename = "User-Agent", default)]
    pub user_agent: String,
}
