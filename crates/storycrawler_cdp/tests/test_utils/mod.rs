//! Loopback DevTools server for exercising `CdpPage` without a browser.

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_tungstenite::{accept_async, tungstenite::Message};

/// A single-connection fake of a DevTools page target.
///
/// Navigation URLs containing `refused` fail with an `errorText`, URLs
/// containing `hang` never fire lifecycle events, `Test.hang` is never
/// answered, and `Test.disconnect` drops the socket without answering.
pub struct FakeDevTools {
    pub ws_url: String,
    received: Arc<Mutex<Vec<Value>>>,
    _server: JoinHandle<()>,
}

impl FakeDevTools {
    pub async fn spawn() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake DevTools listener");
        let addr = listener.local_addr().expect("Listener has no address");
        let received = Arc::new(Mutex::new(Vec::new()));
        let log = received.clone();

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.expect("Failed to accept");
            let mut socket = accept_async(stream).await.expect("WebSocket handshake failed");

            while let Some(Ok(Message::Text(text))) = socket.next().await {
                let request: Value = serde_json::from_str(text.as_str()).expect("Client sent invalid JSON");
                log.lock().unwrap().push(request.clone());

                if request["method"] == "Test.disconnect" {
                    return;
                }

                for frame in respond(&request) {
                    if socket.send(Message::Text(frame.to_string().into())).await.is_err() {
                        return;
                    }
                }
            }
        });

        Self {
            ws_url: format!("ws://{}/devtools/page/FAKE", addr),
            received,
            _server: server,
        }
    }

    /// Methods received so far, in order.
    pub fn methods(&self) -> Vec<String> {
        self.received
            .lock()
            .unwrap()
            .iter()
            .filter_map(|r| r["method"].as_str().map(str::to_string))
            .collect()
    }

    /// Params of the last request for `method`.
    pub fn last_params(&self, method: &str) -> Option<Value> {
        self.received
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|r| r["method"] == method)
            .map(|r| r["params"].clone())
    }
}

fn respond(request: &Value) -> Vec<Value> {
    let id = request["id"].clone();
    let params = &request["params"];

    match request["method"].as_str().unwrap_or_default() {
        "Page.enable" => vec![json!({ "id": id, "result": {} })],
        "Test.hang" => vec![],
        "Page.navigate" => {
            let url = params["url"].as_str().unwrap_or_default();
            if url.contains("refused") {
                vec![json!({
                    "id": id,
                    "result": { "frameId": "F", "errorText": "net::ERR_CONNECTION_REFUSED" }
                })]
            } else if url.contains("hang") {
                vec![json!({ "id": id, "result": { "frameId": "F", "loaderId": "L" } })]
            } else {
                vec![
                    json!({ "id": id, "result": { "frameId": "F", "loaderId": "L" } }),
                    json!({ "method": "Page.frameStartedLoading", "params": { "frameId": "F" } }),
                    json!({ "method": "Page.domContentEventFired", "params": { "timestamp": 1.0 } }),
                    json!({ "method": "Page.loadEventFired", "params": { "timestamp": 2.0 } }),
                ]
            }
        }
        "Runtime.evaluate" => {
            let expression = params["expression"].as_str().unwrap_or_default();
            if expression.contains("throw") {
                vec![json!({
                    "id": id,
                    "result": {
                        "result": { "type": "object", "subtype": "error" },
                        "exceptionDetails": {
                            "text": "Uncaught",
                            "exception": { "type": "object", "description": "Error: boom" }
                        }
                    }
                })]
            } else if expression == "undefined" {
                vec![json!({ "id": id, "result": { "result": { "type": "undefined" } } })]
            } else {
                vec![json!({
                    "id": id,
                    "result": { "result": { "type": "object", "value": { "echo": expression } } }
                })]
            }
        }
        other => vec![json!({
            "id": id,
            "error": { "code": -32601, "message": format!("'{}' wasn't found", other) }
        })],
    }
}
