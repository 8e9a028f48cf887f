//! Shared helpers for end-to-end crawl tests.

use std::io::Write;
use tempfile::NamedTempFile;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve `200 OK` to every HTTP request on a loopback port, returning its base URL.
pub async fn spawn_storybook() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind HTTP listener");
    let addr = listener.local_addr().expect("Listener has no address");

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf).await;
            let _ = stream
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
                .await;
            let _ = stream.shutdown().await;
        }
    });

    format!("http://{}", addr)
}

/// A loopback URL nothing listens on.
pub async fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Listener has no address");
    drop(listener);
    format!("http://{}", addr)
}

/// Configuration file pointing at `url` and `endpoint`, without validation retries.
pub fn config_file(url: &str, endpoint: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("Failed to create config file");
    writeln!(
        file,
        "[browser]\nendpoint = \"{}\"\n\n[connection]\nurl = \"{}\"\nvalidation_retries = 0\n",
        endpoint, url
    )
    .expect("Failed to write config file");
    file
}
