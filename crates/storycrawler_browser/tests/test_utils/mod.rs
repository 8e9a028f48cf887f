//! Scripted `BrowserPage` for driving the enumerator without a browser.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;
use storycrawler_browser::snapshot_expression;
use storycrawler_core::{LegacyKindGroup, RawStory, RegistryCapabilities, RegistrySnapshot};
use storycrawler_error::{CrawlerResult, NavigationError, NavigationErrorKind};
use storycrawler_interface::{BrowserPage, NavigateOptions};

/// What the page-global registry looks like.
#[derive(Debug, Clone)]
pub enum MockRegistry {
    /// Defined, but with none of the known methods
    Empty,
    /// Only `getStorybook()`
    Legacy(Vec<LegacyKindGroup>),
    /// Only `raw()`
    Raw(Vec<RawStory>),
    /// `raw()` and `store()`; configuring for the first `polls` snapshots
    /// (forever if `None`). A forced read while configuring returns `before`.
    Configuring {
        polls: Option<u32>,
        before: Vec<RawStory>,
        after: Vec<RawStory>,
    },
}

/// Mock page answering snapshot evaluations from a [`MockRegistry`].
pub struct MockPage {
    registry: MockRegistry,
    registry_appears: bool,
    failing_url: Option<(String, NavigationErrorKind)>,
    navigations: Mutex<Vec<(String, NavigateOptions)>>,
    snapshots: Mutex<Vec<bool>>,
    predicates: Mutex<Vec<String>>,
}

impl MockPage {
    pub fn new(registry: MockRegistry) -> Self {
        Self {
            registry,
            registry_appears: true,
            failing_url: None,
            navigations: Mutex::new(Vec::new()),
            snapshots: Mutex::new(Vec::new()),
            predicates: Mutex::new(Vec::new()),
        }
    }

    /// The registry global is never defined; `wait_for_function` never resolves.
    pub fn never_defined(mut self) -> Self {
        self.registry_appears = false;
        self
    }

    /// Navigation to a URL containing `fragment` fails with `kind`.
    pub fn failing_navigation(mut self, fragment: &str, kind: NavigationErrorKind) -> Self {
        self.failing_url = Some((fragment.to_string(), kind));
        self
    }

    /// Navigations performed, in order.
    pub fn navigations(&self) -> Vec<(String, NavigateOptions)> {
        self.navigations.lock().unwrap().clone()
    }

    /// Number of registry snapshots evaluated.
    pub fn snapshot_count(&self) -> usize {
        self.snapshots.lock().unwrap().len()
    }

    /// Force flag of each snapshot, in order.
    pub fn snapshot_forces(&self) -> Vec<bool> {
        self.snapshots.lock().unwrap().clone()
    }

    /// Predicates passed to `wait_for_function`.
    pub fn predicates(&self) -> Vec<String> {
        self.predicates.lock().unwrap().clone()
    }

    fn snapshot(&self, index: usize, force: bool) -> RegistrySnapshot {
        match &self.registry {
            MockRegistry::Empty => RegistrySnapshot::default(),
            MockRegistry::Legacy(groups) => RegistrySnapshot {
                capabilities: RegistryCapabilities {
                    get_storybook: true,
                    ..Default::default()
                },
                old_stories: Some(groups.clone()),
                ..Default::default()
            },
            MockRegistry::Raw(stories) => RegistrySnapshot {
                capabilities: RegistryCapabilities {
                    raw: true,
                    ..Default::default()
                },
                stories: Some(stories.clone()),
                ..Default::default()
            },
            MockRegistry::Configuring {
                polls,
                before,
                after,
            } => {
                let configuring = polls.is_none_or(|polls| (index as u32) < polls);
                let stories = match (configuring, force) {
                    (false, _) => Some(after.clone()),
                    (true, true) => Some(before.clone()),
                    (true, false) => None,
                };
                RegistrySnapshot {
                    capabilities: RegistryCapabilities {
                        raw: true,
                        store: true,
                        get_storybook: false,
                    },
                    configuring,
                    stories,
                    old_stories: None,
                }
            }
        }
    }
}

#[async_trait]
impl BrowserPage for MockPage {
    async fn navigate(&self, url: &str, options: &NavigateOptions) -> CrawlerResult<()> {
        self.navigations
            .lock()
            .unwrap()
            .push((url.to_string(), *options));

        if let Some((fragment, kind)) = &self.failing_url
            && url.contains(fragment.as_str())
        {
            return Err(NavigationError::new(kind.clone()).into());
        }
        Ok(())
    }

    async fn wait_for_function(&self, predicate: &str) -> CrawlerResult<()> {
        self.predicates.lock().unwrap().push(predicate.to_string());
        if !self.registry_appears {
            std::future::pending::<()>().await;
        }
        Ok(())
    }

    async fn evaluate(&self, expression: &str) -> CrawlerResult<Value> {
        let force = if expression == snapshot_expression(true) {
            true
        } else if expression == snapshot_expression(false) {
            false
        } else {
            panic!("Unexpected expression evaluated: {}", expression);
        };

        let index = {
            let mut snapshots = self.snapshots.lock().unwrap();
            snapshots.push(force);
            snapshots.len() - 1
        };

        Ok(serde_json::to_value(self.snapshot(index, force)).unwrap())
    }
}

pub fn raw(id: &str, kind: &str, name: &str) -> RawStory {
    RawStory {
        id: id.to_string(),
        kind: kind.to_string(),
        name: name.to_string(),
    }
}

/// Loopback HTTP server answering every request with a fixed status line.
pub struct FixedStatusServer {
    pub url: String,
    requests: std::sync::Arc<std::sync::atomic::AtomicUsize>,
    _server: tokio::task::JoinHandle<()>,
}

impl FixedStatusServer {
    pub async fn spawn(status: u16, reason: &'static str) -> Self {
        use std::sync::atomic::Ordering;
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind HTTP listener");
        let addr = listener.local_addr().expect("Listener has no address");
        let requests = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = requests.clone();

        let server = tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                counter.fetch_add(1, Ordering::SeqCst);

                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                    status, reason
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        Self {
            url: format!("http://{}/", addr),
            requests,
            _server: server,
        }
    }

    /// Requests answered so far.
    pub fn requests(&self) -> usize {
        self.requests.load(std::sync::atomic::Ordering::SeqCst)
    }
}

/// A loopback URL nothing listens on.
pub async fn closed_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Listener has no address");
    drop(listener);
    format!("http://{}", addr)
}
