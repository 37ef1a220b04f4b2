use crate::error::SourceError;
use async_trait::async_trait;
use reqwest::{redirect, Client};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, warn};

const MAX_REDIRECTS: usize = 10;

/// Raw page transport. `None` means the page could not be fetched at all;
/// implementations never raise past this boundary.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Option<String>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) if e.is_redirect() => {
                warn!(url = %url, error = %e, "Too many redirects, treating page as empty");
                return None;
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Request failed, treating page as empty");
                return None;
            }
        };

        // Error statuses keep their body: the site's not-found page is inspected by the resolver
        let status = response.status();
        if !status.is_success() {
            debug!(url = %url, status = %status, "Non-success status");
        }

        match response.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to read response body");
                None
            }
        }
    }
}

/// Serves pages from memory and records every requested URL in order.
/// Unknown URLs behave like a transport failure.
#[derive(Default)]
pub struct MemoryFetcher {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.insert(url, body);
        self
    }

    pub fn insert(&mut self, url: impl Into<String>, body: impl Into<String>) {
        self.pages.insert(url.into(), body.into());
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

#[async_trait]
impl PageFetcher for MemoryFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        match self.requests.lock() {
            Ok(mut requests) => requests.push(url.to_string()),
            Err(poisoned) => poisoned.into_inner().push(url.to_string()),
        }
        self.pages.get(url).cloned()
    }
}
