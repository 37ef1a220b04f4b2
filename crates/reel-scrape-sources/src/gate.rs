use crate::fetch::PageFetcher;
use reel_scrape_config::{ConfigError, CrawlPolicy};
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, info};

/// Every fetch goes through here. The caller is suspended for at least the
/// policy's delay before the transport is touched.
pub struct CrawlGate {
    fetcher: Arc<dyn PageFetcher>,
    policy: CrawlPolicy,
}

impl CrawlGate {
    pub fn new(fetcher: Arc<dyn PageFetcher>, policy: CrawlPolicy) -> Self {
        Self { fetcher, policy }
    }

    pub fn policy(&self) -> &CrawlPolicy {
        &self.policy
    }

    pub fn set_crawl_rate(&mut self, rate: f64) -> Result<(), ConfigError> {
        self.policy.set_crawl_rate(rate)
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.policy.set_verbose(verbose);
    }

    pub async fn fetch(&self, url: &str) -> Option<String> {
        let delay = self.policy.delay();
        sleep(delay).await;

        if self.policy.is_verbose() {
            info!(url = %url, delay_secs = delay.as_secs_f64(), "Fetching page");
        } else {
            debug!(url = %url, delay_secs = delay.as_secs_f64(), "Fetching page");
        }

        let page = self.fetcher.fetch(url).await;
        if page.is_none() {
            debug!(url = %url, "Fetch returned no content");
        }
        page
    }
}
