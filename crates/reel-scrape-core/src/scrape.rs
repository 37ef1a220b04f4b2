use reel_scrape_config::{ConfigError, CrawlPolicy};
use reel_scrape_models::{MovieMetadata, ReviewCollection};
use reel_scrape_sources::rottentomatoes::{get_critic_reviews, get_main_page_info, resolve_movie_url};
use reel_scrape_sources::CrawlGate;
use serde::{Serialize, Serializer};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{info, instrument, warn};

/// Which phases of a movie scrape to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub main_info: bool,
    pub critic_reviews: bool,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            main_info: true,
            critic_reviews: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieScrape {
    pub name: String,
    pub url: String,
    pub metadata: Option<MovieMetadata>,
    pub reviews: Option<ReviewCollection>,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl MovieScrape {
    pub fn into_parts(self) -> (Option<MovieMetadata>, Option<ReviewCollection>) {
        (self.metadata, self.reviews)
    }
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

/// Resolves a movie name against the review site and collects its page
/// metadata and critic reviews.
///
/// The scraper owns its crawl gate, so changing the policy needs `&mut self`
/// and can never race an in-flight scrape.
pub struct MovieScraper {
    gate: CrawlGate,
    base_url: String,
    options: ScrapeOptions,
}

impl MovieScraper {
    pub fn new(gate: CrawlGate, base_url: impl Into<String>) -> Self {
        Self {
            gate,
            base_url: base_url.into(),
            options: ScrapeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ScrapeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> ScrapeOptions {
        self.options
    }

    pub fn gate(&self) -> &CrawlGate {
        &self.gate
    }

    pub fn policy(&self) -> &CrawlPolicy {
        self.gate.policy()
    }

    /// Rejects a non-positive rate and keeps the current one.
    pub fn set_crawl_rate(&mut self, rate: f64) -> Result<(), ConfigError> {
        self.gate.set_crawl_rate(rate)
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.gate.set_verbose(verbose);
    }

    /// Scrape everything known about `name`.
    ///
    /// `None` means no URL convention led to a live movie page. Otherwise
    /// each phase reports its own result: `metadata` is `None` when the main
    /// page could not be fetched, `reviews` is `None` when the review
    /// listing has no page count. Skipped phases are `None` and fetch
    /// nothing.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn scrape_movie_info(&self, name: &str) -> Option<MovieScrape> {
        let start = Instant::now();

        let Some(url) = resolve_movie_url(&self.gate, &self.base_url, name).await else {
            warn!(name = %name, "Movie is unreachable");
            return None;
        };

        let metadata = if self.options.main_info {
            get_main_page_info(&self.gate, &url).await
        } else {
            None
        };

        let reviews = if self.options.critic_reviews {
            get_critic_reviews(&self.gate, &url).await
        } else {
            None
        };

        let duration = start.elapsed();
        info!(
            name = %name,
            url = %url,
            fields = metadata.as_ref().map(|m| m.populated_fields()).unwrap_or(0),
            reviews = reviews.as_ref().map(|r| r.len()).unwrap_or(0),
            duration_ms = duration.as_millis(),
            "Scrape complete"
        );

        Some(MovieScrape {
            name: name.to_string(),
            url,
            metadata,
            reviews,
            duration,
        })
    }
}
