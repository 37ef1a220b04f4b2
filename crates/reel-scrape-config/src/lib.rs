pub mod config;
pub mod crawl;
pub mod error;
pub mod paths;

pub use config::{Config, CrawlConfig, LoggingConfig, SiteConfig, DEFAULT_ALMANAC_BASE_URL, DEFAULT_REVIEW_BASE_URL};
pub use crawl::{is_valid_crawl_rate, CrawlPolicy, DEFAULT_CRAWL_RATE};
pub use error::ConfigError;
pub use paths::PathManager;
