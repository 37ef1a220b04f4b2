use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("crawl rate must be a positive number of seconds, got {0}")]
    InvalidCrawlRate(f64),

    #[error("{field} must be a non-empty URL ending in '/', got {value:?}")]
    InvalidBaseUrl { field: &'static str, value: String },
}
