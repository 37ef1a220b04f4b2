use reel_scrape_config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("year must be between {min} and {max}, got {year}")]
    InvalidYear { year: i32, min: i32, max: i32 },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
