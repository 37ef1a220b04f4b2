use crate::crawl::{is_valid_crawl_rate, CrawlPolicy, DEFAULT_CRAWL_RATE};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_REVIEW_BASE_URL: &str = "https://www.rottentomatoes.com/";
pub const DEFAULT_ALMANAC_BASE_URL: &str = "https://en.wikipedia.org/wiki/";

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub sites: SiteConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CrawlConfig {
    /// Seconds to wait before every fetch
    #[serde(default = "default_crawl_rate")]
    pub crawl_rate: f64,
    #[serde(default)]
    pub verbose: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SiteConfig {
    #[serde(default = "default_review_base_url")]
    pub review_base_url: String,
    #[serde(default = "default_almanac_base_url")]
    pub almanac_base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_json_logging")]
    pub json: bool,
    pub file: Option<PathBuf>,
}

fn default_crawl_rate() -> f64 {
    DEFAULT_CRAWL_RATE
}

fn default_review_base_url() -> String {
    DEFAULT_REVIEW_BASE_URL.to_string()
}

fn default_almanac_base_url() -> String {
    DEFAULT_ALMANAC_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_json_logging() -> bool {
    use std::io::IsTerminal;
    !std::io::stdout().is_terminal()
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            crawl_rate: default_crawl_rate(),
            verbose: false,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            review_base_url: default_review_base_url(),
            almanac_base_url: default_almanac_base_url(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: default_json_logging(),
            file: None,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_crawl_rate(self.crawl.crawl_rate) {
            return Err(ConfigError::InvalidCrawlRate(self.crawl.crawl_rate));
        }

        for (field, value) in [
            ("sites.review_base_url", &self.sites.review_base_url),
            ("sites.almanac_base_url", &self.sites.almanac_base_url),
        ] {
            if value.is_empty() || !value.ends_with('/') {
                return Err(ConfigError::InvalidBaseUrl {
                    field,
                    value: value.clone(),
                });
            }
        }

        Ok(())
    }

    pub fn crawl_policy(&self) -> Result<CrawlPolicy, ConfigError> {
        CrawlPolicy::new(self.crawl.crawl_rate, self.crawl.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.crawl.crawl_rate, 1.0);
        assert!(!config.crawl.verbose);
        assert_eq!(config.sites.review_base_url, DEFAULT_REVIEW_BASE_URL);
        assert_eq!(config.sites.almanac_base_url, DEFAULT_ALMANAC_BASE_URL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[crawl]").unwrap();
        writeln!(file, "crawl_rate = 2.5").unwrap();

        let config = Config::load_from_file(&file.path().to_path_buf()).unwrap();
        assert_eq!(config.crawl.crawl_rate, 2.5);
        assert!(!config.crawl.verbose);
        assert_eq!(config.sites.review_base_url, DEFAULT_REVIEW_BASE_URL);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_rejects_non_positive_rate() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[crawl]").unwrap();
        writeln!(file, "crawl_rate = 0.0").unwrap();

        let result = Config::load_from_file(&file.path().to_path_buf());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("crawl rate"));
    }

    #[test]
    fn test_validate_rejects_rate_beyond_duration_range() {
        let mut config = Config::default();
        config.crawl.crawl_rate = 1e20;
        assert_eq!(config.validate(), Err(ConfigError::InvalidCrawlRate(1e20)));
        assert!(config.crawl_policy().is_err());
    }

    #[test]
    fn test_validate_base_url() {
        let mut config = Config::default();
        config.sites.review_base_url = "https://example.com".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBaseUrl { field: "sites.review_base_url", .. })
        ));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.crawl.crawl_rate = 4.0;
        config.crawl.verbose = true;
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.crawl.crawl_rate, 4.0);
        assert!(loaded.crawl.verbose);

        let policy = loaded.crawl_policy().unwrap();
        assert_eq!(policy.crawl_rate(), 4.0);
        assert!(policy.is_verbose());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.crawl.crawl_rate, 1.0);
    }
}
