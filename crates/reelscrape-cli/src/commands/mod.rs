pub mod config;
pub mod movie;
pub mod names;
pub mod progress;
pub mod robots;

use color_eyre::Result;
use reel_scrape_config::{Config, CrawlPolicy};
use reel_scrape_sources::{CrawlGate, HttpFetcher};
use std::path::PathBuf;
use std::sync::Arc;

/// Everything a command needs from the command line and config file.
pub struct Context {
    pub config: Config,
    pub config_path: PathBuf,
    crawl_rate: Option<f64>,
    verbose: bool,
}

impl Context {
    pub fn new(config: Config, config_path: PathBuf, crawl_rate: Option<f64>, verbose: bool) -> Self {
        Self {
            config,
            config_path,
            crawl_rate,
            verbose,
        }
    }

    /// Configured policy with command-line overrides applied.
    /// A non-positive `--crawl-rate` is rejected here, before any fetch.
    pub fn crawl_policy(&self) -> Result<CrawlPolicy> {
        let mut policy = self.config.crawl_policy()?;
        if let Some(rate) = self.crawl_rate {
            policy.set_crawl_rate(rate)?;
        }
        if self.verbose {
            policy.set_verbose(true);
        }
        Ok(policy)
    }

    pub fn gate(&self) -> Result<CrawlGate> {
        let policy = self.crawl_policy()?;
        let fetcher = Arc::new(HttpFetcher::new(&self.config.sites.user_agent)?);
        Ok(CrawlGate::new(fetcher, policy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crawl_rate_override() {
        let ctx = Context::new(Config::default(), PathBuf::from("config.toml"), Some(2.5), false);
        let policy = ctx.crawl_policy().unwrap();
        assert_eq!(policy.crawl_rate(), 2.5);
        assert!(!policy.is_verbose());
    }

    #[test]
    fn test_invalid_crawl_rate_fails_fast() {
        let ctx = Context::new(Config::default(), PathBuf::from("config.toml"), Some(0.0), true);
        assert!(ctx.crawl_policy().is_err());

        let ctx = Context::new(Config::default(), PathBuf::from("config.toml"), Some(1e20), false);
        assert!(ctx.crawl_policy().is_err());
        assert!(ctx.gate().is_err());
    }

    #[test]
    fn test_verbose_flag_overrides_config() {
        let mut config = Config::default();
        config.crawl.verbose = false;
        let ctx = Context::new(config, PathBuf::from("config.toml"), None, true);
        assert!(ctx.crawl_policy().unwrap().is_verbose());
    }
}
