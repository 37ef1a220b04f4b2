use crate::error::ConfigError;
use std::time::Duration;

/// Seconds to wait before each fetch when nothing else is configured.
pub const DEFAULT_CRAWL_RATE: f64 = 1.0;

/// Minimum delay between fetches plus the verbosity flag.
///
/// Owned by whoever performs fetches and read before every one of them.
/// The rate can only change through [`set_crawl_rate`](Self::set_crawl_rate),
/// which refuses anything that is not a positive number of seconds that
/// fits in a `Duration`.
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlPolicy {
    crawl_rate: f64,
    verbose: bool,
}

impl CrawlPolicy {
    pub fn new(crawl_rate: f64, verbose: bool) -> Result<Self, ConfigError> {
        let mut policy = Self::default();
        policy.set_crawl_rate(crawl_rate)?;
        policy.set_verbose(verbose);
        Ok(policy)
    }

    /// Remember to be a responsible bot. On rejection the previous rate stays in effect.
    pub fn set_crawl_rate(&mut self, rate: f64) -> Result<(), ConfigError> {
        if !is_valid_crawl_rate(rate) {
            return Err(ConfigError::InvalidCrawlRate(rate));
        }
        self.crawl_rate = rate;
        Ok(())
    }

    pub fn crawl_rate(&self) -> f64 {
        self.crawl_rate
    }

    pub fn delay(&self) -> Duration {
        Duration::from_secs_f64(self.crawl_rate)
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Positive and representable as a `Duration`, so `delay()` cannot panic.
pub fn is_valid_crawl_rate(rate: f64) -> bool {
    rate > 0.0 && Duration::try_from_secs_f64(rate).is_ok()
}

impl Default for CrawlPolicy {
    fn default() -> Self {
        Self {
            crawl_rate: DEFAULT_CRAWL_RATE,
            verbose: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = CrawlPolicy::default();
        assert_eq!(policy.crawl_rate(), DEFAULT_CRAWL_RATE);
        assert_eq!(policy.delay(), Duration::from_secs(1));
        assert!(!policy.is_verbose());
    }

    #[test]
    fn test_set_crawl_rate() {
        let mut policy = CrawlPolicy::default();
        policy.set_crawl_rate(10.0).unwrap();
        assert_eq!(policy.crawl_rate(), 10.0);
        policy.set_crawl_rate(0.25).unwrap();
        assert_eq!(policy.delay(), Duration::from_millis(250));
    }

    #[test]
    fn test_rejected_rate_keeps_previous_value() {
        let mut policy = CrawlPolicy::default();
        policy.set_crawl_rate(3.0).unwrap();

        assert_eq!(policy.set_crawl_rate(0.0), Err(ConfigError::InvalidCrawlRate(0.0)));
        assert_eq!(policy.crawl_rate(), 3.0);

        assert_eq!(policy.set_crawl_rate(-2.5), Err(ConfigError::InvalidCrawlRate(-2.5)));
        assert_eq!(policy.crawl_rate(), 3.0);

        assert!(policy.set_crawl_rate(f64::NAN).is_err());
        assert!(policy.set_crawl_rate(f64::INFINITY).is_err());
        assert_eq!(policy.crawl_rate(), 3.0);
    }

    #[test]
    fn test_rate_too_large_for_duration_is_rejected() {
        let mut policy = CrawlPolicy::default();
        assert_eq!(policy.set_crawl_rate(1e20), Err(ConfigError::InvalidCrawlRate(1e20)));
        assert_eq!(policy.crawl_rate(), DEFAULT_CRAWL_RATE);
        assert!(CrawlPolicy::new(f64::MAX, false).is_err());

        // Large but representable rates still work
        let policy = CrawlPolicy::new(1e9, false).unwrap();
        assert_eq!(policy.delay(), Duration::from_secs(1_000_000_000));
    }

    #[test]
    fn test_new_validates() {
        assert!(CrawlPolicy::new(0.0, false).is_err());
        let policy = CrawlPolicy::new(2.0, true).unwrap();
        assert_eq!(policy.crawl_rate(), 2.0);
        assert!(policy.is_verbose());
    }
}
