use crate::gate::CrawlGate;
use tracing::{debug, warn};

/// Find the crawl delay the wildcard agent section asks for.
///
/// Returns `None` when the file has no `User-agent: *` section at all,
/// `Some(0.0)` when the section exists without a `Crawl-delay` directive.
pub fn parse_crawl_delay(content: &str) -> Option<f64> {
    let mut in_wildcard = false;
    let mut wildcard_found = false;
    let mut last_was_agent = false;
    let mut delay = None;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((directive, value)) = line.split_once(':') else {
            last_was_agent = false;
            continue;
        };
        let directive = directive.trim().to_lowercase();
        let value = value.trim();

        match directive.as_str() {
            "user-agent" => {
                // Consecutive agent lines share one group
                let is_wildcard = value == "*";
                in_wildcard = is_wildcard || (in_wildcard && last_was_agent);
                wildcard_found |= is_wildcard;
                last_was_agent = true;
                continue;
            }
            "crawl-delay" if in_wildcard => {
                if let Ok(seconds) = value.parse::<f64>() {
                    delay = Some(seconds);
                }
            }
            _ => {}
        }
        last_was_agent = false;
    }

    if wildcard_found {
        Some(delay.unwrap_or(0.0))
    } else {
        None
    }
}

/// Fetch `<base>robots.txt` and report the minimum crawl delay it requests.
pub async fn check_min_delay(gate: &CrawlGate, base_url: &str) -> Option<f64> {
    let url = format!("{}robots.txt", base_url);
    let content = gate.fetch(&url).await?;

    let delay = parse_crawl_delay(&content);
    match delay {
        Some(d) if d == 0.0 => warn!(url = %url, "crawl-delay not listed for \"User-agent: *\", returning 0"),
        Some(d) => debug!(url = %url, crawl_delay = d, "Found crawl-delay"),
        None => debug!(url = %url, "No \"User-agent: *\" section"),
    }
    delay
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{HttpFetcher, MemoryFetcher};
    use reel_scrape_config::CrawlPolicy;
    use std::sync::Arc;

    const BASE_URL: &str = "https://www.rottentomatoes.com/";

    #[test]
    fn test_wildcard_with_delay() {
        let robots = "User-agent: *\nDisallow: /search\nCrawl-delay: 2.5\n";
        assert_eq!(parse_crawl_delay(robots), Some(2.5));
    }

    #[test]
    fn test_wildcard_without_delay_is_zero() {
        let robots = "User-agent: *\nDisallow: /napi/\nDisallow: /search\n";
        assert_eq!(parse_crawl_delay(robots), Some(0.0));
    }

    #[test]
    fn test_missing_wildcard_section() {
        let robots = "User-agent: Googlebot\nCrawl-delay: 5\n";
        assert_eq!(parse_crawl_delay(robots), None);
        assert_eq!(parse_crawl_delay(""), None);
    }

    #[test]
    fn test_delay_from_other_agent_is_ignored() {
        let robots = "User-agent: *\nDisallow: /tmp\n\nUser-agent: Bingbot\ncrawl-delay: 10\n";
        assert_eq!(parse_crawl_delay(robots), Some(0.0));
    }

    #[test]
    fn test_grouped_agents_share_directives() {
        let robots = "User-agent: *\nUser-agent: Slurp\nCrawl-delay: 3\n";
        assert_eq!(parse_crawl_delay(robots), Some(3.0));

        let robots = "User-agent: Slurp\nUser-agent: *\ncrawl-delay: 4\n";
        assert_eq!(parse_crawl_delay(robots), Some(4.0));
    }

    #[test]
    fn test_comments_and_garbage_values() {
        let robots = "# robots\nUser-agent: *\nCrawl-delay: soon\n";
        assert_eq!(parse_crawl_delay(robots), Some(0.0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_check_min_delay_reads_wildcard_section() {
        let fetcher = Arc::new(
            MemoryFetcher::new().with_page("https://www.rottentomatoes.com/robots.txt", "User-agent: *\nCrawl-delay: 2\n"),
        );
        let gate = CrawlGate::new(fetcher.clone(), CrawlPolicy::new(1.0, false).unwrap());

        assert_eq!(check_min_delay(&gate, BASE_URL).await, Some(2.0));
        assert_eq!(fetcher.requests(), vec!["https://www.rottentomatoes.com/robots.txt".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_check_min_delay_missing_file() {
        let fetcher = Arc::new(MemoryFetcher::new());
        let gate = CrawlGate::new(fetcher.clone(), CrawlPolicy::new(1.0, false).unwrap());

        assert_eq!(check_min_delay(&gate, BASE_URL).await, None);
        assert_eq!(fetcher.requests(), vec!["https://www.rottentomatoes.com/robots.txt".to_string()]);
    }

    #[tokio::test]
    async fn test_check_min_delay_over_http() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/robots.txt")
            .with_status(200)
            .with_body("User-agent: *\nDisallow: /search\nCrawl-delay: 0.5\n")
            .create_async()
            .await;

        let fetcher = Arc::new(HttpFetcher::new("reel-scrape-agent/1.0").unwrap());
        let gate = CrawlGate::new(fetcher, CrawlPolicy::new(0.01, false).unwrap());
        let base = format!("{}/", server.url());

        assert_eq!(check_min_delay(&gate, &base).await, Some(0.5));
        mock.assert_async().await;
    }
}
