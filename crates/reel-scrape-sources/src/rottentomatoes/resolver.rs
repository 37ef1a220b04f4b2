use super::urls::{is_not_found, movie_url, SEPARATORS};
use crate::gate::CrawlGate;
use tracing::{debug, info, warn};

/// Try each separator convention in turn and return the first movie page URL
/// that is not the site's not-found page.
///
/// A candidate whose fetch yields no content at all is skipped like a
/// not-found page. Candidates that format to the same URL are fetched once.
pub async fn resolve_movie_url(gate: &CrawlGate, base_url: &str, name: &str) -> Option<String> {
    let mut tried: Vec<String> = Vec::with_capacity(SEPARATORS.len());

    for sep in SEPARATORS {
        let url = movie_url(base_url, name, sep);
        if tried.contains(&url) {
            continue;
        }

        match gate.fetch(&url).await {
            Some(page) if !is_not_found(&page) => {
                info!(name = %name, url = %url, "Resolved movie page");
                return Some(url);
            }
            Some(_) => debug!(url = %url, "Candidate is a not-found page"),
            None => debug!(url = %url, "Candidate fetch returned no content"),
        }
        tried.push(url);
    }

    warn!(name = %name, candidates = ?tried, "Could not resolve movie page");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MemoryFetcher;
    use reel_scrape_config::CrawlPolicy;
    use std::sync::Arc;

    const BASE: &str = "https://www.rottentomatoes.com/";
    const NOT_FOUND: &str = "<html><h1>404 - Not Found</h1></html>";

    fn gate(fetcher: &Arc<MemoryFetcher>) -> CrawlGate {
        CrawlGate::new(fetcher.clone(), CrawlPolicy::new(0.01, false).unwrap())
    }

    #[tokio::test(start_paused = true)]
    async fn test_underscore_form_wins_first() {
        let fetcher = Arc::new(
            MemoryFetcher::new()
                .with_page("https://www.rottentomatoes.com/m/the_dark_knight/", "<html>movie</html>")
                .with_page("https://www.rottentomatoes.com/m/the-dark-knight/", "<html>movie</html>"),
        );

        let url = resolve_movie_url(&gate(&fetcher), BASE, "The Dark Knight").await;
        assert_eq!(url.as_deref(), Some("https://www.rottentomatoes.com/m/the_dark_knight/"));
        assert_eq!(fetcher.requests().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_falls_back_to_hyphen_form() {
        let fetcher = Arc::new(
            MemoryFetcher::new()
                .with_page("https://www.rottentomatoes.com/m/no_country_for_old_men/", NOT_FOUND)
                .with_page("https://www.rottentomatoes.com/m/no-country-for-old-men/", "<html>movie</html>"),
        );

        let url = resolve_movie_url(&gate(&fetcher), BASE, "No Country for Old Men").await;
        assert_eq!(url.as_deref(), Some("https://www.rottentomatoes.com/m/no-country-for-old-men/"));
        assert_eq!(
            fetcher.requests(),
            vec![
                "https://www.rottentomatoes.com/m/no_country_for_old_men/".to_string(),
                "https://www.rottentomatoes.com/m/no-country-for-old-men/".to_string(),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_unreachable_when_all_candidates_fail() {
        let fetcher = Arc::new(
            MemoryFetcher::new().with_page("https://www.rottentomatoes.com/m/not_a_movie/", NOT_FOUND),
        );

        let url = resolve_movie_url(&gate(&fetcher), BASE, "Not A Movie").await;
        assert_eq!(url, None);
        assert_eq!(fetcher.requests().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_word_name_fetched_once() {
        let fetcher = Arc::new(
            MemoryFetcher::new().with_page("https://www.rottentomatoes.com/m/alien/", NOT_FOUND),
        );

        assert_eq!(resolve_movie_url(&gate(&fetcher), BASE, "Alien").await, None);
        assert_eq!(fetcher.requests(), vec!["https://www.rottentomatoes.com/m/alien/".to_string()]);
    }
}
