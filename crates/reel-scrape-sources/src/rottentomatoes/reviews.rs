use super::urls::{review_index_url, review_page_url};
use crate::gate::CrawlGate;
use once_cell::sync::Lazy;
use reel_scrape_models::{Freshness, ReviewCollection, ReviewRecord};
use regex::Regex;
use tracing::{debug, info, warn};

/// Text that precedes the review table on a review page.
const REVIEW_TABLE_MARKER: &str = "=\"review_table";
/// Text that starts each review row inside the table.
const REVIEW_ROW_MARKER: &str = "row review_table_row";
const TOP_CRITIC_LABEL: &str = "> Top Critic<";

static PAGE_COUNT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Page 1 of (\d+)").expect("page count regex should compile")
});
static REVIEW_TEXT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<div class="the_review">[;a-zA-Z\s,.'/?\[\]":-]*</div>"#)
        .expect("review text regex should compile")
});
static SCORE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Original Score:\s([A-Z](?:\+|-)?|\d(?:.\d)?(?:/\d)?)").expect("score regex should compile")
});
static FRESHNESS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"small\s(fresh|rotten)""#).expect("freshness regex should compile")
});
static CRITIC_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"/">([A-Z][a-zA-Z]+\s[A-Z][a-zA-Z-]+)"#,
        r"|([A-Z][a-zA-Z.]+\s[A-Z].?\s[A-Z][a-zA-Z]+)",
        r"|([A-Z][a-zA-Z]+\s[A-Z]+'[A-Z][a-zA-Z]+)",
    ))
    .expect("critic regex should compile")
});
static PUBLISHER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""subtle">[a-zA-Z\s,.()'&;!/0-9+-]+</em>"#).expect("publisher regex should compile")
});
static REVIEW_DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z]+\s\d+,\s\d+").expect("review date regex should compile")
});

/// Crawl every critic review page for a resolved movie page.
///
/// Returns `None` when the review index carries no "Page 1 of N" marker,
/// meaning the review section itself could not be located. A movie whose
/// pages hold no parseable reviews yields an empty collection instead.
pub async fn get_critic_reviews(gate: &CrawlGate, movie_url: &str) -> Option<ReviewCollection> {
    let index_url = review_index_url(movie_url);
    let index = gate.fetch(&index_url).await;

    let Some(pages) = index.as_deref().and_then(extract_page_count) else {
        warn!(url = %index_url, "No review page count found");
        return None;
    };

    if gate.policy().is_verbose() {
        info!(url = %index_url, pages, "Scraping critic reviews");
    }

    let mut reviews = ReviewCollection::new();
    for page in 1..=pages {
        let url = review_page_url(movie_url, page);
        let partial = match gate.fetch(&url).await {
            Some(markup) => extract_reviews_from_page(&markup),
            None => ReviewCollection::new(),
        };
        debug!(page, pages, found = partial.len(), "Scraped review page");
        reviews.append(partial);
    }

    info!(url = %movie_url, pages, reviews = reviews.len(), "Done scraping critic reviews");
    Some(reviews)
}

/// Total number of review pages from the "Page 1 of N" marker.
pub fn extract_page_count(markup: &str) -> Option<u64> {
    let digits = PAGE_COUNT_PATTERN.captures(markup)?.get(1)?.as_str();
    match digits.parse() {
        Ok(pages) => Some(pages),
        Err(err) => {
            warn!(pages = digits, error = %err, "Review page count out of range");
            None
        }
    }
}

/// Extract every review on one review page, in page order.
pub fn extract_reviews_from_page(markup: &str) -> ReviewCollection {
    let Some(table) = markup.split(REVIEW_TABLE_MARKER).nth(1) else {
        debug!("Review table not found on page");
        return ReviewCollection::new();
    };

    // The first segment precedes the first row
    table
        .split(REVIEW_ROW_MARKER)
        .skip(1)
        .filter_map(extract_review)
        .collect()
}

/// A block without review text contributes nothing; every other field falls back to `None`.
fn extract_review(block: &str) -> Option<ReviewRecord> {
    let review_text = REVIEW_TEXT_PATTERN.find(block).map(|m| {
        m.as_str()
            .trim_start_matches("<div class=\"the_review\">")
            .trim_end_matches("</div>")
            .trim()
            .trim_matches('"')
            .to_string()
    })?;

    let score = SCORE_PATTERN
        .captures(block)
        .and_then(|caps| caps.get(1))
        .map(|m| normalize_score(m.as_str()));

    let freshness = FRESHNESS_PATTERN
        .captures(block)
        .and_then(|caps| caps.get(1))
        .and_then(|m| Freshness::from_marker(m.as_str()));

    let critic_name = CRITIC_PATTERN.captures(block).map(|caps| {
        caps.iter()
            .skip(1)
            .flatten()
            .map(|m| m.as_str())
            .collect::<String>()
    });

    let publisher = PUBLISHER_PATTERN.find(block).map(|m| {
        m.as_str()
            .replace("\"subtle\">", "")
            .replace("</em>", "")
    });

    let review_date = REVIEW_DATE_PATTERN
        .find(block)
        .map(|m| m.as_str().trim_matches('"').to_string());

    Some(ReviewRecord {
        review_text,
        score,
        freshness,
        critic_name,
        is_top_critic: block.contains(TOP_CRITIC_LABEL),
        publisher,
        review_date,
    })
}

/// The site truncates ten-point scores to `n/1`; restore the denominator.
/// Any other denominator is left alone.
pub fn normalize_score(token: &str) -> String {
    if !token.contains("/1") {
        return token.to_string();
    }

    let mut parts: Vec<&str> = token.split('/').collect();
    if let Some(last) = parts.last_mut() {
        if *last == "1" {
            *last = "10";
        }
    }
    parts.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review_row(critic: &str, text: &str, score: &str, top: bool) -> String {
        format!(
            r#"<div class="row review_table_row">
<div class="col-xs-8 critic_name">
<a href="/critic/someone/">{critic}</a>
{top}
<em class="subtle">Daily Planet</em>
</div>
<div class="col-xs-16 review_container">
<div class="review_icon icon small rotten"></div>
<div class="review_date subtle small">Nov 12, 2019</div>
<div class="the_review">{text}</div>
<div class="small subtle">Full Review | Original Score: {score}</div>
</div>
</div>"#,
            critic = critic,
            text = text,
            score = score,
            top = if top { "<span> Top Critic</span>" } else { "" },
        )
    }

    fn page(rows: &[String]) -> String {
        format!(
            "<html><div class=\"content\"><div class=\"review_table\" id=\"reviews\">{}</div></div></html>",
            rows.join("\n")
        )
    }

    #[test]
    fn test_normalize_score() {
        assert_eq!(normalize_score("9/1"), "9/10");
        assert_eq!(normalize_score("8/10"), "8/10");
        assert_eq!(normalize_score("B+"), "B+");
        assert_eq!(normalize_score("3.5/4"), "3.5/4");
        assert_eq!(normalize_score("1"), "1");
    }

    #[test]
    fn test_page_count() {
        assert_eq!(extract_page_count("<span class=\"pageInfo\">Page 1 of 12</span>"), Some(12));
        assert_eq!(extract_page_count("<span>Page 2 of 12</span>"), None);
        assert_eq!(extract_page_count(""), None);
    }

    #[test]
    fn test_page_count_beyond_u32() {
        assert_eq!(extract_page_count("Page 1 of 5000000000"), Some(5_000_000_000));
        assert_eq!(extract_page_count("Page 1 of 99999999999999999999999"), None);
    }

    #[test]
    fn test_extracts_all_fields() {
        let html = page(&[review_row("Jane Doe", "A gripping, clever sequel.", "9/10", true)]);
        let reviews = extract_reviews_from_page(&html);

        assert_eq!(reviews.len(), 1);
        let review = reviews.get(0).unwrap();
        assert_eq!(review.review_text, "A gripping, clever sequel.");
        assert_eq!(review.score.as_deref(), Some("9/10"));
        assert_eq!(review.freshness, Some(Freshness::Rotten));
        assert_eq!(review.critic_name.as_deref(), Some("Jane Doe"));
        assert!(review.is_top_critic);
        assert_eq!(review.publisher.as_deref(), Some("Daily Planet"));
        assert_eq!(review.review_date.as_deref(), Some("Nov 12, 2019"));
    }

    #[test]
    fn test_letter_grade_and_missing_top_critic() {
        let html = page(&[review_row("Jane Doe", "Fun.", "B+", false)]);
        let review = extract_reviews_from_page(&html).get(0).unwrap();
        assert_eq!(review.score.as_deref(), Some("B+"));
        assert!(!review.is_top_critic);
    }

    #[test]
    fn test_critic_name_with_apostrophe() {
        let html = page(&[review_row("Ann O'Hara", "Fun.", "B", false)]);
        let review = extract_reviews_from_page(&html).get(0).unwrap();
        assert_eq!(review.critic_name.as_deref(), Some("Ann O'Hara"));
    }

    #[test]
    fn test_block_without_review_text_is_dropped() {
        // Digits are not accepted inside review text
        let html = page(&[
            review_row("Jane Doe", "Rated 10 out of 10.", "9/10", true),
            review_row("John Roe", "Solid.", "3/4", false),
        ]);
        let reviews = extract_reviews_from_page(&html);

        assert_eq!(reviews.len(), 1);
        assert!(reviews.column_lengths().iter().all(|l| *l == 1));
        assert_eq!(reviews.critic_names()[0].as_deref(), Some("John Roe"));
    }

    #[test]
    fn test_missing_fields_default_to_none() {
        let html = page(&["<div class=\"row review_table_row\"><div class=\"the_review\">Just words.</div></div>".to_string()]);
        let review = extract_reviews_from_page(&html).get(0).unwrap();

        assert_eq!(review.review_text, "Just words.");
        assert_eq!(review.score, None);
        assert_eq!(review.freshness, None);
        assert_eq!(review.critic_name, None);
        assert!(!review.is_top_critic);
        assert_eq!(review.publisher, None);
        assert_eq!(review.review_date, None);
    }

    #[test]
    fn test_page_without_table_is_empty() {
        assert!(extract_reviews_from_page("<html>No reviews</html>").is_empty());
        assert!(extract_reviews_from_page("").is_empty());
    }
}
