//! Film titles from the almanac's "<year> in film" pages.

use crate::error::SourceError;
use crate::gate::CrawlGate;
use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

/// The earliest year with a usable "in film" page.
pub const FIRST_ALMANAC_YEAR: i32 = 1960;

static TITLE_LINK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<i><a href="/wiki/[\w()%.,:;"]+\stitle="[\w\s()%.,:;'"-]+""#)
        .expect("title link regex should compile")
});
static FILM_SUFFIX_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s\((\d+\s)?([\w\s]+)?film\)").expect("film suffix regex should compile")
});
static CATEGORY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Category:\d+").expect("category regex should compile"));

pub fn build_almanac_url(base_url: &str, year: i32, current_year: i32) -> Result<String, SourceError> {
    if !(FIRST_ALMANAC_YEAR..=current_year).contains(&year) {
        return Err(SourceError::InvalidYear {
            year,
            min: FIRST_ALMANAC_YEAR,
            max: current_year,
        });
    }
    Ok(format!("{}{}_in_film", base_url, year))
}

/// Pull italicised film titles out of an almanac page, in page order.
pub fn extract_movie_names(markup: &str) -> Vec<String> {
    TITLE_LINK_PATTERN
        .find_iter(markup)
        .filter_map(|m| m.as_str().split("title=").nth(1))
        .map(|title| {
            let title = title.replace('"', "");
            let title = FILM_SUFFIX_PATTERN.replace_all(&title, "");
            CATEGORY_PATTERN.replace_all(&title, "").into_owned()
        })
        .filter(|title| !title.is_empty())
        .collect()
}

/// Fetch the page for `year` and list the film titles on it.
///
/// A year outside the supported range is an error. A failed fetch is not:
/// it yields an empty list.
pub async fn scrape_movie_names(gate: &CrawlGate, base_url: &str, year: i32) -> Result<Vec<String>, SourceError> {
    let url = build_almanac_url(base_url, year, Utc::now().year())?;
    info!(url = %url, "Scraping movie names");

    let Some(markup) = gate.fetch(&url).await else {
        warn!(url = %url, "Scraping movie names failed");
        return Ok(Vec::new());
    };

    let names = extract_movie_names(&markup);
    if names.is_empty() {
        warn!(url = %url, "No movie names found");
    } else {
        info!(url = %url, count = names.len(), "Done scraping movie names");
    }
    Ok(names)
}
