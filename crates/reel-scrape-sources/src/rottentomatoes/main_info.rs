use crate::gate::CrawlGate;
use once_cell::sync::Lazy;
use reel_scrape_models::{BoxOffice, MovieMetadata, PipeList, ReleaseDates};
use regex::Regex;
use tracing::{debug, info, warn};

static SYNOPSIS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"movieSynopsis[a-zA-Z"\s=:]+>\s+[a-zA-Z0-9"?()\s=:.,/;&'-]+"#)
        .expect("synopsis regex should compile")
});
static RATING_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"Rating: </div>\s+[a-zA-Z=<>\s"-]+>[A-Z0-9-]+"#).expect("rating regex should compile")
});
static GENRE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"Genre: </div>\s+[a-zA-Z0-9=<>\s"/?&;,-]+</div>"#).expect("genre regex should compile")
});
static DIRECTOR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"Directed By: </div>[a-zA-Z0-9=<>\s"/?&;,_-]+</div>"#).expect("director regex should compile")
});
static WRITER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"Written By: </div>[a-zA-Z0-9=<>\s"/?&;,_-]+</div>"#).expect("writer regex should compile")
});
static RELEASE_DATES_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"In Theaters: </div>[a-zA-Z0-9=<>\s"/?&;,_:-]+</time>"#)
        .expect("release dates regex should compile")
});
static DATE_TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\w+\s\d+,\s\d+").expect("date token regex should compile")
});
static BOX_OFFICE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"Box Office: </div>[\sa-z<=">-]+.?[\d,]+"#).expect("box office regex should compile")
});
static RUNTIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"Runtime: </div>[\sa-zA-Z0-9<=">-]+minutes"#).expect("runtime regex should compile")
});
static STUDIO_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"Studio: </div>[\sa-zA-Z0-9<=">:/.-]+a>\s+</div>"#).expect("studio regex should compile")
});

/// Fetch a resolved movie page and extract its metadata.
///
/// Returns `None` when the page could not be fetched at all, which is
/// distinct from a record whose fields are all absent.
pub async fn get_main_page_info(gate: &CrawlGate, url: &str) -> Option<MovieMetadata> {
    if gate.policy().is_verbose() {
        info!(url = %url, "Scraping main page");
    }

    let markup = match gate.fetch(url).await {
        Some(markup) if !markup.trim().is_empty() => markup,
        _ => {
            warn!(url = %url, "Main page unavailable, no metadata extracted");
            return None;
        }
    };

    Some(extract_main_info(&markup))
}

/// Extract every metadata field from one page of raw markup.
/// A field whose pattern does not match is left as `None`.
pub fn extract_main_info(markup: &str) -> MovieMetadata {
    let metadata = MovieMetadata {
        synopsis: first_match(&SYNOPSIS_PATTERN, markup).map(|block| tail_after(block, '>').trim().to_string()),
        rating: first_match(&RATING_PATTERN, markup).map(|block| tail_after(block, '>').to_string()),
        genre: first_match(&GENRE_PATTERN, markup).map(|block| anchor_texts(&block.replace("&amp;", "and"))),
        director: first_match(&DIRECTOR_PATTERN, markup).map(anchor_texts),
        writer: first_match(&WRITER_PATTERN, markup).map(anchor_texts),
        release_dates: first_match(&RELEASE_DATES_PATTERN, markup).and_then(release_dates),
        box_office: first_match(&BOX_OFFICE_PATTERN, markup).and_then(box_office),
        runtime: first_match(&RUNTIME_PATTERN, markup).map(|block| tail_after(block, '>').trim().to_string()),
        studio: first_match(&STUDIO_PATTERN, markup).map(studio_names),
    };

    debug!(populated = metadata.populated_fields(), "Extracted main page fields");
    metadata
}

/// Only the first matching block is used; later duplicates are ignored.
fn first_match<'a>(pattern: &Regex, text: &'a str) -> Option<&'a str> {
    pattern.find(text).map(|m| m.as_str())
}

fn tail_after(block: &str, delimiter: char) -> &str {
    block.rsplit(delimiter).next().unwrap_or(block)
}

/// Text of every `<a>` element in the block, in order.
fn anchor_texts(block: &str) -> PipeList {
    let items = block
        .split('>')
        .filter(|fragment| fragment.contains("</a"))
        .map(|fragment| fragment.replace("</a", "").trim().to_string())
        .collect();
    PipeList::new(items)
}

fn studio_names(block: &str) -> PipeList {
    let items = block
        .split("\">")
        .filter(|fragment| fragment.contains("</a>"))
        .map(|fragment| fragment.replace("</a>", "").replace("</div>", "").trim().to_string())
        .collect();
    PipeList::new(items)
}

/// The block must hold exactly two date tokens; any other count drops both dates.
fn release_dates(block: &str) -> Option<ReleaseDates> {
    let dates: Vec<&str> = DATE_TOKEN_PATTERN.find_iter(block).map(|m| m.as_str()).collect();
    match dates.as_slice() {
        [theater, home] => Some(ReleaseDates {
            theater: theater.to_string(),
            home: home.to_string(),
        }),
        _ => {
            debug!(found = dates.len(), "Release date block did not hold exactly two dates");
            None
        }
    }
}

/// The first character of the trailing value is taken as the currency symbol.
fn box_office(block: &str) -> Option<BoxOffice> {
    let value = tail_after(block, '>');
    let mut chars = value.chars();
    let currency_symbol = chars.next()?;
    Some(BoxOffice {
        currency_symbol,
        amount: chars.as_str().to_string(),
    })
}
