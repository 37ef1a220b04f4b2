pub mod scrape;

pub use scrape::{MovieScrape, MovieScraper, ScrapeOptions};
