pub mod error;
pub mod fetch;
pub mod gate;
pub mod robots;
pub mod rottentomatoes;
pub mod wikipedia;

pub use error::SourceError;
pub use fetch::{HttpFetcher, MemoryFetcher, PageFetcher};
pub use gate::CrawlGate;
pub use robots::{check_min_delay, parse_crawl_delay};
