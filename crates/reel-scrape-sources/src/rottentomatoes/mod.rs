//! Movie-review site scraping: name resolution, main page metadata and the
//! paginated critic review listing.
//!
//! All extraction is pattern matching over the raw markup rather than a walk
//! of a parsed document tree.

pub mod main_info;
pub mod resolver;
pub mod reviews;
pub mod urls;

pub use main_info::{extract_main_info, get_main_page_info};
pub use resolver::resolve_movie_url;
pub use reviews::{extract_page_count, extract_reviews_from_page, get_critic_reviews, normalize_score};
pub use urls::{format_name, is_not_found, movie_url, review_index_url, review_page_url};
