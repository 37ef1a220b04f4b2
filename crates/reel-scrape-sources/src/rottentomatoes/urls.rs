/// Heading the site renders on its not-found page.
pub const NOT_FOUND_MARKER: &str = "<h1>404 - Not Found</h1>";

/// Word separators tried in order when building a movie page URL.
pub const SEPARATORS: [char; 2] = ['_', '-'];

/// Convert a movie name into the site's URL slug.
///
/// Lower-cases, drops apostrophes, hyphens, colons and commas, strips
/// enclosing double quotes and joins the remaining words with `sep`.
pub fn format_name(name: &str, sep: char) -> String {
    let cleaned: String = name
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '\'' | '-' | ':' | ','))
        .collect();

    cleaned
        .trim_matches('"')
        .split(' ')
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(&sep.to_string())
}

pub fn movie_url(base_url: &str, name: &str, sep: char) -> String {
    format!("{}m/{}/", base_url, format_name(name, sep))
}

pub fn review_index_url(movie_url: &str) -> String {
    format!("{}reviews", movie_url)
}

pub fn review_page_url(movie_url: &str, page: u64) -> String {
    format!("{}reviews?page={}&sort=", movie_url, page)
}

pub fn is_not_found(markup: &str) -> bool {
    markup.contains(NOT_FOUND_MARKER)
}
