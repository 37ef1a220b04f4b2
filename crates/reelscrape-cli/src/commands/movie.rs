use super::{progress, Context};
use crate::output::Output;
use color_eyre::eyre::{eyre, Context as _};
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use reel_scrape_core::{MovieScrape, MovieScraper, ScrapeOptions};
use reel_scrape_models::{Freshness, MovieMetadata, PipeList, ReviewCollection};
use std::fs::File;
use std::io;
use std::path::PathBuf;

/// Reviews listed in the human summary; the rest are only counted.
const REVIEW_PREVIEW_LIMIT: usize = 10;

pub async fn run_movie(
    ctx: &Context,
    name: &str,
    main_info: bool,
    critic_reviews: bool,
    csv_path: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    tracing::debug!(movie = %name, main_info, critic_reviews, "Movie command started");

    let scraper = MovieScraper::new(ctx.gate()?, ctx.config.sites.review_base_url.clone())
        .with_options(ScrapeOptions { main_info, critic_reviews });

    let spinner = progress::spinner(format!("Scraping {}...", name), output.is_quiet() || !output.is_human());
    let scrape = scraper.scrape_movie_info(name).await;
    spinner.finish_and_clear();

    let scrape = scrape.ok_or_else(|| eyre!("Could not find a movie page for '{}'", name))?;

    if let Some(path) = &csv_path {
        match &scrape.reviews {
            Some(reviews) => {
                let file = File::create(path)
                    .wrap_err_with(|| format!("Failed to create {}", path.display()))?;
                write_reviews_csv(file, reviews)?;
                output.success(format!("Wrote {} reviews to {}", reviews.len(), path.display()));
            }
            None => output.warn("No reviews were scraped, CSV not written"),
        }
    }

    if output.is_human() {
        print_scrape(&scrape, output);
    } else {
        output.json(&serde_json::to_value(&scrape)?);
    }

    Ok(())
}

/// One row per review, with a header row.
pub fn write_reviews_csv<W: io::Write>(writer: W, reviews: &ReviewCollection) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for review in reviews.iter() {
        wtr.serialize(review)?;
    }
    wtr.flush()?;
    Ok(())
}

fn print_scrape(scrape: &MovieScrape, output: &Output) {
    output.println("");
    output.println(format!("{}", scrape.name.bright_cyan().bold()));
    output.println(format!("{} {}", "→".bright_blue(), scrape.url));
    output.println("");

    match &scrape.metadata {
        Some(metadata) => output.println(metadata_table(metadata).to_string()),
        None => output.println(format!("{}", "Main page: not scraped".bright_black())),
    }
    output.println("");

    match &scrape.reviews {
        Some(reviews) => {
            output.println(review_summary(reviews));
            if !reviews.is_empty() {
                output.println(review_table(reviews, REVIEW_PREVIEW_LIMIT).to_string());
                if reviews.len() > REVIEW_PREVIEW_LIMIT {
                    output.println(format!(
                        "{}",
                        format!("... and {} more", reviews.len() - REVIEW_PREVIEW_LIMIT).bright_black()
                    ));
                }
            }
        }
        None => output.println(format!("{}", "Critic reviews: not found".bright_black())),
    }

    output.println("");
    output.println(format!(
        "{}",
        format!("Finished in {:.1}s", scrape.duration.as_secs_f64()).bright_black()
    ));
}

pub fn metadata_table(metadata: &MovieMetadata) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Movie Info").fg(comfy_table::Color::Cyan).add_attribute(comfy_table::Attribute::Bold),
        Cell::new(""),
    ]);

    let list = |value: &Option<PipeList>| value.as_ref().map(|v| v.joined());
    let box_office = metadata
        .box_office
        .as_ref()
        .map(|b| format!("{}{}", b.currency_symbol, b.amount));

    let rows: [(&str, Option<String>); 10] = [
        ("Synopsis", metadata.synopsis.clone()),
        ("Rating", metadata.rating.clone()),
        ("Genre", list(&metadata.genre)),
        ("Directed By", list(&metadata.director)),
        ("Written By", list(&metadata.writer)),
        ("In Theaters", metadata.theater_release_date().map(str::to_string)),
        ("On Disc/Streaming", metadata.home_release_date().map(str::to_string)),
        ("Box Office", box_office),
        ("Runtime", metadata.runtime.clone()),
        ("Studio", list(&metadata.studio)),
    ];

    for (label, value) in rows {
        table.add_row(vec![
            Cell::new(label),
            match value {
                Some(value) => Cell::new(value),
                None => Cell::new("-").fg(comfy_table::Color::DarkGrey),
            },
        ]);
    }

    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn review_summary(reviews: &ReviewCollection) -> String {
    let top_critics = reviews.top_critics().iter().filter(|top| **top).count();
    format!(
        "{} reviews: {} fresh, {} rotten, {} from top critics",
        reviews.len().bold(),
        reviews.count_freshness(Freshness::Fresh).green(),
        reviews.count_freshness(Freshness::Rotten).red(),
        top_critics
    )
}

fn review_table(reviews: &ReviewCollection, limit: usize) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Critic", "Publisher", "Score", "Fresh", "Date"]);

    for review in reviews.iter().take(limit) {
        let critic = match (&review.critic_name, review.is_top_critic) {
            (Some(name), true) => format!("{} ★", name),
            (Some(name), false) => name.clone(),
            (None, _) => "-".to_string(),
        };
        table.add_row(vec![
            critic,
            review.publisher.unwrap_or_else(|| "-".to_string()),
            review.score.unwrap_or_else(|| "-".to_string()),
            review.freshness.map(|f| f.as_str().to_string()).unwrap_or_else(|| "-".to_string()),
            review.review_date.unwrap_or_else(|| "-".to_string()),
        ]);
    }

    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_scrape_models::{BoxOffice, ReviewRecord};

    fn review(text: &str, critic: Option<&str>, freshness: Option<Freshness>) -> ReviewRecord {
        ReviewRecord {
            review_text: text.to_string(),
            score: Some("3/4".to_string()),
            freshness,
            critic_name: critic.map(str::to_string),
            is_top_critic: false,
            publisher: None,
            review_date: Some("May 2, 2003".to_string()),
        }
    }

    #[test]
    fn test_write_reviews_csv() {
        let reviews: ReviewCollection = vec![
            review("Sharp, fun.", Some("Jane Doe"), Some(Freshness::Fresh)),
            review("Too long.", None, Some(Freshness::Rotten)),
        ]
        .into_iter()
        .collect();

        let mut buf = Vec::new();
        write_reviews_csv(&mut buf, &reviews).unwrap();
        let csv = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "review_text,score,freshness,critic_name,is_top_critic,publisher,review_date"
        );
        assert_eq!(lines[1], "\"Sharp, fun.\",3/4,fresh,Jane Doe,false,,\"May 2, 2003\"");
        assert_eq!(lines[2], "Too long.,3/4,rotten,,false,,\"May 2, 2003\"");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_metadata_table_shows_values_and_gaps() {
        let metadata = MovieMetadata {
            rating: Some("PG-13".to_string()),
            director: Some(PipeList::new(vec!["Bryan Singer".to_string()])),
            box_office: Some(BoxOffice {
                currency_symbol: '$',
                amount: "214,813,155".to_string(),
            }),
            ..Default::default()
        };

        let rendered = metadata_table(&metadata).to_string();
        assert!(rendered.contains("PG-13"));
        assert!(rendered.contains("Bryan Singer"));
        assert!(rendered.contains("$214,813,155"));
        assert!(rendered.contains("Synopsis"));
    }
}
