use super::progress::ScrapeProgress;
use super::Context;
use crate::output::Output;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use reel_scrape_core::{MovieScrape, MovieScraper};
use reel_scrape_sources::wikipedia::scrape_movie_names;
use serde_json::json;

pub async fn run_names(
    ctx: &Context,
    year: i32,
    scrape: bool,
    limit: Option<usize>,
    output: &Output,
) -> Result<()> {
    let gate = ctx.gate()?;
    let mut names = scrape_movie_names(&gate, &ctx.config.sites.almanac_base_url, year).await?;
    if let Some(limit) = limit {
        names.truncate(limit);
    }

    if names.is_empty() {
        output.warn(format!("No movie names found for {}", year));
        return Ok(());
    }

    if !scrape {
        if output.is_human() {
            for (idx, name) in names.iter().enumerate() {
                output.println(format!("{:>4}. {}", idx + 1, name));
            }
        } else {
            output.json(&json!({ "year": year, "names": names }));
        }
        return Ok(());
    }

    let scraper = MovieScraper::new(gate, ctx.config.sites.review_base_url.clone());
    let progress = ScrapeProgress::new(names.len() as u64, output.is_quiet() || !output.is_human());
    let mut results: Vec<(String, Option<MovieScrape>)> = Vec::with_capacity(names.len());

    // One movie at a time; the gate spaces out every fetch
    for (idx, name) in names.into_iter().enumerate() {
        progress.start(idx as u64, &name);
        let result = scraper.scrape_movie_info(&name).await;
        progress.advance();
        results.push((name, result));
    }
    progress.finish();

    let found = results.iter().filter(|(_, result)| result.is_some()).count();
    tracing::info!(year, total = results.len(), found, "Done scraping movies");

    if output.is_human() {
        output.println(results_table(&results).to_string());
        output.success(format!("Scraped {} of {} movies from {}", found, results.len(), year));
    } else {
        let movies: Vec<_> = results
            .iter()
            .map(|(name, result)| match result {
                Some(scrape) => serde_json::to_value(scrape).unwrap_or_default(),
                None => json!({ "name": name, "url": null }),
            })
            .collect();
        output.json(&json!({ "year": year, "movies": movies }));
    }

    Ok(())
}

fn results_table(results: &[(String, Option<MovieScrape>)]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Movie").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Page").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Fields").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Reviews").add_attribute(comfy_table::Attribute::Bold),
    ]);

    for (name, result) in results {
        match result {
            Some(scrape) => {
                let fields = scrape
                    .metadata
                    .as_ref()
                    .map(|m| m.populated_fields().to_string())
                    .unwrap_or_else(|| "-".to_string());
                let reviews = scrape
                    .reviews
                    .as_ref()
                    .map(|r| r.len().to_string())
                    .unwrap_or_else(|| "-".to_string());
                table.add_row(vec![
                    Cell::new(name),
                    Cell::new(&scrape.url),
                    Cell::new(fields),
                    Cell::new(reviews),
                ]);
            }
            None => {
                table.add_row(vec![
                    Cell::new(name),
                    Cell::new("unreachable".red().to_string()),
                    Cell::new("-"),
                    Cell::new("-"),
                ]);
            }
        }
    }

    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}
