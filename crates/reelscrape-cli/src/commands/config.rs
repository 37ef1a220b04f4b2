use super::Context;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use reel_scrape_config::{Config, CrawlPolicy};

pub fn show_config(ctx: &Context, output: &Output) -> Result<()> {
    if !output.is_human() {
        output.json(&serde_json::to_value(&ctx.config)?);
        return Ok(());
    }

    if !ctx.config_path.exists() {
        output.warn(format!(
            "Configuration file not found at: {} (showing defaults)",
            ctx.config_path.display()
        ));
    }

    output.println(config_table(&ctx.config, &ctx.config_path.display().to_string()).to_string());
    Ok(())
}

pub fn set_config(ctx: &Context, crawl_rate: Option<f64>, verbose: Option<bool>, output: &Output) -> Result<()> {
    if crawl_rate.is_none() && verbose.is_none() {
        output.warn("Nothing to change. Pass --rate and/or --log-fetches.");
        return Ok(());
    }

    let mut config = ctx.config.clone();
    apply_crawl_settings(&mut config, crawl_rate, verbose)?;

    config.save_to_file(&ctx.config_path)
        .map_err(|e| eyre!("Failed to save config to {}: {}", ctx.config_path.display(), e))?;

    output.success(format!("Configuration saved to {}", ctx.config_path.display()));
    Ok(())
}

/// Rejects a non-positive rate without touching the config.
fn apply_crawl_settings(config: &mut Config, crawl_rate: Option<f64>, verbose: Option<bool>) -> Result<()> {
    if let Some(rate) = crawl_rate {
        let policy = CrawlPolicy::new(rate, config.crawl.verbose)?;
        config.crawl.crawl_rate = policy.crawl_rate();
    }
    if let Some(verbose) = verbose {
        config.crawl.verbose = verbose;
    }
    Ok(())
}

fn config_table(config: &Config, path: &str) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Configuration").fg(comfy_table::Color::Cyan).add_attribute(comfy_table::Attribute::Bold),
        Cell::new(path),
    ]);

    let flag = |on: bool| if on { "✓".green().to_string() } else { "✗".red().to_string() };

    table.add_row(vec![Cell::new("Crawl rate"), Cell::new(format!("{}s", config.crawl.crawl_rate))]);
    table.add_row(vec![Cell::new("Verbose"), Cell::new(flag(config.crawl.verbose))]);
    table.add_row(vec![Cell::new("Review site"), Cell::new(&config.sites.review_base_url)]);
    table.add_row(vec![Cell::new("Almanac site"), Cell::new(&config.sites.almanac_base_url)]);
    table.add_row(vec![Cell::new("User agent"), Cell::new(&config.sites.user_agent)]);
    table.add_row(vec![Cell::new("Log level"), Cell::new(&config.logging.level)]);
    table.add_row(vec![Cell::new("JSON logs"), Cell::new(flag(config.logging.json))]);
    table.add_row(vec![
        Cell::new("Log file"),
        Cell::new(
            config.logging.file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "stderr".to_string()),
        ),
    ]);

    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}
