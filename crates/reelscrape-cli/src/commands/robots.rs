use super::Context;
use crate::output::Output;
use color_eyre::Result;
use reel_scrape_sources::check_min_delay;
use serde_json::json;

pub async fn run_robots(ctx: &Context, output: &Output) -> Result<()> {
    let gate = ctx.gate()?;
    let base_url = &ctx.config.sites.review_base_url;
    let configured = gate.policy().crawl_rate();

    let delay = check_min_delay(&gate, base_url).await;

    if !output.is_human() {
        output.json(&json!({
            "base_url": base_url,
            "crawl_delay": delay,
            "crawl_rate": configured,
        }));
        return Ok(());
    }

    match delay {
        Some(delay) if delay > configured => output.warn(format!(
            "{} asks for a crawl delay of {}s, above the configured rate of {}s",
            base_url, delay, configured
        )),
        Some(delay) => output.success(format!(
            "{} crawl delay: {}s (configured rate: {}s)",
            base_url, delay, configured
        )),
        None => output.info(format!(
            "{} has no \"User-agent: *\" section; no minimum delay from robots.txt",
            base_url
        )),
    }

    Ok(())
}
