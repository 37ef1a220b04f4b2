use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::eyre;
use commands::{config, movie, names, robots, Context};
use reel_scrape_config::{Config, PathManager};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "reelscrape")]
#[command(about = "ReelScrape - Polite movie metadata and critic review scraper")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seconds to wait before every fetch, overriding the configured rate
    #[arg(long, global = true, value_name = "SECS", allow_negative_numbers = true)]
    crawl_rate: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape metadata and critic reviews for one movie
    #[command(long_about = "Resolve a movie name to its review site page, then scrape the main page metadata and every page of critic reviews. Fetches are strictly sequential and each waits for the crawl rate.")]
    Movie {
        /// Movie name, e.g. "X2: X-Men United"
        name: String,

        /// Skip the main page metadata
        #[arg(long, action = ArgAction::SetTrue)]
        no_main_info: bool,

        /// Skip the critic reviews
        #[arg(long, action = ArgAction::SetTrue)]
        no_reviews: bool,

        /// Write one row per review to this CSV file
        #[arg(long, value_name = "PATH")]
        csv: Option<PathBuf>,
    },
    /// List film titles released in a year
    #[command(long_about = "List the film titles on the almanac's \"<year> in film\" page. With --scrape, each title is then scraped from the review site in turn.")]
    Names {
        /// Release year, 1960 through the current year
        year: i32,

        /// Scrape every listed title from the review site
        #[arg(long, action = ArgAction::SetTrue)]
        scrape: bool,

        /// Only use the first N titles
        #[arg(long, value_name = "N")]
        limit: Option<usize>,
    },
    /// Show the review site's robots.txt crawl delay
    Robots,
    /// Show or change the configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the current configuration
    Show,

    /// Persist crawl settings to the configuration file
    Set {
        /// Seconds to wait before every fetch
        #[arg(long, value_name = "SECS", allow_negative_numbers = true)]
        rate: Option<f64>,

        /// Log every fetch at info level
        #[arg(long, value_name = "BOOL")]
        log_fetches: Option<bool>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathManager::default().config_file());
    let config = Config::load_or_default(&config_path)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_path.display(), e))?;

    logging::init_logging(cli.verbose, cli.quiet, &config.logging).map_err(|e| eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    let ctx = Context::new(config, config_path, cli.crawl_rate, cli.verbose > 0);

    let result = match cli.command {
        Commands::Movie { name, no_main_info, no_reviews, csv } => {
            movie::run_movie(&ctx, &name, !no_main_info, !no_reviews, csv, &output).await
        }
        Commands::Names { year, scrape, limit } => names::run_names(&ctx, year, scrape, limit, &output).await,
        Commands::Robots => robots::run_robots(&ctx, &output).await,
        Commands::Config { cmd } => match cmd {
            ConfigCommands::Show => config::show_config(&ctx, &output),
            ConfigCommands::Set { rate, log_fetches } => config::set_config(&ctx, rate, log_fetches, &output),
        },
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Command failed");
    }
    result
}
