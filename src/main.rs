//! Region trends - sentiment of geotagged messages per region
//!
//! Module structure:
//! - `domain/` - Core types (Point, Polygon, Region, Tweet)
//! - `io/` - File inputs and outputs (regions, sentiments, messages, egress)
//! - `services/` - Business logic (classification, aggregation, scoring)
//! - `infra/` - Infrastructure (Config, RunSummary)

use anyhow::Context;
use clap::{Parser, Subcommand};
use region_trends::infra::Config;
use region_trends::io::{
    build_records, load_region_table, load_tweets_for_query, load_word_sentiments, new_run_id,
    Egress,
};
use region_trends::services::sentiment::extract_words;
use region_trends::services::Trends;
use tracing::info;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

const DEFAULT_SENTIMENT_TEXT: &str = "Are you virtuous or verminous?";

/// Region trends - map message sentiment onto regions
#[derive(Parser, Debug)]
#[command(name = "region-trends", version, about)]
struct Args {
    /// Path to TOML configuration file (falls back to CONFIG_FILE, then config/dev.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Emit logs as JSON lines instead of human-readable text
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the words of TEXT annotated with their sentiment (defaults to a sample sentence)
    Sentiment { text: Vec<String> },
    /// List the regions whose centers are closest to REGION
    Centered {
        region: Option<String>,
        count: Option<usize>,
    },
    /// Average sentiment per region for messages containing QUERY
    Map { query: Vec<String> },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize structured logging with configurable level via RUST_LOG env var.
    // Logs go to stderr; stdout carries command output.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .with_writer(std::io::stderr);
    if args.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
    info!(version = env!("CARGO_PKG_VERSION"), git_hash = env!("GIT_HASH"), "region_trends_starting");

    let config_path = args.config.unwrap_or_else(Config::default_config_path);
    let config = Config::load_from_path(&config_path);
    info!(
        config_file = %config.config_file(),
        regions_file = %config.regions_file(),
        sentiments_file = %config.sentiments_file(),
        messages_dir = %config.messages_dir(),
        egress_file = %config.egress_file(),
        "config_loaded"
    );

    match args.command {
        Command::Sentiment { text } => print_sentiment(&config, &sentiment_text(&text)),
        Command::Centered { region, count } => {
            let region = region.unwrap_or_else(|| config.default_center_region().to_string());
            let count = count.unwrap_or(config.default_neighbor_count());
            print_centered(&config, &region, count)
        }
        Command::Map { query } => {
            let query =
                if query.is_empty() { config.default_query().to_string() } else { query.join(" ") };
            run_map(&config, &query)
        }
    }
}

/// Text for `sentiment`, falling back to the sample sentence
fn sentiment_text(words: &[String]) -> String {
    if words.is_empty() {
        DEFAULT_SENTIMENT_TEXT.to_string()
    } else {
        words.join(" ")
    }
}

fn print_sentiment(config: &Config, text: &str) -> anyhow::Result<()> {
    let words = load_word_sentiments(config.sentiments_file())?;
    let tokens = extract_words(text);
    let width = tokens.iter().map(String::len).max().unwrap_or(0);

    for word in &tokens {
        if let Some(value) = words.get(word).value() {
            println!("{:>width$}: {:+}", word, value, width = width);
        }
    }
    Ok(())
}

fn print_centered(config: &Config, region: &str, count: usize) -> anyhow::Result<()> {
    let regions = load_region_table(config.regions_file())?;
    let centers = region_trends::domain::all_region_centers(&regions);
    let nearest = centers
        .nearest_to(&region.to_uppercase(), count)
        .with_context(|| format!("Cannot center map on {}", region))?;

    for (name, center) in nearest {
        println!("{}\t{:.5}\t{:.5}", name, center.x, center.y);
    }
    Ok(())
}

fn run_map(config: &Config, query: &str) -> anyhow::Result<()> {
    let regions = load_region_table(config.regions_file())?;
    let words = load_word_sentiments(config.sentiments_file())?;
    let tweets = load_tweets_for_query(config, query)?;

    let trends = Trends::new(regions, words);
    let result = trends.run(&tweets);
    result.summary.log();

    let run_id = new_run_id();
    let records = build_records(&run_id, query, trends.centers(), &result);
    Egress::new(config.egress_file())
        .write_records(&records)
        .with_context(|| format!("Cannot save results for query {:?}", query))?;

    for (name, avg) in &result.averages {
        println!("{}\t{:+.4}", name, avg);
    }
    Ok(())
}
