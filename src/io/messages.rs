//! Geotagged message loading
//!
//! One message per line, tab separated:
//!
//! ```text
//! [38.83, -77.01]<TAB>6<TAB>2011-08-28 19:22:53<TAB>my job is the best
//! ```
//!
//! The second column is ignored. Malformed lines are logged and skipped.

use crate::domain::types::Tweet;
use crate::infra::config::Config;
use anyhow::{anyhow, Context};
use chrono::NaiveDateTime;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a single message line
pub fn parse_tweet_line(line: &str) -> anyhow::Result<Tweet> {
    let mut fields = line.splitn(4, '\t');
    let (Some(location), Some(_), Some(time), Some(text)) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(anyhow!("expected 4 tab-separated fields"));
    };

    let coords = location
        .trim()
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| anyhow!("location must look like [lat, lon]"))?;
    let (lat, lon) = coords.split_once(',').ok_or_else(|| anyhow!("location needs lat, lon"))?;
    let lat = parse_coordinate(lat).context("invalid latitude")?;
    let lon = parse_coordinate(lon).context("invalid longitude")?;

    let time = NaiveDateTime::parse_from_str(time.trim(), TIME_FORMAT).context("invalid time")?;

    Ok(Tweet::new(text.trim().to_lowercase(), time, lat, lon))
}

/// Parse a coordinate, rejecting `NaN` and infinities
fn parse_coordinate(field: &str) -> anyhow::Result<f64> {
    let value: f64 = field.trim().parse()?;
    if !value.is_finite() {
        return Err(anyhow!("coordinate {} is not finite", value));
    }
    Ok(value)
}

/// Parse message lines, keeping those whose text contains `query`
///
/// An empty query keeps every message.
pub fn parse_tweets(content: &str, query: &str) -> Vec<Tweet> {
    let query = query.trim().to_lowercase();
    let mut tweets = Vec::new();
    let mut skipped = 0_usize;

    for (line_no, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_tweet_line(line) {
            Ok(tweet) if tweet.text().contains(&query) => tweets.push(tweet),
            Ok(_) => {}
            Err(e) => {
                skipped += 1;
                let line = line_no + 1;
                warn!(line = %line, error = %e, "message_line_skipped");
            }
        }
    }

    if skipped > 0 {
        warn!(skipped = %skipped, "message_lines_skipped");
    }
    tweets
}

/// Load messages matching `query` from a file
pub fn load_tweets<P: AsRef<Path>>(path: P, query: &str) -> anyhow::Result<Vec<Tweet>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read message file {}", path.display()))?;
    let tweets = parse_tweets(&content, query);
    info!(file = %path.display(), query = %query, messages = %tweets.len(), "messages_loaded");
    Ok(tweets)
}

/// Load messages for a query, preferring the per-query file
pub fn load_tweets_for_query(config: &Config, query: &str) -> anyhow::Result<Vec<Tweet>> {
    let per_query = config.messages_file_for(query);
    if per_query.exists() {
        return load_tweets(&per_query, query);
    }
    load_tweets(config.all_messages_file(), query)
}
