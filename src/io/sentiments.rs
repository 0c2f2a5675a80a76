//! Word sentiment table loading (`word,value` per line)

use crate::services::sentiment::WordSentiments;
use anyhow::{anyhow, Context};
use std::fs;
use std::path::Path;
use tracing::info;

/// Parse `word,value` lines; blank lines are ignored
pub fn parse_word_sentiments(content: &str) -> anyhow::Result<WordSentiments> {
    let mut table = WordSentiments::new();
    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (word, value) = line
            .rsplit_once(',')
            .ok_or_else(|| anyhow!("line {}: expected word,value", line_no + 1))?;
        let value: f64 = value
            .trim()
            .parse()
            .with_context(|| format!("line {}: invalid sentiment value", line_no + 1))?;
        table
            .insert(word.trim(), value)
            .with_context(|| format!("line {}: word {}", line_no + 1, word.trim()))?;
    }
    Ok(table)
}

/// Load the word sentiment table from a CSV file
pub fn load_word_sentiments<P: AsRef<Path>>(path: P) -> anyhow::Result<WordSentiments> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read sentiment file {}", path.display()))?;
    let table = parse_word_sentiments(&content)
        .with_context(|| format!("Failed to parse sentiment file {}", path.display()))?;
    info!(file = %path.display(), words = %table.len(), "word_sentiments_loaded");
    Ok(table)
}
