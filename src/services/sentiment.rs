//! Word-level sentiment lookup and message scoring

use crate::domain::types::{ScoredItem, Sentiment, SentimentError, Tweet};
use rustc_hash::FxHashMap;

/// Split text into lowercase ASCII-letter words
///
/// Every character that is not an ASCII letter acts as a separator, so
/// hashtags, mentions and punctuation are stripped.
pub fn extract_words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_ascii_alphabetic())
        .filter(|w| !w.is_empty())
        .map(str::to_ascii_lowercase)
        .collect()
}

/// Static word -> sentiment table
#[derive(Debug, Clone, Default)]
pub struct WordSentiments {
    table: FxHashMap<String, f64>,
}

impl WordSentiments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a word, rejecting values outside [-1, 1]
    pub fn insert(&mut self, word: impl Into<String>, value: f64) -> Result<(), SentimentError> {
        Sentiment::new(Some(value))?;
        self.table.insert(word.into(), value);
        Ok(())
    }

    pub fn get(&self, word: &str) -> Sentiment {
        // Values are range-checked on insert
        Sentiment::new(self.table.get(word).copied()).unwrap_or(Sentiment::NONE)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl TryFrom<Vec<(String, f64)>> for WordSentiments {
    type Error = SentimentError;

    fn try_from(pairs: Vec<(String, f64)>) -> Result<Self, Self::Error> {
        let mut table = Self::new();
        for (word, value) in pairs {
            table.insert(word, value)?;
        }
        Ok(table)
    }
}

/// Mean sentiment of the words that have one
pub fn analyze_text<S: AsRef<str>>(words: &[S], table: &WordSentiments) -> Sentiment {
    let mut sum = 0.0;
    let mut count = 0_u32;
    for word in words {
        if let Some(v) = table.get(word.as_ref()).value() {
            sum += v;
            count += 1;
        }
    }
    if count == 0 {
        return Sentiment::NONE;
    }
    // Mean of in-range values stays in range
    Sentiment::new(Some(sum / f64::from(count))).unwrap_or(Sentiment::NONE)
}

/// Sentiment of a message's text
pub fn analyze_tweet(tweet: &Tweet, table: &WordSentiments) -> Sentiment {
    analyze_text(&tweet.words(), table)
}

impl Tweet {
    /// Located, optionally scored item for this message
    pub fn scored(&self, table: &WordSentiments) -> ScoredItem {
        ScoredItem::from((self.location(), analyze_tweet(self, table)))
    }
}
