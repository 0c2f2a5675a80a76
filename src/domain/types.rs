//! Shared types for located, scored messages

use crate::domain::geometry::Point;
use chrono::NaiveDateTime;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SentimentError {
    #[error("sentiment {0} outside [-1, 1]")]
    OutOfRange(f64),
}

/// A sentiment value that may be absent
///
/// Absence means "no measurable signal" and is distinct from 0.0, which is
/// a valid neutral value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Sentiment(Option<f64>);

impl Sentiment {
    pub const NONE: Sentiment = Sentiment(None);

    pub fn new(value: Option<f64>) -> Result<Self, SentimentError> {
        match value {
            Some(v) if !(-1.0..=1.0).contains(&v) => Err(SentimentError::OutOfRange(v)),
            _ => Ok(Self(value)),
        }
    }

    #[inline]
    pub fn has_value(&self) -> bool {
        self.0.is_some()
    }

    #[inline]
    pub fn value(&self) -> Option<f64> {
        self.0
    }
}

/// A located item with an optional score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredItem {
    location: Point,
    score: Option<f64>,
}

impl ScoredItem {
    pub fn new(location: Point, score: Option<f64>) -> Self {
        Self { location, score }
    }

    #[inline]
    pub fn location(&self) -> Point {
        self.location
    }

    #[inline]
    pub fn score(&self) -> Option<f64> {
        self.score
    }
}

impl From<(Point, Sentiment)> for ScoredItem {
    fn from((location, sentiment): (Point, Sentiment)) -> Self {
        Self { location, score: sentiment.value() }
    }
}

/// A geotagged short message
#[derive(Debug, Clone, PartialEq)]
pub struct Tweet {
    text: String,
    time: NaiveDateTime,
    location: Point,
}

impl Tweet {
    pub fn new(text: impl Into<String>, time: NaiveDateTime, lat: f64, lon: f64) -> Self {
        Self { text: text.into(), time, location: Point::new(lat, lon) }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn time(&self) -> NaiveDateTime {
        self.time
    }

    pub fn location(&self) -> Point {
        self.location
    }

    /// Lowercase words of the text, punctuation stripped
    pub fn words(&self) -> Vec<String> {
        crate::services::sentiment::extract_words(&self.text)
    }
}

impl std::fmt::Display for Tweet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\" @ {}", self.text, self.location)
    }
}
