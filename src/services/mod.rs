//! Services - classification, aggregation and scoring
//!
//! This module contains the core business logic services:
//! - `classifier` - Nearest region center classification
//! - `aggregator` - Per-region average of present scores
//! - `sentiment` - Tokenizer and word sentiment lookup
//! - `trends` - End-to-end query pipeline

pub mod aggregator;
pub mod classifier;
pub mod sentiment;
pub mod trends;

// Re-export commonly used types
pub use aggregator::aggregate;
pub use classifier::{classify, Located};
pub use sentiment::{analyze_text, analyze_tweet, extract_words, WordSentiments};
pub use trends::{RegionSentiments, Trends};
