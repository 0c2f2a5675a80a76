//! IO modules - file inputs and outputs
//!
//! This module contains all file IO operations:
//! - `regions` - Region table loading (JSON polygons)
//! - `sentiments` - Word sentiment table loading (CSV)
//! - `messages` - Geotagged message loading (tab separated)
//! - `egress` - Query results output to file (JSONL format)

pub mod egress;
pub mod messages;
pub mod regions;
pub mod sentiments;

// Re-export commonly used types
pub use egress::{build_records, new_run_id, Egress, EgressRecord};
pub use messages::{load_tweets, load_tweets_for_query};
pub use regions::load_region_table;
pub use sentiments::load_word_sentiments;
