//! Extract form fields from noisy, speech-transcribed text by matching
//! declarative word patterns with bounded fuzzy tolerance.
//!
//! # Example
//!
//! ```rust
//! use wordmatch::{BestOfSpec, FuzzyConfig, LiteralSpec, PatternSpec, pattern_match};
//!
//! let pattern = PatternSpec::sequence(vec![
//!     LiteralSpec::regex(r"\d+").named("amount").into(),
//!     BestOfSpec::new(["kg", "g", "l"], FuzzyConfig::new(3)).named("unit").into(),
//! ])
//! .build()
//! .unwrap();
//!
//! let matches = pattern_match(&pattern, "12 kilo").unwrap();
//! assert_eq!(matches.get("amount"), Some("12"));
//! assert_eq!(matches.get("unit"), Some("kg"));
//!
//! assert!(pattern_match(&pattern, "twelve kilo").is_none());
//! ```

mod buffer;
pub mod config;
pub mod forms;
mod fuzzy;
mod match_map;
pub mod pattern;
pub mod presets;

pub use buffer::{Cursor, WordBuffer, tokenize};
pub use config::{ConfigError, MatchConfig};
pub use forms::{Form, FormCatalog, FormError, FormRecord, KeywordAttribute};
pub use fuzzy::{EditWeights, FuzzyAlgorithm, FuzzyConfig, weighted_distance};
pub use match_map::MatchMap;
pub use pattern::{
    BestOfSpec, GroupSpec, LiteralSpec, Pattern, PatternError, PatternSpec, match_from, pattern_match,
};
