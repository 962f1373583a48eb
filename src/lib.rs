//! Compact in-memory engine for association rules.
//!
//! Raw rules from a mining engine or a serialized source are encoded against
//! a dense item dictionary, optionally merged by premise, and served through
//! an atomically swappable model snapshot that answers frequent-item and
//! related-rule queries.

pub mod dictionary;
pub mod error;
pub mod model;
pub mod query;
pub mod rules;
pub mod store;
pub mod types;

pub use dictionary::ItemDictionary;
pub use error::{AssocError, Result};
pub use model::{ActiveModel, Model};
pub use query::FrequentItem;
pub use rules::{compact, encode, encode_all, EncodedRule, RawRule, StringRule};
pub use store::{RuleStore, HISTOGRAM_BUCKETS};
