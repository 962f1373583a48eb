use crate::dictionary::ItemDictionary;
use crate::error::{AssocError, Result};
use crate::rules::rule::EncodedRule;

/// Bucket range of `analyse`: combined rule lengths 1 through 60.
pub const HISTOGRAM_BUCKETS: usize = 60;

/// The in-memory collection of encoded rules together with the dictionary
/// they were encoded against. Queries resolve item names only through this
/// dictionary; stores and dictionaries from different model loads are never
/// mixed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleStore {
    rules: Vec<EncodedRule>,
    dictionary: ItemDictionary,
}

impl RuleStore {
    pub fn new(rules: Vec<EncodedRule>, dictionary: ItemDictionary) -> Self {
        Self { rules, dictionary }
    }

    pub fn rules(&self) -> &[EncodedRule] {
        &self.rules
    }

    pub fn dictionary(&self) -> &ItemDictionary {
        &self.dictionary
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Counts loaded rules per combined premise+consequence length. Bucket
    /// `i` holds the number of rules of length `i + 1`. A rule outside
    /// `1..=HISTOGRAM_BUCKETS` aborts with `RuleTooLong` instead of running
    /// off the bucket array.
    pub fn analyse(&self) -> Result<Vec<u32>> {
        let mut buckets = vec![0u32; HISTOGRAM_BUCKETS];
        for rule in &self.rules {
            let len = rule.len();
            if len < 1 || len > HISTOGRAM_BUCKETS {
                return Err(AssocError::RuleTooLong {
                    len,
                    max: HISTOGRAM_BUCKETS,
                });
            }
            buckets[len - 1] += 1;
        }
        Ok(buckets)
    }
}
