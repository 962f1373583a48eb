use std::fmt::{self, Display, Formatter};

use itertools::Itertools;

use crate::dictionary::ItemDictionary;
use crate::error::Result;
use crate::types::{ItemCode, Itemset, Support};

/// An association rule with both sides translated to dense item codes.
///
/// Premise and consequence are kept as sorted, deduplicated code vectors.
/// Rules are immutable once built; compaction produces new rules instead of
/// mutating the inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedRule {
    pub premise: Itemset,
    pub consequence: Itemset,
    pub premise_support: Support,
    pub consequence_support: Support,
    pub total_support: Support,
}

impl EncodedRule {
    pub fn new(
        mut premise: Itemset,
        mut consequence: Itemset,
        premise_support: Support,
        consequence_support: Support,
        total_support: Support,
    ) -> Self {
        premise.sort_unstable();
        premise.dedup();
        consequence.sort_unstable();
        consequence.dedup();
        Self {
            premise,
            consequence,
            premise_support,
            consequence_support,
            total_support,
        }
    }

    /// Combined premise + consequence size, the length the histogram buckets
    /// rules by.
    pub fn len(&self) -> usize {
        self.premise.len() + self.consequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.premise.is_empty() && self.consequence.is_empty()
    }

    pub fn mentions(&self, code: ItemCode) -> bool {
        self.premise.binary_search(&code).is_ok() || self.consequence.binary_search(&code).is_ok()
    }

    /// Renders the rule back to strings through `dictionary`:
    /// `"a,b -> c,d <premise_support> <consequence_support> <total_support>"`.
    pub fn render(&self, dictionary: &ItemDictionary) -> Result<String> {
        Ok(self.decode(dictionary)?.to_string())
    }

    /// Translates both sides back to item names. Fails with `UnknownCode` if
    /// the dictionary does not cover the rule, which means a corrupted or
    /// partial load.
    pub fn decode(&self, dictionary: &ItemDictionary) -> Result<StringRule> {
        let premise = self
            .premise
            .iter()
            .map(|&code| dictionary.item_for(code).map(str::to_owned))
            .collect::<Result<Vec<_>>>()?;
        let consequence = self
            .consequence
            .iter()
            .map(|&code| dictionary.item_for(code).map(str::to_owned))
            .collect::<Result<Vec<_>>>()?;
        Ok(StringRule {
            premise,
            consequence,
            premise_support: self.premise_support,
            consequence_support: self.consequence_support,
            total_support: self.total_support,
        })
    }
}

/// The all-strings form of a rule, used by the portable export path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringRule {
    pub premise: Vec<String>,
    pub consequence: Vec<String>,
    pub premise_support: Support,
    pub consequence_support: Support,
    pub total_support: Support,
}

impl Display for StringRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} {} {} {}",
            self.premise.iter().join(","),
            self.consequence.iter().join(","),
            self.premise_support,
            self.consequence_support,
            self.total_support,
        )
    }
}
