use std::collections::HashSet;

use bitvec::prelude::*;
use rayon::prelude::*;
use tracing::debug;

use crate::error::Result;
use crate::store::RuleStore;
use crate::types::{ItemCode, Support};

/// One entry of a frequent-items result: an implied item and the total
/// support of the rule that implied it. Identity is the item alone; the score
/// only ranks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequentItem {
    pub item: String,
    pub score: Support,
}

impl RuleStore {
    /// Given the set of present items, returns the other items implied by the
    /// loaded rules, ranked by the implying rule's total support.
    ///
    /// A rule contributes when its whole premise is contained in `present`;
    /// each consequence item not already present becomes a candidate scored
    /// with the rule's total support. Candidates are stable-sorted descending
    /// by score and then deduplicated by item, so of two rules implying the
    /// same item only the higher-scored occurrence survives (first-encountered
    /// among equals). Any unknown input item fails the whole query.
    pub fn frequent_items<S: AsRef<str>>(&self, present: &[S]) -> Result<Vec<FrequentItem>> {
        let present_codes = self.translate(present)?;

        let mut mask: BitVec<Lsb0, usize> = BitVec::repeat(false, self.dictionary().len());
        for &code in &present_codes {
            mask.set(code as usize, true);
        }

        let mut candidates: Vec<(Support, ItemCode)> = self
            .rules()
            .par_iter()
            .filter(|rule| rule.premise.iter().all(|&code| contains(&mask, code)))
            .flat_map_iter(|rule| {
                rule.consequence
                    .iter()
                    .filter(|&&code| !contains(&mask, code))
                    .map(move |&code| (rule.total_support, code))
            })
            .collect();

        debug!(
            present = present_codes.len(),
            candidates = candidates.len(),
            "frequent-items scan finished"
        );

        // stable: equal scores keep rule-scan order
        candidates.sort_by(|a, b| b.0.cmp(&a.0));

        let mut seen: HashSet<ItemCode> = HashSet::with_capacity(candidates.len());
        let mut frequent = Vec::new();
        for (score, code) in candidates {
            if seen.insert(code) {
                frequent.push(FrequentItem {
                    item: self.dictionary().item_for(code)?.to_owned(),
                    score,
                });
            }
        }

        Ok(frequent)
    }

    /// Returns every rule whose premise or consequence touches at least one
    /// of `targets`, rendered to its string form, in store order. Unknown
    /// target items fail the query the same way `frequent_items` fails; the
    /// two engines share one policy.
    pub fn related_rules<S: AsRef<str>>(&self, targets: &[S]) -> Result<Vec<String>> {
        let target_codes: HashSet<ItemCode> = self.translate(targets)?.into_iter().collect();

        let related = self
            .rules()
            .par_iter()
            .filter(|rule| target_codes.iter().any(|&code| rule.mentions(code)))
            .map(|rule| rule.render(self.dictionary()))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            targets = target_codes.len(),
            related = related.len(),
            "related-rules scan finished"
        );

        Ok(related)
    }

    fn translate<S: AsRef<str>>(&self, items: &[S]) -> Result<Vec<ItemCode>> {
        items
            .iter()
            .map(|item| self.dictionary().code_for_existing(item.as_ref()))
            .collect()
    }
}

fn contains(mask: &BitSlice<Lsb0, usize>, code: ItemCode) -> bool {
    mask.get(code as usize).map(|bit| *bit).unwrap_or(false)
}
