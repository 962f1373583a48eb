use std::collections::HashMap;

use tracing::debug;

use crate::rules::rule::EncodedRule;
use crate::types::Itemset;

/// Merges rules that share an identical premise into one rule per premise.
///
/// The merged consequence is the union of the members' consequences; all
/// three support figures, premise support included, take the minimum across
/// members. Output order follows the first occurrence of each premise in the
/// input.
pub fn compact(rules: &[EncodedRule]) -> Vec<EncodedRule> {
    let mut group_of: HashMap<&Itemset, usize> = HashMap::new();
    let mut merged: Vec<EncodedRule> = Vec::new();

    for rule in rules {
        match group_of.get(&rule.premise) {
            Some(&index) => {
                let group = &mut merged[index];
                for &code in &rule.consequence {
                    if group.consequence.binary_search(&code).is_err() {
                        // keep the consequence sorted so it stays a canonical set
                        let at = group.consequence.partition_point(|&c| c < code);
                        group.consequence.insert(at, code);
                    }
                }
                group.premise_support = group.premise_support.min(rule.premise_support);
                group.consequence_support =
                    group.consequence_support.min(rule.consequence_support);
                group.total_support = group.total_support.min(rule.total_support);
            }
            None => {
                group_of.insert(&rule.premise, merged.len());
                merged.push(rule.clone());
            }
        }
    }

    debug!(
        before = rules.len(),
        after = merged.len(),
        "compacted rules by premise"
    );

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashmap;

    fn rule(premise: Itemset, consequence: Itemset, supports: (u32, u32, u32)) -> EncodedRule {
        EncodedRule::new(premise, consequence, supports.0, supports.1, supports.2)
    }

    #[test]
    fn consequences_group_under_their_premise() {
        let rules = vec![
            rule(vec![0], vec![1], (5, 5, 5)),
            rule(vec![2], vec![3], (4, 4, 4)),
            rule(vec![0], vec![4], (3, 3, 3)),
        ];
        let merged: HashMap<Itemset, Itemset> = compact(&rules)
            .into_iter()
            .map(|rule| (rule.premise, rule.consequence))
            .collect();

        assert_eq!(
            merged,
            hashmap! {
                vec![0] => vec![1, 4],
                vec![2] => vec![3],
            }
        );
    }

    #[test]
    fn merges_shared_premises_with_minimum_supports() {
        let rules = vec![
            rule(vec![0], vec![1], (20, 12, 10)),
            rule(vec![0], vec![2], (20, 8, 5)),
        ];
        let merged = compact(&rules);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].premise, vec![0]);
        assert_eq!(merged[0].consequence, vec![1, 2]);
        assert_eq!(merged[0].premise_support, 20);
        assert_eq!(merged[0].consequence_support, 8);
        assert_eq!(merged[0].total_support, 5);
    }

    #[test]
    fn premise_equality_ignores_input_order() {
        let rules = vec![
            rule(vec![1, 0], vec![2], (9, 9, 9)),
            rule(vec![0, 1], vec![3], (7, 7, 7)),
        ];
        let merged = compact(&rules);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].consequence, vec![2, 3]);
        assert_eq!(merged[0].total_support, 7);
    }

    #[test]
    fn distinct_premises_stay_apart_in_first_seen_order() {
        let rules = vec![
            rule(vec![3], vec![4], (1, 1, 1)),
            rule(vec![0], vec![1], (2, 2, 2)),
            rule(vec![3], vec![5], (3, 3, 3)),
        ];
        let merged = compact(&rules);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].premise, vec![3]);
        assert_eq!(merged[0].consequence, vec![4, 5]);
        assert_eq!(merged[1].premise, vec![0]);
    }

    #[test]
    fn consequence_union_collapses_duplicates() {
        let rules = vec![
            rule(vec![0], vec![1, 2], (5, 5, 5)),
            rule(vec![0], vec![2, 3], (5, 5, 5)),
        ];
        let merged = compact(&rules);

        assert_eq!(merged[0].consequence, vec![1, 2, 3]);
    }

    #[test]
    fn supports_never_exceed_any_contributor() {
        let rules = vec![
            rule(vec![0, 1], vec![2], (30, 25, 18)),
            rule(vec![0, 1], vec![3], (28, 31, 11)),
            rule(vec![0, 1], vec![4], (33, 16, 26)),
        ];
        let merged = compact(&rules);

        assert_eq!(merged.len(), 1);
        for contributor in &rules {
            assert!(merged[0].premise_support <= contributor.premise_support);
            assert!(merged[0].consequence_support <= contributor.consequence_support);
            assert!(merged[0].total_support <= contributor.total_support);
        }
    }

    #[test]
    fn compacting_nothing_is_nothing() {
        assert!(compact(&[]).is_empty());
    }
}
