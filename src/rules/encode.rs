use crate::dictionary::ItemDictionary;
use crate::error::{AssocError, Result};
use crate::rules::rule::EncodedRule;
use crate::types::{Itemset, Support};

/// A rule as delivered by a collaborator, before dictionary encoding.
///
/// Both the mining engine and the textual serialization are adapted into this
/// one shape, so the encoder never has to care where a rule came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRule {
    pub premise: Vec<String>,
    pub consequence: Vec<String>,
    pub premise_support: Support,
    pub consequence_support: Support,
    pub total_support: Support,
}

impl RawRule {
    /// Adapts a rule coming straight from the mining engine. Mined item
    /// strings encode `attribute=value` pairs; only the attribute name
    /// identifies the item, so a trailing `=value` suffix is stripped.
    pub fn from_mined<S: AsRef<str>>(
        premise: &[S],
        consequence: &[S],
        premise_support: Support,
        consequence_support: Support,
        total_support: Support,
    ) -> Self {
        let strip = |items: &[S]| {
            items
                .iter()
                .map(|item| item.as_ref().split('=').next().unwrap_or("").to_owned())
                .collect()
        };
        Self {
            premise: strip(premise),
            consequence: strip(consequence),
            premise_support,
            consequence_support,
            total_support,
        }
    }

    /// Adapts a grouped row from a serialized rule source: premise and
    /// consequence arrive as comma-separated item lists.
    pub fn from_row(
        premise: &str,
        consequence: &str,
        premise_support: Support,
        consequence_support: Support,
        total_support: Support,
    ) -> Self {
        Self {
            premise: split_items(premise),
            consequence: split_items(consequence),
            premise_support,
            consequence_support,
            total_support,
        }
    }

    /// Parses the portable text rendering,
    /// `"a,b -> c,d <presup> <consup> <totsup>"`, the format `StringRule`
    /// prints. Round-trips with the export path.
    pub fn parse(line: &str) -> Result<Self> {
        let malformed = || AssocError::MalformedRow(line.to_owned());

        let (premise, rest) = line.split_once(" -> ").ok_or_else(malformed)?;
        let mut tail = rest.split_whitespace();
        let consequence = tail.next().ok_or_else(malformed)?;
        let support = |field: Option<&str>| -> Result<Support> {
            field
                .and_then(|s| s.parse().ok())
                .ok_or_else(malformed)
        };
        let premise_support = support(tail.next())?;
        let consequence_support = support(tail.next())?;
        let total_support = support(tail.next())?;
        if tail.next().is_some() {
            return Err(malformed());
        }

        Ok(Self::from_row(
            premise,
            consequence,
            premise_support,
            consequence_support,
            total_support,
        ))
    }
}

fn split_items(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Translates a raw rule through the dictionary. With `insert_unknown` the
/// dictionary grows on demand (native source, no prior catalogue); without it
/// an unseen item is an `UnknownItem` error (pre-built catalogue).
pub fn encode(
    raw: &RawRule,
    dictionary: &mut ItemDictionary,
    insert_unknown: bool,
) -> Result<EncodedRule> {
    let premise = encode_side(&raw.premise, dictionary, insert_unknown)?;
    let consequence = encode_side(&raw.consequence, dictionary, insert_unknown)?;
    Ok(EncodedRule::new(
        premise,
        consequence,
        raw.premise_support,
        raw.consequence_support,
        raw.total_support,
    ))
}

pub fn encode_all(
    raws: &[RawRule],
    dictionary: &mut ItemDictionary,
    insert_unknown: bool,
) -> Result<Vec<EncodedRule>> {
    raws.iter()
        .map(|raw| encode(raw, dictionary, insert_unknown))
        .collect()
}

fn encode_side(
    items: &[String],
    dictionary: &mut ItemDictionary,
    insert_unknown: bool,
) -> Result<Itemset> {
    items
        .iter()
        .map(|item| {
            if insert_unknown {
                Ok(dictionary.code_for_insert(item))
            } else {
                dictionary.code_for_existing(item)
            }
        })
        .collect()
}
