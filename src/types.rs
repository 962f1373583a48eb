use std::collections::HashMap;

pub type ItemCode = u32;
pub type ItemName = String;
pub type Support = u32;

/// Sorted, deduplicated vector of codes. Canonical set representation for
/// premises and consequences.
pub type Itemset = Vec<ItemCode>;

pub type CodeLookup = HashMap<ItemName, ItemCode>;
pub type NameLookup = HashMap<ItemCode, ItemName>;
