use crate::error::{AssocError, Result};
use crate::types::{CodeLookup, ItemCode, NameLookup};

/// Bidirectional mapping between string item identifiers and dense codes.
///
/// Codes start at 0 and are handed out in first-seen order, so every
/// downstream structure can index by code. The two maps stay bijective: an
/// entry is always inserted into both or neither. A dictionary belongs to
/// exactly one loaded model and is replaced wholesale with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDictionary {
    code_of: CodeLookup,
    item_of: NameLookup,
}

impl ItemDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a dictionary from an authoritative, order-significant catalogue:
    /// `items[i]` gets code `i`.
    pub fn from_catalogue<I>(items: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut dictionary = Self::new();
        for item in items {
            dictionary.code_for_insert(&item);
        }
        dictionary
    }

    /// Looks up an item that must already be known, as when translating a
    /// query's input set against the loaded model.
    pub fn code_for_existing(&self, item: &str) -> Result<ItemCode> {
        self.code_of
            .get(item)
            .copied()
            .ok_or_else(|| AssocError::UnknownItem(item.to_owned()))
    }

    /// Returns the existing code for `item` or allocates the next one. Used
    /// while encoding rules from a source that carries no item catalogue.
    pub fn code_for_insert(&mut self, item: &str) -> ItemCode {
        if let Some(&code) = self.code_of.get(item) {
            return code;
        }
        let code = self.code_of.len() as ItemCode;
        self.code_of.insert(item.to_owned(), code);
        self.item_of.insert(code, item.to_owned());
        code
    }

    pub fn item_for(&self, code: ItemCode) -> Result<&str> {
        self.item_of
            .get(&code)
            .map(String::as_str)
            .ok_or(AssocError::UnknownCode(code))
    }

    pub fn len(&self) -> usize {
        self.code_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code_of.is_empty()
    }
}
