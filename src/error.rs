use thiserror::Error;

use crate::types::ItemCode;

pub type Result<T> = std::result::Result<T, AssocError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssocError {
    /// The caller referenced an item the active dictionary has never seen.
    #[error("unknown item `{0}`")]
    UnknownItem(String),

    /// A code with no entry in the dictionary. The store and its dictionary
    /// are out of sync, which can only come from a bug in encode or compact.
    #[error("no item behind code {0}: dictionary and rules are out of sync")]
    UnknownCode(ItemCode),

    /// A rule spans more items than the histogram has buckets for.
    #[error("rule spans {len} items but the histogram stops at {max}")]
    RuleTooLong { len: usize, max: usize },

    #[error("no model has been loaded yet")]
    NoActiveModel,

    /// The textual rule source handed us a row we cannot parse.
    #[error("malformed rule row `{0}`")]
    MalformedRow(String),
}
