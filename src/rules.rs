pub mod compact;
pub mod encode;
pub mod rule;

pub use self::compact::compact;
pub use self::encode::{encode, encode_all, RawRule};
pub use self::rule::{EncodedRule, StringRule};
