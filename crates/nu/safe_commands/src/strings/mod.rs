pub(crate) mod column_apply;
mod contains;
mod replace;
mod split_row;
mod trim;

pub use contains::StrContains;
pub use replace::StrReplace;
pub use split_row::SplitRow;
pub use trim::StrTrim;
