//! Search over the entry history.
mod fuzzy;

pub use fuzzy::{filter_entries, fuzzy_score};
