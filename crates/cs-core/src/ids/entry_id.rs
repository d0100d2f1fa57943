use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Opaque identifier of a clipboard history entry.
///
/// Assigned once when the entry is created and never reassigned, even when
/// the entry's content is edited or backfilled by OCR.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryId(String);

impl_id!(EntryId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_unique() {
        let a = EntryId::new();
        let b = EntryId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_from_str_round_trips_display() {
        let id = EntryId::from("entry-1");
        assert_eq!(id.to_string(), "entry-1");
        assert_eq!(id.as_str(), "entry-1");
    }
}
