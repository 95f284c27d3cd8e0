//! Prefix scan results

use serde::Serialize;

/// One row of a prefix scan: the latest live record of one field.
///
/// Ordering is lexicographic by key, then field, then record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ScanEntry {
    pub key: String,
    pub field: String,
    pub record: String,
}

impl ScanEntry {
    pub fn new(key: impl Into<String>, field: impl Into<String>, record: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            field: field.into(),
            record: record.into(),
        }
    }
}

impl From<ScanEntry> for (String, String, String) {
    fn from(entry: ScanEntry) -> Self {
        (entry.key, entry.field, entry.record)
    }
}

impl<K, F, R> PartialEq<(K, F, R)> for ScanEntry
where
    K: AsRef<str>,
    F: AsRef<str>,
    R: AsRef<str>,
{
    fn eq(&self, other: &(K, F, R)) -> bool {
        self.key == other.0.as_ref()
            && self.field == other.1.as_ref()
            && self.record == other.2.as_ref()
    }
}
