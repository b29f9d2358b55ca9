use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::MetaValue;

/// The metadata currently describing a page.
///
/// Keys are `<meta>` identities (`description`, `og:title`, ...) plus the special `title` key. Only the
/// entries held directly by the record take part in a reconciliation: a record has no prototype chain, so
/// anything that reaches it went through [`MetadataRecord::admit`] or an explicit insert.
///
/// ```rust
/// use sherby_metadata::MetadataRecord;
///
/// let data = MetadataRecord::new()
///     .with("title", "This is the page title")
///     .with("description", "This is the page description")
///     .with("keywords", "these,are,keywords");
///
/// assert_eq!(data.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataRecord {
    entries: IndexMap<String, MetaValue>,
}

impl MetadataRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit an untyped payload as a record.
    ///
    /// Only plain objects are admitted. Strings, numbers, arrays, `null` and friends are turned away and
    /// yield `None`.
    pub fn admit(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Object(entries) => Some(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), MetaValue::from(value.clone())))
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Add an entry, consuming and returning the record.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<MetaValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert an entry, returning the previous value for the key.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<MetaValue>,
    ) -> Option<MetaValue> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterate over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<MetaValue>> FromIterator<(K, V)> for MetadataRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a MetadataRecord {
    type Item = (&'a String, &'a MetaValue);
    type IntoIter = indexmap::map::Iter<'a, String, MetaValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
