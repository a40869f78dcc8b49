//! Keyed metadata merge
//!
//! Combines two independently sourced collections that describe the same
//! resource set. A resource may end up described by an item only, by a
//! declaration only, or by both. Duplicates are expected: within each source
//! the first record for a key wins.

use indexmap::map::Entry;
use indexmap::IndexMap;

/// Record addressable by a logical resource key
pub trait Keyed {
    fn key(&self) -> &str;
}

/// Case-insensitive form of a key
///
/// Uses full Unicode lowercasing, which folds more than an ordinal ASCII
/// comparison would: KELVIN SIGN (U+212A) and `k` share a key.
pub fn fold_key(key: &str) -> String {
    key.to_lowercase()
}

/// Item and declaration merged under one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedRecord<I, D> {
    /// Key as first seen
    pub key: String,
    pub item: Option<I>,
    pub declaration: Option<D>,
}

/// Merge result in insertion order
#[derive(Debug, Clone)]
pub struct MergedRecords<I, D> {
    records: IndexMap<String, MergedRecord<I, D>>,
}

impl<I, D> MergedRecords<I, D> {
    /// Look up a record, ignoring case
    pub fn get(&self, key: &str) -> Option<&MergedRecord<I, D>> {
        self.records.get(&fold_key(key))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MergedRecord<I, D>> {
        self.records.values()
    }

    pub fn into_records(self) -> Vec<MergedRecord<I, D>> {
        self.records.into_values().collect()
    }
}

impl<I, D> IntoIterator for MergedRecords<I, D> {
    type Item = MergedRecord<I, D>;
    type IntoIter = indexmap::map::IntoValues<String, MergedRecord<I, D>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_values()
    }
}

/// Merge items and declarations by case-insensitive key
///
/// Items are inserted first, then declarations are attached to existing
/// keys or inserted as declaration-only records.
pub fn merge<I, D>(
    items: impl IntoIterator<Item = I>,
    declarations: impl IntoIterator<Item = D>,
) -> MergedRecords<I, D>
where
    I: Keyed,
    D: Keyed,
{
    let mut records: IndexMap<String, MergedRecord<I, D>> = IndexMap::new();

    for item in items {
        match records.entry(fold_key(item.key())) {
            Entry::Vacant(slot) => {
                let key = item.key().to_string();
                slot.insert(MergedRecord {
                    key,
                    item: Some(item),
                    declaration: None,
                });
            }
            Entry::Occupied(mut slot) => {
                let record = slot.get_mut();
                if record.item.is_none() {
                    record.item = Some(item);
                }
            }
        }
    }

    for declaration in declarations {
        match records.entry(fold_key(declaration.key())) {
            Entry::Vacant(slot) => {
                let key = declaration.key().to_string();
                slot.insert(MergedRecord {
                    key,
                    item: None,
                    declaration: Some(declaration),
                });
            }
            Entry::Occupied(mut slot) => {
                let record = slot.get_mut();
                if record.declaration.is_none() {
                    record.declaration = Some(declaration);
                }
            }
        }
    }

    MergedRecords { records }
}
