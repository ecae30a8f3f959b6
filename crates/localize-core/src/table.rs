use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};

use crate::{Language, index_of};

/// Single-language projection of a [`Translations`] table.
pub type FlatTable = BTreeMap<String, String>;

/// Key to per-language values, parallel to the registered language list.
///
/// Slot `i` of every entry belongs to the `i`-th registered language; `None`
/// marks an untranslated slot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Translations {
    entries: BTreeMap<String, Vec<Option<String>>>,
}

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        key: impl Into<String>,
        values: Vec<Option<String>>,
    ) -> Option<Vec<Option<String>>> {
        self.entries.insert(key.into(), values)
    }

    pub fn get(&self, key: &str) -> Option<&[Option<String>]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Vec<Option<String>>> {
        self.entries.get_mut(key)
    }

    /// Slot for `key`, created with `width` empty values when absent.
    pub fn slots_mut(&mut self, key: &str, width: usize) -> &mut Vec<Option<String>> {
        self.entries
            .entry(key.to_string())
            .or_insert_with(|| vec![None; width])
    }

    /// Value of `key` at language `index`, if translated.
    pub fn value(&self, key: &str, index: usize) -> Option<&str> {
        self.entries
            .get(key)
            .and_then(|values| values.get(index))
            .and_then(Option::as_deref)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<Option<String>>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merges `other` over `self`; keys present in both take `other`'s values.
    pub fn merge(&mut self, other: Translations) {
        self.entries.extend(other.entries);
    }
}

impl FromIterator<(String, Vec<Option<String>>)> for Translations {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Option<String>>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Translations {
    type Item = (&'a String, &'a Vec<Option<String>>);
    type IntoIter = btree_map::Iter<'a, String, Vec<Option<String>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Projects `table` onto the active language.
///
/// Without an active language the result is empty. A language that is not
/// registered, or a slot beyond the end of an entry, leaves that key out.
pub fn flatten(
    active: Option<&Language>,
    languages: &[Language],
    table: &Translations,
) -> FlatTable {
    let Some(active) = active else {
        return FlatTable::new();
    };
    let Some(index) = index_of(&active.code, languages) else {
        return FlatTable::new();
    };
    table
        .iter()
        .filter_map(|(key, values)| {
            values
                .get(index)
                .and_then(Option::as_ref)
                .map(|value| (key.clone(), value.clone()))
        })
        .collect()
}
