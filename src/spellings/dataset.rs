//! Serde table format for externally supplied spelling vocabularies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Category;
use crate::error::{Error, Result};

/// External spelling dataset: category -> canonical key -> accepted variants.
///
/// Growing the supported vocabulary is a data update, not a code change: a
/// new third-party schema contributes a table like this, and the registry
/// ingests it at load time. The crate ships its own baseline table in
/// `data/spellings.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpellingTable(BTreeMap<Category, BTreeMap<String, Vec<String>>>);

impl SpellingTable {
    /// Parse a table from TOML text.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|err| Error::Dataset(err.to_string()))
    }

    /// Add (or replace) the variants of one canonical key.
    pub fn insert(&mut self, category: Category, canonical: impl Into<String>, variants: Vec<String>) {
        self.0
            .entry(category)
            .or_default()
            .insert(canonical.into(), variants);
    }

    /// Iterate categories with their canonical-key-to-variants maps.
    pub fn entries(&self) -> impl Iterator<Item = (Category, &BTreeMap<String, Vec<String>>)> + '_ {
        self.0.iter().map(|(category, keys)| (*category, keys))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
