//! Canonical-key resolution across third-party schema vocabularies.
//!
//! Every supported optimization back-end spells the same concepts its own
//! way: one schema says `variable_cost`, another `opex_var`, the internal
//! model says `flow_costs`. The [`SpellingRegistry`] maps that open variant
//! vocabulary onto one canonical key set, partitioned into disjoint
//! [`Category`] namespaces so the same string can mean different things in
//! different contexts (`electricity` is a carrier in one namespace and a
//! spelling of the `power` sector in another).

mod dataset;

pub use dataset::SpellingTable;

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, trace};

use crate::error::{Error, Result};

/// Separator characters stripped from queries before lookup.
///
/// Normalizing before lookup keeps the variant tables an order of magnitude
/// smaller: `variable_cost`, `Variable-Cost` and `variablecost` all hit the
/// same entry, so a new schema only contributes its semantically distinct
/// spellings, not every casing and separator permutation.
pub const DEFAULT_SEPARATORS: &[char] = &['_', '-', ' '];

/// Indexed slots expanded per series-valued parameter key (`input_0` ..).
pub const DEFAULT_SERIES_SLOTS: usize = 10;

const BUILTIN_TABLE: &str = include_str!("../../data/spellings.toml");

/// The disjoint spelling namespaces.
///
/// A variant spelling resolves independently per category: within one
/// category the variant-to-canonical mapping is a total function, across
/// categories the same variant may name different canonical keys.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Category {
    /// Optimization back-end identifiers (oemof, pypsa, fine, calliope).
    Model,
    /// Uid field names as they appear in external data (name, lat, zone, ...).
    UidComponent,
    /// Time series and time index keys.
    Timeseries,
    /// Model-wide constraint keys.
    GlobalConstraint,
    /// Singular-valued energy system parameters, including the
    /// inflow/outflow-separated ones.
    SingularParameter,
    /// Series-valued parameters, expanded into indexed slots at load time.
    SeriesParameter,
    /// Energy system component types (bus, source, sink, ...).
    ComponentType,
    /// Energy carrier identifiers.
    Carrier,
    /// Sector identifiers.
    Sector,
    /// Descriptive component labels (photovoltaic, backup, ...).
    Label,
}

/// Process-wide table mapping variant spellings to canonical keys.
///
/// Populated once from a [`SpellingTable`] and read-only afterwards, so
/// unsynchronized concurrent reads are safe.
#[derive(Debug, Clone)]
pub struct SpellingRegistry {
    separators: Vec<char>,
    /// category -> normalized variant -> canonical key
    lookup: HashMap<Category, HashMap<String, String>>,
    /// category -> canonical key -> variants in registration order
    variants: HashMap<Category, HashMap<String, Vec<String>>>,
}

impl Default for SpellingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SpellingRegistry {
    /// An empty registry with the default separator set.
    pub fn new() -> Self {
        Self::with_separators(DEFAULT_SEPARATORS)
    }

    /// An empty registry normalizing with a custom separator character set.
    pub fn with_separators(separators: &[char]) -> Self {
        Self {
            separators: separators.to_vec(),
            lookup: HashMap::new(),
            variants: HashMap::new(),
        }
    }

    /// Build a registry from an externally supplied spelling table.
    ///
    /// Series-valued parameter keys are expanded into
    /// [`DEFAULT_SERIES_SLOTS`] indexed slots.
    pub fn from_table(table: &SpellingTable) -> Result<Self> {
        Self::from_table_with_slots(table, DEFAULT_SERIES_SLOTS)
    }

    /// Like [`Self::from_table`] with an explicit series slot count.
    pub fn from_table_with_slots(table: &SpellingTable, slots: usize) -> Result<Self> {
        let mut registry = Self::new();
        for (category, keys) in table.entries() {
            for (canonical, variants) in keys {
                if category == Category::SeriesParameter {
                    for slot in 0..slots {
                        let indexed = format!("{canonical}_{slot}");
                        let indexed_variants: Vec<String> =
                            variants.iter().map(|v| format!("{v}_{slot}")).collect();
                        registry.register(category, &indexed, indexed_variants)?;
                    }
                } else {
                    registry.register(category, canonical, variants.iter().cloned())?;
                }
            }
        }
        Ok(registry)
    }

    /// The registry built from the vocabulary shipped with this crate.
    ///
    /// Built once per process; the embedded table is validated by the test
    /// suite, so loading it cannot fail at runtime.
    pub fn builtin() -> &'static SpellingRegistry {
        static BUILTIN: Lazy<SpellingRegistry> = Lazy::new(|| {
            let table = SpellingTable::from_toml_str(BUILTIN_TABLE)
                .expect("embedded spelling table parses");
            SpellingRegistry::from_table(&table).expect("embedded spelling table is unambiguous")
        });
        &BUILTIN
    }

    /// Register a canonical key and its accepted variant spellings.
    ///
    /// The canonical key always resolves to itself, whether or not it is
    /// listed among the variants. Registration fails if any variant's
    /// normalized form already resolves to a different canonical key in the
    /// same category.
    pub fn register<I, S>(&mut self, category: Category, canonical: &str, variants: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(category, canonical, canonical)?;
        for variant in variants {
            self.insert(category, canonical, &variant.into())?;
        }
        Ok(())
    }

    /// Resolve a query string to the canonical key it spells in `category`.
    ///
    /// The query is normalized (case-folded, separator characters stripped)
    /// before lookup. An unmatched query is a hard error, never a guess.
    pub fn resolve(&self, category: Category, query: &str) -> Result<&str> {
        let normalized = self.normalize(query);
        match self
            .lookup
            .get(&category)
            .and_then(|table| table.get(&normalized))
        {
            Some(canonical) => {
                trace!(%category, query, %canonical, "resolved spelling");
                Ok(canonical)
            }
            None => {
                debug!(%category, query, "no registered spelling matched");
                Err(Error::UnknownSpelling {
                    category,
                    query: query.to_string(),
                })
            }
        }
    }

    /// The fixed list of spelling namespaces.
    pub fn categories(&self) -> impl Iterator<Item = Category> {
        Category::iter()
    }

    /// Registered spellings of a canonical key, in registration order.
    ///
    /// Supports introspection and tests; resolution never needs it.
    pub fn variants_of(&self, category: Category, canonical: &str) -> Option<&[String]> {
        self.variants
            .get(&category)?
            .get(canonical)
            .map(Vec::as_slice)
    }

    /// Find the first of `keys` that spells `canonical` in `category`.
    ///
    /// This is the design-case workflow of the translation layer: a caller
    /// holds a map keyed in whatever spelling a source schema used and asks
    /// which of its literal keys means, say, `flow_costs`.
    pub fn match_key<'a, I>(&self, category: Category, canonical: &str, keys: I) -> Option<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        keys.into_iter().find(|key| {
            self.lookup
                .get(&category)
                .and_then(|table| table.get(&self.normalize(key)))
                .is_some_and(|resolved| resolved == canonical)
        })
    }

    /// Look up the value stored under whichever spelling of `canonical` the
    /// map used, if any.
    pub fn value_from<'a, V>(
        &self,
        category: Category,
        canonical: &str,
        map: &'a HashMap<String, V>,
    ) -> Option<&'a V> {
        let key = self.match_key(category, canonical, map.keys().map(String::as_str))?;
        map.get(key)
    }

    fn insert(&mut self, category: Category, canonical: &str, variant: &str) -> Result<()> {
        let normalized = self.normalize(variant);
        let table = self.lookup.entry(category).or_default();
        match table.get(&normalized) {
            Some(existing) if existing != canonical => Err(Error::AmbiguousSpelling {
                category,
                variant: variant.to_string(),
                existing: existing.clone(),
                conflicting: canonical.to_string(),
            }),
            // Same mapping spelled twice (or differing only in separators);
            // the first registered literal form is kept.
            Some(_) => Ok(()),
            None => {
                table.insert(normalized, canonical.to_string());
                self.variants
                    .entry(category)
                    .or_default()
                    .entry(canonical.to_string())
                    .or_default()
                    .push(variant.to_string());
                Ok(())
            }
        }
    }

    fn normalize(&self, raw: &str) -> String {
        raw.chars()
            .filter(|c| !self.separators.contains(c))
            .flat_map(char::to_lowercase)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> SpellingRegistry {
        let mut registry = SpellingRegistry::new();
        registry
            .register(
                Category::SingularParameter,
                "flow_costs",
                ["variable_cost", "flow_costs", "opex_var"],
            )
            .unwrap();
        registry
            .register(Category::Carrier, "electricity", ["electrical", "current"])
            .unwrap();
        registry
            .register(Category::Sector, "power", ["electrical", "electricity"])
            .unwrap();
        registry
    }

    #[test]
    fn test_resolve_is_case_and_separator_invariant() {
        let registry = registry();
        for query in [
            "flow_costs",
            "variable_cost",
            "Variable-Cost",
            "variablecost",
            "VARIABLE COST",
            "opex_var",
            "Opex-Var",
        ] {
            assert_eq!(
                registry
                    .resolve(Category::SingularParameter, query)
                    .unwrap(),
                "flow_costs",
                "query {query:?} should resolve"
            );
        }
    }

    #[test]
    fn test_unknown_spelling_is_a_hard_error() {
        let registry = registry();
        let err = registry
            .resolve(Category::SingularParameter, "totally_unknown_token")
            .unwrap_err();
        match err {
            Error::UnknownSpelling { category, query } => {
                assert_eq!(category, Category::SingularParameter);
                assert_eq!(query, "totally_unknown_token");
            }
            other => panic!("expected UnknownSpelling, got {other:?}"),
        }
    }

    #[test]
    fn test_categories_are_disjoint_namespaces() {
        let registry = registry();
        assert_eq!(
            registry.resolve(Category::Carrier, "electrical").unwrap(),
            "electricity"
        );
        assert_eq!(
            registry.resolve(Category::Sector, "electrical").unwrap(),
            "power"
        );
        // Registered in Carrier and Sector only, not as a parameter.
        assert!(registry
            .resolve(Category::SingularParameter, "electrical")
            .is_err());
    }

    #[test]
    fn test_variants_preserve_registration_order() {
        let registry = registry();
        let variants = registry
            .variants_of(Category::SingularParameter, "flow_costs")
            .unwrap();
        // Canonical first (auto-registered), then the listed variants with
        // the separator-duplicate "flow_costs" skipped.
        assert_eq!(variants, ["flow_costs", "variable_cost", "opex_var"]);
    }

    #[test]
    fn test_ambiguous_registration_is_rejected() {
        let mut registry = registry();
        let err = registry
            .register(Category::SingularParameter, "expansion_costs", ["opex_var"])
            .unwrap_err();
        assert!(matches!(err, Error::AmbiguousSpelling { .. }));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let registry = registry();
        let first = registry
            .resolve(Category::SingularParameter, "Variable-Cost")
            .unwrap()
            .to_string();
        let second = registry
            .resolve(Category::SingularParameter, "Variable-Cost")
            .unwrap()
            .to_string();
        assert_eq!(first, second);
    }

    #[test]
    fn test_match_key_returns_the_callers_literal_key() {
        let registry = registry();
        let source_keys = ["Installed Capacity", "Variable-Cost", "CO2"];
        assert_eq!(
            registry.match_key(Category::SingularParameter, "flow_costs", source_keys),
            Some("Variable-Cost")
        );
        assert_eq!(
            registry.match_key(Category::SingularParameter, "emissions", source_keys),
            None
        );
    }

    #[test]
    fn test_value_from_resolves_map_keys() {
        let registry = registry();
        let mut data = HashMap::new();
        data.insert("Variable-Cost".to_string(), 42.0);
        data.insert("unrelated".to_string(), 0.0);
        assert_eq!(
            registry.value_from(Category::SingularParameter, "flow_costs", &data),
            Some(&42.0)
        );
        assert_eq!(
            registry.value_from(Category::SingularParameter, "emissions", &data),
            None
        );
    }

    #[test]
    fn test_custom_separator_set() {
        let mut registry = SpellingRegistry::with_separators(&['.', '/']);
        registry
            .register(Category::Timeseries, "timeindex", ["time.index"])
            .unwrap();
        assert_eq!(
            registry.resolve(Category::Timeseries, "Time/Index").unwrap(),
            "timeindex"
        );
        // '_' is not a separator here, so the underscore form is unknown.
        assert!(registry
            .resolve(Category::Timeseries, "time_index")
            .is_err());
    }

    #[test]
    fn test_series_expansion() {
        let mut table = SpellingTable::default();
        table.insert(
            Category::SeriesParameter,
            "input",
            vec!["in".to_string(), "incoming".to_string()],
        );
        let registry = SpellingRegistry::from_table_with_slots(&table, 3).unwrap();
        assert_eq!(
            registry
                .resolve(Category::SeriesParameter, "in_2")
                .unwrap(),
            "input_2"
        );
        assert_eq!(
            registry
                .resolve(Category::SeriesParameter, "Incoming 0")
                .unwrap(),
            "input_0"
        );
        // Slot 3 was never expanded.
        assert!(registry.resolve(Category::SeriesParameter, "in_3").is_err());
    }

    #[test]
    fn test_builtin_registry_loads() {
        let registry = SpellingRegistry::builtin();
        assert_eq!(
            registry
                .resolve(Category::SingularParameter, "Variable-Cost")
                .unwrap(),
            "flow_costs"
        );
        assert_eq!(registry.resolve(Category::Model, "PyPSA").unwrap(), "pypsa");
        assert_eq!(
            registry.resolve(Category::UidComponent, "Zone").unwrap(),
            "region"
        );
    }

    #[test]
    fn test_builtin_canonical_keys_resolve_to_themselves() {
        let registry = SpellingRegistry::builtin();
        for category in registry.categories() {
            let Some(keys) = registry.variants.get(&category) else {
                continue;
            };
            for canonical in keys.keys() {
                assert_eq!(
                    registry.resolve(category, canonical).unwrap(),
                    canonical,
                    "canonical key {canonical:?} in {category} must resolve to itself"
                );
            }
        }
    }

    #[test]
    fn test_category_display_and_parse() {
        use std::str::FromStr;

        assert_eq!(Category::UidComponent.to_string(), "uid-component");
        assert_eq!(
            Category::from_str("global-constraint").unwrap(),
            Category::GlobalConstraint
        );
        assert!(Category::from_str("flow-parameters").is_err());
    }
}
