use thiserror::Error;

use crate::spellings::Category;

pub type Result<T> = std::result::Result<T, Error>;

/// Error types surfaced by the lexicon core.
///
/// Every operation in this crate is pure and deterministic, so none of these
/// are worth retrying: the remedy is always caller-side (fix the spelling
/// table entry, the query, or the configuration value).
#[derive(Debug, Error)]
pub enum Error {
    /// A query string matched no registered variant in the given category.
    ///
    /// This is a hard failure on purpose. Silently guessing the wrong
    /// canonical key would corrupt the internal model, so there is no fuzzy
    /// fallback and no best-effort match.
    #[error("no spelling registered for {query:?} in category '{category}'")]
    UnknownSpelling { category: Category, query: String },

    /// A variant registration collided with a different canonical key in the
    /// same category. Rejected at table load time so the variant-to-canonical
    /// mapping stays a total function per category.
    #[error(
        "variant {variant:?} in category '{category}' already resolves to \
         {existing:?}, cannot remap to {conflicting:?}"
    )]
    AmbiguousSpelling {
        category: Category,
        variant: String,
        existing: String,
        conflicting: String,
    },

    /// Uid construction was attempted with a blank mandatory name.
    #[error("uid name must be a non-empty string")]
    EmptyName,

    /// A style token did not name one of the enumerated uid styles.
    #[error("unknown uid style: {0:?}")]
    UnknownStyle(String),

    /// A category token did not name one of the enumerated namespaces.
    #[error("unknown spelling category: {0:?}")]
    UnknownCategory(String),

    /// A spelling table could not be parsed.
    #[error("malformed spelling table: {0}")]
    Dataset(String),
}
