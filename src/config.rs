//! Naming configuration: the active uid style and separator.
//!
//! These two settings are process-wide state with a simple lifecycle: set at
//! session start (or explicitly reassigned), read at every render and
//! comparison. Changing them never mutates an already-constructed [`Uid`],
//! but it changes what rendering and comparing them yields from that point
//! on, so callers must treat previously cached string representations as
//! stale.
//!
//! [`Uid`]: crate::uid::Uid

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::uid::UidStyle;

/// Separator joining uid fields unless configured otherwise.
pub const DEFAULT_SEPARATOR: &str = "_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConfig {
    /// Style selecting which uid fields participate in rendering and
    /// equality. `name` keeps small models intuitive; `qualname` keeps large
    /// models collision-free.
    pub style: UidStyle,
    /// Join token between uid fields. Any string is allowed; a separator
    /// that can occur inside field values makes rendered strings ambiguous
    /// to parse back, which this crate does not attempt.
    pub separator: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            style: UidStyle::Name,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl NamingConfig {
    /// Load from `config/default.toml` with `ESLEX_`-prefixed environment
    /// overrides, falling back to the defaults for anything unset.
    pub fn load() -> Result<Self> {
        let figment = Figment::from(Serialized::defaults(NamingConfig::default()))
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("ESLEX_"));
        Ok(figment.extract()?)
    }
}

static ACTIVE: Lazy<RwLock<NamingConfig>> = Lazy::new(|| RwLock::new(NamingConfig::default()));

/// Snapshot of the active configuration.
pub fn active() -> NamingConfig {
    ACTIVE.read().clone()
}

/// Replace the active configuration wholesale.
pub fn set_active(config: NamingConfig) {
    *ACTIVE.write() = config;
}

/// Switch the active uid style.
pub fn set_style(style: UidStyle) {
    ACTIVE.write().style = style;
}

/// Switch the active uid style from a token, failing on a non-enumerated
/// value at set time rather than at first render.
pub fn set_style_str(token: &str) -> crate::error::Result<()> {
    set_style(UidStyle::parse(token)?);
    Ok(())
}

/// Switch the active separator.
pub fn set_separator(separator: impl Into<String>) {
    ACTIVE.write().separator = separator.into();
}

/// Restore the defaults (`name` style, `_` separator).
pub fn reset() {
    *ACTIVE.write() = NamingConfig::default();
}
