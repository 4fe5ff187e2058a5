//! Composite component identity with style-relative rendering and equality.
//!
//! Every modeled component owns one [`Uid`]. Which of its fields participate
//! in string rendering and in equality is not a property of the value but of
//! the [`UidStyle`] the comparison runs under: the same fully-detailed
//! component set can be unique-by-name in a small model and
//! unique-by-full-detail in a large one, without reconstructing anything.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The fields a [`Uid`] is composed of, in record order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UidField {
    Name,
    Latitude,
    Longitude,
    Region,
    Sector,
    Carrier,
    Component,
    NodeType,
}

/// Named subset of uid fields used for rendering and equality.
///
/// `name` is always included and always first. [`UidStyle::Qualname`] is the
/// union of all fields in record order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UidStyle {
    Name,
    Qualname,
    Coords,
    Region,
    Sector,
    Carrier,
    Component,
    NodeType,
}

impl UidStyle {
    /// The ordered field projection this style selects.
    ///
    /// Adding a new optional field means adding it to the [`Uid`] record and
    /// to whichever projections should include it; nothing else changes.
    pub fn fields(self) -> &'static [UidField] {
        use UidField::*;
        match self {
            UidStyle::Name => &[Name],
            UidStyle::Qualname => &[
                Name, Latitude, Longitude, Region, Sector, Carrier, Component, NodeType,
            ],
            UidStyle::Coords => &[Name, Latitude, Longitude],
            UidStyle::Region => &[Name, Region],
            UidStyle::Sector => &[Name, Sector],
            UidStyle::Carrier => &[Name, Carrier],
            UidStyle::Component => &[Name, Component],
            UidStyle::NodeType => &[Name, NodeType],
        }
    }

    /// Parse a style token, surfacing an error at configuration time rather
    /// than lazily at first render.
    pub fn parse(token: &str) -> Result<Self> {
        token
            .parse()
            .map_err(|_| Error::UnknownStyle(token.to_string()))
    }
}

enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
}

/// Unique identifier of an energy system component.
///
/// One mandatory field (`name`) plus optional categorization fields, each
/// defaulting to a neutral value (empty string, `0.0` for coordinates) so
/// rendering never special-cases missing fields. Constructed once when a
/// component is created and immutable thereafter; a changed identity is a
/// new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Uid {
    name: String,
    #[serde(default)]
    latitude: f64,
    #[serde(default)]
    longitude: f64,
    #[serde(default)]
    region: String,
    #[serde(default)]
    sector: String,
    #[serde(default)]
    carrier: String,
    #[serde(default)]
    component: String,
    #[serde(default)]
    node_type: String,
}

impl Uid {
    /// Construct a uid with all optional fields at their neutral defaults.
    ///
    /// Fails with [`Error::EmptyName`] when `name` is empty or whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::EmptyName);
        }
        Ok(Self {
            name,
            latitude: 0.0,
            longitude: 0.0,
            region: String::new(),
            sector: String::new(),
            carrier: String::new(),
            component: String::new(),
            node_type: String::new(),
        })
    }

    pub fn with_latitude(mut self, latitude: f64) -> Self {
        self.latitude = latitude;
        self
    }

    pub fn with_longitude(mut self, longitude: f64) -> Self {
        self.longitude = longitude;
        self
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = sector.into();
        self
    }

    pub fn with_carrier(mut self, carrier: impl Into<String>) -> Self {
        self.carrier = carrier.into();
        self
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = component.into();
        self
    }

    pub fn with_node_type(mut self, node_type: impl Into<String>) -> Self {
        self.node_type = node_type.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn sector(&self) -> &str {
        &self.sector
    }

    pub fn carrier(&self) -> &str {
        &self.carrier
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    /// Join the style's field projection with `separator`.
    ///
    /// The result is not guaranteed reversible: a separator that also occurs
    /// inside a field value makes the rendered string ambiguous to parse
    /// back, and no escaping scheme is applied. Parsing rendered strings is
    /// unsupported.
    pub fn render(&self, style: UidStyle, separator: &str) -> String {
        style
            .fields()
            .iter()
            .map(|field| self.field_text(*field))
            .join(separator)
    }

    /// Equality over the style's field projection only.
    ///
    /// Two uids sharing a name but differing in region are equal under
    /// [`UidStyle::Name`] and unequal under [`UidStyle::Region`] or
    /// [`UidStyle::Qualname`].
    pub fn eq_under(&self, other: &Uid, style: UidStyle) -> bool {
        style.fields().iter().all(|field| {
            match (self.field_value(*field), other.field_value(*field)) {
                (FieldValue::Text(a), FieldValue::Text(b)) => a == b,
                (FieldValue::Number(a), FieldValue::Number(b)) => a.to_bits() == b.to_bits(),
                _ => false,
            }
        })
    }

    /// Hash over the style's field projection; consistent with
    /// [`Self::eq_under`] for the same style.
    pub fn hash_under(&self, style: UidStyle) -> u64 {
        let mut hasher = DefaultHasher::new();
        for field in style.fields() {
            match self.field_value(*field) {
                FieldValue::Text(text) => text.hash(&mut hasher),
                FieldValue::Number(number) => number.to_bits().hash(&mut hasher),
            }
        }
        hasher.finish()
    }

    fn field_value(&self, field: UidField) -> FieldValue<'_> {
        match field {
            UidField::Name => FieldValue::Text(&self.name),
            UidField::Latitude => FieldValue::Number(self.latitude),
            UidField::Longitude => FieldValue::Number(self.longitude),
            UidField::Region => FieldValue::Text(&self.region),
            UidField::Sector => FieldValue::Text(&self.sector),
            UidField::Carrier => FieldValue::Text(&self.carrier),
            UidField::Component => FieldValue::Text(&self.component),
            UidField::NodeType => FieldValue::Text(&self.node_type),
        }
    }

    fn field_text(&self, field: UidField) -> String {
        match self.field_value(field) {
            FieldValue::Text(text) => text.to_string(),
            // {:?} keeps the decimal point: 0.0 renders as "0.0", not "0".
            FieldValue::Number(number) => format!("{number:?}"),
        }
    }
}

/// Renders per the process-wide active style and separator, so a component
/// prints the way the current configuration says components print. Cached
/// representations go stale when the configuration changes.
impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = crate::config::active();
        write!(f, "{}", self.render(config.style, &config.separator))
    }
}
