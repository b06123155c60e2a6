//! Aggregated validation result
//!
//! A report exists only when at least one attribute failed; a fully valid
//! bag is represented by the absence of a report, never by an empty one.
//! Attribute order inside the report follows the schema's declaration order.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::schema::Violation;

/// Violations aggregated per attribute, serialized on the wire as
/// `{"ValidationError": {"attr": [violation, ...], ...}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    entries: Vec<(String, Vec<Violation>)>,
}

impl ValidationReport {
    /// Wraps per-attribute violations; `None` when nothing failed.
    pub(super) fn from_entries(entries: Vec<(String, Vec<Violation>)>) -> Option<Self> {
        if entries.is_empty() {
            None
        } else {
            Some(Self { entries })
        }
    }

    /// Names of the attributes that failed, in declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Violations recorded for one attribute.
    pub fn violations(&self, attribute: &str) -> Option<&[Violation]> {
        self.entries
            .iter()
            .find(|(name, _)| name == attribute)
            .map(|(_, violations)| violations.as_slice())
    }

    /// Total number of violations across all attributes.
    pub fn violation_count(&self) -> usize {
        self.entries.iter().map(|(_, v)| v.len()).sum()
    }

    /// The wire-shape JSON value.
    pub fn to_value(&self) -> Value {
        // The report holds only JSON-native data.
        serde_json::to_value(self).expect("report serializes")
    }
}

impl Serialize for ValidationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct ByAttribute<'a>(&'a [(String, Vec<Violation>)]);

        impl Serialize for ByAttribute<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for (name, violations) in self.0 {
                    map.serialize_entry(name, violations)?;
                }
                map.end()
            }
        }

        let mut outer = serializer.serialize_map(Some(1))?;
        outer.serialize_entry("ValidationError", &ByAttribute(&self.entries))?;
        outer.end()
    }
}
