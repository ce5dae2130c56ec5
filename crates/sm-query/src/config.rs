//! Engine configuration

use serde::{Deserialize, Serialize};

use crate::Result;

/// Namespace configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Short global symbol, restored by `no_conflict`
    pub global_symbol: String,
    /// Long global symbol, never given back
    pub namespace_symbol: String,
    /// Answer single id/class/tag selectors with direct lookups
    pub fast_path: bool,
    /// CSS properties whose numeric values get no `px` suffix
    pub unitless_properties: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            global_symbol: "$".to_string(),
            namespace_symbol: "SM".to_string(),
            fast_path: true,
            unitless_properties: ["font-weight", "line-height", "opacity", "z-index", "zoom"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl Config {
    /// Load from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether a (kebab-case) property takes bare numbers
    pub fn is_unitless(&self, property: &str) -> bool {
        self.unitless_properties
            .iter()
            .any(|p| p.eq_ignore_ascii_case(property))
    }
}
