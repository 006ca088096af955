//! Engine configuration: field aliases and the fixed cost model

use serde::{Deserialize, Serialize};

use crate::fields::FieldAliases;

/// Assumed cost of one delivered unit
pub const DEFAULT_UNIT_COST: f64 = 500.0;

/// Value credited per door-step exchange
pub const DEFAULT_DOOR_STEP_UNIT_VALUE: f64 = 80.0;

/// Status substrings that route a record to `rto` ahead of generic matching
pub const DEFAULT_RTO_MARKERS: &[&str] = &["rto_complete", "rto_locked", "rto_initiated"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostModel {
    pub unit_cost: f64,
    pub door_step_unit_value: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            unit_cost: DEFAULT_UNIT_COST,
            door_step_unit_value: DEFAULT_DOOR_STEP_UNIT_VALUE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rto_markers: Vec<String>,
    /// Replaces the built-in alias lists wholesale
    pub aliases: FieldAliases,
    /// Appended after `aliases` (lower priority), duplicates ignored
    pub extra_aliases: Option<FieldAliases>,
    pub cost: CostModel,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rto_markers: DEFAULT_RTO_MARKERS.iter().map(|s| s.to_string()).collect(),
            aliases: FieldAliases::default(),
            extra_aliases: None,
            cost: CostModel::default(),
        }
    }
}

impl EngineConfig {
    /// Alias lists with any extras merged in
    pub fn effective_aliases(&self) -> FieldAliases {
        let mut aliases = self.aliases.clone();
        if let Some(extra) = &self.extra_aliases {
            aliases.extend(extra);
        }
        aliases
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.cost.unit_cost, 500.0);
        assert_eq!(cfg.cost.door_step_unit_value, 80.0);
        assert_eq!(cfg.rto_markers.len(), 3);
        assert_eq!(cfg.effective_aliases(), FieldAliases::default());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg: EngineConfig =
            serde_json::from_str(r#"{"cost": {"unit_cost": 450.0}}"#).unwrap();
        assert_eq!(cfg.cost.unit_cost, 450.0);
        assert_eq!(cfg.cost.door_step_unit_value, 80.0);
        assert_eq!(cfg.aliases, FieldAliases::default());
    }

    #[test]
    fn test_extra_aliases_merge() {
        let cfg: EngineConfig = serde_json::from_str(
            r#"{"extra_aliases": {"status": ["Order Status"], "date": ["Dispatch Date"]}}"#,
        )
        .unwrap();
        let aliases = cfg.effective_aliases();
        assert_eq!(aliases.status, vec!["Reason for Credit Entry", "Order Status"]);
        assert_eq!(aliases.date.last().map(String::as_str), Some("Dispatch Date"));
        // lists not mentioned fall back to defaults, which merge as no-ops
        assert_eq!(aliases.listed_price, FieldAliases::default().listed_price);
    }
}
