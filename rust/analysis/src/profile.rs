// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rule profile configuration.
//!
//! A profile names, per entity type, the properties that must be filled and
//! the minimum acceptable fill rate. Profiles are built elsewhere and read
//! here; they only drive what the aggregator computes.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Immutable rule profile for one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDefinition {
    pub profile_name: String,
    #[serde(default)]
    pub profile_version: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub source_files: Vec<String>,
    /// Rules keyed by entity type name as authored; lookup is
    /// case-insensitive via [`ProfileDefinition::rules_for`].
    #[serde(default)]
    pub entity_rules: FxHashMap<String, EntityRule>,
}

/// Required properties for one entity type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRule {
    #[serde(default)]
    pub required_properties: Vec<RequiredPropertyRule>,
}

/// One required property with its minimum fill rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredPropertyRule {
    pub pset: String,
    pub name: String,
    pub min_fill_rate: f64,
}

impl ProfileDefinition {
    /// Load a profile from a JSON file.
    ///
    /// An empty path, an unreadable file or invalid JSON are caller errors.
    pub fn from_json_file(path: &str) -> Result<Self> {
        if path.trim().is_empty() {
            return Err(Error::MissingPath);
        }
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Rules for an entity type, matched case-insensitively.
    pub fn rules_for(&self, ifc_type: &str) -> Option<&EntityRule> {
        self.entity_rules
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(ifc_type))
            .map(|(_, rule)| rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_json_round_trip() {
        let json = r#"{
            "profileName": "Office Baseline",
            "profileVersion": "1.2",
            "createdAt": "2025-11-03T10:00:00Z",
            "sourceFiles": ["a.ifc"],
            "entityRules": {
                "IFCWALL": {
                    "requiredProperties": [
                        {"pset": "Pset_WallCommon", "name": "FireRating", "minFillRate": 0.9}
                    ]
                }
            }
        }"#;
        let profile: ProfileDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(profile.profile_name, "Office Baseline");
        let rule = profile.rules_for("IfcWall").unwrap();
        assert_eq!(rule.required_properties.len(), 1);
        assert_eq!(rule.required_properties[0].min_fill_rate, 0.9);

        let back = serde_json::to_string(&profile).unwrap();
        let again: ProfileDefinition = serde_json::from_str(&back).unwrap();
        assert_eq!(again.entity_rules.len(), 1);
    }

    #[test]
    fn test_missing_rule_is_none() {
        let profile: ProfileDefinition =
            serde_json::from_str(r#"{"profileName": "empty"}"#).unwrap();
        assert!(profile.rules_for("IFCDOOR").is_none());
    }

    #[test]
    fn test_empty_path_is_caller_error() {
        assert!(matches!(
            ProfileDefinition::from_json_file("  "),
            Err(Error::MissingPath)
        ));
    }
}
