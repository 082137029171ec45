// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Check report data shapes.
//!
//! The contract shared with the external rule checker: it compares the
//! aggregated fill rates against a profile and emits these shapes. The
//! comparison logic itself lives outside this workspace.

use serde::{Deserialize, Serialize};

/// Violation severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// One rule violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckItem {
    pub severity: Severity,
    pub entity_name: String,
    pub ifc_guid: String,
    pub pset: String,
    pub property: String,
    pub message: String,
}

/// Violation counts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckSummary {
    pub error_count: u32,
    pub warning_count: u32,
}

/// Complete check outcome for one target file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub ok: bool,
    pub profile_name: String,
    pub target_file: String,
    pub summary: CheckSummary,
    pub items: Vec<CheckItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_serializes_with_camel_case_keys() {
        let result = CheckResult {
            ok: false,
            profile_name: "Baseline".into(),
            target_file: "model.ifc".into(),
            summary: CheckSummary {
                error_count: 1,
                warning_count: 0,
            },
            items: vec![CheckItem {
                severity: Severity::Error,
                entity_name: "Wall-001".into(),
                ifc_guid: "wal00000000000000000001".into(),
                pset: "Pset_WallCommon".into(),
                property: "FireRating".into(),
                message: "fill rate 0.50 below required 0.90".into(),
            }],
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"profileName\""));
        assert!(json.contains("\"errorCount\":1"));
        assert!(json.contains("\"severity\":\"error\""));
    }
}
