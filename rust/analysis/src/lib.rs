// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IFC Audit Analysis
//!
//! Cross-file property fill-rate aggregation over parsed IFC models.
//!
//! Consumes [`Model`](ifc_audit_core::Model)s built by `ifc-audit-core`
//! together with a rule profile's property vocabulary, and accumulates
//! per-(type, property) presence/value statistics with correct
//! de-duplication across files. The resulting [`AnalysisResult`] is handed
//! to an external checker, whose report shapes live in [`report`].
//!
//! ```rust
//! use ifc_audit_analysis::{aggregate, ProfileDefinition};
//! use ifc_audit_core::build_model;
//!
//! let profile: ProfileDefinition = serde_json::from_str(r#"{
//!     "profileName": "Baseline",
//!     "entityRules": {
//!         "IFCWALL": {"requiredProperties": [
//!             {"pset": "Pset_WallCommon", "name": "FireRating", "minFillRate": 0.9}
//!         ]}
//!     }
//! }"#).unwrap();
//!
//! let model = build_model("model.ifc", "#1=IFCWALL('g',$,'W',$,$,$,$,$);\n");
//! let result = aggregate(&profile, &[model]);
//! assert_eq!(result.entity_stats("IFCWALL").unwrap().instance_count, 1);
//! ```

pub mod aggregate;
pub mod error;
pub mod profile;
pub mod report;
pub mod stats;

pub use aggregate::aggregate;
pub use error::{Error, Result};
pub use profile::{EntityRule, ProfileDefinition, RequiredPropertyRule};
pub use report::{CheckItem, CheckResult, CheckSummary, Severity};
pub use stats::{AnalysisResult, EntityRef, EntityStats, PropertyStats};
