// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cross-file aggregation driver.
//!
//! Walks one or more parsed models with a profile's property vocabulary and
//! accumulates presence/value statistics per (type, property) pair.

use rustc_hash::FxHashSet;

use ifc_audit_core::{Model, PropertyKey};

use crate::profile::ProfileDefinition;
use crate::stats::{AnalysisResult, EntityRef};

/// Aggregate fill-rate statistics across `models` for every entity type the
/// profile has rules for.
///
/// Each entity of a profiled type counts toward `instance_count` exactly
/// once; each of its declared properties that appears in the profile's
/// required-property vocabulary for that type is registered with its value
/// flag. Models are processed in order and their paths recorded, so stats
/// keys stay unique across files.
pub fn aggregate(profile: &ProfileDefinition, models: &[Model]) -> AnalysisResult {
    let mut result = AnalysisResult::new();

    for model in models {
        let file_index = result.add_source_file(&model.source_path);

        for (type_name, rule) in &profile.entity_rules {
            let vocabulary: FxHashSet<PropertyKey> = rule
                .required_properties
                .iter()
                .map(|r| PropertyKey::new(r.pset.clone(), r.name.clone()))
                .collect();

            for entity in model.entities_of_type(type_name) {
                result.stats_mut(type_name).instance_count += 1;
                let entity_ref = EntityRef {
                    file_index,
                    entity_id: entity.id,
                };
                for (key, &has_value) in &entity.properties {
                    if vocabulary.contains(key) {
                        result.register(type_name, entity_ref, key, has_value);
                    }
                }
            }
        }
    }

    tracing::info!(
        files = result.source_files.len(),
        profiled_types = profile.entity_rules.len(),
        "Aggregated fill-rate statistics"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{EntityRule, RequiredPropertyRule};
    use ifc_audit_core::build_model;

    fn profile() -> ProfileDefinition {
        let mut profile = ProfileDefinition {
            profile_name: "test".into(),
            profile_version: String::new(),
            created_at: String::new(),
            source_files: Vec::new(),
            entity_rules: Default::default(),
        };
        profile.entity_rules.insert(
            "IFCWALL".into(),
            EntityRule {
                required_properties: vec![
                    RequiredPropertyRule {
                        pset: "Pset_WallCommon".into(),
                        name: "FireRating".into(),
                        min_fill_rate: 1.0,
                    },
                    RequiredPropertyRule {
                        pset: "Pset_WallCommon".into(),
                        name: "LoadBearing".into(),
                        min_fill_rate: 0.5,
                    },
                ],
            },
        );
        profile
    }

    const FILE_A: &str = r#"
#1=IFCWALL('wa1',$,'Wall-A1',$,$,$,$,$);
#2=IFCWALL('wa2',$,'Wall-A2',$,$,$,$,$);
#10=IFCPROPERTYSINGLEVALUE('FireRating',$,IFCLABEL('F30'),$);
#11=IFCPROPERTYSINGLEVALUE('LoadBearing',$,$,$);
#12=IFCPROPERTYSINGLEVALUE('Unprofiled',$,IFCLABEL('x'),$);
#13=IFCPROPERTYSET('pa1',$,'Pset_WallCommon',$,(#10,#11,#12));
#14=IFCRELDEFINESBYPROPERTIES('ra1',$,$,$,(#1),#13);
"#;

    const FILE_B: &str = r#"
#1=IFCWALL('wb1',$,'Wall-B1',$,$,$,$,$);
#10=IFCPROPERTYSINGLEVALUE('FireRating',$,$,$);
#13=IFCPROPERTYSET('pb1',$,'Pset_WallCommon',$,(#10));
#14=IFCRELDEFINESBYPROPERTIES('rb1',$,$,$,(#1),#13);
"#;

    #[test]
    fn test_aggregate_across_files() {
        let models = vec![build_model("a.ifc", FILE_A), build_model("b.ifc", FILE_B)];
        let result = aggregate(&profile(), &models);

        assert_eq!(result.source_files, vec!["a.ifc", "b.ifc"]);

        let stats = result.entity_stats("IFCWALL").unwrap();
        assert_eq!(stats.instance_count, 3);

        // FireRating: declared by wall #1 in both files (same STEP id, two
        // distinct entities), filled only in file A.
        let fire = stats
            .property(&PropertyKey::new("Pset_WallCommon", "FireRating"))
            .unwrap();
        assert_eq!(fire.entity_count(), 2);
        assert_eq!(fire.value_count(), 1);
        assert_eq!(fire.fill_rate(), 0.5);

        // LoadBearing: declared null by one wall only.
        let load = stats
            .property(&PropertyKey::new("Pset_WallCommon", "LoadBearing"))
            .unwrap();
        assert_eq!(load.entity_count(), 1);
        assert_eq!(load.fill_rate(), 0.0);

        // Properties outside the profile vocabulary are not tracked.
        assert!(stats
            .property(&PropertyKey::new("Pset_WallCommon", "Unprofiled"))
            .is_none());
    }

    #[test]
    fn test_unprofiled_types_are_ignored() {
        let models = vec![build_model("a.ifc", "#1=IFCDOOR('d1',$,'Door',$,$,$,$,$);\n")];
        let result = aggregate(&profile(), &models);
        assert!(result.entity_stats("IFCDOOR").is_none());
        // Profiled type with no instances never divides by zero.
        assert_eq!(
            result.fill_rate("IFCWALL", &PropertyKey::new("Pset_WallCommon", "FireRating")),
            0.0
        );
    }
}
