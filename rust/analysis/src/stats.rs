// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fill-rate accumulators.
//!
//! Pure bookkeeping over in-memory sets; no operation here can fail.
//! Deduplication uses a composite `(file index, entity id)` key so entities
//! from different source files never collide on their file-local STEP ids.

use rustc_hash::{FxHashMap, FxHashSet};

use ifc_audit_core::PropertyKey;

/// Identity of one entity within an analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityRef {
    /// Index of the source file within the run.
    pub file_index: u32,
    /// File-local STEP id.
    pub entity_id: u32,
}

/// Per-(type, property) presence and value statistics.
#[derive(Debug, Default)]
pub struct PropertyStats {
    seen: FxHashSet<EntityRef>,
    with_value: FxHashSet<EntityRef>,
}

impl PropertyStats {
    /// Register one declaration of this property by `entity`.
    ///
    /// Idempotent per entity: a later `has_value = true` upgrades the entity
    /// into the value set, and a later `false` never downgrades it.
    pub fn register(&mut self, entity: EntityRef, has_value: bool) {
        self.seen.insert(entity);
        if has_value {
            self.with_value.insert(entity);
        }
    }

    /// Distinct entities that declared the property.
    pub fn entity_count(&self) -> usize {
        self.seen.len()
    }

    /// Distinct entities that declared it with a concrete value.
    pub fn value_count(&self) -> usize {
        self.with_value.len()
    }

    /// `value_count / entity_count`; 0.0 when nothing was registered.
    pub fn fill_rate(&self) -> f64 {
        if self.seen.is_empty() {
            0.0
        } else {
            self.with_value.len() as f64 / self.seen.len() as f64
        }
    }
}

/// Per-entity-type accumulator.
#[derive(Debug, Default)]
pub struct EntityStats {
    /// Entities of this type encountered, once each.
    pub instance_count: u64,
    properties: FxHashMap<PropertyKey, PropertyStats>,
}

impl EntityStats {
    /// Stats for one property, if any registration happened.
    pub fn property(&self, key: &PropertyKey) -> Option<&PropertyStats> {
        self.properties.get(key)
    }

    /// All registered properties.
    pub fn properties(&self) -> impl Iterator<Item = (&PropertyKey, &PropertyStats)> {
        self.properties.iter()
    }

    pub(crate) fn property_mut(&mut self, key: &PropertyKey) -> &mut PropertyStats {
        self.properties.entry(key.clone()).or_default()
    }
}

/// Accumulator for one analysis run, possibly spanning many source files.
///
/// Mutable while the run is in progress, read-only once handed to the
/// checker.
#[derive(Debug, Default)]
pub struct AnalysisResult {
    /// Source files in the order they were analyzed.
    pub source_files: Vec<String>,
    /// Per-type stats, keyed by lower-cased type name.
    entities: FxHashMap<String, EntityStats>,
}

impl AnalysisResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a source file; returns its index for [`EntityRef`] keys.
    pub fn add_source_file(&mut self, path: &str) -> u32 {
        self.source_files.push(path.to_string());
        (self.source_files.len() - 1) as u32
    }

    /// Register one property declaration for an entity of `ifc_type`.
    pub fn register(
        &mut self,
        ifc_type: &str,
        entity: EntityRef,
        key: &PropertyKey,
        has_value: bool,
    ) {
        self.stats_mut(ifc_type)
            .property_mut(key)
            .register(entity, has_value);
    }

    /// Stats for an entity type, case-insensitive.
    pub fn entity_stats(&self, ifc_type: &str) -> Option<&EntityStats> {
        self.entities.get(&ifc_type.to_ascii_lowercase())
    }

    /// Fill rate for one (type, property) pair; 0.0 when never registered.
    pub fn fill_rate(&self, ifc_type: &str, key: &PropertyKey) -> f64 {
        self.entity_stats(ifc_type)
            .and_then(|stats| stats.property(key))
            .map(|p| p.fill_rate())
            .unwrap_or(0.0)
    }

    pub(crate) fn stats_mut(&mut self, ifc_type: &str) -> &mut EntityStats {
        self.entities
            .entry(ifc_type.to_ascii_lowercase())
            .or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> PropertyKey {
        PropertyKey::new("Pset_WallCommon", "FireRating")
    }

    fn entity(file_index: u32, entity_id: u32) -> EntityRef {
        EntityRef {
            file_index,
            entity_id,
        }
    }

    #[test]
    fn test_upgrade_only_registration() {
        let mut stats = PropertyStats::default();
        stats.register(entity(0, 12), false);
        stats.register(entity(0, 12), true);
        assert_eq!(stats.entity_count(), 1);
        assert_eq!(stats.value_count(), 1);
        assert_eq!(stats.fill_rate(), 1.0);

        // A later null declaration does not downgrade.
        stats.register(entity(0, 12), false);
        assert_eq!(stats.fill_rate(), 1.0);
    }

    #[test]
    fn test_half_filled() {
        let mut stats = PropertyStats::default();
        stats.register(entity(0, 1), true);
        stats.register(entity(0, 2), false);
        assert_eq!(stats.entity_count(), 2);
        assert_eq!(stats.value_count(), 1);
        assert_eq!(stats.fill_rate(), 0.5);
    }

    #[test]
    fn test_empty_stats_do_not_divide_by_zero() {
        let stats = PropertyStats::default();
        assert_eq!(stats.fill_rate(), 0.0);

        let result = AnalysisResult::new();
        assert_eq!(result.fill_rate("IFCWALL", &key()), 0.0);
    }

    #[test]
    fn test_same_id_in_different_files_is_distinct() {
        let mut stats = PropertyStats::default();
        stats.register(entity(0, 12), true);
        stats.register(entity(1, 12), false);
        assert_eq!(stats.entity_count(), 2);
        assert_eq!(stats.fill_rate(), 0.5);
    }

    #[test]
    fn test_result_lookup_is_case_insensitive() {
        let mut result = AnalysisResult::new();
        result.register("IFCWALL", entity(0, 1), &key(), true);
        assert_eq!(result.fill_rate("IfcWall", &key()), 1.0);
        assert!(result.entity_stats("ifcwall").is_some());
    }
}
