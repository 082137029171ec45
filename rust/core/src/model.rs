// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parsed model types.
//!
//! A [`Model`] is the read-only parse result for one source file: every
//! syntactically valid record becomes exactly one [`Entity`], indexed by id
//! and by type.

use rustc_hash::FxHashMap;
use std::hash::{Hash, Hasher};

/// Case-insensitive `(pset, property)` pair.
///
/// Used as the map key wherever a property must be identified across
/// entities and across files. Equality and hashing fold ASCII case on both
/// fields.
#[derive(Debug, Clone)]
pub struct PropertyKey {
    pset: String,
    prop: String,
}

impl PropertyKey {
    pub fn new(pset: impl Into<String>, prop: impl Into<String>) -> Self {
        Self {
            pset: pset.into(),
            prop: prop.into(),
        }
    }

    /// Property set name as authored in the source.
    pub fn pset(&self) -> &str {
        &self.pset
    }

    /// Property name as authored in the source.
    pub fn prop(&self) -> &str {
        &self.prop
    }
}

impl PartialEq for PropertyKey {
    fn eq(&self, other: &Self) -> bool {
        self.pset.eq_ignore_ascii_case(&other.pset) && self.prop.eq_ignore_ascii_case(&other.prop)
    }
}

impl Eq for PropertyKey {}

impl Hash for PropertyKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.pset.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
        state.write_u8(0);
        for b in self.prop.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
    }
}

/// One STEP record promoted to a semantic node.
#[derive(Debug, Clone)]
pub struct Entity {
    /// STEP line number. Scope is local to the owning model.
    pub id: u32,
    /// Entity keyword, e.g. `IFCSPACE`.
    pub ifc_type: String,
    /// GlobalId attribute, when the record follows the IfcRoot layout.
    pub global_id: String,
    /// Name attribute, when the record follows the IfcRoot layout.
    pub name: String,
    /// Containing storey, from explicit containment or elevation fallback.
    pub storey_id: Option<u32>,
    /// Name of the containing storey; empty when unresolved.
    pub storey_name: String,
    /// Declared properties: `true` = carried a concrete value, `false` =
    /// declared with the `$` null marker.
    pub properties: FxHashMap<PropertyKey, bool>,
}

impl Entity {
    pub(crate) fn new(id: u32, ifc_type: String, global_id: String, name: String) -> Self {
        Self {
            id,
            ifc_type,
            global_id,
            name,
            storey_id: None,
            storey_name: String::new(),
            properties: FxHashMap::default(),
        }
    }
}

/// Parse result for one source file.
#[derive(Debug, Default)]
pub struct Model {
    /// Path the file was read from.
    pub source_path: String,
    /// One entry per syntactically valid raw record, keyed by STEP id.
    pub entities_by_id: FxHashMap<u32, Entity>,
    /// Per-type index in discovery order, keyed by lower-cased type name.
    type_index: FxHashMap<String, Vec<u32>>,
}

impl Model {
    pub(crate) fn new(source_path: &str) -> Self {
        Self {
            source_path: source_path.to_string(),
            entities_by_id: FxHashMap::default(),
            type_index: FxHashMap::default(),
        }
    }

    pub(crate) fn index_type(&mut self, type_name: &str, id: u32) {
        self.type_index
            .entry(type_name.to_ascii_lowercase())
            .or_default()
            .push(id);
    }

    /// Look up an entity by STEP id.
    pub fn entity(&self, id: u32) -> Option<&Entity> {
        self.entities_by_id.get(&id)
    }

    /// Entities of a type, case-insensitive, in file discovery order.
    pub fn entities_of_type<'a>(&'a self, type_name: &str) -> impl Iterator<Item = &'a Entity> {
        self.type_index
            .get(&type_name.to_ascii_lowercase())
            .map(|ids| ids.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(move |id| self.entities_by_id.get(id))
    }

    /// Total number of entities.
    pub fn len(&self) -> usize {
        self.entities_by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities_by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    #[test]
    fn test_property_key_case_insensitive() {
        let a = PropertyKey::new("Pset_WallCommon", "FireRating");
        let b = PropertyKey::new("PSET_WALLCOMMON", "firerating");
        assert_eq!(a, b);

        let mut map: FxHashMap<PropertyKey, bool> = FxHashMap::default();
        map.insert(a, true);
        assert_eq!(map.get(&b), Some(&true));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_property_key_distinct_fields() {
        let a = PropertyKey::new("Pset_A", "IsExternal");
        let b = PropertyKey::new("Pset_B", "IsExternal");
        let c = PropertyKey::new("Pset_A", "LoadBearing");
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_type_index_preserves_order() {
        let mut model = Model::new("test.ifc");
        for id in [5u32, 2, 9] {
            model
                .entities_by_id
                .insert(id, Entity::new(id, "IFCWALL".into(), String::new(), String::new()));
            model.index_type("IFCWALL", id);
        }
        let ids: Vec<u32> = model.entities_of_type("IfcWall").map(|e| e.id).collect();
        assert_eq!(ids, vec![5, 2, 9]);
    }
}
