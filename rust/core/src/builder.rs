// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity graph builder.
//!
//! Turns the raw records of one file into a populated [`Model`] via a
//! multi-pass pipeline. Earlier passes produce lookup tables that later
//! passes consume, so a single deterministic sweep per pass is sufficient.
//! No pass ever raises on malformed data; every failed inference degrades to
//! an absent value.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::decode::{has_concrete_value, parse_float, parse_id_list, parse_ref, unescape, IdList};
use crate::elevation::{nearest_storey, PlacementResolver};
use crate::error::{Error, Result};
use crate::model::{Entity, Model, PropertyKey};
use crate::scanner::{scan_records, RawRecord};
use crate::schema;

/// Storeys discovered in pass 1: names, and elevations where parseable.
#[derive(Debug, Default)]
struct StoreyTable {
    names: FxHashMap<u32, String>,
    elevations: FxHashMap<u32, f64>,
}

/// Property singles and sets discovered in pass 2.
#[derive(Debug, Default)]
struct PropertyTable {
    /// Property id -> (name, carried a concrete value).
    singles: FxHashMap<u32, (String, bool)>,
    /// Pset id -> (pset name, member property ids).
    sets: FxHashMap<u32, (String, IdList)>,
}

/// Parse a file from disk into a model.
///
/// The only hard failures are caller errors: an empty path or an unreadable
/// file. Irregular content never errors.
pub fn parse_file(path: &str) -> Result<Model> {
    if path.trim().is_empty() {
        return Err(Error::MissingPath);
    }
    let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_string(),
        source,
    })?;
    Ok(build_model(path, &content))
}

/// Build a model from already-loaded file content. Pure, I/O-free.
pub fn build_model(source_path: &str, content: &str) -> Model {
    let records = scan_records(content);
    let records_by_id: FxHashMap<u32, &RawRecord> = records.iter().map(|r| (r.id, r)).collect();

    let storeys = collect_storeys(&records);
    let properties = collect_properties(&records);
    let containment = collect_containment(&records, &storeys);

    let mut model = Model::new(source_path);

    // Pass 4: attach declared properties to the related objects.
    apply_property_definitions(&records, &records_by_id, &properties, &mut model);

    // Pass 5: every record gets an entity, referenced or not. Duplicate ids
    // keep their first record and are indexed once.
    let mut indexed: FxHashSet<u32> = FxHashSet::default();
    for record in &records {
        model
            .entities_by_id
            .entry(record.id)
            .or_insert_with(|| entity_from_record(record));
        if indexed.insert(record.id) {
            model.index_type(&record.type_name, record.id);
        }
    }

    // Pass 6: explicit containment wins over any inference.
    let mut contained = 0usize;
    for &(object_id, storey_id) in &containment {
        if let Some(entity) = model.entities_by_id.get_mut(&object_id) {
            entity.storey_id = Some(storey_id);
            entity.storey_name = storeys.names.get(&storey_id).cloned().unwrap_or_default();
            contained += 1;
        }
    }

    // Pass 7: elevation fallback for spaces still lacking a storey.
    let inferred = if storeys.elevations.is_empty() {
        0
    } else {
        assign_storeys_by_elevation(&records_by_id, &storeys, &mut model)
    };

    tracing::info!(
        source = source_path,
        entities = model.len(),
        storeys = storeys.names.len(),
        contained,
        inferred,
        "Built entity graph"
    );
    model
}

/// Pass 1: record storey names and, where present, elevations.
fn collect_storeys(records: &[RawRecord]) -> StoreyTable {
    let mut table = StoreyTable::default();
    for record in records {
        if !record
            .type_name
            .eq_ignore_ascii_case(schema::IFC_BUILDING_STOREY)
        {
            continue;
        }
        let name = record
            .args
            .get(schema::STOREY_NAME)
            .map(|a| unescape(a))
            .unwrap_or_default();
        table.names.insert(record.id, name);

        if record.args.len() >= schema::STOREY_MIN_ARGS_ELEVATION {
            // Non-numeric elevations are skipped, not errored.
            if let Some(elevation) = parse_float(&record.args[schema::STOREY_ELEVATION]) {
                table.elevations.insert(record.id, elevation);
            }
        }
    }
    table
}

/// Pass 2: property singles and property sets.
fn collect_properties(records: &[RawRecord]) -> PropertyTable {
    let mut table = PropertyTable::default();
    for record in records {
        if record
            .type_name
            .eq_ignore_ascii_case(schema::IFC_PROPERTY_SINGLE_VALUE)
            && record.args.len() >= schema::PROP_MIN_ARGS
        {
            let name = unescape(&record.args[schema::PROP_NAME]);
            let has_value = has_concrete_value(&record.args[schema::PROP_NOMINAL_VALUE]);
            table.singles.insert(record.id, (name, has_value));
        } else if record
            .type_name
            .eq_ignore_ascii_case(schema::IFC_PROPERTY_SET)
            && record.args.len() >= schema::PSET_MIN_ARGS
        {
            let name = unescape(&record.args[schema::PSET_NAME]);
            let members = parse_id_list(&record.args[schema::PSET_HAS_PROPERTIES]);
            table.sets.insert(record.id, (name, members));
        }
    }
    table
}

/// Pass 3: explicit spatial containment. A relationship is accepted only
/// when its relating structure was discovered as a building storey.
fn collect_containment(records: &[RawRecord], storeys: &StoreyTable) -> Vec<(u32, u32)> {
    let mut containment = Vec::new();
    for record in records {
        if !record
            .type_name
            .eq_ignore_ascii_case(schema::IFC_REL_CONTAINED_IN_SPATIAL_STRUCTURE)
            || record.args.len() < schema::CONTAINMENT_MIN_ARGS
        {
            continue;
        }
        let relating = match parse_ref(&record.args[schema::CONTAINMENT_RELATING]) {
            Some(id) if storeys.names.contains_key(&id) => id,
            _ => continue,
        };
        for object_id in parse_id_list(&record.args[schema::CONTAINMENT_RELATED]) {
            containment.push((object_id, relating));
        }
    }
    containment
}

/// Pass 4: for every defines-by-properties relationship, materialize the
/// related entities and mark each member property of each referenced pset.
fn apply_property_definitions(
    records: &[RawRecord],
    records_by_id: &FxHashMap<u32, &RawRecord>,
    properties: &PropertyTable,
    model: &mut Model,
) {
    for record in records {
        if !record
            .type_name
            .eq_ignore_ascii_case(schema::IFC_REL_DEFINES_BY_PROPERTIES)
            || record.args.len() < schema::DEFINES_MIN_ARGS
        {
            continue;
        }
        let object_ids = parse_id_list(&record.args[schema::DEFINES_RELATED]);
        let pset_ids = parse_id_list(&record.args[schema::DEFINES_PSETS]);

        for pset_id in &pset_ids {
            let (pset_name, member_ids) = match properties.sets.get(pset_id) {
                Some(set) => set,
                None => continue,
            };
            for &object_id in &object_ids {
                let object_record = match records_by_id.get(&object_id) {
                    Some(rec) => *rec,
                    None => continue, // dangling reference, tolerated
                };
                let entity = model
                    .entities_by_id
                    .entry(object_id)
                    .or_insert_with(|| entity_from_record(object_record));
                for member_id in member_ids {
                    if let Some((prop_name, has_value)) = properties.singles.get(member_id) {
                        entity
                            .properties
                            .insert(PropertyKey::new(pset_name.clone(), prop_name.clone()), *has_value);
                    }
                }
            }
        }
    }
}

/// Pass 7: nearest-elevation storey for spaces with no explicit containment.
fn assign_storeys_by_elevation(
    records_by_id: &FxHashMap<u32, &RawRecord>,
    storeys: &StoreyTable,
    model: &mut Model,
) -> usize {
    let mut resolver = PlacementResolver::new(records_by_id);
    let mut inferred = 0usize;

    let space_ids: Vec<u32> = model
        .entities_of_type(schema::IFC_SPACE)
        .filter(|e| e.storey_id.is_none())
        .map(|e| e.id)
        .collect();

    for space_id in space_ids {
        let placement_arg = match records_by_id
            .get(&space_id)
            .and_then(|rec| rec.args.get(schema::SPACE_PLACEMENT))
        {
            Some(arg) => arg,
            None => continue,
        };
        let z = match resolver.resolve_z(placement_arg) {
            Some(z) => z,
            None => continue,
        };
        if let Some(storey_id) = nearest_storey(&storeys.elevations, z) {
            if let Some(entity) = model.entities_by_id.get_mut(&space_id) {
                entity.storey_id = Some(storey_id);
                entity.storey_name = storeys.names.get(&storey_id).cloned().unwrap_or_default();
                inferred += 1;
            }
        }
    }
    inferred
}

/// Promote a raw record to an entity. GlobalId and Name come from the
/// IfcRoot argument positions and only when the argument is actually a
/// quoted string; records with other layouts get empty fields.
fn entity_from_record(record: &RawRecord) -> Entity {
    Entity::new(
        record.id,
        record.type_name.clone(),
        string_attr(record, schema::ATTR_GLOBAL_ID),
        string_attr(record, schema::ATTR_NAME),
    )
}

fn string_attr(record: &RawRecord, index: usize) -> String {
    record
        .args
        .get(index)
        .filter(|a| a.starts_with('\''))
        .map(|a| unescape(a))
        .unwrap_or_default()
}
