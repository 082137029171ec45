// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placement-elevation resolver.
//!
//! Fallback used when an entity has no explicit spatial containment: compose
//! the world-space Z of its local placement chain and pick the storey with
//! the nearest elevation. Every lookup is memoized so a shared chain costs
//! O(number of placements) across all queries.

use rustc_hash::FxHashMap;

use crate::decode::{parse_float, parse_ref};
use crate::scanner::RawRecord;
use crate::schema;

/// Memoizing Z resolver over one file's placement records.
pub struct PlacementResolver<'a> {
    records: &'a FxHashMap<u32, &'a RawRecord>,
    point_z: FxHashMap<u32, f64>,
    axis_z: FxHashMap<u32, f64>,
    placement_z: FxHashMap<u32, f64>,
}

impl<'a> PlacementResolver<'a> {
    pub fn new(records: &'a FxHashMap<u32, &'a RawRecord>) -> Self {
        Self {
            records,
            point_z: FxHashMap::default(),
            axis_z: FxHashMap::default(),
            placement_z: FxHashMap::default(),
        }
    }

    /// Resolve an object placement argument (e.g. `#31`) to a world Z.
    ///
    /// Returns `None` only when the argument is not an entity reference;
    /// unresolvable chains degrade to `0.0`.
    pub fn resolve_z(&mut self, placement_arg: &str) -> Option<f64> {
        parse_ref(placement_arg).map(|id| self.local_placement_z(id))
    }

    /// Number of memoized local placement results.
    pub fn cache_size(&self) -> usize {
        self.placement_z.len()
    }

    /// Total Z of a local placement: parent chain Z plus its own axis Z.
    /// A record that is not a local placement, or has too few arguments,
    /// resolves to 0 and that result is cached under its id.
    fn local_placement_z(&mut self, id: u32) -> f64 {
        if let Some(&z) = self.placement_z.get(&id) {
            return z;
        }
        // Cycle guard for malformed files.
        self.placement_z.insert(id, 0.0);

        let z = match self.records.get(&id).copied() {
            Some(rec)
                if rec.type_name.eq_ignore_ascii_case(schema::IFC_LOCAL_PLACEMENT)
                    && rec.args.len() >= schema::PLACEMENT_MIN_ARGS =>
            {
                let parent = rec.args[schema::PLACEMENT_PARENT].trim();
                let parent_z = if parent == "$" {
                    0.0
                } else {
                    parse_ref(parent)
                        .map(|pid| self.local_placement_z(pid))
                        .unwrap_or(0.0)
                };
                let relative_z = parse_ref(&rec.args[schema::PLACEMENT_RELATIVE])
                    .map(|aid| self.axis_placement_z(aid))
                    .unwrap_or(0.0);
                parent_z + relative_z
            }
            _ => 0.0,
        };
        self.placement_z.insert(id, z);
        z
    }

    /// Z of an axis placement's location point.
    fn axis_placement_z(&mut self, id: u32) -> f64 {
        if let Some(&z) = self.axis_z.get(&id) {
            return z;
        }
        let z = match self.records.get(&id).copied() {
            Some(rec) if rec.type_name.eq_ignore_ascii_case(schema::IFC_AXIS2_PLACEMENT_3D) => rec
                .args
                .get(schema::AXIS_LOCATION)
                .and_then(|arg| parse_ref(arg))
                .map(|pid| self.cartesian_point_z(pid))
                .unwrap_or(0.0),
            _ => 0.0,
        };
        self.axis_z.insert(id, z);
        z
    }

    /// Third coordinate of a cartesian point, 0 when absent.
    fn cartesian_point_z(&mut self, id: u32) -> f64 {
        if let Some(&z) = self.point_z.get(&id) {
            return z;
        }
        let z = match self.records.get(&id).copied() {
            Some(rec) if rec.type_name.eq_ignore_ascii_case(schema::IFC_CARTESIAN_POINT) => rec
                .args
                .get(schema::POINT_COORDINATES)
                .and_then(|arg| third_component(arg))
                .unwrap_or(0.0),
            _ => 0.0,
        };
        self.point_z.insert(id, z);
        z
    }
}

/// Parse the third component of a `(x,y,z)` coordinate tuple.
fn third_component(arg: &str) -> Option<f64> {
    let mut s = arg.trim();
    if s.len() >= 2 && s.starts_with('(') && s.ends_with(')') {
        s = &s[1..s.len() - 1];
    }
    s.split(',').nth(2).and_then(parse_float)
}

/// Pick the storey whose elevation is nearest to `z`.
///
/// Ties break deterministically to the lowest storey id.
pub fn nearest_storey(elevations: &FxHashMap<u32, f64>, z: f64) -> Option<u32> {
    let mut best: Option<(u32, f64)> = None;
    for (&id, &elevation) in elevations {
        let distance = (elevation - z).abs();
        let better = match best {
            None => true,
            Some((best_id, best_distance)) => {
                distance < best_distance || (distance == best_distance && id < best_id)
            }
        };
        if better {
            best = Some((id, distance));
        }
    }
    best.map(|(id, _)| id)
}
