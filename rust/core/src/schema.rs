// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Schema position table for IFC2X3-style records.
//!
//! All positional argument indices the builder relies on live here, so an
//! alternate schema version is a table substitution rather than a parser
//! rewrite. Indices are valid for the common IFC2X3 layouts; records with
//! fewer arguments simply skip the affected inference.

/// Entity keywords this subsystem understands semantically. Everything else
/// is retained as an opaque entity.
pub const IFC_BUILDING_STOREY: &str = "IFCBUILDINGSTOREY";
pub const IFC_PROPERTY_SINGLE_VALUE: &str = "IFCPROPERTYSINGLEVALUE";
pub const IFC_PROPERTY_SET: &str = "IFCPROPERTYSET";
pub const IFC_REL_CONTAINED_IN_SPATIAL_STRUCTURE: &str = "IFCRELCONTAINEDINSPATIALSTRUCTURE";
pub const IFC_REL_DEFINES_BY_PROPERTIES: &str = "IFCRELDEFINESBYPROPERTIES";
pub const IFC_SPACE: &str = "IFCSPACE";
pub const IFC_CARTESIAN_POINT: &str = "IFCCARTESIANPOINT";
pub const IFC_AXIS2_PLACEMENT_3D: &str = "IFCAXIS2PLACEMENT3D";
pub const IFC_LOCAL_PLACEMENT: &str = "IFCLOCALPLACEMENT";

/// IfcRoot-style records: [0]=GlobalId, [1]=OwnerHistory, [2]=Name.
pub const ATTR_GLOBAL_ID: usize = 0;
pub const ATTR_NAME: usize = 2;

/// IfcBuildingStorey: [2]=Name, [9]=Elevation.
pub const STOREY_NAME: usize = 2;
pub const STOREY_ELEVATION: usize = 9;
pub const STOREY_MIN_ARGS_ELEVATION: usize = 10;

/// IfcPropertySingleValue: [0]=Name, [2]=NominalValue.
pub const PROP_NAME: usize = 0;
pub const PROP_NOMINAL_VALUE: usize = 2;
pub const PROP_MIN_ARGS: usize = 3;

/// IfcPropertySet: [2]=Name, [4]=HasProperties.
pub const PSET_NAME: usize = 2;
pub const PSET_HAS_PROPERTIES: usize = 4;
pub const PSET_MIN_ARGS: usize = 5;

/// IfcRelContainedInSpatialStructure: [4]=RelatedElements, [5]=RelatingStructure.
pub const CONTAINMENT_RELATED: usize = 4;
pub const CONTAINMENT_RELATING: usize = 5;
pub const CONTAINMENT_MIN_ARGS: usize = 6;

/// IfcRelDefinesByProperties: [4]=RelatedObjects, [5]=RelatingPropertyDefinition.
pub const DEFINES_RELATED: usize = 4;
pub const DEFINES_PSETS: usize = 5;
pub const DEFINES_MIN_ARGS: usize = 6;

/// IfcSpace: [5]=ObjectPlacement.
pub const SPACE_PLACEMENT: usize = 5;

/// IfcCartesianPoint: [0]=Coordinates.
pub const POINT_COORDINATES: usize = 0;

/// IfcAxis2Placement3D: [0]=Location.
pub const AXIS_LOCATION: usize = 0;

/// IfcLocalPlacement: [0]=PlacementRelTo, [1]=RelativePlacement.
pub const PLACEMENT_PARENT: usize = 0;
pub const PLACEMENT_RELATIVE: usize = 1;
pub const PLACEMENT_MIN_ARGS: usize = 2;
