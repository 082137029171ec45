// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IFC Audit Core
//!
//! Forgiving STEP/IFC subset parser and entity-graph builder.
//!
//! Parses the line-oriented STEP physical format (ISO 10303-21), resolves
//! property-set and spatial-containment relationships into a normalized
//! [`Model`], and infers storey membership from placement geometry when no
//! explicit containment exists.
//!
//! ## Overview
//!
//! - **Record scanning**: `#id = KEYWORD(args);` lines, with
//!   [memchr](https://docs.rs/memchr)-accelerated delimiter search
//! - **String decoding**: STEP's `\X2\...\X0\` extended-Unicode escapes
//! - **Entity graph**: property sets, containment and storey assignment
//! - **Elevation fallback**: memoized placement-chain Z resolution
//!
//! Only a handful of entity keywords are understood semantically; every
//! other record is retained as an opaque entity. Malformed input never
//! errors — failed inferences degrade to absent values.
//!
//! ## Quick Start
//!
//! ```rust
//! use ifc_audit_core::build_model;
//!
//! let content = r#"
//! #1=IFCBUILDINGSTOREY('g1',$,'Ground',$,$,$,$,$,.ELEMENT.,0.);
//! #2=IFCWALL('g2',$,'Wall-001',$,$,$,$,$);
//! #3=IFCRELCONTAINEDINSPATIALSTRUCTURE('g3',$,$,$,(#2),#1);
//! "#;
//!
//! let model = build_model("model.ifc", content);
//! let wall = model.entity(2).unwrap();
//! assert_eq!(wall.name, "Wall-001");
//! assert_eq!(wall.storey_name, "Ground");
//! ```

pub mod builder;
pub mod decode;
pub mod elevation;
pub mod error;
pub mod model;
pub mod scanner;
pub mod schema;

pub use builder::{build_model, parse_file};
pub use decode::{parse_float, parse_id_list, parse_ref, unescape, IdList};
pub use elevation::{nearest_storey, PlacementResolver};
pub use error::{Error, Result};
pub use model::{Entity, Model, PropertyKey};
pub use scanner::{scan_records, tokenize_line, RawRecord};
