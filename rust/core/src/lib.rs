// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # CityMesh Core
//!
//! Typed in-memory structures for CityJSON-style city models: the
//! shared vertex table, city objects, and the five-kind geometry
//! boundary union with its optional semantics block.
//!
//! File deserialization is out of scope; the input boundary is an
//! already-parsed generic tree ([`serde_json::Value`]), converted into
//! the typed model by [`json::model_from_value`].
//!
//! ## Quick Start
//!
//! ```rust
//! use citymesh_core::{json, CityModel};
//!
//! let tree = serde_json::json!({
//!     "type": "CityJSON",
//!     "version": "1.1",
//!     "vertices": [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]],
//!     "CityObjects": {
//!         "b1": {
//!             "type": "Building",
//!             "geometry": [{
//!                 "type": "MultiSurface",
//!                 "lod": "1",
//!                 "boundaries": [[[0, 1, 2]]]
//!             }]
//!         }
//!     }
//! });
//!
//! let model: CityModel = json::model_from_value(&tree).unwrap();
//! assert_eq!(model.object_index("b1"), Some(0));
//! ```

pub mod error;
pub mod geometry;
pub mod json;
pub mod model;

pub use error::{Error, Result};
pub use geometry::{
    Boundaries, Geometry, Polygon, Ring, SemanticSurface, SemanticValues, Semantics, Shell,
    VertexId,
};
pub use json::{geometry_from_value, model_from_value, object_from_value};
pub use model::{CityModel, CityObject};
