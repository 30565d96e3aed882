// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # CityMesh Geometry
//!
//! Turns city-model boundary trees into flat, render-ready triangle
//! buffers using earcutr triangulation and nalgebra for the planar
//! math. Every emitted vertex carries provenance: owning object,
//! object type, semantic surface, geometry index and LoD.
//!
//! The typical entry point is [`triangulate_model`], which fans city
//! objects out over rayon workers and merges their private buffers.
//! [`Mesher`] drives single objects for callers that manage their own
//! buffers.

pub mod buffer;
pub mod error;
pub mod pass;
pub mod registry;
pub mod triangulation;
pub mod walker;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector3};

pub use buffer::{FaceAttributes, TriangleBuffer};
pub use error::{Error, Result};
pub use pass::{triangulate_model, ObjectError, PassOutcome};
pub use registry::{
    LodRegistry, ObjectTypeRegistry, SemanticEntry, SemanticRegistry, NO_LOD, NO_SURFACE,
};
pub use triangulation::{newell_normal, plane_basis, project_to_plane, triangulate_face};
pub use walker::Mesher;
