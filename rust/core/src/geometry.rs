// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry boundary structures
//!
//! CityJSON geometries carry boundary arrays whose nesting depth depends
//! on the geometry kind: a `MultiSurface` is a list of polygons, a
//! `Solid` adds a shell level above that, and a `MultiSolid` adds one
//! more. The tagged union below encodes each kind with its exact shape
//! so the mesher can match on it exhaustively instead of branching on a
//! type string.

/// Index into the model's shared vertex table.
pub type VertexId = usize;

/// Ordered, implicitly closed boundary loop (first vertex not repeated).
pub type Ring = Vec<VertexId>;

/// One polygonal face: the outer ring first, then zero or more holes.
pub type Polygon = Vec<Ring>;

/// One closed boundary component of a solid, as a sequence of polygons.
pub type Shell = Vec<Polygon>;

/// Boundary tree of a geometry, one variant per CityJSON kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Boundaries {
    /// Shells: the exterior shell first, then interior cavities.
    Solid(Vec<Shell>),
    MultiSolid(Vec<Vec<Shell>>),
    CompositeSolid(Vec<Vec<Shell>>),
    MultiSurface(Vec<Polygon>),
    CompositeSurface(Vec<Polygon>),
    /// A kind this crate does not triangulate (e.g. `GeometryInstance`).
    /// Carried verbatim so the mesher can skip it without failing the
    /// whole pass.
    Unsupported(String),
}

impl Boundaries {
    /// CityJSON kind tag for this boundary tree.
    pub fn kind(&self) -> &str {
        match self {
            Boundaries::Solid(_) => "Solid",
            Boundaries::MultiSolid(_) => "MultiSolid",
            Boundaries::CompositeSolid(_) => "CompositeSolid",
            Boundaries::MultiSurface(_) => "MultiSurface",
            Boundaries::CompositeSurface(_) => "CompositeSurface",
            Boundaries::Unsupported(kind) => kind,
        }
    }
}

/// One named surface definition from `semantics.surfaces`.
///
/// CityJSON allows arbitrary extra attributes on surface definitions;
/// only the type name matters for mesh generation, so the rest is
/// dropped at conversion time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticSurface {
    pub kind: String,
}

impl SemanticSurface {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }
}

/// Per-polygon surface-definition indices.
///
/// The values tree mirrors the boundary nesting minus the ring level:
/// one leaf per polygon, and a leaf may be null when a polygon has no
/// semantic classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticValues {
    /// For `MultiSurface` / `CompositeSurface`: one leaf per polygon.
    Surface(Vec<Option<usize>>),
    /// For `Solid`: indexed `[shell][polygon]`.
    Solid(Vec<Vec<Option<usize>>>),
    /// For `MultiSolid` / `CompositeSolid`: indexed `[solid][shell][polygon]`.
    MultiSolid(Vec<Vec<Vec<Option<usize>>>>),
}

/// Semantics block of a geometry: surface definitions plus the values
/// tree referencing them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Semantics {
    pub surfaces: Vec<SemanticSurface>,
    pub values: SemanticValues,
}

/// One geometry of a city object.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub boundaries: Boundaries,
    pub semantics: Option<Semantics>,
    /// Level of detail, normalized to its string form ("1", "2.2", ...).
    pub lod: Option<String>,
}

impl Geometry {
    /// Geometry without semantics or LoD.
    pub fn new(boundaries: Boundaries) -> Self {
        Self {
            boundaries,
            semantics: None,
            lod: None,
        }
    }
}
