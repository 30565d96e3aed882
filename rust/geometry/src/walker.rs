// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boundary walker
//!
//! Descends a geometry's boundary tree down to individual polygons and
//! emits triangles into a [`TriangleBuffer`]. The nesting depth depends
//! on the geometry kind: a `Solid` contributes one shell level, a
//! `MultiSolid` two, a `MultiSurface` none. Semantics values mirror the
//! boundary nesting one level up, so each dispatch arm pairs the
//! polygon list it reaches with the matching per-polygon value slice.

use citymesh_core::{
    Boundaries, CityModel, Geometry, Polygon, SemanticSurface, SemanticValues,
};
use nalgebra::Point3;
use smallvec::SmallVec;

use crate::buffer::{FaceAttributes, TriangleBuffer};
use crate::error::{Error, Result};
use crate::registry::{LodRegistry, ObjectTypeRegistry, SemanticRegistry, NO_LOD, NO_SURFACE};
use crate::triangulation::{newell_normal, project_to_plane, triangulate_face};

/// Walks city-object geometries and emits triangles.
///
/// Borrows the model and the registries; the output buffer is owned by
/// the caller and passed into each call, so independent workers can
/// drive one `Mesher` against private buffers concurrently.
pub struct Mesher<'a> {
    model: &'a CityModel,
    object_kinds: &'a ObjectTypeRegistry,
    surfaces: &'a SemanticRegistry,
    lods: &'a LodRegistry,
}

impl<'a> Mesher<'a> {
    pub fn new(
        model: &'a CityModel,
        object_kinds: &'a ObjectTypeRegistry,
        surfaces: &'a SemanticRegistry,
        lods: &'a LodRegistry,
    ) -> Self {
        Self {
            model,
            object_kinds,
            surfaces,
            lods,
        }
    }

    /// Triangulate every geometry of one city object.
    pub fn triangulate_object(&self, object_id: &str, buffer: &mut TriangleBuffer) -> Result<()> {
        let object = self
            .model
            .object(object_id)
            .ok_or_else(|| Error::OwnerNotFound(object_id.to_string()))?;

        for (geometry_id, geometry) in object.geometry.iter().enumerate() {
            self.triangulate_geometry(geometry, object_id, geometry_id, buffer)?;
        }
        Ok(())
    }

    /// Triangulate one geometry of the object identified by `object_id`.
    ///
    /// Owner and object-type resolution happen once here, not per
    /// polygon. An unsupported geometry kind is a no-op, not an error.
    pub fn triangulate_geometry(
        &self,
        geometry: &Geometry,
        object_id: &str,
        geometry_id: usize,
        buffer: &mut TriangleBuffer,
    ) -> Result<()> {
        let owner = self
            .model
            .object_index(object_id)
            .ok_or_else(|| Error::OwnerNotFound(object_id.to_string()))?;
        let object = self
            .model
            .object(object_id)
            .ok_or_else(|| Error::OwnerNotFound(object_id.to_string()))?;

        let object_kind = self
            .object_kinds
            .resolve(&object.kind)
            .ok_or_else(|| Error::ObjectTypeNotFound(object.kind.clone()))?;

        let lod = match geometry.lod.as_deref() {
            Some(lod) => self.lods.resolve(lod) as i32,
            None => NO_LOD,
        };

        let base = FaceAttributes {
            object_id: owner as u32,
            object_kind,
            surface_kind: NO_SURFACE,
            geometry_id: geometry_id as u32,
            boundary_id: 0,
            lod,
        };

        let surfaces = geometry
            .semantics
            .as_ref()
            .map(|s| s.surfaces.as_slice())
            .unwrap_or(&[]);
        let values = geometry.semantics.as_ref().map(|s| &s.values);

        match &geometry.boundaries {
            Boundaries::Solid(shells) => {
                for (shell_id, shell) in shells.iter().enumerate() {
                    let shell_values = match values {
                        Some(SemanticValues::Solid(v)) => v.get(shell_id).map(Vec::as_slice),
                        _ => None,
                    };
                    self.triangulate_polygons(shell, shell_values, surfaces, base, buffer);
                }
            }
            Boundaries::MultiSurface(polygons) | Boundaries::CompositeSurface(polygons) => {
                let flat_values = match values {
                    Some(SemanticValues::Surface(v)) => Some(v.as_slice()),
                    _ => None,
                };
                self.triangulate_polygons(polygons, flat_values, surfaces, base, buffer);
            }
            Boundaries::MultiSolid(solids) | Boundaries::CompositeSolid(solids) => {
                for (solid_id, solid) in solids.iter().enumerate() {
                    for (shell_id, shell) in solid.iter().enumerate() {
                        let shell_values = match values {
                            Some(SemanticValues::MultiSolid(v)) => v
                                .get(solid_id)
                                .and_then(|solid| solid.get(shell_id))
                                .map(Vec::as_slice),
                            _ => None,
                        };
                        self.triangulate_polygons(shell, shell_values, surfaces, base, buffer);
                    }
                }
            }
            Boundaries::Unsupported(kind) => {
                tracing::debug!(kind = %kind, "skipping unsupported geometry kind");
            }
        }

        Ok(())
    }

    /// Triangulate one polygon list (a shell, or a surface collection)
    /// with its per-polygon semantic values.
    fn triangulate_polygons(
        &self,
        polygons: &[Polygon],
        values: Option<&[Option<usize>]>,
        surfaces: &[SemanticSurface],
        base: FaceAttributes,
        buffer: &mut TriangleBuffer,
    ) {
        for (boundary_id, polygon) in polygons.iter().enumerate() {
            let surface_kind = values
                .and_then(|v| v.get(boundary_id).copied().flatten())
                .and_then(|def| surfaces.get(def))
                .map(|surface| self.surfaces.resolve(&surface.kind) as i32)
                .unwrap_or(NO_SURFACE);

            let attributes = FaceAttributes {
                surface_kind,
                boundary_id: boundary_id as u32,
                ..base
            };
            self.triangulate_polygon(polygon, &attributes, buffer);
        }
    }

    /// Triangulate one polygon (outer ring plus holes) and emit.
    ///
    /// Hole start offsets are the running vertex count of all rings
    /// flattened before each hole, which is exactly the convention the
    /// ear-clipper expects.
    fn triangulate_polygon(
        &self,
        polygon: &[citymesh_core::Ring],
        attributes: &FaceAttributes,
        buffer: &mut TriangleBuffer,
    ) {
        let mut boundary: Vec<usize> = Vec::new();
        let mut holes: SmallVec<[usize; 4]> = SmallVec::new();

        for ring in polygon {
            if !boundary.is_empty() {
                holes.push(boundary.len());
            }
            boundary.extend_from_slice(ring);
        }

        // Fast path: already a triangle. Skips normal estimation and
        // ear-clipping, which also sidesteps the undefined normal of a
        // degenerate triangle.
        if boundary.len() == 3 && holes.is_empty() {
            for &vertex in &boundary {
                buffer.add_vertex(vertex as u32, attributes);
            }
            return;
        }
        if boundary.len() < 3 {
            return;
        }

        let points: Vec<Point3<f64>> = boundary
            .iter()
            .map(|&vertex| self.model.vertices[vertex])
            .collect();

        let normal = newell_normal(&points);
        let projected = project_to_plane(&points, &normal);
        let triangles = triangulate_face(&projected, &holes);

        // Local triangulation indices map back through the flattened
        // boundary to shared vertex-table indices.
        for local in triangles {
            buffer.add_vertex(boundary[local] as u32, attributes);
        }
    }
}
