// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Triangle buffer
//!
//! Append-only parallel attribute streams, one entry per emitted
//! triangle vertex. Geometry stays indexed: the `vertices` stream holds
//! indices into the model's shared vertex table, so no coordinates are
//! copied here. A renderer zips the streams into vertex attributes and
//! resolves positions and colors downstream.

use crate::registry::{NO_LOD, NO_SURFACE};

/// Attribute values shared by every vertex of one polygon's triangles.
///
/// Resolved once per polygon by the mesher; emitting all three corners
/// of a triangle from one value makes the "attributes never differ
/// within a triangle" invariant structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceAttributes {
    /// Position of the owning object in the model's id order.
    pub object_id: u32,
    /// Index of the owning object's type in the object-type registry.
    pub object_kind: u32,
    /// Semantic surface index, or [`NO_SURFACE`].
    pub surface_kind: i32,
    /// Index of the geometry within the owning object.
    pub geometry_id: u32,
    /// Index of the polygon within its shell or surface list.
    pub boundary_id: u32,
    /// LoD registry index, or [`NO_LOD`].
    pub lod: i32,
}

impl Default for FaceAttributes {
    fn default() -> Self {
        Self {
            object_id: 0,
            object_kind: 0,
            surface_kind: NO_SURFACE,
            geometry_id: 0,
            boundary_id: 0,
            lod: NO_LOD,
        }
    }
}

/// Flat triangulated output of a mesh pass.
///
/// All streams are index-aligned and share their length; after each
/// polygon emission the length is a multiple of 3. Owned by the caller
/// driving a pass; `clear` is the only reset path.
#[derive(Debug, Clone, Default)]
pub struct TriangleBuffer {
    /// Vertex-table indices, three per triangle.
    pub vertices: Vec<u32>,
    pub object_ids: Vec<u32>,
    pub object_kinds: Vec<u32>,
    pub surface_kinds: Vec<i32>,
    pub geometry_ids: Vec<u32>,
    pub boundary_ids: Vec<u32>,
    pub lods: Vec<i32>,
}

impl TriangleBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer with capacity for `vertex_count` emissions.
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            object_ids: Vec::with_capacity(vertex_count),
            object_kinds: Vec::with_capacity(vertex_count),
            surface_kinds: Vec::with_capacity(vertex_count),
            geometry_ids: Vec::with_capacity(vertex_count),
            boundary_ids: Vec::with_capacity(vertex_count),
            lods: Vec::with_capacity(vertex_count),
        }
    }

    /// Append one triangle vertex.
    #[inline]
    pub fn add_vertex(&mut self, vertex: u32, attributes: &FaceAttributes) {
        self.vertices.push(vertex);
        self.object_ids.push(attributes.object_id);
        self.object_kinds.push(attributes.object_kind);
        self.surface_kinds.push(attributes.surface_kind);
        self.geometry_ids.push(attributes.geometry_id);
        self.boundary_ids.push(attributes.boundary_id);
        self.lods.push(attributes.lod);
    }

    /// Number of emitted vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Concatenate another buffer onto this one.
    ///
    /// Both buffers index the same shared vertex table, so no index
    /// remapping is needed; this is how per-worker private buffers are
    /// merged after a parallel pass.
    pub fn merge(&mut self, other: &TriangleBuffer) {
        if other.is_empty() {
            return;
        }
        self.vertices.extend_from_slice(&other.vertices);
        self.object_ids.extend_from_slice(&other.object_ids);
        self.object_kinds.extend_from_slice(&other.object_kinds);
        self.surface_kinds.extend_from_slice(&other.surface_kinds);
        self.geometry_ids.extend_from_slice(&other.geometry_ids);
        self.boundary_ids.extend_from_slice(&other.boundary_ids);
        self.lods.extend_from_slice(&other.lods);
    }

    /// Reset every stream to empty.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.object_ids.clear();
        self.object_kinds.clear();
        self.surface_kinds.clear();
        self.geometry_ids.clear();
        self.boundary_ids.clear();
        self.lods.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(object_id: u32) -> FaceAttributes {
        FaceAttributes {
            object_id,
            object_kind: 1,
            surface_kind: 2,
            geometry_id: 0,
            boundary_id: 3,
            lod: 0,
        }
    }

    #[test]
    fn test_streams_stay_aligned() {
        let mut buffer = TriangleBuffer::new();
        for v in [4u32, 7, 9] {
            buffer.add_vertex(v, &attrs(0));
        }

        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.triangle_count(), 1);
        assert_eq!(buffer.vertices, vec![4, 7, 9]);
        assert_eq!(buffer.object_ids, vec![0, 0, 0]);
        assert_eq!(buffer.surface_kinds, vec![2, 2, 2]);
        assert_eq!(buffer.boundary_ids.len(), buffer.lods.len());
    }

    #[test]
    fn test_clear_resets_all_streams() {
        let mut buffer = TriangleBuffer::new();
        buffer.add_vertex(0, &attrs(0));
        buffer.clear();

        assert!(buffer.is_empty());
        assert!(buffer.object_ids.is_empty());
        assert!(buffer.object_kinds.is_empty());
        assert!(buffer.surface_kinds.is_empty());
        assert!(buffer.geometry_ids.is_empty());
        assert!(buffer.boundary_ids.is_empty());
        assert!(buffer.lods.is_empty());
    }

    #[test]
    fn test_merge_concatenates() {
        let mut a = TriangleBuffer::new();
        let mut b = TriangleBuffer::new();
        for v in 0..3 {
            a.add_vertex(v, &attrs(0));
        }
        for v in 3..6 {
            b.add_vertex(v, &attrs(1));
        }

        a.merge(&b);
        assert_eq!(a.len(), 6);
        assert_eq!(a.vertices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(a.object_ids, vec![0, 0, 0, 1, 1, 1]);
    }
}
