// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! City model container
//!
//! Holds the shared vertex table and the city objects in insertion
//! order. Object insertion order is significant: it defines the object
//! index that ends up in the mesh buffer's per-vertex object stream.

use nalgebra::Point3;
use rustc_hash::FxHashMap;

use crate::geometry::Geometry;

/// One city object: its type name and its geometries.
#[derive(Debug, Clone, PartialEq)]
pub struct CityObject {
    /// CityJSON object type, e.g. "Building" or "Road".
    pub kind: String,
    pub geometry: Vec<Geometry>,
}

impl CityObject {
    pub fn new(kind: impl Into<String>, geometry: Vec<Geometry>) -> Self {
        Self {
            kind: kind.into(),
            geometry,
        }
    }
}

/// A parsed city model: the global vertex table plus an ordered set of
/// city objects keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct CityModel {
    /// Shared vertex coordinates, referenced by index from every ring.
    pub vertices: Vec<Point3<f64>>,
    ids: Vec<String>,
    objects: Vec<CityObject>,
    index: FxHashMap<String, usize>,
}

impl CityModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a model with a pre-built vertex table.
    pub fn with_vertices(vertices: Vec<Point3<f64>>) -> Self {
        Self {
            vertices,
            ..Self::default()
        }
    }

    /// Insert an object, appending it to the id order. Re-inserting an
    /// existing id replaces the object but keeps its original position.
    pub fn insert_object(&mut self, id: impl Into<String>, object: CityObject) {
        let id = id.into();
        if let Some(&pos) = self.index.get(&id) {
            self.objects[pos] = object;
        } else {
            self.index.insert(id.clone(), self.ids.len());
            self.ids.push(id);
            self.objects.push(object);
        }
    }

    pub fn object(&self, id: &str) -> Option<&CityObject> {
        self.index.get(id).map(|&pos| &self.objects[pos])
    }

    /// Position of an object id within the insertion order.
    pub fn object_index(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Object ids in insertion order.
    pub fn object_ids(&self) -> &[String] {
        &self.ids
    }

    pub fn objects(&self) -> impl Iterator<Item = (&str, &CityObject)> {
        self.ids
            .iter()
            .map(String::as_str)
            .zip(self.objects.iter())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_defines_index() {
        let mut model = CityModel::new();
        model.insert_object("b", CityObject::new("Building", vec![]));
        model.insert_object("a", CityObject::new("Road", vec![]));

        assert_eq!(model.object_index("b"), Some(0));
        assert_eq!(model.object_index("a"), Some(1));
        assert_eq!(model.object_index("missing"), None);
        assert_eq!(model.object_ids(), &["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_reinsert_keeps_position() {
        let mut model = CityModel::new();
        model.insert_object("a", CityObject::new("Building", vec![]));
        model.insert_object("b", CityObject::new("Road", vec![]));
        model.insert_object("a", CityObject::new("Bridge", vec![]));

        assert_eq!(model.object_index("a"), Some(0));
        assert_eq!(model.object("a").unwrap().kind, "Bridge");
        assert_eq!(model.len(), 2);
    }
}
