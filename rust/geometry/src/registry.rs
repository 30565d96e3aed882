// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Name-to-index registries
//!
//! Three registries back the mesh buffer's attribute streams:
//!
//! - [`SemanticRegistry`]: surface type names, growing. First sight of
//!   a name assigns the next index and a placeholder color, so indices
//!   are stable only within one registry lifetime.
//! - [`ObjectTypeRegistry`]: object type names, fixed. Lookup of an
//!   unknown name is reported, never registered; inventing categories
//!   for objects is a data-quality decision this crate does not make.
//! - [`LodRegistry`]: level-of-detail strings, growing.
//!
//! The growing registries serialize check-else-register behind one
//! mutex so concurrent workers agree on a single index per name.

use rustc_hash::FxHashMap;
use std::sync::Mutex;

/// Buffer sentinel for "polygon has no semantic surface".
pub const NO_SURFACE: i32 = -1;

/// Buffer sentinel for "geometry has no LoD".
pub const NO_LOD: i32 = -1;

/// One registered semantic surface type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticEntry {
    pub name: String,
    /// Placeholder 0xRRGGBB color; downstream material lookup may
    /// replace it.
    pub color: u32,
}

#[derive(Default)]
struct OrderedNames {
    indices: FxHashMap<String, u32>,
    names: Vec<String>,
}

impl OrderedNames {
    fn resolve(&mut self, name: &str) -> u32 {
        if let Some(&index) = self.indices.get(name) {
            return index;
        }
        let index = self.names.len() as u32;
        self.indices.insert(name.to_string(), index);
        self.names.push(name.to_string());
        index
    }
}

/// Growing registry of semantic surface types.
pub struct SemanticRegistry {
    inner: Mutex<SemanticInner>,
}

#[derive(Default)]
struct SemanticInner {
    names: OrderedNames,
    colors: Vec<u32>,
}

impl SemanticRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(SemanticInner::default()),
        }
    }

    /// Registry pre-seeded with the well-known CityJSON surface types
    /// and their conventional viewer colors.
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        for (name, color) in [
            ("GroundSurface", 0x999999),
            ("WallSurface", 0xffffff),
            ("RoofSurface", 0xff0000),
            ("TrafficArea", 0x6e6e6e),
            ("AuxiliaryTrafficArea", 0x2c8200),
            ("Window", 0x0059ff),
            ("Door", 0x640000),
        ] {
            registry.register(name, color);
        }
        registry
    }

    fn register(&self, name: &str, color: u32) -> u32 {
        let mut inner = self.inner.lock().unwrap();
        let index = inner.names.resolve(name);
        if index as usize == inner.colors.len() {
            inner.colors.push(color);
        }
        index
    }

    /// Index of `name`, registering it with a generated placeholder
    /// color on first sight. Registration order defines indices.
    pub fn resolve(&self, name: &str) -> u32 {
        self.register(name, placeholder_color(name))
    }

    /// Index of `name` without registering it.
    pub fn get(&self, name: &str) -> Option<u32> {
        self.inner.lock().unwrap().names.indices.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().names.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the registered entries in index order.
    pub fn entries(&self) -> Vec<SemanticEntry> {
        let inner = self.inner.lock().unwrap();
        inner
            .names
            .names
            .iter()
            .zip(&inner.colors)
            .map(|(name, &color)| SemanticEntry {
                name: name.clone(),
                color,
            })
            .collect()
    }
}

impl Default for SemanticRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic placeholder color from a surface type name.
///
/// FNV-1a over the name bytes, masked to 24 bits. The upstream viewer
/// rolled a random color here; a name hash keeps reruns comparable.
fn placeholder_color(name: &str) -> u32 {
    let mut hash: u32 = 0x811c9dc5;
    for byte in name.bytes() {
        hash ^= byte as u32;
        hash = hash.wrapping_mul(0x01000193);
    }
    hash & 0xffffff
}

/// Fixed registry of city-object type names.
///
/// Backed by an externally supplied ordered list; the first occurrence
/// of a name wins its position. Never grows.
#[derive(Debug, Clone, Default)]
pub struct ObjectTypeRegistry {
    names: Vec<String>,
    indices: FxHashMap<String, u32>,
}

impl ObjectTypeRegistry {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::default();
        for name in names {
            let name = name.into();
            let index = registry.names.len() as u32;
            registry.indices.entry(name.clone()).or_insert(index);
            registry.names.push(name);
        }
        registry
    }

    /// Positional index of a type name, `None` when unknown.
    pub fn resolve(&self, name: &str) -> Option<u32> {
        self.indices.get(name).copied()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Growing registry of level-of-detail strings ("1", "2.2", ...).
#[derive(Default)]
pub struct LodRegistry {
    inner: Mutex<OrderedNames>,
}

impl LodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `lod`, registering it on first sight.
    pub fn resolve(&self, lod: &str) -> u32 {
        self.inner.lock().unwrap().resolve(lod)
    }

    /// Registered LoD strings in index order.
    pub fn lods(&self) -> Vec<String> {
        self.inner.lock().unwrap().names.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
