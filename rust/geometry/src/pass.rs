// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Whole-model triangulation pass
//!
//! Independent city objects have no cross-dependencies, so the pass
//! fans them out across rayon workers. Each worker appends into a
//! private [`TriangleBuffer`]; the buffers are concatenated afterward,
//! which keeps the shared output free of contention. Only the growing
//! registries are shared, and they serialize internally.
//!
//! Per-object errors never abort the pass; they are collected so the
//! caller can report partial success.

use rayon::prelude::*;

use citymesh_core::CityModel;

use crate::buffer::TriangleBuffer;
use crate::error::Error;
use crate::registry::{LodRegistry, ObjectTypeRegistry, SemanticRegistry};
use crate::walker::Mesher;

/// One skipped object and the reason it was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectError {
    pub object_id: String,
    pub error: Error,
}

/// Result of a whole-model pass: the merged buffer plus the objects
/// that could not be triangulated.
#[derive(Debug, Default)]
pub struct PassOutcome {
    pub buffer: TriangleBuffer,
    pub errors: Vec<ObjectError>,
}

impl PassOutcome {
    /// True when every object triangulated cleanly.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Triangulate every object in the model in parallel.
///
/// Output ordering follows the model's object order (workers collect in
/// input order before merging), though consumers of the buffer do not
/// depend on it.
pub fn triangulate_model(
    model: &CityModel,
    object_kinds: &ObjectTypeRegistry,
    surfaces: &SemanticRegistry,
    lods: &LodRegistry,
) -> PassOutcome {
    let mesher = Mesher::new(model, object_kinds, surfaces, lods);

    let results: Vec<(&str, TriangleBuffer, Result<(), Error>)> = model
        .object_ids()
        .par_iter()
        .map(|object_id| {
            let mut buffer = TriangleBuffer::new();
            let result = mesher.triangulate_object(object_id, &mut buffer);
            (object_id.as_str(), buffer, result)
        })
        .collect();

    let mut outcome = PassOutcome::default();
    for (object_id, buffer, result) in results {
        match result {
            Ok(()) => outcome.buffer.merge(&buffer),
            Err(error) => {
                tracing::warn!(object_id, %error, "skipping object");
                outcome.errors.push(ObjectError {
                    object_id: object_id.to_string(),
                    error,
                });
            }
        }
    }

    tracing::debug!(
        objects = model.len(),
        skipped = outcome.errors.len(),
        triangles = outcome.buffer.triangle_count(),
        "triangulated city model"
    );

    outcome
}
