// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end pass over a small CityJSON tree: generic tree in,
//! merged triangle buffer out.

use citymesh_core::json::model_from_value;
use citymesh_geometry::{
    triangulate_model, LodRegistry, ObjectTypeRegistry, SemanticRegistry, NO_SURFACE,
};
use serde_json::json;

fn sample_city() -> serde_json::Value {
    json!({
        "type": "CityJSON",
        "version": "1.1",
        "vertices": [
            // building footprint at z=0 and roof at z=3
            [0.0, 0.0, 0.0], [4.0, 0.0, 0.0], [4.0, 4.0, 0.0], [0.0, 4.0, 0.0],
            [0.0, 0.0, 3.0], [4.0, 0.0, 3.0], [4.0, 4.0, 3.0], [0.0, 4.0, 3.0],
            // road triangle
            [10.0, 0.0, 0.0], [14.0, 0.0, 0.0], [12.0, 2.0, 0.0]
        ],
        "CityObjects": {
            "building-1": {
                "type": "Building",
                "geometry": [{
                    "type": "Solid",
                    "lod": "2",
                    "boundaries": [[
                        [[0, 3, 2, 1]],
                        [[4, 5, 6, 7]],
                        [[0, 1, 5, 4]],
                        [[1, 2, 6, 5]],
                        [[2, 3, 7, 6]],
                        [[3, 0, 4, 7]]
                    ]],
                    "semantics": {
                        "surfaces": [
                            {"type": "GroundSurface"},
                            {"type": "RoofSurface"},
                            {"type": "WallSurface"}
                        ],
                        "values": [[0, 1, 2, 2, 2, 2]]
                    }
                }]
            },
            "road-1": {
                "type": "Road",
                "geometry": [{
                    "type": "MultiSurface",
                    "lod": "1",
                    "boundaries": [[[8, 9, 10]]]
                }]
            },
            "sculpture-1": {
                "type": "CityFurniture",
                "geometry": [{
                    "type": "MultiSurface",
                    "lod": "1",
                    "boundaries": [[[8, 9, 10]]]
                }]
            }
        }
    })
}

#[test]
fn test_tree_to_triangle_buffer() {
    let model = model_from_value(&sample_city()).unwrap();
    let object_kinds = ObjectTypeRegistry::new(["Building", "Road"]);
    let surfaces = SemanticRegistry::with_defaults();
    let lods = LodRegistry::new();

    let outcome = triangulate_model(&model, &object_kinds, &surfaces, &lods);

    // the sculpture's type is not registered: reported, not fatal
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].object_id, "sculpture-1");

    // 6 quads -> 12 triangles, plus the road triangle
    assert_eq!(outcome.buffer.triangle_count(), 13);
    assert_eq!(outcome.buffer.len() % 3, 0);

    // every building vertex references the shared table
    assert!(outcome.buffer.vertices.iter().all(|&v| v < 11));

    // provenance streams: building is object 0, road object 1
    let building_vertices = outcome
        .buffer
        .object_ids
        .iter()
        .filter(|&&o| o == 0)
        .count();
    assert_eq!(building_vertices, 36);
    let road_vertices = outcome
        .buffer
        .object_ids
        .iter()
        .filter(|&&o| o == 1)
        .count();
    assert_eq!(road_vertices, 3);

    // the road has no semantics block
    let road_surface = outcome
        .buffer
        .object_ids
        .iter()
        .zip(&outcome.buffer.surface_kinds)
        .find(|(&o, _)| o == 1)
        .map(|(_, &s)| s);
    assert_eq!(road_surface, Some(NO_SURFACE));

    // building surfaces resolved through the seeded registry
    let roof = surfaces.get("RoofSurface").unwrap() as i32;
    assert!(outcome.buffer.surface_kinds.contains(&roof));

    // both LoDs registered; worker scheduling decides which is first
    let registered = lods.lods();
    assert_eq!(registered.len(), 2);
    assert!(registered.contains(&"1".to_string()));
    assert!(registered.contains(&"2".to_string()));
}

#[test]
fn test_buffer_reuse_across_passes() {
    let model = model_from_value(&sample_city()).unwrap();
    let object_kinds = ObjectTypeRegistry::new(["Building", "Road", "CityFurniture"]);
    let surfaces = SemanticRegistry::with_defaults();
    let lods = LodRegistry::new();

    let outcome = triangulate_model(&model, &object_kinds, &surfaces, &lods);
    assert!(outcome.is_complete());

    let mut buffer = outcome.buffer;
    let first_len = buffer.len();
    buffer.clear();
    assert!(buffer.is_empty());

    // a fresh pass into the cleared buffer reproduces the same count
    let second = triangulate_model(&model, &object_kinds, &surfaces, &lods);
    buffer.merge(&second.buffer);
    assert_eq!(buffer.len(), first_len);
}
