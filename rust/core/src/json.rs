// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Generic-tree conversion
//!
//! Builds the typed city model from an already-parsed JSON tree
//! (`serde_json::Value`). This is deliberately not a file parser: the
//! caller owns deserialization, this module only interprets the tree
//! shapes CityJSON defines.
//!
//! Unknown geometry kinds convert to [`Boundaries::Unsupported`] rather
//! than erroring, so newer files with kinds this crate does not
//! triangulate still convert cleanly.

use nalgebra::Point3;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::geometry::{
    Boundaries, Geometry, Polygon, Ring, SemanticSurface, SemanticValues, Semantics, Shell,
};
use crate::model::{CityModel, CityObject};

/// Convert a whole parsed CityJSON tree into a [`CityModel`].
///
/// Applies the optional `transform` block (quantized vertices) so the
/// vertex table holds world coordinates.
pub fn model_from_value(value: &Value) -> Result<CityModel> {
    let root = value
        .as_object()
        .ok_or(Error::UnexpectedShape {
            field: "root",
            expected: "an object",
        })?;

    let transform = match root.get("transform") {
        Some(t) => Some(parse_transform(t)?),
        None => None,
    };

    let vertices = root.get("vertices").ok_or(Error::MissingField("vertices"))?;
    let vertices = parse_vertices(vertices, transform.as_ref())?;

    let mut model = CityModel::with_vertices(vertices);

    let objects = root
        .get("CityObjects")
        .ok_or(Error::MissingField("CityObjects"))?
        .as_object()
        .ok_or(Error::UnexpectedShape {
            field: "CityObjects",
            expected: "an object",
        })?;

    for (id, object) in objects {
        model.insert_object(id.clone(), object_from_value(object)?);
    }

    Ok(model)
}

/// Convert one city-object tree.
pub fn object_from_value(value: &Value) -> Result<CityObject> {
    let object = value.as_object().ok_or(Error::UnexpectedShape {
        field: "CityObjects entry",
        expected: "an object",
    })?;

    let kind = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or(Error::MissingField("type"))?;

    let geometry = match object.get("geometry") {
        Some(Value::Array(items)) => items
            .iter()
            .map(geometry_from_value)
            .collect::<Result<Vec<_>>>()?,
        Some(_) => {
            return Err(Error::UnexpectedShape {
                field: "geometry",
                expected: "an array",
            })
        }
        None => Vec::new(),
    };

    Ok(CityObject::new(kind, geometry))
}

/// Convert one geometry tree.
pub fn geometry_from_value(value: &Value) -> Result<Geometry> {
    let geometry = value.as_object().ok_or(Error::UnexpectedShape {
        field: "geometry entry",
        expected: "an object",
    })?;

    let kind = geometry
        .get("type")
        .and_then(Value::as_str)
        .ok_or(Error::MissingField("type"))?;

    let boundaries = match kind {
        "Solid" | "MultiSolid" | "CompositeSolid" | "MultiSurface" | "CompositeSurface" => {
            let raw = geometry
                .get("boundaries")
                .ok_or(Error::MissingField("boundaries"))?;
            parse_boundaries(kind, raw)?
        }
        other => Boundaries::Unsupported(other.to_string()),
    };

    let semantics = match (&boundaries, geometry.get("semantics")) {
        (Boundaries::Unsupported(_), _) | (_, None) => None,
        (_, Some(raw)) => Some(parse_semantics(&boundaries, raw)?),
    };

    // CityJSON 1.0 uses numeric lod, 1.1 uses strings; normalize both
    let lod = geometry.get("lod").and_then(|lod| match lod {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    });

    Ok(Geometry {
        boundaries,
        semantics,
        lod,
    })
}

fn parse_boundaries(kind: &str, raw: &Value) -> Result<Boundaries> {
    Ok(match kind {
        "Solid" => Boundaries::Solid(parse_nested(raw, parse_shell)?),
        "MultiSolid" => Boundaries::MultiSolid(parse_nested(raw, |solid| {
            parse_nested(solid, parse_shell)
        })?),
        "CompositeSolid" => Boundaries::CompositeSolid(parse_nested(raw, |solid| {
            parse_nested(solid, parse_shell)
        })?),
        "MultiSurface" => Boundaries::MultiSurface(parse_nested(raw, parse_polygon)?),
        "CompositeSurface" => Boundaries::CompositeSurface(parse_nested(raw, parse_polygon)?),
        other => Boundaries::Unsupported(other.to_string()),
    })
}

fn parse_nested<T>(raw: &Value, item: impl Fn(&Value) -> Result<T>) -> Result<Vec<T>> {
    raw.as_array()
        .ok_or(Error::UnexpectedShape {
            field: "boundaries",
            expected: "an array",
        })?
        .iter()
        .map(item)
        .collect()
}

fn parse_shell(raw: &Value) -> Result<Shell> {
    parse_nested(raw, parse_polygon)
}

fn parse_polygon(raw: &Value) -> Result<Polygon> {
    parse_nested(raw, parse_ring)
}

fn parse_ring(raw: &Value) -> Result<Ring> {
    raw.as_array()
        .ok_or(Error::UnexpectedShape {
            field: "boundaries",
            expected: "a ring array",
        })?
        .iter()
        .map(|v| {
            v.as_u64().map(|n| n as usize).ok_or(Error::UnexpectedShape {
                field: "boundaries",
                expected: "a vertex index",
            })
        })
        .collect()
}

fn parse_semantics(boundaries: &Boundaries, raw: &Value) -> Result<Semantics> {
    let semantics = raw.as_object().ok_or(Error::UnexpectedShape {
        field: "semantics",
        expected: "an object",
    })?;

    let surfaces = semantics
        .get("surfaces")
        .ok_or(Error::MissingField("semantics.surfaces"))?
        .as_array()
        .ok_or(Error::UnexpectedShape {
            field: "semantics.surfaces",
            expected: "an array",
        })?
        .iter()
        .map(|surface| {
            surface
                .as_object()
                .and_then(|s| s.get("type"))
                .and_then(Value::as_str)
                .map(SemanticSurface::new)
                .ok_or(Error::UnexpectedShape {
                    field: "semantics.surfaces",
                    expected: "a typed surface object",
                })
        })
        .collect::<Result<Vec<_>>>()?;

    let raw_values = semantics
        .get("values")
        .ok_or(Error::MissingField("semantics.values"))?;

    let values = match boundaries {
        Boundaries::MultiSurface(_) | Boundaries::CompositeSurface(_) => {
            SemanticValues::Surface(parse_value_leaves(raw_values)?)
        }
        Boundaries::Solid(_) => {
            SemanticValues::Solid(parse_nested_values(raw_values, parse_value_leaves)?)
        }
        Boundaries::MultiSolid(_) | Boundaries::CompositeSolid(_) => SemanticValues::MultiSolid(
            parse_nested_values(raw_values, |shell| {
                parse_nested_values(shell, parse_value_leaves)
            })?,
        ),
        Boundaries::Unsupported(_) => {
            return Err(Error::UnexpectedShape {
                field: "semantics",
                expected: "a supported geometry kind",
            })
        }
    };

    Ok(Semantics { surfaces, values })
}

fn parse_nested_values<T>(raw: &Value, item: impl Fn(&Value) -> Result<T>) -> Result<Vec<T>> {
    raw.as_array()
        .ok_or(Error::UnexpectedShape {
            field: "semantics.values",
            expected: "an array",
        })?
        .iter()
        .map(item)
        .collect()
}

fn parse_value_leaves(raw: &Value) -> Result<Vec<Option<usize>>> {
    parse_nested_values(raw, |leaf| match leaf {
        Value::Null => Ok(None),
        Value::Number(n) => n.as_u64().map(|n| Some(n as usize)).ok_or(
            Error::UnexpectedShape {
                field: "semantics.values",
                expected: "a surface index",
            },
        ),
        _ => Err(Error::UnexpectedShape {
            field: "semantics.values",
            expected: "a surface index or null",
        }),
    })
}

fn parse_transform(raw: &Value) -> Result<(Point3<f64>, Point3<f64>)> {
    let transform = raw
        .as_object()
        .ok_or(Error::InvalidTransform("not an object".to_string()))?;
    let scale = parse_triple(
        transform
            .get("scale")
            .ok_or(Error::InvalidTransform("missing scale".to_string()))?,
    )?;
    let translate = parse_triple(
        transform
            .get("translate")
            .ok_or(Error::InvalidTransform("missing translate".to_string()))?,
    )?;
    Ok((scale, translate))
}

fn parse_vertices(
    raw: &Value,
    transform: Option<&(Point3<f64>, Point3<f64>)>,
) -> Result<Vec<Point3<f64>>> {
    raw.as_array()
        .ok_or(Error::UnexpectedShape {
            field: "vertices",
            expected: "an array",
        })?
        .iter()
        .map(|vertex| {
            let p = parse_triple(vertex).map_err(|_| Error::InvalidVertex(vertex.to_string()))?;
            Ok(match transform {
                Some((scale, translate)) => Point3::new(
                    p.x * scale.x + translate.x,
                    p.y * scale.y + translate.y,
                    p.z * scale.z + translate.z,
                ),
                None => p,
            })
        })
        .collect()
}

fn parse_triple(raw: &Value) -> Result<Point3<f64>> {
    let items = raw.as_array().ok_or(Error::UnexpectedShape {
        field: "vertices",
        expected: "a coordinate triple",
    })?;
    if items.len() != 3 {
        return Err(Error::UnexpectedShape {
            field: "vertices",
            expected: "a coordinate triple",
        });
    }
    let mut coords = [0.0; 3];
    for (slot, item) in coords.iter_mut().zip(items) {
        *slot = item.as_f64().ok_or(Error::UnexpectedShape {
            field: "vertices",
            expected: "a number",
        })?;
    }
    Ok(Point3::new(coords[0], coords[1], coords[2]))
}
