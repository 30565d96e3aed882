// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon triangulation utilities
//!
//! Newell normal estimation, projection onto a local in-plane frame,
//! and the earcutr adapter for "polygon plus holes in 2D".

use nalgebra::{Point2, Point3, Vector3};

/// Polygon normal via Newell's method.
///
/// Works for non-planar and non-convex rings and is invariant to the
/// ring's starting vertex, which makes it the right estimator for
/// real-world city-model polygons. A zero-length sum (all points
/// coincident or collinear) falls back to +Z.
pub fn newell_normal(points: &[Point3<f64>]) -> Vector3<f64> {
    let mut normal = Vector3::<f64>::zeros();
    let n = points.len();

    for i in 0..n {
        let current = &points[i];
        let next = &points[(i + 1) % n];

        normal.x += (current.y - next.y) * (current.z + next.z);
        normal.y += (current.z - next.z) * (current.x + next.x);
        normal.z += (current.x - next.x) * (current.y + next.y);
    }

    let len = normal.norm();
    if len > 1e-10 {
        normal / len
    } else {
        Vector3::z()
    }
}

/// Orthonormal in-plane basis (u, v) for a unit normal.
///
/// Uses a fixed probe vector, perturbed by a fixed offset when it falls
/// within 0.01 of the normal, then Gram-Schmidt against the normal.
/// The second perturbation arm covers probes parallel to the normal
/// that slip past the distance guard (e.g. the anti-parallel case).
pub fn plane_basis(normal: &Vector3<f64>) -> (Vector3<f64>, Vector3<f64>) {
    let mut probe = Vector3::new(1.1, 1.1, 1.1);
    if (probe - normal).norm() < 0.01 {
        probe += Vector3::new(1.0, 2.0, 3.0);
    }

    let rejected = probe - normal * probe.dot(normal);
    let u = match rejected.try_normalize(1e-12) {
        Some(u) => u,
        None => {
            probe += Vector3::new(1.0, 2.0, 3.0);
            (probe - normal * probe.dot(normal)).normalize()
        }
    };
    let v = normal.cross(&u);

    (u, v)
}

/// Project 3D points onto the in-plane frame of `normal`.
#[inline]
pub fn project_to_plane(points: &[Point3<f64>], normal: &Vector3<f64>) -> Vec<Point2<f64>> {
    let (u, v) = plane_basis(normal);
    points
        .iter()
        .map(|p| Point2::new(p.coords.dot(&u), p.coords.dot(&v)))
        .collect()
}

/// Ear-clip a flattened 2D boundary: the outer ring's points followed
/// by each hole's points, with `hole_offsets` holding the running
/// vertex count at which each hole starts.
///
/// Returns triangle vertex indices into the flattened boundary, three
/// per triangle. A boundary that is degenerate in 2D yields an empty
/// list; dropped geometry, not an error.
pub fn triangulate_face(points: &[Point2<f64>], hole_offsets: &[usize]) -> Vec<usize> {
    let mut flat = Vec::with_capacity(points.len() * 2);
    for p in points {
        flat.push(p.x);
        flat.push(p.y);
    }

    earcutr::earcut(&flat, hole_offsets, 2).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_newell_normal_axis_aligned() {
        // CCW square in the XY plane -> +Z
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];

        let normal = newell_normal(&points);
        assert_relative_eq!(normal.z, 1.0, epsilon = 1e-12);
        assert_relative_eq!(normal.x, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_newell_normal_start_vertex_invariance() {
        let points = vec![
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(2.0, 0.0, 1.2),
            Point3::new(2.0, 2.0, 0.9),
            Point3::new(0.0, 2.0, 1.1),
        ];
        let mut rotated = points.clone();
        rotated.rotate_left(2);

        let a = newell_normal(&points);
        let b = newell_normal(&rotated);
        assert_relative_eq!(a.x, b.x, epsilon = 1e-12);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-12);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-12);
    }

    #[test]
    fn test_newell_normal_degenerate_falls_back() {
        let points = vec![Point3::new(1.0, 1.0, 1.0); 4];
        let normal = newell_normal(&points);
        assert_relative_eq!(normal.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_plane_basis_is_orthonormal() {
        for normal in [
            Vector3::x(),
            Vector3::y(),
            Vector3::z(),
            -Vector3::z(),
            Vector3::new(1.0, 1.0, 1.0).normalize(),
            Vector3::new(-1.0, -1.0, -1.0).normalize(),
        ] {
            let (u, v) = plane_basis(&normal);
            assert_relative_eq!(u.norm(), 1.0, epsilon = 1e-10);
            assert_relative_eq!(v.norm(), 1.0, epsilon = 1e-10);
            assert_relative_eq!(u.dot(&v), 0.0, epsilon = 1e-10);
            assert_relative_eq!(u.dot(&normal), 0.0, epsilon = 1e-10);
            assert_relative_eq!(v.dot(&normal), 0.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_projection_preserves_in_plane_distances() {
        // Planar ring in z = 5; pairwise distances must survive the
        // round trip into the in-plane frame.
        let points = vec![
            Point3::new(0.0, 0.0, 5.0),
            Point3::new(3.0, 0.0, 5.0),
            Point3::new(3.0, 4.0, 5.0),
            Point3::new(0.0, 4.0, 5.0),
        ];
        let normal = newell_normal(&points);
        let projected = project_to_plane(&points, &normal);

        for i in 0..points.len() {
            for j in 0..points.len() {
                let d3 = (points[i] - points[j]).norm();
                let d2 = (projected[i] - projected[j]).norm();
                assert_relative_eq!(d3, d2, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_triangulate_square() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];

        let indices = triangulate_face(&points, &[]);
        assert_eq!(indices.len(), 6);
        assert!(indices.iter().all(|&i| i < 4));
    }

    #[test]
    fn test_triangulate_square_with_hole() {
        let points = vec![
            // outer
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
            // hole, starting at offset 4
            Point2::new(3.0, 3.0),
            Point2::new(7.0, 3.0),
            Point2::new(7.0, 7.0),
            Point2::new(3.0, 7.0),
        ];

        let indices = triangulate_face(&points, &[4]);
        assert_eq!(indices.len() % 3, 0);
        // a square with a square hole ear-clips into 8 triangles
        assert_eq!(indices.len(), 24);
    }

    #[test]
    fn test_triangulate_degenerate_yields_nothing() {
        let points = vec![Point2::new(2.0, 2.0); 5];
        let indices = triangulate_face(&points, &[]);
        assert!(indices.is_empty());
    }
}
