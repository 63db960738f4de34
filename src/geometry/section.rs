// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Plane sections of triangle meshes, chained into polylines.

use std::collections::HashMap;

use super::{GeometryError, MeshGeometry, Point3, Polyline, Vector3};

/// Endpoints closer than this are joined.
const WELD_SCALE: f64 = 1e6;

type Key = [i64; 3];

fn key(point: &Point3) -> Key {
    [point.x, point.y, point.z].map(|c| (c * WELD_SCALE).round() as i64)
}

pub(crate) fn section(
    mesh: &MeshGeometry,
    origin: Point3,
    normal: Vector3,
) -> Result<Vec<Polyline>, GeometryError> {
    let length = normal.norm();
    if !length.is_finite() || length == 0.0 {
        return Err(GeometryError::DegenerateNormal);
    }
    let normal = normal / length;

    let distances: Vec<f64> =
        mesh.vertices.iter().map(|vertex| (vertex - origin).dot(&normal)).collect();

    let mut segments = Vec::new();
    for face in &mesh.faces {
        if face.iter().any(|&index| index >= mesh.vertices.len()) {
            continue;
        }
        let mut crossing: Vec<Point3> = Vec::with_capacity(2);
        for edge in 0..3 {
            let (a, b) = (face[edge], face[(edge + 1) % 3]);
            let (da, db) = (distances[a], distances[b]);
            if (da >= 0.0) == (db >= 0.0) {
                continue;
            }
            let t = da / (da - db);
            let (pa, pb) = (mesh.vertices[a], mesh.vertices[b]);
            crossing.push(pa + (pb - pa) * t);
        }
        if let [start, end] = crossing[..] {
            if key(&start) != key(&end) {
                segments.push([start, end]);
            }
        }
    }
    Ok(chain(&segments))
}

/// Joins segments sharing endpoints into polylines.
fn chain(segments: &[[Point3; 2]]) -> Vec<Polyline> {
    let mut by_endpoint: HashMap<Key, Vec<usize>> = HashMap::new();
    for (index, segment) in segments.iter().enumerate() {
        for point in segment {
            by_endpoint.entry(key(point)).or_default().push(index);
        }
    }

    let mut used = vec![false; segments.len()];
    let mut polylines = Vec::new();
    for start in 0..segments.len() {
        if used[start] {
            continue;
        }
        used[start] = true;
        let mut forward: Vec<Point3> = segments[start].to_vec();
        extend(&mut forward, segments, &by_endpoint, &mut used);
        let mut backward: Vec<Point3> = forward.iter().rev().copied().collect();
        extend(&mut backward, segments, &by_endpoint, &mut used);
        polylines.push(backward.into_iter().collect());
    }
    polylines
}

fn extend(
    line: &mut Vec<Point3>,
    segments: &[[Point3; 2]],
    by_endpoint: &HashMap<Key, Vec<usize>>,
    used: &mut [bool],
) {
    while let Some(tail) = line.last().copied() {
        let tail_key = key(&tail);
        let next = by_endpoint
            .get(&tail_key)
            .and_then(|candidates| candidates.iter().copied().find(|index| !used[*index]));
        let Some(next) = next else {
            break;
        };
        used[next] = true;
        let [a, b] = segments[next];
        line.push(if key(&a) == tail_key { b } else { a });
    }
}

#[cfg(test)]
mod tests {
    use super::section;
    use crate::geometry::{GeometryError, MeshGeometry, Point3, Vector3};

    /// Unit cube, two triangles per face.
    fn cube() -> MeshGeometry {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ];
        let faces = vec![
            [0, 2, 1],
            [0, 3, 2],
            [4, 5, 6],
            [4, 6, 7],
            [0, 1, 5],
            [0, 5, 4],
            [1, 2, 6],
            [1, 6, 5],
            [2, 3, 7],
            [2, 7, 6],
            [3, 0, 4],
            [3, 4, 7],
        ];
        MeshGeometry { vertices, faces }
    }

    #[test]
    fn mid_section_of_a_cube_is_one_closed_loop() {
        let polylines = section(&cube(), Point3::new(0.5, 0.5, 0.5), Vector3::new(0.0, 0.0, 2.0))
            .expect("section");
        assert_eq!(polylines.len(), 1);
        let line = &polylines[0];
        assert!(line.iter().all(|point| (point[2] - 0.5).abs() < 1e-12));
        let first = line.first().expect("first");
        let last = line.last().expect("last");
        assert!((first[0] - last[0]).abs() < 1e-9 && (first[1] - last[1]).abs() < 1e-9);
    }

    #[test]
    fn plane_outside_the_mesh_has_no_section() {
        let polylines = section(&cube(), Point3::new(0.0, 0.0, 5.0), Vector3::z()).expect("section");
        assert!(polylines.is_empty());
    }

    #[test]
    fn zero_normal_is_rejected() {
        assert!(matches!(
            section(&cube(), Point3::origin(), Vector3::zeros()),
            Err(GeometryError::DegenerateNormal)
        ));
    }
}
