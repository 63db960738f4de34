// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Reference [`GeometryBridge`] over Wavefront OBJ files.

use std::fs;
use std::path::{Path, PathBuf};

use super::icp::{rigid_icp, IcpOptions};
use super::section::section;
use super::{
    centroid, GeometryBridge, GeometryError, MeshGeometry, Point3, Polyline, Transform, Vector3,
};

#[derive(Debug, Clone, Default)]
pub struct ObjGeometry {
    icp: IcpOptions,
}

impl ObjGeometry {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GeometryBridge for ObjGeometry {
    fn import_mesh(&self, path: &Path) -> Result<MeshGeometry, GeometryError> {
        let text = fs::read_to_string(path)
            .map_err(|source| GeometryError::Io { path: path.to_path_buf(), source })?;
        parse_obj(&text, path)
    }

    fn compute_rigid_transform(
        &self,
        source: &[Point3],
        target: &[Point3],
    ) -> Result<Transform, GeometryError> {
        rigid_icp(source, target, self.icp)
    }

    fn compute_centroid(&self, points: &[Point3]) -> Result<Point3, GeometryError> {
        centroid(points).ok_or(GeometryError::EmptyPointSet)
    }

    fn translation_matrix(&self, from: Point3, to: Point3) -> Transform {
        Transform::translation(&(to - from))
    }

    fn apply_transform(&self, mesh: &MeshGeometry, matrix: &Transform) -> MeshGeometry {
        MeshGeometry {
            vertices: mesh.vertices.iter().map(|vertex| matrix.apply(vertex)).collect(),
            faces: mesh.faces.clone(),
        }
    }

    fn section_by_plane(
        &self,
        mesh: &MeshGeometry,
        origin: Point3,
        normal: Vector3,
    ) -> Result<Vec<Polyline>, GeometryError> {
        section(mesh, origin, normal)
    }
}

/// Parses `v` and `f` records; polygons are fan-triangulated, other records are ignored.
pub fn parse_obj(text: &str, path: &Path) -> Result<MeshGeometry, GeometryError> {
    let parse_error = |line: usize, message: String| GeometryError::Parse {
        path: PathBuf::from(path),
        line,
        message,
    };

    let mut mesh = MeshGeometry::default();
    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let mut tokens = raw.split_whitespace();
        match tokens.next() {
            Some("v") => {
                let mut vertex = [0.0; 3];
                for coordinate in vertex.iter_mut() {
                    let token = tokens
                        .next()
                        .ok_or_else(|| parse_error(line_no, "vertex needs 3 coordinates".into()))?;
                    *coordinate = token
                        .parse()
                        .map_err(|_| parse_error(line_no, format!("invalid coordinate '{token}'")))?;
                }
                mesh.vertices.push(Point3::from(vertex));
            }
            Some("f") => {
                let mut corners = Vec::with_capacity(4);
                for token in tokens {
                    let reference = token.split('/').next().unwrap_or(token);
                    let value: i64 = reference
                        .parse()
                        .map_err(|_| parse_error(line_no, format!("invalid face index '{token}'")))?;
                    let count = mesh.vertices.len() as i64;
                    let resolved = if value < 0 { count + value } else { value - 1 };
                    if !(0..count).contains(&resolved) {
                        return Err(parse_error(
                            line_no,
                            format!("face index {value} outside {count} vertices"),
                        ));
                    }
                    corners.push(resolved as usize);
                }
                if corners.len() < 3 {
                    return Err(parse_error(line_no, "face needs at least 3 vertices".into()));
                }
                for pair in corners[1..].windows(2) {
                    mesh.faces.push([corners[0], pair[0], pair[1]]);
                }
            }
            _ => {}
        }
    }

    if mesh.vertices.is_empty() {
        return Err(GeometryError::EmptyMesh { path: path.to_path_buf() });
    }
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{parse_obj, ObjGeometry};
    use crate::geometry::{GeometryBridge, GeometryError, MeshGeometry, Point3};

    const QUAD: &str = "# quad\no quad\nv 0 0 0\nv 2 0 0\nv 2 2 0\nv 0 2 0\nvn 0 0 1\nf 1//1 2//1 3//1 -1//1\n";

    #[test]
    fn parses_vertices_and_fan_triangulates_faces() {
        let mesh = parse_obj(QUAD, Path::new("quad.obj")).expect("mesh");
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.faces, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn reports_the_failing_line() {
        let err = parse_obj("v 0 0 0\nf 1 2 3\n", Path::new("bad.obj")).unwrap_err();
        match err {
            GeometryError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(
            parse_obj("# nothing\n", Path::new("empty.obj")),
            Err(GeometryError::EmptyMesh { .. })
        ));
    }

    #[test]
    fn centering_translation_moves_one_centroid_onto_the_other() {
        let bridge = ObjGeometry::new();
        let mesh = parse_obj(QUAD, Path::new("quad.obj")).expect("mesh");
        let from = bridge.compute_centroid(&mesh.vertices).expect("centroid");
        assert_eq!(from, Point3::new(1.0, 1.0, 0.0));

        let matrix = bridge.translation_matrix(from, Point3::new(5.0, 5.0, 5.0));
        let moved: MeshGeometry = bridge.apply_transform(&mesh, &matrix);
        assert_eq!(bridge.compute_centroid(&moved.vertices).expect("centroid"), Point3::new(5.0, 5.0, 5.0));
        assert_eq!(moved.faces, mesh.faces);
    }

    #[test]
    fn missing_files_surface_as_io_errors() {
        let bridge = ObjGeometry::new();
        assert!(matches!(
            bridge.import_mesh(Path::new("/nonexistent/regdash/mesh.obj")),
            Err(GeometryError::Io { .. })
        ));
    }
}
