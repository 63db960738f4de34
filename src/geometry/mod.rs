// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mesh geometry: value types, the `GeometryBridge` seam and the on-disk mesh layout.
//!
//! The dashboard core only calls through [`GeometryBridge`]; [`ObjGeometry`] is the reference
//! implementation reading Wavefront OBJ files.

mod icp;
mod obj;
mod section;

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use nalgebra::{Isometry3, Matrix4};
use smallvec::SmallVec;

use crate::model::{Organ, PatientId, Stage};

pub use obj::{parse_obj, ObjGeometry};

pub type Point3 = nalgebra::Point3<f64>;
pub type Vector3 = nalgebra::Vector3<f64>;

/// One connected run of a plane section.
pub type Polyline = SmallVec<[Point3; 16]>;

/// A triangle mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshGeometry {
    pub vertices: Vec<Point3>,
    pub faces: Vec<[usize; 3]>,
}

impl MeshGeometry {
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of(&self.vertices)
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point3,
    pub max: Point3,
}

impl Bounds {
    pub fn of(points: &[Point3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Self { min: *first, max: *first };
        for point in rest {
            bounds.include(point);
        }
        Some(bounds)
    }

    pub fn include(&mut self, point: &Point3) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    pub fn union(self, other: Self) -> Self {
        let mut out = self;
        out.include(&other.min);
        out.include(&other.max);
        out
    }
}

/// Homogeneous 4×4 transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub matrix: Matrix4<f64>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self { matrix: Matrix4::identity() }
    }

    pub fn translation(offset: &Vector3) -> Self {
        Self { matrix: Matrix4::new_translation(offset) }
    }

    pub fn rigid(motion: &Isometry3<f64>) -> Self {
        Self { matrix: motion.to_homogeneous() }
    }

    pub fn apply(&self, point: &Point3) -> Point3 {
        self.matrix.transform_point(point)
    }

    /// `self` applied after `first`.
    pub fn compose(&self, first: &Self) -> Self {
        Self { matrix: self.matrix * first.matrix }
    }
}

/// The external geometry services the scene and slice views need.
pub trait GeometryBridge: Send + Sync {
    fn import_mesh(&self, path: &Path) -> Result<MeshGeometry, GeometryError>;

    /// Rigid transform moving `source` onto `target`.
    fn compute_rigid_transform(
        &self,
        source: &[Point3],
        target: &[Point3],
    ) -> Result<Transform, GeometryError>;

    fn compute_centroid(&self, points: &[Point3]) -> Result<Point3, GeometryError>;

    fn translation_matrix(&self, from: Point3, to: Point3) -> Transform;

    fn apply_transform(&self, mesh: &MeshGeometry, matrix: &Transform) -> MeshGeometry;

    fn section_by_plane(
        &self,
        mesh: &MeshGeometry,
        origin: Point3,
        normal: Vector3,
    ) -> Result<Vec<Polyline>, GeometryError>;
}

/// `<root>/<patient>/<organ>/<organ><stage>.obj`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshStore {
    root: PathBuf,
}

impl MeshStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, patient: &PatientId, organ: Organ, stage: Stage) -> PathBuf {
        let stem = organ.file_stem();
        self.root
            .join(patient.as_str())
            .join(stem)
            .join(format!("{stem}{}.obj", stage.file_suffix()))
    }
}

#[derive(Debug)]
pub enum GeometryError {
    NoMeshDirectory,
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, line: usize, message: String },
    EmptyMesh { path: PathBuf },
    EmptyPointSet,
    DegenerateNormal,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMeshDirectory => f.write_str("no mesh directory configured"),
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Parse { path, line, message } => {
                write!(f, "invalid OBJ data at {path:?}:{line}: {message}")
            }
            Self::EmptyMesh { path } => write!(f, "mesh at {path:?} has no vertices"),
            Self::EmptyPointSet => f.write_str("point set is empty"),
            Self::DegenerateNormal => f.write_str("section plane normal has zero length"),
        }
    }
}

impl std::error::Error for GeometryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub(crate) fn centroid(points: &[Point3]) -> Option<Point3> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(Vector3::zeros(), |sum, point| sum + point.coords);
    Some(Point3::from(sum / points.len() as f64))
}
