// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Point-to-point ICP with closed-form (quaternion) rigid fits.

use nalgebra::{Isometry3, Matrix3, Matrix4, Quaternion, SymmetricEigen, Translation3, UnitQuaternion};
use rayon::prelude::*;

use super::{centroid, GeometryError, Point3, Transform};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct IcpOptions {
    pub max_iterations: usize,
    /// Stop once the mean squared error improves by less than this.
    pub tolerance: f64,
    pub max_source_samples: usize,
    pub max_target_samples: usize,
}

impl Default for IcpOptions {
    fn default() -> Self {
        Self {
            max_iterations: 40,
            tolerance: 1e-9,
            max_source_samples: 600,
            max_target_samples: 6000,
        }
    }
}

/// Rigid transform moving `source` onto `target`.
///
/// Starts from the centroid-to-centroid translation, then alternates nearest-neighbour
/// matching with a least-squares rigid fit.
pub(crate) fn rigid_icp(
    source: &[Point3],
    target: &[Point3],
    options: IcpOptions,
) -> Result<Transform, GeometryError> {
    let source_center = centroid(source).ok_or(GeometryError::EmptyPointSet)?;
    let target_center = centroid(target).ok_or(GeometryError::EmptyPointSet)?;

    let source = subsample(source, options.max_source_samples);
    let target = subsample(target, options.max_target_samples);

    let mut total = Transform::translation(&(target_center - source_center));
    let mut moved: Vec<Point3> = source.iter().map(|point| total.apply(point)).collect();
    let mut previous_error = f64::INFINITY;

    for _ in 0..options.max_iterations {
        let matched: Vec<(Point3, f64)> =
            moved.par_iter().map(|point| nearest(point, &target)).collect();
        let error = matched.iter().map(|(_, distance)| distance).sum::<f64>() / matched.len() as f64;
        let pairs: Vec<Point3> = matched.into_iter().map(|(point, _)| point).collect();

        let step = best_fit(&moved, &pairs);
        total = step.compose(&total);
        moved = source.iter().map(|point| total.apply(point)).collect();

        if (previous_error - error).abs() < options.tolerance {
            break;
        }
        previous_error = error;
    }
    Ok(total)
}

fn subsample(points: &[Point3], max: usize) -> Vec<Point3> {
    if points.len() <= max || max == 0 {
        return points.to_vec();
    }
    let stride = (points.len() + max - 1) / max;
    points.iter().step_by(stride).copied().collect()
}

/// Closest target point and its squared distance.
fn nearest(point: &Point3, target: &[Point3]) -> (Point3, f64) {
    let mut best = (target[0], f64::INFINITY);
    for candidate in target {
        let distance = nalgebra::distance_squared(candidate, point);
        if distance < best.1 {
            best = (*candidate, distance);
        }
    }
    best
}

/// Least-squares rigid transform mapping `from[i]` onto `to[i]` (Horn's quaternion method).
pub(crate) fn best_fit(from: &[Point3], to: &[Point3]) -> Transform {
    let (Some(from_center), Some(to_center)) = (centroid(from), centroid(to)) else {
        return Transform::identity();
    };

    let s = from.iter().zip(to).fold(Matrix3::zeros(), |s, (a, b)| {
        s + (a - from_center) * (b - to_center).transpose()
    });
    let (sxx, sxy, sxz) = (s[(0, 0)], s[(0, 1)], s[(0, 2)]);
    let (syx, syy, syz) = (s[(1, 0)], s[(1, 1)], s[(1, 2)]);
    let (szx, szy, szz) = (s[(2, 0)], s[(2, 1)], s[(2, 2)]);
    #[rustfmt::skip]
    let n = Matrix4::new(
        sxx + syy + szz, syz - szy,        szx - sxz,         sxy - syx,
        syz - szy,       sxx - syy - szz,  sxy + syx,         szx + sxz,
        szx - sxz,       sxy + syx,        -sxx + syy - szz,  syz + szy,
        sxy - syx,       szx + sxz,        syz + szy,         -sxx - syy + szz,
    );

    // The eigenvector of the largest eigenvalue is the optimal rotation quaternion (w, x, y, z).
    let eigen = SymmetricEigen::new(n);
    let q = eigen.eigenvectors.column(eigen.eigenvalues.imax());
    let rotation = UnitQuaternion::from_quaternion(Quaternion::new(q[0], q[1], q[2], q[3]));
    let translation = to_center.coords - rotation * from_center.coords;
    Transform::rigid(&Isometry3::from_parts(Translation3::from(translation), rotation))
}

#[cfg(test)]
mod tests {
    use nalgebra::Isometry3;

    use super::{best_fit, rigid_icp, IcpOptions};
    use crate::geometry::{Point3, Transform, Vector3};

    fn cloud() -> Vec<Point3> {
        let mut points = Vec::new();
        for i in 0..6 {
            for j in 0..5 {
                for k in 0..4 {
                    let (x, y, z) = (i as f64, j as f64 * 1.7, k as f64 * 2.3);
                    points.push(Point3::new(x + 0.1 * y, y, z + 0.05 * x * x));
                }
            }
        }
        points
    }

    fn turned() -> Transform {
        Transform::rigid(&Isometry3::new(Vector3::new(0.8, -0.4, 0.3), Vector3::z() * 0.2))
    }

    fn assert_close(a: &Point3, b: &Point3, tolerance: f64) {
        assert!(nalgebra::distance(a, b) < tolerance, "{a:?} vs {b:?}");
    }

    #[test]
    fn best_fit_recovers_a_known_motion() {
        let source = cloud();
        let motion = turned();
        let target: Vec<Point3> = source.iter().map(|p| motion.apply(p)).collect();
        let fit = best_fit(&source, &target);
        for point in &source {
            assert_close(&fit.apply(point), &motion.apply(point), 1e-7);
        }
    }

    #[test]
    fn best_fit_of_identical_clouds_is_the_identity() {
        let source = cloud();
        let fit = best_fit(&source, &source);
        for point in &source {
            assert_close(&fit.apply(point), point, 1e-9);
        }
    }

    #[test]
    fn icp_aligns_a_slightly_moved_cloud() {
        let source = cloud();
        let motion = Transform::translation(&Vector3::new(0.2, -0.1, 0.15));
        let target: Vec<Point3> = source.iter().map(|p| motion.apply(p)).collect();
        let found = rigid_icp(&source, &target, IcpOptions::default()).expect("icp");
        for point in &source {
            assert_close(&found.apply(point), &motion.apply(point), 1e-6);
        }
    }

    #[test]
    fn icp_rejects_empty_clouds() {
        assert!(rigid_icp(&[], &cloud(), IcpOptions::default()).is_err());
    }
}
