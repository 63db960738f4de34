// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Orthogonal slice views of the loaded mesh sets.

use smol_str::{format_smolstr, SmolStr};

use super::figure::{AxisLayout, Figure, Layout, Line, PerPoint, Title, Trace, TraceKind, Values};
use super::scene::StageMeshes;
use crate::geometry::{Bounds, GeometryBridge, GeometryError, Point3, Vector3};
use crate::model::Axis;

pub fn slice_title(axis: Axis) -> &'static str {
    match axis {
        Axis::X => "X axis slice - Sagittal",
        Axis::Y => "Y axis slice - Coronal",
        Axis::Z => "Z axis slice - Axial",
    }
}

/// The two in-plane coordinates shown for a slice along `axis`.
fn projected(axis: Axis) -> (usize, usize) {
    match axis {
        Axis::X => (1, 2),
        Axis::Y => (0, 2),
        Axis::Z => (0, 1),
    }
}

/// Plane through the centroid of every loaded vertex, moved along `axis` by the slider:
/// `(min + 0.5) + ((max − 2.5) − (min + 0.5)) × position`.
pub fn slice_plane(
    bridge: &dyn GeometryBridge,
    stages: &[StageMeshes],
    axis: Axis,
    position: f64,
) -> Result<Option<(Point3, Vector3)>, GeometryError> {
    let meshes = || stages.iter().flat_map(|staged| staged.meshes.iter().map(|(_, mesh)| mesh));
    let Some(bounds) = meshes().filter_map(|mesh| mesh.bounds()).reduce(Bounds::union) else {
        return Ok(None);
    };
    let vertices: Vec<Point3> = meshes().flat_map(|mesh| mesh.vertices.iter().copied()).collect();
    let mut origin = bridge.compute_centroid(&vertices)?;

    let a = axis.index();
    let low = bounds.min[a] + 0.5;
    let high = bounds.max[a] - 2.5;
    origin[a] = low + (high - low) * position;

    Ok(Some((origin, Vector3::ith(a, 1.0))))
}

pub fn slice_figure(
    bridge: &dyn GeometryBridge,
    stages: &[StageMeshes],
    axis: Axis,
    position: f64,
) -> Result<Figure, GeometryError> {
    let mut data = Vec::new();
    if let Some((origin, normal)) = slice_plane(bridge, stages, axis, position)? {
        let (u, v) = projected(axis);
        for staged in stages {
            for (organ, mesh) in &staged.meshes {
                let group = format_smolstr!("{} ({})", organ.label(), staged.stage);
                let polylines = bridge.section_by_plane(mesh, origin, normal)?;
                for (index, polyline) in polylines.iter().enumerate() {
                    let mut trace = Trace::new(TraceKind::Scatter).named(group.clone());
                    trace.mode = Some("lines");
                    trace.x = Some(Values::Numbers(polyline.iter().map(|p| p[u]).collect()));
                    trace.y = Some(Values::Numbers(polyline.iter().map(|p| p[v]).collect()));
                    trace.line = Some(Line {
                        color: Some(PerPoint::One(staged.color.clone())),
                        width: Some(PerPoint::One(2.0)),
                        dash: None,
                    });
                    trace.legendgroup = Some(group.clone());
                    trace.showlegend = Some(index == 0);
                    data.push(trace);
                }
            }
        }
    }

    let labels = ["X", "Y", "Z"];
    let (u, v) = projected(axis);
    Ok(Figure {
        data,
        layout: Layout {
            title: Some(Title::new(slice_title(axis))),
            xaxis: Some(AxisLayout::titled(labels[u])),
            yaxis: Some(AxisLayout { scaleanchor: Some("x"), ..AxisLayout::titled(labels[v]) }),
            uirevision: Some(SmolStr::new(format!("slice-{}", axis.label()))),
            ..Layout::default()
        },
    })
}
