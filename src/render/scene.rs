// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The 3D scene: organ meshes of one or two stages, registered onto the plan with the chosen
//! method.

use rayon::prelude::*;
use smol_str::{format_smolstr, SmolStr};
use tracing::debug;

use super::figure::{Figure, Layout, Scene, Title, Trace, TraceKind, Values};
use super::palette::Palette;
use crate::geometry::{GeometryBridge, GeometryError, MeshGeometry, MeshStore, Transform};
use crate::model::{Method, Organ, PatientId, Stage};
use crate::sync::controls::{DisplayControls, SceneMode};

/// The organ meshes of one stage, already moved into plan coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct StageMeshes {
    pub stage: Stage,
    pub color: SmolStr,
    pub meshes: Vec<(Organ, MeshGeometry)>,
}

/// Title of the scene for the current mode and stages.
pub fn scene_title(patient: &PatientId, controls: &DisplayControls) -> SmolStr {
    match controls.mode {
        SceneMode::TwoTimestamps => format_smolstr!(
            "Patient {patient}, {} (pink) and {} (purple)",
            controls.first_stage.describe(),
            controls.second_stage.describe()
        ),
        SceneMode::PlanOrgans => format_smolstr!("Plan organs of patient {patient}"),
    }
}

/// Loads the mesh sets the mode selects.
pub fn load_stage_meshes(
    bridge: &dyn GeometryBridge,
    store: Option<&MeshStore>,
    patient: &PatientId,
    controls: &DisplayControls,
    palette: &Palette,
) -> Result<Vec<StageMeshes>, GeometryError> {
    let store = store.ok_or(GeometryError::NoMeshDirectory)?;
    let [first_color, second_color] = palette.stage_colors();
    let stages = match controls.mode {
        SceneMode::PlanOrgans => vec![(Stage::Plan, first_color)],
        SceneMode::TwoTimestamps => vec![
            (controls.first_stage, first_color),
            (controls.second_stage, second_color),
        ],
    };

    stages
        .into_par_iter()
        .map(|(stage, color)| -> Result<StageMeshes, GeometryError> {
            let registration = registration(bridge, store, patient, stage, controls.method)?;
            let meshes = controls
                .organs
                .par_iter()
                .map(|organ| -> Result<(Organ, MeshGeometry), GeometryError> {
                    let mesh = bridge.import_mesh(&store.path(patient, *organ, stage))?;
                    Ok((*organ, bridge.apply_transform(&mesh, &registration)))
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(StageMeshes { stage, color, meshes })
        })
        .collect()
}

/// Transform moving a stage into plan coordinates.
fn registration(
    bridge: &dyn GeometryBridge,
    store: &MeshStore,
    patient: &PatientId,
    stage: Stage,
    method: Method,
) -> Result<Transform, GeometryError> {
    if stage == Stage::Plan {
        return Ok(Transform::identity());
    }
    let anchor = match method {
        Method::BoneAligned => Organ::Bones,
        Method::Centered => Organ::Prostate,
    };
    let moving = bridge.import_mesh(&store.path(patient, anchor, stage))?;
    let fixed = bridge.import_mesh(&store.path(patient, anchor, Stage::Plan))?;
    let transform = match method {
        Method::BoneAligned => bridge.compute_rigid_transform(&moving.vertices, &fixed.vertices)?,
        Method::Centered => {
            let from = bridge.compute_centroid(&moving.vertices)?;
            let to = bridge.compute_centroid(&fixed.vertices)?;
            bridge.translation_matrix(from, to)
        }
    };
    debug!(patient = %patient, stage = %stage, method = method.label(), "registered stage onto plan");
    Ok(transform)
}

pub fn scene_figure(stages: &[StageMeshes], title: SmolStr) -> Figure {
    let mut data = Vec::new();
    for staged in stages {
        for (organ, mesh) in &staged.meshes {
            let mut trace = Trace::new(TraceKind::Mesh3d)
                .named(format_smolstr!("{} ({})", organ.label(), staged.stage));
            trace.x = Some(Values::Numbers(mesh.vertices.iter().map(|v| v[0]).collect()));
            trace.y = Some(Values::Numbers(mesh.vertices.iter().map(|v| v[1]).collect()));
            trace.z = Some(Values::Numbers(mesh.vertices.iter().map(|v| v[2]).collect()));
            trace.i = Some(mesh.faces.iter().map(|f| f[0]).collect());
            trace.j = Some(mesh.faces.iter().map(|f| f[1]).collect());
            trace.k = Some(mesh.faces.iter().map(|f| f[2]).collect());
            trace.color = Some(staged.color.clone());
            trace.opacity = Some(0.5);
            trace.showlegend = Some(true);
            data.push(trace);
        }
    }

    Figure {
        data,
        layout: Layout {
            title: Some(Title::new(title)),
            scene: Some(Scene { aspectmode: Some("data"), ..Scene::default() }),
            uirevision: Some(SmolStr::new_static("main-graph")),
            ..Layout::default()
        },
    }
}
