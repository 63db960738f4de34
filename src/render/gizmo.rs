// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The rotation gizmo: the plan axes and the bone-alignment rotation of the selected timestamp.

use nalgebra::Rotation3;
use smol_str::{format_smolstr, SmolStr};

use super::figure::{AxisLayout, Figure, Layout, Line, PerPoint, Scene, Title, Trace, TraceKind, Values};
use super::palette::Palette;
use crate::geometry::Vector3;
use crate::model::{Axis, Dataset, Method, Selection, Stage};
use crate::sync::controls::{DisplayControls, SceneMode};

/// Angles are only meaningful for the bone alignment of a timestamp against the plan.
pub fn shows_angles(controls: &DisplayControls) -> bool {
    controls.method == Method::BoneAligned
        && controls.mode == SceneMode::TwoTimestamps
        && controls.first_stage == Stage::Plan
}

/// Label of one axis: the angle rounded to two decimals, or `0°` when angles are hidden.
pub fn angle_label(angle: Option<f64>) -> SmolStr {
    match angle {
        Some(angle) => format_smolstr!("{}°", (angle * 100.0).round() / 100.0),
        None => SmolStr::new_static("0°"),
    }
}

/// `Rz · Ry · Rx` of angles in degrees.
fn rotation(angles: [f64; 3]) -> Rotation3<f64> {
    let [x, y, z] = angles.map(f64::to_radians);
    Rotation3::from_euler_angles(x, y, z)
}

fn axis_line(tip: Vector3, color: SmolStr, dash: Option<&'static str>) -> Trace {
    let mut trace = Trace::new(TraceKind::Scatter3d);
    trace.x = Some(Values::Numbers(vec![0.0, tip[0]]));
    trace.y = Some(Values::Numbers(vec![0.0, tip[1]]));
    trace.z = Some(Values::Numbers(vec![0.0, tip[2]]));
    trace.line = Some(Line { color: Some(PerPoint::One(color)), width: Some(PerPoint::One(6.0)), dash });
    trace
}

pub fn rotation_axes_figure(
    dataset: &Dataset,
    selection: &Selection,
    controls: &DisplayControls,
    palette: &Palette,
) -> Figure {
    let row = dataset.roster().index_of(&selection.patient);
    let angle = |axis: Axis| -> Option<f64> {
        if !shows_angles(controls) {
            return None;
        }
        dataset.rotation(row?, axis, selection.timestamp)
    };
    let angles = Axis::ALL.map(angle);
    let matrix = rotation(angles.map(|angle| angle.unwrap_or(0.0)));
    let colors = palette.rotation_baseline();

    let mut data = Vec::with_capacity(6);
    for axis in Axis::ALL {
        data.push(
            axis_line(Vector3::ith(axis.index(), 1.0), palette.grey.clone(), Some("dash"))
                .named(format_smolstr!("{} (plan)", axis.label())),
        );
    }
    for axis in Axis::ALL {
        let column = axis.index();
        let tip = matrix.matrix().column(column).into_owned();
        let mut trace = axis_line(tip, colors[column].clone(), None).named(axis.label());
        trace.mode = Some("lines+text");
        trace.text = Some(Values::Labels(vec![
            SmolStr::default(),
            format_smolstr!("{}: {}", axis.label(), angle_label(angles[column])),
        ]));
        trace.textposition = Some("top center");
        data.push(trace);
    }

    let hidden = || Some(AxisLayout { showticklabels: Some(false), ..AxisLayout::default() });
    Figure {
        data,
        layout: Layout {
            title: Some(Title::new("Bone alignment rotation")),
            showlegend: Some(false),
            scene: Some(Scene {
                aspectmode: Some("cube"),
                xaxis: hidden(),
                yaxis: hidden(),
                zaxis: hidden(),
            }),
            uirevision: Some(SmolStr::new_static("rotations-axes")),
            ..Layout::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::Rotation3;
    use rstest::rstest;

    use super::{angle_label, rotation, rotation_axes_figure, shows_angles};
    use crate::geometry::Vector3;
    use crate::model::fixtures::seven_patient_dataset;
    use crate::model::{Method, Organ, PatientId, Selection, Stage};
    use crate::render::palette::Palette;
    use crate::sync::controls::{DisplayControls, SceneMode};

    #[rstest]
    #[case(Method::BoneAligned, SceneMode::TwoTimestamps, Stage::Plan, true)]
    #[case(Method::Centered, SceneMode::TwoTimestamps, Stage::Plan, false)]
    #[case(Method::BoneAligned, SceneMode::PlanOrgans, Stage::Plan, false)]
    #[case(Method::BoneAligned, SceneMode::TwoTimestamps, Stage::Timestamp(2), false)]
    fn angles_need_bone_alignment_against_the_plan(
        #[case] method: Method,
        #[case] mode: SceneMode,
        #[case] first_stage: Stage,
        #[case] expected: bool,
    ) {
        let controls = DisplayControls { method, mode, first_stage, ..DisplayControls::default() };
        assert_eq!(shows_angles(&controls), expected);
    }

    #[test]
    fn labels_round_to_two_decimals() {
        assert_eq!(angle_label(Some(1.23456)), "1.23°");
        assert_eq!(angle_label(Some(-0.5)), "-0.5°");
        assert_eq!(angle_label(None), "0°");
    }

    #[test]
    fn zero_angles_keep_the_plan_axes() {
        assert_eq!(rotation([0.0; 3]), Rotation3::identity());
        let quarter = rotation([0.0, 0.0, 90.0]) * Vector3::x();
        assert!((quarter - Vector3::y()).norm() < 1e-12);
    }

    #[test]
    fn gizmo_labels_use_the_selected_timestamp() {
        let dataset = seven_patient_dataset();
        let selection =
            Selection { patient: PatientId::new("P2").expect("patient"), timestamp: 4, organ: Organ::Prostate };
        let value = rotation_axes_figure(&dataset, &selection, &DisplayControls::default(), &Palette::default())
            .to_json();
        // Fixture rotations: row + axis - t / 10.
        assert_eq!(value["data"][3]["text"][1], "X: 0.6°");
        assert_eq!(value["data"][5]["text"][1], "Z: 2.6°");

        let controls = DisplayControls { method: Method::Centered, ..DisplayControls::default() };
        let value = rotation_axes_figure(&dataset, &selection, &controls, &Palette::default()).to_json();
        assert_eq!(value["data"][4]["text"][1], "Y: 0°");
    }
}
