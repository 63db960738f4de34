// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The 2D chart views: organ distances, alignment differences, per-patient averages and bone
//! rotations.

use smol_str::{format_smolstr, SmolStr};

use super::figure::{
    Annotation, AxisLayout, Figure, Layout, Line, Marker, PerPoint, Title, Trace, TraceKind, Values,
};
use super::palette::Palette;
use crate::model::{Axis, Dataset, Method, OrganSlot, PatientId, Series, TIMESTAMP_COUNT};
use crate::sync::controls::AxisScale;
use crate::sync::highlight::HighlightSpec;
use crate::sync::slots::{organ_for, DIFFERENCE_ORGANS};

/// Subplot axes of the bone-aligned and centered panels.
const PANEL_AXES: [(&str, &str); 2] = [("x", "y"), ("x2", "y2")];
const PANEL_DOMAINS: [[f64; 2]; 2] = [[0.0, 0.47], [0.53, 1.0]];

fn timestamp_axis() -> Values {
    Values::Numbers((1..=TIMESTAMP_COUNT).map(|t| t as f64).collect())
}

fn series_values(series: &Series) -> Values {
    Values::Numbers(series.to_vec())
}

fn missing_patient(title: &str, patient: &PatientId) -> Figure {
    Figure::placeholder(title, format!("patient {patient} is not in the roster"))
}

/// Scatter series whose marker strokes carry the highlight marks.
fn marked_scatter(
    spec: &HighlightSpec,
    slot: usize,
    baseline: &SmolStr,
    x: Values,
    y: Values,
) -> Trace {
    let mut trace = Trace::new(TraceKind::Scatter);
    trace.x = Some(x);
    trace.y = Some(y);
    trace.marker = Some(Marker {
        color: Some(PerPoint::One(baseline.clone())),
        size: Some(9.0),
        line: Some(Line {
            color: Some(PerPoint::Many(spec.colors(slot))),
            width: Some(PerPoint::Many(spec.widths(slot).into_iter().map(f64::from).collect())),
            dash: None,
        }),
    });
    trace
}

/// Bars filled with the highlight marks.
fn marked_bars(spec: &HighlightSpec, series: usize, y: Values) -> Trace {
    let mut trace = Trace::new(TraceKind::Bar);
    trace.x = Some(timestamp_axis());
    trace.y = Some(y);
    trace.marker = Some(Marker {
        color: Some(PerPoint::Many(spec.colors(series))),
        ..Marker::default()
    });
    trace
}

/// Invisible legend entry separating the two panels' series.
fn legend_spacer() -> Trace {
    let mut trace = Trace::new(TraceKind::Scatter).named(" ");
    trace.x = Some(Values::Numbers(Vec::new()));
    trace.y = Some(Values::Numbers(Vec::new()));
    trace.mode = Some("markers");
    trace.showlegend = Some(true);
    trace.hoverinfo = Some("skip");
    trace.marker = Some(Marker {
        color: Some(PerPoint::One(SmolStr::new_static("rgba(0,0,0,0)"))),
        ..Marker::default()
    });
    trace
}

fn two_panel_layout(title: SmolStr, x_title: &str, y_title: &str, scale: AxisScale) -> Layout {
    let mut layout = Layout {
        title: Some(Title::new(title)),
        showlegend: Some(true),
        ..Layout::default()
    };
    let mut axes = [AxisLayout::titled(x_title), AxisLayout::titled(x_title)];
    for (axis, domain) in axes.iter_mut().zip(PANEL_DOMAINS) {
        axis.domain = Some(domain);
    }
    axes[0].anchor = Some("y");
    axes[1].anchor = Some("y2");
    let mut yaxis2 = AxisLayout { anchor: Some("x2"), ..AxisLayout::default() };
    if scale == AxisScale::Uniform {
        yaxis2.matches = Some("y");
    }
    let [xaxis, xaxis2] = axes;
    layout.xaxis = Some(xaxis);
    layout.xaxis2 = Some(xaxis2);
    layout.yaxis = Some(AxisLayout { anchor: Some("x"), ..AxisLayout::titled(y_title) });
    layout.yaxis2 = Some(yaxis2);
    layout.annotations = Method::ALL
        .iter()
        .zip(PANEL_DOMAINS)
        .map(|(method, [start, end])| Annotation::paper(method.label(), (start + end) / 2.0, 1.0))
        .collect();
    layout
}

/// Distance of each organ to its plan position over the timestamps, one panel per method.
///
/// Series order: bone-aligned slots 0..=2, a legend spacer, centered slots 0..=2.
pub fn organ_distances_figure(
    dataset: &Dataset,
    patient: &PatientId,
    highlights: &[HighlightSpec; 2],
    scale: AxisScale,
    palette: &Palette,
) -> Figure {
    let title = format_smolstr!("Organ distances from the plan, patient {patient}");
    let Some(row) = dataset.roster().index_of(patient) else {
        return missing_patient(&title, patient);
    };

    let mut data = Vec::with_capacity(7);
    for method in Method::ALL {
        if method == Method::Centered {
            data.push(legend_spacer());
        }
        let Some(series) = dataset.distances(method, row) else {
            return missing_patient(&title, patient);
        };
        let baseline = palette.organ_baseline(method);
        let (xaxis, yaxis) = PANEL_AXES[method.index()];
        for slot in OrganSlot::ALL {
            let spec = &highlights[method.index()];
            let mut trace = marked_scatter(
                spec,
                slot.index(),
                &baseline[slot.index()],
                timestamp_axis(),
                series_values(&series[slot.index()]),
            )
            .named(organ_for(method, slot).label())
            .on_axes(xaxis, yaxis);
            trace.mode = Some("lines+markers");
            trace.legendgroup = Some(SmolStr::new_static(method.label()));
            trace.line = Some(Line {
                color: Some(PerPoint::One(baseline[slot.index()].clone())),
                ..Line::default()
            });
            data.push(trace);
        }
    }

    let mut layout = two_panel_layout(title, "Timestamp", "Distance [mm]", scale);
    layout.uirevision = Some(SmolStr::new_static("organ-distances"));
    Figure { data, layout }
}

/// Bone-aligned minus centered distance of the organs both methods track.
pub fn differences_figure(
    dataset: &Dataset,
    patient: &PatientId,
    spec: &HighlightSpec,
) -> Figure {
    let title = format_smolstr!("Difference between ICP and prostate centring, patient {patient}");
    let Some(differences) = dataset.roster().index_of(patient).and_then(|row| dataset.differences(row))
    else {
        return missing_patient(&title, patient);
    };

    let data = DIFFERENCE_ORGANS
        .iter()
        .enumerate()
        .map(|(series, organ)| {
            let slot = series + 1;
            marked_bars(spec, series, series_values(&differences[slot])).named(organ.label())
        })
        .collect();

    Figure {
        data,
        layout: Layout {
            title: Some(Title::new(title)),
            barmode: Some("group"),
            xaxis: Some(AxisLayout::titled("Timestamp")),
            yaxis: Some(AxisLayout::titled("Distance difference [mm]")),
            uirevision: Some(SmolStr::new_static("alignment-differences")),
            ..Layout::default()
        },
    }
}

/// Per-patient averages over all timestamps, one panel per method, same series order as the
/// organ-distance view.
pub fn average_distances_figure(
    dataset: &Dataset,
    highlights: &[HighlightSpec; 2],
    scale: AxisScale,
    palette: &Palette,
) -> Figure {
    let labels: Vec<SmolStr> =
        dataset.roster().patients().iter().map(|patient| SmolStr::new(patient.as_str())).collect();

    let mut data = Vec::with_capacity(7);
    for method in Method::ALL {
        if method == Method::Centered {
            data.push(legend_spacer());
        }
        let baseline = palette.organ_baseline(method);
        let (xaxis, yaxis) = PANEL_AXES[method.index()];
        for slot in OrganSlot::ALL {
            let mut trace = marked_scatter(
                &highlights[method.index()],
                slot.index(),
                &baseline[slot.index()],
                Values::Labels(labels.clone()),
                Values::Numbers(dataset.averages(method, slot).to_vec()),
            )
            .named(organ_for(method, slot).label())
            .on_axes(xaxis, yaxis);
            trace.mode = Some("markers");
            trace.legendgroup = Some(SmolStr::new_static(method.label()));
            data.push(trace);
        }
    }

    let mut layout = two_panel_layout(
        SmolStr::new_static("Average organ distances per patient"),
        "Patient",
        "Average distance [mm]",
        scale,
    );
    layout.uirevision = Some(SmolStr::new_static("average-distances"));
    Figure { data, layout }
}

/// Rotation angles of the bone alignment per axis over the timestamps.
pub fn rotations_figure(dataset: &Dataset, patient: &PatientId, spec: &HighlightSpec) -> Figure {
    let title = format_smolstr!("Bone alignment rotations, patient {patient}");
    let Some(rotations) = dataset.roster().index_of(patient).and_then(|row| dataset.rotations(row))
    else {
        return missing_patient(&title, patient);
    };

    let data = Axis::ALL
        .iter()
        .map(|axis| {
            marked_bars(spec, axis.index(), series_values(&rotations[axis.index()]))
                .named(axis.label())
        })
        .collect();

    Figure {
        data,
        layout: Layout {
            title: Some(Title::new(title)),
            barmode: Some("group"),
            xaxis: Some(AxisLayout::titled("Timestamp")),
            yaxis: Some(AxisLayout::titled("Angle [°]")),
            uirevision: Some(SmolStr::new_static("rotations-graph")),
            ..Layout::default()
        },
    }
}
