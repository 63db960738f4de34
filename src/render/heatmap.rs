// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Distance heatmaps: one row per patient, four columns (Bones, Prostate, Bladder, Rectum) per
//! timestamp.

use smol_str::{format_smolstr, SmolStr};

use super::figure::{
    Annotation, AxisLayout, Figure, Layout, Line, PerPoint, Shape, Title, Trace, TraceKind, Values,
};
use super::palette::Palette;
use crate::model::{Dataset, Method, Organ, OrganSlot, TIMESTAMP_COUNT};
use crate::sync::controls::AxisScale;
use crate::sync::highlight::HeatmapHighlight;
use crate::sync::resolve::HEATMAP_COLUMNS_PER_TIMESTAMP;
use crate::sync::slots::organ_for;

/// Color range of the uniform scale, in mm.
pub const UNIFORM_RANGE: [f64; 2] = [0.0, 85.0];

const COLUMN_ORGANS: [Organ; HEATMAP_COLUMNS_PER_TIMESTAMP] =
    [Organ::Bones, Organ::Prostate, Organ::Bladder, Organ::Rectum];

/// `[row][column]` values; the organ a method does not track is 0.
pub fn heatmap_grid(dataset: &Dataset, method: Method) -> Vec<Vec<f64>> {
    let columns = TIMESTAMP_COUNT * HEATMAP_COLUMNS_PER_TIMESTAMP;
    (0..dataset.roster().len())
        .map(|row| {
            let mut values = vec![0.0; columns];
            if let Some(series) = dataset.distances(method, row) {
                for slot in OrganSlot::ALL {
                    let column = organ_for(method, slot).heatmap_column();
                    for (t, value) in series[slot.index()].iter().enumerate() {
                        values[t * HEATMAP_COLUMNS_PER_TIMESTAMP + column] = *value;
                    }
                }
            }
            values
        })
        .collect()
}

pub fn heatmap_figure(
    dataset: &Dataset,
    method: Method,
    highlight: &HeatmapHighlight,
    scale: AxisScale,
    zoomed: bool,
    palette: &Palette,
) -> Figure {
    let rows = dataset.roster().len();
    let columns = TIMESTAMP_COUNT * HEATMAP_COLUMNS_PER_TIMESTAMP;
    let labels: Vec<SmolStr> = (0..columns)
        .map(|column| SmolStr::new_static(COLUMN_ORGANS[column % HEATMAP_COLUMNS_PER_TIMESTAMP].label()))
        .collect();

    let mut trace = Trace::new(TraceKind::Heatmap).named(method.label());
    trace.z = Some(Values::Grid(heatmap_grid(dataset, method)));
    trace.x = Some(Values::Numbers((0..columns).map(|column| column as f64).collect()));
    trace.y = Some(Values::Numbers((0..rows).map(|row| row as f64).collect()));
    trace.text = Some(Values::LabelGrid(vec![labels; rows]));
    trace.colorscale = Some(vec![
        (0.0, SmolStr::new_static("#f7fbff")),
        (0.5, palette.blue3.clone()),
        (1.0, palette.blue1.clone()),
    ]);
    if scale == AxisScale::Uniform {
        trace.zmin = Some(UNIFORM_RANGE[0]);
        trace.zmax = Some(UNIFORM_RANGE[1]);
    }
    trace.xgap = Some(1.0);
    trace.ygap = Some(1.0);

    let mut shapes: Vec<Shape> = (1..TIMESTAMP_COUNT)
        .map(|t| {
            let x = (t * HEATMAP_COLUMNS_PER_TIMESTAMP) as f64 - 0.5;
            Shape {
                kind: "line",
                x0: x,
                x1: x,
                y0: -0.5,
                y1: rows as f64 - 0.5,
                xref: Some("x"),
                yref: Some("y"),
                line: Line {
                    color: Some(PerPoint::One(palette.grey.clone())),
                    width: Some(PerPoint::One(2.0)),
                    dash: None,
                },
                fillcolor: None,
            }
        })
        .collect();
    shapes.extend(highlight.spans.iter().map(|span| Shape {
        kind: "rect",
        x0: span.first_column as f64 - 0.5,
        x1: span.last_column as f64 + 0.5,
        y0: span.row as f64 - 0.5,
        y1: span.row as f64 + 0.5,
        xref: Some("x"),
        yref: Some("y"),
        line: Line {
            color: Some(PerPoint::One(palette.highlight.clone())),
            width: Some(PerPoint::One(3.0)),
            dash: None,
        },
        fillcolor: None,
    }));

    let annotations = if zoomed {
        Vec::new()
    } else {
        let mut annotations: Vec<Annotation> = (0..TIMESTAMP_COUNT)
            .map(|t| {
                let center = (t * HEATMAP_COLUMNS_PER_TIMESTAMP) as f64 + 1.5;
                Annotation {
                    xref: "x",
                    x: center,
                    ..Annotation::paper(format_smolstr!("{}", t + 1), 0.0, 1.0)
                }
            })
            .collect();
        let legend: Vec<&str> = COLUMN_ORGANS.iter().map(|organ| organ.label()).collect();
        annotations.push(Annotation {
            yanchor: Some("top"),
            ..Annotation::paper(format_smolstr!("Columns per timestamp: {}", legend.join(", ")), 0.5, -0.08)
        });
        annotations
    };

    let ticktext: Vec<SmolStr> =
        dataset.roster().patients().iter().map(|patient| SmolStr::new(patient.as_str())).collect();
    Figure {
        data: vec![trace],
        layout: Layout {
            title: Some(Title::new(format_smolstr!("Organ distances after {}", method.label()))),
            xaxis: Some(AxisLayout {
                showticklabels: Some(false),
                showgrid: Some(false),
                zeroline: Some(false),
                ..AxisLayout::default()
            }),
            yaxis: Some(AxisLayout {
                autorange: Some("reversed"),
                tickvals: Some((0..rows).map(|row| row as f64).collect()),
                ticktext: Some(ticktext),
                ..AxisLayout::titled("Patient")
            }),
            shapes,
            annotations,
            uirevision: Some(SmolStr::new(format!("heatmap-{}", method.index()))),
            ..Layout::default()
        },
    }
}
