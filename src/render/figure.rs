// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! A serializable subset of the Plotly figure schema.
//!
//! Only the attributes the dashboard emits are modelled; unset options are omitted from the JSON.

use serde::Serialize;
use smol_str::SmolStr;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Scatter,
    Bar,
    Heatmap,
    Mesh3d,
    Scatter3d,
}

/// Data arrays of a trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Values {
    Numbers(Vec<f64>),
    Labels(Vec<SmolStr>),
    Grid(Vec<Vec<f64>>),
    LabelGrid(Vec<Vec<SmolStr>>),
}

/// A single value or one value per point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PerPoint<T> {
    One(T),
    Many(Vec<T>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Line {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<PerPoint<SmolStr>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<PerPoint<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<&'static str>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Marker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<PerPoint<SmolStr>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: TraceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<SmolStr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Values>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Values>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<Values>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub i: Option<Vec<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub j: Option<Vec<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k: Option<Vec<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Values>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textposition: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<SmolStr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legendgroup: Option<SmolStr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoverinfo: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorscale: Option<Vec<(f64, SmolStr)>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zmin: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zmax: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xgap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ygap: Option<f64>,
}

impl Trace {
    pub fn new(kind: TraceKind) -> Self {
        Self {
            kind,
            name: None,
            mode: None,
            x: None,
            y: None,
            z: None,
            i: None,
            j: None,
            k: None,
            text: None,
            textposition: None,
            color: None,
            opacity: None,
            marker: None,
            line: None,
            showlegend: None,
            legendgroup: None,
            hoverinfo: None,
            xaxis: None,
            yaxis: None,
            colorscale: None,
            zmin: None,
            zmax: None,
            xgap: None,
            ygap: None,
        }
    }

    pub fn named(mut self, name: impl Into<SmolStr>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Places the trace on a secondary subplot (`"x2"`, `"y2"`).
    pub fn on_axes(mut self, xaxis: &'static str, yaxis: &'static str) -> Self {
        self.xaxis = Some(xaxis);
        self.yaxis = Some(yaxis);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: SmolStr,
}

impl Title {
    pub fn new(text: impl Into<SmolStr>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AxisLayout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scaleanchor: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autorange: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickvals: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticktext: Option<Vec<SmolStr>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showgrid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zeroline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showticklabels: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

impl AxisLayout {
    pub fn titled(text: impl Into<SmolStr>) -> Self {
        Self { title: Some(Title::new(text)), ..Self::default() }
    }

    pub fn hidden() -> Self {
        Self { visible: Some(false), ..Self::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xref: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yref: Option<&'static str>,
    pub line: Line,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fillcolor: Option<SmolStr>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub text: SmolStr,
    pub x: f64,
    pub y: f64,
    pub xref: &'static str,
    pub yref: &'static str,
    pub showarrow: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xanchor: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yanchor: Option<&'static str>,
}

impl Annotation {
    /// Text placed in paper coordinates.
    pub fn paper(text: impl Into<SmolStr>, x: f64, y: f64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            xref: "paper",
            yref: "paper",
            showarrow: false,
            xanchor: Some("center"),
            yanchor: Some("bottom"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scene {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspectmode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<AxisLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<AxisLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zaxis: Option<AxisLayout>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<AxisLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<AxisLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis2: Option<AxisLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis2: Option<AxisLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<Scene>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shapes: Vec<Shape>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    /// Keeps zoom and camera state across re-renders on the host.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uirevision: Option<SmolStr>,
}

impl Figure {
    /// An empty figure showing `message` in place of data.
    pub fn placeholder(title: impl Into<SmolStr>, message: impl Into<SmolStr>) -> Self {
        Self {
            data: Vec::new(),
            layout: Layout {
                title: Some(Title::new(title)),
                xaxis: Some(AxisLayout::hidden()),
                yaxis: Some(AxisLayout::hidden()),
                annotations: vec![Annotation::paper(message, 0.5, 0.5)],
                ..Layout::default()
            },
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
