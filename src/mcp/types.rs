// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::RawPick;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct McpSelection {
    pub patient: String,
    /// 0-based; the charts label it `timestamp + 1`.
    pub timestamp: usize,
    pub organ: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct McpControls {
    pub method: String,
    pub mode: String,
    pub first_stage: String,
    pub second_stage: String,
    pub organs: Vec<String>,
    pub organ_scale: String,
    pub average_scale: String,
    pub heatmap_scale: String,
    /// Slider positions for the x, y and z slices.
    pub slices: [f64; 3],
    /// Zoom flags of the ICP and centring heatmaps.
    pub heatmap_zoomed: [bool; 2],
}

/// A resolved view event, flattened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct McpViewEvent {
    pub origin: String,
    /// `cell`, `trace` or `broadcast`.
    pub kind: String,
    pub patient: Option<String>,
    pub timestamp: Option<usize>,
    pub series: Option<usize>,
    pub organ: Option<String>,
    pub axis: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RosterReadResponse {
    pub patients: Vec<String>,
    pub timestamps: Vec<String>,
    pub views: Vec<String>,
    pub meshes: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SelectionReadResponse {
    pub selection: McpSelection,
    pub controls: McpControls,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SelectionUpdateParams {
    pub patient: Option<String>,
    pub timestamp: Option<usize>,
    pub organ: Option<String>,
    /// Include the re-rendered figures (default `false`).
    pub figures: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ViewClickParams {
    pub view: String,
    /// Raw click payload: `{"points": [{"curveNumber", "x", "y", "text"}]}`.
    pub event: RawPick,
    pub figures: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ControlSetParams {
    /// One of `method`, `mode`, `first_stage`, `second_stage`, `organs`, `organ_scale`,
    /// `average_scale`, `heatmap_scale`, `slice_x`, `slice_y`, `slice_z`, `heatmap_zoom_icp`,
    /// `heatmap_zoom_center`.
    pub control: String,
    /// Organs are comma-separated; sliders take a number in `[0, 1]`.
    pub value: String,
    pub figures: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RefreshResponse {
    pub event: Option<McpViewEvent>,
    pub selection: McpSelection,
    pub controls: McpControls,
    pub selection_changed: bool,
    pub controls_changed: bool,
    /// Views re-rendered by this cycle.
    pub rendered: Vec<String>,
    /// Plotly figures by view id, only when requested.
    pub figures: Option<BTreeMap<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ViewRenderParams {
    pub view: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ViewRenderResponse {
    pub view: String,
    pub figure: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DashboardRenderResponse {
    pub selection: McpSelection,
    pub figures: BTreeMap<String, serde_json::Value>,
}
