// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Display controls: the values outside the selection that shape the rendered figures, and the
//! ones a resolved event synchronizes.

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;
use tracing::debug;

use super::highlight::scene_organs;
use crate::model::{Axis, Method, Organ, Selection, SelectionPatch, Stage, ViewEvent, ViewId};

/// Which mesh sets the 3D and slice views show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneMode {
    /// First stage in pink, second stage in purple, both registered with the chosen method.
    TwoTimestamps,
    /// The plan organs only.
    PlanOrgans,
}

impl SceneMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TwoTimestamps => "two_timestamps",
            Self::PlanOrgans => "plan_organs",
        }
    }
}

impl FromStr for SceneMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
            "two_timestamps" => Ok(Self::TwoTimestamps),
            "plan_organs" | "plan" => Ok(Self::PlanOrgans),
            other => Err(format!("unknown scene mode '{other}'")),
        }
    }
}

/// Axis-range policy of a two-panel chart or of the heatmap color range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisScale {
    Uniform,
    Individual,
}

impl AxisScale {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::Individual => "individual",
        }
    }
}

impl FromStr for AxisScale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uniform" => Ok(Self::Uniform),
            "individual" => Ok(Self::Individual),
            other => Err(format!("unknown axis scale '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayControls {
    pub method: Method,
    pub mode: SceneMode,
    pub first_stage: Stage,
    pub second_stage: Stage,
    /// Organs shown in the 3D and slice views, in [`Organ::ALL`] order.
    pub organs: Vec<Organ>,
    pub organ_scale: AxisScale,
    pub average_scale: AxisScale,
    pub heatmap_scale: AxisScale,
    /// Slider positions in `[0, 1]`, indexed by [`Axis::index`].
    pub slices: [f64; 3],
    /// Per heatmap, indexed by [`Method::index`].
    pub heatmap_zoomed: [bool; 2],
}

impl Default for DisplayControls {
    fn default() -> Self {
        Self {
            method: Method::BoneAligned,
            mode: SceneMode::TwoTimestamps,
            first_stage: Stage::Plan,
            second_stage: Stage::Timestamp(1),
            organs: vec![Organ::Prostate, Organ::Bladder, Organ::Rectum],
            organ_scale: AxisScale::Uniform,
            average_scale: AxisScale::Uniform,
            heatmap_scale: AxisScale::Uniform,
            slices: [0.5; 3],
            heatmap_zoomed: [false; 2],
        }
    }
}

/// One user edit of a display control. Controls never go through the resolver.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlChange {
    Method(Method),
    Mode(SceneMode),
    FirstStage(Stage),
    SecondStage(Stage),
    Organs(Vec<Organ>),
    OrganScale(AxisScale),
    AverageScale(AxisScale),
    HeatmapScale(AxisScale),
    Slice { axis: Axis, position: f64 },
    HeatmapZoom { method: Method, zoomed: bool },
}

impl ControlChange {
    /// Views whose figure depends on this control.
    pub fn dependents(&self) -> SmallVec<[ViewId; 5]> {
        const SLICES: [ViewId; 3] =
            [ViewId::Slice(Axis::X), ViewId::Slice(Axis::Y), ViewId::Slice(Axis::Z)];
        let mut views = SmallVec::new();
        match self {
            Self::Method(_) | Self::Mode(_) | Self::FirstStage(_) => {
                views.push(ViewId::MainGraph);
                views.push(ViewId::RotationsAxes);
                views.extend(SLICES);
            }
            Self::SecondStage(_) | Self::Organs(_) => {
                views.push(ViewId::MainGraph);
                views.extend(SLICES);
            }
            Self::OrganScale(_) => views.push(ViewId::OrganDistances),
            Self::AverageScale(_) => views.push(ViewId::AverageDistances),
            Self::HeatmapScale(_) => {
                views.push(ViewId::HeatmapIcp);
                views.push(ViewId::HeatmapCenter);
            }
            Self::Slice { .. } => views.extend(SLICES),
            Self::HeatmapZoom { method: Method::BoneAligned, .. } => views.push(ViewId::HeatmapIcp),
            Self::HeatmapZoom { method: Method::Centered, .. } => {
                views.push(ViewId::HeatmapCenter)
            }
        }
        views
    }
}

impl fmt::Display for ControlChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Method(method) => write!(f, "method={}", method.label()),
            Self::Mode(mode) => write!(f, "mode={}", mode.as_str()),
            Self::FirstStage(stage) => write!(f, "first_stage={stage}"),
            Self::SecondStage(stage) => write!(f, "second_stage={stage}"),
            Self::Organs(organs) => {
                let labels: Vec<&str> = organs.iter().map(|organ| organ.label()).collect();
                write!(f, "organs={}", labels.join(","))
            }
            Self::OrganScale(scale) => write!(f, "organ_scale={}", scale.as_str()),
            Self::AverageScale(scale) => write!(f, "average_scale={}", scale.as_str()),
            Self::HeatmapScale(scale) => write!(f, "heatmap_scale={}", scale.as_str()),
            Self::Slice { axis, position } => write!(f, "slice_{}={position}", axis.label()),
            Self::HeatmapZoom { method, zoomed } => {
                write!(f, "heatmap_zoom[{}]={zoomed}", method.label())
            }
        }
    }
}

impl DisplayControls {
    pub fn slice_position(&self, axis: Axis) -> f64 {
        self.slices[axis.index()]
    }

    pub fn heatmap_zoomed(&self, method: Method) -> bool {
        self.heatmap_zoomed[method.index()]
    }

    /// Applies a user edit. Returns whether any value changed.
    pub fn apply(&mut self, change: ControlChange) -> bool {
        let before = self.clone();
        match change {
            ControlChange::Method(method) => self.method = method,
            ControlChange::Mode(mode) => self.mode = mode,
            ControlChange::FirstStage(stage) => self.first_stage = stage,
            ControlChange::SecondStage(stage) => self.second_stage = stage,
            ControlChange::Organs(organs) => self.organs = checklist(&organs),
            ControlChange::OrganScale(scale) => self.organ_scale = scale,
            ControlChange::AverageScale(scale) => self.average_scale = scale,
            ControlChange::HeatmapScale(scale) => self.heatmap_scale = scale,
            ControlChange::Slice { axis, position } => {
                let position = if position.is_finite() { position.clamp(0.0, 1.0) } else { 0.5 };
                self.slices[axis.index()] = position;
            }
            ControlChange::HeatmapZoom { method, zoomed } => {
                self.heatmap_zoomed[method.index()] = zoomed;
            }
        }
        before != *self
    }

    /// Synchronizes the controls a resolved event drives: the 3D organ checklist collapses to
    /// the selected organ, and the second stage follows a timestamp the pick actually selected.
    pub fn sync_from_event(
        &mut self,
        event: &ViewEvent,
        patch: &SelectionPatch,
        selection: &Selection,
    ) -> bool {
        let mut changed = false;
        if let Some(organs) = scene_organs(Some(event), selection) {
            changed |= self.organs != organs;
            self.organs = organs;
        }
        if let Some(stage) = patch.timestamp.and_then(Stage::from_index) {
            changed |= self.second_stage != stage;
            self.second_stage = stage;
        }
        if changed {
            debug!(
                organs = ?self.organs,
                second_stage = %self.second_stage,
                "controls synchronized from view event"
            );
        }
        changed
    }
}

/// Deduplicates and orders a checklist value.
fn checklist(organs: &[Organ]) -> Vec<Organ> {
    Organ::ALL.into_iter().filter(|organ| organs.contains(organ)).collect()
}
