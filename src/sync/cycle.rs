// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The refresh-cycle coordinator.
//!
//! One trigger runs one synchronous cycle: record the raw pick, resolve the single authoritative
//! event, update the selection, synchronize the dependent controls, then re-render the affected
//! views. Only [`Trigger::Pick`] writes the pick log, so rendering can never feed back into
//! resolution.

use std::collections::BTreeMap;
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, warn};

use super::controls::{ControlChange, DisplayControls};
use super::highlight::{
    average_highlights, difference_highlights, heatmap_highlights, organ_distance_highlights,
    rotation_highlights, HighlightContext,
};
use super::resolve::{resolve_event, selection_patch};
use crate::geometry::{GeometryBridge, MeshStore};
use crate::model::{
    Dataset, Method, RawPick, Selection, SelectionPatch, SelectionState, ViewEvent, ViewId,
    ViewKind, TIMESTAMP_COUNT,
};
use crate::render::{
    average_distances_figure, differences_figure, heatmap_figure, load_stage_meshes,
    organ_distances_figure, rotation_axes_figure, rotations_figure, scene_figure, scene_title,
    slice_figure, slice_title, Figure, Palette,
};

/// What starts a refresh cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
    /// A click on a view; only peer views originate selections.
    Pick { view: ViewId, event: RawPick },
    /// A display-control edit; bypasses the resolver.
    Control(ControlChange),
    /// A programmatic selection; applied directly, without a view event.
    Select(SelectionPatch),
}

/// The latest raw click of every peer view.
#[derive(Debug, Clone, Default)]
pub struct PickLog {
    picks: BTreeMap<ViewId, RawPick>,
}

impl PickLog {
    pub fn record(&mut self, view: ViewId, pick: RawPick) {
        self.picks.insert(view, pick);
    }

    pub fn get(&self, view: ViewId) -> Option<&RawPick> {
        self.picks.get(&view)
    }

    /// Peer views in resolver scan order, with their latest pick.
    pub fn peers(&self) -> Vec<(ViewId, Option<&RawPick>)> {
        ViewId::PEERS.iter().map(|view| (*view, self.picks.get(view))).collect()
    }
}

/// Outcome of one cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Refresh {
    pub event: Option<ViewEvent>,
    pub selection: Selection,
    pub selection_changed: bool,
    pub controls_changed: bool,
    /// Re-rendered views only; other views keep their previous figure.
    pub figures: BTreeMap<ViewId, Figure>,
}

pub struct Dashboard {
    dataset: Arc<Dataset>,
    palette: Palette,
    geometry: Arc<dyn GeometryBridge>,
    meshes: Option<MeshStore>,
    selection: SelectionState,
    controls: DisplayControls,
    picks: PickLog,
    /// Event each view was last rendered with; absent means baseline.
    rendered_with: BTreeMap<ViewId, ViewEvent>,
    cycles: u64,
}

impl Dashboard {
    pub fn new(
        dataset: Arc<Dataset>,
        geometry: Arc<dyn GeometryBridge>,
        meshes: Option<MeshStore>,
        palette: Palette,
    ) -> Self {
        let selection = SelectionState::new(dataset.roster());
        Self {
            dataset,
            palette,
            geometry,
            meshes,
            selection,
            controls: DisplayControls::default(),
            picks: PickLog::default(),
            rendered_with: BTreeMap::new(),
            cycles: 0,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn selection(&self) -> &Selection {
        self.selection.current()
    }

    pub fn controls(&self) -> &DisplayControls {
        &self.controls
    }

    pub fn mesh_store(&self) -> Option<&MeshStore> {
        self.meshes.as_ref()
    }

    pub fn picks(&self) -> &PickLog {
        &self.picks
    }

    /// The event `view` was last rendered with.
    pub fn last_event(&self, view: ViewId) -> Option<&ViewEvent> {
        self.rendered_with.get(&view)
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn handle(&mut self, trigger: Trigger) -> Refresh {
        self.cycles += 1;
        let (event, selection_changed, controls_changed, targets) = match trigger {
            Trigger::Pick { view, event } => {
                if !view.is_peer() {
                    debug!(cycle = self.cycles, view = %view, "ignoring pick on a non-peer view");
                    return self.refresh(None, false, false, &[]);
                }
                self.picks.record(view, event);
                self.resolve(view)
            }
            Trigger::Control(change) => {
                debug!(cycle = self.cycles, change = %change, "control changed");
                let targets = change.dependents();
                let changed = self.controls.apply(change);
                for view in &targets {
                    self.rendered_with.remove(view);
                }
                (None, false, changed, targets.to_vec())
            }
            Trigger::Select(patch) => {
                let patch = self.validated(patch);
                let changed = self.selection.update(patch);
                debug!(cycle = self.cycles, changed, "selection set directly");
                self.rendered_with.clear();
                (None, changed, false, ViewId::ALL.to_vec())
            }
        };
        self.refresh(event, selection_changed, controls_changed, &targets)
    }

    fn resolve(&mut self, view: ViewId) -> (Option<ViewEvent>, bool, bool, Vec<ViewId>) {
        let roster = self.dataset.roster();
        let Some(event) = resolve_event(&self.picks.peers(), Some(view), roster) else {
            // No resolution: selection, controls and every figure stay as they are.
            debug!(cycle = self.cycles, view = %view, "pick did not resolve");
            return (None, false, false, Vec::new());
        };
        let patch = selection_patch(&event, roster);
        let selection_changed = self.selection.update(patch.clone());
        let controls_changed =
            self.controls.sync_from_event(&event, &patch, self.selection.current());
        debug!(cycle = self.cycles, view = %view, selection_changed, "pick resolved");

        for target in ViewId::ALL {
            self.rendered_with.insert(target, event.clone());
        }
        (Some(event), selection_changed, controls_changed, ViewId::ALL.to_vec())
    }

    fn validated(&self, mut patch: SelectionPatch) -> SelectionPatch {
        let roster = self.dataset.roster();
        if patch.patient.as_ref().is_some_and(|patient| !roster.contains(patient)) {
            patch.patient = None;
        }
        if patch.timestamp.is_some_and(|timestamp| timestamp >= TIMESTAMP_COUNT) {
            patch.timestamp = None;
        }
        patch
    }

    fn refresh(
        &self,
        event: Option<ViewEvent>,
        selection_changed: bool,
        controls_changed: bool,
        targets: &[ViewId],
    ) -> Refresh {
        Refresh {
            event,
            selection: self.selection.snapshot(),
            selection_changed,
            controls_changed,
            figures: self.render_views(targets),
        }
    }

    pub fn render_all(&self) -> BTreeMap<ViewId, Figure> {
        self.render_views(&ViewId::ALL)
    }

    pub fn render_view(&self, view: ViewId) -> Figure {
        let mut figures = self.render_views(&[view]);
        figures
            .remove(&view)
            .unwrap_or_else(|| Figure::placeholder(view.as_str(), "view was not rendered"))
    }

    /// Renders `views` from a selection snapshot; the mesh views run in parallel with the
    /// charts.
    pub fn render_views(&self, views: &[ViewId]) -> BTreeMap<ViewId, Figure> {
        let selection = self.selection.snapshot();
        let (geometric, charts): (Vec<ViewId>, Vec<ViewId>) = views
            .iter()
            .copied()
            .partition(|view| matches!(view.kind(), ViewKind::Scene | ViewKind::Slice(_)));

        let (chart_figures, mesh_figures) = rayon::join(
            || {
                charts
                    .iter()
                    .filter_map(|view| Some((*view, self.render_chart(*view, &selection)?)))
                    .collect::<Vec<_>>()
            },
            || self.render_meshes(&geometric, &selection),
        );
        chart_figures.into_iter().chain(mesh_figures).collect()
    }

    fn render_chart(&self, view: ViewId, selection: &Selection) -> Option<Figure> {
        let dataset = self.dataset.as_ref();
        let controls = &self.controls;
        let palette = &self.palette;
        let event = self.rendered_with.get(&view);
        let ctx = HighlightContext { selection, roster: dataset.roster(), palette };

        let figure = match view.kind() {
            ViewKind::OrganDistance => organ_distances_figure(
                dataset,
                &selection.patient,
                &Method::ALL.map(|method| organ_distance_highlights(event, &ctx, method)),
                controls.organ_scale,
                palette,
            ),
            ViewKind::Difference => {
                differences_figure(dataset, &selection.patient, &difference_highlights(event, &ctx))
            }
            ViewKind::Average => average_distances_figure(
                dataset,
                &Method::ALL.map(|method| average_highlights(event, &ctx, method)),
                controls.average_scale,
                palette,
            ),
            ViewKind::Heatmap(method) => heatmap_figure(
                dataset,
                method,
                &heatmap_highlights(event, &ctx),
                controls.heatmap_scale,
                controls.heatmap_zoomed(method),
                palette,
            ),
            ViewKind::Rotation => {
                rotations_figure(dataset, &selection.patient, &rotation_highlights(event, &ctx))
            }
            ViewKind::RotationGizmo => rotation_axes_figure(dataset, selection, controls, palette),
            ViewKind::Scene | ViewKind::Slice(_) => return None,
        };
        Some(figure)
    }

    /// Loads the mesh sets once and renders the scene and slice views from them. A geometry
    /// failure turns every requested mesh view into a placeholder.
    fn render_meshes(&self, views: &[ViewId], selection: &Selection) -> Vec<(ViewId, Figure)> {
        if views.is_empty() {
            return Vec::new();
        }
        let title = scene_title(&selection.patient, &self.controls);
        let placeholder_title = |view: ViewId| match view.kind() {
            ViewKind::Slice(axis) => slice_title(axis).into(),
            _ => title.clone(),
        };

        let stages = match load_stage_meshes(
            self.geometry.as_ref(),
            self.meshes.as_ref(),
            &selection.patient,
            &self.controls,
            &self.palette,
        ) {
            Ok(stages) => stages,
            Err(err) => {
                warn!(patient = %selection.patient, error = %err, "mesh views degraded");
                let message = err.to_string();
                return views
                    .iter()
                    .map(|view| (*view, Figure::placeholder(placeholder_title(*view), message.as_str())))
                    .collect();
            }
        };

        views
            .par_iter()
            .map(|view| {
                let figure = match view.kind() {
                    ViewKind::Slice(axis) => slice_figure(
                        self.geometry.as_ref(),
                        &stages,
                        axis,
                        self.controls.slice_position(axis),
                    )
                    .unwrap_or_else(|err| {
                        warn!(view = %view, error = %err, "slice degraded");
                        Figure::placeholder(placeholder_title(*view), err.to_string())
                    }),
                    _ => scene_figure(&stages, title.clone()),
                };
                (*view, figure)
            })
            .collect()
    }
}
