// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The highlight engine: per-view overlays derived from the resolved event.
//!
//! Every derivation is a pure function of the event, the current selection and the roster. A
//! missing event, or one whose values fall outside the roster, yields the baseline.

use smallvec::SmallVec;
use smol_str::SmolStr;

use super::resolve::HEATMAP_COLUMNS_PER_TIMESTAMP;
use super::slots::{difference_organ, difference_series, picked_organ, slot_for, DIFFERENCE_ORGANS};
use crate::model::{
    Axis, Method, Organ, OrganSlot, Payload, PickX, Roster, Selection, ViewEvent, ViewKind,
    TIMESTAMP_COUNT,
};
use crate::render::palette::Palette;

/// Stroke width of a highlighted organ-distance marker.
pub const ORGAN_HIGHLIGHT_WIDTH: u8 = 4;
/// Stroke width of a highlighted average marker.
pub const AVERAGE_HIGHLIGHT_WIDTH: u8 = 3;

/// What a derivation reads besides the event.
#[derive(Debug, Clone, Copy)]
pub struct HighlightContext<'a> {
    pub selection: &'a Selection,
    pub roster: &'a Roster,
    pub palette: &'a Palette,
}

/// Color and stroke width of one point.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mark {
    pub color: SmolStr,
    pub width: u8,
    /// Set by the engine; a baseline color equal to the highlight color stays unmarked.
    pub highlighted: bool,
}

/// Per-series, per-point marks of one view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSpec {
    series: Vec<Vec<Mark>>,
    highlight: Mark,
}

impl HighlightSpec {
    /// `points` baseline marks of width 0 per color.
    pub fn baseline(colors: &[SmolStr], points: usize, highlight: Mark) -> Self {
        let series = colors
            .iter()
            .map(|color| vec![Mark { color: color.clone(), width: 0, highlighted: false }; points])
            .collect();
        Self { series, highlight }
    }

    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    pub fn marks(&self, series: usize) -> &[Mark] {
        self.series.get(series).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn colors(&self, series: usize) -> Vec<SmolStr> {
        self.marks(series).iter().map(|mark| mark.color.clone()).collect()
    }

    pub fn widths(&self, series: usize) -> Vec<u8> {
        self.marks(series).iter().map(|mark| mark.width).collect()
    }

    /// `(series, point)` of every highlighted mark, in series-major order.
    pub fn highlighted(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for (series, marks) in self.series.iter().enumerate() {
            for (point, mark) in marks.iter().enumerate() {
                if mark.highlighted {
                    out.push((series, point));
                }
            }
        }
        out
    }

    pub fn is_baseline(&self) -> bool {
        self.highlighted().is_empty()
    }

    fn mark_point(&mut self, series: usize, point: usize) {
        if let Some(mark) = self.series.get_mut(series).and_then(|marks| marks.get_mut(point)) {
            *mark = self.highlight.clone();
        }
    }

    fn mark_series(&mut self, series: usize) {
        if let Some(marks) = self.series.get_mut(series) {
            marks.fill(self.highlight.clone());
        }
    }

    fn mark_slots(&mut self, slots: &[usize], reach: Reach) {
        for &series in slots {
            match reach {
                Reach::At(point) => self.mark_point(series, point),
                Reach::Whole => self.mark_series(series),
            }
        }
    }
}

/// A run of highlighted heatmap cells on one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSpan {
    pub row: usize,
    pub first_column: usize,
    pub last_column: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeatmapHighlight {
    pub spans: SmallVec<[CellSpan; 1]>,
}

impl HeatmapHighlight {
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn contains(&self, row: usize, column: usize) -> bool {
        self.spans
            .iter()
            .any(|span| span.row == row && (span.first_column..=span.last_column).contains(&column))
    }
}

/// Which structures an event points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Organ(Organ),
    AllOrgans { axis: Option<Axis> },
}

/// How far along the timestamp axis an event reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reach {
    At(usize),
    Whole,
}

/// An event reduced to what the derivations need, validated against the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Anchor {
    focus: Focus,
    reach: Reach,
    /// Roster row of the patient the event refers to.
    row: usize,
}

fn anchor(event: Option<&ViewEvent>, ctx: &HighlightContext<'_>) -> Option<Anchor> {
    let event = event?;
    let origin = event.origin.kind();
    let selected_row = || ctx.roster.index_of(&ctx.selection.patient);
    let at = |timestamp: usize| (timestamp < TIMESTAMP_COUNT).then_some(Reach::At(timestamp));

    let (focus, reach, row) = match (&event.payload, origin) {
        (Payload::CellPick { patient, timestamp, organ_label }, _) => (
            Focus::Organ(Organ::from_label(organ_label)?),
            at(*timestamp)?,
            ctx.roster.index_of(patient)?,
        ),
        (Payload::TracePick { series, x: PickX::Timestamp(timestamp) }, ViewKind::Difference) => {
            (Focus::Organ(difference_organ(*series)?), at(*timestamp)?, selected_row()?)
        }
        (Payload::TracePick { series, x: PickX::Timestamp(timestamp) }, _) => {
            (Focus::Organ(picked_organ(*series)?), at(*timestamp)?, selected_row()?)
        }
        (Payload::TracePick { series, x: PickX::Patient(patient) }, _) => {
            (Focus::Organ(picked_organ(*series)?), Reach::Whole, ctx.roster.index_of(patient)?)
        }
        (Payload::Broadcast { timestamp, axis }, _) => {
            (Focus::AllOrgans { axis: *axis }, at(*timestamp)?, selected_row()?)
        }
    };
    Some(Anchor { focus, reach, row })
}

/// Series of the slots showing the focused organ(s) in the `method` panel.
fn focused_slots(focus: Focus, method: Method) -> SmallVec<[usize; 3]> {
    match focus {
        Focus::Organ(organ) => slot_for(method, organ).map(OrganSlot::index).into_iter().collect(),
        Focus::AllOrgans { .. } => OrganSlot::ALL.iter().map(|slot| slot.index()).collect(),
    }
}

fn stroke(ctx: &HighlightContext<'_>, width: u8) -> Mark {
    Mark { color: ctx.palette.highlight.clone(), width, highlighted: true }
}

/// One panel of the organ-distance view: 3 slots × 13 timestamps.
pub fn organ_distance_highlights(
    event: Option<&ViewEvent>,
    ctx: &HighlightContext<'_>,
    method: Method,
) -> HighlightSpec {
    let mut spec = HighlightSpec::baseline(
        &ctx.palette.organ_baseline(method),
        TIMESTAMP_COUNT,
        stroke(ctx, ORGAN_HIGHLIGHT_WIDTH),
    );
    if let Some(anchor) = anchor(event, ctx) {
        spec.mark_slots(&focused_slots(anchor.focus, method), anchor.reach);
    }
    spec
}

/// Bladder and Rectum bars × 13 timestamps.
pub fn difference_highlights(event: Option<&ViewEvent>, ctx: &HighlightContext<'_>) -> HighlightSpec {
    let mut spec = HighlightSpec::baseline(
        &ctx.palette.difference_baseline(),
        TIMESTAMP_COUNT,
        stroke(ctx, 0),
    );
    if let Some(anchor) = anchor(event, ctx) {
        let series: SmallVec<[usize; 2]> = match anchor.focus {
            Focus::Organ(organ) => difference_series(organ).into_iter().collect(),
            Focus::AllOrgans { .. } => (0..DIFFERENCE_ORGANS.len()).collect(),
        };
        spec.mark_slots(&series, anchor.reach);
    }
    spec
}

/// One panel of the average view: 3 slots × roster size, marked on the event's patient.
pub fn average_highlights(
    event: Option<&ViewEvent>,
    ctx: &HighlightContext<'_>,
    method: Method,
) -> HighlightSpec {
    let mut spec = HighlightSpec::baseline(
        &ctx.palette.organ_baseline(method),
        ctx.roster.len(),
        stroke(ctx, AVERAGE_HIGHLIGHT_WIDTH),
    );
    if let Some(anchor) = anchor(event, ctx) {
        spec.mark_slots(&focused_slots(anchor.focus, method), Reach::At(anchor.row));
    }
    spec
}

/// X, Y and Z bars × 13 timestamps.
pub fn rotation_highlights(event: Option<&ViewEvent>, ctx: &HighlightContext<'_>) -> HighlightSpec {
    let mut spec = HighlightSpec::baseline(
        &ctx.palette.rotation_baseline(),
        TIMESTAMP_COUNT,
        stroke(ctx, 0),
    );
    let Some(anchor) = anchor(event, ctx) else {
        return spec;
    };
    // An average pick carries no timestamp.
    if let Reach::At(timestamp) = anchor.reach {
        let axes: SmallVec<[usize; 3]> = match anchor.focus {
            Focus::AllOrgans { axis: Some(axis) } => SmallVec::from_elem(axis.index(), 1),
            _ => Axis::ALL.iter().map(|axis| axis.index()).collect(),
        };
        spec.mark_slots(&axes, Reach::At(timestamp));
    }
    spec
}

/// Cell spans of both heatmaps (they share one grid layout).
pub fn heatmap_highlights(event: Option<&ViewEvent>, ctx: &HighlightContext<'_>) -> HeatmapHighlight {
    let mut highlight = HeatmapHighlight::default();
    let Some(anchor) = anchor(event, ctx) else {
        return highlight;
    };
    let row = anchor.row;
    let cell = |timestamp: usize, organ: Organ| {
        let column = timestamp * HEATMAP_COLUMNS_PER_TIMESTAMP + organ.heatmap_column();
        CellSpan { row, first_column: column, last_column: column }
    };
    match (anchor.focus, anchor.reach) {
        (Focus::Organ(organ), Reach::At(timestamp)) => highlight.spans.push(cell(timestamp, organ)),
        (Focus::Organ(organ), Reach::Whole) => {
            highlight.spans.extend((0..TIMESTAMP_COUNT).map(|timestamp| cell(timestamp, organ)));
        }
        (Focus::AllOrgans { .. }, Reach::At(timestamp)) => {
            let first_column = timestamp * HEATMAP_COLUMNS_PER_TIMESTAMP;
            highlight.spans.push(CellSpan {
                row,
                first_column,
                last_column: first_column + HEATMAP_COLUMNS_PER_TIMESTAMP - 1,
            });
        }
        (Focus::AllOrgans { .. }, Reach::Whole) => {}
    }
    highlight
}

/// The 3D organ filter implied by an event: the selected organ alone after a pick that names an
/// organ, unchanged otherwise.
pub fn scene_organs(event: Option<&ViewEvent>, selection: &Selection) -> Option<Vec<Organ>> {
    let event = event?;
    let names_organ = match (&event.payload, event.origin.kind()) {
        (Payload::CellPick { organ_label, .. }, _) => Organ::from_label(organ_label).is_some(),
        (Payload::TracePick { series, .. }, ViewKind::Difference) => {
            difference_organ(*series).is_some()
        }
        (Payload::TracePick { series, .. }, ViewKind::OrganDistance | ViewKind::Average) => {
            picked_organ(*series).is_some()
        }
        _ => false,
    };
    names_organ.then(|| vec![selection.organ])
}

#[cfg(test)]
mod tests;
