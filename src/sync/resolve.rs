// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The event resolver: picks the one authoritative interaction of a refresh cycle, normalizes
//! its raw payload and derives the selection update it implies.

use serde_json::Value;
use smol_str::SmolStr;
use tracing::debug;

use super::slots::{difference_organ, picked_organ};
use crate::model::{
    Axis, Organ, Payload, PatientId, PickX, RawPick, RawPickError, Roster, SelectionPatch,
    ViewEvent, ViewId, ViewKind, TIMESTAMP_COUNT,
};

/// Grid columns per timestamp in a heatmap (Bones, Prostate, Bladder, Rectum).
pub const HEATMAP_COLUMNS_PER_TIMESTAMP: usize = 4;

/// Scans `peers` in declared order and normalizes the event of the first view equal to
/// `changed`. No changed view, an absent event or a malformed payload resolve to `None`.
pub fn resolve_event(
    peers: &[(ViewId, Option<&RawPick>)],
    changed: Option<ViewId>,
    roster: &Roster,
) -> Option<ViewEvent> {
    let changed = changed?;
    let (view, pick) = peers.iter().find(|(view, pick)| *view == changed && pick.is_some())?;
    let pick = (*pick)?;
    match normalize_pick(*view, pick, roster) {
        Ok(event) => {
            debug!(view = %view, payload = ?event.payload, "resolved view event");
            Some(event)
        }
        Err(err) => {
            debug!(view = %view, error = %err, "ignoring malformed click payload");
            None
        }
    }
}

/// Converts the first point of a raw pick into the payload shape of the origin view kind.
pub fn normalize_pick(
    view: ViewId,
    pick: &RawPick,
    roster: &Roster,
) -> Result<ViewEvent, RawPickError> {
    let point = pick.first()?;
    let payload = match view.kind() {
        ViewKind::Heatmap(_) => {
            let column = point.x_index()?;
            let patient = heatmap_row(point.y_value()?, roster)?;
            Payload::CellPick {
                patient,
                timestamp: column / HEATMAP_COLUMNS_PER_TIMESTAMP,
                organ_label: SmolStr::new(point.text()?),
            }
        }
        ViewKind::OrganDistance | ViewKind::Difference => Payload::TracePick {
            series: point.curve_number()?,
            x: PickX::Timestamp(timestamp_from_axis(point.x_index()?)?),
        },
        ViewKind::Average => {
            let label = point.x_label()?;
            let patient = PatientId::new(label).map_err(|_| RawPickError::Invalid("x"))?;
            Payload::TracePick { series: point.curve_number()?, x: PickX::Patient(patient) }
        }
        ViewKind::Rotation => {
            let axis = point.curve_number().ok().and_then(|curve| Axis::new(curve % 3));
            Payload::Broadcast { timestamp: timestamp_from_axis(point.x_index()?)?, axis }
        }
        ViewKind::Scene | ViewKind::RotationGizmo | ViewKind::Slice(_) => {
            return Err(RawPickError::NotSelectable(view));
        }
    };
    Ok(ViewEvent::new(view, payload))
}

/// The timestamp axes are 1-based.
fn timestamp_from_axis(x: usize) -> Result<usize, RawPickError> {
    x.checked_sub(1).ok_or(RawPickError::Invalid("x"))
}

fn heatmap_row(value: &Value, roster: &Roster) -> Result<PatientId, RawPickError> {
    match value {
        Value::String(label) => PatientId::new(label).map_err(|_| RawPickError::Invalid("y")),
        other => {
            let row = crate::model::value_as_index(other).ok_or(RawPickError::Invalid("y"))?;
            roster.get(row).cloned().ok_or(RawPickError::RowOutOfRange(row))
        }
    }
}

/// Derives the partial selection update implied by a resolved event.
///
/// Fields the event cannot resolve (spacer series, series outside the view, values outside the
/// roster or the timestamp range, unknown organ labels) are left out of the patch.
pub fn selection_patch(event: &ViewEvent, roster: &Roster) -> SelectionPatch {
    let mut patch = SelectionPatch::default();
    match (&event.payload, event.origin.kind()) {
        (Payload::CellPick { patient, timestamp, organ_label }, _) => {
            patch.patient = in_roster(patient, roster);
            patch.timestamp = in_range(*timestamp);
            patch.organ = Organ::from_label(organ_label);
        }
        (Payload::TracePick { series, x }, kind) => {
            let organ = match kind {
                ViewKind::Difference => difference_organ(*series),
                _ => picked_organ(*series),
            };
            // The spacer is not a data point.
            let Some(organ) = organ else {
                return patch;
            };
            patch.organ = Some(organ);
            match x {
                PickX::Timestamp(timestamp) => patch.timestamp = in_range(*timestamp),
                PickX::Patient(patient) => patch.patient = in_roster(patient, roster),
            }
        }
        (Payload::Broadcast { timestamp, .. }, _) => patch.timestamp = in_range(*timestamp),
    }
    patch
}

fn in_roster(patient: &PatientId, roster: &Roster) -> Option<PatientId> {
    roster.contains(patient).then(|| patient.clone())
}

fn in_range(timestamp: usize) -> Option<usize> {
    (timestamp < TIMESTAMP_COUNT).then_some(timestamp)
}
