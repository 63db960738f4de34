// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The canonical (patient, timestamp, organ) selection shared by every view.

use super::ids::PatientId;
use super::organ::Organ;
use super::roster::Roster;

/// A snapshot of the current selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selection {
    pub patient: PatientId,
    /// 0-based timestamp index.
    pub timestamp: usize,
    pub organ: Organ,
}

/// A partial selection update; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionPatch {
    pub patient: Option<PatientId>,
    pub timestamp: Option<usize>,
    pub organ: Option<Organ>,
}

impl SelectionPatch {
    pub fn is_empty(&self) -> bool {
        self.patient.is_none() && self.timestamp.is_none() && self.organ.is_none()
    }
}

/// Holder of the single current selection.
///
/// Owned by the dashboard context; written only by the resolution step of a refresh cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    current: Selection,
}

impl SelectionState {
    /// Default selection: first patient, first timestamp, prostate.
    pub fn new(roster: &Roster) -> Self {
        Self {
            current: Selection {
                patient: roster.first().clone(),
                timestamp: 0,
                organ: Organ::Prostate,
            },
        }
    }

    pub fn current(&self) -> &Selection {
        &self.current
    }

    /// Copy of the current selection for renderers that outlive the borrow.
    pub fn snapshot(&self) -> Selection {
        self.current.clone()
    }

    /// Replaces the supplied fields only. Returns whether anything changed.
    pub fn update(&mut self, patch: SelectionPatch) -> bool {
        let before = self.current.clone();
        if let Some(patient) = patch.patient {
            self.current.patient = patient;
        }
        if let Some(timestamp) = patch.timestamp {
            self.current.timestamp = timestamp;
        }
        if let Some(organ) = patch.organ {
            self.current.organ = organ;
        }
        before != self.current
    }
}

#[cfg(test)]
mod tests {
    use super::{SelectionPatch, SelectionState};
    use crate::model::{Organ, PatientId, Roster};

    fn roster() -> Roster {
        Roster::new(
            ["P1", "P2", "P3"].into_iter().map(|p| PatientId::new(p).expect("id")).collect(),
        )
        .expect("roster")
    }

    #[test]
    fn defaults_to_first_patient_first_timestamp_prostate() {
        let state = SelectionState::new(&roster());
        let current = state.current();
        assert_eq!(current.patient.as_str(), "P1");
        assert_eq!(current.timestamp, 0);
        assert_eq!(current.organ, Organ::Prostate);
    }

    #[test]
    fn partial_update_keeps_unsupplied_fields() {
        let mut state = SelectionState::new(&roster());
        state.update(SelectionPatch {
            patient: Some(PatientId::new("P3").expect("id")),
            organ: Some(Organ::Rectum),
            ..SelectionPatch::default()
        });

        let changed =
            state.update(SelectionPatch { timestamp: Some(5), ..SelectionPatch::default() });

        assert!(changed);
        let current = state.current();
        assert_eq!(current.patient.as_str(), "P3");
        assert_eq!(current.timestamp, 5);
        assert_eq!(current.organ, Organ::Rectum);
    }

    #[test]
    fn empty_patch_reports_no_change() {
        let mut state = SelectionState::new(&roster());
        let before = state.snapshot();
        assert!(!state.update(SelectionPatch::default()));
        assert_eq!(state.current(), &before);
    }
}
