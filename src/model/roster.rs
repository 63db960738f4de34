// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ids::PatientId;

/// Number of imaging timestamps recorded per patient.
pub const TIMESTAMP_COUNT: usize = 13;

/// The fixed, ordered cohort of patients.
///
/// Order matters: it is the row order of the heatmaps and the x order of the average view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PatientId>", into = "Vec<PatientId>")]
pub struct Roster {
    patients: Vec<PatientId>,
}

impl Roster {
    pub fn new(patients: Vec<PatientId>) -> Result<Self, RosterError> {
        if patients.is_empty() {
            return Err(RosterError::Empty);
        }
        for (idx, patient) in patients.iter().enumerate() {
            if patients[..idx].contains(patient) {
                return Err(RosterError::Duplicate(patient.clone()));
            }
        }
        Ok(Self { patients })
    }

    pub fn patients(&self) -> &[PatientId] {
        &self.patients
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    pub fn first(&self) -> &PatientId {
        &self.patients[0]
    }

    pub fn get(&self, index: usize) -> Option<&PatientId> {
        self.patients.get(index)
    }

    pub fn index_of(&self, patient: &PatientId) -> Option<usize> {
        self.patients.iter().position(|candidate| candidate == patient)
    }

    pub fn find(&self, label: &str) -> Option<&PatientId> {
        self.patients.iter().find(|candidate| candidate.as_str() == label)
    }

    pub fn contains(&self, patient: &PatientId) -> bool {
        self.index_of(patient).is_some()
    }
}

impl TryFrom<Vec<PatientId>> for Roster {
    type Error = RosterError;

    fn try_from(value: Vec<PatientId>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Roster> for Vec<PatientId> {
    fn from(value: Roster) -> Self {
        value.patients
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    Empty,
    Duplicate(PatientId),
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("roster must contain at least one patient"),
            Self::Duplicate(patient) => write!(f, "patient {patient} is listed twice"),
        }
    }
}

impl std::error::Error for RosterError {}

/// Tick labels of the timestamp axes ("1" ..= "13").
pub fn timestamp_labels() -> Vec<String> {
    (1..=TIMESTAMP_COUNT).map(|n| n.to_string()).collect()
}

/// A time point shown in the 3D and slice views: the plan, or one of the imaging timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Plan,
    /// 1-based timestamp number.
    Timestamp(u8),
}

impl Stage {
    /// Stage displaying the 0-based timestamp index.
    pub fn from_index(timestamp: usize) -> Option<Self> {
        (timestamp < TIMESTAMP_COUNT).then(|| Self::Timestamp(timestamp as u8 + 1))
    }

    /// Suffix of the mesh file stem (`prostate_plan.obj`, `prostate7.obj`).
    pub fn file_suffix(self) -> String {
        match self {
            Self::Plan => "_plan".to_owned(),
            Self::Timestamp(number) => number.to_string(),
        }
    }

    /// Phrase used in the 3D scene title.
    pub fn describe(self) -> String {
        match self {
            Self::Plan => "plan organs".to_owned(),
            Self::Timestamp(number) => format!("timestamp number {number}"),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plan => f.write_str("plan"),
            Self::Timestamp(number) => write!(f, "{number}"),
        }
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("plan") {
            return Ok(Self::Plan);
        }
        let number: u8 = s.parse().map_err(|_| format!("invalid stage '{s}'"))?;
        if number == 0 || usize::from(number) > TIMESTAMP_COUNT {
            return Err(format!("stage {number} is outside 1..={TIMESTAMP_COUNT}"));
        }
        Ok(Self::Timestamp(number))
    }
}
