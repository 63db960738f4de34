// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only, loaded-once distance and rotation tables.

use std::fmt;

use super::ids::PatientId;
use super::organ::{Axis, Method, OrganSlot};
use super::roster::{Roster, TIMESTAMP_COUNT};

/// One value per timestamp.
pub type Series = [f64; TIMESTAMP_COUNT];

/// Unvalidated nested tables as read from disk (or generated).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetTables {
    /// `[method][patient][slot][timestamp]`, method order as in [`Method::ALL`].
    pub distances: [Vec<Vec<Vec<f64>>>; 2],
    /// `[method][slot][patient]`.
    pub averages: [Vec<Vec<f64>>; 2],
    /// `[patient][axis][timestamp]`.
    pub rotations: Vec<Vec<Vec<f64>>>,
}

/// Fully populated tables for the whole roster.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    roster: Roster,
    distances: [Vec<[Series; OrganSlot::COUNT]>; 2],
    averages: [[Vec<f64>; OrganSlot::COUNT]; 2],
    rotations: Vec<[Series; 3]>,
}

impl Dataset {
    pub fn new(roster: Roster, tables: DatasetTables) -> Result<Self, DatasetError> {
        let DatasetTables { distances, averages, rotations } = tables;
        let [icp_distances, center_distances] = distances;
        let [icp_averages, center_averages] = averages;

        let distances = [
            patient_major(&roster, Table::Distances(Method::BoneAligned), icp_distances)?,
            patient_major(&roster, Table::Distances(Method::Centered), center_distances)?,
        ];
        let averages = [
            slot_major(&roster, Method::BoneAligned, icp_averages)?,
            slot_major(&roster, Method::Centered, center_averages)?,
        ];
        let rotations = patient_major(&roster, Table::Rotations, rotations)?;

        Ok(Self { roster, distances, averages, rotations })
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The three organ-slot series of one patient under one method.
    pub fn distances(&self, method: Method, patient: usize) -> Option<&[Series; 3]> {
        self.distances[method.index()].get(patient)
    }

    /// Bone-aligned minus centered distances, slot by slot.
    pub fn differences(&self, patient: usize) -> Option<[Series; 3]> {
        let icp = self.distances(Method::BoneAligned, patient)?;
        let center = self.distances(Method::Centered, patient)?;
        let mut out = [[0.0; TIMESTAMP_COUNT]; 3];
        for slot in 0..3 {
            for t in 0..TIMESTAMP_COUNT {
                out[slot][t] = icp[slot][t] - center[slot][t];
            }
        }
        Some(out)
    }

    /// One averaged value per roster patient.
    pub fn averages(&self, method: Method, slot: OrganSlot) -> &[f64] {
        &self.averages[method.index()][slot.index()]
    }

    pub fn rotations(&self, patient: usize) -> Option<&[Series; 3]> {
        self.rotations.get(patient)
    }

    pub fn rotation(&self, patient: usize, axis: Axis, timestamp: usize) -> Option<f64> {
        self.rotations(patient)?[axis.index()].get(timestamp).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Distances(Method),
    Averages(Method),
    Rotations,
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Distances(method) => write!(f, "{} distances", method.label()),
            Self::Averages(method) => write!(f, "{} averages", method.label()),
            Self::Rotations => f.write_str("rotations"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DatasetError {
    PatientCount { table: Table, expected: usize, found: usize },
    SeriesCount { table: Table, patient: PatientId, expected: usize, found: usize },
    TimestampCount { table: Table, patient: PatientId, series: usize, found: usize },
    NonFinite { table: Table, patient: PatientId, value: f64 },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PatientCount { table, expected, found } => {
                write!(f, "{table}: expected {expected} patients, found {found}")
            }
            Self::SeriesCount { table, patient, expected, found } => {
                write!(f, "{table}: patient {patient} has {found} series, expected {expected}")
            }
            Self::TimestampCount { table, patient, series, found } => write!(
                f,
                "{table}: patient {patient} series {series} has {found} timestamps, expected {TIMESTAMP_COUNT}"
            ),
            Self::NonFinite { table, patient, value } => {
                write!(f, "{table}: patient {patient} has a non-finite value ({value})")
            }
        }
    }
}

impl std::error::Error for DatasetError {}

fn patient_major(
    roster: &Roster,
    table: Table,
    rows: Vec<Vec<Vec<f64>>>,
) -> Result<Vec<[Series; 3]>, DatasetError> {
    if rows.len() != roster.len() {
        return Err(DatasetError::PatientCount {
            table,
            expected: roster.len(),
            found: rows.len(),
        });
    }

    let mut out = Vec::with_capacity(rows.len());
    for (patient, series_list) in roster.patients().iter().zip(rows) {
        if series_list.len() != 3 {
            return Err(DatasetError::SeriesCount {
                table,
                patient: patient.clone(),
                expected: 3,
                found: series_list.len(),
            });
        }
        let mut block = [[0.0; TIMESTAMP_COUNT]; 3];
        for (series, values) in series_list.into_iter().enumerate() {
            if values.len() != TIMESTAMP_COUNT {
                return Err(DatasetError::TimestampCount {
                    table,
                    patient: patient.clone(),
                    series,
                    found: values.len(),
                });
            }
            check_finite(table, patient, &values)?;
            block[series].copy_from_slice(&values);
        }
        out.push(block);
    }
    Ok(out)
}

fn slot_major(
    roster: &Roster,
    method: Method,
    slots: Vec<Vec<f64>>,
) -> Result<[Vec<f64>; 3], DatasetError> {
    let table = Table::Averages(method);
    let found = slots.len();
    let Ok([primary, bladder, rectum]) = <[Vec<f64>; 3]>::try_from(slots) else {
        return Err(DatasetError::SeriesCount {
            table,
            patient: roster.first().clone(),
            expected: 3,
            found,
        });
    };

    for values in [&primary, &bladder, &rectum] {
        if values.len() != roster.len() {
            return Err(DatasetError::PatientCount {
                table,
                expected: roster.len(),
                found: values.len(),
            });
        }
        for (patient, value) in roster.patients().iter().zip(values.iter()) {
            check_finite(table, patient, std::slice::from_ref(value))?;
        }
    }

    Ok([primary, bladder, rectum])
}

fn check_finite(table: Table, patient: &PatientId, values: &[f64]) -> Result<(), DatasetError> {
    match values.iter().find(|value| !value.is_finite()) {
        Some(value) => Err(DatasetError::NonFinite { table, patient: patient.clone(), value: *value }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::{Dataset, DatasetError, DatasetTables, Table};
    use crate::model::{Axis, Method, OrganSlot, PatientId, Roster, TIMESTAMP_COUNT};

    fn roster(n: usize) -> Roster {
        Roster::new((1..=n).map(|i| PatientId::new(format!("P{i}")).expect("id")).collect())
            .expect("roster")
    }

    fn tables(n: usize) -> DatasetTables {
        let block = |base: f64| {
            (0..n)
                .map(|p| {
                    (0..3)
                        .map(|s| {
                            (0..TIMESTAMP_COUNT)
                                .map(|t| base + (p * 100 + s * 10 + t) as f64)
                                .collect()
                        })
                        .collect()
                })
                .collect::<Vec<Vec<Vec<f64>>>>()
        };
        let averages = |base: f64| {
            (0..3).map(|s| (0..n).map(|p| base + (s * 10 + p) as f64).collect()).collect()
        };
        DatasetTables {
            distances: [block(0.0), block(0.5)],
            averages: [averages(1.0), averages(2.0)],
            rotations: block(-3.0),
        }
    }

    #[test]
    fn accepts_fully_populated_tables() {
        let dataset = Dataset::new(roster(2), tables(2)).expect("dataset");
        let icp = dataset.distances(Method::BoneAligned, 1).expect("patient");
        assert_eq!(icp[2][4], 124.0);
        let diff = dataset.differences(1).expect("patient");
        assert_eq!(diff[1][0], -0.5);
        assert_eq!(dataset.averages(Method::Centered, OrganSlot::RECTUM)[1], 23.0);
        assert_eq!(dataset.rotation(0, Axis::Y, 3), Some(10.0));
        assert_eq!(dataset.rotation(0, Axis::Y, TIMESTAMP_COUNT), None);
    }

    #[test]
    fn rejects_patient_count_mismatch() {
        let err = Dataset::new(roster(3), tables(2)).unwrap_err();
        assert_eq!(
            err,
            DatasetError::PatientCount {
                table: Table::Distances(Method::BoneAligned),
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn rejects_short_timestamp_series() {
        let mut tables = tables(2);
        tables.rotations[1][2].pop();
        let err = Dataset::new(roster(2), tables).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::TimestampCount { table: Table::Rotations, series: 2, found: 12, .. }
        ));
    }

    #[test]
    fn rejects_missing_average_slot() {
        let mut tables = tables(2);
        tables.averages[1].pop();
        let err = Dataset::new(roster(2), tables).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::SeriesCount { table: Table::Averages(Method::Centered), found: 2, .. }
        ));
    }

    #[test]
    fn rejects_non_finite_values() {
        let mut tables = tables(1);
        tables.distances[0][0][0][0] = f64::NAN;
        let err = Dataset::new(roster(1), tables).unwrap_err();
        assert!(matches!(err, DatasetError::NonFinite { .. }));
    }
}
