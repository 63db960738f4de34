// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::dataset::{Dataset, DatasetTables};
use super::ids::PatientId;
use super::roster::{Roster, TIMESTAMP_COUNT};

fn pid(value: &str) -> PatientId {
    PatientId::new(value).expect("patient id")
}

/// Roster `P1..=P7`.
pub(crate) fn seven_patients() -> Roster {
    Roster::new((1..=7).map(|n| pid(&format!("P{n}"))).collect()).expect("roster")
}

/// Distances encode their coordinates: `row * 100 + method * 10 + slot + t / 100`.
pub(crate) fn distance_value(row: usize, method: usize, slot: usize, t: usize) -> f64 {
    (row * 100 + method * 10 + slot) as f64 + t as f64 / 100.0
}

/// A fully populated dataset for [`seven_patients`].
pub(crate) fn seven_patient_dataset() -> Dataset {
    let roster = seven_patients();
    let n = roster.len();

    let distances = [0, 1].map(|method| {
        (0..n)
            .map(|row| {
                (0..3)
                    .map(|slot| {
                        (0..TIMESTAMP_COUNT)
                            .map(|t| distance_value(row, method, slot, t))
                            .collect()
                    })
                    .collect()
            })
            .collect()
    });
    let averages = [0, 1].map(|method| {
        (0..3)
            .map(|slot| (0..n).map(|row| distance_value(row, method, slot, 6)).collect())
            .collect()
    });
    let rotations = (0..n)
        .map(|row| {
            (0..3)
                .map(|axis| (0..TIMESTAMP_COUNT).map(|t| (row + axis) as f64 - t as f64 / 10.0).collect())
                .collect()
        })
        .collect();

    Dataset::new(roster, DatasetTables { distances, averages, rotations }).expect("dataset")
}
