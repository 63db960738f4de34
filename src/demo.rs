// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Deterministic synthetic dataset for `--demo` and the benchmarks.
//!
//! Distances drift up and away from the plan over the timestamps; the centered method tracks
//! the prostate closely and the bones loosely, the bone-aligned method the other way round.

use std::fmt;

use crate::model::{
    Dataset, DatasetError, DatasetTables, Method, PatientId, Roster, RosterError, TIMESTAMP_COUNT,
};

pub const DEMO_PATIENTS: usize = 12;

/// Roster ids `P01..=P12`.
pub fn demo_roster(patients: usize) -> Result<Roster, RosterError> {
    let ids = (1..=patients)
        .filter_map(|n| PatientId::new(format!("P{n:02}")).ok())
        .collect();
    Roster::new(ids)
}

/// Bounded, non-negative wobble in `[0, 1]` without a random source.
fn wobble(seed: usize) -> f64 {
    let x = (seed as f64 * 12.9898).sin() * 43_758.545_3;
    x - x.floor()
}

fn distance(method: Method, row: usize, slot: usize, t: usize) -> f64 {
    let base = match (method, slot) {
        (Method::BoneAligned, 0) => 1.5,
        (Method::Centered, 0) => 4.0,
        (_, 1) => 6.0,
        _ => 5.0,
    };
    let drift = t as f64 * (0.25 + 0.05 * slot as f64);
    base + drift + 3.0 * wobble(row * 1_000 + method.index() * 100 + slot * 20 + t)
}

pub fn demo_tables(patients: usize) -> DatasetTables {
    let distances = Method::ALL.map(|method| {
        (0..patients)
            .map(|row| {
                (0..3)
                    .map(|slot| (0..TIMESTAMP_COUNT).map(|t| distance(method, row, slot, t)).collect())
                    .collect()
            })
            .collect()
    });
    let averages = Method::ALL.map(|method| {
        (0..3)
            .map(|slot| {
                (0..patients)
                    .map(|row| {
                        let total: f64 =
                            (0..TIMESTAMP_COUNT).map(|t| distance(method, row, slot, t)).sum();
                        total / TIMESTAMP_COUNT as f64
                    })
                    .collect()
            })
            .collect()
    });
    let rotations = (0..patients)
        .map(|row| {
            (0..3)
                .map(|axis| {
                    (0..TIMESTAMP_COUNT)
                        .map(|t| 4.0 * wobble(row * 977 + axis * 31 + t) - 2.0)
                        .collect()
                })
                .collect()
        })
        .collect();
    DatasetTables { distances, averages, rotations }
}

#[derive(Debug)]
pub enum DemoError {
    Roster(RosterError),
    Dataset(DatasetError),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Roster(err) => write!(f, "demo roster: {err}"),
            Self::Dataset(err) => write!(f, "demo dataset: {err}"),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Roster(err) => Some(err),
            Self::Dataset(err) => Some(err),
        }
    }
}

pub fn demo_dataset(patients: usize) -> Result<Dataset, DemoError> {
    let roster = demo_roster(patients).map_err(DemoError::Roster)?;
    Dataset::new(roster, demo_tables(patients)).map_err(DemoError::Dataset)
}
