// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::geometry::MeshStore;
use crate::model::{
    Dataset, DatasetError, DatasetTables, IdError, Method, PatientId, Roster, RosterError,
};

pub const META_FILE: &str = "regdash.meta.json";
pub const ROTATIONS_FILE: &str = "rotation_icp.txt";

/// Rows per patient in an averages file, one per organ slot.
const AVERAGE_ROWS_PER_PATIENT: usize = 3;

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    ParseFloat {
        path: PathBuf,
        line: usize,
        value: String,
    },
    AverageRows {
        path: PathBuf,
        found: usize,
    },
    RotationShape {
        path: PathBuf,
        patient: usize,
    },
    InvalidId {
        value: String,
        source: IdError,
    },
    Roster(RosterError),
    Dataset(DatasetError),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
            Self::ParseFloat { path, line, value } => {
                write!(f, "invalid number {value:?} at {path:?} line {line}")
            }
            Self::AverageRows { path, found } => write!(
                f,
                "averages at {path:?} have {found} values, expected a multiple of {AVERAGE_ROWS_PER_PATIENT}"
            ),
            Self::RotationShape { path, patient } => {
                write!(f, "rotations at {path:?}: patient #{patient} has no alignment block")
            }
            Self::InvalidId { value, source } => write!(f, "invalid patient id {value:?}: {source}"),
            Self::Roster(err) => write!(f, "invalid roster: {err}"),
            Self::Dataset(err) => write!(f, "invalid dataset: {err}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidId { source, .. } => Some(source),
            Self::Roster(err) => Some(err),
            Self::Dataset(err) => Some(err),
            Self::ParseFloat { .. } | Self::AverageRows { .. } | Self::RotationShape { .. } => None,
        }
    }
}

impl From<DatasetError> for StoreError {
    fn from(err: DatasetError) -> Self {
        Self::Dataset(err)
    }
}

impl From<RosterError> for StoreError {
    fn from(err: RosterError) -> Self {
        Self::Roster(err)
    }
}

/// Roster ids may be stored as numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum PatientLabel {
    Text(String),
    Number(u64),
}

impl PatientLabel {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct DatasetMetaJson {
    patients: Vec<PatientLabel>,
    #[serde(default)]
    mesh_dir: Option<PathBuf>,
}

/// Parsed `regdash.meta.json`.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetMeta {
    pub roster: Roster,
    /// Absolute, or resolved against the dataset folder.
    pub mesh_dir: Option<PathBuf>,
}

/// A dataset folder on disk: the roster meta file plus the distance, average and rotation
/// tables of both registration methods.
#[derive(Debug, Clone)]
pub struct DatasetFolder {
    root: PathBuf,
}

impl DatasetFolder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn meta_path(&self) -> PathBuf {
        self.root.join(META_FILE)
    }

    pub fn distances_path(&self, method: Method) -> PathBuf {
        self.root.join(format!("{}_distances_c.txt", file_prefix(method)))
    }

    pub fn averages_path(&self, method: Method) -> PathBuf {
        self.root.join(format!("{}_averages_c.txt", file_prefix(method)))
    }

    pub fn rotations_path(&self) -> PathBuf {
        self.root.join(ROTATIONS_FILE)
    }

    pub fn load_meta(&self) -> Result<DatasetMeta, StoreError> {
        let path = self.meta_path();
        let meta: DatasetMetaJson = read_json(&path)?;
        let patients = meta
            .patients
            .into_iter()
            .map(|label| {
                let value = label.into_text();
                PatientId::new(&value).map_err(|source| StoreError::InvalidId { value, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let roster = Roster::new(patients)?;
        let mesh_dir = meta.mesh_dir.map(|dir| if dir.is_absolute() { dir } else { self.root.join(dir) });
        Ok(DatasetMeta { roster, mesh_dir })
    }

    /// Loads and validates every table. Any cardinality mismatch fails the whole load.
    pub fn load(&self) -> Result<(Dataset, Option<MeshStore>), StoreError> {
        let meta = self.load_meta()?;
        let tables = DatasetTables {
            distances: [
                read_json(&self.distances_path(Method::BoneAligned))?,
                read_json(&self.distances_path(Method::Centered))?,
            ],
            averages: [
                read_averages(&self.averages_path(Method::BoneAligned))?,
                read_averages(&self.averages_path(Method::Centered))?,
            ],
            rotations: read_rotations(&self.rotations_path())?,
        };
        let dataset = Dataset::new(meta.roster, tables)?;
        info!(
            root = %self.root.display(),
            patients = dataset.roster().len(),
            meshes = meta.mesh_dir.is_some(),
            "dataset loaded"
        );
        Ok((dataset, meta.mesh_dir.map(MeshStore::new)))
    }
}

fn file_prefix(method: Method) -> &'static str {
    match method {
        Method::BoneAligned => "icp",
        Method::Centered => "center",
    }
}

fn read_text(path: &Path) -> Result<String, StoreError> {
    fs::read_to_string(path).map_err(|source| StoreError::Io { path: path.to_path_buf(), source })
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, StoreError> {
    let text = read_text(path)?;
    debug!(path = %path.display(), bytes = text.len(), "read table");
    serde_json::from_str(&text).map_err(|source| StoreError::Json { path: path.to_path_buf(), source })
}

/// One value per line, slots interleaved per patient; returns `[slot][patient]`.
fn read_averages(path: &Path) -> Result<Vec<Vec<f64>>, StoreError> {
    let text = read_text(path)?;
    let mut slots = vec![Vec::new(); AVERAGE_ROWS_PER_PATIENT];
    let mut count = 0;
    for (index, line) in text.lines().enumerate() {
        let value = line.trim();
        if value.is_empty() {
            continue;
        }
        let parsed = value.parse::<f64>().map_err(|_| StoreError::ParseFloat {
            path: path.to_path_buf(),
            line: index + 1,
            value: value.to_owned(),
        })?;
        slots[count % AVERAGE_ROWS_PER_PATIENT].push(parsed);
        count += 1;
    }
    if count % AVERAGE_ROWS_PER_PATIENT != 0 {
        return Err(StoreError::AverageRows { path: path.to_path_buf(), found: count });
    }
    Ok(slots)
}

/// `[patient][alignment][axis][timestamp]`; only the first alignment block is used.
fn read_rotations(path: &Path) -> Result<Vec<Vec<Vec<f64>>>, StoreError> {
    let blocks: Vec<Vec<Vec<Vec<f64>>>> = read_json(path)?;
    blocks
        .into_iter()
        .enumerate()
        .map(|(patient, block)| {
            block
                .into_iter()
                .next()
                .ok_or(StoreError::RotationShape { path: path.to_path_buf(), patient })
        })
        .collect()
}
