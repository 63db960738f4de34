// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::geometry::{MeshStore, Point3};
use crate::model::{Organ, PatientId, Stage};

static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

pub(crate) struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub(crate) fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = env::temp_dir();
        path.push(format!("regdash-{prefix}-{}-{nanos}-{counter}", std::process::id()));
        fs::create_dir_all(&path).expect("create temp dir");
        Self { path }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// OBJ text of an axis-aligned cube with its minimum corner at `origin`.
pub(crate) fn cube_obj(origin: Point3, size: f64) -> String {
    let mut text = String::from("# cube\n");
    for corner in 0..8 {
        let x = origin[0] + if corner & 1 == 0 { 0.0 } else { size };
        let y = origin[1] + if corner & 2 == 0 { 0.0 } else { size };
        let z = origin[2] + if corner & 4 == 0 { 0.0 } else { size };
        text.push_str(&format!("v {x} {y} {z}\n"));
    }
    // Quads: bottom, top, and the four sides.
    for face in ["1 3 4 2", "5 6 8 7", "1 2 6 5", "2 4 8 6", "4 3 7 8", "3 1 5 7"] {
        text.push_str(&format!("f {face}\n"));
    }
    text
}

/// Writes one cube per (organ, stage) under `store`, placed by `origin_of`.
pub(crate) fn write_cube_meshes(
    store: &MeshStore,
    patient: &PatientId,
    organs: &[Organ],
    stages: &[Stage],
    origin_of: impl Fn(Organ, Stage) -> Point3,
) {
    for organ in organs {
        for stage in stages {
            let path = store.path(patient, *organ, *stage);
            fs::create_dir_all(path.parent().expect("mesh dir")).expect("create mesh dir");
            fs::write(&path, cube_obj(origin_of(*organ, *stage), 4.0)).expect("write mesh");
        }
    }
}
