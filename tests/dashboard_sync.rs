// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use regdash::demo::demo_dataset;
use regdash::geometry::ObjGeometry;
use regdash::model::{Dataset, Method, Organ, OrganSlot, PatientId, RawPick, RawPoint, Stage, ViewId};
use regdash::render::Palette;
use regdash::store::DatasetFolder;
use regdash::sync::{ControlChange, Dashboard, SceneMode, Trigger};
use serde_json::{json, Value};

static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = std::env::temp_dir();
        path.push(format!("regdash-{prefix}-{}-{nanos}-{counter}", std::process::id()));
        fs::create_dir_all(&path).expect("create temp dir");
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn pid(value: &str) -> PatientId {
    PatientId::new(value).expect("patient id")
}

/// Writes a demo-shaped dataset for `P1..=P7` into `dir`.
fn write_dataset(dir: &Path, mesh_dir: Option<&str>) -> Dataset {
    let demo = demo_dataset(7).expect("demo");
    let patients: Vec<String> = (1..=7).map(|n| format!("P{n}")).collect();
    let folder = DatasetFolder::new(dir);
    let mut meta = json!({ "patients": patients });
    if let Some(mesh_dir) = mesh_dir {
        meta["mesh_dir"] = json!(mesh_dir);
    }
    fs::write(folder.meta_path(), meta.to_string()).expect("meta");

    for method in Method::ALL {
        let rows: Vec<_> =
            (0..7).map(|row| demo.distances(method, row).expect("row").to_vec()).collect();
        fs::write(folder.distances_path(method), json!(rows).to_string()).expect("distances");
        let mut lines = String::new();
        for row in 0..7 {
            for slot in OrganSlot::ALL {
                lines.push_str(&format!("{}\n", demo.averages(method, slot)[row]));
            }
        }
        fs::write(folder.averages_path(method), lines).expect("averages");
    }
    let rotations: Vec<_> =
        (0..7).map(|row| vec![demo.rotations(row).expect("row").to_vec()]).collect();
    fs::write(folder.rotations_path(), json!(rotations).to_string()).expect("rotations");

    folder.load().expect("reload").0
}

fn cube(origin: [f64; 3], size: f64) -> String {
    let mut text = String::new();
    for corner in 0..8 {
        let x = origin[0] + if corner & 1 == 0 { 0.0 } else { size };
        let y = origin[1] + if corner & 2 == 0 { 0.0 } else { size };
        let z = origin[2] + if corner & 4 == 0 { 0.0 } else { size };
        text.push_str(&format!("v {x} {y} {z}\n"));
    }
    for face in ["1 3 4 2", "5 6 8 7", "1 2 6 5", "2 4 8 6", "4 3 7 8", "3 1 5 7"] {
        text.push_str(&format!("f {face}\n"));
    }
    text
}

fn dashboard(dir: &Path) -> Dashboard {
    let (dataset, meshes) = DatasetFolder::new(dir).load().expect("load");
    Dashboard::new(Arc::new(dataset), Arc::new(ObjGeometry::new()), meshes, Palette::default())
}

fn stroke_width(figure: &Value, trace: usize, point: usize) -> f64 {
    figure["data"][trace]["marker"]["line"]["width"][point].as_f64().expect("width")
}

fn pick(view: ViewId, point: RawPoint) -> Trigger {
    Trigger::Pick { view, event: RawPick::point(point) }
}

#[test]
fn heatmap_cell_highlights_rectum_across_views() {
    let dir = TempDir::new("it-heatmap");
    write_dataset(dir.path(), None);
    let mut dashboard = dashboard(dir.path());

    let refresh = dashboard.handle(pick(ViewId::HeatmapIcp, RawPoint::cell(5 * 4 + 3, "P3", "Rectum")));
    assert_eq!(refresh.selection.patient, pid("P3"));
    assert_eq!(refresh.selection.timestamp, 5);
    assert_eq!(refresh.selection.organ, Organ::Rectum);

    let organs = refresh.figures[&ViewId::OrganDistances].to_json();
    assert_eq!(organs["data"][2]["x"][5], json!(6.0));
    for trace in [2, 6] {
        assert_eq!(stroke_width(&organs, trace, 5), 4.0);
        assert_eq!(stroke_width(&organs, trace, 4), 0.0);
    }
    assert_eq!(stroke_width(&organs, 0, 5), 0.0);

    let averages = refresh.figures[&ViewId::AverageDistances].to_json();
    for trace in [2, 6] {
        assert_eq!(stroke_width(&averages, trace, 2), 3.0);
        assert_eq!(stroke_width(&averages, trace, 1), 0.0);
    }

    let heatmap = refresh.figures[&ViewId::HeatmapCenter].to_json();
    let rect = heatmap["layout"]["shapes"]
        .as_array()
        .expect("shapes")
        .iter()
        .find(|shape| shape["type"] == "rect")
        .cloned()
        .expect("highlight rectangle");
    assert_eq!(rect["x0"], json!(22.5));
}

#[test]
fn average_pick_in_the_centered_panel_means_bones() {
    let dir = TempDir::new("it-average");
    write_dataset(dir.path(), None);
    let mut dashboard = dashboard(dir.path());

    let refresh = dashboard.handle(pick(ViewId::AverageDistances, RawPoint::trace(4, "P2")));
    assert_eq!(refresh.selection.patient, pid("P2"));
    assert_eq!(refresh.selection.organ, Organ::Bones);

    let averages = refresh.figures[&ViewId::AverageDistances].to_json();
    assert_eq!(stroke_width(&averages, 4, 1), 3.0);
    assert_eq!(stroke_width(&averages, 0, 1), 0.0);

    let organs = refresh.figures[&ViewId::OrganDistances].to_json();
    for point in 0..13 {
        assert_eq!(stroke_width(&organs, 4, point), 4.0);
        assert_eq!(stroke_width(&organs, 0, point), 0.0);
    }
}

#[test]
fn controls_change_only_their_views() {
    let dir = TempDir::new("it-controls");
    write_dataset(dir.path(), None);
    let mut dashboard = dashboard(dir.path());
    dashboard.handle(pick(ViewId::RotationsGraph, RawPoint::trace(0, 3)));

    let refresh = dashboard.handle(Trigger::Control(ControlChange::Mode(SceneMode::PlanOrgans)));
    let rendered: Vec<ViewId> = refresh.figures.keys().copied().collect();
    assert!(rendered.contains(&ViewId::MainGraph));
    assert!(!rendered.contains(&ViewId::OrganDistances));
    assert_eq!(refresh.selection.timestamp, 2);
    assert!(dashboard.last_event(ViewId::RotationsGraph).is_some());
}

#[test]
fn scene_registers_the_second_stage_onto_the_plan() {
    let dir = TempDir::new("it-scene");
    write_dataset(dir.path(), Some("meshes"));
    let patient = pid("P1");
    for organ in Organ::ALL {
        for (stage, shift) in [(Stage::Plan, 0.0), (Stage::Timestamp(1), 7.0)] {
            let path = dir
                .path()
                .join("meshes")
                .join(patient.as_str())
                .join(organ.file_stem())
                .join(format!("{}{}.obj", organ.file_stem(), stage.file_suffix()));
            fs::create_dir_all(path.parent().expect("parent")).expect("mesh dir");
            let x = organ.heatmap_column() as f64 * 10.0 + shift;
            fs::write(&path, cube([x, 0.0, 0.0], 4.0)).expect("mesh");
        }
    }

    let mut dashboard = dashboard(dir.path());
    dashboard.handle(Trigger::Control(ControlChange::Method(Method::Centered)));
    let scene = dashboard.render_view(ViewId::MainGraph).to_json();
    let traces = scene["data"].as_array().expect("traces");
    assert_eq!(traces.len(), 6);
    assert_eq!(scene["layout"]["title"]["text"], "Patient P1, plan organs (pink) and timestamp number 1 (purple)");

    // Centring moves the second-stage prostate back onto the plan prostate.
    let plan_x = traces[0]["x"].as_array().expect("x")[0].as_f64().expect("x");
    let moved_x = traces[3]["x"].as_array().expect("x")[0].as_f64().expect("x");
    assert!((plan_x - moved_x).abs() < 1e-9, "{plan_x} vs {moved_x}");
}
