// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! View renderers.
//!
//! Every renderer is a pure function from the dataset, a selection snapshot, the highlight marks
//! and the display controls to a Plotly-compatible [`Figure`]. The scene and slice renderers
//! consume [`GeometryBridge`](crate::geometry::GeometryBridge) output.

pub mod charts;
pub mod figure;
pub mod gizmo;
pub mod heatmap;
pub mod palette;
pub mod scene;
pub mod slices;

pub use charts::{average_distances_figure, differences_figure, organ_distances_figure, rotations_figure};
pub use figure::{Figure, Layout, Trace, TraceKind, Values};
pub use gizmo::rotation_axes_figure;
pub use heatmap::heatmap_figure;
pub use palette::{Palette, PaletteError};
pub use scene::{load_stage_meshes, scene_figure, scene_title, StageMeshes};
pub use slices::{slice_figure, slice_title};
