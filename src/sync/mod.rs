// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Cross-view selection sync: event resolution, the selection update, highlight derivation,
//! control synchronization and the refresh cycle that ties them together.

pub mod controls;
pub mod cycle;
pub mod highlight;
pub mod resolve;
pub mod slots;

pub use controls::{AxisScale, ControlChange, DisplayControls, SceneMode};
pub use cycle::{Dashboard, PickLog, Refresh, Trigger};
pub use highlight::{HeatmapHighlight, HighlightContext, HighlightSpec, Mark};
pub use resolve::{normalize_pick, resolve_event, selection_patch};
