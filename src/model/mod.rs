// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! The roster and dataset are loaded once; the selection and interaction payloads change on
//! every refresh cycle.

pub mod dataset;
pub mod event;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod organ;
pub mod roster;
pub mod selection;
pub mod view;

pub use dataset::{Dataset, DatasetError, DatasetTables, Series, Table};
pub use event::{Payload, PickX, RawPick, RawPickError, RawPoint, ViewEvent};
pub(crate) use event::value_as_index;
pub use ids::{IdError, PatientId};
pub use organ::{Axis, Method, Organ, OrganSlot, UnknownOrgan};
pub use roster::{timestamp_labels, Roster, RosterError, Stage, TIMESTAMP_COUNT};
pub use selection::{Selection, SelectionPatch, SelectionState};
pub use view::{SeriesLayout, UnknownView, ViewId, ViewKind};
