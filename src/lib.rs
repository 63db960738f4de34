// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Regdash: cross-view selection sync and figure rendering for a dashboard comparing two
//! registration methods (bone-anchored ICP and prostate centring) of organ positions over
//! radiotherapy timestamps.
//!
//! A click on any peer chart is resolved into one event, which updates the shared
//! (patient, timestamp, organ) selection and highlights the same data point in every view. The
//! views are rendered as Plotly figure JSON and served over MCP.

pub mod demo;
pub mod geometry;
pub mod mcp;
pub mod model;
pub mod render;
pub mod store;
pub mod sync;

#[cfg(test)]
mod test_utils;
