// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Model Context Protocol (MCP) server surface.
//!
//! The MCP layer drives the dashboard: clicks, control edits and direct selections each run one
//! refresh cycle and return the new selection plus the re-rendered figures.

mod server;
mod types;

pub use server::RegdashMcp;
