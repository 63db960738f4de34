// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Dataset folders on disk.
//!
//! The folder is read once at startup; nothing is written back.

pub mod dataset_folder;

pub use dataset_folder::{DatasetFolder, DatasetMeta, StoreError};
