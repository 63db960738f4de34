// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Anatomical vocabulary shared by every view: organs, organ slots, registration methods and
//! rotation axes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A tracked anatomical structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Organ {
    Prostate,
    Bladder,
    Rectum,
    Bones,
}

impl Organ {
    pub const ALL: [Organ; 4] = [Organ::Prostate, Organ::Bladder, Organ::Rectum, Organ::Bones];

    /// Label as it appears in legends and in heatmap cell texts.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Prostate => "Prostate",
            Self::Bladder => "Bladder",
            Self::Rectum => "Rectum",
            Self::Bones => "Bones",
        }
    }

    /// Exact-match lookup of a legend/cell label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|organ| organ.label() == label)
    }

    /// Lowercase name used for mesh directories and file stems.
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::Prostate => "prostate",
            Self::Bladder => "bladder",
            Self::Rectum => "rectum",
            Self::Bones => "bones",
        }
    }

    /// Column offset of this organ inside one timestamp block of a heatmap row.
    pub const fn heatmap_column(self) -> usize {
        match self {
            Self::Bones => 0,
            Self::Prostate => 1,
            Self::Bladder => 2,
            Self::Rectum => 3,
        }
    }

    pub fn from_heatmap_column(column: usize) -> Option<Self> {
        match column {
            0 => Some(Self::Bones),
            1 => Some(Self::Prostate),
            2 => Some(Self::Bladder),
            3 => Some(Self::Rectum),
            _ => None,
        }
    }
}

impl fmt::Display for Organ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Organ {
    type Err = UnknownOrgan;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|organ| organ.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownOrgan(s.to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOrgan(pub String);

impl fmt::Display for UnknownOrgan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown organ '{}'", self.0)
    }
}

impl std::error::Error for UnknownOrgan {}

/// Normalized 0–2 index of the structure a series represents, independent of method.
///
/// Slot 0 is the method's primary organ, slots 1 and 2 are Bladder and Rectum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrganSlot(u8);

impl OrganSlot {
    pub const PRIMARY: Self = Self(0);
    pub const BLADDER: Self = Self(1);
    pub const RECTUM: Self = Self(2);
    pub const ALL: [Self; 3] = [Self::PRIMARY, Self::BLADDER, Self::RECTUM];
    pub const COUNT: usize = 3;

    pub fn new(index: usize) -> Option<Self> {
        (index < Self::COUNT).then_some(Self(index as u8))
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// The two compared registration methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Rigid ICP alignment of the bones onto the plan bones.
    BoneAligned,
    /// Translation of the prostate centroid onto the plan prostate centroid.
    Centered,
}

impl Method {
    pub const ALL: [Method; 2] = [Method::BoneAligned, Method::Centered];

    pub const fn index(self) -> usize {
        match self {
            Self::BoneAligned => 0,
            Self::Centered => 1,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::BoneAligned => "ICP",
            Self::Centered => "Prostate centring",
        }
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "icp" | "bone_aligned" | "bones" => Ok(Self::BoneAligned),
            "center" | "centered" | "centering" | "centring" | "prostate centring" => {
                Ok(Self::Centered)
            }
            other => Err(format!("unknown registration method '{other}'")),
        }
    }
}

/// Rotation axis of the bone alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn new(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
        }
    }
}
