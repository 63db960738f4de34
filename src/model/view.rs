// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The closed set of dashboard views.

use std::fmt;
use std::str::FromStr;

use super::organ::{Axis, Method};

/// Identifier of one dashboard view (the host-side component id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViewId {
    OrganDistances,
    AlignmentDifferences,
    AverageDistances,
    HeatmapIcp,
    HeatmapCenter,
    RotationsGraph,
    MainGraph,
    RotationsAxes,
    Slice(Axis),
}

/// The kind of a view, which decides its click payload shape and highlight derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    OrganDistance,
    Difference,
    Average,
    Heatmap(Method),
    Rotation,
    Scene,
    RotationGizmo,
    Slice(Axis),
}

/// How raw series indices of a view map to organ slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesLayout {
    /// Bone-aligned series 0..=2, an invisible legend spacer at 3, centered series 4..=6.
    Spaced,
    /// Series index modulo the slot count.
    Plain,
}

impl ViewId {
    /// Views that can originate a selection change, in the order the resolver scans them.
    pub const PEERS: [ViewId; 6] = [
        ViewId::OrganDistances,
        ViewId::AlignmentDifferences,
        ViewId::AverageDistances,
        ViewId::HeatmapIcp,
        ViewId::HeatmapCenter,
        ViewId::RotationsGraph,
    ];

    pub const ALL: [ViewId; 11] = [
        ViewId::OrganDistances,
        ViewId::AlignmentDifferences,
        ViewId::AverageDistances,
        ViewId::HeatmapIcp,
        ViewId::HeatmapCenter,
        ViewId::RotationsGraph,
        ViewId::MainGraph,
        ViewId::RotationsAxes,
        ViewId::Slice(Axis::X),
        ViewId::Slice(Axis::Y),
        ViewId::Slice(Axis::Z),
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OrganDistances => "organ-distances",
            Self::AlignmentDifferences => "alignment-differences",
            Self::AverageDistances => "average-distances",
            Self::HeatmapIcp => "heatmap-icp",
            Self::HeatmapCenter => "heatmap-center",
            Self::RotationsGraph => "rotations-graph",
            Self::MainGraph => "main-graph",
            Self::RotationsAxes => "rotations-axes",
            Self::Slice(Axis::X) => "x-slice-graph",
            Self::Slice(Axis::Y) => "y-slice-graph",
            Self::Slice(Axis::Z) => "z-slice-graph",
        }
    }

    pub const fn kind(self) -> ViewKind {
        match self {
            Self::OrganDistances => ViewKind::OrganDistance,
            Self::AlignmentDifferences => ViewKind::Difference,
            Self::AverageDistances => ViewKind::Average,
            Self::HeatmapIcp => ViewKind::Heatmap(Method::BoneAligned),
            Self::HeatmapCenter => ViewKind::Heatmap(Method::Centered),
            Self::RotationsGraph => ViewKind::Rotation,
            Self::MainGraph => ViewKind::Scene,
            Self::RotationsAxes => ViewKind::RotationGizmo,
            Self::Slice(axis) => ViewKind::Slice(axis),
        }
    }

    pub fn is_peer(self) -> bool {
        Self::PEERS.contains(&self)
    }

    pub const fn series_layout(self) -> SeriesLayout {
        match self {
            Self::OrganDistances | Self::AverageDistances => SeriesLayout::Spaced,
            _ => SeriesLayout::Plain,
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewId {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|view| view.as_str() == s)
            .ok_or_else(|| UnknownView(s.to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownView(pub String);

impl fmt::Display for UnknownView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown view id '{}'", self.0)
    }
}

impl std::error::Error for UnknownView {}

#[cfg(test)]
mod tests {
    use super::{SeriesLayout, ViewId};

    #[test]
    fn view_ids_round_trip_through_host_names() {
        for view in ViewId::ALL {
            assert_eq!(view.as_str().parse::<ViewId>(), Ok(view));
        }
        assert!("heatmap".parse::<ViewId>().is_err());
        assert!("organ".parse::<ViewId>().is_err());
    }

    #[test]
    fn only_chart_views_are_peers() {
        assert!(ViewId::RotationsGraph.is_peer());
        assert!(!ViewId::MainGraph.is_peer());
        assert!(!ViewId::RotationsAxes.is_peer());
    }

    #[test]
    fn two_panel_views_use_the_spacer_layout() {
        assert_eq!(ViewId::OrganDistances.series_layout(), SeriesLayout::Spaced);
        assert_eq!(ViewId::AverageDistances.series_layout(), SeriesLayout::Spaced);
        assert_eq!(ViewId::AlignmentDifferences.series_layout(), SeriesLayout::Plain);
        assert_eq!(ViewId::RotationsGraph.series_layout(), SeriesLayout::Plain);
    }
}
