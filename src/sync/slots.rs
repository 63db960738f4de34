// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Series-index normalization and the (method, slot) → organ table.

use crate::model::{Method, Organ, OrganSlot, SeriesLayout};

/// Raw series index of the invisible legend spacer in [`SeriesLayout::Spaced`] views.
pub const SPACER_SERIES: usize = 3;

/// Organ shown by each slot, per method (rows in [`Method::ALL`] order).
const SLOT_ORGANS: [[Organ; OrganSlot::COUNT]; 2] = [
    [Organ::Prostate, Organ::Bladder, Organ::Rectum],
    [Organ::Bones, Organ::Bladder, Organ::Rectum],
];

/// Organs compared by the difference view, in series order.
pub const DIFFERENCE_ORGANS: [Organ; 2] = [Organ::Bladder, Organ::Rectum];

/// The organ a slot stands for under `method`.
pub const fn organ_for(method: Method, slot: OrganSlot) -> Organ {
    SLOT_ORGANS[method.index()][slot.index()]
}

/// The slot showing `organ` under `method`, if that method tracks it.
pub fn slot_for(method: Method, organ: Organ) -> Option<OrganSlot> {
    OrganSlot::ALL.into_iter().find(|slot| organ_for(method, *slot) == organ)
}

/// Maps a raw series index to its organ slot.
///
/// Spaced views: `k < 3` → `k`, the spacer (`k == 3`) → none, `k ≥ 4` → `(k − 1) mod 3`.
/// Plain views: `k mod 3`.
pub fn normalize_series(series: usize, layout: SeriesLayout) -> Option<OrganSlot> {
    let index = match layout {
        SeriesLayout::Spaced if series == SPACER_SERIES => return None,
        SeriesLayout::Spaced if series > SPACER_SERIES => (series - 1) % OrganSlot::COUNT,
        SeriesLayout::Spaced => series,
        SeriesLayout::Plain => series % OrganSlot::COUNT,
    };
    OrganSlot::new(index)
}

/// The method sub-panel a raw series index belongs to in a spaced view.
pub fn panel_of(series: usize) -> Option<Method> {
    match series {
        0..=2 => Some(Method::BoneAligned),
        SPACER_SERIES => None,
        4..=6 => Some(Method::Centered),
        _ => None,
    }
}

/// The organ picked by clicking raw series `series` of a spaced two-panel view.
pub fn picked_organ(series: usize) -> Option<Organ> {
    let panel = panel_of(series)?;
    let slot = normalize_series(series, SeriesLayout::Spaced)?;
    Some(organ_for(panel, slot))
}

/// The organ picked by clicking raw series `series` of the difference view.
pub fn difference_organ(series: usize) -> Option<Organ> {
    DIFFERENCE_ORGANS.get(series).copied()
}

/// Series index of `organ` in the difference view.
pub fn difference_series(organ: Organ) -> Option<usize> {
    DIFFERENCE_ORGANS.iter().position(|candidate| *candidate == organ)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{
        difference_organ, difference_series, normalize_series, organ_for, picked_organ, slot_for,
    };
    use crate::model::{Method, Organ, OrganSlot, SeriesLayout};

    #[rstest]
    #[case(0, Some(0))]
    #[case(1, Some(1))]
    #[case(2, Some(2))]
    #[case(3, None)]
    #[case(4, Some(0))]
    #[case(5, Some(1))]
    #[case(6, Some(2))]
    fn spaced_layout_skips_the_spacer(#[case] series: usize, #[case] slot: Option<usize>) {
        assert_eq!(
            normalize_series(series, SeriesLayout::Spaced),
            slot.and_then(OrganSlot::new)
        );
    }

    #[rstest]
    #[case(0, 0)]
    #[case(2, 2)]
    #[case(3, 0)]
    #[case(4, 1)]
    fn plain_layout_wraps_modulo_three(#[case] series: usize, #[case] slot: usize) {
        assert_eq!(normalize_series(series, SeriesLayout::Plain), OrganSlot::new(slot));
    }

    #[test]
    fn primary_slot_is_aliased_per_method() {
        assert_eq!(organ_for(Method::BoneAligned, OrganSlot::PRIMARY), Organ::Prostate);
        assert_eq!(organ_for(Method::Centered, OrganSlot::PRIMARY), Organ::Bones);
        assert_eq!(slot_for(Method::BoneAligned, Organ::Bones), None);
        assert_eq!(slot_for(Method::Centered, Organ::Prostate), None);
        for method in Method::ALL {
            assert_eq!(slot_for(method, Organ::Bladder), Some(OrganSlot::BLADDER));
            assert_eq!(slot_for(method, Organ::Rectum), Some(OrganSlot::RECTUM));
        }
    }

    #[test]
    fn picked_organ_follows_the_panel_of_the_raw_index() {
        assert_eq!(picked_organ(0), Some(Organ::Prostate));
        assert_eq!(picked_organ(4), Some(Organ::Bones));
        assert_eq!(picked_organ(5), Some(Organ::Bladder));
        assert_eq!(picked_organ(3), None);
        assert_eq!(picked_organ(7), None);
    }

    #[test]
    fn difference_series_cover_shared_organs_only() {
        assert_eq!(difference_organ(0), Some(Organ::Bladder));
        assert_eq!(difference_organ(1), Some(Organ::Rectum));
        assert_eq!(difference_organ(2), None);
        assert_eq!(difference_series(Organ::Prostate), None);
        assert_eq!(difference_series(Organ::Rectum), Some(1));
    }
}
