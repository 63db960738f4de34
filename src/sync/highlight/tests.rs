// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};

use super::{
    average_highlights, difference_highlights, heatmap_highlights, organ_distance_highlights,
    rotation_highlights, scene_organs, CellSpan, HighlightContext, ORGAN_HIGHLIGHT_WIDTH,
};
use crate::model::{
    Axis, Method, Organ, Payload, PatientId, PickX, Roster, Selection, ViewEvent, ViewId,
    TIMESTAMP_COUNT,
};
use crate::render::palette::Palette;

fn pid(value: &str) -> PatientId {
    PatientId::new(value).expect("patient id")
}

#[fixture]
fn roster() -> Roster {
    Roster::new((1..=7).map(|n| pid(&format!("P{n}"))).collect()).expect("roster")
}

#[fixture]
fn palette() -> Palette {
    Palette::default()
}

fn selection(patient: &str, timestamp: usize, organ: Organ) -> Selection {
    Selection { patient: pid(patient), timestamp, organ }
}

fn cell(patient: &str, timestamp: usize, organ: &str) -> ViewEvent {
    ViewEvent::new(
        ViewId::HeatmapIcp,
        Payload::CellPick { patient: pid(patient), timestamp, organ_label: organ.into() },
    )
}

fn trace(view: ViewId, series: usize, timestamp: usize) -> ViewEvent {
    ViewEvent::new(view, Payload::TracePick { series, x: PickX::Timestamp(timestamp) })
}

fn average(series: usize, patient: &str) -> ViewEvent {
    ViewEvent::new(
        ViewId::AverageDistances,
        Payload::TracePick { series, x: PickX::Patient(pid(patient)) },
    )
}

fn broadcast(timestamp: usize, axis: Option<Axis>) -> ViewEvent {
    ViewEvent::new(ViewId::RotationsGraph, Payload::Broadcast { timestamp, axis })
}

#[rstest]
fn no_event_yields_the_baseline(roster: Roster, palette: Palette) {
    let selected = selection("P1", 0, Organ::Prostate);
    let ctx = HighlightContext { selection: &selected, roster: &roster, palette: &palette };

    let spec = organ_distance_highlights(None, &ctx, Method::Centered);
    assert!(spec.is_baseline());
    assert_eq!(spec.series_count(), 3);
    assert_eq!(spec.colors(0), vec![palette.blue2.clone(); TIMESTAMP_COUNT]);
    assert_eq!(spec.widths(1), vec![0; TIMESTAMP_COUNT]);
    assert!(average_highlights(None, &ctx, Method::BoneAligned).is_baseline());
    assert!(heatmap_highlights(None, &ctx).is_empty());
}

#[rstest]
fn heatmap_cell_scenario(roster: Roster, palette: Palette) {
    let event = cell("P3", 5, "Rectum");
    let selected = selection("P3", 5, Organ::Rectum);
    let ctx = HighlightContext { selection: &selected, roster: &roster, palette: &palette };

    for method in Method::ALL {
        let spec = organ_distance_highlights(Some(&event), &ctx, method);
        assert_eq!(spec.highlighted(), vec![(2, 5)]);
        assert_eq!(spec.marks(2)[5].width, ORGAN_HIGHLIGHT_WIDTH);
        assert_eq!(spec.marks(2)[5].color, palette.highlight);

        let spec = average_highlights(Some(&event), &ctx, method);
        assert_eq!(spec.highlighted(), vec![(2, 2)]);
    }

    assert_eq!(difference_highlights(Some(&event), &ctx).highlighted(), vec![(1, 5)]);
    assert_eq!(
        rotation_highlights(Some(&event), &ctx).highlighted(),
        vec![(0, 5), (1, 5), (2, 5)]
    );
    let heatmap = heatmap_highlights(Some(&event), &ctx);
    assert_eq!(
        heatmap.spans.as_slice(),
        &[CellSpan { row: 2, first_column: 23, last_column: 23 }]
    );
}

#[rstest]
#[case("Prostate", Method::BoneAligned)]
#[case("Bones", Method::Centered)]
fn primary_slot_is_highlighted_in_its_own_variant_only(
    roster: Roster,
    palette: Palette,
    #[case] organ: &str,
    #[case] variant: Method,
) {
    let event = cell("P1", 0, organ);
    let selected = selection("P1", 0, Organ::Prostate);
    let ctx = HighlightContext { selection: &selected, roster: &roster, palette: &palette };

    for method in Method::ALL {
        let spec = organ_distance_highlights(Some(&event), &ctx, method);
        if method == variant {
            assert_eq!(spec.highlighted(), vec![(0, 0)]);
        } else {
            assert!(spec.is_baseline());
        }
    }
    assert!(difference_highlights(Some(&event), &ctx).is_baseline());
}

#[rstest]
fn average_pick_in_the_centered_panel_aliases_slot_zero_to_bones(
    roster: Roster,
    palette: Palette,
) {
    let event = average(4, "P2");
    let selected = selection("P2", 0, Organ::Bones);
    let ctx = HighlightContext { selection: &selected, roster: &roster, palette: &palette };

    assert!(average_highlights(Some(&event), &ctx, Method::BoneAligned).is_baseline());
    assert_eq!(
        average_highlights(Some(&event), &ctx, Method::Centered).highlighted(),
        vec![(0, 1)]
    );
    // Whole row in the timestamp views.
    let spec = organ_distance_highlights(Some(&event), &ctx, Method::Centered);
    assert_eq!(spec.highlighted(), (0..TIMESTAMP_COUNT).map(|t| (0, t)).collect::<Vec<_>>());
    assert!(rotation_highlights(Some(&event), &ctx).is_baseline());
    let heatmap = heatmap_highlights(Some(&event), &ctx);
    assert_eq!(heatmap.spans.len(), TIMESTAMP_COUNT);
    assert!(heatmap.contains(1, 0));
    assert!(heatmap.contains(1, 12 * 4));
    assert!(!heatmap.contains(1, 1));
}

#[rstest]
fn broadcast_marks_every_slot_at_the_timestamp_only(roster: Roster, palette: Palette) {
    let event = broadcast(7, Some(Axis::Y));
    let selected = selection("P4", 7, Organ::Bladder);
    let ctx = HighlightContext { selection: &selected, roster: &roster, palette: &palette };

    for method in Method::ALL {
        assert_eq!(
            organ_distance_highlights(Some(&event), &ctx, method).highlighted(),
            vec![(0, 7), (1, 7), (2, 7)]
        );
        assert_eq!(
            average_highlights(Some(&event), &ctx, method).highlighted(),
            vec![(0, 3), (1, 3), (2, 3)]
        );
    }
    assert_eq!(difference_highlights(Some(&event), &ctx).highlighted(), vec![(0, 7), (1, 7)]);
    assert_eq!(rotation_highlights(Some(&event), &ctx).highlighted(), vec![(1, 7)]);
    assert_eq!(
        heatmap_highlights(Some(&event), &ctx).spans.as_slice(),
        &[CellSpan { row: 3, first_column: 28, last_column: 31 }]
    );
}

#[rstest]
fn organ_distance_pick_respects_the_panel_of_slot_zero(roster: Roster, palette: Palette) {
    let selected = selection("P1", 2, Organ::Prostate);
    let ctx = HighlightContext { selection: &selected, roster: &roster, palette: &palette };

    let event = trace(ViewId::OrganDistances, 0, 2);
    assert_eq!(
        organ_distance_highlights(Some(&event), &ctx, Method::BoneAligned).highlighted(),
        vec![(0, 2)]
    );
    assert!(organ_distance_highlights(Some(&event), &ctx, Method::Centered).is_baseline());
    assert!(difference_highlights(Some(&event), &ctx).is_baseline());
    assert!(heatmap_highlights(Some(&event), &ctx).contains(0, 2 * 4 + 1));

    let event = trace(ViewId::OrganDistances, 5, 2);
    for method in Method::ALL {
        assert_eq!(
            organ_distance_highlights(Some(&event), &ctx, method).highlighted(),
            vec![(1, 2)]
        );
    }
    assert_eq!(difference_highlights(Some(&event), &ctx).highlighted(), vec![(0, 2)]);
}

#[rstest]
fn spacer_and_out_of_roster_events_fall_back_to_baseline(roster: Roster, palette: Palette) {
    let selected = selection("P1", 0, Organ::Prostate);
    let ctx = HighlightContext { selection: &selected, roster: &roster, palette: &palette };

    let events = [
        trace(ViewId::OrganDistances, 3, 4),
        trace(ViewId::AlignmentDifferences, 2, 4),
        average(1, "P9"),
        cell("P3", TIMESTAMP_COUNT, "Bladder"),
        cell("P3", 2, "Liver"),
    ];
    for event in &events {
        for method in Method::ALL {
            assert!(organ_distance_highlights(Some(event), &ctx, method).is_baseline());
            assert!(average_highlights(Some(event), &ctx, method).is_baseline());
        }
        assert!(difference_highlights(Some(event), &ctx).is_baseline());
        assert!(rotation_highlights(Some(event), &ctx).is_baseline());
        assert!(heatmap_highlights(Some(event), &ctx).is_empty());
    }
}

#[rstest]
fn derivations_are_idempotent(roster: Roster, palette: Palette) {
    let event = cell("P6", 11, "Bladder");
    let selected = selection("P6", 11, Organ::Bladder);
    let ctx = HighlightContext { selection: &selected, roster: &roster, palette: &palette };

    for method in Method::ALL {
        assert_eq!(
            organ_distance_highlights(Some(&event), &ctx, method),
            organ_distance_highlights(Some(&event), &ctx, method)
        );
        assert_eq!(
            average_highlights(Some(&event), &ctx, method),
            average_highlights(Some(&event), &ctx, method)
        );
    }
    assert_eq!(heatmap_highlights(Some(&event), &ctx), heatmap_highlights(Some(&event), &ctx));
}

#[test]
fn scene_filter_collapses_only_on_organ_picks() {
    let selected = selection("P1", 4, Organ::Bladder);
    assert_eq!(
        scene_organs(Some(&trace(ViewId::AlignmentDifferences, 0, 4)), &selected),
        Some(vec![Organ::Bladder])
    );
    assert_eq!(scene_organs(Some(&broadcast(4, None)), &selected), None);
    assert_eq!(scene_organs(Some(&trace(ViewId::OrganDistances, 3, 4)), &selected), None);
    assert_eq!(scene_organs(None, &selected), None);
}

#[rstest]
fn baseline_colors_matching_the_highlight_stay_unmarked(roster: Roster) {
    let white = smol_str::SmolStr::new_static("white");
    let palette = Palette {
        blue3: white.clone(),
        blue4: white.clone(),
        green: white.clone(),
        yellow: white.clone(),
        orange: white.clone(),
        highlight: white,
        ..Palette::default()
    };
    let selected = selection("P3", 5, Organ::Rectum);
    let ctx = HighlightContext { selection: &selected, roster: &roster, palette: &palette };

    assert!(difference_highlights(None, &ctx).is_baseline());
    assert!(rotation_highlights(None, &ctx).is_baseline());
    let event = cell("P3", 5, "Rectum");
    assert_eq!(difference_highlights(Some(&event), &ctx).highlighted(), vec![(1, 5)]);
    assert_eq!(
        rotation_highlights(Some(&event), &ctx).highlighted(),
        vec![(0, 5), (1, 5), (2, 5)]
    );
}
