// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// MCP server helper functions:
/// selection/control/event mapping and parameter parsing.
fn patient_labels(roster: &Roster) -> Vec<String> {
    roster.patients().iter().map(|patient| patient.as_str().to_owned()).collect()
}

fn peer_labels() -> Vec<&'static str> {
    ViewId::PEERS.iter().map(|view| view.as_str()).collect()
}

fn method_key(method: Method) -> &'static str {
    match method {
        Method::BoneAligned => "icp",
        Method::Centered => "center",
    }
}

fn mcp_selection(selection: &Selection) -> McpSelection {
    McpSelection {
        patient: selection.patient.as_str().to_owned(),
        timestamp: selection.timestamp,
        organ: selection.organ.label().to_owned(),
    }
}

fn mcp_controls(controls: &DisplayControls) -> McpControls {
    McpControls {
        method: method_key(controls.method).to_owned(),
        mode: controls.mode.as_str().to_owned(),
        first_stage: controls.first_stage.to_string(),
        second_stage: controls.second_stage.to_string(),
        organs: controls.organs.iter().map(|organ| organ.label().to_owned()).collect(),
        organ_scale: controls.organ_scale.as_str().to_owned(),
        average_scale: controls.average_scale.as_str().to_owned(),
        heatmap_scale: controls.heatmap_scale.as_str().to_owned(),
        slices: controls.slices,
        heatmap_zoomed: controls.heatmap_zoomed,
    }
}

fn mcp_event(event: &ViewEvent) -> McpViewEvent {
    let mut out = McpViewEvent {
        origin: event.origin.as_str().to_owned(),
        kind: String::new(),
        patient: None,
        timestamp: None,
        series: None,
        organ: None,
        axis: None,
    };
    match &event.payload {
        Payload::CellPick { patient, timestamp, organ_label } => {
            out.kind = "cell".to_owned();
            out.patient = Some(patient.as_str().to_owned());
            out.timestamp = Some(*timestamp);
            out.organ = Some(organ_label.to_string());
        }
        Payload::TracePick { series, x } => {
            out.kind = "trace".to_owned();
            out.series = Some(*series);
            match x {
                PickX::Timestamp(timestamp) => out.timestamp = Some(*timestamp),
                PickX::Patient(patient) => out.patient = Some(patient.as_str().to_owned()),
            }
        }
        Payload::Broadcast { timestamp, axis } => {
            out.kind = "broadcast".to_owned();
            out.timestamp = Some(*timestamp);
            out.axis = axis.map(|axis| axis.label().to_owned());
        }
    }
    out
}

fn figures_json<'a>(
    figures: impl IntoIterator<Item = (&'a ViewId, &'a Figure)>,
) -> std::collections::BTreeMap<String, serde_json::Value> {
    figures.into_iter().map(|(view, figure)| (view.as_str().to_owned(), figure.to_json())).collect()
}

fn refresh_response(
    refresh: Refresh,
    controls: &DisplayControls,
    include_figures: bool,
) -> RefreshResponse {
    RefreshResponse {
        event: refresh.event.as_ref().map(mcp_event),
        selection: mcp_selection(&refresh.selection),
        controls: mcp_controls(controls),
        selection_changed: refresh.selection_changed,
        controls_changed: refresh.controls_changed,
        rendered: refresh.figures.keys().map(|view| view.as_str().to_owned()).collect(),
        figures: include_figures.then(|| figures_json(&refresh.figures)),
    }
}

fn parse_view(value: &str) -> Result<ViewId, ErrorData> {
    value.parse::<ViewId>().map_err(|err| {
        ErrorData::invalid_params(
            format!("{err}"),
            Some(serde_json::json!({
                "views": ViewId::ALL.iter().map(|view| view.as_str()).collect::<Vec<_>>(),
            })),
        )
    })
}

fn parse_patient(roster: &Roster, value: &str) -> Result<PatientId, ErrorData> {
    let patient = PatientId::new(value).map_err(|err| {
        ErrorData::invalid_params(format!("invalid patient id {value:?}: {err}"), None)
    })?;
    if !roster.contains(&patient) {
        return Err(ErrorData::resource_not_found(
            format!("patient {patient} is not in the roster"),
            Some(serde_json::json!({ "patients": patient_labels(roster) })),
        ));
    }
    Ok(patient)
}

fn parse_timestamp(timestamp: usize) -> Result<usize, ErrorData> {
    if timestamp >= TIMESTAMP_COUNT {
        return Err(ErrorData::invalid_params(
            format!("timestamp {timestamp} is outside 0..{TIMESTAMP_COUNT}"),
            None,
        ));
    }
    Ok(timestamp)
}

fn parse_organ(value: &str) -> Result<Organ, ErrorData> {
    value.parse::<Organ>().map_err(|err| ErrorData::invalid_params(err.to_string(), None))
}

fn parse_control(control: &str, value: &str) -> Result<ControlChange, ErrorData> {
    let invalid = |message: String| {
        ErrorData::invalid_params(
            message,
            Some(serde_json::json!({ "control": control, "value": value })),
        )
    };
    let slider = |axis: Axis| -> Result<ControlChange, ErrorData> {
        let position = value
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid(format!("invalid slider position '{value}'")))?;
        Ok(ControlChange::Slice { axis, position })
    };
    let zoom = |method: Method| -> Result<ControlChange, ErrorData> {
        let zoomed = value
            .trim()
            .parse::<bool>()
            .map_err(|_| invalid(format!("expected true or false, got '{value}'")))?;
        Ok(ControlChange::HeatmapZoom { method, zoomed })
    };

    let change = match control {
        "method" => ControlChange::Method(value.parse().map_err(invalid)?),
        "mode" => ControlChange::Mode(value.parse().map_err(invalid)?),
        "first_stage" => ControlChange::FirstStage(value.parse().map_err(invalid)?),
        "second_stage" => ControlChange::SecondStage(value.parse().map_err(invalid)?),
        "organs" => ControlChange::Organs(
            value
                .split(',')
                .filter(|label| !label.trim().is_empty())
                .map(|label| label.parse::<Organ>().map_err(|err| invalid(err.to_string())))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        "organ_scale" => ControlChange::OrganScale(value.parse().map_err(invalid)?),
        "average_scale" => ControlChange::AverageScale(value.parse().map_err(invalid)?),
        "heatmap_scale" => ControlChange::HeatmapScale(value.parse().map_err(invalid)?),
        "slice_x" => slider(Axis::X)?,
        "slice_y" => slider(Axis::Y)?,
        "slice_z" => slider(Axis::Z)?,
        "heatmap_zoom_icp" => zoom(Method::BoneAligned)?,
        "heatmap_zoom_center" => zoom(Method::Centered)?,
        other => return Err(invalid(format!("unknown control '{other}'"))),
    };
    Ok(change)
}
