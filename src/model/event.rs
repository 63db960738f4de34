// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Interaction payloads: the raw click data a host view emits, and the normalized event the
//! resolver produces from it.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smol_str::SmolStr;

use super::ids::PatientId;
use super::organ::Axis;
use super::view::ViewId;

/// Click payload as emitted by a chart view: a list of picked points, of which only the first
/// one is meaningful.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawPick {
    #[serde(default)]
    pub points: Vec<RawPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawPoint {
    #[serde(rename = "curveNumber", default, skip_serializing_if = "Option::is_none")]
    pub curve_number: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "marker.line.color", default, skip_serializing_if = "Option::is_none")]
    pub marker_line_color: Option<String>,
}

impl RawPick {
    pub fn point(point: RawPoint) -> Self {
        Self { points: vec![point] }
    }

    pub fn first(&self) -> Result<&RawPoint, RawPickError> {
        self.points.first().ok_or(RawPickError::NoPoints)
    }
}

impl RawPoint {
    /// A trace pick (`curveNumber` + `x`).
    pub fn trace(curve_number: usize, x: impl Into<Value>) -> Self {
        Self { curve_number: Some(curve_number.into()), x: Some(x.into()), ..Self::default() }
    }

    /// A heatmap cell pick (`x` grid column, `y` row, `text` organ label).
    pub fn cell(column: usize, row: impl Into<Value>, text: impl Into<String>) -> Self {
        Self {
            curve_number: Some(0.into()),
            x: Some(column.into()),
            y: Some(row.into()),
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn curve_number(&self) -> Result<usize, RawPickError> {
        let value = self.curve_number.as_ref().ok_or(RawPickError::Missing("curveNumber"))?;
        value_as_index(value).ok_or(RawPickError::Invalid("curveNumber"))
    }

    /// `x` as a non-negative integer (timestamp numbers and heatmap columns).
    pub fn x_index(&self) -> Result<usize, RawPickError> {
        let value = self.x.as_ref().ok_or(RawPickError::Missing("x"))?;
        value_as_index(value).ok_or(RawPickError::Invalid("x"))
    }

    /// `x` as a label; numbers are rendered the way the roster stores them.
    pub fn x_label(&self) -> Result<String, RawPickError> {
        let value = self.x.as_ref().ok_or(RawPickError::Missing("x"))?;
        value_as_label(value).ok_or(RawPickError::Invalid("x"))
    }

    pub fn y_value(&self) -> Result<&Value, RawPickError> {
        self.y.as_ref().ok_or(RawPickError::Missing("y"))
    }

    pub fn text(&self) -> Result<&str, RawPickError> {
        self.text.as_deref().ok_or(RawPickError::Missing("text"))
    }
}

pub(crate) fn value_as_index(value: &Value) -> Option<usize> {
    match value {
        Value::Number(number) => {
            if let Some(n) = number.as_u64() {
                return usize::try_from(n).ok();
            }
            let f = number.as_f64()?;
            (f >= 0.0 && f.fract() == 0.0 && f <= usize::MAX as f64).then_some(f as usize)
        }
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn value_as_label(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => {
            if let Some(n) = number.as_i64() {
                Some(n.to_string())
            } else {
                let f = number.as_f64()?;
                (f.fract() == 0.0).then(|| format!("{f:.0}"))
            }
        }
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawPickError {
    NoPoints,
    Missing(&'static str),
    Invalid(&'static str),
    RowOutOfRange(usize),
    NotSelectable(ViewId),
}

impl fmt::Display for RawPickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPoints => f.write_str("click payload has no points"),
            Self::Missing(field) => write!(f, "click payload is missing '{field}'"),
            Self::Invalid(field) => write!(f, "click payload has an invalid '{field}'"),
            Self::RowOutOfRange(row) => write!(f, "heatmap row {row} is outside the roster"),
            Self::NotSelectable(view) => write!(f, "view '{view}' does not originate selections"),
        }
    }
}

impl std::error::Error for RawPickError {}

/// The resolved, normalized interaction of one refresh cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewEvent {
    pub origin: ViewId,
    pub payload: Payload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// A heatmap cell: explicit patient, 0-based timestamp and the organ label of the cell.
    CellPick { patient: PatientId, timestamp: usize, organ_label: SmolStr },
    /// A scatter/bar point: the raw series index and its x value.
    TracePick { series: usize, x: PickX },
    /// A rotation bar: affects all organ slots at a timestamp.
    Broadcast { timestamp: usize, axis: Option<Axis> },
}

/// The x coordinate of a trace pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickX {
    /// 0-based timestamp index (the chart axis is 1-based).
    Timestamp(usize),
    Patient(PatientId),
}

impl ViewEvent {
    pub fn new(origin: ViewId, payload: Payload) -> Self {
        Self { origin, payload }
    }
}
