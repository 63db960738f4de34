// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smol_str::SmolStr;

/// Identifier of a patient in the cohort roster.
///
/// Patient ids double as directory names in the mesh tree
/// (`<mesh_dir>/<patient>/<organ>/...`), so they must be a single non-empty path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatientId {
    value: SmolStr,
}

impl PatientId {
    pub fn new(value: impl AsRef<str>) -> Result<Self, IdError> {
        let value = value.as_ref();
        validate_patient_segment(value)?;
        Ok(Self { value: SmolStr::new(value) })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for PatientId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for PatientId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for PatientId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for PatientId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PatientId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Rosters written by numeric tooling store ids as bare numbers ("137" vs 137).
        let raw = serde_json::Value::deserialize(deserializer)?;
        let text = match raw {
            serde_json::Value::String(text) => text,
            serde_json::Value::Number(number) => number.to_string(),
            other => {
                return Err(serde::de::Error::custom(format!(
                    "patient id must be a string or number, got {other}"
                )))
            }
        };
        Self::new(text).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    Empty,
    ContainsSeparator,
    ContainsWhitespace,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("patient id must not be empty"),
            Self::ContainsSeparator => f.write_str("patient id must not contain '/' or '\\'"),
            Self::ContainsWhitespace => f.write_str("patient id must not contain whitespace"),
        }
    }
}

impl std::error::Error for IdError {}

fn validate_patient_segment(value: &str) -> Result<(), IdError> {
    if value.is_empty() {
        return Err(IdError::Empty);
    }
    if value.contains(['/', '\\']) {
        return Err(IdError::ContainsSeparator);
    }
    if value.chars().any(char::is_whitespace) {
        return Err(IdError::ContainsWhitespace);
    }
    if value == "." || value == ".." {
        return Err(IdError::ContainsSeparator);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{IdError, PatientId};

    #[test]
    fn patient_id_rejects_empty() {
        assert_eq!(PatientId::new(""), Err(IdError::Empty));
    }

    #[test]
    fn patient_id_rejects_path_separators() {
        assert_eq!(PatientId::new("13/7"), Err(IdError::ContainsSeparator));
        assert_eq!(PatientId::new("13\\7"), Err(IdError::ContainsSeparator));
        assert_eq!(PatientId::new(".."), Err(IdError::ContainsSeparator));
    }

    #[test]
    fn patient_id_rejects_whitespace() {
        assert_eq!(PatientId::new("P 1"), Err(IdError::ContainsWhitespace));
    }

    #[test]
    fn patient_id_deserializes_from_number_or_string() {
        let ids: Vec<PatientId> = serde_json::from_str(r#"[137, "146"]"#).expect("ids");
        assert_eq!(ids[0].as_str(), "137");
        assert_eq!(ids[1].as_str(), "146");
    }
}
