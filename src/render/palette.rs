// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Baseline colors of every view, with an optional `REGDASH_PALETTE` override.

use std::{env, error::Error, fmt};

use smol_str::SmolStr;

use crate::model::Method;

pub const PALETTE_ENV: &str = "REGDASH_PALETTE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub blue1: SmolStr,
    pub blue2: SmolStr,
    pub blue3: SmolStr,
    pub blue4: SmolStr,
    pub green: SmolStr,
    pub yellow: SmolStr,
    pub orange: SmolStr,
    pub pink: SmolStr,
    pub purple: SmolStr,
    pub grey: SmolStr,
    pub highlight: SmolStr,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            blue1: SmolStr::new_static("#0f4c81"),
            blue2: SmolStr::new_static("#5b8fd4"),
            blue3: SmolStr::new_static("#2a9df4"),
            blue4: SmolStr::new_static("#a3cef1"),
            green: SmolStr::new_static("#80cf8a"),
            yellow: SmolStr::new_static("#f2d16b"),
            orange: SmolStr::new_static("#f29b54"),
            pink: SmolStr::new_static("#ff8fc8"),
            purple: SmolStr::new_static("#9b6fd6"),
            grey: SmolStr::new_static("#5c5c5c"),
            highlight: SmolStr::new_static("white"),
        }
    }
}

impl Palette {
    const CSV_LEN: usize = 11;

    /// Default palette, overridden by `REGDASH_PALETTE` when set and non-empty.
    pub fn from_env() -> Result<Self, PaletteError> {
        let value = match env::var(PALETTE_ENV) {
            Ok(value) => value,
            Err(env::VarError::NotPresent) => return Ok(Self::default()),
            Err(env::VarError::NotUnicode(_)) => {
                return Err(PaletteError::InvalidEnv {
                    name: PALETTE_ENV.to_string(),
                    value: "<non-unicode>".to_string(),
                });
            }
        };

        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        Self::parse_csv(trimmed).map_err(|error| PaletteError::InvalidEnv {
            name: PALETTE_ENV.to_string(),
            value: format!("{trimmed} ({error})"),
        })
    }

    /// Parses `blue1,blue2,blue3,blue4,green,yellow,orange,pink,purple,grey,highlight`.
    pub fn parse_csv(value: &str) -> Result<Self, String> {
        let parts: Vec<&str> = value.split(',').map(|part| part.trim()).collect();
        if parts.len() != Self::CSV_LEN {
            return Err(format!(
                "expected {} comma-separated colors (blue1,blue2,blue3,blue4,green,yellow,orange,pink,purple,grey,highlight), got {}",
                Self::CSV_LEN,
                parts.len()
            ));
        }

        let mut colors = Vec::with_capacity(Self::CSV_LEN);
        for part in &parts {
            colors.push(parse_palette_color(part)?);
        }
        let [blue1, blue2, blue3, blue4, green, yellow, orange, pink, purple, grey, highlight]: [SmolStr; 11] =
            colors.try_into().map_err(|_| "palette length mismatch".to_string())?;

        Ok(Self { blue1, blue2, blue3, blue4, green, yellow, orange, pink, purple, grey, highlight })
    }

    /// Slot colors of the organ-distance and average panels.
    pub fn organ_baseline(&self, method: Method) -> [SmolStr; 3] {
        let primary = match method {
            Method::BoneAligned => self.blue1.clone(),
            Method::Centered => self.blue2.clone(),
        };
        [primary, self.blue3.clone(), self.blue4.clone()]
    }

    /// Bladder and Rectum bars of the difference view.
    pub fn difference_baseline(&self) -> [SmolStr; 2] {
        [self.blue3.clone(), self.blue4.clone()]
    }

    /// X, Y and Z bars of the rotation view.
    pub fn rotation_baseline(&self) -> [SmolStr; 3] {
        [self.green.clone(), self.yellow.clone(), self.orange.clone()]
    }

    /// Mesh colors of the first and second stage in the 3D and slice views.
    pub fn stage_colors(&self) -> [SmolStr; 2] {
        [self.pink.clone(), self.purple.clone()]
    }
}

/// Normalizes `#RRGGBB`, `0xRRGGBB` or `RRGGBB` to lowercase `#rrggbb`.
fn parse_palette_color(value: &str) -> Result<SmolStr, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("empty color".to_string());
    }

    let hex = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(format!("invalid hex color: {trimmed} (expected #RRGGBB)"));
    }
    Ok(SmolStr::new(format!("#{}", hex.to_ascii_lowercase())))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    InvalidEnv { name: String, value: String },
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnv { name, value } => write!(f, "invalid env {name}={value}"),
        }
    }
}

impl Error for PaletteError {}

#[cfg(test)]
mod tests {
    use super::Palette;
    use crate::model::Method;

    #[test]
    fn palette_override_parses_valid_csv() {
        let palette = Palette::parse_csv(
            "#111111,#222222,#333333,#444444,0x00FF00,#ffff00,#ff8800,#ff00ff,#8800ff,#777777,FFFFFF",
        )
        .expect("palette");

        assert_eq!(palette.organ_baseline(Method::BoneAligned)[0], "#111111");
        assert_eq!(palette.organ_baseline(Method::Centered)[0], "#222222");
        assert_eq!(palette.difference_baseline(), ["#333333", "#444444"]);
        assert_eq!(palette.green, "#00ff00");
        assert_eq!(palette.highlight, "#ffffff");
    }

    #[test]
    fn palette_override_rejects_invalid_csv() {
        let err = Palette::parse_csv("nope").unwrap_err();
        assert!(err.contains("expected"));

        let err = Palette::parse_csv("#1,#2,#3,#4,#5,#6,#7,#8,#9,#a,#b").unwrap_err();
        assert!(err.contains("invalid hex color"));
    }

    #[test]
    fn variants_share_bladder_and_rectum_colors() {
        let palette = Palette::default();
        let icp = palette.organ_baseline(Method::BoneAligned);
        let center = palette.organ_baseline(Method::Centered);
        assert_ne!(icp[0], center[0]);
        assert_eq!(icp[1..], center[1..]);
    }
}
