//! Site-wide design tokens

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Global design variables applied across every template document.
///
/// Colors and typography are open maps keyed by role (`primary`,
/// `background`, `bodyFont`, ...) so a theme can introduce roles the
/// renderer does not know about without losing them on round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ThemeTokens {
    #[serde(default)]
    pub colors: BTreeMap<String, String>,

    #[serde(default)]
    pub typography: BTreeMap<String, String>,

    /// Ascending spacing scale in pixels
    #[serde(default)]
    pub spacing_scale: Vec<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<String>,

    #[serde(default)]
    pub dark_mode: bool,

    #[serde(default)]
    pub rtl: bool,
}

impl ThemeTokens {
    pub fn color(&self, role: &str) -> Option<&str> {
        self.colors.get(role).map(String::as_str)
    }

    pub fn font(&self, role: &str) -> Option<&str> {
        self.typography.get(role).map(String::as_str)
    }

    /// Spacing value at `step`, clamped to the last entry of the scale
    pub fn spacing(&self, step: usize) -> u32 {
        match self.spacing_scale.get(step) {
            Some(value) => *value,
            None => self.spacing_scale.last().copied().unwrap_or(0),
        }
    }

    /// Apply a partial update. Each present field replaces the current one wholesale.
    pub fn apply(&mut self, patch: ThemeTokensPatch) {
        if let Some(colors) = patch.colors {
            self.colors = colors;
        }
        if let Some(typography) = patch.typography {
            self.typography = typography;
        }
        if let Some(spacing_scale) = patch.spacing_scale {
            self.spacing_scale = spacing_scale;
        }
        if let Some(radius) = patch.radius {
            self.radius = Some(radius);
        }
        if let Some(dark_mode) = patch.dark_mode {
            self.dark_mode = dark_mode;
        }
        if let Some(rtl) = patch.rtl {
            self.rtl = rtl;
        }
    }
}

/// Partial theme update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ThemeTokensPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typography: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing_scale: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rtl: Option<bool>,
}

impl ThemeTokensPatch {
    pub fn is_empty(&self) -> bool {
        self == &ThemeTokensPatch::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spacing_clamps_to_scale() {
        let tokens = ThemeTokens {
            spacing_scale: vec![0, 4, 8],
            ..Default::default()
        };

        assert_eq!(tokens.spacing(1), 4);
        assert_eq!(tokens.spacing(10), 8);
        assert_eq!(ThemeTokens::default().spacing(3), 0);
    }

    #[test]
    fn test_patch_replaces_present_fields_only() {
        let mut tokens = ThemeTokens {
            radius: Some("8px".to_string()),
            ..Default::default()
        };
        tokens.colors.insert("primary".to_string(), "#2563eb".to_string());

        tokens.apply(ThemeTokensPatch {
            dark_mode: Some(true),
            ..Default::default()
        });

        assert!(tokens.dark_mode);
        assert_eq!(tokens.color("primary"), Some("#2563eb"));
        assert_eq!(tokens.radius.as_deref(), Some("8px"));
    }

    #[test]
    fn test_camel_case_wire_format() {
        let json = r##"{
            "colors": { "primary": "#000" },
            "typography": { "bodyFont": "Inter" },
            "spacingScale": [0, 4],
            "radius": "4px",
            "darkMode": true,
            "rtl": false
        }"##;

        let tokens: ThemeTokens = serde_json::from_str(json).unwrap();
        assert_eq!(tokens.font("bodyFont"), Some("Inter"));
        assert_eq!(tokens.spacing_scale, vec![0, 4]);
        assert!(tokens.dark_mode);
    }
}
