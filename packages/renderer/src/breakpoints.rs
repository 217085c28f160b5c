//! Breakpoint table and device presets
//!
//! Device type only changes presentational parameters. Stored settings are
//! never touched.

use pagecraft_model::DeviceType;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Breakpoint {
    pub name: &'static str,
    pub min_width: u32,
}

pub const BREAKPOINTS: [Breakpoint; 5] = [
    Breakpoint { name: "sm", min_width: 640 },
    Breakpoint { name: "md", min_width: 768 },
    Breakpoint { name: "lg", min_width: 1024 },
    Breakpoint { name: "xl", min_width: 1280 },
    Breakpoint { name: "2xl", min_width: 1536 },
];

/// Largest breakpoint whose minimum width fits in `width`
pub fn breakpoint_for_width(width: u32) -> Option<Breakpoint> {
    BREAKPOINTS.iter().rev().find(|bp| width >= bp.min_width).copied()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevicePreset {
    pub container_max_width: &'static str,
    pub section_padding: &'static str,
    /// Root font size; `None` keeps the page default
    pub font_size: Option<&'static str>,
    /// Spacing scale step used between stacked elements
    pub gap_step: usize,
}

pub fn device_preset(device: DeviceType) -> DevicePreset {
    match device {
        DeviceType::Desktop => DevicePreset {
            container_max_width: "1200px",
            section_padding: "2rem",
            font_size: None,
            gap_step: 6,
        },
        DeviceType::Tablet => DevicePreset {
            container_max_width: "768px",
            section_padding: "1.5rem",
            font_size: Some("15px"),
            gap_step: 5,
        },
        DeviceType::Mobile => DevicePreset {
            container_max_width: "100%",
            section_padding: "1rem",
            font_size: Some("14px"),
            gap_step: 4,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_lookup() {
        assert_eq!(breakpoint_for_width(320), None);
        assert_eq!(breakpoint_for_width(768).map(|b| b.name), Some("md"));
        assert_eq!(breakpoint_for_width(1100).map(|b| b.name), Some("lg"));
        assert_eq!(breakpoint_for_width(4000).map(|b| b.name), Some("2xl"));
    }

    #[test]
    fn test_device_presets() {
        assert_eq!(device_preset(DeviceType::Desktop).container_max_width, "1200px");
        assert_eq!(device_preset(DeviceType::Tablet).section_padding, "1.5rem");
        assert_eq!(device_preset(DeviceType::Mobile).container_max_width, "100%");
    }
}
