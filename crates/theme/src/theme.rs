//! Minimal theming for the hotspot editor.
//!
//! Provides colors and stroke widths for zones, their vertices and the
//! background grid.

use palette::Srgba;

/// 8-bit sRGB color with alpha.
pub type Color = Srgba<u8>;

/// Theme colors and metrics for the zone editor.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    /// Canvas background (painted before the grid)
    pub background: Color,

    /// Grid lines
    pub grid: Color,
    pub grid_width: f32,

    /// Zone outline in its normal state
    pub zone_stroke: Color,

    /// Zone outline while hovered
    pub zone_hover: Color,

    /// Zone outline when self-intersecting or out of bounds
    pub zone_error: Color,

    /// Interior of closed zones
    pub zone_fill: Color,
    pub zone_stroke_width: f32,

    /// Vertex ring
    pub vertex_stroke: Color,

    /// Vertex ring while hovered
    pub vertex_hover: Color,
    pub vertex_stroke_width: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    pub fn light() -> Self {
        Self {
            background: rgba(0xff, 0xff, 0xff, 0x00),
            grid: rgba(0xd3, 0xd3, 0xd3, 0xff), // lightgray
            grid_width: 0.5,
            zone_stroke: rgba(0x00, 0x00, 0xff, 0xff),
            zone_hover: rgba(0x7a, 0x7b, 0xef, 0xff),
            zone_error: rgba(0xff, 0x00, 0x00, 0xff),
            zone_fill: rgba(0xc8, 0xd0, 0xd2, 0x75),
            zone_stroke_width: 1.0,
            vertex_stroke: rgba(0xff, 0x00, 0x00, 0xff),
            vertex_hover: rgba(0x7a, 0x7b, 0xef, 0xff),
            vertex_stroke_width: 2.0,
        }
    }

    pub fn dark() -> Self {
        Self {
            background: rgba(0x1a, 0x1a, 0x1a, 0xff),
            grid: rgba(0x33, 0x33, 0x33, 0xff),
            zone_stroke: rgba(0x5c, 0x9d, 0xff, 0xff),
            zone_fill: rgba(0x5c, 0x9d, 0xff, 0x30),
            vertex_stroke: rgba(0xff, 0x6b, 0x6b, 0xff),
            ..Self::light()
        }
    }

    /// Look up a built-in theme by name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "light" => Some(Self::light()),
            "dark" => Some(Self::dark()),
            _ => None,
        }
    }
}

/// Helper to create a color from 8-bit channels.
pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
    Srgba::new(r, g, b, a)
}

/// `#rrggbb` form of a color, ignoring alpha.
pub fn hex(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

/// Alpha as a 0..=1 opacity.
pub fn opacity(color: Color) -> f32 {
    color.alpha as f32 / 255.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_drops_alpha() {
        assert_eq!(hex(Theme::light().zone_fill), "#c8d0d2");
        assert_eq!(hex(Theme::light().zone_hover), "#7a7bef");
    }

    #[test]
    fn opacity_scales_alpha() {
        assert_eq!(opacity(rgba(0, 0, 0, 0xff)), 1.0);
        assert_eq!(opacity(rgba(0, 0, 0, 0)), 0.0);
    }

    #[test]
    fn dark_keeps_error_color() {
        let dark = Theme::dark();
        assert_eq!(dark.zone_error, Theme::light().zone_error);
        assert_ne!(dark.background, Theme::light().background);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(Theme::by_name("Dark"), Some(Theme::dark()));
        assert!(Theme::by_name("solarized").is_none());
    }
}
