//! Risk color display mapping

use crate::types::RiskColor;

/// Maps risk colors to display glyphs. Pure presentation.
pub struct ColorMapper;

impl ColorMapper {
    pub fn glyph(color: RiskColor) -> &'static str {
        match color {
            RiskColor::Green => "\u{1F7E2}",
            RiskColor::Orange => "\u{1F7E0}",
            RiskColor::Red => "\u{1F534}",
            RiskColor::Moonshot => "\u{1F680}",
        }
    }

    /// `"{hits}/{window} games {glyph}"`
    pub fn display_string(color: RiskColor, hit_count: u32, window_size: u32) -> String {
        format!(
            "{}/{} games {}",
            hit_count,
            window_size,
            Self::glyph(color)
        )
    }
}
