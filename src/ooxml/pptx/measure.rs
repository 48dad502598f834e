//! Text measurement used by autofit.
//!
//! The engine never loads fonts itself. Callers plug in a [`TextMeasurer`]
//! backed by whatever shaping library they use; [`FixedAdvanceMeasurer`] is a
//! font-free implementation for headless use.

/// Extent of a single line of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Advance width of the whole string
    pub width: f64,
    /// Distance between consecutive baselines
    pub line_height: f64,
}

/// Unit convention of a measurer's results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureDpi {
    /// Results are pixels at 96 DPI, directly comparable with shape geometry.
    Screen96,
    /// Results are points (72 per inch) and must be scaled before use.
    Typographic72,
}

pub trait TextMeasurer {
    fn dpi(&self) -> MeasureDpi;

    /// Measure `text` set in `typeface` at `size_pt` points as one line.
    fn measure(&self, text: &str, typeface: &str, size_pt: f64) -> TextMetrics;
}

/// Measurer that gives every character the same advance.
///
/// Line breaks and other control characters have no advance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvanceMeasurer {
    advance_em: f64,
    line_spacing: f64,
    dpi: MeasureDpi,
}

impl FixedAdvanceMeasurer {
    /// `advance_em` is the per-character advance as a fraction of the font size.
    pub fn new(advance_em: f64, line_spacing: f64, dpi: MeasureDpi) -> Self {
        Self {
            advance_em,
            line_spacing,
            dpi,
        }
    }

    fn units_per_point(&self) -> f64 {
        match self.dpi {
            MeasureDpi::Screen96 => 96.0 / 72.0,
            MeasureDpi::Typographic72 => 1.0,
        }
    }
}

impl Default for FixedAdvanceMeasurer {
    fn default() -> Self {
        Self::new(0.5, 1.2, MeasureDpi::Screen96)
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn dpi(&self) -> MeasureDpi {
        self.dpi
    }

    fn measure(&self, text: &str, _typeface: &str, size_pt: f64) -> TextMetrics {
        let glyphs = text.chars().filter(|c| !c.is_control()).count() as f64;
        let scale = size_pt * self.units_per_point();
        TextMetrics {
            width: glyphs * self.advance_em * scale,
            line_height: self.line_spacing * scale,
        }
    }
}
