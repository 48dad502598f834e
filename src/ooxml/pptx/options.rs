//! Layout options for fill resolution and text autofit.

use crate::ooxml::error::{OoxmlError, Result};
use serde::{Deserialize, Serialize};

/// Options controlling autofit measurement and placeholder inheritance.
///
/// The defaults reproduce PowerPoint's behaviour on a 96 DPI screen. Options
/// can be built in code or read from YAML. The resolution, the scales and the
/// default font size must be positive; [`LayoutOptions::validate`] checks
/// this and runs whenever options enter a
/// [`PartContext`](crate::ooxml::pptx::PartContext).
///
/// # Examples
///
/// ```rust
/// use slidekit::ooxml::pptx::LayoutOptions;
///
/// // Create with defaults
/// let options = LayoutOptions::default();
/// assert_eq!(options.dpi, 96);
///
/// // Or customize
/// let options = LayoutOptions::new()
///     .with_max_placeholder_depth(5)
///     .with_default_typeface("Arial");
/// assert_eq!(options.max_placeholder_depth, 5);
///
/// // Numeric settings are range checked
/// assert!(LayoutOptions::new().with_dpi(0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Screen resolution used for pixel geometry
    pub dpi: u32,
    /// Scale applied to measurements from a 72 DPI (typographic) measurer
    pub measure_scale: f64,
    /// Scale applied to the raw text width when a frame does not wrap
    pub no_wrap_width_scale: f64,
    /// Maximum number of placeholder hops followed by the font cascade
    pub max_placeholder_depth: usize,
    /// Font size in points when neither the run nor the cascade sets one
    pub default_font_size: f64,
    /// Typeface when neither the run, the cascade nor the theme sets one
    pub default_typeface: String,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            dpi: crate::common::unit::DEFAULT_DPI,
            measure_scale: 1.4,
            no_wrap_width_scale: 1.4,
            max_placeholder_depth: 3,
            default_font_size: 18.0,
            default_typeface: "Calibri".to_string(),
        }
    }
}

impl LayoutOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dpi(mut self, dpi: u32) -> Result<Self> {
        self.dpi = dpi;
        self.validate()?;
        Ok(self)
    }

    pub fn with_measure_scale(mut self, scale: f64) -> Result<Self> {
        self.measure_scale = scale;
        self.validate()?;
        Ok(self)
    }

    pub fn with_no_wrap_width_scale(mut self, scale: f64) -> Result<Self> {
        self.no_wrap_width_scale = scale;
        self.validate()?;
        Ok(self)
    }

    /// Set how many placeholder links the font cascade may follow.
    ///
    /// A slide placeholder normally needs two hops (layout, then master).
    #[inline]
    pub fn with_max_placeholder_depth(mut self, depth: usize) -> Self {
        self.max_placeholder_depth = depth;
        self
    }

    pub fn with_default_font_size(mut self, points: f64) -> Result<Self> {
        self.default_font_size = points;
        self.validate()?;
        Ok(self)
    }

    #[inline]
    pub fn with_default_typeface(mut self, typeface: impl Into<String>) -> Self {
        self.default_typeface = typeface.into();
        self
    }

    /// Check that every numeric setting is usable for pixel arithmetic.
    pub fn validate(&self) -> Result<()> {
        if self.dpi == 0 {
            return Err(OoxmlError::InvalidOption {
                name: "dpi",
                value: self.dpi.to_string(),
            });
        }
        let scales = [
            ("measure_scale", self.measure_scale),
            ("no_wrap_width_scale", self.no_wrap_width_scale),
            ("default_font_size", self.default_font_size),
        ];
        for (name, value) in scales {
            if !value.is_finite() || value <= 0.0 {
                return Err(OoxmlError::InvalidOption {
                    name,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Read options from a YAML document; missing keys keep their defaults.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slidekit::ooxml::pptx::LayoutOptions;
    ///
    /// let options = LayoutOptions::from_yaml_str("dpi: 120\n").unwrap();
    /// assert_eq!(options.dpi, 120);
    /// assert_eq!(options.max_placeholder_depth, 3);
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let options: Self = serde_saphyr::from_str(yaml)
            .map_err(|e| OoxmlError::Other(format!("Failed to parse layout options: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Serialize the options to YAML.
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_saphyr::to_string(self)
            .map_err(|e| OoxmlError::Other(format!("Failed to serialize layout options: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = LayoutOptions::default();
        assert_eq!(options.dpi, 96);
        assert_eq!(options.measure_scale, 1.4);
        assert_eq!(options.no_wrap_width_scale, 1.4);
        assert_eq!(options.max_placeholder_depth, 3);
        assert_eq!(options.default_font_size, 18.0);
        assert_eq!(options.default_typeface, "Calibri");
    }

    #[test]
    fn test_builder() {
        let options = LayoutOptions::new()
            .with_dpi(72)
            .and_then(|o| o.with_measure_scale(1.0))
            .and_then(|o| o.with_no_wrap_width_scale(1.2))
            .and_then(|o| o.with_default_font_size(12.0))
            .unwrap();
        assert_eq!(options.dpi, 72);
        assert_eq!(options.measure_scale, 1.0);
        assert_eq!(options.no_wrap_width_scale, 1.2);
        assert_eq!(options.default_font_size, 12.0);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "max_placeholder_depth: 6\ndefault_typeface: Arial\n";
        let options = LayoutOptions::from_yaml_str(yaml).unwrap();
        assert_eq!(options.max_placeholder_depth, 6);
        assert_eq!(options.default_typeface, "Arial");
        assert_eq!(options.dpi, 96);
    }

    #[test]
    fn test_yaml_round_trip() {
        let options = LayoutOptions::new().with_dpi(144).unwrap();
        let yaml = options.to_yaml_string().unwrap();
        assert_eq!(LayoutOptions::from_yaml_str(&yaml).unwrap(), options);
    }

    #[test]
    fn test_rejects_unusable_numbers() {
        assert!(matches!(
            LayoutOptions::from_yaml_str("dpi: 0\n"),
            Err(OoxmlError::InvalidOption { name: "dpi", .. })
        ));
        assert!(LayoutOptions::from_yaml_str("measure_scale: -1.4\n").is_err());
        assert!(LayoutOptions::from_yaml_str("no_wrap_width_scale: 0\n").is_err());
        assert!(LayoutOptions::new().with_dpi(0).is_err());
        assert!(LayoutOptions::new().with_measure_scale(f64::NAN).is_err());
        assert!(LayoutOptions::new().with_default_font_size(0.0).is_err());

        let edited = LayoutOptions {
            dpi: 0,
            ..LayoutOptions::default()
        };
        assert!(edited.validate().is_err());
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(LayoutOptions::from_yaml_str("dpi: [1, 2").is_err());
    }
}
