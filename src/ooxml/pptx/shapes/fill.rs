//! Shape fill resolution and mutation.
//!
//! A shape's fill is read from its own `p:spPr` only. Symbolic colors go
//! through the master's color map and the theme palette.

use crate::common::style::RGBColor;
use crate::ooxml::drawings::blip::{blip_embed, stretched_blip_fill};
use crate::ooxml::drawings::fill::{replace_fill, solid_fill};
use crate::ooxml::element::XmlElement;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::color::ColorToken;
use crate::ooxml::pptx::media::{ImageHandle, SharedImages};
use crate::ooxml::pptx::parts::MasterStyle;
use tracing::{debug, trace};

const DEFAULT_ALPHA: f64 = 100.0;
const DEFAULT_LUMINANCE_MODULATION: f64 = 100.0;
const DEFAULT_LUMINANCE_OFFSET: f64 = 0.0;

/// Fill kind of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillType {
    NoFill,
    Solid,
    Gradient,
    Pattern,
    Picture,
    SlideBackground,
}

/// A resolved `a:solidFill`.
#[derive(Debug, Clone, PartialEq)]
pub struct SolidFill {
    /// Color reference as written; `None` for color kinds that cannot be resolved
    pub token: Option<ColorToken>,
    /// Literal `RRGGBB` value after scheme resolution
    pub color: Option<String>,
    /// Opacity in percent
    pub alpha: f64,
    /// Luminance modulation in percent
    pub luminance_modulation: f64,
    /// Luminance offset in percent
    pub luminance_offset: f64,
}

impl SolidFill {
    fn from_element(solid: &XmlElement, style: &MasterStyle) -> Self {
        let Some(color) = solid.elements().next() else {
            return Self {
                token: None,
                color: None,
                alpha: DEFAULT_ALPHA,
                luminance_modulation: DEFAULT_LUMINANCE_MODULATION,
                luminance_offset: DEFAULT_LUMINANCE_OFFSET,
            };
        };

        let token = ColorToken::from_color_element(color);
        let resolved = token.as_ref().and_then(|t| style.resolve_color(t));
        if resolved.is_none() {
            debug!(color = color.name(), token = ?token, "solid fill color did not resolve");
        }

        Self {
            token,
            color: resolved,
            alpha: percent(color, "alpha", DEFAULT_ALPHA),
            luminance_modulation: percent(color, "lumMod", DEFAULT_LUMINANCE_MODULATION),
            luminance_offset: percent(color, "lumOff", DEFAULT_LUMINANCE_OFFSET),
        }
    }
}

/// Read a color transform child stored in thousandths of a percent.
fn percent(color: &XmlElement, transform: &str, default: f64) -> f64 {
    color
        .first_child(transform)
        .and_then(|e| e.attr_f64("val"))
        .map_or(default, |v| v / 1000.0)
}

/// The effective fill of a shape.
#[derive(Debug, Clone, PartialEq)]
pub enum FillSpec {
    NoFill,
    Solid(SolidFill),
    Gradient,
    Pattern,
    /// Picture fill; `None` when the blip embeds nothing
    Picture(Option<ImageHandle>),
    SlideBackground,
}

impl FillSpec {
    pub fn fill_type(&self) -> FillType {
        match self {
            FillSpec::NoFill => FillType::NoFill,
            FillSpec::Solid(_) => FillType::Solid,
            FillSpec::Gradient => FillType::Gradient,
            FillSpec::Pattern => FillType::Pattern,
            FillSpec::Picture(_) => FillType::Picture,
            FillSpec::SlideBackground => FillType::SlideBackground,
        }
    }

    /// Literal hex color of a solid fill.
    pub fn color(&self) -> Option<&str> {
        match self {
            FillSpec::Solid(solid) => solid.color.as_deref(),
            _ => None,
        }
    }

    pub fn alpha(&self) -> f64 {
        match self {
            FillSpec::Solid(solid) => solid.alpha,
            _ => DEFAULT_ALPHA,
        }
    }

    pub fn luminance_modulation(&self) -> f64 {
        match self {
            FillSpec::Solid(solid) => solid.luminance_modulation,
            _ => DEFAULT_LUMINANCE_MODULATION,
        }
    }

    pub fn luminance_offset(&self) -> f64 {
        match self {
            FillSpec::Solid(solid) => solid.luminance_offset,
            _ => DEFAULT_LUMINANCE_OFFSET,
        }
    }

    pub fn picture(&self) -> Option<&ImageHandle> {
        match self {
            FillSpec::Picture(handle) => handle.as_ref(),
            _ => None,
        }
    }
}

/// Determine the fill of shape properties.
///
/// The first present node wins in this order: solid, gradient, picture,
/// pattern. Without any of them the `useBgFill` flag selects the slide
/// background, otherwise the shape has no fill.
pub fn resolve_fill(
    properties: Option<&XmlElement>,
    use_bg_fill: bool,
    style: &MasterStyle,
    images: &SharedImages,
) -> FillSpec {
    let fill = properties.and_then(|props| {
        if let Some(solid) = props.first_child("solidFill") {
            return Some(FillSpec::Solid(SolidFill::from_element(solid, style)));
        }
        if props.first_child("gradFill").is_some() {
            return Some(FillSpec::Gradient);
        }
        if let Some(blip_fill) = props.first_child("blipFill") {
            let handle = blip_embed(blip_fill).map(|rid| ImageHandle::new(rid, images.clone()));
            return Some(FillSpec::Picture(handle));
        }
        if props.first_child("pattFill").is_some() {
            return Some(FillSpec::Pattern);
        }
        None
    });

    let fill = fill.unwrap_or(if use_bg_fill {
        FillSpec::SlideBackground
    } else {
        FillSpec::NoFill
    });
    trace!(fill_type = ?fill.fill_type(), "fill resolved");
    fill
}

/// Replace the fill with a literal solid color; returns the normalised hex.
pub fn apply_solid_color(properties: &mut XmlElement, hex: &str) -> Result<String> {
    let rgb = RGBColor::from_hex(hex).ok_or_else(|| OoxmlError::InvalidColor(hex.to_string()))?;
    let hex = rgb.to_hex();
    let removed = replace_fill(properties, solid_fill(&hex));
    debug!(color = %hex, removed, "solid fill applied");
    Ok(hex)
}

/// Replace the fill with a stretched picture referencing `rel_id`.
pub fn apply_picture(properties: &mut XmlElement, rel_id: &str) {
    let removed = replace_fill(properties, stretched_blip_fill(rel_id));
    debug!(rel_id, removed, "picture fill applied");
}
