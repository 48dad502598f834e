//! Shape outline (`a:ln`) color and weight.

use crate::common::style::RGBColor;
use crate::common::unit::{emu_to_pt_f64, pt_to_emu};
use crate::ooxml::drawings::fill::solid_fill;
use crate::ooxml::drawings::line::{ensure_line, replace_line_fill};
use crate::ooxml::element::XmlElement;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::color::ColorToken;
use crate::ooxml::pptx::parts::MasterStyle;
use tracing::{debug, trace};

/// The outline of a shape as declared in its own properties.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShapeOutline {
    /// Line width in points; 0 when `a:ln` has no `w`
    pub weight: f64,
    /// Literal `RRGGBB` of a solid line; `None` for no line or other line fills
    pub color: Option<String>,
}

/// Read the outline from shape properties.
pub fn resolve_outline(properties: Option<&XmlElement>, style: &MasterStyle) -> ShapeOutline {
    let Some(line) = properties.and_then(|props| props.first_child("ln")) else {
        return ShapeOutline::default();
    };

    let weight = line.attr_i64("w").map_or(0.0, emu_to_pt_f64);
    let color = line
        .child_path(&["solidFill"])
        .and_then(|solid| solid.elements().next())
        .and_then(ColorToken::from_color_element)
        .and_then(|token| style.resolve_color(&token));
    trace!(weight, color = ?color, "outline resolved");
    ShapeOutline { weight, color }
}

/// Set the line width in points; returns the stored width in EMU.
pub fn apply_outline_weight(properties: &mut XmlElement, points: f64) -> Result<i64> {
    if !points.is_finite() || points < 0.0 {
        return Err(OoxmlError::InvalidFormat(format!("outline weight {points}")));
    }
    let emu = pt_to_emu(points);
    if let Some(line) = ensure_line(properties) {
        line.set_attr_i64("w", emu);
    }
    debug!(points, emu, "outline weight applied");
    Ok(emu)
}

/// Give the line a literal solid color; returns the normalised hex.
pub fn apply_outline_color(properties: &mut XmlElement, hex: &str) -> Result<String> {
    let rgb = RGBColor::from_hex(hex).ok_or_else(|| OoxmlError::InvalidColor(hex.to_string()))?;
    let hex = rgb.to_hex();
    if let Some(line) = ensure_line(properties) {
        let removed = replace_line_fill(line, solid_fill(&hex));
        debug!(color = %hex, removed, "outline color applied");
    }
    Ok(hex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::fixtures;

    fn outline(xml: &str) -> ShapeOutline {
        let props = XmlElement::parse(xml.as_bytes()).unwrap();
        resolve_outline(Some(&props), &fixtures::master_style())
    }

    #[test]
    fn test_outline_weight_and_color() {
        let read = outline(
            r#"<p:spPr><a:ln w="28575"><a:solidFill><a:srgbClr val="C00000"/></a:solidFill></a:ln></p:spPr>"#,
        );
        assert_eq!(read.weight, 2.25);
        assert_eq!(read.color.as_deref(), Some("C00000"));
    }

    #[test]
    fn test_scheme_outline_color() {
        let read = outline(r#"<p:spPr><a:ln><a:solidFill><a:schemeClr val="accent1"/></a:solidFill></a:ln></p:spPr>"#);
        assert_eq!(read.weight, 0.0);
        assert_eq!(read.color.as_deref(), Some("4472C4"));
    }

    #[test]
    fn test_absent_or_hidden_line() {
        assert_eq!(outline(r#"<p:spPr/>"#), ShapeOutline::default());
        assert_eq!(outline(r#"<p:spPr><a:ln w="12700"><a:noFill/></a:ln></p:spPr>"#).color, None);
        assert_eq!(resolve_outline(None, &fixtures::master_style()), ShapeOutline::default());
    }

    #[test]
    fn test_apply_outline() {
        let mut props =
            XmlElement::parse(br#"<p:spPr><a:prstGeom prst="rect"/><a:solidFill/><a:effectLst/></p:spPr>"#).unwrap();
        assert_eq!(apply_outline_weight(&mut props, 0.75).unwrap(), 9_525);
        assert_eq!(apply_outline_color(&mut props, "#1f4e79").unwrap(), "1F4E79");
        assert_eq!(
            props.to_xml(),
            r#"<p:spPr><a:prstGeom prst="rect"/><a:solidFill/><a:ln w="9525"><a:solidFill><a:srgbClr val="1F4E79"/></a:solidFill></a:ln><a:effectLst/></p:spPr>"#
        );
    }

    #[test]
    fn test_apply_outline_rejects_bad_input() {
        let mut props = XmlElement::new("p:spPr");
        assert!(matches!(apply_outline_weight(&mut props, -1.0), Err(OoxmlError::InvalidFormat(_))));
        assert!(matches!(apply_outline_weight(&mut props, f64::NAN), Err(OoxmlError::InvalidFormat(_))));
        assert!(matches!(apply_outline_color(&mut props, "blue"), Err(OoxmlError::InvalidColor(_))));
        assert!(props.first_child("ln").is_none());
    }
}
