//! Color tokens and scheme color resolution.
//!
//! DrawingML colors are either literal (`a:srgbClr`, `a:sysClr`) or symbolic
//! (`a:schemeClr`). Symbolic names come in two flavours: the twelve mapped
//! slots a shape normally references (`bg1`, `tx1`, `accent1` ...) and the
//! twelve palette entries a theme actually defines (`dk1`, `lt1`, `accent1` ...).
//! The slide master's color map connects the first set to the second.

use crate::ooxml::element::XmlElement;
use crate::ooxml::pptx::parts::master::ColorMap;
use crate::ooxml::pptx::parts::theme::ThemePalette;
use phf::phf_map;
use tracing::debug;

/// A mapped scheme slot, as referenced from shapes and remapped by `p:clrMap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SchemeSlot {
    Background1,
    Text1,
    Background2,
    Text2,
    Accent1,
    Accent2,
    Accent3,
    Accent4,
    Accent5,
    Accent6,
    Hyperlink,
    FollowedHyperlink,
}

/// A palette entry defined by the theme's `a:clrScheme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PaletteSlot {
    Dark1,
    Light1,
    Dark2,
    Light2,
    Accent1,
    Accent2,
    Accent3,
    Accent4,
    Accent5,
    Accent6,
    Hyperlink,
    FollowedHyperlink,
}

static SCHEME_SLOTS: phf::Map<&'static str, SchemeSlot> = phf_map! {
    "bg1" => SchemeSlot::Background1,
    "tx1" => SchemeSlot::Text1,
    "bg2" => SchemeSlot::Background2,
    "tx2" => SchemeSlot::Text2,
    "accent1" => SchemeSlot::Accent1,
    "accent2" => SchemeSlot::Accent2,
    "accent3" => SchemeSlot::Accent3,
    "accent4" => SchemeSlot::Accent4,
    "accent5" => SchemeSlot::Accent5,
    "accent6" => SchemeSlot::Accent6,
    "hlink" => SchemeSlot::Hyperlink,
    "folHlink" => SchemeSlot::FollowedHyperlink,
};

static PALETTE_SLOTS: phf::Map<&'static str, PaletteSlot> = phf_map! {
    "dk1" => PaletteSlot::Dark1,
    "lt1" => PaletteSlot::Light1,
    "dk2" => PaletteSlot::Dark2,
    "lt2" => PaletteSlot::Light2,
    "accent1" => PaletteSlot::Accent1,
    "accent2" => PaletteSlot::Accent2,
    "accent3" => PaletteSlot::Accent3,
    "accent4" => PaletteSlot::Accent4,
    "accent5" => PaletteSlot::Accent5,
    "accent6" => PaletteSlot::Accent6,
    "hlink" => PaletteSlot::Hyperlink,
    "folHlink" => PaletteSlot::FollowedHyperlink,
};

impl SchemeSlot {
    pub const ALL: [SchemeSlot; 12] = [
        SchemeSlot::Background1,
        SchemeSlot::Text1,
        SchemeSlot::Background2,
        SchemeSlot::Text2,
        SchemeSlot::Accent1,
        SchemeSlot::Accent2,
        SchemeSlot::Accent3,
        SchemeSlot::Accent4,
        SchemeSlot::Accent5,
        SchemeSlot::Accent6,
        SchemeSlot::Hyperlink,
        SchemeSlot::FollowedHyperlink,
    ];

    /// Parse the XML token (`bg1`, `accent3`, `folHlink` ...).
    pub fn from_name(name: &str) -> Option<Self> {
        SCHEME_SLOTS.get(name).copied()
    }

    /// XML token for this slot.
    pub fn as_str(self) -> &'static str {
        match self {
            SchemeSlot::Background1 => "bg1",
            SchemeSlot::Text1 => "tx1",
            SchemeSlot::Background2 => "bg2",
            SchemeSlot::Text2 => "tx2",
            SchemeSlot::Accent1 => "accent1",
            SchemeSlot::Accent2 => "accent2",
            SchemeSlot::Accent3 => "accent3",
            SchemeSlot::Accent4 => "accent4",
            SchemeSlot::Accent5 => "accent5",
            SchemeSlot::Accent6 => "accent6",
            SchemeSlot::Hyperlink => "hlink",
            SchemeSlot::FollowedHyperlink => "folHlink",
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl PaletteSlot {
    pub const ALL: [PaletteSlot; 12] = [
        PaletteSlot::Dark1,
        PaletteSlot::Light1,
        PaletteSlot::Dark2,
        PaletteSlot::Light2,
        PaletteSlot::Accent1,
        PaletteSlot::Accent2,
        PaletteSlot::Accent3,
        PaletteSlot::Accent4,
        PaletteSlot::Accent5,
        PaletteSlot::Accent6,
        PaletteSlot::Hyperlink,
        PaletteSlot::FollowedHyperlink,
    ];

    /// Parse a palette element name (`dk1`, `lt2`, `accent1` ...).
    pub fn from_name(name: &str) -> Option<Self> {
        PALETTE_SLOTS.get(name).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaletteSlot::Dark1 => "dk1",
            PaletteSlot::Light1 => "lt1",
            PaletteSlot::Dark2 => "dk2",
            PaletteSlot::Light2 => "lt2",
            PaletteSlot::Accent1 => "accent1",
            PaletteSlot::Accent2 => "accent2",
            PaletteSlot::Accent3 => "accent3",
            PaletteSlot::Accent4 => "accent4",
            PaletteSlot::Accent5 => "accent5",
            PaletteSlot::Accent6 => "accent6",
            PaletteSlot::Hyperlink => "hlink",
            PaletteSlot::FollowedHyperlink => "folHlink",
        }
    }
}

/// A reference to a color as written in shape properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorToken {
    /// Literal `RRGGBB` value (from `a:srgbClr`, or the `lastClr` of `a:sysClr`),
    /// kept exactly as written.
    Rgb(String),
    /// A mapped scheme slot that goes through the master's color map.
    Scheme(SchemeSlot),
    /// A palette entry referenced directly (`<a:schemeClr val="dk2"/>`).
    Palette(PaletteSlot),
}

impl ColorToken {
    /// Read the token from a color element (`a:srgbClr`, `a:schemeClr`, `a:sysClr`).
    ///
    /// Returns `None` for color kinds that carry no resolvable value, such as
    /// `a:prstClr` or the `phClr` placeholder used inside style matrices.
    pub fn from_color_element(color: &XmlElement) -> Option<Self> {
        match color.local_name() {
            "srgbClr" => color.attr("val").map(|v| ColorToken::Rgb(v.to_string())),
            "sysClr" => color.attr("lastClr").map(|v| ColorToken::Rgb(v.to_string())),
            "schemeClr" => {
                let val = color.attr("val")?;
                SchemeSlot::from_name(val)
                    .map(ColorToken::Scheme)
                    .or_else(|| PaletteSlot::from_name(val).map(ColorToken::Palette))
            },
            _ => None,
        }
    }

    /// The token as it appears in XML.
    pub fn name(&self) -> &str {
        match self {
            ColorToken::Rgb(hex) => hex,
            ColorToken::Scheme(slot) => slot.as_str(),
            ColorToken::Palette(slot) => slot.as_str(),
        }
    }
}

/// Resolve a color token to a literal hex value.
///
/// Symbolic tokens are first looked up in the palette under their own name.
/// When that yields nothing, the token is looked up in the color map and the
/// mapped palette slot is tried instead. `None` means "no resolvable color",
/// which callers treat as a valid state.
pub fn resolve_scheme_token(
    token: &ColorToken,
    color_map: &ColorMap,
    palette: &ThemePalette,
) -> Option<String> {
    let slot = match token {
        ColorToken::Rgb(hex) => return Some(hex.clone()),
        ColorToken::Palette(slot) => return palette.literal(*slot).map(str::to_owned),
        ColorToken::Scheme(slot) => *slot,
    };

    if let Some(hex) = palette.literal_by_name(slot.as_str()) {
        return Some(hex.to_owned());
    }

    let Some(target) = color_map.target(slot) else {
        debug!(slot = slot.as_str(), "scheme slot missing from color map");
        return None;
    };

    let resolved = palette.literal(target).map(str::to_owned);
    debug!(
        slot = slot.as_str(),
        target = target.as_str(),
        resolved = ?resolved,
        "scheme color resolved through color map"
    );
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::parts::theme::ThemeColor;

    fn palette() -> ThemePalette {
        ThemePalette::new(vec![
            ThemeColor::system(PaletteSlot::Dark1, "windowText", Some("000000")),
            ThemeColor::system(PaletteSlot::Light1, "window", Some("FFFFFF")),
            ThemeColor::rgb(PaletteSlot::Dark2, "44546A"),
            ThemeColor::rgb(PaletteSlot::Accent1, "4472C4"),
            ThemeColor::system(PaletteSlot::Light2, "btnFace", None),
        ])
    }

    #[test]
    fn test_slot_names_round_trip() {
        for slot in SchemeSlot::ALL {
            assert_eq!(SchemeSlot::from_name(slot.as_str()), Some(slot));
        }
        for slot in PaletteSlot::ALL {
            assert_eq!(PaletteSlot::from_name(slot.as_str()), Some(slot));
        }
        assert_eq!(SchemeSlot::from_name("dk1"), None);
        assert_eq!(PaletteSlot::from_name("bg1"), None);
    }

    #[test]
    fn test_token_from_elements() {
        let rgb = XmlElement::new("a:srgbClr").with_attr("val", "ff00aa");
        assert_eq!(ColorToken::from_color_element(&rgb), Some(ColorToken::Rgb("ff00aa".into())));

        let scheme = XmlElement::new("a:schemeClr").with_attr("val", "tx1");
        assert_eq!(
            ColorToken::from_color_element(&scheme),
            Some(ColorToken::Scheme(SchemeSlot::Text1))
        );

        let direct = XmlElement::new("a:schemeClr").with_attr("val", "dk2");
        assert_eq!(
            ColorToken::from_color_element(&direct),
            Some(ColorToken::Palette(PaletteSlot::Dark2))
        );

        let placeholder = XmlElement::new("a:schemeClr").with_attr("val", "phClr");
        assert_eq!(ColorToken::from_color_element(&placeholder), None);

        let sys = XmlElement::new("a:sysClr")
            .with_attr("val", "windowText")
            .with_attr("lastClr", "000000");
        assert_eq!(ColorToken::from_color_element(&sys), Some(ColorToken::Rgb("000000".into())));
    }

    #[test]
    fn test_direct_lookup_wins() {
        let map = ColorMap::office_default().with_target(SchemeSlot::Accent1, PaletteSlot::Dark2);
        let token = ColorToken::Scheme(SchemeSlot::Accent1);
        // accent1 exists in the palette, so the map is not consulted.
        assert_eq!(resolve_scheme_token(&token, &map, &palette()).as_deref(), Some("4472C4"));
    }

    #[test]
    fn test_mapped_slot_resolves_through_color_map() {
        let map = ColorMap::office_default();
        let bg1 = ColorToken::Scheme(SchemeSlot::Background1);
        let tx2 = ColorToken::Scheme(SchemeSlot::Text2);
        assert_eq!(resolve_scheme_token(&bg1, &map, &palette()).as_deref(), Some("FFFFFF"));
        assert_eq!(resolve_scheme_token(&tx2, &map, &palette()).as_deref(), Some("44546A"));
    }

    #[test]
    fn test_redirected_slot_uses_target_value() {
        // accent2 is absent from the palette; the map sends it to dk2.
        let map = ColorMap::office_default().with_target(SchemeSlot::Accent2, PaletteSlot::Dark2);
        let token = ColorToken::Scheme(SchemeSlot::Accent2);
        assert_eq!(resolve_scheme_token(&token, &map, &palette()).as_deref(), Some("44546A"));
    }

    #[test]
    fn test_unresolvable_tokens_yield_none() {
        let map = ColorMap::office_default();
        // bg2 maps to lt2, which is a system color without a lastClr.
        let bg2 = ColorToken::Scheme(SchemeSlot::Background2);
        assert_eq!(resolve_scheme_token(&bg2, &map, &palette()), None);

        let empty_map = ColorMap::empty();
        let hlink = ColorToken::Scheme(SchemeSlot::Hyperlink);
        assert_eq!(resolve_scheme_token(&hlink, &empty_map, &palette()), None);
    }

    #[test]
    fn test_literal_and_palette_tokens() {
        let map = ColorMap::empty();
        let rgb = ColorToken::Rgb("123456".into());
        assert_eq!(resolve_scheme_token(&rgb, &map, &palette()).as_deref(), Some("123456"));

        let dk1 = ColorToken::Palette(PaletteSlot::Dark1);
        assert_eq!(resolve_scheme_token(&dk1, &map, &palette()).as_deref(), Some("000000"));
    }
}
