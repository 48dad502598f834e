/// Slide master color map and the style shared below a master.
use crate::ooxml::element::XmlElement;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::color::{ColorToken, PaletteSlot, SchemeSlot, resolve_scheme_token};
use crate::ooxml::pptx::parts::theme::Theme;
use quick_xml::Reader;
use quick_xml::events::Event;

/// The `p:clrMap` indirection table of a slide master.
///
/// Every scheme slot maps to at most one palette slot. The table is immutable
/// once built and is shared through [`MasterStyle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorMap {
    targets: [Option<PaletteSlot>; 12],
}

impl ColorMap {
    /// A color map with no entries.
    pub const fn empty() -> Self {
        Self { targets: [None; 12] }
    }

    /// The mapping PowerPoint writes for a new presentation.
    pub fn office_default() -> Self {
        let mut map = Self::empty();
        for scheme in SchemeSlot::ALL {
            map.targets[scheme.index()] = match scheme {
                SchemeSlot::Background1 => Some(PaletteSlot::Light1),
                SchemeSlot::Text1 => Some(PaletteSlot::Dark1),
                SchemeSlot::Background2 => Some(PaletteSlot::Light2),
                SchemeSlot::Text2 => Some(PaletteSlot::Dark2),
                // accents and hyperlinks share their names with the palette
                other => PaletteSlot::from_name(other.as_str()),
            };
        }
        map
    }

    /// Return a copy with `slot` redirected to `target`.
    pub fn with_target(mut self, slot: SchemeSlot, target: PaletteSlot) -> Self {
        self.targets[slot.index()] = Some(target);
        self
    }

    /// Palette slot a scheme slot is mapped to.
    #[inline]
    pub fn target(&self, slot: SchemeSlot) -> Option<PaletteSlot> {
        self.targets[slot.index()]
    }

    /// Build the map from a `p:clrMap` element.
    ///
    /// Attributes naming unknown slots or unknown palette entries are skipped.
    pub fn from_element(element: &XmlElement) -> Self {
        let mut map = Self::empty();
        for (key, value) in element.attributes() {
            if let (Some(slot), Some(target)) =
                (SchemeSlot::from_name(key), PaletteSlot::from_name(value))
            {
                map.targets[slot.index()] = Some(target);
            }
        }
        map
    }

    /// Find and read the `p:clrMap` element of a slide master part.
    pub fn parse(master_xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(master_xml);
        reader.config_mut().trim_text(true);
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    if e.local_name().as_ref() == b"clrMap" {
                        let mut map = Self::empty();
                        for attr in e.attributes() {
                            let attr = attr?;
                            let key = std::str::from_utf8(attr.key.local_name().into_inner())?;
                            let value = std::str::from_utf8(&attr.value)?;
                            if let (Some(slot), Some(target)) =
                                (SchemeSlot::from_name(key), PaletteSlot::from_name(value))
                            {
                                map.targets[slot.index()] = Some(target);
                            }
                        }
                        return Ok(map);
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        Err(OoxmlError::InvalidFormat(
            "slide master has no p:clrMap element".to_string(),
        ))
    }
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::office_default()
    }
}

/// Color map and theme of one slide master.
///
/// Built once per master and shared by `Rc` with every layout, slide and
/// shape below it.
#[derive(Debug, Clone)]
pub struct MasterStyle {
    color_map: ColorMap,
    theme: Theme,
}

impl MasterStyle {
    pub fn new(color_map: ColorMap, theme: Theme) -> Self {
        Self { color_map, theme }
    }

    /// Build the style from the master part and its related theme part.
    ///
    /// A master without a theme relationship cannot resolve colors, so a missing
    /// theme is reported as [`OoxmlError::PartNotFound`].
    pub fn from_parts(master_xml: &[u8], theme_xml: Option<&[u8]>) -> Result<Self> {
        let theme_xml = theme_xml
            .ok_or_else(|| OoxmlError::PartNotFound("theme part of slide master".to_string()))?;
        let color_map = ColorMap::parse(master_xml)?;
        let theme = Theme::parse(theme_xml)?;
        Ok(Self::new(color_map, theme))
    }

    #[inline]
    pub fn color_map(&self) -> &ColorMap {
        &self.color_map
    }

    #[inline]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Resolve a color token against this master's map and theme palette.
    pub fn resolve_color(&self, token: &ColorToken) -> Option<String> {
        resolve_scheme_token(token, &self.color_map, self.theme.palette())
    }
}
