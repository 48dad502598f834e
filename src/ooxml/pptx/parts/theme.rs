/// Theme parts for PowerPoint presentations.
///
/// This module reads the color scheme and font scheme of `/ppt/theme/themeN.xml`.
/// The theme is immutable once parsed and is shared by every shape below the
/// slide master that owns it.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::color::PaletteSlot;
use quick_xml::Reader;
use quick_xml::events::Event;

/// A palette entry of the theme color scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeColor {
    /// Palette slot (`dk1`, `lt1`, `accent1` ...)
    pub slot: PaletteSlot,
    /// RGB color value if available (format: "RRGGBB")
    pub rgb: Option<String>,
    /// System color name if the entry is an `a:sysClr`
    pub system_color: Option<String>,
    /// Last rendered value of the system color, if recorded
    pub last_color: Option<String>,
}

impl ThemeColor {
    pub fn rgb(slot: PaletteSlot, hex: impl Into<String>) -> Self {
        Self {
            slot,
            rgb: Some(hex.into()),
            system_color: None,
            last_color: None,
        }
    }

    pub fn system(slot: PaletteSlot, name: impl Into<String>, last: Option<&str>) -> Self {
        Self {
            slot,
            rgb: None,
            system_color: Some(name.into()),
            last_color: last.map(str::to_owned),
        }
    }

    /// The literal hex value: the RGB value, or the system color's `lastClr`.
    pub fn literal(&self) -> Option<&str> {
        self.rgb.as_deref().or(self.last_color.as_deref())
    }
}

/// The twelve named colors of a theme.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemePalette {
    colors: Vec<ThemeColor>,
}

impl ThemePalette {
    pub fn new(colors: Vec<ThemeColor>) -> Self {
        Self { colors }
    }

    #[inline]
    pub fn colors(&self) -> &[ThemeColor] {
        &self.colors
    }

    pub fn get(&self, slot: PaletteSlot) -> Option<&ThemeColor> {
        self.colors.iter().find(|c| c.slot == slot)
    }

    /// Literal value of a palette slot.
    pub fn literal(&self, slot: PaletteSlot) -> Option<&str> {
        self.get(slot).and_then(ThemeColor::literal)
    }

    /// Literal value looked up by element name; names outside the palette yield `None`.
    pub fn literal_by_name(&self, name: &str) -> Option<&str> {
        PaletteSlot::from_name(name).and_then(|slot| self.literal(slot))
    }
}

/// Font information from a theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeFont {
    /// Font typeface name
    pub typeface: String,
}

/// Theme information extracted from a theme part.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    /// Theme name
    pub name: String,
    /// Major (heading) font
    pub major_font: Option<ThemeFont>,
    /// Minor (body) font
    pub minor_font: Option<ThemeFont>,
    /// Color scheme colors
    pub palette: ThemePalette,
}

impl Theme {
    /// Parse a theme part.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let theme = Theme::parse(theme_part.blob())?;
    /// println!("Theme name: {}", theme.name);
    /// ```
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut theme_name = String::new();
        let mut major_font: Option<ThemeFont> = None;
        let mut minor_font: Option<ThemeFont> = None;
        let mut colors = Vec::new();

        let mut in_major_font = false;
        let mut in_minor_font = false;
        let mut in_color_scheme = false;
        let mut current_slot: Option<PaletteSlot> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    let tag_name = e.local_name();
                    let tag = std::str::from_utf8(tag_name.as_ref())?;

                    match tag {
                        "theme" => {
                            for attr in e.attributes().flatten() {
                                if attr.key.as_ref() == b"name" {
                                    theme_name = std::str::from_utf8(&attr.value)?.to_string();
                                }
                            }
                        },
                        "clrScheme" => in_color_scheme = true,
                        "majorFont" => in_major_font = true,
                        "minorFont" => in_minor_font = true,
                        "latin" if in_major_font || in_minor_font => {
                            for attr in e.attributes().flatten() {
                                if attr.key.as_ref() == b"typeface" {
                                    let font = ThemeFont {
                                        typeface: std::str::from_utf8(&attr.value)?.to_string(),
                                    };
                                    if in_major_font {
                                        major_font = Some(font);
                                    } else {
                                        minor_font = Some(font);
                                    }
                                }
                            }
                        },
                        "srgbClr" if in_color_scheme => {
                            if let Some(slot) = current_slot.take() {
                                let mut rgb = None;
                                for attr in e.attributes().flatten() {
                                    if attr.key.as_ref() == b"val" {
                                        rgb = Some(std::str::from_utf8(&attr.value)?.to_string());
                                    }
                                }
                                colors.push(ThemeColor {
                                    slot,
                                    rgb,
                                    system_color: None,
                                    last_color: None,
                                });
                            }
                        },
                        "sysClr" if in_color_scheme => {
                            if let Some(slot) = current_slot.take() {
                                let mut color = ThemeColor {
                                    slot,
                                    rgb: None,
                                    system_color: None,
                                    last_color: None,
                                };
                                for attr in e.attributes().flatten() {
                                    let value = std::str::from_utf8(&attr.value)?.to_string();
                                    match attr.key.as_ref() {
                                        b"val" => color.system_color = Some(value),
                                        b"lastClr" => color.last_color = Some(value),
                                        _ => {},
                                    }
                                }
                                colors.push(color);
                            }
                        },
                        _ if in_color_scheme => {
                            if let Some(slot) = PaletteSlot::from_name(tag) {
                                current_slot = Some(slot);
                            }
                        },
                        _ => {},
                    }
                },
                Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                    b"clrScheme" => in_color_scheme = false,
                    b"majorFont" => in_major_font = false,
                    b"minorFont" => in_minor_font = false,
                    _ => {},
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        Ok(Theme {
            name: theme_name,
            major_font,
            minor_font,
            palette: ThemePalette::new(colors),
        })
    }

    #[inline]
    pub fn palette(&self) -> &ThemePalette {
        &self.palette
    }

    /// Resolve theme font references (`+mn-lt`, `+mj-lt`) to a typeface.
    ///
    /// Any other name is returned unchanged.
    pub fn resolve_typeface<'a>(&'a self, typeface: &'a str) -> Option<&'a str> {
        match typeface {
            "+mn-lt" | "+mn-ea" | "+mn-cs" => self.minor_font.as_ref().map(|f| f.typeface.as_str()),
            "+mj-lt" | "+mj-ea" | "+mj-cs" => self.major_font.as_ref().map(|f| f.typeface.as_str()),
            other => Some(other),
        }
    }
}
