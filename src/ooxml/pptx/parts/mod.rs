/// Parts for PowerPoint presentation documents.
///
/// Only the parts that feed shape styling are modelled: the theme (palette and
/// fonts) and the slide master's color map. Both are folded into a shared
/// [`MasterStyle`] that every slide, layout and master shape can reach through
/// its [`PartOwner`].
pub mod master;
pub mod theme;

use std::rc::Rc;

pub use master::{ColorMap, MasterStyle};
pub use theme::{Theme, ThemeColor, ThemeFont, ThemePalette};

/// The kind of part a shape tree belongs to.
///
/// Each variant carries the master style resolved once when the part was
/// opened, so lookups never walk relationships at shape level.
#[derive(Debug, Clone)]
pub enum PartOwner {
    Slide(Rc<MasterStyle>),
    Layout(Rc<MasterStyle>),
    Master(Rc<MasterStyle>),
}

impl PartOwner {
    #[inline]
    pub fn master_style(&self) -> &Rc<MasterStyle> {
        match self {
            PartOwner::Slide(style) | PartOwner::Layout(style) | PartOwner::Master(style) => style,
        }
    }

    /// Short name used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            PartOwner::Slide(_) => "slide",
            PartOwner::Layout(_) => "layout",
            PartOwner::Master(_) => "master",
        }
    }
}
