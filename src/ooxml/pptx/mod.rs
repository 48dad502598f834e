//! PowerPoint (.pptx) shape styling and text layout.
//!
//! Shapes are loaded from the `p:spTree` of a slide, layout or master part and
//! keep their XML so edits are written back in place. Each part hands its
//! shapes a [`PartContext`]: the master's color map and theme, the image
//! registrar of the part, the text measurer used by autofit and the layout
//! options.
//!
//! # Example
//!
//! ```rust,ignore
//! use slidekit::ooxml::pptx::{MasterStyle, PartContext, PartOwner, ShapeTree};
//! use std::rc::Rc;
//!
//! let style = Rc::new(MasterStyle::from_parts(master_xml, Some(theme_xml))?);
//! let layout = ShapeTree::parse_part(layout_xml, &PartContext::headless(PartOwner::Layout(style.clone())))?;
//! let slide = ShapeTree::parse_part(slide_xml, &PartContext::headless(PartOwner::Slide(style)))?;
//! slide.link_placeholders(&layout);
//!
//! for shape in slide.auto_shapes() {
//!     println!("{}: {:?}", shape.name(), shape.fill().fill_type());
//! }
//! ```
pub mod color;
pub mod context;
pub mod format;
pub mod measure;
pub mod media;
pub mod options;
pub mod parts;
pub mod shapes;

#[cfg(test)]
pub(crate) mod fixtures;

pub use color::{ColorToken, PaletteSlot, SchemeSlot, resolve_scheme_token};
pub use context::PartContext;
pub use format::ImageFormat;
pub use measure::{FixedAdvanceMeasurer, MeasureDpi, TextMeasurer, TextMetrics};
pub use media::{ImageHandle, ImageRegistrar, MediaStore, SharedImages};
pub use options::LayoutOptions;
pub use parts::{ColorMap, MasterStyle, PartOwner, Theme};
pub use shapes::{AutoShape, FillSpec, FillType, Shape, ShapeTree};
