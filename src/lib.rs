//! Slidekit - shape fill resolution and text autofit for PowerPoint documents
//!
//! This library models the shapes of PresentationML parts (.pptx slides,
//! layouts and masters) and edits their XML in place.
//!
//! # Features
//!
//! - **Fill resolution**: solid, gradient, picture, pattern and slide background
//!   fills, with scheme colors resolved through the master's color map and theme
//! - **Fill editing**: replace a shape fill with a literal color or a picture
//! - **Placeholder inheritance**: font data cascades from slide to layout to master
//! - **Autofit**: "resize shape to fit text" recomputed from measured text
//! - **Pluggable services**: text measurement and image storage are traits
//!
//! # Example
//!
//! ```rust,ignore
//! use slidekit::ooxml::pptx::{AutoShape, MasterStyle, PartContext, PartOwner};
//! use std::rc::Rc;
//!
//! let style = Rc::new(MasterStyle::from_parts(master_xml, Some(theme_xml))?);
//! let shape = AutoShape::parse(sp_xml, PartContext::headless(PartOwner::Slide(style)))?;
//!
//! shape.set_fill_color("1F4E79")?;
//! shape.set_text("Revenue by region")?;
//! println!("{} x {} px", shape.width(), shape.height());
//! ```

/// Shared utilities: units, memoization cells, colors and XML escaping
pub mod common;

/// OOXML object model: XML tree, DrawingML fragments and PresentationML shapes
pub mod ooxml;

pub use ooxml::error::{OoxmlError, Result};
pub use ooxml::pptx::{AutoShape, FillSpec, FillType, LayoutOptions, MasterStyle, PartContext, ShapeTree};
