/// Shapes module for PowerPoint presentations.
///
/// This module provides types for working with shapes on slides, layouts and
/// masters:
/// - Auto shapes with fills, outlines, text frames and autofit
/// - Pictures (images)
/// - Groups, connectors and graphic frames
/// - Placeholders and their inheritance links
pub mod autofit;
pub mod autoshape;
pub mod base;
pub mod fill;
pub mod font;
pub mod outline;
pub mod picture;
pub mod textframe;
pub mod tree;

pub use autoshape::AutoShape;
pub use base::{BaseShape, Placeholder, PlaceholderKind, ShapeGeometry, ShapeType};
pub use fill::{FillSpec, FillType, SolidFill};
pub use font::{FontData, LevelTable};
pub use outline::ShapeOutline;
pub use picture::PictureShape;
pub use textframe::{AutofitType, Margins, Paragraph, TextFrame, TextRun};
pub use tree::{GroupShape, Shape, ShapeTree};
