//! Style primitives shared across the object model.
mod color;

pub use color::RGBColor;
