//! Common types and utilities shared across the object model.
//!
//! Unit conversion, memoization cells, style primitives and XML text helpers
//! live here so the `ooxml` layer can stay focused on PresentationML semantics.

pub mod cache;
pub mod style;
pub mod unit;
pub mod xml;

pub use cache::ResetCell;
pub use style::RGBColor;
