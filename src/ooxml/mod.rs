//! Office Open XML (OOXML) object model.
//!
//! The module is organized into a few layers:
//!
//! 1. **XML tree** (`element`): owned element tree used for in-place edits
//! 2. **DrawingML** (`drawings`): fill, blip and transform fragments shared by
//!    every shape kind
//! 3. **PresentationML** (`pptx`): themes, color maps, shapes, fills, text
//!    frames and autofit
//!
//! Package (zip) handling is left to the caller, who passes part bytes in.
pub mod drawings;
pub mod element;
pub mod error;
pub mod pptx;

pub use element::XmlElement;
pub use error::{OoxmlError, Result};
