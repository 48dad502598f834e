//! DrawingML (DML) helpers shared by the presentation shapes.
//!
//! These functions work on the owned [`XmlElement`](crate::ooxml::element::XmlElement)
//! tree and know only DrawingML structure: where a fill sits inside shape
//! properties, how a blip references its image, where the outline goes,
//! how a transform stores offset and extent.

pub mod blip;
pub mod fill;
pub mod line;
pub mod xfrm;
