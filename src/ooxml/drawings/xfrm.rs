use crate::ooxml::element::XmlElement;

/// Offset and extent of an `a:xfrm` (or `p:xfrm`), in EMU.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Xfrm {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

impl Xfrm {
    /// Read `a:off` and `a:ext`; missing attributes read as zero.
    pub fn from_element(xfrm: &XmlElement) -> Self {
        let off = xfrm.first_child("off");
        let ext = xfrm.first_child("ext");
        let read = |e: Option<&XmlElement>, key: &str| e.and_then(|e| e.attr_i64(key)).unwrap_or(0);
        Self {
            x: read(off, "x"),
            y: read(off, "y"),
            cx: read(ext, "cx"),
            cy: read(ext, "cy"),
        }
    }

    /// Build a new `a:xfrm` element.
    pub fn to_element(&self) -> XmlElement {
        let mut xfrm = XmlElement::new("a:xfrm");
        xfrm.push_child(XmlElement::new("a:off"));
        xfrm.push_child(XmlElement::new("a:ext"));
        self.write_to(&mut xfrm);
        xfrm
    }

    /// Write the values into an existing transform, creating `a:off` / `a:ext` if needed.
    pub fn write_to(&self, xfrm: &mut XmlElement) {
        // `p:xfrm` of a graphic frame also holds DrawingML children.
        if xfrm.first_child("off").is_none() {
            xfrm.insert_child(0, XmlElement::new("a:off"));
        }
        if xfrm.first_child("ext").is_none() {
            let at = xfrm.position_of("off").map_or(0, |i| i + 1);
            xfrm.insert_child(at, XmlElement::new("a:ext"));
        }
        if let Some(off) = xfrm.first_child_mut("off") {
            off.set_attr_i64("x", self.x);
            off.set_attr_i64("y", self.y);
        }
        if let Some(ext) = xfrm.first_child_mut("ext") {
            ext.set_attr_i64("cx", self.cx);
            ext.set_attr_i64("cy", self.cy);
        }
    }
}
