use crate::ooxml::element::XmlElement;

/// Local names of the `EG_FillProperties` choice group.
pub const FILL_ELEMENTS: [&str; 6] = ["noFill", "solidFill", "gradFill", "blipFill", "pattFill", "grpFill"];

/// Elements that precede the fill choice inside shape properties.
pub(crate) const GEOMETRY_ELEMENTS: [&str; 3] = ["xfrm", "custGeom", "prstGeom"];

#[inline]
pub fn is_fill_element(element: &XmlElement) -> bool {
    FILL_ELEMENTS.contains(&element.local_name())
}

/// `<a:solidFill><a:srgbClr val=".."/></a:solidFill>`
pub fn solid_fill(hex: &str) -> XmlElement {
    XmlElement::new("a:solidFill").with_child(XmlElement::new("a:srgbClr").with_attr("val", hex))
}

/// Replace whatever fill `properties` holds with `fill`.
///
/// The new node goes directly after the transform and geometry so the
/// properties keep schema order. Returns the number of fill nodes removed.
pub fn replace_fill(properties: &mut XmlElement, fill: XmlElement) -> usize {
    let removed = properties.remove_children(is_fill_element);
    let at = GEOMETRY_ELEMENTS
        .iter()
        .filter_map(|local| properties.last_position_of(local))
        .max()
        .map_or(0, |i| i + 1);
    properties.insert_child(at, fill);
    removed
}
