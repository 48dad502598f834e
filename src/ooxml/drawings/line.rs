use crate::ooxml::drawings::fill::{FILL_ELEMENTS, GEOMETRY_ELEMENTS, is_fill_element};
use crate::ooxml::element::XmlElement;

/// The `a:ln` of shape properties, inserted after the geometry and fill when missing.
pub fn ensure_line(properties: &mut XmlElement) -> Option<&mut XmlElement> {
    if properties.first_child("ln").is_none() {
        let at = GEOMETRY_ELEMENTS
            .iter()
            .chain(FILL_ELEMENTS.iter())
            .filter_map(|local| properties.last_position_of(local))
            .max()
            .map_or(0, |i| i + 1);
        properties.insert_child(at, XmlElement::new("a:ln"));
    }
    properties.first_child_mut("ln")
}

/// Replace the fill of a line. The fill leads `a:ln`, ahead of dash and join
/// settings. Returns the number of fill nodes removed.
pub fn replace_line_fill(line: &mut XmlElement, fill: XmlElement) -> usize {
    let removed = line.remove_children(is_fill_element);
    line.insert_child(0, fill);
    removed
}
