use crate::ooxml::element::XmlElement;

/// Relationship id of the embedded image under an `a:blipFill` / `p:blipFill`.
pub fn blip_embed(blip_fill: &XmlElement) -> Option<&str> {
    blip_fill.first_child("blip").and_then(|blip| blip.attr("r:embed"))
}

/// Depth-first search for the first `a:blip` that embeds an image.
pub fn find_first_blip_embed(element: &XmlElement) -> Option<&str> {
    if element.local_name() == "blip" {
        if let Some(rid) = element.attr("r:embed") {
            return Some(rid);
        }
    }
    element.elements().find_map(find_first_blip_embed)
}

/// Build `<a:blipFill><a:blip r:embed=".."/><a:stretch><a:fillRect/></a:stretch></a:blipFill>`.
pub fn stretched_blip_fill(rel_id: &str) -> XmlElement {
    XmlElement::new("a:blipFill")
        .with_child(XmlElement::new("a:blip").with_attr("r:embed", rel_id))
        .with_child(XmlElement::new("a:stretch").with_child(XmlElement::new("a:fillRect")))
}
