//! Owned XML element tree for in-place editing of part fragments.
//!
//! Reading code elsewhere streams XML with `quick_xml::Reader` directly. Shape
//! XML needs to be mutated (fill nodes swapped, geometry rewritten, paragraphs
//! added), so shapes keep their subtree as an [`XmlElement`] and serialize it
//! back with [`XmlElement::to_xml`].
//!
//! Names are kept qualified (`a:solidFill`); lookups go by local name so the
//! tree does not care which prefix a producer bound to DrawingML.

use crate::common::xml::{escape_attr, escape_text, resolve_entity};
use crate::ooxml::error::{OoxmlError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// A child of an element: either a nested element or character data.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An XML element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

#[inline]
fn local_part(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

impl XmlElement {
    /// Create an empty element with a qualified name such as `a:srgbClr`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder: add an attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Builder: append a child element.
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    /// Builder: append character data.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    /// Qualified name, including any prefix.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name without its namespace prefix.
    #[inline]
    pub fn local_name(&self) -> &str {
        local_part(&self.name)
    }

    /// The namespace prefix, if the name has one.
    pub fn prefix(&self) -> Option<&str> {
        self.name.rsplit_once(':').map(|(prefix, _)| prefix)
    }

    /// All attributes in document order.
    #[inline]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Attribute value by qualified key or by local name (`embed` finds `r:embed`).
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .or_else(|| self.attributes.iter().find(|(k, _)| local_part(k) == key))
            .map(|(_, v)| v.as_str())
    }

    pub fn attr_i64(&self, key: &str) -> Option<i64> {
        self.attr(key).and_then(|v| v.trim().parse().ok())
    }

    pub fn attr_f64(&self, key: &str) -> Option<f64> {
        self.attr(key).and_then(|v| v.trim().parse().ok())
    }

    /// Boolean attribute in the `xsd:boolean` lexical space.
    pub fn attr_bool(&self, key: &str) -> Option<bool> {
        self.attr(key).and_then(|v| match v {
            "1" | "true" => Some(true),
            "0" | "false" => Some(false),
            _ => None,
        })
    }

    /// Set an attribute, replacing an existing one with the same qualified key.
    pub fn set_attr(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((key.to_string(), value)),
        }
    }

    /// Set an integer attribute without going through `format!`.
    pub fn set_attr_i64(&mut self, key: &str, value: i64) {
        let mut buf = itoa::Buffer::new();
        self.set_attr(key, buf.format(value));
    }

    /// Remove an attribute by qualified key or local name.
    pub fn remove_attr(&mut self, key: &str) -> Option<String> {
        let index = self
            .attributes
            .iter()
            .position(|(k, _)| k == key || local_part(k) == key)?;
        Some(self.attributes.remove(index).1)
    }

    /// Raw child nodes.
    #[inline]
    pub fn nodes(&self) -> &[XmlNode] {
        &self.children
    }

    /// Child elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut XmlElement> {
        self.children.iter_mut().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    /// Child elements with the given local name.
    pub fn children_named<'a>(&'a self, local: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.elements().filter(move |e| e.local_name() == local)
    }

    /// First child element with the given local name.
    pub fn first_child(&self, local: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.local_name() == local)
    }

    pub fn first_child_mut(&mut self, local: &str) -> Option<&mut XmlElement> {
        self.elements_mut().find(|e| e.local_name() == local)
    }

    /// Follow a path of local names through first children.
    pub fn child_path(&self, path: &[&str]) -> Option<&XmlElement> {
        path.iter()
            .try_fold(self, |element, local| element.first_child(local))
    }

    /// Depth-first search for the first descendant (or self) with the given local name.
    pub fn find_descendant(&self, local: &str) -> Option<&XmlElement> {
        if self.local_name() == local {
            return Some(self);
        }
        self.elements().find_map(|e| e.find_descendant(local))
    }

    /// Index in the raw node list of the first child element with the given local name.
    pub fn position_of(&self, local: &str) -> Option<usize> {
        self.children
            .iter()
            .position(|node| matches!(node, XmlNode::Element(e) if e.local_name() == local))
    }

    /// Index in the raw node list of the last child element with the given local name.
    pub fn last_position_of(&self, local: &str) -> Option<usize> {
        self.children
            .iter()
            .rposition(|node| matches!(node, XmlNode::Element(e) if e.local_name() == local))
    }

    pub fn children_named_mut<'a>(
        &'a mut self,
        local: &'a str,
    ) -> impl Iterator<Item = &'a mut XmlElement> {
        self.elements_mut().filter(move |e| e.local_name() == local)
    }

    /// Insert a child element at a raw node index (clamped to the end).
    pub fn insert_child(&mut self, index: usize, child: XmlElement) {
        let index = index.min(self.children.len());
        self.children.insert(index, XmlNode::Element(child));
    }

    pub fn push_child(&mut self, child: XmlElement) {
        self.children.push(XmlNode::Element(child));
    }

    /// Remove every child element matching `pred`; returns how many were removed.
    pub fn remove_children(&mut self, mut pred: impl FnMut(&XmlElement) -> bool) -> usize {
        let before = self.children.len();
        self.children
            .retain(|node| !matches!(node, XmlNode::Element(e) if pred(e)));
        before - self.children.len()
    }

    pub(crate) fn push_node(&mut self, node: XmlNode) {
        self.children.push(node);
    }

    /// Take all child nodes out of this element.
    pub(crate) fn take_nodes(&mut self) -> Vec<XmlNode> {
        std::mem::take(&mut self.children)
    }

    /// Concatenated character data of direct text children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(t) => Some(t.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }

    /// Replace all direct text children with a single text node.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children.retain(|node| matches!(node, XmlNode::Element(_)));
        self.children.push(XmlNode::Text(text.into()));
    }

    /// Parse a document or fragment; the first root element is returned.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        let mut buf = Vec::new();
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => stack.push(Self::from_start(e)?),
                Event::Empty(ref e) => {
                    let element = Self::from_start(e)?;
                    Self::attach(&mut stack, &mut root, element)?;
                },
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| OoxmlError::Xml("unbalanced end tag".to_string()))?;
                    Self::attach(&mut stack, &mut root, element)?;
                },
                Event::Text(ref e) => {
                    if let Some(parent) = stack.last_mut() {
                        let raw = std::str::from_utf8(e.as_ref())?;
                        // Entity references arrive as separate events. Indentation
                        // between elements is dropped; `a:t` keeps its spaces.
                        if !raw.trim().is_empty() || parent.local_name() == "t" {
                            parent.append_text(raw);
                        }
                    }
                },
                Event::CData(ref e) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.append_text(std::str::from_utf8(e.as_ref())?);
                    }
                },
                Event::GeneralRef(ref e) => {
                    if let Some(parent) = stack.last_mut() {
                        let name = std::str::from_utf8(e.as_ref())?;
                        match resolve_entity(name) {
                            Some(ch) => parent.append_text(ch.encode_utf8(&mut [0; 4])),
                            None => parent.append_text(&format!("&{};", name)),
                        }
                    }
                },
                Event::Eof => break,
                _ => {},
            }
            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(OoxmlError::Xml(format!("unclosed element <{}>", open.name)));
        }
        root.ok_or_else(|| OoxmlError::Xml("document has no root element".to_string()))
    }

    fn from_start(e: &BytesStart<'_>) -> Result<Self> {
        let name = std::str::from_utf8(e.name().as_ref())?.to_string();
        let mut element = XmlElement::new(name);
        for attr in e.attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
            let value = attr.unescape_value()?.to_string();
            element.attributes.push((key, value));
        }
        Ok(element)
    }

    fn attach(
        stack: &mut [XmlElement],
        root: &mut Option<XmlElement>,
        element: XmlElement,
    ) -> Result<()> {
        match stack.last_mut() {
            Some(parent) => {
                parent.children.push(XmlNode::Element(element));
                Ok(())
            },
            None if root.is_none() => {
                *root = Some(element);
                Ok(())
            },
            None => Err(OoxmlError::Xml("multiple root elements".to_string())),
        }
    }

    fn append_text(&mut self, text: &str) {
        if let Some(XmlNode::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(XmlNode::Text(text.to_string()));
        }
    }

    /// Serialize this element (without an XML declaration).
    pub fn to_xml(&self) -> String {
        let mut out = String::with_capacity(256);
        self.write_xml(&mut out);
        out
    }

    pub fn write_xml(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }

        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }

        out.push('>');
        for node in &self.children {
            match node {
                XmlNode::Element(e) => e.write_xml(out),
                XmlNode::Text(t) => out.push_str(&escape_text(t)),
            }
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}
