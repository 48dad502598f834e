//! Shape trees (`p:spTree`, `p:grpSp`) and placeholder linking.

use crate::ooxml::element::{XmlElement, XmlNode};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::context::PartContext;
use crate::ooxml::pptx::shapes::autoshape::AutoShape;
use crate::ooxml::pptx::shapes::base::{BaseShape, Placeholder, ShapeGeometry, ShapeType, c_nv_pr, own_geometry};
use crate::ooxml::pptx::shapes::picture::PictureShape;
use smallvec::SmallVec;
use std::rc::Rc;
use tracing::{debug, trace};

/// Auto shapes gathered from a tree; most parts hold only a handful.
pub type AutoShapes<'a> = SmallVec<[&'a Rc<AutoShape>; 8]>;

/// A child of a shape tree, dispatched on its element kind.
#[derive(Debug, Clone)]
pub enum Shape {
    Auto(Rc<AutoShape>),
    Picture(PictureShape),
    Connector(BaseShape),
    GraphicFrame(BaseShape),
    Group(GroupShape),
}

impl Shape {
    pub fn from_element(element: XmlElement, context: &PartContext) -> Result<Self> {
        let shape_type = ShapeType::from_local_name(element.local_name()).ok_or_else(|| {
            OoxmlError::InvalidFormat(format!("<{}> is not a shape element", element.name()))
        })?;
        Ok(match shape_type {
            ShapeType::AutoShape => Shape::Auto(Rc::new(AutoShape::new(element, context.clone())?)),
            ShapeType::Picture => Shape::Picture(PictureShape::new(element, context.images().clone())?),
            ShapeType::Connector => Shape::Connector(BaseShape::new(element)?),
            ShapeType::GraphicFrame => Shape::GraphicFrame(BaseShape::new(element)?),
            ShapeType::Group => Shape::Group(GroupShape::new(element, context)?),
        })
    }

    pub fn shape_type(&self) -> ShapeType {
        match self {
            Shape::Auto(_) => ShapeType::AutoShape,
            Shape::Picture(_) => ShapeType::Picture,
            Shape::Connector(_) => ShapeType::Connector,
            Shape::GraphicFrame(_) => ShapeType::GraphicFrame,
            Shape::Group(_) => ShapeType::Group,
        }
    }

    pub fn id(&self) -> Option<u32> {
        match self {
            Shape::Auto(shape) => shape.id(),
            Shape::Picture(picture) => picture.base().id(),
            Shape::Connector(base) | Shape::GraphicFrame(base) => base.id(),
            Shape::Group(group) => group.id(),
        }
    }

    pub fn name(&self) -> String {
        match self {
            Shape::Auto(shape) => shape.name(),
            Shape::Picture(picture) => picture.base().name().to_string(),
            Shape::Connector(base) | Shape::GraphicFrame(base) => base.name().to_string(),
            Shape::Group(group) => group.name(),
        }
    }

    pub fn placeholder(&self) -> Option<Placeholder> {
        match self {
            Shape::Auto(shape) => shape.placeholder(),
            Shape::Picture(picture) => picture.base().placeholder(),
            Shape::Connector(base) | Shape::GraphicFrame(base) => base.placeholder(),
            Shape::Group(_) => None,
        }
    }

    pub fn geometry(&self) -> ShapeGeometry {
        match self {
            Shape::Auto(shape) => shape.geometry(),
            Shape::Picture(picture) => picture.base().geometry(),
            Shape::Connector(base) | Shape::GraphicFrame(base) => base.geometry(),
            Shape::Group(group) => group.geometry(),
        }
    }

    #[inline]
    pub fn as_auto(&self) -> Option<&Rc<AutoShape>> {
        match self {
            Shape::Auto(shape) => Some(shape),
            _ => None,
        }
    }

    /// Current XML of the shape, including edits made through it.
    pub fn to_element(&self) -> XmlElement {
        match self {
            Shape::Auto(shape) => shape.element().clone(),
            Shape::Picture(picture) => picture.base().element().clone(),
            Shape::Connector(base) | Shape::GraphicFrame(base) => base.element().clone(),
            Shape::Group(group) => group.to_element(),
        }
    }
}

/// The shapes of one `p:spTree` (or `p:grpSp`) and the element around them.
#[derive(Debug, Clone)]
pub struct ShapeTree {
    /// The tree element with its shape children taken out
    frame: XmlElement,
    shapes: Vec<Shape>,
}

impl ShapeTree {
    /// Split a `p:spTree` or `p:grpSp` into its frame and typed shapes.
    pub fn from_element(mut tree: XmlElement, context: &PartContext) -> Result<Self> {
        let mut shapes = Vec::new();
        for node in tree.take_nodes() {
            match node {
                XmlNode::Element(child) if ShapeType::from_local_name(child.local_name()).is_some() => {
                    shapes.push(Shape::from_element(child, context)?);
                },
                other => tree.push_node(other),
            }
        }
        trace!(part = context.owner().kind(), shapes = shapes.len(), "shape tree loaded");
        Ok(Self { frame: tree, shapes })
    }

    /// Load the shape tree of a slide, layout or master part.
    pub fn parse_part(part_xml: &[u8], context: &PartContext) -> Result<Self> {
        let root = XmlElement::parse(part_xml)?;
        let sp_tree = root
            .child_path(&["cSld", "spTree"])
            .ok_or_else(|| OoxmlError::InvalidFormat(format!("<{}> has no p:cSld/p:spTree", root.name())))?;
        Self::from_element(sp_tree.clone(), context)
    }

    #[inline]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Every auto shape in the tree, groups included, in document order.
    pub fn auto_shapes(&self) -> AutoShapes<'_> {
        let mut out = AutoShapes::new();
        self.collect_auto_shapes(&mut out);
        out
    }

    fn collect_auto_shapes<'a>(&'a self, out: &mut AutoShapes<'a>) {
        for shape in &self.shapes {
            match shape {
                Shape::Auto(auto) => out.push(auto),
                Shape::Group(group) => group.tree.collect_auto_shapes(out),
                _ => {},
            }
        }
    }

    /// Find a shape by `p:cNvPr/@id`, searching into groups.
    pub fn by_id(&self, id: u32) -> Option<&Shape> {
        self.shapes.iter().find_map(|shape| {
            if shape.id() == Some(id) {
                return Some(shape);
            }
            match shape {
                Shape::Group(group) => group.shapes().by_id(id),
                _ => None,
            }
        })
    }

    /// Find a shape by `p:cNvPr/@name`, searching into groups.
    pub fn by_name(&self, name: &str) -> Option<&Shape> {
        self.shapes.iter().find_map(|shape| {
            if shape.name() == name {
                return Some(shape);
            }
            match shape {
                Shape::Group(group) => group.shapes().by_name(name),
                _ => None,
            }
        })
    }

    /// Largest shape id in use, counting the tree's own frame and groups.
    fn max_shape_id(&self) -> u32 {
        let frame = c_nv_pr(&self.frame)
            .and_then(|e| e.attr("id"))
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        self.shapes
            .iter()
            .map(|shape| match shape {
                Shape::Group(group) => group.shapes().max_shape_id(),
                other => other.id().unwrap_or(0),
            })
            .fold(frame, u32::max)
    }

    /// The id a new shape in this part should take: one past the largest in use.
    pub fn next_shape_id(&self) -> u32 {
        self.max_shape_id() + 1
    }

    /// Copy `shape` under the next free id and append the copy to this tree.
    pub fn duplicate(&mut self, shape: &AutoShape) -> Result<Rc<AutoShape>> {
        let id = self.next_shape_id();
        let copy = Rc::new(shape.duplicate(id)?);
        self.shapes.push(Shape::Auto(Rc::clone(&copy)));
        debug!(id, shapes = self.shapes.len(), "duplicate appended");
        Ok(copy)
    }

    /// The auto shape a slide or layout placeholder inherits from.
    ///
    /// Candidates are matched on `idx` first; when no index matches, on
    /// placeholder type (a centered title matches a title, a subtitle a body).
    pub fn find_placeholder(&self, placeholder: &Placeholder) -> Option<Rc<AutoShape>> {
        let candidates: SmallVec<[(&Rc<AutoShape>, Placeholder); 8]> = self
            .auto_shapes()
            .into_iter()
            .filter_map(|shape| shape.placeholder().map(|ph| (shape, ph)))
            .collect();

        candidates
            .iter()
            .find(|(_, candidate)| placeholder.matches_index(candidate))
            .or_else(|| {
                candidates
                    .iter()
                    .find(|(_, candidate)| placeholder.matches_kind(candidate))
            })
            .map(|(shape, _)| Rc::clone(shape))
    }

    /// Link every placeholder in this tree to its counterpart in `parent`.
    ///
    /// Returns the number of links made.
    pub fn link_placeholders(&self, parent: &ShapeTree) -> usize {
        let mut linked = 0;
        for shape in self.auto_shapes() {
            let Some(placeholder) = shape.placeholder() else {
                continue;
            };
            match parent.find_placeholder(&placeholder) {
                Some(target) if shape.link_placeholder(&target) => linked += 1,
                Some(_) => {},
                None => trace!(
                    shape = %shape.name(),
                    kind = placeholder.kind.as_str(),
                    idx = ?placeholder.index,
                    "no inherited placeholder"
                ),
            }
        }
        debug!(linked, "placeholders linked");
        linked
    }

    /// Reassemble the tree element with the current shape XML.
    ///
    /// Shapes go back in order, ahead of any `p:extLst`.
    pub fn to_element(&self) -> XmlElement {
        let mut element = self.frame.clone();
        let at = element.position_of("extLst").unwrap_or(element.nodes().len());
        for (offset, shape) in self.shapes.iter().enumerate() {
            element.insert_child(at + offset, shape.to_element());
        }
        element
    }
}

/// A group shape (`p:grpSp`) and the shapes inside it.
#[derive(Debug, Clone)]
pub struct GroupShape {
    tree: ShapeTree,
}

impl GroupShape {
    pub fn new(element: XmlElement, context: &PartContext) -> Result<Self> {
        if element.local_name() != "grpSp" {
            return Err(OoxmlError::InvalidFormat(format!(
                "expected <p:grpSp>, found <{}>",
                element.name()
            )));
        }
        Ok(Self {
            tree: ShapeTree::from_element(element, context)?,
        })
    }

    pub fn id(&self) -> Option<u32> {
        c_nv_pr(&self.tree.frame)
            .and_then(|e| e.attr("id"))
            .and_then(|v| v.parse().ok())
    }

    pub fn name(&self) -> String {
        c_nv_pr(&self.tree.frame)
            .and_then(|e| e.attr("name"))
            .unwrap_or_default()
            .to_string()
    }

    /// Group transform from `p:grpSpPr/a:xfrm`.
    pub fn geometry(&self) -> ShapeGeometry {
        own_geometry(&self.tree.frame).unwrap_or_default()
    }

    #[inline]
    pub fn shapes(&self) -> &ShapeTree {
        &self.tree
    }

    #[inline]
    pub fn shapes_mut(&mut self) -> &mut ShapeTree {
        &mut self.tree
    }

    pub fn to_element(&self) -> XmlElement {
        self.tree.to_element()
    }
}
