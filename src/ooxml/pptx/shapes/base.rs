/// Base shape types for PowerPoint presentations.
use crate::common::unit::{emu_to_px, px_to_emu};
use crate::ooxml::drawings::xfrm::Xfrm;
use crate::ooxml::element::XmlElement;
use crate::ooxml::error::{OoxmlError, Result};

/// Shape type enumeration.
///
/// Indicates what kind of `p:spTree` child a shape was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeType {
    /// A shape with geometry and optional text (p:sp)
    AutoShape,
    /// A picture shape (p:pic)
    Picture,
    /// A graphic frame containing a table, chart or OLE object (p:graphicFrame)
    GraphicFrame,
    /// A group shape (p:grpSp)
    Group,
    /// A connector shape (p:cxnSp)
    Connector,
}

impl ShapeType {
    /// Map a shape tree child's local name to its shape type.
    pub fn from_local_name(local: &str) -> Option<Self> {
        match local {
            "sp" => Some(ShapeType::AutoShape),
            "pic" => Some(ShapeType::Picture),
            "graphicFrame" => Some(ShapeType::GraphicFrame),
            "grpSp" => Some(ShapeType::Group),
            "cxnSp" => Some(ShapeType::Connector),
            _ => None,
        }
    }
}

/// Placeholder type from `p:ph/@type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderKind {
    Title,
    CenteredTitle,
    SubTitle,
    Body,
    Object,
    Chart,
    Table,
    ClipArt,
    Diagram,
    Media,
    SlideImage,
    Picture,
    DateTime,
    Footer,
    SlideNumber,
    Header,
}

impl PlaceholderKind {
    pub fn from_attr(value: &str) -> Option<Self> {
        Some(match value {
            "title" => PlaceholderKind::Title,
            "ctrTitle" => PlaceholderKind::CenteredTitle,
            "subTitle" => PlaceholderKind::SubTitle,
            "body" => PlaceholderKind::Body,
            "obj" => PlaceholderKind::Object,
            "chart" => PlaceholderKind::Chart,
            "tbl" => PlaceholderKind::Table,
            "clipArt" => PlaceholderKind::ClipArt,
            "dgm" => PlaceholderKind::Diagram,
            "media" => PlaceholderKind::Media,
            "sldImg" => PlaceholderKind::SlideImage,
            "pic" => PlaceholderKind::Picture,
            "dt" => PlaceholderKind::DateTime,
            "ftr" => PlaceholderKind::Footer,
            "sldNum" => PlaceholderKind::SlideNumber,
            "hdr" => PlaceholderKind::Header,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlaceholderKind::Title => "title",
            PlaceholderKind::CenteredTitle => "ctrTitle",
            PlaceholderKind::SubTitle => "subTitle",
            PlaceholderKind::Body => "body",
            PlaceholderKind::Object => "obj",
            PlaceholderKind::Chart => "chart",
            PlaceholderKind::Table => "tbl",
            PlaceholderKind::ClipArt => "clipArt",
            PlaceholderKind::Diagram => "dgm",
            PlaceholderKind::Media => "media",
            PlaceholderKind::SlideImage => "sldImg",
            PlaceholderKind::Picture => "pic",
            PlaceholderKind::DateTime => "dt",
            PlaceholderKind::Footer => "ftr",
            PlaceholderKind::SlideNumber => "sldNum",
            PlaceholderKind::Header => "hdr",
        }
    }

    /// The kind a master uses for this placeholder: centered titles inherit
    /// from the title, subtitles from the body.
    fn inherited_kind(self) -> Self {
        match self {
            PlaceholderKind::CenteredTitle => PlaceholderKind::Title,
            PlaceholderKind::SubTitle => PlaceholderKind::Body,
            other => other,
        }
    }
}

/// A `p:ph` declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    pub kind: PlaceholderKind,
    pub index: Option<u32>,
}

impl Placeholder {
    pub fn new(kind: PlaceholderKind, index: Option<u32>) -> Self {
        Self { kind, index }
    }

    /// Read the placeholder of a shape element (`p:sp`, `p:pic` ...).
    ///
    /// A `p:ph` without `type` is a body placeholder. Unknown types are
    /// treated the same way.
    pub fn from_shape(shape: &XmlElement) -> Option<Self> {
        let ph = nv_pr(shape)?.first_child("ph")?;
        let kind = ph
            .attr("type")
            .and_then(PlaceholderKind::from_attr)
            .unwrap_or(PlaceholderKind::Body);
        let index = ph.attr("idx").and_then(|v| v.trim().parse().ok());
        Some(Self { kind, index })
    }

    /// Whether `candidate` (on a layout or master) matches by index.
    #[inline]
    pub fn matches_index(&self, candidate: &Placeholder) -> bool {
        matches!((self.index, candidate.index), (Some(a), Some(b)) if a == b)
    }

    /// Whether `candidate` (on a layout or master) matches by type.
    #[inline]
    pub fn matches_kind(&self, candidate: &Placeholder) -> bool {
        self.kind == candidate.kind || self.kind.inherited_kind() == candidate.kind.inherited_kind()
    }
}

/// Shape geometry (position and size), stored in EMU.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShapeGeometry {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

impl ShapeGeometry {
    #[inline]
    pub fn x_px(&self, dpi: u32) -> i32 {
        emu_to_px(self.x, dpi)
    }

    #[inline]
    pub fn y_px(&self, dpi: u32) -> i32 {
        emu_to_px(self.y, dpi)
    }

    #[inline]
    pub fn width_px(&self, dpi: u32) -> i32 {
        emu_to_px(self.cx, dpi)
    }

    #[inline]
    pub fn height_px(&self, dpi: u32) -> i32 {
        emu_to_px(self.cy, dpi)
    }

    /// Copy with the pixel values converted back to EMU.
    pub fn with_px(self, dpi: u32, x: Option<i32>, y: Option<i32>, w: Option<i32>, h: Option<i32>) -> Self {
        Self {
            x: x.map_or(self.x, |v| px_to_emu(v, dpi)),
            y: y.map_or(self.y, |v| px_to_emu(v, dpi)),
            cx: w.map_or(self.cx, |v| px_to_emu(v, dpi)),
            cy: h.map_or(self.cy, |v| px_to_emu(v, dpi)),
        }
    }
}

impl From<Xfrm> for ShapeGeometry {
    fn from(xfrm: Xfrm) -> Self {
        Self {
            x: xfrm.x,
            y: xfrm.y,
            cx: xfrm.cx,
            cy: xfrm.cy,
        }
    }
}

impl From<ShapeGeometry> for Xfrm {
    fn from(geometry: ShapeGeometry) -> Self {
        Self {
            x: geometry.x,
            y: geometry.y,
            cx: geometry.cx,
            cy: geometry.cy,
        }
    }
}

/// The `p:nvSpPr` / `p:nvPicPr` / ... child of a shape element.
pub(crate) fn non_visual(shape: &XmlElement) -> Option<&XmlElement> {
    shape.elements().find(|e| e.local_name().starts_with("nv"))
}

pub(crate) fn nv_pr(shape: &XmlElement) -> Option<&XmlElement> {
    non_visual(shape)?.first_child("nvPr")
}

pub(crate) fn c_nv_pr(shape: &XmlElement) -> Option<&XmlElement> {
    non_visual(shape)?.first_child("cNvPr")
}

pub(crate) fn c_nv_pr_mut(shape: &mut XmlElement) -> Option<&mut XmlElement> {
    shape
        .elements_mut()
        .find(|e| e.local_name().starts_with("nv"))?
        .first_child_mut("cNvPr")
}

/// Local name of the properties element holding the transform.
fn properties_name(shape: &XmlElement) -> &'static str {
    if shape.local_name() == "grpSp" { "grpSpPr" } else { "spPr" }
}

pub(crate) fn properties(shape: &XmlElement) -> Option<&XmlElement> {
    shape.first_child(properties_name(shape))
}

/// The shape's own transform, if it declares one.
pub(crate) fn own_geometry(shape: &XmlElement) -> Option<ShapeGeometry> {
    let xfrm = if shape.local_name() == "graphicFrame" {
        shape.first_child("xfrm")
    } else {
        properties(shape)?.first_child("xfrm")
    };
    xfrm.map(|x| Xfrm::from_element(x).into())
}

/// Raw node index just after the non-visual properties.
fn after_non_visual(shape: &XmlElement) -> usize {
    non_visual(shape)
        .map(|nv| nv.local_name().to_string())
        .and_then(|local| shape.position_of(&local))
        .map_or(0, |i| i + 1)
}

/// Write a transform into the shape, creating `spPr` / `a:xfrm` when missing.
pub(crate) fn write_geometry(shape: &mut XmlElement, geometry: ShapeGeometry) {
    let xfrm = Xfrm::from(geometry);

    if shape.local_name() == "graphicFrame" {
        match shape.first_child_mut("xfrm") {
            Some(existing) => xfrm.write_to(existing),
            None => {
                let mut created = XmlElement::new("p:xfrm");
                xfrm.write_to(&mut created);
                let at = after_non_visual(shape);
                shape.insert_child(at, created);
            },
        }
        return;
    }

    if let Some(props) = ensure_properties(shape) {
        match props.first_child_mut("xfrm") {
            Some(existing) => xfrm.write_to(existing),
            None => props.insert_child(0, xfrm.to_element()),
        }
    }
}

/// The shape's properties element, created after the non-visual block when missing.
pub(crate) fn ensure_properties(shape: &mut XmlElement) -> Option<&mut XmlElement> {
    let name = properties_name(shape);
    if shape.first_child(name).is_none() {
        let at = after_non_visual(shape);
        shape.insert_child(at, XmlElement::new(format!("p:{}", name)));
    }
    shape.first_child_mut(name)
}

/// Common read-only view over a shape tree child.
///
/// Pictures, connectors and graphic frames are exposed through this type;
/// auto shapes add fill, text and placeholder behaviour on top.
#[derive(Debug, Clone)]
pub struct BaseShape {
    element: XmlElement,
    shape_type: ShapeType,
}

impl BaseShape {
    pub fn new(element: XmlElement) -> Result<Self> {
        let shape_type = ShapeType::from_local_name(element.local_name()).ok_or_else(|| {
            OoxmlError::InvalidFormat(format!("<{}> is not a shape element", element.name()))
        })?;
        Ok(Self { element, shape_type })
    }

    #[inline]
    pub fn shape_type(&self) -> ShapeType {
        self.shape_type
    }

    /// Shape id from `p:cNvPr/@id`.
    pub fn id(&self) -> Option<u32> {
        c_nv_pr(&self.element).and_then(|e| e.attr("id")).and_then(|v| v.parse().ok())
    }

    /// Shape name from `p:cNvPr/@name`.
    pub fn name(&self) -> &str {
        c_nv_pr(&self.element).and_then(|e| e.attr("name")).unwrap_or("")
    }

    pub fn placeholder(&self) -> Option<Placeholder> {
        Placeholder::from_shape(&self.element)
    }

    /// Position and size in EMU; shapes without a transform report zero.
    pub fn geometry(&self) -> ShapeGeometry {
        own_geometry(&self.element).unwrap_or_default()
    }

    pub fn set_geometry(&mut self, geometry: ShapeGeometry) {
        write_geometry(&mut self.element, geometry);
    }

    #[inline]
    pub fn element(&self) -> &XmlElement {
        &self.element
    }

    #[inline]
    pub fn element_mut(&mut self) -> &mut XmlElement {
        &mut self.element
    }

    pub fn into_element(self) -> XmlElement {
        self.element
    }
}
