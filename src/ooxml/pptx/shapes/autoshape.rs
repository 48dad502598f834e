//! Auto shapes (`p:sp`): fill, text, placeholder inheritance and autofit.
//!
//! An auto shape keeps its XML subtree and derives everything else from it on
//! demand. The resolved fill and the per-level font table are memoized in
//! [`ResetCell`]s; every mutator clears both before returning.
//!
//! Shapes are shared (`Rc<AutoShape>`) so slide shapes can link to the layout
//! or master shape they inherit from. Mutators therefore take `&self` and
//! edit the subtree through a `RefCell`.

use crate::common::cache::ResetCell;
use crate::ooxml::element::XmlElement;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::context::PartContext;
use crate::ooxml::pptx::measure::MeasureDpi;
use crate::ooxml::pptx::shapes::autofit::{fit_height, fit_width, longest_paragraph, most_common, required_rows};
use crate::ooxml::pptx::shapes::base::{
    Placeholder, ShapeGeometry, c_nv_pr, c_nv_pr_mut, ensure_properties, own_geometry, properties, write_geometry,
};
use crate::ooxml::pptx::shapes::fill::{FillSpec, apply_picture, apply_solid_color, resolve_fill};
use crate::ooxml::pptx::shapes::font::{FontData, LevelTable, level_table};
use crate::ooxml::pptx::shapes::outline::{ShapeOutline, apply_outline_color, apply_outline_weight, resolve_outline};
use crate::ooxml::pptx::shapes::textframe::{
    AutofitType, Paragraph, TextFrame, append_paragraph, remove_paragraph_at, set_body_text,
};
use bytes::Bytes;
use std::cell::{OnceCell, Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace, warn};

/// A `p:sp` element bound to the part it lives in.
///
/// # Examples
///
/// ```rust,ignore
/// let shape = AutoShape::parse(sp_xml, context)?;
/// shape.set_fill_color("FF8800")?;
/// assert_eq!(shape.fill().color(), Some("FF8800"));
///
/// shape.set_text("Quarterly results\nDraft")?; // resizes when the body has spAutoFit
/// ```
pub struct AutoShape {
    element: RefCell<XmlElement>,
    context: PartContext,
    fill: ResetCell<FillSpec>,
    font_levels: ResetCell<Rc<LevelTable>>,
    placeholder: OnceCell<Rc<AutoShape>>,
}

impl AutoShape {
    pub fn new(element: XmlElement, context: PartContext) -> Result<Self> {
        if element.local_name() != "sp" {
            return Err(OoxmlError::InvalidFormat(format!(
                "expected <p:sp>, found <{}>",
                element.name()
            )));
        }
        Ok(Self {
            element: RefCell::new(element),
            context,
            fill: ResetCell::new(),
            font_levels: ResetCell::new(),
            placeholder: OnceCell::new(),
        })
    }

    pub fn parse(xml: &[u8], context: PartContext) -> Result<Self> {
        Self::new(XmlElement::parse(xml)?, context)
    }

    /// Shape id from `p:cNvPr/@id`.
    pub fn id(&self) -> Option<u32> {
        c_nv_pr(&self.element.borrow())
            .and_then(|e| e.attr("id"))
            .and_then(|v| v.parse().ok())
    }

    pub fn name(&self) -> String {
        c_nv_pr(&self.element.borrow())
            .and_then(|e| e.attr("name"))
            .unwrap_or_default()
            .to_string()
    }

    pub fn placeholder(&self) -> Option<Placeholder> {
        Placeholder::from_shape(&self.element.borrow())
    }

    #[inline]
    pub fn context(&self) -> &PartContext {
        &self.context
    }

    /// Read access to the shape subtree.
    pub fn element(&self) -> Ref<'_, XmlElement> {
        self.element.borrow()
    }

    /// Raw write access to the shape subtree. Memoized state is dropped.
    pub fn element_mut(&self) -> RefMut<'_, XmlElement> {
        self.reset();
        self.element.borrow_mut()
    }

    pub fn into_element(self) -> XmlElement {
        self.element.into_inner()
    }

    fn reset(&self) {
        self.fill.reset();
        self.font_levels.reset();
    }

    // -- geometry ---------------------------------------------------------

    /// Position and size in EMU.
    ///
    /// A shape without its own `a:xfrm` takes the transform of the placeholder
    /// it is linked to.
    pub fn geometry(&self) -> ShapeGeometry {
        if let Some(own) = own_geometry(&self.element.borrow()) {
            return own;
        }
        self.placeholder
            .get()
            .map(|parent| parent.geometry())
            .unwrap_or_default()
    }

    pub fn set_geometry(&self, geometry: ShapeGeometry) {
        write_geometry(&mut self.element.borrow_mut(), geometry);
        self.reset();
    }

    #[inline]
    fn dpi(&self) -> u32 {
        self.context.options().dpi
    }

    pub fn x(&self) -> i32 {
        self.geometry().x_px(self.dpi())
    }

    pub fn y(&self) -> i32 {
        self.geometry().y_px(self.dpi())
    }

    pub fn width(&self) -> i32 {
        self.geometry().width_px(self.dpi())
    }

    pub fn height(&self) -> i32 {
        self.geometry().height_px(self.dpi())
    }

    pub fn set_x(&self, px: i32) {
        self.set_geometry(self.geometry().with_px(self.dpi(), Some(px), None, None, None));
    }

    pub fn set_y(&self, px: i32) {
        self.set_geometry(self.geometry().with_px(self.dpi(), None, Some(px), None, None));
    }

    pub fn set_width(&self, px: i32) {
        self.set_geometry(self.geometry().with_px(self.dpi(), None, None, Some(px), None));
    }

    pub fn set_height(&self, px: i32) {
        self.set_geometry(self.geometry().with_px(self.dpi(), None, None, None, Some(px)));
    }

    // -- fill -------------------------------------------------------------

    /// Whether the shape is filled with the slide background (`@useBgFill`).
    pub fn use_bg_fill(&self) -> bool {
        self.element.borrow().attr_bool("useBgFill").unwrap_or(false)
    }

    /// The effective fill, resolved on first access and memoized.
    pub fn fill(&self) -> FillSpec {
        self.fill.get_or_init(|| {
            let element = self.element.borrow();
            resolve_fill(
                properties(&element),
                element.attr_bool("useBgFill").unwrap_or(false),
                self.context.master_style(),
                self.context.images(),
            )
        })
    }

    /// Fill the shape with a literal RGB color (`RRGGBB`, optional `#`).
    ///
    /// Returns the normalised upper-case hex that was written.
    pub fn set_fill_color(&self, hex: &str) -> Result<String> {
        let written = {
            let mut element = self.element.borrow_mut();
            let props = ensure_properties(&mut element)
                .ok_or_else(|| OoxmlError::InvalidFormat("shape has no properties element".to_string()))?;
            let written = apply_solid_color(props, hex)?;
            element.remove_attr("useBgFill");
            written
        };
        self.reset();
        Ok(written)
    }

    /// Fill the shape with a picture; returns the relationship id in use.
    ///
    /// A shape that already has a picture fill keeps its relationship id and
    /// only the image bytes behind it change.
    pub fn set_fill_picture(&self, bytes: impl Into<Bytes>) -> Result<String> {
        let bytes = bytes.into();

        if let FillSpec::Picture(Some(handle)) = self.fill() {
            handle.update(bytes)?;
            self.reset();
            debug!(rel_id = handle.rel_id(), "picture fill updated in place");
            return Ok(handle.rel_id().to_string());
        }

        let rel_id = self.context.images().borrow_mut().add_image(bytes)?;
        {
            let mut element = self.element.borrow_mut();
            let props = ensure_properties(&mut element)
                .ok_or_else(|| OoxmlError::InvalidFormat("shape has no properties element".to_string()))?;
            apply_picture(props, &rel_id);
            element.remove_attr("useBgFill");
        }
        self.reset();
        Ok(rel_id)
    }

    // -- outline ----------------------------------------------------------

    /// Weight and color of the shape's own `a:ln`.
    pub fn outline(&self) -> ShapeOutline {
        let element = self.element.borrow();
        resolve_outline(properties(&element), self.context.master_style())
    }

    /// Set the outline width in points, creating `a:ln` when missing.
    pub fn set_outline_weight(&self, points: f64) -> Result<()> {
        {
            let mut element = self.element.borrow_mut();
            let props = ensure_properties(&mut element)
                .ok_or_else(|| OoxmlError::InvalidFormat("shape has no properties element".to_string()))?;
            apply_outline_weight(props, points)?;
        }
        self.reset();
        Ok(())
    }

    /// Draw the outline in a literal RGB color; returns the hex written.
    pub fn set_outline_color(&self, hex: &str) -> Result<String> {
        let written = {
            let mut element = self.element.borrow_mut();
            let props = ensure_properties(&mut element)
                .ok_or_else(|| OoxmlError::InvalidFormat("shape has no properties element".to_string()))?;
            apply_outline_color(props, hex)?
        };
        self.reset();
        Ok(written)
    }

    // -- duplication --------------------------------------------------------

    /// A copy of this shape carrying shape id `id`.
    ///
    /// The copy shares the part context and inherits from the same
    /// placeholder. It is not attached to any tree; see
    /// [`ShapeTree::duplicate`](crate::ooxml::pptx::shapes::ShapeTree::duplicate).
    pub fn duplicate(&self, id: u32) -> Result<AutoShape> {
        let mut element = self.element.borrow().clone();
        c_nv_pr_mut(&mut element)
            .ok_or_else(|| OoxmlError::InvalidFormat("shape has no p:cNvPr".to_string()))?
            .set_attr_i64("id", i64::from(id));

        let copy = AutoShape::new(element, self.context.clone())?;
        if let Some(parent) = self.placeholder.get() {
            copy.link_placeholder(parent);
        }
        debug!(shape = %self.name(), from = ?self.id(), to = id, "shape duplicated");
        Ok(copy)
    }

    // -- placeholder inheritance ------------------------------------------

    /// Link this shape to the layout or master shape it inherits from.
    ///
    /// A shape links once; later calls return `false` and keep the first link.
    pub fn link_placeholder(&self, parent: &Rc<AutoShape>) -> bool {
        let linked = self.placeholder.set(Rc::clone(parent)).is_ok();
        if linked {
            trace!(shape = %self.name(), parent = %parent.name(), "placeholder linked");
            self.reset();
        }
        linked
    }

    pub fn placeholder_shape(&self) -> Option<&Rc<AutoShape>> {
        self.placeholder.get()
    }

    /// The per-level font table of this shape's own text body.
    pub fn font_levels(&self) -> Rc<LevelTable> {
        self.font_levels.get_or_init(|| {
            let element = self.element.borrow();
            let table = element.first_child("txBody").map(level_table).unwrap_or_default();
            Rc::new(table)
        })
    }

    /// Fill the unset fields of `acc` with the font data of `level`.
    ///
    /// The shape's own list style is consulted first; while fields are still
    /// missing the lookup continues through the linked placeholder chain.
    /// Fields already set in `acc` are never overwritten.
    pub fn fill_font_data(&self, level: u8, acc: &mut FontData) -> Result<()> {
        self.cascade_font_data(level, acc, 0, self.context.options().max_placeholder_depth)
    }

    fn cascade_font_data(&self, level: u8, acc: &mut FontData, hops: usize, max: usize) -> Result<()> {
        if let Some(own) = self.font_levels().get(&level) {
            acc.merge_missing(own);
            if acc.is_filled() {
                return Ok(());
            }
        }

        let Some(parent) = self.placeholder.get() else {
            return Ok(());
        };
        if hops >= max {
            warn!(shape = %self.name(), level, max, "placeholder chain too deep");
            return Err(OoxmlError::PlaceholderDepthExceeded { max });
        }
        parent.cascade_font_data(level, acc, hops + 1, max)
    }

    // -- text -------------------------------------------------------------

    pub fn has_text_frame(&self) -> bool {
        self.element.borrow().first_child("txBody").is_some()
    }

    /// Snapshot of the text body, if the shape has one.
    pub fn text_frame(&self) -> Option<TextFrame> {
        self.element.borrow().first_child("txBody").map(TextFrame::from_body)
    }

    /// All paragraph texts joined by `\n`; empty without a text body.
    pub fn text(&self) -> String {
        self.text_frame().map(|frame| frame.text()).unwrap_or_default()
    }

    /// Replace the text, one paragraph per `\n`-separated line, then autofit.
    ///
    /// Fails without changing the shape when autofit cannot resolve the font
    /// (for example a placeholder chain deeper than allowed).
    pub fn set_text(&self, text: &str) -> Result<()> {
        self.edit_text_body(|body| {
            set_body_text(body, text);
            Ok(())
        })
    }

    /// Append a paragraph styled like the last one, then autofit.
    pub fn add_paragraph(&self, text: &str) -> Result<()> {
        self.edit_text_body(|body| {
            append_paragraph(body, text);
            Ok(())
        })
    }

    /// Remove the paragraph at `index`, then autofit.
    pub fn remove_paragraph(&self, index: usize) -> Result<()> {
        if !self.has_text_frame() {
            return Err(OoxmlError::IndexOutOfRange { index, len: 0 });
        }
        self.edit_text_body(|body| remove_paragraph_at(body, index))
    }

    /// Apply `edit` to the text body and autofit. If either step fails the
    /// shape subtree is restored to its state before the edit.
    fn edit_text_body(&self, edit: impl FnOnce(&mut XmlElement) -> Result<()>) -> Result<()> {
        let snapshot = self.element.borrow().clone();
        let edited = {
            let mut element = self.element.borrow_mut();
            if element.first_child("txBody").is_none() {
                let at = element.position_of("extLst").unwrap_or(element.nodes().len());
                element.insert_child(at, empty_text_body());
            }
            match element.first_child_mut("txBody") {
                Some(body) => edit(body),
                None => Ok(()),
            }
        };
        self.reset();

        let result = edited.and_then(|()| self.resize());
        if let Err(err) = &result {
            debug!(shape = %self.name(), error = %err, "text edit rolled back");
            *self.element.borrow_mut() = snapshot;
            self.reset();
        }
        result
    }

    // -- autofit ----------------------------------------------------------

    /// Grow or shrink the shape to fit its text.
    ///
    /// Only text bodies marked `a:spAutoFit` are resized. The height always
    /// follows the text; the width only changes when the body does not wrap.
    /// A body with nothing to measure leaves the shape untouched.
    pub fn resize(&self) -> Result<()> {
        let Some(frame) = self.text_frame() else {
            return Ok(());
        };
        if frame.autofit() != AutofitType::Resize {
            trace!(shape = %self.name(), autofit = ?frame.autofit(), "autofit skipped");
            return Ok(());
        }
        let Some(first) = frame.paragraphs().first() else {
            return Ok(());
        };
        let text = frame.text();
        if first.runs().is_empty() || text.is_empty() {
            return Ok(());
        }

        let options = self.context.options();
        let mut inherited = FontData::default();
        self.fill_font_data(first.level(), &mut inherited)?;

        let sizes: Vec<f64> = first
            .runs()
            .iter()
            .map(|run| {
                run.font
                    .size_pt()
                    .or_else(|| inherited.size_pt())
                    .unwrap_or(options.default_font_size)
            })
            .collect();
        let Some((size_pt, position)) = most_common(sizes) else {
            return Ok(());
        };
        let run = &first.runs()[position];

        let theme = self.context.master_style().theme();
        let typeface = run
            .font
            .latin
            .as_deref()
            .or(inherited.latin.as_deref())
            .and_then(|name| theme.resolve_typeface(name))
            .or_else(|| theme.minor_font.as_ref().map(|font| font.typeface.as_str()))
            .unwrap_or(options.default_typeface.as_str())
            .to_string();

        let measurer = self.context.measurer();
        let scale = match measurer.dpi() {
            MeasureDpi::Screen96 => 1.0,
            MeasureDpi::Typographic72 => options.measure_scale,
        };
        let metrics = measurer.measure(&text, &typeface, size_pt);
        let text_width = metrics.width * scale;
        let line_height = metrics.line_height * scale;

        let dpi = options.dpi;
        let (left, right, top, bottom) = frame.margins().px(dpi);
        let geometry = self.geometry();
        let available = geometry.width_px(dpi) - left - right;
        if available <= 0 {
            warn!(shape = %self.name(), available, "no horizontal room for text; autofit skipped");
            return Ok(());
        }

        let rows = required_rows(text_width, f64::from(available));
        let fit = fit_height(rows, line_height, top, bottom, geometry.height_px(dpi));

        let width = if frame.is_wrapped() {
            None
        } else {
            longest_paragraph(frame.paragraphs().iter().map(Paragraph::text)).map(|index| {
                let line = frame.paragraphs()[index].text();
                let raw = measurer.measure(line, &typeface, size_pt).width;
                fit_width(raw, options.no_wrap_width_scale, left, right)
            })
        };

        let y = geometry.y_px(dpi) - fit.y_shift;
        debug!(
            shape = %self.name(),
            typeface = %typeface,
            size_pt,
            rows,
            height = fit.height,
            y,
            width = ?width,
            "shape resized to fit text"
        );
        self.set_geometry(geometry.with_px(dpi, None, Some(y), width, Some(fit.height)));
        Ok(())
    }
}

/// `p:txBody` with empty body properties and list style.
fn empty_text_body() -> XmlElement {
    XmlElement::new("p:txBody")
        .with_child(XmlElement::new("a:bodyPr"))
        .with_child(XmlElement::new("a:lstStyle"))
}

impl fmt::Debug for AutoShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoShape")
            .field("id", &self.id())
            .field("name", &self.name())
            .field("placeholder", &self.placeholder())
            .field("linked", &self.placeholder.get().is_some())
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}
