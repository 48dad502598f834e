/// Text frame for accessing and editing the text content of shapes.
use crate::common::unit::{emu_to_cm, emu_to_px};
use crate::ooxml::element::XmlElement;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::shapes::font::FontData;

const DEFAULT_HORIZONTAL_INSET: i64 = 91_440;
const DEFAULT_VERTICAL_INSET: i64 = 45_720;

/// How the text body reacts to overflowing text (`a:bodyPr` child).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutofitType {
    /// No autofit (`a:noAutofit` or nothing)
    None,
    /// Shrink text on overflow (`a:normAutofit`)
    Shrink,
    /// Resize the shape to fit the text (`a:spAutoFit`)
    Resize,
}

/// A regular text run (`a:r`).
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    /// Attributes set directly on the run's `a:rPr`
    pub font: FontData,
}

/// A paragraph (`a:p`).
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    level: u8,
    runs: Vec<TextRun>,
    text: String,
}

impl Paragraph {
    pub fn from_element(p: &XmlElement) -> Self {
        let level = p
            .first_child("pPr")
            .and_then(|ppr| ppr.attr_i64("lvl"))
            .and_then(|lvl| u8::try_from(lvl).ok())
            .map_or(1, |lvl| lvl.saturating_add(1));

        let mut runs = Vec::new();
        let mut text = String::new();
        for child in p.elements() {
            match child.local_name() {
                "r" => {
                    let run_text = child.first_child("t").map(XmlElement::text).unwrap_or_default();
                    text.push_str(&run_text);
                    runs.push(TextRun {
                        text: run_text,
                        font: child
                            .first_child("rPr")
                            .map(FontData::from_run_properties)
                            .unwrap_or_default(),
                    });
                },
                "fld" => {
                    if let Some(t) = child.first_child("t") {
                        text.push_str(&t.text());
                    }
                },
                // soft line break inside the paragraph
                "br" => text.push('\u{b}'),
                _ => {},
            }
        }

        Self { level, runs, text }
    }

    /// Outline level, 1-based (`a:pPr/@lvl` + 1).
    #[inline]
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Regular runs; fields and breaks are not included.
    #[inline]
    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Body insets in EMU (`a:bodyPr/@lIns` ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margins {
    pub left: i64,
    pub right: i64,
    pub top: i64,
    pub bottom: i64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: DEFAULT_HORIZONTAL_INSET,
            right: DEFAULT_HORIZONTAL_INSET,
            top: DEFAULT_VERTICAL_INSET,
            bottom: DEFAULT_VERTICAL_INSET,
        }
    }
}

impl Margins {
    pub fn left_cm(&self) -> f64 {
        emu_to_cm(self.left)
    }

    pub fn right_cm(&self) -> f64 {
        emu_to_cm(self.right)
    }

    pub fn top_cm(&self) -> f64 {
        emu_to_cm(self.top)
    }

    pub fn bottom_cm(&self) -> f64 {
        emu_to_cm(self.bottom)
    }

    /// Insets in whole pixels, as `(left, right, top, bottom)`.
    ///
    /// Converted from EMU in integer arithmetic, truncating like the
    /// geometry accessors.
    pub fn px(&self, dpi: u32) -> (i32, i32, i32, i32) {
        (
            emu_to_px(self.left, dpi),
            emu_to_px(self.right, dpi),
            emu_to_px(self.top, dpi),
            emu_to_px(self.bottom, dpi),
        )
    }
}

/// A snapshot of a shape's `p:txBody`.
///
/// # Examples
///
/// ```rust,ignore
/// let frame = shape.text_frame().unwrap();
/// println!("Text: {}", frame.text());
///
/// for para in frame.paragraphs() {
///     println!("Level {}: {}", para.level(), para.text());
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TextFrame {
    paragraphs: Vec<Paragraph>,
    autofit: AutofitType,
    wrap: bool,
    margins: Margins,
}

impl TextFrame {
    pub fn from_body(tx_body: &XmlElement) -> Self {
        let body_pr = tx_body.first_child("bodyPr");
        let inset = |key: &str, default: i64| {
            body_pr.and_then(|b| b.attr_i64(key)).unwrap_or(default)
        };
        let margins = Margins {
            left: inset("lIns", DEFAULT_HORIZONTAL_INSET),
            right: inset("rIns", DEFAULT_HORIZONTAL_INSET),
            top: inset("tIns", DEFAULT_VERTICAL_INSET),
            bottom: inset("bIns", DEFAULT_VERTICAL_INSET),
        };

        let autofit = body_pr
            .and_then(|b| {
                b.elements().find_map(|e| match e.local_name() {
                    "spAutoFit" => Some(AutofitType::Resize),
                    "normAutofit" => Some(AutofitType::Shrink),
                    "noAutofit" => Some(AutofitType::None),
                    _ => None,
                })
            })
            .unwrap_or(AutofitType::None);

        let wrap = body_pr.and_then(|b| b.attr("wrap")) != Some("none");

        Self {
            paragraphs: tx_body.children_named("p").map(Paragraph::from_element).collect(),
            autofit,
            wrap,
            margins,
        }
    }

    #[inline]
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    #[inline]
    pub fn autofit(&self) -> AutofitType {
        self.autofit
    }

    /// Whether text wraps at the shape edge (`wrap` other than `none`).
    #[inline]
    pub fn is_wrapped(&self) -> bool {
        self.wrap
    }

    #[inline]
    pub fn margins(&self) -> Margins {
        self.margins
    }

    /// Paragraph texts joined by `\n`.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for (i, para) in self.paragraphs.iter().enumerate() {
            if i > 0 {
                text.push('\n');
            }
            text.push_str(para.text());
        }
        text
    }
}

/// Qualified name for a new child, reusing the template's prefix.
fn sibling_name(template: &XmlElement, local: &str) -> String {
    match template.prefix() {
        Some(prefix) => format!("{}:{}", prefix, local),
        None => local.to_string(),
    }
}

/// A paragraph shaped like `template` holding `text` in a single run.
///
/// Paragraph and end-of-paragraph properties are kept, as are the first run's
/// properties. Empty text produces a paragraph without runs.
fn paragraph_like(template: &XmlElement, text: &str) -> XmlElement {
    let mut p = XmlElement::new(template.name());
    for (key, value) in template.attributes() {
        p.set_attr(key, value.as_str());
    }
    if let Some(ppr) = template.first_child("pPr") {
        p.push_child(ppr.clone());
    }

    if !text.is_empty() {
        let mut run = XmlElement::new(sibling_name(template, "r"));
        if let Some(rpr) = template.child_path(&["r", "rPr"]) {
            run.push_child(rpr.clone());
        }
        run.push_child(XmlElement::new(sibling_name(template, "t")).with_text(text));
        p.push_child(run);
    }

    if let Some(end) = template.first_child("endParaRPr") {
        p.push_child(end.clone());
    }
    p
}

/// Replace all paragraphs with `text`, one paragraph per line.
pub(crate) fn set_body_text(tx_body: &mut XmlElement, text: &str) {
    let template = tx_body
        .first_child("p")
        .cloned()
        .unwrap_or_else(|| XmlElement::new("a:p"));
    let at = tx_body
        .position_of("p")
        .unwrap_or_else(|| tx_body.nodes().len());
    tx_body.remove_children(|e| e.local_name() == "p");

    for (offset, line) in text.split('\n').enumerate() {
        tx_body.insert_child(at + offset, paragraph_like(&template, line));
    }
}

/// Append a paragraph modelled on the last one, with `text` as its content.
pub(crate) fn append_paragraph(tx_body: &mut XmlElement, text: &str) {
    match tx_body.last_position_of("p") {
        Some(last) => {
            let template = tx_body
                .children_named("p")
                .last()
                .cloned()
                .unwrap_or_else(|| XmlElement::new("a:p"));
            let mut p = paragraph_like(&template, text);
            if p.first_child("pPr").is_none() {
                p.insert_child(0, XmlElement::new(sibling_name(&template, "pPr")));
            }
            tx_body.insert_child(last + 1, p);
        },
        None => {
            tx_body.push_child(paragraph_like(&XmlElement::new("a:p"), text));
        },
    }
}

/// Remove the paragraph at `index`.
///
/// A text body must keep at least one paragraph, so removing the only one
/// empties it instead.
pub(crate) fn remove_paragraph_at(tx_body: &mut XmlElement, index: usize) -> Result<()> {
    let len = tx_body.children_named("p").count();
    if index >= len {
        return Err(OoxmlError::IndexOutOfRange { index, len });
    }

    if len == 1 {
        if let Some(p) = tx_body.first_child_mut("p") {
            let emptied = paragraph_like(p, "");
            *p = emptied;
        }
        return Ok(());
    }

    let mut seen = 0;
    tx_body.remove_children(|e| {
        if e.local_name() != "p" {
            return false;
        }
        let hit = seen == index;
        seen += 1;
        hit
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"<p:txBody><a:bodyPr wrap="none" lIns="180000" tIns="0"><a:spAutoFit/></a:bodyPr><a:lstStyle/>
        <a:p><a:pPr lvl="1"/><a:r><a:rPr lang="en-US" sz="1400" b="1"/><a:t>Hello </a:t></a:r><a:r><a:rPr sz="1200"/><a:t>world</a:t></a:r><a:br/><a:fld type="slidenum"><a:t>3</a:t></a:fld><a:endParaRPr sz="1400"/></a:p>
        <a:p><a:r><a:t>Second</a:t></a:r></a:p>
    </p:txBody>"#;

    fn body() -> XmlElement {
        XmlElement::parse(BODY.as_bytes()).unwrap()
    }

    #[test]
    fn test_frame_model() {
        let frame = TextFrame::from_body(&body());
        assert_eq!(frame.autofit(), AutofitType::Resize);
        assert!(!frame.is_wrapped());
        assert_eq!(frame.paragraphs().len(), 2);

        let first = &frame.paragraphs()[0];
        assert_eq!(first.level(), 2);
        assert_eq!(first.runs().len(), 2);
        assert_eq!(first.runs()[0].font.size, Some(1400));
        assert_eq!(first.runs()[0].font.bold, Some(true));
        assert_eq!(first.text(), "Hello world\u{b}3");
        assert_eq!(frame.paragraphs()[1].level(), 1);
        assert_eq!(frame.text(), "Hello world\u{b}3\nSecond");
    }

    #[test]
    fn test_margins() {
        let frame = TextFrame::from_body(&body());
        let margins = frame.margins();
        assert_eq!(margins.left, 180_000);
        assert_eq!(margins.right, 91_440);
        assert_eq!(margins.top, 0);
        assert_eq!(margins.bottom, 45_720);
        assert!((margins.left_cm() - 0.5).abs() < 1e-9);
        assert_eq!(margins.px(96), (18, 9, 0, 4));

        let defaults = Margins::default();
        assert!((defaults.left_cm() - 0.254).abs() < 1e-9);
    }

    #[test]
    fn test_defaults_without_body_properties() {
        let frame = TextFrame::from_body(&XmlElement::parse(br#"<p:txBody><a:p/></p:txBody>"#).unwrap());
        assert_eq!(frame.autofit(), AutofitType::None);
        assert!(frame.is_wrapped());
        assert_eq!(frame.margins(), Margins::default());
        assert_eq!(frame.text(), "");
    }

    #[test]
    fn test_set_body_text_splits_lines() {
        let mut tx_body = body();
        set_body_text(&mut tx_body, "One\nTwo");
        let frame = TextFrame::from_body(&tx_body);
        assert_eq!(frame.text(), "One\nTwo");
        // formatting of the first paragraph carries over
        let second = &frame.paragraphs()[1];
        assert_eq!(second.level(), 2);
        assert_eq!(second.runs()[0].font.size, Some(1400));
        assert!(tx_body.first_child("lstStyle").is_some());
    }

    #[test]
    fn test_append_paragraph_copies_last() {
        let mut tx_body = body();
        append_paragraph(&mut tx_body, "Third");
        let frame = TextFrame::from_body(&tx_body);
        assert_eq!(frame.paragraphs().len(), 3);
        assert_eq!(frame.paragraphs()[2].text(), "Third");
        let last = tx_body.children_named("p").last().unwrap();
        assert!(last.first_child("pPr").is_some());

        let mut bare = XmlElement::parse(br#"<p:txBody><a:bodyPr/></p:txBody>"#).unwrap();
        append_paragraph(&mut bare, "x");
        assert_eq!(TextFrame::from_body(&bare).text(), "x");
        assert_eq!(bare.first_child("p").map(XmlElement::name), Some("a:p"));
    }

    #[test]
    fn test_remove_paragraph() {
        let mut tx_body = body();
        remove_paragraph_at(&mut tx_body, 0).unwrap();
        assert_eq!(TextFrame::from_body(&tx_body).text(), "Second");

        remove_paragraph_at(&mut tx_body, 0).unwrap();
        assert_eq!(tx_body.children_named("p").count(), 1);
        assert_eq!(TextFrame::from_body(&tx_body).text(), "");

        let err = remove_paragraph_at(&mut tx_body, 4).unwrap_err();
        assert!(matches!(err, OoxmlError::IndexOutOfRange { index: 4, len: 1 }));
    }
}
