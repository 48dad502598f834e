//! Per-level font data read from a text body's list style.

use crate::ooxml::element::XmlElement;
use std::collections::BTreeMap;

/// Font attributes of one paragraph level; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontData {
    /// Size in hundredths of a point (`sz`)
    pub size: Option<i32>,
    /// Latin typeface (`a:latin/@typeface`)
    pub latin: Option<String>,
    /// East Asian typeface (`a:ea/@typeface`)
    pub east_asian: Option<String>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
}

impl FontData {
    /// Read `a:defRPr`, `a:rPr` or `a:endParaRPr`.
    pub fn from_run_properties(props: &XmlElement) -> Self {
        let typeface = |local: &str| {
            props
                .first_child(local)
                .and_then(|e| e.attr("typeface"))
                .map(str::to_owned)
        };
        Self {
            size: props.attr_i64("sz").and_then(|v| i32::try_from(v).ok()),
            latin: typeface("latin"),
            east_asian: typeface("ea"),
            bold: props.attr_bool("b"),
            italic: props.attr_bool("i"),
        }
    }

    /// Fill the fields still unset from `other`; set fields are never overwritten.
    pub fn merge_missing(&mut self, other: &FontData) {
        if self.size.is_none() {
            self.size = other.size;
        }
        if self.latin.is_none() {
            self.latin.clone_from(&other.latin);
        }
        if self.east_asian.is_none() {
            self.east_asian.clone_from(&other.east_asian);
        }
        if self.bold.is_none() {
            self.bold = other.bold;
        }
        if self.italic.is_none() {
            self.italic = other.italic;
        }
    }

    /// Whether inheritance can stop: size, Latin typeface, bold and italic are known.
    pub fn is_filled(&self) -> bool {
        self.size.is_some() && self.latin.is_some() && self.bold.is_some() && self.italic.is_some()
    }

    /// Size in points.
    pub fn size_pt(&self) -> Option<f64> {
        self.size.map(crate::common::unit::centipoints_to_pt)
    }
}

/// Level (1..=9) to font data.
pub type LevelTable = BTreeMap<u8, FontData>;

/// Parse `lvlNpPr` into its level number.
fn level_of(local: &str) -> Option<u8> {
    let digits = local.strip_prefix("lvl")?.strip_suffix("pPr")?;
    let level: u8 = digits.parse().ok()?;
    (1..=9).contains(&level).then_some(level)
}

/// Build the level table of a `p:txBody`.
///
/// Levels come from `a:lstStyle/a:lvlNpPr/a:defRPr`. A body whose list style
/// declares nothing falls back to the first paragraph's `a:endParaRPr/@sz`,
/// recorded as level 1.
pub fn level_table(tx_body: &XmlElement) -> LevelTable {
    let mut table = LevelTable::new();

    if let Some(list_style) = tx_body.first_child("lstStyle") {
        for level_props in list_style.elements() {
            let Some(level) = level_of(level_props.local_name()) else {
                continue;
            };
            if let Some(def_rpr) = level_props.first_child("defRPr") {
                table.insert(level, FontData::from_run_properties(def_rpr));
            }
        }
    }

    if table.is_empty() {
        let end_size = tx_body
            .child_path(&["p", "endParaRPr"])
            .and_then(|e| e.attr_i64("sz"))
            .and_then(|v| i32::try_from(v).ok());
        if let Some(size) = end_size {
            table.insert(
                1,
                FontData {
                    size: Some(size),
                    ..FontData::default()
                },
            );
        }
    }

    table
}
