//! Geometry arithmetic for "resize shape to fit text".
//!
//! All values are 96 DPI pixels. The functions are pure; the shape feeds
//! them measurements and writes the results back to its transform.

/// Number of rows `text_width` occupies in a box `available` wide.
///
/// A partial row counts as a full one; exact division adds nothing.
pub fn required_rows(text_width: f64, available: f64) -> u32 {
    let rows = text_width / available;
    let whole = rows.trunc();
    let mut count = whole as u32;
    if rows - whole > 0.0 {
        count += 1;
    }
    count
}

/// New height and vertical shift of a resized shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeightFit {
    pub height: i32,
    /// Amount to subtract from `y` so the box grows around its centre
    pub y_shift: i32,
}

/// Fit the box height to `rows` lines.
///
/// The returned height adds the vertical insets on top of a required height
/// that already contains them, so the margins count three times in total.
pub fn fit_height(rows: u32, line_height: f64, top: i32, bottom: i32, box_height: i32) -> HeightFit {
    let margins = f64::from(top + bottom);
    let required = f64::from(rows) * line_height + margins;
    let current_block = f64::from(box_height - top - bottom);
    let y_offset = (required - current_block) / 2.0;
    HeightFit {
        height: required as i32 + top + bottom + top + bottom,
        y_shift: y_offset as i32,
    }
}

/// Width of a non-wrapping box holding a line `raw_width` wide.
pub fn fit_width(raw_width: f64, scale: f64, left: i32, right: i32) -> i32 {
    (raw_width * scale) as i32 + left + right
}

/// Index of the paragraph with the most characters; the first one wins ties.
pub fn longest_paragraph<'a>(texts: impl IntoIterator<Item = &'a str>) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (index, text) in texts.into_iter().enumerate() {
        let len = text.chars().count();
        if best.is_none_or(|(_, best_len)| len > best_len) {
            best = Some((index, len));
        }
    }
    best.map(|(index, _)| index)
}

/// Most frequent key and the position of its first occurrence.
///
/// When several keys are equally frequent, the one seen first wins.
pub fn most_common<K: PartialEq + Copy>(keys: impl IntoIterator<Item = K>) -> Option<(K, usize)> {
    let mut groups: Vec<(K, usize, usize)> = Vec::new();
    for (position, key) in keys.into_iter().enumerate() {
        match groups.iter_mut().find(|(k, _, _)| *k == key) {
            Some(group) => group.1 += 1,
            None => groups.push((key, 1, position)),
        }
    }

    let mut winner: Option<(K, usize, usize)> = None;
    for group in groups {
        if winner.is_none_or(|w| group.1 > w.1) {
            winner = Some(group);
        }
    }
    winner.map(|(key, _, first)| (key, first))
}
