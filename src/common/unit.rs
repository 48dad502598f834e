//! Unit conversion utilities.
//!
//! Shape coordinates are stored as EMUs and exposed as pixels at a fixed
//! resolution (96 DPI unless configured otherwise). Conversions truncate
//! toward zero, the same way box coordinates are reported by PowerPoint
//! tooling.

pub const EMUS_PER_INCH: i64 = 914_400;
pub const EMUS_PER_CM: i64 = 360_000;
pub const EMUS_PER_PT: i64 = 12_700;
pub const DEFAULT_DPI: u32 = 96;

/// `dpi` must be non-zero; layout options are validated before they reach here.
#[inline]
pub fn emu_to_px(emu: i64, dpi: u32) -> i32 {
    (emu * dpi as i64 / EMUS_PER_INCH) as i32
}

#[inline]
pub fn px_to_emu(px: i32, dpi: u32) -> i64 {
    px as i64 * EMUS_PER_INCH / dpi as i64
}

#[inline]
pub fn emu_to_cm(emu: i64) -> f64 {
    emu as f64 / EMUS_PER_CM as f64
}

#[inline]
pub fn emu_to_pt_f64(emu: i64) -> f64 {
    emu as f64 / EMUS_PER_PT as f64
}

/// Points to EMU, rounded to the nearest unit.
#[inline]
pub fn pt_to_emu(pt: f64) -> i64 {
    (pt * EMUS_PER_PT as f64).round() as i64
}

/// Convert a DrawingML font size (hundredths of a point) to points.
#[inline]
pub fn centipoints_to_pt(size: i32) -> f64 {
    size as f64 / 100.0
}
