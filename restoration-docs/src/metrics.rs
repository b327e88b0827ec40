//! Glyph widths for the builtin Helvetica family.
//!
//! The PDF backend draws with the standard 14 fonts, which carry no embedded
//! metrics, so widths come from the Adobe AFM tables (1000 units/em).

use crate::model::Weight;

/// Width oracle used by text wrapping and alignment.
pub trait TextMeasure {
    /// Rendered width of `text` in points.
    fn text_width(&self, text: &str, font_size: f32, weight: Weight) -> f32;
}

/// Helvetica ascender as a fraction of the font size.
pub const HELVETICA_ASCENT: f32 = 0.718;

/// Fallback width for characters outside printable ASCII.
const DEFAULT_WIDTH: u16 = 556;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,                               // 0..9
    278, 278, 584, 584, 584, 556, 1015,                                             // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,                // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,                // N..Z
    278, 278, 278, 469, 556, 333,                                                   // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,                // a..m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,                // n..z
    334, 260, 334, 584,                                                             // '{'..'~'
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

fn char_width_1000(ch: char, weight: Weight) -> u16 {
    let table = match weight {
        Weight::Bold => &HELVETICA_BOLD,
        // Oblique shares the upright widths.
        Weight::Regular | Weight::Italic => &HELVETICA,
    };
    match ch {
        '\t' => table[0],
        ' '..='~' => table[ch as usize - 32],
        _ => DEFAULT_WIDTH,
    }
}

/// Metrics for the builtin Helvetica, Helvetica-Bold and Helvetica-Oblique fonts.
#[derive(Debug, Clone, Copy, Default)]
pub struct HelveticaMetrics;

impl TextMeasure for HelveticaMetrics {
    fn text_width(&self, text: &str, font_size: f32, weight: Weight) -> f32 {
        let units: u32 = text
            .chars()
            .map(|ch| char_width_1000(ch, weight) as u32)
            .sum();
        units as f32 * font_size / 1000.0
    }
}
