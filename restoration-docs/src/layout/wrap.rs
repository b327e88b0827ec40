//! Greedy line filling against a fixed width.

use crate::metrics::TextMeasure;
use crate::model::Weight;

/// Font selection for measuring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub size: f32,
    pub weight: Weight,
}

impl FontSpec {
    pub fn new(size: f32, weight: Weight) -> Self {
        Self { size, weight }
    }

    pub fn regular(size: f32) -> Self {
        Self::new(size, Weight::Regular)
    }
}

/// One output line. `gap` is the whitespace swallowed by the break that
/// ended the line (empty for the last line and for splits inside a word).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub text: &'a str,
    pub gap: &'a str,
}

/// Result of [`measure_wrap`]; iterate it as many times as needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wrapped<'a> {
    lines: Vec<Line<'a>>,
}

impl<'a> Wrapped<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.lines.iter().map(|l| l.text)
    }

    pub fn lines(&self) -> &[Line<'a>] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The source text, rebuilt from lines and their gaps.
    pub fn reconstruct(&self) -> String {
        self.lines.iter().flat_map(|l| [l.text, l.gap]).collect()
    }
}

/// Wrap `text` into the fewest lines no wider than `max_width`, breaking only
/// at whitespace. `\n` always ends a line. A word that cannot fit on a line of
/// its own is split between characters; every line keeps at least one
/// character, so a single glyph wider than `max_width` still overflows.
pub fn measure_wrap<'a>(
    text: &'a str,
    font: FontSpec,
    max_width: f32,
    measure: &dyn TextMeasure,
) -> Wrapped<'a> {
    let mut filler = LineFiller {
        text,
        font,
        max_width,
        measure,
        lines: Vec::new(),
    };

    let mut start = 0;
    loop {
        let end = text[start..].find('\n').map(|i| start + i);
        match end {
            Some(nl) => {
                filler.fill(start, nl, nl + 1);
                start = nl + 1;
            }
            None => {
                filler.fill(start, text.len(), text.len());
                break;
            }
        }
    }

    Wrapped {
        lines: filler.lines,
    }
}

struct LineFiller<'a, 'm> {
    text: &'a str,
    font: FontSpec,
    max_width: f32,
    measure: &'m dyn TextMeasure,
    lines: Vec<Line<'a>>,
}

impl<'a> LineFiller<'a, '_> {
    fn width(&self, from: usize, to: usize) -> f32 {
        self.measure
            .text_width(&self.text[from..to], self.font.size, self.font.weight)
    }

    fn fits(&self, from: usize, to: usize) -> bool {
        self.width(from, to) <= self.max_width
    }

    fn push(&mut self, from: usize, to: usize, gap_end: usize) {
        self.lines.push(Line {
            text: &self.text[from..to],
            gap: &self.text[to..gap_end],
        });
    }

    /// Fill one hard line `[start, end)`; `gap_end` includes its newline.
    fn fill(&mut self, start: usize, end: usize, gap_end: usize) {
        let mut line_start = start;
        // End of the last word on the current line; equal to `line_start`
        // while the line holds no word yet.
        let mut line_end = start;
        let mut has_word = false;

        for (word_start, word_end) in words(self.text, start, end) {
            if has_word && !self.fits(line_start, word_end) {
                self.push(line_start, line_end, word_start);
                line_start = word_start;
                has_word = false;
            }
            if !has_word && !self.fits(line_start, word_end) {
                line_start = self.split_word(line_start, word_end);
            }
            line_end = word_end;
            has_word = true;
        }

        self.push(line_start, line_end, gap_end);
    }

    /// Emit full-width pieces of an overlong word; returns where the
    /// remaining (fitting) tail starts.
    fn split_word(&mut self, mut from: usize, word_end: usize) -> usize {
        while !self.fits(from, word_end) {
            let mut cut = from;
            for (offset, ch) in self.text[from..word_end].char_indices() {
                let next = from + offset + ch.len_utf8();
                if cut > from && !self.fits(from, next) {
                    break;
                }
                cut = next;
            }
            if cut >= word_end {
                break;
            }
            self.push(from, cut, cut);
            from = cut;
        }
        from
    }
}

/// Byte ranges of whitespace-separated words inside `[start, end)`.
fn words(text: &str, start: usize, end: usize) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut word_start = None;
    for (i, ch) in text[start..end].char_indices() {
        let pos = start + i;
        match (ch.is_whitespace(), word_start) {
            (false, None) => word_start = Some(pos),
            (true, Some(ws)) => {
                out.push((ws, pos));
                word_start = None;
            }
            _ => {}
        }
    }
    if let Some(ws) = word_start {
        out.push((ws, end));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::HelveticaMetrics;

    /// Every character is 10pt wide at any size.
    struct Mono;

    impl TextMeasure for Mono {
        fn text_width(&self, text: &str, _font_size: f32, _weight: Weight) -> f32 {
            text.chars().count() as f32 * 10.0
        }
    }

    fn wrap(text: &str, max_width: f32) -> Vec<String> {
        measure_wrap(text, FontSpec::regular(10.0), max_width, &Mono)
            .iter()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn empty_input_yields_one_empty_line() {
        assert_eq!(wrap("", 100.0), vec![String::new()]);
    }

    #[test]
    fn greedy_fill() {
        assert_eq!(
            wrap("aaa bbb ccc dddd", 70.0),
            vec!["aaa bbb", "ccc", "dddd"]
        );
        assert_eq!(wrap("aaa bbb", 70.0), vec!["aaa bbb"]);
    }

    #[test]
    fn break_swallows_whitespace_run() {
        let w = measure_wrap("ab   cd", FontSpec::regular(10.0), 30.0, &Mono);
        assert_eq!(
            w.lines(),
            &[Line { text: "ab", gap: "   " }, Line { text: "cd", gap: "" }]
        );
    }

    #[test]
    fn newline_forces_break_and_keeps_blank_lines() {
        assert_eq!(wrap("one\n\ntwo", 1000.0), vec!["one", "", "two"]);
        let w = measure_wrap("a \nb", FontSpec::regular(10.0), 1000.0, &Mono);
        assert_eq!(w.lines()[0], Line { text: "a", gap: " \n" });
    }

    #[test]
    fn overlong_word_is_split_between_characters() {
        assert_eq!(wrap("abcdefgh xy", 30.0), vec!["abc", "def", "gh", "xy"]);
        assert_eq!(wrap("abcdefgh", 30.0), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn glyph_wider_than_line_still_progresses() {
        assert_eq!(wrap("abc", 5.0), vec!["a", "b", "c"]);
    }

    #[test]
    fn restartable() {
        let w = measure_wrap("one two three", FontSpec::regular(10.0), 70.0, &Mono);
        let first: Vec<_> = w.iter().collect();
        let second: Vec<_> = w.iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn lines_fit_and_reconstruct() {
        let samples = [
            "",
            " leading space",
            "trailing space ",
            "This is to certify that the contractor has successfully completed all work.",
            "multi\nline\n\ninput with   irregular\tspacing",
            "Supercalifragilisticexpialidocious is long",
            "Zoë's café, naïve façade",
        ];
        let m = HelveticaMetrics;
        for text in samples {
            for width in [20.0_f32, 55.5, 120.0, 400.0] {
                let font = FontSpec::regular(11.0);
                let w = measure_wrap(text, font, width, &m);
                assert!(!w.is_empty());
                assert_eq!(w.reconstruct(), text, "width {width}");
                for line in w.iter() {
                    let lw = m.text_width(line, font.size, font.weight);
                    assert!(
                        lw <= width || line.chars().count() == 1,
                        "{line:?} is {lw}pt wide, limit {width}"
                    );
                }
            }
        }
    }
}
