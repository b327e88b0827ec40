use super::Pass;
use crate::layout::{measure_wrap, FontSpec};
use crate::model::{Align, DrawCommand, TableColumn, Weight};

/// Cell text never touches the next column.
const CELL_PADDING: f32 = 6.0;
/// Space between a wrapped label and the value column.
const LABEL_GAP: f32 = 8.0;

impl<'c, 'm, 'a> Pass<'c, 'm, 'a> {
    /// Headings and paragraphs: one placement per wrapped line.
    pub(super) fn wrapped_lines(&mut self, text: &str, size: f32, weight: Weight, align: Align) {
        let geometry = self.geometry();
        let font = FontSpec::new(size, weight);
        let line_height = self.style().line_height(size);
        let measure = self.measure();

        let wrapped = measure_wrap(text, font, geometry.content_width(), measure);
        for line in wrapped.iter() {
            let slot = self.place(line_height);
            let width = measure.text_width(line, size, weight);
            let x = Self::aligned_x(align, geometry.margin, geometry.content_width(), width);
            self.text(x, slot.top, line, size, weight);
        }
    }

    /// Label on the left, value beside it. Both wrap in their own column and
    /// the taller of the two sets the row height. Rows taller than a full
    /// page are split into page-sized chunks.
    pub(super) fn label_values(&mut self, rows: &[(String, String)], size: f32) {
        let geometry = self.geometry();
        let style = self.style();
        let line_height = style.line_height(size);
        let label_width = (style.label_width - LABEL_GAP).max(1.0);
        let value_x = geometry.margin + style.label_width;
        let value_width = geometry.content_width() - style.label_width;
        let max_lines = ((geometry.content_height() / line_height).floor() as usize).max(1);
        let measure = self.measure();

        for (label, value) in rows {
            let labels: Vec<&str> = measure_wrap(label, FontSpec::new(size, Weight::Bold), label_width, measure)
                .iter()
                .collect();
            let values: Vec<&str> = measure_wrap(value, FontSpec::regular(size), value_width, measure)
                .iter()
                .collect();
            let line_count = labels.len().max(values.len()).max(1);

            let mut start = 0;
            while start < line_count {
                let n = (line_count - start).min(max_lines);
                let slot = self.place(n as f32 * line_height);
                for i in 0..n {
                    let y = slot.top + i as f32 * line_height;
                    if let Some(line) = labels.get(start + i) {
                        self.text(geometry.margin, y, line, size, Weight::Bold);
                    }
                    if let Some(line) = values.get(start + i) {
                        self.text(value_x, y, line, size, Weight::Regular);
                    }
                }
                start += n;
            }
            self.advance(style.row_gap);
        }
    }

    /// Bold header with a rule under it, then the rows. The header is only
    /// drawn together with the row chunk that follows it, and again at the
    /// top of every page the table continues on. Rows taller than a page are
    /// split into chunks that fit under a header.
    pub(super) fn table(&mut self, columns: &[TableColumn], rows: &[Vec<String>], size: f32) {
        let geometry = self.geometry();
        let style = self.style();
        let line_height = style.line_height(size);
        let has_header = columns.iter().any(|c| !c.header.is_empty());
        let header_height = if has_header {
            line_height + style.rule_padding
        } else {
            0.0
        };
        let max_lines = (((geometry.content_height() - header_height - style.table_row_gap)
            / line_height)
            .floor() as usize)
            .max(1);
        let measure = self.measure();

        if rows.is_empty() {
            if has_header {
                let slot = self.place(header_height);
                self.table_header(columns, slot.top, size);
            }
            return;
        }

        let mut header_pending = has_header;
        for row in rows {
            let cells: Vec<Vec<&str>> = columns
                .iter()
                .enumerate()
                .map(|(i, column)| {
                    let text = row.get(i).map(String::as_str).unwrap_or("");
                    let width = (column.width - CELL_PADDING).max(1.0);
                    measure_wrap(text, FontSpec::regular(size), width, measure)
                        .iter()
                        .collect()
                })
                .collect();
            let line_count = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);

            let mut start = 0;
            while start < line_count {
                let n = (line_count - start).min(max_lines);
                let chunk_height = n as f32 * line_height + style.table_row_gap;
                let with_header = chunk_height + if header_pending { header_height } else { 0.0 };
                if !self.cursor.fits(with_header) && !self.cursor.at_page_top() {
                    self.break_page();
                    header_pending = has_header;
                }
                let header = if header_pending { header_height } else { 0.0 };
                let slot = self.place(header + chunk_height);
                let mut top = slot.top;
                if header_pending {
                    self.table_header(columns, top, size);
                    top += header_height;
                    header_pending = false;
                }

                let mut x = geometry.margin;
                for (column, lines) in columns.iter().zip(&cells) {
                    let end = (start + n).min(lines.len());
                    for (i, line) in lines.get(start..end).unwrap_or(&[]).iter().enumerate() {
                        let width = measure.text_width(line, size, Weight::Regular);
                        let span = column.width - CELL_PADDING;
                        let line_x = Self::aligned_x(column.align, x, span, width);
                        self.text(line_x, top + i as f32 * line_height, line, size, Weight::Regular);
                    }
                    x += column.width;
                }

                start += n;
                if start < line_count {
                    self.break_page();
                    header_pending = has_header;
                }
            }
        }
    }

    fn table_header(&mut self, columns: &[TableColumn], top: f32, size: f32) {
        let geometry = self.geometry();
        let line_height = self.style().line_height(size);
        let measure = self.measure();

        let mut x = geometry.margin;
        for column in columns {
            let width = measure.text_width(&column.header, size, Weight::Bold);
            let header_x = Self::aligned_x(column.align, x, column.width - CELL_PADDING, width);
            self.text(header_x, top, &column.header, size, Weight::Bold);
            x += column.width;
        }

        let total: f32 = columns.iter().map(|c| c.width).sum();
        let rule_y = top + line_height + self.style().rule_padding / 2.0;
        self.commands.push(DrawCommand::Line {
            x1: geometry.margin,
            y1: rule_y,
            x2: geometry.margin + total.min(geometry.content_width()),
            y2: rule_y,
            thickness: 1.0,
        });
    }
}
