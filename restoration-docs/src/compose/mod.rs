//! # Document Composer
//!
//! Turns an ordered list of [`Block`]s into absolute [`DrawCommand`]s on
//! fixed-size pages. Blocks are handled strictly in order with no lookahead;
//! every vertical move goes through one [`Cursor`], and every page break the
//! cursor takes is echoed as a [`DrawCommand::PageBreak`].

mod grid;
mod text;
mod fixed;

use crate::error::DocError;
use crate::layout::{Cursor, PageGeometry, Slot};
use crate::metrics::TextMeasure;
use crate::model::{Align, Block, DrawCommand, Weight};

/// Spacing knobs shared by all block renderers. All values are in points.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    /// Added to the font size to get a line height.
    pub leading: f32,
    /// Width of the label column in label/value rows.
    pub label_width: f32,
    /// Gap after each label/value row.
    pub row_gap: f32,
    /// Gap after each table row.
    pub table_row_gap: f32,
    pub caption_size: f32,
    /// Distance between a grid cell and its caption.
    pub caption_gap: f32,
    pub signature_label_size: f32,
    pub signature_detail_size: f32,
    pub signature_width: f32,
    pub signature_height: f32,
    pub rule_padding: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            leading: 4.0,
            label_width: 150.0,
            row_gap: 10.0,
            table_row_gap: 6.0,
            caption_size: 9.0,
            caption_gap: 3.0,
            signature_label_size: 12.0,
            signature_detail_size: 10.0,
            signature_width: 200.0,
            signature_height: 60.0,
            rule_padding: 4.0,
        }
    }
}

impl Style {
    pub fn line_height(&self, font_size: f32) -> f32 {
        font_size + self.leading
    }
}

pub struct Composer<'m> {
    geometry: PageGeometry,
    measure: &'m dyn TextMeasure,
    style: Style,
}

impl<'m> Composer<'m> {
    pub fn new(geometry: PageGeometry, measure: &'m dyn TextMeasure) -> Self {
        Self {
            geometry,
            measure,
            style: Style::default(),
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Lay out `blocks` starting at the top of page 0.
    ///
    /// Geometry and block shapes are checked up front; once layout starts the
    /// only element-level failures (unreadable images) are logged and skipped.
    pub fn run<'a>(&self, blocks: &[Block<'a>]) -> Result<Vec<DrawCommand<'a>>, DocError> {
        self.geometry.validate()?;
        for block in blocks {
            self.validate(block)?;
        }

        let mut pass = Pass {
            composer: self,
            cursor: Cursor::new(self.geometry),
            commands: Vec::new(),
        };
        for block in blocks {
            pass.block(block);
        }

        // A gap that spilled over the last page leaves nothing to draw there.
        while matches!(pass.commands.last(), Some(DrawCommand::PageBreak)) {
            pass.commands.pop();
        }

        let pages = 1 + pass
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::PageBreak))
            .count();
        log::debug!(
            "composed {} blocks into {} commands over {} page(s)",
            blocks.len(),
            pass.commands.len(),
            pages
        );
        Ok(pass.commands)
    }

    fn validate(&self, block: &Block<'_>) -> Result<(), DocError> {
        let content_width = self.geometry.content_width();
        let content_height = self.geometry.content_height();
        let check_font = |size: f32| -> Result<(), DocError> {
            if !(size > 0.0) {
                return Err(DocError::InvalidLayout(format!("font size {}", size)));
            }
            if self.style.line_height(size) > content_height {
                return Err(DocError::InvalidLayout(format!(
                    "{}pt text does not fit a {}pt content area",
                    size, content_height
                )));
            }
            Ok(())
        };

        match block {
            Block::Heading { size, .. } | Block::Paragraph { size, .. } => check_font(*size),
            Block::LabelValue { size, .. } => {
                check_font(*size)?;
                if self.style.label_width >= content_width {
                    return Err(DocError::InvalidLayout(format!(
                        "label column {}pt leaves no room for values",
                        self.style.label_width
                    )));
                }
                Ok(())
            }
            Block::ImageGrid {
                columns,
                cell_width,
                cell_height,
                spacing,
                ..
            } => grid::validate(self, *columns, *cell_width, *cell_height, *spacing),
            Block::SignatureBlock { title, .. } => {
                check_font(self.style.signature_label_size)?;
                check_font(self.style.signature_detail_size)?;
                let height = fixed::signature_height(&self.style, title.is_some());
                if height > content_height || self.style.signature_width > content_width {
                    return Err(DocError::InvalidLayout(
                        "signature block does not fit on an empty page".to_string(),
                    ));
                }
                Ok(())
            }
            Block::Image { width, height, .. } => {
                if !(*width > 0.0 && *height > 0.0) {
                    return Err(DocError::InvalidLayout(format!(
                        "image size {}x{}",
                        width, height
                    )));
                }
                if *width > content_width || *height > content_height {
                    return Err(DocError::InvalidLayout(format!(
                        "image {}x{} exceeds the content area",
                        width, height
                    )));
                }
                Ok(())
            }
            Block::Table { columns, rows, size } => {
                check_font(*size)?;
                let total: f32 = columns.iter().map(|c| c.width).sum();
                if columns.is_empty() || columns.iter().any(|c| !(c.width > 0.0)) {
                    return Err(DocError::InvalidLayout("table columns".to_string()));
                }
                if total > content_width + 0.5 {
                    return Err(DocError::InvalidLayout(format!(
                        "table is {}pt wide, content area is {}pt",
                        total, content_width
                    )));
                }
                if let Some(row) = rows.iter().find(|r| r.len() > columns.len()) {
                    return Err(DocError::InvalidLayout(format!(
                        "table row has {} cells for {} columns",
                        row.len(),
                        columns.len()
                    )));
                }
                // A header must fit on a page together with one line of a row.
                let line_height = self.style.line_height(*size);
                if columns.iter().any(|c| !c.header.is_empty())
                    && line_height * 2.0 + self.style.rule_padding + self.style.table_row_gap
                        > content_height
                {
                    return Err(DocError::InvalidLayout(
                        "table header and first row do not fit on an empty page".to_string(),
                    ));
                }
                Ok(())
            }
            Block::Rule { thickness, width } => {
                if !(*thickness > 0.0) || width.map_or(false, |w| !(w > 0.0)) {
                    return Err(DocError::InvalidLayout("rule size".to_string()));
                }
                Ok(())
            }
            Block::Spacer(amount) | Block::KeepRoom(amount) => {
                if *amount < 0.0 {
                    return Err(DocError::InvalidLayout(format!("negative spacing {}", amount)));
                }
                Ok(())
            }
            Block::PageBreak => Ok(()),
        }
    }
}

/// State of one composition run.
pub(crate) struct Pass<'c, 'm, 'a> {
    composer: &'c Composer<'m>,
    cursor: Cursor,
    commands: Vec<DrawCommand<'a>>,
}

impl<'c, 'm, 'a> Pass<'c, 'm, 'a> {
    fn block(&mut self, block: &Block<'a>) {
        match block {
            Block::Heading { text, size, align } => {
                self.wrapped_lines(text, *size, Weight::Bold, *align)
            }
            Block::Paragraph {
                text,
                size,
                weight,
                align,
            } => self.wrapped_lines(text, *size, *weight, *align),
            Block::LabelValue { rows, size } => self.label_values(rows, *size),
            Block::ImageGrid {
                items,
                columns,
                cell_width,
                cell_height,
                spacing,
            } => self.image_grid(items, *columns, *cell_width, *cell_height, *spacing),
            Block::SignatureBlock {
                label,
                image,
                signer_name,
                title,
                date,
            } => self.signature(label, *image, signer_name, title.as_deref(), date),
            Block::Image {
                image,
                width,
                height,
                align,
            } => self.flow_image(image, *width, *height, *align),
            Block::Table {
                columns,
                rows,
                size,
            } => self.table(columns, rows, *size),
            Block::Rule { thickness, width } => self.rule(*thickness, *width),
            Block::Spacer(amount) => self.advance(*amount),
            Block::PageBreak => {
                if !self.cursor.at_page_top() {
                    self.break_page();
                }
            }
            Block::KeepRoom(height) => {
                if !self.cursor.at_page_top() && !self.cursor.fits(*height) {
                    self.break_page();
                }
            }
        }
    }

    fn style(&self) -> &'c Style {
        &self.composer.style
    }

    fn geometry(&self) -> PageGeometry {
        self.composer.geometry
    }

    fn measure(&self) -> &'m dyn TextMeasure {
        self.composer.measure
    }

    /// Reserve room for an unsplittable element, emitting a page break first
    /// when the cursor had to move to a new page.
    fn place(&mut self, height: f32) -> Slot {
        let slot = self.cursor.place(height);
        if slot.broke {
            self.commands.push(DrawCommand::PageBreak);
        }
        slot
    }

    fn advance(&mut self, amount: f32) {
        if self.cursor.advance(amount) {
            self.commands.push(DrawCommand::PageBreak);
        }
    }

    fn break_page(&mut self) {
        self.cursor.break_page();
        self.commands.push(DrawCommand::PageBreak);
    }

    fn text(&mut self, x: f32, y: f32, content: &str, font_size: f32, weight: Weight) {
        if content.is_empty() {
            return;
        }
        self.commands.push(DrawCommand::Text {
            x,
            y,
            content: content.to_string(),
            font_size,
            weight,
        });
    }

    /// Left edge for something `width` wide aligned inside `[left, left + span]`.
    fn aligned_x(align: Align, left: f32, span: f32, width: f32) -> f32 {
        match align {
            Align::Left => left,
            Align::Center => left + ((span - width) / 2.0).max(0.0),
            Align::Right => left + (span - width).max(0.0),
        }
    }
}
