//! Fixed-size, unsplittable elements: signatures, logos and rules.

use super::{Pass, Style};
use crate::model::{Align, DrawCommand, ImageRef, Weight};
use crate::raster::{ImagePayload, RasterImage};

/// Space between the signature label and the signing box.
const SIGNATURE_BOX_GAP: f32 = 6.0;
/// Space between the signing box and the signer details.
const SIGNATURE_DETAILS_GAP: f32 = 10.0;

/// Total height of a signature block: label, signing box, then name,
/// optional title and date lines.
pub(super) fn signature_height(style: &Style, has_title: bool) -> f32 {
    let detail_lines = if has_title { 3.0 } else { 2.0 };
    style.line_height(style.signature_label_size)
        + SIGNATURE_BOX_GAP
        + style.signature_height
        + SIGNATURE_DETAILS_GAP
        + detail_lines * style.line_height(style.signature_detail_size)
}

impl<'c, 'm, 'a> Pass<'c, 'm, 'a> {
    pub(super) fn signature(
        &mut self,
        label: &str,
        image: Option<&'a RasterImage>,
        signer_name: &str,
        title: Option<&str>,
        date: &str,
    ) {
        let geometry = self.geometry();
        let style = self.style();
        let x = geometry.margin;

        let slot = self.place(signature_height(style, title.is_some()));
        let mut y = slot.top;

        self.text(x, y, label, style.signature_label_size, Weight::Bold);
        y += style.line_height(style.signature_label_size) + SIGNATURE_BOX_GAP;

        if let Some(image) = image {
            self.commands.push(DrawCommand::Image {
                x,
                y,
                width: style.signature_width,
                height: style.signature_height,
                page_index: slot.page_index,
                image,
            });
        }
        y += style.signature_height;
        self.commands.push(DrawCommand::Line {
            x1: x,
            y1: y,
            x2: x + style.signature_width,
            y2: y,
            thickness: 0.5,
        });
        y += SIGNATURE_DETAILS_GAP;

        let detail_height = style.line_height(style.signature_detail_size);
        let mut details = vec![format!("Name: {}", signer_name)];
        if let Some(title) = title {
            details.push(format!("Title: {}", title));
        }
        details.push(format!("Date: {}", date));
        for line in details {
            self.text(x, y, &line, style.signature_detail_size, Weight::Regular);
            y += detail_height;
        }
    }

    /// A single image in the text flow. Unreadable images take no space.
    pub(super) fn flow_image(&mut self, image: &ImageRef<'a>, width: f32, height: f32, align: Align) {
        let raster = match image.payload {
            ImagePayload::Ready(raster) => raster,
            ImagePayload::Unreadable(reason) => {
                log::warn!("Skipping image: {}", reason);
                return;
            }
        };

        let geometry = self.geometry();
        let slot = self.place(height);
        let x = Self::aligned_x(align, geometry.margin, geometry.content_width(), width);
        self.commands.push(DrawCommand::Image {
            x,
            y: slot.top,
            width,
            height,
            page_index: slot.page_index,
            image: raster,
        });
    }

    pub(super) fn rule(&mut self, thickness: f32, width: Option<f32>) {
        let geometry = self.geometry();
        let padding = self.style().rule_padding;
        let slot = self.place(thickness + 2.0 * padding);

        let right = geometry.margin + geometry.content_width();
        let left = match width {
            Some(w) => (right - w).max(geometry.margin),
            None => geometry.margin,
        };
        let y = slot.top + padding + thickness / 2.0;
        self.commands.push(DrawCommand::Line {
            x1: left,
            y1: y,
            x2: right,
            y2: y,
            thickness,
        });
    }
}
