//! # PDF Output
//!
//! Replays composer output onto a `printpdf` document. Coordinates arrive
//! top-down in points; PDF space is bottom-up, so every element is flipped
//! against the page height here and nowhere else.

use std::io::BufWriter;

use printpdf::{
    BuiltinFont, Color, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject,
    IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Point, Px,
    Rgb,
};

use crate::error::DocError;
use crate::layout::PageGeometry;
use crate::metrics::{HelveticaMetrics, TextMeasure, HELVETICA_ASCENT};
use crate::model::{DrawCommand, Weight};
use crate::raster::RasterImage;

/// Consumer of draw commands, in emission order.
pub trait DrawBackend {
    fn draw(&mut self, command: &DrawCommand<'_>) -> Result<(), DocError>;

    /// Serialize the finished document.
    fn finish(self) -> Result<Vec<u8>, DocError>;
}

/// Feed every command to `backend`, then serialize. The first failure aborts
/// the whole document.
pub fn render<B: DrawBackend>(mut backend: B, commands: &[DrawCommand<'_>]) -> Result<Vec<u8>, DocError> {
    for command in commands {
        backend.draw(command)?;
    }
    backend.finish()
}

fn mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

impl Fonts {
    fn get(&self, weight: Weight) -> &IndirectFontRef {
        match weight {
            Weight::Regular => &self.regular,
            Weight::Bold => &self.bold,
            Weight::Italic => &self.italic,
        }
    }
}

pub struct PdfBackend {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    geometry: PageGeometry,
    page_index: usize,
    fonts: Fonts,
}

impl PdfBackend {
    pub fn new(title: &str, geometry: PageGeometry) -> Result<Self, DocError> {
        geometry.validate()?;
        let (doc, page1, layer1) = PdfDocument::new(
            title,
            mm(geometry.width),
            mm(geometry.height),
            "Layer 1",
        );
        let layer = doc.get_page(page1).get_layer(layer1);

        let fonts = Fonts {
            regular: doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(|e| DocError::Backend(e.to_string()))?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(|e| DocError::Backend(e.to_string()))?,
            italic: doc
                .add_builtin_font(BuiltinFont::HelveticaOblique)
                .map_err(|e| DocError::Backend(e.to_string()))?,
        };

        Ok(Self {
            doc,
            layer,
            geometry,
            page_index: 0,
            fonts,
        })
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(
            mm(self.geometry.width),
            mm(self.geometry.height),
            "Layer 1",
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.page_index += 1;
    }

    fn draw_text(&self, x: f32, y: f32, content: &str, font_size: f32, weight: Weight) {
        let baseline = self.geometry.height - (y + font_size * HELVETICA_ASCENT);
        self.layer.use_text(
            content,
            font_size,
            mm(x),
            mm(baseline),
            self.fonts.get(weight),
        );
    }

    fn draw_image(&self, raster: &RasterImage, x: f32, y: f32, width: f32, height: f32) {
        let image = Image::from(ImageXObject {
            width: Px(raster.width_px as usize),
            height: Px(raster.height_px as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: true,
            image_data: raster.rgb.clone(),
            image_filter: None,
            clipping_bbox: None,
            smask: None,
        });

        // At this DPI the image is exactly `width` points wide; the vertical
        // scale then stretches it to `height`.
        let dpi = raster.width_px.max(1) as f32 / (width / 72.0);
        let natural_height = raster.height_px.max(1) as f32 / dpi * 72.0;

        image.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(mm(x)),
                translate_y: Some(mm(self.geometry.height - y - height)),
                dpi: Some(dpi),
                scale_y: Some(height / natural_height),
                ..Default::default()
            },
        );
    }

    fn draw_line(&self, x1: f32, y1: f32, x2: f32, y2: f32, thickness: f32) {
        let line_color = Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None));
        self.layer.set_outline_color(line_color);
        self.layer.set_outline_thickness(thickness);

        let h = self.geometry.height;
        let points = vec![
            (Point::new(mm(x1), mm(h - y1)), false),
            (Point::new(mm(x2), mm(h - y2)), false),
        ];
        self.layer.add_line(Line {
            points,
            is_closed: false,
        });
    }
}

impl TextMeasure for PdfBackend {
    fn text_width(&self, text: &str, font_size: f32, weight: Weight) -> f32 {
        HelveticaMetrics.text_width(text, font_size, weight)
    }
}

impl DrawBackend for PdfBackend {
    fn draw(&mut self, command: &DrawCommand<'_>) -> Result<(), DocError> {
        match command {
            DrawCommand::Text {
                x,
                y,
                content,
                font_size,
                weight,
            } => self.draw_text(*x, *y, content, *font_size, *weight),
            DrawCommand::Image {
                x,
                y,
                width,
                height,
                page_index,
                image,
            } => {
                if *page_index != self.page_index {
                    return Err(DocError::Backend(format!(
                        "image addressed to page {} while drawing page {}",
                        page_index + 1,
                        self.page_index + 1
                    )));
                }
                self.draw_image(image, *x, *y, *width, *height);
            }
            DrawCommand::Line {
                x1,
                y1,
                x2,
                y2,
                thickness,
            } => self.draw_line(*x1, *y1, *x2, *y2, *thickness),
            DrawCommand::PageBreak => self.new_page(),
        }
        Ok(())
    }

    fn finish(self) -> Result<Vec<u8>, DocError> {
        let mut writer = BufWriter::new(Vec::new());
        self.doc
            .save(&mut writer)
            .map_err(|e| DocError::Backend(e.to_string()))?;
        writer
            .into_inner()
            .map_err(|e| DocError::Backend(e.to_string()))
    }
}
