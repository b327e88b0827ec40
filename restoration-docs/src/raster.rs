//! Decoding photos, logos and signatures into drawable RGB bitmaps.
//!
//! Everything here runs before composition starts; the composer only ever
//! sees finished [`RasterImage`]s or an [`ImagePayload::Unreadable`] marker.

use std::io::Read;
use std::path::Path;

use ::image::{DynamicImage, Rgba, RgbImage};
use base64::Engine;

use crate::error::DocError;

/// 8-bit RGB pixels, alpha already flattened onto white.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pub width_px: u32,
    pub height_px: u32,
    pub rgb: Vec<u8>,
}

impl RasterImage {
    pub fn from_dynamic(img: &DynamicImage) -> Self {
        let rgb = flatten_on_white(img);
        let (width_px, height_px) = rgb.dimensions();
        Self {
            width_px,
            height_px,
            rgb: rgb.into_raw(),
        }
    }
}

/// A decoded image, or the reason it could not be decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum ImagePayload {
    Ready(RasterImage),
    Unreadable(String),
}

impl ImagePayload {
    /// Decode `src` (data URI, `http(s)` URL or file path), keeping failures
    /// as [`ImagePayload::Unreadable`] so the photo still has a slot.
    pub fn load(src: &str) -> Self {
        match load_image(src) {
            Ok(img) => ImagePayload::Ready(img),
            Err(e) => {
                log::warn!("{}: {}", short_source(src), e);
                ImagePayload::Unreadable(e.to_string())
            }
        }
    }

    pub fn raster(&self) -> Option<&RasterImage> {
        match self {
            ImagePayload::Ready(img) => Some(img),
            ImagePayload::Unreadable(_) => None,
        }
    }
}

/// Load and decode an image from a data URI, URL or file path.
pub fn load_image(src: &str) -> Result<RasterImage, DocError> {
    let bytes = if src.starts_with("data:") {
        decode_data_uri(src)?
    } else if src.starts_with("http://") || src.starts_with("https://") {
        fetch_url(src)?
    } else {
        std::fs::read(Path::new(src)).map_err(|e| DocError::Image(format!("{}: {}", src, e)))?
    };
    decode_bytes(&bytes)
}

pub fn decode_bytes(bytes: &[u8]) -> Result<RasterImage, DocError> {
    let img = ::image::load_from_memory(bytes)
        .map_err(|e| DocError::Image(format!("Failed to decode image: {}", e)))?;
    Ok(RasterImage::from_dynamic(&img))
}

/// Payload bytes of a `data:<mime>;base64,<data>` URI.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>, DocError> {
    let (header, data) = uri
        .split_once(',')
        .ok_or_else(|| DocError::Image("Invalid data URI: missing comma".to_string()))?;
    if !header.ends_with(";base64") {
        return Err(DocError::Image(format!(
            "Unsupported data URI encoding: {}",
            header
        )));
    }
    let cleaned: String = data.chars().filter(|c| !c.is_whitespace()).collect();
    base64::engine::general_purpose::STANDARD
        .decode(cleaned.as_bytes())
        .map_err(|e| DocError::Image(format!("Invalid base64 in data URI: {}", e)))
}

fn fetch_url(url: &str) -> Result<Vec<u8>, DocError> {
    let response = ureq::get(url)
        .call()
        .map_err(|e| DocError::Image(format!("Failed to fetch URL: {}", e)))?;

    let mut bytes = Vec::new();
    response
        .into_reader()
        .read_to_end(&mut bytes)
        .map_err(|e| DocError::Image(format!("Failed to read response: {}", e)))?;
    Ok(bytes)
}

fn flatten_on_white(img: &DynamicImage) -> RgbImage {
    let rgba_image = img.to_rgba8();
    let (width_px, height_px) = rgba_image.dimensions();

    let mut rgb_image = RgbImage::new(width_px, height_px);
    for (x, y, pixel) in rgba_image.enumerate_pixels() {
        let Rgba([r, g, b, a]) = *pixel;
        let alpha = a as f32 / 255.0;
        let bg = 255.0;
        let out_r = (r as f32 * alpha + bg * (1.0 - alpha)) as u8;
        let out_g = (g as f32 * alpha + bg * (1.0 - alpha)) as u8;
        let out_b = (b as f32 * alpha + bg * (1.0 - alpha)) as u8;
        rgb_image.put_pixel(x, y, ::image::Rgb([out_r, out_g, out_b]));
    }
    rgb_image
}

/// Data URIs are huge; keep log lines readable.
fn short_source(src: &str) -> &str {
    if src.starts_with("data:") {
        src.split(',').next().unwrap_or("data:")
    } else {
        src
    }
}
