//! Composer inputs (blocks) and outputs (draw commands).

use serde::Deserialize;

use crate::raster::{ImagePayload, RasterImage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weight {
    #[default]
    Regular,
    Bold,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// A photo or logo handed to the composer, with the caption shown under it
/// in galleries.
#[derive(Debug, Clone, Copy)]
pub struct ImageRef<'a> {
    pub payload: &'a ImagePayload,
    pub caption: Option<&'a str>,
}

impl<'a> ImageRef<'a> {
    pub fn new(payload: &'a ImagePayload) -> Self {
        Self {
            payload,
            caption: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TableColumn {
    pub header: String,
    pub width: f32,
    pub align: Align,
}

impl TableColumn {
    pub fn new(header: impl Into<String>, width: f32) -> Self {
        Self {
            header: header.into(),
            width,
            align: Align::Left,
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

/// One semantic unit of a document.
#[derive(Debug, Clone)]
pub enum Block<'a> {
    Heading {
        text: String,
        size: f32,
        align: Align,
    },
    Paragraph {
        text: String,
        size: f32,
        weight: Weight,
        align: Align,
    },
    /// Label on the left, wrapped value beside it; one row per pair.
    LabelValue {
        rows: Vec<(String, String)>,
        size: f32,
    },
    ImageGrid {
        items: Vec<ImageRef<'a>>,
        columns: usize,
        cell_width: f32,
        cell_height: f32,
        spacing: f32,
    },
    /// Never split across pages. `image` is `None` when nobody signed.
    SignatureBlock {
        label: String,
        image: Option<&'a RasterImage>,
        signer_name: String,
        title: Option<String>,
        date: String,
    },
    Image {
        image: ImageRef<'a>,
        width: f32,
        height: f32,
        align: Align,
    },
    Table {
        columns: Vec<TableColumn>,
        rows: Vec<Vec<String>>,
        size: f32,
    },
    Rule {
        thickness: f32,
        /// Defaults to the full content width; shorter rules are right-aligned.
        width: Option<f32>,
    },
    Spacer(f32),
    /// Start a new page unless the cursor already sits at a page top.
    PageBreak,
    /// Start a new page when less than this much room remains, so a
    /// heading is not stranded above what it introduces.
    KeepRoom(f32),
}

impl<'a> Block<'a> {
    pub fn heading(text: impl Into<String>, size: f32) -> Self {
        Block::Heading {
            text: text.into(),
            size,
            align: Align::Left,
        }
    }

    pub fn centered_heading(text: impl Into<String>, size: f32) -> Self {
        Block::Heading {
            text: text.into(),
            size,
            align: Align::Center,
        }
    }

    pub fn paragraph(text: impl Into<String>, size: f32) -> Self {
        Block::Paragraph {
            text: text.into(),
            size,
            weight: Weight::Regular,
            align: Align::Left,
        }
    }

    pub fn styled(text: impl Into<String>, size: f32, weight: Weight, align: Align) -> Self {
        Block::Paragraph {
            text: text.into(),
            size,
            weight,
            align,
        }
    }

    pub fn label_values<L, V>(rows: impl IntoIterator<Item = (L, V)>, size: f32) -> Self
    where
        L: Into<String>,
        V: Into<String>,
    {
        Block::LabelValue {
            rows: rows
                .into_iter()
                .map(|(l, v)| (l.into(), v.into()))
                .collect(),
            size,
        }
    }
}

/// Absolute drawing instruction. `y` is measured from the top of the page
/// and marks the top edge of the element.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand<'a> {
    Text {
        x: f32,
        y: f32,
        content: String,
        font_size: f32,
        weight: Weight,
    },
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        page_index: usize,
        image: &'a RasterImage,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        thickness: f32,
    },
    PageBreak,
}
