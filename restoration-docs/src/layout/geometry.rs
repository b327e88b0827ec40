use serde::Deserialize;

use crate::error::DocError;

/// US Letter width in points
pub const LETTER_WIDTH_PT: f32 = 612.0;
/// US Letter height in points
pub const LETTER_HEIGHT_PT: f32 = 792.0;
/// Margin used by every generator
pub const DEFAULT_MARGIN_PT: f32 = 40.0;

/// Fixed page size for one document. All values are in points.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width: LETTER_WIDTH_PT,
            height: LETTER_HEIGHT_PT,
            margin: DEFAULT_MARGIN_PT,
        }
    }
}

impl PageGeometry {
    pub fn new(width: f32, height: f32, margin: f32) -> Result<Self, DocError> {
        let geometry = Self {
            width,
            height,
            margin,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    pub fn validate(&self) -> Result<(), DocError> {
        let finite = self.width.is_finite() && self.height.is_finite() && self.margin.is_finite();
        if !finite || self.margin < 0.0 {
            return Err(DocError::InvalidGeometry(format!(
                "{}x{} with margin {}",
                self.width, self.height, self.margin
            )));
        }
        if self.margin * 2.0 >= self.width || self.margin * 2.0 >= self.height {
            return Err(DocError::InvalidGeometry(format!(
                "margin {} leaves no content area on a {}x{} page",
                self.margin, self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    pub fn content_height(&self) -> f32 {
        self.height - 2.0 * self.margin
    }

    /// Lowest y an element may reach, measured from the page top.
    pub fn bottom(&self) -> f32 {
        self.height - self.margin
    }
}
