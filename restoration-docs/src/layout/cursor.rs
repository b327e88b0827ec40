use super::geometry::PageGeometry;

/// Tolerance for float drift when a run of rows fills a page exactly.
const FIT_EPSILON: f32 = 1e-3;

/// Where an element landed after a call to [`Cursor::place`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub page_index: usize,
    pub top: f32,
    /// A page break happened before the element was placed.
    pub broke: bool,
}

/// Vertical position on the current page.
///
/// Every vertical movement of a composition goes through this type; nothing
/// else decides where a page ends.
#[derive(Debug, Clone)]
pub struct Cursor {
    geometry: PageGeometry,
    page_index: usize,
    y: f32,
}

impl Cursor {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            page_index: 0,
            y: geometry.margin,
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Room left between the cursor and the bottom margin.
    pub fn remaining(&self) -> f32 {
        (self.geometry.bottom() - self.y).max(0.0)
    }

    pub fn at_page_top(&self) -> bool {
        self.y <= self.geometry.margin
    }

    /// Whether `height` more fits on this page without a break.
    pub fn fits(&self, height: f32) -> bool {
        self.y + height.max(0.0) <= self.geometry.bottom() + FIT_EPSILON
    }

    /// Move down by `amount`. When that would pass the bottom margin the
    /// cursor moves to the top of a new page instead and `true` is returned;
    /// the pending element has not been accounted for in that case.
    ///
    /// An element taller than a whole content area cannot be placed anywhere,
    /// so on a fresh page it is clamped to the bottom margin instead of
    /// breaking again.
    pub fn advance(&mut self, amount: f32) -> bool {
        let amount = amount.max(0.0);
        let bottom = self.geometry.bottom();
        if !self.fits(amount) {
            if self.at_page_top() {
                log::warn!(
                    "element of height {amount:.1}pt exceeds the content area; clamping to page {}",
                    self.page_index + 1
                );
                self.y = bottom;
                return false;
            }
            self.break_page();
            return true;
        }
        self.y = (self.y + amount).min(bottom);
        false
    }

    /// Reserve `height` for one unsplittable element and report where it goes.
    pub fn place(&mut self, height: f32) -> Slot {
        let top = self.y;
        if self.advance(height) {
            let top = self.y;
            self.advance(height);
            Slot {
                page_index: self.page_index,
                top,
                broke: true,
            }
        } else {
            Slot {
                page_index: self.page_index,
                top,
                broke: false,
            }
        }
    }

    /// Start a new page regardless of remaining space.
    pub fn break_page(&mut self) {
        self.page_index += 1;
        self.y = self.geometry.margin;
        log::debug!("page break -> page {}", self.page_index + 1);
    }
}
