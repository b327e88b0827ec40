//! Layout primitives: page geometry, the vertical cursor and line wrapping.

mod cursor;
mod geometry;
mod wrap;

pub use cursor::{Cursor, Slot};
pub use geometry::{PageGeometry, DEFAULT_MARGIN_PT, LETTER_HEIGHT_PT, LETTER_WIDTH_PT};
pub use wrap::{measure_wrap, FontSpec, Line, Wrapped};
