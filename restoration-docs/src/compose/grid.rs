//! # Photo Galleries
//!
//! A gallery fills a `columns × rows` grid per page. The rows available are
//! recomputed each time a partition starts, because the first partition may
//! begin halfway down a page. Cell positions are fixed before any image is
//! drawn, so an unreadable photo leaves its cell empty instead of shifting
//! the rest of the gallery.

use super::{Composer, Pass};
use crate::error::DocError;
use crate::model::{DrawCommand, ImageRef, Weight};
use crate::raster::ImagePayload;

/// Matches the cursor's tolerance so a partition sized to the page never
/// trips a break on the final advance.
const ROW_EPSILON: f32 = 1e-3;

pub(super) fn validate(
    composer: &Composer<'_>,
    columns: usize,
    cell_width: f32,
    cell_height: f32,
    spacing: f32,
) -> Result<(), DocError> {
    let geometry = composer.geometry();
    let style = composer.style();

    if columns == 0 {
        return Err(DocError::InvalidLayout("image grid needs at least one column".to_string()));
    }
    if !(cell_width > 0.0 && cell_height > 0.0) || spacing < 0.0 {
        return Err(DocError::InvalidLayout(format!(
            "image grid cell {}x{} with spacing {}",
            cell_width, cell_height, spacing
        )));
    }
    let row_width = columns as f32 * cell_width + (columns - 1) as f32 * spacing;
    if row_width > geometry.content_width() + ROW_EPSILON {
        return Err(DocError::InvalidLayout(format!(
            "{} columns need {}pt, content area is {}pt",
            columns,
            row_width,
            geometry.content_width()
        )));
    }
    if cell_height + spacing > geometry.content_height() {
        return Err(DocError::InvalidLayout(format!(
            "grid row of {}pt does not fit a {}pt content area",
            cell_height + spacing,
            geometry.content_height()
        )));
    }
    let caption_band = style.caption_gap + style.line_height(style.caption_size);
    if caption_band > spacing {
        return Err(DocError::InvalidLayout(format!(
            "grid spacing {}pt leaves no room for {}pt captions",
            spacing, caption_band
        )));
    }
    Ok(())
}

fn rows_that_fit(remaining: f32, pitch: f32) -> usize {
    ((remaining + ROW_EPSILON) / pitch).floor() as usize
}

impl<'c, 'm, 'a> Pass<'c, 'm, 'a> {
    pub(super) fn image_grid(
        &mut self,
        items: &[ImageRef<'a>],
        columns: usize,
        cell_width: f32,
        cell_height: f32,
        spacing: f32,
    ) {
        let geometry = self.geometry();
        let style = self.style();
        let pitch = cell_height + spacing;

        let mut next = 0;
        while next < items.len() {
            let mut rows = rows_that_fit(self.cursor.remaining(), pitch);
            if rows == 0 {
                self.break_page();
                rows = rows_that_fit(self.cursor.remaining(), pitch).max(1);
            }

            let end = (next + columns * rows).min(items.len());
            let partition = &items[next..end];
            let top = self.cursor.y();
            let page_index = self.cursor.page_index();

            for (j, item) in partition.iter().enumerate() {
                let index = next + j;
                let row = j / columns;
                let col = j % columns;
                let x = geometry.margin + col as f32 * (cell_width + spacing);
                let y = top + row as f32 * pitch;

                match item.payload {
                    ImagePayload::Ready(image) => self.commands.push(DrawCommand::Image {
                        x,
                        y,
                        width: cell_width,
                        height: cell_height,
                        page_index,
                        image,
                    }),
                    ImagePayload::Unreadable(reason) => {
                        log::warn!("Skipping photo {}: {}", index + 1, reason);
                    }
                }

                let caption = match item.caption {
                    Some(caption) => caption.to_string(),
                    None => format!("Photo {}", index + 1),
                };
                self.text(
                    x,
                    y + cell_height + style.caption_gap,
                    &caption,
                    style.caption_size,
                    Weight::Regular,
                );
            }

            let rows_used = partition.len().div_ceil(columns);
            self.advance(rows_used as f32 * pitch);

            next = end;
            if next < items.len() {
                self.break_page();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::compose::tests::{assert_within_margins, small_page, Mono};
    use crate::compose::Composer;
    use crate::error::DocError;
    use crate::model::{Block, DrawCommand, ImageRef};
    use crate::raster::{ImagePayload, RasterImage};

    fn pixel() -> ImagePayload {
        ImagePayload::Ready(RasterImage {
            width_px: 1,
            height_px: 1,
            rgb: vec![0, 0, 0],
        })
    }

    /// On the small page (360pt tall content) a 150pt cell with 20pt spacing
    /// gives two rows per empty page.
    fn grid<'a>(payloads: &'a [ImagePayload], columns: usize) -> Block<'a> {
        Block::ImageGrid {
            items: payloads.iter().map(ImageRef::new).collect(),
            columns,
            cell_width: 60.0,
            cell_height: 150.0,
            spacing: 20.0,
        }
    }

    fn images<'a>(commands: &'a [DrawCommand<'a>]) -> Vec<(usize, f32, f32)> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Image {
                    page_index, x, y, ..
                } => Some((*page_index, *x, *y)),
                _ => None,
            })
            .collect()
    }

    fn captions(commands: &[DrawCommand<'_>]) -> Vec<(f32, f32, String)> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { x, y, content, .. } if content.starts_with("Photo") => {
                    Some((*x, *y, content.clone()))
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn zero_items_emit_nothing() {
        let composer = Composer::new(small_page(), &Mono);
        let commands = composer.run(&[grid(&[], 3)]).unwrap();
        assert!(commands.is_empty());
    }

    #[test]
    fn seven_items_in_three_columns() {
        let payloads: Vec<_> = (0..7).map(|_| pixel()).collect();
        let composer = Composer::new(small_page(), &Mono);
        let commands = composer.run(&[grid(&payloads, 3)]).unwrap();
        let placed = images(&commands);

        assert_eq!(placed.len(), 7);
        assert_eq!(
            &placed[..6],
            &[
                (0, 20.0, 20.0),
                (0, 100.0, 20.0),
                (0, 180.0, 20.0),
                (0, 20.0, 190.0),
                (0, 100.0, 190.0),
                (0, 180.0, 190.0),
            ]
        );
        // The seventh sits alone, top-left of the second page.
        assert_eq!(placed[6], (1, 20.0, 20.0));
        assert_eq!(placed.iter().filter(|p| p.0 == 1).count(), 1);
        assert_eq!(
            commands
                .iter()
                .filter(|c| matches!(c, DrawCommand::PageBreak))
                .count(),
            1
        );

        let caps = captions(&commands);
        assert_eq!(caps[0], (20.0, 173.0, "Photo 1".to_string()));
        assert_eq!(caps[6].2, "Photo 7");
        assert_within_margins(&commands, composer.geometry(), composer.style());
    }

    #[test]
    fn grid_starting_mid_page_uses_remaining_rows() {
        let payloads: Vec<_> = (0..7).map(|_| pixel()).collect();
        let composer = Composer::new(small_page(), &Mono);
        // Ten 14pt lines leave 220pt: room for one row of 170pt.
        let filler = vec!["x"; 10].join("\n");
        let commands = composer
            .run(&[Block::paragraph(filler, 10.0), grid(&payloads, 3)])
            .unwrap();
        let placed = images(&commands);

        assert_eq!(&placed[..3], &[(0, 20.0, 160.0), (0, 100.0, 160.0), (0, 180.0, 160.0)]);
        assert_eq!(placed[3], (1, 20.0, 20.0));
        assert_eq!(placed[6], (1, 20.0, 190.0));
        assert_within_margins(&commands, composer.geometry(), composer.style());
    }

    #[test]
    fn grid_without_room_for_a_row_starts_on_next_page() {
        let payloads = vec![pixel(), pixel()];
        let composer = Composer::new(small_page(), &Mono);
        let filler = vec!["x"; 15].join("\n");
        let commands = composer
            .run(&[Block::paragraph(filler, 10.0), grid(&payloads, 3)])
            .unwrap();
        let placed = images(&commands);
        assert_eq!(placed, vec![(1, 20.0, 20.0), (1, 100.0, 20.0)]);
    }

    #[test]
    fn unreadable_image_keeps_its_cell() {
        let payloads = vec![
            pixel(),
            ImagePayload::Unreadable("corrupt JPEG".to_string()),
            pixel(),
        ];
        let composer = Composer::new(small_page(), &Mono);
        let commands = composer.run(&[grid(&payloads, 3)]).unwrap();

        assert_eq!(images(&commands), vec![(0, 20.0, 20.0), (0, 180.0, 20.0)]);
        let caps = captions(&commands);
        assert_eq!(caps.len(), 3);
        assert_eq!(caps[1].0, 100.0);
        assert_eq!(caps[2].2, "Photo 3");
    }

    #[test]
    fn reading_order_follows_item_order() {
        let composer = Composer::new(small_page(), &Mono);
        for columns in 1..=3 {
            for n in 0..20 {
                let payloads: Vec<_> = (0..n).map(|_| pixel()).collect();
                let commands = composer.run(&[grid(&payloads, columns)]).unwrap();
                let placed = images(&commands);
                assert_eq!(placed.len(), n);
                for pair in placed.windows(2) {
                    let (a, b) = (pair[0], pair[1]);
                    let ordered = a.0 < b.0
                        || (a.0 == b.0 && a.2 < b.2)
                        || (a.0 == b.0 && a.2 == b.2 && a.1 < b.1);
                    assert!(ordered, "{a:?} then {b:?} with {columns} columns");
                }
            }
        }
    }

    #[test]
    fn later_blocks_continue_below_the_gallery() {
        let payloads = vec![pixel()];
        let composer = Composer::new(small_page(), &Mono);
        let commands = composer
            .run(&[grid(&payloads, 3), Block::paragraph("after", 10.0)])
            .unwrap();
        match commands.last().unwrap() {
            DrawCommand::Text { y, content, .. } => {
                assert_eq!(content, "after");
                assert_eq!(*y, 190.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rejects_grids_that_cannot_be_laid_out() {
        let composer = Composer::new(small_page(), &Mono);
        let payloads = vec![pixel()];
        let bad = [
            (0, 60.0, 150.0, 20.0),
            (5, 60.0, 150.0, 20.0),
            (1, 60.0, 400.0, 20.0),
            (1, 60.0, 150.0, 5.0),
        ];
        for (columns, cell_width, cell_height, spacing) in bad {
            let block = Block::ImageGrid {
                items: payloads.iter().map(ImageRef::new).collect(),
                columns,
                cell_width,
                cell_height,
                spacing,
            };
            let err = composer.run(&[block]).unwrap_err();
            assert!(matches!(err, DocError::InvalidLayout(_)), "{columns} {cell_height} {spacing}");
        }
    }
}
