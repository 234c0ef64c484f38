use eyre::{ensure, eyre, Result};

use super::{font::Font, Color};
use crate::layout::{Position, Rect, Size};
use crate::render::{DrawHandle, Pixel};

/// Palette index that is never drawn
pub const TRANSPARENT: u8 = 0;

/// Palette index that gets swapped for the draw color
pub const INK: u8 = 1;

/// An 8-bit palette-indexed image, row-major
pub struct IndexedImage {
    size: Size,
    pixels: Vec<u8>,
}
impl IndexedImage {
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self> {
        ensure!(
            width.checked_mul(height) == Some(pixels.len()),
            "indexed image is {width}x{height} but has {} pixels",
            pixels.len()
        );
        Ok(Self {
            size: Size { width, height },
            pixels,
        })
    }

    pub fn size(&self) -> Size {
        self.size
    }

    #[inline]
    fn at(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * self.size.width + x]
    }
}

/// Fixed glyph sheet font.
///
/// Glyphs are rectangles cut out of one indexed image; the first rectangle is `' '`,
/// the next one `'!'`, and so on through the character codes.
/// Pixels with the [`INK`] index are drawn in the requested color,
/// [`TRANSPARENT`] pixels are skipped and every other index keeps its palette color,
/// so outlines and shading survive recoloring.
pub struct BitmapFont {
    sheet: IndexedImage,
    colors: Vec<Color>,
    glyphs: Vec<Rect>,
}

impl BitmapFont {
    pub fn new(sheet: IndexedImage, colors: Vec<Color>, glyphs: Vec<Rect>) -> Result<Self> {
        ensure!(!glyphs.is_empty(), "bitmap font needs at least one glyph");
        for (index, rect) in glyphs.iter().enumerate() {
            ensure!(
                rect.fits(sheet.size()),
                "glyph {index} ({rect:?}) lies outside the {}x{} sheet",
                sheet.size().width,
                sheet.size().height
            );
        }

        log::info!("loaded bitmap font with {} glyphs", glyphs.len());
        Ok(Self {
            sheet,
            colors,
            glyphs,
        })
    }

    /// Cuts `count` equally sized cells out of the sheet, left to right, then top to bottom
    pub fn grid(sheet: IndexedImage, colors: Vec<Color>, cell: Size, count: usize) -> Result<Self> {
        ensure!(
            cell.width > 0 && cell.height > 0,
            "grid cells must not be empty"
        );
        let columns = sheet.size().width / cell.width;
        ensure!(columns > 0, "sheet is narrower than one cell");

        let glyphs = (0..count)
            .map(|index| {
                Some(Rect::new(
                    (index % columns) * cell.width,
                    (index / columns).checked_mul(cell.height)?,
                    cell.width,
                    cell.height,
                ))
            })
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| eyre!("{count} glyphs of {cell:?} overflow the sheet coordinates"))?;

        Self::new(sheet, colors, glyphs)
    }

    fn glyph(&self, ch: char) -> Option<&Rect> {
        let index = (ch as u32).checked_sub(' ' as u32)?;
        self.glyphs.get(index as usize)
    }
}

impl Font for BitmapFont {
    fn draw_glyph(&self, handle: &mut DrawHandle, position: Position, color: Color, ch: char) {
        let Some(rect) = self.glyph(ch) else {
            log::debug!("no bitmap glyph for {ch:?}");
            return;
        };

        for y in 0..rect.height {
            for x in 0..rect.width {
                let pixel = match self.sheet.at(rect.x + x, rect.y + y) {
                    TRANSPARENT => continue,
                    INK => color,
                    other => match self.colors.get(other as usize) {
                        Some(color) => *color,
                        None => continue,
                    },
                };
                handle.set(position.offset(x as Pixel, y as Pixel), pixel);
            }
        }
    }

    fn line_size(&self) -> Pixel {
        self.glyphs[0].height as Pixel
    }

    fn glyph_width(&self, ch: char) -> Pixel {
        self.glyph(ch).map_or(0, |rect| rect.width as Pixel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::pack;

    const OUTLINE: Color = Color::new(10, 10, 10);

    /// Two 2x3 glyphs side by side: ' ' is empty, '!' is a bar with an outlined foot
    #[rustfmt::skip]
    fn sheet() -> IndexedImage {
        let pixels = vec![
            0, 0,  1, 0,
            0, 0,  1, 0,
            0, 0,  2, 2,
        ];
        IndexedImage::new(4, 3, pixels).unwrap()
    }

    fn palette() -> Vec<Color> {
        vec![Color::new(0, 0, 0), Color::new(255, 255, 255), OUTLINE]
    }

    #[test]
    fn rejects_bad_geometry() {
        assert!(IndexedImage::new(2, 2, vec![0; 3]).is_err());
        assert!(BitmapFont::new(sheet(), palette(), vec![]).is_err());
        assert!(BitmapFont::new(sheet(), palette(), vec![Rect::new(3, 0, 2, 3)]).is_err());
        assert!(BitmapFont::grid(sheet(), palette(), Size { width: 5, height: 3 }, 1).is_err());
    }

    #[test]
    fn oversized_geometry_is_an_error() {
        assert!(IndexedImage::new(usize::MAX, 2, vec![]).is_err());
        assert!(IndexedImage::new(usize::MAX, usize::MAX, vec![0; 4]).is_err());
        assert!(BitmapFont::new(sheet(), palette(), vec![Rect::new(usize::MAX, 0, 2, 1)]).is_err());
        assert!(BitmapFont::new(sheet(), palette(), vec![Rect::new(0, 1, 1, usize::MAX)]).is_err());
        assert!(BitmapFont::grid(sheet(), palette(), Size { width: 2, height: usize::MAX }, 5).is_err());
    }

    #[test]
    fn grid_metrics() {
        let font = BitmapFont::grid(sheet(), palette(), Size { width: 2, height: 3 }, 2).unwrap();
        assert_eq!(font.line_size(), 3);
        assert_eq!(font.glyph_width(' '), 2);
        assert_eq!(font.glyph_width('!'), 2);
        assert_eq!(font.glyph_width('"'), 0);
        assert_eq!(font.glyph_width('\u{7}'), 0);
    }

    #[test]
    fn ink_takes_the_draw_color() {
        let font = BitmapFont::grid(sheet(), palette(), Size { width: 2, height: 3 }, 2).unwrap();
        let mut buffer = vec![0u32; 16];
        let mut handle = DrawHandle::new(&mut buffer, 4);

        let red = Color::new(255, 0, 0);
        font.draw_glyph(&mut handle, Position::new(1, 0), red, '!');

        assert_eq!(handle.get(Position::new(1, 0)), Some(red));
        assert_eq!(handle.get(Position::new(1, 1)), Some(red));
        assert_eq!(handle.get(Position::new(1, 2)), Some(OUTLINE));
        assert_eq!(handle.get(Position::new(2, 2)), Some(OUTLINE));
        // transparent pixels leave the buffer alone
        assert_eq!(handle.get(Position::new(2, 0)), Some(Color::new(0, 0, 0)));
        assert_eq!(buffer.iter().filter(|&&pixel| pixel == pack(red)).count(), 2);
    }

    #[test]
    fn clipped_and_missing_glyphs_are_skipped() {
        let font = BitmapFont::grid(sheet(), palette(), Size { width: 2, height: 3 }, 2).unwrap();
        let mut buffer = vec![0u32; 16];
        let mut handle = DrawHandle::new(&mut buffer, 4);

        font.draw_glyph(&mut handle, Position::new(-1, -2), Color::new(1, 1, 1), '!');
        font.draw_glyph(&mut handle, Position::new(0, 0), Color::new(1, 1, 1), 'q');

        // only the outlined foot row lands inside the buffer
        assert_eq!(handle.get(Position::new(0, 0)), Some(OUTLINE));
        assert_eq!(buffer.iter().filter(|&&pixel| pixel != 0).count(), 1);
    }
}
