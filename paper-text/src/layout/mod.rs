use crate::render::Pixel;

/// Position from the top left of the frame buffer.
/// Signed, since shake offsets can push glyphs past the edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Position {
    pub x: Pixel,
    pub y: Pixel,
}
impl Position {
    pub const fn new(x: Pixel, y: Pixel) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn offset(self, dx: Pixel, dy: Pixel) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

/// A rectangle inside a glyph sheet
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}
impl Rect {
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// `true` if the rectangle lies entirely within `size`
    pub fn fits(&self, size: Size) -> bool {
        let right = self.x.checked_add(self.width);
        let bottom = self.y.checked_add(self.height);
        right.map_or(false, |right| right <= size.width)
            && bottom.map_or(false, |bottom| bottom <= size.height)
    }
}
