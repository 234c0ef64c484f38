use std::rc::Rc;

use super::Color;
use crate::layout::Position;
use crate::render::{DrawHandle, Pixel};

/// What a passage needs from a font.
///
/// Implementations own everything about how glyphs look;
/// the passage only asks them to draw one character at a time
/// and to report how far the cursor should move afterwards.
pub trait Font {
    /// Draws `ch` with its top-left corner at `position`, in `color`.
    ///
    /// Characters the font can't represent should be skipped silently;
    /// drawing is never allowed to fail.
    fn draw_glyph(&self, handle: &mut DrawHandle, position: Position, color: Color, ch: char);

    /// Distance between two baselines; a newline moves the cursor down by this much
    fn line_size(&self) -> Pixel;

    /// Horizontal advance after drawing `ch`
    fn glyph_width(&self, ch: char) -> Pixel;
}

/// Fonts are shared between every passage and typewriter that mentions them
pub type FontHandle = Rc<dyn Font>;
