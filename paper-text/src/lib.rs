//! Styled, animated text for software frame buffers.
//!
//! A [`Passage`] is a list of drawing instructions (characters, newlines,
//! font, color and shake changes) that is replayed from scratch on every draw.
//! A [`Typewriter`] queues the same instructions, plus waits and callbacks,
//! and feeds them to a passage one visible character per [`Typewriter::pulse`].
//!
//! ```no_run
//! use std::rc::Rc;
//! use paper_text::{Compose, Drawable, DrawHandle, Passage, Position, TtfFont, TtfSettings, Typewriter};
//!
//! # fn main() -> eyre::Result<()> {
//! let font = Rc::new(TtfFont::from_path("Roboto-Regular.ttf", TtfSettings::default())?);
//! let mut writer = Typewriter::new(Passage::new(font));
//! writer.add_text("Hello").set_color(255, 64, 64).add_slow_text(4, "...");
//!
//! let mut frame = vec![0u32; 320 * 240];
//! // once per frame:
//! writer.pulse();
//! writer.draw_at(&mut DrawHandle::new(&mut frame, 320), Position::new(8, 8));
//! # Ok(())
//! # }
//! ```

/// Graphics primitives, such as fonts, color and shake
pub mod graphics;

/// Positions and rectangles
pub mod layout;

/// Passages, typewriters and the frame buffer they draw into
pub mod render;

#[cfg(test)]
mod testing;

pub use graphics::{
    bitmap::{BitmapFont, IndexedImage},
    font::{Font, FontHandle},
    shake::Shake,
    typeface::{TtfFont, TtfSettings},
    Color,
};
pub use layout::Position;
pub use render::{
    passage::{Instruction, Passage},
    typewriter::{Pulse, Queued, Typewriter},
    Compose, DrawHandle, Drawable, Pixel,
};
