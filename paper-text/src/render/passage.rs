use std::fmt;

use super::{Compose, DrawHandle, Drawable};
use crate::graphics::{font::FontHandle, shake::Shake, Color, WHITE};
use crate::layout::Position;

/// One step of a passage. Replayed in order by [`Passage::draw_at`];
/// the font, color and shake changes carry forward to every later character.
#[derive(Clone)]
pub enum Instruction {
    Char(char),
    Newline,
    Font(FontHandle),
    Color(Color),
    Shake(Option<Shake>),
}

impl fmt::Debug for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Char(ch) => f.debug_tuple("Char").field(ch).finish(),
            Instruction::Newline => f.write_str("Newline"),
            Instruction::Font(_) => f.write_str("Font(..)"),
            Instruction::Color(color) => f.debug_tuple("Color").field(color).finish(),
            Instruction::Shake(Some(_)) => f.write_str("Shake(Some(..))"),
            Instruction::Shake(None) => f.write_str("Shake(None)"),
        }
    }
}

/// A block of styled text.
///
/// Authoring only ever appends; drawing replays the whole list from scratch,
/// so a passage can be drawn every frame without being touched.
pub struct Passage {
    instructions: Vec<Instruction>,
    default_font: FontHandle,
}

/// Draw-time state, rebuilt for every replay
struct Pen {
    cursor: Position,
    font: FontHandle,
    color: Color,
    shake: Option<Shake>,
    /// Counts characters only; feeds the shake function
    index: usize,
}

impl Passage {
    pub fn new(default_font: FontHandle) -> Self {
        Self {
            instructions: Vec::new(),
            default_font,
        }
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn default_font(&self) -> &FontHandle {
        &self.default_font
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Forgets everything authored so far, e.g. to show the next page of a dialog
    pub fn clear(&mut self) {
        self.instructions.clear();
    }
}

impl Compose for Passage {
    fn push(&mut self, instruction: Instruction) -> &mut Self {
        self.instructions.push(instruction);
        self
    }
}

impl Drawable for Passage {
    fn draw_at(&self, handle: &mut DrawHandle, position: Position) {
        let mut pen = Pen {
            cursor: position,
            font: self.default_font.clone(),
            color: WHITE,
            shake: None,
            index: 0,
        };

        for instruction in &self.instructions {
            match instruction {
                Instruction::Char(ch) => {
                    let (dx, dy) = pen.shake.as_ref().map_or((0, 0), |shake| shake(pen.index));
                    pen.font
                        .draw_glyph(handle, pen.cursor.offset(dx, dy), pen.color, *ch);

                    pen.cursor.x += pen.font.glyph_width(*ch);
                    pen.index += 1;
                }
                Instruction::Newline => {
                    pen.cursor.x = position.x;
                    pen.cursor.y += pen.font.line_size();
                }
                Instruction::Font(font) => pen.font = font.clone(),
                Instruction::Color(color) => pen.color = *color,
                Instruction::Shake(shake) => pen.shake = shake.clone(),
            }
        }
    }
}
