/// Instruction lists and their replay onto a frame buffer.
pub mod passage;
/// Frame-by-frame reveal of queued passage content.
pub mod typewriter;

use crate::graphics::{blend, font::FontHandle, pack, shake::Shake, unpack, Color};
use crate::layout::Position;

use passage::Instruction;

/// Simple structure that encapsulates the frame buffer and relevant metadata.
/// Render methods take this structure, to keep them separate from the event loop.
///
/// Pixels are `0x00RRGGBB`, which is what `softbuffer` hands out.
/// Writes that land outside the buffer are dropped.
pub struct DrawHandle<'a> {
    pub buffer: &'a mut [u32],
    pub width: usize,
    pub height: usize,
}
impl<'a> DrawHandle<'a> {
    pub fn new(buffer: &'a mut [u32], width: usize) -> Self {
        let height = buffer.len().checked_div(width).unwrap_or(0);
        Self {
            buffer,
            width,
            height,
        }
    }

    #[inline]
    fn index(&self, position: Position) -> Option<usize> {
        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub fn get(&self, position: Position) -> Option<Color> {
        self.index(position).map(|index| unpack(self.buffer[index]))
    }

    pub fn set(&mut self, position: Position, color: Color) {
        if let Some(index) = self.index(position) {
            self.buffer[index] = pack(color);
        }
    }

    /// Like [`DrawHandle::set`], but mixed with what's already there by `alpha`
    pub fn blend(&mut self, position: Position, color: Color, alpha: u8) {
        if let Some(index) = self.index(position) {
            let under = unpack(self.buffer[index]);
            self.buffer[index] = pack(blend(under, color, alpha));
        }
    }

    pub fn clear(&mut self, color: Color) {
        self.buffer.fill(pack(color));
    }
}

/// We're only dealing with integer pixels
pub type Pixel = i32;

pub trait Drawable {
    fn draw_at(&self, handle: &mut DrawHandle, position: Position);
}

/// The authoring side of a passage.
///
/// Anything that accepts drawing instructions and can draw the result:
/// a [`passage::Passage`] applies them right away,
/// a [`typewriter::Typewriter`] queues them for later.
pub trait Compose: Drawable {
    fn push(&mut self, instruction: Instruction) -> &mut Self;

    /// One character instruction per `char`
    fn add_text(&mut self, text: &str) -> &mut Self {
        for ch in text.chars() {
            self.push(Instruction::Char(ch));
        }
        self
    }

    fn add_newline(&mut self) -> &mut Self {
        self.push(Instruction::Newline)
    }

    fn set_font(&mut self, font: FontHandle) -> &mut Self {
        self.push(Instruction::Font(font))
    }

    fn set_color(&mut self, red: u8, green: u8, blue: u8) -> &mut Self {
        self.push(Instruction::Color(Color::new(red, green, blue)))
    }

    /// `None` stops shaking for the characters that follow
    fn set_shake(&mut self, shake: Option<Shake>) -> &mut Self {
        self.push(Instruction::Shake(shake))
    }
}

impl<T: Drawable + ?Sized> Drawable for &mut T {
    fn draw_at(&self, handle: &mut DrawHandle, position: Position) {
        (**self).draw_at(handle, position)
    }
}

impl<T: Compose + ?Sized> Compose for &mut T {
    fn push(&mut self, instruction: Instruction) -> &mut Self {
        (**self).push(instruction);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_writes_are_dropped() {
        let mut buffer = vec![0u32; 6];
        let mut handle = DrawHandle::new(&mut buffer, 3);
        assert_eq!(handle.height, 2);

        handle.set(Position::new(-1, 0), Color::new(1, 2, 3));
        handle.set(Position::new(3, 0), Color::new(1, 2, 3));
        handle.set(Position::new(0, 2), Color::new(1, 2, 3));
        handle.blend(Position::new(0, -5), Color::new(1, 2, 3), 128);
        assert!(handle.buffer.iter().all(|&pixel| pixel == 0));

        handle.set(Position::new(2, 1), Color::new(1, 2, 3));
        assert_eq!(buffer[5], 0x010203);
    }

    #[test]
    fn zero_width_handle_is_empty() {
        let mut buffer = vec![0u32; 4];
        let mut handle = DrawHandle::new(&mut buffer, 0);
        assert_eq!(handle.height, 0);
        handle.set(Position::new(0, 0), Color::new(9, 9, 9));
        assert_eq!(handle.get(Position::new(0, 0)), None);
    }
}
