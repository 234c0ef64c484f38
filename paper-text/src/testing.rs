//! Fonts that remember what they were asked to draw.

use std::{cell::RefCell, rc::Rc};

use crate::graphics::{font::Font, Color};
use crate::layout::Position;
use crate::render::{DrawHandle, Pixel};

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GlyphDraw {
    pub font: &'static str,
    pub position: Position,
    pub color: Color,
    pub ch: char,
}

pub(crate) type DrawLog = Rc<RefCell<Vec<GlyphDraw>>>;

/// Fixed-pitch font; `'W'` is twice as wide as everything else
pub(crate) struct RecordingFont {
    pub name: &'static str,
    pub advance: Pixel,
    pub line: Pixel,
    pub log: DrawLog,
}

impl Font for RecordingFont {
    fn draw_glyph(&self, _handle: &mut DrawHandle, position: Position, color: Color, ch: char) {
        self.log.borrow_mut().push(GlyphDraw {
            font: self.name,
            position,
            color,
            ch,
        });
    }

    fn line_size(&self) -> Pixel {
        self.line
    }

    fn glyph_width(&self, ch: char) -> Pixel {
        match ch {
            'W' => self.advance * 2,
            _ => self.advance,
        }
    }
}

pub(crate) fn recording_font(
    name: &'static str,
    advance: Pixel,
    line: Pixel,
    log: &DrawLog,
) -> Rc<RecordingFont> {
    Rc::new(RecordingFont {
        name,
        advance,
        line,
        log: log.clone(),
    })
}

/// Runs `draw` against a throwaway buffer and returns the glyphs it drew
pub(crate) fn drawn(log: &DrawLog, draw: impl FnOnce(&mut DrawHandle)) -> Vec<GlyphDraw> {
    log.borrow_mut().clear();
    let mut buffer = vec![0u32; 16];
    let mut handle = DrawHandle::new(&mut buffer, 4);
    draw(&mut handle);
    log.borrow_mut().drain(..).collect()
}
