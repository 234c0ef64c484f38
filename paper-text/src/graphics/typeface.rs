use std::{cell::RefCell, collections::HashMap, fmt::Display, ops::Deref, path::Path, rc::Rc};

use eyre::{eyre, WrapErr};
use fontdue::{Font as FontData, FontSettings};

use super::{font::Font, pack, unpack, Color};
use crate::layout::Position;
use crate::render::{DrawHandle, Pixel};

/// Simple wrapper for the `&'static str` returned by `fontdue`;
/// we need something that implements `Error` for `eyre`
#[derive(Debug)]
pub struct FontError(&'static str);
impl Display for FontError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FontError: {}", self.0)
    }
}
impl std::error::Error for FontError {}

pub struct TtfSettings {
    /// Pixel height glyphs are rasterized at
    pub size: f32,
    /// Which face to use when the data is a font collection
    pub collection_index: u32,
}
impl Default for TtfSettings {
    fn default() -> Self {
        Self {
            size: 16.0,
            collection_index: 0,
        }
    }
}

/// A glyph rendered in one particular color.
///
/// Offsets are relative to the top of the line the glyph sits on.
struct Sprite {
    left: Pixel,
    top: Pixel,
    width: usize,
    /// `0xAARRGGBB`, coverage in the alpha byte
    pixels: Vec<u32>,
}

/// Outline font rasterized at a fixed size.
///
/// Every (color, character) pair is rasterized once and kept around,
/// since the same few glyphs get drawn again on every frame.
pub struct TtfFont {
    data: FontData,
    size: f32,
    ascent: Pixel,
    line_size: Pixel,
    cache: RefCell<HashMap<(u32, char), Rc<Sprite>>>,
}

impl TtfFont {
    pub fn from_bytes<Data: Deref<Target = [u8]>>(bytes: Data, settings: TtfSettings) -> eyre::Result<Self> {
        let data = FontData::from_bytes(
            bytes,
            FontSettings {
                collection_index: settings.collection_index,
                scale: settings.size,
                ..FontSettings::default()
            },
        )
        .map_err(FontError)
        .wrap_err("processing font data")?;

        let metrics = data
            .horizontal_line_metrics(settings.size)
            .ok_or_else(|| eyre!("font has no horizontal line metrics"))?;

        log::info!("loaded outline font at {}px", settings.size);

        Ok(Self {
            data,
            size: settings.size,
            ascent: metrics.ascent.round() as Pixel,
            line_size: metrics.new_line_size.round() as Pixel,
            cache: RefCell::new(HashMap::new()),
        })
    }

    pub fn from_path(path: impl AsRef<Path>, settings: TtfSettings) -> eyre::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .wrap_err_with(|| format!("reading font file {}", path.display()))?;
        Self::from_bytes(bytes, settings).wrap_err_with(|| format!("loading {}", path.display()))
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Number of (color, character) renders kept so far
    pub fn cached(&self) -> usize {
        self.cache.borrow().len()
    }

    fn sprite(&self, color: Color, ch: char) -> Rc<Sprite> {
        let key = (pack(color), ch);
        if let Some(sprite) = self.cache.borrow().get(&key) {
            return sprite.clone();
        }

        log::debug!("rasterizing {ch:?} in {color:?}");
        let (metrics, coverage) = self.data.rasterize(ch, self.size);
        let rgb = key.0;
        let sprite = Rc::new(Sprite {
            left: metrics.xmin,
            top: self.ascent - (metrics.ymin + metrics.height as i32),
            width: metrics.width,
            pixels: coverage
                .into_iter()
                .map(|alpha| (alpha as u32) << 24 | rgb)
                .collect(),
        });

        self.cache.borrow_mut().insert(key, sprite.clone());
        sprite
    }
}

impl Font for TtfFont {
    fn draw_glyph(&self, handle: &mut DrawHandle, position: Position, color: Color, ch: char) {
        let sprite = self.sprite(color, ch);
        if sprite.width == 0 {
            return;
        }

        let origin = position.offset(sprite.left, sprite.top);
        for (index, pixel) in sprite.pixels.iter().enumerate() {
            let alpha = (pixel >> 24) as u8;
            if alpha == 0 {
                continue;
            }
            let x = (index % sprite.width) as Pixel;
            let y = (index / sprite.width) as Pixel;
            handle.blend(origin.offset(x, y), unpack(*pixel), alpha);
        }
    }

    fn line_size(&self) -> Pixel {
        self.line_size
    }

    fn glyph_width(&self, ch: char) -> Pixel {
        self.data.metrics(ch, self.size).advance_width.round() as Pixel
    }
}
