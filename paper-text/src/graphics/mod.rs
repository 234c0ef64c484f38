/// Palette-indexed bitmap glyph sheets
pub mod bitmap;
/// The glyph capability contract every font backend implements
pub mod font;
/// Per-character offset functions
pub mod shake;
/// Scalable outline fonts, rasterized with `fontdue`
pub mod typeface;

use palette::{Mix, Srgb};

/// Text color. Channels are plain 0-255 values; there is no alpha,
/// coverage is handled by the font backends when they blend.
pub type Color = Srgb<u8>;

/// Color every passage starts drawing with
pub const WHITE: Color = Color::new(255, 255, 255);

/// Packs a color into the `0x00RRGGBB` layout used by frame buffers.
#[inline]
pub fn pack(color: Color) -> u32 {
    (color.red as u32) << 16 | (color.green as u32) << 8 | color.blue as u32
}

/// Inverse of [`pack`]; the top byte is ignored.
#[inline]
pub fn unpack(pixel: u32) -> Color {
    Color::new((pixel >> 16) as u8, (pixel >> 8) as u8, pixel as u8)
}

/// Mixes `source` over `destination` by `alpha` (0 keeps the destination, 255 replaces it)
pub fn blend(destination: Color, source: Color, alpha: u8) -> Color {
    match alpha {
        0 => destination,
        255 => source,
        _ => destination
            .into_format::<f32>()
            .mix(source.into_format::<f32>(), alpha as f32 / 255.0)
            .into_format(),
    }
}
