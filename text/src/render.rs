//! Drawing laid-out text onto a surface.

use core::convert::TryFrom;

use gfx::Surface;

use crate::charset::CharsetTable;
use crate::layout::{BoundingBox, Glyph, LayoutOptions, TextLayout};

/// Draws text in a single color with a fixed set of charsets and options.
#[derive(Clone, Debug)]
pub struct TextRenderer<'t, 'a> {
    charsets: &'t CharsetTable<'a>,
    options: LayoutOptions,
}

impl<'t, 'a> TextRenderer<'t, 'a> {
    pub fn new(charsets: &'t CharsetTable<'a>, options: LayoutOptions) -> Self {
        TextRenderer { charsets, options }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut LayoutOptions {
        &mut self.options
    }

    /// Draws `text` onto `surface`, setting glyph pixels to `value` and
    /// leaving the rest alone. Returns the area drawn.
    pub fn draw<S, T>(
        &self,
        surface: &mut S,
        text: &T,
        value: S::Pixel,
    ) -> Option<BoundingBox>
    where
        S: Surface + ?Sized,
        T: AsRef<[u8]> + ?Sized,
    {
        draw_text(surface, self.charsets, text, &self.options, value)
    }

    /// Lays out `text` without drawing it and returns the area it would
    /// cover.
    pub fn measure<T>(&self, text: &T) -> Option<BoundingBox>
    where
        T: AsRef<[u8]> + ?Sized,
    {
        TextLayout::new(text, self.charsets, self.options.clone()).exhaust()
    }
}

/// Lays out and draws `text` in one go.
///
/// The layout extent is clamped to the surface, so text never runs off its
/// right or bottom edge.
///
/// # Panics
///
/// If `options` places any glyph left of or above the surface.
pub fn draw_text<S, T>(
    surface: &mut S,
    charsets: &CharsetTable,
    text: &T,
    options: &LayoutOptions,
    value: S::Pixel,
) -> Option<BoundingBox>
where
    S: Surface + ?Sized,
    T: AsRef<[u8]> + ?Sized,
{
    let mut options = options.clone();
    options.max_x = options.max_x.min(to_coord(surface.width()));
    options.max_y = options.max_y.min(to_coord(surface.height()));

    let mut layout = TextLayout::new(text, charsets, options);
    for glyph in &mut layout {
        draw_glyph(surface, &glyph, value);
    }
    layout.bounds()
}

/// Blits the visible part of one glyph. Each run of set bits in a row
/// becomes one horizontal run on the surface.
///
/// # Panics
///
/// If the visible part of the glyph isn't entirely on the surface.
pub fn draw_glyph<S>(surface: &mut S, glyph: &Glyph, value: S::Pixel)
where
    S: Surface + ?Sized,
{
    if !glyph.is_printable() || glyph.size_x == 0 || glyph.size_y == 0 {
        return;
    }
    assert!(
        glyph.x >= 0 && glyph.y >= 0,
        "glyph U+{:04X} at ({}, {}) is off the surface",
        glyph.code_point,
        glyph.x,
        glyph.y
    );
    let (x0, y0) = (glyph.x as usize, glyph.y as usize);
    let mask = (1u32 << glyph.size_x) - 1;

    for r in 0..usize::from(glyph.size_y) {
        let mut bits = u32::from(glyph.row(r)) & mask;
        let mut col = 0;
        while bits != 0 {
            let skip = bits.trailing_zeros();
            bits >>= skip;
            col += skip as usize;
            let run = (!bits).trailing_zeros();
            surface.draw_horizontal_run(x0 + col, y0 + r, run as usize, value);
            bits >>= run;
            col += run as usize;
        }
    }
}

fn to_coord(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::max_value())
}
