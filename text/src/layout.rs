//! Turning a string into positioned glyphs.
//!
//! [`TextLayout`] is an iterator: each call to `next` consumes one code point
//! and yields a [`Glyph`] saying where it goes, moving the cursor as it
//! goes. Nothing is drawn here; the renderer (or anything else) consumes the
//! glyphs.

use core::cmp::{max, min};
use core::iter::FusedIterator;

use byteorder::{ByteOrder, LittleEndian};
use smart_default::SmartDefault;

use crate::alignment::{classify, Alignment};
use crate::charset::{CharsetTable, GlyphFlags, GlyphHeader};
use crate::decode::{CodePoint, CodePoints};

const TAB: CodePoint = 0x09;
const LINE_FEED: CodePoint = 0x0A;
const SPACE: CodePoint = 0x20;
const NO_BREAK_SPACE: CodePoint = 0xA0;
const SOFT_HYPHEN: CodePoint = 0xAD;
const EN_SPACE: CodePoint = 0x2002;
const EM_SPACE: CodePoint = 0x2003;
const THREE_PER_EM_SPACE: CodePoint = 0x2004;
const FOUR_PER_EM_SPACE: CodePoint = 0x2005;
const SIX_PER_EM_SPACE: CodePoint = 0x2006;
const THIN_SPACE: CodePoint = 0x2009;
const IDEOGRAPHIC_SPACE: CodePoint = 0x3000;

/// Where and how text is laid out. All units are pixels.
#[derive(Clone, Debug, SmartDefault)]
pub struct LayoutOptions {
    /// Left edge of every line.
    pub x: i32,
    /// Top of the first line.
    pub y: i32,
    /// Glyphs are clipped at this x; with `wrap`, they move to the next line
    /// instead where possible.
    #[default(240)]
    pub max_x: i32,
    /// Layout stops once a line starts at or below this y.
    #[default(160)]
    pub max_y: i32,
    /// Advance for U+0020 and U+00A0.
    #[default(3)]
    pub space_width: i32,
    #[default(12)]
    pub line_height: i32,
    /// Nominal glyph height of the fonts in use. Lines are shifted down by
    /// `line_height - glyph_height` so that glyphs sit at the bottom of
    /// taller lines.
    #[default(12)]
    pub glyph_height: i32,
    /// Minimum cell width for proportional glyphs. Narrower glyphs are
    /// centered in the cell, which gives monospaced output.
    pub pad_character_width: i32,
    /// Cell width for fullwidth glyphs, and the em used for Unicode spaces.
    #[default(12)]
    pub fullwidth_width: i32,
    /// Tab stops are this far apart, counted from `x`.
    #[default(16)]
    pub tab_width: i32,
    #[default(true)]
    pub wrap: bool,
    /// Tuck glyphs one pixel closer where the font's kerning hints allow.
    pub kerning: bool,
}

/// One positioned glyph.
#[derive(Copy, Clone, Debug)]
pub struct Glyph<'a> {
    pub code_point: CodePoint,
    /// Row bitmaps, or `None` for whitespace and characters no charset
    /// covers.
    pub data: Option<&'a [u8]>,
    /// Rows are 16 bits rather than 8.
    pub wide: bool,
    pub x: i32,
    pub y: i32,
    /// Cursor position after this glyph.
    pub next_x: i32,
    /// Visible width after clipping.
    pub size_x: u8,
    /// Visible height after clipping.
    pub size_y: u8,
    pub truncated_x: bool,
    pub truncated_y: bool,
}

impl<'a> Glyph<'a> {
    fn unprintable(code_point: CodePoint, x: i32, y: i32, next_x: i32) -> Self {
        Glyph {
            code_point,
            data: None,
            wide: false,
            x,
            y,
            next_x,
            size_x: 0,
            size_y: 0,
            truncated_x: false,
            truncated_y: false,
        }
    }

    pub fn is_printable(&self) -> bool {
        self.data.is_some()
    }

    /// Row `r` of the bitmap, leftmost pixel in bit 0.
    ///
    /// # Panics
    ///
    /// If the glyph has no data or fewer than `r + 1` rows.
    pub fn row(&self, r: usize) -> u16 {
        let data = self.data.unwrap_or(&[]);
        if self.wide {
            LittleEndian::read_u16(&data[r * 2..r * 2 + 2])
        } else {
            u16::from(data[r])
        }
    }
}

/// Region touched by drawn glyphs. `min` is inclusive, `max` exclusive.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl BoundingBox {
    pub fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> i32 {
        self.max_y - self.min_y
    }

    /// Smallest box covering both.
    pub fn union(self, other: BoundingBox) -> BoundingBox {
        BoundingBox {
            min_x: min(self.min_x, other.min_x),
            min_y: min(self.min_y, other.min_y),
            max_x: max(self.max_x, other.max_x),
            max_y: max(self.max_y, other.max_y),
        }
    }
}

/// Iterator of positioned glyphs for one string.
///
/// The bounding box is only complete once the iterator has returned `None`;
/// use [`TextLayout::exhaust`] to measure text without drawing it.
///
/// `'t` borrows the text and the table. Yielded glyphs borrow only the glyph
/// data, for `'a`, and may outlive the layout.
#[derive(Clone, Debug)]
pub struct TextLayout<'t, 'a> {
    chars: CodePoints<'t>,
    charsets: &'t CharsetTable<'a>,
    options: LayoutOptions,
    x: i32,
    y: i32,
    bounds: Option<BoundingBox>,
    /// Kerning hints of the previous glyph on this line.
    prev_flags: Option<GlyphFlags>,
}

impl<'t, 'a> TextLayout<'t, 'a> {
    pub fn new<T>(
        text: &'t T,
        charsets: &'t CharsetTable<'a>,
        options: LayoutOptions,
    ) -> Self
    where
        T: AsRef<[u8]> + ?Sized,
    {
        TextLayout {
            chars: CodePoints::new(text.as_ref()),
            charsets,
            x: options.x,
            y: options.y + options.line_height - options.glyph_height,
            options,
            bounds: None,
            prev_flags: None,
        }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Current cursor position.
    pub fn cursor(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Area covered by the glyphs produced so far, or `None` if none had any
    /// visible pixels.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.bounds
    }

    /// Runs the layout to the end and returns the final bounds.
    pub fn exhaust(&mut self) -> Option<BoundingBox> {
        for _ in &mut *self {}
        self.bounds
    }

    fn newline(&mut self) {
        self.x = self.options.x;
        self.y += self.options.line_height;
        self.prev_flags = None;
    }

    /// Moves the cursor for whitespace. Returns `false`, leaving the cursor
    /// alone, if `cp` isn't whitespace.
    fn advance_whitespace(&mut self, cp: CodePoint) -> bool {
        let em = self.options.fullwidth_width;
        match cp {
            LINE_FEED => self.newline(),
            TAB => {
                let tab = self.options.tab_width;
                if tab > 0 {
                    let column = (self.x - self.options.x).div_euclid(tab);
                    self.x = self.options.x + (column + 1) * tab;
                }
            }
            SPACE | NO_BREAK_SPACE => self.x += self.options.space_width,
            SOFT_HYPHEN => (),
            EN_SPACE => self.x += em / 2,
            EM_SPACE => self.x += em,
            THREE_PER_EM_SPACE => self.x += em / 3,
            FOUR_PER_EM_SPACE => self.x += em / 4,
            SIX_PER_EM_SPACE => self.x += em / 6,
            THIN_SPACE => self.x += em / 5,
            IDEOGRAPHIC_SPACE => self.x += em + 1,
            _ => return false,
        }
        self.prev_flags = None;
        true
    }

    /// Horizontal placement of a glyph at the current cursor: its left edge
    /// and the cursor position after it.
    fn place(&self, cp: CodePoint, header: GlyphHeader) -> (i32, i32) {
        let natural = drawn_width(header);
        let fullwidth = self.options.fullwidth_width;
        let slack = max(fullwidth - natural, 0);
        let cursor = self.x;
        match classify(cp) {
            Alignment::Normal => {
                let kern = match (self.options.kerning, self.prev_flags) {
                    (true, Some(prev)) if header.flags().kerns_after(prev) => 1,
                    _ => 0,
                };
                let cell = max(natural, self.options.pad_character_width);
                let left = cursor - kern;
                (left + (cell - natural) / 2, left + cell + 1)
            }
            Alignment::FullwidthLeft => (cursor, cursor + fullwidth + 1),
            Alignment::FullwidthRight => {
                (cursor + slack, cursor + fullwidth + 1)
            }
            Alignment::FullwidthCenter => {
                (cursor + slack / 2, cursor + fullwidth + 1)
            }
        }
    }
}

impl<'t, 'a> Iterator for TextLayout<'t, 'a> {
    type Item = Glyph<'a>;

    fn next(&mut self) -> Option<Glyph<'a>> {
        if self.y >= self.options.max_y {
            return None;
        }
        let cp = self.chars.next()?;

        let (start_x, start_y) = (self.x, self.y);
        if self.advance_whitespace(cp) {
            return Some(Glyph::unprintable(cp, start_x, start_y, self.x));
        }

        let (charset, header) = match self.charsets.find(cp) {
            Some(found) => found,
            None => {
                log::trace!("no glyph for U+{:04X}", cp);
                self.prev_flags = None;
                return Some(Glyph::unprintable(cp, start_x, start_y, start_x));
            }
        };

        let natural_x = drawn_width(header);
        let (mut x, mut next_x) = self.place(cp, header);
        if self.options.wrap
            && self.x > self.options.x
            && x + natural_x > self.options.max_x
        {
            log::trace!("wrapping before U+{:04X} at x = {}", cp, x);
            self.newline();
            let placed = self.place(cp, header);
            x = placed.0;
            next_x = placed.1;
        }

        let natural_y = drawn_height(header);
        let y = self.y + i32::from(header.offset_y());
        let size_x = clip(natural_x, self.options.max_x - x);
        let size_y = clip(natural_y, self.options.max_y - y);

        if size_x > 0 && size_y > 0 {
            let drawn = BoundingBox {
                min_x: x,
                min_y: y,
                max_x: x + i32::from(size_x),
                max_y: y + i32::from(size_y),
            };
            self.bounds = Some(match self.bounds {
                Some(b) => b.union(drawn),
                None => drawn,
            });
        }

        self.x = next_x;
        self.prev_flags = Some(header.flags());

        Some(Glyph {
            code_point: cp,
            data: Some(charset.rows(header)),
            wide: header.is_wide(),
            x,
            y,
            next_x,
            size_x,
            size_y,
            truncated_x: i32::from(size_x) < natural_x,
            truncated_y: i32::from(size_y) < natural_y,
        })
    }
}

impl<'t, 'a> FusedIterator for TextLayout<'t, 'a> {}

fn drawn_width(header: GlyphHeader) -> i32 {
    if header.is_blank() {
        0
    } else {
        i32::from(header.size_x())
    }
}

fn drawn_height(header: GlyphHeader) -> i32 {
    if header.is_blank() {
        0
    } else {
        i32::from(header.size_y())
    }
}

/// Clamps a glyph dimension to the space left before the edge.
fn clip(natural: i32, room: i32) -> u8 {
    max(min(natural, room), 0) as u8
}
