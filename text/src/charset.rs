//! Pre-packed glyph data, one blob per Unicode block.
//!
//! A blob starts with one 4-byte header per code point in the block, indexed
//! by `code_point - min`, followed by the row bitmaps those headers point at.
//! Each row is one byte for glyphs up to 8 pixels wide and a little-endian
//! halfword for wider glyphs, with the leftmost pixel in the least
//! significant bit.

use arrayvec::ArrayVec;
use bit_field::BitField;
use bitflags::bitflags;
use byteorder::{ByteOrder, LittleEndian};

use crate::decode::CodePoint;

/// Size of one packed glyph header in bytes.
pub const HEADER_SIZE: usize = 4;

/// Most charsets a single [`CharsetTable`] can hold.
pub const MAX_CHARSETS: usize = 8;

bitflags! {
    /// Kerning hints computed by the font packer from a glyph's edge columns.
    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    pub struct GlyphFlags: u8 {
        /// Last column is a single pixel near the top ('f', 'r').
        const TAIL_TOP = 1 << 0;
        /// First column starts below the top five rows.
        const HEAD_LOW = 1 << 1;
        /// First column is a single pixel near the bottom ('j').
        const HEAD_BOTTOM = 1 << 2;
        /// Last column ends above the bottom rows.
        const TAIL_HIGH = 1 << 3;
    }
}

impl GlyphFlags {
    /// Whether a glyph with these flags can tuck one pixel under the tail of
    /// a preceding glyph with flags `prev`.
    pub fn kerns_after(self, prev: GlyphFlags) -> bool {
        (prev.contains(GlyphFlags::TAIL_TOP)
            && self.contains(GlyphFlags::HEAD_LOW))
            || (prev.contains(GlyphFlags::TAIL_HIGH)
                && self.contains(GlyphFlags::HEAD_BOTTOM))
    }
}

/// Packed per-glyph metadata.
///
/// | bits  | field         |
/// |-------|---------------|
/// | 0-3   | `size_x`      |
/// | 4-7   | `size_y`      |
/// | 8-11  | `offset_y`    |
/// | 12-15 | kerning flags |
/// | 16-31 | `data_offset` |
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct GlyphHeader(pub u32);

impl GlyphHeader {
    pub fn new(
        size_x: u8,
        size_y: u8,
        offset_y: u8,
        flags: GlyphFlags,
        data_offset: u16,
    ) -> Self {
        let mut bits = 0u32;
        bits.set_bits(0..4, u32::from(size_x))
            .set_bits(4..8, u32::from(size_y))
            .set_bits(8..12, u32::from(offset_y))
            .set_bits(12..16, u32::from(flags.bits()))
            .set_bits(16..32, u32::from(data_offset));
        GlyphHeader(bits)
    }

    /// Decodes a header from its little-endian on-disk form.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        GlyphHeader(LittleEndian::read_u32(bytes))
    }

    /// Width in pixels.
    pub fn size_x(self) -> u8 {
        self.0.get_bits(0..4) as u8
    }

    /// Height in pixels, which is also the number of stored rows.
    pub fn size_y(self) -> u8 {
        self.0.get_bits(4..8) as u8
    }

    /// Blank rows above the first stored row.
    pub fn offset_y(self) -> u8 {
        self.0.get_bits(8..12) as u8
    }

    pub fn flags(self) -> GlyphFlags {
        GlyphFlags::from_bits_truncate(self.0.get_bits(12..16) as u8)
    }

    /// Byte offset of the first row from the start of the blob.
    pub fn data_offset(self) -> u16 {
        self.0.get_bits(16..32) as u16
    }

    /// Rows are stored as halfwords.
    pub fn is_wide(self) -> bool {
        self.size_x() > 8
    }

    /// The packer writes a zero offset for cells with no pixels.
    pub fn is_blank(self) -> bool {
        self.data_offset() == 0
    }

    pub fn row_bytes(self) -> usize {
        if self.is_wide() {
            2
        } else {
            1
        }
    }
}

/// One contiguous block of code points and its packed glyph data.
///
/// A charset whose data was left out of the build still knows its range but
/// has no data, and lookups skip it.
#[derive(Copy, Clone, Debug)]
pub struct Charset<'a> {
    min: CodePoint,
    max: CodePoint,
    enabled: bool,
    data: &'a [u8],
}

impl<'a> Charset<'a> {
    /// Describes the block `min..=max` backed by `data`.
    pub const fn new(min: CodePoint, max: CodePoint, data: &'a [u8]) -> Self {
        Charset {
            min,
            max,
            enabled: true,
            data,
        }
    }

    /// Describes the block `min..=max` with its data compiled out.
    pub const fn disabled(min: CodePoint, max: CodePoint) -> Self {
        Charset {
            min,
            max,
            enabled: false,
            data: &[],
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn has_data(&self) -> bool {
        !self.data.is_empty()
    }

    pub fn contains(&self, cp: CodePoint) -> bool {
        self.min <= cp && cp <= self.max
    }

    pub fn code_point_min(&self) -> CodePoint {
        self.min
    }

    pub fn code_point_max(&self) -> CodePoint {
        self.max
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Reads the header for the glyph `index` cells into the block.
    ///
    /// # Panics
    ///
    /// If the header lies beyond the end of the data.
    pub fn header(&self, index: usize) -> GlyphHeader {
        let at = index * HEADER_SIZE;
        GlyphHeader::from_bytes(&self.data[at..at + HEADER_SIZE])
    }

    /// Looks up the header for `cp`, if it falls in this block.
    pub fn glyph_header(&self, cp: CodePoint) -> Option<GlyphHeader> {
        if self.has_data() && self.contains(cp) {
            Some(self.header((cp - self.min) as usize))
        } else {
            None
        }
    }

    /// The row bitmaps `header` refers to; empty for a blank glyph.
    ///
    /// # Panics
    ///
    /// If the rows extend past the end of the data.
    pub fn rows(&self, header: GlyphHeader) -> &'a [u8] {
        if header.is_blank() {
            return &[];
        }
        let start = usize::from(header.data_offset());
        let len = usize::from(header.size_y()) * header.row_bytes();
        &self.data[start..start + len]
    }
}

/// The charsets consulted when laying out text, in priority order.
///
/// Only charsets with data are kept. Ranges are expected not to overlap; if
/// they do, the first charset listed wins.
#[derive(Clone, Debug)]
pub struct CharsetTable<'a> {
    charsets: ArrayVec<[&'a Charset<'a>; MAX_CHARSETS]>,
}

impl<'a> CharsetTable<'a> {
    /// Builds a table from every charset in `all` that has data.
    ///
    /// # Panics
    ///
    /// If more than [`MAX_CHARSETS`] of them do.
    pub fn new(all: &'a [Charset<'a>]) -> Self {
        let mut charsets = ArrayVec::new();
        for charset in all.iter().filter(|c| c.has_data()) {
            let pushed = charsets.try_push(charset).is_ok();
            assert!(pushed, "more than {} charsets with data", MAX_CHARSETS);
        }
        log::debug!(
            "charset table: {} of {} charsets have data",
            charsets.len(),
            all.len()
        );
        CharsetTable { charsets }
    }

    /// Finds the first charset covering `cp` and the glyph's header.
    pub fn find(&self, cp: CodePoint) -> Option<(&'a Charset<'a>, GlyphHeader)> {
        self.charsets
            .iter()
            .find(|c| c.contains(cp))
            .map(|&c| (c, c.header((cp - c.code_point_min()) as usize)))
    }

    pub fn iter<'t>(&'t self) -> impl Iterator<Item = &'a Charset<'a>> + 't {
        self.charsets.iter().cloned()
    }

    pub fn len(&self) -> usize {
        self.charsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charsets.is_empty()
    }
}
