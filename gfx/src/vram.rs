//! 8-bit bitmaps in memory that only accepts 16-bit writes.
//!
//! Video RAM on the console ignores or corrupts byte-sized stores: a write of
//! one byte lands in both halves of the containing halfword. Every store here
//! is therefore a full `u16`, and single bytes are merged into their halfword
//! with a read-modify-write.

use crate::{check_point, check_run, linear_extent, Surface};

/// An 8-bit-per-pixel linear bitmap stored as halfwords.
///
/// Pixel `(x, y)` is byte `x + y * pitch` of the backing store, little-endian
/// within each halfword: even bytes are the low half.
#[derive(Debug)]
pub struct VramBitmap<B> {
    buf: B,
    width: usize,
    height: usize,
    pitch: usize,
}

impl<B> VramBitmap<B>
where
    B: AsRef<[u16]> + AsMut<[u16]>,
{
    /// Wraps `buf` as a `width x height` bitmap whose rows are `pitch` bytes
    /// apart.
    ///
    /// # Panics
    ///
    /// If `pitch < width`, or if `buf` is too short to hold every row.
    pub fn new(buf: B, width: usize, height: usize, pitch: usize) -> Self {
        assert!(
            width <= pitch,
            "bitmap width {} exceeds pitch {}",
            width,
            pitch
        );
        let needed = linear_extent(width, height, pitch).map(halfwords);
        assert!(
            needed.map_or(false, |n| n <= buf.as_ref().len()),
            "buffer of {} halfwords too small for {}x{} bitmap with pitch {}",
            buf.as_ref().len(),
            width,
            height,
            pitch,
        );
        VramBitmap {
            buf,
            width,
            height,
            pitch,
        }
    }

    /// Distance between the starts of consecutive rows, in bytes.
    pub fn pitch(&self) -> usize {
        self.pitch
    }

    pub fn as_halfwords(&self) -> &[u16] {
        self.buf.as_ref()
    }

    pub fn into_inner(self) -> B {
        self.buf
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        x + y * self.pitch
    }

    fn read_byte(&self, offset: usize) -> u8 {
        let unit = self.buf.as_ref()[offset / 2];
        (unit >> shift(offset)) as u8
    }

    /// Stores one byte by rewriting the halfword that contains it.
    fn write_byte(&mut self, offset: usize, value: u8) {
        let slot = &mut self.buf.as_mut()[offset / 2];
        *slot = merge_byte(*slot, offset, value);
    }

    /// Fills bytes `start..end`. An unaligned byte at either end is merged;
    /// everything between is stored as whole halfwords.
    fn fill_bytes(&mut self, mut start: usize, end: usize, value: u8) {
        if start >= end {
            return;
        }
        if start % 2 != 0 {
            self.write_byte(start, value);
            start += 1;
        }
        let aligned_end = end & !1;
        if aligned_end > start {
            let pair = u16::from(value) * 0x0101;
            self.buf.as_mut()[start / 2..aligned_end / 2].fill(pair);
        }
        if end % 2 != 0 && end - 1 >= start {
            self.write_byte(end - 1, value);
        }
    }
}

#[cfg(any(test, feature = "alloc"))]
impl VramBitmap<alloc::vec::Vec<u16>> {
    /// Allocates a zeroed bitmap on the heap. Mostly useful for rendering off
    /// screen and copying into video memory later.
    pub fn try_alloc(
        width: usize,
        height: usize,
        pitch: usize,
    ) -> Result<Self, crate::SurfaceError> {
        let len = linear_extent(width, height, pitch)
            .map(halfwords)
            .ok_or(crate::SurfaceError::TooLarge)?;
        let buf = crate::try_alloc_buffer(len)?;
        Ok(VramBitmap::new(buf, width, height, pitch))
    }
}

impl<B> Surface for VramBitmap<B>
where
    B: AsRef<[u16]> + AsMut<[u16]>,
{
    type Pixel = u8;

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn get_pixel(&self, x: usize, y: usize) -> u8 {
        check_point(self.width, self.height, x, y);
        self.read_byte(self.offset(x, y))
    }

    fn set_pixel(&mut self, x: usize, y: usize, value: u8) {
        check_point(self.width, self.height, x, y);
        let offset = self.offset(x, y);
        self.write_byte(offset, value);
    }

    fn draw_horizontal_run(
        &mut self,
        x: usize,
        y: usize,
        length: usize,
        value: u8,
    ) {
        check_run(self.width, self.height, x, y, length, 1);
        let start = self.offset(x, y);
        self.fill_bytes(start, start + length, value);
    }

    fn fill(&mut self, value: u8) {
        if self.width == self.pitch {
            let len = self.width * self.height;
            self.fill_bytes(0, len, value);
        } else {
            let (width, height) = (self.width, self.height);
            self.fill_rect(0, 0, width, height, value);
        }
    }
}

fn halfwords(bytes: usize) -> usize {
    (bytes + 1) / 2
}

#[inline]
fn shift(offset: usize) -> u32 {
    (offset as u32 & 1) * 8
}

/// Replaces the byte at `offset` (odd is the high half) within `unit`.
#[inline]
fn merge_byte(unit: u16, offset: usize, value: u8) -> u16 {
    let shift = shift(offset);
    (unit & !(0xFF << shift)) | (u16::from(value) << shift)
}
