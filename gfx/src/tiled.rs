//! Tile-grid surfaces, as used for background and font layers.
//!
//! The surface is a grid of 8x8 pixel tiles stored one after another in
//! row-major order. `tile_pitch` tiles separate the starts of consecutive tile
//! rows, so a surface can cover a window of a larger tile map. Inside a tile,
//! pixels are packed row by row with the leftmost pixel in the least
//! significant bits.
//!
//! Like [`VramBitmap`](crate::VramBitmap), storage is written only in whole
//! halfwords, so sub-halfword pixels are merged with a read-modify-write.

use core::marker::PhantomData;

use crate::{check_point, check_run, Surface};

/// Tile edge length in pixels.
pub const TILE_SIZE: usize = 8;

/// Bits per pixel of a tile layout.
///
/// Implemented by the marker types [`Bpp4`] and [`Bpp8`]; the surface is
/// specialized for each at compile time.
pub trait TileDepth {
    /// Bits per pixel.
    const BITS: usize;
    /// Pixels packed into one halfword.
    const PIXELS_PER_UNIT: usize = 16 / Self::BITS;
    /// Halfwords occupied by one tile.
    const UNITS_PER_TILE: usize = TILE_SIZE * TILE_SIZE / Self::PIXELS_PER_UNIT;
    /// Mask selecting one pixel's bits.
    const MASK: u16 = ((1u32 << Self::BITS) - 1) as u16;

    /// Repeats `value` across every pixel slot of a halfword.
    fn splat(value: u8) -> u16 {
        let value = u16::from(value) & Self::MASK;
        let mut unit = 0;
        for i in 0..Self::PIXELS_PER_UNIT {
            unit |= value << (i * Self::BITS);
        }
        unit
    }
}

/// Four bits per pixel: two pixels per byte, sixteen palette entries.
#[derive(Copy, Clone, Debug)]
pub enum Bpp4 {}

/// Eight bits per pixel: one palette index per byte.
#[derive(Copy, Clone, Debug)]
pub enum Bpp8 {}

impl TileDepth for Bpp4 {
    const BITS: usize = 4;
}

impl TileDepth for Bpp8 {
    const BITS: usize = 8;
}

/// A surface `width_tiles x height_tiles` tiles in size.
///
/// Pixel values are palette indices; with [`Bpp4`] only the low four bits of a
/// value are stored.
#[derive(Debug)]
pub struct TiledSurface<D, B> {
    buf: B,
    width_tiles: usize,
    height_tiles: usize,
    tile_pitch: usize,
    _depth: PhantomData<D>,
}

impl<D, B> TiledSurface<D, B>
where
    D: TileDepth,
    B: AsRef<[u16]> + AsMut<[u16]>,
{
    /// Wraps `buf` as a grid of `width_tiles x height_tiles` tiles whose rows
    /// start `tile_pitch` tiles apart.
    ///
    /// # Panics
    ///
    /// If `tile_pitch < width_tiles`, or if `buf` can't hold every tile.
    pub fn new(
        buf: B,
        width_tiles: usize,
        height_tiles: usize,
        tile_pitch: usize,
    ) -> Self {
        assert!(
            width_tiles <= tile_pitch,
            "tile width {} exceeds tile pitch {}",
            width_tiles,
            tile_pitch
        );
        let needed = units_needed::<D>(width_tiles, height_tiles, tile_pitch);
        assert!(
            needed.map_or(false, |n| n <= buf.as_ref().len()),
            "buffer of {} halfwords too small for {}x{} tiles with pitch {}",
            buf.as_ref().len(),
            width_tiles,
            height_tiles,
            tile_pitch,
        );
        TiledSurface {
            buf,
            width_tiles,
            height_tiles,
            tile_pitch,
            _depth: PhantomData,
        }
    }

    pub fn width_tiles(&self) -> usize {
        self.width_tiles
    }

    pub fn height_tiles(&self) -> usize {
        self.height_tiles
    }

    /// Tiles between the starts of consecutive tile rows.
    pub fn tile_pitch(&self) -> usize {
        self.tile_pitch
    }

    pub fn as_halfwords(&self) -> &[u16] {
        self.buf.as_ref()
    }

    pub fn into_inner(self) -> B {
        self.buf
    }

    /// Index of the first halfword of tile `(tx, ty)`.
    #[inline]
    fn tile_offset(&self, tx: usize, ty: usize) -> usize {
        (ty * self.tile_pitch + tx) * D::UNITS_PER_TILE
    }

    /// Finds the halfword holding pixel `(x, y)` and the bit position of the
    /// pixel within it.
    #[inline]
    fn locate(&self, x: usize, y: usize) -> (usize, usize) {
        let in_tile = (y % TILE_SIZE) * TILE_SIZE + x % TILE_SIZE;
        let unit = self.tile_offset(x / TILE_SIZE, y / TILE_SIZE)
            + in_tile / D::PIXELS_PER_UNIT;
        let shift = (in_tile % D::PIXELS_PER_UNIT) * D::BITS;
        (unit, shift)
    }

    /// Fills tiles `tx0..tx1` of every tile row in `ty0..ty1` with whole
    /// halfword stores.
    fn fill_tiles(
        &mut self,
        tx0: usize,
        ty0: usize,
        tx1: usize,
        ty1: usize,
        value: u8,
    ) {
        let unit = D::splat(value);
        for ty in ty0..ty1 {
            // Adjacent tiles in a row are adjacent in memory.
            let start = self.tile_offset(tx0, ty);
            let end = self.tile_offset(tx1, ty);
            self.buf.as_mut()[start..end].fill(unit);
        }
    }
}

#[cfg(any(test, feature = "alloc"))]
impl<D: TileDepth> TiledSurface<D, alloc::vec::Vec<u16>> {
    /// Allocates a zeroed tile grid on the heap.
    pub fn try_alloc(
        width_tiles: usize,
        height_tiles: usize,
        tile_pitch: usize,
    ) -> Result<Self, crate::SurfaceError> {
        let len = units_needed::<D>(width_tiles, height_tiles, tile_pitch)
            .ok_or(crate::SurfaceError::TooLarge)?;
        let buf = crate::try_alloc_buffer(len)?;
        Ok(TiledSurface::new(buf, width_tiles, height_tiles, tile_pitch))
    }
}

impl<D, B> Surface for TiledSurface<D, B>
where
    D: TileDepth,
    B: AsRef<[u16]> + AsMut<[u16]>,
{
    type Pixel = u8;

    fn width(&self) -> usize {
        self.width_tiles * TILE_SIZE
    }

    fn height(&self) -> usize {
        self.height_tiles * TILE_SIZE
    }

    fn get_pixel(&self, x: usize, y: usize) -> u8 {
        check_point(self.width(), self.height(), x, y);
        let (unit, shift) = self.locate(x, y);
        ((self.buf.as_ref()[unit] >> shift) & D::MASK) as u8
    }

    fn set_pixel(&mut self, x: usize, y: usize, value: u8) {
        check_point(self.width(), self.height(), x, y);
        let (unit, shift) = self.locate(x, y);
        let slot = &mut self.buf.as_mut()[unit];
        *slot = (*slot & !(D::MASK << shift))
            | ((u16::from(value) & D::MASK) << shift);
    }

    fn draw_horizontal_run(
        &mut self,
        x: usize,
        y: usize,
        length: usize,
        value: u8,
    ) {
        check_run(self.width(), self.height(), x, y, length, 1);
        let end = x + length;
        let unit = D::splat(value);
        let mut x = x;
        while x < end {
            // A halfword never straddles tiles, so an aligned group of pixels
            // can be stored without merging.
            if x % D::PIXELS_PER_UNIT == 0 && end - x >= D::PIXELS_PER_UNIT {
                let (offset, _) = self.locate(x, y);
                self.buf.as_mut()[offset] = unit;
                x += D::PIXELS_PER_UNIT;
            } else {
                self.set_pixel(x, y, value);
                x += 1;
            }
        }
    }

    fn fill_rect(
        &mut self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        value: u8,
    ) {
        check_run(self.width(), self.height(), x, y, width, height);
        if width == 0 || height == 0 {
            return;
        }
        let (x1, y1) = (x + width, y + height);
        // Whole tiles covered by the rectangle.
        let tx0 = (x + TILE_SIZE - 1) / TILE_SIZE;
        let ty0 = (y + TILE_SIZE - 1) / TILE_SIZE;
        let tx1 = x1 / TILE_SIZE;
        let ty1 = y1 / TILE_SIZE;

        if tx0 >= tx1 || ty0 >= ty1 {
            // No whole tile inside; just do rows.
            for row in y..y1 {
                self.draw_horizontal_run(x, row, width, value);
            }
            return;
        }

        self.fill_tiles(tx0, ty0, tx1, ty1, value);

        let (ix0, iy0) = (tx0 * TILE_SIZE, ty0 * TILE_SIZE);
        let (ix1, iy1) = (tx1 * TILE_SIZE, ty1 * TILE_SIZE);
        // Top and bottom margins span the full rectangle width.
        for row in (y..iy0).chain(iy1..y1) {
            self.draw_horizontal_run(x, row, width, value);
        }
        // Left and right margins cover only the interior rows.
        for row in iy0..iy1 {
            if x < ix0 {
                self.draw_horizontal_run(x, row, ix0 - x, value);
            }
            if ix1 < x1 {
                self.draw_horizontal_run(ix1, row, x1 - ix1, value);
            }
        }
    }

    fn fill(&mut self, value: u8) {
        let (w, h) = (self.width_tiles, self.height_tiles);
        if w == self.tile_pitch {
            let len = w * h * D::UNITS_PER_TILE;
            self.buf.as_mut()[..len].fill(D::splat(value));
        } else {
            self.fill_tiles(0, 0, w, h, value);
        }
    }
}

fn units_needed<D: TileDepth>(
    width_tiles: usize,
    height_tiles: usize,
    tile_pitch: usize,
) -> Option<usize> {
    crate::linear_extent(width_tiles, height_tiles, tile_pitch)?
        .checked_mul(D::UNITS_PER_TILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_constants() {
        assert_eq!(Bpp4::PIXELS_PER_UNIT, 4);
        assert_eq!(Bpp4::UNITS_PER_TILE, 16);
        assert_eq!(Bpp4::MASK, 0xF);
        assert_eq!(Bpp4::splat(0x3), 0x3333);
        assert_eq!(Bpp8::PIXELS_PER_UNIT, 2);
        assert_eq!(Bpp8::UNITS_PER_TILE, 32);
        assert_eq!(Bpp8::splat(0xA5), 0xA5A5);
    }

    #[test]
    fn bpp4_nibble_placement() {
        let mut s = TiledSurface::<Bpp4, _>::try_alloc(2, 1, 2).unwrap();
        // Second tile, row 1, pixel 5: tile offset 16, row offset 2, unit 1.
        s.set_pixel(13, 1, 0xC);
        assert_eq!(s.as_halfwords()[16 + 2 + 1], 0x00C0);
        s.set_pixel(12, 1, 0x1);
        assert_eq!(s.as_halfwords()[16 + 2 + 1], 0x00C1);
        assert_eq!(s.get_pixel(13, 1), 0xC);
        assert_eq!(s.get_pixel(12, 1), 0x1);
        assert_eq!(s.get_pixel(14, 1), 0);
    }

    #[test]
    fn bpp4_values_are_masked() {
        let mut s = TiledSurface::<Bpp4, _>::try_alloc(1, 1, 1).unwrap();
        s.set_pixel(1, 0, 0xF7);
        assert_eq!(s.get_pixel(1, 0), 0x7);
        assert_eq!(s.get_pixel(0, 0), 0);
        assert_eq!(s.get_pixel(2, 0), 0);
    }

    #[test]
    fn bpp8_byte_placement() {
        let mut s = TiledSurface::<Bpp8, _>::try_alloc(1, 2, 1).unwrap();
        // Second tile row, pixel (3, 2) within the tile.
        s.set_pixel(3, 10, 0x42);
        assert_eq!(s.as_halfwords()[32 + 2 * 4 + 1], 0x4200);
    }

    #[test]
    fn tile_pitch_addresses_a_window() {
        let mut s = TiledSurface::<Bpp4, _>::try_alloc(2, 2, 4).unwrap();
        s.set_pixel(8, 8, 0x5);
        // Tile (1, 1) is index 1 * 4 + 1 = 5.
        assert_eq!(s.as_halfwords()[5 * 16], 0x0005);
    }

    fn check_rect<D: TileDepth>(
        s: &TiledSurface<D, alloc::vec::Vec<u16>>,
        rect: (usize, usize, usize, usize),
        value: u8,
    ) {
        let (rx, ry, rw, rh) = rect;
        for y in 0..s.height() {
            for x in 0..s.width() {
                let inside = x >= rx && x < rx + rw && y >= ry && y < ry + rh;
                let expected = if inside { value } else { 0 };
                assert_eq!(s.get_pixel(x, y), expected, "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn fill_rect_with_margins() {
        let mut s = TiledSurface::<Bpp4, _>::try_alloc(4, 4, 5).unwrap();
        s.fill_rect(3, 5, 22, 19, 0x9);
        check_rect(&s, (3, 5, 22, 19), 0x9);
    }

    #[test]
    fn fill_rect_tile_aligned() {
        let mut s = TiledSurface::<Bpp8, _>::try_alloc(3, 3, 3).unwrap();
        s.fill_rect(8, 0, 16, 8, 0x81);
        check_rect(&s, (8, 0, 16, 8), 0x81);
        // Exactly tiles 1 and 2 of the first row.
        assert!(s.as_halfwords()[..32].iter().all(|&u| u == 0));
        assert!(s.as_halfwords()[32..96].iter().all(|&u| u == 0x8181));
    }

    #[test]
    fn fill_rect_smaller_than_a_tile() {
        let mut s = TiledSurface::<Bpp4, _>::try_alloc(2, 2, 2).unwrap();
        s.fill_rect(6, 6, 4, 3, 0x2);
        check_rect(&s, (6, 6, 4, 3), 0x2);
    }

    #[test]
    fn unaligned_horizontal_run() {
        let mut s = TiledSurface::<Bpp4, _>::try_alloc(3, 1, 3).unwrap();
        s.draw_horizontal_run(2, 4, 17, 0xE);
        check_rect(&s, (2, 4, 17, 1), 0xE);
    }

    #[test]
    fn fill_respects_pitch() {
        let mut s = TiledSurface::<Bpp4, _>::try_alloc(1, 2, 2).unwrap();
        s.fill(0x1);
        let units = s.as_halfwords();
        assert!(units[..16].iter().all(|&u| u == 0x1111));
        assert!(units[16..32].iter().all(|&u| u == 0));
        assert!(units[32..48].iter().all(|&u| u == 0x1111));
    }
}
