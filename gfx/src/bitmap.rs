//! Linear bitmaps of same-sized pixels.

use core::marker::PhantomData;

use crate::{check_point, check_run, linear_extent, Surface};

/// A bitmap where the pixel at `(x, y)` is element `x + y * pitch` of the
/// backing store.
///
/// `P` is the pixel type (`u8`, `u16`, `u32` or anything `Copy`). `B` is the
/// storage: a borrowed slice such as `&mut [P]` for memory owned elsewhere, or
/// a `Vec<P>` for a bitmap that owns its buffer (see [`Bitmap::try_alloc`]).
///
/// `pitch` may exceed `width` to skip padding at the end of each row.
#[derive(Debug)]
pub struct Bitmap<P, B> {
    buf: B,
    width: usize,
    height: usize,
    pitch: usize,
    _pixel: PhantomData<P>,
}

impl<P, B> Bitmap<P, B>
where
    P: Copy,
    B: AsRef<[P]> + AsMut<[P]>,
{
    /// Wraps `buf` as a `width x height` bitmap with rows `pitch` elements
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
        let needed = linear_extent(width, height, pitch);
        assert!(
            needed.map_or(false, |n| n <= buf.as_ref().len()),
            "buffer of {} pixels too small for {}x{} bitmap with pitch {}",
            buf.as_ref().len(),
            width,
            height,
            pitch,
        );
        Bitmap {
            buf,
            width,
            height,
            pitch,
            _pixel: PhantomData,
        }
    }

    /// Distance between the starts of consecutive rows, in pixels.
    pub fn pitch(&self) -> usize {
        self.pitch
    }

    pub fn as_slice(&self) -> &[P] {
        self.buf.as_ref()
    }

    pub fn as_mut_slice(&mut self) -> &mut [P] {
        self.buf.as_mut()
    }

    /// Gives back the storage.
    pub fn into_inner(self) -> B {
        self.buf
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        x + y * self.pitch
    }
}

#[cfg(any(test, feature = "alloc"))]
impl<P> Bitmap<P, alloc::vec::Vec<P>>
where
    P: Copy + Default,
{
    /// Allocates a bitmap on the heap, with every pixel set to
    /// `P::default()`. The buffer is released when the bitmap is dropped.
    pub fn try_alloc(
        width: usize,
        height: usize,
        pitch: usize,
    ) -> Result<Self, crate::SurfaceError> {
        let len = linear_extent(width, height, pitch)
            .ok_or(crate::SurfaceError::TooLarge)?;
        let buf = crate::try_alloc_buffer(len)?;
        Ok(Bitmap::new(buf, width, height, pitch))
    }
}

impl<P, B> Surface for Bitmap<P, B>
where
    P: Copy,
    B: AsRef<[P]> + AsMut<[P]>,
{
    type Pixel = P;

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn get_pixel(&self, x: usize, y: usize) -> P {
        check_point(self.width, self.height, x, y);
        self.buf.as_ref()[self.offset(x, y)]
    }

    fn set_pixel(&mut self, x: usize, y: usize, value: P) {
        check_point(self.width, self.height, x, y);
        let offset = self.offset(x, y);
        self.buf.as_mut()[offset] = value;
    }

    fn draw_horizontal_run(
        &mut self,
        x: usize,
        y: usize,
        length: usize,
        value: P,
    ) {
        check_run(self.width, self.height, x, y, length, 1);
        let start = self.offset(x, y);
        self.buf.as_mut()[start..start + length].fill(value);
    }

    fn draw_vertical_run(
        &mut self,
        x: usize,
        y: usize,
        length: usize,
        value: P,
    ) {
        check_run(self.width, self.height, x, y, 1, length);
        let start = self.offset(x, y);
        let pitch = self.pitch;
        for p in self.buf.as_mut()[start..]
            .iter_mut()
            .step_by(pitch)
            .take(length)
        {
            *p = value;
        }
    }

    fn fill(&mut self, value: P) {
        if self.width == self.pitch {
            // No padding: the whole bitmap is one contiguous run.
            let len = self.width * self.height;
            self.buf.as_mut()[..len].fill(value);
        } else {
            let (width, height) = (self.width, self.height);
            self.fill_rect(0, 0, width, height, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_addressing_honors_pitch() {
        let mut buf = [0u16; 4 * 3];
        let mut bmp = Bitmap::<u16, _>::new(&mut buf[..], 3, 3, 4);
        bmp.set_pixel(2, 1, 0xBEEF);
        assert_eq!(bmp.get_pixel(2, 1), 0xBEEF);
        drop(bmp);
        assert_eq!(buf[2 + 4], 0xBEEF);
    }

    #[test]
    fn fill_rect_then_read_back() {
        let mut buf = [7u8; 10 * 8];
        let mut bmp = Bitmap::<u8, _>::new(&mut buf[..], 10, 8, 10);
        bmp.fill_rect(2, 3, 5, 4, 1);
        for y in 0..8 {
            for x in 0..10 {
                let inside = (2..7).contains(&x) && (3..7).contains(&y);
                let expected = if inside { 1 } else { 7 };
                assert_eq!(
                    bmp.get_pixel(x, y),
                    expected,
                    "pixel ({}, {})",
                    x,
                    y
                );
            }
        }
    }

    #[test]
    fn fill_leaves_padding_alone() {
        let mut buf = [9u32; 6 * 2 + 4];
        let mut bmp = Bitmap::<u32, _>::new(&mut buf[..], 4, 3, 6);
        bmp.fill(0);
        drop(bmp);
        assert_eq!(buf[..4], [0; 4]);
        assert_eq!(buf[4..6], [9; 2]);
        assert_eq!(buf[6..10], [0; 4]);
        assert_eq!(buf[10..12], [9; 2]);
        assert_eq!(buf[12..16], [0; 4]);
    }

    #[test]
    fn unpadded_fill_covers_everything() {
        let mut bmp = Bitmap::<u8, _>::try_alloc(5, 5, 5).unwrap();
        bmp.fill(3);
        assert!(bmp.as_slice().iter().all(|&p| p == 3));
    }

    #[test]
    fn vertical_run() {
        let mut bmp = Bitmap::<u8, _>::try_alloc(3, 4, 5).unwrap();
        bmp.draw_vertical_run(1, 1, 3, 2);
        for y in 0..4 {
            assert_eq!(bmp.get_pixel(1, y), if y == 0 { 0 } else { 2 });
            assert_eq!(bmp.get_pixel(0, y), 0);
            assert_eq!(bmp.get_pixel(2, y), 0);
        }
    }

    #[test]
    fn wide_pixels_use_the_generic_path() {
        let mut bmp = Bitmap::<[u8; 3], _>::try_alloc(4, 2, 4).unwrap();
        bmp.draw_horizontal_run(1, 1, 3, [1, 2, 3]);
        assert_eq!(bmp.get_pixel(0, 1), [0; 3]);
        assert_eq!(bmp.get_pixel(3, 1), [1, 2, 3]);
    }

    #[test]
    fn oversized_allocation_is_reported() {
        let r = Bitmap::<u8, _>::try_alloc(2, usize::max_value(), 4);
        assert_eq!(r.unwrap_err(), crate::SurfaceError::TooLarge);
    }

    #[test]
    fn unreservable_allocation_is_reported() {
        // Fits the address space arithmetic but not the allocator.
        let huge = isize::max_value() as usize + 1;
        let r = Bitmap::<u8, _>::try_alloc(huge, 1, huge);
        assert_eq!(r.unwrap_err(), crate::SurfaceError::OutOfMemory);
    }

    #[test]
    #[should_panic]
    fn pitch_narrower_than_width() {
        let mut buf = [0u8; 16];
        Bitmap::<u8, _>::new(&mut buf[..], 4, 2, 3);
    }

    #[test]
    #[should_panic]
    fn buffer_too_short() {
        let mut buf = [0u8; 7];
        Bitmap::<u8, _>::new(&mut buf[..], 4, 2, 4);
    }

    #[test]
    #[should_panic]
    fn set_pixel_out_of_bounds() {
        let mut buf = [0u8; 16];
        let mut bmp = Bitmap::<u8, _>::new(&mut buf[..], 4, 4, 4);
        bmp.set_pixel(4, 0, 1);
    }

    #[test]
    #[should_panic]
    fn run_past_right_edge() {
        let mut buf = [0u8; 16];
        let mut bmp = Bitmap::<u8, _>::new(&mut buf[..], 4, 4, 4);
        bmp.draw_horizontal_run(2, 0, 3, 1);
    }
}
