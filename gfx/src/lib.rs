//! Pixel surfaces and the shape rasterizer that draws on them.
//!
//! This crate is deliberately architecture-independent to allow for testing on
//! the host. A surface is anything implementing [`Surface`]; three concrete
//! memory layouts are provided:
//!
//! - [`Bitmap`]: a linear array of same-sized pixels.
//! - [`VramBitmap`]: a linear array of 8-bit pixels in memory that only accepts
//!   16-bit writes, such as video RAM.
//! - [`TiledSurface`]: a grid of 8x8 tiles at 4 or 8 bits per pixel, also in
//!   16-bit-write memory.
//!
//! Each of them can wrap memory supplied by the caller (e.g. a slice over
//! mapped video memory) or, with the `alloc` feature, a heap buffer it owns.
//!
//! Shapes (rectangles, outlines, lines) live in [`raster`] and are built only
//! on the `Surface` operations, so they work on any layout.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

pub mod bitmap;
pub mod raster;
pub mod tiled;
pub mod vram;

pub use crate::bitmap::Bitmap;
pub use crate::tiled::{Bpp4, Bpp8, TileDepth, TiledSurface};
pub use crate::vram::VramBitmap;

use core::fmt;

/// A pixel-addressable drawing destination.
///
/// All coordinates are in pixels with the origin at the top left. Every
/// operation requires its coordinates (and run lengths) to lie within
/// `width() x height()`; violating this is a programming error and panics.
///
/// Only `width`, `height`, `get_pixel` and `set_pixel` are required. The run
/// and fill operations have generic implementations in terms of those, which
/// layouts override when they can write memory in bulk.
pub trait Surface {
    /// Value stored for a single pixel.
    type Pixel: Copy;

    /// Width of the surface in pixels.
    fn width(&self) -> usize;

    /// Height of the surface in pixels.
    fn height(&self) -> usize;

    /// Reads the pixel at `(x, y)`.
    fn get_pixel(&self, x: usize, y: usize) -> Self::Pixel;

    /// Writes `value` to the pixel at `(x, y)`.
    fn set_pixel(&mut self, x: usize, y: usize, value: Self::Pixel);

    /// Writes `value` to `length` pixels starting at `(x, y)` and moving
    /// right.
    fn draw_horizontal_run(
        &mut self,
        x: usize,
        y: usize,
        length: usize,
        value: Self::Pixel,
    ) {
        check_run(self.width(), self.height(), x, y, length, 1);
        for i in 0..length {
            self.set_pixel(x + i, y, value);
        }
    }

    /// Writes `value` to `length` pixels starting at `(x, y)` and moving
    /// down.
    fn draw_vertical_run(
        &mut self,
        x: usize,
        y: usize,
        length: usize,
        value: Self::Pixel,
    ) {
        check_run(self.width(), self.height(), x, y, 1, length);
        for i in 0..length {
            self.set_pixel(x, y + i, value);
        }
    }

    /// Fills the `width x height` rectangle whose top left corner is `(x, y)`.
    fn fill_rect(
        &mut self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        value: Self::Pixel,
    ) {
        check_run(self.width(), self.height(), x, y, width, height);
        if width == 0 {
            return;
        }
        for row in y..y + height {
            self.draw_horizontal_run(x, row, width, value);
        }
    }

    /// Sets every addressable pixel to `value`.
    fn fill(&mut self, value: Self::Pixel) {
        let (width, height) = (self.width(), self.height());
        self.fill_rect(0, 0, width, height, value)
    }
}

/// Failure to produce a surface with owned storage.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SurfaceError {
    /// The allocator could not provide the backing buffer.
    OutOfMemory,
    /// The requested dimensions don't fit in the address space.
    TooLarge,
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SurfaceError::OutOfMemory => {
                f.write_str("out of memory allocating surface")
            }
            SurfaceError::TooLarge => f.write_str("surface dimensions overflow"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SurfaceError {}

/// Number of storage elements a linear layout needs to hold `height` rows of
/// `width` elements spaced `pitch` apart. The last row doesn't need padding.
pub(crate) fn linear_extent(
    width: usize,
    height: usize,
    pitch: usize,
) -> Option<usize> {
    if height == 0 {
        return Some(0);
    }
    pitch.checked_mul(height - 1)?.checked_add(width)
}

/// Allocates a zeroed buffer of `len` elements, reporting failure instead of
/// aborting.
#[cfg(any(test, feature = "alloc"))]
pub(crate) fn try_alloc_buffer<T: Copy + Default>(
    len: usize,
) -> Result<alloc::vec::Vec<T>, SurfaceError> {
    let mut buf = alloc::vec::Vec::new();
    if buf.try_reserve_exact(len).is_err() {
        log::warn!("surface allocation of {} elements failed", len);
        return Err(SurfaceError::OutOfMemory);
    }
    buf.resize(len, T::default());
    log::debug!("allocated surface storage: {} elements", len);
    Ok(buf)
}

#[inline]
pub(crate) fn check_point(width: usize, height: usize, x: usize, y: usize) {
    assert!(
        x < width && y < height,
        "pixel ({}, {}) outside {}x{} surface",
        x,
        y,
        width,
        height,
    );
}

/// Checks that the `w x h` block at `(x, y)` lies inside the surface. Empty
/// blocks are fine anywhere up to and including the far edges.
#[inline]
pub(crate) fn check_run(
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    w: usize,
    h: usize,
) {
    let fits = x
        .checked_add(w)
        .map_or(false, |end| end <= width)
        && y.checked_add(h).map_or(false, |end| end <= height);
    assert!(
        fits,
        "{}x{} block at ({}, {}) outside {}x{} surface",
        w,
        h,
        x,
        y,
        width,
        height,
    );
}
