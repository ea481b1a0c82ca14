//! Shape drawing on any [`Surface`].
//!
//! Nothing here knows about pixel formats or memory layout: every shape is
//! decomposed into the surface's point, run and rectangle operations, so the
//! surface gets to use its fastest store for each piece.
//!
//! As with the surface operations themselves, all coordinates must lie inside
//! the surface. Nothing is clipped.

use core::mem::swap;

use crate::Surface;

#[derive(Debug)]
pub(crate) enum Direction {
    /// Steps along X, occasionally stepping Y.
    Horizontal,
    /// Steps along Y, occasionally stepping X.
    Vertical,
}

/// Sets every pixel of `surface` to `value`.
pub fn fill<S>(surface: &mut S, value: S::Pixel)
where
    S: Surface + ?Sized,
{
    surface.fill(value)
}

/// Fills the `width x height` rectangle at `(x, y)`.
pub fn fill_rect<S>(
    surface: &mut S,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    value: S::Pixel,
) where
    S: Surface + ?Sized,
{
    surface.fill_rect(x, y, width, height, value)
}

/// Draws the one-pixel border of the `width x height` rectangle at `(x, y)`.
///
/// Corners are drawn once. A rectangle with both dimensions zero draws the
/// single pixel at `(x, y)`; one with only a zero width draws a vertical run of
/// `height` pixels, and one with only a zero height a horizontal run of `width`.
pub fn draw_rect_outline<S>(
    surface: &mut S,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    value: S::Pixel,
) where
    S: Surface + ?Sized,
{
    match (width, height) {
        (0, 0) => surface.set_pixel(x, y, value),
        (0, _) | (1, _) => surface.draw_vertical_run(x, y, height, value),
        (_, 0) | (_, 1) => surface.draw_horizontal_run(x, y, width, value),
        _ => {
            surface.draw_horizontal_run(x, y, width, value);
            surface.draw_horizontal_run(x, y + height - 1, width, value);
            // Sides skip the rows already covered by top and bottom.
            let side = height - 2;
            if side > 0 {
                surface.draw_vertical_run(x, y + 1, side, value);
                surface.draw_vertical_run(x + width - 1, y + 1, side, value);
            }
        }
    }
}

/// Draws a line from `(x0, y0)` to `(x1, y1)`, inclusive of both ends.
///
/// Horizontal and vertical lines become a single run. Everything else uses
/// Bresenham's algorithm, always stepping from the lower to the higher
/// coordinate along the major axis, so swapping the endpoints draws exactly the
/// same pixels.
///
/// # Panics
///
/// If either endpoint falls outside the surface.
pub fn draw_line<S>(
    surface: &mut S,
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
    value: S::Pixel,
) where
    S: Surface + ?Sized,
{
    let (w, h) = (surface.width(), surface.height());
    assert!(
        x0 < w && y0 < h && x1 < w && y1 < h,
        "line ({}, {})-({}, {}) outside {}x{} surface",
        x0,
        y0,
        x1,
        y1,
        w,
        h,
    );

    if y0 == y1 {
        let (left, right) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        surface.draw_horizontal_run(left, y0, right - left + 1, value);
        return;
    }
    if x0 == x1 {
        let (top, bottom) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        surface.draw_vertical_run(x0, top, bottom - top + 1, value);
        return;
    }

    let dx = abs_diff(x0, x1);
    let dy = abs_diff(y0, y1);
    let dir = if dy < dx {
        Direction::Horizontal
    } else {
        Direction::Vertical
    };
    draw_line_bresenham(surface, (x0, y0), (x1, y1), dir, value);
}

/// General-case line drawing. `dir` names the major axis; the endpoints are
/// reordered so the major coordinate only ever increases.
fn draw_line_bresenham<S>(
    surface: &mut S,
    mut p0: (usize, usize),
    mut p1: (usize, usize),
    dir: Direction,
    value: S::Pixel,
) where
    S: Surface + ?Sized,
{
    // Project onto (major, minor) so one loop serves both directions.
    let project = |p: (usize, usize)| match dir {
        Direction::Horizontal => (p.0, p.1),
        Direction::Vertical => (p.1, p.0),
    };
    if project(p0).0 > project(p1).0 {
        swap(&mut p0, &mut p1);
    }
    let (major0, minor0) = project(p0);
    let (major1, minor1) = project(p1);

    let dmajor = (major1 - major0) as isize;
    let (dminor, minor_adv) = if minor1 >= minor0 {
        ((minor1 - minor0) as isize, 1)
    } else {
        ((minor0 - minor1) as isize, -1)
    };

    let dmajor2 = dmajor * 2;
    let dminor2 = dminor * 2;
    let mut diff = dminor2 - dmajor;
    let mut minor = minor0 as isize;

    for major in major0..=major1 {
        let m = minor as usize;
        match dir {
            Direction::Horizontal => surface.set_pixel(major, m, value),
            Direction::Vertical => surface.set_pixel(m, major, value),
        }
        if diff > 0 {
            minor += minor_adv;
            diff -= dmajor2;
        }
        diff += dminor2;
    }
}

fn abs_diff(a: usize, b: usize) -> usize {
    if a > b {
        a - b
    } else {
        b - a
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Bitmap;
    use alloc::vec::Vec;
    use rand::{Rng, SeedableRng};

    fn check_line(buf: &[u8], stride: usize, pred: fn(usize, usize) -> bool) {
        for (i, p) in buf.iter().enumerate() {
            let (x, y) = (i % stride, i / stride);
            if pred(x, y) {
                assert_eq!(*p, 1, "Pixel at ({}, {}) should be set", x, y);
            } else {
                assert_eq!(*p, 0, "Pixel at ({}, {}) should not be set", x, y);
            }
        }
    }

    fn line_pixels(
        (x0, y0): (usize, usize),
        (x1, y1): (usize, usize),
    ) -> Vec<u8> {
        let mut bmp = Bitmap::<u8, _>::try_alloc(64, 64, 64).unwrap();
        draw_line(&mut bmp, x0, y0, x1, y1, 1);
        bmp.into_inner()
    }

    #[test]
    fn zero_length() {
        let mut buf = [0; 1];
        let mut bmp = Bitmap::<u8, _>::new(&mut buf[..], 1, 1, 1);
        draw_line(&mut bmp, 0, 0, 0, 0, 1);
        // A zero-length line should still set one pixel.
        check_line(&buf, 1, |_, _| true);
    }

    #[test]
    fn horizontal_full() {
        // Buffer on the stack to make corruption *slightly* more obvious.
        let mut buf = [0; 100 * 100];
        let mut bmp = Bitmap::<u8, _>::new(&mut buf[..], 100, 100, 100);
        draw_line(&mut bmp, 99, 0, 0, 0, 1);
        check_line(&buf, 100, |_, y| y == 0);
    }

    #[test]
    fn vertical_full() {
        let mut buf = [0; 100 * 100];
        let mut bmp = Bitmap::<u8, _>::new(&mut buf[..], 100, 100, 100);
        draw_line(&mut bmp, 0, 99, 0, 0, 1);
        check_line(&buf, 100, |x, _| x == 0);
    }

    #[test]
    fn diagonal_full() {
        let mut buf = [0; 100 * 100];
        let mut bmp = Bitmap::<u8, _>::new(&mut buf[..], 100, 100, 100);
        draw_line(&mut bmp, 0, 0, 99, 99, 1);
        check_line(&buf, 100, |x, y| x == y);
    }

    #[test]
    fn anti_diagonal() {
        let mut buf = [0; 10 * 10];
        let mut bmp = Bitmap::<u8, _>::new(&mut buf[..], 10, 10, 10);
        draw_line(&mut bmp, 9, 0, 0, 9, 1);
        check_line(&buf, 10, |x, y| x + y == 9);
    }

    #[test]
    fn shallow_slope_steps_once() {
        let mut buf = [0; 5 * 2];
        let mut bmp = Bitmap::<u8, _>::new(&mut buf[..], 5, 2, 5);
        draw_line(&mut bmp, 0, 0, 4, 1, 1);
        // diff starts at 2 - 4 = -2, reaches 0 at x = 1 and 2 at x = 2, so Y
        // steps after the third pixel.
        check_line(&buf, 5, |x, y| (y == 0 && x <= 2) || (y == 1 && x > 2));
    }

    #[test]
    fn endpoints_are_always_set() {
        let cases = [
            ((3, 7), (40, 12)),
            ((40, 12), (3, 7)),
            ((5, 60), (9, 2)),
            ((0, 63), (63, 0)),
            ((20, 20), (21, 50)),
        ];
        for &(p0, p1) in &cases {
            let px = line_pixels(p0, p1);
            assert_eq!(px[p0.0 + p0.1 * 64], 1, "{:?} -> {:?}", p0, p1);
            assert_eq!(px[p1.0 + p1.1 * 64], 1, "{:?} -> {:?}", p0, p1);
        }
    }

    #[test]
    fn direction_independent() {
        let cases = [
            ((0, 5), (63, 5)),  // horizontal
            ((7, 0), (7, 63)),  // vertical
            ((0, 0), (40, 40)), // 45 degrees
            ((2, 3), (60, 17)), // shallow
            ((9, 1), (30, 62)), // steep
            ((50, 4), (3, 21)), // shallow, rising
            ((33, 2), (12, 61)), // steep, rising
        ];
        for &(p0, p1) in &cases {
            assert_eq!(line_pixels(p0, p1), line_pixels(p1, p0), "{:?} {:?}", p0, p1);
        }
    }

    #[test]
    fn direction_independent_random() {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(0x6ba);
        for _ in 0..200 {
            let p0 = (rng.gen_range(0, 64), rng.gen_range(0, 64));
            let p1 = (rng.gen_range(0, 64), rng.gen_range(0, 64));
            assert_eq!(line_pixels(p0, p1), line_pixels(p1, p0), "{:?} {:?}", p0, p1);
        }
    }

    #[test]
    fn one_pixel_per_major_step() {
        let px = line_pixels((1, 2), (50, 20));
        for x in 0..64 {
            let count = (0..64).filter(|y| px[x + y * 64] != 0).count();
            let expected = if x >= 1 && x <= 50 { 1 } else { 0 };
            assert_eq!(count, expected, "column {}", x);
        }
    }

    #[test]
    #[should_panic]
    fn endpoint_out_of_bounds() {
        let mut buf = [0; 10 * 10];
        let mut bmp = Bitmap::<u8, _>::new(&mut buf[..], 10, 10, 10);
        draw_line(&mut bmp, 0, 0, 0, 10, 1);
    }

    #[test]
    fn outline_corners_drawn_once() {
        // Count writes by making each one add rather than store.
        struct Counter([[u8; 6]; 5]);
        impl Surface for Counter {
            type Pixel = u8;
            fn width(&self) -> usize {
                6
            }
            fn height(&self) -> usize {
                5
            }
            fn get_pixel(&self, x: usize, y: usize) -> u8 {
                self.0[y][x]
            }
            fn set_pixel(&mut self, x: usize, y: usize, value: u8) {
                self.0[y][x] += value;
            }
        }
        let mut c = Counter([[0; 6]; 5]);
        draw_rect_outline(&mut c, 1, 1, 4, 3, 1);
        let expected = [
            [0, 0, 0, 0, 0, 0],
            [0, 1, 1, 1, 1, 0],
            [0, 1, 0, 0, 1, 0],
            [0, 1, 1, 1, 1, 0],
            [0, 0, 0, 0, 0, 0],
        ];
        assert_eq!(c.0, expected);
    }

    #[test]
    fn outline_degenerate_cases() {
        let mut buf = [0; 4 * 4];
        let mut bmp = Bitmap::<u8, _>::new(&mut buf[..], 4, 4, 4);
        draw_rect_outline(&mut bmp, 2, 1, 0, 0, 1);
        check_line(&buf, 4, |x, y| (x, y) == (2, 1));

        let mut buf = [0; 4 * 4];
        let mut bmp = Bitmap::<u8, _>::new(&mut buf[..], 4, 4, 4);
        draw_rect_outline(&mut bmp, 1, 0, 0, 3, 1);
        check_line(&buf, 4, |x, y| x == 1 && y < 3);

        let mut buf = [0; 4 * 4];
        let mut bmp = Bitmap::<u8, _>::new(&mut buf[..], 4, 4, 4);
        draw_rect_outline(&mut bmp, 0, 3, 4, 0, 1);
        check_line(&buf, 4, |_, y| y == 3);
    }

    #[test]
    fn outline_two_rows_has_no_sides() {
        let mut buf = [0; 4 * 4];
        let mut bmp = Bitmap::<u8, _>::new(&mut buf[..], 4, 4, 4);
        draw_rect_outline(&mut bmp, 0, 1, 3, 2, 1);
        check_line(&buf, 4, |x, y| x < 3 && (y == 1 || y == 2));
    }

    #[test]
    fn fill_rect_through_trait_object() {
        let mut buf = [0; 4 * 4];
        let mut bmp = Bitmap::<u8, _>::new(&mut buf[..], 4, 4, 4);
        let surface: &mut dyn Surface<Pixel = u8> = &mut bmp;
        fill_rect(surface, 1, 1, 2, 2, 1);
        check_line(&buf, 4, |x, y| (1..3).contains(&x) && (1..3).contains(&y));
    }

    #[test]
    fn fill_everything() {
        let mut buf = [0; 3 * 3];
        let mut bmp = Bitmap::<u8, _>::new(&mut buf[..], 3, 3, 3);
        fill(&mut bmp, 1);
        check_line(&buf, 3, |_, _| true);
    }
}
