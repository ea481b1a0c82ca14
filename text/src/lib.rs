//! Proportional text: decoding, glyph lookup, layout and drawing.
//!
//! The pipeline runs strictly left to right:
//!
//! - [`decode::CodePoints`] turns UTF-8 bytes into code points, lazily.
//! - [`charset::CharsetTable`] finds the packed glyph for each code point.
//! - [`layout::TextLayout`] positions glyphs, handling whitespace, wrapping,
//!   padding and fullwidth cells, and tracks the area covered.
//! - [`render`] blits the glyphs onto any [`gfx::Surface`].
//!
//! Glyphs are 1 bit per pixel: set bits are drawn in the caller's color and
//! clear bits leave the destination alone.
//!
//! Like `gfx`, this crate has no architecture dependencies and is tested on
//! the host.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod alignment;
pub mod charset;
pub mod decode;
pub mod layout;
pub mod render;

#[cfg(any(test, feature = "std"))]
pub mod fixture;

pub use crate::charset::{Charset, CharsetTable, GlyphFlags, GlyphHeader};
pub use crate::decode::{CodePoint, CodePoints};
pub use crate::layout::{BoundingBox, Glyph, LayoutOptions, TextLayout};
pub use crate::render::{draw_text, TextRenderer};
