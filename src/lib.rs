//! Surfaces, shapes and text for a handheld console's video memory.
//!
//! This crate just gathers the pieces:
//!
//! - [`gfx`]: the [`Surface`] trait, the bitmap, VRAM and tiled layouts, and
//!   the shape rasterizer in [`gfx::raster`].
//! - [`text`]: UTF-8 decoding, charsets, layout and glyph drawing.
//! - [`fonts`]: the built-in charsets selected by Cargo features.
//!
//! The hardware binding layer is expected to wrap its memory-mapped buffers
//! in one of the `gfx` layouts and draw through the `Surface` trait.

#![cfg_attr(not(test), no_std)]

pub use fonts;
pub use gfx;
pub use text;

pub use gfx::Surface;
pub use text::{draw_text, LayoutOptions, TextRenderer};
