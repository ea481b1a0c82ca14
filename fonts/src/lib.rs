//! The built-in charsets.
//!
//! Each charset's glyph data is embedded only when its Cargo feature is on;
//! otherwise the charset is present but empty, and layout skips it. Glyphs
//! are at most 8x12 for the Latin blocks and 12x12 for kana.

#![cfg_attr(not(test), no_std)]

use text::{Charset, CharsetTable};

/// Wrapper around a font blob to force halfword alignment.
#[allow(dead_code)]
#[repr(align(2))]
struct Blob<T: ?Sized>(T);

pub const LATIN_MIN: u32 = 0x0020;
pub const LATIN_MAX: u32 = 0x007F;
pub const LATIN_SUPPLEMENT_MIN: u32 = 0x00A0;
pub const LATIN_SUPPLEMENT_MAX: u32 = 0x00FF;
pub const KANA_MIN: u32 = 0x3040;
pub const KANA_MAX: u32 = 0x30F5;

cfg_if::cfg_if! {
    if #[cfg(feature = "latin")] {
        const LATIN_BLOB: &Blob<[u8]> = &Blob(*include_bytes!(concat!(
            env!("OUT_DIR"),
            "/font_latin.bin"
        )));
        /// ASCII, 8x12.
        pub const LATIN: Charset<'static> =
            Charset::new(LATIN_MIN, LATIN_MAX, &LATIN_BLOB.0);
    } else {
        /// ASCII, 8x12 (not built).
        pub const LATIN: Charset<'static> =
            Charset::disabled(LATIN_MIN, LATIN_MAX);
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "latin-supplement")] {
        const LATIN_SUPPLEMENT_BLOB: &Blob<[u8]> = &Blob(*include_bytes!(
            concat!(env!("OUT_DIR"), "/font_latin_supplement.bin")
        ));
        /// Latin-1 Supplement, 8x12.
        pub const LATIN_SUPPLEMENT: Charset<'static> = Charset::new(
            LATIN_SUPPLEMENT_MIN,
            LATIN_SUPPLEMENT_MAX,
            &LATIN_SUPPLEMENT_BLOB.0,
        );
    } else {
        /// Latin-1 Supplement, 8x12 (not built).
        pub const LATIN_SUPPLEMENT: Charset<'static> =
            Charset::disabled(LATIN_SUPPLEMENT_MIN, LATIN_SUPPLEMENT_MAX);
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "kana")] {
        const KANA_BLOB: &Blob<[u8]> = &Blob(*include_bytes!(concat!(
            env!("OUT_DIR"),
            "/font_kana.bin"
        )));
        /// Hiragana and katakana, 12x12.
        pub const KANA: Charset<'static> =
            Charset::new(KANA_MIN, KANA_MAX, &KANA_BLOB.0);
    } else {
        /// Hiragana and katakana, 12x12 (not built).
        pub const KANA: Charset<'static> = Charset::disabled(KANA_MIN, KANA_MAX);
    }
}

/// Every built-in charset, in lookup order.
pub static CHARSETS: [Charset<'static>; 3] = [LATIN, LATIN_SUPPLEMENT, KANA];

/// Lookup table over the charsets that were built.
pub fn table() -> CharsetTable<'static> {
    CharsetTable::new(&CHARSETS)
}
