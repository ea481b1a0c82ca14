//! Placement of fullwidth glyphs inside their fixed cell.
//!
//! Kana and fullwidth punctuation don't advance by their drawn width like
//! Latin text does; each occupies a whole cell. Most are centered in it, but
//! closing punctuation hugs the left edge and opening brackets hug the right,
//! so that they sit next to the text they belong to.

use core::cmp::Ordering;

use crate::decode::CodePoint;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Alignment {
    /// Proportional: advances by the glyph's own width.
    Normal,
    FullwidthLeft,
    FullwidthRight,
    FullwidthCenter,
}

use self::Alignment::*;

/// Inclusive, sorted, non-overlapping ranges. Anything not listed is
/// `Normal`.
static FULLWIDTH: [(CodePoint, CodePoint, Alignment); 34] = [
    (0x3001, 0x3002, FullwidthLeft),   // 、。
    (0x3008, 0x3008, FullwidthRight),  // 〈
    (0x3009, 0x3009, FullwidthLeft),   // 〉
    (0x300A, 0x300A, FullwidthRight),  // 《
    (0x300B, 0x300B, FullwidthLeft),   // 》
    (0x300C, 0x300C, FullwidthRight),  // 「
    (0x300D, 0x300D, FullwidthLeft),   // 」
    (0x300E, 0x300E, FullwidthRight),  // 『
    (0x300F, 0x300F, FullwidthLeft),   // 』
    (0x3010, 0x3010, FullwidthRight),  // 【
    (0x3011, 0x3011, FullwidthLeft),   // 】
    (0x3014, 0x3014, FullwidthRight),  // 〔
    (0x3015, 0x3015, FullwidthLeft),   // 〕
    (0x3040, 0x3098, FullwidthCenter), // hiragana
    // 0x3099 and 0x309A are combining voicing marks and stay Normal.
    (0x309B, 0x30FF, FullwidthCenter), // spacing marks, katakana, ・, ー
    (0xFF01, 0xFF07, FullwidthCenter),
    (0xFF08, 0xFF08, FullwidthRight), // （
    (0xFF09, 0xFF09, FullwidthLeft),  // ）
    (0xFF0A, 0xFF0B, FullwidthCenter),
    (0xFF0C, 0xFF0C, FullwidthLeft), // ，
    (0xFF0D, 0xFF0D, FullwidthCenter),
    (0xFF0E, 0xFF0E, FullwidthLeft), // ．
    (0xFF0F, 0xFF3A, FullwidthCenter),
    (0xFF3B, 0xFF3B, FullwidthRight), // ［
    (0xFF3C, 0xFF3C, FullwidthCenter),
    (0xFF3D, 0xFF3D, FullwidthLeft), // ］
    (0xFF3E, 0xFF5A, FullwidthCenter),
    (0xFF5B, 0xFF5B, FullwidthRight), // ｛
    (0xFF5C, 0xFF5C, FullwidthCenter),
    (0xFF5D, 0xFF5D, FullwidthLeft), // ｝
    (0xFF5E, 0xFF5E, FullwidthCenter),
    (0xFF5F, 0xFF5F, FullwidthRight), // ｟
    (0xFF60, 0xFF60, FullwidthLeft),  // ｠
    (0xFFE0, 0xFFE6, FullwidthCenter),
];

/// Decides how `cp` is placed in its cell.
pub fn classify(cp: CodePoint) -> Alignment {
    FULLWIDTH
        .binary_search_by(|&(lo, hi, _)| {
            if hi < cp {
                Ordering::Less
            } else if lo > cp {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        })
        .map(|i| FULLWIDTH[i].2)
        .unwrap_or(Normal)
}
