//! Lazy UTF-8 decoding without validation.
//!
//! Text here is mostly string literals baked into the program, so the decoder
//! trusts its input: the lead byte alone decides how many bytes a sequence
//! takes, and whatever follows is folded in six bits at a time. Malformed
//! input produces odd code points, never a panic.

use core::iter::FusedIterator;

/// A Unicode scalar value, or whatever a malformed sequence decoded to.
pub type CodePoint = u32;

/// Iterator over the code points of a UTF-8 byte string.
///
/// Cloning is cheap and gives an independent cursor at the same position,
/// which is how [`CodePoints::peek`] works.
#[derive(Clone, Debug)]
pub struct CodePoints<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> CodePoints<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        CodePoints { bytes, pos: 0 }
    }

    /// Returns what the next call to `next` will, without consuming it.
    pub fn peek(&self) -> Option<CodePoint> {
        self.clone().next()
    }

    /// The bytes not yet decoded.
    pub fn as_bytes(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }

    /// Takes one continuation byte's payload. Past the end of input this
    /// reads as zero and leaves the position alone.
    fn continuation(&mut self) -> u32 {
        match self.bytes.get(self.pos) {
            Some(&b) => {
                self.pos += 1;
                u32::from(b & 0x3F)
            }
            None => 0,
        }
    }
}

impl<'a> Iterator for CodePoints<'a> {
    type Item = CodePoint;

    fn next(&mut self) -> Option<CodePoint> {
        let lead = *self.bytes.get(self.pos)?;
        self.pos += 1;

        let (extra, bits) = match lead {
            // ASCII, and stray continuation bytes, which stand for themselves.
            0x00..=0xBF => return Some(u32::from(lead)),
            0xC0..=0xDF => (1, lead & 0x1F),
            0xE0..=0xEF => (2, lead & 0x0F),
            _ => (3, lead & 0x07),
        };

        let mut cp = u32::from(bits);
        for _ in 0..extra {
            cp = (cp << 6) | self.continuation();
        }
        Some(cp)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.bytes.len() - self.pos;
        ((left + 3) / 4, Some(left))
    }
}

impl<'a> FusedIterator for CodePoints<'a> {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};

    fn decode(bytes: &[u8]) -> Vec<CodePoint> {
        CodePoints::new(bytes).collect()
    }

    #[test]
    fn ascii_passes_through() {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(0xA5C11);
        for _ in 0..100 {
            let len = rng.gen_range(0, 40);
            let bytes: Vec<u8> = (0..len).map(|_| rng.gen_range(0, 0x80)).collect();
            let expected: Vec<CodePoint> =
                bytes.iter().map(|&b| u32::from(b)).collect();
            assert_eq!(decode(&bytes), expected);
        }
    }

    #[test]
    fn multibyte_sequences() {
        assert_eq!(decode(&[0xC3, 0xA9]), [0xE9]);
        assert_eq!(decode("あ".as_bytes()), [0x3042]);
        assert_eq!(decode("a€b".as_bytes()), [0x61, 0x20AC, 0x62]);
        assert_eq!(decode(&[0xF0, 0x9F, 0x98, 0x80]), [0x1F600]);
    }

    #[test]
    fn matches_std_on_valid_text() {
        let s = "Grüße, ｶﾀｶﾅ and ひらがな\t\u{3000}!";
        let expected: Vec<CodePoint> = s.chars().map(|c| c as u32).collect();
        assert_eq!(decode(s.as_bytes()), expected);
    }

    #[test]
    fn truncated_sequence_pads_with_zero() {
        // Last byte of a three-byte sequence missing.
        assert_eq!(decode(&[0xE3, 0x81]), [0x3040]);
        // Only the lead byte.
        assert_eq!(decode(&[0xC3]), [0xC0]);
    }

    #[test]
    fn stray_continuation_byte() {
        assert_eq!(decode(&[b'a', 0x9C, b'b']), [0x61, 0x9C, 0x62]);
    }

    #[test]
    fn peek_does_not_advance() {
        let mut it = CodePoints::new("é!".as_bytes());
        for _ in 0..3 {
            assert_eq!(it.peek(), Some(0xE9));
        }
        assert_eq!(it.next(), Some(0xE9));
        assert_eq!(it.peek(), Some(0x21));
        assert_eq!(it.next(), Some(0x21));
        assert_eq!(it.peek(), None);
    }

    #[test]
    fn stays_exhausted() {
        let mut it = CodePoints::new(&[0xE3]);
        assert!(it.next().is_some());
        for _ in 0..3 {
            assert_eq!(it.next(), None);
            assert_eq!(it.peek(), None);
        }
        assert!(it.as_bytes().is_empty());
    }
}
