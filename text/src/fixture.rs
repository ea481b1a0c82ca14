//! Building charset blobs in memory, for tests and host-side tools.

use crate::charset::{GlyphFlags, GlyphHeader, HEADER_SIZE};
use crate::decode::CodePoint;

#[derive(Clone, Debug)]
struct Cell {
    size_x: u8,
    offset_y: u8,
    flags: GlyphFlags,
    rows: Vec<u16>,
}

/// Packs glyphs drawn as strings into the blob format read by
/// [`Charset`](crate::charset::Charset).
///
/// Rows are written left to right with `#` for a set pixel and anything else
/// for a clear one, so `&["#.#", ".#."]` is a 3x2 glyph.
///
/// Cells that are never given a glyph are blank.
#[derive(Clone, Debug)]
pub struct CharsetBuilder {
    min: CodePoint,
    cells: Vec<Option<Cell>>,
}

impl CharsetBuilder {
    /// Starts a blob for `min..=max`, with every cell blank.
    pub fn new(min: CodePoint, max: CodePoint) -> Self {
        assert!(min <= max, "empty range {:#x}..={:#x}", min, max);
        CharsetBuilder {
            min,
            cells: vec![None; (max - min + 1) as usize],
        }
    }

    /// Sets the glyph for `cp`. Width is that of the longest row.
    ///
    /// # Panics
    ///
    /// If `cp` is out of range, or the glyph exceeds 15 pixels either way.
    pub fn glyph(mut self, cp: CodePoint, offset_y: u8, rows: &[&str]) -> Self {
        let size_x = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        assert!(
            size_x < 16 && rows.len() < 16 && offset_y < 16,
            "glyph U+{:04X} is too large",
            cp
        );
        let rows = rows
            .iter()
            .map(|r| {
                r.chars()
                    .enumerate()
                    .filter(|&(_, c)| c == '#')
                    .fold(0u16, |bits, (i, _)| bits | 1 << i)
            })
            .collect();
        let index = self.index(cp);
        self.cells[index] = Some(Cell {
            size_x: size_x as u8,
            offset_y,
            flags: GlyphFlags::empty(),
            rows,
        });
        self
    }

    /// Sets the kerning hints of a glyph added earlier.
    pub fn flags(mut self, cp: CodePoint, flags: GlyphFlags) -> Self {
        let index = self.index(cp);
        match &mut self.cells[index] {
            Some(cell) => cell.flags = flags,
            None => panic!("no glyph for U+{:04X} to flag", cp),
        }
        self
    }

    /// Produces the blob: headers, then each glyph's rows padded to an even
    /// length.
    pub fn build(&self) -> Vec<u8> {
        let mut headers = Vec::with_capacity(self.cells.len() * HEADER_SIZE);
        let mut payload = Vec::new();
        let payload_start = self.cells.len() * HEADER_SIZE;

        for cell in &self.cells {
            let header = match cell {
                None => GlyphHeader(0),
                Some(cell) => {
                    let offset = payload_start + payload.len();
                    assert!(offset <= 0xFFFF, "blob too large for 16-bit offsets");
                    let header = GlyphHeader::new(
                        cell.size_x,
                        cell.rows.len() as u8,
                        cell.offset_y,
                        cell.flags,
                        offset as u16,
                    );
                    for &row in &cell.rows {
                        payload.push(row as u8);
                        if header.is_wide() {
                            payload.push((row >> 8) as u8);
                        }
                    }
                    if payload.len() % 2 != 0 {
                        payload.push(0);
                    }
                    header
                }
            };
            headers.extend_from_slice(&header.0.to_le_bytes());
        }

        headers.extend_from_slice(&payload);
        headers
    }

    fn index(&self, cp: CodePoint) -> usize {
        let index = cp.wrapping_sub(self.min) as usize;
        assert!(
            index < self.cells.len(),
            "U+{:04X} outside builder range",
            cp
        );
        index
    }
}
