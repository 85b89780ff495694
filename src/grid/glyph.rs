// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromabar

//! Symbol glyph tiles.
//!
//! One tile per symbol value, defined as a 4×4 bit pattern (rows top to
//! bottom, bit 3 = leftmost pixel) and scaled to the cell size at render
//! time. The set was chosen for pairwise pixel distance under the blur and
//! resampling a camera capture introduces; the decoder correlates against
//! the same table.

/// 4×4 tile patterns indexed by symbol value.
pub const GLYPHS: [[u8; 4]; 16] = [
    [0b1100, 0b1100, 0b0011, 0b0011], //  0: coarse checker
    [0b0011, 0b0011, 0b1100, 0b1100], //  1: coarse checker, inverted
    [0b1010, 0b0101, 0b1010, 0b0101], //  2: fine checker
    [0b0101, 0b1010, 0b0101, 0b1010], //  3: fine checker, inverted
    [0b1111, 0b0000, 0b1111, 0b0000], //  4: horizontal bars
    [0b0000, 0b1111, 0b0000, 0b1111], //  5: horizontal bars, offset
    [0b1010, 0b1010, 0b1010, 0b1010], //  6: vertical bars
    [0b0101, 0b0101, 0b0101, 0b0101], //  7: vertical bars, offset
    [0b1001, 0b0110, 0b0110, 0b1001], //  8: diamond
    [0b0110, 0b1001, 0b1001, 0b0110], //  9: ring
    [0b1000, 0b1100, 0b1110, 0b1111], // 10: lower-left wedge
    [0b1111, 0b1110, 0b1100, 0b1000], // 11: upper-left wedge
    [0b0001, 0b0011, 0b0111, 0b1111], // 12: lower-right wedge
    [0b1111, 0b0111, 0b0011, 0b0001], // 13: upper-right wedge
    [0b0110, 0b1111, 0b1111, 0b0110], // 14: block
    [0b1001, 0b0000, 0b0000, 0b1001], // 15: corner dots
];

/// Whether pixel `(x, y)` of a `cell_size`-pixel cell is lit for `symbol`.
pub fn glyph_pixel(symbol: u32, x: u32, y: u32, cell_size: u32) -> bool {
    let row = (y * 4 / cell_size) as usize;
    let col = x * 4 / cell_size;
    (GLYPHS[symbol as usize][row] >> (3 - col)) & 1 != 0
}
