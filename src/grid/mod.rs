// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromabar

//! Frame rendering: the cell grid writer.
//!
//! A frame is a square grid of colored glyph cells inside a quiet zone,
//! with an anchor finder pattern in each corner for the camera-side
//! perspective fix. [`GridWriter`] consumes one `bits_per_op`-wide value per
//! data cell in row-major order (anchor blocks skipped) and renders it as a
//! glyph tile in a palette color.

pub mod glyph;
pub mod palette;

use image::{Rgb, RgbImage};

use crate::config::{ColorMode, EncoderConfig};
use crate::error::EncodeError;

/// Renders one frame image cell by cell.
pub struct GridWriter {
    image: RgbImage,
    palette: &'static [Rgb<u8>],
    background: Rgb<u8>,
    cell_size: u32,
    quiet_zone: u32,
    side: u32,
    anchor_span: u32,
    symbol_bits: u32,
    symbol_mask: u32,
    cursor: u32,
    written: u32,
    num_cells: u32,
}

impl GridWriter {
    /// Create a writer for a `canvas_size`-pixel square frame.
    ///
    /// # Errors
    /// Returns [`EncodeError::CanvasTooSmall`] if the canvas cannot hold a
    /// single data cell between the anchor blocks.
    ///
    /// # Panics
    /// Panics if `symbol_bits` is outside `[1, 4]` or the palette has fewer
    /// than `2^color_bits` entries; both are configuration contract
    /// violations.
    pub fn new(
        symbol_bits: u32,
        color_bits: u32,
        dark: bool,
        color_mode: ColorMode,
        canvas_size: u32,
        config: &EncoderConfig,
    ) -> Result<Self, EncodeError> {
        assert!(
            (1..=4).contains(&symbol_bits),
            "symbol bits {symbol_bits} outside [1, 4]"
        );
        let palette = palette::palette(color_mode, dark);
        assert!(
            (1usize << color_bits) <= palette.len(),
            "palette has {} colors, {color_bits} color bits need {}",
            palette.len(),
            1 << color_bits
        );

        let num_cells = config.num_cells(canvas_size);
        if num_cells == 0 {
            return Err(EncodeError::CanvasTooSmall {
                size: canvas_size,
                min: config.min_canvas_size(),
            });
        }

        let background = palette::background(dark);
        let mut image = RgbImage::from_pixel(canvas_size, canvas_size, background);

        let side = config.grid_side(canvas_size);
        let anchor_px = config.anchor_span * config.cell_size;
        let far = config.quiet_zone + (side - config.anchor_span) * config.cell_size;
        let ink = palette::anchor_ink(dark);
        for &(x0, y0) in &[
            (config.quiet_zone, config.quiet_zone),
            (far, config.quiet_zone),
            (config.quiet_zone, far),
            (far, far),
        ] {
            draw_anchor(&mut image, x0, y0, anchor_px, ink, background);
        }

        Ok(Self {
            image,
            palette,
            background,
            cell_size: config.cell_size,
            quiet_zone: config.quiet_zone,
            side,
            anchor_span: config.anchor_span,
            symbol_bits,
            symbol_mask: (1 << symbol_bits) - 1,
            cursor: 0,
            written: 0,
            num_cells,
        })
    }

    /// Data cells on this canvas.
    pub fn num_cells(&self) -> u32 {
        self.num_cells
    }

    /// Whether every data cell has been written.
    pub fn done(&self) -> bool {
        self.written == self.num_cells
    }

    /// Render the next data cell from a combined `bits_per_op` value:
    /// color in the high bits, symbol in the low bits.
    ///
    /// Writes past the last cell are ignored.
    pub fn write(&mut self, cell_value: u32) {
        if self.done() {
            debug_assert!(false, "write past the last cell");
            return;
        }
        while self.in_anchor(self.cursor / self.side, self.cursor % self.side) {
            self.cursor += 1;
        }
        let row = self.cursor / self.side;
        let col = self.cursor % self.side;
        self.cursor += 1;
        self.written += 1;

        let symbol = cell_value & self.symbol_mask;
        let color = self.palette[(cell_value >> self.symbol_bits) as usize];
        let x0 = self.quiet_zone + col * self.cell_size;
        let y0 = self.quiet_zone + row * self.cell_size;
        for y in 0..self.cell_size {
            for x in 0..self.cell_size {
                if glyph::glyph_pixel(symbol, x, y, self.cell_size) {
                    self.image.put_pixel(x0 + x, y0 + y, color);
                }
            }
        }
    }

    /// The rendered frame, or `None` if no cell was ever written.
    pub fn into_image(self) -> Option<RgbImage> {
        if self.written == 0 {
            return None;
        }
        Some(self.image)
    }

    fn in_anchor(&self, row: u32, col: u32) -> bool {
        let near_edge = |v: u32| v < self.anchor_span || v >= self.side - self.anchor_span;
        near_edge(row) && near_edge(col)
    }
}

/// Draw one anchor finder pattern: an ink border, a background ring, and a
/// solid ink core, concentric within a `size`-pixel square at `(x0, y0)`.
fn draw_anchor(image: &mut RgbImage, x0: u32, y0: u32, size: u32, ink: Rgb<u8>, bg: Rgb<u8>) {
    let unit = size / 6;
    for y in 0..size {
        for x in 0..size {
            let d = x.min(y).min(size - 1 - x).min(size - 1 - y);
            let color = if d < unit {
                ink
            } else if d < 2 * unit {
                bg
            } else {
                ink
            };
            image.put_pixel(x0 + x, y0 + y, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn writer(canvas: u32) -> GridWriter {
        let cfg = EncoderConfig::default();
        GridWriter::new(4, 2, true, ColorMode::Standard4, canvas, &cfg).unwrap()
    }

    #[test]
    fn default_canvas_cell_count() {
        assert_eq!(writer(1024).num_cells(), 12_400);
    }

    #[test]
    fn canvas_too_small_rejected() {
        let cfg = EncoderConfig::default();
        match GridWriter::new(4, 2, true, ColorMode::Standard4, 100, &cfg) {
            Err(EncodeError::CanvasTooSmall { size: 100, .. }) => {}
            other => panic!("expected CanvasTooSmall, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn first_cell_lands_after_corner_anchor() {
        // Row 0 starts with a 6-cell anchor block, so the first data cell is
        // at column 6. Symbol 14 ("block") lights the cell center.
        let mut w = writer(1024);
        w.write(14);
        let x = 64 + 6 * 8 + 4;
        let y = 64 + 4;
        assert_eq!(*w.image.get_pixel(x, y), Rgb([0, 255, 255]));
    }

    #[test]
    fn color_bits_select_palette_entry() {
        let mut w = writer(1024);
        // color 2 (yellow), symbol 14.
        w.write((2 << 4) | 14);
        let x = 64 + 6 * 8 + 4;
        assert_eq!(*w.image.get_pixel(x, 64 + 4), Rgb([255, 255, 0]));
    }

    #[test]
    fn anchors_are_drawn() {
        let w = writer(1024);
        // Outer anchor border is ink (white on a dark canvas).
        assert_eq!(*w.image.get_pixel(64, 64), Rgb([255, 255, 255]));
        // Background ring one unit in.
        assert_eq!(*w.image.get_pixel(64 + 10, 64 + 10), Rgb([0, 0, 0]));
        // Ink core.
        assert_eq!(*w.image.get_pixel(64 + 24, 64 + 24), Rgb([255, 255, 255]));
    }

    #[test]
    fn quiet_zone_stays_background() {
        let mut w = writer(1024);
        for v in 0..100 {
            w.write(v % 64);
        }
        assert_eq!(*w.image.get_pixel(0, 0), Rgb([0, 0, 0]));
        assert_eq!(*w.image.get_pixel(1023, 1023), Rgb([0, 0, 0]));
    }

    #[test]
    fn done_after_all_cells() {
        // Minimum canvas: 13×13 grid minus four 6×6 corners = 25 cells.
        let cfg = EncoderConfig::default();
        let mut w =
            GridWriter::new(4, 2, true, ColorMode::Standard4, cfg.min_canvas_size(), &cfg)
                .unwrap();
        assert_eq!(w.num_cells(), 25);
        for _ in 0..25 {
            assert!(!w.done());
            w.write(0);
        }
        assert!(w.done());
    }

    #[test]
    fn empty_writer_has_no_image() {
        assert!(writer(1024).into_image().is_none());
    }

    #[test]
    fn written_writer_yields_image() {
        let mut w = writer(1024);
        w.write(0);
        let img = w.into_image().unwrap();
        assert_eq!(img.dimensions(), (1024, 1024));
    }
}
