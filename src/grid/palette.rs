// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromabar

//! Cell color palettes.
//!
//! Dark-mode palettes put saturated primaries on a black canvas; light-mode
//! palettes use their darkened counterparts on white. Palette order is wire
//! format: the color bits of a cell index directly into these tables.

use image::Rgb;

use crate::config::ColorMode;

/// 4-color palette, dark canvas.
const STANDARD4_DARK: [Rgb<u8>; 4] = [
    Rgb([0, 255, 255]),   // cyan
    Rgb([255, 0, 255]),   // magenta
    Rgb([255, 255, 0]),   // yellow
    Rgb([255, 255, 255]), // white
];

/// 4-color palette, light canvas.
const STANDARD4_LIGHT: [Rgb<u8>; 4] = [
    Rgb([0, 128, 128]),
    Rgb([128, 0, 128]),
    Rgb([128, 128, 0]),
    Rgb([0, 0, 0]),
];

/// 8-color palette, dark canvas.
const EXTENDED8_DARK: [Rgb<u8>; 8] = [
    Rgb([0, 255, 255]),   // cyan
    Rgb([255, 0, 255]),   // magenta
    Rgb([255, 255, 0]),   // yellow
    Rgb([255, 255, 255]), // white
    Rgb([0, 255, 0]),     // green
    Rgb([255, 128, 0]),   // orange
    Rgb([128, 128, 255]), // periwinkle
    Rgb([255, 64, 64]),   // red
];

/// 8-color palette, light canvas.
const EXTENDED8_LIGHT: [Rgb<u8>; 8] = [
    Rgb([0, 128, 128]),
    Rgb([128, 0, 128]),
    Rgb([128, 128, 0]),
    Rgb([0, 0, 0]),
    Rgb([0, 128, 0]),
    Rgb([160, 80, 0]),
    Rgb([64, 64, 160]),
    Rgb([160, 32, 32]),
];

/// Palette for a color mode and canvas polarity.
pub fn palette(mode: ColorMode, dark: bool) -> &'static [Rgb<u8>] {
    match (mode, dark) {
        (ColorMode::Standard4, true) => &STANDARD4_DARK,
        (ColorMode::Standard4, false) => &STANDARD4_LIGHT,
        (ColorMode::Extended8, true) => &EXTENDED8_DARK,
        (ColorMode::Extended8, false) => &EXTENDED8_LIGHT,
    }
}

/// Canvas background color.
pub fn background(dark: bool) -> Rgb<u8> {
    if dark {
        Rgb([0, 0, 0])
    } else {
        Rgb([255, 255, 255])
    }
}

/// Anchor ink color: maximum contrast against the canvas.
pub fn anchor_ink(dark: bool) -> Rgb<u8> {
    background(!dark)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_sizes_cover_color_bits() {
        assert_eq!(palette(ColorMode::Standard4, true).len(), 4);
        assert_eq!(palette(ColorMode::Standard4, false).len(), 4);
        assert_eq!(palette(ColorMode::Extended8, true).len(), 8);
        assert_eq!(palette(ColorMode::Extended8, false).len(), 8);
    }

    #[test]
    fn dark_palettes_contrast_with_black() {
        for &Rgb([r, g, b]) in palette(ColorMode::Extended8, true) {
            let luma = u32::from(r) + u32::from(g) + u32::from(b);
            assert!(luma >= 192, "color ({r},{g},{b}) too dark for dark mode");
        }
    }

    #[test]
    fn light_palettes_contrast_with_white() {
        for &Rgb([r, g, b]) in palette(ColorMode::Extended8, false) {
            let luma = u32::from(r) + u32::from(g) + u32::from(b);
            assert!(luma <= 448, "color ({r},{g},{b}) too bright for light mode");
        }
    }
}
