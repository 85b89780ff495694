// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromabar

//! Source-stream compression for fountain packaging.
//!
//! Brotli, build-and-return-by-value: the whole remaining stream is read,
//! compressed, and handed back as one payload buffer.

use std::io::{Read, Write};

use crate::error::EncodeError;

/// Brotli LG_WINDOW_SIZE. 22 is the default (4 MB window).
const BROTLI_LG_WINDOW_SIZE: u32 = 22;

/// Compress the remaining contents of `stream` at the given level.
///
/// Levels map directly onto Brotli quality and are clamped to its 0–11
/// range. Source read failures surface as [`EncodeError::Io`]; compressor
/// failures as [`EncodeError::Compression`].
pub fn compress_stream<R: Read>(stream: &mut R, level: u32) -> Result<Vec<u8>, EncodeError> {
    let mut raw = Vec::new();
    stream.read_to_end(&mut raw)?;

    let quality = level.min(11);
    let mut output = Vec::new();
    {
        let mut compressor =
            brotli::CompressorWriter::new(&mut output, 4096, quality, BROTLI_LG_WINDOW_SIZE);
        compressor
            .write_all(&raw)
            .map_err(EncodeError::Compression)?;
        // CompressorWriter finalizes on drop.
    }
    Ok(output)
}
