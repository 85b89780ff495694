// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromabar

//! Frame production: the two-phase interleaving encoder.
//!
//! [`Encoder::encode_next`] turns the next slice of a source byte stream
//! into one rendered frame:
//! 1. Wrap the stream in FEC framing ([`FecStream`](crate::fec::FecStream)).
//! 2. Stripe the symbol bits of the protected stream across the whole
//!    frame, one `bits_per_op`-wide slot per cell.
//! 3. Stripe the color bits across the same slots, filling in the gaps.
//! 4. Drain the staged bits into the cell writer.
//!
//! Striping symbols across the entire frame before any color bit lands
//! spreads a localized capture loss across two independent passes, which
//! the per-block FEC then absorbs. Repeated calls share the caller's
//! stream cursor and continue where the previous frame stopped.

use std::io::Read;

use image::RgbImage;

use crate::bitio::{BitCursor, BitField};
use crate::config::EncoderConfig;
use crate::error::EncodeError;
use crate::fec::FecStream;
use crate::fountain::{self, FountainStream};
use crate::grid::GridWriter;
use crate::progress;

/// Stripe-machine state for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Striping symbol bits across all slots.
    FillSymbols,
    /// Striping color bits into the same slots.
    FillColors,
    /// Frame capacity reached; stop consuming FEC bytes.
    Complete,
}

/// Produces frames from a source byte stream, one call at a time.
pub struct Encoder {
    config: EncoderConfig,
    ecc_bytes: u32,
    ecc_block_size: u32,
    symbol_bits: u32,
    color_bits: u32,
    encode_id: u8,
}

impl Encoder {
    /// Create an encoder using `config` as-is.
    pub fn new(config: EncoderConfig) -> Self {
        Self {
            ecc_bytes: config.ecc_bytes,
            ecc_block_size: config.ecc_block_size,
            symbol_bits: config.symbol_bits,
            color_bits: config.color_bits,
            encode_id: 0,
            config,
        }
    }

    /// Create an encoder with per-call overrides; `None` or `Some(0)` falls
    /// back to the corresponding `config` default.
    pub fn with_overrides(
        config: EncoderConfig,
        ecc_bytes: Option<u32>,
        symbol_bits: Option<u32>,
        color_bits: Option<u32>,
    ) -> Self {
        let resolve = |value: Option<u32>, default: u32| match value {
            Some(v) if v > 0 => v,
            _ => default,
        };
        Self {
            ecc_bytes: resolve(ecc_bytes, config.ecc_bytes),
            ecc_block_size: config.ecc_block_size,
            symbol_bits: resolve(symbol_bits, config.symbol_bits),
            color_bits: resolve(color_bits, config.color_bits),
            encode_id: 0,
            config,
        }
    }

    /// Set the 7-bit fountain stream identifier; the high bit is ignored.
    pub fn set_encode_id(&mut self, encode_id: u8) {
        self.encode_id = encode_id & 0x7F;
    }

    /// The stored stream identifier.
    pub fn encode_id(&self) -> u8 {
        self.encode_id
    }

    /// Bits per cell: symbol bits plus color bits.
    pub fn bits_per_op(&self) -> u32 {
        self.symbol_bits + self.color_bits
    }

    /// Produce the next frame from `stream`, or `Ok(None)` once the stream
    /// has no more data (normal termination, zero writes performed).
    ///
    /// `canvas_size` overrides the configured frame size; `None` or
    /// `Some(0)` uses the default. Each call is a self-contained unit of
    /// work over the shared stream cursor.
    ///
    /// # Errors
    /// - [`EncodeError::Io`] if the source stream fails.
    /// - [`EncodeError::CanvasTooSmall`] for a canvas with no data cells.
    pub fn encode_next<R: Read>(
        &self,
        stream: &mut R,
        canvas_size: Option<u32>,
    ) -> Result<Option<RgbImage>, EncodeError> {
        let canvas = match canvas_size {
            Some(size) if size > 0 => size,
            _ => self.config.image_size,
        };

        let mut fec = FecStream::new(stream, self.ecc_bytes, self.ecc_block_size);
        if fec.readsome()? == 0 {
            return Ok(None);
        }

        let mut writer = GridWriter::new(
            self.symbol_bits,
            self.color_bits,
            self.config.dark,
            self.config.color_mode,
            canvas,
            &self.config,
        )?;

        let bits_per_op = self.bits_per_op();
        let capacity_bits = writer.num_cells() as usize * bits_per_op as usize;
        let mut field = BitField::new(capacity_bits);
        interleave(&mut fec, &mut field, self.symbol_bits, self.color_bits)?;

        // Dump the staged bits to the image. The drain always covers the
        // full capacity; slots never reached stay zero.
        let mut pos = 0;
        while pos < capacity_bits {
            writer.write(field.read(pos, bits_per_op));
            pos += bits_per_op as usize;
        }
        debug_assert!(writer.done());

        progress::advance();
        Ok(writer.into_image())
    }

    /// Package the whole remaining stream for rateless transmission.
    ///
    /// The chunk size is derived from the FEC overhead and per-frame
    /// capacity; see
    /// [`EncoderConfig::fountain_chunk_size`]. Compression level `<= 0`
    /// passes the raw stream through.
    ///
    /// # Errors
    /// Propagates compression and payload-shape failures from
    /// [`fountain::package`]; no stream handle is constructed on failure.
    pub fn create_fountain_stream<R: Read>(
        &self,
        stream: &mut R,
        compression_level: i32,
    ) -> Result<FountainStream, EncodeError> {
        let chunk_size = self
            .config
            .fountain_chunk_size(self.ecc_bytes, self.bits_per_op());
        fountain::package(stream, compression_level, chunk_size, self.encode_id)
    }
}

/// Stripe the FEC-protected stream into `field`, symbol pass then color
/// pass. Expects the first refill to be loaded already (the caller's
/// end-of-stream probe). Returns the state the machine stopped in.
fn interleave<R: Read>(
    fec: &mut FecStream<'_, R>,
    field: &mut BitField,
    symbol_bits: u32,
    color_bits: u32,
) -> Result<Phase, EncodeError> {
    let bits_per_op = symbol_bits + color_bits;
    let capacity = field.capacity();
    let mut pos = 0;
    let mut phase = Phase::FillSymbols;

    loop {
        let mut cursor = BitCursor::new(fec.buffer());

        if phase == Phase::FillSymbols {
            while !cursor.exhausted() {
                let bits = cursor.read(symbol_bits);
                // A partial read is dropped, but the stripe slot still
                // advances: alignment is preserved across the gap.
                if !cursor.partial() {
                    field.write(bits, pos, bits_per_op);
                }
                pos += bits_per_op as usize;
                if pos >= capacity {
                    pos = 0;
                    phase = Phase::FillColors;
                    break;
                }
            }
        }

        if phase == Phase::FillColors {
            while !cursor.exhausted() {
                let bits = cursor.read(color_bits);
                if !cursor.partial() {
                    // Color bits sit at the top of the slot; the symbol
                    // bits written in the first pass stay put.
                    field.write(bits, pos, color_bits);
                }
                pos += bits_per_op as usize;
                if pos >= capacity {
                    phase = Phase::Complete;
                    break;
                }
            }
        }

        match phase {
            Phase::Complete => break,
            Phase::FillSymbols | Phase::FillColors => {
                if !fec.good() || fec.readsome()? == 0 {
                    break;
                }
            }
        }
    }

    Ok(phase)
}
