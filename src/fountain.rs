// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromabar

//! Fountain packaging: rateless erasure coding of the whole source stream.
//!
//! [`package`] prepares the payload (raw or Brotli-compressed, padded past
//! one chunk) and hands it to [`FountainStream`], which turns it into an
//! unbounded sequence of fixed-size blocks via RaptorQ. Each block carries a
//! 6-byte header so the camera-side decoder can regroup symbols from any
//! subset of frames:
//!
//! ```text
//! [1 byte ] encode id (bit 7 always clear)
//! [3 bytes] payload length, u24 BE
//! [2 bytes] block id (RaptorQ encoding-symbol id), u16 BE
//! [N bytes] symbol data, N = chunk_size - 6
//! ```
//!
//! Source symbols are emitted first, then repair symbols forever; any
//! `K × 1.002` distinct blocks reconstruct the payload.

use std::collections::VecDeque;
use std::io::Read;

use raptorq::{Encoder as RaptorqEncoder, EncodingPacket, ObjectTransmissionInformation};

use crate::compress::compress_stream;
use crate::error::EncodeError;

/// Bytes of header prepended to each fountain block.
pub const BLOCK_HEADER_LEN: usize = 6;

/// Largest payload the 24-bit header length can describe.
pub const MAX_PAYLOAD_LEN: usize = 0xFF_FFFF;

/// RaptorQ limit on symbols per source block.
const MAX_SYMBOLS: usize = 56_403;

/// Repair symbols generated per refill once the source symbols run out.
const REPAIR_BATCH: u32 = 16;

/// Prepare the source stream for fountain encoding.
///
/// - `compression_level <= 0`: the payload is the raw remaining stream
///   contents, byte for byte.
/// - `compression_level > 0`: the payload is the Brotli-compressed stream;
///   if the result is shorter than `chunk_size` it is zero-extended to
///   `chunk_size + 1`, so the rateless encoder never sees a sub-chunk
///   payload.
///
/// # Errors
/// Compression failures and the [`FountainStream::new`] rejections pass
/// through; no stream handle is constructed on any failure.
pub fn package<R: Read>(
    stream: &mut R,
    compression_level: i32,
    chunk_size: usize,
    encode_id: u8,
) -> Result<FountainStream, EncodeError> {
    let payload = if compression_level <= 0 {
        let mut raw = Vec::new();
        stream.read_to_end(&mut raw)?;
        raw
    } else {
        let mut compressed = compress_stream(stream, compression_level as u32)?;
        if compressed.len() < chunk_size {
            compressed.resize(chunk_size + 1, 0);
        }
        compressed
    };
    FountainStream::new(payload, chunk_size, encode_id)
}

/// Endless reader of fountain-coded blocks.
pub struct FountainStream {
    encoder: RaptorqEncoder,
    queue: VecDeque<EncodingPacket>,
    current: Vec<u8>,
    offset: usize,
    payload_len: u32,
    chunk_size: usize,
    encode_id: u8,
    repair_generated: u32,
}

impl FountainStream {
    /// Build a fountain stream over `payload` producing `chunk_size`-byte
    /// blocks tagged with `encode_id` (masked to 7 bits).
    ///
    /// # Errors
    /// - [`EncodeError::EmptyPayload`] for an empty payload.
    /// - [`EncodeError::PayloadTooLarge`] when the payload exceeds the
    ///   24-bit header length or the RaptorQ symbol budget for this chunk
    ///   size.
    ///
    /// # Panics
    /// Panics if `chunk_size` leaves no room for symbol data after the
    /// header; the chunk size comes from configuration and is assumed
    /// pre-validated.
    pub fn new(payload: Vec<u8>, chunk_size: usize, encode_id: u8) -> Result<Self, EncodeError> {
        assert!(
            chunk_size > BLOCK_HEADER_LEN,
            "chunk size {chunk_size} does not clear the {BLOCK_HEADER_LEN}-byte header"
        );
        assert!(
            chunk_size - BLOCK_HEADER_LEN <= usize::from(u16::MAX),
            "chunk size {chunk_size} exceeds the RaptorQ symbol size limit"
        );
        if payload.is_empty() {
            return Err(EncodeError::EmptyPayload);
        }
        let symbol_size = chunk_size - BLOCK_HEADER_LEN;
        let max = MAX_PAYLOAD_LEN.min(MAX_SYMBOLS * symbol_size);
        if payload.len() > max {
            return Err(EncodeError::PayloadTooLarge {
                size: payload.len(),
                max,
            });
        }

        // One source block, byte alignment: the 24-bit length cap keeps the
        // whole payload within a single block, so the block id in the header
        // is just the encoding-symbol id.
        let config =
            ObjectTransmissionInformation::new(payload.len() as u64, symbol_size as u16, 1, 1, 1);
        let encoder = RaptorqEncoder::new(&payload, config);
        // Source symbols first; repair symbols are generated on demand.
        let queue: VecDeque<EncodingPacket> = encoder.get_encoded_packets(0).into();

        Ok(Self {
            encoder,
            queue,
            current: Vec::new(),
            offset: 0,
            payload_len: payload.len() as u32,
            chunk_size,
            encode_id: encode_id & 0x7F,
            repair_generated: 0,
        })
    }

    /// The chunk (block) size in bytes, header included.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// The 7-bit stream identifier carried in every block header.
    pub fn encode_id(&self) -> u8 {
        self.encode_id
    }

    /// Payload length as carried in the block headers.
    pub fn payload_len(&self) -> u32 {
        self.payload_len
    }

    /// RaptorQ transmission parameters, needed by a decoder.
    pub fn transmission_info(&self) -> ObjectTransmissionInformation {
        self.encoder.get_config()
    }

    /// Frame the next packet into `current`, generating a repair batch when
    /// the queue runs dry.
    fn next_block(&mut self) {
        if self.queue.is_empty() {
            for block in self.encoder.get_block_encoders() {
                self.queue
                    .extend(block.repair_packets(self.repair_generated, REPAIR_BATCH));
            }
            self.repair_generated += REPAIR_BATCH;
        }
        let packet = self.queue.pop_front().expect("repair batch is never empty");

        let mut block = Vec::with_capacity(self.chunk_size);
        block.push(self.encode_id);
        block.extend_from_slice(&self.payload_len.to_be_bytes()[1..]);
        let esi = packet.payload_id().encoding_symbol_id();
        block.extend_from_slice(&(esi as u16).to_be_bytes());
        block.extend_from_slice(packet.data());
        debug_assert_eq!(block.len(), self.chunk_size);

        self.current = block;
        self.offset = 0;
    }
}

impl Read for FountainStream {
    /// Never returns 0: the block sequence is unbounded by construction.
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let mut written = 0;
        while written < buf.len() {
            if self.offset == self.current.len() {
                self.next_block();
            }
            let n = (buf.len() - written).min(self.current.len() - self.offset);
            buf[written..written + n]
                .copy_from_slice(&self.current[self.offset..self.offset + n]);
            self.offset += n;
            written += n;
        }
        Ok(written)
    }
}
