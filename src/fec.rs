// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromabar

//! Block-level FEC framing of the source byte stream.
//!
//! [`FecStream`] borrows the caller's source stream for the duration of one
//! frame call and serves it up one Reed-Solomon codeword at a time: each
//! refill reads up to `block_size - ecc_bytes` data bytes and appends
//! `ecc_bytes` parity symbols. With `ecc_bytes == 0` the wrapper is
//! transparent.

use std::io::Read;

use crate::ecc::RsEncoder;
use crate::error::EncodeError;

/// Streaming Reed-Solomon wrapper over a borrowed byte source.
///
/// The source cursor stays with the caller: the wrapper never rewinds or
/// duplicates it, so repeated frame calls continue where the last one left
/// off.
pub struct FecStream<'a, R: Read> {
    source: &'a mut R,
    rs: RsEncoder,
    data_len: usize,
    buffer: Vec<u8>,
    good: bool,
}

impl<'a, R: Read> FecStream<'a, R> {
    /// Wrap `source`, producing `block_size`-byte codewords with `ecc_bytes`
    /// parity symbols each.
    ///
    /// # Panics
    /// Panics if `ecc_bytes >= block_size` or `block_size > 255` (not a
    /// usable RS geometry).
    pub fn new(source: &'a mut R, ecc_bytes: u32, block_size: u32) -> Self {
        assert!(block_size <= 255, "block size {block_size} exceeds 255");
        assert!(
            ecc_bytes < block_size,
            "ecc {ecc_bytes} leaves no data in {block_size}-byte blocks"
        );
        Self {
            source,
            rs: RsEncoder::new(ecc_bytes as usize),
            data_len: (block_size - ecc_bytes) as usize,
            buffer: Vec::with_capacity(block_size as usize),
            good: true,
        }
    }

    /// Whether another refill may produce bytes.
    pub fn good(&self) -> bool {
        self.good
    }

    /// Refill the internal buffer with the next codeword.
    ///
    /// Returns the number of bytes now in [`buffer`](Self::buffer); 0 means
    /// the source is exhausted (and [`good`](Self::good) turns false). A
    /// short final block yields a shortened codeword.
    pub fn readsome(&mut self) -> Result<usize, EncodeError> {
        if !self.good {
            self.buffer.clear();
            return Ok(0);
        }

        let mut chunk = vec![0u8; self.data_len];
        let mut filled = 0;
        // Read::read may return short counts; keep pulling until the block
        // is full or the source ends.
        while filled < self.data_len {
            let n = self.source.read(&mut chunk[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }

        if filled == 0 {
            self.good = false;
            self.buffer.clear();
            return Ok(0);
        }
        if filled < self.data_len {
            self.good = false;
        }

        self.buffer = self.rs.encode_block(&chunk[..filled]);
        Ok(self.buffer.len())
    }

    /// View of the bytes produced by the last [`readsome`](Self::readsome).
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }
}
