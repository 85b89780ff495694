// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromabar

//! Error types for the encoding pipeline.
//!
//! [`EncodeError`] covers all failure modes from source-stream I/O through
//! fountain packaging. End-of-stream is not an error: `encode_next` signals
//! it by returning `Ok(None)`.

use core::fmt;

/// Errors that can occur while producing frames or packaging a fountain stream.
#[derive(Debug)]
pub enum EncodeError {
    /// Reading the source stream failed.
    Io(std::io::Error),
    /// The compressor failed; no fountain stream is constructed.
    Compression(std::io::Error),
    /// An empty payload cannot be fountain-encoded.
    EmptyPayload,
    /// The payload exceeds the 24-bit length field of the fountain header.
    PayloadTooLarge { size: usize, max: usize },
    /// The requested canvas cannot hold a single data cell.
    CanvasTooSmall { size: u32, min: u32 },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "source stream read failed: {e}"),
            Self::Compression(e) => write!(f, "compression failed: {e}"),
            Self::EmptyPayload => write!(f, "cannot fountain-encode an empty payload"),
            Self::PayloadTooLarge { size, max } => {
                write!(f, "payload too large: {size} bytes exceeds maximum {max} bytes")
            }
            Self::CanvasTooSmall { size, min } => {
                write!(f, "canvas size {size} too small (minimum {min})")
            }
        }
    }
}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) | Self::Compression(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EncodeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
