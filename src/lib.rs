// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromabar

//! # chromabar
//!
//! Pure-Rust encoder for chromabar, a high-density optical barcode format:
//! data is rendered as grids of colored glyph cells, captured by camera, and
//! decoded on the far side. This crate is the sender half only.
//!
//! Two transmission modes:
//!
//! - **Sequential** ([`Encoder::encode_next`]): the source stream is FEC
//!   framed (Reed-Solomon), bit-striped across one frame per call, and
//!   rendered. Repeated calls walk the stream to exhaustion.
//! - **Fountain** ([`Encoder::create_fountain_stream`]): the whole stream is
//!   (optionally) compressed and RaptorQ-coded into an endless block
//!   sequence; feeding that stream through `encode_next` yields frames the
//!   receiver can consume in any order, with arbitrary loss.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use chromabar::{Encoder, EncoderConfig};
//!
//! let mut source = std::fs::File::open("payload.bin").unwrap();
//! let encoder = Encoder::new(EncoderConfig::default());
//! let mut n = 0;
//! while let Some(frame) = encoder.encode_next(&mut source, None).unwrap() {
//!     frame.save(format!("frame_{n:04}.png")).unwrap();
//!     n += 1;
//! }
//! ```

pub mod bitio;
pub mod compress;
pub mod config;
pub mod ecc;
pub mod encoder;
pub mod error;
pub mod fec;
pub mod fountain;
pub mod grid;
pub mod progress;

pub use bitio::{BitCursor, BitField};
pub use config::{ColorMode, EncoderConfig, FOUNTAIN_BLOCKS_PER_FRAME};
pub use encoder::Encoder;
pub use error::EncodeError;
pub use fec::FecStream;
pub use fountain::{FountainStream, BLOCK_HEADER_LEN, MAX_PAYLOAD_LEN};
pub use grid::GridWriter;
