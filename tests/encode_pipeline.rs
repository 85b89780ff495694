// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromabar

//! End-to-end encoding tests: frame production over a shared stream cursor
//! and fountain packaging down to a RaptorQ decode round-trip.

use std::io::{Cursor, Read};

use chromabar::{Encoder, EncoderConfig, BLOCK_HEADER_LEN};
use raptorq::{Decoder, EncodingPacket, PayloadId};

fn test_bytes(n: usize) -> Vec<u8> {
    (0..n).map(|i| (i * 31 % 251) as u8).collect()
}

/// One default frame carries 60 FEC blocks of 125 source bytes each:
/// 12,400 cells × 6 bits = 74,400 bits, split 4/2 between the symbol and
/// color passes.
const SOURCE_BYTES_PER_FRAME: usize = 7_500;

#[test]
fn single_frame_consumes_exactly_one_frame_of_source() {
    let encoder = Encoder::new(EncoderConfig::default());
    let mut src = Cursor::new(test_bytes(SOURCE_BYTES_PER_FRAME));

    let frame = encoder.encode_next(&mut src, None).unwrap();
    assert!(frame.is_some());
    assert_eq!(src.position(), SOURCE_BYTES_PER_FRAME as u64);

    // The stream is spent: the next call reports end of sequence.
    assert!(encoder.encode_next(&mut src, None).unwrap().is_none());
}

#[test]
fn spillover_byte_yields_second_frame() {
    let encoder = Encoder::new(EncoderConfig::default());
    let mut src = Cursor::new(test_bytes(SOURCE_BYTES_PER_FRAME + 1));

    assert!(encoder.encode_next(&mut src, None).unwrap().is_some());
    assert_eq!(src.position(), SOURCE_BYTES_PER_FRAME as u64);

    assert!(encoder.encode_next(&mut src, None).unwrap().is_some());
    assert_eq!(src.position(), SOURCE_BYTES_PER_FRAME as u64 + 1);

    assert!(encoder.encode_next(&mut src, None).unwrap().is_none());
}

#[test]
fn every_byte_is_consumed_exactly_once() {
    // An awkward length spanning several frames: the cursor position after
    // each call shows no byte is skipped or read twice.
    let total = 2 * SOURCE_BYTES_PER_FRAME + 1234;
    let encoder = Encoder::new(EncoderConfig::default());
    let mut src = Cursor::new(test_bytes(total));

    let mut frames = 0;
    let mut last_pos = 0;
    while encoder.encode_next(&mut src, None).unwrap().is_some() {
        frames += 1;
        let pos = src.position();
        assert!(pos > last_pos, "cursor did not advance");
        last_pos = pos;
    }
    assert_eq!(frames, 3);
    assert_eq!(last_pos, total as u64);
}

#[test]
fn empty_stream_yields_no_frame() {
    let encoder = Encoder::new(EncoderConfig::default());
    let mut src = Cursor::new(Vec::<u8>::new());
    assert!(encoder.encode_next(&mut src, None).unwrap().is_none());
}

#[test]
fn fountain_chunk_size_matches_frame_geometry() {
    let encoder = Encoder::new(EncoderConfig::default());
    let mut src = Cursor::new(test_bytes(3000));
    let stream = encoder.create_fountain_stream(&mut src, 0).unwrap();
    // 7,500 post-FEC bytes per frame, ten blocks per frame.
    assert_eq!(stream.chunk_size(), 750);
}

#[test]
fn raw_fountain_payload_decodes_byte_identical() {
    let payload = test_bytes(3000);
    let encoder = Encoder::new(EncoderConfig::default());
    let mut src = Cursor::new(payload.clone());
    let mut stream = encoder.create_fountain_stream(&mut src, 0).unwrap();
    let oti = stream.transmission_info();

    let chunk = stream.chunk_size();
    let mut decoder = Decoder::new(oti);
    for _ in 0..10 {
        let mut block = vec![0u8; chunk];
        stream.read_exact(&mut block).unwrap();
        assert_eq!(block[0], 0); // no encode id set
        let esi = u32::from(u16::from_be_bytes([block[4], block[5]]));
        let packet = EncodingPacket::new(
            PayloadId::new(0, esi),
            block[BLOCK_HEADER_LEN..].to_vec(),
        );
        if let Some(decoded) = decoder.decode(packet) {
            assert_eq!(decoded, payload);
            return;
        }
    }
    panic!("fountain payload failed to decode from one frame's worth of blocks");
}

#[test]
fn compressed_fountain_payload_roundtrips() {
    let original = b"chromabar fountain test ".repeat(800);
    let encoder = Encoder::new(EncoderConfig::default());
    let mut src = Cursor::new(original.clone());
    let mut stream = encoder.create_fountain_stream(&mut src, 6).unwrap();
    let oti = stream.transmission_info();

    let chunk = stream.chunk_size();
    let mut decoder = Decoder::new(oti);
    let mut payload = None;
    for _ in 0..20 {
        let mut block = vec![0u8; chunk];
        stream.read_exact(&mut block).unwrap();
        let esi = u32::from(u16::from_be_bytes([block[4], block[5]]));
        let packet = EncodingPacket::new(
            PayloadId::new(0, esi),
            block[BLOCK_HEADER_LEN..].to_vec(),
        );
        if let Some(decoded) = decoder.decode(packet) {
            payload = Some(decoded);
            break;
        }
    }
    let payload = payload.expect("decode failed");

    let mut decompressed = Vec::new();
    brotli::Decompressor::new(&payload[..], 4096)
        .read_to_end(&mut decompressed)
        .unwrap();
    assert_eq!(decompressed, original);
}

#[test]
fn encode_id_reaches_the_wire_masked() {
    let mut encoder = Encoder::new(EncoderConfig::default());
    encoder.set_encode_id(0xFF);
    let mut src = Cursor::new(test_bytes(2000));
    let mut stream = encoder.create_fountain_stream(&mut src, 0).unwrap();

    let mut block = vec![0u8; stream.chunk_size()];
    stream.read_exact(&mut block).unwrap();
    assert_eq!(block[0], 0x7F);
}

#[test]
fn fountain_stream_feeds_endless_frames() {
    let encoder = Encoder::new(EncoderConfig::default());
    let mut src = Cursor::new(test_bytes(5000));
    let mut stream = encoder.create_fountain_stream(&mut src, 0).unwrap();

    // The fountain never ends, so frame production never reports None.
    for _ in 0..2 {
        let frame = encoder.encode_next(&mut stream, None).unwrap();
        assert!(frame.is_some());
    }
}
