// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromabar

//! Reed-Solomon error correction over GF(2^8), encode side.
//!
//! Systematic RS with the primitive polynomial 0x11D (x^8+x^4+x^3+x^2+1) and
//! a configurable parity length. The decoder lives with the camera-side
//! tooling; this crate only produces codewords.

/// Primitive polynomial for GF(2^8): x^8 + x^4 + x^3 + x^2 + 1 = 0x11D.
const PRIM_POLY: u16 = 0x11D;

/// Maximum RS block size (symbols per codeword).
pub const N_MAX: usize = 255;

/// Precomputed log and exp tables for GF(2^8).
struct GfTables {
    exp: [u8; 512],
    log: [u8; 256],
}

fn build_gf_tables() -> GfTables {
    let mut exp = [0u8; 512];
    let mut log = [0u8; 256];

    let mut x: u16 = 1;
    for i in 0..255u16 {
        exp[i as usize] = x as u8;
        exp[(i + 255) as usize] = x as u8; // wrap-around for easy modular access
        log[x as usize] = i as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIM_POLY;
        }
    }
    // log[0] is undefined, leave as 0
    exp[510] = exp[0];
    exp[511] = exp[1];

    GfTables { exp, log }
}

fn gf_tables() -> &'static GfTables {
    use std::sync::OnceLock;
    static TABLES: OnceLock<GfTables> = OnceLock::new();
    TABLES.get_or_init(build_gf_tables)
}

/// GF(2^8) multiplication.
fn gf_mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let t = gf_tables();
    let log_sum = t.log[a as usize] as usize + t.log[b as usize] as usize;
    t.exp[log_sum]
}

/// GF(2^8) addition (same as XOR).
fn gf_add(a: u8, b: u8) -> u8 {
    a ^ b
}

/// Multiply two polynomials. poly[0] is the highest-degree coefficient.
fn poly_mul(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut result = vec![0u8; a.len() + b.len() - 1];
    for (i, &ac) in a.iter().enumerate() {
        for (j, &bc) in b.iter().enumerate() {
            result[i + j] = gf_add(result[i + j], gf_mul(ac, bc));
        }
    }
    result
}

/// Build the RS generator polynomial g(x) = prod_{i=0}^{2t-1} (x - alpha^i).
/// Returns coefficients from highest to lowest degree.
fn build_gen_poly(parity_len: usize) -> Vec<u8> {
    let t = gf_tables();
    let mut gpoly = vec![1u8];
    for i in 0..parity_len {
        let root = t.exp[i]; // alpha^i
        gpoly = poly_mul(&gpoly, &[1, root]);
    }
    gpoly
}

/// Systematic RS encoder with a fixed parity length.
///
/// Owns its generator polynomial so each stream configuration pays the
/// construction cost once. `parity == 0` degenerates to a pass-through.
pub struct RsEncoder {
    parity: usize,
    gpoly: Vec<u8>,
}

impl RsEncoder {
    /// Create an encoder producing `parity` parity symbols per block.
    ///
    /// # Panics
    /// Panics if `parity > 240` (shorter than 15 data symbols per block is
    /// not a usable code).
    pub fn new(parity: usize) -> Self {
        assert!(parity <= 240, "parity length {parity} exceeds 240");
        Self {
            parity,
            gpoly: build_gen_poly(parity),
        }
    }

    /// Parity symbols per block.
    pub fn parity(&self) -> usize {
        self.parity
    }

    /// Encode one data block, returning `data || parity`.
    ///
    /// Shortened codes (`data.len() < 255 - parity`) are produced by
    /// conceptually zero-padding the data at the front; the parity symbols
    /// cover the virtual full-length block.
    ///
    /// # Panics
    /// Panics if `data.len() + parity` exceeds the 255-symbol block size.
    pub fn encode_block(&self, data: &[u8]) -> Vec<u8> {
        if self.parity == 0 {
            return data.to_vec();
        }
        let k_max = N_MAX - self.parity;
        assert!(
            data.len() <= k_max,
            "data length {} exceeds max {} for parity {}",
            data.len(),
            k_max,
            self.parity
        );

        // LFSR division: remainder of data * x^parity / g(x).
        let mut shift_reg = vec![0u8; self.parity];
        for &byte in data {
            let feedback = gf_add(byte, shift_reg[0]);
            for j in 0..self.parity - 1 {
                shift_reg[j] = gf_add(shift_reg[j + 1], gf_mul(feedback, self.gpoly[j + 1]));
            }
            shift_reg[self.parity - 1] = gf_mul(feedback, self.gpoly[self.parity]);
        }

        let mut encoded = Vec::with_capacity(data.len() + self.parity);
        encoded.extend_from_slice(data);
        encoded.extend_from_slice(&shift_reg);
        encoded
    }
}
