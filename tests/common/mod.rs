//! Helpers shared by the integration tests.
#![allow(dead_code)]

use lz77::Code;

/// Rebuilds the input from Codes by copying `length` bytes from `offset`
/// back, then appending the literal.
pub fn reconstruct(codes: &[Code]) -> Vec<u8> {
    let mut output = Vec::new();
    for code in codes {
        let start = output.len() - code.offset;
        for i in 0..code.length {
            let byte = output[start + i];
            output.push(byte);
        }
        output.push(code.literal);
    }
    output
}

/// Same as [`reconstruct`], reading a flat `[offset, length, literal]` buffer.
pub fn reconstruct_flat(elements: &[u32]) -> Vec<u8> {
    let codes: Vec<Code> = elements
        .chunks_exact(3)
        .map(|triple| Code {
            offset: triple[0] as usize,
            length: triple[1] as usize,
            literal: triple[2] as u8,
        })
        .collect();
    reconstruct(&codes)
}

/// Deterministic pseudo-random bytes.
pub fn make_random(len: usize, mut seed: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(len);
    while out.len() < len {
        seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
        out.push((seed >> 16) as u8);
    }
    out
}

pub fn make_pattern(len: usize) -> Vec<u8> {
    b"The quick brown fox jumps over the lazy dog. "
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}
