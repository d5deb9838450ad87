//! Hash-chained encoder.
//!
//! Produces exactly the same Codes as [`crate::lz::encode`], but instead of
//! rescanning the window for every candidate length it walks a chain of the
//! earlier positions holding the same first byte, newest first.

use std::iter;

use tracing::debug;

use crate::code::{Code, WindowClass};

/// Previous occurrences of every byte value, linked from newest to oldest.
struct ByteChain {
    head: [Option<usize>; 256],
    prev: Vec<Option<usize>>,
}

impl ByteChain {
    fn new(len: usize) -> Self {
        Self {
            head: [None; 256],
            prev: vec![None; len],
        }
    }

    /// Positions must be added in increasing order.
    fn add(&mut self, input: &[u8], position: usize) {
        let byte = input[position] as usize;
        self.prev[position] = self.head[byte];
        self.head[byte] = Some(position);
    }

    /// Positions at or after `window_start` holding `byte`, rightmost first.
    fn candidates(&self, byte: u8, window_start: usize) -> impl Iterator<Item = usize> + '_ {
        iter::successors(self.head[byte as usize], move |&position| self.prev[position])
            .take_while(move |&position| position >= window_start)
    }
}

/// Encodes the whole input, same contract and output as [`crate::lz::encode`]
pub fn encode_chained(input: &[u8], class: WindowClass) -> Vec<Code> {
    let mut chain = ByteChain::new(input.len());
    let mut encoded = Vec::new();
    let mut position: usize = 0;

    while position < input.len() {
        let code = longest_match(&chain, input, position, class.window_start(position));
        let next = position + code.span();
        for added in position..next {
            chain.add(input, added);
        }
        position = next;
        encoded.push(code);
    }

    debug!(
        input_len = input.len(),
        class = class.bits(),
        codes = encoded.len(),
        "encoded input with hash chain"
    );
    encoded
}

fn longest_match(chain: &ByteChain, input: &[u8], position: usize, window_start: usize) -> Code {
    let lookahead = &input[position..];
    let mut code = Code::literal(lookahead[0]);
    let max_length = lookahead.len() - 1;
    if max_length == 0 {
        return code;
    }

    for candidate in chain.candidates(lookahead[0], window_start) {
        // A match may not run past the end of the window.
        let limit = max_length.min(position - candidate);
        if limit <= code.length {
            continue;
        }
        let length = common_prefix(&input[candidate..candidate + limit], &lookahead[..limit]);
        // Strictly longer only: ties keep the rightmost candidate seen first.
        if length > code.length {
            code = Code {
                offset: position - candidate,
                length,
                literal: lookahead[length],
            };
            if length == max_length {
                break;
            }
        }
    }

    code
}

fn common_prefix(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}
