use tracing::debug;

use crate::code::{Code, WindowClass};

/// Encodes the whole input into a sequence of Codes using greedy longest-match parsing
///
/// # Arguments
/// * `input` - The bytes to encode, never modified
/// * `class` - Window-size class bounding how far back a match may start
///
/// # Returns
/// The Codes in order. Empty input gives an empty sequence.
pub fn encode(input: &[u8], class: WindowClass) -> Vec<Code> {
    let mut encoded = Vec::new();
    let mut position: usize = 0;

    while position < input.len() {
        let lookahead = &input[position..];
        let window = &input[class.window_start(position)..position];
        let code = find_code(window, lookahead);
        position += code.span();
        encoded.push(code);
    }

    debug!(
        input_len = input.len(),
        class = class.bits(),
        codes = encoded.len(),
        "encoded input"
    );
    encoded
}

/// Computes the next Code for a non-empty lookahead
///
/// The match is extended one byte at a time for as long as the prefix still
/// occurs in the window. At least one byte of the lookahead is always left
/// over for the literal.
///
/// # Panics
/// If `lookahead` is empty.
pub fn find_code(window: &[u8], lookahead: &[u8]) -> Code {
    let mut code = Code::literal(lookahead[0]);

    for search_length in 1..lookahead.len() {
        let search = &lookahead[..search_length];
        match rfind(window, search) {
            Some(position) => {
                code.offset = window.len() - position;
                code.length = search_length;
                code.literal = lookahead[search_length];
            }
            None => break,
        }
    }

    code
}

/// Returns the start of the rightmost occurrence of `search` in `window`, if any
pub fn rfind(window: &[u8], search: &[u8]) -> Option<usize> {
    if search.len() > window.len() {
        return None;
    }
    (0..=window.len() - search.len())
        .rev()
        .find(|&position| &window[position..position + search.len()] == search)
}
