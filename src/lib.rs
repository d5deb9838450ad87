//! Greedy LZ77 encoder.
//!
//! The input is parsed left to right into [`Code`]s: the longest prefix of
//! the remaining bytes that already occurs in a bounded window behind the
//! current position (rightmost occurrence on ties), followed by one literal
//! byte. The [`WindowClass`] picks the window bound and the width of the
//! flattened output elements.
//!
//! ```
//! use lz77::{encode, encode_to_stream, Code, WindowClass};
//!
//! let codes = encode(b"abab", WindowClass::Bits8);
//! assert_eq!(codes[2], Code { offset: 2, length: 1, literal: b'b' });
//!
//! let stream = encode_to_stream(b"abab", WindowClass::Bits8).unwrap();
//! assert_eq!(stream.len(), 3 * codes.len());
//! ```

pub mod chain;
pub mod code;
pub mod error;
pub mod lz;
pub mod stream;

pub use chain::encode_chained;
pub use code::{Code, WindowClass};
pub use error::{Error, Result};
pub use lz::{encode, find_code, rfind};
pub use stream::{encode_to_stream, encoding_to_array, EncodedStream, Element};
